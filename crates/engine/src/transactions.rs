//! Transaction primitives.
//!
//! A `Transaction` is a single income or expense record. The amount is always
//! a positive integer in minor currency units; direction is carried by
//! `is_expense`, never by the amount's sign.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: String,
    pub amount: i64,
    pub description: String,
    pub is_expense: bool,
    /// Legacy category slug; always populated, also for rows that carry a
    /// resolved `category_id`.
    pub category: String,
    pub category_id: Option<Uuid>,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: String,
        amount: i64,
        description: String,
        category: String,
        category_id: Option<Uuid>,
        date: DateTime<Utc>,
        is_expense: bool,
        now: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        if amount <= 0 {
            return Err(EngineError::InvalidInput("amount must be > 0".to_string()));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            amount,
            description,
            is_expense,
            category,
            category_id,
            date,
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub amount: i64,
    pub description: String,
    pub is_expense: bool,
    pub category: String,
    pub category_id: Option<String>,
    pub date: DateTimeUtc,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Categories,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Transaction> for ActiveModel {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: ActiveValue::Set(tx.id.to_string()),
            user_id: ActiveValue::Set(tx.user_id.clone()),
            amount: ActiveValue::Set(tx.amount),
            description: ActiveValue::Set(tx.description.clone()),
            is_expense: ActiveValue::Set(tx.is_expense),
            category: ActiveValue::Set(tx.category.clone()),
            category_id: ActiveValue::Set(tx.category_id.map(|id| id.to_string())),
            date: ActiveValue::Set(tx.date),
            created_at: ActiveValue::Set(tx.created_at),
            updated_at: ActiveValue::Set(tx.updated_at),
        }
    }
}

impl TryFrom<Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("transaction not exists".to_string()))?,
            user_id: model.user_id,
            amount: model.amount,
            description: model.description,
            is_expense: model.is_expense,
            category: model.category,
            category_id: model.category_id.and_then(|s| Uuid::parse_str(&s).ok()),
            date: model.date,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
