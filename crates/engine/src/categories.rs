//! Category directory.
//!
//! System categories (`user_id` NULL) are shared; rows with a `user_id` are
//! private custom categories. The slug is the stable machine key; the name is
//! the localized display label.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    Expense,
    Income,
}

impl CategoryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }
}

impl TryFrom<&str> for CategoryKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            other => Err(EngineError::InvalidInput(format!(
                "invalid category kind: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub kind: CategoryKind,
    pub user_id: Option<String>,
    pub sort_order: i32,
}

impl Category {
    pub fn new(
        slug: String,
        name: String,
        kind: CategoryKind,
        user_id: Option<String>,
        sort_order: i32,
    ) -> ResultEngine<Self> {
        if slug.trim().is_empty() || name.trim().is_empty() {
            return Err(EngineError::InvalidInput(
                "category slug and name must not be empty".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            slug,
            name,
            kind,
            user_id,
            sort_order,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub slug: String,
    pub name: String,
    pub kind: String,
    pub user_id: Option<String>,
    pub sort_order: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Category> for ActiveModel {
    fn from(category: &Category) -> Self {
        Self {
            id: ActiveValue::Set(category.id.to_string()),
            slug: ActiveValue::Set(category.slug.clone()),
            name: ActiveValue::Set(category.name.clone()),
            kind: ActiveValue::Set(category.kind.as_str().to_string()),
            user_id: ActiveValue::Set(category.user_id.clone()),
            sort_order: ActiveValue::Set(category.sort_order),
        }
    }
}

impl TryFrom<Model> for Category {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("category not exists".to_string()))?,
            slug: model.slug,
            name: model.name,
            kind: CategoryKind::try_from(model.kind.as_str())?,
            user_id: model.user_id,
            sort_order: model.sort_order,
        })
    }
}
