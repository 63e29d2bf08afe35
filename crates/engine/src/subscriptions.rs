//! Subscription primitives.
//!
//! A `Subscription` is a recurring charge materialized into transactions by
//! the billing cron. `next_payment_date` only ever advances, by exactly one
//! billing cycle per firing.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingCycle {
    Monthly,
    Yearly,
}

impl BillingCycle {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl TryFrom<&str> for BillingCycle {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            other => Err(EngineError::InvalidInput(format!(
                "invalid billing cycle: {other}"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Cancelled,
}

impl SubscriptionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Cancelled => "cancelled",
        }
    }
}

impl TryFrom<&str> for SubscriptionStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "active" => Ok(Self::Active),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(EngineError::InvalidInput(format!(
                "invalid subscription status: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: Uuid,
    pub user_id: String,
    pub name: String,
    pub amount: i64,
    pub currency: String,
    pub billing_cycle: BillingCycle,
    pub next_payment_date: DateTime<Utc>,
    /// Category slug charged transactions are filed under.
    pub category: String,
    pub status: SubscriptionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Subscription {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: String,
        name: String,
        amount: i64,
        currency: String,
        billing_cycle: BillingCycle,
        next_payment_date: DateTime<Utc>,
        category: String,
        now: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        if amount <= 0 {
            return Err(EngineError::InvalidInput("amount must be > 0".to_string()));
        }
        if name.trim().is_empty() {
            return Err(EngineError::InvalidInput(
                "subscription name must not be empty".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            name,
            amount,
            currency,
            billing_cycle,
            next_payment_date,
            category,
            status: SubscriptionStatus::Active,
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "subscriptions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub amount: i64,
    pub currency: String,
    pub billing_cycle: String,
    pub next_payment_date: DateTimeUtc,
    pub category: String,
    pub status: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Subscription> for ActiveModel {
    fn from(sub: &Subscription) -> Self {
        Self {
            id: ActiveValue::Set(sub.id.to_string()),
            user_id: ActiveValue::Set(sub.user_id.clone()),
            name: ActiveValue::Set(sub.name.clone()),
            amount: ActiveValue::Set(sub.amount),
            currency: ActiveValue::Set(sub.currency.clone()),
            billing_cycle: ActiveValue::Set(sub.billing_cycle.as_str().to_string()),
            next_payment_date: ActiveValue::Set(sub.next_payment_date),
            category: ActiveValue::Set(sub.category.clone()),
            status: ActiveValue::Set(sub.status.as_str().to_string()),
            created_at: ActiveValue::Set(sub.created_at),
            updated_at: ActiveValue::Set(sub.updated_at),
        }
    }
}

impl TryFrom<Model> for Subscription {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("subscription not exists".to_string()))?,
            user_id: model.user_id,
            name: model.name,
            amount: model.amount,
            currency: model.currency,
            billing_cycle: BillingCycle::try_from(model.billing_cycle.as_str())?,
            next_payment_date: model.next_payment_date,
            category: model.category,
            status: SubscriptionStatus::try_from(model.status.as_str())?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
