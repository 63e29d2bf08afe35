//! Subscription CRUD.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};

use crate::{
    BillingCycle, EngineError, ResultEngine, Subscription, SubscriptionStatus, subscriptions,
};

use super::Engine;

const DEFAULT_CURRENCY: &str = "JPY";

/// Full-field payload for subscription create/update.
#[derive(Clone, Debug)]
pub struct SubscriptionDraft {
    pub name: String,
    pub amount: i64,
    pub currency: Option<String>,
    pub billing_cycle: BillingCycle,
    pub next_payment_date: DateTime<Utc>,
    /// Category slug charged transactions are filed under.
    pub category: String,
    pub status: Option<SubscriptionStatus>,
}

impl Engine {
    /// Lists a user's subscriptions, next payment first.
    pub async fn list_subscriptions(&self, user_id: &str) -> ResultEngine<Vec<Subscription>> {
        let models = subscriptions::Entity::find()
            .filter(subscriptions::Column::UserId.eq(user_id))
            .order_by_asc(subscriptions::Column::NextPaymentDate)
            .all(&self.database)
            .await?;
        models.into_iter().map(Subscription::try_from).collect()
    }

    pub async fn create_subscription(
        &self,
        user_id: &str,
        draft: SubscriptionDraft,
    ) -> ResultEngine<Subscription> {
        let mut sub = Subscription::new(
            user_id.to_string(),
            draft.name,
            draft.amount,
            draft
                .currency
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            draft.billing_cycle,
            draft.next_payment_date,
            draft.category,
            Utc::now(),
        )?;
        if let Some(status) = draft.status {
            sub.status = status;
        }
        subscriptions::ActiveModel::from(&sub)
            .insert(&self.database)
            .await?;
        Ok(sub)
    }

    /// Full-field replace of an owned subscription.
    pub async fn update_subscription(
        &self,
        user_id: &str,
        id: &str,
        draft: SubscriptionDraft,
    ) -> ResultEngine<()> {
        let model = self.owned_subscription(id, user_id).await?;
        if draft.amount <= 0 {
            return Err(EngineError::InvalidInput("amount must be > 0".to_string()));
        }
        let status = match draft.status {
            Some(status) => status,
            None => SubscriptionStatus::try_from(model.status.as_str())?,
        };

        let active = subscriptions::ActiveModel {
            id: ActiveValue::Set(model.id),
            name: ActiveValue::Set(draft.name),
            amount: ActiveValue::Set(draft.amount),
            currency: ActiveValue::Set(draft.currency.unwrap_or(model.currency)),
            billing_cycle: ActiveValue::Set(draft.billing_cycle.as_str().to_string()),
            next_payment_date: ActiveValue::Set(draft.next_payment_date),
            category: ActiveValue::Set(draft.category),
            status: ActiveValue::Set(status.as_str().to_string()),
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        };
        active.update(&self.database).await?;
        Ok(())
    }

    pub async fn delete_subscription(&self, user_id: &str, id: &str) -> ResultEngine<()> {
        let model = self.owned_subscription(id, user_id).await?;
        subscriptions::Entity::delete_by_id(model.id)
            .exec(&self.database)
            .await?;
        Ok(())
    }

    async fn owned_subscription(
        &self,
        id: &str,
        user_id: &str,
    ) -> ResultEngine<subscriptions::Model> {
        let model = subscriptions::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("subscription not exists".to_string()))?;
        if model.user_id != user_id {
            return Err(EngineError::KeyNotFound(
                "subscription not exists".to_string(),
            ));
        }
        Ok(model)
    }
}
