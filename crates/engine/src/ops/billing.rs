//! Subscription billing: materializes due subscriptions into transactions.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, QueryFilter, TransactionTrait, prelude::*};

use crate::{
    ResultEngine, Subscription, SubscriptionStatus, billing, subscriptions, transactions,
    Transaction,
};

use super::{Engine, with_tx};

impl Engine {
    /// Charges every active subscription whose next payment date has passed.
    ///
    /// Each subscription is processed in its own DB transaction: the charge
    /// insert and the next-payment-date advance commit or abort together, and
    /// one subscription's failure does not roll back the others. A
    /// subscription several cycles behind catches up one cycle per run.
    ///
    /// Returns the names of the subscriptions charged.
    pub async fn process_due_subscriptions(
        &self,
        now: DateTime<Utc>,
    ) -> ResultEngine<Vec<String>> {
        let due = subscriptions::Entity::find()
            .filter(subscriptions::Column::Status.eq(SubscriptionStatus::Active.as_str()))
            .filter(subscriptions::Column::NextPaymentDate.lte(now))
            .all(&self.database)
            .await?;

        let mut processed = Vec::with_capacity(due.len());
        for model in due {
            let sub = Subscription::try_from(model)?;
            let name = sub.name.clone();
            match self.charge_subscription(sub, now).await {
                Ok(()) => processed.push(name),
                Err(err) => tracing::error!("failed to charge subscription {name}: {err}"),
            }
        }

        Ok(processed)
    }

    async fn charge_subscription(
        &self,
        sub: Subscription,
        now: DateTime<Utc>,
    ) -> ResultEngine<()> {
        let next = billing::next_payment_after(sub.next_payment_date, sub.billing_cycle)?;
        let tx = Transaction::new(
            sub.user_id.clone(),
            sub.amount,
            sub.name.clone(),
            sub.category.clone(),
            None,
            now,
            true,
            now,
        )?;

        with_tx!(self, |db_tx| {
            transactions::ActiveModel::from(&tx).insert(&db_tx).await?;
            let active = subscriptions::ActiveModel {
                id: ActiveValue::Set(sub.id.to_string()),
                next_payment_date: ActiveValue::Set(next),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            };
            active.update(&db_tx).await?;
            Ok::<(), crate::EngineError>(())
        })
    }
}
