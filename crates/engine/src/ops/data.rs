//! CSV import and export operations.

use chrono::{NaiveTime, Utc};
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};
use uuid::Uuid;

use crate::{
    Category, ResultEngine, Transaction, categories, export, import, transactions,
};

use super::Engine;

/// Result of a CSV import: rows inserted vs. rows skipped as duplicates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImportOutcome {
    pub inserted: usize,
    pub skipped: usize,
}

impl Engine {
    /// Imports CSV text for a user, deduplicating against their existing
    /// transactions. The insert is one bulk operation: all rows commit or
    /// none do.
    ///
    /// The preceding read is not held in a transaction with the insert; two
    /// concurrent imports for the same user can double-insert (accepted
    /// race).
    pub async fn import_csv(&self, user_id: &str, text: &str) -> ResultEngine<ImportOutcome> {
        let existing_models = transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id))
            .all(&self.database)
            .await?;
        let existing: Vec<Transaction> = existing_models
            .into_iter()
            .map(Transaction::try_from)
            .collect::<ResultEngine<_>>()?;
        let directory = self.list_categories(user_id).await?;

        let (records, skipped) = import::reconcile(text, &directory, &existing)?;
        let inserted = records.len();

        if !records.is_empty() {
            let now = Utc::now();
            let models: Vec<transactions::ActiveModel> = records
                .into_iter()
                .map(|record| transactions::ActiveModel {
                    id: ActiveValue::Set(Uuid::new_v4().to_string()),
                    user_id: ActiveValue::Set(user_id.to_string()),
                    amount: ActiveValue::Set(record.amount),
                    description: ActiveValue::Set(record.description),
                    is_expense: ActiveValue::Set(record.is_expense),
                    category: ActiveValue::Set(record.slug),
                    category_id: ActiveValue::Set(record.category_id.map(|id| id.to_string())),
                    date: ActiveValue::Set(record.date.and_time(NaiveTime::MIN).and_utc()),
                    created_at: ActiveValue::Set(now),
                    updated_at: ActiveValue::Set(now),
                })
                .collect();
            transactions::Entity::insert_many(models)
                .exec(&self.database)
                .await?;
        }

        tracing::info!(inserted, skipped, "csv import reconciled");
        Ok(ImportOutcome { inserted, skipped })
    }

    /// Renders a user's transactions (newest first, joined with their
    /// category records) as CSV text.
    pub async fn export_csv(&self, user_id: &str) -> ResultEngine<String> {
        let rows = transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id))
            .order_by_desc(transactions::Column::Date)
            .find_also_related(categories::Entity)
            .all(&self.database)
            .await?;

        let mut pairs = Vec::with_capacity(rows.len());
        for (tx_model, category_model) in rows {
            let tx = Transaction::try_from(tx_model)?;
            let category = category_model.map(Category::try_from).transpose()?;
            pairs.push((tx, category));
        }

        Ok(export::render(&pairs))
    }
}
