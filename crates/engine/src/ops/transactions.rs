//! Transaction CRUD and paginated listing.

use chrono::{DateTime, Months, NaiveDate, Utc};
use sea_orm::{
    ActiveValue, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, prelude::*,
};

use crate::{Category, EngineError, ResultEngine, Transaction, categories, transactions};

use super::Engine;

/// Rows per page in transaction listings.
pub const PAGE_SIZE: u64 = 10;

/// Full-field replacement payload for create/update.
#[derive(Clone, Debug)]
pub struct TransactionDraft {
    pub amount: i64,
    pub description: String,
    pub category_id: String,
    pub date: DateTime<Utc>,
    pub is_expense: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageMetadata {
    pub total_count: u64,
    pub total_pages: u64,
    pub current_page: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

#[derive(Debug)]
pub struct TransactionPage {
    pub transactions: Vec<(Transaction, Option<Category>)>,
    pub metadata: PageMetadata,
}

/// Half-open `[start of month, start of next month)` range for a `YYYY-MM`
/// key.
pub(super) fn month_range(month: &str) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").ok()?;
    let start = start.and_hms_opt(0, 0, 0)?.and_utc();
    let end = start.checked_add_months(Months::new(1))?;
    Some((start, end))
}

impl Engine {
    /// Lists a user's transactions newest first, optionally restricted to one
    /// calendar month, with offset pagination.
    pub async fn list_transactions(
        &self,
        user_id: &str,
        page: u64,
        month: Option<&str>,
    ) -> ResultEngine<TransactionPage> {
        let current_page = page.max(1);

        let mut query =
            transactions::Entity::find().filter(transactions::Column::UserId.eq(user_id));
        if let Some(month) = month {
            let (start, end) = month_range(month)
                .ok_or_else(|| EngineError::InvalidInput(format!("invalid month: {month}")))?;
            query = query
                .filter(transactions::Column::Date.gte(start))
                .filter(transactions::Column::Date.lt(end));
        }

        let total_count = query.clone().count(&self.database).await?;

        let rows = query
            .order_by_desc(transactions::Column::Date)
            .find_also_related(categories::Entity)
            .offset((current_page - 1) * PAGE_SIZE)
            .limit(PAGE_SIZE)
            .all(&self.database)
            .await?;

        let mut out = Vec::with_capacity(rows.len());
        for (tx_model, category_model) in rows {
            let tx = Transaction::try_from(tx_model)?;
            let category = category_model.map(Category::try_from).transpose()?;
            out.push((tx, category));
        }

        let total_pages = total_count.div_ceil(PAGE_SIZE);
        Ok(TransactionPage {
            transactions: out,
            metadata: PageMetadata {
                total_count,
                total_pages,
                current_page,
                has_next_page: current_page < total_pages,
                has_prev_page: current_page > 1,
            },
        })
    }

    /// Creates a transaction; the referenced category must exist and be
    /// visible to the user. The legacy slug column is written from the
    /// resolved category.
    pub async fn create_transaction(
        &self,
        user_id: &str,
        draft: TransactionDraft,
    ) -> ResultEngine<Transaction> {
        let category = self.visible_category(&draft.category_id, user_id).await?;
        let tx = Transaction::new(
            user_id.to_string(),
            draft.amount,
            draft.description,
            category.slug,
            Some(category.id),
            draft.date,
            draft.is_expense,
            Utc::now(),
        )?;
        transactions::ActiveModel::from(&tx)
            .insert(&self.database)
            .await?;
        Ok(tx)
    }

    /// Full-field replace of an owned transaction (no partial patches).
    pub async fn update_transaction(
        &self,
        user_id: &str,
        id: &str,
        draft: TransactionDraft,
    ) -> ResultEngine<()> {
        let model = self.owned_transaction(id, user_id).await?;
        if draft.amount <= 0 {
            return Err(EngineError::InvalidInput("amount must be > 0".to_string()));
        }
        let category = self.visible_category(&draft.category_id, user_id).await?;

        let active = transactions::ActiveModel {
            id: ActiveValue::Set(model.id),
            amount: ActiveValue::Set(draft.amount),
            description: ActiveValue::Set(draft.description),
            is_expense: ActiveValue::Set(draft.is_expense),
            category: ActiveValue::Set(category.slug),
            category_id: ActiveValue::Set(Some(category.id.to_string())),
            date: ActiveValue::Set(draft.date),
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        };
        active.update(&self.database).await?;
        Ok(())
    }

    /// Deletes an owned transaction.
    pub async fn delete_transaction(&self, user_id: &str, id: &str) -> ResultEngine<()> {
        let model = self.owned_transaction(id, user_id).await?;
        transactions::Entity::delete_by_id(model.id)
            .exec(&self.database)
            .await?;
        Ok(())
    }

    async fn owned_transaction(&self, id: &str, user_id: &str) -> ResultEngine<transactions::Model> {
        let model = transactions::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("transaction not exists".to_string()))?;
        if model.user_id != user_id {
            return Err(EngineError::KeyNotFound("transaction not exists".to_string()));
        }
        Ok(model)
    }
}
