//! Dashboard summary: period totals, category breakdown, monthly trends.

use chrono::Utc;
use sea_orm::{QueryFilter, QueryOrder, prelude::*};

use crate::{
    ResultEngine, Transaction,
    metrics::{self, CategoryStat, MonthlyStat, PeriodSummary},
    transactions,
};

use super::Engine;

#[derive(Clone, Debug)]
pub struct Summary {
    /// The `YYYY-MM` key the period views are scoped to.
    pub month: String,
    pub period: PeriodSummary,
    pub categories: Vec<CategoryStat>,
    pub monthly: Vec<MonthlyStat>,
}

impl Engine {
    /// Computes the dashboard views for one user.
    ///
    /// Summary card and category breakdown cover the given month (default:
    /// the current one); the monthly trend series covers all history.
    pub async fn summary(&self, user_id: &str, month: Option<&str>) -> ResultEngine<Summary> {
        let month = month
            .map(ToString::to_string)
            .unwrap_or_else(|| metrics::month_key(&Utc::now()));

        let models = transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id))
            .order_by_desc(transactions::Column::Date)
            .all(&self.database)
            .await?;
        let all: Vec<Transaction> = models
            .into_iter()
            .map(Transaction::try_from)
            .collect::<ResultEngine<_>>()?;

        let month_subset: Vec<Transaction> = all
            .iter()
            .filter(|t| metrics::month_key(&t.date) == month)
            .cloned()
            .collect();

        Ok(Summary {
            period: metrics::period_summary(&month_subset),
            categories: metrics::category_breakdown(&month_subset),
            monthly: metrics::monthly_trends(&all),
            month,
        })
    }
}
