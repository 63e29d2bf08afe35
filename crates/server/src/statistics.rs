use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde::Deserialize;

use api_types::summary::{CategoryStatView, MonthlyStatView, SummaryResponse};

use crate::{ServerError, server::ServerState, user};

#[derive(Debug, Deserialize)]
pub struct SummaryParams {
    /// `YYYY-MM` month to scope the summary card and breakdown to.
    month: Option<String>,
}

pub async fn get_summary(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Query(params): Query<SummaryParams>,
) -> Result<Json<SummaryResponse>, ServerError> {
    let summary = state
        .engine
        .summary(&user.username, params.month.as_deref())
        .await?;

    Ok(Json(SummaryResponse {
        month: summary.month,
        total_income: summary.period.total_income,
        total_expense: summary.period.total_expense,
        balance: summary.period.balance,
        category_breakdown: summary
            .categories
            .into_iter()
            .map(|stat| CategoryStatView {
                category: stat.category,
                amount: stat.amount,
            })
            .collect(),
        monthly_trends: summary
            .monthly
            .into_iter()
            .map(|stat| MonthlyStatView {
                month: stat.month,
                income: stat.income,
                expense: stat.expense,
            })
            .collect(),
    }))
}
