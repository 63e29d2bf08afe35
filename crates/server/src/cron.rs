use axum::{Json, extract::State, http::StatusCode};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use chrono::Utc;

use api_types::cron::CronOutcome;

use crate::server::ServerState;

/// Charges every due active subscription. Guarded by a bearer secret rather
/// than user credentials, since schedulers call it headlessly.
pub async fn process_subscriptions(
    State(state): State<ServerState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
) -> Result<Json<CronOutcome>, StatusCode> {
    let authorized = bearer
        .as_ref()
        .is_some_and(|header| header.token() == state.cron_secret);
    if !authorized {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let processed = state
        .engine
        .process_due_subscriptions(Utc::now())
        .await
        .map_err(|err| {
            tracing::error!("subscription billing run failed: {err}");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Json(CronOutcome {
        success: true,
        processed,
    }))
}
