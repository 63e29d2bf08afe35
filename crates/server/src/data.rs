use axum::{
    Extension, Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};

use api_types::data::ImportResult;
use engine::EngineError;

use crate::{ServerError, server::ServerState, user};

pub async fn import(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    body: String,
) -> Result<Json<ImportResult>, ServerError> {
    if body.trim().is_empty() {
        return Err(ServerError::Generic("no file selected".to_string()));
    }

    let outcome = state
        .engine
        .import_csv(&user.username, &body)
        .await
        .map_err(|err| match err {
            EngineError::Database(db_err) => {
                tracing::error!("import store failure: {db_err}");
                ServerError::Internal("import failed".to_string())
            }
            other => ServerError::Engine(other),
        })?;

    Ok(Json(ImportResult {
        inserted: outcome.inserted,
        skipped: outcome.skipped,
    }))
}

pub async fn export(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<impl IntoResponse, ServerError> {
    let csv = state.engine.export_csv(&user.username).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"transactions.csv\"",
            ),
        ],
        csv,
    ))
}
