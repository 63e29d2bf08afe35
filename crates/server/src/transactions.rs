use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use api_types::transaction::{
    PageMetadata, TransactionCreated, TransactionListResponse, TransactionUpsert, TransactionView,
};
use engine::{Category, Transaction, TransactionDraft};

use crate::{ServerError, server::ServerState, user};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    page: Option<u64>,
    month: Option<String>,
}

fn view(transaction: Transaction, category: Option<Category>) -> TransactionView {
    TransactionView {
        id: transaction.id,
        amount: transaction.amount,
        description: transaction.description,
        category: transaction.category,
        category_name: category.map(|category| category.name),
        date: transaction.date,
        is_expense: transaction.is_expense,
    }
}

fn draft(body: TransactionUpsert) -> TransactionDraft {
    TransactionDraft {
        amount: body.amount,
        description: body.description,
        category_id: body.category_id,
        date: body.date,
        is_expense: body.is_expense,
    }
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> Result<Json<TransactionListResponse>, ServerError> {
    let page = state
        .engine
        .list_transactions(
            &user.username,
            params.page.unwrap_or(1),
            params.month.as_deref(),
        )
        .await?;

    Ok(Json(TransactionListResponse {
        transactions: page
            .transactions
            .into_iter()
            .map(|(transaction, category)| view(transaction, category))
            .collect(),
        metadata: PageMetadata {
            total_count: page.metadata.total_count,
            total_pages: page.metadata.total_pages,
            current_page: page.metadata.current_page,
            has_next_page: page.metadata.has_next_page,
            has_prev_page: page.metadata.has_prev_page,
        },
    }))
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(body): Json<TransactionUpsert>,
) -> Result<(StatusCode, Json<TransactionCreated>), ServerError> {
    let transaction = state
        .engine
        .create_transaction(&user.username, draft(body))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(TransactionCreated { id: transaction.id }),
    ))
}

pub async fn update(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(body): Json<TransactionUpsert>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .update_transaction(&user.username, &id, draft(body))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_transaction(&user.username, &id).await?;

    Ok(StatusCode::NO_CONTENT)
}
