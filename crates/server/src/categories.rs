use axum::{Extension, Json, extract::State, http::StatusCode};

use api_types::category::{CategoryListResponse, CategoryNew, CategoryView};
use engine::{Category, CategoryDraft, CategoryKind};

use crate::{ServerError, server::ServerState, user};

fn kind_view(kind: CategoryKind) -> api_types::CategoryKind {
    match kind {
        CategoryKind::Expense => api_types::CategoryKind::Expense,
        CategoryKind::Income => api_types::CategoryKind::Income,
    }
}

fn kind_from_api(kind: api_types::CategoryKind) -> CategoryKind {
    match kind {
        api_types::CategoryKind::Expense => CategoryKind::Expense,
        api_types::CategoryKind::Income => CategoryKind::Income,
    }
}

fn view(category: Category) -> CategoryView {
    CategoryView {
        id: category.id,
        slug: category.slug,
        name: category.name,
        kind: kind_view(category.kind),
        user_id: category.user_id,
        sort_order: category.sort_order,
    }
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<CategoryListResponse>, ServerError> {
    let categories = state.engine.list_categories(&user.username).await?;

    Ok(Json(CategoryListResponse {
        categories: categories.into_iter().map(view).collect(),
    }))
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(body): Json<CategoryNew>,
) -> Result<(StatusCode, Json<CategoryView>), ServerError> {
    let category = state
        .engine
        .create_category(
            &user.username,
            CategoryDraft {
                slug: body.slug,
                name: body.name,
                kind: kind_from_api(body.kind),
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(view(category))))
}
