use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use api_types::subscription::{
    BillingCycle, SubscriptionCreated, SubscriptionListResponse, SubscriptionStatus,
    SubscriptionUpsert, SubscriptionView,
};
use engine::{Subscription, SubscriptionDraft};

use crate::{ServerError, server::ServerState, user};

fn cycle_view(cycle: engine::BillingCycle) -> BillingCycle {
    match cycle {
        engine::BillingCycle::Monthly => BillingCycle::Monthly,
        engine::BillingCycle::Yearly => BillingCycle::Yearly,
    }
}

fn cycle_from_api(cycle: BillingCycle) -> engine::BillingCycle {
    match cycle {
        BillingCycle::Monthly => engine::BillingCycle::Monthly,
        BillingCycle::Yearly => engine::BillingCycle::Yearly,
    }
}

fn status_view(status: engine::SubscriptionStatus) -> SubscriptionStatus {
    match status {
        engine::SubscriptionStatus::Active => SubscriptionStatus::Active,
        engine::SubscriptionStatus::Cancelled => SubscriptionStatus::Cancelled,
    }
}

fn status_from_api(status: SubscriptionStatus) -> engine::SubscriptionStatus {
    match status {
        SubscriptionStatus::Active => engine::SubscriptionStatus::Active,
        SubscriptionStatus::Cancelled => engine::SubscriptionStatus::Cancelled,
    }
}

fn view(subscription: Subscription) -> SubscriptionView {
    SubscriptionView {
        id: subscription.id,
        name: subscription.name,
        amount: subscription.amount,
        currency: subscription.currency,
        billing_cycle: cycle_view(subscription.billing_cycle),
        next_payment_date: subscription.next_payment_date,
        category: subscription.category,
        status: status_view(subscription.status),
    }
}

fn draft(body: SubscriptionUpsert) -> SubscriptionDraft {
    SubscriptionDraft {
        name: body.name,
        amount: body.amount,
        currency: body.currency,
        billing_cycle: cycle_from_api(body.billing_cycle),
        next_payment_date: body.next_payment_date,
        category: body.category,
        status: body.status.map(status_from_api),
    }
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<SubscriptionListResponse>, ServerError> {
    let subscriptions = state.engine.list_subscriptions(&user.username).await?;

    Ok(Json(SubscriptionListResponse {
        subscriptions: subscriptions.into_iter().map(view).collect(),
    }))
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(body): Json<SubscriptionUpsert>,
) -> Result<(StatusCode, Json<SubscriptionCreated>), ServerError> {
    let subscription = state
        .engine
        .create_subscription(&user.username, draft(body))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SubscriptionCreated {
            id: subscription.id,
        }),
    ))
}

pub async fn update(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(body): Json<SubscriptionUpsert>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .update_subscription(&user.username, &id, draft(body))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .delete_subscription(&user.username, &id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
