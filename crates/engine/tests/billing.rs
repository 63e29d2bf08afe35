use chrono::{NaiveDate, Utc};
use sea_orm::{ConnectionTrait, Database, Statement};

use engine::{BillingCycle, Engine, SubscriptionDraft, SubscriptionStatus};
use migration::MigratorTrait;

async fn engine_with_user() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(
        backend,
        "INSERT INTO users (username, password) VALUES (?, ?)",
        vec!["alice".into(), "password".into()],
    ))
    .await
    .unwrap();
    Engine::builder().database(db).build()
}

fn date(y: i32, m: u32, d: u32) -> chrono::DateTime<Utc> {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
}

fn netflix(next_payment_date: chrono::DateTime<Utc>) -> SubscriptionDraft {
    SubscriptionDraft {
        name: "Netflix".to_string(),
        amount: 1490,
        currency: None,
        billing_cycle: BillingCycle::Monthly,
        next_payment_date,
        category: "entertainment".to_string(),
        status: None,
    }
}

#[tokio::test]
async fn due_subscription_is_charged_once_per_cycle() {
    let engine = engine_with_user().await;
    engine
        .create_subscription("alice", netflix(date(2024, 1, 1)))
        .await
        .unwrap();

    let now = date(2024, 1, 15);
    let processed = engine.process_due_subscriptions(now).await.unwrap();
    assert_eq!(processed, vec!["Netflix".to_string()]);

    // The charge landed in the ledger, dated to the run.
    let page = engine.list_transactions("alice", 1, None).await.unwrap();
    assert_eq!(page.transactions.len(), 1);
    let (charge, _) = &page.transactions[0];
    assert_eq!(charge.amount, 1490);
    assert!(charge.is_expense);
    assert_eq!(charge.category, "entertainment");
    assert_eq!(charge.date, now);

    // And the schedule advanced one calendar month.
    let subs = engine.list_subscriptions("alice").await.unwrap();
    assert_eq!(subs[0].next_payment_date, date(2024, 2, 1));

    // A second run in the same cycle is a no-op.
    let processed = engine.process_due_subscriptions(now).await.unwrap();
    assert!(processed.is_empty());
    let page = engine.list_transactions("alice", 1, None).await.unwrap();
    assert_eq!(page.metadata.total_count, 1);
}

#[tokio::test]
async fn cancelled_and_future_subscriptions_are_skipped() {
    let engine = engine_with_user().await;

    let mut cancelled = netflix(date(2024, 1, 1));
    cancelled.name = "Gym".to_string();
    cancelled.status = Some(SubscriptionStatus::Cancelled);
    engine.create_subscription("alice", cancelled).await.unwrap();

    let mut future = netflix(date(2024, 6, 1));
    future.name = "Hosting".to_string();
    engine.create_subscription("alice", future).await.unwrap();

    let processed = engine
        .process_due_subscriptions(date(2024, 1, 15))
        .await
        .unwrap();
    assert!(processed.is_empty());

    let page = engine.list_transactions("alice", 1, None).await.unwrap();
    assert!(page.transactions.is_empty());
}

#[tokio::test]
async fn yearly_subscription_advances_a_full_year() {
    let engine = engine_with_user().await;

    let mut domain = netflix(date(2024, 2, 29));
    domain.name = "Domain".to_string();
    domain.billing_cycle = BillingCycle::Yearly;
    engine.create_subscription("alice", domain).await.unwrap();

    engine
        .process_due_subscriptions(date(2024, 3, 1))
        .await
        .unwrap();

    let subs = engine.list_subscriptions("alice").await.unwrap();
    // Leap day clamps to the 28th in the non-leap target year.
    assert_eq!(subs[0].next_payment_date, date(2025, 2, 28));
}

#[tokio::test]
async fn a_lagging_subscription_catches_up_one_cycle_per_run() {
    let engine = engine_with_user().await;
    engine
        .create_subscription("alice", netflix(date(2024, 1, 1)))
        .await
        .unwrap();

    let now = date(2024, 3, 10);
    engine.process_due_subscriptions(now).await.unwrap();
    let subs = engine.list_subscriptions("alice").await.unwrap();
    assert_eq!(subs[0].next_payment_date, date(2024, 2, 1));

    // Still behind, so the next run charges again.
    let processed = engine.process_due_subscriptions(now).await.unwrap();
    assert_eq!(processed.len(), 1);
    let subs = engine.list_subscriptions("alice").await.unwrap();
    assert_eq!(subs[0].next_payment_date, date(2024, 3, 1));
}

#[tokio::test]
async fn subscription_crud_roundtrip() {
    let engine = engine_with_user().await;
    let created = engine
        .create_subscription("alice", netflix(date(2024, 1, 1)))
        .await
        .unwrap();
    assert_eq!(created.currency, "JPY");
    assert_eq!(created.status, SubscriptionStatus::Active);

    let mut updated = netflix(date(2024, 1, 1));
    updated.amount = 1980;
    updated.status = Some(SubscriptionStatus::Cancelled);
    engine
        .update_subscription("alice", &created.id.to_string(), updated)
        .await
        .unwrap();

    let subs = engine.list_subscriptions("alice").await.unwrap();
    assert_eq!(subs[0].amount, 1980);
    assert_eq!(subs[0].status, SubscriptionStatus::Cancelled);

    engine
        .delete_subscription("alice", &created.id.to_string())
        .await
        .unwrap();
    assert!(engine.list_subscriptions("alice").await.unwrap().is_empty());
}
