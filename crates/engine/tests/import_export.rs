use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, Database, Statement};

use engine::{Engine, EngineError, TransactionDraft};
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

#[tokio::test]
async fn import_inserts_rows_and_resolves_labels() {
    let engine = engine_with_user().await;
    let csv = "日付,内容,金額,カテゴリ,収支タイプ\n\
               2024-01-05,\"スーパー\",2300,食費,支出\n\
               2024-01-25,\"1月給与\",250000,給与,収入";

    let outcome = engine.import_csv("alice", csv).await.unwrap();
    assert_eq!(outcome.inserted, 2);
    assert_eq!(outcome.skipped, 0);

    let page = engine.list_transactions("alice", 1, None).await.unwrap();
    assert_eq!(page.transactions.len(), 2);

    let (salary, category) = &page.transactions[0];
    assert_eq!(salary.amount, 250_000);
    assert!(!salary.is_expense);
    assert_eq!(salary.category, "salary");
    assert_eq!(category.as_ref().map(|c| c.name.as_str()), Some("給与"));

    let (groceries, _) = &page.transactions[1];
    assert_eq!(groceries.category, "food");
    assert_eq!(
        groceries.date,
        NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc()
    );
}

#[tokio::test]
async fn reimporting_the_same_file_inserts_nothing() {
    let engine = engine_with_user().await;
    let csv = "日付,内容,金額,カテゴリ,収支タイプ\n\
               2024-01-05,\"スーパー\",2300,食費,支出\n\
               2024-01-06,\"バス\",210,交通費,支出";

    let first = engine.import_csv("alice", csv).await.unwrap();
    assert_eq!(first.inserted, 2);

    let second = engine.import_csv("alice", csv).await.unwrap();
    assert_eq!(second.inserted, 0);
    assert_eq!(second.skipped, 2);

    let page = engine.list_transactions("alice", 1, None).await.unwrap();
    assert_eq!(page.metadata.total_count, 2);
}

#[tokio::test]
async fn overlapping_file_only_inserts_the_new_rows() {
    let engine = engine_with_user().await;

    engine
        .import_csv(
            "alice",
            "2024-01-05,\"スーパー\",2300,食費,支出\n2024-01-06,\"バス\",210,交通費,支出",
        )
        .await
        .unwrap();

    let overlap = "2024-01-05,\"スーパー\",2300,食費,支出\n\
                   2024-01-06,\"バス\",210,交通費,支出\n\
                   2024-01-07,\"カフェ\",600,食費,支出\n\
                   2024-01-08,\"薬局\",980,日用品,支出";

    let outcome = engine.import_csv("alice", overlap).await.unwrap();
    assert_eq!(outcome.inserted, 2);
    assert_eq!(outcome.skipped, 2);

    let rerun = engine.import_csv("alice", overlap).await.unwrap();
    assert_eq!(rerun.inserted, 0);
    assert_eq!(rerun.skipped, 4);
}

#[tokio::test]
async fn export_then_import_is_a_full_noop() {
    let engine = engine_with_user().await;
    let food = engine
        .list_categories("alice")
        .await
        .unwrap()
        .into_iter()
        .find(|c| c.slug == "food")
        .unwrap()
        .id
        .to_string();

    for (day, amount) in [(3, 1200), (9, 800)] {
        engine
            .create_transaction(
                "alice",
                TransactionDraft {
                    amount,
                    description: format!("meal {day}"),
                    category_id: food.clone(),
                    date: NaiveDate::from_ymd_opt(2024, 3, day)
                        .unwrap()
                        .and_hms_opt(0, 0, 0)
                        .unwrap()
                        .and_utc(),
                    is_expense: true,
                },
            )
            .await
            .unwrap();
    }

    let exported = engine.export_csv("alice").await.unwrap();
    assert!(exported.starts_with("日付,内容,金額,カテゴリ,収支タイプ\n"));

    let outcome = engine.import_csv("alice", &exported).await.unwrap();
    assert_eq!(outcome.inserted, 0);
    assert_eq!(outcome.skipped, 2);
}

#[tokio::test]
async fn unknown_label_lands_in_the_fallback_category() {
    let engine = engine_with_user().await;

    engine
        .import_csv("alice", "2024-01-05,\"謎の出費\",500,宇宙旅行,支出")
        .await
        .unwrap();

    let page = engine.list_transactions("alice", 1, None).await.unwrap();
    let (tx, category) = &page.transactions[0];
    assert_eq!(tx.category, "other");
    assert_eq!(category.as_ref().map(|c| c.slug.as_str()), Some("other"));
}

#[tokio::test]
async fn empty_file_is_rejected() {
    let engine = engine_with_user().await;

    let err = engine.import_csv("alice", "").await.unwrap_err();
    assert_eq!(err, EngineError::EmptyImport);

    // A header with no data rows is just as empty.
    let err = engine
        .import_csv("alice", "日付,内容,金額,カテゴリ,収支タイプ\n")
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::EmptyImport);
}

#[tokio::test]
async fn malformed_amount_fails_the_whole_import() {
    let engine = engine_with_user().await;

    let err = engine
        .import_csv(
            "alice",
            "2024-01-05,\"スーパー\",2300,食費,支出\n2024-01-06,\"バス\",abc,交通費,支出",
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));

    // Nothing was committed.
    let page = engine.list_transactions("alice", 1, None).await.unwrap();
    assert_eq!(page.metadata.total_count, 0);
}

#[tokio::test]
async fn export_of_an_empty_ledger_is_just_the_header() {
    let engine = engine_with_user().await;

    let exported = engine.export_csv("alice").await.unwrap();
    assert_eq!(exported, "日付,内容,金額,カテゴリ,収支タイプ");
}
