//! CSV import reconciliation.
//!
//! Turns raw CSV text into candidate transaction records, mapping localized
//! category labels back to slugs and deduplicating rows against the caller's
//! existing transactions via a derived signature. Pure: the surrounding op
//! fetches the store state and performs the bulk insert.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use csv::ReaderBuilder;
use uuid::Uuid;

use crate::{
    Category, EngineError, ResultEngine, Transaction,
    labels::{DATE_HEADER_CELL, EXPENSE_TYPE_LABEL, OTHER_SLUG, slug_for_label},
};

/// Placeholder written when the description cell is empty.
pub(crate) const MISSING_DESCRIPTION: &str = "使途不明";

/// A parsed, deduplicated row ready for insertion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct CandidateRecord {
    pub date: NaiveDate,
    pub description: String,
    pub amount: i64,
    pub slug: String,
    pub category_id: Option<Uuid>,
    pub is_expense: bool,
}

/// Dedup signature shared by stored records and CSV rows.
///
/// Keys on the legacy category slug (the same field the importer writes), so
/// signatures stay comparable across repeated imports.
pub(crate) fn signature(date: &str, amount: i64, description: &str, slug: &str) -> String {
    format!("{date}_{amount}_{description}_{slug}")
}

fn signature_for_existing(tx: &Transaction) -> String {
    signature(
        &tx.date.format("%Y-%m-%d").to_string(),
        tx.amount,
        &tx.description,
        &tx.category,
    )
}

/// Parses CSV text into raw rows, stripping the header row iff the first cell
/// of the first row is the literal date header token.
fn parse_rows(text: &str) -> ResultEngine<Vec<csv::StringRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|err| EngineError::InvalidInput(format!("invalid CSV: {err}")))?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        rows.push(record);
    }

    if rows
        .first()
        .and_then(|row| row.get(0))
        .map(str::trim)
        .is_some_and(|cell| cell == DATE_HEADER_CELL)
    {
        rows.remove(0);
    }

    Ok(rows)
}

/// Reconciles CSV text against existing transactions and the category
/// directory. Returns the records to insert and the duplicate row count.
pub(crate) fn reconcile(
    text: &str,
    categories: &[Category],
    existing: &[Transaction],
) -> ResultEngine<(Vec<CandidateRecord>, usize)> {
    let rows = parse_rows(text)?;
    if rows.is_empty() {
        return Err(EngineError::EmptyImport);
    }

    // First directory match wins; the directory is ordered by sort_order, so
    // for the shared `other` slug the expense row takes precedence.
    let mut id_by_slug: HashMap<&str, Uuid> = HashMap::new();
    for category in categories {
        id_by_slug.entry(category.slug.as_str()).or_insert(category.id);
    }

    let mut seen: HashSet<String> = existing.iter().map(signature_for_existing).collect();

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for row in &rows {
        // Columns, fixed order: date, description, amount, category, type.
        let date_cell = row.get(0).unwrap_or_default().trim();
        let description_cell = row.get(1).unwrap_or_default();
        let amount_cell = row.get(2).unwrap_or_default().trim();
        let category_cell = row.get(3).unwrap_or_default().trim();
        let type_cell = row.get(4).unwrap_or_default().trim();

        if date_cell.is_empty() || amount_cell.is_empty() {
            continue;
        }

        let date = NaiveDate::parse_from_str(date_cell, "%Y-%m-%d")
            .map_err(|_| EngineError::InvalidInput(format!("invalid date: {date_cell}")))?;
        let amount = amount_cell
            .replace(',', "")
            .parse::<i64>()
            .map_err(|_| EngineError::InvalidInput(format!("invalid amount: {amount_cell}")))?;

        let slug = slug_for_label(category_cell).unwrap_or(OTHER_SLUG);
        let category_id = id_by_slug
            .get(slug)
            .or_else(|| id_by_slug.get(OTHER_SLUG))
            .copied();

        let description = if description_cell.is_empty() {
            MISSING_DESCRIPTION.to_string()
        } else {
            description_cell.to_string()
        };

        let key = signature(
            &date.format("%Y-%m-%d").to_string(),
            amount,
            &description,
            slug,
        );
        if !seen.insert(key) {
            skipped += 1;
            continue;
        }

        records.push(CandidateRecord {
            date,
            description,
            amount,
            slug: slug.to_string(),
            category_id,
            is_expense: type_cell == EXPENSE_TYPE_LABEL,
        });
    }

    Ok((records, skipped))
}

#[cfg(test)]
mod tests {
    use crate::CategoryKind;

    use super::*;

    fn category(slug: &str, name: &str, kind: CategoryKind, sort_order: i32) -> Category {
        Category {
            id: Uuid::new_v4(),
            slug: slug.to_string(),
            name: name.to_string(),
            kind,
            user_id: None,
            sort_order,
        }
    }

    fn directory() -> Vec<Category> {
        vec![
            category("food", "食費", CategoryKind::Expense, 0),
            category("transport", "交通費", CategoryKind::Expense, 1),
            category("other", "その他", CategoryKind::Expense, 8),
            category("salary", "給与", CategoryKind::Income, 9),
        ]
    }

    #[test]
    fn header_row_is_stripped() {
        let text = "日付,内容,金額,カテゴリ,収支タイプ\n2024-01-01,\"ランチ\",1000,食費,支出";
        let (records, skipped) = reconcile(text, &directory(), &[]).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(skipped, 0);
        assert_eq!(records[0].slug, "food");
        assert!(records[0].is_expense);
    }

    #[test]
    fn headerless_csv_is_accepted() {
        let text = "2024-01-01,\"ランチ\",1000,食費,支出";
        let (records, _) = reconcile(text, &directory(), &[]).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn header_only_csv_is_an_error() {
        let text = "日付,内容,金額,カテゴリ,収支タイプ\n";
        assert_eq!(
            reconcile(text, &directory(), &[]).unwrap_err(),
            EngineError::EmptyImport
        );
    }

    #[test]
    fn unknown_label_falls_back_to_other() {
        let cats = directory();
        let other_id = cats.iter().find(|c| c.slug == "other").map(|c| c.id);
        let text = "2024-01-01,\"謎の買い物\",1000,謎カテゴリ,支出";
        let (records, _) = reconcile(text, &cats, &[]).unwrap();
        assert_eq!(records[0].slug, "other");
        assert_eq!(records[0].category_id, other_id);
    }

    #[test]
    fn slug_without_directory_entry_falls_back_to_other_id() {
        // Directory without "salary": income rows resolve to the other id.
        let cats = vec![
            category("food", "食費", CategoryKind::Expense, 0),
            category("other", "その他", CategoryKind::Expense, 8),
        ];
        let other_id = cats[1].id;
        let text = "2024-01-25,\"一月給与\",250000,給与,収入";
        let (records, _) = reconcile(text, &cats, &[]).unwrap();
        assert_eq!(records[0].slug, "salary");
        assert_eq!(records[0].category_id, Some(other_id));
        assert!(!records[0].is_expense);
    }

    #[test]
    fn missing_directory_leaves_category_id_unset() {
        let text = "2024-01-01,\"ランチ\",1000,食費,支出";
        let (records, _) = reconcile(text, &[], &[]).unwrap();
        assert_eq!(records[0].category_id, None);
        assert_eq!(records[0].slug, "food");
    }

    #[test]
    fn thousands_separators_are_stripped() {
        let text = "2024-01-01,\"家賃\",\"85,000\",住居費,支出";
        let (records, _) = reconcile(text, &directory(), &[]).unwrap();
        assert_eq!(records[0].amount, 85000);
    }

    #[test]
    fn non_numeric_amount_fails_the_import() {
        let text = "2024-01-01,\"ランチ\",千円,食費,支出";
        assert!(matches!(
            reconcile(text, &directory(), &[]),
            Err(EngineError::InvalidInput(_))
        ));
    }

    #[test]
    fn rows_missing_date_or_amount_are_skipped() {
        let text = ",\"日付なし\",1000,食費,支出\n2024-01-01,\"金額なし\",,食費,支出\n2024-01-02,\"有効\",500,食費,支出";
        let (records, skipped) = reconcile(text, &directory(), &[]).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].description, "有効");
        assert_eq!(skipped, 0);
    }

    #[test]
    fn empty_description_gets_placeholder() {
        let text = "2024-01-01,,1000,食費,支出";
        let (records, _) = reconcile(text, &directory(), &[]).unwrap();
        assert_eq!(records[0].description, MISSING_DESCRIPTION);
    }

    #[test]
    fn duplicate_rows_within_one_file_are_deduplicated() {
        let text = "2024-01-01,\"ランチ\",1000,食費,支出\n2024-01-01,\"ランチ\",1000,食費,支出";
        let (records, skipped) = reconcile(text, &directory(), &[]).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(skipped, 1);
    }

    #[test]
    fn non_expense_type_label_is_income() {
        let text = "2024-01-01,\"謎\",1000,食費,入金";
        let (records, _) = reconcile(text, &directory(), &[]).unwrap();
        assert!(!records[0].is_expense);
    }
}
