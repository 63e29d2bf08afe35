//! CSV export serialization.
//!
//! Renders a transaction list (joined with its category record where one is
//! resolved) into the fixed CSV format. The output of this module is what the
//! import reconciler must fully deduplicate on re-import.

use std::fmt::Write as _;

use crate::{
    Category, Transaction,
    labels::{CSV_HEADER, EXPENSE_TYPE_LABEL, INCOME_TYPE_LABEL, label_for_slug},
};

/// Renders transactions as CSV text: header row plus one row per
/// transaction, joined by newlines, no trailing newline.
pub(crate) fn render(rows: &[(Transaction, Option<Category>)]) -> String {
    let mut out = String::from(CSV_HEADER);

    for (tx, category) in rows {
        let date = tx.date.format("%Y-%m-%d");
        // Standard CSV escaping: wrap in double quotes, double inner quotes.
        let description = tx.description.replace('"', "\"\"");
        let label = category
            .as_ref()
            .map(|c| c.name.as_str())
            .or_else(|| label_for_slug(&tx.category))
            .unwrap_or(&tx.category);
        let kind = if tx.is_expense {
            EXPENSE_TYPE_LABEL
        } else {
            INCOME_TYPE_LABEL
        };

        let _ = write!(
            out,
            "\n{date},\"{description}\",{},{label},{kind}",
            tx.amount
        );
    }

    out
}
