//! Category label tables.
//!
//! Slugs are the stable machine keys stored on records; labels are the
//! localized display strings used in the UI and in the CSV format. The two
//! tables must stay exact for the CSV export/import round trip.

/// Expense category `(slug, label)` pairs, in display order.
pub const EXPENSE_LABELS: &[(&str, &str)] = &[
    ("food", "食費"),
    ("transport", "交通費"),
    ("daily", "日用品"),
    ("entertainment", "交際費・娯楽"),
    ("utilities", "光熱費"),
    ("housing", "住居費"),
    ("medical", "医療費"),
    ("fashion", "衣服・美容"),
    ("other", "その他"),
];

/// Income category `(slug, label)` pairs, in display order.
pub const INCOME_LABELS: &[(&str, &str)] = &[
    ("salary", "給与"),
    ("bonus", "賞与"),
    ("business", "事業・副業"),
    ("investment", "投資・配当"),
    ("extra", "臨時収入"),
    ("other", "その他"),
];

/// Sentinel slug for unrecognized category labels.
pub const OTHER_SLUG: &str = "other";

/// Localized transaction type labels used in the CSV format.
pub const EXPENSE_TYPE_LABEL: &str = "支出";
pub const INCOME_TYPE_LABEL: &str = "収入";

/// Fixed CSV header row: date, description, amount, category, type.
pub const CSV_HEADER: &str = "日付,内容,金額,カテゴリ,収支タイプ";

/// First cell of the header row; its presence marks a header to strip.
pub const DATE_HEADER_CELL: &str = "日付";

/// Returns the localized label for a slug, searching expenses first.
pub fn label_for_slug(slug: &str) -> Option<&'static str> {
    EXPENSE_LABELS
        .iter()
        .chain(INCOME_LABELS)
        .find(|(s, _)| *s == slug)
        .map(|(_, label)| *label)
}

/// Reverse lookup: localized label to slug, searching expenses first.
pub fn slug_for_label(label: &str) -> Option<&'static str> {
    EXPENSE_LABELS
        .iter()
        .chain(INCOME_LABELS)
        .find(|(_, l)| *l == label)
        .map(|(slug, _)| *slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_round_trip_for_every_slug() {
        for (slug, label) in EXPENSE_LABELS.iter().chain(INCOME_LABELS) {
            assert_eq!(label_for_slug(slug), Some(*label));
            assert!(slug_for_label(label).is_some());
        }
    }

    #[test]
    fn other_label_maps_to_other_slug() {
        assert_eq!(slug_for_label("その他"), Some(OTHER_SLUG));
    }

    #[test]
    fn unknown_label_has_no_slug() {
        assert_eq!(slug_for_label("宇宙開発"), None);
    }
}
