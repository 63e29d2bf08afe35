//! Pure aggregation over in-memory transaction sets.
//!
//! Inputs are already scoped to one user (and date-filtered by the caller
//! where needed). No I/O, no error path: malformed records degrade to
//! zero/omitted buckets instead of failing.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Transaction;

/// Income/expense totals for a period.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub total_income: i64,
    pub total_expense: i64,
    pub balance: i64,
}

/// Per-category expense total, for pie-chart style views.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStat {
    pub category: String,
    pub amount: i64,
}

/// Per-calendar-month income/expense totals, for bar-chart style views.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyStat {
    pub month: String,
    pub income: i64,
    pub expense: i64,
}

/// Formats a date as the canonical `YYYY-MM` bucket key.
///
/// Uses the timestamp's own calendar fields; no timezone conversion.
pub fn month_key(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m").to_string()
}

/// Sums income and expense totals over the whole input.
pub fn period_summary(transactions: &[Transaction]) -> PeriodSummary {
    let total_income: i64 = transactions
        .iter()
        .filter(|t| !t.is_expense)
        .map(|t| t.amount)
        .sum();
    let total_expense: i64 = transactions
        .iter()
        .filter(|t| t.is_expense)
        .map(|t| t.amount)
        .sum();

    PeriodSummary {
        total_income,
        total_expense,
        balance: total_income - total_expense,
    }
}

/// Groups expense transactions by category and sums their amounts.
///
/// The group key is the resolved category id when present, else the legacy
/// slug; a transaction never contributes to both. Result is sorted descending
/// by amount, ties kept in first-encountered order.
pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategoryStat> {
    let mut stats: Vec<CategoryStat> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for tx in transactions.iter().filter(|t| t.is_expense) {
        let key = match tx.category_id {
            Some(id) => id.to_string(),
            None => tx.category.clone(),
        };
        match index.get(&key) {
            Some(&at) => stats[at].amount += tx.amount,
            None => {
                index.insert(key.clone(), stats.len());
                stats.push(CategoryStat {
                    category: key,
                    amount: tx.amount,
                });
            }
        }
    }

    // Stable sort keeps insertion order for equal amounts.
    stats.sort_by(|a, b| b.amount.cmp(&a.amount));
    stats
}

/// Buckets all transactions by calendar month, summing both directions
/// independently. Months without transactions are omitted; output is sorted
/// ascending by month key and independent of input order.
pub fn monthly_trends(transactions: &[Transaction]) -> Vec<MonthlyStat> {
    let mut buckets: BTreeMap<String, (i64, i64)> = BTreeMap::new();

    for tx in transactions {
        let entry = buckets.entry(month_key(&tx.date)).or_insert((0, 0));
        if tx.is_expense {
            entry.1 += tx.amount;
        } else {
            entry.0 += tx.amount;
        }
    }

    buckets
        .into_iter()
        .map(|(month, (income, expense))| MonthlyStat {
            month,
            income,
            expense,
        })
        .collect()
}
