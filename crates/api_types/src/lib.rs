use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    Expense,
    Income,
}

pub mod transaction {
    use super::*;

    /// Request body for creating or fully replacing a transaction.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionUpsert {
        pub amount: i64,
        pub description: String,
        /// Category id (UUID) from the category directory.
        pub category_id: String,
        pub date: DateTime<Utc>,
        pub is_expense: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: Uuid,
        pub amount: i64,
        pub description: String,
        /// Category slug (legacy key).
        pub category: String,
        /// Display name of the joined category, when resolved.
        pub category_name: Option<String>,
        pub date: DateTime<Utc>,
        pub is_expense: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionCreated {
        pub id: Uuid,
    }

    #[derive(Clone, Copy, Debug, Serialize, Deserialize)]
    pub struct PageMetadata {
        pub total_count: u64,
        pub total_pages: u64,
        pub current_page: u64,
        pub has_next_page: bool,
        pub has_prev_page: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionListResponse {
        pub transactions: Vec<TransactionView>,
        pub metadata: PageMetadata,
    }
}

pub mod category {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryNew {
        pub slug: String,
        pub name: String,
        pub kind: CategoryKind,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryView {
        pub id: Uuid,
        pub slug: String,
        pub name: String,
        pub kind: CategoryKind,
        /// `None` for system-wide categories.
        pub user_id: Option<String>,
        pub sort_order: i32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryListResponse {
        pub categories: Vec<CategoryView>,
    }
}

pub mod subscription {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum BillingCycle {
        Monthly,
        Yearly,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum SubscriptionStatus {
        Active,
        Cancelled,
    }

    /// Request body for creating or fully replacing a subscription.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SubscriptionUpsert {
        pub name: String,
        pub amount: i64,
        pub currency: Option<String>,
        pub billing_cycle: BillingCycle,
        pub next_payment_date: DateTime<Utc>,
        /// Category slug.
        pub category: String,
        pub status: Option<SubscriptionStatus>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SubscriptionView {
        pub id: Uuid,
        pub name: String,
        pub amount: i64,
        pub currency: String,
        pub billing_cycle: BillingCycle,
        pub next_payment_date: DateTime<Utc>,
        pub category: String,
        pub status: SubscriptionStatus,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SubscriptionCreated {
        pub id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SubscriptionListResponse {
        pub subscriptions: Vec<SubscriptionView>,
    }
}

pub mod summary {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryStatView {
        pub category: String,
        pub amount: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MonthlyStatView {
        pub month: String,
        pub income: i64,
        pub expense: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SummaryResponse {
        pub month: String,
        pub total_income: i64,
        pub total_expense: i64,
        pub balance: i64,
        pub category_breakdown: Vec<CategoryStatView>,
        pub monthly_trends: Vec<MonthlyStatView>,
    }
}

pub mod data {
    use super::*;

    /// Result of a CSV import.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ImportResult {
        pub inserted: usize,
        pub skipped: usize,
    }
}

pub mod cron {
    use super::*;

    /// Response of the subscription billing trigger.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CronOutcome {
        pub success: bool,
        /// Names of the subscriptions charged in this run.
        pub processed: Vec<String>,
    }
}
