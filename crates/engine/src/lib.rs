pub use categories::{Category, CategoryKind};
pub use error::EngineError;
pub use metrics::{CategoryStat, MonthlyStat, PeriodSummary};
pub use ops::{
    CategoryDraft, Engine, EngineBuilder, ImportOutcome, PAGE_SIZE, PageMetadata,
    SubscriptionDraft, Summary, TransactionDraft, TransactionPage,
};
pub use subscriptions::{BillingCycle, Subscription, SubscriptionStatus};
pub use transactions::Transaction;

pub mod billing;
pub mod labels;
pub mod metrics;

mod categories;
mod error;
mod export;
mod import;
mod ops;
mod subscriptions;
mod transactions;

type ResultEngine<T> = Result<T, EngineError>;
