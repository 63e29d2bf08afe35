//! Billing cycle date arithmetic.

use chrono::{DateTime, Months, Utc};

use crate::{BillingCycle, EngineError, ResultEngine};

/// Advances a payment date by exactly one billing cycle.
///
/// Calendar-aware: a Jan-31 monthly date rolls to the last valid day of
/// February per chrono's month-addition clamping.
pub fn next_payment_after(
    current: DateTime<Utc>,
    cycle: BillingCycle,
) -> ResultEngine<DateTime<Utc>> {
    let months = match cycle {
        BillingCycle::Monthly => 1,
        BillingCycle::Yearly => 12,
    };
    current
        .checked_add_months(Months::new(months))
        .ok_or_else(|| EngineError::InvalidInput("next payment date out of range".to_string()))
}
