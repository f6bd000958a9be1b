//! Scoring engine
//!
//! Pure functions over observation slices and aggregate metrics. No I/O,
//! no clock reads; every output is deterministic in its inputs so the
//! aggregation job can be replayed byte-for-byte.

mod badges;
mod consistency;
mod metrics;
mod score;
mod trend;

pub use badges::*;
pub use consistency::*;
pub use metrics::*;
pub use score::*;
pub use trend::*;

#[cfg(test)]
pub(crate) mod testutil {
    use crate::types::{AnonymousTenantId, GlobalBuyerId, PaymentEvent, PaymentObservation};
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    /// Build a synthetic observation for scoring tests
    pub(crate) fn obs(
        tenant: &str,
        days: i32,
        on_time: bool,
        dispute: bool,
        partial: bool,
    ) -> PaymentObservation {
        PaymentObservation::from_event(
            GlobalBuyerId("buyer".to_string()),
            AnonymousTenantId(tenant.to_string()),
            &PaymentEvent {
                days_to_pay: days,
                invoice_amount: Decimal::from(50_000u32),
                transaction_date: Utc.with_ymd_and_hms(2025, 6, 15, 0, 0, 0).unwrap(),
                paid_on_time: on_time,
                had_dispute: dispute,
                was_partial_payment: partial,
                industry_code: "textiles".to_string(),
                region: "MH".to_string(),
                revenue_class: "sme".to_string(),
            },
        )
    }
}
