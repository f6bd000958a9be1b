//! Payment event input and anonymized observation types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AnonymousTenantId, GlobalBuyerId, MonthBucket, TransactionSizeBand};

/// A single payment event as reported by a tenant, before anonymization
///
/// Carries plaintext amounts and an exact date; neither survives into the
/// stored observation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentEvent {
    /// Days between invoice issue and settlement
    pub days_to_pay: i32,
    /// Invoice amount (discretized to a size band before storage)
    pub invoice_amount: Decimal,
    /// Settlement date (truncated to month before storage)
    pub transaction_date: DateTime<Utc>,
    /// Settled within terms
    pub paid_on_time: bool,
    /// A dispute was raised on the invoice
    pub had_dispute: bool,
    /// Invoice was settled in partial payments
    pub was_partial_payment: bool,
    /// Buyer industry code
    pub industry_code: String,
    /// Buyer region
    pub region: String,
    /// Buyer revenue class
    pub revenue_class: String,
}

/// One anonymized payment observation
///
/// Append-only: observations are never updated once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentObservation {
    /// Anonymized buyer identifier
    pub global_buyer_id: GlobalBuyerId,
    /// Anonymized contributing tenant identifier
    pub anonymous_tenant_id: AnonymousTenantId,
    /// Buyer industry code
    pub industry_code: String,
    /// Buyer region
    pub region: String,
    /// Buyer revenue class
    pub revenue_class: String,
    /// Ordinal invoice size band
    pub size_band: TransactionSizeBand,
    /// Days between invoice issue and settlement
    pub days_to_pay: i32,
    /// Days past terms (zero when paid on time)
    pub days_late: i32,
    /// Settled within terms
    pub paid_on_time: bool,
    /// A dispute was raised
    pub had_dispute: bool,
    /// Settled in partial payments
    pub was_partial_payment: bool,
    /// Month-granular observation date (first instant of the month)
    pub observation_date: DateTime<Utc>,
    /// Calendar month bucket
    pub month: MonthBucket,
    /// 1-based calendar quarter
    pub quarter: u32,
    /// When the observation was contributed
    pub contributed_at: DateTime<Utc>,
}

impl PaymentObservation {
    /// Build an anonymized observation from a plaintext payment event
    pub fn from_event(
        global_buyer_id: GlobalBuyerId,
        anonymous_tenant_id: AnonymousTenantId,
        event: &PaymentEvent,
    ) -> Self {
        let month = MonthBucket::from_date(event.transaction_date);
        Self {
            global_buyer_id,
            anonymous_tenant_id,
            industry_code: event.industry_code.clone(),
            region: event.region.clone(),
            revenue_class: event.revenue_class.clone(),
            size_band: TransactionSizeBand::from_amount(event.invoice_amount),
            days_to_pay: event.days_to_pay,
            days_late: if event.paid_on_time {
                0
            } else {
                event.days_to_pay.abs()
            },
            paid_on_time: event.paid_on_time,
            had_dispute: event.had_dispute,
            was_partial_payment: event.was_partial_payment,
            observation_date: month.first_day(),
            month,
            quarter: month.quarter(),
            contributed_at: Utc::now(),
        }
    }
}
