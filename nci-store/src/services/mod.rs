//! Domain services over the network store

mod aggregation_service;
mod contribution_service;
mod insights_service;
mod pattern_service;
mod score_service;

pub use aggregation_service::*;
pub use contribution_service::*;
pub use insights_service::*;
pub use pattern_service::*;
pub use score_service::*;

#[cfg(test)]
pub(crate) mod testutil {
    use chrono::{Duration, Utc};

    use nci_core::types::{
        AnonymousTenantId, GlobalBuyerId, MonthBucket, PaymentObservation, TransactionSizeBand,
    };

    use crate::store::NetworkStore;

    /// Build a synthetic observation dated `days_ago` days in the past
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn observation(
        buyer: &str,
        tenant: &str,
        days_to_pay: i32,
        days_late: i32,
        paid_on_time: bool,
        had_dispute: bool,
        was_partial_payment: bool,
        days_ago: i64,
    ) -> PaymentObservation {
        let date = Utc::now() - Duration::days(days_ago);
        let month = MonthBucket::from_date(date);
        PaymentObservation {
            global_buyer_id: GlobalBuyerId(buyer.to_string()),
            anonymous_tenant_id: AnonymousTenantId(tenant.to_string()),
            industry_code: "textiles".to_string(),
            region: "MH".to_string(),
            revenue_class: "sme".to_string(),
            size_band: TransactionSizeBand::Small,
            days_to_pay,
            days_late,
            paid_on_time,
            had_dispute,
            was_partial_payment,
            observation_date: date,
            month,
            quarter: month.quarter(),
            contributed_at: date,
        }
    }

    /// Build an in-memory store preloaded with observations
    pub(crate) async fn store_with_observations(
        observations: Vec<PaymentObservation>,
    ) -> NetworkStore {
        let store = NetworkStore::in_memory();
        for obs in observations {
            store.observations.append(obs).await.unwrap();
        }
        store
    }
}
