//! Tenant registration and observation intake

use chrono::Utc;
use tracing::{debug, error, info};

use nci_core::anonymize::{anonymize_buyer, anonymize_tenant};
use nci_core::types::{
    ContributionTier, PaymentEvent, PaymentObservation, TenantContribution, TenantId,
};

use crate::error::StoreResult;
use crate::store::NetworkStore;

/// Tenant registration and gated, anonymizing observation intake
pub struct ContributionService {
    store: NetworkStore,
}

impl ContributionService {
    pub fn new(store: NetworkStore) -> Self {
        Self { store }
    }

    /// Register a tenant for network participation
    ///
    /// Idempotent: re-registering updates the tier and reactivates the row
    /// without resetting contribution counters.
    pub async fn register_tenant(
        &self,
        tenant_id: TenantId,
        tier: ContributionTier,
    ) -> StoreResult<TenantContribution> {
        let contribution = match self.store.contributions.find(&tenant_id).await? {
            Some(mut existing) => {
                existing.contribution_tier = tier;
                existing.is_active = true;
                existing.updated_at = Utc::now();
                existing
            }
            None => TenantContribution::new(tenant_id.clone(), tier),
        };

        self.store.contributions.save(contribution.clone()).await?;

        info!(
            tenant_id = %contribution.tenant_id,
            tier = %contribution.contribution_tier,
            "Tenant registered for network"
        );
        Ok(contribution)
    }

    /// Contribute a payment observation to the network
    ///
    /// Never fails from the caller's point of view: gate misses are silent
    /// no-ops and storage errors are logged and swallowed, because a
    /// side-channel analytics write must not block the invoicing workflow.
    pub async fn contribute_payment_observation(
        &self,
        tenant_id: &TenantId,
        buyer_identifier: &str,
        event: &PaymentEvent,
    ) {
        if let Err(e) = self.try_contribute(tenant_id, buyer_identifier, event).await {
            error!(
                tenant_id = %tenant_id,
                error = %e,
                "Failed to contribute observation"
            );
        }
    }

    async fn try_contribute(
        &self,
        tenant_id: &TenantId,
        buyer_identifier: &str,
        event: &PaymentEvent,
    ) -> StoreResult<()> {
        let Some(mut contribution) = self.store.contributions.find(tenant_id).await? else {
            debug!(tenant_id = %tenant_id, "Tenant not registered, skipping contribution");
            return Ok(());
        };

        if !contribution.can_contribute() {
            debug!(tenant_id = %tenant_id, "Tenant not opted in for sharing");
            return Ok(());
        }

        let global_buyer_id = anonymize_buyer(buyer_identifier);
        let anonymous_tenant_id = anonymize_tenant(tenant_id);

        let first_sighting = !self
            .store
            .observations
            .buyer_seen_from_tenant(&global_buyer_id, &anonymous_tenant_id)
            .await?;

        let observation =
            PaymentObservation::from_event(global_buyer_id.clone(), anonymous_tenant_id, event);
        self.store.observations.append(observation).await?;

        contribution.transactions_shared += 1;
        if first_sighting {
            contribution.buyers_shared += 1;
        }
        contribution.updated_at = Utc::now();
        self.store.contributions.save(contribution).await?;

        info!(buyer_id = %global_buyer_id, "Payment observation contributed");
        Ok(())
    }
}
