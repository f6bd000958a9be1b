//! Tier-gated community score queries

use chrono::Utc;
use serde::Serialize;
use tracing::debug;

use nci_core::anonymize::anonymize_buyer;
use nci_core::constants::NEUTRAL_COMMUNITY_SCORE;
use nci_core::types::{AggregateMetrics, TenantId, TrendDirection, TrustTier};

use crate::error::StoreResult;
use crate::store::NetworkStore;

/// A buyer's community score as seen by a querying tenant
#[derive(Debug, Clone, Serialize)]
pub struct CommunityScore {
    pub community_score: f64,
    pub trust_tier: TrustTier,
    pub data_points: u32,
    pub confidence: f64,
    pub aggregate_metrics: Option<AggregateMetrics>,
    pub trend_direction: TrendDirection,
    pub badges: Vec<String>,
}

impl CommunityScore {
    /// Neutral result for a buyer with no network data
    ///
    /// A "no prior data" state is expected and not exceptional.
    fn neutral() -> Self {
        Self {
            community_score: NEUTRAL_COMMUNITY_SCORE,
            trust_tier: TrustTier::Bronze,
            data_points: 0,
            confidence: 0.0,
            aggregate_metrics: None,
            trend_direction: TrendDirection::Unknown,
            badges: Vec::new(),
        }
    }
}

/// Outcome of a community score lookup
///
/// Access denial is a normal structured value, never an error.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "access", rename_all = "snake_case")]
pub enum ScoreLookup {
    /// Tenant's tier does not include community score access
    Denied { upgrade_required: bool },
    /// Score data (or the neutral default) for the buyer
    Granted(CommunityScore),
}

/// Serves community scores gated by tenant contribution tier
pub struct ScoreService {
    store: NetworkStore,
}

impl ScoreService {
    pub fn new(store: NetworkStore) -> Self {
        Self { store }
    }

    /// Look up a buyer's community score on behalf of a tenant
    pub async fn get_community_score(
        &self,
        buyer_identifier: &str,
        tenant_id: &TenantId,
    ) -> StoreResult<ScoreLookup> {
        let contribution = self.store.contributions.find(tenant_id).await?;

        let Some(mut contribution) = contribution.filter(|c| c.is_active) else {
            return Ok(ScoreLookup::Denied {
                upgrade_required: true,
            });
        };

        if !contribution.benefits().community_score_access {
            return Ok(ScoreLookup::Denied {
                upgrade_required: true,
            });
        }

        let global_buyer_id = anonymize_buyer(buyer_identifier);
        let Some(profile) = self.store.profiles.find(&global_buyer_id).await? else {
            debug!(buyer_id = %global_buyer_id, "No network data for buyer");
            return Ok(ScoreLookup::Granted(CommunityScore::neutral()));
        };

        contribution.network_scores_accessed += 1;
        contribution.last_access_date = Some(Utc::now());
        self.store.contributions.save(contribution).await?;

        Ok(ScoreLookup::Granted(CommunityScore {
            community_score: profile.community_score,
            trust_tier: profile.trust_tier,
            data_points: profile.data_points,
            confidence: profile.confidence,
            aggregate_metrics: Some(profile.aggregate_metrics),
            trend_direction: profile.trend_direction,
            badges: profile.trust_badges.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testutil::observation;
    use crate::services::{AggregationService, ContributionService};
    use nci_core::types::ContributionTier;

    async fn registered_store(tier: ContributionTier) -> (NetworkStore, TenantId) {
        let store = NetworkStore::in_memory();
        let tenant = TenantId("t1".to_string());
        ContributionService::new(store.clone())
            .register_tenant(tenant.clone(), tier)
            .await
            .unwrap();
        (store, tenant)
    }

    #[tokio::test]
    async fn test_unregistered_tenant_is_denied() {
        let store = NetworkStore::in_memory();
        let service = ScoreService::new(store);
        let lookup = service
            .get_community_score("BUYER-1", &TenantId("ghost".to_string()))
            .await
            .unwrap();
        assert!(matches!(
            lookup,
            ScoreLookup::Denied {
                upgrade_required: true
            }
        ));
    }

    #[tokio::test]
    async fn test_basic_tier_is_denied() {
        let (store, tenant) = registered_store(ContributionTier::Basic).await;
        let service = ScoreService::new(store);
        let lookup = service
            .get_community_score("BUYER-1", &tenant)
            .await
            .unwrap();
        assert!(matches!(lookup, ScoreLookup::Denied { .. }));
    }

    #[tokio::test]
    async fn test_unknown_buyer_gets_neutral_default() {
        let (store, tenant) = registered_store(ContributionTier::Standard).await;
        let service = ScoreService::new(store.clone());

        let lookup = service
            .get_community_score("BUYER-NOBODY", &tenant)
            .await
            .unwrap();

        let ScoreLookup::Granted(score) = lookup else {
            panic!("expected granted lookup");
        };
        assert_eq!(score.community_score, 50.0);
        assert_eq!(score.trust_tier, TrustTier::Bronze);
        assert_eq!(score.data_points, 0);
        assert_eq!(score.confidence, 0.0);
        assert!(score.aggregate_metrics.is_none());

        // Neutral defaults do not count as accesses
        let contribution = store.contributions.find(&tenant).await.unwrap().unwrap();
        assert_eq!(contribution.network_scores_accessed, 0);
    }

    #[tokio::test]
    async fn test_profiled_buyer_returns_fields_and_counts_access() {
        let (store, tenant) = registered_store(ContributionTier::Standard).await;

        // Profile the buyer under the hashed id the query path will derive
        let hashed = nci_core::anonymize::anonymize_buyer("BUYER-1");
        for i in 0..12i64 {
            store
                .observations
                .append(observation(&hashed.0, "t-anon", 8, 0, true, false, false, i))
                .await
                .unwrap();
        }
        AggregationService::new(store.clone())
            .aggregate_network_data()
            .await
            .unwrap();

        let service = ScoreService::new(store.clone());
        let lookup = service
            .get_community_score("BUYER-1", &tenant)
            .await
            .unwrap();

        let ScoreLookup::Granted(score) = lookup else {
            panic!("expected granted lookup");
        };
        assert_eq!(score.data_points, 12);
        assert!(score.aggregate_metrics.is_some());
        assert!(score.community_score > 50.0);

        let contribution = store.contributions.find(&tenant).await.unwrap().unwrap();
        assert_eq!(contribution.network_scores_accessed, 1);
        assert!(contribution.last_access_date.is_some());
    }

    #[tokio::test]
    async fn test_inactive_tenant_is_denied() {
        let (store, tenant) = registered_store(ContributionTier::Premium).await;
        let mut contribution = store.contributions.find(&tenant).await.unwrap().unwrap();
        contribution.is_active = false;
        store.contributions.save(contribution).await.unwrap();

        let service = ScoreService::new(store);
        let lookup = service
            .get_community_score("BUYER-1", &tenant)
            .await
            .unwrap();
        assert!(matches!(lookup, ScoreLookup::Denied { .. }));
    }
}
