//! Daily buyer profile aggregation

use chrono::Utc;
use tracing::{error, info};

use nci_core::constants::AGGREGATION_PROGRESS_EVERY;
use nci_core::scoring::{
    aggregate_metrics, community_score, confidence, consistency_score, credit_trust_score,
    distinct_tenants, trend_direction, trust_badges,
};
use nci_core::types::{BuyerProfile, GlobalBuyerId, TrustTier};

use crate::error::{StoreError, StoreResult};
use crate::store::NetworkStore;

/// Outcome of one aggregation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationSummary {
    /// Buyers attempted
    pub processed: u64,
    /// Buyers whose profile was written
    pub updated: u64,
    /// Wall-clock duration of the run
    pub duration_ms: u64,
}

/// Recomputes buyer profiles from the observation log
pub struct AggregationService {
    store: NetworkStore,
}

impl AggregationService {
    pub fn new(store: NetworkStore) -> Self {
        Self { store }
    }

    /// Recompute every buyer profile
    ///
    /// A single buyer's failure is logged and skipped; the batch always runs
    /// to completion for the remaining buyers.
    pub async fn aggregate_network_data(&self) -> StoreResult<AggregationSummary> {
        info!("Starting network data aggregation");
        let started = std::time::Instant::now();

        let buyers = self.store.observations.distinct_buyers().await?;

        let mut processed = 0u64;
        let mut updated = 0u64;

        for buyer in &buyers {
            processed += 1;
            match self.aggregate_buyer(buyer).await {
                Ok(Some(_)) => updated += 1,
                Ok(None) => {}
                Err(e) => {
                    error!(buyer_id = %buyer, error = %e, "Failed to aggregate buyer");
                }
            }

            if processed % AGGREGATION_PROGRESS_EVERY == 0 {
                info!(count = processed, "Aggregation progress");
            }
        }

        let duration_ms = started.elapsed().as_millis() as u64;
        info!(
            updated,
            processed, duration_ms, "Network aggregation complete"
        );

        Ok(AggregationSummary {
            processed,
            updated,
            duration_ms,
        })
    }

    /// Recompute one buyer's profile from its full observation history
    ///
    /// Returns `None` when the buyer has no observations. The profile row is
    /// replaced wholesale; `trust_tier` is always derived from the freshly
    /// computed credit trust score.
    pub async fn aggregate_buyer(
        &self,
        buyer: &GlobalBuyerId,
    ) -> StoreResult<Option<BuyerProfile>> {
        let observations = self.store.observations.find_for_buyer(buyer).await?;
        if observations.is_empty() {
            return Ok(None);
        }

        let metrics = aggregate_metrics(&observations).ok_or_else(|| {
            StoreError::Storage(format!("No metrics for buyer {} with observations", buyer))
        })?;
        let unique_tenants = distinct_tenants(&observations);

        let community = community_score(&metrics);
        let conf = confidence(metrics.total_transactions, unique_tenants);
        let trend = trend_direction(&observations);
        let consistency = consistency_score(&observations);
        let trust = credit_trust_score(community, unique_tenants, consistency, trend, conf);

        // Most recent observation carries the buyer's current classification
        let newest = &observations[0];

        let mut profile = BuyerProfile {
            global_buyer_id: buyer.clone(),
            industry_code: newest.industry_code.clone(),
            region: newest.region.clone(),
            revenue_class: newest.revenue_class.clone(),
            community_score: community,
            data_points: metrics.total_transactions,
            confidence: conf,
            aggregate_metrics: metrics,
            trend_direction: trend,
            verified_by_count: unique_tenants,
            consistency_score: consistency,
            credit_trust_score: trust,
            trust_tier: TrustTier::from_score(trust),
            trust_badges: Vec::new(),
            last_data_update: Utc::now(),
        };
        profile.trust_badges = trust_badges(&profile);

        self.store.profiles.upsert(profile.clone()).await?;
        Ok(Some(profile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testutil::{observation, store_with_observations};
    use nci_core::types::TrendDirection;

    #[tokio::test]
    async fn test_aggregation_writes_profile() {
        let mut observations = Vec::new();
        for i in 0..20i64 {
            observations.push(observation("buyer-1", "t1", 10, 0, true, false, false, i));
            observations.push(observation("buyer-1", "t2", 12, 0, true, false, false, i));
        }
        let store = store_with_observations(observations).await;
        let service = AggregationService::new(store.clone());

        let summary = service.aggregate_network_data().await.unwrap();
        assert_eq!(summary.processed, 1);
        assert_eq!(summary.updated, 1);

        let profile = store
            .profiles
            .find(&GlobalBuyerId("buyer-1".to_string()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(profile.data_points, 40);
        assert_eq!(profile.verified_by_count, 2);
        assert!(profile.community_score > 90.0);
        assert_eq!(
            profile.trust_tier,
            TrustTier::from_score(profile.credit_trust_score)
        );
    }

    #[tokio::test]
    async fn test_tier_never_diverges_from_score() {
        // A mediocre payer and a strong payer both satisfy the invariant
        let mut observations = Vec::new();
        for i in 0..15i64 {
            observations.push(observation("slow", "t1", 70, 40, false, true, true, i));
            observations.push(observation("fast", "t2", 5, 0, true, false, false, i));
        }
        let store = store_with_observations(observations).await;
        let service = AggregationService::new(store.clone());
        service.aggregate_network_data().await.unwrap();

        for buyer in ["slow", "fast"] {
            let profile = store
                .profiles
                .find(&GlobalBuyerId(buyer.to_string()))
                .await
                .unwrap()
                .unwrap();
            assert_eq!(
                profile.trust_tier,
                TrustTier::from_score(profile.credit_trust_score),
                "tier diverged for {}",
                buyer
            );
        }
    }

    #[tokio::test]
    async fn test_profile_is_overwritten_wholesale() {
        let store = store_with_observations(vec![
            observation("buyer-1", "t1", 10, 0, true, false, false, 0),
        ])
        .await;
        let service = AggregationService::new(store.clone());
        service.aggregate_network_data().await.unwrap();

        let first = store
            .profiles
            .find(&GlobalBuyerId("buyer-1".to_string()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(first.data_points, 1);

        // Late, disputed follow-ups drag every recomputed field down
        for i in 1..=9i64 {
            store
                .observations
                .append(observation("buyer-1", "t1", 90, 60, false, true, false, i))
                .await
                .unwrap();
        }
        service.aggregate_network_data().await.unwrap();

        let second = store
            .profiles
            .find(&GlobalBuyerId("buyer-1".to_string()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(second.data_points, 10);
        assert!(second.community_score < first.community_score);
    }

    #[tokio::test]
    async fn test_declining_trend_detected() {
        // Newest 10 observations settle in 40 days, the older 10 in 20
        let mut observations = Vec::new();
        for i in 0..10i64 {
            observations.push(observation("buyer-1", "t1", 40, 10, false, false, false, i));
        }
        for i in 10..20i64 {
            observations.push(observation("buyer-1", "t1", 20, 0, true, false, false, i));
        }
        let store = store_with_observations(observations).await;
        let service = AggregationService::new(store.clone());
        service.aggregate_network_data().await.unwrap();

        let profile = store
            .profiles
            .find(&GlobalBuyerId("buyer-1".to_string()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(profile.trend_direction, TrendDirection::Declining);
    }
}
