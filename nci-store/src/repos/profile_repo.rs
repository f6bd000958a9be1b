//! Buyer profile repository

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use nci_core::types::{BuyerProfile, GlobalBuyerId, TrustTier};

use crate::error::StoreResult;

/// Buyer profile storage
///
/// Profiles are replaced wholesale by each aggregation run; there is no
/// partial update path.
#[async_trait]
pub trait BuyerProfileRepository: Send + Sync {
    /// Insert or fully replace a buyer's profile
    async fn upsert(&self, profile: BuyerProfile) -> StoreResult<()>;

    /// Look up a buyer's profile
    async fn find(&self, buyer: &GlobalBuyerId) -> StoreResult<Option<BuyerProfile>>;

    /// Total profiled buyers
    async fn count(&self) -> StoreResult<u64>;

    /// Buyers whose credit trust score lies in the inclusive range
    async fn count_trust_score_between(&self, min: f64, max: f64) -> StoreResult<u64>;

    /// Count profiles per trust tier matching optional filters
    async fn tier_counts(
        &self,
        industry: Option<&str>,
        region: Option<&str>,
    ) -> StoreResult<HashMap<TrustTier, u64>>;
}

/// In-memory buyer profile repository
#[derive(Default)]
pub struct MemoryBuyerProfileRepo {
    rows: RwLock<HashMap<GlobalBuyerId, BuyerProfile>>,
}

impl MemoryBuyerProfileRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(profile: &BuyerProfile, industry: Option<&str>, region: Option<&str>) -> bool {
    industry.map_or(true, |i| profile.industry_code == i)
        && region.map_or(true, |r| profile.region == r)
}

#[async_trait]
impl BuyerProfileRepository for MemoryBuyerProfileRepo {
    async fn upsert(&self, profile: BuyerProfile) -> StoreResult<()> {
        self.rows
            .write()
            .await
            .insert(profile.global_buyer_id.clone(), profile);
        Ok(())
    }

    async fn find(&self, buyer: &GlobalBuyerId) -> StoreResult<Option<BuyerProfile>> {
        Ok(self.rows.read().await.get(buyer).cloned())
    }

    async fn count(&self) -> StoreResult<u64> {
        Ok(self.rows.read().await.len() as u64)
    }

    async fn count_trust_score_between(&self, min: f64, max: f64) -> StoreResult<u64> {
        let rows = self.rows.read().await;
        Ok(rows
            .values()
            .filter(|p| p.credit_trust_score >= min && p.credit_trust_score <= max)
            .count() as u64)
    }

    async fn tier_counts(
        &self,
        industry: Option<&str>,
        region: Option<&str>,
    ) -> StoreResult<HashMap<TrustTier, u64>> {
        let rows = self.rows.read().await;
        let mut counts = HashMap::new();
        for profile in rows.values().filter(|p| matches(p, industry, region)) {
            *counts.entry(profile.trust_tier).or_insert(0) += 1;
        }
        Ok(counts)
    }
}
