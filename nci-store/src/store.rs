//! Network store facade

use std::sync::Arc;

use crate::repos::{
    BuyerProfileRepository, IntelligenceRepository, MemoryBuyerProfileRepo,
    MemoryIntelligenceRepo, MemoryObservationRepo, MemoryTenantContributionRepo,
    ObservationRepository, TenantContributionRepository,
};

/// Unified handle to the network's four repositories
///
/// Cheap to clone; all clones share the same underlying storage.
#[derive(Clone)]
pub struct NetworkStore {
    pub observations: Arc<dyn ObservationRepository>,
    pub profiles: Arc<dyn BuyerProfileRepository>,
    pub contributions: Arc<dyn TenantContributionRepository>,
    pub intelligence: Arc<dyn IntelligenceRepository>,
}

impl NetworkStore {
    /// Create a store backed by in-memory repositories
    pub fn in_memory() -> Self {
        Self {
            observations: Arc::new(MemoryObservationRepo::new()),
            profiles: Arc::new(MemoryBuyerProfileRepo::new()),
            contributions: Arc::new(MemoryTenantContributionRepo::new()),
            intelligence: Arc::new(MemoryIntelligenceRepo::new()),
        }
    }
}
