//! Application state for the API server

use std::sync::Arc;

use nci_store::{
    AggregationService, ContributionService, InsightsService, NetworkStore, PatternService,
    ScoreService,
};

/// API server state
#[derive(Clone)]
pub struct AppState {
    /// Tenant registration and observation intake
    pub contributions: Arc<ContributionService>,
    /// Profile recompute batch (exposed for operational triggers)
    pub aggregation: Arc<AggregationService>,
    /// Community score queries
    pub scores: Arc<ScoreService>,
    /// Pattern detection and intelligence queries
    pub patterns: Arc<PatternService>,
    /// Dashboard aggregates
    pub insights: Arc<InsightsService>,
    /// API version
    pub version: String,
}

impl AppState {
    /// Create app state over a network store
    pub fn new(store: NetworkStore) -> Self {
        Self {
            contributions: Arc::new(ContributionService::new(store.clone())),
            aggregation: Arc::new(AggregationService::new(store.clone())),
            scores: Arc::new(ScoreService::new(store.clone())),
            patterns: Arc::new(PatternService::new(store.clone())),
            insights: Arc::new(InsightsService::new(store)),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub enable_cors: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            enable_cors: true,
        }
    }
}
