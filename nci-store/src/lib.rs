//! NCI Store - persistence and services for the credit network
//!
//! Storage is a set of narrow per-entity repositories (find / save /
//! aggregate) behind `async` traits, so the services never depend on a
//! specific persistence technology. The crate ships an in-memory
//! implementation suitable for single-instance deployments and tests;
//! the store is the sole point of concurrency control (profile writes are
//! last-writer-wins, observation appends are race-free).
//!
//! Services:
//! - [`ContributionService`] - tenant registration and gated observation intake
//! - [`AggregationService`] - the daily buyer-profile recompute batch
//! - [`ScoreService`] - tier-gated community score queries
//! - [`PatternService`] - risk pattern detectors and intelligence queries
//! - [`InsightsService`] - dashboard aggregates

pub mod error;
pub mod repos;
pub mod services;
pub mod store;

pub use error::*;
pub use repos::*;
pub use services::*;
pub use store::NetworkStore;
