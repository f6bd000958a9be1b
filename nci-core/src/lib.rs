//! NCI Core - Network Credit Intelligence domain layer
//!
//! This crate provides the core types and algorithms for the cross-tenant
//! payment-behavior network:
//! - Anonymized identifier handling (one-way digests, no plaintext storage)
//! - Observation, profile, contribution and intelligence types
//! - The scoring engine: community score, confidence, trend, consistency,
//!   credit trust score, trust tiers and badges (all pure functions)
//!
//! Persistence and services live in `nci-store`; this crate has no I/O.

pub mod anonymize;
pub mod constants;
pub mod error;
pub mod scoring;
pub mod types;

pub use constants::*;
pub use error::*;
pub use types::*;
