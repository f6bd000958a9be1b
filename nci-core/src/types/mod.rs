//! Core type definitions for the network credit intelligence layer
//!
//! Naming conventions:
//! - snake_case for field names
//! - `*_id` suffix for identifiers
//! - anonymized identifiers are hex digests, never plaintext

mod common;
mod contribution;
mod intelligence;
mod observation;
mod profile;

pub use common::*;
pub use contribution::*;
pub use intelligence::*;
pub use observation::*;
pub use profile::*;
