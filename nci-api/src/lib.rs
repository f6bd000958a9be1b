//! NCI API - HTTP surface for the credit network
//!
//! Thin axum handlers over the `nci-store` services. All scoring and gating
//! decisions live in the services; handlers only parse, delegate and shape
//! responses.

pub mod dto;
pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use server::{create_server, run_server};
pub use state::{ApiConfig, AppState};
