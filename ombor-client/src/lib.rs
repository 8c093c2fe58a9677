//! Ombor Client - HTTP client for the warehouse backend
//!
//! Provides network-based HTTP calls to the procurement API: field
//! configuration lookups, supplier balances, and stock entry submission.

pub mod config;
pub mod error;
pub mod http;
pub mod pricing;
pub mod stock;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use pricing::PricingApi;
pub use stock::StockApi;

// Re-export shared types for convenience
pub use shared::response::ApiResponse;
