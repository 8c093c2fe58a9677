//! Data models
//!
//! Shared between the calculation engine and the HTTP client.
//! Backend references (store, product, currency, unit, supplier) are `i64`.

pub mod entry;
pub mod line_item;
pub mod supplier;

// Re-exports
pub use entry::*;
pub use line_item::*;
pub use supplier::*;
