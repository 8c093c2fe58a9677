//! Shared types for the Ombor stock-intake system
//!
//! Common types used across the engine and client crates: line-item and
//! entry models, the dynamic field vocabulary, resolver wire DTOs, error
//! types, and response structures.

pub mod dynamic;
pub mod error;
pub mod fields;
pub mod models;
pub mod pricing;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use dynamic::DynamicValue;
pub use error::{AppError, AppResult, ErrorCode};
pub use fields::{FieldDescriptor, FieldName};
pub use response::ApiResponse;
