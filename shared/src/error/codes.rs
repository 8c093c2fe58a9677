//! Unified error codes for the Ombor stock-intake crates
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Field configuration / pricing errors
//! - 2xxx: Stock entry / line-item errors
//! - 3xxx: Supplier / balance errors
//! - 4xxx: Payment errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 4,
    /// Required field missing
    RequiredField = 5,

    // ==================== 1xxx: Field configuration ====================
    /// Resolution context is incomplete (store/product/currency/unit/supplier/date)
    ConfigContextIncomplete = 1001,
    /// Remote field configuration request failed
    ConfigFetchFailed = 1002,
    /// A resolution is already in flight for this line item
    ConfigResolveInFlight = 1003,
    /// Remote response carried no usable field descriptors
    ConfigResponseEmpty = 1004,

    // ==================== 2xxx: Stock entry ====================
    /// Line item not found in the collection
    LineItemNotFound = 2001,
    /// Line item has not been resolved yet
    LineItemUnresolved = 2002,
    /// Removing the last remaining line item is not allowed
    LastLineItem = 2003,
    /// Calculation metadata is missing for this line item
    MetadataMissing = 2004,
    /// Live quantity diverges from the recorded quantity-for-history
    QuantityHistoryMismatch = 2005,
    /// Entry common fields (store/supplier/date) are incomplete
    EntryFieldsIncomplete = 2006,

    // ==================== 3xxx: Supplier / balance ====================
    /// Supplier not found
    SupplierNotFound = 3001,
    /// Supplier balance does not cover the entry total
    InsufficientSupplierBalance = 3002,
    /// Supplier balance snapshot is unavailable
    BalanceUnavailable = 3003,

    // ==================== 4xxx: Payment ====================
    /// Payment method is required for an advance payment
    PaymentMethodRequired = 4001,
    /// Payment amount is invalid
    InvalidPaymentAmount = 4002,
    /// Payment splits do not sum to the entry total
    PaymentSplitMismatch = 4003,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Network error
    NetworkError = 9002,
    /// Serialization/deserialization error
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",

            // Field configuration
            ErrorCode::ConfigContextIncomplete => {
                "Field configuration context is incomplete"
            }
            ErrorCode::ConfigFetchFailed => "Failed to fetch field configuration",
            ErrorCode::ConfigResolveInFlight => {
                "A field configuration request is already in flight"
            }
            ErrorCode::ConfigResponseEmpty => {
                "Field configuration response contained no descriptors"
            }

            // Stock entry
            ErrorCode::LineItemNotFound => "Line item not found",
            ErrorCode::LineItemUnresolved => "Line item is not resolved",
            ErrorCode::LastLineItem => "Cannot remove the last line item",
            ErrorCode::MetadataMissing => "Calculation metadata is missing",
            ErrorCode::QuantityHistoryMismatch => {
                "Quantity diverges from recorded history"
            }
            ErrorCode::EntryFieldsIncomplete => "Entry common fields are incomplete",

            // Supplier / balance
            ErrorCode::SupplierNotFound => "Supplier not found",
            ErrorCode::InsufficientSupplierBalance => {
                "Supplier balance does not cover the entry total"
            }
            ErrorCode::BalanceUnavailable => "Supplier balance is unavailable",

            // Payment
            ErrorCode::PaymentMethodRequired => "Payment method is required",
            ErrorCode::InvalidPaymentAmount => "Payment amount is invalid",
            ErrorCode::PaymentSplitMismatch => {
                "Payment splits do not sum to the entry total"
            }

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::SerializationError => "Serialization error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => ErrorCode::Success,
            1 => ErrorCode::Unknown,
            2 => ErrorCode::ValidationFailed,
            3 => ErrorCode::NotFound,
            4 => ErrorCode::InvalidRequest,
            5 => ErrorCode::RequiredField,
            1001 => ErrorCode::ConfigContextIncomplete,
            1002 => ErrorCode::ConfigFetchFailed,
            1003 => ErrorCode::ConfigResolveInFlight,
            1004 => ErrorCode::ConfigResponseEmpty,
            2001 => ErrorCode::LineItemNotFound,
            2002 => ErrorCode::LineItemUnresolved,
            2003 => ErrorCode::LastLineItem,
            2004 => ErrorCode::MetadataMissing,
            2005 => ErrorCode::QuantityHistoryMismatch,
            2006 => ErrorCode::EntryFieldsIncomplete,
            3001 => ErrorCode::SupplierNotFound,
            3002 => ErrorCode::InsufficientSupplierBalance,
            3003 => ErrorCode::BalanceUnavailable,
            4001 => ErrorCode::PaymentMethodRequired,
            4002 => ErrorCode::InvalidPaymentAmount,
            4003 => ErrorCode::PaymentSplitMismatch,
            9001 => ErrorCode::InternalError,
            9002 => ErrorCode::NetworkError,
            9003 => ErrorCode::SerializationError,
            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}
