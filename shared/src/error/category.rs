//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Field configuration errors
/// - 2xxx: Stock entry errors
/// - 3xxx: Supplier / balance errors
/// - 4xxx: Payment errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Field configuration errors (1xxx)
    Config,
    /// Stock entry errors (2xxx)
    Entry,
    /// Supplier / balance errors (3xxx)
    Supplier,
    /// Payment errors (4xxx)
    Payment,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Config,
            2000..3000 => Self::Entry,
            3000..4000 => Self::Supplier,
            4000..5000 => Self::Payment,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Config => "config",
            Self::Entry => "entry",
            Self::Supplier => "supplier",
            Self::Payment => "payment",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_ranges() {
        assert_eq!(ErrorCode::ValidationFailed.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::ConfigFetchFailed.category(), ErrorCategory::Config);
        assert_eq!(ErrorCode::LastLineItem.category(), ErrorCategory::Entry);
        assert_eq!(
            ErrorCode::InsufficientSupplierBalance.category(),
            ErrorCategory::Supplier
        );
        assert_eq!(
            ErrorCode::PaymentMethodRequired.category(),
            ErrorCategory::Payment
        );
        assert_eq!(ErrorCode::NetworkError.category(), ErrorCategory::System);
    }
}
