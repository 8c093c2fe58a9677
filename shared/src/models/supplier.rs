//! Supplier balance model

use serde::{Deserialize, Serialize};

/// Native denomination of a supplier's balance ledger
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BalanceType {
    #[default]
    Uzs,
    Usd,
    /// Anything else; balance comparisons default to USD
    Other,
}

/// Currency the sufficiency comparison is carried out in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BalanceCurrency {
    #[default]
    Usd,
    Uzs,
}

impl BalanceCurrency {
    /// Default comparison currency for a supplier: the native balance
    /// currency when it is UZS or USD, otherwise USD.
    pub fn default_for(balance_type: BalanceType) -> Self {
        match balance_type {
            BalanceType::Uzs => Self::Uzs,
            BalanceType::Usd | BalanceType::Other => Self::Usd,
        }
    }

    /// Wire name for the submission payload's `supplier_balance_type`
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Usd => "usd",
            Self::Uzs => "uzs",
        }
    }
}

/// Supplier's current balance, as fetched for the editing session
///
/// The two amounts are tracked independently; they are not conversions of
/// one another.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SupplierBalanceSnapshot {
    /// UZS-denominated balance
    pub balance_uzs: f64,
    /// USD-denominated balance
    pub balance_usd: f64,
    /// Native denomination of the supplier's ledger
    pub balance_type: BalanceType,
    /// Amount already attributed to this entry by a prior save, in the
    /// supplier's native balance currency. Zero for new entries.
    pub prior_consumed_amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_comparison_currency() {
        assert_eq!(
            BalanceCurrency::default_for(BalanceType::Uzs),
            BalanceCurrency::Uzs
        );
        assert_eq!(
            BalanceCurrency::default_for(BalanceType::Usd),
            BalanceCurrency::Usd
        );
        assert_eq!(
            BalanceCurrency::default_for(BalanceType::Other),
            BalanceCurrency::Usd
        );
    }
}
