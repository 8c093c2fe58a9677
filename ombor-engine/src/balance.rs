//! Supplier balance sufficiency
//!
//! Computes whether a supplier's balance, in a chosen comparison currency,
//! covers the aggregated purchase total — with the edit-mode correction
//! that credits back the amount this entry consumed on a prior save.

use rust_decimal::Decimal;
use shared::models::{BalanceCurrency, BalanceType, SupplierBalanceSnapshot};

use crate::aggregate::EntryTotals;
use crate::money::{round_money, to_decimal, to_money_f64};

/// Outcome of a balance sufficiency check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalanceCheck {
    pub sufficient: bool,
    /// Balance available for this entry, in the comparison currency
    pub available: f64,
    /// Aggregated entry requirement, in the comparison currency
    pub required: f64,
    /// Currency the comparison was carried out in
    pub currency: BalanceCurrency,
}

/// Check whether the supplier's balance covers the entry.
///
/// When `Usd` is chosen and a live rate is available, the base-currency
/// grand total is divided by the rate; without a rate the comparison stays
/// in base currency against the UZS balance. The prior consumed amount is
/// converted into the comparison currency (identity when the supplier's
/// native balance currency already matches) and credited back to the
/// available side. Exact equality is sufficient.
pub fn check_balance(
    totals: &EntryTotals,
    snapshot: &SupplierBalanceSnapshot,
    chosen: BalanceCurrency,
    live_usd_rate: Option<f64>,
) -> BalanceCheck {
    let grand = to_decimal(totals.grand_total);
    let rate = live_usd_rate
        .map(to_decimal)
        .filter(|r| !r.is_zero());

    // Effective comparison currency: USD without a usable rate degrades to
    // a base-currency comparison
    let currency = match chosen {
        BalanceCurrency::Usd if rate.is_some() => BalanceCurrency::Usd,
        BalanceCurrency::Usd => BalanceCurrency::Uzs,
        BalanceCurrency::Uzs => BalanceCurrency::Uzs,
    };

    let (required, mut available) = match (currency, rate) {
        (BalanceCurrency::Usd, Some(r)) => (grand / r, to_decimal(snapshot.balance_usd)),
        _ => (grand, to_decimal(snapshot.balance_uzs)),
    };

    available += convert_prior_consumed(snapshot, currency, rate);

    let required = round_money(required);
    let available = round_money(available);
    BalanceCheck {
        sufficient: required <= available,
        available: to_money_f64(available),
        required: to_money_f64(required),
        currency,
    }
}

/// Convert the prior consumed amount (in the supplier's native balance
/// currency) into the comparison currency. Without a usable rate a
/// cross-currency correction is dropped rather than guessed.
fn convert_prior_consumed(
    snapshot: &SupplierBalanceSnapshot,
    currency: BalanceCurrency,
    rate: Option<Decimal>,
) -> Decimal {
    let prior = to_decimal(snapshot.prior_consumed_amount);
    if prior.is_zero() {
        return Decimal::ZERO;
    }
    match (snapshot.balance_type, currency) {
        (BalanceType::Usd, BalanceCurrency::Usd) => prior,
        (BalanceType::Uzs, BalanceCurrency::Uzs) => prior,
        (BalanceType::Uzs, BalanceCurrency::Usd) => match rate {
            Some(r) => prior / r,
            None => Decimal::ZERO,
        },
        (BalanceType::Usd, BalanceCurrency::Uzs) => match rate {
            Some(r) => prior * r,
            None => Decimal::ZERO,
        },
        // Unknown native denomination: treat as already in the comparison
        // currency
        (BalanceType::Other, _) => prior,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(grand: f64) -> EntryTotals {
        EntryTotals {
            base_currency_total: grand,
            foreign_currency_total: 0.0,
            grand_total: grand,
        }
    }

    fn snapshot(uzs: f64, usd: f64, balance_type: BalanceType, prior: f64) -> SupplierBalanceSnapshot {
        SupplierBalanceSnapshot {
            balance_uzs: uzs,
            balance_usd: usd,
            balance_type,
            prior_consumed_amount: prior,
        }
    }

    #[test]
    fn test_usd_comparison_divides_by_rate() {
        let check = check_balance(
            &totals(1_250_000.0),
            &snapshot(0.0, 150.0, BalanceType::Usd, 0.0),
            BalanceCurrency::Usd,
            Some(12500.0),
        );
        assert_eq!(check.currency, BalanceCurrency::Usd);
        assert_eq!(check.required, 100.0);
        assert_eq!(check.available, 150.0);
        assert!(check.sufficient);
    }

    #[test]
    fn test_insufficient_usd_balance() {
        let check = check_balance(
            &totals(1_875_000.0), // 150 USD at 12500
            &snapshot(0.0, 100.0, BalanceType::Usd, 0.0),
            BalanceCurrency::Usd,
            Some(12500.0),
        );
        assert_eq!(check.required, 150.0);
        assert!(!check.sufficient);
    }

    #[test]
    fn test_exact_equality_is_sufficient() {
        let check = check_balance(
            &totals(1_250_000.0),
            &snapshot(0.0, 100.0, BalanceType::Usd, 0.0),
            BalanceCurrency::Usd,
            Some(12500.0),
        );
        assert_eq!(check.required, check.available);
        assert!(check.sufficient);
    }

    #[test]
    fn test_one_cent_over_is_insufficient() {
        let check = check_balance(
            &totals(1_250_001.25),
            &snapshot(0.0, 100.0, BalanceType::Usd, 0.0),
            BalanceCurrency::Usd,
            Some(12500.0),
        );
        // 1_250_001.25 / 12500 = 100.0001, rounds to 100.00 -> still covered
        assert!(check.sufficient);

        let check = check_balance(
            &totals(1_250_125.0), // exactly 100.01 USD
            &snapshot(0.0, 100.0, BalanceType::Usd, 0.0),
            BalanceCurrency::Usd,
            Some(12500.0),
        );
        assert_eq!(check.required, 100.01);
        assert!(!check.sufficient);
    }

    #[test]
    fn test_usd_without_rate_degrades_to_base_currency() {
        let check = check_balance(
            &totals(500_000.0),
            &snapshot(600_000.0, 10.0, BalanceType::Uzs, 0.0),
            BalanceCurrency::Usd,
            None,
        );
        assert_eq!(check.currency, BalanceCurrency::Uzs);
        assert_eq!(check.available, 600_000.0);
        assert!(check.sufficient);
    }

    #[test]
    fn test_uzs_comparison() {
        let check = check_balance(
            &totals(500_000.0),
            &snapshot(400_000.0, 999.0, BalanceType::Uzs, 0.0),
            BalanceCurrency::Uzs,
            Some(12500.0),
        );
        assert_eq!(check.currency, BalanceCurrency::Uzs);
        assert!(!check.sufficient);
    }

    #[test]
    fn test_prior_consumed_credited_in_native_currency() {
        // Edit mode: the entry previously consumed 60 USD; balance shows 50
        let check = check_balance(
            &totals(1_250_000.0), // 100 USD
            &snapshot(0.0, 50.0, BalanceType::Usd, 60.0),
            BalanceCurrency::Usd,
            Some(12500.0),
        );
        assert_eq!(check.available, 110.0);
        assert!(check.sufficient);
    }

    #[test]
    fn test_prior_consumed_converted_across_currencies() {
        // Native UZS prior consumption credited to a USD comparison
        let check = check_balance(
            &totals(1_250_000.0), // 100 USD
            &snapshot(0.0, 40.0, BalanceType::Uzs, 750_000.0), // 60 USD at 12500
            BalanceCurrency::Usd,
            Some(12500.0),
        );
        assert_eq!(check.available, 100.0);
        assert!(check.sufficient);

        // Native USD prior consumption credited to a UZS comparison
        let check = check_balance(
            &totals(500_000.0),
            &snapshot(100_000.0, 0.0, BalanceType::Usd, 40.0),
            BalanceCurrency::Uzs,
            Some(12500.0),
        );
        assert_eq!(check.available, 600_000.0);
        assert!(check.sufficient);
    }

    #[test]
    fn test_cross_currency_correction_dropped_without_rate() {
        let check = check_balance(
            &totals(500_000.0),
            &snapshot(100_000.0, 0.0, BalanceType::Usd, 40.0),
            BalanceCurrency::Uzs,
            None,
        );
        assert_eq!(check.available, 100_000.0);
        assert!(!check.sufficient);
    }
}
