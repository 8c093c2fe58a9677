//! Entry-level aggregation
//!
//! Sums calculated line items into entry totals, bucketed by currency
//! regime, and feeds the debt-amount auto-fill and payment-split
//! auto-initialization.

use rust_decimal::Decimal;
use shared::fields::FieldName;
use shared::models::{EntryContext, LineItem, LineStatus, PaymentMode, PaymentSplit};

use crate::money::{parse_amount, to_money_f64};

/// Aggregated totals for one stock entry, in base currency
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EntryTotals {
    /// Σ total-in-base over resolved items whose line currency is the base
    pub base_currency_total: f64,
    /// Σ total-in-base over resolved items in a foreign currency
    pub foreign_currency_total: f64,
    /// Σ total-in-base over all resolved items
    pub grand_total: f64,
}

/// Recompute entry totals from the current line items.
///
/// Only items with `Resolved` status contribute; unresolved and failed
/// lines are not priced yet.
pub fn aggregate(items: &[LineItem]) -> EntryTotals {
    let mut base = Decimal::ZERO;
    let mut foreign = Decimal::ZERO;

    for item in items {
        if item.status != LineStatus::Resolved {
            continue;
        }
        let Some(total) = item.field(FieldName::TotalPriceInBase).and_then(parse_amount)
        else {
            continue;
        };
        match item.metadata {
            Some(meta) if meta.is_base_currency => base += total,
            Some(_) => foreign += total,
            None => continue,
        }
    }

    EntryTotals {
        base_currency_total: to_money_f64(base),
        foreign_currency_total: to_money_f64(foreign),
        grand_total: to_money_f64(base + foreign),
    }
}

/// Push aggregated totals into the entry-level form state.
///
/// - `Debt` mode: the debt amount follows the grand total.
/// - `Payment` mode: a single split covering the full total is created when
///   none exists; the sole split's amount follows total drift; user-added
///   additional splits are never auto-adjusted.
pub fn sync_context(ctx: &mut EntryContext, totals: &EntryTotals, default_method: i64) {
    match ctx.payment_mode {
        PaymentMode::Debt => {
            ctx.amount_of_debt = totals.grand_total;
        }
        PaymentMode::Payment => match ctx.payments.len() {
            0 => ctx.payments.push(PaymentSplit {
                amount: totals.grand_total,
                payment_type: default_method,
            }),
            1 => ctx.payments[0].amount = totals.grand_total,
            _ => {}
        },
        PaymentMode::SupplierBalance | PaymentMode::InventoryAdjustment => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::CalcMetadata;

    fn resolved(total_base: &str, is_base: bool) -> LineItem {
        let mut item = LineItem::new();
        item.status = LineStatus::Resolved;
        item.metadata = Some(CalcMetadata {
            conversion_factor: 1.0,
            exchange_rate: if is_base { 1.0 } else { 12500.0 },
            is_base_currency: is_base,
        });
        item.set_field(FieldName::TotalPriceInBase, total_base);
        item
    }

    #[test]
    fn test_buckets_by_currency_regime() {
        let items = vec![
            resolved("100000", true),
            resolved("250000", false),
            resolved("50000", true),
        ];
        let totals = aggregate(&items);
        assert_eq!(totals.base_currency_total, 150000.0);
        assert_eq!(totals.foreign_currency_total, 250000.0);
        assert_eq!(totals.grand_total, 400000.0);
    }

    #[test]
    fn test_unresolved_items_excluded() {
        let mut pending = resolved("99999", true);
        pending.status = LineStatus::Resolving;
        let mut failed = resolved("11111", true);
        failed.status = LineStatus::Error;
        let items = vec![resolved("100", true), pending, failed, LineItem::new()];
        assert_eq!(aggregate(&items).grand_total, 100.0);
    }

    #[test]
    fn test_debt_mode_autofills_amount() {
        let mut ctx = EntryContext {
            payment_mode: PaymentMode::Debt,
            ..EntryContext::default()
        };
        sync_context(&mut ctx, &EntryTotals { grand_total: 500.0, ..Default::default() }, 1);
        assert_eq!(ctx.amount_of_debt, 500.0);
        assert!(ctx.payments.is_empty());
    }

    #[test]
    fn test_payment_mode_initializes_single_split() {
        let mut ctx = EntryContext {
            payment_mode: PaymentMode::Payment,
            ..EntryContext::default()
        };
        sync_context(&mut ctx, &EntryTotals { grand_total: 500.0, ..Default::default() }, 7);
        assert_eq!(ctx.payments, vec![PaymentSplit { amount: 500.0, payment_type: 7 }]);

        // Total drifts: the sole split follows
        sync_context(&mut ctx, &EntryTotals { grand_total: 650.0, ..Default::default() }, 7);
        assert_eq!(ctx.payments.len(), 1);
        assert_eq!(ctx.payments[0].amount, 650.0);
    }

    #[test]
    fn test_user_added_splits_never_adjusted() {
        let mut ctx = EntryContext {
            payment_mode: PaymentMode::Payment,
            payments: vec![
                PaymentSplit { amount: 300.0, payment_type: 1 },
                PaymentSplit { amount: 200.0, payment_type: 2 },
            ],
            ..EntryContext::default()
        };
        sync_context(&mut ctx, &EntryTotals { grand_total: 999.0, ..Default::default() }, 1);
        assert_eq!(ctx.payments[0].amount, 300.0);
        assert_eq!(ctx.payments[1].amount, 200.0);
    }

    #[test]
    fn test_supplier_balance_mode_untouched() {
        let mut ctx = EntryContext {
            payment_mode: PaymentMode::SupplierBalance,
            ..EntryContext::default()
        };
        sync_context(&mut ctx, &EntryTotals { grand_total: 500.0, ..Default::default() }, 1);
        assert_eq!(ctx.amount_of_debt, 0.0);
        assert!(ctx.payments.is_empty());
    }
}
