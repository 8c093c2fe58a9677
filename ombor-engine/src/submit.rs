//! Pre-submit validation and payload building
//!
//! Every validation failure here is blocking: submission is aborted before
//! any network call, with a specific error per cause, and no local state is
//! touched.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::fields::FieldName;
use shared::models::{
    BalanceCurrency, EntryContext, LineItem, LineStatus, PaymentMode, StockEntryPayload,
    StockLinePayload,
};

use crate::balance::BalanceCheck;
use crate::items::EntryItems;
use crate::money::{parse_amount, to_money_f64, to_qty_f64};
use rust_decimal::prelude::ToPrimitive;

/// Validate an entry for submission. Returns the first blocking cause.
pub fn validate_for_submit(
    ctx: &EntryContext,
    items: &EntryItems,
    balance: Option<&BalanceCheck>,
) -> AppResult<()> {
    if !ctx.common_fields_set() {
        return Err(AppError::new(ErrorCode::EntryFieldsIncomplete));
    }

    if ctx.payment_mode == PaymentMode::Debt
        && ctx.advance_of_debt.is_some_and(|a| a > 0.0)
        && ctx.deposit_payment_method.is_none()
    {
        return Err(AppError::new(ErrorCode::PaymentMethodRequired));
    }

    for (index, item) in items.items().iter().enumerate() {
        if item.status != LineStatus::Resolved {
            return Err(
                AppError::new(ErrorCode::LineItemUnresolved).with_detail("line", index as i64)
            );
        }
    }

    if ctx.payment_mode == PaymentMode::SupplierBalance {
        match balance {
            Some(check) if check.sufficient => {}
            Some(check) => {
                return Err(AppError::new(ErrorCode::InsufficientSupplierBalance)
                    .with_detail("required", check.required)
                    .with_detail("available", check.available));
            }
            None => return Err(AppError::new(ErrorCode::BalanceUnavailable)),
        }
    }

    Ok(())
}

/// Build the submission payload for one stock entry.
///
/// Line quantities use the quantity-for-history override when present, so
/// concurrent sales never have their history rewritten by a resave.
pub fn build_payload(
    ctx: &EntryContext,
    items: &EntryItems,
    balance_currency: BalanceCurrency,
) -> AppResult<StockEntryPayload> {
    let store = ctx
        .store
        .ok_or_else(|| AppError::new(ErrorCode::EntryFieldsIncomplete))?;
    let supplier = ctx
        .supplier
        .ok_or_else(|| AppError::new(ErrorCode::EntryFieldsIncomplete))?;
    let date_of_arrived = ctx
        .date_of_arrived
        .clone()
        .ok_or_else(|| AppError::new(ErrorCode::EntryFieldsIncomplete))?;

    let stocks = items
        .items()
        .iter()
        .map(line_payload)
        .collect::<AppResult<Vec<_>>>()?;

    let deleted = items.deleted_ids();
    let mut payload = StockEntryPayload {
        store,
        supplier,
        date_of_arrived,
        is_debt: None,
        amount_of_debt: None,
        advance_of_debt: None,
        use_supplier_balance: None,
        supplier_balance_type: None,
        deposit_payment_method: None,
        is_inventory_adjustment: None,
        payments: None,
        stocks,
        deleted_stocks: if deleted.is_empty() {
            None
        } else {
            Some(deleted)
        },
    };

    match ctx.payment_mode {
        PaymentMode::Payment => {
            payload.payments = Some(ctx.payments.clone());
        }
        PaymentMode::Debt => {
            payload.is_debt = Some(true);
            payload.amount_of_debt = Some(ctx.amount_of_debt);
            payload.advance_of_debt = ctx.advance_of_debt;
            payload.deposit_payment_method = ctx.deposit_payment_method;
        }
        PaymentMode::SupplierBalance => {
            payload.use_supplier_balance = Some(true);
            payload.supplier_balance_type = Some(balance_currency.as_str().to_string());
        }
        PaymentMode::InventoryAdjustment => {
            payload.is_inventory_adjustment = Some(true);
        }
    }

    Ok(payload)
}

fn line_payload(item: &LineItem) -> AppResult<StockLinePayload> {
    let reference = |name: FieldName| -> AppResult<i64> {
        item.field(name)
            .and_then(|v| v.trim().parse::<i64>().ok())
            .ok_or_else(|| {
                AppError::new(ErrorCode::LineItemUnresolved).with_detail("field", name.as_str())
            })
    };
    let money = |name: FieldName| -> f64 {
        item.field(name)
            .and_then(parse_amount)
            .map(to_money_f64)
            .unwrap_or(0.0)
    };
    let rate = item
        .field(FieldName::ExchangeRate)
        .and_then(parse_amount)
        .and_then(|d| d.to_f64())
        .unwrap_or(1.0);

    // Quantity history protection: prefer the recorded quantity-for-history
    let quantity = match item.historical_quantity_override {
        Some(historical) => historical,
        None => money(FieldName::Quantity),
    };

    Ok(StockLinePayload {
        id: item.persisted_id,
        product: reference(FieldName::Product)?,
        purchase_unit: reference(FieldName::PurchaseUnit)?,
        currency: reference(FieldName::Currency)?,
        exchange_rate: rate,
        quantity,
        purchase_unit_quantity: item
            .field(FieldName::PurchaseUnitQuantity)
            .and_then(parse_amount)
            .map(to_qty_f64)
            .unwrap_or(0.0),
        price_per_unit_uz: money(FieldName::PricePerUnitBase),
        total_price_in_uz: money(FieldName::TotalPriceInBase),
        price_per_unit_currency: money(FieldName::PricePerUnitCurrency),
        total_price_in_currency: money(FieldName::TotalPriceInCurrency),
        base_unit_in_uzs: money(FieldName::BaseUnitCostBase),
        base_unit_in_currency: money(FieldName::BaseUnitCostCurrency),
        stock_name: item.field(FieldName::StockName).map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{CalcMetadata, PaymentSplit, PersistedStockRow};

    fn resolved_items() -> EntryItems {
        let mut items = EntryItems::new();
        let id = items.items()[0].id;
        let item = items.get_mut(id).unwrap();
        item.status = LineStatus::Resolved;
        item.metadata = Some(CalcMetadata {
            conversion_factor: 1.0,
            exchange_rate: 12500.0,
            is_base_currency: false,
        });
        item.set_field(FieldName::Product, "11");
        item.set_field(FieldName::Currency, "2");
        item.set_field(FieldName::PurchaseUnit, "5");
        item.set_field(FieldName::ExchangeRate, "12500");
        item.set_field(FieldName::Quantity, "10");
        item.set_field(FieldName::PurchaseUnitQuantity, "10");
        item.set_field(FieldName::PricePerUnitCurrency, "2");
        item.set_field(FieldName::TotalPriceInCurrency, "20");
        item.set_field(FieldName::PricePerUnitBase, "25000");
        item.set_field(FieldName::TotalPriceInBase, "250000");
        items
    }

    fn context() -> EntryContext {
        EntryContext {
            store: Some(1),
            supplier: Some(9),
            date_of_arrived: Some("2025-03-01T10:00:00".to_string()),
            ..EntryContext::default()
        }
    }

    #[test]
    fn test_missing_common_fields_blocks() {
        let err = validate_for_submit(&EntryContext::default(), &resolved_items(), None)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::EntryFieldsIncomplete);
    }

    #[test]
    fn test_unresolved_line_blocks() {
        let mut items = resolved_items();
        items.add();
        let err = validate_for_submit(&context(), &items, None).unwrap_err();
        assert_eq!(err.code, ErrorCode::LineItemUnresolved);
        assert_eq!(err.details.unwrap()["line"], 1);
    }

    #[test]
    fn test_advance_without_method_blocks() {
        let mut ctx = context();
        ctx.payment_mode = PaymentMode::Debt;
        ctx.advance_of_debt = Some(100.0);
        let err = validate_for_submit(&ctx, &resolved_items(), None).unwrap_err();
        assert_eq!(err.code, ErrorCode::PaymentMethodRequired);

        ctx.deposit_payment_method = Some(3);
        validate_for_submit(&ctx, &resolved_items(), None).unwrap();
    }

    #[test]
    fn test_insufficient_balance_blocks() {
        let mut ctx = context();
        ctx.payment_mode = PaymentMode::SupplierBalance;
        let check = BalanceCheck {
            sufficient: false,
            available: 100.0,
            required: 150.0,
            currency: BalanceCurrency::Usd,
        };
        let err = validate_for_submit(&ctx, &resolved_items(), Some(&check)).unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientSupplierBalance);

        let err = validate_for_submit(&ctx, &resolved_items(), None).unwrap_err();
        assert_eq!(err.code, ErrorCode::BalanceUnavailable);
    }

    #[test]
    fn test_payload_payment_mode() {
        let mut ctx = context();
        ctx.payments = vec![PaymentSplit { amount: 250000.0, payment_type: 1 }];
        let payload = build_payload(&ctx, &resolved_items(), BalanceCurrency::Usd).unwrap();
        assert_eq!(payload.payments.as_ref().unwrap().len(), 1);
        assert_eq!(payload.is_debt, None);
        let line = &payload.stocks[0];
        assert_eq!(line.product, 11);
        assert_eq!(line.quantity, 10.0);
        assert_eq!(line.total_price_in_uz, 250000.0);
    }

    #[test]
    fn test_payload_supplier_balance_mode() {
        let mut ctx = context();
        ctx.payment_mode = PaymentMode::SupplierBalance;
        let payload = build_payload(&ctx, &resolved_items(), BalanceCurrency::Uzs).unwrap();
        assert_eq!(payload.use_supplier_balance, Some(true));
        assert_eq!(payload.supplier_balance_type.as_deref(), Some("uzs"));
    }

    #[test]
    fn test_quantity_override_used_in_payload() {
        let row = PersistedStockRow {
            id: 42,
            product: 11,
            purchase_unit: 5,
            currency: 2,
            exchange_rate: 12500.0,
            quantity: 7.0,
            quantity_for_history: 10.0,
            purchase_unit_quantity: 10.0,
            price_per_unit_uz: 25000.0,
            total_price_in_uz: 250000.0,
            price_per_unit_currency: 2.0,
            total_price_in_currency: 20.0,
            base_unit_in_uzs: 25000.0,
            base_unit_in_currency: 2.0,
            stock_name: None,
        };
        let mut items = EntryItems::hydrate(&[row]);
        let id = items.items()[0].id;
        items.get_mut(id).unwrap().status = LineStatus::Resolved;

        let payload = build_payload(&context(), &items, BalanceCurrency::Usd).unwrap();
        let line = &payload.stocks[0];
        assert_eq!(line.id, Some(42));
        // Live quantity is 7 but history records 10; the payload must say 10
        assert_eq!(line.quantity, 10.0);
    }

    #[test]
    fn test_deleted_ids_included() {
        let mut items = resolved_items();
        let extra = items.add();
        items.get_mut(extra).unwrap().persisted_id = Some(77);
        // Make it submittable after removal
        items.remove(extra).unwrap();
        let payload = build_payload(&context(), &items, BalanceCurrency::Usd).unwrap();
        assert_eq!(payload.deleted_stocks, Some(vec![77]));
    }
}
