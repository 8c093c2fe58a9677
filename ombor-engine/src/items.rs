//! Line-item collection manager
//!
//! Add/duplicate/remove/select line items for one editing session, tracking
//! which pre-existing rows are marked for deletion. Structural edits
//! (product/currency/purchase-unit) go through here because they invalidate
//! the derivation graph's conversion factor.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::fields::FieldName;
use shared::models::{LineItem, LineStatus, PersistedStockRow};
use std::collections::HashSet;
use uuid::Uuid;

use crate::money::{format_money, format_qty, to_decimal, to_money_f64};

/// The line items of one stock entry being edited
#[derive(Debug, Clone, Default)]
pub struct EntryItems {
    items: Vec<LineItem>,
    /// Persisted ids of removed rows, sent as `deleted_stocks` on submit
    deleted: HashSet<i64>,
}

impl EntryItems {
    /// Start a session with a single fresh line item
    pub fn new() -> Self {
        Self {
            items: vec![LineItem::new()],
            deleted: HashSet::new(),
        }
    }

    /// Hydrate a session from previously saved stock rows.
    ///
    /// When a row's live quantity no longer matches its recorded
    /// quantity-for-history (stock partially sold since), the original value
    /// is kept as an override so history is never silently rewritten.
    pub fn hydrate(rows: &[PersistedStockRow]) -> Self {
        let items = rows.iter().map(Self::item_from_row).collect::<Vec<_>>();
        Self {
            items: if items.is_empty() {
                vec![LineItem::new()]
            } else {
                items
            },
            deleted: HashSet::new(),
        }
    }

    fn item_from_row(row: &PersistedStockRow) -> LineItem {
        let mut item = LineItem::new();
        item.persisted_id = Some(row.id);
        item.expanded = false;
        item.set_field(FieldName::Product, row.product.to_string());
        item.set_field(FieldName::Currency, row.currency.to_string());
        item.set_field(FieldName::PurchaseUnit, row.purchase_unit.to_string());
        item.set_field(FieldName::ExchangeRate, format_money(to_decimal(row.exchange_rate)));
        item.set_field(FieldName::Quantity, format_money(to_decimal(row.quantity)));
        item.set_field(
            FieldName::PurchaseUnitQuantity,
            format_qty(to_decimal(row.purchase_unit_quantity)),
        );
        item.set_field(
            FieldName::PricePerUnitCurrency,
            format_money(to_decimal(row.price_per_unit_currency)),
        );
        item.set_field(
            FieldName::TotalPriceInCurrency,
            format_money(to_decimal(row.total_price_in_currency)),
        );
        item.set_field(
            FieldName::PricePerUnitBase,
            format_money(to_decimal(row.price_per_unit_uz)),
        );
        item.set_field(
            FieldName::TotalPriceInBase,
            format_money(to_decimal(row.total_price_in_uz)),
        );
        item.set_field(
            FieldName::BaseUnitCostCurrency,
            format_money(to_decimal(row.base_unit_in_currency)),
        );
        item.set_field(
            FieldName::BaseUnitCostBase,
            format_money(to_decimal(row.base_unit_in_uzs)),
        );
        if let Some(name) = &row.stock_name {
            item.set_field(FieldName::StockName, name.clone());
        }
        // Compare at storage precision (2 dp)
        let live = to_money_f64(to_decimal(row.quantity));
        let historical = to_money_f64(to_decimal(row.quantity_for_history));
        if live != historical {
            item.historical_quantity_override = Some(row.quantity_for_history);
        }
        item
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Persisted ids marked for deletion this session
    pub fn deleted_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.deleted.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn get(&self, id: Uuid) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|i| i.id == id)
    }

    fn require_mut(&mut self, id: Uuid) -> AppResult<&mut LineItem> {
        self.items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| AppError::new(ErrorCode::LineItemNotFound))
    }

    /// Add a fresh line item, expanded, collapsing all siblings
    pub fn add(&mut self) -> Uuid {
        for item in &mut self.items {
            item.expanded = false;
        }
        let item = LineItem::new();
        let id = item.id;
        self.items.push(item);
        id
    }

    /// Duplicate a line: copies all fields, clears the persisted id and the
    /// calculated state so the copy resolves on its own
    pub fn duplicate(&mut self, id: Uuid) -> AppResult<Uuid> {
        let source = self
            .get(id)
            .ok_or_else(|| AppError::new(ErrorCode::LineItemNotFound))?;
        let mut copy = source.clone();
        copy.id = Uuid::new_v4();
        copy.persisted_id = None;
        copy.status = LineStatus::Unresolved;
        copy.metadata = None;
        copy.historical_quantity_override = None;
        copy.selected = false;
        copy.expanded = true;
        let new_id = copy.id;
        for item in &mut self.items {
            item.expanded = false;
        }
        self.items.push(copy);
        Ok(new_id)
    }

    /// Remove a single line item; refuses to leave the collection empty
    pub fn remove(&mut self, id: Uuid) -> AppResult<()> {
        if self.items.len() <= 1 {
            return Err(AppError::new(ErrorCode::LastLineItem));
        }
        let index = self
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| AppError::new(ErrorCode::LineItemNotFound))?;
        let removed = self.items.remove(index);
        if let Some(persisted) = removed.persisted_id {
            self.deleted.insert(persisted);
        }
        Ok(())
    }

    /// Remove every selected line item; refuses when that would leave zero
    pub fn remove_selected(&mut self) -> AppResult<usize> {
        let selected = self.items.iter().filter(|i| i.selected).count();
        if selected == 0 {
            return Ok(0);
        }
        if selected >= self.items.len() {
            return Err(AppError::new(ErrorCode::LastLineItem));
        }
        for item in self.items.iter().filter(|i| i.selected) {
            if let Some(persisted) = item.persisted_id {
                self.deleted.insert(persisted);
            }
        }
        self.items.retain(|i| !i.selected);
        Ok(selected)
    }

    pub fn set_selected(&mut self, id: Uuid, selected: bool) -> AppResult<()> {
        self.require_mut(id)?.selected = selected;
        Ok(())
    }

    pub fn toggle_expanded(&mut self, id: Uuid) -> AppResult<()> {
        let item = self.require_mut(id)?;
        item.expanded = !item.expanded;
        Ok(())
    }

    pub fn set_all_expanded(&mut self, expanded: bool) {
        for item in &mut self.items {
            item.expanded = expanded;
        }
    }

    /// Apply a structural edit (product/currency/purchase-unit).
    ///
    /// The derivation graph's conversion factor is no longer valid, so the
    /// line drops back to `Unresolved`, metadata is cleared, and downstream
    /// monetary fields are wiped — quantity fields are preserved.
    pub fn apply_structural_edit(
        &mut self,
        id: Uuid,
        field: FieldName,
        value: &str,
    ) -> AppResult<()> {
        if !field.is_structural() {
            return Err(AppError::invalid_request(format!(
                "{} is not a structural field",
                field
            )));
        }
        let item = self.require_mut(id)?;
        item.set_field(field, value);
        item.status = LineStatus::Unresolved;
        item.metadata = None;
        for name in FieldName::ALL {
            if name.is_monetary() {
                item.clear_field(name);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, quantity: f64, quantity_for_history: f64) -> PersistedStockRow {
        PersistedStockRow {
            id,
            product: 11,
            purchase_unit: 5,
            currency: 2,
            exchange_rate: 12500.0,
            quantity,
            quantity_for_history,
            purchase_unit_quantity: quantity,
            price_per_unit_uz: 25000.0,
            total_price_in_uz: 250000.0,
            price_per_unit_currency: 2.0,
            total_price_in_currency: 20.0,
            base_unit_in_uzs: 25000.0,
            base_unit_in_currency: 2.0,
            stock_name: Some("roll-a".to_string()),
        }
    }

    #[test]
    fn test_new_session_has_one_item() {
        let items = EntryItems::new();
        assert_eq!(items.len(), 1);
        assert!(items.items()[0].expanded);
    }

    #[test]
    fn test_add_collapses_siblings() {
        let mut items = EntryItems::new();
        let first = items.items()[0].id;
        let second = items.add();
        assert!(!items.get(first).unwrap().expanded);
        assert!(items.get(second).unwrap().expanded);
    }

    #[test]
    fn test_duplicate_clears_persisted_state() {
        let mut items = EntryItems::hydrate(&[row(42, 10.0, 10.0)]);
        let source = items.items()[0].id;
        let copy_id = items.duplicate(source).unwrap();
        let copy = items.get(copy_id).unwrap();
        assert_eq!(copy.persisted_id, None);
        assert_eq!(copy.status, LineStatus::Unresolved);
        assert!(copy.metadata.is_none());
        assert_eq!(copy.field(FieldName::TotalPriceInCurrency), Some("20"));
    }

    #[test]
    fn test_remove_last_item_rejected() {
        let mut items = EntryItems::new();
        let only = items.items()[0].id;
        let err = items.remove(only).unwrap_err();
        assert_eq!(err.code, ErrorCode::LastLineItem);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_remove_persisted_row_tracks_deletion() {
        let mut items = EntryItems::hydrate(&[row(42, 10.0, 10.0), row(43, 5.0, 5.0)]);
        let first = items.items()[0].id;
        items.remove(first).unwrap();
        assert_eq!(items.deleted_ids(), vec![42]);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_remove_selected_refuses_to_empty() {
        let mut items = EntryItems::new();
        let a = items.items()[0].id;
        let b = items.add();
        items.set_selected(a, true).unwrap();
        items.set_selected(b, true).unwrap();
        let err = items.remove_selected().unwrap_err();
        assert_eq!(err.code, ErrorCode::LastLineItem);

        items.set_selected(b, false).unwrap();
        assert_eq!(items.remove_selected().unwrap(), 1);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_hydration_detects_quantity_mismatch() {
        let items = EntryItems::hydrate(&[row(1, 7.0, 10.0), row(2, 5.0, 5.0)]);
        assert_eq!(items.items()[0].historical_quantity_override, Some(10.0));
        assert!(items.items()[0].has_quantity_mismatch());
        assert_eq!(items.items()[1].historical_quantity_override, None);
    }

    #[test]
    fn test_structural_edit_resets_derivation_state() {
        let mut items = EntryItems::hydrate(&[row(1, 10.0, 10.0)]);
        let id = items.items()[0].id;
        {
            let item = items.get_mut(id).unwrap();
            item.status = LineStatus::Resolved;
            item.metadata = Some(shared::models::CalcMetadata {
                conversion_factor: 1.0,
                exchange_rate: 12500.0,
                is_base_currency: false,
            });
        }
        items
            .apply_structural_edit(id, FieldName::Currency, "3")
            .unwrap();
        let item = items.get(id).unwrap();
        assert_eq!(item.status, LineStatus::Unresolved);
        assert!(item.metadata.is_none());
        assert_eq!(item.field(FieldName::Currency), Some("3"));
        // Monetary fields cleared, quantity fields preserved
        assert_eq!(item.field(FieldName::TotalPriceInCurrency), None);
        assert_eq!(item.field(FieldName::PricePerUnitBase), None);
        assert_eq!(item.field(FieldName::ExchangeRate), None);
        assert_eq!(item.field(FieldName::Quantity), Some("10"));
        assert_eq!(item.field(FieldName::PurchaseUnitQuantity), Some("10"));
    }

    #[test]
    fn test_structural_edit_rejects_non_structural_field() {
        let mut items = EntryItems::new();
        let id = items.items()[0].id;
        let err = items
            .apply_structural_edit(id, FieldName::Quantity, "5")
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidRequest);
    }
}
