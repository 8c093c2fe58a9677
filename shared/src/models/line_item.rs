//! Line item model - one purchase line of a stock entry

use crate::fields::{FieldDescriptor, FieldName};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Resolution status of a line item
///
/// Transitions are driven only by the field-configuration resolver and by
/// explicit structural edits (product/currency/purchase-unit changes).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineStatus {
    /// No configuration fetched yet; calculations are a no-op
    #[default]
    Unresolved,
    /// A configuration request is in flight (per-item latch)
    Resolving,
    /// Configuration merged; the derivation graph is live
    Resolved,
    /// The last configuration request failed; field values untouched
    Error,
}

/// Per-context calculation metadata returned by the resolver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalcMetadata {
    /// Multiplier from purchase-unit quantity to base-unit quantity
    pub conversion_factor: f64,
    /// Exchange rate from the line currency into the base currency
    pub exchange_rate: f64,
    /// Whether the line currency is the ledger's base currency
    pub is_base_currency: bool,
}

/// One purchase line of a stock entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// Opaque local identifier (not persisted)
    pub id: Uuid,
    /// Identifier of a previously saved line; present means this is an edit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persisted_id: Option<i64>,
    /// Current field values, kept as strings end to end
    pub fields: HashMap<FieldName, String>,
    /// Ordered field descriptors as returned by the resolver
    pub descriptors: Vec<FieldDescriptor>,
    /// Conversion factor / exchange rate / currency regime, once resolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<CalcMetadata>,
    /// Resolution status
    pub status: LineStatus,
    /// Whether the row is expanded in the entry form
    #[serde(default)]
    pub expanded: bool,
    /// Whether the row is bulk-selected
    #[serde(default)]
    pub selected: bool,
    /// Originally recorded quantity-for-history, when it no longer matches
    /// the live quantity (stock partially sold since). Display and outbound
    /// payload must prefer this over the live quantity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub historical_quantity_override: Option<f64>,
}

impl LineItem {
    /// Create a fresh, empty line item
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            persisted_id: None,
            fields: HashMap::new(),
            descriptors: Vec::new(),
            metadata: None,
            status: LineStatus::Unresolved,
            expanded: true,
            selected: false,
            historical_quantity_override: None,
        }
    }

    /// Current value of a field, if non-empty
    pub fn field(&self, name: FieldName) -> Option<&str> {
        self.fields
            .get(&name)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// Write a field value
    pub fn set_field(&mut self, name: FieldName, value: impl Into<String>) {
        self.fields.insert(name, value.into());
    }

    /// Remove a field value
    pub fn clear_field(&mut self, name: FieldName) {
        self.fields.remove(&name);
    }

    /// Whether the current descriptor set marks a field user-editable.
    /// Fields without a descriptor default to editable.
    pub fn is_editable(&self, name: FieldName) -> bool {
        self.descriptors
            .iter()
            .find(|d| d.name == name)
            .map_or(true, |d| d.editable)
    }

    /// Whether a field is system-derived for the current context
    pub fn is_derived(&self, name: FieldName) -> bool {
        !self.is_editable(name)
    }

    /// Live quantity diverges from the recorded quantity-for-history
    pub fn has_quantity_mismatch(&self) -> bool {
        self.historical_quantity_override.is_some()
    }

    /// Whether the structural context (product/currency/unit) is complete
    pub fn structural_fields_set(&self) -> bool {
        self.field(FieldName::Product).is_some()
            && self.field(FieldName::Currency).is_some()
            && self.field(FieldName::PurchaseUnit).is_some()
    }
}

impl Default for LineItem {
    fn default() -> Self {
        Self::new()
    }
}
