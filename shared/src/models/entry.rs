//! Stock entry context and submission payloads

use serde::{Deserialize, Serialize};

/// Payment mode for an entry; modes are mutually exclusive
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMode {
    /// Paid immediately via one or more payment splits
    #[default]
    Payment,
    /// Recorded as supplier debt, optionally with an advance
    Debt,
    /// Settled against the supplier's balance
    SupplierBalance,
    /// Inventory adjustment, no money movement
    InventoryAdjustment,
}

/// One payment split: amount paid with a specific payment method
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentSplit {
    pub amount: f64,
    pub payment_type: i64,
}

/// Shared context for all line items in one editing session
///
/// Holds the entry-level form state only; item-level data never lands here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryContext {
    pub store: Option<i64>,
    pub supplier: Option<i64>,
    /// Arrival date/time, ISO-local string as the backend expects it
    pub date_of_arrived: Option<String>,
    pub payment_mode: PaymentMode,
    /// Ordered payment splits; must sum to the entry total in Payment mode
    #[serde(default)]
    pub payments: Vec<PaymentSplit>,
    /// Auto-filled debt amount in Debt mode
    #[serde(default)]
    pub amount_of_debt: f64,
    /// Advance paid up front in Debt mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advance_of_debt: Option<f64>,
    /// Payment method for the advance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposit_payment_method: Option<i64>,
}

impl EntryContext {
    /// Whether the common fields required for resolution and submission
    /// are all present
    pub fn common_fields_set(&self) -> bool {
        self.store.is_some() && self.supplier.is_some() && self.date_of_arrived.is_some()
    }

    /// Default arrival timestamp for a new entry, in the local-ISO format
    /// the backend expects
    pub fn arrival_now() -> String {
        chrono::Local::now().format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}

/// One stock line in the submission payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockLinePayload {
    /// Present only for previously saved lines
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub product: i64,
    pub purchase_unit: i64,
    pub currency: i64,
    pub exchange_rate: f64,
    /// Base-unit quantity; uses the quantity-for-history override when
    /// present so sales history is never silently rewritten
    pub quantity: f64,
    pub purchase_unit_quantity: f64,
    pub price_per_unit_uz: f64,
    pub total_price_in_uz: f64,
    pub price_per_unit_currency: f64,
    pub total_price_in_currency: f64,
    pub base_unit_in_uzs: f64,
    pub base_unit_in_currency: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_name: Option<String>,
}

/// Full submission payload for one stock entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockEntryPayload {
    pub store: i64,
    pub supplier: i64,
    pub date_of_arrived: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_debt: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_of_debt: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advance_of_debt: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_supplier_balance: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_balance_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposit_payment_method: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_inventory_adjustment: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payments: Option<Vec<PaymentSplit>>,
    pub stocks: Vec<StockLinePayload>,
    /// Persisted ids of lines soft-deleted during this session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_stocks: Option<Vec<i64>>,
}

/// A previously saved stock row, as loaded for an edit session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedStockRow {
    pub id: i64,
    pub product: i64,
    pub purchase_unit: i64,
    pub currency: i64,
    pub exchange_rate: f64,
    /// Live quantity (may have shrunk since entry if stock was sold)
    pub quantity: f64,
    /// Quantity recorded at the time the stock was first entered
    pub quantity_for_history: f64,
    pub purchase_unit_quantity: f64,
    pub price_per_unit_uz: f64,
    pub total_price_in_uz: f64,
    pub price_per_unit_currency: f64,
    pub total_price_in_currency: f64,
    pub base_unit_in_uzs: f64,
    pub base_unit_in_currency: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_name: Option<String>,
}
