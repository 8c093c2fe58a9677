//! Wire DTOs for the pricing/configuration service
//!
//! The resolver asks this service which fields are editable vs. derived for
//! a (store, product, currency, purchase-unit, supplier, date) tuple, and
//! what conversion factor / exchange rate apply.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Resolver request; every value is required before the call may be made
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfigRequest {
    pub store: i64,
    pub product: i64,
    pub currency: i64,
    pub purchase_unit: i64,
    pub supplier: i64,
    /// ISO-local datetime string
    pub date_of_arrived: String,
}

/// Currency block of the resolver response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurrencyInfo {
    #[serde(default)]
    pub is_base: bool,
    /// Anything else the service sends along (name, code, …)
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// One entry of the `dynamic_fields` map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DynamicFieldSpec {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub editable: bool,
    #[serde(default = "default_show")]
    pub show: bool,
    /// Loosely typed value; see [`crate::dynamic::DynamicValue`]
    #[serde(default)]
    pub value: Value,
}

fn default_show() -> bool {
    true
}

/// Resolver response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldConfigResponse {
    #[serde(default)]
    pub currency: CurrencyInfo,
    #[serde(default)]
    pub dynamic_fields: HashMap<String, DynamicFieldSpec>,
}
