//! Line-item field vocabulary
//!
//! Every editable or derived value on a purchase line is addressed by a
//! [`FieldName`]. Serde names follow the backend wire names, so the same
//! enum keys the resolver's `dynamic_fields` map and the submission payload.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Field identifier for one purchase line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    /// Product reference
    Product,
    /// Currency reference
    Currency,
    /// Purchase unit reference (the unit the supplier sells in)
    PurchaseUnit,
    /// Quantity in purchase units (4 decimal places)
    PurchaseUnitQuantity,
    /// Quantity in base/stock units (2 decimal places)
    Quantity,
    /// Exchange rate from the line currency into the base currency
    ExchangeRate,
    /// Price per purchase unit, in the line currency
    PricePerUnitCurrency,
    /// Line total, in the line currency
    TotalPriceInCurrency,
    /// Price per purchase unit, in the base currency
    #[serde(rename = "price_per_unit_uz")]
    PricePerUnitBase,
    /// Line total, in the base currency
    #[serde(rename = "total_price_in_uz")]
    TotalPriceInBase,
    /// Cost of one base unit, in the line currency
    #[serde(rename = "base_unit_in_currency")]
    BaseUnitCostCurrency,
    /// Cost of one base unit, in the base currency
    #[serde(rename = "base_unit_in_uzs")]
    BaseUnitCostBase,
    /// Optional free-text identifier (roll/lot name)
    StockName,
    /// Scratch input for the auxiliary measurement-conversion helper
    CalculationInput,
}

impl FieldName {
    /// All fields in canonical display order
    pub const ALL: [FieldName; 14] = [
        FieldName::Product,
        FieldName::Currency,
        FieldName::PurchaseUnit,
        FieldName::PurchaseUnitQuantity,
        FieldName::Quantity,
        FieldName::ExchangeRate,
        FieldName::PricePerUnitCurrency,
        FieldName::TotalPriceInCurrency,
        FieldName::PricePerUnitBase,
        FieldName::TotalPriceInBase,
        FieldName::BaseUnitCostCurrency,
        FieldName::BaseUnitCostBase,
        FieldName::StockName,
        FieldName::CalculationInput,
    ];

    /// Wire name as used by the pricing service and submission payload
    pub const fn as_str(&self) -> &'static str {
        match self {
            FieldName::Product => "product",
            FieldName::Currency => "currency",
            FieldName::PurchaseUnit => "purchase_unit",
            FieldName::PurchaseUnitQuantity => "purchase_unit_quantity",
            FieldName::Quantity => "quantity",
            FieldName::ExchangeRate => "exchange_rate",
            FieldName::PricePerUnitCurrency => "price_per_unit_currency",
            FieldName::TotalPriceInCurrency => "total_price_in_currency",
            FieldName::PricePerUnitBase => "price_per_unit_uz",
            FieldName::TotalPriceInBase => "total_price_in_uz",
            FieldName::BaseUnitCostCurrency => "base_unit_in_currency",
            FieldName::BaseUnitCostBase => "base_unit_in_uzs",
            FieldName::StockName => "stock_name",
            FieldName::CalculationInput => "calculation_input",
        }
    }

    /// Parse a wire name back into a field identifier
    pub fn from_wire(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.as_str() == name)
    }

    /// Structural fields redefine the derivation graph; editing one
    /// invalidates the line's calculation metadata and forces re-resolution.
    pub const fn is_structural(&self) -> bool {
        matches!(
            self,
            FieldName::Product | FieldName::Currency | FieldName::PurchaseUnit
        )
    }

    /// Monetary fields are cleared when a structural field changes
    /// (quantity fields are preserved).
    pub const fn is_monetary(&self) -> bool {
        matches!(
            self,
            FieldName::ExchangeRate
                | FieldName::PricePerUnitCurrency
                | FieldName::TotalPriceInCurrency
                | FieldName::PricePerUnitBase
                | FieldName::TotalPriceInBase
                | FieldName::BaseUnitCostCurrency
                | FieldName::BaseUnitCostBase
        )
    }

    /// Purchase-unit quantities round to 4 decimal places; everything
    /// numeric else rounds to 2.
    pub const fn decimal_places(&self) -> u32 {
        match self {
            FieldName::PurchaseUnitQuantity | FieldName::CalculationInput => 4,
            _ => 2,
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Remotely supplied metadata for one line-item field
///
/// Non-editable descriptors are authoritative only the first time a field is
/// empty; once a line item holds a user- or calculation-derived value the
/// engine must not overwrite it from a later descriptor fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: FieldName,
    pub label: String,
    pub editable: bool,
    pub visible: bool,
    /// Canonical value extracted from the remote response, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl FieldDescriptor {
    /// Descriptor for a field the remote response omitted, defaulted to the
    /// item's current value
    pub fn fallback(name: FieldName, current: Option<&str>) -> Self {
        Self {
            name,
            label: name.as_str().to_string(),
            editable: true,
            visible: true,
            value: current.map(str::to_string),
        }
    }
}
