//! Explicit derivation table for line-item recalculation
//!
//! Each edited field maps to an ordered list of derivation steps. The table
//! makes the "exactly one unit-conversion direction fires per edit"
//! invariant structural: no step list contains both [`Step::UnitForward`]
//! and [`Step::UnitInverse`].

use shared::fields::FieldName;

/// One derivation step of the calculation engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `quantity = purchase_unit_quantity × conversion_factor`
    /// (fires only when `quantity` is a derived field)
    UnitForward,
    /// `purchase_unit_quantity = quantity ÷ conversion_factor`
    /// (fires only when `purchase_unit_quantity` is a derived field)
    UnitInverse,
    /// `total = price × purchase_unit_quantity` in the active currency branch
    TotalFromPrice,
    /// `price = total ÷ purchase_unit_quantity` in the active currency branch
    PriceFromTotal,
    /// Sync the counter-currency side: foreign branch multiplies the
    /// currency-side values by the exchange rate; base branch mirrors
    /// identically (the line currency *is* the base currency)
    SyncCounterCurrency,
    /// `base_unit_cost = total ÷ quantity` for both currency sides,
    /// always from the base-unit quantity
    BaseUnitCosts,
}

/// Derivation steps triggered by an edit of `changed`
///
/// Fields outside the derivation graph (product, stock name, …) map to an
/// empty list; structural edits go through the collection manager instead.
pub fn steps_for(changed: FieldName) -> &'static [Step] {
    use Step::*;
    match changed {
        FieldName::PurchaseUnitQuantity => {
            &[UnitForward, TotalFromPrice, SyncCounterCurrency, BaseUnitCosts]
        }
        FieldName::Quantity => {
            &[UnitInverse, TotalFromPrice, SyncCounterCurrency, BaseUnitCosts]
        }
        FieldName::PricePerUnitCurrency | FieldName::PricePerUnitBase => {
            &[TotalFromPrice, SyncCounterCurrency, BaseUnitCosts]
        }
        FieldName::TotalPriceInCurrency | FieldName::TotalPriceInBase => {
            &[PriceFromTotal, SyncCounterCurrency, BaseUnitCosts]
        }
        FieldName::ExchangeRate => &[SyncCounterCurrency, BaseUnitCosts],
        _ => &[],
    }
}

/// Steps re-run by the auxiliary measurement helper after it seeds the
/// quantities: the monetary branch with the existing per-unit price.
pub const MEASUREMENT_STEPS: &[Step] =
    &[Step::TotalFromPrice, Step::SyncCounterCurrency, Step::BaseUnitCosts];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_one_unit_direction_per_edit() {
        for field in FieldName::ALL {
            let steps = steps_for(field);
            let forward = steps.contains(&Step::UnitForward);
            let inverse = steps.contains(&Step::UnitInverse);
            assert!(
                !(forward && inverse),
                "{} would fire both unit-conversion directions",
                field
            );
        }
    }

    #[test]
    fn test_non_numeric_fields_have_no_steps() {
        assert!(steps_for(FieldName::Product).is_empty());
        assert!(steps_for(FieldName::Currency).is_empty());
        assert!(steps_for(FieldName::PurchaseUnit).is_empty());
        assert!(steps_for(FieldName::StockName).is_empty());
    }

    #[test]
    fn test_every_numeric_edit_ends_in_base_unit_costs() {
        for field in [
            FieldName::PurchaseUnitQuantity,
            FieldName::Quantity,
            FieldName::PricePerUnitCurrency,
            FieldName::PricePerUnitBase,
            FieldName::TotalPriceInCurrency,
            FieldName::TotalPriceInBase,
            FieldName::ExchangeRate,
        ] {
            assert_eq!(steps_for(field).last(), Some(&Step::BaseUnitCosts));
        }
    }
}
