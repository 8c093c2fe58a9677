//! Line-item calculation engine
//!
//! Bidirectional derivation of quantities and monetary fields for one
//! purchase line, given a changed field and the line's calculation metadata.
//! All arithmetic runs on unrounded `Decimal` working values; rounding
//! happens once, when the derived display strings are written back, so
//! repeated edits of the same field are idempotent.

use rust_decimal::Decimal;
use shared::fields::FieldName;
use shared::models::{CalcMetadata, LineItem};

use crate::derivation::{self, Step};
use crate::money::{format_money, format_qty, parse_amount, to_decimal};


/// Working values for one recalculation pass
///
/// `None` means the field holds no numeric value: treated as zero for
/// multiplication, skipped for division.
struct Work {
    puq: Option<Decimal>,
    qty: Option<Decimal>,
    price_cur: Option<Decimal>,
    total_cur: Option<Decimal>,
    price_base: Option<Decimal>,
    total_base: Option<Decimal>,
    cost_cur: Option<Decimal>,
    cost_base: Option<Decimal>,
    /// Effective exchange rate: the exchange-rate field when it parses,
    /// falling back to the resolver-supplied metadata value
    rate: Decimal,
    factor: Decimal,
    is_base: bool,
    dirty: Vec<FieldName>,
}

impl Work {
    fn load(item: &LineItem, meta: CalcMetadata) -> Self {
        let read = |name: FieldName| item.field(name).and_then(parse_amount);
        Self {
            puq: read(FieldName::PurchaseUnitQuantity),
            qty: read(FieldName::Quantity),
            price_cur: read(FieldName::PricePerUnitCurrency),
            total_cur: read(FieldName::TotalPriceInCurrency),
            price_base: read(FieldName::PricePerUnitBase),
            total_base: read(FieldName::TotalPriceInBase),
            cost_cur: read(FieldName::BaseUnitCostCurrency),
            cost_base: read(FieldName::BaseUnitCostBase),
            rate: read(FieldName::ExchangeRate).unwrap_or_else(|| to_decimal(meta.exchange_rate)),
            factor: to_decimal(meta.conversion_factor),
            is_base: meta.is_base_currency,
            dirty: Vec::new(),
        }
    }

    fn mark(&mut self, name: FieldName) {
        if !self.dirty.contains(&name) {
            self.dirty.push(name);
        }
    }

    /// Price and total of the active currency branch
    fn primary_price(&self) -> Option<Decimal> {
        if self.is_base { self.price_base } else { self.price_cur }
    }

    fn primary_total(&self) -> Option<Decimal> {
        if self.is_base { self.total_base } else { self.total_cur }
    }

    fn set_primary_price(&mut self, value: Decimal) {
        if self.is_base {
            self.price_base = Some(value);
            self.mark(FieldName::PricePerUnitBase);
        } else {
            self.price_cur = Some(value);
            self.mark(FieldName::PricePerUnitCurrency);
        }
    }

    fn set_primary_total(&mut self, value: Decimal) {
        if self.is_base {
            self.total_base = Some(value);
            self.mark(FieldName::TotalPriceInBase);
        } else {
            self.total_cur = Some(value);
            self.mark(FieldName::TotalPriceInCurrency);
        }
    }

    /// All multiplications and divisions are checked: a step whose result
    /// would overflow `Decimal` is skipped, leaving the prior derived value
    /// in place, the same degradation the zero-division guard uses.
    fn run(&mut self, item: &LineItem, steps: &[Step]) {
        for step in steps {
            match step {
                Step::UnitForward => {
                    // Fires only when quantity is system-derived
                    if item.is_derived(FieldName::Quantity) {
                        let puq = self.puq.unwrap_or(Decimal::ZERO);
                        if let Some(qty) = puq.checked_mul(self.factor) {
                            self.qty = Some(qty);
                            self.mark(FieldName::Quantity);
                        }
                    }
                }
                Step::UnitInverse => {
                    if item.is_derived(FieldName::PurchaseUnitQuantity)
                        && !self.factor.is_zero()
                    {
                        // Division is skipped when the dividend is missing
                        if let Some(puq) =
                            self.qty.and_then(|q| q.checked_div(self.factor))
                        {
                            self.puq = Some(puq);
                            self.mark(FieldName::PurchaseUnitQuantity);
                        }
                    }
                }
                Step::TotalFromPrice => {
                    let price = self.primary_price().unwrap_or(Decimal::ZERO);
                    let puq = self.puq.unwrap_or(Decimal::ZERO);
                    if let Some(total) = price.checked_mul(puq) {
                        self.set_primary_total(total);
                    }
                }
                Step::PriceFromTotal => {
                    if let Some(puq) = self.puq.filter(|p| !p.is_zero()) {
                        let total = self.primary_total().unwrap_or(Decimal::ZERO);
                        if let Some(price) = total.checked_div(puq) {
                            self.set_primary_price(price);
                        }
                    }
                }
                Step::SyncCounterCurrency => {
                    if self.is_base {
                        // The line currency is the base currency; both sides
                        // carry the same amounts
                        if let Some(p) = self.price_base {
                            self.price_cur = Some(p);
                            self.mark(FieldName::PricePerUnitCurrency);
                        }
                        if let Some(t) = self.total_base {
                            self.total_cur = Some(t);
                            self.mark(FieldName::TotalPriceInCurrency);
                        }
                    } else {
                        if let Some(p) =
                            self.price_cur.and_then(|p| p.checked_mul(self.rate))
                        {
                            self.price_base = Some(p);
                            self.mark(FieldName::PricePerUnitBase);
                        }
                        if let Some(t) =
                            self.total_cur.and_then(|t| t.checked_mul(self.rate))
                        {
                            self.total_base = Some(t);
                            self.mark(FieldName::TotalPriceInBase);
                        }
                    }
                }
                Step::BaseUnitCosts => {
                    // Always from the base-unit quantity, never the
                    // purchase-unit quantity; zero quantity leaves the
                    // previous values in place
                    if let Some(qty) = self.qty.filter(|q| !q.is_zero()) {
                        if let Some(cost) = self
                            .total_cur
                            .unwrap_or(Decimal::ZERO)
                            .checked_div(qty)
                        {
                            self.cost_cur = Some(cost);
                            self.mark(FieldName::BaseUnitCostCurrency);
                        }
                        if let Some(cost) = self
                            .total_base
                            .unwrap_or(Decimal::ZERO)
                            .checked_div(qty)
                        {
                            self.cost_base = Some(cost);
                            self.mark(FieldName::BaseUnitCostBase);
                        }
                    }
                }
            }
        }
    }

    /// Round and write the derived fields back onto the item
    fn store(self, item: &mut LineItem) {
        for name in &self.dirty {
            let value = match name {
                FieldName::PurchaseUnitQuantity => self.puq,
                FieldName::Quantity => self.qty,
                FieldName::PricePerUnitCurrency => self.price_cur,
                FieldName::TotalPriceInCurrency => self.total_cur,
                FieldName::PricePerUnitBase => self.price_base,
                FieldName::TotalPriceInBase => self.total_base,
                FieldName::BaseUnitCostCurrency => self.cost_cur,
                FieldName::BaseUnitCostBase => self.cost_base,
                _ => None,
            };
            let Some(value) = value else { continue };
            let formatted = if name.decimal_places() == 4 {
                format_qty(value)
            } else {
                format_money(value)
            };
            item.set_field(*name, formatted);
        }
    }
}

/// Apply one field edit and derive every downstream field
///
/// Writes `new_value` into the item, then runs the derivation steps for the
/// changed field. A line without calculation metadata only stores the value;
/// derivation is a no-op until the resolver has run.
pub fn recalculate(item: &mut LineItem, changed: FieldName, new_value: &str) {
    item.set_field(changed, new_value);
    let Some(meta) = item.metadata else {
        return;
    };
    let mut work = Work::load(item, meta);
    work.run(item, derivation::steps_for(changed));
    work.store(item);
}

/// Auxiliary measurement-conversion helper
///
/// For products whose unit family needs a secondary conversion (a physical
/// measurement divided by a per-product conversion number), this seeds
/// `purchase_unit_quantity = raw ÷ conversion_number` and `quantity = raw`,
/// then re-runs the monetary derivations with the existing per-unit price.
/// A manual entry point into the same derivation graph, not a separate
/// engine.
pub fn apply_measurement(item: &mut LineItem, raw_input: &str, conversion_number: f64) {
    item.set_field(FieldName::CalculationInput, raw_input);
    let Some(raw) = parse_amount(raw_input) else {
        return;
    };
    let conv = to_decimal(conversion_number);
    if conv.is_zero() {
        return;
    }
    let Some(puq) = raw.checked_div(conv) else {
        return;
    };
    item.set_field(FieldName::PurchaseUnitQuantity, format_qty(puq));
    item.set_field(FieldName::Quantity, format_money(raw));

    let Some(meta) = item.metadata else {
        return;
    };
    let mut work = Work::load(item, meta);
    work.run(item, derivation::MEASUREMENT_STEPS);
    work.store(item);
}
