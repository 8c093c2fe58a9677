//! Ombor calculation engine
//!
//! The core of the stock-intake application: turns partial, order-independent
//! edits of a purchase line (quantity in purchase units, price per unit,
//! currency, exchange rate) into a fully consistent set of derived quantities
//! and monetary totals, across two unit systems (purchase unit vs. base unit)
//! and two currency regimes (base vs. foreign), reconciled against remotely
//! supplied field configuration and the supplier's available balance.

pub mod aggregate;
pub mod balance;
pub mod calc;
pub mod derivation;
pub mod draft;
pub mod items;
pub mod money;
pub mod resolve;
pub mod submit;

pub use aggregate::EntryTotals;
pub use balance::{BalanceCheck, check_balance};
pub use calc::{apply_measurement, recalculate};
pub use items::EntryItems;
pub use resolve::{FieldResolver, resolve_item};
pub use submit::{build_payload, validate_for_submit};
