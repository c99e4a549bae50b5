//! Order editing module.
//!
//! This crate models the editable order form that feeds invoice generation:
//! row management, catalog auto-fill and live totals, implemented purely as
//! deterministic state transitions (no UI, no IO).

pub mod choice;
pub mod form;

pub use choice::ProductChoice;
pub use form::OrderForm;
