//! Invoicing domain module.
//!
//! This crate turns an order (customer, line items, delivery charge, payment
//! method) into totals and an immutable [`Invoice`], implemented purely as
//! deterministic domain logic (no IO, no rendering, no storage).

pub mod amount;
pub mod invoice;
pub mod line_item;
pub mod order;
pub mod summary;

pub use amount::coerce_amount;
pub use invoice::{Invoice, InvoiceBuilder, RequiredFieldsPolicy};
pub use line_item::LineItem;
pub use order::{Customer, OrderInput, PaymentMethod};
pub use summary::{FinancialSummary, compute_summary};
