//! Value object trait: equality by value, not identity.
//!
//! Line items, customers, catalog entries and financial summaries are all
//! value objects: two of them with the same fields are interchangeable, and
//! an [`Invoice`](../../quickbill_invoicing/struct.Invoice.html) snapshots them
//! by value so later edits to the order form never reach a built invoice.

/// Marker trait for value objects.
///
/// Implementors are plain data: cloned rather than shared, compared field by
/// field, and printable for logs and test failures.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
