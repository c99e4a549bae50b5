//! Products domain module.
//!
//! This crate holds the static product catalog consulted when a line item's
//! name is typed or picked, implemented purely as deterministic lookups
//! (no IO beyond parsing a catalog document handed in by the caller).

pub mod catalog;

pub use catalog::{ProductCatalog, ProductCatalogEntry};
