//! Command-line surface: order file in, invoice PDF out.

pub mod app;
pub mod config;

pub use app::{Generated, dump_tree, generate, load_catalog, load_order};
pub use config::Args;
