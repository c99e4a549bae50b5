use quickbill_products::{ProductCatalog, ProductCatalogEntry};

/// What a product-name field currently holds.
///
/// Only the editing layer sees this distinction; invoicing receives plain
/// [`LineItem`](quickbill_invoicing::LineItem)s.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductChoice {
    /// Text that matches no catalog entry, kept verbatim.
    FreeText(String),
    /// An exact catalog match.
    CatalogRef(ProductCatalogEntry),
}

impl ProductChoice {
    /// Resolve typed text against the catalog (exact match only).
    pub fn resolve(text: &str, catalog: &ProductCatalog) -> Self {
        match catalog.lookup(text) {
            Some(entry) => ProductChoice::CatalogRef(entry.clone()),
            None => ProductChoice::FreeText(text.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ProductChoice::FreeText(name) => name,
            ProductChoice::CatalogRef(entry) => &entry.name,
        }
    }

    /// Canonical price, if this is a catalog reference.
    pub fn catalog_price(&self) -> Option<f64> {
        match self {
            ProductChoice::FreeText(_) => None,
            ProductChoice::CatalogRef(entry) => Some(entry.unit_price),
        }
    }
}
