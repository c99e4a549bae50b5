use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use quickbill_core::{DomainError, DomainResult, ValueObject};

/// A named product with its canonical unit price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCatalogEntry {
    pub name: String,
    /// Unit price in the shop currency (major units).
    #[serde(rename = "price")]
    pub unit_price: f64,
}

impl ProductCatalogEntry {
    pub fn new(name: impl Into<String>, unit_price: f64) -> Self {
        Self {
            name: name.into(),
            unit_price,
        }
    }
}

impl ValueObject for ProductCatalogEntry {}

/// Read-only product catalog, built once at startup and passed by reference
/// to whoever needs lookups.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    entries: Vec<ProductCatalogEntry>,
    by_name: HashMap<String, usize>,
}

impl ProductCatalog {
    /// Build a catalog, rejecting empty or duplicate names and prices that are
    /// negative or not finite.
    pub fn new(entries: Vec<ProductCatalogEntry>) -> DomainResult<Self> {
        let mut by_name = HashMap::with_capacity(entries.len());

        for (idx, entry) in entries.iter().enumerate() {
            if entry.name.trim().is_empty() {
                return Err(DomainError::validation("catalog entry name cannot be empty"));
            }
            if !entry.unit_price.is_finite() || entry.unit_price < 0.0 {
                return Err(DomainError::validation(format!(
                    "catalog entry {:?} has invalid price {}",
                    entry.name, entry.unit_price
                )));
            }
            if by_name.insert(entry.name.clone(), idx).is_some() {
                return Err(DomainError::validation(format!(
                    "duplicate catalog entry {:?}",
                    entry.name
                )));
            }
        }

        Ok(Self { entries, by_name })
    }

    /// The suggestion list shipped with the shop.
    pub fn builtin() -> Self {
        let entries = vec![
            ProductCatalogEntry::new("Smart Watch", 800.0),
            ProductCatalogEntry::new("Sunglass", 300.0),
        ];
        let by_name = entries
            .iter()
            .enumerate()
            .map(|(idx, e)| (e.name.clone(), idx))
            .collect();
        Self { entries, by_name }
    }

    /// Parse a JSON array of `{"name": ..., "price": ...}` objects.
    pub fn from_json(json: &str) -> DomainResult<Self> {
        let entries: Vec<ProductCatalogEntry> = serde_json::from_str(json)
            .map_err(|e| DomainError::validation(format!("catalog JSON: {e}")))?;
        let catalog = Self::new(entries)?;
        tracing::debug!(entries = catalog.len(), "product catalog loaded");
        Ok(catalog)
    }

    /// Exact, case-sensitive lookup by name.
    pub fn lookup(&self, name: &str) -> Option<&ProductCatalogEntry> {
        self.by_name.get(name).map(|&idx| &self.entries[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Entries in the order they were declared.
    pub fn entries(&self) -> &[ProductCatalogEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
