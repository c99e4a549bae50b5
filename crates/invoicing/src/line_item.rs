use serde::{Deserialize, Serialize};

use quickbill_core::ValueObject;

use crate::amount::{lenient, sanitize};

/// One row of an order: product name, quantity, unit price.
///
/// Amounts are plain `f64` in major currency units. Non-finite values are
/// tolerated in storage and count as zero wherever totals are derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub quantity: f64,
    #[serde(rename = "price", alias = "unit_price", default, deserialize_with = "lenient")]
    pub unit_price: f64,
}

impl LineItem {
    pub fn new(name: impl Into<String>, quantity: f64, unit_price: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit_price,
        }
    }

    /// Row appended by "add item": no name, one unit, no price yet.
    pub fn blank() -> Self {
        Self::new("", 1.0, 0.0)
    }

    /// The single row a fresh order starts with.
    pub fn initial() -> Self {
        Self::new("", 0.0, 0.0)
    }

    /// `quantity × unit_price`, with non-finite inputs counted as zero.
    pub fn line_total(&self) -> f64 {
        sanitize(self.quantity) * sanitize(self.unit_price)
    }
}

impl Default for LineItem {
    fn default() -> Self {
        Self::blank()
    }
}

impl ValueObject for LineItem {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_total_multiplies_quantity_and_price() {
        assert_eq!(LineItem::new("A", 2.0, 100.0).line_total(), 200.0);
        assert_eq!(LineItem::new("B", 0.5, 30.0).line_total(), 15.0);
    }

    #[test]
    fn line_total_ignores_non_finite_inputs() {
        assert_eq!(LineItem::new("A", f64::NAN, 100.0).line_total(), 0.0);
        assert_eq!(LineItem::new("A", 3.0, f64::INFINITY).line_total(), 0.0);
    }

    #[test]
    fn row_defaults_match_the_order_form() {
        assert_eq!(LineItem::blank(), LineItem::new("", 1.0, 0.0));
        assert_eq!(LineItem::initial(), LineItem::new("", 0.0, 0.0));
    }

    #[test]
    fn deserializes_form_style_rows() {
        let item: LineItem =
            serde_json::from_str(r#"{"name":"C","quantity":"","price":200}"#).unwrap();
        assert_eq!(item, LineItem::new("C", 0.0, 200.0));

        let item: LineItem =
            serde_json::from_str(r#"{"name":"D","quantity":"3","unit_price":"12.5"}"#).unwrap();
        assert_eq!(item, LineItem::new("D", 3.0, 12.5));
    }
}
