//! Invoice totals.

use serde::{Deserialize, Serialize};

use quickbill_core::ValueObject;

use crate::amount::sanitize;
use crate::line_item::LineItem;

/// Derived subtotal / delivery / total triple.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub subtotal: f64,
    pub delivery_charge: f64,
    pub total: f64,
}

impl ValueObject for FinancialSummary {}

/// Compute totals for a list of items plus a delivery charge.
///
/// Stateless: callers invoke it after every edit, so the result always
/// reflects the current rows. Non-finite quantities, prices and delivery
/// charges contribute zero. Never fails.
pub fn compute_summary(items: &[LineItem], delivery_charge: f64) -> FinancialSummary {
    let subtotal: f64 = items.iter().map(LineItem::line_total).sum();
    let delivery_charge = sanitize(delivery_charge);

    FinancialSummary {
        subtotal,
        delivery_charge,
        total: subtotal + delivery_charge,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::coerce_amount;
    use proptest::prelude::*;

    #[test]
    fn two_items_plus_delivery() {
        let items = vec![
            LineItem::new("A", 2.0, 100.0),
            LineItem::new("B", 1.0, 50.0),
        ];
        let summary = compute_summary(&items, 60.0);
        assert_eq!(summary.subtotal, 250.0);
        assert_eq!(summary.delivery_charge, 60.0);
        assert_eq!(summary.total, 310.0);
    }

    #[test]
    fn empty_quantity_contributes_nothing() {
        let items = vec![LineItem::new("C", coerce_amount(""), 200.0)];
        let summary = compute_summary(&items, 0.0);
        assert_eq!(summary.subtotal, 0.0);
        assert_eq!(summary.total, 0.0);
    }

    #[test]
    fn garbage_quantity_behaves_like_zero() {
        let garbage = vec![LineItem::new("", coerce_amount("abc"), 10.0)];
        let zero = vec![LineItem::new("", 0.0, 10.0)];
        assert_eq!(compute_summary(&garbage, 0.0), compute_summary(&zero, 0.0));
    }

    #[test]
    fn non_finite_delivery_charge_is_zero() {
        let items = vec![LineItem::new("A", 1.0, 5.0)];
        let summary = compute_summary(&items, f64::NAN);
        assert_eq!(summary.delivery_charge, 0.0);
        assert_eq!(summary.total, 5.0);
    }

    #[test]
    fn no_items_is_just_delivery() {
        let summary = compute_summary(&[], 60.0);
        assert_eq!(summary, FinancialSummary {
            subtotal: 0.0,
            delivery_charge: 60.0,
            total: 60.0,
        });
    }

    #[test]
    fn recomputes_after_edits_and_removals() {
        let mut items = vec![LineItem::new("A", 1.0, 10.0)];
        assert_eq!(compute_summary(&items, 0.0).total, 10.0);

        items.push(LineItem::new("B", 2.0, 5.0));
        assert_eq!(compute_summary(&items, 0.0).total, 20.0);

        items[0].quantity = 3.0;
        assert_eq!(compute_summary(&items, 0.0).total, 40.0);

        items.remove(1);
        assert_eq!(compute_summary(&items, 0.0).total, 30.0);
    }

    fn whole_items() -> impl Strategy<Value = Vec<LineItem>> {
        // Whole-number amounts keep every partial sum exact in f64.
        prop::collection::vec(
            (0u32..1_000, 0u32..100_000)
                .prop_map(|(q, p)| LineItem::new("item", q as f64, p as f64)),
            0..20,
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: subtotal is the sum of quantity × price.
        #[test]
        fn subtotal_is_sum_of_line_totals(items in whole_items()) {
            let expected: f64 = items.iter().map(|i| i.quantity * i.unit_price).sum();
            prop_assert_eq!(compute_summary(&items, 0.0).subtotal, expected);
        }

        /// Property: item order does not change the result.
        #[test]
        fn summary_is_order_independent(
            (items, shuffled) in whole_items().prop_flat_map(|items| {
                let shuffled = Just(items.clone()).prop_shuffle();
                (Just(items), shuffled)
            }),
            delivery in 0u32..10_000
        ) {
            prop_assert_eq!(
                compute_summary(&items, delivery as f64),
                compute_summary(&shuffled, delivery as f64)
            );
        }

        /// Property: total is always subtotal + delivery charge, even for
        /// degraded input.
        #[test]
        fn total_is_subtotal_plus_delivery(
            quantities in prop::collection::vec(prop_oneof![
                Just(f64::NAN),
                Just(f64::INFINITY),
                Just(f64::NEG_INFINITY),
                0.0f64..1e6,
            ], 0..10),
            delivery in prop_oneof![any::<f64>(), 0.0f64..1e4],
        ) {
            let items: Vec<_> = quantities
                .into_iter()
                .map(|q| LineItem::new("x", q, 3.0))
                .collect();
            let summary = compute_summary(&items, delivery);
            prop_assert_eq!(summary.total, summary.subtotal + summary.delivery_charge);
            prop_assert!(summary.delivery_charge.is_finite());
        }
    }
}
