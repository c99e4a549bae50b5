use chrono::NaiveDate;

use quickbill_invoicing::{
    FinancialSummary, LineItem, OrderInput, PaymentMethod, coerce_amount, compute_summary,
};
use quickbill_products::ProductCatalog;

use crate::choice::ProductChoice;

/// Editable order state behind the invoice form.
///
/// Every mutation is a plain method call; totals are recomputed on demand by
/// [`OrderForm::summary`]. Row indices that do not exist are ignored.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderForm {
    input: OrderInput,
}

/// Amount typed into a numeric field; negatives clamp to zero.
fn non_negative(raw: &str) -> f64 {
    coerce_amount(raw).max(0.0)
}

fn optional(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

impl From<OrderInput> for OrderForm {
    /// Adopt an existing order; an order without rows gets the initial one.
    fn from(mut input: OrderInput) -> Self {
        if input.items.is_empty() {
            input.items.push(LineItem::initial());
        }
        input.delivery_charge = input.delivery_charge.max(0.0);
        for item in &mut input.items {
            item.quantity = item.quantity.max(0.0);
            item.unit_price = item.unit_price.max(0.0);
        }
        Self { input }
    }
}

impl OrderForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            input: OrderInput::new(today),
        }
    }

    pub fn input(&self) -> &OrderInput {
        &self.input
    }

    pub fn items(&self) -> &[LineItem] {
        &self.input.items
    }

    /// Copy of the current order, as handed to the invoice builder.
    pub fn snapshot(&self) -> OrderInput {
        self.input.clone()
    }

    /// Live totals for the preview.
    pub fn summary(&self) -> FinancialSummary {
        compute_summary(&self.input.items, self.input.delivery_charge)
    }

    pub fn set_customer_name(&mut self, value: impl Into<String>) {
        self.input.customer.name = value.into();
    }

    pub fn set_address(&mut self, value: impl Into<String>) {
        self.input.customer.address = value.into();
    }

    pub fn set_apartment(&mut self, value: impl Into<String>) {
        self.input.customer.apartment = optional(value.into());
    }

    pub fn set_phone(&mut self, value: impl Into<String>) {
        self.input.customer.phone = value.into();
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.input.customer.email = optional(value.into());
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.input.date = date;
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.input.payment_method = method;
    }

    pub fn set_delivery_charge(&mut self, raw: &str) {
        self.input.delivery_charge = non_negative(raw);
    }

    /// Append an empty row (quantity 1, price 0) and return its index.
    pub fn add_item(&mut self) -> usize {
        self.input.items.push(LineItem::blank());
        self.input.items.len() - 1
    }

    /// Remove a row. The last remaining row is never removed.
    pub fn remove_item(&mut self, idx: usize) -> bool {
        if self.input.items.len() <= 1 || idx >= self.input.items.len() {
            tracing::debug!(idx, rows = self.input.items.len(), "row removal ignored");
            return false;
        }
        self.input.items.remove(idx);
        true
    }

    /// Name typed into a row.
    ///
    /// An exact catalog hit fills in the catalog price; anything else is kept
    /// verbatim and the row's price is left alone.
    pub fn set_item_name(&mut self, idx: usize, text: &str, catalog: &ProductCatalog) {
        if catalog.contains(text) {
            self.select_product(idx, text, catalog);
        } else if let Some(item) = self.input.items.get_mut(idx) {
            item.name = text.to_string();
        }
    }

    /// Name field lost focus: retry the catalog auto-fill on what is there.
    pub fn commit_item_name(&mut self, idx: usize, catalog: &ProductCatalog) {
        let Some(name) = self.input.items.get(idx).map(|item| item.name.clone()) else {
            return;
        };
        if catalog.contains(&name) {
            self.select_product(idx, &name, catalog);
        }
    }

    /// Explicit pick from the product list.
    ///
    /// Catalog entries overwrite both name and price; unknown names only
    /// replace the name. Returns the resolved choice, or `None` when the row
    /// does not exist.
    pub fn select_product(
        &mut self,
        idx: usize,
        name: &str,
        catalog: &ProductCatalog,
    ) -> Option<ProductChoice> {
        let item = self.input.items.get_mut(idx)?;
        let choice = ProductChoice::resolve(name, catalog);

        item.name = choice.name().to_string();
        if let Some(price) = choice.catalog_price() {
            item.unit_price = price;
        }
        Some(choice)
    }

    pub fn set_item_quantity(&mut self, idx: usize, raw: &str) {
        if let Some(item) = self.input.items.get_mut(idx) {
            item.quantity = non_negative(raw);
        }
    }

    pub fn set_item_price(&mut self, idx: usize, raw: &str) {
        if let Some(item) = self.input.items.get_mut(idx) {
            item.unit_price = non_negative(raw);
        }
    }

    /// Run the catalog auto-fill on every row that has no price yet.
    ///
    /// Returns how many rows were filled.
    pub fn fill_missing_prices(&mut self, catalog: &ProductCatalog) -> usize {
        let mut filled = 0;
        for idx in 0..self.input.items.len() {
            let item = &self.input.items[idx];
            if item.unit_price == 0.0 && catalog.contains(&item.name) {
                self.commit_item_name(idx, catalog);
                filled += 1;
            }
        }
        filled
    }

    /// Back to a blank order dated `today`.
    pub fn reset(&mut self, today: NaiveDate) {
        self.input = OrderInput::new(today);
    }
}
