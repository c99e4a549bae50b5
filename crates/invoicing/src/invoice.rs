use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use quickbill_core::{DomainError, DomainResult, Entity, InvoiceId};

use crate::line_item::LineItem;
use crate::order::{Customer, OrderInput, PaymentMethod};
use crate::summary::{FinancialSummary, compute_summary};

/// A generated invoice.
///
/// Only [`InvoiceBuilder`] creates one. Fields are private and there are no
/// setters: once built, an invoice is either rendered or dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Invoice {
    id: InvoiceId,
    issue_date: NaiveDate,
    customer: Customer,
    payment_method: PaymentMethod,
    items: Vec<LineItem>,
    summary: FinancialSummary,
}

impl Invoice {
    pub fn id(&self) -> &InvoiceId {
        &self.id
    }

    pub fn issue_date(&self) -> NaiveDate {
        self.issue_date
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn payment_method(&self) -> &PaymentMethod {
        &self.payment_method
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn summary(&self) -> &FinancialSummary {
        &self.summary
    }

    /// Download name: `invoice_<YYYY-MM-DD>.pdf`.
    pub fn file_name(&self) -> String {
        format!("invoice_{}.pdf", self.issue_date.format("%Y-%m-%d"))
    }
}

impl Entity for Invoice {
    type Id = InvoiceId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// What to do when name, address or phone are blank at generation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequiredFieldsPolicy {
    /// Build anyway; blank fields render blank.
    #[default]
    Allow,
    /// Refuse with [`DomainError::Validation`].
    Reject,
}

type IdSource = Arc<dyn Fn() -> InvoiceId + Send + Sync>;

/// Snapshots an [`OrderInput`] into an [`Invoice`].
#[derive(Clone)]
pub struct InvoiceBuilder {
    policy: RequiredFieldsPolicy,
    id_source: IdSource,
}

impl InvoiceBuilder {
    pub fn new() -> Self {
        Self {
            policy: RequiredFieldsPolicy::default(),
            id_source: Arc::new(InvoiceId::generate),
        }
    }

    pub fn with_policy(mut self, policy: RequiredFieldsPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the id generator (tests use this for deterministic ids).
    pub fn with_id_source<F>(mut self, source: F) -> Self
    where
        F: Fn() -> InvoiceId + Send + Sync + 'static,
    {
        self.id_source = Arc::new(source);
        self
    }

    pub fn policy(&self) -> RequiredFieldsPolicy {
        self.policy
    }

    /// Build an invoice regardless of policy.
    ///
    /// Items and customer are copied, so later edits to `order` do not reach
    /// the returned invoice.
    pub fn build(&self, order: &OrderInput) -> Invoice {
        let id = (self.id_source)();
        let items = order.items.clone();
        let summary = compute_summary(&items, order.delivery_charge);

        tracing::debug!(
            invoice_id = %id,
            items = items.len(),
            total = summary.total,
            "invoice built"
        );

        Invoice {
            id,
            issue_date: order.date,
            customer: order.customer.normalized(),
            payment_method: order.payment_method.clone(),
            items,
            summary,
        }
    }

    /// Build an invoice, honouring the configured [`RequiredFieldsPolicy`].
    pub fn build_checked(&self, order: &OrderInput) -> DomainResult<Invoice> {
        if self.policy == RequiredFieldsPolicy::Reject {
            let missing = order.customer.missing_required();
            if !missing.is_empty() {
                return Err(DomainError::validation(format!(
                    "missing required customer fields: {}",
                    missing.join(", ")
                )));
            }
        }
        Ok(self.build(order))
    }
}

impl Default for InvoiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for InvoiceBuilder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InvoiceBuilder")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
