use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use quickbill_core::ValueObject;

use crate::amount::lenient;
use crate::line_item::LineItem;

/// Today's date (UTC), the default issue date of a new order.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// How the customer pays.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentMethod {
    #[default]
    Cash,
    /// Cash on delivery.
    Cod,
    Bkash,
    Nagad,
    Other(String),
}

impl PaymentMethod {
    /// The methods offered by the order form, in display order.
    pub const OFFERED: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::Cod,
        PaymentMethod::Bkash,
        PaymentMethod::Nagad,
    ];

    pub fn label(&self) -> &str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Cod => "COD",
            PaymentMethod::Bkash => "Bkash",
            PaymentMethod::Nagad => "Nagad",
            PaymentMethod::Other(label) => label,
        }
    }
}

impl From<String> for PaymentMethod {
    fn from(value: String) -> Self {
        Self::OFFERED
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(value.trim()))
            .unwrap_or(PaymentMethod::Other(value))
    }
}

impl From<&str> for PaymentMethod {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<PaymentMethod> for String {
    fn from(value: PaymentMethod) -> Self {
        value.label().to_string()
    }
}

impl core::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Bill-to details as typed into the form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    pub name: String,
    pub address: String,
    pub apartment: Option<String>,
    pub phone: String,
    pub email: Option<String>,
}

impl Customer {
    /// Copy with blank optional fields collapsed to `None`.
    pub fn normalized(&self) -> Self {
        fn present(value: &Option<String>) -> Option<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        }

        Self {
            name: self.name.clone(),
            address: self.address.clone(),
            apartment: present(&self.apartment),
            phone: self.phone.clone(),
            email: present(&self.email),
        }
    }

    /// Names of required fields that are blank.
    pub fn missing_required(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("address", &self.address),
            ("phone", &self.phone),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}

impl ValueObject for Customer {}

/// Raw order as held by the editing surface. Nothing here is validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderInput {
    #[serde(flatten)]
    pub customer: Customer,
    #[serde(default = "today")]
    pub date: NaiveDate,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default, deserialize_with = "lenient")]
    pub delivery_charge: f64,
    #[serde(default)]
    pub items: Vec<LineItem>,
}

impl OrderInput {
    /// A fresh order dated `date`: blank customer, cash, no delivery charge
    /// and a single empty row.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            customer: Customer::default(),
            date,
            payment_method: PaymentMethod::default(),
            delivery_charge: 0.0,
            items: vec![LineItem::initial()],
        }
    }
}

impl Default for OrderInput {
    fn default() -> Self {
        Self::new(today())
    }
}
