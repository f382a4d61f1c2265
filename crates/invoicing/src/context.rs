//! Invoice input payload.

use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use taxinvoice_core::{require_text, DomainError, DomainResult, ValueObject};
use taxinvoice_parties::{Party, PartyRole};

use crate::config::PlaceMatching;

/// One billable line as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub description: String,
    pub unit_price: Decimal,
    /// Signed so that zero and negative counts reach validation.
    pub quantity: i64,
}

impl ValueObject for LineItem {}

impl LineItem {
    pub fn new(description: impl Into<String>, unit_price: Decimal, quantity: i64) -> Self {
        Self {
            description: description.into(),
            unit_price,
            quantity,
        }
    }

    /// `index` is the 1-based position used in error messages.
    pub fn validate(&self, index: usize) -> DomainResult<()> {
        require_text(&format!("items[{index}].description"), &self.description)?;
        if self.unit_price < Decimal::ZERO {
            return Err(DomainError::invalid_input(format!(
                "items[{index}].unit_price must not be negative, got {}",
                self.unit_price
            )));
        }
        if self.quantity < 1 {
            return Err(DomainError::invalid_input(format!(
                "items[{index}].quantity must be at least 1, got {}",
                self.quantity
            )));
        }
        Ok(())
    }
}

/// Customer order the invoice refers to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReference {
    #[serde(default)]
    pub order_no: String,
    /// Date as printed, e.g. "28.10.2019".
    #[serde(default)]
    pub order_date: String,
}

/// Invoice number, date and reverse-charge flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceReference {
    #[serde(default)]
    pub invoice_no: String,
    #[serde(default)]
    pub invoice_date: String,
    /// Accepts `true`/`false` or "Yes"/"No".
    #[serde(deserialize_with = "deserialize_yes_no")]
    pub reverse_charge: bool,
}

impl InvoiceReference {
    pub fn reverse_charge_label(&self) -> &'static str {
        if self.reverse_charge { "Yes" } else { "No" }
    }
}

fn deserialize_yes_no<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum YesNo {
        Flag(bool),
        Text(String),
    }

    match YesNo::deserialize(deserializer)? {
        YesNo::Flag(flag) => Ok(flag),
        YesNo::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" | "true" => Ok(true),
            "no" | "n" | "false" => Ok(false),
            _ => Err(serde::de::Error::custom(format!(
                "reverse_charge must be Yes or No, got {text:?}"
            ))),
        },
    }
}

/// Everything needed to compute and render one invoice.
///
/// Constructed once from the caller's payload and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceContext {
    #[serde(alias = "seller_details")]
    pub seller: Party,
    #[serde(alias = "billing_details")]
    pub billing: Party,
    #[serde(alias = "shipping_details")]
    pub shipping: Party,
    #[serde(alias = "order_details")]
    pub order: OrderReference,
    #[serde(alias = "invoice_details")]
    pub invoice: InvoiceReference,
    #[serde(default)]
    pub place_of_supply: Option<String>,
    #[serde(default)]
    pub place_of_delivery: Option<String>,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_image: Option<PathBuf>,
}

impl InvoiceContext {
    /// Parse a JSON payload. Malformed payloads are `InvalidInput`.
    pub fn from_json(payload: &str) -> DomainResult<Self> {
        serde_json::from_str(payload)
            .map_err(|e| DomainError::invalid_input(format!("malformed invoice payload: {e}")))
    }

    /// Check every presence and range rule. Runs before any computation.
    pub fn validate(&self) -> DomainResult<()> {
        self.seller.validate(PartyRole::Seller)?;
        self.billing.validate(PartyRole::Billing)?;
        self.shipping.validate(PartyRole::Shipping)?;

        require_text("order.order_no", &self.order.order_no)?;
        require_text("order.order_date", &self.order.order_date)?;
        require_text("invoice.invoice_no", &self.invoice.invoice_no)?;
        require_text("invoice.invoice_date", &self.invoice.invoice_date)?;

        self.places()?;
        validate_items(&self.items)
    }

    /// Place of supply and place of delivery, both required.
    pub fn places(&self) -> DomainResult<(&str, &str)> {
        let supply = required_place("place_of_supply", self.place_of_supply.as_deref())?;
        let delivery = required_place("place_of_delivery", self.place_of_delivery.as_deref())?;
        Ok((supply, delivery))
    }

    /// Whether supply and delivery fall in the same state.
    pub fn is_intra_state(&self, matching: PlaceMatching) -> DomainResult<bool> {
        let (supply, delivery) = self.places()?;
        Ok(matching.same_place(supply, delivery))
    }
}

fn required_place<'a>(field: &str, value: Option<&'a str>) -> DomainResult<&'a str> {
    match value {
        Some(place) if !place.trim().is_empty() => Ok(place),
        _ => Err(DomainError::missing(field)),
    }
}

/// An invoice needs at least one line, and every line must be well-formed.
pub fn validate_items(items: &[LineItem]) -> DomainResult<()> {
    if items.is_empty() {
        return Err(DomainError::invalid_input("invoice must contain at least one line item"));
    }
    for (i, item) in items.iter().enumerate() {
        item.validate(i + 1)?;
    }
    Ok(())
}
