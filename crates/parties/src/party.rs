use serde::{Deserialize, Serialize};

use taxinvoice_core::{require_text, DomainError, DomainResult, ValueObject};

/// Role a party plays on an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyRole {
    Seller,
    Billing,
    Shipping,
}

impl PartyRole {
    /// Field prefix used in validation messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            PartyRole::Seller => "seller",
            PartyRole::Billing => "billing",
            PartyRole::Shipping => "shipping",
        }
    }

    /// Billing and shipping addresses must carry a State/UT code.
    pub fn requires_state_code(&self) -> bool {
        !matches!(self, PartyRole::Seller)
    }
}

/// Postal identity of a seller or addressee.
///
/// Text fields default to empty on deserialization so that an absent field
/// surfaces as a named `InvalidInput` from [`Party::validate`] rather than an
/// opaque parse error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub pincode: String,
    /// State/UT code (e.g. "29" for Karnataka).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_code: Option<String>,
    /// Permanent Account Number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pan: Option<String>,
    /// GST registration number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gst: Option<String>,
}

impl ValueObject for Party {}

impl Party {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        pincode: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            city: city.into(),
            state: state.into(),
            pincode: pincode.into(),
            ..Self::default()
        }
    }

    pub fn with_state_code(mut self, code: impl Into<String>) -> Self {
        self.state_code = Some(code.into());
        self
    }

    pub fn with_tax_ids(mut self, pan: impl Into<String>, gst: impl Into<String>) -> Self {
        self.pan = Some(pan.into());
        self.gst = Some(gst.into());
        self
    }

    /// "City, State, Pincode" as printed under the street address.
    pub fn locality_line(&self) -> String {
        format!("{}, {}, {}", self.city, self.state, self.pincode)
    }

    /// Check the presence rules for `role`.
    pub fn validate(&self, role: PartyRole) -> DomainResult<()> {
        let prefix = role.as_str();
        require_text(&format!("{prefix}.name"), &self.name)?;
        require_text(&format!("{prefix}.address"), &self.address)?;
        require_text(&format!("{prefix}.city"), &self.city)?;
        require_text(&format!("{prefix}.state"), &self.state)?;
        require_text(&format!("{prefix}.pincode"), &self.pincode)?;

        if role.requires_state_code() {
            match self.state_code.as_deref() {
                Some(code) if !code.trim().is_empty() => {}
                _ => return Err(DomainError::missing(&format!("{prefix}.state_code"))),
            }
        }
        Ok(())
    }
}
