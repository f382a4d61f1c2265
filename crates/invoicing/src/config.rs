//! Tax schedule and formatting configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use taxinvoice_core::{DomainError, DomainResult};

/// Locale controlling how the grand total is written out in words.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurrencyLocale {
    /// Indian numbering (thousand, lakh, crore).
    #[default]
    #[serde(rename = "en_IN", alias = "en-IN")]
    EnIn,
    /// International numbering (thousand, million, billion).
    #[serde(rename = "en")]
    En,
}

impl CurrencyLocale {
    pub fn as_str(&self) -> &'static str {
        match self {
            CurrencyLocale::EnIn => "en_IN",
            CurrencyLocale::En => "en",
        }
    }
}

impl core::str::FromStr for CurrencyLocale {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en_IN" | "en-IN" => Ok(CurrencyLocale::EnIn),
            "en" => Ok(CurrencyLocale::En),
            other => Err(DomainError::invalid_config(format!(
                "unsupported currency_locale: {other}"
            ))),
        }
    }
}

/// How place of supply and place of delivery are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceMatching {
    /// Raw, case-sensitive equality.
    #[default]
    Exact,
    /// Trimmed, case-insensitive equality.
    CaseInsensitive,
}

impl PlaceMatching {
    pub fn same_place(&self, supply: &str, delivery: &str) -> bool {
        match self {
            PlaceMatching::Exact => supply == delivery,
            PlaceMatching::CaseInsensitive => supply.trim().eq_ignore_ascii_case(delivery.trim()),
        }
    }
}

fn default_rate_pct() -> Decimal {
    Decimal::new(5, 0)
}

/// Invoice calculation settings.
///
/// Every field has a default, so an empty configuration source yields the
/// 5% CGST/SGST and 5% IGST schedule with Indian-English words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceConfig {
    /// Combined same-state rate, split evenly between CGST and SGST.
    #[serde(default = "default_rate_pct")]
    pub intra_state_combined_rate_pct: Decimal,
    /// Cross-state IGST rate.
    #[serde(default = "default_rate_pct")]
    pub inter_state_rate_pct: Decimal,
    #[serde(default)]
    pub currency_locale: CurrencyLocale,
    #[serde(default)]
    pub place_matching: PlaceMatching,
}

impl Default for InvoiceConfig {
    fn default() -> Self {
        Self {
            intra_state_combined_rate_pct: default_rate_pct(),
            inter_state_rate_pct: default_rate_pct(),
            currency_locale: CurrencyLocale::default(),
            place_matching: PlaceMatching::default(),
        }
    }
}

impl InvoiceConfig {
    /// Rates must be percentages within `0..=100`.
    pub fn validate(&self) -> DomainResult<()> {
        check_rate("intra_state_combined_rate_pct", self.intra_state_combined_rate_pct)?;
        check_rate("inter_state_rate_pct", self.inter_state_rate_pct)?;
        Ok(())
    }

    /// Rate charged by each of CGST and SGST.
    pub fn intra_state_component_rate_pct(&self) -> Decimal {
        self.intra_state_combined_rate_pct / Decimal::TWO
    }
}

fn check_rate(field: &str, rate: Decimal) -> DomainResult<()> {
    if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
        return Err(DomainError::invalid_config(format!(
            "{field} must be within 0..=100, got {rate}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn defaults_match_five_percent_schedule() {
        let config = InvoiceConfig::default();
        assert_eq!(config.intra_state_combined_rate_pct, dec!(5));
        assert_eq!(config.intra_state_component_rate_pct(), dec!(2.5));
        assert_eq!(config.inter_state_rate_pct, dec!(5));
        assert_eq!(config.currency_locale, CurrencyLocale::EnIn);
        assert_eq!(config.place_matching, PlaceMatching::Exact);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_json_yields_defaults() {
        let config: InvoiceConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, InvoiceConfig::default());
    }

    #[test]
    fn partial_json_overrides_selected_fields() {
        let config: InvoiceConfig = serde_json::from_str(
            r#"{
                "inter_state_rate_pct": "12",
                "currency_locale": "en",
                "place_matching": "case_insensitive"
            }"#,
        )
        .unwrap();
        assert_eq!(config.inter_state_rate_pct, dec!(12));
        assert_eq!(config.intra_state_combined_rate_pct, dec!(5));
        assert_eq!(config.currency_locale, CurrencyLocale::En);
        assert_eq!(config.place_matching, PlaceMatching::CaseInsensitive);
    }

    #[test]
    fn unknown_locale_is_rejected() {
        assert!(serde_json::from_str::<InvoiceConfig>(r#"{"currency_locale": "fr_FR"}"#).is_err());
        let err = "fr_FR".parse::<CurrencyLocale>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidConfig(_)));
    }

    #[test]
    fn out_of_range_rates_are_rejected() {
        let config = InvoiceConfig {
            inter_state_rate_pct: dec!(101),
            ..InvoiceConfig::default()
        };
        match config.validate().unwrap_err() {
            DomainError::InvalidConfig(msg) if msg.contains("inter_state_rate_pct") => {}
            other => panic!("Expected InvalidConfig, got {other:?}"),
        }

        let negative = InvoiceConfig {
            intra_state_combined_rate_pct: dec!(-1),
            ..InvoiceConfig::default()
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn place_matching_modes() {
        assert!(PlaceMatching::Exact.same_place("Karnataka", "Karnataka"));
        assert!(!PlaceMatching::Exact.same_place("Karnataka", "karnataka"));
        assert!(PlaceMatching::CaseInsensitive.same_place("Karnataka", " karnataka "));
        assert!(!PlaceMatching::CaseInsensitive.same_place("Karnataka", "Kerala"));
    }
}
