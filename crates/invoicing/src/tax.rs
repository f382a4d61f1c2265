//! GST tax selection and component amounts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use taxinvoice_core::{format_rate, DomainError, DomainResult, ValueObject};

use crate::config::InvoiceConfig;

/// Tax regime applied to a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxType {
    /// Same-state supply: central and state tax, half the combined rate each.
    #[serde(rename = "CGST_SGST")]
    CgstSgst,
    /// Cross-state supply: integrated tax at a single rate.
    #[serde(rename = "IGST")]
    Igst,
}

impl TaxType {
    pub fn for_supply(intra_state: bool) -> Self {
        if intra_state { TaxType::CgstSgst } else { TaxType::Igst }
    }

    /// Column text on the printed invoice.
    pub fn label(&self) -> &'static str {
        match self {
            TaxType::CgstSgst => "CGST/SGST",
            TaxType::Igst => "IGST",
        }
    }
}

impl core::fmt::Display for TaxType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Individual tax levied on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaxHead {
    Cgst,
    Sgst,
    Igst,
}

/// One charged tax and its amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxComponent {
    pub head: TaxHead,
    pub rate_pct: Decimal,
    pub amount: Decimal,
}

impl ValueObject for TaxComponent {}

/// Tax regime, combined rate and charged components for one net amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxAssessment {
    pub tax_type: TaxType,
    /// Combined rate, as printed in the "Tax Rate" column.
    pub rate_pct: Decimal,
    pub components: Vec<TaxComponent>,
}

impl TaxAssessment {
    /// Sum of all charged components.
    pub fn total(&self) -> DomainResult<Decimal> {
        self.components.iter().try_fold(Decimal::ZERO, |acc, c| {
            acc.checked_add(c.amount)
                .ok_or_else(|| DomainError::invariant("tax amount overflow"))
        })
    }

    pub fn rate_label(&self) -> String {
        format_rate(self.rate_pct)
    }
}

/// Assess tax on `net_amount` under the configured schedule.
pub fn assess(
    net_amount: Decimal,
    intra_state: bool,
    config: &InvoiceConfig,
) -> DomainResult<TaxAssessment> {
    let tax_type = TaxType::for_supply(intra_state);
    let assessment = match tax_type {
        TaxType::CgstSgst => {
            let half = config.intra_state_component_rate_pct();
            let amount = percent_of(net_amount, half)?;
            TaxAssessment {
                tax_type,
                rate_pct: config.intra_state_combined_rate_pct,
                components: vec![
                    TaxComponent { head: TaxHead::Cgst, rate_pct: half, amount },
                    TaxComponent { head: TaxHead::Sgst, rate_pct: half, amount },
                ],
            }
        }
        TaxType::Igst => {
            let rate = config.inter_state_rate_pct;
            TaxAssessment {
                tax_type,
                rate_pct: rate,
                components: vec![TaxComponent {
                    head: TaxHead::Igst,
                    rate_pct: rate,
                    amount: percent_of(net_amount, rate)?,
                }],
            }
        }
    };
    Ok(assessment)
}

fn percent_of(amount: Decimal, rate_pct: Decimal) -> DomainResult<Decimal> {
    amount
        .checked_mul(rate_pct)
        .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
        .ok_or_else(|| DomainError::invariant("tax amount overflow"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn intra_state_splits_into_equal_cgst_and_sgst() {
        let assessment = assess(dec!(338.10), true, &InvoiceConfig::default()).unwrap();
        assert_eq!(assessment.tax_type, TaxType::CgstSgst);
        assert_eq!(assessment.rate_pct, dec!(5));
        assert_eq!(assessment.rate_label(), "5%");
        assert_eq!(assessment.components.len(), 2);
        assert_eq!(assessment.components[0].head, TaxHead::Cgst);
        assert_eq!(assessment.components[1].head, TaxHead::Sgst);
        assert_eq!(assessment.components[0].rate_pct, dec!(2.5));
        assert_eq!(assessment.components[0].amount, dec!(8.4525));
        assert_eq!(assessment.components[0].amount, assessment.components[1].amount);
        assert_eq!(assessment.total().unwrap(), dec!(16.905));
    }

    #[test]
    fn inter_state_charges_single_igst() {
        let assessment = assess(dec!(338.10), false, &InvoiceConfig::default()).unwrap();
        assert_eq!(assessment.tax_type, TaxType::Igst);
        assert_eq!(assessment.components.len(), 1);
        assert_eq!(assessment.components[0].head, TaxHead::Igst);
        assert_eq!(assessment.total().unwrap(), dec!(16.905));
    }

    #[test]
    fn schedules_are_independent() {
        let config = InvoiceConfig {
            intra_state_combined_rate_pct: dec!(18),
            inter_state_rate_pct: dec!(12),
            ..InvoiceConfig::default()
        };
        let intra = assess(dec!(100), true, &config).unwrap();
        assert_eq!(intra.rate_label(), "18%");
        assert_eq!(intra.components[0].rate_pct, dec!(9));
        assert_eq!(intra.total().unwrap(), dec!(18));

        let inter = assess(dec!(100), false, &config).unwrap();
        assert_eq!(inter.rate_label(), "12%");
        assert_eq!(inter.total().unwrap(), dec!(12));
    }

    #[test]
    fn labels_and_serialized_names() {
        assert_eq!(TaxType::CgstSgst.label(), "CGST/SGST");
        assert_eq!(TaxType::Igst.to_string(), "IGST");
        assert_eq!(serde_json::to_string(&TaxType::CgstSgst).unwrap(), r#""CGST_SGST""#);
        assert_eq!(serde_json::to_string(&TaxHead::Sgst).unwrap(), r#""SGST""#);
    }

    #[test]
    fn overflow_is_an_invariant_violation() {
        let err = assess(Decimal::MAX, false, &InvoiceConfig::default()).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }
}
