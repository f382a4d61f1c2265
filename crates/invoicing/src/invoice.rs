//! Tax calculator: line items in, computed rows and totals out.

use rust_decimal::Decimal;
use serde::Serialize;

use taxinvoice_core::{format_money, format_rate, DomainError, DomainResult, ValueObject};

use crate::config::{CurrencyLocale, InvoiceConfig};
use crate::context::{InvoiceContext, LineItem};
use crate::tax::{self, TaxComponent, TaxType};
use crate::words::amount_in_words;

/// A line item with its tax assessed. Immutable once computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComputedLine {
    index: usize,
    description: String,
    unit_price: Decimal,
    quantity: i64,
    net_amount: Decimal,
    tax_type: TaxType,
    tax_rate_pct: Decimal,
    components: Vec<TaxComponent>,
    tax_amount: Decimal,
    total_amount: Decimal,
}

impl ValueObject for ComputedLine {}

impl ComputedLine {
    /// Assess one item. `index` is its 1-based position on the invoice.
    pub fn compute(
        index: usize,
        item: &LineItem,
        intra_state: bool,
        config: &InvoiceConfig,
    ) -> DomainResult<Self> {
        item.validate(index)?;

        let net_amount = item
            .unit_price
            .checked_mul(Decimal::from(item.quantity))
            .ok_or_else(|| DomainError::invariant("net amount overflow"))?;
        let assessment = tax::assess(net_amount, intra_state, config)?;
        let tax_amount = assessment.total()?;
        let total_amount = net_amount
            .checked_add(tax_amount)
            .ok_or_else(|| DomainError::invariant("line total overflow"))?;

        Ok(Self {
            index,
            description: item.description.clone(),
            unit_price: item.unit_price,
            quantity: item.quantity,
            net_amount,
            tax_type: assessment.tax_type,
            tax_rate_pct: assessment.rate_pct,
            components: assessment.components,
            tax_amount,
            total_amount,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn net_amount(&self) -> Decimal {
        self.net_amount
    }

    pub fn tax_type(&self) -> TaxType {
        self.tax_type
    }

    /// Combined rate; for CGST/SGST this is the sum of both components.
    pub fn tax_rate_pct(&self) -> Decimal {
        self.tax_rate_pct
    }

    pub fn components(&self) -> &[TaxComponent] {
        &self.components
    }

    pub fn tax_amount(&self) -> Decimal {
        self.tax_amount
    }

    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    /// Table cells in column order: Sl. No, Description, Unit Price, Qty,
    /// Net Amount, Tax Rate, Tax Type, Tax Amount, Total Amount.
    pub fn display_cells(&self) -> [String; 9] {
        [
            self.index.to_string(),
            self.description.clone(),
            format_money(self.unit_price),
            self.quantity.to_string(),
            format_money(self.net_amount),
            format_rate(self.tax_rate_pct),
            self.tax_type.label().to_string(),
            format_money(self.tax_amount),
            format_money(self.total_amount),
        ]
    }
}

/// Invoice-level sums, derived only from the computed lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceTotals {
    total_net: Decimal,
    total_tax: Decimal,
    grand_total: Decimal,
    grand_total_words: String,
}

impl ValueObject for InvoiceTotals {}

impl InvoiceTotals {
    /// Sum the lines and write the grand total in words once.
    ///
    /// An invoice without lines has no defined total.
    pub fn from_lines(lines: &[ComputedLine], locale: CurrencyLocale) -> DomainResult<Self> {
        if lines.is_empty() {
            return Err(DomainError::invalid_input("invoice must contain at least one line item"));
        }

        let mut total_net = Decimal::ZERO;
        let mut total_tax = Decimal::ZERO;
        let mut grand_total = Decimal::ZERO;
        for line in lines {
            total_net = checked_sum(total_net, line.net_amount)?;
            total_tax = checked_sum(total_tax, line.tax_amount)?;
            grand_total = checked_sum(grand_total, line.total_amount)?;
        }

        Ok(Self {
            total_net,
            total_tax,
            grand_total,
            grand_total_words: amount_in_words(grand_total, locale),
        })
    }

    pub fn total_net(&self) -> Decimal {
        self.total_net
    }

    pub fn total_tax(&self) -> Decimal {
        self.total_tax
    }

    pub fn grand_total(&self) -> Decimal {
        self.grand_total
    }

    pub fn grand_total_words(&self) -> &str {
        &self.grand_total_words
    }
}

fn checked_sum(acc: Decimal, value: Decimal) -> DomainResult<Decimal> {
    acc.checked_add(value)
        .ok_or_else(|| DomainError::invariant("invoice total overflow"))
}

/// Output of the calculator for one invoice.
///
/// Serialize-only: rows and totals can only come from [`compute_invoice`].
///
/// ```compile_fail
/// let _: taxinvoice_invoicing::ComputedInvoice = serde_json::from_str("{}").unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComputedInvoice {
    intra_state: bool,
    lines: Vec<ComputedLine>,
    totals: InvoiceTotals,
}

impl ComputedInvoice {
    pub fn intra_state(&self) -> bool {
        self.intra_state
    }

    pub fn lines(&self) -> &[ComputedLine] {
        &self.lines
    }

    pub fn totals(&self) -> &InvoiceTotals {
        &self.totals
    }
}

/// Assess every item in order. Fails on the first invalid item.
pub fn compute_lines(
    items: &[LineItem],
    intra_state: bool,
    config: &InvoiceConfig,
) -> DomainResult<Vec<ComputedLine>> {
    if items.is_empty() {
        return Err(DomainError::invalid_input("invoice must contain at least one line item"));
    }
    items
        .iter()
        .enumerate()
        .map(|(i, item)| ComputedLine::compute(i + 1, item, intra_state, config))
        .collect()
}

/// Validate the context and configuration, then compute lines and totals.
pub fn compute_invoice(
    context: &InvoiceContext,
    config: &InvoiceConfig,
) -> DomainResult<ComputedInvoice> {
    config.validate()?;
    context.validate()?;

    let intra_state = context.is_intra_state(config.place_matching)?;
    let lines = compute_lines(&context.items, intra_state, config)?;
    let totals = InvoiceTotals::from_lines(&lines, config.currency_locale)?;

    tracing::debug!(
        invoice_no = %context.invoice.invoice_no,
        lines = lines.len(),
        intra_state,
        grand_total = %totals.grand_total(),
        "computed invoice"
    );

    Ok(ComputedInvoice {
        intra_state,
        lines,
        totals,
    })
}
