//! Hand-off between the calculator and a document renderer.

use taxinvoice_core::DomainResult;

use crate::config::InvoiceConfig;
use crate::context::InvoiceContext;
use crate::invoice::{compute_invoice, ComputedInvoice};

/// Input metadata plus fully computed rows and totals.
///
/// Only obtainable through [`InvoiceDocument::prepare`], so a renderer never
/// sees an invoice that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceDocument {
    context: InvoiceContext,
    computed: ComputedInvoice,
}

impl InvoiceDocument {
    /// Validate and compute `context` under `config`.
    pub fn prepare(context: InvoiceContext, config: &InvoiceConfig) -> DomainResult<Self> {
        let computed = compute_invoice(&context, config)?;
        Ok(Self { context, computed })
    }

    pub fn context(&self) -> &InvoiceContext {
        &self.context
    }

    pub fn computed(&self) -> &ComputedInvoice {
        &self.computed
    }

    pub fn invoice_no(&self) -> &str {
        &self.context.invoice.invoice_no
    }
}
