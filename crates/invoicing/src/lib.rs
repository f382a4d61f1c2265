//! Invoicing domain module: GST tax calculation for a single invoice.
//!
//! This crate turns an [`InvoiceContext`] into computed rows and totals,
//! implemented purely as deterministic domain logic (no IO, no rendering).

pub mod config;
pub mod context;
pub mod document;
pub mod invoice;
pub mod tax;
pub mod words;

pub use config::{CurrencyLocale, InvoiceConfig, PlaceMatching};
pub use context::{InvoiceContext, InvoiceReference, LineItem, OrderReference};
pub use document::InvoiceDocument;
pub use invoice::{compute_invoice, compute_lines, ComputedInvoice, ComputedLine, InvoiceTotals};
pub use tax::{TaxAssessment, TaxComponent, TaxHead, TaxType};
pub use words::amount_in_words;
