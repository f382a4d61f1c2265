//! Document rendering for computed invoices.
//!
//! [`layout`] turns an [`InvoiceDocument`](taxinvoice_invoicing::InvoiceDocument)
//! into ordered page blocks, [`PdfRenderer`] draws them onto A4 pages, and
//! [`write_document`] persists the result without ever leaving a partial file.

pub mod error;
pub mod layout;
pub mod pdf;
pub mod renderer;

pub use error::{RenderError, RenderResult};
pub use layout::{layout, Block, ImageSlot};
pub use pdf::PdfRenderer;
pub use renderer::{output_path_for, write_document, DocumentRenderer};
