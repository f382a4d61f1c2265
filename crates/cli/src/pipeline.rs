//! Read a payload, compute it, and render it to disk.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use taxinvoice_invoicing::{ComputedInvoice, InvoiceConfig, InvoiceContext, InvoiceDocument};
use taxinvoice_render::{output_path_for, write_document, DocumentRenderer};

/// Where the rendered document goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Exact file path.
    File(PathBuf),
    /// Directory; the file name is derived from the invoice number.
    Dir(PathBuf),
}

pub fn read_context(input: &Path) -> anyhow::Result<InvoiceContext> {
    let payload = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    InvoiceContext::from_json(&payload)
        .with_context(|| format!("invalid invoice payload {}", input.display()))
}

/// Validate and compute the invoice in `input` without rendering it.
pub fn compute(input: &Path, config: &InvoiceConfig) -> anyhow::Result<ComputedInvoice> {
    let context = read_context(input)?;
    let document = InvoiceDocument::prepare(context, config).context("invoice rejected")?;
    Ok(document.computed().clone())
}

/// Compute the invoice in `input` and write it with `renderer`.
///
/// Returns the path of the written file.
pub fn render<R>(
    input: &Path,
    output: &OutputTarget,
    config: &InvoiceConfig,
    renderer: &R,
) -> anyhow::Result<PathBuf>
where
    R: DocumentRenderer + ?Sized,
{
    let context = read_context(input)?;
    let document = InvoiceDocument::prepare(context, config).context("invoice rejected")?;
    tracing::info!(
        invoice_no = %document.invoice_no(),
        lines = document.computed().lines().len(),
        "invoice computed"
    );

    let path = match output {
        OutputTarget::File(path) => path.clone(),
        OutputTarget::Dir(dir) => output_path_for(dir, document.invoice_no(), renderer.extension())
            .context("cannot derive output file name")?,
    };

    write_document(renderer, &document, &path)
        .with_context(|| format!("failed to render {}", path.display()))?;
    Ok(path)
}
