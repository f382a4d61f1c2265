//! Renderer seam and per-invoice output files.

use std::fs;
use std::path::{Path, PathBuf};

use taxinvoice_core::{DomainError, DomainResult};
use taxinvoice_invoicing::InvoiceDocument;

use crate::error::{RenderError, RenderResult};

/// Turns a computed invoice into document bytes.
///
/// Implementations must not mutate the document; the same input renders to
/// the same artifact.
pub trait DocumentRenderer {
    /// File extension of the produced artifact, without the dot.
    fn extension(&self) -> &'static str;

    fn render(&self, document: &InvoiceDocument) -> RenderResult<Vec<u8>>;
}

/// Derive `<dir>/<invoice_no>.<ext>`, replacing characters outside
/// `[A-Za-z0-9._-]` with `_`.
pub fn output_path_for(dir: &Path, invoice_no: &str, extension: &str) -> DomainResult<PathBuf> {
    let stem: String = invoice_no
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '_' })
        .collect();

    if stem.is_empty() || stem.chars().all(|c| matches!(c, '_' | '.')) {
        return Err(DomainError::invalid_input(format!(
            "invoice number {invoice_no:?} cannot be used as a file name"
        )));
    }
    Ok(dir.join(format!("{stem}.{extension}")))
}

/// Render `document` fully in memory, then write it to `path`.
///
/// The file appears only once complete: bytes go to a sibling temporary file
/// that is renamed into place.
pub fn write_document<R>(renderer: &R, document: &InvoiceDocument, path: &Path) -> RenderResult<()>
where
    R: DocumentRenderer + ?Sized,
{
    let bytes = renderer.render(document)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| RenderError::io(parent, e))?;
    }

    let mut staging = path.as_os_str().to_owned();
    staging.push(".partial");
    let staging = PathBuf::from(staging);

    if let Err(e) = fs::write(&staging, &bytes) {
        let _ = fs::remove_file(&staging);
        return Err(RenderError::io(&staging, e));
    }
    if let Err(e) = fs::rename(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(RenderError::io(path, e));
    }

    tracing::info!(
        invoice_no = %document.invoice_no(),
        path = %path.display(),
        bytes = bytes.len(),
        "invoice written"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invoice_number_becomes_file_stem() {
        let path = output_path_for(Path::new("out"), "KA-310565025-1920", "pdf").unwrap();
        assert_eq!(path, Path::new("out").join("KA-310565025-1920.pdf"));
    }

    #[test]
    fn unsafe_characters_are_replaced() {
        let path = output_path_for(Path::new("out"), "INV/2019 10#7", "pdf").unwrap();
        assert_eq!(path, Path::new("out").join("INV_2019_10_7.pdf"));

        let traversal = output_path_for(Path::new("out"), "../../etc/passwd", "pdf").unwrap();
        assert_eq!(traversal, Path::new("out").join(".._.._etc_passwd.pdf"));
    }

    #[test]
    fn blank_invoice_number_is_rejected() {
        assert!(output_path_for(Path::new("out"), "   ", "pdf").unwrap_err().is_invalid_input());
        assert!(output_path_for(Path::new("out"), "///", "pdf").is_err());
    }
}
