use std::path::PathBuf;

use chrono::{TimeZone, Utc};
use lopdf::Document;
use tempfile::TempDir;

use taxinvoice_invoicing::{InvoiceConfig, InvoiceContext, InvoiceDocument};
use taxinvoice_render::{
    output_path_for, write_document, DocumentRenderer, PdfRenderer, RenderError,
};

const SAMPLE: &str = include_str!("../../../fixtures/sample-invoice.json");

fn test_context() -> InvoiceContext {
    InvoiceContext::from_json(SAMPLE).unwrap()
}

fn test_document(ctx: InvoiceContext) -> InvoiceDocument {
    InvoiceDocument::prepare(ctx, &InvoiceConfig::default()).unwrap()
}

fn fixed_renderer() -> PdfRenderer {
    PdfRenderer::new().with_creation_date(Utc.with_ymd_and_hms(2019, 10, 28, 0, 0, 0).unwrap())
}

fn page_text(pdf: &Document) -> String {
    pdf.get_pages()
        .values()
        .map(|id| {
            let raw = pdf.get_page_content(*id).unwrap();
            String::from_utf8_lossy(&raw).into_owned()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn write_png(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    let img = image::RgbImage::from_pixel(8, 4, image::Rgb([20, 40, 200]));
    img.save(&path).unwrap();
    path
}

#[test]
fn sample_invoice_renders_a_single_page() {
    let bytes = fixed_renderer().render(&test_document(test_context())).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));

    let pdf = Document::load_mem(&bytes).unwrap();
    assert_eq!(pdf.get_pages().len(), 1);

    let text = page_text(&pdf);
    assert!(text.contains("Tax Invoice/Bill of Supply/Cash Memo"));
    assert!(text.contains("Indian Rupees Seven Hundred Ten and One Paise Only"));
    assert!(text.contains("355.01"));
    assert!(text.contains("Authorised Signatory"));
}

#[test]
fn long_item_lists_flow_onto_more_pages() {
    let mut ctx = test_context();
    let item = ctx.items[0].clone();
    ctx.items = std::iter::repeat(item).take(60).collect();

    let bytes = fixed_renderer().render(&test_document(ctx)).unwrap();
    let pdf = Document::load_mem(&bytes).unwrap();
    assert!(pdf.get_pages().len() > 1);

    // Column headings repeat at the top of the continuation page.
    let second = *pdf.get_pages().get(&2).unwrap();
    let text = String::from_utf8_lossy(&pdf.get_page_content(second).unwrap()).into_owned();
    assert!(text.contains("Total Amount"));
    assert!(text.contains("Description"));
}

#[test]
fn fixed_creation_date_gives_identical_bytes() {
    let document = test_document(test_context());
    let first = fixed_renderer().render(&document).unwrap();
    let second = fixed_renderer().render(&document).unwrap();
    assert_eq!(first, second);
}

#[test]
fn missing_signature_image_is_an_image_error() {
    let mut ctx = test_context();
    ctx.signature_image = Some(PathBuf::from("/nonexistent/signature.png"));

    let err = fixed_renderer().render(&test_document(ctx)).unwrap_err();
    match err {
        RenderError::Image { path, .. } => {
            assert_eq!(path, PathBuf::from("/nonexistent/signature.png"))
        }
        other => panic!("Expected Image error, got {other:?}"),
    }
}

#[test]
fn logo_and_signature_are_embedded_as_images() {
    let dir = TempDir::new().unwrap();
    let mut ctx = test_context();
    ctx.logo = Some(write_png(&dir, "logo.png"));
    ctx.signature_image = Some(write_png(&dir, "signature.png"));

    let bytes = fixed_renderer().render(&test_document(ctx)).unwrap();
    let pdf = Document::load_mem(&bytes).unwrap();

    let images = pdf
        .objects
        .values()
        .filter_map(|obj| obj.as_stream().ok())
        .filter(|stream| {
            matches!(stream.dict.get(b"Subtype").and_then(|s| s.as_name()), Ok(b"Image"))
        })
        .count();
    assert_eq!(images, 2);
    assert!(page_text(&pdf).contains("Do"));
}

#[test]
fn written_file_lands_at_the_invoice_path() {
    let dir = TempDir::new().unwrap();
    let document = test_document(test_context());
    let renderer = fixed_renderer();

    let out = dir.path().join("out");
    let path = output_path_for(&out, document.invoice_no(), renderer.extension()).unwrap();
    write_document(&renderer, &document, &path).unwrap();

    assert_eq!(path.file_name().unwrap(), "KA-310565025-1920.pdf");
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    assert!(!dir.path().join("out").join("KA-310565025-1920.pdf.partial").exists());
}

#[test]
fn failed_render_leaves_no_file_behind() {
    let dir = TempDir::new().unwrap();
    let mut ctx = test_context();
    ctx.logo = Some(dir.path().join("missing-logo.png"));
    let document = test_document(ctx);

    let path = output_path_for(dir.path(), document.invoice_no(), "pdf").unwrap();
    let err = write_document(&fixed_renderer(), &document, &path).unwrap_err();

    assert!(matches!(err, RenderError::Image { .. }));
    assert!(!path.exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
