//! A4 PDF renderer built directly on `lopdf` objects.
//!
//! Text uses the standard Helvetica Type1 fonts, so no font files are needed.
//! Widths are estimated from an average glyph advance, which is close enough
//! for wrapping and centering.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use image::codecs::jpeg::JpegEncoder;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};

use taxinvoice_invoicing::InvoiceDocument;

use crate::error::{RenderError, RenderResult};
use crate::layout::{layout, Block, ImageSlot};
use crate::renderer::DocumentRenderer;

pub const PAGE_WIDTH_PT: f32 = 595.0;
pub const PAGE_HEIGHT_PT: f32 = 842.0;
const MARGIN: f32 = 40.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH_PT - 2.0 * MARGIN;

const FONT_REGULAR: &str = "F1";
const FONT_BOLD: &str = "F2";

const TITLE_SIZE: f32 = 18.0;
const BODY_SIZE: f32 = 10.0;
const TABLE_SIZE: f32 = 8.0;
const LEADING: f32 = 1.25;
/// Average Helvetica advance width, in em.
const AVG_GLYPH_WIDTH: f32 = 0.55;

const CELL_PADDING: f32 = 3.0;
const HEADER_BOTTOM_PADDING: f32 = 12.0;
const GRID_WIDTH: f32 = 1.0;
/// Share of the content width taken by each table column.
const COLUMN_SHARES: [f32; 9] = [0.06, 0.26, 0.09, 0.06, 0.10, 0.08, 0.11, 0.10, 0.14];

type Rgb = (f32, f32, f32);
const BLACK: Rgb = (0.0, 0.0, 0.0);
const GREY: Rgb = (0.5, 0.5, 0.5);
const WHITESMOKE: Rgb = (0.96, 0.96, 0.96);
const BEIGE: Rgb = (0.96, 0.96, 0.86);

const JPEG_QUALITY: u8 = 90;

/// Renders invoices as single-file PDF documents.
#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    creation_date: Option<DateTime<Utc>>,
}

impl PdfRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the `CreationDate` metadata, making output byte-for-byte reproducible.
    pub fn with_creation_date(mut self, at: DateTime<Utc>) -> Self {
        self.creation_date = Some(at);
        self
    }
}

impl DocumentRenderer for PdfRenderer {
    fn extension(&self) -> &'static str {
        "pdf"
    }

    fn render(&self, document: &InvoiceDocument) -> RenderResult<Vec<u8>> {
        let blocks = layout(document);

        let mut doc = Document::with_version("1.5");
        // Images first: a missing asset fails before any page is built.
        let images = embed_images(&mut doc, &blocks)?;

        let mut xobjects = Dictionary::new();
        for (name, id) in images.values() {
            xobjects.set(name.as_str(), *id);
        }
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                FONT_REGULAR => font("Helvetica"),
                FONT_BOLD => font("Helvetica-Bold"),
            },
            "XObject" => xobjects,
        });

        let mut pages = PageWriter::new(doc, resources_id);
        for block in &blocks {
            pages.draw(block, &images)?;
        }

        let created = self.creation_date.unwrap_or_else(Utc::now);
        let title = format!("Tax Invoice {}", document.invoice_no());
        let (bytes, page_count) = pages.finish(&title, created)?;

        tracing::debug!(
            invoice_no = %document.invoice_no(),
            pages = page_count,
            bytes = bytes.len(),
            "rendered pdf"
        );
        Ok(bytes)
    }
}

fn font(base: &str) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base,
        "Encoding" => "WinAnsiEncoding",
    }
}

/// Image XObjects by source path: resource name and object id.
type ImageMap = BTreeMap<PathBuf, (String, ObjectId)>;

/// Load every referenced image once and add it as a JPEG image XObject.
fn embed_images(doc: &mut Document, blocks: &[Block]) -> RenderResult<ImageMap> {
    let mut images = BTreeMap::new();
    for block in blocks {
        let Block::Image { path, .. } = block else {
            continue;
        };
        if images.contains_key(path) {
            continue;
        }
        let id = doc.add_object(jpeg_xobject(path)?);
        let name = format!("Im{}", images.len());
        images.insert(path.clone(), (name, id));
    }
    Ok(images)
}

fn jpeg_xobject(path: &Path) -> RenderResult<Stream> {
    let rgb = image::open(path)
        .map_err(|e| RenderError::image(path, e))?
        .to_rgb8();
    let (width, height) = rgb.dimensions();

    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY)
        .encode(rgb.as_raw(), width, height, image::ColorType::Rgb8)
        .map_err(|e| RenderError::image(path, e))?;

    Ok(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "DCTDecode",
        },
        jpeg,
    ))
}

/// Accumulates drawing operations and cuts pages as the cursor runs out of room.
struct PageWriter {
    doc: Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    kids: Vec<Object>,
    ops: Vec<Operation>,
    y: f32,
}

impl PageWriter {
    fn new(mut doc: Document, resources_id: ObjectId) -> Self {
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            resources_id,
            kids: Vec::new(),
            ops: Vec::new(),
            y: PAGE_HEIGHT_PT - MARGIN,
        }
    }

    fn draw(&mut self, block: &Block, images: &ImageMap) -> RenderResult<()> {
        match block {
            Block::Spacer(height) => {
                self.y -= height;
            }
            Block::Title(text) => {
                self.ensure_room(TITLE_SIZE * LEADING)?;
                self.y -= TITLE_SIZE;
                let x = (PAGE_WIDTH_PT - text_width(text, TITLE_SIZE)) / 2.0;
                self.text(text, FONT_BOLD, TITLE_SIZE, x.max(MARGIN), self.y, BLACK);
                self.y -= TITLE_SIZE * (LEADING - 1.0);
            }
            Block::Subtitle(text) | Block::Text(text) => {
                self.paragraph(text, FONT_REGULAR)?;
            }
            Block::Heading(text) => {
                self.paragraph(text, FONT_BOLD)?;
            }
            Block::Field { label, value } => {
                self.field(label, value)?;
            }
            Block::Image { slot, path } => {
                if let Some((name, _)) = images.get(path) {
                    self.image(name, *slot)?;
                }
            }
            Block::Table { header, rows } => {
                self.table(header, rows)?;
            }
        }
        Ok(())
    }

    fn paragraph(&mut self, text: &str, font: &str) -> RenderResult<()> {
        let line_height = BODY_SIZE * LEADING;
        for line in wrap(text, BODY_SIZE, CONTENT_WIDTH) {
            self.ensure_room(line_height)?;
            self.y -= line_height;
            self.text(&line, font, BODY_SIZE, MARGIN, self.y, BLACK);
        }
        Ok(())
    }

    fn field(&mut self, label: &str, value: &str) -> RenderResult<()> {
        let line_height = BODY_SIZE * LEADING;
        let indent = text_width(label, BODY_SIZE) + BODY_SIZE * AVG_GLYPH_WIDTH;

        self.ensure_room(line_height)?;
        self.y -= line_height;
        self.text(label, FONT_BOLD, BODY_SIZE, MARGIN, self.y, BLACK);

        for (i, line) in wrap(value, BODY_SIZE, CONTENT_WIDTH - indent).into_iter().enumerate() {
            if i > 0 {
                self.ensure_room(line_height)?;
                self.y -= line_height;
            }
            self.text(&line, FONT_REGULAR, BODY_SIZE, MARGIN + indent, self.y, BLACK);
        }
        Ok(())
    }

    fn image(&mut self, name: &str, slot: ImageSlot) -> RenderResult<()> {
        let (width, height) = slot.size_pt();
        self.ensure_room(height)?;
        self.y -= height;
        self.ops.push(Operation::new("q", vec![]));
        self.ops.push(Operation::new(
            "cm",
            vec![width.into(), 0.into(), 0.into(), height.into(), MARGIN.into(), self.y.into()],
        ));
        self.ops.push(Operation::new("Do", vec![name.into()]));
        self.ops.push(Operation::new("Q", vec![]));
        Ok(())
    }

    fn table(&mut self, header: &[&str; 9], rows: &[[String; 9]]) -> RenderResult<()> {
        let widths = COLUMN_SHARES.map(|share| share * CONTENT_WIDTH);
        let header_cells: Vec<Vec<String>> = header
            .iter()
            .zip(widths)
            .map(|(text, width)| wrap(text, TABLE_SIZE, width - 2.0 * CELL_PADDING))
            .collect();
        let header_height = row_height(&header_cells) + HEADER_BOTTOM_PADDING - CELL_PADDING;

        self.ensure_room(header_height + row_height(&[vec![String::new()]]))?;
        self.table_row(&header_cells, &widths, header_height, GREY, WHITESMOKE, FONT_BOLD);

        for row in rows {
            let cells: Vec<Vec<String>> = row
                .iter()
                .zip(widths)
                .map(|(text, width)| wrap(text, TABLE_SIZE, width - 2.0 * CELL_PADDING))
                .collect();
            let height = row_height(&cells);

            if self.y - height < MARGIN {
                self.finish_page()?;
                // Continuation pages repeat the column headings.
                self.table_row(&header_cells, &widths, header_height, GREY, WHITESMOKE, FONT_BOLD);
            }
            self.table_row(&cells, &widths, height, BEIGE, BLACK, FONT_REGULAR);
        }
        Ok(())
    }

    fn table_row(
        &mut self,
        cells: &[Vec<String>],
        widths: &[f32; 9],
        height: f32,
        fill: Rgb,
        ink: Rgb,
        font: &str,
    ) {
        let top = self.y;
        let bottom = top - height;
        let line_height = TABLE_SIZE * LEADING;
        let mut x = MARGIN;

        for (lines, width) in cells.iter().zip(widths) {
            self.rect(x, bottom, *width, height, fill);
            for (i, line) in lines.iter().enumerate() {
                let baseline = top - CELL_PADDING - TABLE_SIZE - i as f32 * line_height;
                let offset = ((width - text_width(line, TABLE_SIZE)) / 2.0).max(CELL_PADDING);
                self.text(line, font, TABLE_SIZE, x + offset, baseline, ink);
            }
            x += width;
        }
        self.y = bottom;
    }

    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, fill: Rgb) {
        let (r, g, b) = fill;
        self.ops.push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
        self.ops.push(Operation::new("RG", vec![BLACK.0.into(), BLACK.1.into(), BLACK.2.into()]));
        self.ops.push(Operation::new("w", vec![GRID_WIDTH.into()]));
        self.ops.push(Operation::new(
            "re",
            vec![x.into(), y.into(), width.into(), height.into()],
        ));
        // Fill and stroke in one go.
        self.ops.push(Operation::new("B", vec![]));
    }

    fn text(&mut self, text: &str, font: &str, size: f32, x: f32, y: f32, ink: Rgb) {
        let (r, g, b) = ink;
        self.ops.push(Operation::new("BT", vec![]));
        self.ops.push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
        self.ops.push(Operation::new("Tf", vec![font.into(), size.into()]));
        self.ops.push(Operation::new("Td", vec![x.into(), y.into()]));
        self.ops.push(Operation::new("Tj", vec![win_ansi(text)]));
        self.ops.push(Operation::new("ET", vec![]));
    }

    /// Start a new page when fewer than `height` points remain.
    fn ensure_room(&mut self, height: f32) -> RenderResult<()> {
        if self.y - height < MARGIN && !self.ops.is_empty() {
            self.finish_page()?;
        }
        Ok(())
    }

    fn finish_page(&mut self) -> RenderResult<()> {
        let content = Content {
            operations: std::mem::take(&mut self.ops),
        };
        let content_id = self.doc.add_object(Stream::new(Dictionary::new(), content.encode()?));
        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "Resources" => self.resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH_PT.into(), PAGE_HEIGHT_PT.into()],
            "Contents" => content_id,
        });
        self.kids.push(page_id.into());
        self.y = PAGE_HEIGHT_PT - MARGIN;
        Ok(())
    }

    fn finish(mut self, title: &str, created: DateTime<Utc>) -> RenderResult<(Vec<u8>, usize)> {
        if !self.ops.is_empty() || self.kids.is_empty() {
            self.finish_page()?;
        }
        let page_count = self.kids.len();

        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => self.kids,
                "Count" => page_count as i64,
            }),
        );
        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        let info_id = self.doc.add_object(dictionary! {
            "Title" => win_ansi(title),
            "Producer" => Object::string_literal("taxinvoice"),
            "CreationDate" => Object::string_literal(created.format("D:%Y%m%d%H%M%SZ").to_string()),
        });
        self.doc.trailer.set("Root", catalog_id);
        self.doc.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        self.doc.save_to(&mut bytes).map_err(lopdf::Error::from)?;
        Ok((bytes, page_count))
    }
}

fn row_height(cells: &[Vec<String>]) -> f32 {
    let lines = cells.iter().map(Vec::len).max().unwrap_or(1).max(1) as f32;
    2.0 * CELL_PADDING + TABLE_SIZE + (lines - 1.0) * TABLE_SIZE * LEADING + TABLE_SIZE * 0.25
}

fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * AVG_GLYPH_WIDTH
}

/// Greedy word wrap; words longer than a line are split.
fn wrap(text: &str, size: f32, max_width: f32) -> Vec<String> {
    let max_chars = ((max_width / (size * AVG_GLYPH_WIDTH)).floor() as usize).max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let mut word = word;
        while word.chars().count() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let split = word.char_indices().nth(max_chars).map_or(word.len(), |(i, _)| i);
            lines.push(word[..split].to_string());
            word = &word[split..];
        }

        let word_len = word.chars().count();
        if word_len == 0 {
            continue;
        }
        if current_len > 0 && current_len + 1 + word_len > max_chars {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// WinAnsi bytes 0x80..=0x9F; `None` marks undefined slots.
const WIN_ANSI_HIGH: [Option<char>; 32] = [
    Some('\u{20AC}'), None, Some('\u{201A}'), Some('\u{0192}'),
    Some('\u{201E}'), Some('\u{2026}'), Some('\u{2020}'), Some('\u{2021}'),
    Some('\u{02C6}'), Some('\u{2030}'), Some('\u{0160}'), Some('\u{2039}'),
    Some('\u{0152}'), None, Some('\u{017D}'), None,
    None, Some('\u{2018}'), Some('\u{2019}'), Some('\u{201C}'),
    Some('\u{201D}'), Some('\u{2022}'), Some('\u{2013}'), Some('\u{2014}'),
    Some('\u{02DC}'), Some('\u{2122}'), Some('\u{0161}'), Some('\u{203A}'),
    Some('\u{0153}'), None, Some('\u{017E}'), Some('\u{0178}'),
];

/// WinAnsi byte for `c`, if the encoding has a glyph for it.
fn win_ansi_byte(c: char) -> Option<u8> {
    match u32::from(c) {
        code @ (0x20..=0x7E | 0xA0..=0xFF) => u8::try_from(code).ok(),
        _ => WIN_ANSI_HIGH
            .iter()
            .position(|slot| *slot == Some(c))
            .and_then(|i| u8::try_from(0x80 + i).ok()),
    }
}

/// Encode as a literal string for a WinAnsi font; unmappable characters become '?'.
fn win_ansi(text: &str) -> Object {
    let mut replaced = 0usize;
    let bytes = text
        .chars()
        .map(|c| {
            win_ansi_byte(c).unwrap_or_else(|| {
                replaced += 1;
                b'?'
            })
        })
        .collect();
    if replaced > 0 {
        tracing::warn!(text, replaced, "characters outside the font encoding were replaced");
    }
    Object::String(bytes, StringFormat::Literal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_breaks_on_word_boundaries() {
        // 10pt at 0.55em -> 5.5pt per char; 55pt fits 10 chars.
        let lines = wrap("Navy Blue Formal Shirt", 10.0, 55.0);
        assert_eq!(lines, vec!["Navy Blue", "Formal", "Shirt"]);
    }

    #[test]
    fn wrap_splits_overlong_words() {
        let lines = wrap("29AACFV3325K1ZY", 10.0, 55.0);
        assert_eq!(lines, vec!["29AACFV332", "5K1ZY"]);
    }

    #[test]
    fn wrap_keeps_one_line_for_empty_text() {
        assert_eq!(wrap("", 10.0, 100.0), vec![String::new()]);
        assert_eq!(wrap("710.01", 10.0, 100.0), vec!["710.01"]);
    }

    #[test]
    fn row_height_grows_with_wrapped_lines() {
        let one = row_height(&[vec!["a".into()]]);
        let three = row_height(&[vec!["a".into()], vec!["a".into(), "b".into(), "c".into()]]);
        assert!((three - one - 2.0 * TABLE_SIZE * LEADING).abs() < 1e-3);
    }

    #[test]
    fn typographic_punctuation_uses_win_ansi_slots() {
        match win_ansi("Men\u{2019}s \u{2013} \u{20AC}5 \u{201C}x\u{201D} \u{2022}") {
            Object::String(bytes, StringFormat::Literal) => {
                assert_eq!(
                    bytes,
                    vec![
                        b'M', b'e', b'n', 0x92, b's', b' ', 0x96, b' ', 0x80, b'5', b' ', 0x93,
                        b'x', 0x94, b' ', 0x95,
                    ]
                );
            }
            other => panic!("Expected literal string, got {other:?}"),
        }
    }

    #[test]
    fn c1_controls_are_not_passed_through() {
        assert_eq!(win_ansi_byte('\u{0080}'), None);
        assert_eq!(win_ansi_byte('\u{0092}'), None);
        assert_eq!(win_ansi_byte('\u{00A0}'), Some(0xA0));
        assert_eq!(win_ansi_byte('\u{0178}'), Some(0x9F));
    }

    #[test]
    fn non_latin_characters_are_replaced() {
        match win_ansi("₹ 100 é") {
            Object::String(bytes, StringFormat::Literal) => {
                assert_eq!(bytes, vec![b'?', b' ', b'1', b'0', b'0', b' ', 0xE9]);
            }
            other => panic!("Expected literal string, got {other:?}"),
        }
    }
}
