//! Structured page content for an invoice.
//!
//! The layout decides *what* appears and in which order; a renderer decides
//! how it looks. No markup is produced here.

use std::path::PathBuf;

use taxinvoice_core::format_money;
use taxinvoice_invoicing::InvoiceDocument;
use taxinvoice_parties::Party;

pub const TITLE: &str = "Tax Invoice/Bill of Supply/Cash Memo";
pub const SUBTITLE: &str = "(Original for Recipient)";
pub const SIGNATORY: &str = "Authorised Signatory";

/// Column headings of the item table.
pub const TABLE_HEADER: [&str; 9] = [
    "Sl. No",
    "Description",
    "Unit Price",
    "Qty",
    "Net Amount",
    "Tax Rate",
    "Tax Type",
    "Tax Amount",
    "Total Amount",
];

/// Where an image sits on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSlot {
    Logo,
    Signature,
}

impl ImageSlot {
    /// Drawn size in points (width, height).
    pub fn size_pt(&self) -> (f32, f32) {
        match self {
            ImageSlot::Logo => (144.0, 72.0),
            ImageSlot::Signature => (100.0, 50.0),
        }
    }
}

/// One piece of page content, in reading order.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Image { slot: ImageSlot, path: PathBuf },
    Title(String),
    Subtitle(String),
    /// Bold line.
    Heading(String),
    /// Regular line, wrapped to the content width.
    Text(String),
    /// Bold label followed by a regular value on the same line.
    Field { label: String, value: String },
    Table { header: [&'static str; 9], rows: Vec<[String; 9]> },
    /// Vertical gap in points.
    Spacer(f32),
}

const GAP: f32 = 14.0;
const SMALL_GAP: f32 = 7.0;

/// Lay out the invoice top to bottom.
pub fn layout(document: &InvoiceDocument) -> Vec<Block> {
    let ctx = document.context();
    let computed = document.computed();
    let totals = computed.totals();
    let mut blocks = Vec::new();

    if let Some(path) = &ctx.logo {
        blocks.push(Block::Image {
            slot: ImageSlot::Logo,
            path: path.clone(),
        });
    }

    blocks.push(Block::Spacer(GAP));
    blocks.push(Block::Title(TITLE.to_string()));
    blocks.push(Block::Subtitle(SUBTITLE.to_string()));
    blocks.push(Block::Spacer(GAP));

    blocks.push(Block::Heading("Sold By:".to_string()));
    push_address(&mut blocks, &ctx.seller);
    if let Some(pan) = &ctx.seller.pan {
        blocks.push(Block::Text(format!("PAN No.: {pan}")));
    }
    if let Some(gst) = &ctx.seller.gst {
        blocks.push(Block::Text(format!("GST Registration No.: {gst}")));
    }
    blocks.push(Block::Spacer(GAP));

    let addressees = [("Billing Address:", &ctx.billing), ("Shipping Address:", &ctx.shipping)];
    for (heading, party) in addressees {
        blocks.push(Block::Heading(heading.to_string()));
        push_address(&mut blocks, party);
        if let Some(code) = &party.state_code {
            blocks.push(Block::Text(format!("State/UT Code: {code}")));
        }
        blocks.push(Block::Spacer(GAP));
    }

    blocks.push(Block::Heading("Order Details:".to_string()));
    blocks.push(Block::Text(format!("Order No.: {}", ctx.order.order_no)));
    blocks.push(Block::Text(format!("Order Date: {}", ctx.order.order_date)));
    blocks.push(Block::Heading("Invoice Details:".to_string()));
    blocks.push(Block::Text(format!("Invoice No.: {}", ctx.invoice.invoice_no)));
    blocks.push(Block::Text(format!("Invoice Date: {}", ctx.invoice.invoice_date)));
    blocks.push(Block::Text(format!(
        "Reverse Charge: {}",
        ctx.invoice.reverse_charge_label()
    )));
    blocks.push(Block::Spacer(GAP));

    blocks.push(Block::Field {
        label: "Place of Supply:".to_string(),
        value: ctx.place_of_supply.clone().unwrap_or_default(),
    });
    blocks.push(Block::Spacer(SMALL_GAP));
    blocks.push(Block::Field {
        label: "Place of Delivery:".to_string(),
        value: ctx.place_of_delivery.clone().unwrap_or_default(),
    });
    blocks.push(Block::Spacer(GAP));

    blocks.push(Block::Table {
        header: TABLE_HEADER,
        rows: computed.lines().iter().map(|line| line.display_cells()).collect(),
    });
    blocks.push(Block::Spacer(GAP));

    blocks.push(Block::Field {
        label: "Total Amount:".to_string(),
        value: format_money(totals.grand_total()),
    });
    blocks.push(Block::Field {
        label: "Amount in Words:".to_string(),
        value: totals.grand_total_words().to_string(),
    });
    blocks.push(Block::Spacer(GAP * 2.0));

    blocks.push(Block::Heading(format!("For {}:", ctx.seller.name)));
    if let Some(path) = &ctx.signature_image {
        blocks.push(Block::Image {
            slot: ImageSlot::Signature,
            path: path.clone(),
        });
    }
    blocks.push(Block::Text(SIGNATORY.to_string()));

    blocks
}

fn push_address(blocks: &mut Vec<Block>, party: &Party) {
    blocks.push(Block::Text(party.name.clone()));
    blocks.push(Block::Text(party.address.clone()));
    blocks.push(Block::Text(party.locality_line()));
}
