//! Rendering collaborator: turns a fully-populated quote view into a
//! document byte stream.
//!
//! The trait is the seam; handlers prepare a complete [`RenderInput`]
//! (stored snapshot + frozen totals for finalized quotes, ad-hoc totals and
//! a placeholder number for draft previews) and the renderer never mutates
//! or re-derives any of it. The built-in implementation emits a minimal
//! single-page PDF with no timestamps or generation ids, so rendering the
//! same input twice is byte-identical.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use service_core::error::AppError;

use crate::models::{CompanySnapshot, CustomerDetails, LineItem, Totals};

#[derive(Debug, Clone)]
pub struct RenderInput {
    pub quote_number: String,
    pub issue_date: Option<DateTime<Utc>>,
    pub customer: CustomerDetails,
    pub items: Vec<LineItem>,
    pub totals: Totals,
    pub company: CompanySnapshot,
    pub notes: String,
    pub draft: bool,
}

#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub filename: String,
}

#[async_trait]
pub trait QuoteRenderer: Send + Sync {
    async fn render(&self, input: &RenderInput) -> Result<RenderedDocument, AppError>;
}

#[derive(Default)]
pub struct PdfRenderer;

impl PdfRenderer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl QuoteRenderer for PdfRenderer {
    async fn render(&self, input: &RenderInput) -> Result<RenderedDocument, AppError> {
        let bytes = build_pdf(&layout_lines(input));
        let filename = format!("{}.pdf", input.quote_number);

        tracing::info!(
            quote_number = %input.quote_number,
            draft = input.draft,
            size = bytes.len(),
            "Quote rendered to PDF"
        );

        Ok(RenderedDocument { bytes, filename })
    }
}

struct TextLine {
    size: f64,
    text: String,
}

fn line(size: f64, text: impl Into<String>) -> TextLine {
    TextLine {
        size,
        text: text.into(),
    }
}

fn money(amount: Decimal, currency: &str) -> String {
    format!("{:.3} {}", amount, currency)
}

fn layout_lines(input: &RenderInput) -> Vec<TextLine> {
    let currency = input.company.currency.as_str();
    let mut lines = Vec::new();

    lines.push(line(14.0, input.company.company_name.clone()));
    for address_line in &input.company.address {
        lines.push(line(9.0, address_line.clone()));
    }
    if !input.company.vat_no.is_empty() {
        lines.push(line(9.0, format!("VAT No: {}", input.company.vat_no)));
    }
    lines.push(line(9.0, ""));

    lines.push(line(
        16.0,
        if input.draft {
            "Quotation (DRAFT)"
        } else {
            "Quotation"
        },
    ));
    let mut meta = format!("# {}", input.quote_number);
    if let Some(issue_date) = input.issue_date {
        meta.push_str(&format!("  -  {}", issue_date.format("%Y-%m-%d")));
    }
    lines.push(line(10.0, meta));
    lines.push(line(9.0, ""));

    lines.push(line(10.0, "Bill To"));
    lines.push(line(10.0, if input.customer.name.is_empty() {
        "-".to_string()
    } else {
        input.customer.name.clone()
    }));
    if !input.customer.vat_no.is_empty() {
        lines.push(line(9.0, format!("VAT: {}", input.customer.vat_no)));
    }
    for address_line in &input.customer.address_lines {
        lines.push(line(9.0, address_line.clone()));
    }
    if !input.customer.email.is_empty() {
        lines.push(line(9.0, input.customer.email.clone()));
    }
    if !input.customer.phone.is_empty() {
        lines.push(line(9.0, input.customer.phone.clone()));
    }
    lines.push(line(9.0, ""));

    for item in &input.items {
        let total = line_amount(item);
        let mut label = item.product_name.clone();
        if !item.description.is_empty() {
            label.push_str(" - ");
            label.push_str(&item.description);
        }
        lines.push(line(
            9.0,
            format!(
                "{}  |  {} x {} {}  |  {}",
                label,
                money(item.unit_price, currency),
                item.quantity,
                item.unit_label,
                money(total, currency),
            ),
        ));
    }
    lines.push(line(9.0, ""));

    lines.push(line(
        10.0,
        format!("Subtotal: {}", money(input.totals.subtotal, currency)),
    ));
    if input.totals.discount_amount > Decimal::ZERO {
        lines.push(line(
            10.0,
            format!("Discount: -{}", money(input.totals.discount_amount, currency)),
        ));
    }
    lines.push(line(
        10.0,
        format!(
            "VAT ({:.1}%): {}",
            input.company.vat_rate * Decimal::ONE_HUNDRED,
            money(input.totals.vat_amount, currency)
        ),
    ));
    lines.push(line(
        12.0,
        format!("Total: {}", money(input.totals.grand_total, currency)),
    ));

    if !input.notes.is_empty() {
        lines.push(line(9.0, ""));
        lines.push(line(9.0, format!("Notes: {}", input.notes)));
    }
    if !input.company.footer_text.is_empty() {
        lines.push(line(9.0, ""));
        lines.push(line(8.0, input.company.footer_text.clone()));
    }

    lines
}

fn line_amount(item: &LineItem) -> Decimal {
    crate::domain::totals::round_money(
        item.unit_price.max(Decimal::ZERO) * item.quantity.max(Decimal::ZERO),
    )
}

fn escape_pdf_text(text: &str) -> String {
    text.chars()
        .flat_map(|c| match c {
            '\\' => vec!['\\', '\\'],
            '(' => vec!['\\', '('],
            ')' => vec!['\\', ')'],
            '\n' | '\r' => vec![' '],
            other => vec![other],
        })
        .collect()
}

/// Assemble a single-page A4 PDF (Helvetica only) from top-down text lines.
fn build_pdf(lines: &[TextLine]) -> Vec<u8> {
    let margin_x = 50.0_f64;
    let mut y = 812.0_f64;
    let mut content = String::new();
    for text_line in lines {
        y -= text_line.size + 5.0;
        content.push_str(&format!(
            "BT /F1 {:.1} Tf {:.1} {:.1} Td ({}) Tj ET\n",
            text_line.size,
            margin_x,
            y,
            escape_pdf_text(&text_line.text)
        ));
    }

    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 595 842] \
         /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
            .to_string(),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        format!(
            "<< /Length {} >>\nstream\n{}endstream",
            content.len(),
            content
        ),
    ];

    let mut pdf: Vec<u8> = Vec::new();
    pdf.extend_from_slice(b"%PDF-1.4\n");

    let mut offsets = Vec::with_capacity(objects.len());
    for (index, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", index + 1, body).as_bytes());
    }

    let xref_start = pdf.len();
    pdf.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    pdf.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        pdf.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    pdf.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_start
        )
        .as_bytes(),
    );

    pdf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::totals::compute_totals;
    use crate::models::{Discount, Margins};

    fn sample_input(draft: bool) -> RenderInput {
        let items = vec![LineItem {
            product_id: None,
            product_name: "Consulting (on-site)".to_string(),
            description: "Two day engagement".to_string(),
            unit_price: "100".parse().unwrap(),
            quantity: "2".parse().unwrap(),
            unit_label: "days".to_string(),
            is_taxable: true,
        }];
        let totals = compute_totals(&items, &Discount::default(), "0.1".parse().unwrap());
        RenderInput {
            quote_number: "QF-2024-007".to_string(),
            issue_date: None,
            customer: CustomerDetails {
                name: "Acme Trading".to_string(),
                ..CustomerDetails::default()
            },
            items,
            totals,
            company: CompanySnapshot {
                company_name: "QuoteForge Ltd".to_string(),
                vat_no: "BH123".to_string(),
                address: vec!["Manama".to_string()],
                footer_text: "Thank you for your business".to_string(),
                currency: "BHD".to_string(),
                vat_rate: "0.1".parse().unwrap(),
                letterhead_url: String::new(),
                margins: Margins::default(),
                numbering_prefix: "QF".to_string(),
            },
            notes: String::new(),
            draft,
        }
    }

    #[tokio::test]
    async fn rendering_is_deterministic() {
        let renderer = PdfRenderer::new();
        let input = sample_input(false);

        let first = renderer.render(&input).await.unwrap();
        let second = renderer.render(&input).await.unwrap();

        assert_eq!(first.bytes, second.bytes);
        assert_eq!(first.filename, "QF-2024-007.pdf");
    }

    #[tokio::test]
    async fn output_is_a_pdf_document() {
        let renderer = PdfRenderer::new();
        let rendered = renderer.render(&sample_input(true)).await.unwrap();

        assert!(rendered.bytes.starts_with(b"%PDF-1.4"));
        assert!(rendered.bytes.ends_with(b"%%EOF\n"));
    }

    #[test]
    fn parentheses_are_escaped_in_text() {
        assert_eq!(escape_pdf_text("a (b) \\c"), "a \\(b\\) \\\\c");
    }
}
