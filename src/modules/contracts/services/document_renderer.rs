//! Contract document rendering.
//!
//! `PdfRenderer` writes a single-page PDF 1.4 file with the standard
//! Helvetica font, so no font embedding or external tooling is needed.

use crate::core::Result;
use crate::modules::contracts::models::Contract;

/// Projects a contract into a downloadable document
pub trait DocumentRenderer: Send + Sync {
    /// MIME type of the rendered bytes
    fn content_type(&self) -> &'static str;

    /// File extension without the dot
    fn extension(&self) -> &'static str;

    fn render(&self, contract: &Contract) -> Result<Vec<u8>>;
}

const PAGE_WIDTH: u32 = 612;
const PAGE_HEIGHT: u32 = 792;
const MARGIN: u32 = 72;
const LINE_HEIGHT: u32 = 18;
const MAX_LINES: usize = 36;

#[derive(Debug, Clone, Copy, Default)]
pub struct PdfRenderer;

impl PdfRenderer {
    pub fn new() -> Self {
        Self
    }

    fn lines(contract: &Contract) -> Vec<String> {
        let mut lines = vec![
            format!("Contract ID: {}", contract.id),
            format!("Status: {}", contract.status),
        ];

        if let Some(coworker_id) = &contract.coworker_id {
            lines.push(format!("Coworker: {}", coworker_id));
        }

        match &contract.latest_value {
            Some(value) => lines.push(format!(
                "Current value: {} (recorded {})",
                value.amount,
                value.recorded_at.format("%Y-%m-%d %H:%M UTC")
            )),
            None => lines.push("Current value: none recorded".to_string()),
        }

        lines.push(format!(
            "Created: {}",
            contract.created_at.format("%Y-%m-%d %H:%M UTC")
        ));
        lines.push(format!(
            "Updated: {}",
            contract.updated_at.format("%Y-%m-%d %H:%M UTC")
        ));

        if let Some(description) = &contract.description {
            lines.push(String::new());
            lines.extend(wrap(description, 80));
        }

        lines.truncate(MAX_LINES);
        lines
    }

    fn content_stream(contract: &Contract) -> String {
        let mut stream = format!(
            "BT\n/F1 18 Tf\n{} {} Td\n{} TL\n({}) Tj\n/F1 12 Tf\nT*\n",
            MARGIN,
            PAGE_HEIGHT - MARGIN,
            LINE_HEIGHT,
            escape(&contract.title)
        );

        for line in Self::lines(contract) {
            stream.push_str(&format!("T*\n({}) Tj\n", escape(&line)));
        }

        stream.push_str("ET\n");
        stream
    }
}

impl DocumentRenderer for PdfRenderer {
    fn content_type(&self) -> &'static str {
        "application/pdf"
    }

    fn extension(&self) -> &'static str {
        "pdf"
    }

    fn render(&self, contract: &Contract) -> Result<Vec<u8>> {
        let content = Self::content_stream(contract);

        let objects = vec![
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
                 /Resources << /Font << /F1 5 0 R >> >> /Contents 4 0 R >>",
                PAGE_WIDTH, PAGE_HEIGHT
            ),
            format!(
                "<< /Length {} >>\nstream\n{}endstream",
                content.len(),
                content
            ),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_string(),
        ];

        let mut out: Vec<u8> = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());

        for (idx, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", idx + 1, body).as_bytes());
        }

        let xref_offset = out.len();
        out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
        out.extend_from_slice(b"0000000000 65535 f \n");
        for offset in offsets {
            out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
        }
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
                objects.len() + 1,
                xref_offset
            )
            .as_bytes(),
        );

        Ok(out)
    }
}

/// Escape a PDF string literal; non-ASCII characters become '?'
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '(' => escaped.push_str("\\("),
            ')' => escaped.push_str("\\)"),
            '\n' | '\r' | '\t' => escaped.push(' '),
            c if c.is_ascii() && !c.is_ascii_control() => escaped.push(c),
            _ => escaped.push('?'),
        }
    }
    escaped
}

/// Greedy word wrap at `width` characters
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}
