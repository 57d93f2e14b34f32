//! Minimal PDF 1.4 writer.
//!
//! Emits only what a text document needs: one catalog, one page tree, the
//! two standard Helvetica faces and an uncompressed content stream per page.
//! There are no timestamps and no document ID, so equal input produces equal
//! bytes.

use std::fmt::Write as _;
use crate::layout::{Layout, MARGIN, PAGE_HEIGHT, PAGE_WIDTH, TextLine};
use crate::metrics::Font;

const PRODUCER: &str = "ReportSmith";
const FOOTER_SIZE: f32 = 9.0;

/// Serialise a laid-out document. `title` goes into the info dictionary.
pub fn write_pdf(layout: &Layout, title: &str) -> Vec<u8> {
    let mut writer = PdfWriter::new();
    let page_count = layout.pages.len();

    // Fixed object numbers: 1 catalog, 2 page tree, 3-4 fonts, 5 info.
    // Each page then takes two objects: the page and its content stream.
    let page_ids: Vec<usize> = (0..page_count).map(|i| 6 + 2 * i).collect();

    writer.object(1, b"<< /Type /Catalog /Pages 2 0 R >>");

    let kids = page_ids
        .iter()
        .map(|id| format!("{id} 0 R"))
        .collect::<Vec<_>>()
        .join(" ");
    writer.object(
        2,
        format!("<< /Type /Pages /Kids [{kids}] /Count {page_count} >>").as_bytes(),
    );

    for (id, font) in [(3, Font::Regular), (4, Font::Bold)] {
        writer.object(
            id,
            format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                font.base_font()
            )
            .as_bytes(),
        );
    }

    let mut info = b"<< /Title ".to_vec();
    info.extend(string_literal(title));
    info.extend(b" /Producer ");
    info.extend(string_literal(PRODUCER));
    info.extend(b" >>");
    writer.object(5, &info);

    for (index, page) in layout.pages.iter().enumerate() {
        let page_id = page_ids[index];
        let content_id = page_id + 1;

        writer.object(
            page_id,
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
                 /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {content_id} 0 R >>",
                number(PAGE_WIDTH),
                number(PAGE_HEIGHT)
            )
            .as_bytes(),
        );

        let mut stream = Vec::new();
        for line in &page.lines {
            text_op(&mut stream, line);
        }
        text_op(&mut stream, &footer(index + 1, page_count));

        let mut content = format!("<< /Length {} >>\nstream\n", stream.len()).into_bytes();
        content.extend(stream);
        content.extend(b"\nendstream");
        writer.object(content_id, &content);
    }

    writer.finish(1, 5)
}

fn footer(page: usize, total: usize) -> TextLine {
    let text = format!("Page {page} of {total}");
    let width = Font::Regular.text_width(&text, FOOTER_SIZE);
    TextLine {
        font: Font::Regular,
        size: FOOTER_SIZE,
        x: (PAGE_WIDTH - width) / 2.0,
        baseline: PAGE_HEIGHT - MARGIN / 2.0,
        text,
    }
}

/// `BT /F1 12 Tf x y Td (text) Tj ET`, flipping y into PDF space.
fn text_op(out: &mut Vec<u8>, line: &TextLine) {
    let mut head = String::new();
    let _ = write!(
        head,
        "BT /{} {} Tf {} {} Td ",
        line.font.resource(),
        number(line.size),
        number(line.x),
        number(PAGE_HEIGHT - line.baseline)
    );
    out.extend(head.as_bytes());
    out.extend(string_literal(&line.text));
    out.extend(b" Tj ET\n");
}

/// Encode `text` as a PDF literal string in WinAnsi bytes.
///
/// Callers pass sanitised text; anything outside Latin-1 is written as `?`.
fn string_literal(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() + 2);
    out.push(b'(');
    for c in text.chars() {
        let byte = u8::try_from(u32::from(c)).unwrap_or(b'?');
        if matches!(byte, b'(' | b')' | b'\\') {
            out.push(b'\\');
        }
        out.push(byte);
    }
    out.push(b')');
    out
}

/// Fixed two-decimal formatting with trailing zeros trimmed.
fn number(value: f32) -> String {
    let formatted = format!("{value:.2}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".into()
    } else {
        trimmed.to_string()
    }
}

/// Accumulates objects and their byte offsets for the xref table.
struct PdfWriter {
    buf: Vec<u8>,
    offsets: Vec<(usize, usize)>,
}

impl PdfWriter {
    fn new() -> Self {
        // The binary comment marks the file as 8-bit for transfer tools.
        let mut buf = b"%PDF-1.4\n%".to_vec();
        buf.extend([0xE2, 0xE3, 0xCF, 0xD3]);
        buf.push(b'\n');
        Self {
            buf,
            offsets: Vec::new(),
        }
    }

    fn object(&mut self, id: usize, body: &[u8]) {
        self.offsets.push((id, self.buf.len()));
        self.buf.extend(format!("{id} 0 obj\n").as_bytes());
        self.buf.extend(body);
        self.buf.extend(b"\nendobj\n");
    }

    fn finish(mut self, root: usize, info: usize) -> Vec<u8> {
        self.offsets.sort_unstable();
        let size = self.offsets.len() + 1;
        let xref_offset = self.buf.len();

        let mut xref = format!("xref\n0 {size}\n0000000000 65535 f \n");
        for (_, offset) in &self.offsets {
            let _ = writeln!(xref, "{offset:010} 00000 n ");
        }
        let _ = write!(
            xref,
            "trailer\n<< /Size {size} /Root {root} 0 R /Info {info} 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n"
        );

        self.buf.extend(xref.as_bytes());
        self.buf
    }
}
