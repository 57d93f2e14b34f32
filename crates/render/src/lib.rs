//! Document renderer for ReportSmith.
//!
//! Turns untrusted report text into a paginated PDF:
//!
//! 1. sanitise to the Latin-1 repertoire of the standard fonts
//! 2. classify lines (headings, bullets, labels, paragraphs)
//! 3. wrap and paginate on A4 with 15 mm margins
//! 4. write a deterministic PDF with a `Page N of M` footer
//!
//! Rendering never fails. Problems are logged as [`RenderError`]s and the
//! document degrades instead: blank text gives a placeholder page.

pub mod layout;
pub mod markup;
pub mod metrics;
pub mod pdf;
pub mod sanitize;

use reportsmith_core::error::RenderError;
use reportsmith_core::report::ReportText;
use serde::Serialize;
use tracing::{debug, warn};

/// Body of the page rendered for an empty report.
pub const PLACEHOLDER_TEXT: &str = "No content generated";

/// Title used when the caller supplies none.
const DEFAULT_TITLE: &str = "Report";

/// A finished PDF plus what the UI needs to offer it for download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedDocument {
    #[serde(skip)]
    pub bytes: Vec<u8>,
    pub pages: usize,
    pub title: String,
    pub filename: String,
}

/// Render `report` under `title` (normally the topic).
pub fn render_report(title: &str, report: &ReportText) -> RenderedDocument {
    let title = sanitize::sanitize(title.trim()).text.replace('\n', " ");
    let title = if title.trim().is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        title
    };

    let sanitized = sanitize::sanitize(report.as_str());
    if sanitized.replaced > 0 {
        warn!(
            error = %RenderError::UnsupportedCharacters { count: sanitized.replaced },
            "Report contained unsupported characters"
        );
    }

    // Decided after sanitising: zero-width and control characters vanish.
    let body = if sanitized.text.trim().is_empty() {
        warn!(error = %RenderError::EmptyReport, "Rendering placeholder document");
        PLACEHOLDER_TEXT.to_string()
    } else {
        sanitized.text
    };

    let blocks = markup::parse_blocks(&body);
    let laid_out = layout::layout(&title, &blocks);
    if laid_out.truncated {
        warn!(
            error = %RenderError::Layout(format!("report exceeds {} pages", layout::MAX_PAGES)),
            "Report truncated"
        );
    }

    let bytes = pdf::write_pdf(&laid_out, &title);
    debug!(pages = laid_out.pages.len(), bytes = bytes.len(), "Rendered document");

    RenderedDocument {
        pages: laid_out.pages.len(),
        filename: document_filename(&title),
        title,
        bytes,
    }
}

/// `report_<topic>.pdf`, with spaces as underscores and anything else that
/// is not safe in a filename replaced by `_`.
pub fn document_filename(topic: &str) -> String {
    let stem: String = topic
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if stem.is_empty() {
        "report.pdf".into()
    } else {
        format!("report_{stem}.pdf")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf_text(doc: &RenderedDocument) -> String {
        doc.bytes.iter().map(|&b| b as char).collect()
    }

    #[test]
    fn single_sentence_report() {
        let doc = render_report("Quantum Computing", &ReportText::from("Quantum computers use qubits."));
        assert_eq!(doc.pages, 1);
        assert_eq!(doc.title, "Quantum Computing");
        assert_eq!(doc.filename, "report_Quantum_Computing.pdf");
        let text = pdf_text(&doc);
        assert!(text.contains("(Quantum Computing) Tj"));
        assert!(text.contains("(Quantum computers use qubits.) Tj"));
    }

    #[test]
    fn rendering_is_idempotent() {
        let report = ReportText::from("# Intro\n- point one\n**Label**: body\n\nText (with parens).");
        let a = render_report("Vision Transformers", &report);
        let b = render_report("Vision Transformers", &report);
        assert_eq!(a.bytes, b.bytes);
    }

    #[test]
    fn empty_report_renders_placeholder_page() {
        for blank in ["", "   \n\t "] {
            let doc = render_report("Anything", &ReportText::from(blank));
            assert_eq!(doc.pages, 1);
            assert!(pdf_text(&doc).contains("(No content generated) Tj"));
        }
    }

    #[test]
    fn invisible_only_report_renders_placeholder_page() {
        for invisible in ["\u{200B}\u{FEFF}\u{7}", "\u{200D}\r\n\u{0}"] {
            let doc = render_report("Qubits", &ReportText::from(invisible));
            assert_eq!(doc.pages, 1);
            assert!(pdf_text(&doc).contains("(No content generated) Tj"));
        }
    }

    #[test]
    fn long_report_spans_pages() {
        let report = ReportText::from("Qubits exploit superposition and entanglement.\n".repeat(300));
        let doc = render_report("Qubits", &report);
        assert!(doc.pages > 1);
        assert!(pdf_text(&doc).contains(&format!("(Page {0} of {0}) Tj", doc.pages)));
    }

    #[test]
    fn unsupported_characters_are_replaced_not_fatal() {
        let doc = render_report("量子 Computing", &ReportText::from("Qubits \u{1F680} and \u{201C}gates\u{201D}"));
        let text = pdf_text(&doc);
        assert!(text.contains("(?? Computing) Tj"));
        assert!(text.contains("(Qubits ? and \"gates\") Tj"));
    }

    #[test]
    fn filenames() {
        assert_eq!(document_filename("Quantum Computing"), "report_Quantum_Computing.pdf");
        assert_eq!(document_filename("  CNN vs RNN  "), "report_CNN_vs_RNN.pdf");
        assert_eq!(document_filename("a/b:c?"), "report_a_b_c_.pdf");
        assert_eq!(document_filename(""), "report.pdf");
    }

    #[test]
    fn blank_title_gets_default() {
        let doc = render_report("  ", &ReportText::from("x"));
        assert_eq!(doc.title, "Report");
    }
}
