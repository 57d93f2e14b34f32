//! Text sanitisation for the standard PDF fonts.
//!
//! Helvetica with WinAnsiEncoding covers Latin-1. Typographic characters
//! models like to emit are folded to ASCII first; anything else outside
//! Latin-1 becomes `?`.

/// Replacement for characters the document encoding cannot represent.
pub const PLACEHOLDER_CHAR: char = '?';

/// Result of sanitising a piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sanitized {
    pub text: String,
    /// Characters replaced by [`PLACEHOLDER_CHAR`]
    pub replaced: usize,
}

/// Make `input` printable with the document fonts.
///
/// Line breaks are kept; tabs become four spaces; other control characters
/// are dropped.
pub fn sanitize(input: &str) -> Sanitized {
    let mut text = String::with_capacity(input.len());
    let mut replaced = 0;

    for c in input.chars() {
        if let Some(folded) = fold_typographic(c) {
            text.push_str(folded);
            continue;
        }
        match c {
            '\n' => text.push('\n'),
            '\t' => text.push_str("    "),
            '\r' => {}
            c if c.is_control() => {}
            c if is_encodable(c) => text.push(c),
            _ => {
                text.push(PLACEHOLDER_CHAR);
                replaced += 1;
            }
        }
    }

    Sanitized { text, replaced }
}

/// Printable ASCII or the printable upper half of Latin-1.
pub fn is_encodable(c: char) -> bool {
    matches!(c, ' '..='~' | '\u{A1}'..='\u{FF}')
}

fn fold_typographic(c: char) -> Option<&'static str> {
    let folded = match c {
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{2032}' => "'",
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => "\"",
        '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2212}' => "-",
        '\u{2014}' | '\u{2015}' => "--",
        '\u{2026}' => "...",
        '\u{2022}' | '\u{2023}' | '\u{25CF}' | '\u{25E6}' | '\u{2043}' => "-",
        '\u{00A0}' | '\u{2002}' | '\u{2003}' | '\u{2009}' | '\u{202F}' => " ",
        '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{FEFF}' | '\u{00AD}' => "",
        '\u{2192}' => "->",
        '\u{2190}' => "<-",
        '\u{2264}' => "<=",
        '\u{2265}' => ">=",
        '\u{2260}' => "!=",
        '\u{2248}' => "~",
        '\u{2122}' => "(TM)",
        '\u{20AC}' => "EUR",
        '\u{2713}' | '\u{2714}' => "v",
        _ => return None,
    };
    Some(folded)
}
