//! Glyph widths for the two standard fonts the renderer uses.
//!
//! Widths are in thousandths of the font size, taken from the Adobe Core14
//! AFM files for the WinAnsi code points.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    /// PostScript base font name.
    pub fn base_font(self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
        }
    }

    /// Resource name used inside content streams.
    pub fn resource(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }

    /// Width of one character in thousandths of an em.
    pub fn glyph_width(self, c: char) -> u16 {
        let table = match self {
            Font::Regular => &HELVETICA,
            Font::Bold => &HELVETICA_BOLD,
        };
        match c {
            ' '..='~' => table[c as usize - 0x20],
            _ => match fold_latin1(c) {
                Some(base) => table[base as usize - 0x20],
                None => self.latin1_symbol_width(c),
            },
        }
    }

    /// Width of `text` in points at `size`.
    pub fn text_width(self, text: &str, size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| u32::from(self.glyph_width(c))).sum();
        units as f32 * size / 1000.0
    }

    fn latin1_symbol_width(self, c: char) -> u16 {
        match (self, c) {
            (_, '\u{C6}') => 1000,
            (_, '\u{E6}') => 889,
            (_, '\u{DF}') => 611,
            (_, '\u{D7}' | '\u{F7}' | '\u{B1}' | '\u{AC}') => 584,
            (_, '\u{A9}' | '\u{AE}') => 737,
            (_, '\u{B0}') => 400,
            (_, '\u{B5}') => 611,
            (_, '\u{BC}' | '\u{BD}' | '\u{BE}') => 834,
            (Font::Regular, '\u{A1}' | '\u{A6}') => 278,
            (Font::Bold, '\u{A1}') => 333,
            (Font::Bold, '\u{A6}') => 280,
            (_, '\u{A2}' | '\u{A3}' | '\u{A4}' | '\u{A5}' | '\u{A7}' | '\u{B6}') => 556,
            (_, '\u{AB}' | '\u{BB}') => 556,
            (_, '\u{B2}' | '\u{B3}' | '\u{B9}') => 333,
            (_, '\u{AA}') => 370,
            (_, '\u{BA}') => 365,
            (_, '\u{B7}') => 278,
            (_, '\u{BF}') => 611,
            _ => 611,
        }
    }
}

/// Map accented Latin-1 letters to the ASCII letter with the same advance.
fn fold_latin1(c: char) -> Option<char> {
    let base = match c {
        'À'..='Å' => 'A',
        'Ç' => 'C',
        'È'..='Ë' => 'E',
        'Ì'..='Ï' => 'I',
        'Ð' => 'D',
        'Ñ' => 'N',
        'Ò'..='Ö' | 'Ø' => 'O',
        'Ù'..='Ü' => 'U',
        'Ý' => 'Y',
        'Þ' => 'P',
        'à'..='å' => 'a',
        'ç' => 'c',
        'è'..='ë' => 'e',
        // Accented i has the advance of 't', not of 'i'.
        'ì'..='ï' => 't',
        'ð' | 'ò'..='ö' | 'ø' => 'o',
        'ñ' => 'n',
        'ù'..='ü' => 'u',
        'ý' | 'ÿ' => 'y',
        'þ' => 'p',
        _ => return None,
    };
    Some(base)
}

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_widths() {
        assert_eq!(Font::Regular.glyph_width(' '), 278);
        assert_eq!(Font::Regular.glyph_width('W'), 944);
        assert_eq!(Font::Regular.glyph_width('i'), 222);
        assert_eq!(Font::Regular.glyph_width('~'), 584);
        assert_eq!(Font::Bold.glyph_width('i'), 278);
        assert_eq!(Font::Bold.glyph_width('@'), 975);
    }

    #[test]
    fn accented_letters_use_base_width() {
        assert_eq!(Font::Regular.glyph_width('é'), Font::Regular.glyph_width('e'));
        assert_eq!(Font::Bold.glyph_width('Ñ'), Font::Bold.glyph_width('N'));
    }

    #[test]
    fn bold_is_never_narrower_for_lowercase() {
        for c in 'a'..='z' {
            assert!(Font::Bold.glyph_width(c) >= Font::Regular.glyph_width(c), "{c}");
        }
    }

    #[test]
    fn text_width_scales_with_size() {
        let w12 = Font::Regular.text_width("Qubits", 12.0);
        let w24 = Font::Regular.text_width("Qubits", 24.0);
        assert!((w24 - 2.0 * w12).abs() < 0.001);
    }
}
