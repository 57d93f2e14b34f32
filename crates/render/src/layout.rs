//! Line wrapping and pagination.
//!
//! All coordinates are in points, measured from the top-left corner of an
//! A4 page. The PDF writer flips them into PDF user space.

use crate::markup::Block;
use crate::metrics::Font;

pub const PAGE_WIDTH: f32 = 595.0;
pub const PAGE_HEIGHT: f32 = 842.0;
/// 15 mm on every side.
pub const MARGIN: f32 = 42.5;
pub const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

/// Hard cap on document length; text beyond it is dropped.
pub const MAX_PAGES: usize = 500;

const MM: f32 = 72.0 / 25.4;

/// Font, size and line height for one kind of text.
#[derive(Debug, Clone, Copy)]
pub struct Style {
    pub font: Font,
    pub size: f32,
    pub line_height: f32,
}

pub const TITLE: Style = Style {
    font: Font::Bold,
    size: 16.0,
    line_height: 10.0 * MM,
};
pub const HEADING: Style = Style {
    font: Font::Bold,
    size: 14.0,
    line_height: 8.0 * MM,
};
pub const BODY: Style = Style {
    font: Font::Regular,
    size: 12.0,
    line_height: 6.0 * MM,
};
pub const LABEL: Style = Style {
    font: Font::Bold,
    ..BODY
};

const BULLET_PREFIX: &str = "- ";
const LABEL_BODY_INDENT: f32 = 4.0 * MM;

/// One positioned line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub font: Font,
    pub size: f32,
    pub x: f32,
    /// Distance of the baseline from the top of the page
    pub baseline: f32,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub lines: Vec<TextLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub pages: Vec<Page>,
    /// True when content was dropped at [`MAX_PAGES`]
    pub truncated: bool,
}

/// Lay out a titled document.
pub fn layout(title: &str, blocks: &[Block]) -> Layout {
    let mut cursor = Cursor::new();

    cursor.paragraph(TITLE, 0.0, "", title);
    cursor.gap(4.0 * MM);

    for block in blocks {
        match block {
            Block::Blank => cursor.gap(3.0 * MM),
            Block::Heading(text) => {
                cursor.gap(2.0 * MM);
                cursor.paragraph(HEADING, 0.0, "", text);
                cursor.gap(1.0 * MM);
            }
            Block::Paragraph(text) => {
                cursor.paragraph(BODY, 0.0, "", text);
                cursor.gap(1.0 * MM);
            }
            Block::Bullet(text) => {
                cursor.paragraph(BODY, 0.0, BULLET_PREFIX, text);
                cursor.gap(0.5 * MM);
            }
            Block::Label {
                label,
                body,
                bullet,
            } => {
                let prefix = if *bullet { BULLET_PREFIX } else { "" };
                cursor.paragraph(LABEL, 0.0, prefix, label);
                if let Some(body) = body {
                    let indent = if *bullet { LABEL_BODY_INDENT } else { 0.0 };
                    cursor.paragraph(BODY, indent, "", body);
                }
                cursor.gap(0.5 * MM);
            }
        }
    }

    cursor.finish()
}

struct Cursor {
    pages: Vec<Page>,
    y: f32,
    truncated: bool,
}

impl Cursor {
    fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            y: MARGIN,
            truncated: false,
        }
    }

    fn gap(&mut self, height: f32) {
        self.y += height;
    }

    /// Wrap `text` and place it line by line. `prefix` is printed before the
    /// first line; continuation lines hang under the text after it.
    fn paragraph(&mut self, style: Style, indent: f32, prefix: &str, text: &str) {
        let prefix_width = style.font.text_width(prefix, style.size);
        let width = CONTENT_WIDTH - indent - prefix_width;

        for (i, line) in wrap(text, style.font, style.size, width).into_iter().enumerate() {
            let (x, text) = if i == 0 && !prefix.is_empty() {
                (MARGIN + indent, format!("{prefix}{line}"))
            } else {
                (MARGIN + indent + prefix_width, line)
            };
            self.place(style, x, text);
        }
    }

    fn place(&mut self, style: Style, x: f32, text: String) {
        if self.truncated {
            return;
        }

        if self.y + style.line_height > PAGE_HEIGHT - MARGIN {
            if self.pages.len() >= MAX_PAGES {
                self.truncated = true;
                return;
            }
            self.pages.push(Page::default());
            self.y = MARGIN;
        }

        // Vertically centred in the cell, as fpdf places cell text.
        let baseline = self.y + 0.5 * style.line_height + 0.3 * style.size;
        if let Some(page) = self.pages.last_mut() {
            page.lines.push(TextLine {
                font: style.font,
                size: style.size,
                x,
                baseline,
                text,
            });
        }
        self.y += style.line_height;
    }

    fn finish(self) -> Layout {
        Layout {
            pages: self.pages,
            truncated: self.truncated,
        }
    }
}

/// Break `text` into lines no wider than `max_width` points.
///
/// Breaks on whitespace; a word wider than a whole line is split between
/// characters. Always returns at least one line.
pub fn wrap(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let space = font.text_width(" ", size);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0;

    for word in text.split_whitespace() {
        let word_width = font.text_width(word, size);

        if !current.is_empty() && current_width + space + word_width <= max_width {
            current.push(' ');
            current.push_str(word);
            current_width += space + word_width;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0.0;
        }

        if word_width <= max_width {
            current.push_str(word);
            current_width = word_width;
            continue;
        }

        for c in word.chars() {
            let w = font.text_width(c.encode_utf8(&mut [0; 4]), size);
            if !current.is_empty() && current_width + w > max_width {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
            }
            current.push(c);
            current_width += w;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
