//! Line classification for model-written markdown.
//!
//! Models answer in loose markdown. Only the structure that survives in a
//! plain document is recognised: headings, bullets, bold labels and blank
//! lines. Everything else is a paragraph with `**` markers removed.

/// One source line, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Vertical space
    Blank,
    Heading(String),
    Bullet(String),
    /// `**Label** rest`; the label carries a trailing `:` when a body follows
    Label {
        label: String,
        body: Option<String>,
        bullet: bool,
    },
    Paragraph(String),
}

/// Classify every line of `text`.
pub fn parse_blocks(text: &str) -> Vec<Block> {
    text.lines().map(classify_line).collect()
}

fn classify_line(raw: &str) -> Block {
    let line = raw.trim();
    if line.is_empty() {
        return Block::Blank;
    }

    if let Some(heading) = atx_heading(line) {
        return Block::Heading(strip_bold(heading));
    }

    let (bullet, line) = match line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        Some(rest) => (true, rest.trim()),
        None => (false, line),
    };

    if !bullet && let Some(inner) = whole_bold(line) {
        return Block::Heading(inner.trim().to_string());
    }

    if let Some((label, rest)) = leading_bold(line) {
        let body = rest.trim_start_matches([' ', ':']).trim();
        let label = label.trim();
        return if body.is_empty() {
            Block::Label {
                label: strip_bold(label),
                body: None,
                bullet,
            }
        } else {
            Block::Label {
                label: format!("{}:", label.trim_end_matches(':').trim_end()),
                body: Some(strip_bold(body)),
                bullet,
            }
        };
    }

    if bullet {
        Block::Bullet(strip_bold(line))
    } else {
        Block::Paragraph(strip_bold(line))
    }
}

/// `# Title` through `###### Title`.
fn atx_heading(line: &str) -> Option<&str> {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let rest = &line[hashes..];
    if rest.is_empty() {
        return None;
    }
    rest.strip_prefix(' ').map(str::trim).filter(|s| !s.is_empty())
}

/// `**text**` spanning the whole line.
fn whole_bold(line: &str) -> Option<&str> {
    let inner = line.strip_prefix("**")?.strip_suffix("**")?;
    (!inner.trim().is_empty()).then_some(inner)
}

/// `**label**rest`, splitting at the first closing marker.
fn leading_bold(line: &str) -> Option<(&str, &str)> {
    let after_open = line.strip_prefix("**")?;
    let close = after_open.find("**")?;
    if close == 0 {
        return None;
    }
    Some((&after_open[..close], &after_open[close + 2..]))
}

/// Remove `**bold**` markers, keeping the enclosed text.
pub fn strip_bold(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find("**") {
        let after_open = &rest[open + 2..];
        match after_open.find("**") {
            Some(close) if close > 0 => {
                out.push_str(&rest[..open]);
                out.push_str(&after_open[..close]);
                rest = &after_open[close + 2..];
            }
            _ => break,
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines() {
        assert_eq!(parse_blocks("a\n\n  \nb").len(), 4);
        assert_eq!(parse_blocks("a\n   \nb")[1], Block::Blank);
    }

    #[test]
    fn bold_line_is_heading() {
        assert_eq!(
            parse_blocks("**Introduction**"),
            vec![Block::Heading("Introduction".into())]
        );
    }

    #[test]
    fn hash_line_is_heading() {
        assert_eq!(
            parse_blocks("## Main Sections"),
            vec![Block::Heading("Main Sections".into())]
        );
        assert_eq!(
            parse_blocks("# **Quantum Computing**"),
            vec![Block::Heading("Quantum Computing".into())]
        );
        assert_eq!(
            parse_blocks("#hashtag"),
            vec![Block::Paragraph("#hashtag".into())]
        );
    }

    #[test]
    fn bullets() {
        assert_eq!(
            parse_blocks("- Qubits\n* Gates are **reversible**"),
            vec![
                Block::Bullet("Qubits".into()),
                Block::Bullet("Gates are reversible".into()),
            ]
        );
    }

    #[test]
    fn bold_bullet_is_a_label_not_a_heading() {
        assert_eq!(
            parse_blocks("- **Superposition**"),
            vec![Block::Label {
                label: "Superposition".into(),
                body: None,
                bullet: true,
            }]
        );
    }

    #[test]
    fn label_with_body_gets_colon() {
        assert_eq!(
            parse_blocks("**Definition**: a qubit is a **two-level** system"),
            vec![Block::Label {
                label: "Definition:".into(),
                body: Some("a qubit is a two-level system".into()),
                bullet: false,
            }]
        );
        assert_eq!(
            parse_blocks("- **Entanglement:** correlated states"),
            vec![Block::Label {
                label: "Entanglement:".into(),
                body: Some("correlated states".into()),
                bullet: true,
            }]
        );
    }

    #[test]
    fn paragraphs_lose_bold_markers() {
        assert_eq!(
            parse_blocks("Quantum computers use **qubits**."),
            vec![Block::Paragraph("Quantum computers use qubits.".into())]
        );
    }

    #[test]
    fn strip_bold_leaves_unpaired_markers() {
        assert_eq!(strip_bold("a **b** c **d"), "a b c **d");
        assert_eq!(strip_bold("****"), "****");
    }
}
