//! Outline parsing: raw generation-service text into ordered sections.
//!
//! The generation service is asked for bold-marked section titles followed
//! by numbered idea lists, but the contract is best-effort: the service may
//! omit titles, drop markers, or interleave prose. Parsing is therefore
//! total — it never fails, it just yields fewer (possibly zero) sections.
//!
//! Classification is an explicit per-line pass with named predicates
//! ([`title_text`], [`item_text`]) rather than inline pattern literals, so
//! each rule is testable on its own. The parser itself is a two-state
//! machine: outside any section, or inside the currently open one.

use crate::models::Section;

/// Classification of a single trimmed outline line.
#[derive(Debug, PartialEq, Eq)]
enum LineClass<'a> {
    /// Whitespace-only; neither starts nor ends a section.
    Blank,
    /// Entire line wrapped in a bold marker pair; inner text is the title.
    Title(&'a str),
    /// Leading `N. ` marker; the remainder is a discussion prompt.
    Item(&'a str),
    /// Any other non-blank line; ignored.
    Prose,
}

/// The inner text of a section-title line, if `line` is one.
///
/// A title line is the entire line wrapped in a `**`/`**` pair, e.g.
/// `**Intro (1-3 minutos)**`. The markers are not part of the title.
fn title_text(line: &str) -> Option<&str> {
    line.strip_prefix("**")?.strip_suffix("**")
}

/// The prompt text of a numbered-item line, if `line` is one.
///
/// An item line is a leading integer, a period, and a single space, e.g.
/// `3. Orígenes del proyecto`. Only the `N. ` marker is stripped; interior
/// whitespace after it is preserved.
fn item_text(line: &str) -> Option<&str> {
    let dot = line.find('.')?;
    if dot == 0 || !line.as_bytes()[..dot].iter().all(u8::is_ascii_digit) {
        return None;
    }
    line[dot + 1..].strip_prefix(' ')
}

fn classify(line: &str) -> LineClass<'_> {
    if line.is_empty() {
        LineClass::Blank
    } else if let Some(title) = title_text(line) {
        LineClass::Title(title)
    } else if let Some(item) = item_text(line) {
        LineClass::Item(item)
    } else {
        LineClass::Prose
    }
}

/// Parse raw outline text into ordered, titled sections.
///
/// Pure and total: any input yields a (possibly empty) section sequence.
/// Sections appear in file order; items keep their appearance order with
/// the numbering marker stripped. Item lines before the first title line
/// have no section to attach to and are dropped. A title with no items
/// yields a section with an empty item list.
pub fn parse_outline(text: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut open: Option<Section> = None;

    for raw in text.lines() {
        match classify(raw.trim()) {
            LineClass::Blank | LineClass::Prose => {}
            LineClass::Title(title) => {
                if let Some(done) = open.take() {
                    sections.push(done);
                }
                open = Some(Section {
                    title: title.to_string(),
                    items: Vec::new(),
                });
            }
            LineClass::Item(item) => {
                if let Some(section) = open.as_mut() {
                    section.items.push(item.to_string());
                }
            }
        }
    }

    if let Some(done) = open {
        sections.push(done);
    }
    sections
}
