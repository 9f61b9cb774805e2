//! Plain-text rendering and clipboard copy.
//!
//! The clipboard rendering works on the raw outline text, not the parsed
//! sections, so nothing the service produced is lost: bold markers are
//! stripped in place, numbered list markers become a uniform bullet, and
//! the result is trimmed.

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use tracing::{info, instrument};

use crate::models::Section;

static BOLD_PAIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid bold pattern"));
static LIST_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*\d+\.\s").expect("valid list-marker pattern"));

/// Render raw outline text as clipboard-ready plain text.
///
/// Pure: bold marker pairs are removed (inner text kept), leading `N. `
/// markers become `• `, and surrounding whitespace is trimmed. Applying
/// the function to its own output changes nothing further — there are no
/// markers left to rewrite.
pub fn to_plain_text(outline: &str) -> String {
    let without_bold = BOLD_PAIR.replace_all(outline, "$1");
    LIST_MARKER
        .replace_all(&without_bold, "• ")
        .trim()
        .to_string()
}

/// Render parsed sections for the terminal result panel.
///
/// One block per section: the title followed by its bulleted items. A
/// section with no items renders as a bare title.
pub fn render_sections(sections: &[Section]) -> String {
    sections
        .iter()
        .map(|section| {
            let mut block = section.title.clone();
            for item in &section.items {
                block.push_str("\n  · ");
                block.push_str(item);
            }
            block
        })
        .join("\n\n")
}

/// Put the plain-text rendering of an outline on the system clipboard.
///
/// # Errors
///
/// Fails when no clipboard is available (e.g. a headless session) or the
/// write is rejected; the caller surfaces the failure as a user-visible
/// alert.
#[instrument(level = "info", skip_all)]
pub fn copy_outline(outline: &str) -> Result<(), Box<dyn Error>> {
    let rendered = to_plain_text(outline);
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(rendered)?;
    info!("Outline copied to clipboard");
    Ok(())
}
