//! Utility functions for filename slugs, string manipulation, and file system checks.
//!
//! This module provides helper functions used throughout the application:
//! - Title slugification for deterministic export filenames
//! - String truncation for logging long LLM responses
//! - File system validation for the output directory

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

/// Fallback slug used when a title contains no usable characters.
const DEFAULT_SLUG: &str = "podcast";

static NON_ALNUM_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid slug pattern"));

/// Convert an episode title to a filename-safe slug.
///
/// Lower-cases the title and collapses every run of characters outside
/// `a-z0-9` into a single underscore, trimming underscores from both ends.
/// Accented and other non-ASCII letters are treated as separators so the
/// result is always plain ASCII.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(slugify_title("¡Hola, Mundo!"), "hola_mundo");
/// assert_eq!(slugify_title("!!!"), "");
/// ```
pub fn slugify_title(title: &str) -> String {
    let lowered = title.to_lowercase();
    NON_ALNUM_RUN
        .replace_all(&lowered, "_")
        .trim_matches('_')
        .to_string()
}

/// Deterministic PDF filename for an episode title.
///
/// Produces `pauta_<slug>.pdf`, or `pauta_podcast.pdf` when the title
/// slugs to empty.
pub fn pdf_filename(episode_title: &str) -> String {
    format!("pauta_{}.pdf", non_empty_slug(episode_title))
}

/// Deterministic JSON filename for an episode title.
///
/// Same slug rules as [`pdf_filename`], with a `.json` extension.
pub fn json_filename(episode_title: &str) -> String {
    format!("pauta_{}.json", non_empty_slug(episode_title))
}

fn non_empty_slug(title: &str) -> String {
    let slug = slugify_title(title);
    if slug.is_empty() {
        DEFAULT_SLUG.to_string()
    } else {
        slug
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to `max` bytes with an ellipsis and byte
/// count indicator appended. Used when logging raw outline text previews.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut cut = max;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
    }
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then performs a write test
/// by creating and immediately deleting a probe file. Run at startup so
/// export failures surface before the user fills the form.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or is not writable
/// (permission denied, read-only filesystem, etc.).
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(path).await {
        return Err(Box::new(e));
    }
    // Try a small sync write using std fs (simpler error surface)
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_title() {
        assert_eq!(slugify_title("Hola Mundo"), "hola_mundo");
        assert_eq!(slugify_title("¡Hola, Mundo!"), "hola_mundo");
        assert_eq!(slugify_title("Multiple   Spaces"), "multiple_spaces");
        assert_eq!(slugify_title("Diseñar sin permiso"), "dise_ar_sin_permiso");
        assert_eq!(slugify_title("ya-es-slug"), "ya_es_slug");
        assert_eq!(slugify_title("!!!"), "");
        assert_eq!(slugify_title(""), "");
    }

    #[test]
    fn test_pdf_filename_matches_contract() {
        let re = Regex::new(r"^pauta_[a-z0-9_]+\.pdf$").unwrap();
        assert!(re.is_match(&pdf_filename("¡Hola, Mundo!")));
        assert!(re.is_match(&pdf_filename("Episodio 12: El Hit")));
        assert_eq!(pdf_filename("¡Hola, Mundo!"), "pauta_hola_mundo.pdf");
    }

    #[test]
    fn test_empty_title_falls_back_to_default() {
        assert_eq!(pdf_filename(""), "pauta_podcast.pdf");
        assert_eq!(pdf_filename("¿¡!?"), "pauta_podcast.pdf");
        assert_eq!(json_filename(""), "pauta_podcast.json");
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hola, mundo!";
        assert_eq!(truncate_for_log(s, 100), "Hola, mundo!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundaries() {
        // "é" is two bytes; cutting at 1 would split it.
        let result = truncate_for_log("éxito", 1);
        assert!(result.starts_with('…') || !result.is_empty());
    }
}
