//! PDF document rendering for a parsed outline.
//!
//! Builds an A4 document with the episode title, the fixed subtitle
//! caption, and one block per section (bold heading, bulleted items),
//! adding pages whenever the cursor would cross the bottom margin. The
//! built-in Helvetica faces carry no width tables, so wrapping and
//! centering work from an average-glyph estimate; the layout is
//! deliberately simple rather than pixel-exact.

use chrono::Local;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Rgb,
};
use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::{info, instrument};

use crate::models::Section;
use crate::utils::pdf_filename;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 18.0;
const CONTENT_WIDTH_MM: f32 = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
const BULLET_INDENT_MM: f32 = 7.0;

const TITLE_PT: f32 = 22.0;
const SUBTITLE_PT: f32 = 12.0;
const HEADING_PT: f32 = 16.0;
const ITEM_PT: f32 = 11.0;
const FOOTER_PT: f32 = 9.0;

const PT_TO_MM: f32 = 0.3528;
const LINE_SPACING: f32 = 1.4;
// Average Helvetica glyph advance, as a fraction of the font size.
const AVG_GLYPH_EM: f32 = 0.5;

const SUBTITLE: &str = "Una pauta para encender la conversación.";

/// Render a parsed outline as a PDF in `output_dir`.
///
/// The filename is `pauta_<slug>.pdf` derived from the episode title.
/// Returns the written path.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the document
/// cannot be built or saved; the caller logs and reports it without
/// aborting the wizard.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir, sections = sections.len()))]
pub fn write_outline_pdf(
    episode_title: &str,
    sections: &[Section],
    output_dir: &str,
) -> Result<String, Box<dyn Error>> {
    std::fs::create_dir_all(output_dir)?;

    let (doc, page, layer) = PdfDocument::new(
        format!("Pauta: {episode_title}"),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "contenido",
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| format!("no se pudo cargar la fuente: {e}"))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| format!("no se pudo cargar la fuente: {e}"))?;

    let mut cursor = Cursor {
        doc: &doc,
        layer: doc.get_page(page).get_layer(layer),
        y: PAGE_HEIGHT_MM - MARGIN_MM,
    };

    // Main title, centered and quoted, like the on-screen card.
    cursor.set_gray(0.0);
    for line in wrap_text(&format!("\"{episode_title}\""), TITLE_PT, CONTENT_WIDTH_MM) {
        cursor.centered_line(&line, TITLE_PT, &bold);
    }
    cursor.space(4.0);

    cursor.set_gray(0.5);
    cursor.centered_line(SUBTITLE, SUBTITLE_PT, &regular);
    cursor.space(10.0);

    for section in sections {
        cursor.set_gray(0.0);
        for line in wrap_text(&section.title, HEADING_PT, CONTENT_WIDTH_MM) {
            cursor.line(&line, HEADING_PT, MARGIN_MM, &bold);
        }
        cursor.space(2.0);

        for item in &section.items {
            let wrapped = wrap_text(
                item.trim(),
                ITEM_PT,
                CONTENT_WIDTH_MM - BULLET_INDENT_MM,
            );
            for (i, line) in wrapped.iter().enumerate() {
                if i == 0 {
                    cursor.bullet_line(line, ITEM_PT, &regular);
                } else {
                    cursor.line(line, ITEM_PT, MARGIN_MM + BULLET_INDENT_MM, &regular);
                }
            }
            cursor.space(2.0);
        }

        cursor.space(6.0);
    }

    cursor.set_gray(0.5);
    let generated = Local::now().date_naive();
    cursor.line(
        &format!("Generada el {generated} — Alta Voz, Escuela de Diseño"),
        FOOTER_PT,
        MARGIN_MM,
        &regular,
    );

    let filename = pdf_filename(episode_title);
    let path = Path::new(output_dir).join(&filename);
    let file = File::create(&path)?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| format!("no se pudo guardar el PDF: {e}"))?;

    let path = path.to_string_lossy().to_string();
    info!(path = %path, "Wrote outline PDF");
    Ok(path)
}

/// Write position on the current page, with page-break handling.
struct Cursor<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
}

impl Cursor<'_> {
    fn ensure_room(&mut self, needed: f32) {
        if self.y - needed < MARGIN_MM {
            let (page, layer) = self
                .doc
                .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "contenido");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT_MM - MARGIN_MM;
        }
    }

    fn set_gray(&self, level: f32) {
        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(level, level, level, None)));
    }

    fn line(&mut self, text: &str, size_pt: f32, x: f32, font: &IndirectFontRef) {
        let height = line_height(size_pt);
        self.ensure_room(height);
        self.layer
            .use_text(text.to_string(), size_pt, Mm(x), Mm(self.y), font);
        self.y -= height;
    }

    fn centered_line(&mut self, text: &str, size_pt: f32, font: &IndirectFontRef) {
        let width = approx_width(text, size_pt);
        let x = ((PAGE_WIDTH_MM - width) / 2.0).max(MARGIN_MM);
        self.line(text, size_pt, x, font);
    }

    fn bullet_line(&mut self, text: &str, size_pt: f32, font: &IndirectFontRef) {
        let height = line_height(size_pt);
        self.ensure_room(height);
        self.layer
            .use_text("•".to_string(), size_pt, Mm(MARGIN_MM), Mm(self.y), font);
        self.layer.use_text(
            text.to_string(),
            size_pt,
            Mm(MARGIN_MM + BULLET_INDENT_MM),
            Mm(self.y),
            font,
        );
        self.y -= height;
    }

    fn space(&mut self, mm: f32) {
        self.y -= mm;
    }
}

fn line_height(size_pt: f32) -> f32 {
    size_pt * PT_TO_MM * LINE_SPACING
}

fn approx_width(text: &str, size_pt: f32) -> f32 {
    text.chars().count() as f32 * size_pt * PT_TO_MM * AVG_GLYPH_EM
}

/// Greedy word wrap against the estimated glyph width.
///
/// A single word longer than the budget gets its own line rather than
/// being split mid-word.
fn wrap_text(text: &str, size_pt: f32, width_mm: f32) -> Vec<String> {
    let max_chars = ((width_mm / (size_pt * PT_TO_MM * AVG_GLYPH_EM)) as usize).max(8);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for word in text.split_whitespace() {
        let word_chars = word.chars().count();
        if current_chars == 0 {
            current.push_str(word);
            current_chars = word_chars;
        } else if current_chars + 1 + word_chars <= max_chars {
            current.push(' ');
            current.push_str(word);
            current_chars += 1 + word_chars;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_chars = word_chars;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_short_line_is_untouched() {
        let lines = wrap_text("Saludo inicial", ITEM_PT, CONTENT_WIDTH_MM);
        assert_eq!(lines, vec!["Saludo inicial"]);
    }

    #[test]
    fn test_wrap_text_splits_on_word_boundaries() {
        let long = "palabra ".repeat(40);
        let lines = wrap_text(&long, ITEM_PT, CONTENT_WIDTH_MM);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(!line.starts_with(' ') && !line.ends_with(' '));
            assert!(line.split_whitespace().all(|w| w == "palabra"));
        }
    }

    #[test]
    fn test_wrap_text_oversized_word_gets_own_line() {
        let word = "a".repeat(300);
        let lines = wrap_text(&format!("corta {word} corta"), ITEM_PT, CONTENT_WIDTH_MM);
        assert!(lines.contains(&word));
    }

    #[test]
    fn test_wrap_text_empty_input_yields_one_empty_line() {
        assert_eq!(wrap_text("", TITLE_PT, CONTENT_WIDTH_MM), vec![""]);
    }

    #[test]
    fn test_write_outline_pdf_produces_a_pdf_file() {
        let dir = std::env::temp_dir().join("altavoz_pdf_test");
        let dir = dir.to_string_lossy().to_string();

        let sections = vec![
            Section {
                title: "Intro (1-3 minutos)".to_string(),
                items: vec![
                    "Saludo inicial".to_string(),
                    "Presentación del anfitrión".to_string(),
                ],
            },
            Section {
                title: "Sección vacía".to_string(),
                items: vec![],
            },
        ];

        let path = write_outline_pdf("¡Hola, Mundo!", &sections, &dir).unwrap();
        assert!(path.ends_with("pauta_hola_mundo.pdf"));

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_many_items_do_not_fail_on_page_breaks() {
        let dir = std::env::temp_dir().join("altavoz_pdf_test_pages");
        let dir = dir.to_string_lossy().to_string();

        let sections: Vec<Section> = (0..12)
            .map(|i| Section {
                title: format!("Sección {i} (5-10 minutos)"),
                items: (0..10).map(|j| format!("Idea {j} de la sección {i}")).collect(),
            })
            .collect();

        let path = write_outline_pdf("Episodio largo", &sections, &dir).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));

        let _ = std::fs::remove_file(&path);
    }
}
