//! Report exporter
//!
//! Renders `N. text -> label` lines under a fixed title on A4 pages using
//! the built-in Helvetica face. Lines that would run past the bottom margin
//! continue on a fresh page.

use emotion_core::{Error, LabeledText, Result};
use printpdf::{BuiltinFont, Mm, PdfDocument, Pt};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Heading drawn at the top of the first page
pub const REPORT_TITLE: &str = "Emotion Classification Results";

/// File name the dashboard writes reports to
pub const DEFAULT_REPORT_FILE: &str = "emotion_results.pdf";

// A4 in points
const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;

const FONT_SIZE: f32 = 12.0;
const LEFT_MARGIN: f32 = 100.0;
const TITLE_Y: f32 = 800.0;
const FIRST_LINE_Y: f32 = 780.0;
const LINE_STEP: f32 = 20.0;
const BOTTOM_MARGIN: f32 = 40.0;

const LAYER_NAME: &str = "Layer 1";

/// Stand-in for characters the built-in font cannot draw
pub const REPLACEMENT_CHAR: char = '?';

// Non-Latin-1 characters present in WinAnsiEncoding (0x80-0x9F)
const WIN_ANSI_EXTRAS: &[char] = &[
    '\u{20AC}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{017D}', '\u{2018}',
    '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}', '\u{02DC}',
    '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{017E}', '\u{0178}',
];

/// Whether built-in Helvetica can draw `c`
pub fn is_drawable(c: char) -> bool {
    matches!(c, ' '..='~' | '\u{A0}'..='\u{FF}') || WIN_ANSI_EXTRAS.contains(&c)
}

/// One report line for the 1-based row `index`.
///
/// Control characters become spaces so each row stays on one baseline;
/// anything the font cannot encode becomes [`REPLACEMENT_CHAR`].
pub fn format_line(index: usize, row: &LabeledText) -> String {
    let text: String = row
        .text
        .chars()
        .map(|c| match c {
            c if c.is_control() => ' ',
            c if is_drawable(c) => c,
            _ => REPLACEMENT_CHAR,
        })
        .collect();
    format!("{}. {} -> {}", index, text, row.label)
}

fn undrawable_count(row: &LabeledText) -> usize {
    row.text
        .chars()
        .filter(|c| !c.is_control() && !is_drawable(*c))
        .count()
}

/// Render the report into PDF bytes
pub fn render(rows: &[LabeledText]) -> Result<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        REPORT_TITLE,
        Mm::from(Pt(PAGE_WIDTH)),
        Mm::from(Pt(PAGE_HEIGHT)),
        LAYER_NAME,
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| Error::document(format!("failed to load report font: {e}")))?;

    let mut current = doc.get_page(page).get_layer(layer);
    current.use_text(
        REPORT_TITLE,
        FONT_SIZE,
        Mm::from(Pt(LEFT_MARGIN)),
        Mm::from(Pt(TITLE_Y)),
        &font,
    );

    let replaced: usize = rows.iter().map(undrawable_count).sum();
    if replaced > 0 {
        warn!(
            characters = replaced,
            "Report font cannot draw some characters; replaced with '{}'", REPLACEMENT_CHAR
        );
    }

    let mut y = FIRST_LINE_Y;
    for (i, row) in rows.iter().enumerate() {
        if y < BOTTOM_MARGIN {
            let (page, layer) = doc.add_page(
                Mm::from(Pt(PAGE_WIDTH)),
                Mm::from(Pt(PAGE_HEIGHT)),
                LAYER_NAME,
            );
            current = doc.get_page(page).get_layer(layer);
            y = TITLE_Y;
        }

        current.use_text(
            format_line(i + 1, row),
            FONT_SIZE,
            Mm::from(Pt(LEFT_MARGIN)),
            Mm::from(Pt(y)),
            &font,
        );
        y -= LINE_STEP;
    }

    let mut writer = BufWriter::new(Vec::new());
    doc.save(&mut writer)
        .map_err(|e| Error::document(format!("failed to write report: {e}")))?;
    writer
        .into_inner()
        .map_err(|e| Error::document(format!("failed to flush report: {e}")))
}

/// Render the report and write it to `path`, replacing any previous file
pub fn export(rows: &[LabeledText], path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref().to_path_buf();
    let bytes = render(rows)?;
    std::fs::write(&path, &bytes)?;

    info!(rows = rows.len(), bytes = bytes.len(), "Report written to {:?}", path);
    Ok(path)
}
