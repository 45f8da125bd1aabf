//! Paged ingester
//!
//! Pulls the text layer out of an uploaded PDF and splits it into
//! classification units, one per non-blank line. Scanned pages without a
//! text layer simply contribute nothing.

use emotion_core::{Error, Result};
use lopdf::content::{Content, Operation};
use lopdf::{Document, ObjectId};
use tracing::{debug, warn};

/// Extract non-blank lines from a PDF, in page order then line order
pub fn parse_pdf(bytes: &[u8]) -> Result<Vec<String>> {
    let text = extract_text(bytes)?;
    Ok(split_lines(&text))
}

/// Concatenated text of every page, each page terminated by a newline
pub fn extract_text(bytes: &[u8]) -> Result<String> {
    let mut doc = Document::load_mem(bytes)
        .map_err(|e| Error::document(format!("failed to read PDF: {e}")))?;

    let pages = doc.get_pages();
    debug!(pages = pages.len(), "Extracting PDF text");

    let mut text = String::new();
    for (page_number, page_id) in &pages {
        if let Err(e) = break_text_lines(&mut doc, *page_id) {
            warn!(page = page_number, error = %e, "Keeping original PDF page content");
        }
        match doc.extract_text(&[*page_number]) {
            Ok(page_text) => text.push_str(&page_text),
            Err(e) => warn!(page = page_number, error = %e, "Skipping unreadable PDF page"),
        }
        if !text.ends_with('\n') {
            text.push('\n');
        }
    }

    Ok(text)
}

/// Rewrite a page so every line move closes the current text object.
///
/// The extractor only ends a line at `ET`; paragraphs laid out with
/// `Td`/`TD`/`T*`/`Tm` or the `'` and `"` operators inside a single text
/// object would otherwise come back glued together.
fn break_text_lines(doc: &mut Document, page_id: ObjectId) -> lopdf::Result<()> {
    let content = Content::decode(&doc.get_page_content(page_id)?)?;

    let mut operations = Vec::with_capacity(content.operations.len());
    for op in content.operations {
        match op.operator.as_str() {
            "Td" | "TD" if !moves_down(&op) => operations.push(op),
            "Td" | "TD" | "T*" | "Tm" => {
                close_line(&mut operations);
                operations.push(op);
            }
            // `'` and `"` move to the next line, then show their last operand
            "'" | "\"" => {
                close_line(&mut operations);
                operations.push(Operation::new("T*", vec![]));
                if let Some(shown) = op.operands.last() {
                    operations.push(Operation::new("Tj", vec![shown.clone()]));
                }
            }
            _ => operations.push(op),
        }
    }

    let rewritten = Content { operations }.encode()?;
    doc.change_page_content(page_id, rewritten)
}

fn close_line(operations: &mut Vec<Operation>) {
    operations.push(Operation::new("ET", vec![]));
    operations.push(Operation::new("BT", vec![]));
}

/// Whether a `Td`/`TD` changes the baseline; same-line offsets stay joined
fn moves_down(op: &Operation) -> bool {
    op.operands
        .get(1)
        .and_then(|ty| ty.as_float().ok())
        .map_or(true, |ty| ty != 0.0)
}

/// Split on newlines, trim each line, drop the empty ones
pub fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
