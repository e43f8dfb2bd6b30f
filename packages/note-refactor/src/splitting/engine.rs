//! Segmentation of a document snapshot into extracted blocks.

use super::heading::heading_level;
use crate::config::validate_heading_level;
use crate::error::Result;
use crate::types::{Document, ExtractedBlock};

/// The selection as a single block.
///
/// Returns `None` when nothing, or only whitespace, is selected.
pub fn selection_block(doc: &Document) -> Result<Option<ExtractedBlock>> {
    let Some(span) = doc.selection_span()? else {
        return Ok(None);
    };
    Ok(block_for_span(doc, span))
}

/// Everything from the selection start (the cursor) to the end of the
/// document as a single block.
pub fn remainder_block(doc: &Document) -> Result<Option<ExtractedBlock>> {
    let Some(span) = doc.selection_span()? else {
        return Ok(None);
    };
    Ok(block_for_span(doc, span.start..doc.text().len()))
}

fn block_for_span(doc: &Document, span: std::ops::Range<usize>) -> Option<ExtractedBlock> {
    let text = doc.text().get(span.clone())?;
    if text.trim().is_empty() {
        return None;
    }
    let lines = text.split('\n').map(String::from).collect();
    Some(ExtractedBlock::from_lines(lines, span))
}

/// Lines within the current selection; empty when nothing is selected.
pub fn selected_content(doc: &Document) -> Result<Vec<String>> {
    Ok(selection_block(doc)?
        .map(|block| block.lines().into_iter().map(String::from).collect())
        .unwrap_or_default())
}

/// Lines from the selection start to the end of the document.
pub fn note_remainder(doc: &Document) -> Result<Vec<String>> {
    Ok(remainder_block(doc)?
        .map(|block| block.lines().into_iter().map(String::from).collect())
        .unwrap_or_default())
}

/// Block under construction during a heading scan.
struct OpenBlock {
    lines: Vec<String>,
    start: usize,
}

impl OpenBlock {
    fn close(self, end: usize) -> ExtractedBlock {
        ExtractedBlock::from_lines(self.lines, self.start..end)
    }
}

/// Split a document into one block per heading of exactly `level`.
///
/// A block runs from its heading up to, not including, the next heading of
/// level `<= level`. Lines before the first matching heading, and lines
/// under a shallower heading until the next matching one, belong to no
/// block. The document's final newline stays outside the last block.
pub fn split_by_heading(doc: &Document, level: u8) -> Result<Vec<ExtractedBlock>> {
    validate_heading_level(level)?;

    let text = doc.text();
    let scanned = text.strip_suffix('\n').unwrap_or(text);

    let mut blocks = Vec::new();
    let mut current: Option<OpenBlock> = None;
    let mut offset = 0;

    for line in scanned.split('\n') {
        let line_start = offset;
        offset += line.len() + 1;

        match heading_level(line) {
            Some(found) if found <= level => {
                if let Some(open) = current.take() {
                    // Exclude the newline that ended the previous line
                    blocks.push(open.close(line_start - 1));
                }
                if found == level {
                    current = Some(OpenBlock {
                        lines: Vec::new(),
                        start: line_start,
                    });
                }
            }
            _ => {}
        }

        if let Some(open) = current.as_mut() {
            open.lines.push(line.to_string());
        }
    }

    if let Some(open) = current {
        blocks.push(open.close(scanned.len()));
    }

    tracing::debug!(level, blocks = blocks.len(), "Split document by heading");
    Ok(blocks)
}
