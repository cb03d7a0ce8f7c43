//! High-level reconstruction API.
//!
//! - `reconstruct_boxes()` - reconstruct from `(text, rect)` pairs
//! - `reconstruct_pages()` - reconstruct every page of a `WordMaze`
//! - `reconstruct_to_writer()` - reconstruct and render plain text

use std::io::Write;

use crate::converter::TextConverter;
use crate::error::Result;
use crate::layout::{BoundingBox, LayoutDocument, LayoutParams, Word, reconstruct};
use crate::page::WordMaze;
use crate::utils::Rect;

/// Reconstructs a layout from `(text, (x0, y0, x1, y1))` pairs in
/// top-left coordinates. Fails on the first invalid box.
pub fn reconstruct_boxes<I, S>(boxes: I, params: &LayoutParams) -> Result<LayoutDocument>
where
    I: IntoIterator<Item = (S, Rect)>,
    S: Into<String>,
{
    let words = boxes
        .into_iter()
        .map(|(text, rect)| Ok(Word::new(text, BoundingBox::from_rect(rect)?)))
        .collect::<Result<Vec<_>>>()?;
    reconstruct(words, params)
}

/// Reconstructs every page of `maze`; documents come back in page order.
pub fn reconstruct_pages(maze: &WordMaze, params: &LayoutParams) -> Result<Vec<LayoutDocument>> {
    maze.reconstruct(params)
}

/// Reconstructs every page of `maze` and writes it as plain text.
pub fn reconstruct_to_writer<W: Write>(
    maze: &WordMaze,
    params: &LayoutParams,
    out: &mut W,
) -> Result<()> {
    let docs = maze.reconstruct(params)?;
    let mut converter = TextConverter::new(out, false);
    for doc in &docs {
        converter.receive_layout(doc)?;
    }
    Ok(())
}
