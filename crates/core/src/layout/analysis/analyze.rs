//! Main reconstruct() entry point.
//!
//! Runs the stages in order: validation, noise split, threshold resolution,
//! spatial index, line grouping, block grouping, reading order.

use tracing::{debug, instrument};

use crate::error::Result;
use crate::utils::{HasBBox, median};

use super::super::elements::{DropReason, DroppedWord, LayoutDocument, Word};
use super::super::params::LayoutParams;
use super::blocks::group_lines;
use super::lines::group_words;
use super::ordering::order_blocks;
use super::spatial::SpatialIndex;

/// Reconstructs the reading-order layout of a set of words.
///
/// Parameters are validated before any work starts. Zero-area words are
/// reported in `LayoutDocument::dropped` rather than placed. An empty input
/// (or one made only of zero-area words) yields a document without blocks.
#[instrument(skip_all, fields(words = words.len()))]
pub fn reconstruct(words: Vec<Word>, params: &LayoutParams) -> Result<LayoutDocument> {
    params.validate()?;

    let dropped: Vec<DroppedWord> = words
        .iter()
        .enumerate()
        .filter(|(_, w)| w.is_degenerate())
        .map(|(index, w)| DroppedWord {
            index,
            word: w.clone(),
            reason: DropReason::ZeroArea,
        })
        .collect();
    if !dropped.is_empty() {
        debug!(dropped = dropped.len(), "excluded zero-area words");
    }

    let heights: Vec<f64> = words
        .iter()
        .filter(|w| !w.is_degenerate())
        .map(|w| w.height())
        .collect();
    let Some(median_word_height) = median(&heights) else {
        return Ok(LayoutDocument::new(Vec::new(), dropped, words));
    };

    let blocks = {
        let resolved = params.resolve(median_word_height);
        let index = SpatialIndex::build(&words);
        let lines = group_words(&resolved, &index);

        let line_heights: Vec<f64> = lines.iter().map(|l| l.height()).collect();
        let resolved = resolved.with_line_height(median(&line_heights).unwrap_or(median_word_height));
        debug!(
            line_height_tolerance = resolved.line_height_tolerance,
            word_gap_tolerance = resolved.word_gap_tolerance,
            block_gap_threshold = resolved.block_gap_threshold,
            "resolved thresholds"
        );

        let blocks = group_lines(&resolved, lines);
        order_blocks(&resolved, blocks)
    };

    Ok(LayoutDocument::new(blocks, dropped, words))
}
