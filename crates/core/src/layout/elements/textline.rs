//! Text line - horizontally ordered words sharing a vertical band.

use serde::Serialize;

use crate::utils::{HasBBox, union_rects, weighted_median};

use super::component::BoundingBox;
use super::word::Word;

/// A line of words in left-to-right order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLine {
    bbox: BoundingBox,
    baseline: f64,
    words: Vec<Word>,
}

impl TextLine {
    /// Assembles a line from its member words. Returns `None` for an empty set.
    ///
    /// Words are sorted left to right (ties: top edge, then geometry and
    /// text); the baseline is the width-weighted median of member anchors.
    pub fn from_words(mut words: Vec<Word>) -> Option<Self> {
        if words.is_empty() {
            return None;
        }
        words.sort_by(|a, b| a.reading_cmp(b));

        let bbox = BoundingBox::enclosing(union_rects(words.iter().map(|w| w.bbox().bbox()))?);
        let samples: Vec<(f64, f64)> = words.iter().map(|w| (w.anchor(), w.width())).collect();
        let baseline = weighted_median(&samples)?;

        Some(Self {
            bbox,
            baseline,
            words,
        })
    }

    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Returns an iterator over words in reading order.
    pub fn iter(&self) -> impl Iterator<Item = &Word> {
        self.words.iter()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words joined by single spaces.
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.text())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl_has_bbox_delegate!(TextLine, bbox);
