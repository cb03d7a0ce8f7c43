//! Text block - vertically stacked lines forming a paragraph or column.

use serde::Serialize;

use crate::utils::{HasBBox, cmp_f64, union_rects};

use super::component::BoundingBox;
use super::textline::TextLine;
use super::word::Word;

/// A group of text lines in top-to-bottom order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextBlock {
    bbox: BoundingBox,
    lines: Vec<TextLine>,
}

impl TextBlock {
    /// Assembles a block from its member lines. Returns `None` for an empty set.
    ///
    /// Lines are sorted by top edge, then left edge, then baseline.
    pub fn from_lines(mut lines: Vec<TextLine>) -> Option<Self> {
        if lines.is_empty() {
            return None;
        }
        lines.sort_by(|a, b| {
            cmp_f64(a.y0(), b.y0())
                .then_with(|| cmp_f64(a.x0(), b.x0()))
                .then_with(|| cmp_f64(a.baseline(), b.baseline()))
        });
        let bbox = BoundingBox::enclosing(union_rects(lines.iter().map(|l| l.bbox().bbox()))?);
        Some(Self { bbox, lines })
    }

    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    pub fn lines(&self) -> &[TextLine] {
        &self.lines
    }

    /// Returns an iterator over lines in reading order.
    pub fn iter(&self) -> impl Iterator<Item = &TextLine> {
        self.lines.iter()
    }

    /// Returns an iterator over all words, line by line.
    pub fn iter_words(&self) -> impl Iterator<Item = &Word> {
        self.lines.iter().flat_map(|l| l.iter())
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines joined by newlines.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl_has_bbox_delegate!(TextBlock, bbox);
