//! Word - the atomic input unit: text plus its bounding box.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::utils::{HasBBox, cmp_f64};

use super::component::BoundingBox;

/// A positioned text token, as emitted by an OCR or layout engine.
///
/// Immutable once constructed; every constructor validates geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawWord")]
pub struct Word {
    text: String,
    #[serde(rename = "box")]
    bbox: BoundingBox,
    #[serde(skip_serializing_if = "Option::is_none")]
    confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    baseline: Option<f64>,
}

/// Flat wire form accepted on input: `{text, x0, y0, x1, y1, confidence?, baseline?}`
/// or `{text, box: {x0, y0, x1, y1}, ...}`.
#[derive(Deserialize)]
struct RawWord {
    text: String,
    #[serde(rename = "box", alias = "bbox", default)]
    bbox: Option<RawCoords>,
    #[serde(flatten)]
    coords: Option<RawCoords>,
    #[serde(default)]
    confidence: Option<f64>,
    #[serde(default)]
    baseline: Option<f64>,
}

#[derive(Deserialize)]
struct RawCoords {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

impl TryFrom<RawWord> for Word {
    type Error = LayoutError;

    fn try_from(raw: RawWord) -> Result<Self> {
        let coords = raw
            .bbox
            .or(raw.coords)
            .ok_or_else(|| LayoutError::geometry(format!("word {:?} has no box", raw.text)))?;
        let mut word = Word::from_coords(raw.text, coords.x0, coords.y0, coords.x1, coords.y1)?;
        if let Some(confidence) = raw.confidence {
            word = word.with_confidence(confidence)?;
        }
        if let Some(baseline) = raw.baseline {
            word = word.with_baseline(baseline)?;
        }
        Ok(word)
    }
}

impl Word {
    pub fn new(text: impl Into<String>, bbox: BoundingBox) -> Self {
        Self {
            text: text.into(),
            bbox,
            confidence: None,
            baseline: None,
        }
    }

    /// Creates a word from raw coordinates, validating them.
    pub fn from_coords(text: impl Into<String>, x0: f64, y0: f64, x1: f64, y1: f64) -> Result<Self> {
        Ok(Self::new(text, BoundingBox::new(x0, y0, x1, y1)?))
    }

    pub fn with_confidence(mut self, confidence: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(LayoutError::InvalidConfidence(confidence));
        }
        self.confidence = Some(confidence);
        Ok(self)
    }

    pub fn with_baseline(mut self, baseline: f64) -> Result<Self> {
        if !baseline.is_finite() {
            return Err(LayoutError::geometry(format!(
                "non-finite baseline {} for word {:?}",
                baseline, self.text
            )));
        }
        self.baseline = Some(baseline);
        Ok(self)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    pub fn confidence(&self) -> Option<f64> {
        self.confidence
    }

    pub fn baseline(&self) -> Option<f64> {
        self.baseline
    }

    /// Vertical position used for line membership: the baseline when known,
    /// otherwise the vertical centre.
    pub fn anchor(&self) -> f64 {
        self.baseline.unwrap_or_else(|| self.bbox.ymid())
    }

    /// Zero-area words are noise for clustering.
    pub fn is_degenerate(&self) -> bool {
        self.bbox.is_degenerate()
    }

    /// Returns a copy with a different box, keeping text and metadata.
    /// The baseline moves by the same vertical offset as the box top.
    pub fn with_bbox(&self, bbox: BoundingBox) -> Self {
        let shift = bbox.y0 - self.bbox.y0;
        Self {
            text: self.text.clone(),
            bbox,
            confidence: self.confidence,
            baseline: self.baseline.map(|b| b + shift),
        }
    }

    /// Returns a copy with different text.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self.clone()
        }
    }

    pub(crate) fn flip_vertical(&self, page_height: f64) -> Self {
        Self {
            text: self.text.clone(),
            bbox: self.bbox.flip_vertical(page_height),
            confidence: self.confidence,
            baseline: self.baseline.map(|b| page_height - b),
        }
    }

    /// Total, input-order-independent ordering used inside a line:
    /// left edge, then top edge, then the remaining geometry and text.
    pub(crate) fn reading_cmp(&self, other: &Word) -> Ordering {
        cmp_f64(self.bbox.x0, other.bbox.x0)
            .then_with(|| cmp_f64(self.bbox.y0, other.bbox.y0))
            .then_with(|| self.geometry_cmp(other))
    }

    /// Ordering for the top-to-bottom sweep: anchor, then left edge, then
    /// the remaining geometry and text.
    pub(crate) fn sweep_cmp(&self, other: &Word) -> Ordering {
        cmp_f64(self.anchor(), other.anchor())
            .then_with(|| cmp_f64(self.bbox.x0, other.bbox.x0))
            .then_with(|| cmp_f64(self.bbox.y0, other.bbox.y0))
            .then_with(|| self.geometry_cmp(other))
    }

    fn geometry_cmp(&self, other: &Word) -> Ordering {
        cmp_f64(self.bbox.y1, other.bbox.y1)
            .then_with(|| cmp_f64(self.bbox.x1, other.bbox.x1))
            .then_with(|| self.text.cmp(&other.text))
            .then_with(|| {
                cmp_f64(
                    self.confidence.unwrap_or(-1.0),
                    other.confidence.unwrap_or(-1.0),
                )
            })
            .then_with(|| {
                cmp_f64(
                    self.baseline.unwrap_or(f64::MIN),
                    other.baseline.unwrap_or(f64::MIN),
                )
            })
    }
}

impl HasBBox for Word {
    fn x0(&self) -> f64 {
        self.bbox.x0
    }
    fn y0(&self) -> f64 {
        self.bbox.y0
    }
    fn x1(&self) -> f64 {
        self.bbox.x1
    }
    fn y1(&self) -> f64 {
        self.bbox.y1
    }
}
