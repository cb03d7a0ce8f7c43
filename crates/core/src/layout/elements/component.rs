//! Axis-aligned bounding box shared by every layout element.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::utils::{HasBBox, Rect};

/// Axis-aligned bounding box with the origin at the top-left corner and `y`
/// growing downward. Always satisfies `x0 <= x1`, `y0 <= y1` with finite
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBox")]
pub struct BoundingBox {
    pub(crate) x0: f64,
    pub(crate) y0: f64,
    pub(crate) x1: f64,
    pub(crate) y1: f64,
}

#[derive(Deserialize)]
struct RawBox {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

impl TryFrom<RawBox> for BoundingBox {
    type Error = LayoutError;

    fn try_from(raw: RawBox) -> Result<Self> {
        BoundingBox::new(raw.x0, raw.y0, raw.x1, raw.y1)
    }
}

impl BoundingBox {
    /// Creates a bounding box, rejecting non-finite or inverted coordinates.
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Result<Self> {
        if ![x0, y0, x1, y1].iter().all(|v| v.is_finite()) {
            return Err(LayoutError::geometry(format!(
                "non-finite coordinates ({}, {}, {}, {})",
                x0, y0, x1, y1
            )));
        }
        if x0 > x1 {
            return Err(LayoutError::geometry(format!("x0 {} > x1 {}", x0, x1)));
        }
        if y0 > y1 {
            return Err(LayoutError::geometry(format!("y0 {} > y1 {}", y0, y1)));
        }
        Ok(Self { x0, y0, x1, y1 })
    }

    /// Creates a bounding box from its top-left corner and size.
    pub fn from_size(x0: f64, y0: f64, width: f64, height: f64) -> Result<Self> {
        if width < 0.0 || height < 0.0 {
            return Err(LayoutError::geometry(format!(
                "negative size {}x{}",
                width, height
            )));
        }
        Self::new(x0, y0, x0 + width, y0 + height)
    }

    pub fn from_rect(rect: Rect) -> Result<Self> {
        let (x0, y0, x1, y1) = rect;
        Self::new(x0, y0, x1, y1)
    }

    /// Builds the union of already-valid rects. Callers guarantee non-empty input.
    pub(crate) fn enclosing(rect: Rect) -> Self {
        let (x0, y0, x1, y1) = rect;
        Self { x0, y0, x1, y1 }
    }

    pub fn x0(&self) -> f64 {
        self.x0
    }

    pub fn y0(&self) -> f64 {
        self.y0
    }

    pub fn x1(&self) -> f64 {
        self.x1
    }

    pub fn y1(&self) -> f64 {
        self.y1
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn xmid(&self) -> f64 {
        (self.x0 + self.x1) / 2.0
    }

    pub fn ymid(&self) -> f64 {
        (self.y0 + self.y1) / 2.0
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn bbox(&self) -> Rect {
        (self.x0, self.y0, self.x1, self.y1)
    }

    /// Zero width or zero height.
    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Returns true if there is horizontal overlap with another box.
    pub fn is_hoverlap(&self, other: &BoundingBox) -> bool {
        other.x0 <= self.x1 && self.x0 <= other.x1
    }

    /// Returns the horizontal distance to another box.
    /// Returns 0 if they overlap.
    pub fn hdistance(&self, other: &BoundingBox) -> f64 {
        if self.is_hoverlap(other) {
            0.0
        } else {
            (self.x0 - other.x1).abs().min((self.x1 - other.x0).abs())
        }
    }

    /// Returns the amount of horizontal overlap with another box.
    pub fn hoverlap(&self, other: &BoundingBox) -> f64 {
        if self.is_hoverlap(other) {
            self.x1.min(other.x1) - self.x0.max(other.x0)
        } else {
            0.0
        }
    }

    /// Returns true if there is vertical overlap with another box.
    pub fn is_voverlap(&self, other: &BoundingBox) -> bool {
        other.y0 <= self.y1 && self.y0 <= other.y1
    }

    /// Returns the vertical distance to another box.
    /// Returns 0 if they overlap.
    pub fn vdistance(&self, other: &BoundingBox) -> f64 {
        if self.is_voverlap(other) {
            0.0
        } else {
            (self.y0 - other.y1).abs().min((self.y1 - other.y0).abs())
        }
    }

    /// Returns the amount of vertical overlap with another box.
    pub fn voverlap(&self, other: &BoundingBox) -> f64 {
        if self.is_voverlap(other) {
            self.y1.min(other.y1) - self.y0.max(other.y0)
        } else {
            0.0
        }
    }

    /// Mirrors the box vertically inside a page of the given height.
    pub(crate) fn flip_vertical(&self, page_height: f64) -> BoundingBox {
        BoundingBox {
            x0: self.x0,
            y0: page_height - self.y1,
            x1: self.x1,
            y1: page_height - self.y0,
        }
    }
}

impl HasBBox for BoundingBox {
    fn x0(&self) -> f64 {
        self.x0
    }
    fn y0(&self) -> f64 {
        self.y0
    }
    fn x1(&self) -> f64 {
        self.x1
    }
    fn y1(&self) -> f64 {
        self.y1
    }
}
