//! Layout element types for reading-order reconstruction.
//!
//! Contains:
//! - BoundingBox: axis-aligned box shared by every element
//! - Word: positioned text token (input unit)
//! - TextLine: words sharing a horizontal band
//! - TextBlock: vertically stacked lines (paragraph or column)
//! - LayoutDocument: ordered blocks plus the original input

/// Implements HasBBox trait by delegating to a `BoundingBox` field.
///
/// ```ignore
/// impl_has_bbox_delegate!(TextLine, bbox);
/// // expands to: self.bbox.x0
/// ```
macro_rules! impl_has_bbox_delegate {
    ($type:ty, $field:ident) => {
        impl crate::utils::HasBBox for $type {
            fn x0(&self) -> f64 {
                self.$field.x0
            }
            fn y0(&self) -> f64 {
                self.$field.y0
            }
            fn x1(&self) -> f64 {
                self.$field.x1
            }
            fn y1(&self) -> f64 {
                self.$field.y1
            }
        }
    };
}

mod component;
mod document;
mod textblock;
mod textline;
mod word;

pub use component::BoundingBox;
pub use document::{DropReason, DroppedWord, LayoutDocument};
pub use textblock::TextBlock;
pub use textline::TextLine;
pub use word::Word;
