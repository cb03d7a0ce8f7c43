//! wordmaze - reading-order reconstruction from positioned words.
//!
//! Takes the words an OCR engine or PDF extractor reports (text plus a
//! bounding box) and rebuilds lines, blocks and a reading order.

pub mod api;
pub mod converter;
pub mod error;
pub mod layout;
pub mod page;
pub mod utils;

// Re-export high_level for convenience
pub use api::high_level;

pub use error::{LayoutError, Result};
pub use layout::{
    BoundingBox, ColumnHint, DropReason, DroppedWord, LayoutDocument, LayoutParams, TextBlock,
    TextLine, Word, reconstruct,
};
pub use page::{Origin, Page, Shape, WordMaze, WordRecord};
