//! Layout Analysis Module - grouping and ordering algorithms
//!
//! Contains the reconstruction stages:
//! - Spatial index over words
//! - Grouping words into text lines
//! - Grouping text lines into blocks
//! - Ordering blocks for reading

mod analyze;
mod blocks;
mod lines;
mod ordering;
pub mod spatial;

// Re-export public types and functions
pub use analyze::reconstruct;
pub use blocks::group_lines;
pub use lines::group_words;
pub use ordering::order_blocks;
pub use spatial::{LINEAR_SCAN_LIMIT, SpatialIndex};
