//! Layout reconstruction module.
//!
//! This module contains:
//! - Layout element types (Word, TextLine, TextBlock, LayoutDocument)
//! - Layout parameters (LayoutParams)
//! - Spatial index, grouping and ordering algorithms

pub mod analysis;
pub mod elements;
pub mod params;

// Re-export params
pub use params::*;

// Re-export element types
pub use elements::*;

// Re-export analysis types and functions
pub use analysis::*;
