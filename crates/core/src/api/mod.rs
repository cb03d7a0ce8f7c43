//! High-level API module.
//!
//! # Example
//!
//! ```
//! use wordmaze_core::api::reconstruct_boxes;
//! use wordmaze_core::LayoutParams;
//!
//! let doc = reconstruct_boxes(
//!     [("Hello", (0.0, 0.0, 40.0, 10.0)), ("world", (45.0, 0.0, 90.0, 10.0))],
//!     &LayoutParams::default(),
//! )?;
//! assert_eq!(doc.text(), "Hello world");
//! # Ok::<(), wordmaze_core::LayoutError>(())
//! ```

pub mod high_level;

pub use high_level::{reconstruct_boxes, reconstruct_pages, reconstruct_to_writer};
