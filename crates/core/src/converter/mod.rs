//! Output converters for reconstructed layouts.
//!
//! - TextConverter: plain text, one form feed per page
//! - JsonConverter: the layout tree as JSON

mod json;
mod text;

pub use json::JsonConverter;
pub use text::TextConverter;
