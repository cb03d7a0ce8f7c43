//! JSON Converter - outputs the layout tree.

use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::layout::LayoutDocument;

#[derive(Serialize)]
struct PageView<'d> {
    page: usize,
    #[serde(flatten)]
    doc: &'d LayoutDocument,
}

/// Serializes reconstructed pages as a JSON array of
/// `{"page": n, "blocks": [...], "dropped": [...]}` objects.
pub struct JsonConverter<'a, W: Write> {
    outfp: &'a mut W,
    pretty: bool,
}

impl<'a, W: Write> JsonConverter<'a, W> {
    pub fn new(outfp: &'a mut W, pretty: bool) -> Self {
        Self { outfp, pretty }
    }

    /// Writes all pages, numbered from 1 like the text "Page N" headers,
    /// followed by a newline.
    pub fn write_pages(&mut self, docs: &[LayoutDocument]) -> Result<()> {
        let pages: Vec<PageView<'_>> = docs
            .iter()
            .enumerate()
            .map(|(i, doc)| PageView { page: i + 1, doc })
            .collect();
        if self.pretty {
            serde_json::to_writer_pretty(&mut *self.outfp, &pages)?;
        } else {
            serde_json::to_writer(&mut *self.outfp, &pages)?;
        }
        writeln!(self.outfp)?;
        Ok(())
    }
}
