//! Text Converter - outputs plain text.

use std::io::Write;

use itertools::{Itertools, Position};

use crate::error::Result;
use crate::layout::LayoutDocument;

/// Writes each page as lines of text, a blank line between blocks and a
/// form feed after the page.
pub struct TextConverter<'a, W: Write> {
    outfp: &'a mut W,
    /// Number of the next page, starting at 1
    pageno: usize,
    /// Whether to write a "Page N" header before each page
    showpageno: bool,
}

impl<'a, W: Write> TextConverter<'a, W> {
    pub fn new(outfp: &'a mut W, showpageno: bool) -> Self {
        Self {
            outfp,
            pageno: 1,
            showpageno,
        }
    }

    pub fn show_pageno(&self) -> bool {
        self.showpageno
    }

    /// Receive and render one page.
    pub fn receive_layout(&mut self, doc: &LayoutDocument) -> Result<()> {
        if self.showpageno {
            writeln!(self.outfp, "Page {}", self.pageno)?;
        }
        for (position, block) in doc.blocks().iter().with_position() {
            for line in block.iter() {
                writeln!(self.outfp, "{}", line.text())?;
            }
            if !matches!(position, Position::Last | Position::Only) {
                writeln!(self.outfp)?;
            }
        }
        // Form feed at end of page
        write!(self.outfp, "\x0c")?;
        self.pageno += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::reconstruct_boxes;
    use crate::layout::LayoutParams;

    #[test]
    fn blocks_are_separated_by_blank_line() {
        let doc = reconstruct_boxes(
            [
                ("Title", (0.0, 0.0, 50.0, 10.0)),
                ("Body", (0.0, 100.0, 40.0, 110.0)),
                ("text", (45.0, 100.0, 80.0, 110.0)),
            ],
            &LayoutParams::default(),
        )
        .unwrap();

        let mut out = Vec::new();
        let mut converter = TextConverter::new(&mut out, true);
        converter.receive_layout(&doc).unwrap();
        converter.receive_layout(&LayoutDocument::default()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Page 1\nTitle\n\nBody text\n\x0cPage 2\n\x0c"
        );
    }
}
