//! Layout document - the reconstructed reading-order aggregate.

use serde::Serialize;

use super::textblock::TextBlock;
use super::textline::TextLine;
use super::word::Word;

/// Why a word was left out of the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// Zero width or zero height.
    ZeroArea,
}

/// A word that did not take part in clustering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DroppedWord {
    /// Position of the word in the input sequence.
    pub index: usize,
    pub word: Word,
    pub reason: DropReason,
}

/// Ordered blocks of ordered lines of ordered words, plus the original input.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LayoutDocument {
    blocks: Vec<TextBlock>,
    dropped: Vec<DroppedWord>,
    #[serde(skip)]
    words: Vec<Word>,
}

impl LayoutDocument {
    pub(crate) fn new(blocks: Vec<TextBlock>, dropped: Vec<DroppedWord>, words: Vec<Word>) -> Self {
        Self {
            blocks,
            dropped,
            words,
        }
    }

    /// Blocks in reading order.
    pub fn blocks(&self) -> &[TextBlock] {
        &self.blocks
    }

    /// The input words, in input order.
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Words excluded from clustering, in input order.
    pub fn dropped(&self) -> &[DroppedWord] {
        &self.dropped
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Every line, in reading order.
    pub fn lines(&self) -> impl Iterator<Item = &TextLine> {
        self.blocks.iter().flat_map(|b| b.iter())
    }

    /// Every placed word, in reading order.
    pub fn iter_words(&self) -> impl Iterator<Item = &Word> {
        self.blocks.iter().flat_map(|b| b.iter_words())
    }

    /// Reading-order text: words separated by spaces, lines by newlines,
    /// blocks by a blank line.
    pub fn text(&self) -> String {
        self.blocks
            .iter()
            .map(|b| b.text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
