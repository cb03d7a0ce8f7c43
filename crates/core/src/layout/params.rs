//! Layout analysis parameters.
//!
//! Contains `LayoutParams` for controlling reconstruction behavior and
//! `ResolvedParams`, the concrete thresholds after auto values are derived
//! from input statistics.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

/// Cap on how many blocks the reading-order sequencer places in one row.
///
/// This is a row cap, not an overlap tolerance: blocks always share a row
/// when they overlap vertically, and the hint only limits how many may do so.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnHint {
    /// No cap; every vertically overlapping block joins the row.
    #[default]
    Auto,
    /// At most this many blocks share a row. `Fixed(0)` means no cap, like
    /// `Auto`; `Fixed(1)` disables rows so blocks read top to bottom.
    Fixed(usize),
}

/// Parameters for layout reconstruction.
///
/// Absolute thresholds left as `None` are derived from the input: the line
/// tolerance and word gap from the median word height, the block gap from the
/// median line height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    /// Maximum distance between a word's anchor (baseline, or vertical centre)
    /// and a line's running baseline for the word to join that line.
    pub line_height_tolerance: Option<f64>,

    /// Maximum vertical gap between the bottom of a block and the top of the
    /// next line for that line to join the block.
    pub block_gap_threshold: Option<f64>,

    /// Maximum horizontal gap between a word and a line's extent for the word
    /// to join that line.
    pub word_gap_tolerance: Option<f64>,

    /// Minimum horizontal overlap between a line and a block, relative to the
    /// narrower of the two, for the line to join the block.
    pub column_overlap_fraction: f64,

    /// Maximum number of blocks per reading-order row.
    pub column_count_hint: ColumnHint,

    /// If set, lines only join a block whose left edge is within this
    /// distance of their own.
    pub left_edge_tolerance: Option<f64>,

    /// Auto line tolerance, relative to the median word height.
    pub line_tolerance_ratio: f64,

    /// Auto word gap, relative to the median word height.
    pub word_gap_ratio: f64,

    /// Auto block gap, relative to the median line height.
    pub block_gap_ratio: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            line_height_tolerance: None,
            block_gap_threshold: None,
            word_gap_tolerance: None,
            column_overlap_fraction: 0.3,
            column_count_hint: ColumnHint::Auto,
            left_edge_tolerance: None,
            line_tolerance_ratio: 0.5,
            word_gap_ratio: 2.0,
            block_gap_ratio: 1.0,
        }
    }
}

impl LayoutParams {
    pub fn with_line_height_tolerance(mut self, value: f64) -> Self {
        self.line_height_tolerance = Some(value);
        self
    }

    pub fn with_block_gap_threshold(mut self, value: f64) -> Self {
        self.block_gap_threshold = Some(value);
        self
    }

    pub fn with_word_gap_tolerance(mut self, value: f64) -> Self {
        self.word_gap_tolerance = Some(value);
        self
    }

    pub fn with_column_overlap_fraction(mut self, value: f64) -> Self {
        self.column_overlap_fraction = value;
        self
    }

    pub fn with_column_count_hint(mut self, hint: ColumnHint) -> Self {
        self.column_count_hint = hint;
        self
    }

    pub fn with_left_edge_tolerance(mut self, value: f64) -> Self {
        self.left_edge_tolerance = Some(value);
        self
    }

    /// Checks every value is in range. Called before any clustering starts.
    pub fn validate(&self) -> Result<()> {
        check_optional("line_height_tolerance", self.line_height_tolerance)?;
        check_optional("block_gap_threshold", self.block_gap_threshold)?;
        check_optional("word_gap_tolerance", self.word_gap_tolerance)?;
        check_optional("left_edge_tolerance", self.left_edge_tolerance)?;
        check_non_negative("line_tolerance_ratio", self.line_tolerance_ratio)?;
        check_non_negative("word_gap_ratio", self.word_gap_ratio)?;
        check_non_negative("block_gap_ratio", self.block_gap_ratio)?;

        let fraction = self.column_overlap_fraction;
        if !fraction.is_finite() || !(0.0..=1.0).contains(&fraction) {
            return Err(LayoutError::Configuration(format!(
                "column_overlap_fraction must be within [0, 1], got {}",
                fraction
            )));
        }
        Ok(())
    }

    /// Resolves auto thresholds against the given statistics.
    ///
    /// `median_word_height` comes from the eligible words; the block gap is
    /// resolved separately once lines exist (see `ResolvedParams::with_line_height`).
    pub fn resolve(&self, median_word_height: f64) -> ResolvedParams {
        ResolvedParams {
            line_height_tolerance: self
                .line_height_tolerance
                .unwrap_or(self.line_tolerance_ratio * median_word_height),
            word_gap_tolerance: self
                .word_gap_tolerance
                .unwrap_or(self.word_gap_ratio * median_word_height),
            block_gap_threshold: self.block_gap_threshold.unwrap_or(0.0),
            column_overlap_fraction: self.column_overlap_fraction,
            column_count_hint: self.column_count_hint,
            left_edge_tolerance: self.left_edge_tolerance,
            block_gap_ratio: self.block_gap_ratio,
            block_gap_explicit: self.block_gap_threshold.is_some(),
        }
    }
}

fn check_non_negative(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(LayoutError::Configuration(format!(
            "{} must be a finite value >= 0, got {}",
            name, value
        )));
    }
    Ok(())
}

fn check_optional(name: &str, value: Option<f64>) -> Result<()> {
    match value {
        Some(v) => check_non_negative(name, v),
        None => Ok(()),
    }
}

/// Concrete thresholds for one reconstruction call.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedParams {
    pub line_height_tolerance: f64,
    pub word_gap_tolerance: f64,
    pub block_gap_threshold: f64,
    pub column_overlap_fraction: f64,
    pub column_count_hint: ColumnHint,
    pub left_edge_tolerance: Option<f64>,
    block_gap_ratio: f64,
    block_gap_explicit: bool,
}

impl ResolvedParams {
    /// Fills in the auto block gap from the median line height.
    pub fn with_line_height(mut self, median_line_height: f64) -> Self {
        if !self.block_gap_explicit {
            self.block_gap_threshold = self.block_gap_ratio * median_line_height;
        }
        self
    }
}
