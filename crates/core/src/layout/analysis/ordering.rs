//! Reading-order sequencing of text blocks.

use tracing::debug;

use crate::utils::{HasBBox, cmp_f64};

use super::super::elements::TextBlock;
use super::super::params::{ColumnHint, ResolvedParams};

/// Blocks sharing a vertical range (one row of columns).
struct Row {
    y1: f64,
    blocks: Vec<TextBlock>,
}

/// Orders blocks for reading.
///
/// Blocks are sorted by top edge and grouped into rows of vertically
/// overlapping blocks; rows read top to bottom, blocks inside a row left to
/// right. `ColumnHint::Fixed(1)` disables rows, `Fixed(n)` caps a row at `n`
/// blocks.
pub fn order_blocks(params: &ResolvedParams, mut blocks: Vec<TextBlock>) -> Vec<TextBlock> {
    blocks.sort_by(|a, b| cmp_f64(a.y0(), b.y0()).then_with(|| cmp_f64(a.x0(), b.x0())));

    let (rows_enabled, cap) = match params.column_count_hint {
        ColumnHint::Auto | ColumnHint::Fixed(0) => (true, None),
        ColumnHint::Fixed(1) => (false, None),
        ColumnHint::Fixed(n) => (true, Some(n)),
    };

    let mut rows: Vec<Row> = Vec::new();
    for block in blocks {
        let joins = rows_enabled
            && rows.last().is_some_and(|row| {
                block.y0() < row.y1 && cap.is_none_or(|n| row.blocks.len() < n)
            });
        match rows.last_mut() {
            Some(row) if joins => {
                row.y1 = row.y1.max(block.y1());
                row.blocks.push(block);
            }
            _ => rows.push(Row {
                y1: block.y1(),
                blocks: vec![block],
            }),
        }
    }

    let columns = rows.iter().map(|r| r.blocks.len()).max().unwrap_or(0);
    debug!(rows = rows.len(), columns, "ordered blocks");

    rows.into_iter()
        .flat_map(|mut row| {
            row.blocks.sort_by(|a, b| {
                cmp_f64(a.x0(), b.x0()).then_with(|| cmp_f64(a.y0(), b.y0()))
            });
            row.blocks
        })
        .collect()
}
