//! Line-to-block grouping.

use tracing::debug;

use crate::utils::{HasBBox, cmp_f64};

use super::super::elements::{TextBlock, TextLine};
use super::super::params::ResolvedParams;

/// A block under construction.
struct OpenBlock {
    lines: Vec<TextLine>,
    opened: usize,
}

impl OpenBlock {
    fn last(&self) -> &TextLine {
        // Blocks are created with one line and only grow.
        &self.lines[self.lines.len() - 1]
    }

    /// Bottom edge of the most recent line.
    fn bottom(&self) -> f64 {
        self.last().y1()
    }
}

/// How well a line continues a block: (overlap fraction, vertical gap).
fn continuation(params: &ResolvedParams, block: &OpenBlock, line: &TextLine) -> Option<(f64, f64)> {
    let last = block.last();
    let gap = last.bbox().vdistance(line.bbox());
    if gap > params.block_gap_threshold {
        return None;
    }

    let overlap = last.bbox().hoverlap(line.bbox());
    if overlap <= 0.0 {
        return None;
    }
    let narrower = last.width().min(line.width());
    let fraction = if narrower > 0.0 { overlap / narrower } else { 0.0 };
    if fraction < params.column_overlap_fraction {
        return None;
    }

    if let Some(tolerance) = params.left_edge_tolerance {
        if (line.x0() - last.x0()).abs() > tolerance {
            return None;
        }
    }

    Some((fraction, gap))
}

/// Groups text lines into blocks.
///
/// # Algorithm
/// - Sort lines by top edge, then left edge.
/// - A line continues an open block when the gap below the block's last line
///   is within the block gap threshold and the two overlap horizontally by at
///   least `column_overlap_fraction` of the narrower one.
/// - Several candidates: the largest overlap fraction wins, then the smallest
///   gap, then the earliest block. Side-by-side columns therefore keep
///   separate blocks open at the same time.
/// - Blocks whose last line ends more than the threshold above the current
///   line are closed.
pub fn group_lines(params: &ResolvedParams, mut lines: Vec<TextLine>) -> Vec<TextBlock> {
    if lines.is_empty() {
        return Vec::new();
    }
    lines.sort_by(|a, b| {
        cmp_f64(a.y0(), b.y0())
            .then_with(|| cmp_f64(a.x0(), b.x0()))
            .then_with(|| cmp_f64(a.baseline(), b.baseline()))
    });

    let mut open: Vec<OpenBlock> = Vec::new();
    let mut closed: Vec<OpenBlock> = Vec::new();
    let mut opened = 0usize;

    for line in lines {
        let (still_open, done): (Vec<_>, Vec<_>) = open
            .into_iter()
            .partition(|b| b.bottom() + params.block_gap_threshold >= line.y0());
        open = still_open;
        closed.extend(done);

        let best = open
            .iter()
            .enumerate()
            .filter_map(|(i, b)| continuation(params, b, &line).map(|c| (i, c, b.opened)))
            .min_by(|(_, (fa, ga), oa), (_, (fb, gb), ob)| {
                cmp_f64(*fb, *fa)
                    .then_with(|| cmp_f64(*ga, *gb))
                    .then(oa.cmp(ob))
            })
            .map(|(i, _, _)| i);

        match best {
            Some(i) => open[i].lines.push(line),
            None => {
                open.push(OpenBlock {
                    lines: vec![line],
                    opened,
                });
                opened += 1;
            }
        }
    }

    closed.extend(open);
    closed.sort_by_key(|b| b.opened);

    let blocks: Vec<TextBlock> = closed
        .into_iter()
        .filter_map(|b| TextBlock::from_lines(b.lines))
        .collect();
    debug!(blocks = blocks.len(), "grouped lines into blocks");
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::elements::Word;
    use crate::layout::params::LayoutParams;

    fn line(text: &str, x0: f64, y0: f64, x1: f64, y1: f64) -> TextLine {
        TextLine::from_words(vec![Word::from_coords(text, x0, y0, x1, y1).unwrap()]).unwrap()
    }

    fn params() -> ResolvedParams {
        LayoutParams::default().resolve(10.0).with_line_height(10.0)
    }

    fn texts(blocks: &[TextBlock]) -> Vec<String> {
        blocks.iter().map(|b| b.text()).collect()
    }

    #[test]
    fn close_lines_share_a_block() {
        let blocks = group_lines(
            &params(),
            vec![
                line("second", 0.0, 15.0, 80.0, 25.0),
                line("first", 0.0, 0.0, 100.0, 10.0),
                line("end.", 0.0, 30.0, 20.0, 40.0),
            ],
        );
        assert_eq!(texts(&blocks), vec!["first\nsecond\nend."]);
    }

    #[test]
    fn large_gap_starts_new_block() {
        let blocks = group_lines(
            &params(),
            vec![
                line("Title", 0.0, 0.0, 50.0, 10.0),
                line("Body", 0.0, 100.0, 50.0, 110.0),
            ],
        );
        assert_eq!(texts(&blocks), vec!["Title", "Body"]);
    }

    #[test]
    fn side_by_side_columns_stay_apart() {
        let mut lines = Vec::new();
        for row in 0..4 {
            let y0 = row as f64 * 15.0;
            lines.push(line(&format!("L{}", row), 0.0, y0, 50.0, y0 + 10.0));
            lines.push(line(&format!("R{}", row), 100.0, y0, 150.0, y0 + 10.0));
        }
        let blocks = group_lines(&params(), lines);
        assert_eq!(texts(&blocks), vec!["L0\nL1\nL2\nL3", "R0\nR1\nR2\nR3"]);
    }

    #[test]
    fn small_overlap_below_fraction_splits() {
        // Overlap of 10 over a narrower width of 50 is 20% < 30%.
        let blocks = group_lines(
            &params(),
            vec![
                line("a", 0.0, 0.0, 50.0, 10.0),
                line("b", 40.0, 15.0, 90.0, 25.0),
            ],
        );
        assert_eq!(blocks.len(), 2);

        let lenient = LayoutParams::default()
            .with_column_overlap_fraction(0.1)
            .resolve(10.0)
            .with_line_height(10.0);
        let blocks = group_lines(
            &lenient,
            vec![
                line("a", 0.0, 0.0, 50.0, 10.0),
                line("b", 40.0, 15.0, 90.0, 25.0),
            ],
        );
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn left_edge_tolerance_separates_indented_lines() {
        let strict = LayoutParams::default()
            .with_left_edge_tolerance(2.0)
            .resolve(10.0)
            .with_line_height(10.0);
        let lines = vec![
            line("flush", 0.0, 0.0, 100.0, 10.0),
            line("indented", 20.0, 15.0, 100.0, 25.0),
        ];
        assert_eq!(group_lines(&strict, lines.clone()).len(), 2);
        assert_eq!(group_lines(&params(), lines).len(), 1);
    }
}
