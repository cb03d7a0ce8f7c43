//! Word-to-line grouping.
//!
//! Contains group_words(), a single top-to-bottom sweep over the spatial
//! index followed by a stitch pass that joins fragments of the same line.

use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::utils::{HasBBox, cmp_f64, range_gap, weighted_median};

use super::super::elements::TextLine;
use super::super::params::ResolvedParams;
use super::spatial::SpatialIndex;

/// A line under construction: member ids plus running band statistics.
#[derive(Debug, Clone)]
struct CandidateLine {
    members: Vec<usize>,
    /// (anchor, width) per member, for the weighted-median baseline.
    samples: Vec<(f64, f64)>,
    baseline: f64,
    x0: f64,
    x1: f64,
    touched: usize,
}

impl CandidateLine {
    fn new(id: usize, anchor: f64, width: f64, x0: f64, x1: f64, touched: usize) -> Self {
        Self {
            members: vec![id],
            samples: vec![(anchor, width)],
            baseline: anchor,
            x0,
            x1,
            touched,
        }
    }

    fn push(&mut self, id: usize, anchor: f64, width: f64, x0: f64, x1: f64) {
        self.members.push(id);
        self.samples.push((anchor, width));
        self.x0 = self.x0.min(x0);
        self.x1 = self.x1.max(x1);
        self.refresh_baseline();
    }

    fn absorb(&mut self, other: CandidateLine) {
        self.members.extend(other.members);
        self.samples.extend(other.samples);
        self.x0 = self.x0.min(other.x0);
        self.x1 = self.x1.max(other.x1);
        self.touched = self.touched.max(other.touched);
        self.refresh_baseline();
    }

    fn refresh_baseline(&mut self) {
        if let Some(b) = weighted_median(&self.samples) {
            self.baseline = b;
        }
    }

    fn accepts(&self, anchor: f64, x0: f64, x1: f64, params: &ResolvedParams) -> bool {
        (anchor - self.baseline).abs() <= params.line_height_tolerance
            && range_gap(self.x0, self.x1, x0, x1) <= params.word_gap_tolerance
    }
}

/// Groups the indexed words into text lines.
///
/// # Algorithm
/// - Sweep words by anchor (baseline or vertical centre), left edge as tie-break.
/// - A word joins an open line when its anchor is within the line tolerance
///   of the line's running baseline and its horizontal gap to the line's
///   extent is within the word gap. Among several such lines, the most
///   recently touched wins and the others are merged into it.
/// - Lines whose baseline falls more than one tolerance above the current
///   anchor are closed.
/// - A stitch pass merges fragments that ended up on the same band.
pub fn group_words(params: &ResolvedParams, index: &SpatialIndex<'_>) -> Vec<TextLine> {
    let total = index.sweep_order().iter().copied().max().map_or(0, |m| m + 1);
    let mut line_of: Vec<Option<usize>> = vec![None; total];
    let mut lines: Vec<Option<CandidateLine>> = Vec::new();
    let mut open: Vec<usize> = Vec::new();
    let mut clock = 0usize;

    for &id in index.sweep_order() {
        let word = index.word(id);
        let anchor = word.anchor();
        let (x0, x1, width) = (word.x0(), word.x1(), word.width());

        open.retain(|&li| {
            lines[li]
                .as_ref()
                .is_some_and(|l| l.baseline + params.line_height_tolerance >= anchor)
        });

        let matching: Vec<usize> = open
            .iter()
            .copied()
            .filter(|&li| {
                lines[li]
                    .as_ref()
                    .is_some_and(|l| l.accepts(anchor, x0, x1, params))
            })
            .collect();

        clock += 1;
        let target = matching
            .iter()
            .copied()
            .max_by_key(|&li| lines[li].as_ref().map_or(0, |l| l.touched));

        match target {
            None => {
                let li = lines.len();
                lines.push(Some(CandidateLine::new(id, anchor, width, x0, x1, clock)));
                open.push(li);
                line_of[id] = Some(li);
            }
            Some(li) => {
                for other in matching.into_iter().filter(|&o| o != li) {
                    merge_into(&mut lines, &mut line_of, li, other);
                    open.retain(|&o| o != other);
                }
                if let Some(line) = lines[li].as_mut() {
                    line.push(id, anchor, width, x0, x1);
                    line.touched = clock;
                }
                line_of[id] = Some(li);
            }
        }
    }

    let stitched = stitch_fragments(params, index, &mut lines, &mut line_of);

    let mut result: Vec<TextLine> = lines
        .into_iter()
        .flatten()
        .filter_map(|l| {
            TextLine::from_words(l.members.iter().map(|&id| index.word(id).clone()).collect())
        })
        .collect();
    result.sort_by(|a, b| {
        cmp_f64(a.baseline(), b.baseline()).then_with(|| cmp_f64(a.x0(), b.x0()))
    });

    debug!(
        words = index.len(),
        lines = result.len(),
        stitched,
        "grouped words into lines"
    );
    result
}

fn merge_into(
    lines: &mut [Option<CandidateLine>],
    line_of: &mut [Option<usize>],
    target: usize,
    other: usize,
) {
    let Some(absorbed) = lines[other].take() else {
        return;
    };
    for &m in &absorbed.members {
        line_of[m] = Some(target);
    }
    if let Some(line) = lines[target].as_mut() {
        line.absorb(absorbed);
    }
}

/// Merges line fragments whose baselines agree and whose extents are close.
///
/// Candidates come from a band query around each line's baseline and from
/// the right neighbour of its rightmost word. Returns the number of merges.
fn stitch_fragments(
    params: &ResolvedParams,
    index: &SpatialIndex<'_>,
    lines: &mut [Option<CandidateLine>],
    line_of: &mut [Option<usize>],
) -> usize {
    let tol = params.line_height_tolerance;
    let mut merges = 0usize;
    let mut changed = true;

    while changed {
        changed = false;
        for li in 0..lines.len() {
            let Some(line) = lines[li].as_ref() else {
                continue;
            };

            let mut partners: BTreeSet<usize> = index
                .query_band(line.baseline - tol, line.baseline + tol)
                .into_iter()
                .filter_map(|wid| line_of[wid])
                .filter(|&lj| lj != li)
                .collect();

            let rightmost = line.members.iter().copied().max_by(|&a, &b| {
                cmp_f64(index.word(a).x1(), index.word(b).x1()).then(a.cmp(&b))
            });
            if let Some(neighbor) =
                rightmost.and_then(|r| index.nearest_right(r, params.word_gap_tolerance))
            {
                if let Some(lj) = line_of[neighbor].filter(|&lj| lj != li) {
                    partners.insert(lj);
                }
            }

            for lj in partners {
                let joinable = match (lines[li].as_ref(), lines[lj].as_ref()) {
                    (Some(a), Some(b)) => {
                        (a.baseline - b.baseline).abs() <= tol
                            && range_gap(a.x0, a.x1, b.x0, b.x1) <= params.word_gap_tolerance
                    }
                    _ => false,
                };
                if joinable {
                    trace!(target_line = li, fragment = lj, "stitching line fragment");
                    merge_into(lines, line_of, li, lj);
                    merges += 1;
                    changed = true;
                }
            }
        }
    }

    merges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::elements::Word;
    use crate::layout::params::LayoutParams;

    fn word(text: &str, x0: f64, y0: f64, x1: f64, y1: f64) -> Word {
        Word::from_coords(text, x0, y0, x1, y1).unwrap()
    }

    fn params() -> ResolvedParams {
        LayoutParams::default().resolve(10.0)
    }

    fn texts(lines: &[TextLine]) -> Vec<String> {
        lines.iter().map(|l| l.text()).collect()
    }

    #[test]
    fn single_row_forms_one_line() {
        let words = vec![
            word("sat", 24.0, 0.0, 34.0, 10.0),
            word("The", 0.0, 0.0, 10.0, 10.0),
            word("cat", 12.0, 0.0, 22.0, 10.0),
        ];
        let index = SpatialIndex::build(&words);
        let lines = group_words(&params(), &index);
        assert_eq!(texts(&lines), vec!["The cat sat"]);
    }

    #[test]
    fn jittered_row_stays_together() {
        let words = vec![
            word("The", 0.0, 0.5, 10.0, 10.5),
            word("cat", 12.0, -0.5, 22.0, 9.5),
            word("sat", 24.0, 1.0, 34.0, 11.0),
        ];
        let index = SpatialIndex::build(&words);
        let lines = group_words(&params(), &index);
        assert_eq!(texts(&lines), vec!["The cat sat"]);
    }

    #[test]
    fn stacked_rows_form_separate_lines() {
        let words = vec![
            word("two", 0.0, 15.0, 10.0, 25.0),
            word("one", 0.0, 0.0, 10.0, 10.0),
        ];
        let index = SpatialIndex::build(&words);
        let lines = group_words(&params(), &index);
        assert_eq!(texts(&lines), vec!["one", "two"]);
    }

    #[test]
    fn wide_horizontal_gap_splits_line() {
        let words = vec![
            word("left", 0.0, 0.0, 50.0, 10.0),
            word("right", 100.0, 0.0, 150.0, 10.0),
        ];
        let index = SpatialIndex::build(&words);
        let lines = group_words(&params(), &index);
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn superscript_joins_by_baseline() {
        let words = vec![
            word("E", 0.0, 0.0, 10.0, 10.0)
                .with_baseline(10.0)
                .unwrap(),
            word("mc", 12.0, 0.0, 24.0, 10.0)
                .with_baseline(10.0)
                .unwrap(),
            word("2", 25.0, -3.0, 28.0, 3.0).with_baseline(7.0).unwrap(),
        ];
        let index = SpatialIndex::build(&words);
        let lines = group_words(&params(), &index);
        assert_eq!(texts(&lines), vec!["E mc 2"]);
        assert_eq!(lines[0].baseline(), 10.0);
    }

    #[test]
    fn bridging_word_merges_fragments() {
        // "a" and "c" start separate lines (gap 30 > 20); "b" sits between
        // them and is close to both.
        let words = vec![
            word("a", 0.0, 0.0, 10.0, 10.0),
            word("c", 40.0, 0.0, 50.0, 10.0),
            word("b", 20.0, 0.2, 30.0, 10.2),
        ];
        let index = SpatialIndex::build(&words);
        let lines = group_words(&params(), &index);
        assert_eq!(texts(&lines), vec!["a b c"]);
    }

    #[test]
    fn stitch_joins_fragments_after_baseline_moves() {
        // "one" and "two" are 20 apart but "two" arrives after "one"'s line
        // has closed. "three" then merges "two" with the heavier "four",
        // pulling their baseline down within reach of "one".
        let words = vec![
            word("one", 0.0, -5.0, 10.0, 5.0),
            word("four", 70.0, -4.0, 100.0, 6.0),
            word("two", 30.0, 0.5, 40.0, 10.5),
            word("three", 45.0, 0.8, 65.0, 10.8),
        ];
        let index = SpatialIndex::build(&words);
        let lines = group_words(&params(), &index);
        assert_eq!(texts(&lines), vec!["one two three four"]);
        assert_eq!(lines[0].baseline(), 1.0);
    }

    #[test]
    fn stitch_fragments_reports_merges() {
        let words = vec![
            word("left", 0.0, 0.0, 10.0, 10.0),
            word("right", 15.0, 1.0, 25.0, 11.0),
        ];
        let index = SpatialIndex::build(&words);
        let mut lines = vec![
            Some(CandidateLine::new(0, 5.0, 10.0, 0.0, 10.0, 0)),
            Some(CandidateLine::new(1, 6.0, 10.0, 15.0, 25.0, 1)),
        ];
        let mut line_of = vec![Some(0), Some(1)];

        let merged = stitch_fragments(&params(), &index, &mut lines, &mut line_of);

        assert_eq!(merged, 1);
        assert_eq!(line_of[0], line_of[1]);
        assert_eq!(lines.iter().flatten().count(), 1);
    }
}
