//! Read-only spatial index over a word set.
//!
//! Band queries use a `BTreeMap` keyed on vertical centre; right-neighbour
//! queries use an `rstar` R-tree. Small inputs skip both structures and scan
//! linearly, which gives the same answers.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use ordered_float::OrderedFloat;
use rstar::{AABB, RTree, RTreeObject};

use crate::utils::{HasBBox, cmp_f64};

use super::super::elements::Word;

/// Inputs with at most this many eligible words are scanned linearly.
pub const LINEAR_SCAN_LIMIT: usize = 32;

#[derive(Debug, Clone)]
struct IndexedBox {
    id: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for IndexedBox {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

struct SortedIndex {
    bands: BTreeMap<OrderedFloat<f64>, Vec<usize>>,
    tree: RTree<IndexedBox>,
}

/// Spatial index over the non-degenerate words of a slice.
///
/// Ids are positions in the slice given to `build`.
pub struct SpatialIndex<'a> {
    words: &'a [Word],
    /// Eligible ids sorted for the top-to-bottom sweep.
    order: Vec<usize>,
    sorted: Option<SortedIndex>,
}

impl<'a> SpatialIndex<'a> {
    /// Builds the index. Degenerate words are not indexed.
    pub fn build(words: &'a [Word]) -> Self {
        let mut order: Vec<usize> = (0..words.len())
            .filter(|&i| !words[i].is_degenerate())
            .collect();
        order.sort_by(|&a, &b| words[a].sweep_cmp(&words[b]).then(a.cmp(&b)));

        let sorted = if order.len() > LINEAR_SCAN_LIMIT {
            let mut bands: BTreeMap<OrderedFloat<f64>, Vec<usize>> = BTreeMap::new();
            let mut nodes = Vec::with_capacity(order.len());
            for &id in &order {
                let w = &words[id];
                bands.entry(OrderedFloat(w.ymid())).or_default().push(id);
                nodes.push(IndexedBox {
                    id,
                    envelope: AABB::from_corners([w.x0(), w.y0()], [w.x1(), w.y1()]),
                });
            }
            Some(SortedIndex {
                bands,
                tree: RTree::bulk_load(nodes),
            })
        } else {
            None
        };

        Self {
            words,
            order,
            sorted,
        }
    }

    /// Number of indexed (non-degenerate) words.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns true if the index uses the sorted structures rather than
    /// linear scans.
    pub fn is_sorted(&self) -> bool {
        self.sorted.is_some()
    }

    pub fn word(&self, id: usize) -> &'a Word {
        &self.words[id]
    }

    /// Indexed ids ordered by anchor, then left edge, then remaining geometry.
    pub fn sweep_order(&self) -> &[usize] {
        &self.order
    }

    /// Ids of all indexed words whose vertical centre lies in `[y0, y1]`,
    /// in no particular order.
    pub fn query_band(&self, y0: f64, y1: f64) -> Vec<usize> {
        if y0.is_nan() || y1.is_nan() || y0 > y1 {
            return Vec::new();
        }
        match &self.sorted {
            Some(sorted) => sorted
                .bands
                .range(OrderedFloat(y0)..=OrderedFloat(y1))
                .flat_map(|(_, ids)| ids.iter().copied())
                .collect(),
            None => self
                .order
                .iter()
                .copied()
                .filter(|&id| {
                    let c = self.words[id].ymid();
                    y0 <= c && c <= y1
                })
                .collect(),
        }
    }

    /// Closest indexed word to the right of `id`.
    ///
    /// A candidate must start right of the query word's left edge, overlap it
    /// vertically, and begin at most `max_gap` after its right edge.
    /// Ranked by horizontal gap, then vertical-centre distance, then id.
    pub fn nearest_right(&self, id: usize, max_gap: f64) -> Option<usize> {
        let word = &self.words[id];
        let is_candidate = |cid: usize| {
            let c = &self.words[cid];
            cid != id
                && c.x0() > word.x0()
                && word.bbox().voverlap(c.bbox()) > 0.0
                && word.bbox().hdistance(c.bbox()) <= max_gap
        };

        let candidates: Vec<usize> = match &self.sorted {
            Some(sorted) => {
                let env = AABB::from_corners(
                    [word.x0(), word.y0()],
                    [word.x1() + max_gap.max(0.0), word.y1()],
                );
                sorted
                    .tree
                    .locate_in_envelope_intersecting(&env)
                    .map(|node| node.id)
                    .filter(|&cid| is_candidate(cid))
                    .collect()
            }
            None => self
                .order
                .iter()
                .copied()
                .filter(|&cid| is_candidate(cid))
                .collect(),
        };

        candidates
            .into_iter()
            .min_by(|&a, &b| self.right_rank(word, a, b))
    }

    fn right_rank(&self, word: &Word, a: usize, b: usize) -> Ordering {
        let wa = &self.words[a];
        let wb = &self.words[b];
        cmp_f64(word.bbox().hdistance(wa.bbox()), word.bbox().hdistance(wb.bbox()))
            .then_with(|| {
                cmp_f64(
                    (wa.ymid() - word.ymid()).abs(),
                    (wb.ymid() - word.ymid()).abs(),
                )
            })
            .then(a.cmp(&b))
    }
}
