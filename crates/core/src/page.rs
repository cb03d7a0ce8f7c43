//! Pages and multi-page collections of words.
//!
//! A `Page` carries its size and coordinate origin so words coming from
//! engines with a bottom-left origin can be rebased before reconstruction.
//! A `WordMaze` is an ordered list of pages.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LayoutError, Result};
use crate::layout::{LayoutDocument, LayoutParams, Word, reconstruct};

/// Page size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawShape")]
pub struct Shape {
    width: f64,
    height: f64,
}

#[derive(Deserialize)]
struct RawShape {
    width: f64,
    height: f64,
}

impl TryFrom<RawShape> for Shape {
    type Error = LayoutError;

    fn try_from(raw: RawShape) -> Result<Self> {
        Shape::new(raw.width, raw.height)
    }
}

impl Shape {
    pub fn new(width: f64, height: f64) -> Result<Self> {
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            return Err(LayoutError::geometry(format!(
                "invalid page shape {}x{}",
                width, height
            )));
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

/// Corner of the page that coordinates are measured from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Origin {
    #[default]
    TopLeft,
    BottomLeft,
}

/// Words of a single page together with the page geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    shape: Shape,
    #[serde(default)]
    origin: Origin,
    #[serde(default)]
    words: Vec<Word>,
}

impl Page {
    pub fn new(shape: Shape, words: Vec<Word>, origin: Origin) -> Self {
        Self {
            shape,
            origin,
            words,
        }
    }

    /// A top-left page just large enough to hold `words`.
    pub fn fit(words: Vec<Word>) -> Self {
        let (width, height) = words.iter().fold((0.0_f64, 0.0_f64), |(w, h), word| {
            (w.max(word.bbox().x1()), h.max(word.bbox().y1()))
        });
        Self {
            shape: Shape { width, height },
            origin: Origin::TopLeft,
            words,
        }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Re-expresses every word relative to `origin`. Returns an unchanged
    /// copy when the page already uses it.
    pub fn rebase(&self, origin: Origin) -> Page {
        if origin == self.origin {
            return self.clone();
        }
        let height = self.shape.height;
        Page {
            shape: self.shape,
            origin,
            words: self.words.iter().map(|w| w.flip_vertical(height)).collect(),
        }
    }

    /// Applies `f` to every word, keeping shape and origin.
    pub fn map(&self, f: impl Fn(&Word) -> Word) -> Page {
        Page {
            shape: self.shape,
            origin: self.origin,
            words: self.words.iter().map(f).collect(),
        }
    }

    /// Fallible variant of `map`, for transforms that rebuild geometry.
    pub fn try_map(&self, f: impl Fn(&Word) -> Result<Word>) -> Result<Page> {
        Ok(Page {
            shape: self.shape,
            origin: self.origin,
            words: self.words.iter().map(f).collect::<Result<Vec<_>>>()?,
        })
    }

    /// Keeps the words matching `pred`, preserving order, shape and origin.
    pub fn filter(&self, pred: impl Fn(&Word) -> bool) -> Page {
        Page {
            shape: self.shape,
            origin: self.origin,
            words: self.words.iter().filter(|w| pred(w)).cloned().collect(),
        }
    }

    /// Reconstructs the page layout in top-left coordinates.
    pub fn reconstruct(&self, params: &LayoutParams) -> Result<LayoutDocument> {
        let page = self.rebase(Origin::TopLeft);
        reconstruct(page.words, params)
    }
}

/// One word flattened with its page number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordRecord {
    pub page: usize,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// An ordered collection of pages.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WordMaze {
    pages: Vec<Page>,
}

impl WordMaze {
    pub fn new(pages: Vec<Page>) -> Self {
        Self { pages }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn push(&mut self, page: Page) {
        self.pages.push(page);
    }

    pub fn shapes(&self) -> Vec<Shape> {
        self.pages.iter().map(|p| p.shape()).collect()
    }

    /// Every word of every page as a flat record, pages in order.
    pub fn records(&self) -> impl Iterator<Item = WordRecord> + '_ {
        self.pages.iter().enumerate().flat_map(|(page, p)| {
            p.words().iter().map(move |w| WordRecord {
                page,
                x0: w.bbox().x0(),
                y0: w.bbox().y0(),
                x1: w.bbox().x1(),
                y1: w.bbox().y1(),
                text: w.text().to_string(),
                confidence: w.confidence(),
            })
        })
    }

    pub fn map(&self, f: impl Fn(&Word) -> Word) -> WordMaze {
        WordMaze {
            pages: self.pages.iter().map(|p| p.map(&f)).collect(),
        }
    }

    pub fn filter(&self, pred: impl Fn(&Word) -> bool) -> WordMaze {
        WordMaze {
            pages: self.pages.iter().map(|p| p.filter(&pred)).collect(),
        }
    }

    /// Reconstructs every page independently, in parallel.
    /// Documents are returned in page order.
    pub fn reconstruct(&self, params: &LayoutParams) -> Result<Vec<LayoutDocument>> {
        params.validate()?;
        debug!(pages = self.pages.len(), "reconstructing pages");
        self.pages
            .par_iter()
            .map(|page| page.reconstruct(params))
            .collect()
    }
}

impl FromIterator<Page> for WordMaze {
    fn from_iter<I: IntoIterator<Item = Page>>(iter: I) -> Self {
        Self {
            pages: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::BoundingBox;

    fn textbox(text: &str, x0: f64, x1: f64, y0: f64, y1: f64, confidence: f64) -> Word {
        Word::from_coords(text, x0, y0, x1, y1)
            .unwrap()
            .with_confidence(confidence)
            .unwrap()
    }

    fn sample_page() -> Page {
        Page::new(
            Shape::new(80.0, 100.0).unwrap(),
            vec![
                textbox("Hello", 10.0, 50.0, 20.0, 30.0, 0.7),
                textbox("Bye", 60.0, 75.0, 80.0, 85.0, 0.6),
            ],
            Origin::TopLeft,
        )
    }

    fn boxes(page: &Page) -> Vec<(f64, f64, f64, f64)> {
        page.words().iter().map(|w| w.bbox().bbox()).collect()
    }

    #[test]
    fn rebase_flips_vertical_axis() {
        let page = sample_page();
        let rebased = page.rebase(Origin::BottomLeft);
        assert_eq!(rebased.origin(), Origin::BottomLeft);
        assert_eq!(rebased.shape(), page.shape());
        assert_eq!(
            boxes(&rebased),
            vec![(10.0, 70.0, 50.0, 80.0), (60.0, 15.0, 75.0, 20.0)]
        );
        assert_eq!(page.rebase(Origin::TopLeft), page);
        assert_eq!(rebased.rebase(Origin::TopLeft), page);
    }

    #[test]
    fn try_map_pads_boxes() {
        let padded = sample_page()
            .try_map(|w| {
                let b = w.bbox();
                let bbox = BoundingBox::new(b.x0() - 2.0, b.y0() - 2.0, b.x1() + 2.0, b.y1() + 2.0)?;
                Ok(w.with_bbox(bbox))
            })
            .unwrap();
        assert_eq!(
            boxes(&padded),
            vec![(8.0, 18.0, 52.0, 32.0), (58.0, 78.0, 77.0, 87.0)]
        );
        assert_eq!(padded.words()[0].confidence(), Some(0.7));
    }

    #[test]
    fn filter_by_confidence() {
        let confident = sample_page().filter(|w| w.confidence().unwrap_or(0.0) > 0.65);
        assert_eq!(confident.len(), 1);
        assert_eq!(confident.words()[0].text(), "Hello");
        assert_eq!(confident.shape(), sample_page().shape());
    }

    #[test]
    fn map_uppercases_text() {
        let upper = sample_page().map(|w| w.with_text(w.text().to_uppercase()));
        let texts: Vec<&str> = upper.words().iter().map(|w| w.text()).collect();
        assert_eq!(texts, vec!["HELLO", "BYE"]);
    }

    #[test]
    fn maze_records_carry_page_numbers() {
        let second = Page::new(
            Shape::new(200.0, 50.0).unwrap(),
            vec![textbox("Hey ho", 110.0, 180.0, 40.0, 45.0, 0.2)],
            Origin::BottomLeft,
        );
        let maze = WordMaze::new(vec![sample_page(), second]);

        assert_eq!(
            maze.shapes(),
            vec![
                Shape::new(80.0, 100.0).unwrap(),
                Shape::new(200.0, 50.0).unwrap()
            ]
        );

        let records: Vec<(usize, String)> = maze.records().map(|r| (r.page, r.text)).collect();
        assert_eq!(
            records,
            vec![
                (0, "Hello".to_string()),
                (0, "Bye".to_string()),
                (1, "Hey ho".to_string())
            ]
        );

        let filtered = maze.filter(|w| w.confidence().unwrap_or(0.0) >= 0.65);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered.pages()[0].len(), 1);
        assert!(filtered.pages()[1].is_empty());
    }

    #[test]
    fn shape_rejects_negative_sizes() {
        assert!(Shape::new(-1.0, 10.0).is_err());
        assert!(Shape::new(10.0, f64::NAN).is_err());
    }

    #[test]
    fn page_deserializes_with_default_origin() {
        let page: Page = serde_json::from_str(
            r#"{"shape":{"width":100,"height":50},"words":[{"text":"a","x0":0,"y0":0,"x1":5,"y1":5}]}"#,
        )
        .unwrap();
        assert_eq!(page.origin(), Origin::TopLeft);
        assert_eq!(page.len(), 1);

        let flipped: Page = serde_json::from_str(
            r#"{"shape":{"width":100,"height":50},"origin":"bottom-left","words":[]}"#,
        )
        .unwrap();
        assert_eq!(flipped.origin(), Origin::BottomLeft);
    }
}
