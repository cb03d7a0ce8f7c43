//! Tests for pages, multi-page mazes and their output converters.

use wordmaze_core::api::{reconstruct_pages, reconstruct_to_writer};
use wordmaze_core::converter::JsonConverter;
use wordmaze_core::layout::{LayoutParams, Word};
use wordmaze_core::page::{Origin, Page, Shape, WordMaze};

fn word(text: &str, x0: f64, y0: f64, x1: f64, y1: f64) -> Word {
    Word::from_coords(text, x0, y0, x1, y1).unwrap()
}

fn bottom_left_page() -> Page {
    Page::new(
        Shape::new(200.0, 100.0).unwrap(),
        vec![
            word("bottom", 0.0, 10.0, 40.0, 20.0),
            word("top", 0.0, 80.0, 30.0, 90.0),
            word("right", 35.0, 80.0, 60.0, 90.0),
        ],
        Origin::BottomLeft,
    )
}

#[test]
fn test_bottom_left_page_reads_from_the_top() {
    let doc = bottom_left_page()
        .reconstruct(&LayoutParams::default())
        .unwrap();
    insta::assert_snapshot!(doc.text(), @r"
    top right

    bottom
    ");
    // Output geometry is top-left.
    assert_eq!(doc.blocks()[0].bbox().y0(), 10.0);
}

#[test]
fn test_pages_come_back_in_order() {
    let shape = Shape::new(100.0, 100.0).unwrap();
    let maze: WordMaze = (0..12)
        .map(|i| {
            Page::new(
                shape,
                vec![word(&format!("page{i}"), 0.0, 0.0, 50.0, 10.0)],
                Origin::TopLeft,
            )
        })
        .collect();

    let docs = reconstruct_pages(&maze, &LayoutParams::default()).unwrap();
    let texts: Vec<String> = docs.iter().map(|d| d.text()).collect();
    let expected: Vec<String> = (0..12).map(|i| format!("page{i}")).collect();
    assert_eq!(texts, expected);
}

#[test]
fn test_maze_rejects_bad_params() {
    let maze = WordMaze::new(vec![bottom_left_page()]);
    let params = LayoutParams::default().with_word_gap_tolerance(f64::INFINITY);
    assert!(maze.reconstruct(&params).is_err());
}

#[test]
fn test_maze_from_json() {
    let maze: WordMaze = serde_json::from_str(
        r#"{
            "pages": [
                {
                    "shape": {"width": 100, "height": 50},
                    "origin": "bottom-left",
                    "words": [
                        {"text": "Hello", "box": {"x0": 0, "y0": 30, "x1": 30, "y1": 40}, "confidence": 0.9},
                        {"text": "world", "x0": 35, "y0": 30, "x1": 70, "y1": 40}
                    ]
                }
            ]
        }"#,
    )
    .unwrap();

    let records: Vec<_> = maze.records().collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].confidence, Some(0.9));
    assert_eq!(records[1].confidence, None);

    let mut out = Vec::new();
    reconstruct_to_writer(&maze, &LayoutParams::default(), &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "Hello world\n\x0c");
}

#[test]
fn test_maze_rejects_inverted_box() {
    let result: Result<WordMaze, _> = serde_json::from_str(
        r#"{"pages": [{"shape": {"width": 10, "height": 10},
                       "words": [{"text": "x", "x0": 5, "y0": 0, "x1": 1, "y1": 4}]}]}"#,
    );
    assert!(result.is_err());
}

#[test]
fn test_json_output_lists_pages() {
    let maze = WordMaze::new(vec![bottom_left_page(), bottom_left_page()]);
    let docs = maze.reconstruct(&LayoutParams::default()).unwrap();

    let mut out = Vec::new();
    JsonConverter::new(&mut out, true).write_pages(&docs).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

    let pages = value.as_array().unwrap();
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0]["page"], 1);
    assert_eq!(pages[1]["page"], 2);
    let first_line = &pages[0]["blocks"][0]["lines"][0];
    assert_eq!(first_line["words"][1]["text"], "right");
    assert_eq!(first_line["bbox"]["y0"], 10.0);
}
