use super::*;
use crate::editor::geometry::{Point, Rect};

const METRICS: MonospaceMetrics = MonospaceMetrics::new(10.0, 12, 3, 0);

fn line_texts(result: &LayoutResult) -> Vec<&str> {
    result.lines.iter().map(|l| l.text.as_str()).collect()
}

fn baselines(result: &LayoutResult) -> Vec<i32> {
    result.lines.iter().map(|l| l.baseline_y).collect()
}

#[test]
fn test_wraps_words_greedily() {
    let result = layout("The quick brown fox", Point::new(10, 20), 60, &METRICS);

    assert_eq!(line_texts(&result), vec!["The", "quick", "brown", "fox"]);
    assert_eq!(baselines(&result), vec![20, 35, 50, 65]);
    assert_eq!(result.max_line_width, 50);
    assert_eq!(result.total_height, 60);
    assert_eq!(result.final_cursor, Point::new(10, 80));
}

#[test]
fn test_keeps_words_together_when_they_fit() {
    let result = layout("The quick brown fox", Point::new(0, 12), 110, &METRICS);

    assert_eq!(line_texts(&result), vec!["The quick", "brown fox"]);
    assert_eq!(result.max_line_width, 90);
}

#[test]
fn test_breaks_long_word_into_fragments() {
    let result = layout("supercalifragilistic", Point::new(0, 12), 40, &METRICS);

    assert_eq!(
        line_texts(&result),
        vec!["supe", "rcal", "ifra", "gili", "stic"]
    );
    assert_eq!(result.max_line_width, 40);
    assert_eq!(result.total_height, 75);
}

#[test]
fn test_long_word_after_short_word_starts_on_fresh_line() {
    let result = layout("hi abcdefgh", Point::new(0, 12), 40, &METRICS);

    assert_eq!(line_texts(&result), vec!["hi", "abcd", "efgh"]);
}

#[test]
fn test_fragment_is_never_shorter_than_one_char() {
    let result = layout("abc", Point::new(0, 12), 5, &METRICS);

    assert_eq!(line_texts(&result), vec!["a", "b", "c"]);
    assert!(result.lines.iter().all(|l| l.width == 10));
}

#[test]
fn test_multibyte_word_breaks_on_char_boundaries() {
    let result = layout("ééééé", Point::new(0, 12), 20, &METRICS);

    assert_eq!(line_texts(&result), vec!["éé", "éé", "é"]);
}

#[test]
fn test_empty_text_yields_empty_layout() {
    let start = Point::new(7, 30);
    let result = layout("", start, 100, &METRICS);

    assert!(result.lines.is_empty());
    assert_eq!(result.final_cursor, start);
    assert_eq!(result.max_line_width, 0);
    assert_eq!(result.total_height, 15);
    assert_eq!(result.caret(), start);
}

#[test]
fn test_non_positive_width_yields_empty_layout() {
    let start = Point::new(7, 30);
    for max_width in [0, -25] {
        let result = layout("hello", start, max_width, &METRICS);
        assert!(result.lines.is_empty());
        assert_eq!(result.final_cursor, start);
    }
}

#[test]
fn test_repeated_spaces_are_not_normalized() {
    let result = layout("a  b", Point::new(0, 12), 100, &METRICS);

    assert_eq!(line_texts(&result), vec!["a  b"]);
    assert_eq!(result.max_line_width, 40);
}

#[test]
fn test_layout_is_deterministic() {
    let text = "Lorem ipsum dolor sit amet, consectetur adipiscing elit";
    let a = layout(text, Point::new(3, 40), 87, &METRICS);
    let b = layout(text, Point::new(3, 40), 87, &METRICS);
    assert_eq!(a, b);
}

#[test]
fn test_lines_respect_max_width() {
    let texts = [
        "The quick brown fox jumps over the lazy dog",
        "antidisestablishmentarianism is long",
        "a b c d e f g",
        "x",
    ];
    for text in texts {
        for max_width in [5, 10, 35, 60, 120] {
            let result = layout(text, Point::new(0, 12), max_width, &METRICS);
            for line in &result.lines {
                let single_char = line.text.chars().count() == 1;
                assert!(
                    line.width <= max_width || single_char,
                    "{text:?} at {max_width}: line {:?} is {} wide",
                    line.text,
                    line.width
                );
                assert_eq!(line.width, METRICS.advance_width(&line.text));
            }
        }
    }
}

#[test]
fn test_caret_follows_last_line() {
    let result = layout("The quick brown fox", Point::new(10, 20), 60, &METRICS);
    assert_eq!(result.caret(), Point::new(40, 65));
}

#[test]
fn test_bounds_match_layout() {
    let rect = text_bounds(Point::new(10, 20), "The quick brown fox", 60, &METRICS);
    assert_eq!(rect, Rect::new(10, 8, 50, 60));
}

#[test]
fn test_empty_text_bounds_is_caret_sized() {
    let rect = text_bounds(Point::new(10, 20), "", 60, &METRICS);
    assert_eq!(rect, Rect::new(10, 8, 0, 15));
}

#[test]
fn test_bounds_agree_with_drawn_lines() {
    let position = Point::new(25, 60);
    let text = "render and hit test must agree exactly";
    for max_width in [30, 75, 140, 400] {
        let drawn = layout(text, position, max_width, &METRICS);

        // Rectangle implied by the glyph runs the renderer paints.
        let top = drawn.lines[0].baseline_y - METRICS.ascent();
        let bottom = drawn.lines.last().map_or(top, |l| l.baseline_y + METRICS.descent());
        let right = drawn
            .lines
            .iter()
            .map(|l| position.x + l.width)
            .max()
            .unwrap_or(position.x);

        let hit = text_bounds(position, text, max_width, &METRICS);
        assert_eq!(hit, layout_bounds(position, &drawn, &METRICS));
        assert_eq!(hit.y, top);
        assert_eq!(hit.bottom(), bottom);
        assert_eq!(hit.right(), right);
    }
}
