//! Greedy word wrap.
//!
//! [`layout`] is the only wrapping routine in the crate. The renderer paints the
//! lines it returns and [`super::bounds`] derives hit-test rectangles from the
//! same result, so what is drawn is exactly what is hit-tested.

use crate::editor::geometry::Point;

use super::metrics::FontMetrics;

/// One laid-out line, positioned by its baseline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutLine {
    pub text: String,
    pub baseline_y: i32,
    pub width: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutResult {
    pub lines: Vec<LayoutLine>,
    /// Start of the line after the last emitted one (`x` is the layout start).
    pub final_cursor: Point,
    pub max_line_width: i32,
    pub total_height: i32,
}

impl LayoutResult {
    fn empty(start: Point, line_height: i32) -> Self {
        Self {
            lines: Vec::new(),
            final_cursor: start,
            max_line_width: 0,
            total_height: line_height,
        }
    }

    /// Baseline point just after the last glyph, where an edit caret belongs.
    pub fn caret(&self) -> Point {
        match self.lines.last() {
            Some(line) => Point::new(self.final_cursor.x + line.width, line.baseline_y),
            None => self.final_cursor,
        }
    }
}

/// Accumulates emitted lines and advances the baseline.
struct LineSink {
    lines: Vec<LayoutLine>,
    baseline_y: i32,
    line_height: i32,
}

impl LineSink {
    fn new(start: Point, line_height: i32) -> Self {
        Self {
            lines: Vec::new(),
            baseline_y: start.y,
            line_height,
        }
    }

    fn emit(&mut self, text: String, width: i32) {
        self.lines.push(LayoutLine {
            text,
            baseline_y: self.baseline_y,
            width,
        });
        self.baseline_y += self.line_height;
    }

    fn finish(self, start: Point) -> LayoutResult {
        let max_line_width = self.lines.iter().map(|l| l.width).max().unwrap_or(0);
        let total_height = self.line_height * (self.lines.len() as i32).max(1);
        LayoutResult {
            lines: self.lines,
            final_cursor: Point::new(start.x, self.baseline_y),
            max_line_width,
            total_height,
        }
    }
}

/// Wrap `text` into lines no wider than `max_width`, first baseline at `start.y`.
///
/// Words are separated by single spaces only. A word wider than `max_width` is
/// broken into the longest fitting prefixes, each on its own line; a prefix is
/// never shorter than one character, so a single glyph wider than `max_width`
/// still gets a line. Empty text or a non-positive `max_width` yields an empty
/// result with `final_cursor == start`.
pub fn layout(text: &str, start: Point, max_width: i32, metrics: &dyn FontMetrics) -> LayoutResult {
    let line_height = metrics.line_height();
    if text.is_empty() || max_width <= 0 {
        return LayoutResult::empty(start, line_height);
    }

    let mut sink = LineSink::new(start, line_height);
    let mut current = String::new();

    for word in text.split(' ') {
        let candidate = if current.is_empty() {
            word.to_owned()
        } else {
            format!("{current} {word}")
        };
        if metrics.advance_width(&candidate) <= max_width {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            let width = metrics.advance_width(&current);
            sink.emit(std::mem::take(&mut current), width);
        }

        if metrics.advance_width(word) <= max_width {
            current = word.to_owned();
        } else {
            break_long_word(word, max_width, metrics, &mut sink);
        }
    }

    if !current.is_empty() {
        let width = metrics.advance_width(&current);
        sink.emit(current, width);
    }

    sink.finish(start)
}

fn break_long_word(word: &str, max_width: i32, metrics: &dyn FontMetrics, sink: &mut LineSink) {
    let mut rest = word;
    while !rest.is_empty() {
        let split = longest_fitting_prefix(rest, max_width, metrics);
        let (fragment, remainder) = rest.split_at(split);
        sink.emit(fragment.to_owned(), metrics.advance_width(fragment));
        rest = remainder;
    }
}

/// Byte length of the longest prefix of `word` that fits, at least one char.
fn longest_fitting_prefix(word: &str, max_width: i32, metrics: &dyn FontMetrics) -> usize {
    let mut fit = word.chars().next().map_or(0, char::len_utf8);
    for (idx, ch) in word.char_indices().skip(1) {
        let end = idx + ch.len_utf8();
        if metrics.advance_width(&word[..end]) > max_width {
            break;
        }
        fit = end;
    }
    fit
}
