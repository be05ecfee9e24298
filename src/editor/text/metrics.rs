//! Font metrics consumed by text layout.

/// Advance widths and vertical metrics for the active annotation font.
pub trait FontMetrics: Send + Sync {
    /// Rendered width of `text`, rounded up to whole pixels.
    fn advance_width(&self, text: &str) -> i32;
    fn ascent(&self) -> i32;
    fn descent(&self) -> i32;
    fn leading(&self) -> i32;

    fn line_height(&self) -> i32 {
        self.ascent() + self.descent() + self.leading()
    }
}

/// Fixed-pitch metrics: every character advances by the same width.
///
/// The advance stays fractional and only the summed width of a run is rounded,
/// so long lines do not drift from the painted glyphs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    pub advance: f32,
    pub ascent: i32,
    pub descent: i32,
    pub leading: i32,
}

impl MonospaceMetrics {
    pub const fn new(advance: f32, ascent: i32, descent: i32, leading: i32) -> Self {
        Self {
            advance,
            ascent,
            descent,
            leading,
        }
    }

    /// Metrics for a font with the given glyph advance and row height, as
    /// reported by the painter's font.
    pub fn measured(advance: f32, row_height: f32) -> Self {
        let line = (row_height.round() as i32).max(2);
        let ascent = ((line as f32 * 0.8).round() as i32).clamp(1, line - 1);
        Self {
            advance: advance.max(0.5),
            ascent,
            descent: line - ascent,
            leading: 0,
        }
    }

    /// Estimate used until the painter's font can be measured.
    pub fn for_font_size(font_size: f32) -> Self {
        let size = font_size.max(1.0);
        Self::measured(size * 0.6, size * 1.16)
    }
}

impl FontMetrics for MonospaceMetrics {
    fn advance_width(&self, text: &str) -> i32 {
        (text.chars().count() as f32 * self.advance).ceil() as i32
    }

    fn ascent(&self) -> i32 {
        self.ascent
    }

    fn descent(&self) -> i32 {
        self.descent
    }

    fn leading(&self) -> i32 {
        self.leading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monospace_width_counts_chars_not_bytes() {
        let metrics = MonospaceMetrics::new(10.0, 12, 3, 0);
        assert_eq!(metrics.advance_width("abc"), 30);
        assert_eq!(metrics.advance_width("héé"), 30);
        assert_eq!(metrics.advance_width(""), 0);
        assert_eq!(metrics.line_height(), 15);
    }

    #[test]
    fn test_fractional_advance_rounds_only_the_run() {
        let metrics = MonospaceMetrics::measured(7.2246094, 13.96875);
        assert_eq!(metrics.advance_width("a"), 8);
        // 40 * 7.2246 = 288.98, per-glyph rounding would give 280 or 320
        assert_eq!(metrics.advance_width(&"a".repeat(40)), 289);
        assert_eq!(metrics.line_height(), 14);
    }

    #[test]
    fn test_for_font_size_never_degenerates() {
        let metrics = MonospaceMetrics::for_font_size(0.0);
        assert!(metrics.advance >= 0.5);
        assert!(metrics.ascent >= 1);
        assert!(metrics.descent >= 1);

        let metrics = MonospaceMetrics::for_font_size(20.0);
        assert!((metrics.advance - 12.0).abs() < 1e-3);
        assert_eq!(metrics.line_height(), 23);
    }
}
