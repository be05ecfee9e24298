//! Text layout engine: font metrics, greedy word wrap and bounds.
//!
//! - [`metrics`] - the [`FontMetrics`] seam and fixed-pitch metrics
//! - [`layout`] - the single word-wrap implementation
//! - [`bounds`] - rectangles derived from a layout, plus the cache record

mod bounds;
mod layout;
mod metrics;

#[cfg(test)]
mod tests;

pub use bounds::{layout_bounds, text_bounds, CachedBounds};
pub use layout::{layout, LayoutLine, LayoutResult};
pub use metrics::{FontMetrics, MonospaceMetrics};
