//! The `ScaledRectAlgo` capability (spec §6) and its two implementations.

pub mod bicubic;
pub mod nearest;

use crate::color::ColorTypeHelper;
use crate::error::ScaleError;
use crate::geom::GRect;
use crate::pixels::{RowDrawer, SrcPixels};

/// One resampling algorithm (nearest-neighbor or bicubic), plus the
/// per-algorithm staging constants spec §3 calls the "algorithm
/// descriptor".
///
/// Implementations must be thread-safe and non-blocking: the dispatcher
/// (spec §4.6) calls `draw_scaled_rect_chunk` concurrently from multiple
/// worker threads with disjoint destination Y ranges.
pub trait ScaledRectAlgo: Sync {
    /// Destination-area-independent threshold: a chunk is worth splitting
    /// once `width * rows * (src_area / dst_area) >= this`.
    fn src_area_threshold_for_split(&self) -> u64;

    /// A chunk is worth splitting once `width * rows >= this`, regardless
    /// of the source/destination area ratio.
    fn dst_area_threshold_for_split(&self) -> u64;

    /// Per-iteration span shrink factor in `[0, 1)`. `0.0` means "one
    /// step" -- no iterative staging, the full shrink happens in a single
    /// call.
    fn iteration_span_shrink_factor(&self) -> f64;

    /// Per-iteration span growth factor, `> 1.0` or `f64::INFINITY`.
    /// `INFINITY` means "one step".
    fn iteration_span_growth_factor(&self) -> f64;

    /// Fills every destination pixel in `[dst_y_start, dst_y_end]` (rows,
    /// inclusive) within `dst_rect_clipped` with its resampled color,
    /// mapping coordinates against the logical (unclipped) `src_rect` /
    /// `dst_rect` pair.
    #[allow(clippy::too_many_arguments)]
    fn draw_scaled_rect_chunk(
        &self,
        helper: &dyn ColorTypeHelper,
        src_pixels: &dyn SrcPixels,
        src_rect: GRect,
        dst_rect: GRect,
        dst_rect_clipped: GRect,
        dst_y_start: i32,
        dst_y_end: i32,
        row_drawer: &dyn RowDrawer,
    ) -> Result<(), ScaleError>;
}

/// The sample-coordinate mapping shared by both algorithms (spec §4.1):
/// maps a destination index to the real-valued source position of that
/// destination pixel's center.
#[inline]
pub(crate) fn map_to_src(dst_index: i32, dst_origin: i32, dst_span: u32, src_origin: i32, src_span: u32) -> f64 {
    let di = f64::from(dst_index - dst_origin);
    f64::from(src_origin) + (di + 0.5) * f64::from(src_span) / f64::from(dst_span) - 0.5
}

/// Round half away from zero -- the rounding convention spec §4.1 and §9
/// lock down via end-to-end test S2.
#[inline]
pub(crate) fn round_half_away_from_zero(x: f64) -> i64 {
    if x >= 0.0 { (x + 0.5).floor() as i64 } else { (x - 0.5).ceil() as i64 }
}
