//! The mixed-direction ("down-then-up") composer, spec §4.5.

use crate::algo::ScaledRectAlgo;
use crate::color::ColorTypeHelper;
use crate::dispatch::run_staged;
use crate::error::ScaleError;
use crate::geom::GRect;
use crate::parallel::Parallelizer;
use crate::pixels::{PixelPlane, RowDrawer, SrcPixels};

/// Whether `src_span -> dst_span` is a mixed-direction scale relative to
/// the other axis: true when one axis grows and the other shrinks.
pub fn is_mixed_direction(src_rect: GRect, dst_rect: GRect) -> bool {
    let w_down = dst_rect.x_span < src_rect.x_span;
    let w_up = dst_rect.x_span > src_rect.x_span;
    let h_down = dst_rect.y_span < src_rect.y_span;
    let h_up = dst_rect.y_span > src_rect.y_span;
    (w_down && h_up) || (w_up && h_down)
}

/// Computes the intermediate rectangle spec §4.5 routes through: the
/// shrinking axis is clamped to its final destination span, the growing
/// axis is held at the source's span.
pub fn intermediate_rect(src_rect: GRect, dst_rect: GRect) -> GRect {
    let w_down = dst_rect.x_span < src_rect.x_span;
    let h_down = dst_rect.y_span < src_rect.y_span;

    let x_span = if w_down { dst_rect.x_span } else { src_rect.x_span };
    let y_span = if h_down { dst_rect.y_span } else { src_rect.y_span };

    GRect { x: 0, y: 0, x_span, y_span }
}

/// Scales `src_rect` to `dst_rect` (clipped by `dst_clip`) by first
/// downscaling the shrinking axis to an intermediate plane, then
/// upscaling the growing axis from that plane to the real destination.
#[allow(clippy::too_many_arguments)]
pub fn run_mixed(
    parallelizer: &dyn Parallelizer,
    algo: &dyn ScaledRectAlgo,
    helper: &dyn ColorTypeHelper,
    src_pixels: &dyn SrcPixels,
    src_rect: GRect,
    dst_rect: GRect,
    dst_clip: GRect,
    row_drawer: &dyn RowDrawer,
) -> Result<(), ScaleError> {
    let inter_rect = intermediate_rect(src_rect, dst_rect);
    let mut inter_plane = PixelPlane::new(inter_rect.x_span, inter_rect.y_span, 0);

    // Phase 1: drawer1, the downscaler. No clipping mid-pipeline.
    {
        let drawer1 = inter_plane.as_row_drawer();
        run_staged(parallelizer, algo, helper, src_pixels, src_rect, inter_rect, inter_rect, &drawer1)?;
    }
    // Phase 1 must fully complete (and its borrow end) before phase 2
    // reads the plane -- enforced here by drawer1's scope ending above.

    // Phase 2: drawer2, the upscaler, reading the intermediate plane and
    // writing the caller's real row sink.
    run_staged(parallelizer, algo, helper, &inter_plane, inter_rect, dst_rect, dst_clip, row_drawer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_mixed_direction() {
        let src = GRect::new(0, 0, 4, 2).unwrap();
        let dst = GRect::new(0, 0, 2, 4).unwrap();
        assert!(is_mixed_direction(src, dst));

        let same_dir = GRect::new(0, 0, 8, 8).unwrap();
        assert!(!is_mixed_direction(src, same_dir));
    }

    #[test]
    fn intermediate_rect_clamps_shrinking_axis_only() {
        let src = GRect::new(0, 0, 4, 2).unwrap();
        let dst = GRect::new(0, 0, 2, 4).unwrap();
        let inter = intermediate_rect(src, dst);
        // width shrinks 4 -> 2, so intermediate width is the dst width.
        assert_eq!(inter.x_span, 2);
        // height grows 2 -> 4, so intermediate height stays at src height.
        assert_eq!(inter.y_span, 2);
    }
}
