//! Nearest-neighbor resampling (spec §4.2).

use super::{map_to_src, round_half_away_from_zero, ScaledRectAlgo};
use crate::color::{Color32, ColorTypeHelper};
use crate::error::ScaleError;
use crate::geom::GRect;
use crate::pixels::{RowDrawer, SrcPixels};
use crate::scratch;

/// Default destination-area split threshold: roughly 256K pixels.
pub const DEFAULT_SPLIT_THRESHOLD: u64 = 256 * 1024;

#[derive(Debug, Clone, Copy)]
pub struct Nearest {
    pub dst_area_threshold_for_split: u64,
}

impl Default for Nearest {
    fn default() -> Self {
        Self { dst_area_threshold_for_split: DEFAULT_SPLIT_THRESHOLD }
    }
}

fn src_index(dst_index: i32, dst_origin: i32, dst_span: u32, src_origin: i32, src_span: u32) -> i32 {
    let f = map_to_src(dst_index, dst_origin, dst_span, src_origin, src_span);
    let rel = round_half_away_from_zero(f - f64::from(src_origin));
    let clamped = rel.clamp(0, i64::from(src_span) - 1);
    src_origin + clamped as i32
}

impl ScaledRectAlgo for Nearest {
    fn src_area_threshold_for_split(&self) -> u64 {
        u64::MAX
    }

    fn dst_area_threshold_for_split(&self) -> u64 {
        self.dst_area_threshold_for_split
    }

    fn iteration_span_shrink_factor(&self) -> f64 {
        0.0
    }

    fn iteration_span_growth_factor(&self) -> f64 {
        f64::INFINITY
    }

    fn draw_scaled_rect_chunk(
        &self,
        _helper: &dyn ColorTypeHelper,
        src_pixels: &dyn SrcPixels,
        src_rect: GRect,
        dst_rect: GRect,
        dst_rect_clipped: GRect,
        dst_y_start: i32,
        dst_y_end: i32,
        row_drawer: &dyn RowDrawer,
    ) -> Result<(), ScaleError> {
        if dst_rect_clipped.is_empty() {
            return Ok(());
        }

        let x_span = dst_rect_clipped.x_span as usize;
        let no_x_scaling = src_rect.x_span == dst_rect.x_span;
        let direct_array = src_pixels.color32_arr();

        // Fast path: aligned X axis plus a direct source array. We still
        // copy into scratch rather than aliasing the caller's array into
        // the row sink (spec §9 open question, resolved: copy by
        // default).
        if no_x_scaling && direct_array.is_some() {
            let arr = direct_array.unwrap();
            let stride = src_pixels.scanline_stride() as usize;
            let src_x0 = (dst_rect_clipped.x - dst_rect.x) + src_rect.x;
            let mut row_buf: Vec<Color32> = vec![0; x_span];

            let mut prev_sy: Option<i32> = None;
            for dst_y in dst_y_start..=dst_y_end {
                let sy = src_index(dst_y, dst_rect.y, dst_rect.y_span, src_rect.y, src_rect.y_span);
                if prev_sy != Some(sy) {
                    let row_start = (sy - src_pixels.rect().y) as usize * stride
                        + (src_x0 - src_pixels.rect().x) as usize;
                    row_buf.copy_from_slice(&arr[row_start..row_start + x_span]);
                    prev_sy = Some(sy);
                }
                row_drawer.draw_row(&row_buf, 0, dst_rect_clipped.x, dst_y, x_span);
            }
            return Ok(());
        }

        // General path: precompute the X index cache once, reuse across
        // all rows; recompute Y per row, reusing the row buffer when the
        // source row hasn't changed.
        let mut x_idx = scratch::borrow_big_int_buf();
        x_idx.resize(x_span, 0);
        for (i, dst_x) in (dst_rect_clipped.x..dst_rect_clipped.x + x_span as i32).enumerate() {
            x_idx.as_mut_slice()[i] =
                src_index(dst_x, dst_rect.x, dst_rect.x_span, src_rect.x, src_rect.x_span);
        }

        let mut row_buf: Vec<Color32> = vec![0; x_span];
        let mut prev_sy: Option<i32> = None;

        for dst_y in dst_y_start..=dst_y_end {
            let sy = src_index(dst_y, dst_rect.y, dst_rect.y_span, src_rect.y, src_rect.y_span);
            if prev_sy != Some(sy) {
                for (i, v) in row_buf.iter_mut().enumerate() {
                    let sx = x_idx.as_slice()[i];
                    *v = src_pixels.get_color32_at(sx, sy);
                }
                prev_sy = Some(sy);
            }
            row_drawer.draw_row(&row_buf, 0, dst_rect_clipped.x, dst_y, x_span);
        }

        Ok(())
    }
}
