//! Bicubic resampling via the Keys (1981) cubic-convolution kernel with
//! `A = -0.5` (spec §4.3).

use super::map_to_src;
use super::nearest::Nearest;
use super::ScaledRectAlgo;
use crate::color::{Color32, ColorTypeHelper};
use crate::error::ScaleError;
use crate::geom::GRect;
use crate::pixels::{RowDrawer, SrcPixels};

const CUBIC_A: f64 = -0.5;

/// The cubic-convolution weight function, `A = -0.5`. Negative for
/// `1 < |x| <= 2` (the kernel's negative lobes), zero beyond `|x| = 2`.
pub fn cubic_weight(x: f64) -> f64 {
    let ax = x.abs();
    if ax <= 1.0 {
        (CUBIC_A + 2.0) * ax.powi(3) - (CUBIC_A + 3.0) * ax.powi(2) + 1.0
    } else if ax <= 2.0 {
        CUBIC_A * (ax.powi(3) - 5.0 * ax.powi(2) + 8.0 * ax - 4.0)
    } else {
        0.0
    }
}

/// Destination-area split threshold: roughly 4K pixels.
pub const DEFAULT_DST_SPLIT_THRESHOLD: u64 = 4 * 1024;

#[derive(Debug, Clone, Copy)]
pub struct Bicubic {
    pub dst_area_threshold_for_split: u64,
}

impl Default for Bicubic {
    fn default() -> Self {
        Self { dst_area_threshold_for_split: DEFAULT_DST_SPLIT_THRESHOLD }
    }
}

#[inline]
fn unpack(c: Color32) -> (f64, f64, f64, f64) {
    (
        f64::from((c >> 24) as u8),
        f64::from((c >> 16) as u8),
        f64::from((c >> 8) as u8),
        f64::from(c as u8),
    )
}

impl ScaledRectAlgo for Bicubic {
    fn src_area_threshold_for_split(&self) -> u64 {
        u64::MAX
    }

    fn dst_area_threshold_for_split(&self) -> u64 {
        self.dst_area_threshold_for_split
    }

    fn iteration_span_shrink_factor(&self) -> f64 {
        0.5
    }

    fn iteration_span_growth_factor(&self) -> f64 {
        f64::INFINITY
    }

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
    ) -> Result<(), ScaleError> {
        if dst_rect_clipped.is_empty() {
            return Ok(());
        }

        // Identity fast path: 1:1 scaling is handled exactly (and more
        // cheaply) by nearest, which also preserves alpha exactly.
        if src_rect.x_span == dst_rect.x_span && src_rect.y_span == dst_rect.y_span {
            return Nearest::default().draw_scaled_rect_chunk(
                helper,
                src_pixels,
                src_rect,
                dst_rect,
                dst_rect_clipped,
                dst_y_start,
                dst_y_end,
                row_drawer,
            );
        }

        let x_span = dst_rect_clipped.x_span as usize;
        let mut row_buf: Vec<Color32> = vec![0; x_span];

        // Cache of the last native source color32 read and its
        // premultiplied conversion, since runs of equal source colors are
        // common across the 16 neighborhood reads per pixel.
        let mut last_native: Option<Color32> = None;
        let mut last_premul: (f64, f64, f64, f64) = (0.0, 0.0, 0.0, 0.0);

        for dst_y in dst_y_start..=dst_y_end {
            let src_yf = map_to_src(dst_y, dst_rect.y, dst_rect.y_span, src_rect.y, src_rect.y_span);
            let sy_floor = src_yf.floor();
            let fy = src_yf - sy_floor;
            let sy_floor = sy_floor as i32;

            let yw: [f64; 4] = std::array::from_fn(|j| cubic_weight(j as f64 - 1.0 - fy));

            for (i, dst_x) in (dst_rect_clipped.x..dst_rect_clipped.x + x_span as i32).enumerate() {
                let src_xf = map_to_src(dst_x, dst_rect.x, dst_rect.x_span, src_rect.x, src_rect.x_span);
                let sx_floor = src_xf.floor();
                let fx = src_xf - sx_floor;
                let sx_floor = sx_floor as i32;

                let xw: [f64; 4] = std::array::from_fn(|j| cubic_weight(j as f64 - 1.0 - fx));

                let mut sum = (0.0f64, 0.0f64, 0.0f64, 0.0f64);

                for ky in 0..4 {
                    let sy = src_rect.clamp_y(sy_floor + ky as i32 - 1);
                    let w_y = yw[ky];
                    if w_y == 0.0 {
                        continue;
                    }
                    for kx in 0..4 {
                        let sx = src_rect.clamp_x(sx_floor + kx as i32 - 1);
                        let w = xw[kx] * w_y;

                        let native = src_pixels.get_color32_at(sx, sy);
                        let premul = if last_native == Some(native) {
                            last_premul
                        } else {
                            let p = unpack(helper.as_premul32_from_type(native));
                            last_native = Some(native);
                            last_premul = p;
                            p
                        };

                        sum.0 += premul.0 * w;
                        sum.1 += premul.1 * w;
                        sum.2 += premul.2 * w;
                        sum.3 += premul.3 * w;
                    }
                }

                let round = |v: f64| (v + 0.5).floor();
                let premul = helper.to_valid_premul32(
                    round(sum.0) as f32,
                    round(sum.1) as f32,
                    round(sum.2) as f32,
                    round(sum.3) as f32,
                );
                row_buf[i] = helper.as_type_from_premul32(premul);
            }

            row_drawer.draw_row(&row_buf, 0, dst_rect_clipped.x, dst_y, x_span);
        }

        Ok(())
    }
}
