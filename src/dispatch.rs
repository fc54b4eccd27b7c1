//! The parallel dispatcher (spec §4.6) and the iterative-staging pipeline
//! that drives a single same-direction scale (spec §4.4) through it,
//! stage by stage.

use crate::algo::ScaledRectAlgo;
use crate::color::ColorTypeHelper;
use crate::error::ScaleError;
use crate::geom::GRect;
use crate::parallel::{Parallelizer, Task};
use crate::pixels::{PixelPlane, RowDrawer, SrcPixels};
use crate::split::{is_worth_splitting, split_range};
use crate::stage::{stage_spans, zip_stage_spans};

/// Splits `dst_rect_clipped`'s Y range into chunks per the split heuristic
/// and runs `algo.draw_scaled_rect_chunk` on each, in parallel, via
/// `parallelizer`. `src_rect`/`dst_rect` are the *pre-clip* logical
/// rectangles used for both coordinate mapping and the `rho` ratio in the
/// split predicate; `dst_rect_clipped` bounds the actual work.
#[allow(clippy::too_many_arguments)]
pub fn run_chunks(
    parallelizer: &dyn Parallelizer,
    algo: &dyn ScaledRectAlgo,
    helper: &dyn ColorTypeHelper,
    src_pixels: &dyn SrcPixels,
    src_rect: GRect,
    dst_rect: GRect,
    dst_rect_clipped: GRect,
    row_drawer: &dyn RowDrawer,
) -> Result<(), ScaleError> {
    if dst_rect_clipped.is_empty() {
        return Ok(());
    }

    let rho = src_rect.area() as f64 / dst_rect.area() as f64;
    let width = dst_rect_clipped.x_span;
    let src_t = algo.src_area_threshold_for_split();
    let dst_t = algo.dst_area_threshold_for_split();

    let y_start = dst_rect_clipped.y;
    let y_end = dst_rect_clipped.y + dst_rect_clipped.y_span as i32 - 1;

    let mut tasks: Vec<Task<'_>> = Vec::new();
    collect_chunks(src_t, dst_t, rho, width, y_start, y_end, &mut |ys, ye| {
        tasks.push(Box::new(move || {
            algo.draw_scaled_rect_chunk(helper, src_pixels, src_rect, dst_rect, dst_rect_clipped, ys, ye, row_drawer)
        }));
    });

    parallelizer.execute_and_wait(tasks)
}

fn collect_chunks(
    src_t: u64,
    dst_t: u64,
    rho: f64,
    width: u32,
    y_start: i32,
    y_end: i32,
    emit: &mut dyn FnMut(i32, i32),
) {
    let rows = (y_end - y_start + 1) as u32;
    if is_worth_splitting(src_t, dst_t, rho, width, rows) {
        let (left, right) = split_range(y_start, y_end);
        collect_chunks(src_t, dst_t, rho, width, left.0, left.1, emit);
        collect_chunks(src_t, dst_t, rho, width, right.0, right.1, emit);
    } else {
        emit(y_start, y_end);
    }
}

/// Drives a single same-direction scale (both axes shrinking, both
/// growing, or unchanged -- never mixed) from `src_pixels`/`src_rect` to
/// `dst_rect` clipped by `dst_clip`, iterating through intermediate
/// stages per spec §4.4 and writing the final stage to `row_drawer`.
#[allow(clippy::too_many_arguments)]
pub fn run_staged(
    parallelizer: &dyn Parallelizer,
    algo: &dyn ScaledRectAlgo,
    helper: &dyn ColorTypeHelper,
    src_pixels: &dyn SrcPixels,
    src_rect: GRect,
    dst_rect: GRect,
    dst_clip: GRect,
    row_drawer: &dyn RowDrawer,
) -> Result<(), ScaleError> {
    let x_spans = stage_spans(
        src_rect.x_span,
        dst_rect.x_span,
        algo.iteration_span_shrink_factor(),
        algo.iteration_span_growth_factor(),
    );
    let y_spans = stage_spans(
        src_rect.y_span,
        dst_rect.y_span,
        algo.iteration_span_shrink_factor(),
        algo.iteration_span_growth_factor(),
    );
    let stages = zip_stage_spans(&x_spans, &y_spans);

    let mut current_plane: Option<PixelPlane> = None;
    let mut current_rect = src_rect;

    for (i, &(x_span, y_span)) in stages.iter().enumerate() {
        let is_last = i == stages.len() - 1;
        let current_src: &dyn SrcPixels = match &current_plane {
            Some(p) => p,
            None => src_pixels,
        };

        if is_last {
            let dst_rect_clipped = dst_rect.intersect(dst_clip);
            run_chunks(
                parallelizer,
                algo,
                helper,
                current_src,
                current_rect,
                dst_rect,
                dst_rect_clipped,
                row_drawer,
            )?;
        } else {
            let stage_rect = GRect::new(0, 0, x_span, y_span)?;
            let mut plane = PixelPlane::new(x_span, y_span, 0);
            {
                let drawer = plane.as_row_drawer();
                run_chunks(parallelizer, algo, helper, current_src, current_rect, stage_rect, stage_rect, &drawer)?;
            }
            current_rect = stage_rect;
            current_plane = Some(plane);
        }
    }

    Ok(())
}
