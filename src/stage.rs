//! Iterative shrink/grow staging (spec §4.4): decomposes one logical
//! scale step on a single axis into a monotonic sequence of intermediate
//! spans when the algorithm's shrink/grow factor calls for it.

/// Builds the sequence of per-stage target spans for scaling a single axis
/// from `src_span` to `dst_span`, given an algorithm's shrink factor (used
/// when `dst_span < src_span`) and growth factor (used when `dst_span >
/// src_span`). The returned sequence never includes `src_span` itself but
/// always ends with `dst_span` as its last element.
///
/// `shrink_factor == 0.0` or `growth_factor == f64::INFINITY` both mean
/// "one step" -- no iteration on that side.
pub fn stage_spans(src_span: u32, dst_span: u32, shrink_factor: f64, growth_factor: f64) -> Vec<u32> {
    if dst_span == src_span {
        return vec![dst_span];
    }

    if dst_span < src_span {
        if shrink_factor <= 0.0 {
            return vec![dst_span];
        }
        let mut spans = Vec::new();
        let mut current = src_span;
        loop {
            let next = ((current as f64) * shrink_factor).round() as u32;
            let next = next.max(dst_span);
            if next >= current {
                // Shrink factor failed to make progress (can happen only
                // at very small spans); land on dst_span directly.
                spans.push(dst_span);
                break;
            }
            spans.push(next);
            current = next;
            if current == dst_span {
                break;
            }
        }
        spans
    } else {
        if !growth_factor.is_finite() {
            return vec![dst_span];
        }
        let mut spans = Vec::new();
        let mut current = src_span;
        loop {
            let next = ((current as f64) * growth_factor).round() as u32;
            let next = next.min(dst_span);
            if next <= current {
                spans.push(dst_span);
                break;
            }
            spans.push(next);
            current = next;
            if current == dst_span {
                break;
            }
        }
        spans
    }
}

/// Zips two independently-generated per-axis stage sequences into a single
/// sequence of `(x_span, y_span)` pairs of equal length, advancing both
/// axes one stage at a time (spec §4.4: "if both axes iterate, a single
/// rectangular intermediate per stage is used"). The shorter sequence is
/// padded by repeating its last (final) value.
pub fn zip_stage_spans(x_spans: &[u32], y_spans: &[u32]) -> Vec<(u32, u32)> {
    let len = x_spans.len().max(y_spans.len());
    let last_x = *x_spans.last().unwrap();
    let last_y = *y_spans.last().unwrap();
    (0..len)
        .map(|i| {
            let x = x_spans.get(i).copied().unwrap_or(last_x);
            let y = y_spans.get(i).copied().unwrap_or(last_y);
            (x, y)
        })
        .collect()
}
