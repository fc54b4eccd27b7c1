//! The read side (`SrcPixels`) and write side (`RowDrawer`) of a draw call.

use crate::color::Color32;
use crate::geom::GRect;

/// A logical read-only source image.
///
/// Implementations may optionally expose a direct, contiguous color array
/// (`color32_arr`) with a scanline stride; when present, the engine takes
/// fast paths that avoid a per-pixel virtual call. When absent, every
/// sample goes through [`SrcPixels::get_color32_at`].
///
/// Invariant: if the array is present, `array[(y - rect.y) * stride + (x -
/// rect.x)]` must equal `get_color32_at(x, y)` for every `(x, y)` inside
/// `rect()`.
pub trait SrcPixels: Sync {
    /// The image's bounding rectangle. Origin may be non-zero.
    fn rect(&self) -> GRect;

    fn width(&self) -> u32 {
        self.rect().x_span
    }

    fn height(&self) -> u32 {
        self.rect().y_span
    }

    /// Number of `Color32` words per scanline in [`SrcPixels::color32_arr`],
    /// if present. Always `>= width()`.
    fn scanline_stride(&self) -> u32;

    /// A direct view into the backing array, if the source exposes one.
    /// Valid for the duration of the call.
    fn color32_arr(&self) -> Option<&[Color32]> {
        None
    }

    /// Reads a single pixel. `(x, y)` must be inside `rect()`.
    fn get_color32_at(&self, x: i32, y: i32) -> Color32;
}

/// A write-only destination for horizontal runs of packed colors.
///
/// `draw_row` performs no clipping: the caller (the engine) guarantees
/// `(dst_x, dst_y, length)` lies entirely inside the requested destination
/// clip before calling. Implementations must tolerate concurrent calls
/// from multiple threads as long as the rows they target are disjoint.
pub trait RowDrawer: Sync {
    /// Writes `buffer[offset..offset + length)` to destination row `dst_y`
    /// starting at column `dst_x`.
    fn draw_row(&self, buffer: &[Color32], offset: usize, dst_x: i32, dst_y: i32, length: usize);
}

/// A simple owned pixel plane backed by a flat `Vec<Color32>`, usable both
/// as a [`SrcPixels`] and, via [`PixelPlane::as_row_drawer`], written into
/// through a [`RowDrawer`] adaptor. The origin is always `(0, 0)`.
#[derive(Debug, Clone)]
pub struct PixelPlane {
    width: u32,
    height: u32,
    pixels: Vec<Color32>,
}

impl PixelPlane {
    pub fn new(width: u32, height: u32, fill: Color32) -> Self {
        Self { width, height, pixels: vec![fill; (width as usize) * (height as usize)] }
    }

    pub fn from_rows(width: u32, height: u32, pixels: Vec<Color32>) -> Self {
        assert_eq!(pixels.len(), width as usize * height as usize);
        Self { width, height, pixels }
    }

    pub fn pixels(&self) -> &[Color32] {
        &self.pixels
    }

    pub fn get(&self, x: i32, y: i32) -> Color32 {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// A `RowDrawer` that writes directly into this plane through a cell,
    /// used by the mixed-direction composer and by tests that want to
    /// assert on written pixels.
    pub fn as_row_drawer(&mut self) -> PlaneRowDrawer<'_> {
        PlaneRowDrawer { width: self.width, pixels: std::sync::Mutex::new(&mut self.pixels) }
    }
}

impl SrcPixels for PixelPlane {
    fn rect(&self) -> GRect {
        GRect { x: 0, y: 0, x_span: self.width, y_span: self.height }
    }

    fn scanline_stride(&self) -> u32 {
        self.width
    }

    fn color32_arr(&self) -> Option<&[Color32]> {
        Some(&self.pixels)
    }

    fn get_color32_at(&self, x: i32, y: i32) -> Color32 {
        self.get(x, y)
    }
}

/// A [`RowDrawer`] that writes into a [`PixelPlane`]'s backing storage.
/// Rows written by concurrent chunks are disjoint by construction (the
/// dispatcher guarantees this), so the mutex here never actually contends;
/// it exists only because `&mut [Color32]` can't otherwise be shared
/// across the `Sync` bound `RowDrawer` requires.
pub struct PlaneRowDrawer<'a> {
    width: u32,
    pixels: std::sync::Mutex<&'a mut [Color32]>,
}

impl RowDrawer for PlaneRowDrawer<'_> {
    fn draw_row(&self, buffer: &[Color32], offset: usize, dst_x: i32, dst_y: i32, length: usize) {
        let mut pixels = self.pixels.lock().unwrap_or_else(|e| e.into_inner());
        let start = dst_y as usize * self.width as usize + dst_x as usize;
        pixels[start..start + length].copy_from_slice(&buffer[offset..offset + length]);
    }
}
