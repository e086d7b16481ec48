//! Sizes and rectangles shared by the sectioning and thumbnail math.

use serde::Serialize;

/// Pixel size of a bitmap or a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl From<(u32, u32)> for Dimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

/// Rectangle in either natural-pixel space (source) or surface space (destination).
///
/// Source rectangles may carry fractional offsets and extents: the zoom ratio
/// maps integral display lengths onto non-integral natural lengths.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle anchored at the origin covering `dims`.
    pub fn covering(dims: Dimensions) -> Self {
        Self::new(0.0, 0.0, dims.width as f64, dims.height as f64)
    }

    /// Snap to whole pixels inside `bounds`.
    ///
    /// Edges are rounded independently so adjacent rectangles that share an
    /// edge still share it after snapping. The result is at least 1×1.
    pub fn to_pixels(&self, bounds: Dimensions) -> PixelRect {
        let clamp = |v: f64, max: u32| v.round().clamp(0.0, max as f64) as u32;
        let x0 = clamp(self.x, bounds.width.saturating_sub(1));
        let y0 = clamp(self.y, bounds.height.saturating_sub(1));
        let x1 = clamp(self.x + self.width, bounds.width).max(x0 + 1);
        let y1 = clamp(self.y + self.height, bounds.height).max(y0 + 1);
        PixelRect { x: x0, y: y0, width: x1 - x0, height: y1 - y0 }
    }
}

/// Integral rectangle used when pixels are actually copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Display and natural size of a decoded bitmap.
///
/// Display size is what layout and slicing work in; natural size is the
/// intrinsic pixel size. They differ only after a logical resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub display: Dimensions,
    pub natural: Dimensions,
}

impl ImageSize {
    /// Size of a freshly decoded bitmap: display equals natural.
    pub fn natural(dims: Dimensions) -> Self {
        Self { display: dims, natural: dims }
    }

    /// Natural/display ratio along the vertical axis.
    pub fn zoom_ratio_y(&self) -> f64 {
        self.natural.height as f64 / self.display.height as f64
    }

    /// Natural/display ratio along the horizontal axis.
    pub fn zoom_ratio_x(&self) -> f64 {
        self.natural.width as f64 / self.display.width as f64
    }
}
