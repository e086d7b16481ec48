//! Whole-image resize onto a single surface.

use crate::bitmap::Bitmap;
use crate::geometry::{Dimensions, ImageSize, Rect};
use crate::options::ThumbnailSpec;
use crate::surface::DrawSurfaceFactory;

/// Destination size and source rectangle for drawing the whole image.
///
/// The source always spans the full natural extent. With no targets the
/// destination is the natural size; with one target the other axis follows
/// the natural aspect ratio; with both, the height is still derived from the
/// width unless `spec.distorted` is set.
pub fn resolve_whole_image_rect(size: ImageSize, spec: &ThumbnailSpec) -> (Dimensions, Rect) {
    let natural = size.natural;
    let (img_w, img_h) = (natural.width as f64, natural.height as f64);
    let (tw, th) = (spec.target_width, spec.target_height);

    let (w, h) = match (tw, th) {
        (0, 0) => (img_w, img_h),
        (w, 0) => (w as f64, img_h / img_w * w as f64),
        (0, h) => (img_w / img_h * h as f64, h as f64),
        (w, h) if spec.distorted => (w as f64, h as f64),
        (w, _) => (w as f64, img_h / img_w * w as f64),
    };
    let dest = Dimensions::new(canvas_length(w, natural.width), canvas_length(h, natural.height));
    log::debug!(
        "whole image {}x{} -> {}x{}",
        natural.width,
        natural.height,
        dest.width,
        dest.height
    );
    (dest, Rect::covering(natural))
}

/// Canvas sizes truncate; a length that truncates to zero falls back to `natural`.
fn canvas_length(len: f64, natural: u32) -> u32 {
    match len.trunc() as u32 {
        0 => natural,
        n => n,
    }
}

/// Draw the whole bitmap onto one surface sized by `spec`.
pub fn render_whole_image<F: DrawSurfaceFactory>(
    factory: &F,
    bitmap: &Bitmap,
    spec: &ThumbnailSpec,
) -> F::Surface {
    let (dest, source) = resolve_whole_image_rect(bitmap.size(), spec);
    let mut surface = factory.create(dest);
    factory.draw(&mut surface, bitmap, source, Rect::covering(dest));
    surface
}
