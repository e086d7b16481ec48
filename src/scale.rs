//! Logical resize of a bitmap before it is sectioned.

use crate::bitmap::Bitmap;
use crate::geometry::{Dimensions, ImageSize};
use crate::options::{CutDirection, GeometryMode, SectionOptions};

/// Adjust the display size of `size` to fit the section size.
///
/// Horizontal cuts pin the display width to `section_width` and derive the
/// height from the natural aspect ratio. Vertical cuts pin the display height
/// to `section_height`; the width then depends on [`GeometryMode`]. Without
/// `allow_zoom` the size is returned untouched.
pub fn scale_size(size: ImageSize, options: &SectionOptions) -> ImageSize {
    if !options.allow_zoom {
        return size;
    }
    let nat_w = size.natural.width as f64;
    let nat_h = size.natural.height as f64;

    let display = match options.cut_direction {
        CutDirection::Horizontal => {
            let width = options.section_width.get();
            let height = (nat_h * width as f64 / nat_w).round() as u32;
            Dimensions::new(width, height)
        }
        CutDirection::Vertical => {
            let height = options.section_height.get();
            let divisor = match options.geometry {
                GeometryMode::Legacy => nat_w,
                GeometryMode::Symmetric => nat_h,
            };
            let width = (nat_w * height as f64 / divisor).round() as u32;
            Dimensions::new(width, height)
        }
    };
    log::debug!(
        "zoomed display {}x{} -> {}x{}",
        size.display.width,
        size.display.height,
        display.width,
        display.height
    );
    ImageSize { display, ..size }
}

/// [`scale_size`] applied to a bitmap.
pub fn scale_for_section(bitmap: Bitmap, options: &SectionOptions) -> Bitmap {
    let scaled = scale_size(bitmap.size(), options);
    bitmap.with_display(scaled.display)
}
