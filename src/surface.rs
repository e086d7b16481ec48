//! Drawing surfaces: allocation, scaled blits and encoding.

use crate::bitmap::Bitmap;
use crate::geometry::{Dimensions, Rect};
use crate::options::{ImageMime, OutputFormat};
use crate::{Result, SectionError};
use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ExtendedColorType, ImageEncoder, RgbaImage};

/// Creates surfaces, draws bitmaps onto them and encodes them.
///
/// Implementations must be shareable across threads: sections are encoded
/// in parallel on native targets.
pub trait DrawSurfaceFactory: Sync {
    type Surface: Send;

    /// Blank (fully transparent) surface of `dims`.
    fn create(&self, dims: Dimensions) -> Self::Surface;

    /// Scale `source` (natural pixels of `bitmap`) into `dest` on `surface`.
    fn draw(&self, surface: &mut Self::Surface, bitmap: &Bitmap, source: Rect, dest: Rect);

    /// Encode the whole surface. An encoder that yields no bytes is an error.
    fn encode(&self, surface: &Self::Surface, format: &OutputFormat) -> Result<Vec<u8>>;
}

/// In-memory RGBA surfaces drawn with the `image` crate's resamplers.
#[derive(Debug, Clone, Copy)]
pub struct RasterSurfaceFactory {
    filter: FilterType,
}

impl Default for RasterSurfaceFactory {
    fn default() -> Self {
        Self { filter: FilterType::Triangle }
    }
}

impl RasterSurfaceFactory {
    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }
}

impl DrawSurfaceFactory for RasterSurfaceFactory {
    type Surface = RgbaImage;

    fn create(&self, dims: Dimensions) -> RgbaImage {
        RgbaImage::new(dims.width, dims.height)
    }

    fn draw(&self, surface: &mut RgbaImage, bitmap: &Bitmap, source: Rect, dest: Rect) {
        let src = source.to_pixels(bitmap.natural());
        let dst = dest.to_pixels(surface.dimensions().into());

        let patch = bitmap.pixels().crop_imm(src.x, src.y, src.width, src.height);
        let patch = if (src.width, src.height) == (dst.width, dst.height) {
            patch.to_rgba8()
        } else {
            patch.resize_exact(dst.width, dst.height, self.filter).to_rgba8()
        };
        imageops::replace(surface, &patch, dst.x as i64, dst.y as i64);
    }

    fn encode(&self, surface: &RgbaImage, format: &OutputFormat) -> Result<Vec<u8>> {
        let (w, h) = surface.dimensions();
        let mut buf = Vec::new();
        let written = match format.mime {
            ImageMime::Png => {
                PngEncoder::new(&mut buf).write_image(surface.as_raw(), w, h, ExtendedColorType::Rgba8)
            }
            ImageMime::Jpeg => {
                // JPEG has no alpha channel
                let rgb = DynamicImage::ImageRgba8(surface.clone()).to_rgb8();
                JpegEncoder::new_with_quality(&mut buf, jpeg_quality(format.quality))
                    .write_image(rgb.as_raw(), w, h, ExtendedColorType::Rgb8)
            }
            ImageMime::WebP => WebPEncoder::new_lossless(&mut buf)
                .write_image(surface.as_raw(), w, h, ExtendedColorType::Rgba8),
            ImageMime::Bmp => {
                BmpEncoder::new(&mut buf).write_image(surface.as_raw(), w, h, ExtendedColorType::Rgba8)
            }
        };
        written.map_err(|e| SectionError::Encoding(e.to_string()))?;

        if buf.is_empty() {
            return Err(SectionError::Encoding(format!(
                "{} encoder produced no data",
                format.mime.as_str()
            )));
        }
        Ok(buf)
    }
}

/// Map 0.0..=1.0 onto the JPEG encoder's 1..=100 scale.
fn jpeg_quality(quality: f32) -> u8 {
    (quality.clamp(0.0, 1.0) * 100.0).round().max(1.0) as u8
}
