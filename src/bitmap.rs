//! Decoded bitmaps and the decoder that produces them.

use crate::geometry::{Dimensions, ImageSize};
use crate::pipeline::ImageFile;
use crate::Result;
use image::{DynamicImage, GenericImageView};

/// A decoded image plus the size it is currently laid out at.
///
/// The pixels are never touched by a logical resize; only `display` moves.
#[derive(Debug, Clone)]
pub struct Bitmap {
    pixels: DynamicImage,
    display: Dimensions,
}

impl Bitmap {
    pub fn new(pixels: DynamicImage) -> Self {
        let display = pixels.dimensions().into();
        Self { pixels, display }
    }

    pub fn pixels(&self) -> &DynamicImage {
        &self.pixels
    }

    pub fn display(&self) -> Dimensions {
        self.display
    }

    pub fn natural(&self) -> Dimensions {
        self.pixels.dimensions().into()
    }

    pub fn size(&self) -> ImageSize {
        ImageSize { display: self.display, natural: self.natural() }
    }

    /// Same pixels, drawn at `display`.
    pub fn with_display(mut self, display: Dimensions) -> Self {
        self.display = display;
        self
    }
}

/// Turns an input file into a bitmap.
pub trait BitmapSource {
    fn decode(&self, file: &ImageFile) -> Result<Bitmap>;
}

/// Decoder backed by the `image` crate; the format is sniffed from the bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageDecoder;

impl BitmapSource for ImageDecoder {
    fn decode(&self, file: &ImageFile) -> Result<Bitmap> {
        let pixels = image::load_from_memory(&file.bytes)?;
        log::debug!(
            "decoded {} ({}x{})",
            file.name,
            pixels.width(),
            pixels.height()
        );
        Ok(Bitmap::new(pixels))
    }
}
