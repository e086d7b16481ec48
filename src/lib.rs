//! Cut large images into horizontal or vertical sections, and derive thumbnails.

pub mod bitmap;
pub mod geometry;
pub mod options;
pub mod pipeline;
pub mod scale;
pub mod section;
pub mod surface;
pub mod thumbnail;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use bitmap::{Bitmap, BitmapSource, ImageDecoder};
pub use geometry::{Dimensions, ImageSize, Rect};
pub use options::{
    CutDirection, GeometryMode, ImageMime, OutputFormat, SectionOptions, SectionRequest,
    ThumbnailRequest, ThumbnailSpec,
};
pub use pipeline::{FilePipeline, ImageFile};
pub use scale::{scale_for_section, scale_size};
pub use section::{compute_sections, section_bitmap, Section};
pub use surface::{DrawSurfaceFactory, RasterSurfaceFactory};
pub use thumbnail::{render_whole_image, resolve_whole_image_rect};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SectionError {
    #[error("Decode error: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Encoding error: {0}")]
    Encoding(String),
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
    #[error("Invalid option: {0}")]
    InvalidOption(String),
    #[error("Options error: {0}")]
    Options(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SectionError>;
