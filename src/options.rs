//! Per-call options and their resolution against the defaults table.
//!
//! Callers build a partial request (every field optional, deserializable from
//! the camelCase option objects browsers pass around) and resolve it into the
//! strongly typed options the geometry works with. Unset fields take the
//! defaults below; an explicit zero section size is rejected instead of being
//! mistaken for "unset".

use crate::{Result, SectionError};
use serde::Deserialize;
use std::num::NonZeroU32;
use std::str::FromStr;

pub const DEFAULT_SECTION_WIDTH: NonZeroU32 = nonzero(750);
pub const DEFAULT_SECTION_HEIGHT: NonZeroU32 = nonzero(100);
pub const DEFAULT_QUALITY: f32 = 1.0;

const fn nonzero(v: u32) -> NonZeroU32 {
    match NonZeroU32::new(v) {
        Some(v) => v,
        None => panic!("zero default"),
    }
}

/// Axis along which an image is cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(not(target_arch = "wasm32"), derive(clap::ValueEnum))]
pub enum CutDirection {
    /// Slices stacked top to bottom, bounded by section height
    #[default]
    Horizontal,
    /// Slices laid out left to right, bounded by section width
    Vertical,
}

impl FromStr for CutDirection {
    type Err = SectionError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "horizontal" => Ok(Self::Horizontal),
            "vertical" => Ok(Self::Vertical),
            other => Err(SectionError::InvalidOption(format!("unknown cut direction: {other}"))),
        }
    }
}

/// Which formulas the vertical direction uses.
///
/// The horizontal direction behaves the same in both modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(not(target_arch = "wasm32"), derive(clap::ValueEnum))]
pub enum GeometryMode {
    /// Vertical zoom divides by natural width and the source x offset advances
    /// by display width, exactly as the browser helper always did.
    #[default]
    Legacy,
    /// Vertical zoom and offsets mirror the horizontal direction.
    Symmetric,
}

/// Resolved sectioning options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionOptions {
    pub section_width: NonZeroU32,
    pub section_height: NonZeroU32,
    pub cut_direction: CutDirection,
    pub allow_zoom: bool,
    pub geometry: GeometryMode,
}

impl Default for SectionOptions {
    fn default() -> Self {
        Self {
            section_width: DEFAULT_SECTION_WIDTH,
            section_height: DEFAULT_SECTION_HEIGHT,
            cut_direction: CutDirection::Horizontal,
            allow_zoom: false,
            geometry: GeometryMode::Legacy,
        }
    }
}

impl SectionOptions {
    /// Size that bounds each slice along the cut axis.
    pub fn governing_size(&self) -> NonZeroU32 {
        match self.cut_direction {
            CutDirection::Horizontal => self.section_height,
            CutDirection::Vertical => self.section_width,
        }
    }
}

/// Sectioning options as supplied by a caller; every field may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionRequest {
    pub section_width: Option<u32>,
    pub section_height: Option<u32>,
    pub cut_direction: Option<CutDirection>,
    pub allow_zoom: Option<bool>,
    pub geometry: Option<GeometryMode>,
}

impl SectionRequest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn resolve(&self) -> Result<SectionOptions> {
        let defaults = SectionOptions::default();
        Ok(SectionOptions {
            section_width: positive("sectionWidth", self.section_width, defaults.section_width)?,
            section_height: positive("sectionHeight", self.section_height, defaults.section_height)?,
            cut_direction: self.cut_direction.unwrap_or(defaults.cut_direction),
            allow_zoom: self.allow_zoom.unwrap_or(defaults.allow_zoom),
            geometry: self.geometry.unwrap_or(defaults.geometry),
        })
    }
}

fn positive(name: &str, value: Option<u32>, default: NonZeroU32) -> Result<NonZeroU32> {
    match value {
        None => Ok(default),
        Some(v) => NonZeroU32::new(v)
            .ok_or_else(|| SectionError::InvalidOption(format!("{name} must be positive"))),
    }
}

/// Resolved whole-image resize target. A zero target means "not given".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThumbnailSpec {
    pub target_width: u32,
    pub target_height: u32,
    pub distorted: bool,
}

impl ThumbnailSpec {
    pub fn new(target_width: u32, target_height: u32) -> Self {
        Self { target_width, target_height, distorted: false }
    }

    pub fn distorted(mut self, distorted: bool) -> Self {
        self.distorted = distorted;
        self
    }

    /// Neither target given: the resize is the identity.
    pub fn is_empty(&self) -> bool {
        self.target_width == 0 && self.target_height == 0
    }
}

/// Thumbnail options as supplied by a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThumbnailRequest {
    pub thumb_width: Option<u32>,
    pub thumb_height: Option<u32>,
    pub distorted: Option<bool>,
}

impl ThumbnailRequest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn resolve(&self) -> ThumbnailSpec {
        ThumbnailSpec {
            target_width: self.thumb_width.unwrap_or(0),
            target_height: self.thumb_height.unwrap_or(0),
            distorted: self.distorted.unwrap_or(false),
        }
    }
}

/// Encoded output type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageMime {
    #[default]
    Png,
    Jpeg,
    WebP,
    Bmp,
}

impl ImageMime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::WebP => "image/webp",
            Self::Bmp => "image/bmp",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::WebP => "webp",
            Self::Bmp => "bmp",
        }
    }
}

impl FromStr for ImageMime {
    type Err = SectionError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "image/png" => Ok(Self::Png),
            "image/jpeg" | "image/jpg" => Ok(Self::Jpeg),
            "image/webp" => Ok(Self::WebP),
            "image/bmp" => Ok(Self::Bmp),
            other => Err(SectionError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// MIME type and quality used to encode surfaces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputFormat {
    pub mime: ImageMime,
    /// 0.0..=1.0; only lossy encoders look at it
    pub quality: f32,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self { mime: ImageMime::Png, quality: DEFAULT_QUALITY }
    }
}

impl OutputFormat {
    /// Resolve an optional MIME string and quality against the defaults.
    pub fn resolve(mime: Option<&str>, quality: Option<f32>) -> Result<Self> {
        let mime = match mime {
            Some(m) => m.parse()?,
            None => ImageMime::Png,
        };
        let quality = quality.unwrap_or(DEFAULT_QUALITY);
        if !(0.0..=1.0).contains(&quality) {
            return Err(SectionError::InvalidOption(format!(
                "quality must be within 0.0..=1.0, got {quality}"
            )));
        }
        Ok(Self { mime, quality })
    }
}
