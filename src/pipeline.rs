//! File in, files out: decode, slice or resize, encode, name.

use crate::bitmap::{BitmapSource, ImageDecoder};
use crate::options::{OutputFormat, SectionOptions, ThumbnailSpec};
use crate::scale::scale_for_section;
use crate::section::{compute_sections, materialize, Section};
use crate::surface::{DrawSurfaceFactory, RasterSurfaceFactory};
use crate::thumbnail::render_whole_image;
use crate::{Bitmap, Result};
use chrono::{DateTime, Utc};
use std::borrow::Cow;
use std::path::{Path, PathBuf};

const OCTET_STREAM: &str = "application/octet-stream";

/// A named blob of image bytes with a MIME type and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
    pub last_modified: DateTime<Utc>,
}

impl ImageFile {
    /// Wrap `bytes`, sniffing the MIME type from their content.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let mime = image::guess_format(&bytes)
            .map(|f| f.to_mime_type())
            .unwrap_or(OCTET_STREAM);
        Self {
            name: name.into(),
            mime: mime.to_string(),
            bytes,
            last_modified: Utc::now(),
        }
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(name, bytes))
    }

    /// Write into `dir` under the file's own name.
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(&self.name);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Decodes files, cuts or resizes them and encodes the results.
#[derive(Debug, Clone)]
pub struct FilePipeline<S = ImageDecoder, F = RasterSurfaceFactory> {
    source: S,
    factory: F,
    format: OutputFormat,
}

impl FilePipeline {
    /// Pipeline over the `image` crate decoder and raster surfaces.
    pub fn new() -> Self {
        Self::with_parts(ImageDecoder, RasterSurfaceFactory::default())
    }
}

impl Default for FilePipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: BitmapSource, F: DrawSurfaceFactory> FilePipeline<S, F> {
    pub fn with_parts(source: S, factory: F) -> Self {
        Self { source, factory, format: OutputFormat::default() }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format(&self) -> &OutputFormat {
        &self.format
    }

    /// Cut `file` into sections, returned in section order.
    ///
    /// Any section that fails to encode fails the whole call.
    pub fn section_file(&self, file: &ImageFile, options: &SectionOptions) -> Result<Vec<ImageFile>> {
        let bitmap = scale_for_section(self.source.decode(file)?, options);
        let sections = compute_sections(
            bitmap.size(),
            options.governing_size(),
            options.cut_direction,
            options.geometry,
        );
        let blobs = self.encode_sections(&bitmap, &sections)?;
        let ext = self.format.mime.extension();
        let files: Vec<ImageFile> = blobs
            .into_iter()
            .enumerate()
            .map(|(i, bytes)| self.wrap(format!("section-{i}.{ext}"), bytes))
            .collect();
        log::info!("{} cut into {} section(s)", file.name, files.len());
        Ok(files)
    }

    /// Resize `file` as described by `spec`.
    ///
    /// An empty spec hands back the input itself without decoding it.
    pub fn thumbnail_file<'a>(&self, file: &'a ImageFile, spec: &ThumbnailSpec) -> Result<Cow<'a, ImageFile>> {
        if spec.is_empty() {
            log::warn!("no thumbnail size given for {}, passing it through", file.name);
            return Ok(Cow::Borrowed(file));
        }
        let bitmap = self.source.decode(file)?;
        let surface = render_whole_image(&self.factory, &bitmap, spec);
        let bytes = self.encode_surface(&surface)?;
        let thumb = self.wrap(format!("thumb-image.{}", self.format.mime.extension()), bytes);
        log::info!("{} -> {} ({} bytes)", file.name, thumb.name, thumb.bytes.len());
        Ok(Cow::Owned(thumb))
    }

    /// Encode one surface with the pipeline's output format.
    pub fn encode_surface(&self, surface: &F::Surface) -> Result<Vec<u8>> {
        self.factory.encode(surface, &self.format)
    }

    // Sections are independent; collecting keeps them in section order.
    #[cfg(not(target_arch = "wasm32"))]
    fn encode_sections(&self, bitmap: &Bitmap, sections: &[Section]) -> Result<Vec<Vec<u8>>> {
        use rayon::prelude::*;
        let (factory, format) = (&self.factory, &self.format);
        sections
            .par_iter()
            .map(|section| factory.encode(&materialize(factory, bitmap, section), format))
            .collect()
    }

    #[cfg(target_arch = "wasm32")]
    fn encode_sections(&self, bitmap: &Bitmap, sections: &[Section]) -> Result<Vec<Vec<u8>>> {
        sections
            .iter()
            .map(|section| self.encode_surface(&materialize(&self.factory, bitmap, section)))
            .collect()
    }

    fn wrap(&self, name: String, bytes: Vec<u8>) -> ImageFile {
        ImageFile {
            name,
            mime: self.format.mime.as_str().to_string(),
            bytes,
            last_modified: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Dimensions, Rect};
    use crate::SectionError;
    use image::RgbaImage;
    use std::num::NonZeroU32;

    fn png(w: u32, h: u32) -> ImageFile {
        let factory = RasterSurfaceFactory::default();
        let bytes = factory.encode(&RgbaImage::new(w, h), &OutputFormat::default()).unwrap();
        ImageFile::new("big.png", bytes)
    }

    /// Factory whose encoder never yields anything.
    struct Mute;

    impl DrawSurfaceFactory for Mute {
        type Surface = Dimensions;

        fn create(&self, dims: Dimensions) -> Dimensions {
            dims
        }

        fn draw(&self, _: &mut Dimensions, _: &Bitmap, _: Rect, _: Rect) {}

        fn encode(&self, _: &Dimensions, _: &OutputFormat) -> Result<Vec<u8>> {
            Err(SectionError::Encoding("no data".into()))
        }
    }

    #[test]
    fn image_file_sniffs_mime() {
        assert_eq!(png(2, 2).mime, "image/png");
        assert_eq!(ImageFile::new("x", vec![1, 2, 3]).mime, OCTET_STREAM);
    }

    #[test]
    fn sections_are_named_in_order() {
        let opts = SectionOptions { section_height: NonZeroU32::new(100).unwrap(), ..Default::default() };
        let files = FilePipeline::new().section_file(&png(30, 320), &opts).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["section-0.png", "section-1.png", "section-2.png", "section-3.png"]);
        assert!(files.iter().all(|f| f.mime == "image/png"));

        let last = image::load_from_memory(&files[3].bytes).unwrap();
        assert_eq!((last.width(), last.height()), (30, 20));
    }

    #[test]
    fn one_failing_encode_fails_the_batch() {
        let pipeline = FilePipeline::with_parts(ImageDecoder, Mute);
        let err = pipeline.section_file(&png(10, 500), &SectionOptions::default()).unwrap_err();
        assert!(matches!(err, SectionError::Encoding(_)));
    }

    #[test]
    fn decode_failure_surfaces() {
        let file = ImageFile::new("broken.png", vec![0x89, b'P', b'N', b'G']);
        let err = FilePipeline::new().section_file(&file, &SectionOptions::default()).unwrap_err();
        assert!(matches!(err, SectionError::Decode(_)));
    }

    #[test]
    fn empty_thumbnail_spec_passes_file_through() {
        let file = png(10, 10);
        let out = FilePipeline::new().thumbnail_file(&file, &ThumbnailSpec::new(0, 0)).unwrap();
        assert!(matches!(out, Cow::Borrowed(f) if std::ptr::eq(f, &file)));
    }

    #[test]
    fn thumbnail_is_resized_and_renamed() {
        let file = png(200, 100);
        let out = FilePipeline::new().thumbnail_file(&file, &ThumbnailSpec::new(50, 0)).unwrap();
        assert_eq!(out.name, "thumb-image.png");
        let decoded = image::load_from_memory(&out.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (50, 25));
    }

    #[test]
    fn output_format_sets_extension_and_mime() {
        let format = OutputFormat::resolve(Some("image/jpeg"), Some(0.9)).unwrap();
        let pipeline = FilePipeline::new().with_format(format);
        let files = pipeline.section_file(&png(8, 150), &SectionOptions::default()).unwrap();
        assert_eq!(files[0].name, "section-0.jpg");
        assert_eq!(files[1].mime, "image/jpeg");
    }

    #[test]
    fn decoder_reads_encoded_png() {
        let bmp = ImageDecoder.decode(&png(7, 3)).unwrap();
        assert_eq!(bmp.size().natural, Dimensions::new(7, 3));
    }
}
