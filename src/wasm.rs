//! WebAssembly bindings for imgsection

use crate::options::{
    CutDirection, GeometryMode, OutputFormat, SectionOptions, SectionRequest, ThumbnailRequest,
    ThumbnailSpec,
};
use crate::geometry::{Dimensions, ImageSize};
use crate::pipeline::{FilePipeline, ImageFile};
use crate::scale::scale_size;
use crate::section::compute_sections;
use crate::SectionError;
use std::num::NonZeroU32;
use wasm_bindgen::prelude::*;

fn js_err(e: SectionError) -> JsValue {
    let msg = e.to_string();
    web_sys::console::error_1(&JsValue::from_str(&msg));
    JsValue::from_str(&msg)
}

fn positive(name: &str, v: u32) -> Result<NonZeroU32, JsValue> {
    NonZeroU32::new(v).ok_or_else(|| JsValue::from_str(&format!("{name} must be positive")))
}

/// `{ name, type, lastModified, bytes }`, shaped like a browser `File`'s fields
fn to_js(file: &ImageFile) -> Result<JsValue, JsValue> {
    let obj = js_sys::Object::new();
    js_sys::Reflect::set(&obj, &"name".into(), &file.name.as_str().into())?;
    js_sys::Reflect::set(&obj, &"type".into(), &file.mime.as_str().into())?;
    js_sys::Reflect::set(
        &obj,
        &"lastModified".into(),
        &(file.last_modified.timestamp_millis() as f64).into(),
    )?;
    js_sys::Reflect::set(&obj, &"bytes".into(), &js_sys::Uint8Array::from(&file.bytes[..]))?;
    Ok(obj.into())
}

fn to_js_array(files: &[ImageFile]) -> Result<js_sys::Array, JsValue> {
    let array = js_sys::Array::new();
    for file in files {
        array.push(&to_js(file)?);
    }
    Ok(array)
}

#[wasm_bindgen]
pub struct WasmSectioner {
    options: SectionOptions,
    format: OutputFormat,
}

#[wasm_bindgen]
impl WasmSectioner {
    /// Sectioner with the default options: 750x100 horizontal cuts, PNG output
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmSectioner {
        WasmSectioner { options: SectionOptions::default(), format: OutputFormat::default() }
    }

    #[wasm_bindgen(js_name = setSectionWidth)]
    pub fn set_section_width(&mut self, width: u32) -> Result<(), JsValue> {
        self.options.section_width = positive("sectionWidth", width)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = setSectionHeight)]
    pub fn set_section_height(&mut self, height: u32) -> Result<(), JsValue> {
        self.options.section_height = positive("sectionHeight", height)?;
        Ok(())
    }

    /// "horizontal" or "vertical"
    #[wasm_bindgen(js_name = setCutDirection)]
    pub fn set_cut_direction(&mut self, direction: &str) -> Result<(), JsValue> {
        self.options.cut_direction = direction.parse::<CutDirection>().map_err(js_err)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = setAllowZoom)]
    pub fn set_allow_zoom(&mut self, enabled: bool) {
        self.options.allow_zoom = enabled;
    }

    /// Use mirrored vertical formulas instead of the legacy ones
    #[wasm_bindgen(js_name = setSymmetric)]
    pub fn set_symmetric(&mut self, enabled: bool) {
        self.options.geometry = if enabled { GeometryMode::Symmetric } else { GeometryMode::Legacy };
    }

    /// Output MIME type and quality (0-1)
    #[wasm_bindgen(js_name = setOutputFormat)]
    pub fn set_output_format(&mut self, mime: &str, quality: Option<f32>) -> Result<(), JsValue> {
        self.format = OutputFormat::resolve(Some(mime), quality).map_err(js_err)?;
        Ok(())
    }

    /// Cut an encoded image into sections
    ///
    /// Returns an array of `{ name, type, lastModified, bytes }` in section order.
    pub fn section(&self, name: &str, bytes: &[u8]) -> Result<js_sys::Array, JsValue> {
        let file = ImageFile::new(name, bytes.to_vec());
        let files = FilePipeline::new()
            .with_format(self.format)
            .section_file(&file, &self.options)
            .map_err(js_err)?;
        to_js_array(&files)
    }

    /// Resize an encoded image; zero for both sizes returns the input as-is
    pub fn thumbnail(&self, name: &str, bytes: &[u8], width: u32, height: u32) -> Result<JsValue, JsValue> {
        let file = ImageFile::new(name, bytes.to_vec());
        thumbnail_to_js(&file, &ThumbnailSpec::new(width, height), self.format)
    }
}

impl Default for WasmSectioner {
    fn default() -> Self {
        Self::new()
    }
}

fn thumbnail_to_js(file: &ImageFile, spec: &ThumbnailSpec, format: OutputFormat) -> Result<JsValue, JsValue> {
    let pipeline = FilePipeline::new().with_format(format);
    let thumb = pipeline.thumbnail_file(file, spec).map_err(js_err)?;
    to_js(&thumb)
}

/// Cut an image using an options object in JSON form
/// (`sectionWidth`, `sectionHeight`, `cutDirection`, `allowZoom`)
#[wasm_bindgen(js_name = sectionImage)]
pub fn section_image(name: &str, bytes: &[u8], options_json: &str) -> Result<js_sys::Array, JsValue> {
    let options = SectionRequest::from_json(options_json)
        .and_then(|r| r.resolve())
        .map_err(js_err)?;
    let file = ImageFile::new(name, bytes.to_vec());
    let files = FilePipeline::new().section_file(&file, &options).map_err(js_err)?;
    to_js_array(&files)
}

/// Resize an image using an options object in JSON form
/// (`thumbWidth`, `thumbHeight`, `distorted`)
#[wasm_bindgen(js_name = thumbnailImage)]
pub fn thumbnail_image(name: &str, bytes: &[u8], options_json: &str) -> Result<JsValue, JsValue> {
    let spec = ThumbnailRequest::from_json(options_json).map_err(js_err)?.resolve();
    let file = ImageFile::new(name, bytes.to_vec());
    thumbnail_to_js(&file, &spec, OutputFormat::default())
}

/// Plan the sections of an image without touching any pixels
///
/// Returns the sections as JSON: `[{ index, dest: { width, height }, source: { x, y, width, height } }]`,
/// with `source` in natural pixels.
#[wasm_bindgen(js_name = planSections)]
pub fn plan_sections(natural_width: u32, natural_height: u32, options_json: &str) -> Result<String, JsValue> {
    let options = SectionRequest::from_json(options_json)
        .and_then(|r| r.resolve())
        .map_err(js_err)?;
    if natural_width == 0 || natural_height == 0 {
        return Err(JsValue::from_str("image dimensions must be positive"));
    }
    let size = scale_size(ImageSize::natural(Dimensions::new(natural_width, natural_height)), &options);
    let sections = compute_sections(size, options.governing_size(), options.cut_direction, options.geometry);
    serde_json::to_string(&sections).map_err(|e| js_err(e.into()))
}
