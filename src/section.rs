//! Image sectioning - splits an image into slices along one axis.
//!
//! Slices are measured in display space and extracted from natural space:
//! every display length along the cut axis is multiplied by the zoom ratio
//! to find the matching stretch of source pixels.

use crate::bitmap::Bitmap;
use crate::geometry::{Dimensions, ImageSize, Rect};
use crate::options::{CutDirection, GeometryMode, SectionOptions};
use crate::surface::DrawSurfaceFactory;
use serde::Serialize;
use std::num::NonZeroU32;

/// One slice: where it comes from and how large it is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Section {
    pub index: usize,
    pub dest: Dimensions,
    pub source: Rect,
}

/// Plan the slices of an image of `size` cut along `direction`.
///
/// `section_size` bounds every slice along the cut axis; the last slice
/// takes whatever remains. An image that already fits yields one section
/// covering the whole bitmap.
pub fn compute_sections(
    size: ImageSize,
    section_size: NonZeroU32,
    direction: CutDirection,
    geometry: GeometryMode,
) -> Vec<Section> {
    let sections = match direction {
        CutDirection::Horizontal => horizontal(size, section_size.get()),
        CutDirection::Vertical => vertical(size, section_size.get(), geometry),
    };
    log::debug!(
        "{:?} cut of {}x{} (natural {}x{}) into {} section(s) of {}",
        direction,
        size.display.width,
        size.display.height,
        size.natural.width,
        size.natural.height,
        sections.len(),
        section_size
    );
    sections
}

fn single(size: ImageSize) -> Vec<Section> {
    vec![Section { index: 0, dest: size.display, source: Rect::covering(size.natural) }]
}

/// Lengths of each slice along an axis of `extent` display pixels.
fn slice_lengths(extent: u32, bound: u32) -> impl Iterator<Item = u32> {
    let count = extent.div_ceil(bound);
    let remain = extent % bound;
    (1..=count).map(move |i| if i == count && remain != 0 { remain } else { bound })
}

fn horizontal(size: ImageSize, c_height: u32) -> Vec<Section> {
    let disp = size.display;
    if disp.height <= c_height {
        return single(size);
    }
    let ratio = size.zoom_ratio_y();
    let mut sy = 0.0;
    slice_lengths(disp.height, c_height)
        .enumerate()
        .map(|(index, height)| {
            let src_h = height as f64 * ratio;
            let source = Rect::new(0.0, sy, size.natural.width as f64, src_h);
            sy += src_h;
            Section { index, dest: Dimensions::new(disp.width, height), source }
        })
        .collect()
}

fn vertical(size: ImageSize, c_width: u32, geometry: GeometryMode) -> Vec<Section> {
    let disp = size.display;
    if disp.width <= c_width {
        return single(size);
    }
    let ratio = size.zoom_ratio_x();
    let mut sx = 0.0;
    slice_lengths(disp.width, c_width)
        .enumerate()
        .map(|(index, width)| {
            let src_w = width as f64 * ratio;
            let source = Rect::new(sx, 0.0, src_w, size.natural.height as f64);
            sx += match geometry {
                GeometryMode::Legacy => width as f64,
                GeometryMode::Symmetric => src_w,
            };
            Section { index, dest: Dimensions::new(width, disp.height), source }
        })
        .collect()
}

/// Draw one planned section onto a fresh surface.
pub fn materialize<F: DrawSurfaceFactory>(
    factory: &F,
    bitmap: &Bitmap,
    section: &Section,
) -> F::Surface {
    let mut surface = factory.create(section.dest);
    factory.draw(&mut surface, bitmap, section.source, Rect::covering(section.dest));
    surface
}

/// Plan and draw every section of `bitmap`, in order.
///
/// The governing size comes from `options`: section height for horizontal
/// cuts, section width for vertical ones.
pub fn section_bitmap<F: DrawSurfaceFactory>(
    factory: &F,
    bitmap: &Bitmap,
    options: &SectionOptions,
) -> Vec<F::Surface> {
    compute_sections(
        bitmap.size(),
        options.governing_size(),
        options.cut_direction,
        options.geometry,
    )
    .iter()
    .map(|section| materialize(factory, bitmap, section))
    .collect()
}
