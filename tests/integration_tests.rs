//! Integration tests for imgsection
//!
//! These drive the whole pipeline on in-memory PNGs and check that the
//! produced files put back together form the original image.

use image::{DynamicImage, GenericImageView, ImageFormat, Rgba, RgbaImage};
use imgsection::{
    compute_sections, resolve_whole_image_rect, scale_size, CutDirection, Dimensions,
    FilePipeline, GeometryMode, ImageFile, ImageSize, Rect, SectionError, SectionOptions,
    SectionRequest, ThumbnailSpec,
};
use pretty_assertions::assert_eq;
use std::borrow::Cow;
use std::io::Cursor;
use std::num::NonZeroU32;

/// Gradient image whose every pixel is unique enough to spot misplaced slices
fn gradient(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, y| Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255]))
}

fn png_file(img: &RgbaImage) -> ImageFile {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    ImageFile::new("input.png", buf.into_inner())
}

fn decode(file: &ImageFile) -> DynamicImage {
    image::load_from_memory(&file.bytes).unwrap()
}

fn nz(v: u32) -> NonZeroU32 {
    NonZeroU32::new(v).unwrap()
}

#[test]
fn horizontal_sections_stack_back_into_the_original() {
    let img = gradient(64, 250);
    let opts = SectionOptions { section_height: nz(100), ..Default::default() };
    let files = FilePipeline::new().section_file(&png_file(&img), &opts).unwrap();

    let sizes: Vec<(u32, u32)> = files.iter().map(|f| decode(f).dimensions()).collect();
    assert_eq!(sizes, vec![(64, 100), (64, 100), (64, 50)]);

    let mut y = 0;
    for file in &files {
        let part = decode(file).to_rgba8();
        for (px, py, p) in part.enumerate_pixels() {
            assert_eq!(p, img.get_pixel(px, y + py));
        }
        y += part.height();
    }
    assert_eq!(y, 250);
}

#[test]
fn vertical_sections_line_up_left_to_right() {
    let img = gradient(200, 40);
    let opts = SectionOptions {
        section_width: nz(75),
        cut_direction: CutDirection::Vertical,
        ..Default::default()
    };
    let files = FilePipeline::new().section_file(&png_file(&img), &opts).unwrap();

    let widths: Vec<u32> = files.iter().map(|f| decode(f).width()).collect();
    assert_eq!(widths, vec![75, 75, 50]);

    let mut x = 0;
    for file in &files {
        let part = decode(file).to_rgba8();
        assert_eq!(part.height(), 40);
        assert_eq!(part.get_pixel(0, 7), img.get_pixel(x, 7));
        x += part.width();
    }
}

#[test]
fn small_image_is_a_single_section() {
    let img = gradient(600, 400);
    let opts = SectionOptions {
        cut_direction: CutDirection::Vertical,
        ..Default::default()
    };
    let files = FilePipeline::new().section_file(&png_file(&img), &opts).unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].name, "section-0.png");
    assert_eq!(decode(&files[0]).dimensions(), (600, 400));
}

#[test]
fn zoomed_sections_follow_the_section_width() {
    let img = gradient(300, 450);
    let opts = SectionRequest {
        section_width: Some(100),
        section_height: Some(100),
        allow_zoom: Some(true),
        ..Default::default()
    }
    .resolve()
    .unwrap();
    let files = FilePipeline::new().section_file(&png_file(&img), &opts).unwrap();

    // display becomes 100x150: one full slice and one of 50
    let sizes: Vec<(u32, u32)> = files.iter().map(|f| decode(f).dimensions()).collect();
    assert_eq!(sizes, vec![(100, 100), (100, 50)]);
}

#[test]
fn worked_example_from_1500_by_320() {
    let size = ImageSize::natural(Dimensions::new(1500, 320));
    let sections = compute_sections(size, nz(100), CutDirection::Horizontal, GeometryMode::Legacy);
    let heights: Vec<u32> = sections.iter().map(|s| s.dest.height).collect();
    assert_eq!(heights, vec![100, 100, 100, 20]);
    assert_eq!(heights.iter().sum::<u32>(), 320);
    assert_eq!(sections[3].source, Rect::new(0.0, 300.0, 1500.0, 20.0));
}

#[test]
fn zoom_off_leaves_every_size_alone() {
    let size = ImageSize { display: Dimensions::new(123, 456), natural: Dimensions::new(246, 912) };
    for direction in [CutDirection::Horizontal, CutDirection::Vertical] {
        for geometry in [GeometryMode::Legacy, GeometryMode::Symmetric] {
            let opts = SectionOptions { cut_direction: direction, geometry, ..Default::default() };
            assert_eq!(scale_size(size, &opts), size);
        }
    }
}

#[test]
fn empty_thumbnail_spec_resolves_to_natural_size() {
    let size = ImageSize::natural(Dimensions::new(321, 123));
    let (dest, source) = resolve_whole_image_rect(size, &ThumbnailSpec::default());
    assert_eq!(dest, Dimensions::new(321, 123));
    assert_eq!(source, Rect::new(0.0, 0.0, 321.0, 123.0));
}

#[test]
fn thumbnail_without_targets_returns_the_same_file() {
    let file = png_file(&gradient(10, 10));
    let out = FilePipeline::new().thumbnail_file(&file, &ThumbnailSpec::new(0, 0)).unwrap();
    match out {
        Cow::Borrowed(same) => assert!(std::ptr::eq(same, &file)),
        Cow::Owned(_) => panic!("expected the input file back"),
    }
}

#[test]
fn thumbnail_by_height_keeps_aspect() {
    let file = png_file(&gradient(400, 200));
    let out = FilePipeline::new().thumbnail_file(&file, &ThumbnailSpec::new(0, 50)).unwrap();
    assert_eq!(out.name, "thumb-image.png");
    assert_eq!(out.mime, "image/png");
    assert_eq!(decode(&out).dimensions(), (100, 50));
}

#[test]
fn undecodable_input_is_a_decode_error() {
    let file = ImageFile::new("notes.txt", b"hello".to_vec());
    let err = FilePipeline::new()
        .thumbnail_file(&file, &ThumbnailSpec::new(10, 10))
        .unwrap_err();
    assert!(matches!(err, SectionError::Decode(_)));
}

#[test]
fn files_round_trip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("tall.png");
    gradient(20, 30).save(&input).unwrap();

    let file = ImageFile::read(&input).unwrap();
    assert_eq!(file.name, "tall.png");
    assert_eq!(file.mime, "image/png");

    let opts = SectionOptions { section_height: nz(10), ..Default::default() };
    let out_dir = dir.path().join("out");
    std::fs::create_dir_all(&out_dir).unwrap();
    let written: Vec<_> = FilePipeline::new()
        .section_file(&file, &opts)
        .unwrap()
        .iter()
        .map(|f| f.write_to(&out_dir).unwrap())
        .collect();

    assert_eq!(written.len(), 3);
    assert_eq!(written[2], out_dir.join("section-2.png"));
    assert_eq!(image::open(&written[2]).unwrap().dimensions(), (20, 10));
}
