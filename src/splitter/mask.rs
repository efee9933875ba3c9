use image::{DynamicImage, GrayImage, Rgb};
use rayon::prelude::*;

use crate::splitter::background;

/// Build the binary foreground mask for an image.
///
/// Foreground pixels (color distance from `background` above `tolerance`)
/// become 255, background pixels 0. The decision is purely local, so
/// anti-aliased edges may land on either side. Rows are classified in
/// parallel; RGB8 and RGBA8 images are read straight from their raw
/// buffers, any other layout goes through an RGBA8 conversion first.
pub fn build(image: &DynamicImage, background: Rgb<u8>, tolerance: f32) -> GrayImage {
    let (width, height) = (image.width(), image.height());
    let mut mask = GrayImage::new(width, height);
    if width == 0 || height == 0 {
        return mask;
    }
    let width = width as usize;
    match image {
        DynamicImage::ImageRgb8(pixels) => {
            classify_rows(&mut mask, pixels.as_raw(), width, 3, background, tolerance);
        }
        DynamicImage::ImageRgba8(pixels) => {
            classify_rows(&mut mask, pixels.as_raw(), width, 4, background, tolerance);
        }
        other => {
            let pixels = other.to_rgba8();
            classify_rows(&mut mask, pixels.as_raw(), width, 4, background, tolerance);
        }
    }
    mask
}

fn classify_rows(
    mask: &mut [u8],
    pixels: &[u8],
    width: usize,
    channels: usize,
    background: Rgb<u8>,
    tolerance: f32,
) {
    mask.par_chunks_mut(width)
        .zip(pixels.par_chunks(width * channels))
        .for_each(|(mask_row, pixel_row)| {
            for (cell, pixel) in mask_row.iter_mut().zip(pixel_row.chunks_exact(channels)) {
                if !background::is_background(pixel, background, tolerance) {
                    *cell = 255;
                }
            }
        });
}
