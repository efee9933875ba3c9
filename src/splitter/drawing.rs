use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::drawing::{draw_cross_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;

use crate::splitter::extraction::Region;

const MARKER_COLOR: Rgba<u8> = Rgba([0, 255, 0, 255]);
const FRAME_THICKNESS: u32 = 2;

/// Render a copy of the image with every region framed in green and its
/// centroid marked with a cross. Frames sit just outside the bounding box
/// so the object pixels themselves stay untouched.
pub(crate) fn draw_region_overlay(image: &DynamicImage, regions: &[Region]) -> RgbaImage {
    let mut canvas = image.to_rgba8();
    for region in regions {
        draw_frame(&mut canvas, region.bounding_box, FRAME_THICKNESS);
        draw_cross_mut(
            &mut canvas,
            MARKER_COLOR,
            region.centroid.x.round() as i32,
            region.centroid.y.round() as i32,
        );
    }
    canvas
}

fn draw_frame(canvas: &mut RgbaImage, bounding_box: Rect, thickness: u32) {
    for offset in 1..=thickness {
        let frame = Rect::at(
            bounding_box.left() - offset as i32,
            bounding_box.top() - offset as i32,
        )
        .of_size(
            bounding_box.width() + offset * 2,
            bounding_box.height() + offset * 2,
        );
        draw_hollow_rect_mut(canvas, frame, MARKER_COLOR);
    }
}
