use std::f64::consts::{FRAC_PI_2, TAU};
use std::path::Path;

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_polygon_mut};
use imageproc::point::Point;
use imageproc::rect::Rect;

use crate::Result;

/// Generate the sample test card: five well-separated colored shapes on a
/// white background, handy for trying out the tool without scanning
/// anything.
pub fn sample_image() -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(400, 300, Rgba([255, 255, 255, 255]));
    draw_filled_circle_mut(&mut canvas, (70, 70), 50, Rgba([255, 0, 0, 255]));
    draw_filled_rect_mut(
        &mut canvas,
        Rect::at(150, 30).of_size(100, 100),
        Rgba([0, 255, 0, 255]),
    );
    draw_polygon_mut(
        &mut canvas,
        &[
            Point::new(300, 30),
            Point::new(350, 130),
            Point::new(250, 130),
        ],
        Rgba([0, 0, 255, 255]),
    );
    draw_polygon_mut(
        &mut canvas,
        &regular_polygon(100.0, 200.0, 40.0, 5),
        Rgba([255, 255, 0, 255]),
    );
    draw_filled_circle_mut(&mut canvas, (240, 220), 40, Rgba([255, 0, 255, 255]));
    canvas
}

/// Write the sample image to the given path, creating parent directories
/// as needed. The format follows the file extension.
pub fn write_sample_image(path: &Path) -> Result<()> {
    if let Some(directory) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(directory)?;
    }
    sample_image().save(path)?;
    Ok(())
}

// Vertices of a regular polygon, first one pointing straight up.
fn regular_polygon(center_x: f64, center_y: f64, radius: f64, sides: u32) -> Vec<Point<i32>> {
    (0..sides)
        .map(|side| {
            let angle = TAU * f64::from(side) / f64::from(sides) - FRAC_PI_2;
            Point::new(
                (center_x + radius * angle.cos()).round() as i32,
                (center_y + radius * angle.sin()).round() as i32,
            )
        })
        .collect()
}
