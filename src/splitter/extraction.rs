use image::{DynamicImage, RgbaImage};
use imageproc::point::Point;
use imageproc::rect::Rect;

use crate::splitter::labeling::RegionStats;

/// One extracted object: its geometry plus an independent RGBA crop.
#[derive(Debug)]
pub struct Region {
    pub id: u32,
    pub area: u32,
    pub bounding_box: Rect,
    pub centroid: Point<f64>,
    pub image: RgbaImage,
}

/// Crop every component with at least `min_area` pixels out of the image.
///
/// Regions come back ordered by ascending label id. Crops are plain
/// bounding-box rectangles (pixels of overlapping neighbors included) and
/// always carry an alpha channel; sources without one yield fully opaque
/// crops. The source image is never modified.
pub fn extract_regions(image: &DynamicImage, stats: &[RegionStats], min_area: u32) -> Vec<Region> {
    stats
        .iter()
        .filter(|stats| stats.area >= min_area)
        .map(|stats| {
            let bounding_box = stats.bounding_box();
            let crop = image
                .crop_imm(
                    bounding_box.left() as u32,
                    bounding_box.top() as u32,
                    bounding_box.width(),
                    bounding_box.height(),
                )
                .to_rgba8();
            Region {
                id: stats.label,
                area: stats.area,
                bounding_box,
                centroid: stats.centroid(),
                image: crop,
            }
        })
        .collect()
}
