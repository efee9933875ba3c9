use image::{DynamicImage, GenericImageView, Rgb};
use itertools::Itertools;

use crate::error::{Error, Result};

/// Estimate the background color by averaging the four corner pixels.
///
/// Corners that coincide (images narrower or shorter than 2 pixels) are
/// sampled once, so a 1x1 image degrades to a single-pixel sample.
pub fn estimate(image: &DynamicImage) -> Result<Rgb<u8>> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::EmptyImage { width, height });
    }
    let corners = [
        (0, 0),
        (width - 1, 0),
        (0, height - 1),
        (width - 1, height - 1),
    ];
    let mut sums = [0u32; 3];
    let mut samples = 0u32;
    for (index, corner) in corners.iter().enumerate() {
        if corners[..index].contains(corner) {
            continue;
        }
        let pixel = image.get_pixel(corner.0, corner.1);
        for (sum, channel) in sums.iter_mut().zip(pixel.0) {
            *sum += u32::from(channel);
        }
        samples += 1;
    }
    let mut channels = [0u8; 3];
    for (channel, sum) in channels.iter_mut().zip(sums) {
        *channel = (f64::from(sum) / f64::from(samples)).round() as u8;
    }
    Ok(Rgb(channels))
}

/// Classify a packed pixel against the reference background color.
///
/// Compares squared Euclidean distance over the first 3 channels, so the
/// same slice serves RGB and RGBA rows and alpha never participates.
pub fn is_background(pixel: &[u8], background: Rgb<u8>, tolerance: f32) -> bool {
    let mut distance_squared = 0.0f32;
    for (channel, reference) in pixel.iter().zip(background.0) {
        let delta = f32::from(*channel) - f32::from(reference);
        distance_squared += delta * delta;
    }
    distance_squared <= tolerance * tolerance
}

pub fn to_hex(color: Rgb<u8>) -> String {
    format!("#{}", color.0.iter().map(|c| format!("{c:02X}")).join(""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    #[test]
    fn estimate_averages_the_four_corners() {
        let mut img = RgbImage::new(2, 2);
        img.put_pixel(0, 0, Rgb([10, 0, 100]));
        img.put_pixel(1, 0, Rgb([20, 0, 100]));
        img.put_pixel(0, 1, Rgb([30, 0, 100]));
        img.put_pixel(1, 1, Rgb([40, 0, 100]));
        let background = estimate(&DynamicImage::ImageRgb8(img)).unwrap();
        assert_eq!(background, Rgb([25, 0, 100]));
    }

    #[test]
    fn estimate_ignores_interior_pixels() {
        let mut img = RgbImage::from_pixel(3, 3, Rgb([200, 200, 200]));
        img.put_pixel(1, 1, Rgb([0, 0, 0]));
        let background = estimate(&DynamicImage::ImageRgb8(img)).unwrap();
        assert_eq!(background, Rgb([200, 200, 200]));
    }

    #[test]
    fn estimate_samples_coinciding_corners_once() {
        // A 1x2 image has only two distinct corners; averaging four
        // samples instead of two would skew the mean.
        let mut img = RgbImage::new(1, 2);
        img.put_pixel(0, 0, Rgb([0, 0, 1]));
        img.put_pixel(0, 1, Rgb([0, 0, 2]));
        let background = estimate(&DynamicImage::ImageRgb8(img)).unwrap();
        assert_eq!(background, Rgb([0, 0, 2]));
    }

    #[test]
    fn estimate_degrades_to_a_single_pixel() {
        let img = RgbImage::from_pixel(1, 1, Rgb([12, 34, 56]));
        let background = estimate(&DynamicImage::ImageRgb8(img)).unwrap();
        assert_eq!(background, Rgb([12, 34, 56]));
    }

    #[test]
    fn estimate_rejects_empty_images() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(0, 0));
        assert!(matches!(
            estimate(&img),
            Err(Error::EmptyImage {
                width: 0,
                height: 0
            })
        ));
    }

    #[test]
    fn classification_is_inclusive_at_the_tolerance() {
        let background = Rgb([255, 255, 255]);
        // Distance from white is exactly 20.
        assert!(is_background(&[255, 235, 255], background, 20.0));
        assert!(!is_background(&[255, 235, 255], background, 19.99));
        assert!(!is_background(&[255, 234, 255], background, 20.0));
    }

    #[test]
    fn classification_ignores_a_fourth_channel() {
        let background = Rgb([255, 255, 255]);
        assert!(is_background(&[255, 255, 255, 0], background, 0.0));
        assert!(!is_background(&[0, 0, 0, 255], background, 100.0));
    }

    #[test]
    fn hex_rendering_pads_every_channel() {
        assert_eq!(to_hex(Rgb([0x12, 0x34, 0x56])), "#123456");
        assert_eq!(to_hex(Rgb([0, 10, 255])), "#000AFF");
    }
}
