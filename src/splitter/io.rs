use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::path::PathBuf;

use image::ImageBuffer;
use image::Luma;
use image::Rgba;

use crate::Result;

/// Helper to avoid having to specify common information for saving images over and over again
pub struct ImageSaver {
    base_path: PathBuf,
    is_debugging: bool,
}

impl ImageSaver {
    pub fn new(base_path: &Path, is_debugging: bool) -> Self {
        Self {
            base_path: base_path.to_owned(),
            is_debugging,
        }
    }

    /// Save RGBA image to PNG file with suffix appended before extension
    pub fn save_rgba_image_as(
        &self,
        img: &ImageBuffer<Rgba<u8>, Vec<u8>>,
        suffix: &str,
    ) -> Result<()> {
        let filename = self.compute_path(suffix);
        let file = File::create(&filename)?;
        let mut encoder = png::Encoder::new(BufWriter::new(file), img.width(), img.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.write_header()?.write_image_data(img.as_raw())?;
        println!("{}: saved", filename.display());
        Ok(())
    }

    /// Save grayscale image to file with suffix appended before extension
    pub fn save_luma_image_as(
        &self,
        img: &ImageBuffer<Luma<u8>, Vec<u8>>,
        suffix: &str,
    ) -> Result<()> {
        let filename = self.compute_path(suffix);
        img.save(&filename)?;
        println!("{}: saved", filename.display());
        Ok(())
    }

    /// Save debug grayscale image to file with suffix appended before extension
    /// Do nothing if we've been asked to not save intermediaries
    pub fn save_debug_luma_image_as(
        &self,
        img: &ImageBuffer<Luma<u8>, Vec<u8>>,
        suffix: &str,
    ) -> Result<()> {
        if self.is_debugging {
            return self.save_luma_image_as(img, suffix);
        }
        Ok(())
    }

    /// Compute full file path from base path and suffix
    pub fn compute_path(&self, suffix: &str) -> PathBuf {
        format!("{}-{suffix}.png", self.base_path.display()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_append_the_suffix_before_the_extension() {
        let saver = ImageSaver::new(Path::new("/tmp/out/photo"), false);
        assert_eq!(saver.compute_path("1"), PathBuf::from("/tmp/out/photo-1.png"));
        assert_eq!(
            saver.compute_path("mask"),
            PathBuf::from("/tmp/out/photo-mask.png")
        );
    }
}
