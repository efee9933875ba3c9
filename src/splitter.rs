use std::fs;
use std::path::PathBuf;

use image::Rgb;

use crate::{Args, Error, Result};

pub mod background;
pub mod extraction;
pub mod labeling;
pub mod mask;

mod drawing;
mod io;

pub(crate) struct ObjectSplitter {
    file: PathBuf,
    base_path: PathBuf,
    output_dir: Option<PathBuf>,
    tolerance: f32,
    min_area: u32,
    connectivity: labeling::Connectivity,
    background_color: Option<Rgb<u8>>,
    visualize: bool,
    save_intermediary_images: bool,
    verbose: bool,
}

impl ObjectSplitter {
    pub(crate) fn new(file: PathBuf, args: &Args) -> Self {
        let directory = match &args.output_dir {
            Some(directory) => directory.to_owned(),
            None => file.parent().unwrap().to_owned(),
        };
        let base_path = directory.join(file.file_stem().unwrap());
        Self {
            file,
            base_path,
            output_dir: args.output_dir.to_owned(),
            tolerance: args.tolerance,
            min_area: args.min_area,
            connectivity: args.connectivity,
            background_color: args.background_color,
            visualize: args.visualize,
            save_intermediary_images: args.save_intermediary_images,
            verbose: args.verbose,
        }
    }

    pub(crate) fn process(self) -> Result<()> {
        let image = image::open(&self.file)?;
        let (width, height) = (image.width(), image.height());
        if width == 0 || height == 0 {
            return Err(Error::EmptyImage { width, height });
        }
        println!("{}: {}x{}", self.file.display(), width, height);

        if let Some(directory) = &self.output_dir {
            fs::create_dir_all(directory)?;
        }
        let saver = io::ImageSaver::new(&self.base_path, self.save_intermediary_images);

        let background = match self.background_color {
            Some(color) => color,
            None => background::estimate(&image)?,
        };
        if self.verbose {
            println!(
                "{}: background color is {}",
                self.file.display(),
                background::to_hex(background)
            );
        }

        let image_mask = mask::build(&image, background, self.tolerance);
        if self.verbose {
            let foreground = image_mask.as_raw().iter().filter(|&&cell| cell != 0).count();
            println!("{}: {} foreground pixels", self.file.display(), foreground);
        }
        saver.save_debug_luma_image_as(&image_mask, "mask")?;

        let (_label_map, stats) = labeling::label_components(&image_mask, self.connectivity);
        if self.verbose {
            println!(
                "{}: {} components before area filtering",
                self.file.display(),
                stats.len()
            );
        }

        let regions = extraction::extract_regions(&image, &stats, self.min_area);
        println!("{}: found {} objects", self.file.display(), regions.len());
        for (index, region) in regions.iter().enumerate() {
            let object_number = index as u32 + 1;
            if self.verbose {
                let bounding_box = region.bounding_box;
                println!(
                    "{}: object {} (label {}) area {} bbox {}x{}+{}+{} centroid ({:.1}, {:.1})",
                    self.file.display(),
                    object_number,
                    region.id,
                    region.area,
                    bounding_box.width(),
                    bounding_box.height(),
                    bounding_box.left(),
                    bounding_box.top(),
                    region.centroid.x,
                    region.centroid.y,
                );
            }
            saver.save_rgba_image_as(&region.image, &format!("{object_number}")[..])?;
        }

        if self.visualize {
            let overlay = drawing::draw_region_overlay(&image, &regions);
            saver.save_rgba_image_as(&overlay, "overview")?;
        }

        Ok(())
    }
}
