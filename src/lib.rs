pub use self::error::{Error, Result};

use std::path::PathBuf;

use clap::Parser;
use image::Rgb;
use wild::ArgsOs;

use splitter::ObjectSplitter;
use splitter::labeling::Connectivity;

mod arg_validators;
mod error;

pub mod demo;
pub mod splitter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Input image files
    #[arg(required_unless_present("demo"))]
    files: Vec<PathBuf>,
    /// Background color tolerance (euclidean distance)
    #[arg(short, long, default_value_t = 20.0, value_parser = arg_validators::validate_tolerance)]
    tolerance: f32,
    /// Minimum object area (pixels)
    #[arg(short, long, default_value_t = 100)]
    min_area: u32,
    /// Pixel connectivity used for labeling, 4 or 8
    #[arg(short, long, default_value = "8", value_parser = arg_validators::validate_connectivity)]
    connectivity: Connectivity,
    /// Background color, sampled from the image corners when not given
    #[arg(short, long, value_parser = arg_validators::validate_background_color)]
    background_color: Option<Rgb<u8>>,
    /// Output directory, next to each input when not given
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
    /// Save an overview image with marked bounding boxes
    #[arg(long, default_value_t = false)]
    visualize: bool,
    /// Write a sample image to the given path and process it
    #[arg(long)]
    demo: Option<PathBuf>,
    /// Save intermediary images
    #[arg(short('s'), long, default_value_t = false)]
    save_intermediary_images: bool,
    /// Verbose messages
    #[arg(short('v'), long, default_value_t = false)]
    verbose: bool,
}

pub fn run(args: ArgsOs) -> Result<()> {
    let args = Args::parse_from(args);
    let mut files = Vec::new();
    if let Some(path) = &args.demo {
        demo::write_sample_image(path)?;
        println!("{}: sample image written", path.display());
        files.push(path.to_owned());
    }
    files.extend(args.files.iter().cloned());
    for file in files {
        let object_splitter = ObjectSplitter::new(file, &args);
        object_splitter.process()?;
        println!("");
    }
    Ok(())
}
