use argh::FromArgs;
use std::path::PathBuf;

use alphamorph::{
    imgproc::{
        morphology::{self, KernelType, MorphOp},
        parallel::ExecutionStrategy,
    },
    io::{
        adapter::{pixel_radius, MaskSource, ScaledImage},
        functional as F,
    },
};

#[derive(FromArgs)]
/// Grow or shrink the alpha silhouette of an image and save it as a grayscale mask
struct Args {
    /// path to an input image
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// path to the output mask
    #[argh(option, short = 'o')]
    output_path: PathBuf,

    /// operation: dilate, erode, open, close (default: dilate)
    #[argh(option, short = 'p', default = "String::from(\"dilate\")")]
    operation: String,

    /// kernel shape: rect, cross, diamond, disk (default: disk)
    #[argh(option, short = 'k', default = "KernelType::Disk")]
    kernel: KernelType,

    /// kernel radius in points (default: 2.0)
    #[argh(option, short = 's', default = "2.0")]
    size: f32,

    /// device pixels per point; overrides an @Nx file name suffix
    #[argh(option)]
    scale: Option<f32>,

    /// number of passes (default: 1)
    #[argh(option, short = 'n', default = "1")]
    iterations: i32,

    /// worker threads, 0 runs on the global pool (default: 0)
    #[argh(option, short = 't', default = "0")]
    threads: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let mut source = ScaledImage::open(&args.image_path)?;
    if let Some(scale) = args.scale {
        source.scale = scale;
    }

    let mask = source.extract_intensity_channel()?;
    let radius = pixel_radius(args.size, source.scale_factor())?;

    let strategy = match args.threads {
        0 => ExecutionStrategy::ParallelRows,
        n => ExecutionStrategy::Fixed(n),
    };

    log::info!(
        "{} {}x{} alpha mask: {} {}pt @{}x = {}px, {} iterations",
        args.operation,
        mask.width(),
        mask.height(),
        args.kernel,
        args.size,
        source.scale_factor(),
        radius,
        args.iterations
    );

    let output = match args.operation.as_str() {
        "dilate" => morphology::filter(
            &mask,
            MorphOp::Dilate,
            args.kernel,
            radius,
            args.iterations,
            strategy,
        )?,
        "erode" => morphology::filter(
            &mask,
            MorphOp::Erode,
            args.kernel,
            radius,
            args.iterations,
            strategy,
        )?,
        "open" => {
            morphology::open_with_strategy(&mask, args.kernel, radius, args.iterations, strategy)?
        }
        "close" => {
            morphology::close_with_strategy(&mask, args.kernel, radius, args.iterations, strategy)?
        }
        other => return Err(format!("unknown operation: {other}").into()),
    };

    F::write_mask(&args.output_path, &output)?;
    log::info!("wrote {}", args.output_path.display());

    Ok(())
}
