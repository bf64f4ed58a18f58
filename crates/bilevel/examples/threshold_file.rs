use bilevel::decode::{self, RasterInfo, Rgb16Raster};
use bilevel::pipeline::PipelineConfig;

#[cfg(feature = "tracing")]
use bilevel::core::init_tracing;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing")]
    init_tracing(false);
    #[cfg(not(feature = "tracing"))]
    bilevel::core::init_with_level(log::LevelFilter::Info)?;

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Usage: threshold_file <image_path>");
        return Ok(());
    };

    let img = decode::open_dynamic(&path)?;
    print!("{}", RasterInfo::from_dynamic(&img));

    let raster = Rgb16Raster::from_dynamic(img)?;
    let out = raster.run(&PipelineConfig::default())?;
    println!("Binarization threshold: {}", out.threshold);
    println!(
        "foreground {:.2}% of {}x{}",
        out.image.foreground_fraction() * 100.0,
        out.image.width(),
        out.image.height()
    );

    Ok(())
}
