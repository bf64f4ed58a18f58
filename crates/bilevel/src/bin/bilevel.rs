use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use bilevel::decode::{self, RasterInfo, Rgb16Raster};
use bilevel::pipeline::{BilevelOutput, PipelineConfig};
use bilevel::{PipelineError, SearchRange};
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use serde::Serialize;

#[cfg(feature = "tracing")]
use tracing_log::LogTracer;
#[cfg(feature = "tracing")]
use tracing_subscriber::EnvFilter;

/// Select an Otsu threshold for a 16-bit RGB image and binarize it.
#[derive(Parser, Debug)]
#[command(name = "bilevel", version, about)]
struct Cli {
    /// Image to analyse (16-bit RGB, e.g. TIFF or PNG).
    image: PathBuf,

    /// JSON pipeline config, e.g. `{"otsu": {"search": "full_domain"}}`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Candidate threshold range; overrides the config file.
    #[arg(long, value_enum)]
    search: Option<SearchArg>,

    /// Convert images that are not 16-bit RGB instead of rejecting them.
    #[arg(long)]
    convert: bool,

    /// Print a single JSON report instead of text.
    #[arg(long)]
    json: bool,

    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SearchArg {
    #[value(name = "full-domain")]
    FullDomain,
    #[value(name = "legacy8-bit")]
    Legacy8Bit,
}

impl From<SearchArg> for SearchRange {
    fn from(arg: SearchArg) -> Self {
        match arg {
            SearchArg::FullDomain => SearchRange::FullDomain,
            SearchArg::Legacy8Bit => SearchRange::Legacy8Bit,
        }
    }
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("failed to read config {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    ParseConfig {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to encode report: {0}")]
    Report(#[from] serde_json::Error),

    #[error(transparent)]
    Logger(#[from] log::SetLoggerError),
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    image: String,
    info: &'a RasterInfo,
    search: SearchRange,
    threshold: u16,
    between_class_variance: f64,
    foreground_pixels: usize,
    total_pixels: usize,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    init_logging(cli.log_level)?;

    let mut cfg = match &cli.config {
        Some(path) => load_config(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(search) = cli.search {
        cfg.otsu.search = search.into();
    }

    let img = decode::open_dynamic(&cli.image)?;
    let info = RasterInfo::from_dynamic(&img);
    let raster = if cli.convert {
        Rgb16Raster::convert_from(&img)
    } else {
        Rgb16Raster::from_dynamic(img).map_err(PipelineError::from)?
    };
    let out = raster.run(&cfg).map_err(PipelineError::from)?;

    if cli.json {
        print_json(cli, &info, &cfg, &out)?;
    } else {
        print_text(cli, &info, &out);
    }
    Ok(())
}

fn load_config(path: &Path) -> Result<PipelineConfig, CliError> {
    let raw = fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CliError::ParseConfig {
        path: path.to_path_buf(),
        source,
    })
}

fn print_text(cli: &Cli, info: &RasterInfo, out: &BilevelOutput) {
    println!("{}", cli.image.display());
    print!("{info}");
    println!("Binarization threshold: {}", out.threshold);
    println!(
        "Foreground: {} of {} pixels ({:.2}%)",
        out.image.foreground_count(),
        out.image.as_slice().len(),
        out.image.foreground_fraction() * 100.0
    );
}

fn print_json(
    cli: &Cli,
    info: &RasterInfo,
    cfg: &PipelineConfig,
    out: &BilevelOutput,
) -> Result<(), CliError> {
    let report = Report {
        image: cli.image.to_string_lossy().into_owned(),
        info,
        search: cfg.otsu.search,
        threshold: out.threshold,
        between_class_variance: out.between_class_variance,
        foreground_pixels: out.image.foreground_count(),
        total_pixels: out.image.as_slice().len(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(feature = "tracing")]
fn init_logging(_level: LevelFilter) -> Result<(), CliError> {
    // Ignore errors if a subscriber was already installed.
    let _ = LogTracer::init();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
    Ok(())
}

#[cfg(not(feature = "tracing"))]
fn init_logging(level: LevelFilter) -> Result<(), CliError> {
    Ok(bilevel::core::init_with_level(level)?)
}
