//! vfx-resample - sample and rescale images with bordered interpolation
//!
//! Lists the generated variant matrix, evaluates single samples and rescales
//! raw `f32` images.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vfx_resample::{Backend, BorderPolicy, DataType, Filter};

mod commands;

#[derive(Parser)]
#[command(name = "vfx-resample")]
#[command(author, version, about = "Sub-pixel resampling with per-edge border handling")]
#[command(long_about = "
Samples 2D regions with bilinear, bicubic or Lanczos-3 filters while
controlling what happens to taps that leave the region.

Raw images are flat little-endian f32 arrays, one value per pixel.

Examples:
  vfx-resample variants --filter cubic --policy clamp
  vfx-resample sample interpolate_linear_const_l_f32_buf -x -1 -y 0.5 --fallback -1
  vfx-resample sample interpolate_cubic_f32_tex -x 2.3 -y 1.7 -i plate.f32 -w 64 -H 48
  vfx-resample scale plate.f32 -o half.f32 -w 64 -H 48 --to-width 32 --to-height 24
  vfx-resample -vv -j 4 scale plate.f32 -o big.f32 -w 64 -H 48 --to-width 256 --to-height 192
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// List generated variant identifiers
    #[command(visible_alias = "ls")]
    Variants(VariantsArgs),

    /// Evaluate one variant at one coordinate
    #[command(visible_alias = "s")]
    Sample(SampleArgs),

    /// Rescale a raw f32 image
    #[command(visible_alias = "r")]
    Scale(ScaleArgs),
}

#[derive(Args)]
struct VariantsArgs {
    /// Only this filter: linear, cubic, lanczos
    #[arg(short, long)]
    filter: Option<Filter>,

    /// Only this border policy: clamp, repeat, mirror, const
    #[arg(short, long)]
    policy: Option<BorderPolicy>,

    /// Only this element type: f16, f32, f64, vec2, vec3, vec4
    #[arg(short, long)]
    dtype: Option<DataType>,

    /// Only this backend: buf, tex
    #[arg(short, long)]
    backend: Option<Backend>,

    /// Print the number of variants instead of their names
    #[arg(short, long)]
    count: bool,
}

#[derive(Args)]
struct SampleArgs {
    /// Variant identifier, e.g. interpolate_cubic_clamp_tl_f32_buf
    variant: String,

    /// Region-relative x coordinate
    #[arg(short, allow_negative_numbers = true)]
    x: f32,

    /// Region-relative y coordinate
    #[arg(short, allow_negative_numbers = true)]
    y: f32,

    /// Raw f32 input (default: synthetic ramp x + y * width)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Image width
    #[arg(short, long, default_value = "4")]
    width: i32,

    /// Image height
    #[arg(short = 'H', long, default_value = "4")]
    height: i32,

    /// Value for taps outside constant edges
    #[arg(long, allow_negative_numbers = true)]
    fallback: Option<f32>,
}

#[derive(Args)]
struct ScaleArgs {
    /// Raw f32 input image
    input: PathBuf,

    /// Raw f32 output image
    #[arg(short, long)]
    output: PathBuf,

    /// Input width
    #[arg(short, long)]
    width: i32,

    /// Input height
    #[arg(short = 'H', long)]
    height: i32,

    /// Output width
    #[arg(long)]
    to_width: usize,

    /// Output height
    #[arg(long)]
    to_height: usize,

    /// Filter: linear, cubic, lanczos
    #[arg(short, long, default_value = "cubic")]
    filter: Filter,

    /// Border policy on all edges: clamp, repeat, mirror, const
    #[arg(short, long, default_value = "clamp")]
    policy: BorderPolicy,

    /// Value for taps outside constant edges (default 0)
    #[arg(long, allow_negative_numbers = true)]
    fallback: Option<f32>,
}

/// Installs the fmt subscriber; `RUST_LOG` overrides the `-v` level.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Variants(args) => commands::variants::run(args, cli.verbose),
        Commands::Sample(args) => commands::sample::run(args, cli.verbose),
        Commands::Scale(args) => commands::scale::run(args, cli.verbose),
    }
}
