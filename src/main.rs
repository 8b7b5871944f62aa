use clap::{Parser, Subcommand, ValueEnum};
use simple_resize::imaging::{RasterImage, SizePolicy};
use simple_resize::output::{self, RasterSummary, ResizeReport};
use simple_resize::{config, resizer::Resizer};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Cover the box, cropping overflow
    Fill,
    /// Fit inside the box, transparent bands
    Fit,
    /// Scale by the box's own width/height ratio
    Match,
}

#[derive(Parser)]
#[command(name = "simple-resize")]
#[command(about = "Resize images with fill/fit/match policies and rounded corners")]
#[command(long_about = "\
Resize images with fill/fit/match policies and rounded corners

Modes:
  fill   scale to cover WIDTHxHEIGHT, cropping what overflows
  fit    scale to fit inside WIDTHxHEIGHT, leaving transparent bands
  match  scale by WIDTH/HEIGHT regardless of the source size

Sizes are logical units; the output has WIDTH*display_scale pixels.
Use a PNG output to keep transparent corners and bands.

Run 'simple-resize gen-config' to generate a documented config.toml.
Set RUST_LOG=debug to see the computed draw rectangles.")]
#[command(version = version_string())]
struct Cli {
    /// Config file (defaults are used when omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct ResizeArgs {
    /// Image to read
    input: PathBuf,
    /// Image to write (format from extension)
    output: PathBuf,
    /// Resize policy
    #[arg(long, value_enum, default_value = "fill")]
    mode: Mode,
    /// Target width in logical units
    #[arg(long)]
    width: f32,
    /// Target height in logical units
    #[arg(long)]
    height: f32,
    /// Rounded-corner radius in logical units (0 = square corners)
    #[arg(long, default_value_t = 0.0)]
    corner_radius: f32,
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Resize one image
    Resize(ResizeArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Resize(args) => {
            let resize_config = config::load_config(cli.config.as_deref())?;
            let resizer = Resizer::new(&resize_config)?;
            let report = run_resize(&resizer, &args)?;

            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                output::print_resize_report(&report);
            }
            if report.result.is_none() {
                return Err(format!("no image produced for {}", args.input.display()).into());
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn policy_for(args: &ResizeArgs) -> SizePolicy {
    match args.mode {
        Mode::Fill => SizePolicy::Fill(args.width, args.height),
        Mode::Fit => SizePolicy::Fit(args.width, args.height),
        Mode::Match => SizePolicy::Match(args.width, args.height),
    }
}

/// Load, resize on the worker pool, and save.
fn run_resize(
    resizer: &Resizer,
    args: &ResizeArgs,
) -> Result<ResizeReport, Box<dyn std::error::Error>> {
    let source = Arc::new(RasterImage::open(&args.input)?);
    let policy = policy_for(args);
    let started = Instant::now();

    let (tx, rx) = std::sync::mpsc::channel();
    resizer.resize_with(&source, policy, args.corner_radius, move |result| {
        let _ = tx.send(result);
    });
    let resized = rx.recv()?;
    let elapsed_ms = started.elapsed().as_millis();

    if let Some(image) = &resized {
        image.save(&args.output)?;
    }

    Ok(ResizeReport {
        input: args.input.clone(),
        output: args.output.clone(),
        policy,
        corner_radius: args.corner_radius.max(0.0),
        source: RasterSummary::from(source.as_ref()),
        result: resized.as_ref().map(RasterSummary::from),
        elapsed_ms,
    })
}
