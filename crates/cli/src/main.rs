//! Aspect-slope CLI - combined aspect/slope maps from a DEM

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use aspectslope_algorithms::pipeline::{aspect_slope_map, stop_label, AspectSlopeParams};
use aspectslope_algorithms::terrain::HornDerivatives;
use aspectslope_colormap::{build_ramp, Direction, RenderParams, StopTable};
use aspectslope_core::io::{read_geotiff, write_geotiff, write_rgba_tiff};
use aspectslope_core::{Raster, RasterElement};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "aspectslope")]
#[command(author, version, about = "Combined aspect-slope maps from elevation rasters", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an aspect-slope map from a DEM
    Map {
        /// Input DEM file
        input: PathBuf,
        /// Output file for the combined codes
        output: PathBuf,
        /// Direction to highlight: none, n, ne, e, se, s, sw, w, nw (or 0-8)
        #[arg(short, long, default_value = "none")]
        direction: String,
        /// Z-factor used for aspect (>= 1)
        #[arg(long, default_value = "1.0")]
        aspect_z: f64,
        /// Z-factor used for slope (>= 1)
        #[arg(long, default_value = "1.0")]
        slope_z: f64,
        /// Also write the aspect raster (degrees)
        #[arg(long)]
        aspect_out: Option<PathBuf>,
        /// Also write the slope raster (degrees)
        #[arg(long)]
        slope_out: Option<PathBuf>,
        /// Write the color ramp as a stop table
        #[arg(long)]
        ramp_out: Option<PathBuf>,
        /// Write an RGBA rendering of the map
        #[arg(long)]
        render: Option<PathBuf>,
    },
    /// Export a built-in color ramp as a stop table
    Ramp {
        /// Direction to highlight
        direction: String,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show information about a raster file
    Info {
        /// Input raster file
        input: PathBuf,
    },
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set up logging")
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn read_dem(path: &Path) -> Result<Raster<f64>> {
    let pb = spinner("Reading raster...");
    let raster: Raster<f64> = read_geotiff(path)
        .with_context(|| format!("Failed to read raster {}", path.display()))?;
    pb.finish_and_clear();
    info!("Input: {} x {}", raster.cols(), raster.rows());
    Ok(raster)
}

fn write_result<T: RasterElement>(raster: &Raster<T>, path: &Path) -> Result<()> {
    let pb = spinner("Writing output...");
    write_geotiff(raster, path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    pb.finish_and_clear();
    Ok(())
}

fn write_text(text: &str, path: &Path) -> Result<()> {
    fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))
}

fn done(name: &str, path: &Path, elapsed: std::time::Duration) {
    println!("{} saved to: {}", name, path.display());
    println!("  Processing time: {:.2?}", elapsed);
}

fn parse_direction(s: &str) -> Result<Direction> {
    match s.parse::<Direction>() {
        Ok(d) => Ok(d),
        Err(_) => anyhow::bail!(
            "Unknown direction: {}. Use none, n, ne, e, se, s, sw, w, nw or 0-8.",
            s
        ),
    }
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    match cli.command {
        // ── Map ──────────────────────────────────────────────────────
        Commands::Map {
            input,
            output,
            direction,
            aspect_z,
            slope_z,
            aspect_out,
            slope_out,
            ramp_out,
            render,
        } => {
            let params = AspectSlopeParams {
                direction: parse_direction(&direction)?,
                aspect_z_factor: aspect_z,
                slope_z_factor: slope_z,
                keep_aspect: aspect_out.is_some(),
                keep_slope: slope_out.is_some(),
                ..Default::default()
            };
            params.validate().context("Invalid parameters")?;

            let dem = read_dem(&input)?;
            let start = Instant::now();
            let map = aspect_slope_map(&dem, &params, &HornDerivatives)
                .context("Failed to build aspect-slope map")?;
            let elapsed = start.elapsed();

            write_result(&map.combined, &output)?;
            done(&map.label, &output, elapsed);

            if let (Some(path), Some(aspect)) = (aspect_out.as_deref(), map.aspect.as_ref()) {
                write_result(aspect, path)?;
                println!("Aspect saved to: {}", path.display());
            }
            if let (Some(path), Some(slope)) = (slope_out.as_deref(), map.slope.as_ref()) {
                write_result(slope, path)?;
                println!("Slope saved to: {}", path.display());
            }
            if let Some(path) = ramp_out.as_deref() {
                write_text(&map.stop_table().to_string(), path)?;
                println!("Color ramp saved to: {}", path.display());
            }
            if let Some(path) = render.as_deref() {
                let pb = spinner("Rendering...");
                let rgba = map.render(&RenderParams::default());
                let (rows, cols) = map.combined.shape();
                let combined = &map.combined;
                write_rgba_tiff(&rgba, rows, cols, combined.transform(), combined.crs(), path)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                pb.finish_and_clear();
                println!("Rendering saved to: {}", path.display());
            }
        }

        // ── Ramp ─────────────────────────────────────────────────────
        Commands::Ramp { direction, output } => {
            let direction = parse_direction(&direction)?;
            let table = StopTable::from_ramp(&build_ramp(direction), stop_label).to_string();
            match output {
                Some(path) => {
                    write_text(&table, &path)?;
                    println!("{} ramp saved to: {}", direction, path.display());
                }
                None => println!("{}", table),
            }
        }

        // ── Info ─────────────────────────────────────────────────────
        Commands::Info { input } => {
            let raster = read_dem(&input)?;
            let (rows, cols) = raster.shape();
            let bounds = raster.bounds();
            let stats = raster.statistics();
            let transform = raster.transform();

            println!("File: {}", input.display());
            println!("Dimensions: {} x {} ({} cells)", cols, rows, raster.len());
            println!(
                "Cell size: {} x {}",
                transform.cell_width(),
                transform.cell_height()
            );
            println!(
                "Bounds: ({:.6}, {:.6}) - ({:.6}, {:.6})",
                bounds.0, bounds.1, bounds.2, bounds.3
            );
            if let Some(crs) = raster.crs() {
                println!("CRS: {}", crs);
            }
            if let Some(nodata) = raster.nodata() {
                println!("NoData: {}", nodata);
            }
            println!("\nStatistics:");
            if let Some(min) = stats.min {
                println!("  Min: {:.4}", min);
            }
            if let Some(max) = stats.max {
                println!("  Max: {:.4}", max);
            }
            if let Some(mean) = stats.mean {
                println!("  Mean: {:.4}", mean);
            }
            if !raster.is_empty() {
                println!(
                    "  Valid cells: {} ({:.1}%)",
                    stats.valid_count,
                    100.0 * stats.valid_count as f64 / raster.len() as f64
                );
            }
        }
    }

    Ok(())
}
