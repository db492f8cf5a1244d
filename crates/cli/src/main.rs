//! Verdant CLI - vegetation tiling, labelling and segmentation

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use verdant_algorithms::imagery::{binarize, excess_green, mask_coverage, BinarizeParams};
use verdant_algorithms::tiling::{tile_count, TilerParams};
use verdant_core::io::read_rgb;
use verdant_core::RgbRaster;
use verdant_model::{load_dataset, load_model, split_dataset, DatasetParams, InferenceParams};
use verdant_pipeline::strategy::num_threads;
use verdant_pipeline::{
    tile_image, BatchOptions, BatchProcessor, BatchReport, BinarizeTransform, ProcessingMode,
    SegmentTransform, BINARIZE_EXTENSIONS, INFERENCE_EXTENSIONS,
};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "verdant")]
#[command(author, version, about = "Vegetation tiling, labelling and segmentation", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about an image
    Info {
        /// Input image file
        input: PathBuf,
    },
    /// Cut an orthomosaic into fixed-size tiles
    Tile {
        /// Input orthomosaic
        #[arg(short, long)]
        input: PathBuf,
        /// Output directory for frame_NNNN.png tiles
        #[arg(short, long)]
        output: PathBuf,
        /// Tile width in pixels
        #[arg(long, default_value = "256")]
        tile_width: usize,
        /// Tile height in pixels
        #[arg(long, default_value = "256")]
        tile_height: usize,
    },
    /// Label vegetation in every image of a directory (Excess Green)
    Binarize {
        /// Input directory of RGB tiles
        #[arg(short, long)]
        input: PathBuf,
        /// Output directory for black/white masks
        #[arg(short, long)]
        output: PathBuf,
        /// Pixels with ExG strictly above this are vegetation
        #[arg(short, long, default_value = "30", allow_hyphen_values = true)]
        threshold: i16,
        /// Process files in parallel
        #[arg(short, long)]
        parallel: bool,
        /// Worker threads when parallel (default: all cores)
        #[arg(long, requires = "parallel")]
        threads: Option<usize>,
    },
    /// Segment every image of a directory with a trained model
    Infer {
        /// Input directory of RGB images
        #[arg(long)]
        rgb: PathBuf,
        /// Trained model file
        #[arg(long)]
        modelpath: PathBuf,
        /// Output directory for predicted masks
        #[arg(short, long)]
        output: PathBuf,
        /// Square model input size
        #[arg(short, long, default_value = "256")]
        size: u32,
        /// Process files in parallel
        #[arg(short, long)]
        parallel: bool,
        /// Worker threads when parallel (default: all cores)
        #[arg(long, requires = "parallel")]
        threads: Option<usize>,
    },
    /// Pair images with ground-truth masks and report the train/validation split
    Dataset {
        /// Directory of RGB images
        #[arg(long)]
        rgb: PathBuf,
        /// Directory of masks named like the images
        #[arg(long)]
        groundtruth: PathBuf,
        /// Square size every pair is resized to
        #[arg(short, long, default_value = "256")]
        size: u32,
        /// Fraction of pairs held out for validation
        #[arg(long, default_value = "0.2")]
        validation: f64,
        /// Shuffle seed
        #[arg(long, default_value = "42")]
        seed: u64,
    },
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn read_image(path: &Path) -> Result<RgbRaster> {
    let pb = spinner("Reading image...");
    let image = read_rgb(path).context("Failed to read image")?;
    pb.finish_and_clear();
    Ok(image)
}

fn processing_mode(parallel: bool, threads: Option<usize>) -> ProcessingMode {
    match (parallel, threads) {
        (false, _) => ProcessingMode::Sequential,
        (true, None) => ProcessingMode::Parallel,
        (true, Some(n)) => ProcessingMode::ParallelWith(n),
    }
}

fn done(name: &str, path: &Path, elapsed: Duration) {
    println!("{} saved to: {}", name, path.display());
    println!("  Processing time: {:.2?}", elapsed);
}

fn batch_done(name: &str, path: &Path, report: &BatchReport, elapsed: Duration) {
    done(name, path, elapsed);
    println!(
        "  Files: {} written, {} failed",
        report.written.len(),
        report.failed.len()
    );
    for failure in &report.failed {
        println!("    {}: {}", failure.input.display(), failure.error);
    }
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    match cli.command {
        // ── Info ─────────────────────────────────────────────────────
        Commands::Info { input } => {
            let image = read_image(&input)?;
            let tiles = tile_count(image.width(), image.height(), TilerParams::default())?;
            let score = excess_green(&image).context("Failed to compute Excess Green")?;
            let stats = score.statistics();
            let mask = binarize(&score, BinarizeParams::default());

            println!("File: {}", input.display());
            println!("Size: {}x{}", image.width(), image.height());
            println!("Tiles at 256x256: {}", tiles);
            println!("\nExcess Green:");
            if let Some(min) = stats.min {
                println!("  Min: {}", min);
            }
            if let Some(max) = stats.max {
                println!("  Max: {}", max);
            }
            if let Some(mean) = stats.mean {
                println!("  Mean: {:.2}", mean);
            }
            println!(
                "  Vegetation (ExG > {}): {:.1}%",
                BinarizeParams::default().threshold,
                100.0 * mask_coverage(&mask)
            );
        }

        // ── Tile ─────────────────────────────────────────────────────
        Commands::Tile {
            input,
            output,
            tile_width,
            tile_height,
        } => {
            let params = TilerParams {
                tile_width,
                tile_height,
            };
            params.validate().context("Invalid tile size")?;
            let image = read_image(&input)?;
            info!("Input: {} x {}", image.width(), image.height());

            let start = Instant::now();
            let summary = tile_image(&image, &output, params).context("Failed to write tiles")?;
            let elapsed = start.elapsed();
            if summary.total() == 0 {
                warn!(
                    "Image is smaller than one {}x{} tile; nothing written",
                    tile_width, tile_height
                );
            }
            done("Tiles", &output, elapsed);
            println!("  Tiles: {}", summary.total());
        }

        // ── Binarize ─────────────────────────────────────────────────
        Commands::Binarize {
            input,
            output,
            threshold,
            parallel,
            threads,
        } => {
            let mode = processing_mode(parallel, threads);
            if parallel {
                debug!("Parallel processing on {} thread(s)", threads.unwrap_or_else(num_threads));
            }
            let options = BatchOptions::with_extensions(BINARIZE_EXTENSIONS).mode(mode);
            let transform = BinarizeTransform::new(BinarizeParams { threshold });

            let start = Instant::now();
            let report = BatchProcessor::new(options)
                .run(&input, &output, &transform)
                .context("Binarization failed")?;
            batch_done("Binarized images", &output, &report, start.elapsed());
        }

        // ── Infer ────────────────────────────────────────────────────
        Commands::Infer {
            rgb,
            modelpath,
            output,
            size,
            parallel,
            threads,
        } => {
            let params = InferenceParams { input_size: size };
            let pb = spinner("Loading model...");
            let model = load_model(&modelpath)
                .with_context(|| format!("Failed to load model {}", modelpath.display()))?;
            pb.finish_and_clear();
            info!("Model loaded: {}", modelpath.display());

            let mode = processing_mode(parallel, threads);
            if parallel {
                debug!("Parallel processing on {} thread(s)", threads.unwrap_or_else(num_threads));
            }
            let options = BatchOptions::with_extensions(INFERENCE_EXTENSIONS).mode(mode);
            let transform = SegmentTransform::new(model, params);

            let start = Instant::now();
            let report = BatchProcessor::new(options)
                .run(&rgb, &output, &transform)
                .context("Inference failed")?;
            batch_done("Segmented images", &output, &report, start.elapsed());
        }

        // ── Dataset ──────────────────────────────────────────────────
        Commands::Dataset {
            rgb,
            groundtruth,
            size,
            validation,
            seed,
        } => {
            let params = DatasetParams {
                image_size: size,
                validation_fraction: validation,
                seed,
            };
            let pb = spinner("Loading dataset...");
            let loaded = load_dataset(&rgb, &groundtruth, params).context("Failed to load dataset")?;
            pb.finish_and_clear();

            for path in &loaded.missing_masks {
                warn!("No ground truth for {}", path.display());
            }
            for (path, error) in &loaded.unreadable {
                warn!("Skipped {}: {}", path.display(), error);
            }

            let split = split_dataset(&loaded.dataset, params).context("Failed to split dataset")?;
            println!("Pairs: {}", loaded.dataset.len());
            println!("  Skipped: {}", loaded.missing_masks.len() + loaded.unreadable.len());
            println!("  Train: {}", split.train.len());
            println!("  Validation: {}", split.validation.len());
        }
    }

    Ok(())
}
