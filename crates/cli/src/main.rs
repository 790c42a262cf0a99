//! RowGuard CLI - corridor right-of-way change assessment

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use rowguard_algorithms::assessment::{assess_regions, AssessedEvent, AssessmentContext};
use rowguard_algorithms::compliance::{check_setback, ComplianceVerdict};
use rowguard_algorithms::corridor::{load_corridor, Corridor};
use rowguard_algorithms::imagery::{detect_changes, ChangeRegion, DetectionParams};
use rowguard_algorithms::scoring::{compute_threat, ThreatResult};
use rowguard_core::config::DEFAULT_CONFIG_PATH;
use rowguard_core::io::read_intensity;
use rowguard_core::{GeoTransform, Raster, Settings};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "rowguard")]
#[command(author, version, about = "Corridor right-of-way change assessment", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Settings file (YAML); defaults apply when it does not exist
    #[arg(
        short,
        long,
        global = true,
        env = "ROWGUARD_CONFIG",
        default_value = DEFAULT_CONFIG_PATH
    )]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect change regions between two images
    Detect {
        /// Image before the change
        before: PathBuf,
        /// Image after the change
        after: PathBuf,
        /// Minimum intensity difference counted as change
        #[arg(long)]
        threshold: Option<u8>,
        /// Smallest region kept, in pixels
        #[arg(long)]
        min_area: Option<u64>,
        /// Side of the square cleanup kernel
        #[arg(long)]
        kernel: Option<usize>,
        /// Write the JSON result to this file instead of stdout
        #[arg(short, long)]
        report: Option<PathBuf>,
    },
    /// Distance from a point to a corridor
    Distance {
        /// Corridor GeoJSON file
        corridor: PathBuf,
        /// Longitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        /// Latitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        /// Buffer half-width in metres [default: pipeline.corridor_buffer_meters]
        #[arg(long)]
        buffer: Option<f64>,
    },
    /// Check a distance against the minimum setback
    CheckSetback {
        /// Distance in metres
        #[arg(allow_negative_numbers = true)]
        distance: f64,
        /// Minimum setback in metres [default: compliance.setback_meters]
        #[arg(long)]
        setback: Option<f64>,
    },
    /// Score a single encroachment
    Score {
        /// structure, road, equipment, water or unknown
        #[arg(long, default_value = "unknown")]
        category: String,
        /// Distance to the corridor in metres
        #[arg(long, allow_negative_numbers = true)]
        distance: f64,
        /// Mean change magnitude (0-255)
        #[arg(long, default_value = "0")]
        magnitude: f64,
        /// Region area in pixels
        #[arg(long, default_value = "0")]
        area: u64,
        /// Compliance outcome [default: derived from --distance and the setback]
        #[arg(long)]
        compliant: Option<bool>,
    },
    /// Detect changes and assess each region against a corridor
    Assess {
        /// Image before the change
        before: PathBuf,
        /// Image after the change
        after: PathBuf,
        /// Corridor GeoJSON file
        #[arg(long)]
        corridor: Option<PathBuf>,
        /// Event longitude, used when no geotransform is given
        #[arg(long, allow_negative_numbers = true, requires = "lat")]
        lon: Option<f64>,
        /// Event latitude, used when no geotransform is given
        #[arg(long, allow_negative_numbers = true, requires = "lon")]
        lat: Option<f64>,
        /// Georeference of the before image: ox,oy,pw,ph or six GDAL coefficients
        #[arg(long, allow_hyphen_values = true)]
        geotransform: Option<GeoTransform>,
        /// Encroachment category for scoring
        #[arg(long, default_value = "unknown")]
        category: String,
        /// Write the JSON result to this file instead of stdout
        #[arg(short, long)]
        report: Option<PathBuf>,
    },
}

// ─── Output records ─────────────────────────────────────────────────────

#[derive(Serialize)]
struct DetectOutput<'a> {
    before: &'a Path,
    after: &'a Path,
    count: usize,
    detections: &'a [ChangeRegion],
}

#[derive(Serialize)]
struct DistanceOutput {
    lon: f64,
    lat: f64,
    zone: String,
    distance_m: f64,
    buffer_m: f64,
    in_buffer: bool,
}

#[derive(Serialize)]
struct ScoreOutput {
    compliance: ComplianceVerdict,
    threat: ThreatResult,
}

#[derive(Serialize)]
struct AssessOutput<'a> {
    before: &'a Path,
    after: &'a Path,
    detected: usize,
    events: &'a [AssessedEvent],
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")
}

fn spinner(msg: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    Ok(pb)
}

fn read_image(path: &Path) -> Result<Raster<u8>> {
    let pb = spinner("Reading image...")?;
    let raster = read_intensity(path)
        .with_context(|| format!("Failed to read image {}", path.display()))?;
    pb.finish_and_clear();
    info!("{}: {} x {}", path.display(), raster.cols(), raster.rows());
    Ok(raster)
}

fn read_corridor(path: &Path) -> Result<Corridor> {
    let pb = spinner("Loading corridor...")?;
    let corridor = load_corridor(path)
        .with_context(|| format!("Failed to load corridor {}", path.display()))?;
    pb.finish_and_clear();
    Ok(corridor)
}

/// Print `value` as JSON, or write it to `report` and print the path
fn emit<T: Serialize>(value: &T, report: Option<&Path>) -> Result<()> {
    match report {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create report {}", path.display()))?;
            serde_json::to_writer_pretty(BufWriter::new(file), value)
                .context("Failed to write report")?;
            println!("{}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

fn done(name: &str, elapsed: std::time::Duration) {
    info!("{} finished in {:.2?}", name, elapsed);
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    let settings = Settings::load(Some(&cli.config))
        .with_context(|| format!("Failed to load settings from {}", cli.config.display()))?;

    match cli.command {
        Commands::Detect {
            before,
            after,
            threshold,
            min_area,
            kernel,
            report,
        } => {
            let mut params = DetectionParams::from(&settings.pipeline);
            if let Some(t) = threshold {
                params.change_threshold = t;
            }
            if let Some(a) = min_area {
                params.min_region_area = a;
            }
            if let Some(k) = kernel {
                params.morphology_kernel_size = k;
            }

            let before_img = read_image(&before)?;
            let after_img = read_image(&after)?;
            let start = Instant::now();
            let regions = detect_changes(&before_img, &after_img, &params)
                .context("Change detection failed")?;
            done("Change detection", start.elapsed());

            emit(
                &DetectOutput {
                    before: &before,
                    after: &after,
                    count: regions.len(),
                    detections: &regions,
                },
                report.as_deref(),
            )?;
        }

        Commands::Distance {
            corridor,
            lon,
            lat,
            buffer,
        } => {
            let corridor = read_corridor(&corridor)?;
            let buffer_m = buffer.unwrap_or(settings.pipeline.corridor_buffer_meters);
            let distance_m = corridor.distance_meters(lon, lat);

            emit(
                &DistanceOutput {
                    lon,
                    lat,
                    zone: rowguard_core::UtmZone::for_lonlat(lon, lat).to_string(),
                    distance_m,
                    buffer_m,
                    in_buffer: distance_m <= buffer_m,
                },
                None,
            )?;
        }

        Commands::CheckSetback { distance, setback } => {
            let setback = setback.unwrap_or(settings.compliance.setback_meters);
            emit(&check_setback(distance, setback), None)?;
        }

        Commands::Score {
            category,
            distance,
            magnitude,
            area,
            compliant,
        } => {
            let mut compliance = check_setback(distance, settings.compliance.setback_meters);
            if let Some(passes) = compliant {
                compliance = compliance.overridden(passes);
            }
            let threat = compute_threat(&category, distance, compliance.passes, magnitude, area);
            emit(&ScoreOutput { compliance, threat }, None)?;
        }

        Commands::Assess {
            before,
            after,
            corridor,
            lon,
            lat,
            geotransform,
            category,
            report,
        } => {
            let corridor = corridor.as_deref().map(read_corridor).transpose()?;
            let before_img = read_image(&before)?;
            let after_img = read_image(&after)?;

            let start = Instant::now();
            let regions =
                detect_changes(&before_img, &after_img, &DetectionParams::from(&settings.pipeline))
                    .context("Change detection failed")?;

            let ctx = AssessmentContext {
                corridor: corridor.as_ref(),
                geotransform,
                event_location: lon.zip(lat),
                category: &category,
                ..AssessmentContext::new(&settings)
            };
            let events = assess_regions(&regions, &ctx, None);
            done("Assessment", start.elapsed());

            emit(
                &AssessOutput {
                    before: &before,
                    after: &after,
                    detected: regions.len(),
                    events: &events,
                },
                report.as_deref(),
            )?;
        }
    }

    Ok(())
}
