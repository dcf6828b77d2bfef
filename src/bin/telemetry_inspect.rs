use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use screen_telemetry::processing::{trail_points, DEFAULT_MAX_AGE_MS, DEFAULT_MAX_POINTS};
use screen_telemetry::telemetry::{load_session, TelemetryStats};
use screen_telemetry::timeline::{AlwaysListening, TimelineDrag, TimelineViewport};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "telemetry-inspect")]
#[command(about = "Inspect recorded screen telemetry")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print session metadata and event counts
    Stats { file: PathBuf },
    /// Print the cursor trail at a playback time
    Trail {
        file: PathBuf,

        #[arg(long)]
        at: f64,

        #[arg(long, default_value_t = DEFAULT_MAX_AGE_MS)]
        max_age: f64,

        #[arg(long, default_value_t = DEFAULT_MAX_POINTS)]
        max_points: usize,
    },
    /// Map a timeline pointer position to a timestamp, optionally as a drag of `--id`
    Map {
        #[arg(long)]
        range_start: f64,

        #[arg(long)]
        range_end: f64,

        #[arg(long, default_value = "0")]
        sidebar: f64,

        #[arg(long)]
        width: f64,

        #[arg(long)]
        pointer_x: f64,

        #[arg(long, default_value = "0")]
        timeline_left: f64,

        #[arg(long)]
        duration: f64,

        #[arg(long)]
        id: Option<String>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsReport<'a> {
    session_id: &'a str,
    duration_ms: f64,
    has_spatial_signal: bool,
    stats: &'a TelemetryStats,
    auto_zoom_regions: Option<usize>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MapReport {
    id: Option<String>,
    relative_ms: f64,
    absolute_ms: f64,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

fn main() -> Result<()> {
    screen_telemetry::init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Stats { file } => {
            let session = load_session(&file)
                .with_context(|| format!("Failed to load telemetry file {}", file.display()))?;
            print_json(&StatsReport {
                session_id: &session.session_id,
                duration_ms: session.duration_ms(),
                has_spatial_signal: session.has_spatial_signal(),
                stats: session.stats(),
                auto_zoom_regions: session.generated_auto_zoom().map(|z| z.regions.len()),
            })
        }
        Commands::Trail {
            file,
            at,
            max_age,
            max_points,
        } => {
            let session = load_session(&file)
                .with_context(|| format!("Failed to load telemetry file {}", file.display()))?;
            if !session.has_spatial_signal() {
                tracing::warn!("Session {} has no usable source bounds", session.session_id);
            }
            print_json(&trail_points(&session, at, max_age, max_points))
        }
        Commands::Map {
            range_start,
            range_end,
            sidebar,
            width,
            pointer_x,
            timeline_left,
            duration,
            id,
        } => {
            let viewport = TimelineViewport::new(range_start, range_end, sidebar, width);
            let relative_ms = viewport.pixels_to_value(pointer_x - timeline_left - sidebar);

            let absolute_ms = match id {
                Some(ref id) => {
                    let mut drag = TimelineDrag::new(AlwaysListening);
                    drag.start(id.clone());
                    let moved = drag.pointer_move(pointer_x, timeline_left, &viewport, duration, |id, ms| {
                        tracing::info!("Drag {} -> {:.1}ms", id, ms);
                    });
                    drag.end();
                    moved.unwrap_or_default()
                }
                None => viewport.pointer_to_ms(pointer_x, timeline_left, duration),
            };

            print_json(&MapReport {
                id,
                relative_ms,
                absolute_ms,
            })
        }
    }
}
