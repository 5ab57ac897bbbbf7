//! Sightline CLI - celestial sight-line animation renderer.
//!
//! Render an observation table as animation frames, or convert it to a
//! normalized decimal-degree table.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

use sightline::canvas::Rgba;
use sightline::export::{export_animation_png, FrameExportOptions};
use sightline::observation::{parse_table, Observation};
use sightline::render::{FrameRenderer, RenderConfig, RenderMode};

/// Celestial sight-line observation animator.
#[derive(Parser)]
#[command(name = "sightline")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render an observation table as PNG animation frames.
    Render {
        /// Input observation table (tab-separated sexagesimal rows).
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory for rendered frames.
        #[arg(short, long, default_value = "./frames")]
        output: PathBuf,

        /// Base name for frame files.
        #[arg(short, long, default_value = "frame")]
        name: String,

        /// Projection mode (globeUp, globeSide, aeUp, aeSide).
        #[arg(short, long, default_value = "globeUp")]
        mode: RenderMode,

        /// Surface width in pixels.
        #[arg(long, default_value = "800")]
        width: u32,

        /// Surface height in pixels.
        #[arg(long, default_value = "600")]
        height: u32,

        /// Rotation per frame in degrees.
        #[arg(long, default_value = "15.0")]
        rot_per_frame: f64,

        /// First frame of the animation range.
        #[arg(long, default_value = "0")]
        start: usize,

        /// One past the last frame (defaults to the observation count).
        #[arg(long)]
        end: Option<usize>,

        /// Normalized-to-pixel scale factor.
        #[arg(long, default_value = "200.0")]
        visible_rad: f64,

        /// Number of longitude grid lines.
        #[arg(long, default_value = "32")]
        n_longs: u32,

        /// Number of latitude grid lines.
        #[arg(long, default_value = "32")]
        n_lats: u32,

        /// Stroke width in normalized units.
        #[arg(long, default_value = "1.0")]
        line_width: f64,

        /// Trail fade opacity in [0, 1].
        #[arg(long, default_value = "0.2")]
        prev_opacity: f64,

        /// Background color (hex).
        #[arg(long, default_value = "#333333")]
        background_color: Rgba,

        /// Earth grid color (hex).
        #[arg(long, default_value = "#0077ff")]
        earth_line_color: Rgba,

        /// Trail sight color (hex).
        #[arg(long, default_value = "#ffffff")]
        prev_sight_color: Rgba,

        /// Current sight color (hex).
        #[arg(long, default_value = "#ffffff")]
        curr_sight_color: Rgba,

        /// Disable the cumulative trail.
        #[arg(long)]
        no_cumulative: bool,

        /// Skip observations with altitude below the horizon.
        #[arg(long)]
        hide_negative_alt: bool,

        /// Draw the angle readout overlay on each frame.
        #[arg(long)]
        legend: bool,
    },
    /// Parse an observation table and write it back as decimal degrees.
    Convert {
        /// Input observation table.
        #[arg(short, long)]
        input: PathBuf,

        /// Output path for the normalized table.
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            input,
            output,
            name,
            mode,
            width,
            height,
            rot_per_frame,
            start,
            end,
            visible_rad,
            n_longs,
            n_lats,
            line_width,
            prev_opacity,
            background_color,
            earth_line_color,
            prev_sight_color,
            curr_sight_color,
            no_cumulative,
            hide_negative_alt,
            legend,
        } => {
            let observations = load_observations(&input);

            let config = RenderConfig {
                start,
                end: end.unwrap_or(observations.len()),
                width,
                height,
                rot_per_frame,
                mode,
                cumulative: !no_cumulative,
                hide_negative_alt,
                visible_rad,
                background_color,
                earth_line_color,
                prev_sight_color,
                curr_sight_color,
                n_longs,
                n_lats,
                line_width,
                prev_opacity,
                show_legend: legend,
            };

            let renderer = FrameRenderer::new(config, observations).unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            });

            println!("Sightline - celestial sight-line animator");
            println!("Observations: {}", renderer.observations().len());
            println!(
                "Mode: {}, {}x{} px, {} deg/frame",
                mode, width, height, rot_per_frame
            );
            println!(
                "Frames: [{}, {})",
                renderer.config().start,
                renderer.config().end
            );

            let timer = Instant::now();
            let written =
                export_animation_png(&renderer, &output, &name, &FrameExportOptions::default())
                    .unwrap_or_else(|e| {
                        eprintln!("Error exporting frames: {}", e);
                        std::process::exit(1);
                    });

            println!(
                "Exported {} frames to {} in {:.2?}",
                written,
                output.display(),
                timer.elapsed()
            );
        }
        Commands::Convert { input, output } => {
            let observations = load_observations(&input);

            let table: String = observations
                .iter()
                .map(|obs| format_degrees_row(*obs))
                .collect::<Vec<_>>()
                .join("\n");

            std::fs::write(&output, table).unwrap_or_else(|e| {
                eprintln!("Error writing {}: {}", output.display(), e);
                std::process::exit(1);
            });

            println!(
                "Converted {} observations to {}",
                observations.len(),
                output.display()
            );
        }
    }
}

fn load_observations(input: &PathBuf) -> Vec<Observation> {
    let text = std::fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", input.display(), e);
        std::process::exit(1);
    });

    let observations = parse_table(&text).unwrap_or_else(|e| {
        eprintln!("Error parsing {}: {}", input.display(), e);
        std::process::exit(1);
    });

    log::info!(
        "parsed {} observations from {}",
        observations.len(),
        input.display()
    );
    observations
}

/// One observation as space-separated decimal degrees, six fractional
/// digits with trailing zeros trimmed.
fn format_degrees_row(obs: Observation) -> String {
    let (lat, lon, azm, alt) = obs.to_degrees();
    [lat, lon, azm, alt]
        .iter()
        .map(|v| trim_decimal(format!("{:.6}", v)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn trim_decimal(mut s: String) -> String {
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_degrees_row_trims_zeros() {
        let obs = Observation::from_degrees(59.5, -18.0, 120.125, 0.0);
        assert_eq!(format_degrees_row(obs), "59.5 -18 120.125 0");
    }

    #[test]
    fn test_trim_decimal_keeps_integers() {
        assert_eq!(trim_decimal("42".to_string()), "42");
        assert_eq!(trim_decimal("1.250000".to_string()), "1.25");
        assert_eq!(trim_decimal("-0.000000".to_string()), "-0");
    }
}
