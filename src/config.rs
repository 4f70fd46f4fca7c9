use std::time::Duration;

use clap::Parser;

/// Default surface pixels per grid cell.
pub const DEFAULT_RESOLUTION: u32 = 15;
/// Default frame period, giving ten ticks per second.
pub const DEFAULT_FRAME_MS: u64 = 100;
/// Default lifetime of the motion effect.
pub const DEFAULT_MOTION_MS: u64 = 5000;
/// Default minimum confidence for a trusted hand.
pub const DEFAULT_CONFIDENCE: f32 = 0.7;

/// Width and height of the (virtual) camera capture frame.
pub const CAPTURE_WIDTH: u32 = 640;
pub const CAPTURE_HEIGHT: u32 = 480;

/// Game of Life rendered as organic blobs, perturbed by clicks and a tracked hand.
#[derive(Debug, Clone, Parser)]
#[command(name = "blob_life", version, about)]
pub struct Config {
    /// Surface pixels covered by one grid cell.
    #[arg(
        long,
        value_name = "PIXELS",
        default_value_t = DEFAULT_RESOLUTION,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub resolution: u32,

    /// Milliseconds between simulation ticks.
    #[arg(
        long = "frame-ms",
        value_name = "MILLISECONDS",
        default_value_t = DEFAULT_FRAME_MS,
        value_parser = clap::value_parser!(u64).range(1..=10_000)
    )]
    pub frame_ms: u64,

    /// Milliseconds the motion effect stays active after a perturbation.
    #[arg(
        long = "motion-ms",
        value_name = "MILLISECONDS",
        default_value_t = DEFAULT_MOTION_MS,
        value_parser = clap::value_parser!(u64).range(1..=600_000)
    )]
    pub motion_ms: u64,

    /// Minimum confidence for a hand detection to be trusted.
    #[arg(long, value_name = "SCORE", default_value_t = DEFAULT_CONFIDENCE, value_parser = parse_confidence)]
    pub confidence: f32,

    /// Drive the simulation with the built-in synthetic hand tracker.
    #[arg(long = "demo-hand")]
    pub demo_hand: bool,

    /// Seed for a reproducible simulation.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,
}

impl Config {
    pub fn frame_period(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }

    pub fn motion_duration(&self) -> Duration {
        Duration::from_millis(self.motion_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            frame_ms: DEFAULT_FRAME_MS,
            motion_ms: DEFAULT_MOTION_MS,
            confidence: DEFAULT_CONFIDENCE,
            demo_hand: false,
            seed: None,
        }
    }
}

fn parse_confidence(value: &str) -> Result<f32, String> {
    let score: f32 = value
        .parse()
        .map_err(|err| format!("`{value}` is not a number: {err}"))?;
    if (0.0..=1.0).contains(&score) {
        Ok(score)
    } else {
        Err(format!("confidence must be within 0..=1, got {score}"))
    }
}
