use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use sysinfo::{System, SystemExt};

use crate::config::{Config, CAPTURE_HEIGHT, CAPTURE_WIDTH};
use crate::grid;
use crate::simulation::Simulation;
use crate::tracker::{FrameSize, HandGesture, HandReading, NoHand, Point, TrackerBridge};

/// Status of the hand tracker as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerStatus {
    Disabled,
    Loading,
    Searching,
    Tracking,
    Failing,
}

/// Main application state: the simulation plus everything that feeds it.
#[derive(Debug)]
pub struct App {
    config: Config,
    sim: Simulation,
    rng: StdRng,
    /// Drawing surface in pixels
    surface: FrameSize,
    tracker: Option<TrackerBridge>,
    gesture: HandGesture,
    tracker_status: TrackerStatus,
    /// System information for resource monitoring
    sys: System,
}

impl App {
    /// Creates the application for a drawing surface of `width x height`
    /// pixels, starting from a random fill.
    pub fn new(config: Config, width: u32, height: u32) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let (cols, rows) = grid::dimensions_for(width, height, config.resolution);
        let sim = Simulation::random(cols, rows, config.motion_duration(), &mut rng);
        log::info!("Starting with a {cols} x {rows} grid");

        App {
            config,
            sim,
            rng,
            surface: FrameSize::new(width, height),
            tracker: None,
            gesture: HandGesture::new(),
            tracker_status: TrackerStatus::Disabled,
            sys: System::new(),
        }
    }

    /// Attaches a hand tracker bridge; the app shows a loading state until the
    /// tracker reports ready.
    pub fn with_tracker(mut self, bridge: TrackerBridge) -> Self {
        self.tracker = Some(bridge);
        self.tracker_status = TrackerStatus::Loading;
        self
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn tracker_status(&self) -> TrackerStatus {
        self.tracker_status
    }

    /// Surface position of the tracked fingertip this frame.
    pub fn hand_marker(&self) -> Option<Point> {
        self.gesture.marker()
    }

    pub fn system(&self) -> &System {
        &self.sys
    }

    /// Converts a surface point to grid coordinates.
    pub fn cell_at(&self, point: Point) -> (i64, i64) {
        let resolution = self.config.resolution as f32;
        (
            (point.x / resolution).floor() as i64,
            (point.y / resolution).floor() as i64,
        )
    }

    fn perturb(&mut self, point: Point, now: Instant) {
        let (x, y) = self.cell_at(point);
        if !self.sim.inject_at(x, y, now, &mut self.rng) {
            log::debug!("Perturbation at ({x}, {y}) fell outside the grid");
        }
    }

    pub fn on_pointer_down(&mut self, point: Point, now: Instant) {
        log::debug!("Pointer down at {:.0}, {:.0}", point.x, point.y);
        self.perturb(point, now);
    }

    pub fn on_key_press(&mut self) {
        self.sim.reseed(&mut self.rng);
        log::info!("Grid reseeded");
    }

    /// Recomputes the grid dimensions for a new surface size, keeping the
    /// overlapping part of the board.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        self.surface = FrameSize::new(width, height);
        let (cols, rows) = grid::dimensions_for(width, height, self.config.resolution);
        if (cols, rows) != (self.sim.grid().cols(), self.sim.grid().rows()) {
            self.sim.resize(cols, rows);
            log::info!("Resized grid to {cols} x {rows}");
        }
    }

    /// Feeds one tracker reading through the movement gesture.
    pub fn on_tracked_hand(&mut self, reading: HandReading, now: Instant) {
        self.tracker_status = match &reading {
            HandReading::Hand(_) => TrackerStatus::Tracking,
            HandReading::NoHand(NoHand::NotReady) => TrackerStatus::Loading,
            HandReading::NoHand(NoHand::Failed(err)) => {
                log::warn!("Hand tracking failed: {err}");
                TrackerStatus::Failing
            }
            HandReading::NoHand(reason) => {
                log::trace!("No usable hand: {reason:?}");
                TrackerStatus::Searching
            }
        };

        let capture = FrameSize::new(CAPTURE_WIDTH, CAPTURE_HEIGHT);
        if let Some(point) = self.gesture.observe(&reading, self.sim.tick(), capture, self.surface) {
            log::debug!("Hand moved, perturbing at {:.0}, {:.0}", point.x, point.y);
            self.perturb(point, now);
        }
    }

    /// Runs one frame: tick, latest hand reading, then the next generation.
    pub fn update(&mut self, now: Instant) {
        self.sim.begin_frame(now);
        if let Some(bridge) = &self.tracker {
            let reading = bridge.read(self.config.confidence);
            self.on_tracked_hand(reading, now);
        }
        self.sim.advance(&mut self.rng);
        self.sys.refresh_memory();
    }
}
