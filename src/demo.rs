//! Synthetic hand tracker used when no real pose model is wired in.
//!
//! After a warm-up delay it signals readiness once, then publishes a fingertip
//! sweeping a Lissajous path across the capture frame. Some rounds are
//! deliberately bad: hand out of view, low confidence, truncated landmarks or
//! an outright inference failure.

use std::thread;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::TrackerError;
use crate::tracker::{FrameSize, RawHand, TrackerPublisher, TrackerUpdate};

const LANDMARKS: usize = 21;

#[derive(Debug, Clone)]
pub struct DemoTracker {
    pub capture: FrameSize,
    pub warmup: Duration,
    pub period: Duration,
    pub seed: u64,
}

impl DemoTracker {
    /// Runs the tracker on its own thread until the bridge goes away.
    pub fn spawn(self, publisher: TrackerPublisher) -> thread::JoinHandle<()> {
        thread::spawn(move || {
            if let Err(err) = self.run(&publisher) {
                log::debug!("demo hand tracker stopped: {err}");
            }
        })
    }

    fn run(&self, publisher: &TrackerPublisher) -> Result<(), TrackerError> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        thread::sleep(self.warmup);
        if publisher.mark_ready()? {
            log::info!("Hand tracker ready");
        }

        let mut round = 0u64;
        loop {
            publisher.publish(self.sample(round, &mut rng))?;
            round += 1;
            thread::sleep(self.period);
        }
    }

    /// Produces the update for one inference round.
    pub fn sample<R: Rng + ?Sized>(&self, round: u64, rng: &mut R) -> TrackerUpdate {
        match rng.gen_range(0..100) {
            0..=1 => return Err(TrackerError::Inference("synthetic dropout".into())),
            2..=9 => return Ok(Vec::new()),
            _ => {}
        }

        let t = round as f32 * 0.05;
        let w = self.capture.width as f32;
        let h = self.capture.height as f32;
        let tip = [
            w * (0.5 + 0.4 * (t * 1.3).sin()),
            h * (0.5 + 0.4 * (t * 0.9).cos()),
            0.0,
        ];

        let mut landmarks = vec![tip; LANDMARKS];
        if rng.gen_bool(0.05) {
            landmarks.truncate(rng.gen_range(0..=8));
        }
        let confidence = rng.gen_range(0.5..1.0);
        Ok(vec![RawHand {
            landmarks,
            hand_in_view_confidence: rng.gen_bool(0.8).then_some(confidence),
            score: Some(confidence),
        }])
    }
}
