//! Hand tracking boundary: validating detection parsing, the single-slot bridge
//! between the tracker thread and the frame loop, and the movement gesture that
//! turns fingertip motion into perturbations.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use crate::error::TrackerError;

/// Landmark index of the index-finger tip.
pub const FINGERTIP: usize = 8;
/// Fingertip travel, in surface pixels, needed to fire a perturbation.
pub const MOVE_THRESHOLD_PX: f32 = 30.0;
/// Ticks that must pass after a trigger before the next one.
pub const TRIGGER_COOLDOWN_TICKS: u64 = 15;

/// A position in either capture-frame or surface pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Pixel dimensions of a frame or surface. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Linearly maps `point` from `self` onto `target`.
    pub fn map_to(self, point: Point, target: FrameSize) -> Point {
        Point {
            x: point.x * target.width as f32 / self.width as f32,
            y: point.y * target.height as f32 / self.height as f32,
        }
    }
}

/// One hand as reported by the tracker, before any validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawHand {
    /// `[x, y, z]` landmark points in capture-frame pixels.
    pub landmarks: Vec<[f32; 3]>,
    pub hand_in_view_confidence: Option<f32>,
    pub score: Option<f32>,
}

impl RawHand {
    /// In-view confidence when reported, else the score, else zero.
    pub fn confidence(&self) -> f32 {
        self.hand_in_view_confidence.or(self.score).unwrap_or(0.0)
    }
}

/// A hand that passed validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    /// Fingertip in capture-frame pixels.
    pub fingertip: Point,
    pub confidence: f32,
}

/// Why a tracker update did not yield a usable hand.
#[derive(Debug, Clone, PartialEq)]
pub enum NoHand {
    NotReady,
    Empty,
    TooFewLandmarks(usize),
    BadFingertip,
    LowConfidence(f32),
    Failed(TrackerError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum HandReading {
    Hand(Detection),
    NoHand(NoHand),
}

/// Validates the first reported hand.
///
/// A hand is trusted only with at least `FINGERTIP + 1` landmarks, a finite
/// fingertip and a confidence of at least `threshold`.
pub fn parse_hands(hands: &[RawHand], threshold: f32) -> HandReading {
    let Some(hand) = hands.first() else {
        return HandReading::NoHand(NoHand::Empty);
    };
    if hand.landmarks.len() <= FINGERTIP {
        return HandReading::NoHand(NoHand::TooFewLandmarks(hand.landmarks.len()));
    }
    let [x, y, _] = hand.landmarks[FINGERTIP];
    if !x.is_finite() || !y.is_finite() {
        return HandReading::NoHand(NoHand::BadFingertip);
    }
    let confidence = hand.confidence();
    // NaN fails this comparison too
    if !(confidence >= threshold) {
        return HandReading::NoHand(NoHand::LowConfidence(confidence));
    }
    HandReading::Hand(Detection {
        fingertip: Point::new(x, y),
        confidence,
    })
}

/// What the tracker publishes per inference round.
pub type TrackerUpdate = Result<Vec<RawHand>, TrackerError>;

#[derive(Debug, Default)]
struct Slot {
    latest: Mutex<Option<TrackerUpdate>>,
    ready: AtomicBool,
}

/// Frame-loop side of the tracker bridge. Holds the only strong reference to
/// the slot; once it is dropped, publishers see [`TrackerError::Disconnected`].
#[derive(Debug, Default)]
pub struct TrackerBridge {
    slot: Arc<Slot>,
}

/// Tracker-thread side of the bridge.
#[derive(Debug, Clone)]
pub struct TrackerPublisher {
    slot: Weak<Slot>,
}

impl TrackerBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publisher(&self) -> TrackerPublisher {
        TrackerPublisher {
            slot: Arc::downgrade(&self.slot),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.slot.ready.load(Ordering::Acquire)
    }

    /// The most recent update, if any has arrived. Never blocks on the tracker
    /// beyond the slot lock and never consumes the value.
    pub fn latest(&self) -> Option<TrackerUpdate> {
        self.slot
            .latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Reads the latest update and validates it into a [`HandReading`].
    pub fn read(&self, threshold: f32) -> HandReading {
        if !self.is_ready() {
            return HandReading::NoHand(NoHand::NotReady);
        }
        match self.latest() {
            None => HandReading::NoHand(NoHand::Empty),
            Some(Ok(hands)) => parse_hands(&hands, threshold),
            Some(Err(err)) => HandReading::NoHand(NoHand::Failed(err)),
        }
    }
}

impl TrackerPublisher {
    /// Flags the tracker as ready. Returns `true` only for the first call.
    pub fn mark_ready(&self) -> Result<bool, TrackerError> {
        let slot = self.slot.upgrade().ok_or(TrackerError::Disconnected)?;
        Ok(!slot.ready.swap(true, Ordering::AcqRel))
    }

    /// Overwrites the slot with `update`.
    pub fn publish(&self, update: TrackerUpdate) -> Result<(), TrackerError> {
        let slot = self.slot.upgrade().ok_or(TrackerError::Disconnected)?;
        *slot.latest.lock().unwrap_or_else(PoisonError::into_inner) = Some(update);
        Ok(())
    }
}

/// Turns successive hand readings into perturbation points.
#[derive(Debug, Default, Clone)]
pub struct HandGesture {
    last_position: Point,
    cooldown_until: u64,
    detected: bool,
}

impl HandGesture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one frame's reading. `capture` is the frame the landmarks live in
    /// and `surface` the viewport they are mapped onto.
    ///
    /// Returns the surface point to perturb when the fingertip has moved more
    /// than [`MOVE_THRESHOLD_PX`] and the cooldown has passed. Every valid
    /// detection updates the remembered position, triggered or not.
    pub fn observe(
        &mut self,
        reading: &HandReading,
        tick: u64,
        capture: FrameSize,
        surface: FrameSize,
    ) -> Option<Point> {
        let HandReading::Hand(detection) = reading else {
            self.detected = false;
            return None;
        };
        self.detected = true;

        let position = capture.map_to(detection.fingertip, surface);
        let moved = position.distance(self.last_position);
        self.last_position = position;

        if moved > MOVE_THRESHOLD_PX && tick >= self.cooldown_until {
            self.cooldown_until = tick + TRIGGER_COOLDOWN_TICKS;
            Some(position)
        } else {
            None
        }
    }

    /// Surface position of the hand seen this frame, if one was.
    pub fn marker(&self) -> Option<Point> {
        self.detected.then_some(self.last_position)
    }
}
