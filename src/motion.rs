use std::time::{Duration, Instant};

/// Timed flag raised by every point perturbation.
///
/// While active, the renderer switches palette and the simulation keeps
/// dropping random live cells onto the board.
#[derive(Debug, Clone)]
pub struct MotionEffect {
    active: bool,
    expires_at: Option<Instant>,
    duration: Duration,
}

impl MotionEffect {
    pub fn new(duration: Duration) -> Self {
        Self {
            active: false,
            expires_at: None,
            duration,
        }
    }

    /// Activates the effect until `now + duration`, extending any running window.
    pub fn trigger(&mut self, now: Instant) {
        self.active = true;
        self.expires_at = Some(now + self.duration);
    }

    /// Clears the flag once the window has elapsed. Called once per tick.
    pub fn refresh(&mut self, now: Instant) {
        if self.active && self.expires_at.map_or(true, |at| now >= at) {
            self.active = false;
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Time left in the current window, zero when inactive.
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.expires_at {
            Some(at) if self.active => at.saturating_duration_since(now),
            _ => Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motion_starts_inactive() {
        let motion = MotionEffect::new(Duration::from_millis(5000));
        assert!(!motion.is_active());
        assert_eq!(motion.remaining(Instant::now()), Duration::ZERO);
    }

    #[test]
    fn test_motion_expires_after_duration() {
        let start = Instant::now();
        let mut motion = MotionEffect::new(Duration::from_millis(5000));
        motion.trigger(start);
        assert!(motion.is_active());

        motion.refresh(start + Duration::from_millis(4999));
        assert!(motion.is_active());
        assert_eq!(motion.remaining(start + Duration::from_millis(4000)), Duration::from_millis(1000));

        motion.refresh(start + Duration::from_millis(5001));
        assert!(!motion.is_active());
        assert_eq!(motion.remaining(start + Duration::from_millis(5001)), Duration::ZERO);
    }

    #[test]
    fn test_motion_retrigger_extends_window() {
        let start = Instant::now();
        let mut motion = MotionEffect::new(Duration::from_millis(100));
        motion.trigger(start);
        motion.trigger(start + Duration::from_millis(80));
        motion.refresh(start + Duration::from_millis(150));
        assert!(motion.is_active());
        motion.refresh(start + Duration::from_millis(181));
        assert!(!motion.is_active());
    }
}
