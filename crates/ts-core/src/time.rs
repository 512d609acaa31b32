//! Simulation time model.
//!
//! # Design
//!
//! Time is a continuous count of simulated seconds since midnight of day 0.
//! The external animation clock supplies wall-clock deltas in milliseconds;
//! the clock converts them with a speed multiplier:
//!
//!   elapsed_secs = elapsed_ms / 1000 * multiplier
//!
//! Every timer in the engine (spawn countdowns, dwell, departure interval)
//! is measured against `SimClock::seconds`, never against wall time, so the
//! simulation speed is decoupled from the frame rate.

use std::fmt;

/// Seconds in one simulated day.
pub const SECS_PER_DAY: f64 = 86_400.0;

/// Default start of a new game: 12:00 on day 0.
pub const DEFAULT_START_SECS: f64 = 12.0 * 3_600.0;

/// The simulated clock.
///
/// `SimClock` is cheap to copy and holds no heap data.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Simulated seconds since day 0, 00:00.
    pub seconds: f64,
    /// Simulated seconds per wall-clock second.
    pub multiplier: f64,
}

impl SimClock {
    pub fn new(start_secs: f64, multiplier: f64) -> Self {
        Self { seconds: start_secs, multiplier }
    }

    /// Convert a wall-clock delta to simulated seconds without advancing.
    #[inline]
    pub fn scaled_secs(&self, elapsed_ms: f64) -> f64 {
        elapsed_ms.max(0.0) / 1_000.0 * self.multiplier
    }

    /// Advance by a wall-clock delta in milliseconds and return the number
    /// of simulated seconds that elapsed.  Negative deltas are treated as 0.
    #[inline]
    pub fn advance(&mut self, elapsed_ms: f64) -> f64 {
        let secs = self.scaled_secs(elapsed_ms);
        self.seconds += secs;
        secs
    }

    /// Break the clock into (day, hour, minute) for human-readable logging.
    pub fn day_hm(&self) -> (u64, u32, u32) {
        let total = self.seconds.max(0.0) as u64;
        let days = total / 86_400;
        let hours = ((total % 86_400) / 3_600) as u32;
        let minutes = ((total % 3_600) / 60) as u32;
        (days, hours, minutes)
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(DEFAULT_START_SECS, 1.0)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (d, h, m) = self.day_hm();
        write!(f, "day {} {:02}:{:02} (x{})", d, h, m, self.multiplier)
    }
}
