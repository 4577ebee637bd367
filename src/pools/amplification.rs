//! Time-linear amplification ramp.
//!
//! The amplification coefficient `A` (scaled by
//! [`A_PRECISION`](crate::math::A_PRECISION)) moves linearly from
//! `initial_a` at `initial_a_time` to `future_a` at `future_a_time` and
//! stays at `future_a` afterwards.  A ramp has to span more than
//! [`MIN_RAMP_TIME`].
//!
//! ```text
//!   A
//!   │        ┌──────── future_a
//!   │       ╱
//!   │      ╱
//!   │─────┘            initial_a
//!   └─────┬──────┬──── t
//!    initial_t  future_t
//! ```

use crate::error::AmmError;
use crate::math::{validate_amplification, A_PRECISION, MAX_A};

/// Minimum ramp duration in seconds (one day).
pub const MIN_RAMP_TIME: u64 = 86_400;

/// Whether the amplification is currently moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RampState {
    /// `now >= future_a_time`: `A` reads as `future_a`.
    Stable,
    /// `now < future_a_time`: `A` is interpolated.
    Ramping,
}

/// Read-only snapshot of the ramp at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RampStatus {
    /// Stable or ramping at the queried time.
    pub state: RampState,
    /// Amplification in effect at the queried time.
    pub current_a: u128,
    /// Amplification at the start of the ramp.
    pub initial_a: u128,
    /// Amplification at the end of the ramp.
    pub future_a: u128,
    /// Ramp start timestamp (seconds).
    pub initial_a_time: u64,
    /// Ramp end timestamp (seconds).
    pub future_a_time: u64,
}

/// Linear schedule of the amplification coefficient.
///
/// # Examples
///
/// ```
/// use stableswap_engine::pools::{AmplificationRamp, RampState, MIN_RAMP_TIME};
///
/// let mut ramp = AmplificationRamp::new(10_000, 0).expect("valid A");
/// ramp.start_ramp(20_000, 2 * MIN_RAMP_TIME, 0).expect("ramp accepted");
///
/// assert_eq!(ramp.state(MIN_RAMP_TIME), RampState::Ramping);
/// assert_eq!(ramp.current_a(MIN_RAMP_TIME), 15_000);
/// assert_eq!(ramp.current_a(2 * MIN_RAMP_TIME), 20_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmplificationRamp {
    initial_a: u128,
    future_a: u128,
    initial_a_time: u64,
    future_a_time: u64,
}

impl AmplificationRamp {
    /// Creates a stable schedule holding `amplification` from `now` on.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidAmplification`] if `amplification` is
    /// outside `(0, MAX_A]`.
    pub const fn new(amplification: u128, now: u64) -> Result<Self, AmmError> {
        if let Err(e) = validate_amplification(amplification) {
            return Err(e);
        }
        Ok(Self {
            initial_a: amplification,
            future_a: amplification,
            initial_a_time: now,
            future_a_time: now,
        })
    }

    /// Amplification in effect at `now`.
    #[must_use]
    pub const fn current_a(&self, now: u64) -> u128 {
        if now >= self.future_a_time {
            return self.future_a;
        }
        // future_a_time > now >= initial_a_time whenever a ramp is active,
        // so the window is positive.
        let window = (self.future_a_time - self.initial_a_time) as u128;
        if window == 0 {
            return self.future_a;
        }
        let elapsed = now.saturating_sub(self.initial_a_time) as u128;
        if self.future_a > self.initial_a {
            self.initial_a + (self.future_a - self.initial_a) * elapsed / window
        } else {
            self.initial_a - (self.initial_a - self.future_a) * elapsed / window
        }
    }

    /// Ramp state at `now`.
    #[must_use]
    pub const fn state(&self, now: u64) -> RampState {
        if now >= self.future_a_time {
            RampState::Stable
        } else {
            RampState::Ramping
        }
    }

    /// Schedules a linear move to `future_a`, reached at `future_time`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAmplification`] if `future_a` is outside
    ///   `[A_PRECISION, MAX_A]`.
    /// - [`AmmError::RampAlreadyStarted`] while a ramp is in progress.
    /// - [`AmmError::RampTooShort`] if `future_time <= now + MIN_RAMP_TIME`.
    pub fn start_ramp(&mut self, future_a: u128, future_time: u64, now: u64) -> Result<(), AmmError> {
        if !(A_PRECISION..=MAX_A).contains(&future_a) {
            return Err(AmmError::InvalidAmplification(
                "ramp target must be within [A_PRECISION, MAX_A]",
            ));
        }
        if self.state(now) == RampState::Ramping {
            return Err(AmmError::RampAlreadyStarted);
        }
        if future_time <= now.saturating_add(MIN_RAMP_TIME) {
            return Err(AmmError::RampTooShort);
        }

        self.initial_a = self.current_a(now);
        self.future_a = future_a;
        self.initial_a_time = now;
        self.future_a_time = future_time;
        Ok(())
    }

    /// Freezes the amplification at its value at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::RampAlreadyStarted`] if no ramp is in progress.
    pub fn stop_ramp(&mut self, now: u64) -> Result<u128, AmmError> {
        if self.state(now) == RampState::Stable {
            return Err(AmmError::RampAlreadyStarted);
        }
        let current = self.current_a(now);
        self.initial_a = current;
        self.future_a = current;
        self.initial_a_time = now;
        self.future_a_time = now;
        Ok(current)
    }

    /// Snapshot of the schedule as seen at `now`.
    #[must_use]
    pub const fn status(&self, now: u64) -> RampStatus {
        RampStatus {
            state: self.state(now),
            current_a: self.current_a(now),
            initial_a: self.initial_a,
            future_a: self.future_a,
            initial_a_time: self.initial_a_time,
            future_a_time: self.future_a_time,
        }
    }
}
