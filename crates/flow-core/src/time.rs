//! Logical time model.
//!
//! # Design
//!
//! Time is a `Tick` counter that only the engine advances.  It has no mapping
//! to wall-clock time: one tick is whatever unit the configuration's durations
//! are expressed in.
//!
//! Integer ticks keep all schedule arithmetic exact (no floating-point drift),
//! so two runs of the same configuration compare bit-for-bit.
//!
//! `Tick` and `Delay` are signed.  A negative delay is never valid, but it has
//! to be representable so the engine can reject it instead of wrapping.

use std::fmt;

// ── Delay ─────────────────────────────────────────────────────────────────────

/// A relative span of logical time, in ticks.
pub type Delay = i64;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute logical time.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub i64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `delay` steps after `self`, or `None` if `delay` is
    /// negative or the sum overflows.
    #[inline]
    pub fn checked_offset(self, delay: Delay) -> Option<Tick> {
        if delay < 0 {
            return None;
        }
        self.0.checked_add(delay).map(Tick)
    }

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if the subtraction overflows.
    #[inline]
    pub fn since(self, earlier: Tick) -> Delay {
        self.0 - earlier.0
    }
}

impl std::ops::Add<Delay> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: Delay) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = Delay;
    #[inline]
    fn sub(self, rhs: Tick) -> Delay {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The single logical clock of one simulation run.
///
/// Owned by the engine; nothing else advances it.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    current_tick: Tick,
}

impl SimClock {
    /// A clock at `Tick::ZERO`.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn now(&self) -> Tick {
        self.current_tick
    }

    /// Move the clock forward to `tick`.
    ///
    /// Returns the previous tick.  A `tick` earlier than the current one is
    /// ignored, so the clock never moves backward.
    #[inline]
    pub fn advance_to(&mut self, tick: Tick) -> Tick {
        let previous = self.current_tick;
        debug_assert!(tick >= previous, "clock moved backward: {previous} -> {tick}");
        self.current_tick = self.current_tick.max(tick);
        previous
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.current_tick)
    }
}
