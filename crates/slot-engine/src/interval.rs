//! Half-open minute-of-day intervals and the overlap primitive.
//!
//! Every span a new booking must not collide with — an existing appointment,
//! the lunch break, a barber-declared blocked range — is normalized into a
//! [`MinuteInterval`] before testing. One overlap algorithm, many interval
//! sources.

use serde::{Deserialize, Serialize};

use crate::clock::WallClock;

/// A `[start, end)` span in minutes since midnight.
///
/// Half-open on purpose: an appointment that starts exactly when the
/// previous one ends is a legal back-to-back booking, not a collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinuteInterval {
    pub start: u32,
    pub end: u32,
}

impl MinuteInterval {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Interval spanning two wall-clock times.
    pub fn between(start: WallClock, end: WallClock) -> Self {
        Self {
            start: start.minute_of_day(),
            end: end.minute_of_day(),
        }
    }

    /// Open-interval overlap test: `a.start < b.end && b.start < a.end`.
    ///
    /// Adjacent intervals (one ends exactly when the other starts) do NOT
    /// overlap.
    pub fn overlaps(&self, other: &MinuteInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether a minute falls inside the half-open span.
    pub fn contains_minute(&self, minute: u32) -> bool {
        self.start <= minute && minute < self.end
    }

    pub fn duration_minutes(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }
}

/// A `{start, end}` pair of wall-clock times, as stored in schedule and
/// blocked-time documents (lunch breaks, blocked ranges).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockRange {
    pub start: WallClock,
    pub end: WallClock,
}

impl ClockRange {
    pub fn new(start: WallClock, end: WallClock) -> Self {
        Self { start, end }
    }

    pub fn to_interval(self) -> MinuteInterval {
        MinuteInterval::between(self.start, self.end)
    }
}
