// Rust guideline compliant 2026-10-19

//! Half-open time intervals used by slot computation and conflict checks.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A half-open interval `[start, end)` in shop-local wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Interval {
    /// Inclusive start.
    pub start: NaiveDateTime,
    /// Exclusive end.
    pub end: NaiveDateTime,
}

impl Interval {
    /// Creates an interval, returning `None` when `start >= end`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Option<Self> {
        if start < end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// Creates the interval `[start, start + minutes)`.
    ///
    /// Returns `None` for a zero duration.
    pub fn from_duration(start: NaiveDateTime, minutes: u32) -> Option<Self> {
        Self::new(start, start + Duration::minutes(i64::from(minutes)))
    }

    /// Length of the interval in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Strict overlap test: `a.start < b.end && b.start < a.end`.
    ///
    /// Intervals that merely touch (one ends where the other begins) do not
    /// overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Returns true if `other` lies entirely inside this interval.
    pub fn contains(&self, other: &Interval) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Removes `other` from this interval.
    ///
    /// Yields zero, one, or two non-empty pieces in ascending order.
    pub fn subtract(&self, other: &Interval) -> Vec<Interval> {
        if !self.overlaps(other) {
            return vec![*self];
        }

        let mut pieces = Vec::with_capacity(2);
        if let Some(left) = Interval::new(self.start, other.start) {
            pieces.push(left);
        }
        if let Some(right) = Interval::new(other.end, self.end) {
            pieces.push(right);
        }
        pieces
    }
}
