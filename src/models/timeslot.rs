//! Time slot model.
//!
//! The week is a fixed grid of (day, period) cells. Days and periods are
//! 0-indexed; period 0 is the earliest period of its day. Clock labels are
//! carried for export only and never influence the search.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A cell of the weekly timetable grid.
///
/// Identity, ordering and hashing use `(day, period)` only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Day of the week (0-indexed).
    pub day: u32,
    /// Period within the day (0 = earliest).
    pub period: u32,
    /// Optional start label (e.g., "09:00").
    pub start_label: Option<String>,
    /// Optional end label (e.g., "10:30").
    pub end_label: Option<String>,
}

impl TimeSlot {
    /// Creates a slot without clock labels.
    pub fn new(day: u32, period: u32) -> Self {
        Self {
            day,
            period,
            start_label: None,
            end_label: None,
        }
    }

    /// Sets the clock labels.
    pub fn with_labels(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_label = Some(start.into());
        self.end_label = Some(end.into());
        self
    }

    /// Whether this slot falls before the given period threshold.
    #[inline]
    pub fn is_before_period(&self, threshold: u32) -> bool {
        self.period < threshold
    }

    /// Builds a `days × periods` grid in day-major order.
    pub fn grid(days: u32, periods: u32) -> Vec<TimeSlot> {
        (0..days)
            .flat_map(|d| (0..periods).map(move |p| TimeSlot::new(d, p)))
            .collect()
    }

    #[inline]
    fn key(&self) -> (u32, u32) {
        (self.day, self.period)
    }
}

impl PartialEq for TimeSlot {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for TimeSlot {}

impl std::hash::Hash for TimeSlot {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for TimeSlot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeSlot {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day {} period {}", self.day, self.period)
    }
}
