//! Instructor model.
//!
//! Instructors teach the sessions of courses whose specialization they
//! hold. Availability is expressed negatively: an instructor is available
//! in every slot except blocked slots and slots on blocked days.

use serde::{Deserialize, Serialize};

use super::TimeSlot;

/// An instructor who can be assigned to sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instructor {
    /// Unique instructor identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Specialization tags this instructor is qualified to teach.
    pub specializations: Vec<String>,
    /// Individual slots the instructor cannot teach in.
    pub unavailable_slots: Vec<TimeSlot>,
    /// Whole days the instructor cannot teach on.
    pub unavailable_days: Vec<u32>,
}

impl Instructor {
    /// Creates an instructor with no qualifications.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            specializations: Vec::new(),
            unavailable_slots: Vec::new(),
            unavailable_days: Vec::new(),
        }
    }

    /// Sets the instructor name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a specialization tag.
    pub fn with_specialization(mut self, tag: impl Into<String>) -> Self {
        self.specializations.push(tag.into());
        self
    }

    /// Blocks a single slot.
    pub fn with_unavailable_slot(mut self, slot: TimeSlot) -> Self {
        self.unavailable_slots.push(slot);
        self
    }

    /// Blocks every slot on a day.
    pub fn with_unavailable_day(mut self, day: u32) -> Self {
        self.unavailable_days.push(day);
        self
    }

    /// Whether this instructor holds the given specialization.
    pub fn is_qualified_for(&self, specialization: &str) -> bool {
        self.specializations.iter().any(|s| s == specialization)
    }

    /// Whether this instructor can teach in the given slot.
    pub fn is_available(&self, slot: &TimeSlot) -> bool {
        !self.unavailable_days.contains(&slot.day) && !self.unavailable_slots.contains(slot)
    }
}
