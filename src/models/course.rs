//! Course model.
//!
//! A course is a unit of teaching that meets a fixed number of times per
//! week. Each attending group receives its own sessions, and every session
//! of the course is taught by the same instructor.

use serde::{Deserialize, Serialize};

use super::RoomType;

/// A course to be timetabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Unique course identifier (e.g., "CS101").
    pub id: String,
    /// Human-readable title.
    pub name: String,
    /// Number of sessions per week, per attending group.
    pub sessions_per_week: u32,
    /// Specialization tag an instructor must hold to teach this course.
    pub specialization: String,
    /// Room type every session of this course requires.
    pub room_type: RoomType,
    /// IDs of the groups attending this course.
    pub groups: Vec<String>,
}

impl Course {
    /// Creates a lecture course meeting once a week with no groups.
    pub fn new(id: impl Into<String>, specialization: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            sessions_per_week: 1,
            specialization: specialization.into(),
            room_type: RoomType::Lecture,
            groups: Vec::new(),
        }
    }

    /// Sets the course title.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the weekly session count.
    pub fn with_sessions_per_week(mut self, count: u32) -> Self {
        self.sessions_per_week = count;
        self
    }

    /// Sets the required room type.
    pub fn with_room_type(mut self, room_type: RoomType) -> Self {
        self.room_type = room_type;
        self
    }

    /// Enrolls a group.
    pub fn with_group(mut self, group_id: impl Into<String>) -> Self {
        self.groups.push(group_id.into());
        self
    }

    /// Total number of sessions this course contributes to the timetable.
    pub fn session_count(&self) -> usize {
        self.groups.len() * self.sessions_per_week as usize
    }
}
