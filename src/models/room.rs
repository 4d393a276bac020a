//! Room model.
//!
//! Rooms are the physical spaces sessions take place in. A room hosts at
//! most one session per time slot, and only sessions whose course asks
//! for its type and whose group fits in its seats.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A teaching room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: String,
    /// Number of seats.
    pub capacity: u32,
    /// Room classification.
    pub room_type: RoomType,
}

/// Room type classification.
///
/// A course names the type it needs; only rooms of exactly that type are
/// candidates for its sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    /// Standard lecture hall or classroom.
    Lecture,
    /// Laboratory (computer lab, science lab).
    Lab,
    /// Domain-specific type (e.g., "studio", "gym").
    Custom(String),
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomType::Lecture => write!(f, "lecture"),
            RoomType::Lab => write!(f, "lab"),
            RoomType::Custom(name) => write!(f, "{name}"),
        }
    }
}

impl Room {
    /// Creates a room of the given type.
    pub fn new(id: impl Into<String>, room_type: RoomType, capacity: u32) -> Self {
        Self {
            id: id.into(),
            capacity,
            room_type,
        }
    }

    /// Creates a lecture room.
    pub fn lecture(id: impl Into<String>, capacity: u32) -> Self {
        Self::new(id, RoomType::Lecture, capacity)
    }

    /// Creates a lab room.
    pub fn lab(id: impl Into<String>, capacity: u32) -> Self {
        Self::new(id, RoomType::Lab, capacity)
    }

    /// Whether a group of `headcount` students fits in this room.
    #[inline]
    pub fn fits(&self, headcount: u32) -> bool {
        self.capacity >= headcount
    }

    /// Whether this room can host sessions of the given type.
    #[inline]
    pub fn serves(&self, room_type: &RoomType) -> bool {
        &self.room_type == room_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_constructors() {
        let r = Room::lecture("A101", 60);
        assert_eq!(r.room_type, RoomType::Lecture);
        assert_eq!(r.capacity, 60);

        let l = Room::lab("L1", 24);
        assert_eq!(l.room_type, RoomType::Lab);
    }

    #[test]
    fn test_room_fits() {
        let r = Room::lecture("A101", 30);
        assert!(r.fits(30));
        assert!(r.fits(1));
        assert!(!r.fits(31));
    }

    #[test]
    fn test_room_serves() {
        let r = Room::new("S1", RoomType::Custom("studio".into()), 20);
        assert!(r.serves(&RoomType::Custom("studio".into())));
        assert!(!r.serves(&RoomType::Lab));
        assert!(!Room::lab("L1", 20).serves(&RoomType::Lecture));
    }

    #[test]
    fn test_room_type_display() {
        assert_eq!(RoomType::Lecture.to_string(), "lecture");
        assert_eq!(RoomType::Lab.to_string(), "lab");
        assert_eq!(RoomType::Custom("gym".into()).to_string(), "gym");
    }
}
