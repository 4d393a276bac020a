//! Timetabling domain models.
//!
//! Provides the read-only problem snapshot (courses, instructors, rooms,
//! groups, time slots), the derived search variables ([`Session`]), and the
//! solution representation ([`Timetable`]).
//!
//! # Domain Mappings
//!
//! | u-timetable | University | Training Center | Clinic |
//! |-------------|------------|-----------------|--------|
//! | Course | Course | Workshop | Therapy Program |
//! | Group | Cohort/Section | Class | Patient Group |
//! | Instructor | Lecturer | Trainer | Therapist |
//! | Room | Lecture Hall/Lab | Studio | Treatment Room |

mod course;
mod group;
mod instructor;
mod problem;
mod room;
mod timeslot;
mod timetable;

pub use course::Course;
pub use group::Group;
pub use instructor::Instructor;
pub use problem::{Problem, Session};
pub use room::{Room, RoomType};
pub use timeslot::TimeSlot;
pub use timetable::{Assignment, Candidate, Timetable};
