//! Timetable (solution) model.
//!
//! A timetable is a complete assignment of sessions to (room, time slot,
//! instructor) triples. Inside the engine values are index triples
//! ([`Candidate`]); the timetable carries resolved IDs so callers never
//! need to index back into the problem.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{Problem, Session, TimeSlot};

/// A (room, slot, instructor) value for one session, as problem indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Candidate {
    /// Index into `Problem::rooms`.
    pub room: usize,
    /// Index into `Problem::timeslots`.
    pub slot: usize,
    /// Index into `Problem::instructors`.
    pub instructor: usize,
}

impl Candidate {
    /// Creates a candidate.
    #[inline]
    pub fn new(room: usize, slot: usize, instructor: usize) -> Self {
        Self {
            room,
            slot,
            instructor,
        }
    }
}

/// A complete timetable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timetable {
    /// One assignment per session, in session order.
    pub assignments: Vec<Assignment>,
}

/// A session placed into a room and slot with an instructor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// The scheduled session.
    pub session: Session,
    /// Course ID (denormalized for query convenience).
    pub course_id: String,
    /// Group ID (denormalized for query convenience).
    pub group_id: String,
    /// Assigned room ID.
    pub room_id: String,
    /// Assigned time slot.
    pub slot: TimeSlot,
    /// Assigned instructor ID.
    pub instructor_id: String,
    /// The underlying index triple.
    pub value: Candidate,
}

impl Assignment {
    /// Resolves a candidate for a session against the problem.
    pub fn resolve(problem: &Problem, session: Session, value: Candidate) -> Self {
        Self {
            session,
            course_id: problem.courses[session.course].id.clone(),
            group_id: problem.groups[session.group].id.clone(),
            room_id: problem.rooms[value.room].id.clone(),
            slot: problem.timeslots[value.slot].clone(),
            instructor_id: problem.instructors[value.instructor].id.clone(),
            value,
        }
    }
}

impl Timetable {
    /// Creates an empty timetable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a timetable from one value per session.
    pub fn from_values(problem: &Problem, sessions: &[Session], values: &[Candidate]) -> Self {
        Self {
            assignments: sessions
                .iter()
                .zip(values)
                .map(|(s, v)| Assignment::resolve(problem, *s, *v))
                .collect(),
        }
    }

    /// Adds an assignment.
    pub fn add_assignment(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    /// Index triples in assignment order.
    pub fn values(&self) -> Vec<Candidate> {
        self.assignments.iter().map(|a| a.value).collect()
    }

    /// Finds the assignment for a session index.
    pub fn assignment_for_session(&self, index: usize) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.session.index == index)
    }

    /// Returns all assignments for a group.
    pub fn assignments_for_group(&self, group_id: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.group_id == group_id)
            .collect()
    }

    /// Returns all assignments for an instructor.
    pub fn assignments_for_instructor(&self, instructor_id: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.instructor_id == instructor_id)
            .collect()
    }

    /// Returns all assignments for a room.
    pub fn assignments_for_room(&self, room_id: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.room_id == room_id)
            .collect()
    }

    /// Number of sessions held per day.
    pub fn sessions_per_day(&self) -> HashMap<u32, usize> {
        let mut per_day = HashMap::new();
        for a in &self.assignments {
            *per_day.entry(a.slot.day).or_insert(0) += 1;
        }
        per_day
    }

    /// Number of assignments.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// Whether the timetable holds no assignments.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}
