//! Problem instance and derived sessions.
//!
//! A [`Problem`] is the complete, read-only snapshot handed over by the data
//! layer. [`Session`]s are the search variables derived from it: one per
//! (course, attending group, weekly occurrence).

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

use super::{Course, Group, Instructor, Room, TimeSlot};

/// A complete timetabling instance.
///
/// Record order is significant: it fixes session order and candidate
/// order, which in turn fix the search's tie-breaking.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Problem {
    /// Courses to timetable.
    pub courses: Vec<Course>,
    /// Available instructors.
    pub instructors: Vec<Instructor>,
    /// Available rooms.
    pub rooms: Vec<Room>,
    /// Student groups.
    pub groups: Vec<Group>,
    /// The weekly slot grid.
    pub timeslots: Vec<TimeSlot>,
}

/// One scheduling variable: a single weekly meeting of a course for a group.
///
/// Indices refer into the owning [`Problem`]'s record vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Session {
    /// Position in the derived session list.
    pub index: usize,
    /// Index into `Problem::courses`.
    pub course: usize,
    /// Index into `Problem::groups`.
    pub group: usize,
    /// Weekly occurrence number (0-indexed).
    pub occurrence: u32,
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "session #{} (course {}, group {}, occurrence {})",
            self.index, self.course, self.group, self.occurrence
        )
    }
}

impl Problem {
    /// Creates an empty problem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a course.
    pub fn with_course(mut self, course: Course) -> Self {
        self.courses.push(course);
        self
    }

    /// Adds an instructor.
    pub fn with_instructor(mut self, instructor: Instructor) -> Self {
        self.instructors.push(instructor);
        self
    }

    /// Adds a room.
    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }

    /// Adds a group.
    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }

    /// Adds a time slot.
    pub fn with_timeslot(mut self, slot: TimeSlot) -> Self {
        self.timeslots.push(slot);
        self
    }

    /// Replaces the slot grid.
    pub fn with_timeslots(mut self, slots: Vec<TimeSlot>) -> Self {
        self.timeslots = slots;
        self
    }

    /// Distinct study years of the groups, ascending.
    pub fn years(&self) -> Vec<u32> {
        let mut years: Vec<u32> = self.groups.iter().map(|g| g.year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    /// The sub-problem of one study year.
    ///
    /// Keeps the groups of `year` and the courses enrolling any of them, with
    /// enrollments narrowed to those groups. Instructors, rooms and slots are
    /// shared by every year and kept whole.
    pub fn for_year(&self, year: u32) -> Problem {
        let groups: Vec<Group> = self
            .groups
            .iter()
            .filter(|g| g.year == year)
            .cloned()
            .collect();
        let ids: HashSet<&str> = groups.iter().map(|g| g.id.as_str()).collect();
        let courses = self
            .courses
            .iter()
            .filter_map(|c| {
                let enrolled: Vec<String> = c
                    .groups
                    .iter()
                    .filter(|g| ids.contains(g.as_str()))
                    .cloned()
                    .collect();
                (!enrolled.is_empty()).then(|| Course {
                    groups: enrolled,
                    ..c.clone()
                })
            })
            .collect();

        Problem {
            courses,
            instructors: self.instructors.clone(),
            rooms: self.rooms.clone(),
            groups,
            timeslots: self.timeslots.clone(),
        }
    }

    /// Derives the session list.
    ///
    /// Sessions are produced in course order, then enrolled-group order,
    /// then occurrence order. Group references that do not resolve are
    /// skipped; [`crate::validation::validate_problem`] reports them.
    pub fn sessions(&self) -> Vec<Session> {
        let group_lookup: HashMap<&str, usize> = self
            .groups
            .iter()
            .enumerate()
            .map(|(i, g)| (g.id.as_str(), i))
            .collect();

        let mut sessions = Vec::new();
        for (course_idx, course) in self.courses.iter().enumerate() {
            for group_id in &course.groups {
                let Some(&group_idx) = group_lookup.get(group_id.as_str()) else {
                    continue;
                };
                for occurrence in 0..course.sessions_per_week {
                    sessions.push(Session {
                        index: sessions.len(),
                        course: course_idx,
                        group: group_idx,
                        occurrence,
                    });
                }
            }
        }
        sessions
    }

    /// Human-readable label for a session, e.g. `CS101/G1#0`.
    pub fn session_label(&self, session: &Session) -> String {
        format!(
            "{}/{}#{}",
            self.courses[session.course].id, self.groups[session.group].id, session.occurrence
        )
    }
}
