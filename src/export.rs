//! Structural export of a solved timetable.
//!
//! One flat row per session with resolved IDs, plus the total soft cost.
//! Rows are sorted by group, day, period, then course, which is the order a
//! per-group weekly view reads them in. Presentation is left to the caller.

use serde::{Deserialize, Serialize};

use crate::models::Timetable;
use crate::search::SolveOutcome;

/// A solved timetable in export form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableExport {
    /// One row per session.
    pub entries: Vec<ExportEntry>,
    /// Total weighted soft cost.
    pub soft_cost: u64,
}

/// One exported session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportEntry {
    /// Course ID.
    pub course_id: String,
    /// Group ID.
    pub group_id: String,
    /// Weekly occurrence number.
    pub occurrence: u32,
    /// Room ID.
    pub room_id: String,
    /// Day index.
    pub day: u32,
    /// Period index within the day.
    pub period: u32,
    /// Slot start label, if the grid has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_label: Option<String>,
    /// Slot end label, if the grid has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_label: Option<String>,
    /// Instructor ID.
    pub instructor_id: String,
}

impl TimetableExport {
    /// Flattens a timetable.
    pub fn from_timetable(timetable: &Timetable, soft_cost: u64) -> Self {
        let mut entries: Vec<ExportEntry> = timetable
            .assignments
            .iter()
            .map(|a| ExportEntry {
                course_id: a.course_id.clone(),
                group_id: a.group_id.clone(),
                occurrence: a.session.occurrence,
                room_id: a.room_id.clone(),
                day: a.slot.day,
                period: a.slot.period,
                start_label: a.slot.start_label.clone(),
                end_label: a.slot.end_label.clone(),
                instructor_id: a.instructor_id.clone(),
            })
            .collect();
        entries.sort_by(|x, y| {
            (&x.group_id, x.day, x.period, &x.course_id, x.occurrence).cmp(&(
                &y.group_id,
                y.day,
                y.period,
                &y.course_id,
                y.occurrence,
            ))
        });
        Self { entries, soft_cost }
    }

    /// Exports a solved outcome; `None` for any other outcome.
    pub fn from_outcome(outcome: &SolveOutcome) -> Option<Self> {
        match outcome {
            SolveOutcome::Solved {
                timetable,
                soft_cost,
            } => Some(Self::from_timetable(timetable, *soft_cost)),
            _ => None,
        }
    }

    /// Rows of one group, in weekly order.
    pub fn for_group<'a>(&'a self, group_id: &'a str) -> impl Iterator<Item = &'a ExportEntry> + 'a {
        self.entries.iter().filter(move |e| e.group_id == group_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Candidate, Course, Group, Instructor, Problem, Room, TimeSlot};

    fn sample() -> Timetable {
        let problem = Problem::new()
            .with_group(Group::new("G2", 1, 20))
            .with_group(Group::new("G1", 1, 20))
            .with_course(Course::new("C1", "x").with_group("G2").with_group("G1"))
            .with_instructor(Instructor::new("I1").with_specialization("x"))
            .with_room(Room::lecture("R1", 30))
            .with_timeslot(TimeSlot::new(0, 1).with_labels("09:00", "10:00"))
            .with_timeslot(TimeSlot::new(0, 0).with_labels("08:00", "09:00"));
        let sessions = problem.sessions();
        let values = vec![Candidate::new(0, 0, 0), Candidate::new(0, 1, 0)];
        Timetable::from_values(&problem, &sessions, &values)
    }

    #[test]
    fn test_rows_sorted_by_group_then_time() {
        let export = TimetableExport::from_timetable(&sample(), 3);
        let keys: Vec<(&str, u32)> = export
            .entries
            .iter()
            .map(|e| (e.group_id.as_str(), e.period))
            .collect();
        assert_eq!(keys, vec![("G1", 0), ("G2", 1)]);
        assert_eq!(export.entries[0].start_label.as_deref(), Some("08:00"));
        assert_eq!(export.soft_cost, 3);
        assert_eq!(export.for_group("G2").count(), 1);
    }

    #[test]
    fn test_json_shape() {
        let export = TimetableExport::from_timetable(&sample(), 0);
        let json = serde_json::to_value(&export).unwrap();
        assert_eq!(json["soft_cost"], 0);
        assert_eq!(json["entries"][0]["room_id"], "R1");
        assert_eq!(json["entries"][0]["end_label"], "09:00");

        let back: TimetableExport = serde_json::from_value(json).unwrap();
        assert_eq!(back, export);
    }

    #[test]
    fn test_only_solved_outcomes_export() {
        assert!(TimetableExport::from_outcome(&SolveOutcome::Infeasible).is_none());
        let solved = SolveOutcome::Solved {
            timetable: sample(),
            soft_cost: 1,
        };
        let export = TimetableExport::from_outcome(&solved).unwrap();
        assert_eq!(export.entries.len(), 2);
    }
}
