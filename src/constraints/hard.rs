//! Hard constraints.
//!
//! Every hard rule in this engine is binary: it relates exactly two placed
//! sessions. That keeps the incremental predicate and forward checking the
//! same operation, a pairwise test against one other placement.

use serde::{Deserialize, Serialize};

use crate::models::{Candidate, Session};

/// A feasibility rule between two placed sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HardConstraint {
    /// An instructor teaches at most one session per slot.
    InstructorClash,
    /// A room hosts at most one session per slot.
    RoomClash,
    /// A group attends at most one session per slot.
    GroupClash,
    /// All sessions of a course share one instructor.
    CourseConsistency,
}

impl HardConstraint {
    /// Every hard constraint, in evaluation order.
    pub const ALL: [HardConstraint; 4] = [
        HardConstraint::InstructorClash,
        HardConstraint::RoomClash,
        HardConstraint::GroupClash,
        HardConstraint::CourseConsistency,
    ];

    /// Short name used in logs and violation reports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::InstructorClash => "instructor-clash",
            Self::RoomClash => "room-clash",
            Self::GroupClash => "group-clash",
            Self::CourseConsistency => "course-consistency",
        }
    }

    /// Whether two distinct sessions may hold these values together.
    #[inline]
    pub fn permits(&self, a: (Session, Candidate), b: (Session, Candidate)) -> bool {
        let ((sa, va), (sb, vb)) = (a, b);
        let same_slot = va.slot == vb.slot;
        match self {
            Self::InstructorClash => !(same_slot && va.instructor == vb.instructor),
            Self::RoomClash => !(same_slot && va.room == vb.room),
            Self::GroupClash => !(same_slot && sa.group == sb.group),
            Self::CourseConsistency => sa.course != sb.course || va.instructor == vb.instructor,
        }
    }

    /// Whether this rule can ever relate the two sessions, independent of
    /// their values.
    ///
    /// Value-dependent rules (instructor and room clashes) are reported as
    /// structural only when the caller says the sessions share a resource
    /// pool; see [`crate::constraints::ConstraintSet::related`].
    pub fn relates_structurally(&self, a: &Session, b: &Session) -> bool {
        match self {
            Self::GroupClash => a.group == b.group,
            Self::CourseConsistency => a.course == b.course,
            Self::InstructorClash | Self::RoomClash => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(index: usize, course: usize, group: usize) -> Session {
        Session {
            index,
            course,
            group,
            occurrence: 0,
        }
    }

    #[test]
    fn test_instructor_clash() {
        let a = (session(0, 0, 0), Candidate::new(0, 3, 7));
        let same_slot = (session(1, 1, 1), Candidate::new(1, 3, 7));
        let other_slot = (session(1, 1, 1), Candidate::new(1, 4, 7));
        assert!(!HardConstraint::InstructorClash.permits(a, same_slot));
        assert!(HardConstraint::InstructorClash.permits(a, other_slot));
    }

    #[test]
    fn test_room_clash() {
        let a = (session(0, 0, 0), Candidate::new(2, 0, 0));
        let b = (session(1, 1, 1), Candidate::new(2, 0, 1));
        let c = (session(1, 1, 1), Candidate::new(3, 0, 1));
        assert!(!HardConstraint::RoomClash.permits(a, b));
        assert!(HardConstraint::RoomClash.permits(a, c));
    }

    #[test]
    fn test_group_clash() {
        let a = (session(0, 0, 5), Candidate::new(0, 1, 0));
        let same_group = (session(1, 1, 5), Candidate::new(1, 1, 1));
        let other_group = (session(1, 1, 6), Candidate::new(1, 1, 1));
        assert!(!HardConstraint::GroupClash.permits(a, same_group));
        assert!(HardConstraint::GroupClash.permits(a, other_group));
    }

    #[test]
    fn test_course_consistency() {
        let a = (session(0, 2, 0), Candidate::new(0, 0, 1));
        let same_course_other_instr = (session(1, 2, 1), Candidate::new(0, 5, 2));
        let same_course_same_instr = (session(1, 2, 1), Candidate::new(0, 5, 1));
        let other_course = (session(1, 3, 1), Candidate::new(0, 5, 2));
        let rule = HardConstraint::CourseConsistency;
        assert!(!rule.permits(a, same_course_other_instr));
        assert!(rule.permits(a, same_course_same_instr));
        assert!(rule.permits(a, other_course));
    }

    #[test]
    fn test_structural_relations() {
        let a = session(0, 0, 0);
        let b = session(1, 0, 1);
        let c = session(2, 1, 0);
        assert!(HardConstraint::CourseConsistency.relates_structurally(&a, &b));
        assert!(!HardConstraint::GroupClash.relates_structurally(&a, &b));
        assert!(HardConstraint::GroupClash.relates_structurally(&a, &c));
        assert!(!HardConstraint::RoomClash.relates_structurally(&a, &c));
    }

    #[test]
    fn test_names_unique() {
        let names: std::collections::HashSet<&str> =
            HardConstraint::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(names.len(), HardConstraint::ALL.len());
    }
}
