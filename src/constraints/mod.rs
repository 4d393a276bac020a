//! Constraint engine.
//!
//! Constraints form a closed set of variants in two families:
//!
//! | Family | Variants | Evaluated |
//! |--------|----------|-----------|
//! | [`HardConstraint`] | instructor, room and group clash; course consistency | pairwise, during search and on complete timetables |
//! | [`SoftConstraint`] | early slot; same-day repetition | on complete timetables |
//!
//! [`ConstraintSet`] bundles one configuration of both families and offers
//! the incremental predicate used by the search ([`ConstraintSet::allows`])
//! and the full evaluator ([`ConstraintSet::evaluate`]).
//!
//! # Reference
//! Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach", Ch. 6

mod hard;
mod soft;

pub use hard::HardConstraint;
pub use soft::{RepeatPenalty, SoftConstraint, SoftWeights};

use crate::domain::ResourcePool;
use crate::models::{Candidate, Problem, Session, Timetable};

/// The active hard and soft constraints of a solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintSet {
    hard: Vec<HardConstraint>,
    soft: Vec<SoftConstraint>,
}

/// Result of evaluating a (possibly partial) assignment in full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Every broken rule found.
    pub violations: Vec<Violation>,
    /// Weighted sum of all soft constraint costs.
    pub soft_cost: u64,
    /// Cost contributed by each soft constraint, in configuration order.
    pub breakdown: Vec<SoftCost>,
}

/// Cost contributed by one soft constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoftCost {
    /// Constraint name.
    pub name: &'static str,
    /// Weighted cost.
    pub cost: u64,
}

/// A broken feasibility rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// What was broken.
    pub kind: ViolationKind,
    /// Indices of the sessions involved.
    pub sessions: Vec<usize>,
    /// Human-readable description.
    pub message: String,
}

/// Classification of violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// A session has no value.
    Unassigned,
    /// A pairwise hard constraint is broken.
    Hard(HardConstraint),
    /// The room has the wrong type or too few seats.
    RoomIncompatible,
    /// The instructor is unqualified or unavailable in the slot.
    InstructorIneligible,
}

impl Evaluation {
    /// Whether no violation was found.
    pub fn is_feasible(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of violations of the given kind.
    pub fn count(&self, kind: ViolationKind) -> usize {
        self.violations.iter().filter(|v| v.kind == kind).count()
    }
}

impl Default for ConstraintSet {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ConstraintSet {
    /// Creates a set with every hard constraint and the given soft ones.
    pub fn new(soft: Vec<SoftConstraint>) -> Self {
        Self {
            hard: HardConstraint::ALL.to_vec(),
            soft,
        }
    }

    /// Active hard constraints.
    pub fn hard(&self) -> &[HardConstraint] {
        &self.hard
    }

    /// Active soft constraints.
    pub fn soft(&self) -> &[SoftConstraint] {
        &self.soft
    }

    /// First hard constraint the two placements break, if any.
    #[inline]
    pub fn conflict(
        &self,
        a: (Session, Candidate),
        b: (Session, Candidate),
    ) -> Option<HardConstraint> {
        self.hard.iter().copied().find(|h| !h.permits(a, b))
    }

    /// Whether the two placements can coexist.
    #[inline]
    pub fn permits(&self, a: (Session, Candidate), b: (Session, Candidate)) -> bool {
        self.conflict(a, b).is_none()
    }

    /// Incremental predicate: whether `candidate` is still legal given the
    /// already placed sessions in `placed`.
    ///
    /// Placements of the candidate's own session are ignored.
    pub fn allows<I>(&self, candidate: (Session, Candidate), placed: I) -> bool
    where
        I: IntoIterator<Item = (Session, Candidate)>,
    {
        placed
            .into_iter()
            .filter(|(s, _)| s.index != candidate.0.index)
            .all(|other| self.permits(candidate, other))
    }

    /// Whether two sessions share a hard-constraint relationship.
    ///
    /// Sessions are related when they share a group or a course, or when
    /// their candidate pools overlap in a slot and in a room or instructor.
    pub fn related(
        &self,
        a: &Session,
        b: &Session,
        pool_a: &ResourcePool,
        pool_b: &ResourcePool,
    ) -> bool {
        if a.index == b.index {
            return false;
        }
        if self.hard.iter().any(|h| h.relates_structurally(a, b)) {
            return true;
        }
        let value_rules = self.hard.iter().any(|h| {
            matches!(
                h,
                HardConstraint::InstructorClash | HardConstraint::RoomClash
            )
        });
        value_rules
            && pool_a.shares_slot(pool_b)
            && (pool_a.shares_room(pool_b) || pool_a.shares_instructor(pool_b))
    }

    /// Weighted soft cost of the placed sessions.
    pub fn soft_cost(
        &self,
        problem: &Problem,
        sessions: &[Session],
        values: &[Option<Candidate>],
    ) -> u64 {
        self.soft
            .iter()
            .map(|c| c.cost(problem, sessions, values))
            .sum()
    }

    /// Full evaluator.
    ///
    /// Checks every session for a value and for static compatibility, every
    /// pair of placed sessions against every hard constraint, and prices the
    /// placed sessions with every soft constraint.
    pub fn evaluate(
        &self,
        problem: &Problem,
        sessions: &[Session],
        values: &[Option<Candidate>],
    ) -> Evaluation {
        let mut violations = Vec::new();

        for (session, value) in sessions.iter().zip(values) {
            let label = problem.session_label(session);
            let Some(value) = value else {
                violations.push(Violation {
                    kind: ViolationKind::Unassigned,
                    sessions: vec![session.index],
                    message: format!("{label} has no assignment"),
                });
                continue;
            };

            let course = &problem.courses[session.course];
            let group = &problem.groups[session.group];
            let room = &problem.rooms[value.room];
            if !room.serves(&course.room_type) || !room.fits(group.headcount) {
                violations.push(Violation {
                    kind: ViolationKind::RoomIncompatible,
                    sessions: vec![session.index],
                    message: format!(
                        "{label} placed in {} room '{}' ({} seats) but needs {} room for {}",
                        room.room_type, room.id, room.capacity, course.room_type, group.headcount
                    ),
                });
            }

            let instructor = &problem.instructors[value.instructor];
            let slot = &problem.timeslots[value.slot];
            if !instructor.is_qualified_for(&course.specialization)
                || !instructor.is_available(slot)
            {
                violations.push(Violation {
                    kind: ViolationKind::InstructorIneligible,
                    sessions: vec![session.index],
                    message: format!(
                        "{label} taught by '{}' who cannot teach it at {slot}",
                        instructor.id
                    ),
                });
            }
        }

        let placed: Vec<(Session, Candidate)> = sessions
            .iter()
            .zip(values)
            .filter_map(|(s, v)| v.map(|v| (*s, v)))
            .collect();
        for (i, a) in placed.iter().enumerate() {
            for b in &placed[i + 1..] {
                for rule in &self.hard {
                    if !rule.permits(*a, *b) {
                        violations.push(Violation {
                            kind: ViolationKind::Hard(*rule),
                            sessions: vec![a.0.index, b.0.index],
                            message: format!(
                                "{} and {} break {}",
                                problem.session_label(&a.0),
                                problem.session_label(&b.0),
                                rule.name()
                            ),
                        });
                    }
                }
            }
        }

        let breakdown: Vec<SoftCost> = self
            .soft
            .iter()
            .map(|c| SoftCost {
                name: c.name(),
                cost: c.cost(problem, sessions, values),
            })
            .collect();

        Evaluation {
            violations,
            soft_cost: breakdown.iter().map(|b| b.cost).sum(),
            breakdown,
        }
    }

    /// Evaluates a timetable against the problem it solves.
    ///
    /// Sessions of the problem missing from the timetable are reported as
    /// unassigned.
    pub fn evaluate_timetable(&self, problem: &Problem, timetable: &Timetable) -> Evaluation {
        let sessions = problem.sessions();
        let mut values = vec![None; sessions.len()];
        for a in &timetable.assignments {
            if let Some(slot) = values.get_mut(a.session.index) {
                *slot = Some(a.value);
            }
        }
        self.evaluate(problem, &sessions, &values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainBuilder;
    use crate::models::{Course, Group, Instructor, Room, RoomType, TimeSlot};

    fn sample() -> (Problem, Vec<Session>) {
        let problem = Problem::new()
            .with_group(Group::new("G1", 1, 20))
            .with_group(Group::new("G2", 1, 20))
            .with_course(Course::new("C1", "x").with_group("G1").with_group("G2"))
            .with_course(
                Course::new("C2", "y")
                    .with_room_type(RoomType::Lab)
                    .with_group("G1"),
            )
            .with_instructor(Instructor::new("I1").with_specialization("x"))
            .with_instructor(Instructor::new("I2").with_specialization("x"))
            .with_instructor(Instructor::new("I3").with_specialization("y"))
            .with_room(Room::lecture("R1", 30))
            .with_room(Room::lecture("R2", 30))
            .with_room(Room::lab("L1", 30))
            .with_timeslots(TimeSlot::grid(1, 3));
        let sessions = problem.sessions();
        (problem, sessions)
    }

    fn set() -> ConstraintSet {
        ConstraintSet::new(vec![SoftConstraint::EarlySlot {
            weight: 1,
            threshold: 1,
        }])
    }

    #[test]
    fn test_feasible_assignment() {
        let (p, s) = sample();
        let values = vec![
            Some(Candidate::new(0, 1, 0)),
            Some(Candidate::new(1, 1, 0)),
            Some(Candidate::new(2, 0, 2)),
        ];
        // C1/G1 and C1/G2 share I1 in the same slot: instructor clash
        let eval = set().evaluate(&p, &s, &values);
        assert_eq!(eval.count(ViolationKind::Hard(HardConstraint::InstructorClash)), 1);

        let values = vec![
            Some(Candidate::new(0, 1, 0)),
            Some(Candidate::new(1, 2, 0)),
            Some(Candidate::new(2, 0, 2)),
        ];
        let eval = set().evaluate(&p, &s, &values);
        assert!(eval.is_feasible(), "{:?}", eval.violations);
        assert_eq!(eval.soft_cost, 1);
        assert_eq!(eval.breakdown[0].name, "early-slot");
    }

    #[test]
    fn test_course_consistency_violation() {
        let (p, s) = sample();
        let values = vec![
            Some(Candidate::new(0, 1, 0)),
            Some(Candidate::new(1, 2, 1)),
            Some(Candidate::new(2, 0, 2)),
        ];
        let eval = set().evaluate(&p, &s, &values);
        assert_eq!(
            eval.count(ViolationKind::Hard(HardConstraint::CourseConsistency)),
            1
        );
        assert_eq!(eval.violations[0].sessions, vec![0, 1]);
    }

    #[test]
    fn test_group_and_static_violations() {
        let (p, s) = sample();
        let values = vec![
            Some(Candidate::new(0, 0, 0)),
            None,
            // C2/G1 in a lecture room, same slot as C1/G1, unqualified instructor
            Some(Candidate::new(1, 0, 0)),
        ];
        let eval = set().evaluate(&p, &s, &values);
        assert_eq!(eval.count(ViolationKind::Unassigned), 1);
        assert_eq!(eval.count(ViolationKind::RoomIncompatible), 1);
        assert_eq!(eval.count(ViolationKind::InstructorIneligible), 1);
        assert!(eval.count(ViolationKind::Hard(HardConstraint::GroupClash)) >= 1);
        assert!(eval.count(ViolationKind::Hard(HardConstraint::InstructorClash)) >= 1);
    }

    #[test]
    fn test_allows_ignores_own_session() {
        let (_, s) = sample();
        let cs = set();
        let candidate = (s[0], Candidate::new(0, 0, 0));
        assert!(cs.allows(candidate, vec![(s[0], Candidate::new(0, 0, 0))]));
        assert!(!cs.allows(candidate, vec![(s[2], Candidate::new(2, 0, 2))]));
        assert!(cs.allows(candidate, vec![(s[2], Candidate::new(2, 1, 2))]));
        assert!(cs.allows(candidate, std::iter::empty()));
    }

    #[test]
    fn test_related_sessions() {
        let (p, s) = sample();
        let domains = DomainBuilder::new(&p).build(&s).unwrap();
        let pools: Vec<ResourcePool> = domains.iter().map(|d| d.pool()).collect();
        let cs = set();
        // Same course
        assert!(cs.related(&s[0], &s[1], &pools[0], &pools[1]));
        // Same group
        assert!(cs.related(&s[0], &s[2], &pools[0], &pools[2]));
        // Never related to itself
        assert!(!cs.related(&s[0], &s[0], &pools[0], &pools[0]));
    }

    #[test]
    fn test_evaluate_timetable() {
        let (p, s) = sample();
        let values = vec![
            Candidate::new(0, 1, 0),
            Candidate::new(1, 2, 0),
            Candidate::new(2, 0, 2),
        ];
        let tt = Timetable::from_values(&p, &s, &values);
        let eval = set().evaluate_timetable(&p, &tt);
        assert!(eval.is_feasible());

        let mut partial = tt.clone();
        partial.assignments.pop();
        let eval = set().evaluate_timetable(&p, &partial);
        assert_eq!(eval.count(ViolationKind::Unassigned), 1);
    }
}
