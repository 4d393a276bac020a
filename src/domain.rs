//! Initial domains and the domain builder.
//!
//! A [`Domain`] is the candidate list of one session together with a live
//! mask. Candidates are never reordered or dropped from the list; the
//! search only flips them dead and back alive through its trail, so a
//! position identifies a candidate for the lifetime of a solve.
//!
//! # Static compatibility
//!
//! A triple (room, slot, instructor) enters a session's initial domain iff:
//! - the room's type equals the course's required type,
//! - the room seats the group's headcount,
//! - the instructor holds the course's specialization,
//! - the instructor is available in the slot.
//!
//! Candidates are generated slot-major, then room, then instructor, each in
//! problem record order. This fixed order is the search's value order.

use log::debug;
use std::collections::BTreeSet;
use std::fmt;

use crate::models::{Candidate, Problem, RoomType, Session};

/// The current candidate set of one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    candidates: Vec<Candidate>,
    live: Vec<bool>,
    live_count: usize,
}

impl Domain {
    /// Creates a domain with every candidate live.
    pub fn new(candidates: Vec<Candidate>) -> Self {
        let n = candidates.len();
        Self {
            candidates,
            live: vec![true; n],
            live_count: n,
        }
    }

    /// Number of live candidates.
    #[inline]
    pub fn len(&self) -> usize {
        self.live_count
    }

    /// Whether no candidate is live (a wipeout).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }

    /// Number of candidates, live or not.
    #[inline]
    pub fn total(&self) -> usize {
        self.candidates.len()
    }

    /// Candidate at a position.
    #[inline]
    pub fn candidate(&self, pos: usize) -> Candidate {
        self.candidates[pos]
    }

    /// Whether the candidate at a position is live.
    #[inline]
    pub fn is_live(&self, pos: usize) -> bool {
        self.live[pos]
    }

    /// Live candidates with their positions, in value order.
    pub fn live_candidates(&self) -> impl Iterator<Item = (usize, Candidate)> + '_ {
        self.candidates
            .iter()
            .enumerate()
            .filter(|(i, _)| self.live[*i])
            .map(|(i, c)| (i, *c))
    }

    /// Rooms, slots and instructors appearing anywhere in the candidate list.
    pub fn pool(&self) -> ResourcePool {
        let mut pool = ResourcePool::default();
        for c in &self.candidates {
            pool.rooms.insert(c.room);
            pool.slots.insert(c.slot);
            pool.instructors.insert(c.instructor);
        }
        pool
    }

    /// Marks a candidate dead. Returns `false` if it already was.
    pub(crate) fn remove(&mut self, pos: usize) -> bool {
        if !self.live[pos] {
            return false;
        }
        self.live[pos] = false;
        self.live_count -= 1;
        true
    }

    /// Marks a candidate live again. Returns `false` if it already was.
    pub(crate) fn restore(&mut self, pos: usize) -> bool {
        if self.live[pos] {
            return false;
        }
        self.live[pos] = true;
        self.live_count += 1;
        true
    }
}

/// The resources a domain can draw on, as problem indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourcePool {
    /// Room indices.
    pub rooms: BTreeSet<usize>,
    /// Time slot indices.
    pub slots: BTreeSet<usize>,
    /// Instructor indices.
    pub instructors: BTreeSet<usize>,
}

impl ResourcePool {
    /// Whether both pools can use a common slot.
    pub fn shares_slot(&self, other: &Self) -> bool {
        !self.slots.is_disjoint(&other.slots)
    }

    /// Whether both pools can use a common room.
    pub fn shares_room(&self, other: &Self) -> bool {
        !self.rooms.is_disjoint(&other.rooms)
    }

    /// Whether both pools can use a common instructor.
    pub fn shares_instructor(&self, other: &Self) -> bool {
        !self.instructors.is_disjoint(&other.instructors)
    }
}

/// Why a session has no legal candidate before search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyDomainReason {
    /// The problem has no time slots.
    NoTimeSlots,
    /// No room has the required type and enough seats.
    NoSuitableRoom {
        /// The course's required room type.
        room_type: RoomType,
        /// The group's headcount.
        headcount: u32,
    },
    /// No instructor holds the course's specialization.
    NoQualifiedInstructor {
        /// The course's specialization tag.
        specialization: String,
    },
    /// Qualified instructors exist but none is available in any slot.
    InstructorsUnavailable,
}

impl fmt::Display for EmptyDomainReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTimeSlots => write!(f, "no time slots defined"),
            Self::NoSuitableRoom {
                room_type,
                headcount,
            } => write!(f, "no {room_type} room seats {headcount} students"),
            Self::NoQualifiedInstructor { specialization } => {
                write!(f, "no instructor qualified for '{specialization}'")
            }
            Self::InstructorsUnavailable => {
                write!(f, "no qualified instructor is available in any slot")
            }
        }
    }
}

/// A statically infeasible session, detected before search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidInput {
    /// The offending session.
    pub session: Session,
    /// Readable session label (`COURSE/GROUP#occurrence`).
    pub label: String,
    /// Why its domain is empty.
    pub reason: EmptyDomainReason,
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.reason)
    }
}

/// Computes initial domains from static compatibility rules.
#[derive(Debug, Clone, Copy)]
pub struct DomainBuilder<'a> {
    problem: &'a Problem,
}

impl<'a> DomainBuilder<'a> {
    /// Creates a builder over a problem.
    pub fn new(problem: &'a Problem) -> Self {
        Self { problem }
    }

    /// Builds one domain per session, in session order.
    ///
    /// Fails on the first session (in session order) whose domain is empty.
    pub fn build(&self, sessions: &[Session]) -> Result<Vec<Domain>, InvalidInput> {
        sessions
            .iter()
            .map(|session| {
                self.build_for(session).map_err(|reason| {
                    let label = self.problem.session_label(session);
                    debug!("domain of {label} is empty: {reason}");
                    InvalidInput {
                        session: *session,
                        label,
                        reason,
                    }
                })
            })
            .collect()
    }

    /// Builds the initial domain of a single session.
    pub fn build_for(&self, session: &Session) -> Result<Domain, EmptyDomainReason> {
        let problem = self.problem;
        let course = &problem.courses[session.course];
        let group = &problem.groups[session.group];

        if problem.timeslots.is_empty() {
            return Err(EmptyDomainReason::NoTimeSlots);
        }

        let rooms: Vec<usize> = problem
            .rooms
            .iter()
            .enumerate()
            .filter(|(_, r)| r.serves(&course.room_type) && r.fits(group.headcount))
            .map(|(i, _)| i)
            .collect();
        if rooms.is_empty() {
            return Err(EmptyDomainReason::NoSuitableRoom {
                room_type: course.room_type.clone(),
                headcount: group.headcount,
            });
        }

        let instructors: Vec<usize> = problem
            .instructors
            .iter()
            .enumerate()
            .filter(|(_, i)| i.is_qualified_for(&course.specialization))
            .map(|(i, _)| i)
            .collect();
        if instructors.is_empty() {
            return Err(EmptyDomainReason::NoQualifiedInstructor {
                specialization: course.specialization.clone(),
            });
        }

        let mut candidates = Vec::with_capacity(problem.timeslots.len() * rooms.len());
        for (slot_idx, slot) in problem.timeslots.iter().enumerate() {
            let available: Vec<usize> = instructors
                .iter()
                .copied()
                .filter(|&i| problem.instructors[i].is_available(slot))
                .collect();
            for &room in &rooms {
                for &instructor in &available {
                    candidates.push(Candidate::new(room, slot_idx, instructor));
                }
            }
        }

        if candidates.is_empty() {
            return Err(EmptyDomainReason::InstructorsUnavailable);
        }
        Ok(Domain::new(candidates))
    }
}
