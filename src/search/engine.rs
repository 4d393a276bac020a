//! Backtracking search with forward checking.
//!
//! # Algorithm
//!
//! The engine keeps an explicit stack of [`Frame`]s, one per decided session,
//! and a [`Trail`] of depth-tagged domain removals. Each loop iteration is one
//! unit of work preceded by a check point:
//!
//! 1. **Check point**: cancellation, timeout, improvement budgets, periodic
//!    progress.
//! 2. **Descend**: if every session holds a value, record the timetable.
//!    Otherwise select a session by MRV and push its frame.
//! 3. **Advance** the top frame by one candidate: retract the previous
//!    commitment, take the next live candidate in domain order, re-check it
//!    against the assigned neighbors, commit, then forward-check every
//!    unassigned neighbor. A wiped-out neighbor undoes this depth's removals
//!    and rejects the candidate. A frame with no candidates left is popped.
//! 4. An empty stack after a pop means the space is exhausted.
//!
//! In improvement mode (a node or time budget is set) step 2 keeps going
//! after a complete timetable and retains the cheapest one found.
//!
//! Every exit path unwinds the stack and the trail, so the domains end in the
//! state the domain builder produced.
//!
//! # Complexity
//! Worst case exponential in the number of sessions. Forward checking after a
//! commitment is O(deg × |D|).
//!
//! # Reference
//! Haralick & Elliott (1980), "Increasing Tree Search Efficiency for
//! Constraint Satisfaction Problems", Artificial Intelligence 14(3)

use log::{debug, info, trace, warn};
use std::time::Instant;

use super::config::SolverConfig;
use super::frame::Frame;
use super::mrv::select_mrv;
use super::result::{CancelReason, SearchStats, SolveOutcome, SolveReport};
use super::trail::Trail;
use crate::constraints::ConstraintSet;
use crate::domain::{Domain, DomainBuilder, InvalidInput, ResourcePool};
use crate::error::SolverError;
use crate::models::{Candidate, Problem, Session, Timetable};
use crate::progress::{ProgressSnapshot, SolveControl};

/// What the next loop iteration does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Descend,
    Advance,
}

/// Result of advancing the top frame by one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Committed,
    Rejected,
    Exhausted,
}

/// Why the main loop stopped.
enum Stop {
    Complete,
    Exhausted,
    Budget,
    Cancelled(CancelReason),
}

/// Best complete timetable found so far.
struct Incumbent {
    values: Vec<Candidate>,
    soft_cost: u64,
}

/// Search state for one problem.
///
/// Owns the domains, trail, frame stack and working assignment. Construction
/// builds the initial domains and the neighbor graph; [`SearchEngine::run`]
/// searches and always leaves the domains as it found them on success.
pub struct SearchEngine<'a> {
    problem: &'a Problem,
    config: SolverConfig,
    constraints: ConstraintSet,
    sessions: Vec<Session>,
    domains: Vec<Domain>,
    neighbors: Vec<Vec<usize>>,
    values: Vec<Option<Candidate>>,
    assigned: usize,
    trail: Trail,
    frames: Vec<Frame>,
    stats: SearchStats,
}

impl<'a> SearchEngine<'a> {
    /// Prepares a search.
    ///
    /// Fails with the first session whose initial domain is empty.
    pub fn new(problem: &'a Problem, config: &SolverConfig) -> Result<Self, InvalidInput> {
        for course in &problem.courses {
            if course.session_count() == 0 {
                warn!("course '{}' produces no sessions", course.id);
            }
        }

        let sessions = problem.sessions();
        let domains = DomainBuilder::new(problem).build(&sessions)?;
        let constraints = config.constraint_set();

        let pools: Vec<ResourcePool> = domains.iter().map(Domain::pool).collect();
        let mut neighbors = vec![Vec::new(); sessions.len()];
        for a in 0..sessions.len() {
            for b in (a + 1)..sessions.len() {
                if constraints.related(&sessions[a], &sessions[b], &pools[a], &pools[b]) {
                    neighbors[a].push(b);
                    neighbors[b].push(a);
                }
            }
        }

        let n = sessions.len();
        Ok(Self {
            problem,
            config: config.clone(),
            constraints,
            sessions,
            domains,
            neighbors,
            values: vec![None; n],
            assigned: 0,
            trail: Trail::new(),
            frames: Vec::with_capacity(n),
            stats: SearchStats::default(),
        })
    }

    /// Sessions in index order.
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Current domains, one per session.
    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    /// Sum of live candidates over all domains.
    pub fn live_candidate_count(&self) -> usize {
        self.domains.iter().map(Domain::len).sum()
    }

    /// Sessions related to `session` by some hard constraint.
    pub fn neighbors(&self, session: usize) -> &[usize] {
        &self.neighbors[session]
    }

    /// Statistics of the last run.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Runs the search to a terminal outcome.
    ///
    /// Errors only on internal inconsistencies; infeasibility and
    /// cancellation are outcomes.
    pub fn run(&mut self, control: &SolveControl) -> Result<SolveReport, SolverError> {
        if !self.frames.is_empty() || !self.trail.is_empty() || self.assigned != 0 {
            return Err(SolverError::invariant(
                "search started with leftover frames or trail entries",
            ));
        }

        let start = Instant::now();
        self.stats = SearchStats::default();
        info!(
            "timetabling {} sessions over {} candidates",
            self.sessions.len(),
            self.live_candidate_count()
        );

        let mut incumbent: Option<Incumbent> = None;
        let mut mode = Mode::Descend;
        let mut next_report = self.config.progress_interval;
        self.publish(control, start, None);

        let stop = loop {
            if let Some(reason) = self.interrupted(control, start) {
                break Stop::Cancelled(reason);
            }
            if incumbent.is_some() && self.budget_spent(start) {
                break Stop::Budget;
            }
            if self.stats.nodes_explored >= next_report {
                next_report = self.stats.nodes_explored + self.config.progress_interval;
                self.publish(control, start, incumbent.as_ref().map(|i| i.soft_cost));
            }

            match mode {
                Mode::Descend => {
                    if self.assigned == self.sessions.len() {
                        let cost = self.record_solution(&mut incumbent)?;
                        self.publish(control, start, incumbent.as_ref().map(|i| i.soft_cost));
                        if !self.config.is_anytime() || self.frames.is_empty() || cost == 0 {
                            break Stop::Complete;
                        }
                        mode = Mode::Advance;
                        continue;
                    }
                    let Some(session) = select_mrv(&self.domains, &self.neighbors, &self.values)
                    else {
                        return Err(SolverError::invariant(
                            "no unassigned session while assignment is incomplete",
                        ));
                    };
                    self.frames.push(Frame::new(session, self.trail.len()));
                    self.stats.max_depth = self.stats.max_depth.max(self.frames.len());
                    mode = Mode::Advance;
                }
                Mode::Advance => {
                    let Some(depth) = self.frames.len().checked_sub(1) else {
                        break Stop::Exhausted;
                    };
                    match self.step(depth)? {
                        Step::Committed => mode = Mode::Descend,
                        Step::Rejected => {}
                        Step::Exhausted => {
                            self.frames.pop();
                            self.stats.backtracks += 1;
                            trace!("backtrack from depth {depth}");
                        }
                    }
                }
            }
        };

        self.unwind()?;
        self.stats.elapsed = start.elapsed();
        self.publish(control, start, incumbent.as_ref().map(|i| i.soft_cost));

        let outcome = match stop {
            Stop::Cancelled(reason) => {
                if reason == CancelReason::Timeout {
                    warn!("solve timed out after {:?}", self.stats.elapsed);
                }
                SolveOutcome::Cancelled { reason }
            }
            Stop::Complete | Stop::Budget | Stop::Exhausted => match incumbent {
                Some(best) => SolveOutcome::Solved {
                    timetable: Timetable::from_values(self.problem, &self.sessions, &best.values),
                    soft_cost: best.soft_cost,
                },
                None => SolveOutcome::Infeasible,
            },
        };

        info!(
            "solve {} after {} nodes, {} backtracks in {:?}",
            outcome.kind(),
            self.stats.nodes_explored,
            self.stats.backtracks,
            self.stats.elapsed
        );
        Ok(SolveReport::new(outcome, self.stats))
    }

    fn interrupted(&self, control: &SolveControl, start: Instant) -> Option<CancelReason> {
        if control.is_cancelled() {
            return Some(CancelReason::Requested);
        }
        match self.config.timeout {
            Some(limit) if start.elapsed() >= limit => Some(CancelReason::Timeout),
            _ => None,
        }
    }

    fn budget_spent(&self, start: Instant) -> bool {
        self.config
            .node_budget
            .is_some_and(|n| self.stats.nodes_explored >= n)
            || self
                .config
                .time_budget
                .is_some_and(|t| start.elapsed() >= t)
    }

    fn publish(&self, control: &SolveControl, start: Instant, best_soft_cost: Option<u64>) {
        control.publish(ProgressSnapshot {
            assigned_count: self.assigned,
            explored_nodes: self.stats.nodes_explored,
            elapsed: start.elapsed(),
            best_soft_cost,
        });
    }

    /// Verifies and prices the complete working assignment, replacing the
    /// incumbent on strict improvement. Returns the incumbent's cost.
    fn record_solution(&mut self, incumbent: &mut Option<Incumbent>) -> Result<u64, SolverError> {
        let evaluation = self
            .constraints
            .evaluate(self.problem, &self.sessions, &self.values);
        if let Some(v) = evaluation.violations.first() {
            return Err(SolverError::invariant(format!(
                "complete assignment failed evaluation: {}",
                v.message
            )));
        }
        self.stats.solutions_found += 1;

        let cost = evaluation.soft_cost;
        let improves = incumbent.as_ref().is_none_or(|best| cost < best.soft_cost);
        if improves {
            debug!(
                "timetable #{} with soft cost {cost} after {} nodes",
                self.stats.solutions_found, self.stats.nodes_explored
            );
            *incumbent = Some(Incumbent {
                values: self.values.iter().flatten().copied().collect(),
                soft_cost: cost,
            });
        }
        Ok(incumbent.as_ref().map_or(cost, |best| best.soft_cost))
    }

    /// Advances the frame at `depth` by one candidate.
    fn step(&mut self, depth: usize) -> Result<Step, SolverError> {
        self.retract(depth)?;

        let frame = self.frames[depth];
        let session = frame.session;
        let domain = &self.domains[session];
        let Some(pos) = (frame.cursor..domain.total()).find(|&p| domain.is_live(p)) else {
            return Ok(Step::Exhausted);
        };
        let value = domain.candidate(pos);
        self.frames[depth].cursor = pos + 1;
        self.stats.nodes_explored += 1;

        let placement = (self.sessions[session], value);
        let placed = self.neighbors[session]
            .iter()
            .filter_map(|&t| self.values[t].map(|v| (self.sessions[t], v)));
        if !self.constraints.allows(placement, placed) {
            return Ok(Step::Rejected);
        }

        self.values[session] = Some(value);
        self.assigned += 1;
        self.frames[depth].committed = Some(pos);

        if let Some(wiped) = self.forward_check(session, value, depth) {
            self.stats.wipeouts += 1;
            trace!(
                "{} wiped out by {} at depth {depth}",
                self.problem.session_label(&self.sessions[wiped]),
                self.problem.session_label(&self.sessions[session])
            );
            self.retract(depth)?;
            return Ok(Step::Rejected);
        }
        Ok(Step::Committed)
    }

    /// Removes from every unassigned neighbor the candidates that conflict
    /// with `session = value`. Returns the first neighbor left empty.
    fn forward_check(&mut self, session: usize, value: Candidate, depth: usize) -> Option<usize> {
        let placement = (self.sessions[session], value);
        for i in 0..self.neighbors[session].len() {
            let t = self.neighbors[session][i];
            if self.values[t].is_some() {
                continue;
            }
            let other = self.sessions[t];
            let dead: Vec<usize> = self.domains[t]
                .live_candidates()
                .filter(|&(_, c)| !self.constraints.permits(placement, (other, c)))
                .map(|(pos, _)| pos)
                .collect();
            for pos in dead {
                if self.trail.remove(&mut self.domains, t, pos, depth) {
                    self.stats.values_pruned += 1;
                }
            }
            if self.domains[t].is_empty() {
                return Some(t);
            }
        }
        None
    }

    /// Withdraws the commitment of the frame at `depth`, if any, and undoes
    /// its trail entries.
    fn retract(&mut self, depth: usize) -> Result<(), SolverError> {
        let frame = self.frames[depth];
        if frame.committed.is_none() {
            return Ok(());
        }
        if self.values[frame.session].take().is_none() {
            return Err(SolverError::invariant(format!(
                "frame at depth {depth} committed but session {} holds no value",
                frame.session
            )));
        }
        self.assigned -= 1;
        self.frames[depth].committed = None;
        self.trail.undo_to(frame.trail_mark, depth, &mut self.domains)?;
        Ok(())
    }

    /// Pops every frame, restoring the domains and the working assignment.
    fn unwind(&mut self) -> Result<(), SolverError> {
        while let Some(depth) = self.frames.len().checked_sub(1) {
            self.retract(depth)?;
            self.frames.pop();
        }
        if !self.trail.is_empty() || self.assigned != 0 {
            return Err(SolverError::invariant(format!(
                "{} trail entries and {} assignments left after unwinding",
                self.trail.len(),
                self.assigned
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, Group, Instructor, Room, TimeSlot};
    use crate::progress::CancellationToken;

    /// Two groups sharing one course taught by one of two instructors, plus a
    /// second course per group, over a 2×2 grid with two rooms.
    fn sample() -> Problem {
        Problem::new()
            .with_group(Group::new("G1", 1, 20))
            .with_group(Group::new("G2", 1, 20))
            .with_course(Course::new("C1", "x").with_group("G1").with_group("G2"))
            .with_course(Course::new("C2", "y").with_group("G1"))
            .with_course(Course::new("C3", "y").with_group("G2"))
            .with_instructor(Instructor::new("I1").with_specialization("x"))
            .with_instructor(Instructor::new("I2").with_specialization("x"))
            .with_instructor(Instructor::new("I3").with_specialization("y"))
            .with_room(Room::lecture("R1", 30))
            .with_room(Room::lecture("R2", 30))
            .with_timeslots(TimeSlot::grid(2, 2))
    }

    #[test]
    fn test_solves_and_restores_domains() {
        let p = sample();
        let config = SolverConfig::default();
        let mut engine = SearchEngine::new(&p, &config).unwrap();
        let fresh = engine.domains().to_vec();

        let report = engine.run(&SolveControl::new()).unwrap();
        let timetable = report.outcome.timetable().unwrap();
        assert_eq!(timetable.assignment_count(), 4);
        assert!(config
            .constraint_set()
            .evaluate_timetable(&p, timetable)
            .is_feasible());
        assert_eq!(engine.domains(), fresh.as_slice());
        assert!(report.stats.nodes_explored >= 4);
        assert_eq!(report.stats.solutions_found, 1);
    }

    #[test]
    fn test_course_sessions_share_instructor() {
        let p = sample();
        let mut engine = SearchEngine::new(&p, &SolverConfig::default()).unwrap();
        let report = engine.run(&SolveControl::new()).unwrap();
        let timetable = report.outcome.timetable().unwrap();
        let c1: Vec<&str> = timetable
            .assignments
            .iter()
            .filter(|a| a.course_id == "C1")
            .map(|a| a.instructor_id.as_str())
            .collect();
        assert_eq!(c1.len(), 2);
        assert_eq!(c1[0], c1[1]);
    }

    #[test]
    fn test_neighbor_graph() {
        let p = sample();
        let engine = SearchEngine::new(&p, &SolverConfig::default()).unwrap();
        // Sessions: C1/G1, C1/G2, C2/G1, C3/G2
        assert!(engine.neighbors(0).contains(&1));
        assert!(engine.neighbors(0).contains(&2));
        // C2/G1 and C3/G2 share I3 and the rooms
        assert!(engine.neighbors(2).contains(&3));
    }

    #[test]
    fn test_infeasible_is_exhausted() {
        let p = Problem::new()
            .with_group(Group::new("G1", 1, 10))
            .with_course(Course::new("C1", "x").with_group("G1"))
            .with_course(Course::new("C2", "x").with_group("G1"))
            .with_instructor(Instructor::new("I1").with_specialization("x"))
            .with_instructor(Instructor::new("I2").with_specialization("x"))
            .with_room(Room::lecture("R1", 10))
            .with_timeslot(TimeSlot::new(0, 0));
        let mut engine = SearchEngine::new(&p, &SolverConfig::default()).unwrap();
        let fresh = engine.domains().to_vec();
        let report = engine.run(&SolveControl::new()).unwrap();
        assert_eq!(report.outcome, SolveOutcome::Infeasible);
        assert!(report.stats.backtracks >= 1);
        assert_eq!(engine.domains(), fresh.as_slice());
    }

    #[test]
    fn test_precancelled_explores_nothing() {
        let p = sample();
        let token = CancellationToken::new();
        token.cancel();
        let control = SolveControl::new().with_token(token);
        let mut engine = SearchEngine::new(&p, &SolverConfig::default()).unwrap();
        let report = engine.run(&control).unwrap();
        assert_eq!(
            report.outcome,
            SolveOutcome::Cancelled {
                reason: CancelReason::Requested
            }
        );
        assert_eq!(report.stats.nodes_explored, 0);
    }

    #[test]
    fn test_anytime_never_worse_than_first() {
        let p = sample();
        let first = SearchEngine::new(&p, &SolverConfig::default())
            .unwrap()
            .run(&SolveControl::new())
            .unwrap();
        let config = SolverConfig::default().with_node_budget(10_000);
        let improved = SearchEngine::new(&p, &config)
            .unwrap()
            .run(&SolveControl::new())
            .unwrap();
        let a = first.outcome.soft_cost().unwrap();
        let b = improved.outcome.soft_cost().unwrap();
        assert!(b <= a);
        assert!(improved.stats.solutions_found >= 1);
    }

    #[test]
    fn test_empty_problem() {
        let p = Problem::new();
        let mut engine = SearchEngine::new(&p, &SolverConfig::default()).unwrap();
        let report = engine.run(&SolveControl::new()).unwrap();
        assert_eq!(report.outcome.soft_cost(), Some(0));
        assert!(report.outcome.timetable().unwrap().is_empty());
        assert_eq!(engine.live_candidate_count(), 0);
    }

    #[test]
    fn test_course_without_groups_is_skipped() {
        let p = sample().with_course(Course::new("C9", "x"));
        let mut engine = SearchEngine::new(&p, &SolverConfig::default()).unwrap();
        assert_eq!(engine.sessions().len(), 4);
        let report = engine.run(&SolveControl::new()).unwrap();
        assert!(report.outcome.is_solved());
    }

    #[test]
    fn test_rerun_is_deterministic() {
        let p = sample();
        let mut engine = SearchEngine::new(&p, &SolverConfig::default()).unwrap();
        let a = engine.run(&SolveControl::new()).unwrap();
        let b = engine.run(&SolveControl::new()).unwrap();
        assert_eq!(a.outcome, b.outcome);
        assert_eq!(a.stats.nodes_explored, b.stats.nodes_explored);
    }
}
