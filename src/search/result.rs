//! Solve outcomes and statistics.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::domain::{EmptyDomainReason, InvalidInput};
use crate::models::{Session, Timetable};

/// Terminal outcome of a solve.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    /// A timetable satisfying every hard constraint.
    Solved {
        /// The accepted timetable.
        timetable: Timetable,
        /// Its weighted soft cost.
        soft_cost: u64,
    },
    /// The search space was exhausted without a timetable.
    Infeasible,
    /// The solve was stopped before completion; no timetable is returned.
    Cancelled {
        /// Who stopped it.
        reason: CancelReason,
    },
    /// A session had no legal candidate before search started.
    InvalidInput {
        /// The offending session.
        session: Session,
        /// Its readable label.
        label: String,
        /// Why its domain is empty.
        reason: EmptyDomainReason,
    },
}

/// Why a solve was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CancelReason {
    /// The caller set the cancellation token.
    Requested,
    /// The configured timeout expired.
    Timeout,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Requested => write!(f, "caller requested"),
            Self::Timeout => write!(f, "timed out"),
        }
    }
}

impl From<InvalidInput> for SolveOutcome {
    fn from(e: InvalidInput) -> Self {
        Self::InvalidInput {
            session: e.session,
            label: e.label,
            reason: e.reason,
        }
    }
}

impl SolveOutcome {
    /// Whether a timetable was produced.
    pub fn is_solved(&self) -> bool {
        matches!(self, Self::Solved { .. })
    }

    /// The timetable, if solved.
    pub fn timetable(&self) -> Option<&Timetable> {
        match self {
            Self::Solved { timetable, .. } => Some(timetable),
            _ => None,
        }
    }

    /// The soft cost, if solved.
    pub fn soft_cost(&self) -> Option<u64> {
        match self {
            Self::Solved { soft_cost, .. } => Some(*soft_cost),
            _ => None,
        }
    }

    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Solved { .. } => "solved",
            Self::Infeasible => "infeasible",
            Self::Cancelled { .. } => "cancelled",
            Self::InvalidInput { .. } => "invalid-input",
        }
    }
}

/// Counters collected during search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Candidate trials (each consistency check counts as one node).
    pub nodes_explored: u64,
    /// Frames popped after exhausting their candidates.
    pub backtracks: u64,
    /// Candidates rejected because forward checking emptied a domain.
    pub wipeouts: u64,
    /// Candidates removed by forward checking.
    pub values_pruned: u64,
    /// Complete timetables reached.
    pub solutions_found: u64,
    /// Deepest decision level reached.
    pub max_depth: usize,
    /// Wall time of the solve.
    pub elapsed: Duration,
}

/// Outcome plus statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveReport {
    /// Terminal outcome.
    pub outcome: SolveOutcome,
    /// Search statistics.
    pub stats: SearchStats,
}

impl SolveReport {
    pub(crate) fn new(outcome: SolveOutcome, stats: SearchStats) -> Self {
        Self { outcome, stats }
    }
}
