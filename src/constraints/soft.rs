//! Soft constraints.
//!
//! Soft constraints price a complete timetable. Their weights and shape
//! parameters come from configuration; nothing here is tuned in code.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{Candidate, Problem, Session};

/// Penalty weights for the soft constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoftWeights {
    /// Cost per session placed in an early period.
    pub early_slot: u32,
    /// Cost per extra same-day session of a course for a group.
    pub same_day_repeat: u32,
}

impl Default for SoftWeights {
    fn default() -> Self {
        Self {
            early_slot: 1,
            same_day_repeat: 1,
        }
    }
}

/// Shape of the same-day repetition penalty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepeatPenalty {
    /// `weight × extra`.
    #[default]
    Linear,
    /// `weight × extra²`.
    Quadratic,
}

/// A weighted quality preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoftConstraint {
    /// Penalizes sessions in periods `< threshold`.
    EarlySlot {
        /// Cost per early session.
        weight: u32,
        /// First period that is not early.
        threshold: u32,
    },
    /// Penalizes a group meeting the same course more than once a day.
    SameDayRepeat {
        /// Cost per extra session (before shaping).
        weight: u32,
        /// Penalty curve.
        curve: RepeatPenalty,
    },
}

impl SoftConstraint {
    /// Short name used in cost breakdowns.
    pub fn name(&self) -> &'static str {
        match self {
            Self::EarlySlot { .. } => "early-slot",
            Self::SameDayRepeat { .. } => "same-day-repeat",
        }
    }

    /// Cost of this constraint over the placed sessions.
    ///
    /// Unplaced sessions (`None`) contribute nothing.
    pub fn cost(&self, problem: &Problem, sessions: &[Session], values: &[Option<Candidate>]) -> u64 {
        let placed = sessions
            .iter()
            .zip(values)
            .filter_map(|(s, v)| v.map(|v| (s, v)));

        match *self {
            Self::EarlySlot { weight, threshold } => {
                let early = placed
                    .filter(|(_, v)| problem.timeslots[v.slot].is_before_period(threshold))
                    .count() as u64;
                u64::from(weight) * early
            }
            Self::SameDayRepeat { weight, curve } => {
                let mut per_day: HashMap<(usize, usize, u32), u64> = HashMap::new();
                for (s, v) in placed {
                    let day = problem.timeslots[v.slot].day;
                    *per_day.entry((s.course, s.group, day)).or_insert(0) += 1;
                }
                per_day
                    .values()
                    .filter(|&&n| n > 1)
                    .map(|&n| {
                        let extra = n - 1;
                        let shaped = match curve {
                            RepeatPenalty::Linear => extra,
                            RepeatPenalty::Quadratic => extra * extra,
                        };
                        u64::from(weight) * shaped
                    })
                    .sum()
            }
        }
    }
}
