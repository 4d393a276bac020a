//! Solver configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constraints::{ConstraintSet, RepeatPenalty, SoftConstraint, SoftWeights};
use crate::error::ConfigError;

/// Configuration for one solve.
///
/// Without `node_budget` or `time_budget` the first feasible timetable is
/// returned. With either set, the search keeps going after the first
/// timetable and retains the cheapest one until a budget runs out or the
/// space is exhausted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Soft constraint weights.
    pub soft_weights: SoftWeights,

    /// Periods strictly below this are early.
    pub early_period_threshold: u32,

    /// Shape of the same-day repetition penalty.
    pub repeat_penalty: RepeatPenalty,

    /// Explored-node budget for improvement (applies once a timetable exists).
    pub node_budget: Option<u64>,

    /// Wall-clock budget for improvement (applies once a timetable exists).
    pub time_budget: Option<Duration>,

    /// Hard deadline; expiry cancels the solve.
    pub timeout: Option<Duration>,

    /// Publish a progress snapshot every this many explored nodes.
    pub progress_interval: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            soft_weights: SoftWeights::default(),
            early_period_threshold: 1,
            repeat_penalty: RepeatPenalty::Linear,
            node_budget: None,
            time_budget: None,
            timeout: None,
            progress_interval: 256,
        }
    }
}

impl SolverConfig {
    /// Sets the soft constraint weights.
    pub fn with_soft_weights(mut self, weights: SoftWeights) -> Self {
        self.soft_weights = weights;
        self
    }

    /// Sets the early-period threshold.
    pub fn with_early_period_threshold(mut self, threshold: u32) -> Self {
        self.early_period_threshold = threshold;
        self
    }

    /// Sets the repetition penalty curve.
    pub fn with_repeat_penalty(mut self, curve: RepeatPenalty) -> Self {
        self.repeat_penalty = curve;
        self
    }

    /// Enables improvement under a node budget.
    pub fn with_node_budget(mut self, nodes: u64) -> Self {
        self.node_budget = Some(nodes);
        self
    }

    /// Enables improvement under a time budget.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    /// Sets a hard deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the progress interval.
    pub fn with_progress_interval(mut self, nodes: u64) -> Self {
        self.progress_interval = nodes;
        self
    }

    /// Whether the search continues past the first timetable.
    pub fn is_anytime(&self) -> bool {
        self.node_budget.is_some() || self.time_budget.is_some()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.progress_interval == 0 {
            return Err(ConfigError::ZeroProgressInterval);
        }
        if self.node_budget == Some(0) {
            return Err(ConfigError::ZeroNodeBudget);
        }
        if self.time_budget == Some(Duration::ZERO) {
            return Err(ConfigError::ZeroDuration("time_budget"));
        }
        if self.timeout == Some(Duration::ZERO) {
            return Err(ConfigError::ZeroDuration("timeout"));
        }
        Ok(())
    }

    /// The constraint set this configuration describes.
    pub fn constraint_set(&self) -> ConstraintSet {
        ConstraintSet::new(vec![
            SoftConstraint::EarlySlot {
                weight: self.soft_weights.early_slot,
                threshold: self.early_period_threshold,
            },
            SoftConstraint::SameDayRepeat {
                weight: self.soft_weights.same_day_repeat,
                curve: self.repeat_penalty,
            },
        ])
    }
}
