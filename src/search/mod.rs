//! Search engine and solve entry points.
//!
//! [`Solver`] is the top-level API: it validates the input, builds the
//! initial domains and runs a [`SearchEngine`] either on the calling thread
//! ([`Solver::solve`]) or on a dedicated worker ([`Solver::spawn`]).
//!
//! # Components
//!
//! | Type | Role |
//! |------|------|
//! | [`SolverConfig`] | Weights, budgets, timeout, progress interval |
//! | [`SearchEngine`] | Frame stack, trail, MRV, forward checking |
//! | [`Trail`] | Depth-tagged log of domain removals |
//! | [`Frame`] | One decision level |
//! | [`SolveOutcome`] / [`SolveReport`] | Terminal result plus [`SearchStats`] |

mod config;
mod engine;
mod frame;
mod mrv;
mod result;
mod trail;

pub use config::SolverConfig;
pub use engine::SearchEngine;
pub use frame::Frame;
pub use mrv::select_mrv;
pub use result::{CancelReason, SearchStats, SolveOutcome, SolveReport};
pub use trail::{Trail, TrailEntry};

use log::info;

use crate::error::SolverError;
use crate::models::Problem;
use crate::progress::{SolveControl, SolveHandle};
use crate::validation::validate_problem;

/// Solve entry points.
pub struct Solver;

impl Solver {
    /// Solves on the calling thread with no progress sink and no way to
    /// cancel other than `config.timeout`.
    pub fn solve(problem: &Problem, config: &SolverConfig) -> Result<SolveReport, SolverError> {
        Self::solve_with_control(problem, config, &SolveControl::new())
    }

    /// Solves on the calling thread, publishing to and polling `control`.
    ///
    /// # Errors
    /// - [`SolverError::InvalidConfig`] if `config` fails validation
    /// - [`SolverError::InvalidProblem`] if `problem` fails validation
    /// - [`SolverError::InternalInvariantViolation`] on an engine defect
    pub fn solve_with_control(
        problem: &Problem,
        config: &SolverConfig,
        control: &SolveControl,
    ) -> Result<SolveReport, SolverError> {
        config.validate()?;
        validate_problem(problem).map_err(SolverError::InvalidProblem)?;

        let mut engine = match SearchEngine::new(problem, config) {
            Ok(engine) => engine,
            Err(invalid) => {
                info!("statically infeasible: {invalid}");
                return Ok(SolveReport::new(invalid.into(), SearchStats::default()));
            }
        };
        engine.run(control)
    }

    /// Starts a solve on a dedicated worker thread.
    ///
    /// The problem and configuration move into the worker; the returned
    /// handle carries the progress receiver and the cancellation token.
    pub fn spawn(problem: Problem, config: SolverConfig) -> SolveHandle {
        let (control, receiver) = SolveControl::channel();
        let token = control.token().clone();
        let worker =
            std::thread::spawn(move || Self::solve_with_control(&problem, &config, &control));
        SolveHandle::new(receiver, token, worker)
    }
}
