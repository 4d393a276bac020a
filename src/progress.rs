//! Progress and cancellation channel.
//!
//! The search runs on a single worker. It talks to the caller through two
//! one-way lanes only:
//!
//! - outward, [`ProgressSnapshot`]s over an unbounded `crossbeam-channel`
//!   (sending never blocks the worker),
//! - inward, a [`CancellationToken`] flag the worker polls at its check points.
//!
//! [`SolveHandle`] bundles both ends for a solve started with
//! [`crate::search::Solver::spawn`].

use crossbeam_channel::{Receiver, Sender, TryIter};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crate::error::SolverError;
use crate::search::SolveReport;

/// A point-in-time view of a running solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// Sessions currently holding a value.
    pub assigned_count: usize,
    /// Nodes (candidate trials) explored so far.
    pub explored_nodes: u64,
    /// Time since the solve started.
    pub elapsed: Duration,
    /// Soft cost of the best complete timetable found so far.
    pub best_soft_cost: Option<u64>,
}

/// Shared cancellation flag.
///
/// Cloning yields another handle to the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// Creates an unset token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// The worker's end of the channel: a token to poll and an optional
/// progress sink.
#[derive(Debug, Clone, Default)]
pub struct SolveControl {
    token: CancellationToken,
    sender: Option<Sender<ProgressSnapshot>>,
}

impl SolveControl {
    /// A control with a fresh token and no progress sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Polls the given token instead of a private one.
    pub fn with_token(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    /// Publishes snapshots into `sender`.
    pub fn with_sender(mut self, sender: Sender<ProgressSnapshot>) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Creates a control wired to a new unbounded channel.
    pub fn channel() -> (Self, Receiver<ProgressSnapshot>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self::new().with_sender(tx), rx)
    }

    /// The cancellation token polled by the worker.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Whether cancellation was requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Publishes a snapshot. A dropped receiver is not an error.
    pub fn publish(&self, snapshot: ProgressSnapshot) {
        if let Some(tx) = &self.sender {
            let _ = tx.try_send(snapshot);
        }
    }
}

/// Caller's end of a solve running on a worker thread.
#[derive(Debug)]
pub struct SolveHandle {
    receiver: Receiver<ProgressSnapshot>,
    token: CancellationToken,
    worker: JoinHandle<Result<SolveReport, SolverError>>,
}

impl SolveHandle {
    pub(crate) fn new(
        receiver: Receiver<ProgressSnapshot>,
        token: CancellationToken,
        worker: JoinHandle<Result<SolveReport, SolverError>>,
    ) -> Self {
        Self {
            receiver,
            token,
            worker,
        }
    }

    /// The progress receiver.
    pub fn progress(&self) -> &Receiver<ProgressSnapshot> {
        &self.receiver
    }

    /// Drains the snapshots published so far without blocking.
    pub fn try_progress(&self) -> TryIter<'_, ProgressSnapshot> {
        self.receiver.try_iter()
    }

    /// Requests cancellation. The worker stops at its next check point.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// A clone of the cancellation token.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Whether the worker has returned.
    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    /// Waits for the worker and returns its result.
    pub fn join(self) -> Result<SolveReport, SolverError> {
        self.worker.join().map_err(|_| SolverError::WorkerPanicked)?
    }
}
