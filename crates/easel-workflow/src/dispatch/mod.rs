//! One read → classify → extract → invoke cycle per user trigger.
//!
//! The [`Dispatcher`] owns its collaborators: the board is read through a
//! [`BoardService`] and generation requests go through a
//! [`GenerationService`], both injected at construction. Nothing survives
//! between cycles except the observable [`DispatchState`].

mod report;
mod state;

pub use report::{DispatchOutcome, DispatchReport, Dispatched};
pub use state::DispatchState;

use std::fmt;

use easel_core::prelude::{BoardService, Error, GenerationService, Result};
use tokio::sync::{Mutex, watch};
use tokio_util::sync::CancellationToken;

use crate::classify::{WorkflowMatch, classify};
use crate::extract::extract;

/// Tracing target for dispatching.
pub const TRACING_TARGET: &str = "easel_workflow::dispatch";

/// Runs dispatch cycles, at most one at a time.
pub struct Dispatcher {
    board: BoardService,
    generation: GenerationService,
    state: watch::Sender<DispatchState>,
    in_flight: Mutex<()>,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("board", &self.board)
            .field("generation", &self.generation)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Creates an idle dispatcher.
    pub fn new(board: BoardService, generation: GenerationService) -> Self {
        Self {
            board,
            generation,
            state: watch::Sender::new(DispatchState::Idle),
            in_flight: Mutex::new(()),
        }
    }

    /// Returns the current stage.
    pub fn state(&self) -> DispatchState {
        *self.state.borrow()
    }

    /// Subscribes to stage changes.
    pub fn subscribe(&self) -> watch::Receiver<DispatchState> {
        self.state.subscribe()
    }

    /// Runs one dispatch cycle to completion.
    pub async fn dispatch(&self) -> Result<DispatchOutcome> {
        self.dispatch_with_cancellation(&CancellationToken::new())
            .await
    }

    /// Runs one dispatch cycle unless `cancel` fires first.
    ///
    /// A trigger arriving while another cycle is in flight is ignored and
    /// reported as [`DispatchOutcome::Busy`]. Cancellation drops the cycle
    /// wherever it is; a generation call already sent to the backend is not
    /// recalled.
    pub async fn dispatch_with_cancellation(
        &self,
        cancel: &CancellationToken,
    ) -> Result<DispatchOutcome> {
        let Ok(_guard) = self.in_flight.try_lock() else {
            tracing::debug!(
                target: TRACING_TARGET,
                state = %self.state(),
                "Dispatch ignored, another dispatch is in flight"
            );
            return Ok(DispatchOutcome::Busy);
        };

        tokio::select! {
            biased;

            () = cancel.cancelled() => {
                tracing::info!(target: TRACING_TARGET, "Dispatch cancelled");
                self.transition(DispatchState::Idle);
                Ok(DispatchOutcome::Cancelled)
            }

            result = self.run() => result,
        }
    }

    /// Runs one dispatch cycle and turns its result into a diagnostic.
    pub async fn trigger(&self, cancel: &CancellationToken) -> DispatchReport {
        let report = DispatchReport::from(self.dispatch_with_cancellation(cancel).await);
        tracing::debug!(target: TRACING_TARGET, report = %report, "Dispatch finished");
        report
    }

    async fn run(&self) -> Result<DispatchOutcome> {
        self.transition(DispatchState::Reading);
        let selection = match self.board.read_selection().await {
            Ok(selection) => selection,
            Err(error) => return Err(self.fail(error)),
        };

        self.transition(DispatchState::Classifying);
        let kind = match classify(&selection) {
            WorkflowMatch::Matched(kind) => kind,
            WorkflowMatch::NoMatch => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    items = selection.len(),
                    "No supported selection pattern matched"
                );
                self.transition(DispatchState::Idle);
                return Ok(DispatchOutcome::NoMatch);
            }
        };

        tracing::info!(
            target: TRACING_TARGET,
            workflow = %kind,
            "Running {}",
            kind.description()
        );

        self.transition(DispatchState::Extracting);
        let extraction = match extract(kind, &selection) {
            Ok(extraction) => extraction,
            Err(error) => return Err(self.fail(error)),
        };

        self.transition(DispatchState::Invoking);
        let result = self.generation.invoke(extraction.payload).await;
        self.transition(DispatchState::Idle);

        let response = result?;

        Ok(DispatchOutcome::Dispatched(Dispatched {
            workflow: kind,
            bindings: extraction.bindings,
            response,
        }))
    }

    fn fail(&self, error: Error) -> Error {
        if error.kind.is_internal_fault() {
            tracing::error!(target: TRACING_TARGET, error = %error, "Malformed selection");
        } else {
            tracing::warn!(target: TRACING_TARGET, error = %error, "Dispatch aborted");
        }

        self.transition(DispatchState::Failed);
        error
    }

    fn transition(&self, next: DispatchState) {
        let previous = self.state.send_replace(next);
        tracing::debug!(
            target: TRACING_TARGET,
            from = %previous,
            to = %next,
            "Dispatch state changed"
        );
    }
}
