//! Board state access.
//!
//! The board is an external collaborator. [`BoardProvider`] is the narrow
//! read-only interface the dispatcher consumes, and [`BoardService`] wraps any
//! provider with logging and error normalisation so that every failure
//! surfaces as [`ErrorKind::SelectionRead`](crate::ErrorKind::SelectionRead).

use std::fmt;
use std::sync::Arc;

use jiff::Timestamp;

use crate::canvas::{CanvasObject, Selection};
use crate::{Error, ErrorKind, Result};

/// Tracing target for board operations.
pub const TRACING_TARGET: &str = "easel_core::board";

/// Read access to the board the user is working on.
#[async_trait::async_trait]
pub trait BoardProvider: Send + Sync {
    /// Returns the items currently selected by the user.
    async fn get_selection(&self) -> Result<Vec<CanvasObject>>;
}

/// Board access with observability.
#[derive(Clone)]
pub struct BoardService {
    provider: Arc<dyn BoardProvider>,
}

impl fmt::Debug for BoardService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoardService").finish_non_exhaustive()
    }
}

impl BoardService {
    /// Creates a new board service from a provider.
    pub fn new<P>(provider: P) -> Self
    where
        P: BoardProvider + 'static,
    {
        Self {
            provider: Arc::new(provider),
        }
    }

    /// Takes a snapshot of the current selection.
    ///
    /// Any provider failure is reported as a selection read error; no partial
    /// selection is ever returned.
    pub async fn read_selection(&self) -> Result<Selection> {
        let started_at = Timestamp::now();

        tracing::debug!(target: TRACING_TARGET, "Reading board selection");

        let result = self.provider.get_selection().await;
        let elapsed = Timestamp::now().duration_since(started_at);

        match result {
            Ok(objects) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    count = objects.len(),
                    elapsed_ms = elapsed.as_millis(),
                    "Board selection read"
                );
                Ok(Selection::new(objects))
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Board selection read failed"
                );
                Err(into_selection_read(error))
            }
        }
    }
}

fn into_selection_read(error: Error) -> Error {
    if error.kind == ErrorKind::SelectionRead {
        return error;
    }

    Error::selection_read()
        .with_message("failed to read board selection")
        .with_source(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::StickyNote;

    struct StaticBoard(Vec<CanvasObject>);

    #[async_trait::async_trait]
    impl BoardProvider for StaticBoard {
        async fn get_selection(&self) -> Result<Vec<CanvasObject>> {
            Ok(self.0.clone())
        }
    }

    struct UnauthorizedBoard;

    #[async_trait::async_trait]
    impl BoardProvider for UnauthorizedBoard {
        async fn get_selection(&self) -> Result<Vec<CanvasObject>> {
            Err(Error::configuration().with_message("missing board token"))
        }
    }

    #[tokio::test]
    async fn test_read_selection() {
        let board = BoardService::new(StaticBoard(vec![StickyNote::new("1", "a cat").into()]));
        let selection = board.read_selection().await.unwrap();
        assert_eq!(selection.len(), 1);
    }

    #[tokio::test]
    async fn test_read_failure_is_selection_read() {
        let board = BoardService::new(UnauthorizedBoard);
        let error = board.read_selection().await.unwrap_err();

        assert_eq!(error.kind, ErrorKind::SelectionRead);
        assert!(error.source.is_some());
    }
}
