//! Mock board provider for testing.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use easel_core::board::BoardProvider;
use easel_core::canvas::CanvasObject;
use easel_core::{Error, Result};

#[derive(Debug)]
enum Answer {
    Selection(Vec<CanvasObject>),
    Unreachable(String),
}

#[derive(Debug)]
struct MockBoardInner {
    answer: Answer,
    reads: AtomicUsize,
}

/// Mock board returning a fixed selection or a fixed failure.
#[derive(Debug, Clone)]
pub struct MockBoard {
    inner: Arc<MockBoardInner>,
}

impl MockBoard {
    /// Creates a board whose selection is always `objects`.
    pub fn with_selection(objects: impl IntoIterator<Item = CanvasObject>) -> Self {
        Self::from_answer(Answer::Selection(objects.into_iter().collect()))
    }

    /// Creates a board whose selection query always fails.
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::from_answer(Answer::Unreachable(message.into()))
    }

    fn from_answer(answer: Answer) -> Self {
        Self {
            inner: Arc::new(MockBoardInner {
                answer,
                reads: AtomicUsize::new(0),
            }),
        }
    }

    /// Number of selection queries served so far.
    pub fn reads(&self) -> usize {
        self.inner.reads.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl BoardProvider for MockBoard {
    async fn get_selection(&self) -> Result<Vec<CanvasObject>> {
        self.inner.reads.fetch_add(1, Ordering::SeqCst);

        match &self.inner.answer {
            Answer::Selection(objects) => Ok(objects.clone()),
            Answer::Unreachable(message) => Err(Error::selection_read().with_message(message)),
        }
    }
}
