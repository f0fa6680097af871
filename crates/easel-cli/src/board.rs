//! Board provider backed by a JSON snapshot file.

use std::path::PathBuf;

use easel_core::board::BoardProvider;
use easel_core::canvas::CanvasObject;
use easel_core::{Error, Result};

/// Reads the current selection from a JSON file on every query.
#[derive(Debug, Clone)]
pub struct FileBoard {
    path: PathBuf,
}

impl FileBoard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl BoardProvider for FileBoard {
    async fn get_selection(&self) -> Result<Vec<CanvasObject>> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|err| {
            Error::selection_read()
                .with_message(format!("cannot read {}", self.path.display()))
                .with_source(err)
        })?;

        serde_json::from_slice(&bytes).map_err(|err| {
            Error::selection_read()
                .with_message(format!("{} is not a board selection", self.path.display()))
                .with_source(err)
        })
    }
}
