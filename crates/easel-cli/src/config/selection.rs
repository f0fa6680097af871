//! Board snapshot configuration.

use std::path::PathBuf;

use clap::Args;
use serde::{Deserialize, Serialize};

/// Where the board selection is read from.
///
/// The snapshot is a JSON array of canvas items, each tagged with its
/// `type` (`image`, `sticky_note`, `connector` or `shape`). It is read anew
/// on every dispatch.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct SelectionConfig {
    /// Path to the JSON board selection snapshot
    #[arg(long = "selection", env = "SELECTION_PATH", default_value = "selection.json")]
    #[serde(default = "default_selection_path")]
    pub selection_path: PathBuf,
}

fn default_selection_path() -> PathBuf {
    PathBuf::from("selection.json")
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            selection_path: default_selection_path(),
        }
    }
}
