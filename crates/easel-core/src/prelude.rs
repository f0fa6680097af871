//! Convenient re-exports for common use.

pub use crate::board::{BoardProvider, BoardService};
pub use crate::canvas::{CanvasObject, ObjectId, Selection};
pub use crate::error::{BoxedError, Error, ErrorKind, Result};
pub use crate::generation::{GenerationPayload, GenerationProvider, GenerationService, WorkflowKind};
