//! Mock implementations of the board and generation backend.
//!
//! These mocks implement the collaborator traits defined in easel-core and
//! are cheap to clone: clones share the same recorded state, so a test can
//! hand one clone to a service and inspect another.

mod board;
mod generator;

pub use board::MockBoard;
pub use generator::{Gate, RecordedRequest, RecordingGenerator};
