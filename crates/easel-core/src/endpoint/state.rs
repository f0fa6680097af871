//! Endpoint lifecycle states and acknowledgments.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, IntoStaticStr};

/// Lifecycle state of a model endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(AsRefStr, Display, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EndpointState {
    #[default]
    Off,
    /// A start was requested and the backend has not confirmed it yet.
    Starting,
    On,
}

/// Completion signal sent by the backend for a pending start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EndpointAck {
    /// The endpoint is serving requests.
    Ready,
    /// The endpoint could not be started.
    Failed { reason: String },
}
