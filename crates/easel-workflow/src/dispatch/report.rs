use std::fmt;

use easel_core::generation::{GenerationResponse, WorkflowKind};
use easel_core::{ErrorKind, Result};
use serde::{Deserialize, Serialize};

use crate::extract::RoleBindings;

/// A workflow call that went through.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatched {
    pub workflow: WorkflowKind,
    pub bindings: RoleBindings,
    pub response: GenerationResponse,
}

/// Non-error result of one dispatch attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// The selection matched no workflow; nothing was invoked.
    NoMatch,
    /// A workflow was invoked and the backend accepted the request.
    Dispatched(Dispatched),
    /// Another dispatch was in flight; this trigger was ignored.
    Busy,
    /// The dispatch was cancelled before it completed.
    Cancelled,
}

/// User-facing diagnostic for one trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DispatchReport {
    Dispatched {
        workflow: WorkflowKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        output: Option<String>,
    },
    NoMatch,
    Busy,
    Cancelled,
    Failed {
        kind: ErrorKind,
        reason: String,
    },
}

impl DispatchReport {
    /// Returns true if the dispatch failed.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl From<Result<DispatchOutcome>> for DispatchReport {
    fn from(result: Result<DispatchOutcome>) -> Self {
        match result {
            Ok(DispatchOutcome::NoMatch) => Self::NoMatch,
            Ok(DispatchOutcome::Busy) => Self::Busy,
            Ok(DispatchOutcome::Cancelled) => Self::Cancelled,
            Ok(DispatchOutcome::Dispatched(dispatched)) => Self::Dispatched {
                workflow: dispatched.workflow,
                output: dispatched.response.output,
            },
            Err(error) => Self::Failed {
                kind: error.kind,
                reason: error.to_string(),
            },
        }
    }
}

impl fmt::Display for DispatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dispatched { workflow, .. } => write!(f, "workflow {workflow} dispatched"),
            Self::NoMatch => f.write_str("no supported selection pattern matched"),
            Self::Busy => f.write_str("dispatch ignored: another dispatch is in flight"),
            Self::Cancelled => f.write_str("dispatch cancelled"),
            Self::Failed { reason, .. } => write!(f, "dispatch failed: {reason}"),
        }
    }
}
