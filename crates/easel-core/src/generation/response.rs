//! Generation response types.

use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::WorkflowKind;

/// Acknowledgment returned by the backend for a generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Unique identifier for this response.
    pub response_id: Uuid,
    /// Request ID this response corresponds to.
    pub request_id: Uuid,
    /// Workflow that produced this response.
    pub workflow: WorkflowKind,
    /// Reference to the generated asset, when the backend returns one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Timestamp when the request was initiated.
    pub started_at: Timestamp,
    /// Timestamp when the response was received.
    pub finished_at: Timestamp,
}

impl GenerationResponse {
    /// Creates a new response finishing now.
    pub fn new(request_id: Uuid, workflow: WorkflowKind, started_at: Timestamp) -> Self {
        Self {
            response_id: Uuid::now_v7(),
            request_id,
            workflow,
            output: None,
            started_at,
            finished_at: Timestamp::now(),
        }
    }

    /// Sets the generated asset reference.
    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Returns how long the backend took.
    pub fn duration(&self) -> SignedDuration {
        self.finished_at.duration_since(self.started_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_creation() {
        let request_id = Uuid::now_v7();
        let started_at = Timestamp::now();
        let response = GenerationResponse::new(request_id, WorkflowKind::Inpainting, started_at)
            .with_output("s3://assets/out.png");

        assert_eq!(response.request_id, request_id);
        assert_eq!(response.workflow, WorkflowKind::Inpainting);
        assert_eq!(response.output.as_deref(), Some("s3://assets/out.png"));
        assert!(!response.duration().is_negative());
    }
}
