//! Recording generation backend for testing.

use std::sync::{Arc, Mutex, PoisonError};

use easel_core::generation::{
    GenerationPayload, GenerationProvider, GenerationRequest, GenerationResponse, ImageChange,
    Inpainting, StickersToImage, StyleTransfer,
};
use easel_core::{Error, Result};
use jiff::Timestamp;
use tokio::sync::Semaphore;
use uuid::Uuid;

/// A generation request as seen by the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub request_id: Uuid,
    pub endpoint: String,
    pub payload: GenerationPayload,
}

/// Holds generation calls open until it is opened.
#[derive(Debug, Clone)]
pub struct Gate {
    semaphore: Arc<Semaphore>,
}

impl Gate {
    fn new() -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(0)),
        }
    }

    /// Releases every held and future call.
    pub fn open(&self) {
        self.semaphore.close();
    }

    async fn pass(&self) {
        // A closed semaphore fails every acquire immediately.
        let _ = self.semaphore.acquire().await;
    }
}

#[derive(Debug, Default)]
struct RecordingGeneratorInner {
    requests: Mutex<Vec<RecordedRequest>>,
    failure: Option<String>,
    gate: Option<Gate>,
}

/// Mock backend recording every request it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingGenerator {
    inner: Arc<RecordingGeneratorInner>,
}

impl RecordingGenerator {
    /// Creates a backend that accepts every request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend that records, then rejects every request.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(RecordingGeneratorInner {
                failure: Some(message.into()),
                ..Default::default()
            }),
        }
    }

    /// Creates a backend whose calls block until the returned gate opens.
    pub fn gated() -> (Self, Gate) {
        let gate = Gate::new();
        let generator = Self {
            inner: Arc::new(RecordingGeneratorInner {
                gate: Some(gate.clone()),
                ..Default::default()
            }),
        };
        (generator, gate)
    }

    /// Returns the requests received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.inner
            .requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn answer<P>(&self, request: &GenerationRequest<P>) -> Result<GenerationResponse>
    where
        P: Clone + Into<GenerationPayload>,
    {
        let started_at = Timestamp::now();
        let payload: GenerationPayload = request.payload.clone().into();
        let workflow = payload.kind();

        self.inner
            .requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedRequest {
                request_id: request.request_id,
                endpoint: request.endpoint.clone(),
                payload,
            });

        if let Some(gate) = &self.inner.gate {
            gate.pass().await;
        }

        if let Some(message) = &self.inner.failure {
            return Err(Error::invocation().with_message(message));
        }

        Ok(GenerationResponse::new(request.request_id, workflow, started_at)
            .with_output(format!("mock://{}/{}", request.endpoint, request.request_id)))
    }
}

#[async_trait::async_trait]
impl GenerationProvider for RecordingGenerator {
    async fn image_from_stickers(
        &self,
        request: &GenerationRequest<StickersToImage>,
    ) -> Result<GenerationResponse> {
        self.answer(request).await
    }

    async fn inpaint(&self, request: &GenerationRequest<Inpainting>) -> Result<GenerationResponse> {
        self.answer(request).await
    }

    async fn change_image(
        &self,
        request: &GenerationRequest<ImageChange>,
    ) -> Result<GenerationResponse> {
        self.answer(request).await
    }

    async fn transfer_style(
        &self,
        request: &GenerationRequest<StyleTransfer>,
    ) -> Result<GenerationResponse> {
        self.answer(request).await
    }
}

#[cfg(test)]
mod tests {
    use easel_core::ErrorKind;
    use easel_core::generation::{StickerPrompt, WorkflowKind};

    use super::*;

    fn stickers_request() -> GenerationRequest<StickersToImage> {
        GenerationRequest::new(
            "image-create",
            StickersToImage {
                prompts: vec![StickerPrompt::from(&easel_core::canvas::StickyNote::new(
                    "1", "a cat",
                ))],
            },
        )
    }

    #[tokio::test]
    async fn test_records_requests() {
        let generator = RecordingGenerator::new();
        let request = stickers_request();

        let response = generator.image_from_stickers(&request).await.unwrap();
        assert_eq!(response.request_id, request.request_id);
        assert_eq!(response.workflow, WorkflowKind::StickersToImage);

        let recorded = generator.requests();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].endpoint, "image-create");
        assert_eq!(recorded[0].payload.kind(), WorkflowKind::StickersToImage);
    }

    #[tokio::test]
    async fn test_failing_generator_still_records() {
        let generator = RecordingGenerator::failing("endpoint is down");
        let error = generator
            .image_from_stickers(&stickers_request())
            .await
            .unwrap_err();

        assert_eq!(error.kind, ErrorKind::Invocation);
        assert_eq!(generator.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_open_gate_passes_immediately() {
        let (generator, gate) = RecordingGenerator::gated();
        gate.open();
        assert!(generator.image_from_stickers(&stickers_request()).await.is_ok());
    }
}
