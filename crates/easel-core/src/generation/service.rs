//! Generation service with endpoint routing, timeout and observability.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use jiff::Timestamp;
use uuid::Uuid;

use super::{
    EndpointNames, GenerationConfig, GenerationPayload, GenerationProvider, GenerationRequest,
    GenerationResponse, TRACING_TARGET,
};
use crate::{Error, Result};

/// Generation backend access with observability.
///
/// Routes each payload to the provider operation and endpoint of its workflow,
/// bounds the call with a timeout and normalises failures to
/// [`ErrorKind::Invocation`](crate::ErrorKind::Invocation) or
/// [`ErrorKind::Timeout`](crate::ErrorKind::Timeout). Calls are never retried.
#[derive(Clone)]
pub struct GenerationService {
    provider: Arc<dyn GenerationProvider>,
    endpoints: EndpointNames,
    timeout: Duration,
}

impl fmt::Debug for GenerationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationService")
            .field("endpoints", &self.endpoints)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl GenerationService {
    /// Creates a new service with default endpoints and timeout.
    pub fn new<P>(provider: P) -> Self
    where
        P: GenerationProvider + 'static,
    {
        Self::from_arc(Arc::new(provider))
    }

    /// Creates a service sharing an existing provider.
    pub fn from_arc(provider: Arc<dyn GenerationProvider>) -> Self {
        Self {
            provider,
            endpoints: EndpointNames::default(),
            timeout: GenerationConfig::default().effective_timeout(),
        }
    }

    /// Sets the endpoint names.
    pub fn with_endpoints(mut self, endpoints: EndpointNames) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Applies a timeout configuration.
    pub fn with_config(mut self, config: &GenerationConfig) -> Self {
        self.timeout = config.effective_timeout();
        self
    }

    /// Sets the timeout directly.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the configured endpoint names.
    pub fn endpoints(&self) -> &EndpointNames {
        &self.endpoints
    }

    /// Sends a payload to the backend operation of its workflow.
    pub async fn invoke(&self, payload: GenerationPayload) -> Result<GenerationResponse> {
        let kind = payload.kind();
        let endpoint = self.endpoints.endpoint_for(kind).to_owned();
        let request_id = Uuid::now_v7();
        let started_at = Timestamp::now();

        tracing::debug!(
            target: TRACING_TARGET,
            request_id = %request_id,
            workflow = %kind,
            endpoint = %endpoint,
            timeout_ms = self.timeout.as_millis(),
            "Invoking generation backend"
        );

        let call = self.call(request_id, endpoint.clone(), payload);
        let result = match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(error)) if error.kind.is_invocation_failure() => Err(error),
            Ok(Err(error)) => Err(Error::invocation()
                .with_message(format!("{endpoint} rejected the request"))
                .with_source(error)),
            Err(_) => Err(Error::timeout()
                .with_message(format!("{endpoint} did not answer in time"))),
        };
        let elapsed = Timestamp::now().duration_since(started_at);

        match &result {
            Ok(response) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    request_id = %request_id,
                    response_id = %response.response_id,
                    workflow = %kind,
                    elapsed_ms = elapsed.as_millis(),
                    "Generation request accepted"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    request_id = %request_id,
                    workflow = %kind,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Generation request failed"
                );
            }
        }

        result
    }

    /// Calls the provider operation matching the payload's workflow.
    async fn call(
        &self,
        request_id: Uuid,
        endpoint: String,
        payload: GenerationPayload,
    ) -> Result<GenerationResponse> {
        match payload {
            GenerationPayload::StickersToImage(payload) => {
                let request = GenerationRequest::with_id(request_id, endpoint, payload);
                self.provider.image_from_stickers(&request).await
            }
            GenerationPayload::Inpainting(payload) => {
                let request = GenerationRequest::with_id(request_id, endpoint, payload);
                self.provider.inpaint(&request).await
            }
            GenerationPayload::ImageChange(payload) => {
                let request = GenerationRequest::with_id(request_id, endpoint, payload);
                self.provider.change_image(&request).await
            }
            GenerationPayload::StyleTransfer(payload) => {
                let request = GenerationRequest::with_id(request_id, endpoint, payload);
                self.provider.transfer_style(&request).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::ErrorKind;
    use crate::canvas::{Image, StickyNote};
    use crate::generation::{
        ImageChange, ImageRef, Inpainting, StickerPrompt, StickersToImage, StyleTransfer,
        WorkflowKind,
    };

    /// Records the endpoint of every call; optionally fails or stalls.
    #[derive(Default)]
    struct Backend {
        calls: Mutex<Vec<(WorkflowKind, String)>>,
        fail: bool,
        stall: bool,
    }

    impl Backend {
        async fn answer(&self, kind: WorkflowKind, endpoint: &str) -> Result<GenerationResponse> {
            self.calls.lock().unwrap().push((kind, endpoint.to_owned()));
            if self.stall {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
            if self.fail {
                return Err(Error::invalid_input().with_message("bad prompt"));
            }
            Ok(GenerationResponse::new(
                uuid::Uuid::now_v7(),
                kind,
                Timestamp::now(),
            ))
        }
    }

    #[async_trait::async_trait]
    impl GenerationProvider for Backend {
        async fn image_from_stickers(
            &self,
            request: &GenerationRequest<StickersToImage>,
        ) -> Result<GenerationResponse> {
            self.answer(WorkflowKind::StickersToImage, &request.endpoint)
                .await
        }

        async fn inpaint(
            &self,
            request: &GenerationRequest<Inpainting>,
        ) -> Result<GenerationResponse> {
            self.answer(WorkflowKind::Inpainting, &request.endpoint).await
        }

        async fn change_image(
            &self,
            request: &GenerationRequest<ImageChange>,
        ) -> Result<GenerationResponse> {
            self.answer(WorkflowKind::ImageChange, &request.endpoint).await
        }

        async fn transfer_style(
            &self,
            request: &GenerationRequest<StyleTransfer>,
        ) -> Result<GenerationResponse> {
            self.answer(WorkflowKind::StyleTransfer, &request.endpoint)
                .await
        }
    }

    fn image_change() -> GenerationPayload {
        ImageChange {
            source_image: ImageRef::from(&Image::new("1", "https://cdn.example.com/1.png")),
            prompt: StickerPrompt::from(&StickyNote::new("2", "turn into line art")),
        }
        .into()
    }

    #[tokio::test]
    async fn test_routes_to_workflow_endpoint() {
        let backend = Arc::new(Backend::default());
        let service = GenerationService::from_arc(backend.clone());

        let response = service.invoke(image_change()).await.unwrap();
        assert_eq!(response.workflow, WorkflowKind::ImageChange);

        let style = StyleTransfer {
            source_style: ImageRef::from(&Image::new("1", "a")),
            target_content: ImageRef::from(&Image::new("2", "b")),
        };
        service.invoke(style.into()).await.unwrap();

        let calls = backend.calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            [
                (WorkflowKind::ImageChange, "image-modify".to_owned()),
                (WorkflowKind::StyleTransfer, "style-transfer".to_owned()),
            ]
        );
    }

    #[tokio::test]
    async fn test_backend_failure_is_invocation_error() {
        let service = GenerationService::new(Backend {
            fail: true,
            ..Backend::default()
        });

        let error = service.invoke(image_change()).await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::Invocation);
        assert!(error.source.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_backend_times_out() {
        let service = GenerationService::new(Backend {
            stall: true,
            ..Backend::default()
        })
        .with_timeout(Duration::from_secs(2));

        let error = service.invoke(image_change()).await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::Timeout);
    }
}
