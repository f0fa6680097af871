//! Generation backend that prints requests instead of sending them.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use easel_core::generation::{
    GenerationProvider, GenerationRequest, GenerationResponse, ImageChange, Inpainting,
    StickersToImage, StyleTransfer, WorkflowKind,
};
use easel_core::{Error, Result};
use jiff::Timestamp;
use serde::Serialize;

use crate::TRACING_TARGET_COMMAND;

/// Writes every generation request as one JSON line and accepts it.
#[derive(Debug)]
pub struct DryRunGenerator<W = io::Stdout> {
    writer: Arc<Mutex<W>>,
}

/// A printed request, tagged with its workflow.
#[derive(Serialize)]
struct PrintedRequest<'a, P> {
    workflow: WorkflowKind,
    #[serde(flatten)]
    request: &'a GenerationRequest<P>,
}

impl<W> Clone for DryRunGenerator<W> {
    fn clone(&self) -> Self {
        Self {
            writer: Arc::clone(&self.writer),
        }
    }
}

impl DryRunGenerator {
    /// Creates a generator printing to stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> DryRunGenerator<W> {
    /// Creates a generator writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Arc::new(Mutex::new(writer)),
        }
    }

    fn emit<P: Serialize>(
        &self,
        workflow: WorkflowKind,
        request: &GenerationRequest<P>,
    ) -> Result<GenerationResponse> {
        let started_at = Timestamp::now();
        let line = serde_json::to_string(&PrintedRequest { workflow, request })?;

        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(writer, "{line}")
            .and_then(|()| writer.flush())
            .map_err(|err| {
                Error::invocation()
                    .with_message("failed to print generation request")
                    .with_source(err)
            })?;

        tracing::debug!(
            target: TRACING_TARGET_COMMAND,
            request_id = %request.request_id,
            endpoint = %request.endpoint,
            "Generation request printed"
        );

        Ok(GenerationResponse::new(request.request_id, workflow, started_at))
    }
}

#[async_trait::async_trait]
impl<W: Write + Send + 'static> GenerationProvider for DryRunGenerator<W> {
    async fn image_from_stickers(
        &self,
        request: &GenerationRequest<StickersToImage>,
    ) -> Result<GenerationResponse> {
        self.emit(WorkflowKind::StickersToImage, request)
    }

    async fn inpaint(&self, request: &GenerationRequest<Inpainting>) -> Result<GenerationResponse> {
        self.emit(WorkflowKind::Inpainting, request)
    }

    async fn change_image(
        &self,
        request: &GenerationRequest<ImageChange>,
    ) -> Result<GenerationResponse> {
        self.emit(WorkflowKind::ImageChange, request)
    }

    async fn transfer_style(
        &self,
        request: &GenerationRequest<StyleTransfer>,
    ) -> Result<GenerationResponse> {
        self.emit(WorkflowKind::StyleTransfer, request)
    }
}
