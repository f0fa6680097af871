//! Generation backend abstractions.
//!
//! The inference backend is an external collaborator exposing one operation
//! per workflow. [`GenerationProvider`] is that interface; how requests travel
//! to the backend is up to the implementation. [`GenerationService`] adds
//! endpoint routing, a timeout and structured logging on top of any provider.

mod config;
mod request;
mod response;
mod service;

pub use config::{DEFAULT_TIMEOUT_SECS, EndpointNames, GenerationConfig};
pub use request::{
    GenerationPayload, GenerationRequest, ImageChange, ImageRef, Inpainting, Region,
    StickerPrompt, StickersToImage, StyleTransfer, WorkflowKind,
};
pub use response::GenerationResponse;
pub use service::GenerationService;

use crate::Result;

/// Tracing target for generation operations.
pub const TRACING_TARGET: &str = "easel_core::generation";

/// Core trait for generation backend operations.
///
/// Implementations report failures as errors; retry policy, if any, belongs
/// to the implementation and not to the caller.
#[async_trait::async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Generates an image from a group of sticky-note prompts.
    async fn image_from_stickers(
        &self,
        request: &GenerationRequest<StickersToImage>,
    ) -> Result<GenerationResponse>;

    /// Repaints the region of an image delimited by a shape.
    async fn inpaint(&self, request: &GenerationRequest<Inpainting>)
    -> Result<GenerationResponse>;

    /// Changes an image following a sticky-note instruction.
    async fn change_image(
        &self,
        request: &GenerationRequest<ImageChange>,
    ) -> Result<GenerationResponse>;

    /// Renders the content image in the style of the style image.
    async fn transfer_style(
        &self,
        request: &GenerationRequest<StyleTransfer>,
    ) -> Result<GenerationResponse>;
}
