//! Generation request and payload types.
//!
//! Each workflow has its own payload type holding exactly the role-bound data
//! its backend call needs. Connectors never appear in a payload; they only
//! decide which object plays which role.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};
use uuid::Uuid;

use crate::canvas::{Geometry, Image, ObjectId, Shape, ShapeKind, StickyColor, StickyNote};

/// The four supported generation use-cases, in classification priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(AsRefStr, Display, EnumIter, EnumString, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WorkflowKind {
    /// A group of sticky notes becomes a text-to-image prompt.
    StickersToImage,
    /// An image, a region shape, a sticky note and a connector.
    Inpainting,
    /// An image and a sticky note joined by a connector.
    ImageChange,
    /// Two images joined by a connector.
    StyleTransfer,
}

impl WorkflowKind {
    /// All workflows, highest classification priority first.
    pub const PRIORITY: [Self; 4] = [
        Self::StickersToImage,
        Self::Inpainting,
        Self::ImageChange,
        Self::StyleTransfer,
    ];

    /// Returns a human-readable description of the workflow.
    pub const fn description(&self) -> &'static str {
        match self {
            Self::StickersToImage => "image generation from stickers",
            Self::Inpainting => "image inpainting",
            Self::ImageChange => "image change from image & sticker",
            Self::StyleTransfer => "image style transfer",
        }
    }
}

/// Reference to a selected image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub id: ObjectId,
    pub url: String,
}

impl From<&Image> for ImageRef {
    fn from(image: &Image) -> Self {
        Self {
            id: image.id.clone(),
            url: image.url.clone(),
        }
    }
}

/// Prompt text taken from a sticky note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StickerPrompt {
    pub sticker: ObjectId,
    pub text: String,
    pub color: StickyColor,
}

impl From<&StickyNote> for StickerPrompt {
    fn from(note: &StickyNote) -> Self {
        Self {
            sticker: note.id.clone(),
            text: note.content.clone(),
            color: note.color,
        }
    }
}

/// The masked area of an inpainting request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub shape_id: ObjectId,
    pub shape: ShapeKind,
    pub geometry: Geometry,
}

impl From<&Shape> for Region {
    fn from(shape: &Shape) -> Self {
        Self {
            shape_id: shape.id.clone(),
            shape: shape.shape,
            geometry: shape.geometry,
        }
    }
}

/// Payload of the stickers-to-image workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StickersToImage {
    /// Sticky-note prompts, in selection order.
    pub prompts: Vec<StickerPrompt>,
}

impl StickersToImage {
    /// Returns the prompt texts.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.prompts.iter().map(|prompt| prompt.text.as_str())
    }
}

/// Payload of the inpainting workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inpainting {
    pub source_image: ImageRef,
    pub region: Region,
    pub prompt: StickerPrompt,
}

/// Payload of the image-change workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageChange {
    pub source_image: ImageRef,
    pub prompt: StickerPrompt,
}

/// Payload of the style-transfer workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleTransfer {
    /// Image at the connector's start; provides the style.
    pub source_style: ImageRef,
    /// Image at the connector's end; provides the content.
    pub target_content: ImageRef,
}

/// Any workflow payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "workflow", rename_all = "snake_case")]
pub enum GenerationPayload {
    StickersToImage(StickersToImage),
    Inpainting(Inpainting),
    ImageChange(ImageChange),
    StyleTransfer(StyleTransfer),
}

impl GenerationPayload {
    /// Returns the workflow this payload belongs to.
    pub fn kind(&self) -> WorkflowKind {
        match self {
            Self::StickersToImage(_) => WorkflowKind::StickersToImage,
            Self::Inpainting(_) => WorkflowKind::Inpainting,
            Self::ImageChange(_) => WorkflowKind::ImageChange,
            Self::StyleTransfer(_) => WorkflowKind::StyleTransfer,
        }
    }
}

impl From<StickersToImage> for GenerationPayload {
    fn from(payload: StickersToImage) -> Self {
        Self::StickersToImage(payload)
    }
}

impl From<Inpainting> for GenerationPayload {
    fn from(payload: Inpainting) -> Self {
        Self::Inpainting(payload)
    }
}

impl From<ImageChange> for GenerationPayload {
    fn from(payload: ImageChange) -> Self {
        Self::ImageChange(payload)
    }
}

impl From<StyleTransfer> for GenerationPayload {
    fn from(payload: StyleTransfer) -> Self {
        Self::StyleTransfer(payload)
    }
}

/// A request to one backend endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest<P> {
    /// Unique identifier for this request.
    pub request_id: Uuid,
    /// Name of the backend endpoint serving this workflow.
    pub endpoint: String,
    /// Workflow-specific payload.
    pub payload: P,
}

impl<P> GenerationRequest<P> {
    /// Creates a new request with a fresh identifier.
    pub fn new(endpoint: impl Into<String>, payload: P) -> Self {
        Self::with_id(Uuid::now_v7(), endpoint, payload)
    }

    /// Creates a new request with a caller-chosen identifier.
    pub fn with_id(request_id: Uuid, endpoint: impl Into<String>, payload: P) -> Self {
        Self {
            request_id,
            endpoint: endpoint.into(),
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_priority_matches_declaration_order() {
        let declared: Vec<_> = WorkflowKind::iter().collect();
        assert_eq!(declared, WorkflowKind::PRIORITY);
    }

    #[test]
    fn test_payload_serializes_with_workflow_tag() {
        let payload = GenerationPayload::from(StickersToImage {
            prompts: vec![StickerPrompt::from(&StickyNote::new("1", "a cat"))],
        });

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["workflow"], "stickers_to_image");
        assert_eq!(json["prompts"][0]["text"], "a cat");
        assert_eq!(json["prompts"][0]["color"], "yellow");
        assert_eq!(payload.kind(), WorkflowKind::StickersToImage);
    }

    #[test]
    fn test_workflow_kind_names() {
        assert_eq!(WorkflowKind::StyleTransfer.to_string(), "style_transfer");
        assert_eq!(
            WorkflowKind::ImageChange.description(),
            "image change from image & sticker"
        );
    }
}
