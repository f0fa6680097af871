//! Generation backend configuration.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

use super::WorkflowKind;
use crate::{Error, Result};

/// Default timeout for a generation call: 30 seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Backend endpoint name for each workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct EndpointNames {
    /// Endpoint serving stickers-to-image generation
    #[cfg_attr(
        feature = "config",
        arg(long, env = "IMAGE_CREATE_ENDPOINT", default_value = "image-create")
    )]
    #[serde(default = "default_image_create")]
    pub image_create: String,

    /// Endpoint serving inpainting
    #[cfg_attr(
        feature = "config",
        arg(long, env = "INPAINT_ENDPOINT", default_value = "image-inpaint")
    )]
    #[serde(default = "default_inpaint")]
    pub inpaint: String,

    /// Endpoint serving image change from image & sticker
    #[cfg_attr(
        feature = "config",
        arg(long, env = "MODIFY_ENDPOINT", default_value = "image-modify")
    )]
    #[serde(default = "default_modify")]
    pub modify: String,

    /// Endpoint serving style transfer
    #[cfg_attr(
        feature = "config",
        arg(long, env = "STYLE_TRANSFER_ENDPOINT", default_value = "style-transfer")
    )]
    #[serde(default = "default_style_transfer")]
    pub style_transfer: String,
}

fn default_image_create() -> String {
    "image-create".to_owned()
}

fn default_inpaint() -> String {
    "image-inpaint".to_owned()
}

fn default_modify() -> String {
    "image-modify".to_owned()
}

fn default_style_transfer() -> String {
    "style-transfer".to_owned()
}

impl Default for EndpointNames {
    fn default() -> Self {
        Self {
            image_create: default_image_create(),
            inpaint: default_inpaint(),
            modify: default_modify(),
            style_transfer: default_style_transfer(),
        }
    }
}

impl EndpointNames {
    /// Returns the endpoint name serving the given workflow.
    pub fn endpoint_for(&self, kind: WorkflowKind) -> &str {
        match kind {
            WorkflowKind::StickersToImage => &self.image_create,
            WorkflowKind::Inpainting => &self.inpaint,
            WorkflowKind::ImageChange => &self.modify,
            WorkflowKind::StyleTransfer => &self.style_transfer,
        }
    }

    /// Rejects blank endpoint names.
    pub fn validate(&self) -> Result<()> {
        for kind in WorkflowKind::PRIORITY {
            if self.endpoint_for(kind).trim().is_empty() {
                return Err(Error::configuration()
                    .with_message(format!("endpoint name for {kind} is empty")));
            }
        }
        Ok(())
    }
}

/// Timeout policy for generation calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct GenerationConfig {
    /// Generation call timeout in seconds (0 uses the default)
    #[cfg_attr(
        feature = "config",
        arg(long = "generation-timeout", env = "GENERATION_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)
    )]
    #[serde(default = "default_timeout_secs")]
    pub generation_timeout: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            generation_timeout: default_timeout_secs(),
        }
    }
}

impl GenerationConfig {
    /// Create a new configuration with the specified timeout.
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            generation_timeout: timeout_secs,
        }
    }

    /// Returns the effective timeout, using the default if zero.
    pub fn effective_timeout(&self) -> Duration {
        if self.generation_timeout == 0 {
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        } else {
            Duration::from_secs(self.generation_timeout)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_endpoint_lookup() {
        let names = EndpointNames::default();
        assert_eq!(names.endpoint_for(WorkflowKind::StickersToImage), "image-create");
        assert_eq!(names.endpoint_for(WorkflowKind::Inpainting), "image-inpaint");
        assert_eq!(names.endpoint_for(WorkflowKind::ImageChange), "image-modify");
        assert_eq!(names.endpoint_for(WorkflowKind::StyleTransfer), "style-transfer");
        assert!(names.validate().is_ok());
    }

    #[test]
    fn test_blank_endpoint_is_rejected() {
        let names = EndpointNames {
            modify: "  ".to_owned(),
            ..EndpointNames::default()
        };
        let error = names.validate().unwrap_err();
        assert_eq!(error.kind, ErrorKind::Configuration);
        assert!(error.to_string().contains("image_change"));
    }

    #[test]
    fn test_effective_timeout_uses_default_when_zero() {
        assert_eq!(
            GenerationConfig::new(0).effective_timeout(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
        assert_eq!(
            GenerationConfig::new(5).effective_timeout(),
            Duration::from_secs(5)
        );
    }
}
