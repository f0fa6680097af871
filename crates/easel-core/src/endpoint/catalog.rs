//! Model endpoints and the default catalog.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, IntoStaticStr};

use super::{EndpointAck, EndpointState, TRACING_TARGET};
use crate::{Error, Result};

/// Where a model endpoint is hosted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(AsRefStr, Display, IntoStaticStr)]
pub enum EndpointSource {
    /// Managed foundation-model service; always available.
    Bedrock,
    /// Dedicated instance endpoint billed per hour.
    Sagemaker,
}

/// How long a dedicated endpoint should be kept running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPeriod {
    Hours(u32),
    Continuous,
}

impl RunPeriod {
    /// The choices offered to the user.
    pub const CHOICES: [Self; 3] = [Self::Hours(1), Self::Hours(2), Self::Continuous];

    /// Estimated cost for the period. A continuous run is priced per hour.
    pub fn estimated_cost(&self, hourly_price: f64) -> f64 {
        match self {
            Self::Hours(hours) => hourly_price * f64::from(*hours),
            Self::Continuous => hourly_price,
        }
    }

    /// Human-readable label including the cost.
    pub fn label(&self, hourly_price: f64) -> String {
        let cost = self.estimated_cost(hourly_price);
        match self {
            Self::Hours(hours) => format!("{hours} hour (${cost:.2})"),
            Self::Continuous => format!("Continuous (${cost:.2} p/h)"),
        }
    }
}

/// A model endpoint serving generation requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEndpoint {
    pub name: String,
    pub task: String,
    pub source: EndpointSource,
    pub instance_type: String,
    /// Hourly price in dollars.
    pub hourly_price: f64,
    #[serde(default)]
    instance_prompt: String,
    #[serde(default)]
    state: EndpointState,
}

impl ModelEndpoint {
    /// Creates an endpoint. Managed endpoints start `On`, dedicated ones `Off`.
    pub fn new(
        name: impl Into<String>,
        source: EndpointSource,
        instance_type: impl Into<String>,
        hourly_price: f64,
    ) -> Self {
        let state = match source {
            EndpointSource::Bedrock => EndpointState::On,
            EndpointSource::Sagemaker => EndpointState::Off,
        };

        Self {
            name: name.into(),
            task: "Text to Image".to_owned(),
            source,
            instance_type: instance_type.into(),
            hourly_price,
            instance_prompt: String::new(),
            state,
        }
    }

    /// Sets the instance prompt appended to every generation on this endpoint.
    pub fn with_instance_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.instance_prompt = prompt.into();
        self
    }

    pub fn instance_prompt(&self) -> &str {
        &self.instance_prompt
    }

    pub fn set_instance_prompt(&mut self, prompt: impl Into<String>) {
        self.instance_prompt = prompt.into();
    }

    pub fn state(&self) -> EndpointState {
        self.state
    }

    /// Returns true for endpoints whose lifecycle is not user-controlled.
    pub fn is_managed(&self) -> bool {
        self.source == EndpointSource::Bedrock
    }

    /// Returns true once the backend has confirmed the endpoint is serving.
    pub fn is_running(&self) -> bool {
        self.state == EndpointState::On
    }

    /// Asks for the endpoint to be started. Valid only from `Off`.
    pub fn request_start(&mut self) -> Result<()> {
        self.ensure_user_controlled("start")?;
        if self.state != EndpointState::Off {
            return Err(self.invalid("start"));
        }

        self.transition(EndpointState::Starting);
        Ok(())
    }

    /// Applies the backend's answer to a pending start.
    pub fn acknowledge(&mut self, ack: EndpointAck) -> Result<EndpointState> {
        if self.state != EndpointState::Starting {
            return Err(self.invalid("acknowledge"));
        }

        match ack {
            EndpointAck::Ready => self.transition(EndpointState::On),
            EndpointAck::Failed { reason } => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    endpoint = %self.name,
                    reason = %reason,
                    "Endpoint failed to start"
                );
                self.transition(EndpointState::Off);
            }
        }

        Ok(self.state)
    }

    /// Stops a running or starting endpoint.
    pub fn request_stop(&mut self) -> Result<()> {
        self.ensure_user_controlled("stop")?;
        if self.state == EndpointState::Off {
            return Err(self.invalid("stop"));
        }

        self.transition(EndpointState::Off);
        Ok(())
    }

    /// Flips the endpoint on or off. A pending start must be acknowledged
    /// before the endpoint can be toggled again.
    pub fn toggle(&mut self) -> Result<EndpointState> {
        match self.state {
            EndpointState::Off => self.request_start()?,
            EndpointState::On => self.request_stop()?,
            EndpointState::Starting => return Err(self.invalid("toggle")),
        }
        Ok(self.state)
    }

    /// Estimated cost of running this endpoint for the period.
    pub fn run_cost(&self, period: RunPeriod) -> f64 {
        if self.is_managed() {
            return 0.0;
        }
        period.estimated_cost(self.hourly_price)
    }

    fn ensure_user_controlled(&self, action: &str) -> Result<()> {
        if self.is_managed() {
            return Err(Error::invalid_transition()
                .with_message(format!("cannot {action} managed endpoint {}", self.name)));
        }
        Ok(())
    }

    fn invalid(&self, action: &str) -> Error {
        Error::invalid_transition().with_message(format!(
            "cannot {action} endpoint {} while {}",
            self.name, self.state
        ))
    }

    fn transition(&mut self, next: EndpointState) {
        tracing::info!(
            target: TRACING_TARGET,
            endpoint = %self.name,
            from = %self.state,
            to = %next,
            "Endpoint state changed"
        );
        self.state = next;
    }
}

impl fmt::Display for ModelEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.name, self.source, self.task)?;
        if !self.is_managed() {
            write!(f, " {} ${:.2} p/h", self.instance_type, self.hourly_price)?;
        }
        write!(f, " ({})", self.state)
    }
}

/// The set of endpoints a user can generate with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EndpointCatalog {
    endpoints: Vec<ModelEndpoint>,
}

impl Default for EndpointCatalog {
    fn default() -> Self {
        let identity_prompt = "style of Miro Corporate Identity";

        Self::new(vec![
            ModelEndpoint::new(
                "Stable Diffusion XL v0.8",
                EndpointSource::Bedrock,
                "ml.g5.8xlarge",
                3.62,
            ),
            ModelEndpoint::new(
                "Miro Corporate Identity (Quick)",
                EndpointSource::Sagemaker,
                "ml.g5.8xlarge",
                3.62,
            )
            .with_instance_prompt(identity_prompt),
            ModelEndpoint::new(
                "Miro Corporate Identity (Slow)",
                EndpointSource::Sagemaker,
                "ml.r5.4xlarge",
                1.35,
            )
            .with_instance_prompt(identity_prompt),
            ModelEndpoint::new(
                "Voxel Style",
                EndpointSource::Sagemaker,
                "ml.p3.2xlarge",
                4.13,
            ),
        ])
    }
}

impl EndpointCatalog {
    pub fn new(endpoints: Vec<ModelEndpoint>) -> Self {
        Self { endpoints }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ModelEndpoint> {
        self.endpoints.iter()
    }

    pub fn get(&self, name: &str) -> Option<&ModelEndpoint> {
        self.endpoints.iter().find(|endpoint| endpoint.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ModelEndpoint> {
        self.endpoints
            .iter_mut()
            .find(|endpoint| endpoint.name == name)
    }

    /// Endpoints currently serving requests.
    pub fn running(&self) -> impl Iterator<Item = &ModelEndpoint> {
        self.endpoints.iter().filter(|endpoint| endpoint.is_running())
    }
}
