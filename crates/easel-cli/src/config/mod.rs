//! CLI configuration management.
//!
//! This module defines the complete CLI configuration hierarchy:
//!
//! ```text
//! Cli
//! ├── command: Command              # generate, classify or endpoints
//! ├── selection: SelectionConfig    # Board snapshot file
//! ├── endpoints: EndpointNames      # Backend endpoint per workflow
//! └── generation: GenerationConfig  # Generation call timeout
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.
//!
//! # Example
//!
//! ```bash
//! # Dispatch the selection stored in board.json
//! easel-cli --selection board.json generate
//!
//! # Or via environment variables
//! SELECTION_PATH=board.json INPAINT_ENDPOINT=sdxl-inpaint easel-cli generate
//! ```

mod selection;

use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};
use easel_core::generation::{EndpointNames, GenerationConfig};
use serde::{Deserialize, Serialize};
pub use selection::SelectionConfig;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "easel")]
#[command(about = "Turns a board selection into a generation request")]
#[command(version)]
pub struct Cli {
    /// Action to perform.
    #[command(subcommand)]
    pub command: Command,

    /// Board snapshot configuration.
    #[clap(flatten)]
    pub selection: SelectionConfig,

    /// Backend endpoint names.
    #[clap(flatten)]
    pub endpoints: EndpointNames,

    /// Generation call policy.
    #[clap(flatten)]
    pub generation: GenerationConfig,
}

/// Available actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Runs one dispatch cycle over the selection, printing each generation
    /// request as JSON instead of sending it
    Generate,
    /// Classifies the selection and prints the role bindings, without
    /// invoking anything
    Classify,
    /// Prints the model endpoint catalog
    Endpoints,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// The .env file is loaded before clap parses arguments so that its values
    /// act as environment defaults.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Logs build information at debug level.
    fn log_build_info() {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.endpoints
            .validate()
            .context("invalid endpoint configuration")?;
        Ok(())
    }

    /// Logs configuration at debug level.
    pub fn log(&self) {
        Self::log_build_info();

        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            command = ?self.command,
            selection_path = %self.selection.selection_path.display(),
            image_create = %self.endpoints.image_create,
            inpaint = %self.endpoints.inpaint,
            modify = %self.endpoints.modify,
            style_transfer = %self.endpoints.style_transfer,
            generation_timeout_secs = self.generation.effective_timeout().as_secs(),
            "Configuration loaded"
        );
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::time::Duration;

    use clap::{CommandFactory, FromArgMatches};

    use super::*;

    /// Parses `args` with every environment fallback removed, so the
    /// caller's shell cannot leak into the result.
    fn parse<const N: usize>(args: [&str; N]) -> Result<Cli, clap::Error> {
        let matches = Cli::command()
            .mut_args(|arg| arg.env(None::<&'static str>))
            .try_get_matches_from(args)?;
        Cli::from_arg_matches(&matches)
    }

    #[test]
    fn parse_defaults() {
        let cli = parse(["easel", "generate"]).unwrap();

        assert_eq!(cli.command, Command::Generate);
        assert_eq!(cli.endpoints, EndpointNames::default());
        assert_eq!(cli.generation.effective_timeout(), Duration::from_secs(30));
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn parse_overrides() {
        let cli = parse([
            "easel",
            "--selection",
            "boards/launch.json",
            "--inpaint",
            "sdxl-inpaint",
            "--generation-timeout",
            "5",
            "classify",
        ])
        .unwrap();

        assert_eq!(cli.command, Command::Classify);
        assert_eq!(
            cli.selection.selection_path,
            Path::new("boards/launch.json")
        );
        assert_eq!(cli.endpoints.inpaint, "sdxl-inpaint");
        assert_eq!(cli.generation.effective_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn reject_blank_endpoint() {
        let cli = parse(["easel", "--modify", " ", "generate"]).unwrap();
        assert!(cli.validate().is_err());
    }

    #[test]
    fn require_command() {
        assert!(parse(["easel"]).is_err());
    }
}
