//! Subcommand implementations.

use anyhow::Context;
use easel_core::board::BoardService;
use easel_core::canvas::SelectionCounts;
use easel_core::endpoint::{EndpointCatalog, RunPeriod};
use easel_core::generation::GenerationService;
use easel_workflow::{DispatchReport, Dispatcher, RoleBindings, WorkflowMatch, classify, extract};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::TRACING_TARGET_COMMAND;
use crate::board::FileBoard;
use crate::config::{Cli, Command};
use crate::dry_run::DryRunGenerator;
use crate::signal::cancel_on_ctrl_c;

/// Runs the selected subcommand.
pub async fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Generate => generate(&cli).await,
        Command::Classify => classify_selection(&cli).await,
        Command::Endpoints => print_endpoints(),
    }
}

fn board(cli: &Cli) -> BoardService {
    BoardService::new(FileBoard::new(&cli.selection.selection_path))
}

/// One dispatch cycle through the dry-run backend.
async fn generate(cli: &Cli) -> anyhow::Result<()> {
    let generation = GenerationService::new(DryRunGenerator::stdout())
        .with_endpoints(cli.endpoints.clone())
        .with_config(&cli.generation);
    let dispatcher = Dispatcher::new(board(cli), generation);

    let cancel = CancellationToken::new();
    let listener = cancel_on_ctrl_c(cancel.clone());
    let report = dispatcher.trigger(&cancel).await;
    listener.abort();

    tracing::info!(target: TRACING_TARGET_COMMAND, report = %report, "Generate finished");

    match report {
        DispatchReport::Failed { .. } => anyhow::bail!("{report}"),
        _ => {
            eprintln!("{report}");
            Ok(())
        }
    }
}

/// What `classify` prints.
#[derive(Debug, Serialize)]
struct Classification {
    counts: SelectionCounts,
    #[serde(flatten)]
    result: WorkflowMatch,
    #[serde(skip_serializing_if = "Option::is_none")]
    bindings: Option<RoleBindings>,
}

async fn classify_selection(cli: &Cli) -> anyhow::Result<()> {
    let selection = board(cli)
        .read_selection()
        .await
        .context("failed to read the board selection")?;

    let result = classify(&selection);
    let bindings = match result.workflow() {
        Some(kind) => {
            let extraction = extract(kind, &selection)
                .with_context(|| format!("selection matches {kind} but is malformed"))?;
            Some(extraction.bindings)
        }
        None => None,
    };

    let classification = Classification {
        counts: selection.counts(),
        result,
        bindings,
    };
    let json = serde_json::to_string_pretty(&classification)
        .context("failed to serialize the classification")?;
    println!("{json}");

    Ok(())
}

fn print_endpoints() -> anyhow::Result<()> {
    let catalog = EndpointCatalog::default();

    for endpoint in catalog.iter() {
        println!("{endpoint}");
        if !endpoint.instance_prompt().is_empty() {
            println!("    instance prompt: {}", endpoint.instance_prompt());
        }
        if !endpoint.is_managed() {
            let periods: Vec<_> = RunPeriod::CHOICES
                .iter()
                .map(|period| period.label(endpoint.hourly_price))
                .collect();
            println!("    run periods: {}", periods.join(", "));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use easel_core::generation::WorkflowKind;

    use super::*;

    #[test]
    fn classification_output_shape() {
        let classification = Classification {
            counts: SelectionCounts {
                images: 2,
                connectors: 1,
                total: 3,
                ..Default::default()
            },
            result: WorkflowMatch::Matched(WorkflowKind::StyleTransfer),
            bindings: None,
        };

        let json = serde_json::to_value(&classification).unwrap();
        assert_eq!(json["match"], "matched");
        assert_eq!(json["workflow"], "style_transfer");
        assert_eq!(json["counts"]["images"], 2);
        assert!(json.get("bindings").is_none());
    }

    #[test]
    fn no_match_output_shape() {
        let classification = Classification {
            counts: SelectionCounts::default(),
            result: WorkflowMatch::NoMatch,
            bindings: None,
        };

        let json = serde_json::to_value(&classification).unwrap();
        assert_eq!(json["match"], "no_match");
    }
}
