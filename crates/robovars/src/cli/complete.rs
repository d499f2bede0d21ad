// cli/complete.rs — `robovars complete` subcommand
//
// Runs variable completion for one cursor position of a file on disk and
// prints the candidates and any unresolved variable imports.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tower_lsp::lsp_types::{CompletionItem, Diagnostic};

use crate::config::VariablesConfig;
use crate::variables::{complete_with_diagnostics, CompletionOutcome};
use crate::workspace::Workspace;

/// Parsed arguments for the `complete` subcommand.
#[derive(Debug, PartialEq)]
pub struct CompleteArgs {
    pub path: PathBuf,
    /// Zero-based line
    pub line: u32,
    /// Zero-based UTF-16 column
    pub col: u32,
    pub config: Option<PathBuf>,
    pub timeout: Option<Duration>,
    pub json: bool,
}

/// Parse `complete` arguments from the remaining CLI args.
///
/// Expected usage:
/// `robovars complete <file> <line> <column> [--config <json>] [--timeout-ms <n>] [--json]`
/// with one-based line and column.
pub fn parse_args(args: &mut impl Iterator<Item = String>) -> Result<CompleteArgs, String> {
    let mut positional: Vec<String> = Vec::new();
    let mut config: Option<PathBuf> = None;
    let mut timeout: Option<Duration> = None;
    let mut json = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| "--config requires a file path".to_string())?;
                config = Some(PathBuf::from(path));
            }
            "--timeout-ms" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--timeout-ms requires a number".to_string())?;
                let ms: u64 = value
                    .parse()
                    .map_err(|_| format!("Invalid timeout '{}'", value))?;
                timeout = Some(Duration::from_millis(ms));
            }
            other if other.starts_with("--") => {
                return Err(format!("Unknown flag: '{}'", other));
            }
            _ => positional.push(arg),
        }
    }

    let [path, line, col]: [String; 3] = positional.try_into().map_err(|given: Vec<String>| {
        format!(
            "Expected <file> <line> <column>, got {} positional arguments",
            given.len()
        )
    })?;

    Ok(CompleteArgs {
        path: PathBuf::from(path),
        line: one_based(&line, "line")?,
        col: one_based(&col, "column")?,
        config,
        timeout,
        json,
    })
}

fn one_based(value: &str, what: &str) -> Result<u32, String> {
    match value.parse::<u32>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("Invalid {} '{}': expected a number starting at 1", what, value)),
    }
}

/// Run completion on a blocking task. When the timeout expires the request is
/// cancelled and an error is returned.
pub async fn run_complete(args: &CompleteArgs) -> anyhow::Result<CompletionOutcome> {
    let config = match &args.config {
        Some(path) => VariablesConfig::from_file(path)?,
        None => VariablesConfig::default(),
    };
    let path = if args.path.is_absolute() {
        args.path.clone()
    } else {
        std::env::current_dir()
            .context("Unable to determine the current directory")?
            .join(&args.path)
    };
    let workspace = Arc::new(Workspace::new(config));
    let cancel = CancellationToken::new();

    let task = {
        let workspace = workspace.clone();
        let cancel = cancel.clone();
        let (line, col) = (args.line, args.col);
        tokio::task::spawn_blocking(move || {
            let ctx = workspace
                .completion_context(&path, line, col, cancel)
                .ok_or_else(|| anyhow!("Unable to read {}", path.display()))?;
            complete_with_diagnostics(&ctx).map_err(anyhow::Error::from)
        })
    };

    let watchdog = args.timeout.map(|limit| {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(limit).await;
            log::info!("Completion timed out after {:?}", limit);
            cancel.cancel();
        })
    });

    let result = task.await.context("Completion task failed")?;
    if let Some(watchdog) = watchdog {
        watchdog.abort();
    }
    result.with_context(|| format!("Completion of {} did not finish", args.path.display()))
}

#[derive(Serialize)]
struct JsonOutput {
    items: Vec<CompletionItem>,
    diagnostics: Vec<Diagnostic>,
}

/// Print the outcome in human-readable format.
pub fn print_results(outcome: &CompletionOutcome) {
    for candidate in &outcome.candidates {
        if candidate.documentation.is_empty() {
            println!("{}", candidate.label);
        } else {
            println!("{:<30} {}", candidate.label, candidate.documentation.replace('\n', "\\n"));
        }
    }
    for unresolved in &outcome.unresolved_imports {
        let diagnostic = unresolved.to_diagnostic();
        eprintln!(
            "warning: {}:{}:{}: {}",
            unresolved.path.display(),
            unresolved.start_line + 1,
            unresolved.start_col + 1,
            diagnostic.message.replace('\n', " ").trim_end()
        );
    }
}

/// Print the outcome as JSON completion items and diagnostics.
pub fn print_results_json(outcome: &CompletionOutcome) -> anyhow::Result<()> {
    let output = JsonOutput {
        items: outcome
            .candidates
            .iter()
            .map(|c| c.to_completion_item())
            .collect(),
        diagnostics: outcome
            .unresolved_imports
            .iter()
            .map(|u| u.to_diagnostic())
            .collect(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
