use crate::api::ApiClient;
use crate::model::{ClientConfig, Priority, Submission};
use crate::orchestrator::{INVALID_IDS_MSG, MISSING_STATUS_ID_MSG};
use crate::parse::parse_ids;
use anyhow::Result;
use clap::Parser;
use std::io::Write;
use std::time::Duration;
use tokio::sync::mpsc;

/// Output line routing for stdout/stderr writer.
enum OutputLine {
    Stdout(String),
    Stderr(String),
}

/// Spawn a blocking writer for stdout/stderr to avoid blocking async tasks.
fn spawn_output_writer() -> (
    mpsc::UnboundedSender<OutputLine>,
    tokio::task::JoinHandle<()>,
) {
    let (tx, mut rx) = mpsc::unbounded_channel::<OutputLine>();
    let handle = tokio::task::spawn_blocking(move || {
        let stdout = std::io::stdout();
        let stderr = std::io::stderr();
        let mut out = std::io::LineWriter::new(stdout.lock());
        let mut err = std::io::LineWriter::new(stderr.lock());

        while let Some(line) = rx.blocking_recv() {
            match line {
                OutputLine::Stdout(msg) => {
                    let _ = writeln!(out, "{}", msg);
                }
                OutputLine::Stderr(msg) => {
                    let _ = writeln!(err, "{}", msg);
                }
            }
        }

        let _ = out.flush();
        let _ = err.flush();
    });
    (tx, handle)
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "batch-ingest-cli",
    version,
    about = "Batch ingestion client with optional TUI"
)]
pub struct Cli {
    /// Base URL for the ingestion service
    #[arg(long, default_value = "http://localhost:8000")]
    pub base_url: String,

    /// Submit a comma-separated ID list and exit (no TUI)
    #[arg(long)]
    pub ids: Option<String>,

    /// Priority attached to submitted batches
    #[arg(long, value_enum, ignore_case = true, default_value_t = Priority::Medium)]
    pub priority: Priority,

    /// Fetch the status of an ingestion ID and exit (no TUI)
    #[arg(long)]
    pub status_id: Option<String>,

    /// Print JSON instead of a text summary (one-shot modes only)
    #[arg(long)]
    pub json: bool,

    /// How long toast notifications stay on screen
    #[arg(long, default_value = "3s")]
    pub toast_duration: humantime::Duration,
}

impl Cli {
    /// True when the invocation performs a single request and exits.
    pub fn is_one_shot(&self) -> bool {
        self.ids.is_some() || self.status_id.is_some()
    }
}

pub async fn run(args: Cli) -> Result<()> {
    // --json only makes sense for the one-shot modes.
    if args.json && !args.is_one_shot() {
        return Err(anyhow::anyhow!(
            "--json requires --ids or --status-id. Use a one-shot mode with --json."
        ));
    }

    if let Some(raw_ids) = args.ids.clone() {
        return run_submit_once(&args, &raw_ids).await;
    }
    if let Some(raw_id) = args.status_id.clone() {
        return run_status_once(&args, &raw_id).await;
    }

    run_workbench(args).await
}

#[cfg(feature = "tui")]
async fn run_workbench(args: Cli) -> Result<()> {
    crate::tui::run(args).await
}

/// Fallback when built without TUI support.
#[cfg(not(feature = "tui"))]
async fn run_workbench(args: Cli) -> Result<()> {
    let _ = args;
    Err(anyhow::anyhow!(
        "built without TUI support; use --ids or --status-id"
    ))
}

/// Build a `ClientConfig` from CLI arguments.
pub fn build_config(args: &Cli) -> ClientConfig {
    ClientConfig {
        base_url: args.base_url.clone(),
        user_agent: format!("batch-ingest-cli/{}", env!("CARGO_PKG_VERSION")),
        toast_ttl: Duration::from(args.toast_duration),
    }
}

/// Submit one batch and print the assigned ingestion id.
async fn run_submit_once(args: &Cli, raw_ids: &str) -> Result<()> {
    let ids = parse_ids(raw_ids);
    if ids.is_empty() {
        return Err(anyhow::anyhow!(INVALID_IDS_MSG));
    }

    let cfg = build_config(args);
    let client = ApiClient::new(&cfg)?;
    let accepted = client.submit_batch(&ids, args.priority).await?;
    let submission = Submission {
        ingestion_id: accepted.ingestion_id,
        ids,
        priority: args.priority,
        timestamp_utc: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| "now".into()),
    };

    let (out_tx, out_handle) = spawn_output_writer();
    if args.json {
        let out = serde_json::to_string_pretty(&submission)?;
        let _ = out_tx.send(OutputLine::Stdout(out));
    } else {
        // The id goes to stdout for scripting; the notice stays on stderr.
        let _ = out_tx.send(OutputLine::Stdout(submission.ingestion_id.clone()));
        let _ = out_tx.send(OutputLine::Stderr(format!(
            "Submitted {} id(s) at {} priority",
            submission.ids.len(),
            submission.priority
        )));
    }
    drop(out_tx);
    let _ = out_handle.await;
    Ok(())
}

/// Fetch and print the status tree for one ingestion id.
async fn run_status_once(args: &Cli, raw_id: &str) -> Result<()> {
    let ingestion_id = raw_id.trim();
    if ingestion_id.is_empty() {
        return Err(anyhow::anyhow!(MISSING_STATUS_ID_MSG));
    }

    let cfg = build_config(args);
    let client = ApiClient::new(&cfg)?;
    let report = client.fetch_status(ingestion_id).await?;

    let (out_tx, out_handle) = spawn_output_writer();
    if args.json {
        let out = serde_json::to_string_pretty(&report)?;
        let _ = out_tx.send(OutputLine::Stdout(out));
    } else {
        for line in crate::text_summary::build_status_summary(&report).lines {
            let _ = out_tx.send(OutputLine::Stdout(line));
        }
    }
    drop(out_tx);
    let _ = out_handle.await;
    Ok(())
}
