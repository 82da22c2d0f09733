//! Text summary builder for CLI output.
//!
//! Formats human-readable lines for the one-shot submit and status modes.

use crate::model::StatusReport;

/// Pre-formatted lines for text output.
pub(crate) struct TextSummary {
    pub lines: Vec<String>,
}

/// Render a status report as an indented tree, one batch per card.
pub(crate) fn build_status_summary(report: &StatusReport) -> TextSummary {
    let mut lines = Vec::new();
    lines.push(format!("Ingestion: {}", report.ingestion_id));
    lines.push(format!("Status:    {}", report.status));
    lines.push(format!("Batches:   {}", report.batches.len()));
    for batch in &report.batches {
        lines.push(format!(
            "  {} [{}] ids: {}",
            batch.batch_id,
            batch.status,
            join_ids(&batch.ids)
        ));
    }
    TextSummary { lines }
}

/// Comma-joined id list, matching the service's display convention.
pub(crate) fn join_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
