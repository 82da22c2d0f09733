//! Pure line builders for the workbench panels.
//!
//! Everything in here is a function from data to `Line`s so it can be tested
//! without a terminal.

use crate::model::{Priority, StatusReport, Submission};
use crate::text_summary::join_ids;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Shown in the recent panel when nothing has been submitted yet.
pub(crate) const NO_RECENT_MSG: &str = "No recent submissions";

/// Explicit status badge map. Statuses are matched case-insensitively;
/// anything unrecognized gets a neutral badge.
pub(crate) fn status_style(status: &str) -> Style {
    match status.to_ascii_lowercase().as_str() {
        "completed" => Style::default().fg(Color::Green),
        "triggered" => Style::default().fg(Color::Cyan),
        "yet_to_start" => Style::default().fg(Color::Yellow),
        "failed" => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::Gray),
    }
}

pub(crate) fn priority_style(priority: Priority) -> Style {
    match priority {
        Priority::High => Style::default().fg(Color::Red),
        Priority::Medium => Style::default().fg(Color::Yellow),
        Priority::Low => Style::default().fg(Color::Green),
    }
}

fn label(text: &str) -> Span<'static> {
    Span::styled(text.to_string(), Style::default().fg(Color::Gray))
}

/// Status tree: ingestion header, overall badge, then one card per batch.
pub(crate) fn status_report_lines(report: &StatusReport) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            label("Ingestion ID: "),
            Span::raw(report.ingestion_id.clone()),
        ]),
        Line::from(vec![
            label("Overall Status: "),
            Span::styled(report.status.clone(), status_style(&report.status)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Batches:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    for batch in &report.batches {
        lines.push(Line::from(vec![
            Span::raw("  "),
            label("Batch ID: "),
            Span::raw(batch.batch_id.clone()),
        ]));
        lines.push(Line::from(vec![
            Span::raw("  "),
            label("Status: "),
            Span::styled(batch.status.clone(), status_style(&batch.status)),
        ]));
        lines.push(Line::from(vec![
            Span::raw("  "),
            label("IDs: "),
            Span::raw(join_ids(&batch.ids)),
        ]));
        lines.push(Line::from(""));
    }
    lines
}

/// Recent submissions, newest first, one card per entry.
pub(crate) fn recent_submission_lines(entries: &[Submission]) -> Vec<Line<'static>> {
    if entries.is_empty() {
        return vec![Line::from(label(NO_RECENT_MSG))];
    }
    let mut lines = Vec::new();
    for sub in entries {
        lines.push(Line::from(vec![
            label("ID: "),
            Span::raw(sub.ingestion_id.clone()),
        ]));
        lines.push(Line::from(vec![
            label("Priority: "),
            Span::styled(sub.priority.as_str(), priority_style(sub.priority)),
        ]));
        lines.push(Line::from(vec![
            label("IDs: "),
            Span::raw(join_ids(&sub.ids)),
        ]));
        lines.push(Line::from(Span::styled(
            local_timestamp(&sub.timestamp_utc),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));
    }
    lines
}

/// Render an RFC 3339 timestamp in the system's local offset when it can be
/// determined, falling back to the raw string.
pub(crate) fn local_timestamp(ts: &str) -> String {
    let Ok(parsed) = time::OffsetDateTime::parse(ts, &time::format_description::well_known::Rfc3339)
    else {
        return ts.to_string();
    };
    let shown = match time::UtcOffset::current_local_offset() {
        Ok(offset) => parsed.to_offset(offset),
        Err(_) => parsed,
    };
    shown
        .format(time::macros::format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        ))
        .unwrap_or_else(|_| ts.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BatchStatus;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn sample_report() -> StatusReport {
        StatusReport {
            ingestion_id: "abc123".into(),
            status: "Triggered".into(),
            batches: vec![
                BatchStatus {
                    batch_id: "b1".into(),
                    status: "completed".into(),
                    ids: vec![1, 2, 3],
                },
                BatchStatus {
                    batch_id: "b2".into(),
                    status: "reticulating".into(),
                    ids: vec![4],
                },
            ],
        }
    }

    #[test]
    fn status_styles_match_case_insensitively() {
        assert_eq!(status_style("COMPLETED"), status_style("completed"));
        assert_eq!(status_style("completed").fg, Some(Color::Green));
        assert_eq!(status_style("failed").fg, Some(Color::Red));
    }

    #[test]
    fn unknown_status_gets_the_neutral_badge() {
        assert_eq!(status_style("reticulating").fg, Some(Color::Gray));
    }

    #[test]
    fn report_lines_contain_ids_statuses_and_joined_ids() {
        let lines = status_report_lines(&sample_report());
        let text: Vec<String> = lines.iter().map(line_text).collect();
        assert!(text[0].contains("abc123"));
        assert!(text[1].contains("Triggered"));
        assert!(text.iter().any(|l| l.contains("Batch ID: b1")));
        assert!(text.iter().any(|l| l.contains("IDs: 1, 2, 3")));
        assert!(text.iter().any(|l| l.contains("Batch ID: b2")));
    }

    #[test]
    fn empty_recent_list_renders_the_placeholder() {
        let lines = recent_submission_lines(&[]);
        assert_eq!(lines.len(), 1);
        assert_eq!(line_text(&lines[0]), NO_RECENT_MSG);
    }

    #[test]
    fn recent_cards_show_id_priority_and_ids() {
        let entries = vec![Submission {
            ingestion_id: "abc123".into(),
            ids: vec![1, 2, 4],
            priority: Priority::High,
            timestamp_utc: "2026-08-04T12:30:00Z".into(),
        }];
        let lines = recent_submission_lines(&entries);
        let text: Vec<String> = lines.iter().map(line_text).collect();
        assert!(text.iter().any(|l| l.contains("ID: abc123")));
        assert!(text.iter().any(|l| l.contains("Priority: HIGH")));
        assert!(text.iter().any(|l| l.contains("IDs: 1, 2, 4")));
    }

    #[test]
    fn local_timestamp_falls_back_on_unparseable_input() {
        assert_eq!(local_timestamp("now"), "now");
        // A valid RFC 3339 input is reformatted into a date-time string.
        let shown = local_timestamp("2026-08-04T12:30:00Z");
        assert!(shown.starts_with("2026-08-"));
        assert!(!shown.contains('T'));
    }
}
