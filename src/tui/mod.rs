mod clipboard;
mod help;
mod render;
mod toast;

use crate::cli::{build_config, Cli};
use crate::model::{ClientConfig, ClientEvent, Priority, StatusReport};
use crate::orchestrator::{self, UiCommand};
use crate::tracker::RecentSubmissions;
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Terminal,
};
use std::{io, time::Duration, time::Instant};
use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use toast::{ToastKind, Toasts};

const SUBMIT_OK_MSG: &str = "Batch submitted successfully!";

/// Form fields in focus-cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormFocus {
    Ids,
    Priority,
    StatusId,
}

impl FormFocus {
    fn next(self) -> Self {
        match self {
            FormFocus::Ids => FormFocus::Priority,
            FormFocus::Priority => FormFocus::StatusId,
            FormFocus::StatusId => FormFocus::Ids,
        }
    }

    fn prev(self) -> Self {
        match self {
            FormFocus::Ids => FormFocus::StatusId,
            FormFocus::Priority => FormFocus::Ids,
            FormFocus::StatusId => FormFocus::Priority,
        }
    }
}

struct UiState {
    focus: FormFocus,
    ids_input: String,
    priority: Priority,
    status_input: String,
    submit_in_flight: bool,
    status_in_flight: bool,
    recent: RecentSubmissions,
    status_report: Option<StatusReport>,
    show_results: bool,
    toasts: Toasts,
    show_help: bool,
    info: String,
}

impl UiState {
    fn new(toast_ttl: Duration) -> Self {
        Self {
            focus: FormFocus::Ids,
            ids_input: String::new(),
            priority: Priority::Medium,
            status_input: String::new(),
            submit_in_flight: false,
            status_in_flight: false,
            recent: RecentSubmissions::default(),
            status_report: None,
            show_results: false,
            toasts: Toasts::new(toast_ttl),
            show_help: false,
            info: "Ready".into(),
        }
    }

    fn focused_input_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormFocus::Ids => Some(&mut self.ids_input),
            FormFocus::StatusId => Some(&mut self.status_input),
            FormFocus::Priority => None,
        }
    }
}

pub async fn run(args: Cli) -> Result<()> {
    // Unbounded channels avoid backpressure between the UI thread and the
    // controller; traffic is tiny either way.
    let (event_tx, event_rx) = mpsc::unbounded_channel::<ClientEvent>();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<UiCommand>();

    let cfg = build_config(&args);

    // TUI runs in a dedicated thread to keep all blocking I/O out of the Tokio runtime.
    let ui_cfg = cfg.clone();
    let ui_handle = std::thread::spawn(move || run_threaded(&ui_cfg, event_rx, cmd_tx));

    let res = orchestrator::run_controller(&cfg, event_tx, cmd_rx).await;

    let join_res = tokio::task::spawn_blocking(move || ui_handle.join()).await;
    if let Ok(joined) = join_res {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => return Err(anyhow::anyhow!("TUI thread panicked")),
        }
    }

    res
}

/// Run the TUI loop on a dedicated thread.
fn run_threaded(
    cfg: &ClientConfig,
    mut event_rx: UnboundedReceiver<ClientEvent>,
    cmd_tx: UnboundedSender<UiCommand>,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    // UiState is owned by the UI thread only; no cross-thread mutation.
    let mut state = UiState::new(cfg.toast_ttl);
    state.info = format!("Connected to {}", cfg.base_url);

    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    let res = loop {
        // Drain events without blocking to keep the UI responsive.
        while let Ok(ev) = event_rx.try_recv() {
            apply_event(&mut state, ev);
        }

        if last_tick.elapsed() >= tick_rate {
            state.toasts.prune(Instant::now());
            terminal.draw(|f| draw(f.area(), f, &state)).ok();
            last_tick = Instant::now();
        }

        // Poll input with a short timeout to avoid blocking the render loop.
        if event::poll(Duration::from_millis(10)).unwrap_or(false) {
            if let Ok(Event::Key(k)) = event::read() {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                match (k.modifiers, k.code) {
                    (KeyModifiers::CONTROL, KeyCode::Char('c')) | (_, KeyCode::Esc) => {
                        let _ = cmd_tx.send(UiCommand::Quit);
                        break Ok(());
                    }
                    (_, KeyCode::F(1)) => {
                        state.show_help = !state.show_help;
                    }
                    (_, KeyCode::Tab) => {
                        state.focus = state.focus.next();
                    }
                    (_, KeyCode::BackTab) => {
                        state.focus = state.focus.prev();
                    }
                    (_, KeyCode::Enter) => match state.focus {
                        FormFocus::Ids | FormFocus::Priority => {
                            if !state.submit_in_flight {
                                state.info = "Submitting batch…".into();
                                let _ = cmd_tx.send(UiCommand::SubmitBatch {
                                    raw_ids: state.ids_input.clone(),
                                    priority: state.priority,
                                });
                            }
                        }
                        FormFocus::StatusId => {
                            if !state.status_in_flight {
                                state.info = "Checking status…".into();
                                let _ = cmd_tx.send(UiCommand::CheckStatus {
                                    raw_id: state.status_input.clone(),
                                });
                            }
                        }
                    },
                    (_, KeyCode::Up) if state.focus == FormFocus::Priority => {
                        state.priority = state.priority.prev();
                    }
                    (_, KeyCode::Down) if state.focus == FormFocus::Priority => {
                        state.priority = state.priority.next();
                    }
                    (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
                        if let Some(input) = state.focused_input_mut() {
                            input.clear();
                        }
                    }
                    (KeyModifiers::CONTROL, KeyCode::Char('y')) => {
                        match state.recent.latest_id() {
                            Some(id) => {
                                let id = id.to_string();
                                match clipboard::copy_text(&id) {
                                    Ok(()) => state.info = format!("Copied {id}"),
                                    Err(e) => state.info = format!("Clipboard copy failed: {e:#}"),
                                }
                            }
                            None => {
                                state.info = "No ingestion ID to copy yet.".into();
                            }
                        }
                    }
                    (_, KeyCode::Backspace) => {
                        if let Some(input) = state.focused_input_mut() {
                            input.pop();
                        }
                    }
                    (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => {
                        if let Some(input) = state.focused_input_mut() {
                            input.push(c);
                        }
                    }
                    _ => {}
                }
            }
        }
    };

    disable_raw_mode().ok();
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen).ok();
    res
}

fn apply_event(state: &mut UiState, ev: ClientEvent) {
    match ev {
        ClientEvent::IngestStarted => {
            state.submit_in_flight = true;
        }
        ClientEvent::IngestAccepted {
            ingestion_id,
            ids,
            priority,
        } => {
            state.submit_in_flight = false;
            state.toasts.push(SUBMIT_OK_MSG, ToastKind::Success);
            state.recent.record(ingestion_id.clone(), ids, priority);
            state.ids_input.clear();
            // Pre-fill the checker so the new batch is one Enter away.
            state.status_input = ingestion_id.clone();
            state.info = format!("Submitted as {ingestion_id}");
        }
        ClientEvent::IngestFailed { message } => {
            state.submit_in_flight = false;
            state.toasts.push(message, ToastKind::Error);
        }
        ClientEvent::StatusStarted => {
            state.status_in_flight = true;
        }
        ClientEvent::StatusReceived { report } => {
            state.status_in_flight = false;
            state.info = format!("Status: {}", report.status);
            state.status_report = Some(*report);
            state.show_results = true;
        }
        ClientEvent::StatusFailed { message } => {
            state.status_in_flight = false;
            state.toasts.push(message, ToastKind::Error);
            state.show_results = false;
        }
    }
}

fn draw(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(area);

    let tabs = Tabs::new(vec![Line::from("Workbench"), Line::from("Help")])
        .select(usize::from(state.show_help))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("batch-ingest-cli"),
        )
        .highlight_style(Style::default().fg(Color::Yellow));
    f.render_widget(tabs, chunks[0]);

    if state.show_help {
        help::draw_help(chunks[1], f);
    } else {
        draw_workbench(chunks[1], f, state);
    }

    draw_info_bar(chunks[2], f, state);
    draw_toasts(area, f, state);
}

fn draw_workbench(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(42), Constraint::Percentage(58)].as_ref())
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(0)].as_ref())
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)].as_ref())
        .split(columns[1]);

    draw_submit_form(left[0], f, state);
    draw_recent(left[1], f, state);
    draw_status_form(right[0], f, state);
    draw_results(right[1], f, state);
}

fn input_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let value_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let cursor = if focused { "▏" } else { "" };
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::Gray)),
        Span::styled(format!("{value}{cursor}"), value_style),
    ])
}

fn button_line(label: &str, in_flight: bool) -> Line<'static> {
    if in_flight {
        Line::from(Span::styled(
            "⠿ Loading…",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(Span::styled(
            format!("[ {label} ]"),
            Style::default().add_modifier(Modifier::BOLD),
        ))
    }
}

fn draw_submit_form(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let priority_focused = state.focus == FormFocus::Priority;
    let priority_value = if priority_focused {
        format!("‹ {} ›", state.priority)
    } else {
        state.priority.to_string()
    };
    let priority_style = if priority_focused {
        render::priority_style(state.priority).add_modifier(Modifier::BOLD)
    } else {
        render::priority_style(state.priority)
    };

    let lines = vec![
        input_line("IDs", &state.ids_input, state.focus == FormFocus::Ids),
        Line::from(vec![
            Span::styled("Priority: ", Style::default().fg(Color::Gray)),
            Span::styled(priority_value, priority_style),
        ]),
        Line::from(""),
        button_line("Submit", state.submit_in_flight),
    ];

    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Submit Batch (comma-separated IDs)"),
    );
    f.render_widget(form, area);
}

fn draw_status_form(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let lines = vec![
        input_line(
            "Ingestion ID",
            &state.status_input,
            state.focus == FormFocus::StatusId,
        ),
        button_line("Check Status", state.status_in_flight),
    ];
    let form = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Check Status"));
    f.render_widget(form, area);
}

fn draw_recent(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let lines = render::recent_submission_lines(state.recent.entries());
    let panel = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Recent Submissions"),
        );
    f.render_widget(panel, area);
}

fn draw_results(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let lines = match (&state.status_report, state.show_results) {
        (Some(report), true) => render::status_report_lines(report),
        _ => vec![Line::from(Span::styled(
            "No status loaded. Enter an ingestion ID and press Enter.",
            Style::default().fg(Color::Gray),
        ))],
    };
    let panel = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Status Results"));
    f.render_widget(panel, area);
}

fn draw_info_bar(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let bar = Paragraph::new(Line::from(vec![
        Span::styled("Info: ", Style::default().fg(Color::Gray)),
        Span::raw(state.info.clone()),
        Span::raw("   "),
        Span::styled(
            "Keys: tab focus | enter submit | ↑/↓ priority | ctrl-y copy id | F1 help | esc quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(bar, area);
}

/// Stack live toasts in the top-right corner, newest at the bottom. No
/// queueing: every live toast gets a row until it expires.
fn draw_toasts(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    if state.toasts.is_empty() {
        return;
    }
    let width = area.width.saturating_sub(2).min(44);
    if width < 10 {
        return;
    }
    let x = area.right().saturating_sub(width + 1);
    for (i, toast) in state.toasts.iter().enumerate() {
        let y = area.top() + 1 + (i as u16) * 3;
        if y + 3 > area.bottom() {
            break;
        }
        let rect = Rect::new(x, y, width, 3);
        f.render_widget(Clear, rect);
        let body = Paragraph::new(toast.message.clone())
            .style(toast.kind.style())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(toast.kind.title()),
            );
        f.render_widget(body, rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event_accepted(id: &str) -> ClientEvent {
        ClientEvent::IngestAccepted {
            ingestion_id: id.into(),
            ids: vec![1, 2, 4],
            priority: Priority::High,
        }
    }

    #[test]
    fn ingest_lifecycle_toggles_the_in_flight_flag() {
        let mut state = UiState::new(Duration::from_secs(3));
        apply_event(&mut state, ClientEvent::IngestStarted);
        assert!(state.submit_in_flight);
        apply_event(&mut state, event_accepted("abc123"));
        assert!(!state.submit_in_flight);

        apply_event(&mut state, ClientEvent::IngestStarted);
        apply_event(
            &mut state,
            ClientEvent::IngestFailed {
                message: "boom".into(),
            },
        );
        assert!(!state.submit_in_flight);
    }

    #[test]
    fn accepted_submit_prefills_status_and_clears_ids() {
        let mut state = UiState::new(Duration::from_secs(3));
        state.ids_input = "1, 2, abc, 4".into();
        apply_event(&mut state, event_accepted("abc123"));

        assert_eq!(state.ids_input, "");
        assert_eq!(state.status_input, "abc123");
        assert_eq!(state.recent.latest_id(), Some("abc123"));
        assert_eq!(state.toasts.iter().count(), 1);
    }

    #[test]
    fn status_failure_hides_previous_results() {
        let mut state = UiState::new(Duration::from_secs(3));
        apply_event(
            &mut state,
            ClientEvent::StatusReceived {
                report: Box::new(StatusReport {
                    ingestion_id: "abc123".into(),
                    status: "completed".into(),
                    batches: vec![],
                }),
            },
        );
        assert!(state.show_results);

        apply_event(
            &mut state,
            ClientEvent::StatusFailed {
                message: "not found".into(),
            },
        );
        assert!(!state.show_results);
        assert!(!state.status_in_flight);
        // The stale report stays in memory but is no longer shown.
        assert!(state.status_report.is_some());
    }

    #[test]
    fn focus_cycle_visits_every_field() {
        let mut focus = FormFocus::Ids;
        focus = focus.next();
        assert_eq!(focus, FormFocus::Priority);
        focus = focus.next();
        assert_eq!(focus, FormFocus::StatusId);
        focus = focus.next();
        assert_eq!(focus, FormFocus::Ids);
        assert_eq!(FormFocus::Ids.prev(), FormFocus::StatusId);
    }
}
