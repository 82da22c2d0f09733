use ratatui::{
    layout::Rect,
    style::Color,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw_help(area: Rect, f: &mut Frame) {
    let p = Paragraph::new(vec![
        Line::from("Keybinds:"),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("Esc", Style::default().fg(Color::Magenta)),
            Span::raw(" / "),
            Span::styled("Ctrl-C", Style::default().fg(Color::Magenta)),
            Span::raw("  Quit"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("Tab", Style::default().fg(Color::Magenta)),
            Span::raw(" / "),
            Span::styled("Shift-Tab", Style::default().fg(Color::Magenta)),
            Span::raw("  Move between form fields"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("Enter", Style::default().fg(Color::Magenta)),
            Span::raw("       Submit the focused form"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("↑/↓", Style::default().fg(Color::Magenta)),
            Span::raw("         Cycle priority (when focused)"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("Ctrl-U", Style::default().fg(Color::Magenta)),
            Span::raw("      Clear the focused field"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("Ctrl-Y", Style::default().fg(Color::Magenta)),
            Span::raw("      Copy the last ingestion ID"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("F1", Style::default().fg(Color::Magenta)),
            Span::raw("          Toggle this help"),
        ]),
        Line::from(""),
        Line::from("Workflow:"),
        Line::from("  Type a comma-separated ID list, pick a priority, press Enter."),
        Line::from("  Invalid tokens are dropped; an all-invalid list is rejected"),
        Line::from("  before any request is sent."),
        Line::from("  A successful submit fills the status field with the new"),
        Line::from("  ingestion ID; press Enter there to fetch its batch statuses."),
    ])
    .block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(p, area);
}
