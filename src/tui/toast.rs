//! Transient toast notifications.
//!
//! Toasts live for a fixed TTL and are pruned on every UI tick. There is no
//! queue: concurrent toasts stack and all stay visible until they expire.

use ratatui::style::{Color, Style};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ToastKind {
    Info,
    Success,
    Error,
}

impl ToastKind {
    pub fn style(self) -> Style {
        match self {
            ToastKind::Info => Style::default().fg(Color::Cyan),
            ToastKind::Success => Style::default().fg(Color::Green),
            ToastKind::Error => Style::default().fg(Color::Red),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ToastKind::Info => "info",
            ToastKind::Success => "ok",
            ToastKind::Error => "error",
        }
    }
}

#[derive(Debug)]
pub(crate) struct Toast {
    pub message: String,
    pub kind: ToastKind,
    raised_at: Instant,
}

#[derive(Debug)]
pub(crate) struct Toasts {
    items: Vec<Toast>,
    ttl: Duration,
}

impl Toasts {
    pub fn new(ttl: Duration) -> Self {
        Self {
            items: Vec::new(),
            ttl,
        }
    }

    pub fn push(&mut self, message: impl Into<String>, kind: ToastKind) {
        self.push_at(message, kind, Instant::now());
    }

    fn push_at(&mut self, message: impl Into<String>, kind: ToastKind, raised_at: Instant) {
        self.items.push(Toast {
            message: message.into(),
            kind,
            raised_at,
        });
    }

    /// Drop toasts whose TTL has elapsed. Called once per UI tick.
    pub fn prune(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.items
            .retain(|t| now.saturating_duration_since(t.raised_at) < ttl);
    }

    /// Live toasts, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
