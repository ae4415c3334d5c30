use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use std::time::{Duration, Instant};

/// How long a notification stays on screen.
pub const TOAST_DURATION: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// Transient notification shown in the top-right corner.
#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    shown_at: Instant,
}

impl Toast {
    pub fn success(message: impl Into<String>, now: Instant) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
            shown_at: now,
        }
    }

    pub fn error(message: impl Into<String>, now: Instant) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
            shown_at: now,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= TOAST_DURATION
    }
}

pub struct ToastWidget<'a> {
    toast: &'a Toast,
    theme: Theme,
}

impl<'a> ToastWidget<'a> {
    pub fn new(toast: &'a Toast, theme: Theme) -> Self {
        Self { toast, theme }
    }

    /// Area in the top-right corner of `screen` the toast occupies.
    pub fn area(&self, screen: Rect) -> Rect {
        let width = (self.toast.message.chars().count() as u16 + 6)
            .min(48)
            .min(screen.width);
        let height = 3.min(screen.height);
        Rect::new(
            screen.x + screen.width.saturating_sub(width + 1),
            screen.y + 1.min(screen.height.saturating_sub(height)),
            width,
            height,
        )
    }
}

impl Widget for ToastWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (icon, color) = match self.toast.kind {
            ToastKind::Success => ("✔", self.theme.success()),
            ToastKind::Error => ("✖", self.theme.error()),
        };
        let line = Line::from(vec![
            Span::styled(
                format!("{icon} "),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(self.toast.message.clone()),
        ]);
        Clear.render(area, buf);
        Paragraph::new(line)
            .style(Style::default().fg(self.theme.foreground()).bg(self.theme.panel()))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            )
            .render(area, buf);
    }
}
