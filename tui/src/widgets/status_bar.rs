use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// One-line footer: screen name, a status message and key hints.
pub struct StatusBar<'a> {
    mode: &'a str,
    status: &'a str,
    hints: &'a str,
    theme: Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(mode: &'a str, status: &'a str, hints: &'a str, theme: Theme) -> Self {
        Self {
            mode,
            status,
            hints,
            theme,
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![Span::styled(
            format!(" {} ", self.mode),
            Style::default()
                .fg(self.theme.background())
                .bg(self.theme.accent())
                .add_modifier(Modifier::BOLD),
        )];
        if !self.status.is_empty() {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(self.status, Style::default().fg(self.theme.foreground())));
        }
        spans.push(Span::styled("  |  ", self.theme.dim()));
        spans.push(Span::styled(self.hints, self.theme.dim()));
        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(self.theme.panel()))
            .alignment(Alignment::Left)
            .render(area, buf);
    }
}
