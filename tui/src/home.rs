use crate::theme::Theme;
use crate::widgets::banner::{banner_lines, TAGLINE};
use chrono::Datelike;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

pub const FEATURES: [&str; 6] = [
    "Add Slides",
    "Customize & Edit",
    "Generate PPT",
    "AI Design",
    "Automated Edits",
    "Cloud Integration",
];

pub fn render_home(frame: &mut Frame, area: Rect, theme: Theme) {
    let accent = Style::default()
        .fg(theme.accent())
        .add_modifier(Modifier::BOLD);
    let mut lines: Vec<Line<'static>> = vec![Line::default()];
    lines.extend(banner_lines().into_iter().map(|l| Line::from(Span::styled(l, accent))));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Create Stunning Presentations",
        Style::default()
            .fg(theme.foreground())
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(TAGLINE, theme.dim())));
    lines.push(Line::default());

    for pair in FEATURES.chunks(2) {
        let cells: Vec<Span<'static>> = pair
            .iter()
            .flat_map(|name| {
                [
                    Span::styled("  ◆ ", Style::default().fg(theme.accent())),
                    Span::styled(format!("{name:<20}"), Style::default().fg(theme.foreground())),
                ]
            })
            .collect();
        lines.push(Line::from(cells));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        " Press Enter to try it ",
        Style::default()
            .fg(theme.background())
            .bg(theme.accent())
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        format!("© {} AI PPT Builder", chrono::Local::now().year()),
        theme.dim(),
    )));

    frame.render_widget(
        Paragraph::new(lines)
            .style(theme.base())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false }),
        area,
    );
}
