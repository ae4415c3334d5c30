use crate::icons::DECOR_ICONS;
use crate::markdown::render_markdown;
use crate::theme::Theme;
use aippt_core::PresentationStore;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::time::{Duration, Instant};

/// How long a copy button shows its confirmation.
pub const COPY_FEEDBACK: Duration = Duration::from_millis(2000);

#[derive(Debug, Default, Clone, Copy)]
pub struct CopyFeedback {
    copied_at: Option<Instant>,
}

impl CopyFeedback {
    pub fn mark(&mut self, now: Instant) {
        self.copied_at = Some(now);
    }

    pub fn clear(&mut self) {
        self.copied_at = None;
    }

    pub fn is_active(&self, now: Instant) -> bool {
        self.copied_at
            .is_some_and(|at| now.saturating_duration_since(at) < COPY_FEEDBACK)
    }
}

/// Enabled state of the navigation controls and the "N / M" label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavState {
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub label: String,
}

impl NavState {
    pub fn from_store(store: &PresentationStore) -> Self {
        let (position, total) = store.position();
        Self {
            prev_enabled: store.has_prev(),
            next_enabled: store.has_next(),
            label: format!("{position} / {total}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ViewerState {
    pub scroll: u16,
    pub slide_copy: CopyFeedback,
    pub info_copy: CopyFeedback,
    pub icon: &'static str,
    content_lines: u16,
    viewport: u16,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            scroll: 0,
            slide_copy: CopyFeedback::default(),
            info_copy: CopyFeedback::default(),
            icon: DECOR_ICONS[0],
            content_lines: 0,
            viewport: 0,
        }
    }
}

impl ViewerState {
    /// Called whenever a different slide comes on screen.
    pub fn reset_for_slide(&mut self) {
        self.scroll = 0;
        self.slide_copy.clear();
    }

    pub fn max_scroll(&self) -> u16 {
        self.content_lines.saturating_sub(self.viewport)
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1).min(self.max_scroll());
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        store: &PresentationStore,
        theme: Theme,
        now: Instant,
    ) {
        let (Some(deck), Some(slide)) = (store.deck(), store.current()) else {
            frame.render_widget(
                Paragraph::new("No presentation loaded. Press Esc to open the form.")
                    .style(theme.dim())
                    .alignment(Alignment::Center),
                area,
            );
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(area);

        let header = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(16)])
            .split(chunks[0]);

        let title = Line::from(vec![
            Span::raw(format!("{} ", self.icon)),
            Span::styled(
                deck.title.clone(),
                Style::default()
                    .fg(theme.accent())
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        let description = Line::from(Span::styled(deck.description.clone(), theme.dim()));
        frame.render_widget(
            Paragraph::new(vec![title, description]).wrap(Wrap { trim: true }),
            header[0],
        );

        let info_button = if self.info_copy.is_active(now) {
            Span::styled("✓ Copied", Style::default().fg(theme.success()))
        } else {
            Span::styled("[i] Copy Info", Style::default().fg(theme.link()))
        };
        frame.render_widget(
            Paragraph::new(Line::from(info_button)).alignment(Alignment::Right),
            header[1],
        );

        let copy_label = if self.slide_copy.is_active(now) {
            Span::styled(" ✓ Copied ", Style::default().fg(theme.success()))
        } else {
            Span::styled(" [c] Copy ", Style::default().fg(theme.link()))
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border()))
            .title(Span::styled(
                format!(" {} ", slide.title),
                Style::default()
                    .fg(theme.foreground())
                    .add_modifier(Modifier::BOLD),
            ))
            .title_bottom(Line::from(copy_label).right_aligned())
            .style(Style::default().bg(theme.panel()));
        let inner = block.inner(chunks[1]);
        let content = Paragraph::new(render_markdown(&slide.content, theme, inner.width))
            .wrap(Wrap { trim: false });

        // Rows after wrapping, not logical lines.
        self.content_lines = u16::try_from(content.line_count(inner.width)).unwrap_or(u16::MAX);
        self.viewport = inner.height;
        self.scroll = self.scroll.min(self.max_scroll());

        frame.render_widget(
            content.block(block).scroll((self.scroll, 0)),
            chunks[1],
        );

        let nav = NavState::from_store(store);
        let arrow = |enabled: bool| {
            if enabled {
                Style::default()
                    .fg(theme.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                theme.disabled()
            }
        };
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("◀ prev", arrow(nav.prev_enabled)),
                Span::styled(
                    format!("   {}   ", nav.label),
                    Style::default().fg(theme.foreground()),
                ),
                Span::styled("next ▶", arrow(nav.next_enabled)),
            ]))
            .alignment(Alignment::Center),
            chunks[2],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aippt_protocol::{Deck, Slide};
    use ratatui::{backend::TestBackend, Terminal};

    fn deck(n: usize) -> Deck {
        Deck {
            title: "Cats".into(),
            description: "All about cats".into(),
            slides: (0..n)
                .map(|i| Slide {
                    title: format!("S{i}"),
                    content: (0..30).map(|l| format!("line {l}\n\n")).collect(),
                })
                .collect(),
        }
    }

    #[test]
    fn copy_feedback_lasts_two_seconds() {
        let now = Instant::now();
        let mut feedback = CopyFeedback::default();
        assert!(!feedback.is_active(now));
        feedback.mark(now);
        assert!(feedback.is_active(now + Duration::from_millis(1999)));
        assert!(!feedback.is_active(now + COPY_FEEDBACK));
    }

    #[test]
    fn nav_state_follows_store() {
        let mut store = PresentationStore::new();
        store.load(deck(3));
        let nav = NavState::from_store(&store);
        assert!(!nav.prev_enabled);
        assert!(nav.next_enabled);
        assert_eq!(nav.label, "1 / 3");

        store.next();
        store.next();
        let nav = NavState::from_store(&store);
        assert!(nav.prev_enabled);
        assert!(!nav.next_enabled);
        assert_eq!(nav.label, "3 / 3");
    }

    #[test]
    fn render_records_scroll_bounds() {
        let mut store = PresentationStore::new();
        store.load(deck(1));
        let mut state = ViewerState::default();
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let now = Instant::now();
        terminal
            .draw(|f| state.render(f, f.area(), &store, Theme::default(), now))
            .unwrap();

        assert!(state.max_scroll() > 0);
        for _ in 0..500 {
            state.scroll_down();
        }
        assert_eq!(state.scroll, state.max_scroll());
        state.reset_for_slide();
        assert_eq!(state.scroll, 0);
        state.scroll_up();
        assert_eq!(state.scroll, 0);
    }

    #[test]
    fn empty_store_shows_hint() {
        let mut state = ViewerState::default();
        let mut terminal = Terminal::new(TestBackend::new(70, 5)).unwrap();
        terminal
            .draw(|f| {
                let store = PresentationStore::new();
                state.render(f, f.area(), &store, Theme::default(), Instant::now())
            })
            .unwrap();
        assert!(screen_text(&terminal).contains("No presentation loaded"));
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn wrapped_paragraph_scrolls_to_its_last_row() {
        let mut words: String = (0..200).map(|i| format!("word{i} ")).collect();
        words.push_str("ENDMARK");
        let mut store = PresentationStore::new();
        store.load(Deck {
            title: "Long".into(),
            description: String::new(),
            slides: vec![Slide {
                title: "One paragraph".into(),
                content: words,
            }],
        });
        let mut state = ViewerState::default();
        let mut terminal = Terminal::new(TestBackend::new(40, 15)).unwrap();
        let now = Instant::now();
        terminal
            .draw(|f| state.render(f, f.area(), &store, Theme::default(), now))
            .unwrap();
        assert!(!screen_text(&terminal).contains("ENDMARK"));
        assert!(state.max_scroll() > 0);

        for _ in 0..1000 {
            state.scroll_down();
        }
        terminal
            .draw(|f| state.render(f, f.area(), &store, Theme::default(), now))
            .unwrap();
        assert!(screen_text(&terminal).contains("ENDMARK"));
    }
}
