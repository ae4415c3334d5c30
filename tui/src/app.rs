use crate::form::{FormAction, FormView};
use crate::home::render_home;
use crate::icons::pick_icon;
use crate::theme::Theme;
use crate::toast::{Toast, ToastWidget};
use crate::viewer::ViewerState;
use crate::widgets::StatusBar;
use aippt_core::{
    copy_text, Clipboard, DeckGenerator, PresentationStore, Session, SystemClipboard,
    GENERIC_FAILURE_MESSAGE,
};
use aippt_protocol::{Event, Op};
use anyhow::Result;
use crossterm::{
    event::{Event as TermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    prelude::CrosstermBackend,
    widgets::Block,
    Frame, Terminal,
};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::{debug, error, info, warn};

const TICK: Duration = Duration::from_millis(100);
const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub const INVALID_INPUT_MESSAGE: &str = "Please check your inputs.";
pub const SUCCESS_MESSAGE: &str = "Presentation generated successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Form,
    Viewer,
}

pub struct App {
    screen: Screen,
    theme: Theme,
    form: FormView,
    store: PresentationStore,
    viewer: ViewerState,
    toast: Option<Toast>,
    /// Submission id of the generation in flight.
    pending: Option<String>,
    spinner: usize,
    session: Session,
    clipboard: Box<dyn Clipboard>,
    should_quit: bool,
}

impl App {
    pub fn new(session: Session, clipboard: Box<dyn Clipboard>, theme: Theme) -> Self {
        Self {
            screen: Screen::Home,
            theme,
            form: FormView::new(),
            store: PresentationStore::new(),
            viewer: ViewerState::default(),
            toast: None,
            pending: None,
            spinner: 0,
            session,
            clipboard,
            should_quit: false,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn form(&self) -> &FormView {
        &self.form
    }

    pub fn store(&self) -> &PresentationStore {
        &self.store
    }

    pub fn viewer(&self) -> &ViewerState {
        &self.viewer
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub async fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('t') => {
                    self.theme.toggle();
                    debug!(theme = self.theme.name(), "theme toggled");
                    return;
                }
                _ => {}
            }
        }

        match self.screen {
            Screen::Home => match key.code {
                KeyCode::Enter => self.screen = Screen::Form,
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                _ => {}
            },
            Screen::Form => self.handle_form_key(key, now).await,
            Screen::Viewer => self.handle_viewer_key(key, now),
        }
    }

    async fn handle_form_key(&mut self, key: KeyEvent, now: Instant) {
        if self.pending.is_some() {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('p') {
            if self.store.is_loaded() {
                self.screen = Screen::Viewer;
            }
            return;
        }
        match self.form.handle_key(key) {
            FormAction::Back => self.screen = Screen::Home,
            FormAction::Submit => self.submit(now).await,
            FormAction::None => {}
        }
    }

    async fn submit(&mut self, now: Instant) {
        let Some(request) = self.form.submit() else {
            debug!(errors = %self.form.errors(), "form rejected");
            self.toast = Some(Toast::error(INVALID_INPUT_MESSAGE, now));
            return;
        };
        info!(topic = %request.topic, slides = request.slide_count, "submitting generation");
        match self.session.submit(Op::Generate(request)).await {
            Ok(id) => {
                self.pending = Some(id);
                self.spinner = 0;
            }
            Err(err) => {
                error!(error = %err, "session unavailable");
                self.toast = Some(Toast::error(GENERIC_FAILURE_MESSAGE, now));
            }
        }
    }

    fn handle_viewer_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                if self.store.prev() {
                    self.viewer.reset_for_slide();
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.store.next() {
                    self.viewer.reset_for_slide();
                }
            }
            KeyCode::Up | KeyCode::Char('k') => self.viewer.scroll_up(),
            KeyCode::Down | KeyCode::Char('j') => self.viewer.scroll_down(),
            KeyCode::Char('c') => {
                let Some(text) = self.store.current().map(|s| s.clipboard_text()) else {
                    return;
                };
                if copy_text(self.clipboard.as_mut(), &text) {
                    self.viewer.slide_copy.mark(now);
                }
            }
            KeyCode::Char('i') => {
                let Some(text) = self.store.deck().map(|d| d.clipboard_text()) else {
                    return;
                };
                if copy_text(self.clipboard.as_mut(), &text) {
                    self.viewer.info_copy.mark(now);
                }
            }
            KeyCode::Esc | KeyCode::Char('b') => self.screen = Screen::Form,
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn is_pending(&self, id: &str) -> bool {
        self.pending.as_deref() == Some(id)
    }

    pub fn handle_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::GenerationStarted { id } => debug!(submission = %id, "generation started"),
            Event::DeckReady { id, deck } => {
                if !self.is_pending(&id) {
                    warn!(submission = %id, "ignoring result of a stale submission");
                    return;
                }
                self.pending = None;
                self.store.load(deck);
                self.viewer = ViewerState::default();
                self.viewer.icon = pick_icon(&mut rand::rng());
                self.toast = Some(Toast::success(SUCCESS_MESSAGE, now));
                self.screen = Screen::Viewer;
            }
            Event::GenerationFailed { id, message } => {
                if !self.is_pending(&id) {
                    warn!(submission = %id, "ignoring failure of a stale submission");
                    return;
                }
                self.pending = None;
                self.toast = Some(Toast::error(message, now));
            }
            Event::ShutdownComplete => debug!("session shut down"),
        }
    }

    pub fn on_tick(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired(now)) {
            self.toast = None;
        }
        if self.pending.is_some() {
            self.spinner = (self.spinner + 1) % SPINNER.len();
        }
    }

    pub fn render(&mut self, frame: &mut Frame, now: Instant) {
        let theme = self.theme;
        let screen = frame.area();
        frame.render_widget(Block::default().style(theme.base()), screen);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(screen);

        let (mode, hints) = match self.screen {
            Screen::Home => {
                render_home(frame, chunks[0], theme);
                ("HOME", "Enter try it · Ctrl+T theme · q quit")
            }
            Screen::Form => {
                self.form
                    .render(frame, chunks[0], theme, self.is_loading(), SPINNER[self.spinner]);
                ("FORM", "Enter submit · Alt+Enter newline · Esc home · Ctrl+P last deck")
            }
            Screen::Viewer => {
                self.viewer.render(frame, chunks[0], &self.store, theme, now);
                ("VIEWER", "←/→ slides · ↑/↓ scroll · c copy · i info · Esc form · q quit")
            }
        };
        let status = if self.is_loading() {
            "Generating presentation..."
        } else {
            ""
        };
        frame.render_widget(StatusBar::new(mode, status, hints, theme), chunks[1]);

        if let Some(toast) = &self.toast {
            let widget = ToastWidget::new(toast, theme);
            let area = widget.area(screen);
            frame.render_widget(widget, area);
        }
    }
}

pub struct AppOptions {
    pub generator: Arc<dyn DeckGenerator>,
    pub dark: bool,
}

/// Raw mode and the alternate screen for as long as the guard lives.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let setup = || -> Result<Terminal<CrosstermBackend<Stdout>>> {
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen)?;
            Ok(Terminal::new(CrosstermBackend::new(stdout))?)
        };
        match setup() {
            Ok(terminal) => Ok(Self { terminal }),
            Err(err) => {
                let _ = disable_raw_mode();
                Err(err)
            }
        }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

pub async fn run_app(options: AppOptions) -> Result<()> {
    let session = Session::spawn(options.generator);
    let mut app = App::new(
        session.clone(),
        Box::new(SystemClipboard::new()),
        Theme::new(options.dark),
    );

    let mut guard = TerminalGuard::enter()?;
    let mut term_events = EventStream::new();
    let mut ticks = interval(TICK);
    info!("interactive session started");

    while !app.should_quit() {
        let now = Instant::now();
        guard.terminal.draw(|f| app.render(f, now))?;

        tokio::select! {
            _ = ticks.tick() => app.on_tick(Instant::now()),
            maybe = term_events.next() => match maybe {
                Some(Ok(TermEvent::Key(key))) => app.handle_key(key, Instant::now()).await,
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    error!(error = %err, "terminal input failed");
                    break;
                }
                None => break,
            },
            Some(event) = session.next_event() => app.handle_event(event, Instant::now()),
        }
    }

    if let Err(err) = session.submit(Op::Shutdown).await {
        debug!(error = %err, "session already closed");
    }
    drop(guard);
    info!("interactive session ended");
    Ok(())
}
