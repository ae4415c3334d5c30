use crate::text_input::{TextInput, NEWLINE_MODIFIERS};
use crate::theme::Theme;
use aippt_core::{Field, FormInput, ValidationErrors};
use aippt_protocol::{FileType, GenerationRequest, Language};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Submit,
    Back,
}

/// The generation form: six text inputs and two option pickers.
#[derive(Debug, Clone)]
pub struct FormView {
    topic: TextInput,
    objective: TextInput,
    target_audience: TextInput,
    n_slides: TextInput,
    slide_breakdown: TextInput,
    file_url: TextInput,
    language: usize,
    file_type: usize,
    focus: Field,
    errors: ValidationErrors,
    submitted_once: bool,
}

impl Default for FormView {
    fn default() -> Self {
        Self::new()
    }
}

impl FormView {
    pub fn new() -> Self {
        Self {
            topic: TextInput::new(),
            objective: TextInput::multiline(),
            target_audience: TextInput::new(),
            n_slides: TextInput::new(),
            slide_breakdown: TextInput::multiline(),
            file_url: TextInput::new(),
            language: 0,
            file_type: 0,
            focus: Field::Topic,
            errors: ValidationErrors::default(),
            submitted_once: false,
        }
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    fn text(&self, field: Field) -> Option<&TextInput> {
        match field {
            Field::Topic => Some(&self.topic),
            Field::Objective => Some(&self.objective),
            Field::TargetAudience => Some(&self.target_audience),
            Field::SlideCount => Some(&self.n_slides),
            Field::SlideBreakdown => Some(&self.slide_breakdown),
            Field::FileUrl => Some(&self.file_url),
            Field::Language | Field::FileType => None,
        }
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut TextInput> {
        match field {
            Field::Topic => Some(&mut self.topic),
            Field::Objective => Some(&mut self.objective),
            Field::TargetAudience => Some(&mut self.target_audience),
            Field::SlideCount => Some(&mut self.n_slides),
            Field::SlideBreakdown => Some(&mut self.slide_breakdown),
            Field::FileUrl => Some(&mut self.file_url),
            Field::Language | Field::FileType => None,
        }
    }

    fn language(&self) -> Language {
        Language::ALL[self.language % Language::ALL.len()]
    }

    fn file_type(&self) -> FileType {
        FileType::ALL[self.file_type % FileType::ALL.len()]
    }

    /// Current values as raw form input.
    pub fn input(&self) -> FormInput {
        FormInput {
            topic: self.topic.text().to_string(),
            objective: self.objective.text().to_string(),
            target_audience: self.target_audience.text().to_string(),
            n_slides: self.n_slides.text().to_string(),
            slide_breakdown: self.slide_breakdown.text().to_string(),
            lang: self.language().code().to_string(),
            file_url: self.file_url.text().to_string(),
            file_type: self.file_type().code().to_string(),
        }
    }

    /// Set a field directly. Choice fields take the option code.
    pub fn set_value(&mut self, field: Field, value: &str) {
        match field {
            Field::Language => {
                if let Some(i) = Language::ALL.iter().position(|l| l.code() == value) {
                    self.language = i;
                }
            }
            Field::FileType => {
                if let Some(i) = FileType::ALL.iter().position(|t| t.code() == value) {
                    self.file_type = i;
                }
            }
            _ => {
                if let Some(input) = self.text_mut(field) {
                    input.set_text(value);
                }
            }
        }
    }

    /// Validate the form. On failure the errors are kept for display and
    /// focus jumps to the first offending field.
    pub fn submit(&mut self) -> Option<GenerationRequest> {
        self.submitted_once = true;
        match self.input().validate() {
            Ok(request) => {
                self.errors.clear();
                Some(request)
            }
            Err(errors) => {
                if let Some(first) = errors.first() {
                    self.set_focus(first.field);
                }
                self.errors = errors;
                None
            }
        }
    }

    fn set_focus(&mut self, field: Field) {
        self.focus = field;
        if let Some(input) = self.text_mut(field) {
            input.move_to_end();
        }
    }

    fn step_focus(&mut self, forward: bool) {
        let len = Field::ALL.len();
        let idx = Field::ALL.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward { (idx + 1) % len } else { (idx + len - 1) % len };
        self.set_focus(Field::ALL[next]);
    }

    fn cycle_choice(&mut self, forward: bool) {
        let (idx, len) = match self.focus {
            Field::Language => (&mut self.language, Language::ALL.len()),
            Field::FileType => (&mut self.file_type, FileType::ALL.len()),
            _ => return,
        };
        *idx = if forward { (*idx + 1) % len } else { (*idx + len - 1) % len };
    }

    fn takes_newline(&self, key: &KeyEvent) -> bool {
        key.modifiers.intersects(NEWLINE_MODIFIERS)
            && self.text(self.focus).is_some_and(TextInput::is_multiline)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        match key.code {
            KeyCode::Esc => return FormAction::Back,
            KeyCode::Enter if !self.takes_newline(&key) => return FormAction::Submit,
            KeyCode::Tab | KeyCode::Down => self.step_focus(true),
            KeyCode::BackTab | KeyCode::Up => self.step_focus(false),
            KeyCode::Left if self.focus.is_choice() => self.cycle_choice(false),
            KeyCode::Right | KeyCode::Char(' ') if self.focus.is_choice() => {
                self.cycle_choice(true)
            }
            _ => {
                let focus = self.focus;
                let changed = self.text_mut(focus).is_some_and(|input| input.input(key));
                if changed && self.submitted_once {
                    self.errors = self.input().validate().err().unwrap_or_default();
                }
            }
        }
        FormAction::None
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        theme: Theme,
        loading: bool,
        spinner: &str,
    ) {
        let block = Block::default()
            .title(" Generate Presentation ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border()))
            .style(theme.base());
        let inner = block.inner(area);

        let label_style = Style::default()
            .fg(theme.foreground())
            .add_modifier(Modifier::BOLD);
        let marker_style = Style::default().fg(theme.accent());
        let mut lines: Vec<Line<'static>> = Vec::new();
        let mut focus_row = 0usize;
        let value_style = Style::default().fg(theme.foreground());

        for field in Field::ALL {
            let focused = field == self.focus;
            lines.push(Line::from(vec![
                Span::styled(format!(" {}", field.label()), label_style),
                Span::styled(" *", Style::default().fg(theme.error())),
            ]));

            let marker = if focused { " ▌ " } else { "   " };
            let mut value = vec![Span::styled(marker, marker_style)];
            let mut continuation: Vec<Line<'static>> = Vec::new();
            match field {
                Field::Language | Field::FileType => {
                    let (label, code) = if field == Field::Language {
                        (self.language().label(), self.language().code())
                    } else {
                        (self.file_type().label(), self.file_type().code())
                    };
                    let arrows = if focused { marker_style } else { theme.dim() };
                    value.push(Span::styled("◀ ", arrows));
                    value.push(Span::styled(format!("{label} ({code})"), value_style));
                    value.push(Span::styled(" ▶", arrows));
                }
                _ => {
                    let text = self.text(field).map_or("", TextInput::text);
                    if text.is_empty() {
                        value.push(Span::styled(field.placeholder(), theme.dim()));
                    } else {
                        let mut rows = text.split('\n');
                        let first = rows.next().unwrap_or_default();
                        value.push(Span::styled(first.to_string(), value_style));
                        continuation.extend(rows.map(|row| {
                            Line::from(vec![
                                Span::styled(marker, marker_style),
                                Span::styled(row.to_string(), value_style),
                            ])
                        }));
                    }
                }
            }
            if focused {
                focus_row = lines.len();
            }
            lines.push(Line::from(value));
            lines.append(&mut continuation);

            if let Some(message) = self.errors.message_for(field) {
                lines.push(Line::from(Span::styled(
                    format!("   {message}"),
                    Style::default().fg(theme.error()),
                )));
            }
            lines.push(Line::default());
        }

        let button = if loading {
            Span::styled(
                format!(" [ {spinner} Processing... ] "),
                theme.disabled().add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                " [ Submit ] ",
                Style::default()
                    .fg(theme.background())
                    .bg(theme.accent())
                    .add_modifier(Modifier::BOLD),
            )
        };
        lines.push(Line::from(vec![Span::raw(" "), button]));
        lines.push(Line::from(Span::styled(
            " Tab/↑↓ move · ←/→ option · Alt+Enter newline · Enter submit · Esc back",
            theme.dim(),
        )));

        let (cursor_row, cursor_column) = self
            .text(self.focus)
            .map_or((0, 0), TextInput::cursor_position);
        let cursor_line = focus_row + cursor_row as usize;
        let height = inner.height as usize;
        let scroll = if height == 0 {
            0
        } else {
            cursor_line.saturating_sub(height.saturating_sub(2))
        };

        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .scroll((scroll as u16, 0)),
            area,
        );

        if loading {
            return;
        }
        if self.text(self.focus).is_some() {
            let row = cursor_line - scroll;
            if row < height {
                let x = inner.x.saturating_add(3).saturating_add(cursor_column);
                if x < inner.x + inner.width {
                    frame.set_cursor_position((x, inner.y + row as u16));
                }
            }
        }
    }
}
