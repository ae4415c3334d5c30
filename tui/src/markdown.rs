//! Markdown to ratatui lines.
//!
//! Supports the subset slide content uses: headings, paragraphs, emphasis,
//! lists, task lists, quotes, rules, links, inline code, fenced code blocks
//! (highlighted when tagged with a language) and GitHub tables drawn with
//! box-drawing borders.

use crate::highlight::highlight_line;
use crate::theme::Theme;
use pulldown_cmark::{Alignment, CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Render `src` for a viewport `width` columns wide. Width only bounds
/// tables and code panels; prose is left for the paragraph widget to wrap.
pub fn render_markdown(src: &str, theme: Theme, width: u16) -> Vec<Line<'static>> {
    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let mut renderer = Renderer::new(theme, width as usize);
    for event in Parser::new_ext(src, options) {
        renderer.handle(event);
    }
    renderer.finish()
}

struct CodeBlock {
    lang: Option<String>,
    text: String,
}

struct TableState {
    alignments: Vec<Alignment>,
    rows: Vec<Vec<String>>,
    row: Vec<String>,
    cell: String,
    header_rows: usize,
}

struct Renderer {
    theme: Theme,
    width: usize,
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    styles: Vec<Style>,
    lists: Vec<Option<u64>>,
    quote_depth: usize,
    code: Option<CodeBlock>,
    table: Option<TableState>,
    links: Vec<(String, usize)>,
}

impl Renderer {
    fn new(theme: Theme, width: usize) -> Self {
        Self {
            theme,
            width,
            lines: Vec::new(),
            current: Vec::new(),
            styles: Vec::new(),
            lists: Vec::new(),
            quote_depth: 0,
            code: None,
            table: None,
            links: Vec::new(),
        }
    }

    fn style(&self) -> Style {
        self.styles
            .iter()
            .fold(Style::default().fg(self.theme.foreground()), |acc, s| acc.patch(*s))
    }

    fn border(&self) -> Style {
        Style::default().fg(self.theme.border())
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => {
                let style = self.theme.inline_code();
                self.push_span(code.to_string(), style);
            }
            Event::SoftBreak => self.text(" "),
            Event::HardBreak => self.flush_line(),
            Event::Rule => {
                self.flush_line();
                let rule = "─".repeat(self.width.clamp(10, 60));
                self.lines.push(Line::from(Span::styled(rule, self.border())));
                self.blank_line();
            }
            Event::TaskListMarker(done) => {
                let (mark, color) = if done {
                    ("[x] ", self.theme.success())
                } else {
                    ("[ ] ", self.theme.muted())
                };
                self.push_span(mark.to_string(), Style::default().fg(color));
            }
            Event::Html(html) | Event::InlineHtml(html) => {
                let dim = self.theme.dim();
                for (i, part) in html.trim_end_matches('\n').split('\n').enumerate() {
                    if i > 0 {
                        self.flush_line();
                    }
                    self.push_span(part.to_string(), dim);
                }
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => {
                self.flush_line();
                let mut style = Style::default().add_modifier(Modifier::BOLD);
                style = match level {
                    HeadingLevel::H1 => style
                        .fg(self.theme.accent())
                        .add_modifier(Modifier::UNDERLINED),
                    HeadingLevel::H2 => style.fg(self.theme.accent()),
                    _ => style,
                };
                self.styles.push(style);
            }
            Tag::BlockQuote { .. } => {
                self.flush_line();
                self.quote_depth += 1;
                self.styles
                    .push(Style::default().fg(self.theme.muted()).add_modifier(Modifier::ITALIC));
            }
            Tag::CodeBlock(kind) => {
                self.flush_line();
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(|s| s.trim_matches(|c| c == '{' || c == '}' || c == '.').to_string())
                        .filter(|s| !s.is_empty()),
                    CodeBlockKind::Indented => None,
                };
                self.code = Some(CodeBlock {
                    lang,
                    text: String::new(),
                });
            }
            Tag::List(start) => {
                self.flush_line();
                self.lists.push(start);
            }
            Tag::Item => {
                self.flush_line();
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                self.current.push(Span::styled(
                    format!("{indent}{marker}"),
                    Style::default().fg(self.theme.accent()),
                ));
            }
            Tag::Emphasis => self.styles.push(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.styles.push(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => self
                .styles
                .push(Style::default().add_modifier(Modifier::CROSSED_OUT)),
            Tag::Link { dest_url, .. } => {
                self.styles.push(
                    Style::default()
                        .fg(self.theme.link())
                        .add_modifier(Modifier::UNDERLINED),
                );
                self.links.push((dest_url.to_string(), self.current.len()));
            }
            Tag::Table(alignments) => {
                self.flush_line();
                self.table = Some(TableState {
                    alignments,
                    rows: Vec::new(),
                    row: Vec::new(),
                    cell: String::new(),
                    header_rows: 0,
                });
            }
            Tag::TableHead | Tag::TableRow => {
                if let Some(table) = self.table.as_mut() {
                    table.row.clear();
                }
            }
            Tag::TableCell => {
                if let Some(table) = self.table.as_mut() {
                    table.cell.clear();
                }
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                self.flush_line();
                if self.lists.is_empty() {
                    self.blank_line();
                }
            }
            TagEnd::Heading { .. } => {
                self.styles.pop();
                self.flush_line();
                self.blank_line();
            }
            TagEnd::BlockQuote { .. } => {
                self.flush_line();
                self.styles.pop();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                if self.quote_depth == 0 {
                    self.blank_line();
                }
            }
            TagEnd::CodeBlock => {
                if let Some(block) = self.code.take() {
                    self.emit_code(block);
                }
                self.blank_line();
            }
            TagEnd::List { .. } => {
                self.flush_line();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank_line();
                }
            }
            TagEnd::Item => self.flush_line(),
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                self.styles.pop();
            }
            TagEnd::Link => {
                self.styles.pop();
                if let Some((url, start)) = self.links.pop() {
                    let label: String = self
                        .current
                        .get(start..)
                        .unwrap_or_default()
                        .iter()
                        .map(|s| s.content.as_ref())
                        .collect();
                    if self.table.is_none() && !url.is_empty() && label != url {
                        let dim = self.theme.dim();
                        self.push_span(format!(" ({url})"), dim);
                    }
                }
            }
            TagEnd::TableCell => {
                if let Some(table) = self.table.as_mut() {
                    let cell = std::mem::take(&mut table.cell);
                    table.row.push(cell);
                }
            }
            TagEnd::TableHead => {
                if let Some(table) = self.table.as_mut() {
                    let row = std::mem::take(&mut table.row);
                    table.rows.push(row);
                    table.header_rows = table.rows.len();
                }
            }
            TagEnd::TableRow => {
                if let Some(table) = self.table.as_mut() {
                    let row = std::mem::take(&mut table.row);
                    table.rows.push(row);
                }
            }
            TagEnd::Table => {
                if let Some(table) = self.table.take() {
                    self.emit_table(table);
                }
                self.blank_line();
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(code) = self.code.as_mut() {
            code.text.push_str(text);
            return;
        }
        let style = self.style();
        for (i, part) in text.split('\n').enumerate() {
            if i > 0 {
                self.flush_line();
            }
            if !part.is_empty() {
                self.push_span(part.to_string(), style);
            }
        }
    }

    fn push_span(&mut self, content: String, style: Style) {
        if let Some(table) = self.table.as_mut() {
            table.cell.push_str(&content);
        } else {
            self.current.push(Span::styled(content, style));
        }
    }

    fn flush_line(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let mut spans = Vec::with_capacity(self.current.len() + 1);
        if self.quote_depth > 0 {
            spans.push(Span::styled("│ ".repeat(self.quote_depth), self.border()));
        }
        spans.append(&mut self.current);
        self.lines.push(Line::from(spans));
    }

    /// Quote bars and list indentation for block content that bypasses
    /// `flush_line`, and the columns they take.
    fn block_prefix(&self) -> (String, usize) {
        let bars = "│ ".repeat(self.quote_depth);
        let prefix = format!("{bars}{}", "  ".repeat(self.lists.len()));
        let width = prefix.width();
        (prefix, width)
    }

    fn push_block_line(&mut self, prefix: &str, mut spans: Vec<Span<'static>>) {
        if !prefix.is_empty() {
            spans.insert(0, Span::styled(prefix.to_string(), self.border()));
        }
        self.lines.push(Line::from(spans));
    }

    fn blank_line(&mut self) {
        if self.lines.last().is_some_and(|l| !l.spans.is_empty()) {
            self.lines.push(Line::default());
        }
    }

    fn emit_code(&mut self, block: CodeBlock) {
        let code = block.text.strip_suffix('\n').unwrap_or(&block.text);
        let (prefix, used) = self.block_prefix();
        match block.lang {
            Some(lang) => {
                let border = self.border();
                let panel = self.width.saturating_sub(used).clamp(20, 60);
                let fill = panel.saturating_sub(4 + lang.width());
                let header = vec![
                    Span::styled("╭─ ", border),
                    Span::styled(
                        lang.clone(),
                        Style::default()
                            .fg(self.theme.accent())
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!(" {}", "─".repeat(fill)), border),
                ];
                self.push_block_line(&prefix, header);
                for line in code.split('\n') {
                    let mut spans = vec![Span::styled("│ ", border)];
                    spans.extend(highlight_line(line, &lang, self.theme));
                    self.push_block_line(&prefix, spans);
                }
                let footer = Span::styled(format!("╰{}", "─".repeat(panel - 1)), border);
                self.push_block_line(&prefix, vec![footer]);
            }
            None => {
                let style = self.theme.inline_code();
                for line in code.split('\n') {
                    let spans = vec![Span::raw("    "), Span::styled(line.to_string(), style)];
                    self.push_block_line(&prefix, spans);
                }
            }
        }
    }

    fn emit_table(&mut self, table: TableState) {
        let cols = table
            .rows
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
            .max(table.alignments.len());
        if cols == 0 {
            return;
        }

        let (prefix, used) = self.block_prefix();
        let available = self.width.saturating_sub(used);
        let mut widths = vec![1usize; cols];
        for row in &table.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.width());
            }
        }
        if self.width > 0 {
            let total = |w: &[usize]| w.iter().sum::<usize>() + 3 * w.len() + 1;
            while total(&widths) > available {
                let widest = widths.iter().enumerate().max_by_key(|(_, w)| **w);
                let Some((idx, &widest)) = widest else {
                    break;
                };
                if widest <= 3 {
                    break;
                }
                widths[idx] -= 1;
            }
        }

        let border = self.border();
        let rule = |left: &str, fill: &str, mid: &str, right: &str| {
            let inner: Vec<String> = widths.iter().map(|w| fill.repeat(w + 2)).collect();
            vec![Span::styled(format!("{left}{}{right}", inner.join(mid)), border)]
        };

        let mut out = vec![rule("┌", "─", "┬", "┐")];
        for (r, row) in table.rows.iter().enumerate() {
            if r > 0 {
                out.push(if r == table.header_rows {
                    rule("╞", "═", "╪", "╡")
                } else {
                    rule("├", "─", "┼", "┤")
                });
            }
            let cell_style = if r < table.header_rows {
                Style::default()
                    .fg(self.theme.foreground())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.foreground())
            };
            let mut spans = vec![Span::styled("│", border)];
            for (c, width) in widths.iter().enumerate() {
                let text = row.get(c).map_or("", String::as_str);
                let alignment = table.alignments.get(c).copied().unwrap_or(Alignment::None);
                spans.push(Span::styled(
                    format!(" {} ", align(&fit(text, *width), *width, alignment)),
                    cell_style,
                ));
                spans.push(Span::styled("│", border));
            }
            out.push(spans);
        }
        out.push(rule("└", "─", "┴", "┘"));
        for spans in out {
            self.push_block_line(&prefix, spans);
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush_line();
        while self.lines.last().is_some_and(|l| l.spans.is_empty()) {
            self.lines.pop();
        }
        self.lines
    }
}

/// Truncate `text` to `width` columns, marking the cut with an ellipsis.
fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

fn align(text: &str, width: usize, alignment: Alignment) -> String {
    let pad = width.saturating_sub(text.width());
    match alignment {
        Alignment::Right => format!("{}{text}", " ".repeat(pad)),
        Alignment::Center => {
            let left = pad / 2;
            format!("{}{text}{}", " ".repeat(left), " ".repeat(pad - left))
        }
        Alignment::Left | Alignment::None => format!("{text}{}", " ".repeat(pad)),
    }
}
