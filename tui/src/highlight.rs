//! Small lexical highlighter for fenced code blocks.
//!
//! Knows keywords, comment markers and quote characters for a handful of
//! language families; strings, numbers and comments are coloured for any tag.

use crate::theme::Theme;
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

struct Syntax {
    keywords: &'static [&'static str],
    line_comment: Option<&'static str>,
    quotes: &'static [char],
    case_insensitive: bool,
}

const RUST: Syntax = Syntax {
    keywords: &[
        "as", "async", "await", "break", "const", "continue", "crate", "else", "enum", "false",
        "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub",
        "ref", "return", "self", "Self", "static", "struct", "trait", "true", "type", "use",
        "where", "while", "Some", "None", "Ok", "Err",
    ],
    line_comment: Some("//"),
    quotes: &['"'],
    case_insensitive: false,
};

const PYTHON: Syntax = Syntax {
    keywords: &[
        "and", "as", "async", "await", "break", "class", "continue", "def", "elif", "else",
        "except", "False", "finally", "for", "from", "if", "import", "in", "is", "lambda",
        "None", "not", "or", "pass", "raise", "return", "True", "try", "while", "with", "yield",
    ],
    line_comment: Some("#"),
    quotes: &['"', '\''],
    case_insensitive: false,
};

const JAVASCRIPT: Syntax = Syntax {
    keywords: &[
        "async", "await", "break", "case", "catch", "class", "const", "continue", "default",
        "else", "export", "extends", "false", "for", "from", "function", "if", "import",
        "interface", "let", "new", "null", "return", "switch", "this", "throw", "true", "try",
        "type", "typeof", "undefined", "var", "while",
    ],
    line_comment: Some("//"),
    quotes: &['"', '\'', '`'],
    case_insensitive: false,
};

const GO: Syntax = Syntax {
    keywords: &[
        "break", "case", "chan", "const", "continue", "defer", "else", "false", "for", "func",
        "go", "if", "import", "interface", "map", "nil", "package", "range", "return", "select",
        "struct", "switch", "true", "type", "var",
    ],
    line_comment: Some("//"),
    quotes: &['"', '`'],
    case_insensitive: false,
};

const C_FAMILY: Syntax = Syntax {
    keywords: &[
        "bool", "break", "case", "char", "class", "const", "continue", "double", "else", "enum",
        "false", "float", "for", "if", "int", "long", "namespace", "new", "null", "private",
        "protected", "public", "return", "static", "struct", "switch", "this", "true", "using",
        "void", "while",
    ],
    line_comment: Some("//"),
    quotes: &['"', '\''],
    case_insensitive: false,
};

const SHELL: Syntax = Syntax {
    keywords: &[
        "case", "do", "done", "echo", "elif", "else", "esac", "export", "fi", "for", "function",
        "if", "in", "local", "return", "then", "while",
    ],
    line_comment: Some("#"),
    quotes: &['"', '\''],
    case_insensitive: false,
};

const SQL: Syntax = Syntax {
    keywords: &[
        "and", "as", "by", "create", "delete", "from", "group", "insert", "into", "join",
        "limit", "not", "null", "on", "or", "order", "select", "set", "table", "update",
        "values", "where",
    ],
    line_comment: Some("--"),
    quotes: &['\''],
    case_insensitive: true,
};

const DATA: Syntax = Syntax {
    keywords: &["true", "false", "null"],
    line_comment: Some("#"),
    quotes: &['"', '\''],
    case_insensitive: false,
};

const JSON: Syntax = Syntax {
    keywords: &["true", "false", "null"],
    line_comment: None,
    quotes: &['"'],
    case_insensitive: false,
};

const PLAIN: Syntax = Syntax {
    keywords: &[],
    line_comment: None,
    quotes: &['"'],
    case_insensitive: false,
};

fn syntax_for(lang: &str) -> &'static Syntax {
    match lang.to_ascii_lowercase().as_str() {
        "rust" | "rs" => &RUST,
        "python" | "py" => &PYTHON,
        "javascript" | "js" | "jsx" | "typescript" | "ts" | "tsx" => &JAVASCRIPT,
        "go" | "golang" => &GO,
        "c" | "cpp" | "c++" | "h" | "java" | "cs" | "csharp" | "kotlin" | "swift" => &C_FAMILY,
        "sh" | "bash" | "shell" | "zsh" | "console" => &SHELL,
        "sql" => &SQL,
        "yaml" | "yml" | "toml" | "ini" => &DATA,
        "json" => &JSON,
        _ => &PLAIN,
    }
}

/// Split one line of code into styled spans.
pub fn highlight_line(line: &str, lang: &str, theme: Theme) -> Vec<Span<'static>> {
    let syntax = syntax_for(lang);
    let plain = Style::default().fg(theme.foreground());
    let keyword = Style::default().fg(theme.keyword()).add_modifier(Modifier::BOLD);
    let string = Style::default().fg(theme.string());
    let number = Style::default().fg(theme.number());
    let comment = Style::default().fg(theme.muted()).add_modifier(Modifier::ITALIC);

    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut pending = String::new();
    let chars: Vec<(usize, char)> = line.char_indices().collect();
    let mut i = 0;

    let flush = |pending: &mut String, spans: &mut Vec<Span<'static>>| {
        if !pending.is_empty() {
            spans.push(Span::styled(std::mem::take(pending), plain));
        }
    };

    while i < chars.len() {
        let (byte, c) = chars[i];

        if let Some(marker) = syntax.line_comment {
            if line[byte..].starts_with(marker) {
                flush(&mut pending, &mut spans);
                spans.push(Span::styled(line[byte..].to_string(), comment));
                return spans;
            }
        }

        if syntax.quotes.contains(&c) {
            flush(&mut pending, &mut spans);
            let mut j = i + 1;
            let mut escaped = false;
            while j < chars.len() {
                let ch = chars[j].1;
                if escaped {
                    escaped = false;
                } else if ch == '\\' {
                    escaped = true;
                } else if ch == c {
                    break;
                }
                j += 1;
            }
            let end = chars.get(j + 1).map_or(line.len(), |(b, _)| *b);
            spans.push(Span::styled(line[byte..end].to_string(), string));
            i = j + 1;
            continue;
        }

        if c.is_ascii_digit() {
            flush(&mut pending, &mut spans);
            let mut j = i;
            while j < chars.len()
                && (chars[j].1.is_ascii_alphanumeric() || matches!(chars[j].1, '.' | '_'))
            {
                j += 1;
            }
            let end = chars.get(j).map_or(line.len(), |(b, _)| *b);
            spans.push(Span::styled(line[byte..end].to_string(), number));
            i = j;
            continue;
        }

        if c.is_alphabetic() || c == '_' {
            let mut j = i;
            while j < chars.len() && (chars[j].1.is_alphanumeric() || chars[j].1 == '_') {
                j += 1;
            }
            let end = chars.get(j).map_or(line.len(), |(b, _)| *b);
            let word = &line[byte..end];
            let is_keyword = if syntax.case_insensitive {
                syntax.keywords.iter().any(|k| k.eq_ignore_ascii_case(word))
            } else {
                syntax.keywords.contains(&word)
            };
            if is_keyword {
                flush(&mut pending, &mut spans);
                spans.push(Span::styled(word.to_string(), keyword));
            } else {
                pending.push_str(word);
            }
            i = j;
            continue;
        }

        pending.push(c);
        i += 1;
    }

    flush(&mut pending, &mut spans);
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styled(spans: &[Span<'_>], theme: Theme) -> Vec<(String, &'static str)> {
        spans
            .iter()
            .map(|s| {
                let kind = match s.style.fg {
                    Some(c) if c == theme.keyword() => "kw",
                    Some(c) if c == theme.string() => "str",
                    Some(c) if c == theme.number() => "num",
                    Some(c) if c == theme.muted() => "comment",
                    _ => "plain",
                };
                (s.content.to_string(), kind)
            })
            .collect()
    }

    #[test]
    fn rust_keywords_strings_and_comments() {
        let theme = Theme::default();
        let spans = highlight_line(r#"let name = "cat"; // pet"#, "rust", theme);
        assert_eq!(
            styled(&spans, theme),
            vec![
                ("let".to_string(), "kw"),
                (" name = ".to_string(), "plain"),
                ("\"cat\"".to_string(), "str"),
                ("; ".to_string(), "plain"),
                ("// pet".to_string(), "comment"),
            ]
        );
    }

    #[test]
    fn python_hash_comment_and_numbers() {
        let theme = Theme::default();
        let spans = highlight_line("return 42  # answer", "py", theme);
        let kinds: Vec<&str> = styled(&spans, theme).into_iter().map(|(_, k)| k).collect();
        assert_eq!(kinds, ["kw", "plain", "num", "plain", "comment"]);
    }

    #[test]
    fn escaped_quotes_stay_inside_string() {
        let theme = Theme::default();
        let spans = highlight_line(r#"x = "a\"b" + y"#, "js", theme);
        assert!(styled(&spans, theme).contains(&(r#""a\"b""#.to_string(), "str")));
    }

    #[test]
    fn sql_keywords_ignore_case() {
        let theme = Theme::default();
        let spans = highlight_line("SELECT id FROM cats", "sql", theme);
        let keywords: Vec<String> = styled(&spans, theme)
            .into_iter()
            .filter(|(_, k)| *k == "kw")
            .map(|(t, _)| t)
            .collect();
        assert_eq!(keywords, ["SELECT", "FROM"]);
    }

    #[test]
    fn unknown_language_has_no_keywords() {
        let theme = Theme::default();
        let spans = highlight_line("let x = 1", "brainfudge", theme);
        assert!(styled(&spans, theme).iter().all(|(_, k)| *k != "kw"));
    }

    #[test]
    fn unterminated_string_runs_to_end_of_line() {
        let theme = Theme::default();
        let spans = highlight_line("print('open", "python", theme);
        assert_eq!(spans.last().map(|s| s.content.to_string()), Some("'open".to_string()));
    }

    #[test]
    fn output_preserves_text() {
        let theme = Theme::new(true);
        let line = "fn main() { println!(\"héllo {}\", 3.14); } // done";
        let joined: String = highlight_line(line, "rust", theme)
            .iter()
            .map(|s| s.content.to_string())
            .collect();
        assert_eq!(joined, line);
    }
}
