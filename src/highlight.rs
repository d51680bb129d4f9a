//! Syntax highlighting of code examples with syntect, converted to ratatui lines.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use std::sync::OnceLock;
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();

fn syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme_set() -> &'static ThemeSet {
    THEME_SET.get_or_init(ThemeSet::load_defaults)
}

#[must_use]
/// Highlights `code` as `language` using the named bundled theme.
///
/// Unknown languages are treated as plain text; an unknown theme or a highlighting failure
/// yields unstyled lines.
pub fn highlight_code(code: &str, language: Option<&str>, theme_name: &str) -> Vec<Line<'static>> {
    let plain = || {
        code.lines()
            .map(|line| Line::raw(line.to_string()))
            .collect::<Vec<_>>()
    };

    let Some(theme) = theme_set().themes.get(theme_name) else {
        log::debug!("Unknown syntax theme {theme_name:?}");
        return plain();
    };
    let syntaxes = syntax_set();
    let syntax = language
        .and_then(|token| syntaxes.find_syntax_by_token(token))
        .unwrap_or_else(|| syntaxes.find_syntax_plain_text());

    let mut highlighter = HighlightLines::new(syntax, theme);
    let mut lines = Vec::new();
    for line in LinesWithEndings::from(code) {
        let Ok(ranges) = highlighter.highlight_line(line, syntaxes) else {
            return plain();
        };
        let spans: Vec<Span<'static>> = ranges
            .into_iter()
            .map(|(style, text)| {
                let fg = style.foreground;
                Span::styled(
                    text.trim_end_matches(['\r', '\n']).to_string(),
                    Style::default().fg(Color::Rgb(fg.r, fg.g, fg.b)),
                )
            })
            .collect();
        lines.push(Line::from(spans));
    }
    lines
}

#[cfg(test)]
#[path = "tests/highlight.rs"]
mod tests;
