//! The UI renders the application state into something visible and browsable.
//!
//! The draw function dispatches based on the current view (list, detail or search). The detail
//! view shows the outline as a tree using box-drawing characters next to the selected section's
//! body. Every colour comes from the theme toggle's palette.

use crate::app_state::{AppState, View};
use crate::highlight::highlight_code;
use crate::search::MatchKind;
use crate::section::Section;
use crate::theme::Palette;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Renders the active view based on current application state.
pub fn draw(f: &mut Frame, app: &AppState) {
    let palette = app.theme.palette();
    f.render_widget(
        Block::default().style(Style::default().bg(palette.background).fg(palette.text)),
        f.area(),
    );

    match app.current_view {
        View::List => draw_list(f, app, palette),
        View::Detail => draw_detail(f, app, palette),
        View::Search => draw_search(f, app, palette),
    }
}

fn bordered(title: String, palette: &Palette) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.muted))
        .title(Span::styled(
            title,
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ))
}

fn selected(palette: &Palette) -> Style {
    Style::default()
        .bg(palette.selection)
        .add_modifier(Modifier::BOLD)
}

fn help_bar(f: &mut Frame, area: Rect, app: &AppState, default: &str, palette: &Palette) {
    let text = app.message.as_deref().unwrap_or(default).to_string();
    let help = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.muted)),
    );
    f.render_widget(help, area);
}

fn draw_list(f: &mut Frame, app: &AppState, palette: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    let items: Vec<ListItem> = app
        .cheatcodes
        .iter()
        .map(|cheatcode| {
            let meta = &cheatcode.metadata;
            let mut spans = Vec::new();
            if let Some(icon) = &meta.icon {
                spans.push(Span::raw(format!("{icon} ")));
            }
            spans.push(Span::styled(
                meta.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ));
            if !meta.language.is_empty() {
                spans.push(Span::styled(
                    format!("  [{}]", meta.language),
                    Style::default().fg(palette.accent),
                ));
            }
            if !meta.description.is_empty() {
                spans.push(Span::styled(
                    format!("  {}", meta.description),
                    Style::default().fg(palette.muted),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(bordered(
            format!("Cheatcodes ({})", app.cheatcodes.len()),
            palette,
        ))
        .highlight_style(selected(palette));
    let mut state = ListState::default().with_selected(Some(app.current_cheatcode_index));
    f.render_stateful_widget(list, chunks[0], &mut state);

    help_bar(
        f,
        chunks[1],
        app,
        "↑/↓: Navigate | Enter: Open | /: Search | d: Dark/Light | q: Quit",
        palette,
    );
}

/// Generate box-drawing prefix for tree structure
fn get_tree_prefix(depth: usize, is_last: bool, parent_states: &[bool]) -> String {
    if depth == 0 {
        return String::new();
    }

    let mut prefix = String::new();

    // Draw vertical lines for ancestor levels that still have siblings to come
    for i in 0..depth.saturating_sub(1) {
        if parent_states.get(i + 1).copied().unwrap_or(false) {
            prefix.push_str("│   ");
        } else {
            prefix.push_str("    ");
        }
    }

    if is_last {
        prefix.push_str("└── ");
    } else {
        prefix.push_str("├── ");
    }

    prefix
}

/// Outline rows as `(prefix, title)`, with box-drawing prefixes.
fn outline_rows(app: &AppState) -> Vec<(String, String)> {
    let entries = &app.outline;

    // Calculate which entries are last among their siblings
    let is_last: Vec<bool> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            !entries[i + 1..]
                .iter()
                .take_while(|next| next.depth >= entry.depth)
                .any(|next| next.depth == entry.depth)
        })
        .collect();

    // Track which depths still have siblings coming
    let mut has_more: Vec<bool> = Vec::new();
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            has_more.truncate(entry.depth);
            let prefix = get_tree_prefix(entry.depth, is_last[i], &has_more);
            has_more.push(!is_last[i]);
            (prefix, entry.title.clone())
        })
        .collect()
}

fn draw_detail(f: &mut Frame, app: &AppState, palette: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Breadcrumb
            Constraint::Min(0),    // Outline and body
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    let breadcrumb = Paragraph::new(app.breadcrumb().join(" > "))
        .style(Style::default().fg(palette.muted))
        .block(bordered("Navigation".to_string(), palette));
    f.render_widget(breadcrumb, chunks[0]);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(chunks[1]);

    let items: Vec<ListItem> = outline_rows(app)
        .into_iter()
        .map(|(prefix, title)| {
            ListItem::new(Line::from(vec![
                Span::styled(prefix, Style::default().fg(palette.muted)),
                Span::raw(title),
            ]))
        })
        .collect();
    let title = app
        .current_cheatcode()
        .map_or_else(String::new, |c| c.metadata.title.clone());
    let outline = List::new(items)
        .block(bordered(title, palette))
        .highlight_style(selected(palette));
    let mut state = ListState::default().with_selected(Some(app.current_section_index));
    f.render_stateful_widget(outline, panes[0], &mut state);

    let (section_title, body) = app.current_section().map_or_else(
        || ("Empty".to_string(), vec![Line::raw("This cheatcode has no sections.")]),
        |section| (section.title.clone(), section_lines(section, palette)),
    );
    let body = Paragraph::new(body)
        .block(bordered(section_title, palette))
        .wrap(Wrap { trim: false });
    f.render_widget(body, panes[1]);

    help_bar(
        f,
        chunks[2],
        app,
        "↑/↓: Section | ←/→: Parent/Child | Shift+↑/↓: Sibling | /: Search | d: Dark/Light | Esc: Back",
        palette,
    );
}

/// Body of one section: prose, bullets, highlighted code, then the table.
fn section_lines(section: &Section, palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let heading = Style::default()
        .fg(palette.accent)
        .add_modifier(Modifier::BOLD);
    let muted = Style::default().fg(palette.muted);

    if let Some(content) = &section.content {
        lines.extend(content.lines().map(|line| Line::raw(line.to_string())));
        lines.push(Line::raw(""));
    }

    for item in section.item_list() {
        lines.push(Line::from(vec![
            Span::styled("• ", Style::default().fg(palette.accent)),
            Span::raw(item.clone()),
        ]));
    }
    if !section.item_list().is_empty() {
        lines.push(Line::raw(""));
    }

    if let Some(code) = &section.code {
        lines.push(Line::styled(code.title.clone(), heading));
        lines.extend(highlight_code(
            &code.code,
            code.language.as_deref(),
            palette.syntax_theme,
        ));
        if let Some(description) = &code.description {
            lines.push(Line::styled(description.clone(), muted));
        }
        lines.push(Line::raw(""));
    }

    if let Some(table) = &section.table {
        if !table.title.is_empty() {
            lines.push(Line::styled(table.title.clone(), heading));
        }
        lines.push(Line::styled(
            table.headers.join(" | "),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        for row in &table.rows {
            let cells: Vec<&str> = table
                .headers
                .iter()
                .map(|header| row.get(header).map_or("", String::as_str))
                .collect();
            lines.push(Line::raw(cells.join(" | ")));
        }
    }

    if !section.children().is_empty() {
        let names: Vec<&str> = section.children().iter().map(|s| s.title.as_str()).collect();
        lines.push(Line::styled(format!("→ {}", names.join(", ")), muted));
    }

    lines
}

fn draw_search(f: &mut Frame, app: &AppState, palette: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Query
            Constraint::Min(0),    // Results
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    let input = Paragraph::new(Line::from(vec![
        Span::raw(app.query.clone()),
        Span::styled("▏", Style::default().fg(palette.accent)),
    ]))
    .block(bordered("Search".to_string(), palette));
    f.render_widget(input, chunks[0]);

    let items: Vec<ListItem> = app
        .results
        .iter()
        .map(|result| {
            let tag = match result.kind {
                MatchKind::Title => "title",
                MatchKind::Content => "content",
                MatchKind::Code => "code",
            };
            let icon = result
                .cheatcode_icon
                .as_deref()
                .map_or_else(String::new, |icon| format!("{icon} "));
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(format!("[{tag}] "), Style::default().fg(palette.accent)),
                    Span::raw(icon),
                    Span::styled(
                        result.path.join(" > "),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::styled(
                    format!("    {}", result.snippet.trim()),
                    Style::default().fg(palette.muted),
                ),
            ])
        })
        .collect();

    let results = List::new(items)
        .block(bordered(format!("Results ({})", app.results.len()), palette))
        .highlight_style(selected(palette));
    let mut state = ListState::default()
        .with_selected((!app.results.is_empty()).then_some(app.current_result_index));
    f.render_stateful_widget(results, chunks[1], &mut state);

    help_bar(
        f,
        chunks[2],
        app,
        "Type to search | ↑/↓: Select | Enter: Open | Esc: Back",
        palette,
    );
}

#[cfg(test)]
#[path = "tests/ui.rs"]
mod tests;
