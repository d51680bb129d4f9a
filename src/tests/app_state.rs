use super::{AppState, View};
use crate::cheatcode::{Cheatcode, Metadata};
use crate::section::Section;
use crate::theme::{Host, MemoryStorage, Storage, ThemeToggle, DARK_MODE_KEY};

fn section(id: &str, title: &str, subsections: Vec<Section>) -> Section {
    Section {
        id: id.to_string(),
        title: title.to_string(),
        subsections: (!subsections.is_empty()).then_some(subsections),
        ..Section::default()
    }
}

fn cheatcode(id: &str, title: &str, sections: Vec<Section>) -> Cheatcode {
    Cheatcode {
        metadata: Metadata {
            id: id.to_string(),
            title: title.to_string(),
            ..Metadata::default()
        },
        sections,
    }
}

/// Outline of "Git":
///
/// ```text
/// Setup          0
///   Identity     1
///   Aliases      2
///     Short      3
/// Branches       4
/// ```
fn app() -> AppState {
    let git = cheatcode(
        "git",
        "Git",
        vec![
            section(
                "setup",
                "Setup",
                vec![
                    section("identity", "Identity", vec![]),
                    section(
                        "aliases",
                        "Aliases",
                        vec![section("short", "Short", vec![])],
                    ),
                ],
            ),
            section("branches", "Branches", vec![]),
        ],
    );
    let vim = cheatcode("vim", "Vim", vec![section("motions", "Motions", vec![])]);
    let host = Host {
        interactive: true,
        prefers_dark: true,
    };
    let theme = ThemeToggle::load(Box::new(MemoryStorage::default()), host);
    AppState::new(vec![git, vim], theme)
}

#[test]
fn test_outline_is_preorder_with_links() {
    let mut app = app();
    app.enter_detail_view();

    let titles: Vec<&str> = app.outline.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Setup", "Identity", "Aliases", "Short", "Branches"]);
    assert_eq!(app.outline[0].children_indices, vec![1, 2]);
    assert_eq!(app.outline[3].parent_index, Some(2));
    assert_eq!(app.outline[3].depth, 2);
    assert_eq!(app.current_view, View::Detail);
}

#[test]
fn test_outline_navigation() {
    let mut app = app();
    app.enter_detail_view();

    assert_eq!(app.navigate_to_next_sibling(), Some(4));
    assert_eq!(app.navigate_to_first_child(), Some(1));
    assert_eq!(app.navigate_to_parent(), None);

    app.current_section_index = 1;
    assert_eq!(app.navigate_to_next_sibling(), Some(2));
    assert_eq!(app.navigate_to_prev_sibling(), None);
    assert_eq!(app.navigate_to_parent(), Some(0));

    app.current_section_index = 3;
    assert_eq!(app.navigate_to_next_sibling(), None);
    assert_eq!(app.find_next_section(), Some(4));
    assert_eq!(app.find_prev_section(), Some(2));
    assert_eq!(app.navigate_to_last(), Some(4));
    assert_eq!(
        app.breadcrumb(),
        vec!["Git", "Setup", "Aliases", "Short"]
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>()
    );

    app.go_to_section(app.navigate_to_first());
    assert_eq!(app.current_section_index, 0);
    assert_eq!(app.current_section().map(|s| s.id.as_str()), Some("setup"));
}

#[test]
fn test_list_selection_bounds() {
    let mut app = app();

    app.select_prev_cheatcode();
    assert_eq!(app.current_cheatcode_index, 0);
    app.select_next_cheatcode();
    app.select_next_cheatcode();
    assert_eq!(app.current_cheatcode_index, 1);

    app.enter_detail_view();
    assert_eq!(app.outline.len(), 1);
    app.exit_detail_view();
    assert!(app.outline.is_empty());
    assert_eq!(app.current_view, View::List);
}

#[test]
fn test_search_updates_as_query_is_typed() {
    let mut app = app();
    app.enter_search();

    app.push_query_char('s');
    assert!(app.results.is_empty(), "single character is too short");

    app.push_query_char('h');
    let titles: Vec<&str> = app
        .results
        .iter()
        .map(|r| r.section_title.as_str())
        .collect();
    assert_eq!(titles, vec!["Short"]);

    app.pop_query_char();
    assert!(app.results.is_empty());

    app.exit_search();
    assert_eq!(app.current_view, View::List);
}

#[test]
fn test_open_result_jumps_to_section() {
    let mut app = app();
    app.enter_search();
    for c in "aliases".chars() {
        app.push_query_char(c);
    }

    assert!(app.open_selected_result());
    assert_eq!(app.current_view, View::Detail);
    assert_eq!(app.current_cheatcode_index, 0);
    assert_eq!(app.outline[app.current_section_index].section_id, "aliases");
}

#[test]
fn test_open_document_level_result() {
    let mut app = app();
    app.enter_search();
    for c in "vim".chars() {
        app.push_query_char(c);
    }

    assert_eq!(app.results[0].section_id, "");
    assert!(app.open_selected_result());
    assert_eq!(app.current_cheatcode_index, 1);
    assert_eq!(app.current_section_index, 0);
}

#[test]
fn test_open_without_results() {
    let mut app = app();
    app.enter_search();

    assert!(!app.open_selected_result());
    assert_eq!(app.current_view, View::Search);
}

#[test]
fn test_search_returns_to_detail() {
    let mut app = app();
    app.enter_detail_view();
    app.enter_search();
    app.exit_search();

    assert_eq!(app.current_view, View::Detail);
}

#[test]
fn test_toggle_theme() {
    let mut app = app();

    app.toggle_theme();

    assert!(!app.theme.is_dark());
    assert_eq!(app.message.as_deref(), Some("Light mode"));
    assert_eq!(
        app.theme.storage().get(DARK_MODE_KEY).as_deref(),
        Some("light")
    );
}
