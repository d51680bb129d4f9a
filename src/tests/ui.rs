use super::{draw, get_tree_prefix, outline_rows};
use crate::app_state::AppState;
use crate::cheatcode::{Cheatcode, Metadata};
use crate::section::{CodeExample, Section};
use crate::theme::{Host, MemoryStorage, ThemeToggle};
use ratatui::{backend::TestBackend, Terminal};

fn app() -> AppState {
    let nested = Section {
        id: "stash".to_string(),
        title: "Stash".to_string(),
        content: Some("Shelve work in progress.".to_string()),
        code: Some(CodeExample {
            title: "Stash it".to_string(),
            code: "git stash push".to_string(),
            language: Some("bash".to_string()),
            description: None,
        }),
        ..Section::default()
    };
    let basics = Section {
        id: "basics".to_string(),
        title: "Basics".to_string(),
        items: Some(vec!["git status".to_string()]),
        subsections: Some(vec![nested]),
        ..Section::default()
    };
    let remote = Section {
        id: "remote".to_string(),
        title: "Remote".to_string(),
        ..Section::default()
    };
    let git = Cheatcode {
        metadata: Metadata {
            id: "git".to_string(),
            title: "Git".to_string(),
            description: "Version control".to_string(),
            language: "bash".to_string(),
            ..Metadata::default()
        },
        sections: vec![basics, remote],
    };
    let host = Host {
        interactive: false,
        prefers_dark: true,
    };
    AppState::new(
        vec![git],
        ThemeToggle::load(Box::new(MemoryStorage::default()), host),
    )
}

fn render(app: &AppState) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
    terminal.draw(|f| draw(f, app)).unwrap();
    let buffer = terminal.backend().buffer();
    buffer
        .content()
        .chunks(usize::from(buffer.area.width))
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_tree_prefix() {
    assert_eq!(get_tree_prefix(0, true, &[]), "");
    assert_eq!(get_tree_prefix(1, false, &[true]), "├── ");
    assert_eq!(get_tree_prefix(2, true, &[true, true]), "│   └── ");
    assert_eq!(get_tree_prefix(2, true, &[true, false]), "    └── ");
}

#[test]
fn test_outline_rows() {
    let mut app = app();
    app.enter_detail_view();

    let rows = outline_rows(&app);

    assert_eq!(
        rows,
        vec![
            (String::new(), "Basics".to_string()),
            ("└── ".to_string(), "Stash".to_string()),
            (String::new(), "Remote".to_string()),
        ]
    );
}

#[test]
fn test_list_view_renders_cheatcodes() {
    let screen = render(&app());

    assert!(screen.contains("Cheatcodes (1)"), "{screen}");
    assert!(screen.contains("Git"));
    assert!(screen.contains("Version control"));
}

#[test]
fn test_detail_view_renders_breadcrumb_and_body() {
    let mut app = app();
    app.enter_detail_view();
    app.current_section_index = 1;

    let screen = render(&app);

    assert!(screen.contains("Git > Basics > Stash"), "{screen}");
    assert!(screen.contains("Shelve work in progress."));
    assert!(screen.contains("git stash push"));
}

#[test]
fn test_search_view_renders_results() {
    let mut app = app();
    app.enter_search();
    for c in "stash".chars() {
        app.push_query_char(c);
    }

    let screen = render(&app);

    assert!(screen.contains("Results (2)"), "{screen}");
    assert!(screen.contains("[title] Git > Basics > Stash"));
    assert!(screen.contains("[code]"));
}
