//! cheatcodes: a terminal browser for cheatcode reference documents.
#![allow(clippy::multiple_crate_versions)]

use cheatcodes::{app_state, config, input, logging, search, theme, ui};
use clap::Parser;
use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "cheatcodes")]
#[command(about = "Browse and search cheatcode reference documents", long_about = None)]
struct Args {
    /// Files or directories to load (defaults to the configured content directories)
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// File extensions to match
    #[arg(long, short = 'e', value_name = "EXT")]
    ext: Vec<String>,

    /// Print matches for QUERY as JSON and exit
    #[arg(long, short = 'q', value_name = "QUERY")]
    query: Option<String>,

    /// Where the theme preference is stored
    #[arg(long, value_name = "FILE")]
    state_file: Option<PathBuf>,

    /// Where log records are written
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    let mut cfg = config::Config::load();

    // Override config with command line args
    if !args.ext.is_empty() {
        cfg.file_extensions = args.ext;
    }
    let log_file = args.log_file.unwrap_or_else(|| PathBuf::from(&cfg.log_file));
    if let Err(e) = logging::init(&log_file) {
        eprintln!("Logging disabled: {e}");
    }

    let paths = if args.paths.is_empty() {
        cfg.content_dirs
            .iter()
            .map(PathBuf::from)
            .filter(|dir| dir.exists())
            .collect()
    } else {
        args.paths
    };
    let files = input::find_documents(paths, &cfg.file_extensions)?;
    let cheatcodes = input::load_cheatcodes(&files);

    if let Some(query) = args.query {
        let results = search::search(&cheatcodes, &query);
        let json = serde_json::to_string_pretty(&results).map_err(io::Error::other)?;
        println!("{json}");
        return Ok(());
    }

    if cheatcodes.is_empty() {
        eprintln!("No cheatcodes found");
        return Ok(());
    }

    let state_file = args
        .state_file
        .unwrap_or_else(|| PathBuf::from(&cfg.state_file));
    let theme = load_theme(&state_file);
    let state = app_state::AppState::new(cheatcodes, theme);

    run_tui(state)
}

fn load_theme(state_file: &Path) -> theme::ThemeToggle {
    let storage = theme::FileStorage::open(state_file);
    theme::ThemeToggle::load(Box::new(storage), theme::Host::detect())
}

fn run_tui(mut app: app_state::AppState) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        log::error!("Event loop failed: {e}");
        eprintln!("Error: {e}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut app_state::AppState,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.current_view {
            app_state::View::List => {
                app.message = None;
                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Up | KeyCode::Char('k') => app.select_prev_cheatcode(),
                    KeyCode::Down | KeyCode::Char('j') => app.select_next_cheatcode(),
                    KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
                        app.enter_detail_view();
                    }
                    KeyCode::Char('/') => app.enter_search(),
                    KeyCode::Char('d') => app.toggle_theme(),
                    _ => {}
                }
            }
            app_state::View::Detail => {
                app.message = None;
                let shift = key.modifiers.contains(KeyModifiers::SHIFT);
                match key.code {
                    KeyCode::Esc | KeyCode::Char('q') => app.exit_detail_view(),
                    KeyCode::Up if shift => app.go_to_section(app.navigate_to_prev_sibling()),
                    KeyCode::Down if shift => app.go_to_section(app.navigate_to_next_sibling()),
                    KeyCode::Up | KeyCode::Char('k') => {
                        app.go_to_section(app.find_prev_section());
                    }
                    KeyCode::Down | KeyCode::Char('j') => {
                        app.go_to_section(app.find_next_section());
                    }
                    KeyCode::Left | KeyCode::Char('h') => {
                        app.go_to_section(app.navigate_to_parent());
                    }
                    KeyCode::Right | KeyCode::Char('l') => {
                        app.go_to_section(app.navigate_to_first_child());
                    }
                    KeyCode::Home => app.go_to_section(app.navigate_to_first()),
                    KeyCode::End => app.go_to_section(app.navigate_to_last()),
                    KeyCode::Char('/') => app.enter_search(),
                    KeyCode::Char('d') => app.toggle_theme(),
                    _ => {}
                }
            }
            app_state::View::Search => match key.code {
                KeyCode::Esc => app.exit_search(),
                KeyCode::Up => app.select_prev_result(),
                KeyCode::Down => app.select_next_result(),
                KeyCode::Enter => {
                    app.open_selected_result();
                }
                KeyCode::Backspace => app.pop_query_char(),
                KeyCode::Char(c) => app.push_query_char(c),
                _ => {}
            },
        }
    }
}
