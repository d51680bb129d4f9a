//! cheatcodes: browse and search cheatcode reference documents in the terminal.
//!
//! Documents are loaded from JSON or markdown files into [`cheatcode::Cheatcode`] values, which
//! [`search::search`] walks to find case-insensitive matches. The remaining modules wire this
//! into an interactive browser.
#![allow(clippy::multiple_crate_versions)]

pub mod app_state;
pub mod cheatcode;
pub mod config;
pub mod error;
pub mod formats;
pub mod highlight;
pub mod input;
pub mod logging;
pub mod search;
pub mod section;
pub mod theme;
pub mod ui;

pub use cheatcode::{Cheatcode, Metadata};
pub use search::{search, MatchKind, SearchResult};
pub use section::{CodeExample, Section, SectionKind, Table};
