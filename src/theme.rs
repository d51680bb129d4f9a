//! Dark/light preference, persisted across sessions.
//!
//! One flag drives two effects that are invoked explicitly after every change: the palette the
//! UI draws with is swapped, and the choice is written to the key-value store as `"dark"` or
//! `"light"` under [`DARK_MODE_KEY`]. On start-up a stored choice wins, otherwise the terminal's
//! colour hint decides. When the host is not an interactive terminal the store is never touched.

use crate::error::Result;
use ratatui::style::Color;
use std::collections::BTreeMap;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

/// Store key holding the preference.
pub const DARK_MODE_KEY: &str = "darkMode";
const DARK: &str = "dark";
const LIGHT: &str = "light";

/// String key-value store for small client-side preferences.
pub trait Storage {
    /// Returns the stored value, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be persisted.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Store kept in memory only.
#[derive(Default, Debug, Clone)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a flat JSON object on disk, rewritten on every `set`.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStorage {
    #[must_use]
    /// Opens the store at `path`. A missing or unreadable file starts an empty store.
    pub fn open(path: &Path) -> Self {
        let entries = match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                log::warn!("Ignoring unreadable state file {}: {e}", path.display());
                BTreeMap::new()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                log::warn!("Cannot read state file {}: {e}", path.display());
                BTreeMap::new()
            }
        };

        Self {
            path: path.to_path_buf(),
            entries,
        }
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// What the surrounding environment offers the theme toggle.
pub struct Host {
    /// Whether a user is attached; the store is skipped otherwise.
    pub interactive: bool,
    /// The platform's colour-scheme hint.
    pub prefers_dark: bool,
}

impl Host {
    #[must_use]
    /// Reads interactivity from stdout and the colour hint from `COLORFGBG`.
    pub fn detect() -> Self {
        Self {
            interactive: io::stdout().is_terminal(),
            prefers_dark: prefers_dark(env::var("COLORFGBG").ok().as_deref()),
        }
    }
}

#[must_use]
/// Interprets a `COLORFGBG` value (`"fg;bg"` or `"fg;other;bg"`).
///
/// Backgrounds 0-6 and 8 are the dark ANSI colours. Anything unreadable counts as dark, which is
/// what most terminals default to.
pub fn prefers_dark(colorfgbg: Option<&str>) -> bool {
    colorfgbg
        .and_then(|value| value.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok())
        .is_none_or(|bg| bg <= 6 || bg == 8)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Colours the UI draws with.
pub struct Palette {
    /// Base background.
    pub background: Color,
    /// Primary text.
    pub text: Color,
    /// Secondary text such as breadcrumbs and snippets.
    pub muted: Color,
    /// Titles and focused borders.
    pub accent: Color,
    /// Selected row background.
    pub selection: Color,
    /// Name of the bundled syntect theme for code examples.
    pub syntax_theme: &'static str,
}

impl Palette {
    #[must_use]
    /// Light text on a charcoal background.
    pub const fn dark() -> Self {
        Self {
            background: Color::Rgb(0x1E, 0x1E, 0x24),
            text: Color::Rgb(0xE0, 0xE0, 0xE0),
            muted: Color::Rgb(0x80, 0x80, 0x80),
            accent: Color::Rgb(0x00, 0x96, 0x88),
            selection: Color::Rgb(0x12, 0x3A, 0x3A),
            syntax_theme: "base16-ocean.dark",
        }
    }

    #[must_use]
    /// Dark text on a paper background.
    pub const fn light() -> Self {
        Self {
            background: Color::Rgb(0xFA, 0xFA, 0xF7),
            text: Color::Rgb(0x20, 0x20, 0x20),
            muted: Color::Rgb(0x70, 0x70, 0x70),
            accent: Color::Rgb(0x00, 0x4D, 0x40),
            selection: Color::Rgb(0xD0, 0xEC, 0xE8),
            syntax_theme: "InspiredGitHub",
        }
    }
}

/// Owns the dark-mode flag and its effects.
pub struct ThemeToggle {
    is_dark: bool,
    host: Host,
    storage: Box<dyn Storage>,
    palette: Palette,
}

impl ThemeToggle {
    #[must_use]
    /// Restores the preference: stored value first, then the host hint.
    pub fn load(storage: Box<dyn Storage>, host: Host) -> Self {
        let stored = if host.interactive {
            storage.get(DARK_MODE_KEY)
        } else {
            None
        };

        let is_dark = match stored.as_deref() {
            Some(DARK) => true,
            Some(LIGHT) => false,
            Some(other) => {
                log::warn!("Ignoring unknown {DARK_MODE_KEY} value {other:?}");
                host.prefers_dark
            }
            None => host.prefers_dark,
        };
        log::debug!("Theme loaded: dark={is_dark} (stored={stored:?})");

        let mut toggle = Self {
            is_dark,
            host,
            storage,
            palette: Palette::dark(),
        };
        toggle.sync_palette();
        toggle
    }

    #[must_use]
    /// Current flag value.
    pub fn is_dark(&self) -> bool {
        self.is_dark
    }

    #[must_use]
    /// Palette matching the current flag.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    #[must_use]
    /// The underlying store.
    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    /// Flips the flag.
    pub fn toggle(&mut self) {
        self.set_dark(!self.is_dark);
    }

    /// Sets the flag, then re-syncs the palette and persists the choice.
    pub fn set_dark(&mut self, is_dark: bool) {
        self.is_dark = is_dark;
        self.sync_palette();
        self.persist();
    }

    fn sync_palette(&mut self) {
        self.palette = if self.is_dark {
            Palette::dark()
        } else {
            Palette::light()
        };
    }

    fn persist(&mut self) {
        if !self.host.interactive {
            return;
        }
        let value = if self.is_dark { DARK } else { LIGHT };
        if let Err(e) = self.storage.set(DARK_MODE_KEY, value) {
            log::warn!("Could not persist theme preference: {e}");
        }
    }
}

#[cfg(test)]
#[path = "tests/theme.rs"]
mod tests;
