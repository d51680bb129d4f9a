//! Logging setup.
//!
//! The interactive browser owns the terminal, so records go to a file instead of stderr.
//! Verbosity follows `RUST_LOG` and defaults to `info`.

use crate::error::Result;
use std::fs::OpenOptions;
use std::path::Path;

/// Installs `env_logger`, appending to the file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or a logger is already installed.
pub fn init(path: &Path) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_secs()
        .try_init()?;

    log::info!("cheatcodes v{} starting", env!("CARGO_PKG_VERSION"));
    Ok(())
}
