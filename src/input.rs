//! Finding document files on disk and loading them as cheatcodes.

use crate::cheatcode::Cheatcode;
use crate::error::{Error, Result};
use crate::formats;
use chrono::{DateTime, Local};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Expands the given paths into a sorted list of document files.
///
/// Directories are walked recursively and filtered by `extensions`; files named explicitly are
/// kept whatever their suffix.
///
/// # Errors
///
/// Returns an error if a path does not exist or a directory cannot be read.
pub fn find_documents(paths: Vec<PathBuf>, extensions: &[String]) -> io::Result<Vec<PathBuf>> {
    let mut documents = Vec::new();

    for path in paths {
        if path.is_dir() {
            let mut found = Vec::new();
            walk(&path, extensions, &mut found)?;
            found.sort();
            documents.extend(found);
        } else if path.is_file() {
            documents.push(path);
        } else {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("No such file or directory: {}", path.display()),
            ));
        }
    }

    Ok(documents)
}

fn walk(dir: &Path, extensions: &[String], found: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            walk(&path, extensions, found)?;
        } else if has_extension(&path, extensions) {
            found.push(path);
        }
    }
    Ok(())
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

/// Parses one file with the format matching its extension.
///
/// Markdown carries no date of its own, so documents without `lastUpdated` are stamped with the
/// file's modification date.
///
/// # Errors
///
/// Returns an error if the file cannot be read, no format handles it, or it fails to parse.
pub fn load_file(path: &Path) -> Result<Vec<Cheatcode>> {
    let format =
        formats::for_path(path).ok_or_else(|| Error::UnsupportedFormat(path.to_path_buf()))?;
    let source = fs::read_to_string(path)?;
    let id = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default();

    let mut cheatcodes = format
        .parse(&id, &source)
        .map_err(|e| match e {
            Error::Parse { message, .. } => Error::parse(path, message),
            Error::Json(json) => Error::parse(path, json.to_string()),
            other => other,
        })?;

    if let Some(modified) = fs::metadata(path).and_then(|m| m.modified()).ok() {
        let date = DateTime::<Local>::from(modified).format("%Y-%m-%d").to_string();
        for cheatcode in &mut cheatcodes {
            if cheatcode.metadata.last_updated.is_empty() {
                cheatcode.metadata.last_updated.clone_from(&date);
            }
        }
    }

    log::debug!(
        "Loaded {} cheatcode(s) from {} as {}",
        cheatcodes.len(),
        path.display(),
        format.name()
    );
    Ok(cheatcodes)
}

#[must_use]
/// Loads every file, skipping (and logging) those that fail and any repeated document id.
///
/// Documents keep the order of `files`, and within a file the order they were written in.
pub fn load_cheatcodes(files: &[PathBuf]) -> Vec<Cheatcode> {
    let mut cheatcodes = Vec::new();
    let mut seen = HashSet::new();

    for file in files {
        match load_file(file) {
            Ok(loaded) => {
                for cheatcode in loaded {
                    if seen.insert(cheatcode.metadata.id.clone()) {
                        cheatcodes.push(cheatcode);
                    } else {
                        log::warn!(
                            "Skipping duplicate cheatcode id {:?} in {}",
                            cheatcode.metadata.id,
                            file.display()
                        );
                    }
                }
            }
            Err(e) => log::warn!("Skipping {}: {e}", file.display()),
        }
    }

    log::info!(
        "Loaded {} cheatcode(s) from {} file(s)",
        cheatcodes.len(),
        files.len()
    );
    cheatcodes
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
