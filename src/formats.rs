//! Format trait and implementations for different document types.
//!
//! This module defines the `Format` trait which abstracts over the file formats cheatcodes can
//! be written in (JSON, markdown). Each format turns the text of one file into zero or more
//! cheatcodes.

pub mod json;
pub mod markdown;

use crate::cheatcode::Cheatcode;
use crate::error::Result;
use std::path::Path;

/// A file format that cheatcodes can be loaded from.
pub trait Format {
    /// Short human-readable name, used in logs.
    fn name(&self) -> &'static str;

    /// File suffixes (without the dot) this format handles.
    fn extensions(&self) -> &'static [&'static str];

    /// Parse the contents of one file.
    ///
    /// `id` is a fallback identifier derived from the file name, for formats that do not carry
    /// one themselves.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid for this format.
    fn parse(&self, id: &str, source: &str) -> Result<Vec<Cheatcode>>;
}

static FORMATS: [&(dyn Format + Sync); 2] = [&json::JsonFormat, &markdown::MarkdownFormat];

#[must_use]
/// Picks the format whose extensions include the file's suffix (case-insensitive).
pub fn for_path(path: &Path) -> Option<&'static dyn Format> {
    let extension = path.extension()?.to_str()?.to_lowercase();
    FORMATS
        .iter()
        .find(|format| format.extensions().contains(&extension.as_str()))
        .map(|format| -> &'static dyn Format { *format })
}
