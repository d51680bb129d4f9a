//! Cheatcode documents: metadata plus an outline of sections.

use crate::section::Section;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
/// One reference entry, e.g. "Git Basics".
pub struct Cheatcode {
    /// Descriptive fields used for listing and document-level search hits.
    pub metadata: Metadata,
    #[serde(default)]
    /// Top level of the outline, in order.
    pub sections: Vec<Section>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Identity and presentation fields of a cheatcode.
pub struct Metadata {
    /// Stable identifier, unique across loaded documents.
    pub id: String,
    /// Display title.
    pub title: String,
    #[serde(default)]
    /// One-line summary; doubles as the snippet for title hits.
    pub description: String,
    #[serde(default)]
    /// Primary language or tool the document covers.
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Version of the covered tool.
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Short glyph shown next to the title.
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Logo location.
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Accent colour, usually `#rrggbb`.
    pub color: Option<String>,
    #[serde(default)]
    /// Date of the last revision.
    pub last_updated: String,
}

impl Cheatcode {
    #[must_use]
    /// Finds a section by id anywhere in the outline.
    pub fn find_section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find_map(|section| section.find(id))
    }
}
