//! Section representation for cheatcode documents.
//!
//! A section is one node of a document's outline. It owns its subsections outright, so the
//! outline is a plain tree: no parent pointers, no indices, no cycles. Every body part is
//! optional and any combination may be present at once.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Presentation hint for a section. Search ignores it.
pub enum SectionKind {
    #[default]
    /// Prose.
    Text,
    /// Built around a code example.
    Code,
    /// Built around a table.
    Table,
    /// Built around a bullet list.
    List,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Hierarchical document division holding any mix of prose, bullets, code and tables.
pub struct Section {
    /// Identifier, unique within the owning document.
    pub id: String,
    /// Heading text.
    pub title: String,
    #[serde(rename = "type", default)]
    /// Presentation hint.
    pub kind: SectionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Free-text body.
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Bullet items, in order.
    pub items: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Single code example.
    pub code: Option<CodeExample>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Tabular data.
    pub table: Option<Table>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Directly nested sections, in order.
    pub subsections: Option<Vec<Section>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
/// A titled, possibly multi-line code sample.
pub struct CodeExample {
    /// Caption shown above the code.
    pub title: String,
    /// Code body; may span several lines.
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Syntax name or file extension used for highlighting.
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Explanation shown below the code.
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Table whose rows map header names to cell text.
pub struct Table {
    /// Caption shown above the table.
    pub title: String,
    /// Column names, in display order.
    pub headers: Vec<String>,
    /// One map per row, keyed by header.
    pub rows: Vec<BTreeMap<String, String>>,
}

impl Section {
    #[must_use]
    /// Nested sections, or an empty slice when there are none.
    pub fn children(&self) -> &[Section] {
        self.subsections.as_deref().unwrap_or_default()
    }

    #[must_use]
    /// Bullet items, or an empty slice when there are none.
    pub fn item_list(&self) -> &[String] {
        self.items.as_deref().unwrap_or_default()
    }

    #[must_use]
    /// Finds a section by id anywhere in this subtree, visiting in pre-order.
    pub fn find(&self, id: &str) -> Option<&Section> {
        if self.id == id {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(id))
    }
}
