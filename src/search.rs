//! Case-insensitive substring search across a collection of cheatcodes.
//!
//! Each document is checked for a title hit and then walked in pre-order, so results come out
//! in reading order: document by document, a section before its subsections. Every section is
//! checked on its own (a parent hit never hides a child hit) and may yield a title hit, a content
//! hit (prose or bullet item) and a code hit. Once everything has been walked, results are
//! deduplicated on `(cheatcode, section, kind)` keeping the first, then capped.
//!
//! Tables are never inspected.

use crate::cheatcode::Cheatcode;
use crate::section::{CodeExample, Section};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Queries shorter than this many characters return nothing.
pub const MIN_QUERY_LEN: usize = 2;
/// Upper bound on the number of results returned by [`search`].
pub const MAX_RESULTS: usize = 20;
/// Characters of context kept either side of a content match.
pub const SNIPPET_CONTEXT: usize = 40;

const ELLIPSIS: &str = "...";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Where in a document or section the query was found.
pub enum MatchKind {
    /// Document or section title.
    Title,
    /// Section prose or one of its bullet items.
    Content,
    /// Body of the section's code example.
    Code,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// One located hit, with enough context to display it and navigate to it.
pub struct SearchResult {
    /// Id of the document containing the hit.
    pub cheatcode_id: String,
    /// Title of the document containing the hit.
    pub cheatcode_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Icon of the document containing the hit.
    pub cheatcode_icon: Option<String>,
    /// Id of the matching section; empty for a document-level title hit.
    pub section_id: String,
    /// Title of the matching section, or the document title for a document-level hit.
    pub section_title: String,
    #[serde(rename = "type")]
    /// What matched.
    pub kind: MatchKind,
    /// Human-readable excerpt around the hit.
    pub snippet: String,
    /// Breadcrumb from the document title down to the matching section.
    pub path: Vec<String>,
}

#[must_use]
/// Finds every case-insensitive occurrence of `query` in `cheatcodes`.
///
/// Returns at most [`MAX_RESULTS`] records, in discovery order, with no two records sharing the
/// same document id, section id and [`MatchKind`]. Queries shorter than [`MIN_QUERY_LEN`]
/// characters yield an empty list.
pub fn search(cheatcodes: &[Cheatcode], query: &str) -> Vec<SearchResult> {
    if query.chars().count() < MIN_QUERY_LEN {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    let mut results = Vec::new();

    for cheatcode in cheatcodes {
        let mut matcher = Matcher {
            cheatcode,
            needle: &needle,
            results: &mut results,
        };
        matcher.match_document();
    }

    let found = results.len();
    let results = finalize(results);
    log::debug!(
        "search {query:?}: {found} raw hits, {} returned",
        results.len()
    );
    results
}

/// Drops later duplicates of `(cheatcode, section, kind)` and applies the cap.
fn finalize(mut results: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut seen = HashSet::new();
    results.retain(|result| {
        seen.insert((
            result.cheatcode_id.clone(),
            result.section_id.clone(),
            result.kind,
        ))
    });
    results.truncate(MAX_RESULTS);
    results
}

/// Walks one document, appending raw hits.
struct Matcher<'a> {
    cheatcode: &'a Cheatcode,
    needle: &'a str,
    results: &'a mut Vec<SearchResult>,
}

impl Matcher<'_> {
    fn match_document(&mut self) {
        let cheatcode = self.cheatcode;
        let metadata = &cheatcode.metadata;
        let mut path = vec![metadata.title.clone()];

        if contains(&metadata.title, self.needle) {
            self.record(
                "",
                &metadata.title,
                MatchKind::Title,
                metadata.description.clone(),
                &path,
            );
        }

        self.match_sections(&cheatcode.sections, &mut path);
    }

    fn match_sections(&mut self, sections: &[Section], path: &mut Vec<String>) {
        for section in sections {
            path.push(section.title.clone());
            self.match_section(section, path);
            self.match_sections(section.children(), path);
            path.pop();
        }
    }

    fn match_section(&mut self, section: &Section, path: &[String]) {
        if contains(&section.title, self.needle) {
            self.record(
                &section.id,
                &section.title,
                MatchKind::Title,
                section.title.clone(),
                path,
            );
        }

        if let Some(snippet) = section
            .content
            .as_deref()
            .and_then(|content| content_snippet(content, self.needle))
        {
            self.record(
                &section.id,
                &section.title,
                MatchKind::Content,
                snippet,
                path,
            );
        }

        for item in section.item_list() {
            if contains(item, self.needle) {
                self.record(
                    &section.id,
                    &section.title,
                    MatchKind::Content,
                    item.clone(),
                    path,
                );
            }
        }

        if let Some(code) = &section.code {
            if contains(&code.code, self.needle) {
                self.record(
                    &section.id,
                    &section.title,
                    MatchKind::Code,
                    code_snippet(code, self.needle),
                    path,
                );
            }
        }
    }

    fn record(
        &mut self,
        section_id: &str,
        section_title: &str,
        kind: MatchKind,
        snippet: String,
        path: &[String],
    ) {
        let metadata = &self.cheatcode.metadata;
        self.results.push(SearchResult {
            cheatcode_id: metadata.id.clone(),
            cheatcode_title: metadata.title.clone(),
            cheatcode_icon: metadata.icon.clone(),
            section_id: section_id.to_string(),
            section_title: section_title.to_string(),
            kind,
            snippet,
            path: path.to_vec(),
        });
    }
}

/// `needle` must already be lowercase.
fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Cuts a window of [`SNIPPET_CONTEXT`] characters either side of the first match, marking each
/// truncated end with an ellipsis.
fn content_snippet(content: &str, needle: &str) -> Option<String> {
    let lowered = content.to_lowercase();
    let byte_offset = lowered.find(needle)?;

    // Lowercasing can change the char count for a handful of scripts; offsets are only valid
    // against the text they were found in.
    let original: Vec<char> = content.chars().collect();
    let chars: Vec<char> = if lowered.chars().count() == original.len() {
        original
    } else {
        lowered.chars().collect()
    };

    let match_start = lowered[..byte_offset].chars().count();
    let match_end = match_start + needle.chars().count();
    let window_start = match_start.saturating_sub(SNIPPET_CONTEXT);
    let window_end = (match_end + SNIPPET_CONTEXT).min(chars.len());

    let mut snippet = String::new();
    if window_start > 0 {
        snippet.push_str(ELLIPSIS);
    }
    snippet.extend(&chars[window_start..window_end]);
    if window_end < chars.len() {
        snippet.push_str(ELLIPSIS);
    }
    Some(snippet)
}

/// First matching line of the code body, trimmed. A match that only exists across a line
/// break falls back to the example's title.
fn code_snippet(code: &CodeExample, needle: &str) -> String {
    code.code
        .lines()
        .find(|line| contains(line, needle))
        .map_or_else(|| code.title.clone(), |line| line.trim().to_string())
}

#[cfg(test)]
#[path = "tests/search.rs"]
mod tests;
