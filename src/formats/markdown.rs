//! Markdown cheatcodes using tree-sitter-md.
//!
//! The block grammar nests a `section` node under each ATX heading, which maps directly onto the
//! section tree. The first `#` heading names the document and its opening paragraphs describe
//! it; the headings nested under it become the top-level sections. Inside a section, paragraphs
//! become content, list items become bullet items, the first fenced code block becomes the code
//! example and a pipe table becomes the table.

use crate::cheatcode::{Cheatcode, Metadata};
use crate::error::{Error, Result};
use crate::formats::Format;
use crate::section::{CodeExample, Section, SectionKind, Table};
use std::collections::{BTreeMap, HashSet};
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Parser, Query, QueryCursor};

/// Tree-sitter backed reader for markdown cheatsheets.
pub struct MarkdownFormat;

impl MarkdownFormat {
    #[must_use]
    /// The tree-sitter block grammar for markdown.
    pub fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    #[must_use]
    /// Captures the language named in each fenced code block's info string.
    pub fn code_language_query(&self) -> &'static str {
        "(fenced_code_block (info_string (language) @language))"
    }
}

impl Format for MarkdownFormat {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["md", "markdown"]
    }

    fn parse(&self, id: &str, source: &str) -> Result<Vec<Cheatcode>> {
        let language = self.language();
        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|e| Error::parse(id, e.to_string()))?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| Error::parse(id, "tree-sitter produced no tree"))?;
        let root = tree.root_node();

        let mut builder = Builder {
            source,
            ids: HashSet::new(),
        };
        let mut metadata = Metadata {
            id: id.to_string(),
            title: id.to_string(),
            language: first_code_language(&language, self.code_language_query(), root, source)
                .map_err(|e| Error::parse(id, e))?
                .unwrap_or_default(),
            ..Metadata::default()
        };
        let mut sections = Vec::new();
        let mut titled = false;
        let mut preamble = Vec::new();

        let mut cursor = root.walk();
        for child in root.children(&mut cursor) {
            match child.kind() {
                "section" if heading_level(child).is_none() => {
                    preamble.extend(builder.paragraphs(child));
                }
                "section" if !titled && heading_level(child) == Some(1) => {
                    titled = true;
                    let (title, description, subsections) = builder.document_head(child);
                    metadata.title = title;
                    metadata.description = description;
                    sections.extend(subsections);
                }
                "section" => sections.push(builder.section(child)),
                "paragraph" => preamble.push(builder.text(child).trim().to_string()),
                _ => {}
            }
        }

        if metadata.description.is_empty() {
            metadata.description = preamble.join(" ");
        }

        Ok(vec![Cheatcode { metadata, sections }])
    }
}

/// Runs the code-language query and returns the first capture.
fn first_code_language(
    language: &tree_sitter::Language,
    query_source: &str,
    root: Node,
    source: &str,
) -> std::result::Result<Option<String>, String> {
    let query = Query::new(language, query_source).map_err(|e| e.to_string())?;
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, root, source.as_bytes());

    while let Some(m) = matches.next() {
        if let Some(capture) = m.captures.first() {
            let text = source
                .get(capture.node.byte_range())
                .unwrap_or_default()
                .trim();
            if !text.is_empty() {
                return Ok(Some(text.to_string()));
            }
        }
    }
    Ok(None)
}

/// Heading level of a `section` node. Content before the first heading is grouped into a
/// section without one, which has no level.
fn heading_level(section: Node) -> Option<usize> {
    let heading = section.child(0)?;
    match heading.kind() {
        "atx_heading" => heading
            .child(0)?
            .kind()
            .strip_prefix("atx_h")?
            .strip_suffix("_marker")?
            .parse()
            .ok(),
        "setext_heading" => {
            let underline = heading.child(heading.child_count().checked_sub(1)?)?;
            Some(if underline.kind() == "setext_h1_underline" {
                1
            } else {
                2
            })
        }
        _ => None,
    }
}

/// Carries the source text and the ids handed out so far in one document.
struct Builder<'s> {
    source: &'s str,
    ids: HashSet<String>,
}

impl Builder<'_> {
    fn text(&self, node: Node) -> &str {
        self.source.get(node.byte_range()).unwrap_or_default()
    }

    /// Splits the document's `#` section into title, description and top-level sections.
    fn document_head(&mut self, node: Node) -> (String, String, Vec<Section>) {
        let mut title = String::new();
        let mut description = Vec::new();
        let mut sections = Vec::new();

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "atx_heading" | "setext_heading" => title = self.heading_title(child),
                "paragraph" if sections.is_empty() => {
                    description.push(self.text(child).trim().to_string());
                }
                "section" => sections.push(self.section(child)),
                _ => {}
            }
        }

        (title, description.join(" "), sections)
    }

    fn section(&mut self, node: Node) -> Section {
        let mut section = Section::default();
        let mut content = Vec::new();
        let mut items = Vec::new();
        let mut subsections = Vec::new();

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "atx_heading" | "setext_heading" => {
                    section.title = self.heading_title(child);
                    section.id = self.unique_slug(&section.title);
                }
                "paragraph" => content.push(self.text(child).trim().to_string()),
                "list" => items.extend(self.list_items(child)),
                "fenced_code_block" => {
                    if section.code.is_none() {
                        section.code = Some(self.code_example(child));
                    } else {
                        log::debug!(
                            "Extra code block under {:?} ignored (line {})",
                            section.title,
                            child.start_position().row + 1
                        );
                    }
                }
                "pipe_table" if section.table.is_none() => {
                    section.table = Some(self.table(child));
                }
                "section" => subsections.push(self.section(child)),
                _ => {}
            }
        }

        if section.id.is_empty() {
            section.id = self.unique_slug(&section.title);
        }
        if let Some(code) = &mut section.code {
            code.title.clone_from(&section.title);
        }
        section.content = (!content.is_empty()).then(|| content.join("\n\n"));
        section.items = (!items.is_empty()).then_some(items);
        section.subsections = (!subsections.is_empty()).then_some(subsections);
        section.kind = if section.code.is_some() {
            SectionKind::Code
        } else if section.table.is_some() {
            SectionKind::Table
        } else if section.items.is_some() {
            SectionKind::List
        } else {
            SectionKind::Text
        };
        section
    }

    fn heading_title(&self, heading: Node) -> String {
        if let Some(inline) = heading.child_by_field_name("heading_content") {
            return self.text(inline).trim().to_string();
        }
        if heading.kind() == "setext_heading" {
            let first_line = self.text(heading).lines().next().unwrap_or_default();
            return first_line.trim().to_string();
        }
        self.text(heading)
            .trim()
            .trim_start_matches('#')
            .trim()
            .to_string()
    }

    /// Trimmed text of the paragraphs directly under `node`.
    fn paragraphs(&self, node: Node) -> Vec<String> {
        let mut cursor = node.walk();
        node.children(&mut cursor)
            .filter(|child| child.kind() == "paragraph")
            .map(|child| self.text(child).trim().to_string())
            .collect()
    }

    fn list_items(&self, list: Node) -> Vec<String> {
        let mut items = Vec::new();
        let mut cursor = list.walk();
        for item in list.children(&mut cursor) {
            if item.kind() != "list_item" {
                continue;
            }
            let start = item
                .child(0)
                .filter(|marker| marker.kind().starts_with("list_marker"))
                .map_or(item.start_byte(), |marker| marker.end_byte());
            let text = self.source.get(start..item.end_byte()).unwrap_or_default();
            let text = text.trim();
            if !text.is_empty() {
                items.push(text.to_string());
            }
        }
        items
    }

    fn code_example(&self, block: Node) -> CodeExample {
        let mut example = CodeExample::default();
        let mut cursor = block.walk();
        for child in block.children(&mut cursor) {
            match child.kind() {
                "info_string" => {
                    let info = self.text(child).trim();
                    example.language = info.split_whitespace().next().map(str::to_string);
                }
                "code_fence_content" => {
                    example.code = self.text(child).trim_end_matches('\n').to_string();
                }
                _ => {}
            }
        }
        example
    }

    fn table(&self, node: Node) -> Table {
        let mut headers = Vec::new();
        let mut rows = Vec::new();
        let mut cursor = node.walk();
        for row in node.children(&mut cursor) {
            match row.kind() {
                "pipe_table_header" => headers = self.cells(row),
                "pipe_table_row" => {
                    let cells = self.cells(row);
                    let record: BTreeMap<String, String> =
                        headers.iter().cloned().zip(cells).collect();
                    rows.push(record);
                }
                _ => {}
            }
        }
        Table {
            title: String::new(),
            headers,
            rows,
        }
    }

    fn cells(&self, row: Node) -> Vec<String> {
        let mut cursor = row.walk();
        row.children(&mut cursor)
            .filter(|cell| cell.kind() == "pipe_table_cell")
            .map(|cell| self.text(cell).trim().to_string())
            .collect()
    }

    /// Lowercase, hyphen-separated id; a taken id gets the lowest free `-2`, `-3`, ... suffix.
    fn unique_slug(&mut self, title: &str) -> String {
        let mut slug = String::new();
        for c in title.chars() {
            if c.is_alphanumeric() {
                slug.extend(c.to_lowercase());
            } else if !slug.is_empty() && !slug.ends_with('-') {
                slug.push('-');
            }
        }
        let slug = slug.trim_end_matches('-');
        let slug = if slug.is_empty() { "section" } else { slug };

        let mut id = slug.to_string();
        let mut n = 1;
        while self.ids.contains(&id) {
            n += 1;
            id = format!("{slug}-{n}");
        }
        self.ids.insert(id.clone());
        id
    }
}

#[cfg(test)]
#[path = "../tests/markdown.rs"]
mod tests;
