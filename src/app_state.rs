//! The core state machine behind the browser.
//!
//! A TUI needs a single source of truth that can be interrogated and mutated as the user moves
//! between the document list, a document's outline and the search box. The open document's
//! section tree is flattened into an outline in pre-order so that the list widget and the
//! keyboard navigation can work with plain indices, while parent/child links keep the tree shape.

use crate::cheatcode::Cheatcode;
use crate::search::{self, SearchResult};
use crate::section::Section;
use crate::theme::ThemeToggle;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// Determines which UI screen renders and how input is interpreted.
pub enum View {
    /// Lists the loaded cheatcodes.
    List,
    /// Shows one cheatcode's outline and the selected section's body.
    Detail,
    /// Captures a query and lists matches across all cheatcodes.
    Search,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// One section of the open cheatcode, positioned in the flattened outline.
pub struct OutlineEntry {
    /// Id of the section this entry stands for.
    pub section_id: String,
    /// Section heading.
    pub title: String,
    /// Nesting depth, 0 for top-level sections.
    pub depth: usize,
    /// Index of the containing section in the outline.
    pub parent_index: Option<usize>,
    /// Indices of directly nested sections in the outline.
    pub children_indices: Vec<usize>,
}

/// Bridges loaded cheatcodes, search and the terminal UI, maintaining session state.
pub struct AppState {
    /// Every loaded cheatcode, in load order.
    pub cheatcodes: Vec<Cheatcode>,
    /// Active UI screen determining input handling.
    pub current_view: View,
    /// Screen to return to when the search box is dismissed.
    pub previous_view: View,
    /// Selected cheatcode in the list, and the one open in the detail view.
    pub current_cheatcode_index: usize,
    /// Flattened section tree of the open cheatcode.
    pub outline: Vec<OutlineEntry>,
    /// Selected entry in the outline.
    pub current_section_index: usize,
    /// Text typed into the search box.
    pub query: String,
    /// Matches for the current query.
    pub results: Vec<SearchResult>,
    /// Selected match.
    pub current_result_index: usize,
    /// Dark-mode flag with its palette and persistence.
    pub theme: ThemeToggle,
    /// Status feedback displayed in the help bar.
    pub message: Option<String>,
}

impl AppState {
    #[must_use]
    /// Starts on the cheatcode list with nothing open.
    pub fn new(cheatcodes: Vec<Cheatcode>, theme: ThemeToggle) -> Self {
        Self {
            cheatcodes,
            current_view: View::List,
            previous_view: View::List,
            current_cheatcode_index: 0,
            outline: Vec::new(),
            current_section_index: 0,
            query: String::new(),
            results: Vec::new(),
            current_result_index: 0,
            theme,
            message: None,
        }
    }

    #[must_use]
    /// The cheatcode selected in the list.
    pub fn current_cheatcode(&self) -> Option<&Cheatcode> {
        self.cheatcodes.get(self.current_cheatcode_index)
    }

    #[must_use]
    /// The section selected in the outline of the open cheatcode.
    pub fn current_section(&self) -> Option<&Section> {
        let entry = self.outline.get(self.current_section_index)?;
        self.current_cheatcode()?.find_section(&entry.section_id)
    }

    #[must_use]
    /// Titles from the document down to the selected section.
    pub fn breadcrumb(&self) -> Vec<String> {
        let mut parts = Vec::new();
        let mut current = self
            .outline
            .get(self.current_section_index)
            .map(|_| self.current_section_index);

        while let Some(idx) = current {
            parts.push(self.outline[idx].title.clone());
            current = self.outline[idx].parent_index;
        }

        if let Some(cheatcode) = self.current_cheatcode() {
            parts.push(cheatcode.metadata.title.clone());
        }
        parts.reverse();
        parts
    }

    // --- Cheatcode list ---

    /// Moves the list selection down, stopping at the last cheatcode.
    pub fn select_next_cheatcode(&mut self) {
        if self.current_cheatcode_index + 1 < self.cheatcodes.len() {
            self.current_cheatcode_index += 1;
        }
    }

    /// Moves the list selection up, stopping at the first cheatcode.
    pub fn select_prev_cheatcode(&mut self) {
        self.current_cheatcode_index = self.current_cheatcode_index.saturating_sub(1);
    }

    /// Opens the selected cheatcode in the detail view at its first section.
    pub fn enter_detail_view(&mut self) {
        let Some(cheatcode) = self.current_cheatcode() else {
            return;
        };

        let mut outline = Vec::new();
        flatten(&cheatcode.sections, 0, None, &mut outline);
        log::debug!(
            "Opened {:?} with {} sections",
            cheatcode.metadata.id,
            outline.len()
        );

        self.outline = outline;
        self.current_section_index = 0;
        self.current_view = View::Detail;
    }

    /// Returns to the cheatcode list.
    pub fn exit_detail_view(&mut self) {
        self.outline.clear();
        self.current_section_index = 0;
        self.current_view = View::List;
    }

    // --- Outline navigation ---

    #[must_use]
    /// Returns the following section index for sequential navigation.
    pub fn find_next_section(&self) -> Option<usize> {
        if self.current_section_index + 1 < self.outline.len() {
            Some(self.current_section_index + 1)
        } else {
            None
        }
    }

    #[must_use]
    /// Returns the preceding section index for reverse navigation.
    pub fn find_prev_section(&self) -> Option<usize> {
        if self.current_section_index > 0 {
            Some(self.current_section_index - 1)
        } else {
            None
        }
    }

    #[must_use]
    /// Moves to the containing section in the document hierarchy.
    pub fn navigate_to_parent(&self) -> Option<usize> {
        self.outline.get(self.current_section_index)?.parent_index
    }

    #[must_use]
    /// Descends to the first child section in the document hierarchy.
    pub fn navigate_to_first_child(&self) -> Option<usize> {
        self.outline
            .get(self.current_section_index)?
            .children_indices
            .first()
            .copied()
    }

    #[must_use]
    /// Finds the next section with the same parent.
    pub fn navigate_to_next_sibling(&self) -> Option<usize> {
        let current_depth = self.outline.get(self.current_section_index)?.depth;

        for i in (self.current_section_index + 1)..self.outline.len() {
            if self.outline[i].depth == current_depth {
                return Some(i);
            }
            // Stop if we've gone up a level (past our parent's siblings)
            if self.outline[i].depth < current_depth {
                break;
            }
        }

        None
    }

    #[must_use]
    /// Finds the previous section with the same parent.
    pub fn navigate_to_prev_sibling(&self) -> Option<usize> {
        let current_depth = self.outline.get(self.current_section_index)?.depth;

        for i in (0..self.current_section_index).rev() {
            if self.outline[i].depth == current_depth {
                return Some(i);
            }
            // Stop if we've gone up a level
            if self.outline[i].depth < current_depth {
                break;
            }
        }

        None
    }

    #[must_use]
    /// Jumps to the first section in the document.
    pub fn navigate_to_first(&self) -> Option<usize> {
        if self.outline.is_empty() {
            None
        } else {
            Some(0)
        }
    }

    #[must_use]
    /// Jumps to the last section in the document.
    pub fn navigate_to_last(&self) -> Option<usize> {
        self.outline.len().checked_sub(1)
    }

    /// Selects `target` when navigation found one.
    pub fn go_to_section(&mut self, target: Option<usize>) {
        if let Some(index) = target {
            self.current_section_index = index;
        }
    }

    // --- Search ---

    /// Opens the search box, keeping the previous query and results.
    pub fn enter_search(&mut self) {
        if self.current_view != View::Search {
            self.previous_view = self.current_view;
        }
        self.current_view = View::Search;
        self.message = None;
    }

    /// Dismisses the search box and returns to the screen it was opened from.
    pub fn exit_search(&mut self) {
        self.current_view = self.previous_view;
    }

    /// Appends a character to the query and refreshes the matches.
    pub fn push_query_char(&mut self, c: char) {
        self.query.push(c);
        self.run_search();
    }

    /// Removes the last character of the query and refreshes the matches.
    pub fn pop_query_char(&mut self) {
        self.query.pop();
        self.run_search();
    }

    /// Recomputes the matches for the current query.
    pub fn run_search(&mut self) {
        self.results = search::search(&self.cheatcodes, &self.query);
        self.current_result_index = 0;
    }

    /// Moves the match selection down.
    pub fn select_next_result(&mut self) {
        if self.current_result_index + 1 < self.results.len() {
            self.current_result_index += 1;
        }
    }

    /// Moves the match selection up.
    pub fn select_prev_result(&mut self) {
        self.current_result_index = self.current_result_index.saturating_sub(1);
    }

    /// Opens the cheatcode of the selected match at the matching section.
    ///
    /// Document-level matches open at the first section. Returns `false` when there is no
    /// selected match or its cheatcode is no longer loaded.
    pub fn open_selected_result(&mut self) -> bool {
        let Some(result) = self.results.get(self.current_result_index) else {
            return false;
        };
        let Some(cheatcode_index) = self
            .cheatcodes
            .iter()
            .position(|c| c.metadata.id == result.cheatcode_id)
        else {
            self.message = Some(format!("{} is no longer loaded", result.cheatcode_title));
            return false;
        };
        let section_id = result.section_id.clone();

        self.current_cheatcode_index = cheatcode_index;
        self.enter_detail_view();
        if let Some(index) = self
            .outline
            .iter()
            .position(|entry| entry.section_id == section_id)
        {
            self.current_section_index = index;
        }
        true
    }

    // --- Theme ---

    /// Flips dark mode and reports the new state.
    pub fn toggle_theme(&mut self) {
        self.theme.toggle();
        let mode = if self.theme.is_dark() { "Dark" } else { "Light" };
        self.message = Some(format!("{mode} mode"));
    }
}

/// Appends `sections` to `outline` in pre-order, linking parents and children.
fn flatten(
    sections: &[Section],
    depth: usize,
    parent_index: Option<usize>,
    outline: &mut Vec<OutlineEntry>,
) {
    for section in sections {
        let index = outline.len();
        outline.push(OutlineEntry {
            section_id: section.id.clone(),
            title: section.title.clone(),
            depth,
            parent_index,
            children_indices: Vec::new(),
        });
        if let Some(parent) = parent_index {
            outline[parent].children_indices.push(index);
        }
        flatten(section.children(), depth + 1, Some(index), outline);
    }
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
