//! Selection of the discovered files that take part in a batch move.
//!
//! Initially every file referenced at most once inside the discovered set is
//! selected; files with several backlinks wait for explicit confirmation.
//!
//! Toggling a file also toggles other files depending on the mode:
//! - cascade: the file and its whole transitive outlink closure
//! - related select: the file and its direct outlinks
//! - otherwise only the file itself
//!
//! Cascade implies related select. Unchecking in cascade mode removes every
//! file of the closure even when another still-selected file also links to
//! it.

use relmove_core::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Counts shown alongside the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSummary {
    /// Discovered files
    pub total: usize,
    /// Currently selected files
    pub selected: usize,
    /// Files with more than one backlink
    pub needs_confirmation: usize,
}

/// Mutable selection over the discovered files
#[derive(Debug, Clone)]
pub struct SelectionState {
    file_infos: Vec<FileMoveInfo>,
    selected: BTreeSet<DocumentId>,
    related_select: bool,
    cascade: bool,
}

impl SelectionState {
    /// Start with every file that has at most one backlink selected,
    /// related select on and cascade off
    pub fn new(file_infos: Vec<FileMoveInfo>) -> Self {
        let selected = file_infos
            .iter()
            .filter(|info| !info.needs_confirmation())
            .map(|info| info.file.clone())
            .collect();

        Self {
            file_infos,
            selected,
            related_select: true,
            cascade: false,
        }
    }

    /// Records in discovery order
    pub fn file_infos(&self) -> &[FileMoveInfo] {
        &self.file_infos
    }

    /// Current selection
    pub fn selected(&self) -> &BTreeSet<DocumentId> {
        &self.selected
    }

    pub fn is_selected(&self, file: &DocumentId) -> bool {
        self.selected.contains(file)
    }

    pub fn related_select(&self) -> bool {
        self.related_select
    }

    pub fn cascade(&self) -> bool {
        self.cascade
    }

    /// Check or uncheck `file`, carrying along the files the current mode
    /// ties to it.
    pub fn toggle(&mut self, file: &DocumentId, checked: bool) -> Result<()> {
        let info = self
            .file_infos
            .iter()
            .find(|info| &info.file == file)
            .ok_or_else(|| Error::selection_error(format!("{} is not part of this move", file)))?;

        let mut affected: Vec<DocumentId> = vec![info.file.clone()];
        if self.cascade {
            affected.extend(info.all_links.iter().cloned());
        } else if self.related_select {
            affected.extend(info.links.iter().cloned());
        }

        for doc in affected {
            if checked {
                self.selected.insert(doc);
            } else {
                self.selected.remove(&doc);
            }
        }
        Ok(())
    }

    /// Select every discovered file
    pub fn select_all(&mut self) {
        self.selected = self.file_infos.iter().map(|info| info.file.clone()).collect();
    }

    /// Clear the selection
    pub fn deselect_all(&mut self) {
        self.selected.clear();
    }

    /// Turning related select off also turns cascade off
    pub fn set_related_select(&mut self, enabled: bool) {
        self.related_select = enabled;
        if !enabled {
            self.cascade = false;
        }
    }

    /// Turning cascade on also turns related select on
    pub fn set_cascade(&mut self, enabled: bool) {
        self.cascade = enabled;
        if enabled {
            self.related_select = true;
        }
    }

    pub fn summary(&self) -> SelectionSummary {
        SelectionSummary {
            total: self.file_infos.len(),
            selected: self.selected.len(),
            needs_confirmation: self
                .file_infos
                .iter()
                .filter(|info| info.needs_confirmation())
                .count(),
        }
    }

    /// Finish with the current selection
    pub fn confirm(self) -> Option<BTreeSet<DocumentId>> {
        Some(self.selected)
    }

    /// Abort the batch; nothing moves
    pub fn cancel(self) -> Option<BTreeSet<DocumentId>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(path: &str) -> DocumentId {
        DocumentId::new(path)
    }

    fn docs(paths: &[&str]) -> BTreeSet<DocumentId> {
        paths.iter().map(|p| doc(p)).collect()
    }

    fn info(file: &str, backlinks: &[&str], links: &[&str], all_links: &[&str]) -> FileMoveInfo {
        FileMoveInfo {
            file: doc(file),
            backlinks: backlinks.iter().map(|p| doc(p)).collect(),
            links: links.iter().map(|p| doc(p)).collect(),
            all_links: docs(all_links),
        }
    }

    /// A -> B, A -> C, B -> D, C -> D
    fn diamond() -> SelectionState {
        SelectionState::new(vec![
            info("a.md", &[], &["b.md", "c.md"], &["b.md", "c.md", "d.md"]),
            info("c.md", &["a.md"], &["d.md"], &["d.md"]),
            info("d.md", &["b.md", "c.md"], &[], &[]),
            info("b.md", &["a.md"], &["d.md"], &["d.md"]),
        ])
    }

    #[test]
    fn test_initial_selection_skips_shared_files() {
        let state = diamond();
        assert_eq!(state.selected(), &docs(&["a.md", "b.md", "c.md"]));
        assert!(state.related_select());
        assert!(!state.cascade());

        let summary = state.summary();
        assert_eq!(summary.total, 4);
        assert_eq!(summary.selected, 3);
        assert_eq!(summary.needs_confirmation, 1);
    }

    #[test]
    fn test_related_toggle_uses_direct_links() {
        let mut state = diamond();
        state.deselect_all();

        state.toggle(&doc("a.md"), true).unwrap();
        assert_eq!(state.selected(), &docs(&["a.md", "b.md", "c.md"]));

        state.toggle(&doc("b.md"), true).unwrap();
        assert!(state.is_selected(&doc("d.md")));
    }

    #[test]
    fn test_independent_toggle() {
        let mut state = diamond();
        state.set_related_select(false);

        state.toggle(&doc("a.md"), false).unwrap();
        assert_eq!(state.selected(), &docs(&["b.md", "c.md"]));

        state.toggle(&doc("d.md"), true).unwrap();
        assert_eq!(state.selected(), &docs(&["b.md", "c.md", "d.md"]));
    }

    #[test]
    fn test_cascade_check_selects_closure() {
        let mut state = diamond();
        state.deselect_all();
        state.set_cascade(true);

        state.toggle(&doc("a.md"), true).unwrap();
        assert_eq!(state.selected(), &docs(&["a.md", "b.md", "c.md", "d.md"]));
    }

    #[test]
    fn test_cascade_uncheck_removes_shared_descendants() {
        let mut state = diamond();
        state.select_all();
        state.set_cascade(true);

        // d.md goes too, although the still-selected b.md links to it
        state.toggle(&doc("c.md"), false).unwrap();
        assert_eq!(state.selected(), &docs(&["a.md", "b.md"]));

        state.select_all();
        state.toggle(&doc("a.md"), false).unwrap();
        assert!(state.selected().is_empty());
    }

    #[test]
    fn test_cascade_implies_related() {
        let mut state = diamond();
        state.set_related_select(false);
        state.set_cascade(true);
        assert!(state.related_select());
        assert!(state.cascade());

        state.set_related_select(false);
        assert!(!state.cascade());
        assert!(!state.related_select());

        state.set_cascade(true);
        state.set_cascade(false);
        assert!(state.related_select());
        assert!(!state.cascade());
    }

    #[test]
    fn test_unknown_file_is_rejected() {
        let mut state = diamond();
        let err = state.toggle(&doc("elsewhere.md"), true).unwrap_err();
        assert!(matches!(err, Error::SelectionError { .. }));
        assert_eq!(state.summary().selected, 3);
    }

    #[test]
    fn test_confirm_and_cancel() {
        let mut state = diamond();
        state.toggle(&doc("d.md"), true).unwrap();
        assert_eq!(state.clone().confirm(), Some(docs(&["a.md", "b.md", "c.md", "d.md"])));
        assert_eq!(state.cancel(), None);
    }
}
