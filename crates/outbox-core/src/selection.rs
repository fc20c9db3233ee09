//! Checked-file selection state.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Set of checked file paths within the current directory listing, plus the
/// "all selected" marker mirrored by the select-all menu toggle.
///
/// The selection is invalidated on every directory change; it never carries
/// over between directories except for the one verbatim restore from saved
/// screen state at cold start.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    checked: BTreeSet<PathBuf>,
    all_selected: bool,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore the marker from saved screen state (device rotation).
    pub fn restored(all_selected: bool) -> Self {
        Self {
            checked: BTreeSet::new(),
            all_selected,
        }
    }

    /// Flip membership of a single file path.
    pub fn toggle(&mut self, path: &Path) {
        if !self.checked.remove(path) {
            self.checked.insert(path.to_path_buf());
        }
    }

    pub fn is_checked(&self, path: &Path) -> bool {
        self.checked.contains(path)
    }

    /// Check or uncheck every file in the current listing, updating the
    /// all-selected marker consistently.
    pub fn set_all<I>(&mut self, selected: bool, listing: I)
    where
        I: IntoIterator<Item = PathBuf>,
    {
        self.all_selected = selected;
        if selected {
            self.checked.extend(listing);
        } else {
            self.checked.clear();
        }
    }

    /// Invalidate the selection after a push/pop/reset navigation.
    pub fn clear_for_navigation(&mut self) {
        self.checked.clear();
        self.all_selected = false;
    }

    pub fn all_selected(&self) -> bool {
        self.all_selected
    }

    pub fn is_empty(&self) -> bool {
        self.checked.is_empty()
    }

    pub fn len(&self) -> usize {
        self.checked.len()
    }

    /// Checked paths in deterministic (sorted) order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.checked.iter().cloned().collect()
    }
}
