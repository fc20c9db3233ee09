//! Breadcrumb directory stack backing the navigation header.

use std::path::{Path, PathBuf};

use crate::error::PickError;

/// Ordered list of visited directory names, nearest ancestor first and the
/// filesystem root always last.
///
/// The stack never has fewer than one entry. Navigating up from the top-level
/// directory is not a stack operation; the controller turns it into a
/// `Canceled` dispatch instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryStack {
    /// Breadcrumb labels, `entries[0]` being the current directory.
    entries: Vec<String>,
    /// Absolute path of the directory currently displayed.
    current: PathBuf,
}

impl DirectoryStack {
    /// Build a stack for `dir` by walking its ancestor chain up to (but not
    /// past) the filesystem root.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let current = dir.into();
        let entries = ancestor_labels(&current);
        Self { entries, current }
    }

    /// The directory currently displayed.
    pub fn current(&self) -> &Path {
        &self.current
    }

    /// Breadcrumb labels, nearest first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of entries. Always at least 1.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the current directory is the top of the navigable chain.
    pub fn at_top(&self) -> bool {
        self.entries.len() <= 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Push a subdirectory and make it current.
    ///
    /// `dir` must be an existing directory; anything else is a caller
    /// contract violation reported as [`PickError::NotADirectory`].
    pub fn push(&mut self, dir: &Path) -> Result<(), PickError> {
        if !dir.is_dir() {
            return Err(PickError::NotADirectory {
                path: dir.to_path_buf(),
            });
        }
        self.entries.insert(0, display_name(dir));
        self.current = dir.to_path_buf();
        Ok(())
    }

    /// Pop the top entry and make the parent current.
    ///
    /// Returns `false` without mutating when the stack is already at the top;
    /// the caller is expected to have treated that case as a screen close
    /// before getting here.
    pub fn pop(&mut self) -> bool {
        if self.at_top() {
            return false;
        }
        self.entries.remove(0);
        if let Some(parent) = self.current.parent() {
            self.current = parent.to_path_buf();
        }
        true
    }

    /// Clear the stack and rebuild it for an arbitrary path chosen outside
    /// normal navigation (storage-path picker).
    pub fn reset_to(&mut self, dir: &Path) {
        self.entries = ancestor_labels(dir);
        self.current = dir.to_path_buf();
    }
}

/// Walk `dir`'s ancestor chain collecting breadcrumb labels, ending with the
/// filesystem root separator.
fn ancestor_labels(dir: &Path) -> Vec<String> {
    let mut labels = Vec::new();
    let mut cursor = Some(dir);
    while let Some(current) = cursor {
        match current.parent() {
            Some(parent) => {
                labels.push(display_name(current));
                cursor = Some(parent);
            }
            None => break,
        }
    }
    labels.push(std::path::MAIN_SEPARATOR.to_string());
    labels
}

fn display_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.to_string_lossy().into_owned())
}
