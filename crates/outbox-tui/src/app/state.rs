//! Application state types.

use std::path::PathBuf;

/// Which layer of the screen currently owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    /// Normal file browsing.
    #[default]
    Browse,
    /// Typing into the name filter.
    FilterInput,
    /// A space check is running behind a blocking wait dialog.
    Waiting,
    /// Asking whether to move the files instead of copying them.
    MoveFallback,
    /// Choosing a different storage root because the parent directory
    /// could not be read.
    StoragePicker,
}

/// Candidate roots for the storage-path picker.
///
/// Only roots that exist and can be listed are offered.
pub fn storage_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();
    let mut push = |candidate: Option<PathBuf>| {
        if let Some(path) = candidate
            && path.is_dir()
            && std::fs::read_dir(&path).is_ok()
            && !roots.contains(&path)
        {
            roots.push(path);
        }
    };

    push(dirs::home_dir());
    push(dirs::download_dir());
    push(dirs::picture_dir());
    push(dirs::video_dir());
    push(dirs::document_dir());
    push(Some(PathBuf::from("/")));

    roots
}
