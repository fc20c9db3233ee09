//! Post-upload behavior choices and the writability policy.

use std::path::Path;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, FromRepr};

/// What happens to the source files once the upload finishes.
///
/// The discriminant order matches the selector positions and the persisted
/// ordinal; `MoveToSyncedFolder` must stay at position 0 because the space
/// check takes "is a move requested" from it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, FromRepr, Serialize, Deserialize,
)]
pub enum BehaviorChoice {
    /// Move the files into the locally synced folder after upload.
    #[strum(to_string = "Move into synced folder")]
    MoveToSyncedFolder,
    /// Upload only, leave the source files alone.
    #[default]
    #[strum(to_string = "Only upload")]
    UploadOnly,
    /// Upload, then delete the source files.
    #[strum(to_string = "Upload and delete from source")]
    UploadAndDelete,
}

impl BehaviorChoice {
    /// Selector position / persisted ordinal.
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Recover a choice from a persisted ordinal, falling back to the first
    /// entry for out-of-range values.
    pub fn from_ordinal(ordinal: usize) -> Self {
        Self::from_repr(ordinal).unwrap_or(Self::MoveToSyncedFolder)
    }

    /// Whether this choice asks for the files to be moved rather than copied.
    pub fn is_move(self) -> bool {
        matches!(self, Self::MoveToSyncedFolder)
    }
}

/// Outcome of evaluating the writability policy for a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BehaviorOptions {
    /// When false only `UploadOnly` is selectable and the UI surfaces a
    /// "folder is not writable" note.
    pub choice_available: bool,
    /// The selector default for this directory.
    pub default_choice: BehaviorChoice,
}

/// Decide which behavior choices a directory allows.
///
/// Writable directories offer all three choices with the persisted default;
/// non-writable directories force `UploadOnly` since moving or deleting the
/// source would fail anyway.
pub fn evaluate_writability(dir: &Path, persisted_default: BehaviorChoice) -> BehaviorOptions {
    if is_writable(dir) {
        BehaviorOptions {
            choice_available: true,
            default_choice: persisted_default,
        }
    } else {
        BehaviorOptions {
            choice_available: false,
            default_choice: BehaviorChoice::UploadOnly,
        }
    }
}

#[cfg(unix)]
fn is_writable(dir: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    // Owner write bit. Deliberately a mode-bit policy rather than an access
    // probe so the answer is stable for the lifetime of the screen.
    std::fs::metadata(dir)
        .map(|m| m.permissions().mode() & 0o200 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_writable(dir: &Path) -> bool {
    std::fs::metadata(dir)
        .map(|m| !m.permissions().readonly())
        .unwrap_or(false)
}
