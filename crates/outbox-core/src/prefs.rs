//! Persistent user preferences.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, FromRepr, IntoEnumIterator};

use crate::behavior::BehaviorChoice;
use crate::error::PickError;

/// Sort order for the file listing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, FromRepr, Serialize, Deserialize,
)]
pub enum SortOrder {
    #[default]
    #[strum(to_string = "Name A-Z")]
    NameAscending,
    #[strum(to_string = "Name Z-A")]
    NameDescending,
    #[strum(to_string = "Newest first")]
    DateDescending,
    #[strum(to_string = "Oldest first")]
    DateAscending,
    #[strum(to_string = "Largest first")]
    SizeDescending,
    #[strum(to_string = "Smallest first")]
    SizeAscending,
}

impl SortOrder {
    /// Cycle to the next order.
    pub fn next(self) -> Self {
        let next = (self as usize + 1) % Self::iter().count();
        Self::from_repr(next).unwrap_or_default()
    }
}

/// Preferences carried across picker launches.
///
/// The behavior choice is stored as its selector ordinal; unknown ordinals
/// written by a future version fall back to position 0 on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Last directory files were uploaded from. Empty when never set.
    pub last_local_path: String,
    /// Selector ordinal of the last chosen post-upload behavior.
    pub behavior_ordinal: usize,
    /// Sort order for the listing.
    pub sort_order: SortOrder,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            last_local_path: String::new(),
            behavior_ordinal: BehaviorChoice::default().ordinal(),
            sort_order: SortOrder::default(),
        }
    }
}

impl Preferences {
    /// The persisted behavior choice.
    pub fn behavior(&self) -> BehaviorChoice {
        BehaviorChoice::from_ordinal(self.behavior_ordinal)
    }

    pub fn set_behavior(&mut self, choice: BehaviorChoice) {
        self.behavior_ordinal = choice.ordinal();
    }

    /// Preferences file path under the platform config directory.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("outbox").join("preferences.toml"))
    }

    /// Load preferences from disk, or return defaults.
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| Self::load_from(&path).ok())
            .unwrap_or_default()
    }

    /// Load preferences from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, PickError> {
        let content = std::fs::read_to_string(path).map_err(|e| PickError::io(path, e))?;
        toml::from_str(&content).map_err(|e| PickError::Prefs {
            message: e.to_string(),
        })
    }

    /// Save preferences to the default location.
    pub fn save(&self) -> Result<(), PickError> {
        let path = Self::config_path().ok_or_else(|| PickError::Prefs {
            message: "no config directory".to_string(),
        })?;
        self.save_to(&path)
    }

    /// Save preferences to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), PickError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PickError::io(parent, e))?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| PickError::Prefs {
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| PickError::io(path, e))
    }
}

/// Resolve the directory the picker should open in.
///
/// Starts from the persisted last path when present, walking up to the
/// nearest existing ancestor if the path has since disappeared; otherwise
/// falls back to `fallback`.
pub fn resolve_start_dir(last_local_path: &str, fallback: &Path) -> PathBuf {
    if last_local_path.is_empty() {
        return fallback.to_path_buf();
    }

    let mut dir = PathBuf::from(last_local_path);
    while !dir.exists() {
        match dir.parent() {
            Some(parent) => dir = parent.to_path_buf(),
            None => return fallback.to_path_buf(),
        }
    }
    dir
}
