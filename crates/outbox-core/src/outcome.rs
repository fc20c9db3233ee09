//! Dispatched results handed back to the calling workflow.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use strum::Display;

/// Caller-visible status of the finished picker screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum OutcomeCode {
    /// Cancel pressed, account changed, or navigated up past the top.
    Canceled,
    /// Upload, then move the sources into the synced folder.
    OkMove,
    /// Upload only.
    OkDoNothing,
    /// Upload, then delete the sources.
    OkDelete,
    /// Picker mode: a single directory was chosen.
    OkPickedDir,
}

/// The result dispatched exactly once per screen lifetime.
///
/// `chosen_files` carries the selected file paths, or the single chosen
/// directory in picker mode. `base_path` is the directory the files were
/// picked from, present only on the straight space-check-passed dispatches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub code: OutcomeCode,
    pub chosen_files: Vec<PathBuf>,
    pub base_path: Option<PathBuf>,
    /// Request code echoed back so the caller can correlate responses.
    pub request_code: i32,
}

impl Outcome {
    pub fn canceled(request_code: i32) -> Self {
        Self {
            code: OutcomeCode::Canceled,
            chosen_files: Vec::new(),
            base_path: None,
            request_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canceled_has_empty_payload() {
        let outcome = Outcome::canceled(7);
        assert_eq!(outcome.code, OutcomeCode::Canceled);
        assert!(outcome.chosen_files.is_empty());
        assert!(outcome.base_path.is_none());
        assert_eq!(outcome.request_code, 7);
    }

    #[test]
    fn test_serializes_for_the_caller() {
        let outcome = Outcome {
            code: OutcomeCode::OkDelete,
            chosen_files: vec![PathBuf::from("/x/f1")],
            base_path: Some(PathBuf::from("/x")),
            request_code: 2,
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("OkDelete"));
        assert!(json.contains("/x/f1"));
    }
}
