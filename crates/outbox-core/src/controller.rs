//! The Local Selection Controller state machine.
//!
//! A `SelectionController` owns the directory stack, the checked-file
//! selection and the behavior choice, and walks the two-phase confirm flow:
//! confirm press -> asynchronous space check -> dispatch, with an optional
//! move-fallback question in between. The front end feeds it discrete user
//! actions and executes the effects it returns; the controller itself never
//! blocks and never touches the terminal.

use std::path::{Path, PathBuf};

use crate::behavior::{BehaviorChoice, BehaviorOptions, evaluate_writability};
use crate::error::PickError;
use crate::outcome::{Outcome, OutcomeCode};
use crate::prefs::{Preferences, resolve_start_dir};
use crate::selection::SelectionState;
use crate::stack::DirectoryStack;
use crate::{REQUEST_SELECT_FROM_FILESYSTEM, REQUEST_UPLOAD_FROM_CAMERA};

/// Parameters of the launch contract.
#[derive(Debug, Clone)]
pub struct LaunchParams {
    /// Opaque account identity; a change across the screen's lifetime aborts
    /// the flow with `Canceled`.
    pub account_id: String,
    /// Opaque request code echoed back in the dispatched result.
    pub request_code: i32,
    /// Picker mode returns a single directory instead of a file list.
    pub picker_mode: bool,
}

/// State carried across screen recreation, restored verbatim in place of the
/// cold-start defaults.
#[derive(Debug, Clone)]
pub struct SavedScreenState {
    pub directory: PathBuf,
    pub all_selected: bool,
}

/// Identifies one launched space check so late results for a superseded
/// check can be recognized and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpaceCheckTicket(u64);

/// A space check the front end must run in the background.
#[derive(Debug, Clone)]
pub struct SpaceCheckRequest {
    pub ticket: SpaceCheckTicket,
    pub paths: Vec<PathBuf>,
    /// Whether the active behavior asks for a move (selector position 0).
    pub is_move: bool,
    /// Show a blocking wait indicator while the check runs. Only the
    /// select-from-filesystem request code gets one.
    pub show_wait_indicator: bool,
}

/// Effect of a confirm press.
#[derive(Debug, Clone)]
pub enum ConfirmAction {
    /// The screen is done; hand the outcome to the caller.
    Dispatched(Outcome),
    /// Launch this space check and report back via `on_space_check`.
    CheckSpace(SpaceCheckRequest),
    /// Confirm is currently disabled (empty selection, or already finished).
    NotReady,
}

/// Effect of a navigate-up request.
#[derive(Debug, Clone)]
pub enum UpNavigation {
    /// Navigated up from the top-level directory; the screen closed.
    Dispatched(Outcome),
    /// The parent is unreadable; open the storage-path picker instead.
    OpenStoragePicker,
    /// Moved to the parent directory.
    Moved,
}

/// Effect of a completed space check.
#[derive(Debug, Clone)]
pub enum SpaceCheckOutcome {
    /// The screen is done; hand the outcome to the caller.
    Dispatched(Outcome),
    /// Not enough room to keep both copies; ask the user whether to move
    /// the files into the destination instead.
    NeedsMoveFallback,
    /// Result for a superseded or torn-down check; ignore it.
    Stale,
}

/// Core state machine of the picker screen.
pub struct SelectionController {
    params: LaunchParams,
    stack: DirectoryStack,
    selection: SelectionState,
    prefs: Preferences,
    behavior: BehaviorChoice,
    options: BehaviorOptions,
    /// Monotonic counter; only a result matching `pending_check` is live.
    check_generation: u64,
    pending_check: Option<SpaceCheckTicket>,
    awaiting_fallback_answer: bool,
    dispatched: Option<Outcome>,
}

impl SelectionController {
    /// Create a controller, restoring saved screen state when present and
    /// otherwise starting from the persisted last path (nearest existing
    /// ancestor) or `fallback_dir`.
    pub fn new(
        params: LaunchParams,
        prefs: Preferences,
        saved: Option<SavedScreenState>,
        fallback_dir: &Path,
    ) -> Self {
        let (start_dir, selection) = match saved {
            Some(state) => (state.directory, SelectionState::restored(state.all_selected)),
            None => (
                resolve_start_dir(&prefs.last_local_path, fallback_dir),
                SelectionState::new(),
            ),
        };

        let options = evaluate_writability(&start_dir, prefs.behavior());
        tracing::debug!(
            dir = %start_dir.display(),
            picker_mode = params.picker_mode,
            request_code = params.request_code,
            "selection controller created"
        );

        Self {
            params,
            stack: DirectoryStack::new(start_dir),
            selection,
            prefs,
            behavior: options.default_choice,
            options,
            check_generation: 0,
            pending_check: None,
            awaiting_fallback_answer: false,
            dispatched: None,
        }
    }

    pub fn current_dir(&self) -> &Path {
        self.stack.current()
    }

    pub fn stack(&self) -> &DirectoryStack {
        &self.stack
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn behavior(&self) -> BehaviorChoice {
        self.behavior
    }

    pub fn behavior_options(&self) -> BehaviorOptions {
        self.options
    }

    pub fn picker_mode(&self) -> bool {
        self.params.picker_mode
    }

    pub fn request_code(&self) -> i32 {
        self.params.request_code
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    pub fn preferences_mut(&mut self) -> &mut Preferences {
        &mut self.prefs
    }

    /// Whether the result has already been produced.
    pub fn is_finished(&self) -> bool {
        self.dispatched.is_some()
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.dispatched.as_ref()
    }

    /// Whether a move-fallback answer is currently expected.
    pub fn awaiting_fallback_answer(&self) -> bool {
        self.awaiting_fallback_answer
    }

    /// Confirm is enabled iff the selection is non-empty, or always in
    /// picker mode (which has no per-file check boxes).
    pub fn confirm_enabled(&self) -> bool {
        self.params.picker_mode || !self.selection.is_empty()
    }

    /// Enter a subdirectory. Clears the selection and re-evaluates the
    /// writability policy for the new directory.
    pub fn enter_directory(&mut self, dir: &Path) -> Result<(), PickError> {
        self.stack.push(dir)?;
        self.after_directory_change();
        Ok(())
    }

    /// Navigate up one level, closing the screen with `Canceled` at the top
    /// and delegating to the storage-path picker when the parent cannot be
    /// read.
    pub fn navigate_up(&mut self) -> UpNavigation {
        if self.stack.at_top() {
            let outcome = self.dispatch(Outcome::canceled(self.params.request_code));
            return UpNavigation::Dispatched(outcome);
        }

        if let Some(parent) = self.stack.current().parent() {
            if std::fs::read_dir(parent).is_err() {
                tracing::debug!(parent = %parent.display(), "parent unreadable, delegating to storage picker");
                return UpNavigation::OpenStoragePicker;
            }
        }

        self.stack.pop();
        self.after_directory_change();
        UpNavigation::Moved
    }

    /// Jump to an arbitrary directory chosen via the storage-path picker.
    pub fn jump_to(&mut self, dir: &Path) -> Result<(), PickError> {
        if !dir.is_dir() {
            return Err(PickError::NotADirectory {
                path: dir.to_path_buf(),
            });
        }
        self.stack.reset_to(dir);
        self.after_directory_change();
        Ok(())
    }

    fn after_directory_change(&mut self) {
        self.selection.clear_for_navigation();
        self.options = evaluate_writability(self.stack.current(), self.prefs.behavior());
        self.behavior = self.options.default_choice;
    }

    /// Flip the checked state of a file in the current listing.
    pub fn toggle_file(&mut self, path: &Path) {
        self.selection.toggle(path);
    }

    /// Check or uncheck every file in the current listing.
    pub fn select_all<I>(&mut self, selected: bool, listing: I)
    where
        I: IntoIterator<Item = PathBuf>,
    {
        self.selection.set_all(selected, listing);
    }

    /// Change the behavior choice. Returns false when the writability policy
    /// has the selector locked to `UploadOnly`.
    pub fn set_behavior(&mut self, choice: BehaviorChoice) -> bool {
        if !self.options.choice_available && choice != BehaviorChoice::UploadOnly {
            return false;
        }
        self.behavior = choice;
        true
    }

    /// Cancel pressed. Discards any pending space check and dispatches.
    pub fn cancel(&mut self) -> Outcome {
        self.pending_check = None;
        self.awaiting_fallback_answer = false;
        self.dispatch(Outcome::canceled(self.params.request_code))
    }

    /// Abort the flow when the active account is gone or has changed.
    pub fn verify_account(&mut self, active_account: Option<&str>) -> Option<Outcome> {
        match active_account {
            Some(account) if account == self.params.account_id => None,
            _ => {
                tracing::info!("active account changed, aborting selection");
                Some(self.cancel())
            }
        }
    }

    /// Confirm pressed. In picker mode this dispatches immediately;
    /// otherwise it hands back the space check to run.
    pub fn confirm(&mut self) -> ConfirmAction {
        if self.is_finished() || !self.confirm_enabled() {
            return ConfirmAction::NotReady;
        }

        // Remember where the user was browsing for the next cold start.
        self.prefs.last_local_path = self.stack.current().to_string_lossy().into_owned();

        if self.params.picker_mode {
            let outcome = self.dispatch(Outcome {
                code: OutcomeCode::OkPickedDir,
                chosen_files: vec![self.stack.current().to_path_buf()],
                base_path: None,
                request_code: self.params.request_code,
            });
            return ConfirmAction::Dispatched(outcome);
        }

        self.check_generation += 1;
        let ticket = SpaceCheckTicket(self.check_generation);
        self.pending_check = Some(ticket);
        self.awaiting_fallback_answer = false;

        ConfirmAction::CheckSpace(SpaceCheckRequest {
            ticket,
            paths: self.selection.paths(),
            is_move: self.behavior.is_move(),
            show_wait_indicator: self.params.request_code == REQUEST_SELECT_FROM_FILESYSTEM,
        })
    }

    /// Deliver the result of a space check. Results that do not match the
    /// outstanding ticket (cancel pressed, retry launched, already
    /// dispatched) are reported as stale and must be ignored.
    pub fn on_space_check(&mut self, ticket: SpaceCheckTicket, has_enough: bool) -> SpaceCheckOutcome {
        if self.is_finished() || self.pending_check != Some(ticket) {
            return SpaceCheckOutcome::Stale;
        }
        self.pending_check = None;

        if !has_enough {
            self.awaiting_fallback_answer = true;
            return SpaceCheckOutcome::NeedsMoveFallback;
        }

        let outcome = if self.params.request_code == REQUEST_UPLOAD_FROM_CAMERA {
            // Camera handoff: exactly one file, forced delete-from-source,
            // selector bypassed entirely.
            self.prefs.set_behavior(BehaviorChoice::UploadAndDelete);
            Outcome {
                code: OutcomeCode::OkDelete,
                chosen_files: self.selection.paths().into_iter().take(1).collect(),
                base_path: None,
                request_code: self.params.request_code,
            }
        } else {
            self.prefs.set_behavior(self.behavior);
            Outcome {
                code: match self.behavior {
                    BehaviorChoice::MoveToSyncedFolder => OutcomeCode::OkMove,
                    BehaviorChoice::UploadOnly => OutcomeCode::OkDoNothing,
                    BehaviorChoice::UploadAndDelete => OutcomeCode::OkDelete,
                },
                chosen_files: self.selection.paths(),
                base_path: Some(self.stack.current().to_path_buf()),
                request_code: self.params.request_code,
            }
        };

        SpaceCheckOutcome::Dispatched(self.dispatch(outcome))
    }

    /// Answer the "move instead of copy?" question. `true` dispatches
    /// `OkMove` regardless of the selector; `false` keeps the screen open
    /// with the selection untouched.
    pub fn resolve_move_fallback(&mut self, accepted: bool) -> Option<Outcome> {
        if !self.awaiting_fallback_answer || self.is_finished() {
            return None;
        }
        self.awaiting_fallback_answer = false;

        if !accepted {
            return None;
        }

        Some(self.dispatch(Outcome {
            code: OutcomeCode::OkMove,
            chosen_files: self.selection.paths(),
            base_path: None,
            request_code: self.params.request_code,
        }))
    }

    /// State to carry across screen recreation.
    pub fn saved_state(&self) -> SavedScreenState {
        SavedScreenState {
            directory: self.stack.current().to_path_buf(),
            all_selected: self.selection.all_selected(),
        }
    }

    fn dispatch(&mut self, outcome: Outcome) -> Outcome {
        debug_assert!(self.dispatched.is_none(), "result dispatched twice");
        tracing::info!(code = %outcome.code, files = outcome.chosen_files.len(), "dispatching result");
        self.dispatched = Some(outcome.clone());
        outcome
    }
}
