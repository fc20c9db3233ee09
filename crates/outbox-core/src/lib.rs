//! Core state machine for the outbox local file picker.
//!
//! This crate implements everything that happens between "the user opened
//! the picker" and "the caller received a list of files plus a post-upload
//! behavior": breadcrumb directory stack, checked-file selection, the
//! writability policy for behavior choices, the two-phase confirmation flow
//! with its asynchronous disk-space check, and the final result dispatch.
//! Rendering and input are left to a front end driving [`SelectionController`].

mod behavior;
mod controller;
mod error;
mod outcome;
mod prefs;
mod selection;
mod space;
mod stack;

pub use behavior::{BehaviorChoice, BehaviorOptions, evaluate_writability};
pub use controller::{
    ConfirmAction, LaunchParams, SavedScreenState, SelectionController, SpaceCheckOutcome,
    SpaceCheckRequest, SpaceCheckTicket, UpNavigation,
};
pub use error::PickError;
pub use outcome::{Outcome, OutcomeCode};
pub use prefs::{Preferences, SortOrder, resolve_start_dir};
pub use selection::SelectionState;
pub use space::{DiskSpaceCheck, SpaceCheck, available_space};
pub use stack::DirectoryStack;

/// Request code identifying a plain select-files-from-filesystem launch.
/// This is the only origin that shows a blocking wait indicator while the
/// space check runs.
pub const REQUEST_SELECT_FROM_FILESYSTEM: i32 = 1;

/// Request code identifying a camera-capture handoff: exactly one file,
/// forced delete-from-source behavior.
pub const REQUEST_UPLOAD_FROM_CAMERA: i32 = 2;
