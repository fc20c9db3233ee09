//! Terminal user interface for outbox.
//!
//! This crate provides the interactive browsing screen for picking
//! local files to upload, built with ratatui.
//!
//! # Overview
//!
//! `outbox-tui` drives an [`outbox_core::SelectionController`] from a
//! terminal:
//!
//! - **Browse view** - Walk directories, check files for upload
//! - **Behavior footer** - Pick what happens to originals afterwards
//! - **Space check** - Background free-space probe before dispatch
//! - **Storage picker** - Escape hatch when the parent is unreadable
//!
//! # Keyboard
//!
//! - `j`/`k` - Move down/up
//! - `Enter`/`l` - Open directory
//! - `Backspace`/`h` - Go up one level
//! - `Space` - Toggle a file
//! - `a` - Select or deselect everything in view
//! - `b` - Cycle the post-upload behavior
//! - `s` - Cycle sort order
//! - `/` - Filter by name
//! - `u` - Confirm the selection
//! - `q` - Cancel and leave

pub mod app;
mod event;
mod listing;
mod theme;
mod ui;

pub use app::{App, AppResult};
pub use theme::Theme;

use outbox_core::{Outcome, SelectionController};

/// Run the picker screen to completion.
///
/// Returns the dispatched outcome, or `None` if the terminal session
/// ended without one (force quit).
pub fn run(controller: SelectionController) -> AppResult<Option<Outcome>> {
    // Create tokio runtime for the event stream and space checks
    let rt = tokio::runtime::Runtime::new()?;

    let terminal = ratatui::init();
    let result = rt.block_on(App::new(controller).run(terminal));
    ratatui::restore();

    // Shutdown runtime immediately to cancel background tasks
    rt.shutdown_timeout(std::time::Duration::from_millis(100));

    result
}
