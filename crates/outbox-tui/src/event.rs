//! Event handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key action that can be performed in the browse view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    // Navigation
    MoveUp,
    MoveDown,
    JumpToTop,
    JumpToBottom,
    PageUp,
    PageDown,

    // Directory navigation
    DrillDown,
    NavigateBack,

    // Selection
    /// Toggle the checkbox on the current file (Space).
    ToggleMark,
    /// Select or deselect every file in the listing.
    SelectAll,

    // View
    CycleSort,
    CycleBehavior,
    Filter,
    ToggleTheme,

    // Flow
    /// Hand the checked files to the upload workflow.
    Confirm,
    Cancel,
    Quit,
    ForceQuit,

    // No action
    None,
}

impl KeyAction {
    /// Convert a key event to an action.
    pub fn from_key_event(event: KeyEvent) -> Self {
        match (event.code, event.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::NONE) => KeyAction::Quit,
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::ForceQuit,

            // Esc clears the filter or closes dialogs
            (KeyCode::Esc, _) => KeyAction::Cancel,

            // Navigation - vim style
            (KeyCode::Char('j'), KeyModifiers::NONE) => KeyAction::MoveDown,
            (KeyCode::Char('k'), KeyModifiers::NONE) => KeyAction::MoveUp,
            (KeyCode::Char('h'), KeyModifiers::NONE) => KeyAction::NavigateBack,
            (KeyCode::Char('l'), KeyModifiers::NONE) => KeyAction::DrillDown,

            // Navigation - arrow keys
            (KeyCode::Down, _) => KeyAction::MoveDown,
            (KeyCode::Up, _) => KeyAction::MoveUp,
            (KeyCode::Left, _) => KeyAction::NavigateBack,
            (KeyCode::Right, _) => KeyAction::DrillDown,

            // Jump
            (KeyCode::Char('g'), KeyModifiers::NONE) => KeyAction::JumpToTop,
            (KeyCode::Char('G'), KeyModifiers::SHIFT) => KeyAction::JumpToBottom,
            (KeyCode::Home, _) => KeyAction::JumpToTop,
            (KeyCode::End, _) => KeyAction::JumpToBottom,

            // Page navigation
            (KeyCode::PageUp, _) => KeyAction::PageUp,
            (KeyCode::PageDown, _) => KeyAction::PageDown,
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => KeyAction::PageUp,
            (KeyCode::Char('d'), KeyModifiers::CONTROL) => KeyAction::PageDown,

            // Directory navigation
            (KeyCode::Enter, _) => KeyAction::DrillDown,
            (KeyCode::Backspace, _) => KeyAction::NavigateBack,

            // Selection
            (KeyCode::Char(' '), KeyModifiers::NONE) => KeyAction::ToggleMark,
            (KeyCode::Char('a'), KeyModifiers::NONE) => KeyAction::SelectAll,

            // View
            (KeyCode::Char('s'), KeyModifiers::NONE) => KeyAction::CycleSort,
            (KeyCode::Char('b'), KeyModifiers::NONE) => KeyAction::CycleBehavior,
            (KeyCode::Char('/'), KeyModifiers::NONE) => KeyAction::Filter,
            (KeyCode::Char('t'), KeyModifiers::NONE) => KeyAction::ToggleTheme,

            // Flow
            (KeyCode::Char('u'), KeyModifiers::NONE) => KeyAction::Confirm,

            _ => KeyAction::None,
        }
    }
}
