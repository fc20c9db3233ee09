//! Main application state and logic.

mod constants;
mod render;
mod spacecheck;
pub mod state;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent};
use futures::StreamExt;
use ratatui::{DefaultTerminal, Frame};
use strum::IntoEnumIterator;
use tokio::sync::mpsc;

use outbox_core::{
    BehaviorChoice, ConfirmAction, DiskSpaceCheck, Outcome, OutcomeCode, SelectionController,
    SpaceCheck, SpaceCheckOutcome, UpNavigation,
};

use crate::event::KeyAction;
use crate::listing::{self, EntryRow};
use crate::theme::Theme;

use self::constants::{PAGE_SIZE, TICK_INTERVAL_MS};
use self::render::render_app;
use self::spacecheck::{CheckMessage, start_check};
use self::state::{AppMode, storage_roots};

/// Application result type.
pub type AppResult<T> = color_eyre::Result<T>;

/// Main application state.
pub struct App {
    /// Core picker state machine.
    controller: SelectionController,
    /// Current mode.
    mode: AppMode,
    /// Color theme.
    theme: Theme,
    /// Rows of the current directory.
    rows: Vec<EntryRow>,
    /// Indices into `rows` that pass the name filter.
    visible: Vec<usize>,
    /// Cursor position within `visible`.
    cursor: usize,
    /// Active name filter.
    filter: String,
    /// Error from reading the current directory, if any.
    listing_error: Option<String>,
    /// Transient status line message.
    status: Option<String>,
    /// Space check collaborator.
    space_check: Arc<dyn SpaceCheck>,
    /// Channel for the in-flight space check result.
    check_rx: Option<mpsc::Receiver<CheckMessage>>,
    /// Candidate roots for the storage-path picker.
    storage_roots: Vec<PathBuf>,
    /// Cursor within the storage-path picker.
    storage_cursor: usize,
    /// Set by force quit; leaves without dispatching an outcome.
    force_quit: bool,
    /// Flag indicating UI needs redraw.
    needs_redraw: bool,
}

impl App {
    /// Create the application around an already-initialized controller.
    pub fn new(controller: SelectionController) -> Self {
        let mut app = Self {
            controller,
            mode: AppMode::Browse,
            theme: Theme::default(),
            rows: Vec::new(),
            visible: Vec::new(),
            cursor: 0,
            filter: String::new(),
            listing_error: None,
            status: None,
            space_check: Arc::new(DiskSpaceCheck),
            check_rx: None,
            storage_roots: Vec::new(),
            storage_cursor: 0,
            force_quit: false,
            needs_redraw: true,
        };
        app.refresh_listing();
        app
    }

    /// Run the main event loop until an outcome is dispatched.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> AppResult<Option<Outcome>> {
        let period = Duration::from_millis(TICK_INTERVAL_MS);
        let mut interval = tokio::time::interval(period);
        let mut events = EventStream::new();

        while !self.controller.is_finished() && !self.force_quit {
            if self.needs_redraw {
                terminal.draw(|frame| self.render(frame))?;
                self.needs_redraw = false;
            }

            tokio::select! {
                biased;

                Some(Ok(event)) = events.next() => {
                    if let Event::Key(key_event) = event
                        && key_event.kind == crossterm::event::KeyEventKind::Press
                    {
                        self.handle_key(key_event);
                    }

                    // Drain any additional pending events
                    while crossterm::event::poll(Duration::ZERO)? {
                        if let Ok(Event::Key(key_event)) = crossterm::event::read()
                            && key_event.kind == crossterm::event::KeyEventKind::Press
                        {
                            self.handle_key(key_event);
                            if self.controller.is_finished() || self.force_quit {
                                break;
                            }
                        }
                    }
                    self.needs_redraw = true;
                }

                Some(message) = async {
                    if let Some(rx) = &mut self.check_rx {
                        rx.recv().await
                    } else {
                        std::future::pending().await
                    }
                } => {
                    self.handle_check_message(message);
                    self.needs_redraw = true;
                }

                _ = interval.tick() => {}
            }
        }

        let outcome = self.controller.outcome().cloned();
        if let Some(outcome) = &outcome
            && outcome.code != OutcomeCode::Canceled
            && let Err(e) = self.controller.preferences().save()
        {
            tracing::warn!(error = %e, "failed to save preferences");
        }
        Ok(outcome)
    }

    fn render(&mut self, frame: &mut Frame) {
        render_app(self, frame);
    }

    /// Dispatch a key event to the handler for the active mode.
    fn handle_key(&mut self, key: KeyEvent) {
        self.status = None;
        match self.mode {
            AppMode::Browse => {
                let action = KeyAction::from_key_event(key);
                self.handle_browse_action(action);
            }
            AppMode::FilterInput => self.handle_filter_key(key),
            AppMode::Waiting => self.handle_waiting_key(key),
            AppMode::MoveFallback => self.handle_fallback_key(key),
            AppMode::StoragePicker => self.handle_storage_picker_key(key),
        }
    }

    fn handle_browse_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::MoveDown => self.move_cursor(1),
            KeyAction::MoveUp => self.move_cursor(-1),
            KeyAction::PageDown => self.move_cursor(PAGE_SIZE as isize),
            KeyAction::PageUp => self.move_cursor(-(PAGE_SIZE as isize)),
            KeyAction::JumpToTop => self.cursor = 0,
            KeyAction::JumpToBottom => {
                self.cursor = self.visible.len().saturating_sub(1);
            }
            KeyAction::DrillDown => self.drill_down(),
            KeyAction::NavigateBack => self.navigate_up(),
            KeyAction::ToggleMark => self.toggle_mark(),
            KeyAction::SelectAll => self.select_all(),
            KeyAction::CycleSort => self.cycle_sort(),
            KeyAction::CycleBehavior => self.cycle_behavior(),
            KeyAction::Filter => {
                self.mode = AppMode::FilterInput;
            }
            KeyAction::ToggleTheme => self.theme.toggle(),
            KeyAction::Confirm => self.confirm(),
            KeyAction::Cancel => {
                if self.filter.is_empty() {
                    self.controller.cancel();
                } else {
                    self.filter.clear();
                    self.apply_filter();
                }
            }
            KeyAction::Quit => {
                self.controller.cancel();
            }
            KeyAction::ForceQuit => self.force_quit = true,
            KeyAction::None => {}
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.filter.clear();
                self.apply_filter();
                self.mode = AppMode::Browse;
            }
            KeyCode::Enter => self.mode = AppMode::Browse,
            KeyCode::Backspace => {
                self.filter.pop();
                self.apply_filter();
            }
            KeyCode::Char(c) => {
                self.filter.push(c);
                self.apply_filter();
            }
            _ => {}
        }
    }

    fn handle_waiting_key(&mut self, key: KeyEvent) {
        // The wait dialog blocks everything except force quit.
        if KeyAction::from_key_event(key) == KeyAction::ForceQuit {
            self.force_quit = true;
        }
    }

    fn handle_fallback_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                self.controller.resolve_move_fallback(true);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.controller.resolve_move_fallback(false);
                self.mode = AppMode::Browse;
            }
            _ => {
                if KeyAction::from_key_event(key) == KeyAction::ForceQuit {
                    self.force_quit = true;
                }
            }
        }
    }

    fn handle_storage_picker_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.storage_cursor + 1 < self.storage_roots.len() {
                    self.storage_cursor += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.storage_cursor = self.storage_cursor.saturating_sub(1);
            }
            KeyCode::Enter => {
                if let Some(root) = self.storage_roots.get(self.storage_cursor).cloned() {
                    match self.controller.jump_to(&root) {
                        Ok(()) => {
                            self.mode = AppMode::Browse;
                            self.refresh_listing();
                        }
                        Err(e) => self.status = Some(e.to_string()),
                    }
                }
            }
            KeyCode::Esc => self.mode = AppMode::Browse,
            _ => {
                if KeyAction::from_key_event(key) == KeyAction::ForceQuit {
                    self.force_quit = true;
                }
            }
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        if self.visible.is_empty() {
            self.cursor = 0;
            return;
        }
        let max = self.visible.len() - 1;
        let next = self.cursor as isize + delta;
        self.cursor = next.clamp(0, max as isize) as usize;
    }

    fn row_under_cursor(&self) -> Option<&EntryRow> {
        self.visible.get(self.cursor).map(|&i| &self.rows[i])
    }

    fn drill_down(&mut self) {
        let Some(row) = self.row_under_cursor() else {
            return;
        };
        if row.is_dir {
            let path = row.path.clone();
            match self.controller.enter_directory(&path) {
                Ok(()) => self.refresh_listing(),
                Err(e) => self.status = Some(e.to_string()),
            }
        } else {
            self.toggle_mark();
        }
    }

    fn navigate_up(&mut self) {
        match self.controller.navigate_up() {
            UpNavigation::Dispatched(_) => {}
            UpNavigation::OpenStoragePicker => {
                self.storage_roots = storage_roots();
                self.storage_cursor = 0;
                self.mode = AppMode::StoragePicker;
            }
            UpNavigation::Moved => self.refresh_listing(),
        }
    }

    fn toggle_mark(&mut self) {
        if let Some(row) = self.row_under_cursor()
            && !row.is_dir
        {
            let path = row.path.clone();
            self.controller.toggle_file(&path);
            self.move_cursor(1);
        }
    }

    fn select_all(&mut self) {
        let select = !self.controller.selection().all_selected();
        let files: Vec<PathBuf> = self
            .rows
            .iter()
            .filter(|r| !r.is_dir)
            .map(|r| r.path.clone())
            .collect();
        self.controller.select_all(select, files);
    }

    fn cycle_sort(&mut self) {
        let next = self.controller.preferences().sort_order.next();
        self.controller.preferences_mut().sort_order = next;
        listing::sort_rows(&mut self.rows, next);
        self.apply_filter();
    }

    fn cycle_behavior(&mut self) {
        let options = self.controller.behavior_options();
        if !options.choice_available {
            self.status = Some("Folder is not writable; originals will be kept".to_string());
            return;
        }
        let current = self.controller.behavior();
        let mut choices = BehaviorChoice::iter().cycle();
        // Advance to the choice after the current one.
        while choices.next() != Some(current) {}
        if let Some(next) = choices.next() {
            self.controller.set_behavior(next);
        }
    }

    fn confirm(&mut self) {
        match self.controller.confirm() {
            ConfirmAction::Dispatched(_) => {}
            ConfirmAction::CheckSpace(request) => {
                if request.show_wait_indicator {
                    self.mode = AppMode::Waiting;
                }
                self.check_rx = Some(start_check(request, Arc::clone(&self.space_check)));
            }
            ConfirmAction::NotReady => {
                self.status = Some("Select at least one file first".to_string());
            }
        }
    }

    fn handle_check_message(&mut self, message: CheckMessage) {
        self.check_rx = None;
        match self
            .controller
            .on_space_check(message.ticket, message.has_enough)
        {
            SpaceCheckOutcome::Dispatched(_) => {}
            SpaceCheckOutcome::NeedsMoveFallback => self.mode = AppMode::MoveFallback,
            SpaceCheckOutcome::Stale => {
                if self.mode == AppMode::Waiting {
                    self.mode = AppMode::Browse;
                }
            }
        }
        if self.mode == AppMode::Waiting {
            self.mode = AppMode::Browse;
        }
    }

    /// Re-read the current directory and reset filter and cursor.
    fn refresh_listing(&mut self) {
        let sort = self.controller.preferences().sort_order;
        match listing::read_listing(self.controller.current_dir(), sort) {
            Ok(rows) => {
                self.rows = rows;
                self.listing_error = None;
            }
            Err(e) => {
                self.rows = Vec::new();
                self.listing_error = Some(e.to_string());
            }
        }
        self.filter.clear();
        self.cursor = 0;
        self.apply_filter();
    }

    /// Recompute visible rows after the filter or rows changed.
    ///
    /// Filtering narrows what is shown, never what is checked.
    fn apply_filter(&mut self) {
        self.visible = listing::filter_indices(&self.rows, &self.filter);
        if self.cursor >= self.visible.len() {
            self.cursor = self.visible.len().saturating_sub(1);
        }
    }
}
