//! UI components and widgets.

pub mod modals;

pub use modals::{MoveFallbackModal, StoragePickerModal, WaitModal};

use humansize::{DECIMAL, format_size as humansize_format};
use ratatui::layout::{Constraint, Layout, Rect};

/// Layout areas for the application.
#[derive(Debug, Clone, Copy)]
pub struct AppLayout {
    pub header: Rect,
    pub main: Rect,
    pub footer: Rect,
}

impl AppLayout {
    /// Compute layout from terminal area.
    pub fn new(area: Rect) -> Self {
        let [header, main, footer] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(5),
            Constraint::Length(2),
        ])
        .areas(area);

        Self {
            header,
            main,
            footer,
        }
    }
}

/// Format a byte size in human-readable form.
pub fn format_size(size: u64) -> String {
    humansize_format(size, DECIMAL)
}

/// Compute the first visible row so `cursor` stays on screen.
pub fn scroll_offset(cursor: usize, total: usize, height: usize) -> usize {
    if height == 0 || total <= height {
        return 0;
    }
    // Keep the cursor in view, preferring to center-ish it at the bottom
    cursor
        .saturating_sub(height.saturating_sub(1))
        .min(total - height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_offset_keeps_cursor_visible() {
        assert_eq!(scroll_offset(0, 100, 10), 0);
        assert_eq!(scroll_offset(5, 100, 10), 0);
        assert_eq!(scroll_offset(15, 100, 10), 6);
        assert_eq!(scroll_offset(99, 100, 10), 90);
    }

    #[test]
    fn test_scroll_offset_short_list() {
        assert_eq!(scroll_offset(3, 4, 10), 0);
        assert_eq!(scroll_offset(0, 0, 10), 0);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1500), "1.5 kB");
    }
}
