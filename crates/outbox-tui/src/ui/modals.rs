//! Modal dialog widgets.

use std::path::PathBuf;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};

use crate::theme::Theme;

fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_width = width.min(area.width.saturating_sub(4));
    let popup_height = height.min(area.height.saturating_sub(4));
    let popup_x = (area.width.saturating_sub(popup_width)) / 2 + area.x;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2 + area.y;
    Rect::new(popup_x, popup_y, popup_width, popup_height)
}

/// Dialog asking whether to move the files instead of keeping a copy,
/// shown when the space check reports there is not enough room.
pub struct MoveFallbackModal<'a> {
    theme: &'a Theme,
    file_count: usize,
}

impl<'a> MoveFallbackModal<'a> {
    pub fn new(theme: &'a Theme, file_count: usize) -> Self {
        Self { theme, file_count }
    }
}

impl Widget for MoveFallbackModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_area = centered_popup(area, 60, 9);
        Clear.render(popup_area, buf);

        let block = Block::default()
            .title(" Not Enough Space ")
            .title_style(
                Style::default()
                    .fg(self.theme.warning)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.warning));

        let inner = block.inner(popup_area);
        block.render(popup_area, buf);

        let lines = vec![
            Line::styled(
                format!(
                    "There is not enough room to keep a copy of {} file{}.",
                    self.file_count,
                    if self.file_count == 1 { "" } else { "s" }
                ),
                Style::default().fg(self.theme.foreground),
            ),
            Line::raw(""),
            Line::styled(
                "Move them into the synced folder instead?",
                Style::default().fg(self.theme.foreground),
            ),
            Line::raw(""),
            Line::from(vec![
                Span::styled(" y/Enter ", self.theme.help_key),
                Span::raw("Move  "),
                Span::styled(" n/Esc ", self.theme.help_key),
                Span::raw("Stay here"),
            ]),
        ];

        Paragraph::new(lines).render(inner, buf);
    }
}

/// Blocking indicator shown while the space check runs.
pub struct WaitModal<'a> {
    theme: &'a Theme,
}

impl<'a> WaitModal<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for WaitModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_area = centered_popup(area, 40, 5);
        Clear.render(popup_area, buf);

        let block = Block::default()
            .title(" Please Wait ")
            .title_style(
                Style::default()
                    .fg(self.theme.info)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.info));

        let inner = block.inner(popup_area);
        block.render(popup_area, buf);

        let lines = vec![
            Line::raw(""),
            Line::styled(
                "Checking available space...",
                Style::default().fg(self.theme.foreground),
            ),
        ];

        Paragraph::new(lines).centered().render(inner, buf);
    }
}

/// Picker offering well-known storage roots when the current parent
/// directory cannot be read.
pub struct StoragePickerModal<'a> {
    theme: &'a Theme,
    roots: &'a [PathBuf],
    cursor: usize,
}

impl<'a> StoragePickerModal<'a> {
    pub fn new(theme: &'a Theme, roots: &'a [PathBuf], cursor: usize) -> Self {
        Self {
            theme,
            roots,
            cursor,
        }
    }
}

impl Widget for StoragePickerModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = (self.roots.len() as u16 + 6).min(area.height.saturating_sub(4));
        let popup_area = centered_popup(area, 60, height);
        Clear.render(popup_area, buf);

        let block = Block::default()
            .title(" Choose Storage Path ")
            .title_style(self.theme.title)
            .borders(Borders::ALL)
            .border_style(self.theme.border);

        let inner = block.inner(popup_area);
        block.render(popup_area, buf);

        let mut lines = vec![
            Line::styled(
                "The parent folder cannot be read. Pick a place to browse:",
                Style::default().fg(self.theme.muted),
            ),
            Line::raw(""),
        ];

        for (i, root) in self.roots.iter().enumerate() {
            let style = if i == self.cursor {
                self.theme.selected
            } else {
                self.theme.file
            };
            lines.push(Line::styled(format!("  {}", root.display()), style));
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled(" Enter ", self.theme.help_key),
            Span::raw("Browse  "),
            Span::styled(" Esc ", self.theme.help_key),
            Span::raw("Stay here"),
        ]));

        Paragraph::new(lines).render(inner, buf);
    }
}
