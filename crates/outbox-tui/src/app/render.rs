//! Rendering for the picker screen.

use ratatui::Frame;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ui::{
    AppLayout, MoveFallbackModal, StoragePickerModal, WaitModal, format_size, scroll_offset,
};

use super::App;
use super::state::AppMode;

/// Draw the whole screen for the current frame.
pub(super) fn render_app(app: &App, frame: &mut Frame) {
    let layout = AppLayout::new(frame.area());

    render_header(app, frame, layout.header);
    render_list(app, frame, layout.main);
    render_footer(app, frame, layout.footer);

    match app.mode {
        AppMode::Waiting => {
            frame.render_widget(WaitModal::new(&app.theme), frame.area());
        }
        AppMode::MoveFallback => {
            let count = app.controller.selection().len();
            frame.render_widget(MoveFallbackModal::new(&app.theme, count), frame.area());
        }
        AppMode::StoragePicker => {
            frame.render_widget(
                StoragePickerModal::new(&app.theme, &app.storage_roots, app.storage_cursor),
                frame.area(),
            );
        }
        AppMode::Browse | AppMode::FilterInput => {}
    }
}

fn render_header(app: &App, frame: &mut Frame, area: ratatui::layout::Rect) {
    let title = if app.controller.picker_mode() {
        " outbox - pick a folder "
    } else {
        " outbox - pick files to upload "
    };

    let mut second = vec![Span::styled(
        format!(" {} ", app.controller.current_dir().display()),
        app.theme.header,
    )];
    if app.mode == AppMode::FilterInput || !app.filter.is_empty() {
        second.push(Span::styled(
            format!("  /{}", app.filter),
            Style::default().fg(app.theme.info),
        ));
        if app.mode == AppMode::FilterInput {
            second.push(Span::styled("_", Style::default().fg(app.theme.info)));
        }
    }

    let lines = vec![Line::styled(title, app.theme.title), Line::from(second)];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_list(app: &App, frame: &mut Frame, area: ratatui::layout::Rect) {
    if let Some(error) = &app.listing_error {
        let lines = vec![
            Line::raw(""),
            Line::styled(
                format!("  Cannot read this folder: {error}"),
                Style::default().fg(app.theme.error),
            ),
            Line::styled(
                "  Press Backspace to go up.",
                Style::default().fg(app.theme.muted),
            ),
        ];
        frame.render_widget(Paragraph::new(lines), area);
        return;
    }

    if app.visible.is_empty() {
        let message = if app.filter.is_empty() {
            "  This folder is empty."
        } else {
            "  Nothing matches the filter."
        };
        frame.render_widget(
            Paragraph::new(Line::styled(message, Style::default().fg(app.theme.muted))),
            area,
        );
        return;
    }

    let height = area.height as usize;
    let offset = scroll_offset(app.cursor, app.visible.len(), height);

    let mut lines = Vec::with_capacity(height);
    for (pos, &row_index) in app.visible.iter().enumerate().skip(offset).take(height) {
        let row = &app.rows[row_index];
        let under_cursor = pos == app.cursor;
        let checked = !row.is_dir && app.controller.selection().is_checked(&row.path);

        let checkbox = if row.is_dir {
            "    "
        } else if checked {
            "[x] "
        } else {
            "[ ] "
        };
        let name = if row.is_dir {
            format!("{}/", row.name)
        } else {
            row.name.clone()
        };
        let size = if row.is_dir {
            String::new()
        } else {
            format!("  {}", format_size(row.size))
        };

        let name_style = if under_cursor {
            app.theme.selected
        } else if checked {
            app.theme.marked
        } else if row.is_dir {
            app.theme.directory
        } else {
            app.theme.file
        };

        lines.push(Line::from(vec![
            Span::styled(checkbox, if checked { app.theme.marked } else { app.theme.file }),
            Span::styled(name, name_style),
            Span::styled(size, Style::default().fg(app.theme.muted)),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_footer(app: &App, frame: &mut Frame, area: ratatui::layout::Rect) {
    let options = app.controller.behavior_options();
    let selection = app.controller.selection();

    let mut first = vec![
        Span::styled(" After upload: ", app.theme.footer),
        Span::styled(
            format!("{}", app.controller.behavior()),
            Style::default().fg(app.theme.info),
        ),
    ];
    if !options.choice_available {
        first.push(Span::styled(
            "  (folder not writable)",
            Style::default().fg(app.theme.warning),
        ));
    }
    first.push(Span::styled(
        format!(
            "   {} selected   sort: {}",
            selection.len(),
            app.controller.preferences().sort_order
        ),
        app.theme.footer,
    ));

    let second = if let Some(status) = &app.status {
        Line::styled(format!(" {status}"), Style::default().fg(app.theme.warning))
    } else {
        Line::from(vec![
            Span::styled(" Space ", app.theme.help_key),
            Span::styled("check ", app.theme.help_desc),
            Span::styled(" a ", app.theme.help_key),
            Span::styled("all ", app.theme.help_desc),
            Span::styled(" b ", app.theme.help_key),
            Span::styled("behavior ", app.theme.help_desc),
            Span::styled(" s ", app.theme.help_key),
            Span::styled("sort ", app.theme.help_desc),
            Span::styled(" / ", app.theme.help_key),
            Span::styled("filter ", app.theme.help_desc),
            Span::styled(" u ", app.theme.help_key),
            Span::styled("upload ", app.theme.help_desc),
            Span::styled(" q ", app.theme.help_key),
            Span::styled("cancel", app.theme.help_desc),
        ])
    };

    let lines = vec![Line::from(first), second];
    frame.render_widget(Paragraph::new(lines), area);
}
