//! Color theme for the TUI.
//!
//! Dark and light variants using a slate-based semantic palette.

use ratatui::style::{Color, Modifier, Style};

/// Theme variant (dark or light).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeVariant {
    #[default]
    Dark,
    Light,
}

/// Color theme for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Current theme variant.
    pub variant: ThemeVariant,

    // Base colors
    pub foreground: Color,
    pub muted: Color,

    // Interactive elements
    pub selected: Style,

    // Status colors
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    // UI elements
    pub border: Style,
    pub title: Style,
    pub help_key: Style,
    pub help_desc: Style,

    // Listing
    pub directory: Style,
    pub file: Style,
    pub marked: Style,

    // Header/Footer
    pub header: Style,
    pub footer: Style,
}

impl Theme {
    /// Dark theme using a slate-based palette.
    pub fn dark() -> Self {
        let slate_100 = Color::Rgb(241, 245, 249);
        let slate_300 = Color::Rgb(203, 213, 225);
        let slate_500 = Color::Rgb(100, 116, 139);
        let slate_700 = Color::Rgb(51, 65, 85);
        let sky_400 = Color::Rgb(56, 189, 248);
        let amber_400 = Color::Rgb(251, 191, 36);
        let red_400 = Color::Rgb(248, 113, 113);
        let emerald_400 = Color::Rgb(52, 211, 153);

        Self {
            variant: ThemeVariant::Dark,
            foreground: slate_100,
            muted: slate_500,
            selected: Style::default()
                .bg(slate_700)
                .add_modifier(Modifier::BOLD),
            warning: amber_400,
            error: red_400,
            info: sky_400,
            border: Style::default().fg(slate_500),
            title: Style::default().fg(sky_400).add_modifier(Modifier::BOLD),
            help_key: Style::default()
                .fg(emerald_400)
                .add_modifier(Modifier::BOLD),
            help_desc: Style::default().fg(slate_300),
            directory: Style::default().fg(sky_400).add_modifier(Modifier::BOLD),
            file: Style::default().fg(slate_100),
            marked: Style::default()
                .fg(emerald_400)
                .add_modifier(Modifier::BOLD),
            header: Style::default().fg(slate_300).add_modifier(Modifier::BOLD),
            footer: Style::default().fg(slate_500),
        }
    }

    /// Light theme using the same palette inverted.
    pub fn light() -> Self {
        let slate_900 = Color::Rgb(15, 23, 42);
        let slate_600 = Color::Rgb(71, 85, 105);
        let slate_400 = Color::Rgb(148, 163, 184);
        let slate_200 = Color::Rgb(226, 232, 240);
        let sky_600 = Color::Rgb(2, 132, 199);
        let amber_600 = Color::Rgb(217, 119, 6);
        let red_600 = Color::Rgb(220, 38, 38);
        let emerald_600 = Color::Rgb(5, 150, 105);

        Self {
            variant: ThemeVariant::Light,
            foreground: slate_900,
            muted: slate_400,
            selected: Style::default()
                .bg(slate_200)
                .add_modifier(Modifier::BOLD),
            warning: amber_600,
            error: red_600,
            info: sky_600,
            border: Style::default().fg(slate_400),
            title: Style::default().fg(sky_600).add_modifier(Modifier::BOLD),
            help_key: Style::default()
                .fg(emerald_600)
                .add_modifier(Modifier::BOLD),
            help_desc: Style::default().fg(slate_600),
            directory: Style::default().fg(sky_600).add_modifier(Modifier::BOLD),
            file: Style::default().fg(slate_900),
            marked: Style::default()
                .fg(emerald_600)
                .add_modifier(Modifier::BOLD),
            header: Style::default().fg(slate_600).add_modifier(Modifier::BOLD),
            footer: Style::default().fg(slate_400),
        }
    }

    /// Toggle between dark and light variants.
    pub fn toggle(&mut self) {
        *self = match self.variant {
            ThemeVariant::Dark => Self::light(),
            ThemeVariant::Light => Self::dark(),
        };
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
