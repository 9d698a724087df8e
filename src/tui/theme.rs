//! Theme configuration for consistent styling across TUI components.

use ratatui::style::{Color, Modifier, Style};

const ACCENT_CYAN: Color = Color::Rgb(34, 211, 238); // #22d3ee
const ACCENT_BLUE: Color = Color::Rgb(59, 130, 246); // #3b82f6
const ACCENT_GREEN: Color = Color::Rgb(74, 222, 128); // #4ade80
const ACCENT_RED: Color = Color::Rgb(248, 113, 113); // #f87171
const ACCENT_YELLOW: Color = Color::Rgb(250, 204, 21); // #facc15
const GRAY: Color = Color::Rgb(156, 163, 175); // rgb(156 163 175)
const GRAY_LIGHT: Color = Color::Rgb(209, 213, 219); // rgb(209 213 219)

/// Theme configuration for TUI components.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Style for the `?` in front of the question
    pub prefix: Style,
    /// Style for the question text
    pub title: Style,
    /// Style for the filter text being typed
    pub input: Style,
    /// Style for the answer shown once the prompt is done
    pub answer: Style,
    /// Style for the pointer in front of the cursor row
    pub pointer: Style,
    /// Style for checked checkboxes and labels
    pub checked: Style,
    /// Style for unchecked rows
    pub unchecked: Style,
    /// Style for disabled rows
    pub disabled: Style,
    /// Style for separator rows
    pub separator: Style,
    /// Style for the in-flight search notice
    pub searching: Style,
    /// Style for the empty result notice
    pub empty: Style,
    /// Style for key names in the hint line
    pub key: Style,
    /// Style for help text at the bottom
    pub help: Style,
    /// Style for error messages
    pub error: Style,
    /// Style for borders
    pub border: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            prefix: Style::default().fg(ACCENT_GREEN).add_modifier(Modifier::BOLD),
            title: Style::default().add_modifier(Modifier::BOLD),
            input: Style::default().fg(GRAY_LIGHT),
            answer: Style::default().fg(ACCENT_CYAN),
            pointer: Style::default().fg(ACCENT_CYAN).add_modifier(Modifier::BOLD),
            checked: Style::default().fg(ACCENT_GREEN),
            unchecked: Style::default().fg(GRAY_LIGHT),
            disabled: Style::default().fg(GRAY).add_modifier(Modifier::DIM),
            separator: Style::default().fg(GRAY),
            searching: Style::default().add_modifier(Modifier::DIM),
            empty: Style::default().fg(ACCENT_YELLOW),
            key: Style::default().fg(ACCENT_CYAN).add_modifier(Modifier::BOLD),
            help: Style::default().fg(GRAY),
            error: Style::default().fg(ACCENT_RED),
            border: Style::default().fg(ACCENT_BLUE),
        }
    }
}

impl Theme {
    /// Creates a new theme with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
