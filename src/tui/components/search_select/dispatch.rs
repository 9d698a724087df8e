//! Key classification for the search-select prompt.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use derive_more::Display;
use serde::{Deserialize, Serialize};

use super::search::SearchRequest;

/// Which toggle keys the prompt understands.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum KeyBindings {
    /// Right arrow toggles the row under the cursor, whatever the modifiers.
    #[display("simple")]
    Simple,
    /// Right toggles, Shift+Right toggles all visible rows, Ctrl+Right inverts them.
    #[default]
    #[display("modifier")]
    Modifier,
}

impl KeyBindings {
    /// One-line key summary shown until the first key press.
    #[must_use]
    pub fn hint(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Simple => &[
                ("type", "filter"),
                ("↑↓", "navigate"),
                ("→", "select"),
                ("Enter", "submit"),
                ("Esc", "cancel"),
            ],
            Self::Modifier => &[
                ("type", "filter"),
                ("→", "select"),
                ("Shift+→", "toggle all"),
                ("Ctrl+→", "inverse selection"),
                ("Enter", "submit"),
            ],
        }
    }
}

/// What a key press means to the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyIntent {
    Down,
    Up,
    Toggle,
    ToggleAll,
    ToggleInverse,
    Submit,
    Cancel,
    /// Handed to the line editor.
    Edit,
}

/// Classifies a key event. Key releases yield `None`.
#[must_use]
pub fn classify(key: &KeyEvent, bindings: KeyBindings) -> Option<KeyIntent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let intent = match key.code {
        KeyCode::Down => KeyIntent::Down,
        KeyCode::Up => KeyIntent::Up,
        KeyCode::Right => match bindings {
            KeyBindings::Simple => KeyIntent::Toggle,
            KeyBindings::Modifier if key.modifiers.contains(KeyModifiers::SHIFT) => {
                KeyIntent::ToggleAll
            }
            KeyBindings::Modifier if key.modifiers.contains(KeyModifiers::CONTROL) => {
                KeyIntent::ToggleInverse
            }
            KeyBindings::Modifier => KeyIntent::Toggle,
        },
        KeyCode::Enter => KeyIntent::Submit,
        KeyCode::Esc => KeyIntent::Cancel,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyIntent::Cancel,
        _ => KeyIntent::Edit,
    };
    Some(intent)
}

/// What the run loop must do after a key was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Nothing changed.
    Ignored,
    /// State changed; repaint.
    Redraw,
    /// The filter text changed; run this search and repaint.
    Search(SearchRequest),
    /// Validate the current selection.
    Submit,
    /// Leave without an answer.
    Cancel,
}
