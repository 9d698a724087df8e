//! Terminal UI for the searchable checkbox prompt, built on ratatui.
//!
//! - `SearchSelect` - filterable multi-selection backed by a choice source
//! - `search_select_prompt` - one-call wrapper around `SearchSelect`

mod app;
pub mod components;
mod prompts;
mod theme;

pub use app::TerminalApp;
pub use components::{
    Answers, Choice, ChoiceKind, ChoiceSource, DEFAULT_SEPARATOR, Disabled, KeyAction,
    KeyBindings, PromptError, PromptResult, PromptView, SearchSelect, SearchSelectState,
    Selection, ValidationResult, render,
};
pub use prompts::{min_selected, search_select_prompt};
pub use theme::Theme;
