//! Reusable TUI components for user prompts.

pub mod search_select;

pub use search_select::{
    Answers, Choice, ChoiceKind, ChoiceSource, DEFAULT_SEPARATOR, Disabled, KeyAction,
    KeyBindings, PromptError, PromptView, SearchSelect, SearchSelectState, Selection, render,
};

use anyhow::Result;

/// Result of input validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Input is valid
    Valid,
    /// Input is invalid with an error message
    Invalid(String),
}

impl ValidationResult {
    /// Returns true if the validation passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Result type for prompt operations.
///
/// - `Ok(Some(value))` - User submitted a value
/// - `Ok(None)` - User cancelled (Escape or Ctrl+C)
/// - `Err(_)` - An error occurred
pub type PromptResult<T> = Result<Option<T>>;
