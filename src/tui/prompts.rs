//! High-level prompt functions for common use cases.

use super::components::{ChoiceSource, PromptResult, SearchSelect, Selection, ValidationResult};
use crate::config::PromptConfig;

/// Runs a searchable multi-selection prompt over `source`.
///
/// # Arguments
///
/// * `question` - The question shown in front of the filter line
/// * `source` - Supplies choices for the initial query and every filter change
/// * `config` - Page size, key bindings and hint display
/// * `validator` - Optional validation run on submit
///
/// # Returns
///
/// - `Ok(Some(selection))` - The checked choices
/// - `Ok(None)` - User cancelled
/// - `Err(_)` - Source or terminal error
///
/// # Example
///
/// ```ignore
/// let selection = search_select_prompt(
///     "Pick fruit:",
///     |_: &Answers, term: Option<&str>| -> anyhow::Result<Vec<Choice<&str>>> {
///         Ok(FRUIT
///             .iter()
///             .filter(|f| term.is_none_or(|t| f.contains(t)))
///             .map(|f| Choice::new(*f, *f))
///             .collect())
///     },
///     PromptConfig::default(),
///     Some(min_selected(1)),
/// )?;
/// ```
pub fn search_select_prompt<T, S, V>(
    question: &str,
    source: S,
    config: PromptConfig,
    validator: Option<V>,
) -> PromptResult<Selection<T>>
where
    T: Clone + Send + 'static,
    S: ChoiceSource<T>,
    V: Fn(&Selection<T>) -> ValidationResult + 'static,
{
    let prompt = SearchSelect::new(question)
        .with_source(source)
        .with_config(config);

    if let Some(v) = validator {
        prompt.with_validator(v).prompt()
    } else {
        prompt.prompt()
    }
}

/// Validator requiring at least `min` checked choices.
#[must_use]
pub fn min_selected<T>(min: usize) -> impl Fn(&Selection<T>) -> ValidationResult {
    move |selection| {
        if selection.len() >= min {
            ValidationResult::Valid
        } else if min == 1 {
            ValidationResult::Invalid("Select at least one choice".into())
        } else {
            ValidationResult::Invalid(format!("Select at least {min} choices"))
        }
    }
}
