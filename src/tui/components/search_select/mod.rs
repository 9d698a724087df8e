//! Searchable multi-selection prompt backed by an asynchronous choice source.
//!
//! The user types to filter, moves with ↑/↓, and toggles rows with →. Checked state is kept
//! per choice name across searches, so a choice checked under one filter stays checked when a
//! later search returns it again.

mod choice;
mod dispatch;
mod render;
mod search;
mod selection;
mod state;


use std::{
    fmt,
    sync::{Arc, mpsc},
    time::Duration,
};

use anyhow::{Context, Result};
use colored::Colorize;
use crossterm::event::{self, Event};
use derive_more::Display;
use log::{debug, info};

pub use choice::{Choice, ChoiceKind, DEFAULT_SEPARATOR, Disabled};
pub use dispatch::{KeyAction, KeyBindings, KeyIntent, classify};
pub use render::{PromptView, draw, paginate, render};
pub use search::{
    Answers, ChoiceSource, Resolution, SearchCoordinator, SearchOutcome, SearchRequest,
    spawn_search,
};
pub use selection::{Selection, SelectionOverlay};
pub use state::{PromptStatus, SearchSelectState};

use super::{PromptResult, ValidationResult};
use crate::{
    config::PromptConfig,
    tui::{TerminalApp, theme::Theme},
};

/// How long the run loop waits for a key before checking for search results.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Errors raised before the prompt takes over the terminal.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum PromptError {
    #[display("prompt '{_0}' has no choice source")]
    MissingSource(String),
}

impl std::error::Error for PromptError {}

type Validator<T> = Box<dyn Fn(&Selection<T>) -> ValidationResult>;

/// A searchable multi-select prompt.
pub struct SearchSelect<T> {
    question: String,
    source: Option<Arc<dyn ChoiceSource<T>>>,
    answers: Answers,
    config: PromptConfig,
    validator: Option<Validator<T>>,
    theme: Theme,
}

impl<T> fmt::Debug for SearchSelect<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchSelect")
            .field("question", &self.question)
            .field("has_source", &self.source.is_some())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<T> SearchSelect<T>
where
    T: Clone + Send + 'static,
{
    /// Creates a prompt with the given question. A source must be set before [`Self::prompt`].
    #[must_use]
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            source: None,
            answers: Answers::new(),
            config: PromptConfig::default(),
            validator: None,
            theme: Theme::default(),
        }
    }

    /// Sets the source queried on start and whenever the filter text changes.
    #[must_use]
    pub fn with_source<S>(mut self, source: S) -> Self
    where
        S: ChoiceSource<T>,
    {
        self.source = Some(Arc::new(source));
        self
    }

    /// Closure form of [`Self::with_source`], for better type inference on closures.
    #[must_use]
    pub fn with_source_fn<F>(self, source: F) -> Self
    where
        F: Fn(&Answers, Option<&str>) -> Result<Vec<Choice<T>>> + Send + Sync + 'static,
    {
        self.with_source(source)
    }

    /// Answers of earlier prompts, passed to every source call.
    #[must_use]
    pub fn with_answers(mut self, answers: Answers) -> Self {
        self.answers = answers;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: PromptConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the validator run on submit. An invalid result keeps the prompt open.
    #[must_use]
    pub fn with_validator<V>(mut self, validator: V) -> Self
    where
        V: Fn(&Selection<T>) -> ValidationResult + 'static,
    {
        self.validator = Some(Box::new(validator));
        self
    }

    /// Sets a custom theme for the prompt.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    fn validate(&self, selection: &Selection<T>) -> ValidationResult {
        self.validator
            .as_ref()
            .map_or(ValidationResult::Valid, |v| v(selection))
    }

    /// Runs the prompt and returns the checked choices.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(selection))` - User submitted a valid selection
    /// - `Ok(None)` - User cancelled with Escape or Ctrl+C
    /// - `Err(_)` - No source was configured, the source failed, or a terminal error occurred
    pub fn prompt(self) -> PromptResult<Selection<T>> {
        let source = self
            .source
            .clone()
            .ok_or_else(|| PromptError::MissingSource(self.question.clone()))?;
        let answers = Arc::new(self.answers.clone());

        let mut state = SearchSelectState::new(self.question.clone(), &self.config);
        let (tx, rx) = mpsc::channel();

        let mut app = TerminalApp::new()?;
        spawn_search(&source, &answers, state.start(), tx.clone());

        let mut dirty = true;
        loop {
            if dirty {
                let view = render(&state, &self.theme);
                app.terminal().draw(|frame| draw(frame, &view, &self.theme))?;
                dirty = false;
            }

            while let Ok(outcome) = rx.try_recv() {
                dirty |= state.resolve(outcome)?;
            }

            if !event::poll(POLL_INTERVAL)? {
                continue;
            }

            let Event::Key(key) = event::read()? else {
                // Resize and focus events only need a repaint
                dirty = true;
                continue;
            };

            match state.handle_key(key) {
                KeyAction::Ignored => {}
                KeyAction::Redraw => dirty = true,
                KeyAction::Search(request) => {
                    spawn_search(&source, &answers, request, tx.clone());
                    dirty = true;
                }
                KeyAction::Submit => {
                    let selection = state.current_value();
                    match self.validate(&selection) {
                        ValidationResult::Valid => {
                            state.mark_answered(&selection);
                            let view = render(&state, &self.theme);
                            app.terminal()
                                .draw(|frame| draw(frame, &view, &self.theme))
                                .context("Failed to draw answered prompt")?;
                            break;
                        }
                        ValidationResult::Invalid(msg) => {
                            debug!("selection rejected: {msg}");
                            state.set_error(msg);
                            dirty = true;
                        }
                    }
                }
                KeyAction::Cancel => {
                    info!("prompt '{}' cancelled", self.question);
                    return Ok(None);
                }
            }
        }

        // Restore the main screen before printing the answer line
        drop(app);

        // stderr keeps stdout free for the caller's output
        let selection = state.into_selection();
        eprintln!(
            "{} {} {}",
            "?".green().bold(),
            self.question.bold(),
            selection.summary().cyan()
        );
        info!(
            "prompt '{}' answered with {} choices",
            self.question,
            selection.len()
        );

        Ok(Some(selection))
    }
}
