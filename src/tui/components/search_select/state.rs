//! The search-select state machine.
//!
//! Owns the filter line, the current result set, the selection overlay and the cursor.
//! Nothing here touches the terminal or spawns work: searches are handed back to the caller
//! as [`SearchRequest`]s and their outcomes fed in through [`SearchSelectState::resolve`].

use anyhow::Result;
use crossterm::event::{Event, KeyEvent};
use log::debug;
use tui_input::{Input, backend::crossterm::EventHandler};

use super::{
    choice::Choice,
    dispatch::{KeyAction, KeyBindings, KeyIntent, classify},
    search::{Resolution, SearchCoordinator, SearchOutcome, SearchRequest},
    selection::{Selection, SelectionOverlay},
};
use crate::config::PromptConfig;

/// Lifecycle of the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptStatus {
    Pending,
    /// Submitted; carries the summary shown in place of the filter line.
    Answered(String),
}

pub struct SearchSelectState<T> {
    question: String,
    bindings: KeyBindings,
    page_size: usize,
    input: Input,
    coordinator: SearchCoordinator,
    results: Vec<Choice<T>>,
    overlay: SelectionOverlay<T>,
    cursor: usize,
    status: PromptStatus,
    error: Option<String>,
    show_hint: bool,
}

impl<T> SearchSelectState<T> {
    #[must_use]
    pub fn new(question: impl Into<String>, config: &PromptConfig) -> Self {
        Self {
            question: question.into(),
            bindings: config.bindings,
            page_size: config.page_size.max(1),
            input: Input::default(),
            coordinator: SearchCoordinator::new(),
            results: Vec::new(),
            overlay: SelectionOverlay::new(),
            cursor: 0,
            status: PromptStatus::Pending,
            error: None,
            show_hint: config.show_hint,
        }
    }

    /// Issues the initial, unfiltered search.
    pub fn start(&mut self) -> SearchRequest {
        self.search(None)
    }

    /// Starts a search for `term`. Results of earlier searches are cleared right away so the
    /// view shows the search in flight.
    pub fn search(&mut self, term: Option<String>) -> SearchRequest {
        self.cursor = 0;
        if self.coordinator.has_searched() {
            self.results.clear();
        }
        self.coordinator.begin(term)
    }

    /// Feeds a finished search back in. Returns whether the visible state changed.
    pub fn resolve(&mut self, outcome: SearchOutcome<T>) -> Result<bool>
    where
        T: Clone,
    {
        match self.coordinator.resolve(outcome)? {
            Resolution::Stale => Ok(false),
            Resolution::Accepted(choices) => {
                let added = self.overlay.extend_from(&choices);
                debug!("{added} new choices recorded, {} known", self.overlay.len());
                self.results = choices;
                self.clamp_cursor();
                Ok(true)
            }
        }
    }

    /// Routes one key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyAction {
        if self.is_answered() {
            return KeyAction::Ignored;
        }
        let Some(intent) = classify(&key, self.bindings) else {
            return KeyAction::Ignored;
        };

        self.show_hint = false;
        self.error = None;

        match intent {
            KeyIntent::Down => self.move_down(),
            KeyIntent::Up => self.move_up(),
            KeyIntent::Toggle => self.toggle(self.cursor),
            KeyIntent::ToggleAll => self.toggle_all(),
            KeyIntent::ToggleInverse => self.toggle_inverse(),
            KeyIntent::Submit => return KeyAction::Submit,
            KeyIntent::Cancel => return KeyAction::Cancel,
            KeyIntent::Edit => {
                self.input.handle_event(&Event::Key(key));
                if self.coordinator.is_new_term(self.input.value()) {
                    let term = self.input.value().to_string();
                    return KeyAction::Search(self.search(Some(term)));
                }
            }
        }
        KeyAction::Redraw
    }

    fn move_down(&mut self) {
        let len = self.interactive_len();
        self.cursor = if self.cursor.saturating_add(1) < len {
            self.cursor.saturating_add(1)
        } else {
            0
        };
        self.clamp_cursor();
    }

    fn move_up(&mut self) {
        let len = self.interactive_len();
        self.cursor = if self.cursor > 0 {
            self.cursor.saturating_sub(1)
        } else {
            len.saturating_sub(1)
        };
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.interactive_len().saturating_sub(1));
    }

    /// Interactive (non-separator) rows of the current result set, in display order.
    pub fn interactive(&self) -> impl Iterator<Item = &Choice<T>> {
        self.results.iter().filter(|c| !c.is_separator())
    }

    #[must_use]
    pub fn interactive_len(&self) -> usize {
        self.interactive().count()
    }

    /// Flips the interactive row at `index`. Missing or disabled rows are left alone.
    pub fn toggle(&mut self, index: usize) {
        let Some(choice) = self.results.iter().filter(|c| !c.is_separator()).nth(index) else {
            return;
        };
        if choice.disabled.is_disabled() {
            return;
        }
        self.overlay.toggle(&choice.name);
    }

    /// Checks every visible row, or clears them all when they are already checked.
    pub fn toggle_all(&mut self) {
        let names = toggleable_names(&self.results);
        self.overlay.toggle_all(&names);
    }

    /// Flips every visible row independently.
    pub fn toggle_inverse(&mut self) {
        let names = toggleable_names(&self.results);
        self.overlay.toggle_inverse(&names);
    }

    /// The answer as it would be submitted now.
    #[must_use]
    pub fn current_value(&self) -> Selection<T>
    where
        T: Clone,
    {
        self.overlay.current_value()
    }

    /// Shows a validation message in place of the list until the next key press.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn mark_answered(&mut self, selection: &Selection<T>) {
        self.error = None;
        self.status = PromptStatus::Answered(selection.summary());
    }

    /// Consumes the state into the submitted answer.
    #[must_use]
    pub fn into_selection(self) -> Selection<T> {
        self.overlay.into_selection()
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        matches!(self.status, PromptStatus::Answered(_))
    }

    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.coordinator.is_searching()
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn status(&self) -> &PromptStatus {
        &self.status
    }

    #[must_use]
    pub fn input(&self) -> &Input {
        &self.input
    }

    #[must_use]
    pub fn line(&self) -> &str {
        self.input.value()
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn results(&self) -> &[Choice<T>] {
        &self.results
    }

    #[must_use]
    pub fn overlay(&self) -> &SelectionOverlay<T> {
        &self.overlay
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn hint(&self) -> Option<KeyBindings> {
        self.show_hint.then_some(self.bindings)
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }
}

/// Names of the rows select-all and invert act on.
fn toggleable_names<T>(results: &[Choice<T>]) -> Vec<&str> {
    results
        .iter()
        .filter(|c| !c.is_separator() && !c.disabled.is_disabled())
        .map(|c| c.name.as_str())
        .collect()
}
