//! Checked-state overlay shared by every search of a prompt.
//!
//! Result sets are replaced wholesale on each search, so the checked flag cannot live on the
//! rows being displayed. The overlay keeps one entry per choice name ever seen, in first-seen
//! order, and is the only place a checked flag is read from or written to.

use std::collections::HashMap;

use log::debug;

use super::choice::Choice;

/// The submitted answer: values of checked choices and their compact labels, in parallel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<T> {
    pub values: Vec<T>,
    pub labels: Vec<String>,
}

impl<T> Selection<T> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Labels joined for the one-line answered summary.
    #[must_use]
    pub fn summary(&self) -> String {
        self.labels.join(", ")
    }
}

/// Name-keyed store of checked state.
#[derive(Debug, Clone)]
pub struct SelectionOverlay<T> {
    entries: Vec<Choice<T>>,
    index: HashMap<String, usize>,
}

impl<T> Default for SelectionOverlay<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> SelectionOverlay<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, name: &str) -> Option<&Choice<T>> {
        self.index.get(name).and_then(|&idx| self.entries.get(idx))
    }

    fn entry_mut(&mut self, name: &str) -> Option<&mut Choice<T>> {
        self.index
            .get(name)
            .copied()
            .and_then(|idx| self.entries.get_mut(idx))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    #[must_use]
    pub fn is_checked(&self, name: &str) -> bool {
        self.entry(name).is_some_and(|c| c.checked)
    }

    #[must_use]
    pub fn is_disabled(&self, name: &str) -> bool {
        self.entry(name).is_some_and(|c| c.disabled.is_disabled())
    }

    /// Whether `name` can be toggled: known to the overlay and never reported disabled.
    #[must_use]
    pub fn is_toggleable(&self, name: &str) -> bool {
        self.entry(name).is_some_and(|c| !c.disabled.is_disabled())
    }

    /// Writes the checked flag of `name`. Absent and disabled names are left untouched.
    pub fn set_checked(&mut self, name: &str, checked: bool) -> bool {
        match self.entry_mut(name) {
            Some(entry) if !entry.disabled.is_disabled() => {
                entry.checked = checked;
                true
            }
            _ => false,
        }
    }

    /// Flips the checked flag of a single name.
    pub fn toggle(&mut self, name: &str) -> bool {
        let checked = self.is_checked(name);
        self.set_checked(name, !checked)
    }

    /// Moves every toggleable name to one state: checked unless all of them already are.
    pub fn toggle_all(&mut self, names: &[&str]) {
        let target = names
            .iter()
            .any(|name| self.is_toggleable(name) && !self.is_checked(name));

        debug!("toggle all {} visible choices to {target}", names.len());
        for name in names {
            self.set_checked(name, target);
        }
    }

    /// Flips each toggleable name independently.
    pub fn toggle_inverse(&mut self, names: &[&str]) {
        for name in names {
            self.toggle(name);
        }
    }

    /// Projects checked, enabled entries into the answer.
    #[must_use]
    pub fn current_value(&self) -> Selection<T>
    where
        T: Clone,
    {
        let (values, labels) = self
            .checked_entries()
            .map(|c| (c.value.clone(), c.short_label().to_string()))
            .unzip();
        Selection { values, labels }
    }

    /// Consumes the overlay into the answer without cloning values.
    #[must_use]
    pub fn into_selection(self) -> Selection<T> {
        let (values, labels) = self
            .entries
            .into_iter()
            .filter(|c| c.checked && !c.disabled.is_disabled())
            .map(|c| {
                let label = c.short_label().to_string();
                (c.value, label)
            })
            .unzip();
        Selection { values, labels }
    }

    fn checked_entries(&self) -> impl Iterator<Item = &Choice<T>> {
        self.entries
            .iter()
            .filter(|c| c.checked && !c.disabled.is_disabled())
    }
}

impl<T: Clone> SelectionOverlay<T> {
    /// Records every interactive choice of a resolved search.
    ///
    /// Unknown names are appended with their initial checked flag. Known names keep their
    /// checked state and value, but a disabled report is sticky. Returns the number of names
    /// added.
    pub fn extend_from(&mut self, choices: &[Choice<T>]) -> usize {
        let mut added = 0usize;
        for choice in choices.iter().filter(|c| !c.is_separator()) {
            if let Some(entry) = self.entry_mut(&choice.name) {
                if choice.disabled.is_disabled() && !entry.disabled.is_disabled() {
                    entry.disabled = choice.disabled.clone();
                }
                continue;
            }

            let mut entry = choice.clone();
            if entry.disabled.is_disabled() {
                entry.checked = false;
            }
            self.index.insert(entry.name.clone(), self.entries.len());
            self.entries.push(entry);
            added = added.saturating_add(1);
        }
        added
    }
}
