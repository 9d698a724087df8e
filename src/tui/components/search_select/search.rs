//! Search lifecycle against an asynchronous choice source.
//!
//! Every search gets the next request id. Outcomes are applied only when their id is the
//! latest one issued, so the visible results always belong to the most recently started
//! search regardless of completion order.

use std::{
    sync::{Arc, mpsc::Sender},
    thread,
};

use anyhow::Result;
use log::{debug, warn};
use serde_json::{Map, Value};

use super::choice::Choice;

/// Answers collected by earlier prompts, handed to the source on every call.
pub type Answers = Map<String, Value>;

/// Supplies choices for a filter term. `None` is the initial, unfiltered query.
///
/// Implementations run on a worker thread and may block.
pub trait ChoiceSource<T>: Send + Sync + 'static {
    fn search(&self, answers: &Answers, term: Option<&str>) -> Result<Vec<Choice<T>>>;
}

impl<T, F> ChoiceSource<T> for F
where
    F: Fn(&Answers, Option<&str>) -> Result<Vec<Choice<T>>> + Send + Sync + 'static,
{
    fn search(&self, answers: &Answers, term: Option<&str>) -> Result<Vec<Choice<T>>> {
        self(answers, term)
    }
}

/// A search the caller must run against the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub id: u64,
    pub term: Option<String>,
}

/// The result of running a [`SearchRequest`].
#[derive(Debug)]
pub struct SearchOutcome<T> {
    pub id: u64,
    pub result: Result<Vec<Choice<T>>>,
}

/// Decision taken for an arriving outcome.
#[derive(Debug)]
pub enum Resolution<T> {
    /// A newer search was started; the outcome was dropped.
    Stale,
    /// The latest search finished with these choices.
    Accepted(Vec<Choice<T>>),
}

#[derive(Debug, Default)]
pub struct SearchCoordinator {
    next_id: u64,
    latest_id: Option<u64>,
    last_term: Option<String>,
    searching: bool,
}

impl SearchCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a search for `term`, superseding any search still in flight.
    pub fn begin(&mut self, term: Option<String>) -> SearchRequest {
        self.next_id = self.next_id.wrapping_add(1);
        let id = self.next_id;
        self.latest_id = Some(id);
        self.last_term.clone_from(&term);
        self.searching = true;

        debug!(
            "search #{id} started for '{}'",
            term.as_deref().unwrap_or_default()
        );
        SearchRequest { id, term }
    }

    /// Applies or discards an outcome. An error is returned only for the latest search.
    pub fn resolve<T>(&mut self, outcome: SearchOutcome<T>) -> Result<Resolution<T>> {
        if Some(outcome.id) != self.latest_id {
            debug!(
                "search #{} superseded by #{}, dropping its outcome",
                outcome.id,
                self.latest_id.unwrap_or_default()
            );
            return Ok(Resolution::Stale);
        }

        self.searching = false;
        match outcome.result {
            Ok(choices) => {
                debug!("search #{} resolved with {} choices", outcome.id, choices.len());
                Ok(Resolution::Accepted(choices))
            }
            Err(e) => {
                warn!("search #{} failed: {e:#}", outcome.id);
                Err(e.context("search source failed"))
            }
        }
    }

    /// True once any search was started.
    #[must_use]
    pub fn has_searched(&self) -> bool {
        self.latest_id.is_some()
    }

    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.searching
    }

    #[must_use]
    pub fn last_term(&self) -> Option<&str> {
        self.last_term.as_deref()
    }

    /// Whether `line` differs from the term of the latest search. An initial `None` term counts
    /// as the empty line.
    #[must_use]
    pub fn is_new_term(&self, line: &str) -> bool {
        self.last_term.as_deref().unwrap_or_default() != line
    }
}

/// Runs a request on a dedicated thread and sends the outcome back.
///
/// A dropped receiver is not an error: the prompt has already finished.
pub fn spawn_search<T, S>(
    source: &Arc<S>,
    answers: &Arc<Answers>,
    request: SearchRequest,
    tx: Sender<SearchOutcome<T>>,
) where
    T: Send + 'static,
    S: ChoiceSource<T> + ?Sized,
{
    let source = Arc::clone(source);
    let answers = Arc::clone(answers);

    thread::spawn(move || {
        let result = source.search(&answers, request.term.as_deref());
        if tx
            .send(SearchOutcome {
                id: request.id,
                result,
            })
            .is_err()
        {
            debug!("search #{} finished after the prompt closed", request.id);
        }
    });
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::time::Duration;

    use anyhow::anyhow;

    use super::*;

    fn outcome(id: u64, names: &[&str]) -> SearchOutcome<u32> {
        SearchOutcome {
            id,
            result: Ok(names.iter().map(|n| Choice::new(0, *n)).collect()),
        }
    }

    #[test]
    fn test_request_ids_increase() {
        let mut coordinator = SearchCoordinator::new();
        let first = coordinator.begin(None);
        let second = coordinator.begin(Some("a".into()));

        assert!(second.id > first.id);
        assert_eq!(second.term.as_deref(), Some("a"));
        assert_eq!(coordinator.last_term(), Some("a"));
    }

    #[test]
    fn test_out_of_order_outcome_is_stale() {
        let mut coordinator = SearchCoordinator::new();
        let a = coordinator.begin(Some("a".into()));
        let b = coordinator.begin(Some("ab".into()));

        let resolved = coordinator.resolve(outcome(b.id, &["ab"])).unwrap();
        assert!(matches!(resolved, Resolution::Accepted(ref c) if c.len() == 1));

        let late = coordinator.resolve(outcome(a.id, &["a", "ab"])).unwrap();
        assert!(matches!(late, Resolution::Stale));
        assert!(!coordinator.is_searching());
    }

    #[test]
    fn test_stale_outcome_keeps_searching_state() {
        let mut coordinator = SearchCoordinator::new();
        let a = coordinator.begin(None);
        coordinator.begin(Some("x".into()));

        let resolved = coordinator.resolve(outcome(a.id, &["a"])).unwrap();
        assert!(matches!(resolved, Resolution::Stale));
        assert!(coordinator.is_searching());
    }

    #[test]
    fn test_failure_of_latest_search_is_returned() {
        let mut coordinator = SearchCoordinator::new();
        let request = coordinator.begin(None);

        let err = coordinator
            .resolve::<u32>(SearchOutcome {
                id: request.id,
                result: Err(anyhow!("backend down")),
            })
            .unwrap_err();

        assert!(format!("{err:#}").contains("backend down"));
    }

    #[test]
    fn test_failure_of_stale_search_is_dropped() {
        let mut coordinator = SearchCoordinator::new();
        let old = coordinator.begin(None);
        coordinator.begin(Some("b".into()));

        let resolved = coordinator
            .resolve::<u32>(SearchOutcome {
                id: old.id,
                result: Err(anyhow!("timeout")),
            })
            .unwrap();
        assert!(matches!(resolved, Resolution::Stale));
    }

    #[test]
    fn test_initial_term_matches_empty_line() {
        let mut coordinator = SearchCoordinator::new();
        coordinator.begin(None);

        assert!(!coordinator.is_new_term(""));
        assert!(coordinator.is_new_term("a"));
    }

    fn echo_source(_: &Answers, term: Option<&str>) -> Result<Vec<Choice<u32>>> {
        Ok(vec![Choice::new(1, term.unwrap_or("all"))])
    }

    #[test]
    fn test_spawn_search_delivers_outcome() {
        let source = Arc::new(echo_source);
        let answers = Arc::new(Answers::new());
        let (tx, rx) = mpsc::channel::<SearchOutcome<u32>>();

        let request = SearchRequest {
            id: 9,
            term: Some("q".into()),
        };
        spawn_search(&source, &answers, request, tx);

        let outcome = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(outcome.id, 9);
        assert_eq!(outcome.result.unwrap()[0].name, "q");
    }
}
