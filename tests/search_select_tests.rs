use std::{
    sync::{Arc, mpsc},
    thread,
    time::Duration,
};

use checkbox_search::{
    LineSource, PromptConfig,
    tui::{
        Answers, Choice, KeyAction, SearchSelectState,
        components::search_select::{SearchOutcome, SearchRequest, spawn_search},
    },
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

const FRUIT: &str = "\
Apple
*Banana
Cherry
!Durian
";

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// Drives a state machine against a real source on worker threads.
struct Harness<S> {
    state: SearchSelectState<String>,
    source: Arc<S>,
    answers: Arc<Answers>,
    tx: mpsc::Sender<SearchOutcome<String>>,
    rx: mpsc::Receiver<SearchOutcome<String>>,
}

impl<S> Harness<S>
where
    S: checkbox_search::tui::ChoiceSource<String>,
{
    fn new(source: S) -> Self {
        let (tx, rx) = mpsc::channel();
        let mut harness = Self {
            state: SearchSelectState::new("Pick fruit:", &PromptConfig::default()),
            source: Arc::new(source),
            answers: Arc::new(Answers::new()),
            tx,
            rx,
        };
        let request = harness.state.start();
        harness.spawn(request);
        harness.settle(1);
        harness
    }

    fn spawn(&self, request: SearchRequest) {
        spawn_search(&self.source, &self.answers, request, self.tx.clone());
    }

    /// Waits for `count` outcomes and feeds them in arrival order.
    fn settle(&mut self, count: usize) {
        for _ in 0..count {
            let outcome = self
                .rx
                .recv_timeout(Duration::from_secs(5))
                .expect("search outcome");
            self.state.resolve(outcome).expect("search succeeded");
        }
    }

    fn press(&mut self, code: KeyCode) -> KeyAction {
        self.state.handle_key(key(code))
    }

    fn type_and_search(&mut self, text: &str) {
        for c in text.chars() {
            if let KeyAction::Search(request) = self.press(KeyCode::Char(c)) {
                self.spawn(request);
                self.settle(1);
            }
        }
    }

    fn visible(&self) -> Vec<String> {
        self.state.interactive().map(|c| c.name.clone()).collect()
    }
}

#[test]
fn test_pick_flow_over_line_source() {
    let mut harness = Harness::new(LineSource::parse(FRUIT));
    assert_eq!(harness.visible(), vec!["Apple", "Banana", "Cherry", "Durian"]);

    harness.press(KeyCode::Down);
    harness.press(KeyCode::Down);
    harness.press(KeyCode::Right);

    harness.type_and_search("an");
    assert_eq!(harness.visible(), vec!["Banana", "Durian"]);
    assert_eq!(
        harness.state.current_value().values,
        vec!["Banana".to_string(), "Cherry".to_string()]
    );

    harness.press(KeyCode::Right);
    assert!(matches!(harness.press(KeyCode::Enter), KeyAction::Submit));
    assert_eq!(harness.state.current_value().values, vec!["Cherry".to_string()]);
}

#[test]
fn test_toggle_all_skips_disabled_line() {
    let mut harness = Harness::new(LineSource::parse(FRUIT));

    harness.state.handle_key(KeyEvent::new(KeyCode::Right, KeyModifiers::SHIFT));

    assert_eq!(
        harness.state.current_value().labels,
        vec!["Apple", "Banana", "Cherry"]
    );
}

#[test]
fn test_slow_older_search_never_overwrites_newer() {
    let source = |_: &Answers, term: Option<&str>| -> anyhow::Result<Vec<Choice<String>>> {
        if term == Some("s") {
            thread::sleep(Duration::from_millis(150));
        }
        let name = format!("result for {}", term.unwrap_or("<none>"));
        Ok(vec![Choice::new(name.clone(), name)])
    };
    let mut harness = Harness::new(source);

    let KeyAction::Search(slow) = harness.press(KeyCode::Char('s')) else {
        panic!("typing must search");
    };
    harness.spawn(slow);
    let KeyAction::Search(fast) = harness.press(KeyCode::Char('t')) else {
        panic!("typing must search");
    };
    harness.spawn(fast);

    harness.settle(2);

    assert!(!harness.state.is_searching());
    assert_eq!(harness.visible(), vec!["result for st"]);
}

#[test]
fn test_failing_source_surfaces_error() {
    let source = |_: &Answers, _: Option<&str>| -> anyhow::Result<Vec<Choice<String>>> {
        anyhow::bail!("backend unavailable")
    };
    let (tx, rx) = mpsc::channel();
    let mut state: SearchSelectState<String> =
        SearchSelectState::new("Pick:", &PromptConfig::default());

    spawn_search(&Arc::new(source), &Arc::new(Answers::new()), state.start(), tx);
    let outcome = rx.recv_timeout(Duration::from_secs(5)).unwrap();

    let err = state.resolve(outcome).unwrap_err();
    assert!(format!("{err:#}").contains("backend unavailable"));
}
