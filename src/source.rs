//! Choice source backed by a list of lines, used by the `pick` command.
//!
//! File format, one entry per line:
//!
//! - `---` or `--- text` is a separator
//! - `!name` is a disabled choice
//! - `*name` is a pre-checked choice
//! - anything else is a plain choice; blank lines are skipped

use std::{fs, path::Path, thread, time::Duration};

use anyhow::{Context, Result};
use log::debug;

use crate::tui::{Answers, Choice, ChoiceSource};

const SEPARATOR_MARKER: &str = "---";

/// In-memory candidates filtered by case-insensitive substring.
#[derive(Debug, Clone, Default)]
pub struct LineSource {
    choices: Vec<Choice<String>>,
    latency: Duration,
}

impl LineSource {
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let choices = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(parse_line)
            .collect();
        Self {
            choices,
            latency: Duration::ZERO,
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Unable to read {}", path.display()))?;
        let source = Self::parse(&text);
        debug!("loaded {} entries from {}", source.len(), path.display());
        Ok(source)
    }

    /// Entries of `dir`, sorted by name. Directories get a trailing `/`.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let mut names = Vec::new();
        for entry in
            fs::read_dir(dir).with_context(|| format!("Unable to list {}", dir.display()))?
        {
            let entry = entry.with_context(|| format!("Unable to list {}", dir.display()))?;
            let mut name = entry.file_name().to_string_lossy().into_owned();
            if entry.file_type().is_ok_and(|t| t.is_dir()) {
                name.push('/');
            }
            names.push(name);
        }
        names.sort();

        debug!("listed {} entries in {}", names.len(), dir.display());
        Ok(Self {
            choices: names
                .into_iter()
                .map(|name| Choice::new(name.clone(), name))
                .collect(),
            latency: Duration::ZERO,
        })
    }

    /// Delays every search, which makes overlapping searches easy to produce by typing.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.choices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// Separators are only kept while the filter is empty.
    #[must_use]
    pub fn matching(&self, term: Option<&str>) -> Vec<Choice<String>> {
        let needle = term.map(str::to_lowercase).unwrap_or_default();
        if needle.is_empty() {
            return self.choices.clone();
        }

        self.choices
            .iter()
            .filter(|c| !c.is_separator() && c.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}

impl ChoiceSource<String> for LineSource {
    fn search(&self, _answers: &Answers, term: Option<&str>) -> Result<Vec<Choice<String>>> {
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
        Ok(self.matching(term))
    }
}

fn parse_line(line: &str) -> Choice<String> {
    if let Some(rest) = line.strip_prefix(SEPARATOR_MARKER) {
        let text = rest.trim();
        return Choice::separator(String::new(), (!text.is_empty()).then_some(text));
    }
    if let Some(name) = line.strip_prefix('!') {
        let name = name.trim();
        return Choice::new(name.to_string(), name).disabled(true);
    }
    if let Some(name) = line.strip_prefix('*') {
        let name = name.trim();
        return Choice::new(name.to_string(), name).checked(true);
    }
    Choice::new(line.to_string(), line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::DEFAULT_SEPARATOR;

    const FRUIT: &str = "\
Apple
*Banana
--- citrus
Orange
!Lemon

---
Grape
";

    fn names(choices: &[Choice<String>]) -> Vec<&str> {
        choices.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_parse_markers() {
        let source = LineSource::parse(FRUIT);
        let choices = source.matching(None);

        assert_eq!(
            names(&choices),
            vec!["Apple", "Banana", "citrus", "Orange", "Lemon", DEFAULT_SEPARATOR, "Grape"]
        );
        assert!(choices[1].checked);
        assert!(choices[2].is_separator());
        assert!(choices[4].disabled.is_disabled());
        assert!(choices[5].is_separator());
        assert_eq!(choices[4].value, "Lemon");
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let source = LineSource::parse(FRUIT);

        assert_eq!(names(&source.matching(Some("AN"))), vec!["Banana", "Orange"]);
        assert_eq!(names(&source.matching(Some("pe"))), vec!["Grape"]);
        assert!(source.matching(Some("kiwi")).is_empty());
    }

    #[test]
    fn test_separators_only_without_filter() {
        let source = LineSource::parse(FRUIT);

        assert_eq!(source.matching(Some("")).len(), source.len());
        assert!(source.matching(Some("i")).iter().all(|c| !c.is_separator()));
    }

    #[test]
    fn test_search_honours_latency() {
        let source = LineSource::parse("a\nb").with_latency(Duration::from_millis(20));
        let started = std::time::Instant::now();

        let result = source.search(&Answers::new(), Some("b")).unwrap();

        assert!(started.elapsed() >= Duration::from_millis(20));
        assert_eq!(names(&result), vec!["b"]);
    }

    #[test]
    fn test_from_dir_sorts_and_marks_directories() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("b.txt"), "").unwrap();
        fs::create_dir(temp_dir.path().join("a")).unwrap();

        let source = LineSource::from_dir(temp_dir.path()).unwrap();

        assert_eq!(names(&source.matching(None)), vec!["a/", "b.txt"]);
    }

    #[test]
    fn test_from_file_missing() {
        let err = LineSource::from_file(Path::new("/nonexistent/choices.txt")).unwrap_err();
        assert!(err.to_string().contains("Unable to read"));
    }
}
