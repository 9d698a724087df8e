//! Entries produced by a choice source.

/// Label shown for a separator built without explicit text.
pub const DEFAULT_SEPARATOR: &str = "──────────────";

/// Whether a choice row is selectable or a spacer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChoiceKind {
    #[default]
    Choice,
    Separator,
}

/// Disabled state of a choice, either a plain flag or a reason shown next to the label.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Disabled {
    #[default]
    No,
    Yes,
    Reason(String),
}

impl Disabled {
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        !matches!(self, Self::No)
    }

    /// Text rendered after a disabled label.
    #[must_use]
    pub fn note(&self) -> Option<&str> {
        match self {
            Self::No => None,
            Self::Yes => Some("disabled"),
            Self::Reason(reason) => Some(reason),
        }
    }
}

impl From<bool> for Disabled {
    fn from(value: bool) -> Self {
        if value { Self::Yes } else { Self::No }
    }
}

impl From<&str> for Disabled {
    fn from(value: &str) -> Self {
        Self::Reason(value.to_string())
    }
}

impl From<String> for Disabled {
    fn from(value: String) -> Self {
        Self::Reason(value)
    }
}

/// A single entry returned by a choice source.
///
/// `name` doubles as the identity key: two choices from different searches with the same name
/// share one checked state.
#[derive(Debug, Clone)]
pub struct Choice<T> {
    pub name: String,
    pub value: T,
    pub short: Option<String>,
    pub checked: bool,
    pub disabled: Disabled,
    pub kind: ChoiceKind,
}

impl<T> Choice<T> {
    /// Creates an enabled, unchecked choice.
    #[must_use]
    pub fn new(value: T, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            short: None,
            checked: false,
            disabled: Disabled::No,
            kind: ChoiceKind::Choice,
        }
    }

    /// Creates a separator row carrying a placeholder value.
    #[must_use]
    pub fn separator(value: T, text: Option<&str>) -> Self {
        Self {
            name: text.unwrap_or(DEFAULT_SEPARATOR).to_string(),
            value,
            short: None,
            checked: false,
            disabled: Disabled::No,
            kind: ChoiceKind::Separator,
        }
    }

    /// Sets the initial checked state.
    #[must_use]
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    /// Marks the choice as disabled.
    #[must_use]
    pub fn disabled(mut self, disabled: impl Into<Disabled>) -> Self {
        self.disabled = disabled.into();
        self
    }

    /// Sets the compact label used once the prompt is answered.
    #[must_use]
    pub fn short(mut self, short: impl Into<String>) -> Self {
        self.short = Some(short.into());
        self
    }

    #[must_use]
    pub fn is_separator(&self) -> bool {
        self.kind == ChoiceKind::Separator
    }

    /// Label used in the answered summary.
    #[must_use]
    pub fn short_label(&self) -> &str {
        self.short.as_deref().unwrap_or(&self.name)
    }
}

impl<T: Default> Choice<T> {
    /// Separator with a default placeholder value.
    #[must_use]
    pub fn spacer(text: Option<&str>) -> Self {
        Self::separator(T::default(), text)
    }
}
