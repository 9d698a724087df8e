//! Projection of the search-select state into terminal lines.
//!
//! [`render`] is pure: the same state always yields the same [`PromptView`]. [`draw`] paints a
//! view into a ratatui frame.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::{
    choice::Choice,
    state::{PromptStatus, SearchSelectState},
};
use crate::tui::theme::Theme;

pub const POINTER: &str = "❯";
pub const CHECKED: &str = "◉";
pub const UNCHECKED: &str = "◯";
pub const SEARCHING: &str = "Searching...";
pub const NO_RESULTS: &str = "No results...";
pub const MORE_CHOICES: &str = "(Move up and down to reveal more choices)";

/// Everything drawn for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptView {
    /// Question followed by the filter line, or by the answer once submitted.
    pub message: Line<'static>,
    /// Column of the text cursor within `message`, while editing.
    pub cursor_column: Option<usize>,
    /// List, status notice, or error.
    pub body: Vec<Line<'static>>,
    /// Key summary shown until the first key press.
    pub hint: Option<Line<'static>>,
}

#[must_use]
pub fn render<T>(state: &SearchSelectState<T>, theme: &Theme) -> PromptView {
    let mut message = vec![
        Span::styled("? ", theme.prefix),
        Span::styled(state.question().to_string(), theme.title),
        Span::raw(" "),
    ];

    if let PromptStatus::Answered(summary) = state.status() {
        message.push(Span::styled(summary.clone(), theme.answer));
        return PromptView {
            message: Line::from(message),
            cursor_column: None,
            body: Vec::new(),
            hint: None,
        };
    }

    let prefix_width = Line::from(message.clone()).width();
    message.push(Span::styled(state.line().to_string(), theme.input));

    let body = if let Some(error) = state.error() {
        vec![Line::from(vec![
            Span::styled(">> ", theme.error),
            Span::styled(error.to_string(), theme.error),
        ])]
    } else if state.is_searching() {
        vec![Line::from(Span::styled(format!("  {SEARCHING}"), theme.searching))]
    } else if state.interactive_len() > 0 {
        list_lines(state, theme)
    } else {
        vec![Line::from(Span::styled(format!("  {NO_RESULTS}"), theme.empty))]
    };

    let hint = state.hint().map(|bindings| {
        let mut spans = Vec::new();
        for (idx, (key, action)) in bindings.hint().iter().enumerate() {
            if idx > 0 {
                spans.push(Span::styled(", ", theme.help));
            }
            spans.push(Span::styled(*key, theme.key));
            spans.push(Span::styled(format!(" {action}"), theme.help));
        }
        Line::from(spans)
    });

    PromptView {
        message: Line::from(message),
        cursor_column: Some(prefix_width.saturating_add(state.input().visual_cursor())),
        body,
        hint,
    }
}

/// Rows for the current result set, paginated around the cursor.
fn list_lines<T>(state: &SearchSelectState<T>, theme: &Theme) -> Vec<Line<'static>> {
    let mut rows = Vec::with_capacity(state.results().len());
    let mut interactive_idx = 0usize;
    let mut active_row = 0usize;

    for (row, choice) in state.results().iter().enumerate() {
        if choice.is_separator() {
            rows.push(Line::from(Span::styled(
                format!("  {}", choice.name),
                theme.separator,
            )));
            continue;
        }

        let is_cursor = interactive_idx == state.cursor();
        if is_cursor {
            active_row = row;
        }
        rows.push(choice_line(state, choice, is_cursor, theme));
        interactive_idx = interactive_idx.saturating_add(1);
    }

    paginate(rows, active_row, state.page_size(), theme)
}

fn choice_line<T>(
    state: &SearchSelectState<T>,
    choice: &Choice<T>,
    is_cursor: bool,
    theme: &Theme,
) -> Line<'static> {
    let overlay = state.overlay();
    let checked = overlay.is_checked(&choice.name);
    let disabled = choice.disabled.is_disabled() || overlay.is_disabled(&choice.name);

    let pointer = if is_cursor {
        Span::styled(POINTER, theme.pointer)
    } else {
        Span::raw(" ")
    };
    let checkbox = if checked {
        Span::styled(CHECKED, theme.checked)
    } else {
        Span::styled(UNCHECKED, theme.unchecked)
    };

    let mut spans = vec![pointer, checkbox, Span::raw("  ")];
    if disabled {
        let note = choice.disabled.note().unwrap_or("disabled");
        spans.push(Span::styled(
            format!("{} ({note})", choice.name),
            theme.disabled,
        ));
    } else if checked {
        spans.push(Span::styled(choice.name.clone(), theme.checked));
    } else {
        spans.push(Span::styled(choice.name.clone(), theme.unchecked));
    }
    Line::from(spans)
}

/// Keeps at most `page_size` rows, positioned so `active` stays near the middle of the page.
#[must_use]
pub fn paginate(
    rows: Vec<Line<'static>>,
    active: usize,
    page_size: usize,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let page_size = page_size.max(1);
    if rows.len() <= page_size {
        return rows;
    }

    let half = page_size / 2;
    let max_start = rows.len().saturating_sub(page_size);
    let start = active.saturating_sub(half).min(max_start);

    let mut page: Vec<_> = rows.into_iter().skip(start).take(page_size).collect();
    page.push(Line::from(Span::styled(MORE_CHOICES, theme.help)));
    page
}

/// Paints a view into a bordered box at the top of the frame.
#[allow(
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    clippy::cast_possible_truncation
)]
pub fn draw(frame: &mut Frame, view: &PromptView, theme: &Theme) {
    let body_height = view.body.len() as u16;
    let height = (body_height + 4).min(frame.area().height);
    let area = Rect {
        height,
        ..frame.area()
    };

    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border);
    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .split(inner_area);

    frame.render_widget(Paragraph::new(view.message.clone()), chunks[0]);
    frame.render_widget(Paragraph::new(view.body.clone()), chunks[1]);
    if let Some(hint) = &view.hint {
        frame.render_widget(Paragraph::new(hint.clone()), chunks[2]);
    }

    if let Some(column) = view.cursor_column {
        let max_x = chunks[0].x + chunks[0].width.saturating_sub(1);
        let x = (chunks[0].x + column.min(u16::MAX as usize) as u16).min(max_x);
        frame.set_cursor_position((x, chunks[0].y));
    }
}

#[cfg(test)]
pub(crate) fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: usize) -> Vec<Line<'static>> {
        (0..n).map(|i| Line::from(format!("row {i}"))).collect()
    }

    #[test]
    fn test_paginate_short_list_untouched() {
        let page = paginate(rows(3), 2, 7, &Theme::default());
        assert_eq!(page.len(), 3);
    }

    #[test]
    fn test_paginate_centers_active_row() {
        let page = paginate(rows(20), 10, 5, &Theme::default());

        assert_eq!(page.len(), 6);
        assert_eq!(line_text(&page[0]), "row 8");
        assert_eq!(line_text(&page[2]), "row 10");
        assert_eq!(line_text(&page[5]), MORE_CHOICES);
    }

    #[test]
    fn test_paginate_clamps_at_edges() {
        let theme = Theme::default();

        let top = paginate(rows(20), 0, 5, &theme);
        assert_eq!(line_text(&top[0]), "row 0");

        let bottom = paginate(rows(20), 19, 5, &theme);
        assert_eq!(line_text(&bottom[0]), "row 15");
        assert_eq!(line_text(&bottom[4]), "row 19");
    }
}
