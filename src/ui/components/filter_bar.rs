//! Row filter for the list levels.
//!
//! Typing after `/` narrows the visible rows to those whose name, key or
//! summary contains the query, ignoring case. Enter keeps the filter and
//! returns to navigation; Esc drops it.

use ratatui::{
    layout::{Position, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::view::{ColumnKey, ListContent, Width};

/// Filter query and whether it is being typed.
#[derive(Debug, Clone, Default)]
pub struct RowFilter {
    query: String,
    editing: bool,
}

impl RowFilter {
    /// Create an empty, inactive filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start typing a new query.
    pub fn start(&mut self) {
        self.editing = true;
        self.query.clear();
    }

    /// Stop typing and keep the query. An empty query turns the filter off.
    pub fn confirm(&mut self) {
        self.editing = false;
    }

    /// Drop the query and stop typing.
    pub fn clear(&mut self) {
        self.editing = false;
        self.query.clear();
    }

    /// Whether keys go to the query.
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Whether the filter is shown or narrowing rows.
    pub fn is_active(&self) -> bool {
        self.editing || !self.query.is_empty()
    }

    /// The current query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Append a character to the query.
    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
    }

    /// Remove the last character of the query.
    pub fn pop_char(&mut self) -> Option<char> {
        self.query.pop()
    }

    /// Indices into `content.rows` of the rows that match, in order.
    ///
    /// Only the free-text columns and the issue key are searched.
    pub fn matching_rows(&self, content: &ListContent) -> Vec<usize> {
        if self.query.is_empty() {
            return (0..content.len()).collect();
        }

        let needle = self.query.to_lowercase();
        let searched: Vec<ColumnKey> = content
            .columns
            .iter()
            .filter(|column| column.width == Width::Flex || column.key == ColumnKey::IssueKey)
            .map(|column| column.key)
            .collect();

        content
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| {
                searched
                    .iter()
                    .any(|key| row.get(*key).to_lowercase().contains(&needle))
            })
            .map(|(i, _)| i)
            .collect()
    }
}

/// The one-line filter prompt, with the match count once typing stops.
pub fn filter_line(filter: &RowFilter, shown: usize, total: usize) -> Line<'static> {
    let style = if filter.is_editing() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let mut spans = vec![Span::styled(format!("/{}", filter.query()), style)];
    if !filter.is_editing() {
        spans.push(Span::styled(
            format!("  [{}/{}]", shown, total),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

/// Draw the prompt in `area`, placing the cursor while typing.
pub fn render_filter_bar(
    frame: &mut Frame,
    area: Rect,
    filter: &RowFilter,
    shown: usize,
    total: usize,
) {
    if !filter.is_active() {
        return;
    }
    frame.render_widget(Paragraph::new(filter_line(filter, shown, total)), area);

    if filter.is_editing() {
        let offset = u16::try_from(filter.query().width()).unwrap_or(u16::MAX);
        frame.set_cursor_position(Position::new(
            area.x.saturating_add(1).saturating_add(offset),
            area.y,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{IssueSummary, SummaryFields};
    use crate::view::issues_to_list;

    fn issues() -> ListContent {
        issues_to_list(
            &[
                ("1", "PLAT-1", "Fix the login bug"),
                ("2", "PLAT-2", "Add dark mode"),
                ("3", "OPS-7", "Login page redesign"),
            ]
            .map(|(id, key, summary)| IssueSummary {
                id: id.to_string(),
                key: key.to_string(),
                fields: SummaryFields {
                    summary: summary.to_string(),
                },
            }),
        )
    }

    fn typed(query: &str) -> RowFilter {
        let mut filter = RowFilter::new();
        filter.start();
        query.chars().for_each(|c| filter.push_char(c));
        filter
    }

    #[test]
    fn test_empty_query_matches_everything() {
        assert_eq!(RowFilter::new().matching_rows(&issues()), vec![0, 1, 2]);
    }

    #[test]
    fn test_matches_summary_ignoring_case() {
        assert_eq!(typed("LOGIN").matching_rows(&issues()), vec![0, 2]);
    }

    #[test]
    fn test_matches_issue_key() {
        assert_eq!(typed("ops-").matching_rows(&issues()), vec![2]);
        assert!(typed("nothing").matching_rows(&issues()).is_empty());
    }

    #[test]
    fn test_start_confirm_clear() {
        let mut filter = typed("abc");
        assert!(filter.is_editing());
        assert_eq!(filter.pop_char(), Some('c'));

        filter.confirm();
        assert!(!filter.is_editing());
        assert!(filter.is_active());
        assert_eq!(filter.query(), "ab");

        filter.start();
        assert_eq!(filter.query(), "");

        filter.clear();
        assert!(!filter.is_active());
    }

    #[test]
    fn test_filter_line_shows_count_after_confirm() {
        let text = |line: Line| -> String { line.spans.iter().map(|s| s.content.to_string()).collect() };

        let mut filter = typed("login");
        assert_eq!(text(filter_line(&filter, 2, 3)), "/login");
        filter.confirm();
        assert_eq!(text(filter_line(&filter, 2, 3)), "/login  [2/3]");
    }
}
