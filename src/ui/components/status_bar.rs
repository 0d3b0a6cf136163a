//! Bottom status bar.
//!
//! Layout, left to right: the level badge, the breadcrumb path, the
//! signed-in user, then either the spinner, the last error with a retry
//! hint, or the key hints.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// What the status bar shows. Built fresh for every frame.
#[derive(Debug, Clone, Default)]
pub struct StatusBar<'a> {
    pub label: &'a str,
    pub path: &'a str,
    pub user: Option<&'a str>,
    pub host: &'a str,
    /// Spinner text while a fetch is in flight.
    pub loading: Option<String>,
    /// Error of the failed fetch for the current location.
    pub error: Option<&'a str>,
    /// Hints in `key:action` form separated by whitespace.
    pub hints: &'a str,
}

impl StatusBar<'_> {
    /// Build the status line.
    pub fn line(&self) -> Line<'static> {
        let mut spans = vec![
            Span::styled(
                format!(" {} ", self.label),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
        ];

        if !self.path.is_empty() {
            spans.push(Span::styled(
                self.path.to_string(),
                Style::default().fg(Color::White),
            ));
            spans.push(Span::raw("  "));
        }

        if let Some(user) = self.user {
            let who = if self.host.is_empty() {
                user.to_string()
            } else {
                format!("{} @ {}", user, self.host)
            };
            spans.push(Span::styled(who, Style::default().fg(Color::DarkGray)));
            spans.push(Span::raw("  "));
        }

        if let Some(loading) = &self.loading {
            spans.push(Span::styled(
                loading.clone(),
                Style::default().fg(Color::Yellow),
            ));
        } else if let Some(error) = self.error {
            spans.push(Span::styled(
                error.to_string(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw("  "));
            spans.push(Span::styled("[r]", Style::default().fg(Color::Cyan)));
            spans.push(Span::styled(" retry", Style::default().fg(Color::DarkGray)));
        } else {
            spans.extend(hint_spans(self.hints));
        }

        Line::from(spans)
    }

    /// Draw the status line.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Paragraph::new(self.line()), area);
    }
}

/// Style `key:action` pairs with the key highlighted.
fn hint_spans(hints: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (i, hint) in hints.split_whitespace().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        match hint.split_once(':') {
            Some((key, action)) => {
                spans.push(Span::styled(key.to_string(), Style::default().fg(Color::Cyan)));
                spans.push(Span::styled(
                    format!(":{}", action),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            None => spans.push(Span::styled(
                hint.to_string(),
                Style::default().fg(Color::DarkGray),
            )),
        }
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn bar<'a>() -> StatusBar<'a> {
        StatusBar {
            label: "Sprints",
            path: "Boards > Sprints",
            user: Some("Ada"),
            host: "example.atlassian.net",
            loading: None,
            error: None,
            hints: "enter:open  q:quit",
        }
    }

    #[test]
    fn test_line_shows_location_and_user() {
        let line = bar().line();
        let rendered = text(&line);
        assert!(rendered.starts_with(" Sprints "));
        assert!(rendered.contains("Boards > Sprints"));
        assert!(rendered.contains("Ada @ example.atlassian.net"));
        assert!(rendered.ends_with("enter:open  q:quit"));
    }

    #[test]
    fn test_loading_replaces_hints() {
        let status = StatusBar {
            loading: Some("⠋ Loading".to_string()),
            ..bar()
        };
        let rendered = text(&status.line());
        assert!(rendered.contains("⠋ Loading"));
        assert!(!rendered.contains("enter:open"));
    }

    #[test]
    fn test_error_offers_retry() {
        let status = StatusBar {
            error: Some("Network error"),
            ..bar()
        };
        let line = status.line();
        let rendered = text(&line);
        assert!(rendered.contains("Network error"));
        assert!(rendered.ends_with("[r] retry"));
        let error_span = line
            .spans
            .iter()
            .find(|s| s.content == "Network error")
            .unwrap();
        assert_eq!(error_span.style.fg, Some(Color::Red));
    }

    #[test]
    fn test_hint_keys_highlighted() {
        let spans = hint_spans("enter:open plain");
        assert_eq!(spans[0].content, "enter");
        assert_eq!(spans[0].style.fg, Some(Color::Cyan));
        assert_eq!(spans[1].content, ":open");
        assert_eq!(spans[3].content, "plain");
    }
}
