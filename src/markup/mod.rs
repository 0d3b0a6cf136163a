//! Content rendering for issue text.
//!
//! Descriptions and comment bodies arrive as Jira wiki markup. They are
//! converted to CommonMark and then to styled [`Text`]. If conversion fails
//! the raw source is shown instead, so rendering never blocks navigation.

mod jira;
mod markdown;

use ratatui::text::{Line, Text};
use thiserror::Error;
use tracing::debug;

pub use jira::jira_to_markdown;
pub use markdown::{heading_style, markdown_to_text};

/// Errors from converting wiki markup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// A block tag was opened and never closed.
    #[error("unterminated {{{tag}}} block opened on line {line}")]
    UnterminatedBlock { tag: &'static str, line: usize },
}

/// Render wiki markup, falling back to the unmodified source on failure.
pub fn render_markup(source: &str) -> Text<'static> {
    if source.trim().is_empty() {
        return Text::default();
    }
    match jira_to_markdown(source) {
        Ok(markdown) => markdown_to_text(&markdown),
        Err(err) => {
            debug!(error = %err, "Rendering raw markup");
            Text::raw(source.to_string())
        }
    }
}

/// Render a single heading line.
///
/// The text is taken literally; markup characters in it are not interpreted.
pub fn render_heading(text: &str, level: u8) -> Text<'static> {
    Text::from(Line::styled(text.to_string(), heading_style(level)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &Text<'_>) -> String {
        text.lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_render_markup_converts_wiki() {
        let text = render_markup("h2. Steps\n* open the app\n* click *save*");
        assert_eq!(plain(&text), "Steps\n\n• open the app\n• click save");
    }

    #[test]
    fn test_render_markup_falls_back_to_raw() {
        let source = "before\n{code}\nnever closed";
        let text = render_markup(source);
        assert_eq!(plain(&text), source);
    }

    #[test]
    fn test_render_markup_empty() {
        assert!(render_markup("  \n").lines.is_empty());
    }

    #[test]
    fn test_render_heading_is_literal() {
        let text = render_heading("Fix *all* the things", 1);
        assert_eq!(plain(&text), "Fix *all* the things");
        assert_eq!(text.lines[0].style, heading_style(1));
    }

    #[test]
    fn test_render_error_message() {
        let err = RenderError::UnterminatedBlock {
            tag: "code",
            line: 3,
        };
        assert_eq!(err.to_string(), "unterminated {code} block opened on line 3");
    }
}
