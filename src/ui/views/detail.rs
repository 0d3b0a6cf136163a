//! Issue detail view: title on top, a scrollable body beside a details
//! column.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Text,
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
    Frame,
};

use crate::view::DetailContent;

/// Width of the details column, borders included.
const DETAILS_WIDTH: u16 = 32;

/// Scroll state for the detail level.
#[derive(Debug, Default)]
pub struct DetailView {
    scroll: usize,
    /// Body lines after wrapping, at the last render.
    total_lines: usize,
    visible_height: usize,
}

impl DetailView {
    /// Create a detail view scrolled to the top.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scroll back to the top for a new issue.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Current scroll offset in lines.
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    fn max_scroll(&self) -> usize {
        self.total_lines.saturating_sub(self.visible_height)
    }

    fn page(&self) -> usize {
        self.visible_height.saturating_sub(1).max(1)
    }

    /// Scroll down one line.
    pub fn scroll_down(&mut self) {
        self.scroll = (self.scroll + 1).min(self.max_scroll());
    }

    /// Scroll up one line.
    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    /// Scroll down one page.
    pub fn page_down(&mut self) {
        self.scroll = (self.scroll + self.page()).min(self.max_scroll());
    }

    /// Scroll up one page.
    pub fn page_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(self.page());
    }

    /// Jump to the first line.
    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    /// Jump to the last page.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }

    /// Draw the title row, body and details column.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, content: &DetailContent) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(area);
        frame.render_widget(Paragraph::new(content.title.clone()), rows[0]);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(DETAILS_WIDTH)])
            .split(rows[1]);

        let block = Block::default()
            .title(format!(" {} ", content.key))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(chunks[0]);
        frame.render_widget(block, chunks[0]);

        let body = content.body();
        self.visible_height = usize::from(inner.height);
        self.total_lines = wrapped_height(&body, inner.width);
        self.scroll = self.scroll.min(self.max_scroll());

        let paragraph = Paragraph::new(body)
            .wrap(Wrap { trim: false })
            .scroll((u16::try_from(self.scroll).unwrap_or(u16::MAX), 0));
        frame.render_widget(paragraph, inner);

        if self.total_lines > self.visible_height {
            let mut scrollbar_state = ScrollbarState::new(self.max_scroll()).position(self.scroll);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                chunks[0],
                &mut scrollbar_state,
            );
        }

        let details = Paragraph::new(content.details.clone())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        frame.render_widget(details, chunks[1]);
    }
}

/// Rows `text` takes when wrapped at `width`.
fn wrapped_height(text: &Text, width: u16) -> usize {
    let width = usize::from(width.max(1));
    text.lines
        .iter()
        .map(|line| {
            let line_width = line.width();
            if line_width == 0 {
                1
            } else {
                (line_width + width - 1) / width
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::text::Line;

    #[test]
    fn test_wrapped_height() {
        let text = Text::from(vec![
            Line::raw("short"),
            Line::raw(""),
            Line::raw("x".repeat(25)),
        ]);
        assert_eq!(wrapped_height(&text, 10), 1 + 1 + 3);
        assert_eq!(wrapped_height(&text, 0), 1 + 1 + 25);
    }

    #[test]
    fn test_scroll_clamped_to_content() {
        let mut view = DetailView::new();
        view.total_lines = 30;
        view.visible_height = 10;

        view.scroll_up();
        assert_eq!(view.scroll(), 0);
        view.scroll_to_bottom();
        assert_eq!(view.scroll(), 20);
        view.scroll_down();
        assert_eq!(view.scroll(), 20);
        view.page_up();
        assert_eq!(view.scroll(), 11);
        view.scroll_to_top();
        assert_eq!(view.scroll(), 0);
    }

    #[test]
    fn test_short_content_does_not_scroll() {
        let mut view = DetailView::new();
        view.total_lines = 5;
        view.visible_height = 10;
        view.page_down();
        assert_eq!(view.scroll(), 0);
    }

    #[test]
    fn test_reset() {
        let mut view = DetailView::new();
        view.total_lines = 30;
        view.visible_height = 10;
        view.scroll_to_bottom();
        view.reset();
        assert_eq!(view.scroll(), 0);
    }
}
