//! Keyboard help overlay.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::events::KeyBindings;

/// Help lines, one per binding.
pub fn help_lines(keys: &KeyBindings) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        "Navigation",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))];
    for (key, description) in keys.help_entries() {
        lines.push(Line::from(vec![
            Span::styled(format!("{:>10}", key), Style::default().fg(Color::Cyan)),
            Span::raw("  "),
            Span::raw(description),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "Press ? or Esc to close",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

/// Draw the overlay centered over `area`.
pub fn render_help(frame: &mut Frame, area: Rect, keys: &KeyBindings) {
    let lines = help_lines(keys);
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
    let popup = centered_rect(46, height, area);

    frame.render_widget(Clear, popup);
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Help - Keyboard Shortcuts ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(paragraph, popup);
}

/// A `width` x `height` rectangle centered in `area`, clamped to fit.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(width),
            Constraint::Fill(1),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_lists_every_binding() {
        let keys = KeyBindings::new();
        let lines = help_lines(&keys);
        // heading, entries, blank, footer
        assert_eq!(lines.len(), keys.help_entries().len() + 3);
        let all: String = lines
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.content.to_string()))
            .collect();
        assert!(all.contains("Enter"));
        assert!(all.contains("retry failed load"));
    }

    #[test]
    fn test_centered_rect_clamps() {
        let area = Rect::new(0, 0, 20, 10);
        let rect = centered_rect(46, 30, area);
        assert_eq!(rect.width, 20);
        assert_eq!(rect.height, 10);

        let rect = centered_rect(10, 4, Rect::new(0, 0, 30, 10));
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (10, 3, 10, 4));
    }
}
