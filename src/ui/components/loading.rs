//! Loading spinner.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

/// Spinner animation frames.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// A spinner with a message, advanced once per tick while active.
#[derive(Debug, Clone, Default)]
pub struct LoadingIndicator {
    message: String,
    frame: usize,
    active: bool,
}

impl LoadingIndicator {
    /// Create an idle spinner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate with `message`, restarting the animation.
    pub fn start(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.frame = 0;
        self.active = true;
    }

    /// Stop spinning.
    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Whether the spinner is running.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The message shown next to the spinner.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Advance one frame.
    pub fn tick(&mut self) {
        if self.active {
            self.frame = (self.frame + 1) % SPINNER_FRAMES.len();
        }
    }

    /// `"⠋ message"` while active, otherwise empty.
    pub fn text(&self) -> String {
        if self.active {
            format!("{} {}", SPINNER_FRAMES[self.frame], self.message)
        } else {
            String::new()
        }
    }

    /// Draw centered in `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.active {
            return;
        }
        let paragraph = Paragraph::new(self.text())
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_stop() {
        let mut loader = LoadingIndicator::new();
        assert!(!loader.is_active());
        assert!(loader.text().is_empty());

        loader.start("Loading Boards...");
        assert!(loader.is_active());
        assert_eq!(loader.message(), "Loading Boards...");
        assert!(loader.text().ends_with("Loading Boards..."));

        loader.stop();
        assert!(!loader.is_active());
    }

    #[test]
    fn test_tick_advances_and_wraps() {
        let mut loader = LoadingIndicator::new();
        loader.start("x");
        let first = loader.text();
        loader.tick();
        assert_ne!(loader.text(), first);

        for _ in 1..SPINNER_FRAMES.len() {
            loader.tick();
        }
        assert_eq!(loader.text(), first);
    }

    #[test]
    fn test_tick_inactive_does_nothing() {
        let mut loader = LoadingIndicator::new();
        loader.tick();
        assert_eq!(loader.frame, 0);
    }
}
