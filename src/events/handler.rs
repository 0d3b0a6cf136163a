//! Terminal event polling.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEventKind};

use super::Event;

/// Default tick interval in milliseconds.
pub const DEFAULT_TICK_RATE_MS: u64 = 100;

/// Polls crossterm, producing a [`Event::Tick`] when the tick interval
/// passes without input.
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a handler with the default tick rate.
    pub fn new() -> Self {
        Self::with_tick_rate(DEFAULT_TICK_RATE_MS)
    }

    /// Create a handler that ticks every `tick_rate_ms`.
    pub fn with_tick_rate(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Time between ticks.
    pub fn tick_rate(&self) -> Duration {
        self.tick_rate
    }

    /// Wait up to one tick for the next event.
    pub fn next(&self) -> std::io::Result<Event> {
        if !event::poll(self.tick_rate)? {
            return Ok(Event::Tick);
        }

        Ok(match event::read()? {
            // Windows reports releases too; only presses drive navigation.
            CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => Event::Key(key),
            CrosstermEvent::Resize(width, height) => Event::Resize(width, height),
            _ => Event::Tick,
        })
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_handler_tick_rate() {
        assert_eq!(
            EventHandler::default().tick_rate(),
            Duration::from_millis(DEFAULT_TICK_RATE_MS)
        );
        assert_eq!(
            EventHandler::with_tick_rate(50).tick_rate(),
            Duration::from_millis(50)
        );
    }
}
