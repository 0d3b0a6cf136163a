//! Terminal events and key bindings.

mod handler;
mod keys;

use crossterm::event::KeyEvent;

pub use handler::EventHandler;
pub use keys::{Action, FilterKey, KeyBindings};

/// An event for the main loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key press.
    Key(KeyEvent),
    /// The terminal was resized to `(width, height)`.
    Resize(u16, u16),
    /// No input within the tick interval.
    Tick,
}
