//! Key bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Descend,
    Ascend,
    Retry,
    ToggleHelp,
    /// Start typing a row filter.
    Filter,
    Quit,
    Up,
    Down,
    Top,
    Bottom,
    PageUp,
    PageDown,
}

impl Action {
    /// Short description shown in the help overlay.
    pub fn description(&self) -> &'static str {
        match self {
            Action::Descend => "open selected item",
            Action::Ascend => "go back",
            Action::Retry => "retry failed load",
            Action::ToggleHelp => "toggle help",
            Action::Filter => "filter rows",
            Action::Quit => "quit",
            Action::Up => "move up",
            Action::Down => "move down",
            Action::Top => "jump to top",
            Action::Bottom => "jump to bottom",
            Action::PageUp => "page up",
            Action::PageDown => "page down",
        }
    }
}

/// An edit to the row filter while it is being typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKey {
    Push(char),
    Pop,
    /// Keep the filter and return to navigation.
    Confirm,
    /// Drop the filter.
    Cancel,
}

/// Maps key presses to actions.
#[derive(Debug, Clone, Default)]
pub struct KeyBindings;

impl KeyBindings {
    /// Create the default bindings.
    pub fn new() -> Self {
        Self
    }

    /// Whether `key` is Ctrl+C, which quits even while typing.
    pub fn is_interrupt(&self, key: KeyEvent) -> bool {
        key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
    }

    /// The filter edit for `key` while the filter has focus.
    pub fn filter_key(&self, key: KeyEvent) -> Option<FilterKey> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return None;
        }
        match key.code {
            KeyCode::Char(c) => Some(FilterKey::Push(c)),
            KeyCode::Backspace => Some(FilterKey::Pop),
            KeyCode::Enter => Some(FilterKey::Confirm),
            KeyCode::Esc => Some(FilterKey::Cancel),
            _ => None,
        }
    }

    /// The action bound to `key`, if any.
    pub fn action(&self, key: KeyEvent) -> Option<Action> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let action = match key.code {
            KeyCode::Char('c') if ctrl => Action::Quit,
            KeyCode::Char('d') if ctrl => Action::PageDown,
            KeyCode::Char('u') if ctrl => Action::PageUp,
            _ if ctrl => return None,
            KeyCode::Enter => Action::Descend,
            KeyCode::Esc | KeyCode::Backspace => Action::Ascend,
            KeyCode::Char('r') => Action::Retry,
            KeyCode::Char('?') => Action::ToggleHelp,
            KeyCode::Char('/') => Action::Filter,
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Up | KeyCode::Char('k') => Action::Up,
            KeyCode::Down | KeyCode::Char('j') => Action::Down,
            KeyCode::Home | KeyCode::Char('g') => Action::Top,
            KeyCode::End | KeyCode::Char('G') => Action::Bottom,
            KeyCode::PageUp => Action::PageUp,
            KeyCode::PageDown => Action::PageDown,
            _ => return None,
        };
        Some(action)
    }

    /// Key labels and descriptions for the help overlay.
    pub fn help_entries(&self) -> Vec<(&'static str, &'static str)> {
        [
            ("Enter", Action::Descend),
            ("Esc/Bksp", Action::Ascend),
            ("j/k ↑/↓", Action::Down),
            ("g/G", Action::Top),
            ("^d/^u", Action::PageDown),
            ("/", Action::Filter),
            ("r", Action::Retry),
            ("?", Action::ToggleHelp),
            ("q/^c", Action::Quit),
        ]
        .into_iter()
        .map(|(keys, action)| {
            let description = match action {
                Action::Down => "move selection / scroll",
                Action::Top => "jump to top / bottom",
                Action::PageDown => "page down / up",
                other => other.description(),
            };
            (keys, description)
        })
        .collect()
    }

    /// One-line hint for the status bar, in `key:action` form.
    pub fn short_hints(&self) -> &'static str {
        "enter:open  esc:back  /:filter  ?:help  q:quit"
    }
}
