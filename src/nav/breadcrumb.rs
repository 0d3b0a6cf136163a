//! Breadcrumb history of descents.
//!
//! The stack records only identifiers and level tags. Backing out always
//! re-fetches from the server, so no entity data is kept here.

use serde::{Deserialize, Serialize};

use super::Level;

/// Separator used when the path is joined into a single status string.
pub const PATH_SEPARATOR: &str = " > ";

/// A record of one descent: the level it started from and the selected entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// The level the user descended from.
    pub level: Level,
    /// Identifier of the row that was selected at that level.
    pub selector_id: String,
}

impl Breadcrumb {
    /// Create a breadcrumb.
    pub fn new(level: Level, selector_id: impl Into<String>) -> Self {
        Self {
            level,
            selector_id: selector_id.into(),
        }
    }

    /// Display form, `"<selector_id> (<level>)"`.
    pub fn display(&self) -> String {
        format!("{} ({})", self.selector_id, self.level)
    }
}

/// Ordered history of breadcrumbs, oldest first.
///
/// The root list is never represented, so an empty stack means the user is
/// at [`Level::ROOT`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NavigationStack {
    crumbs: Vec<Breadcrumb>,
}

impl NavigationStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a descent.
    pub fn push(&mut self, crumb: Breadcrumb) {
        self.crumbs.push(crumb);
    }

    /// Remove and return the most recent breadcrumb.
    pub fn pop_tail(&mut self) -> Option<Breadcrumb> {
        self.crumbs.pop()
    }

    /// The most recent breadcrumb, if any.
    pub fn peek_tail(&self) -> Option<&Breadcrumb> {
        self.crumbs.last()
    }

    /// Number of descents since the root.
    pub fn len(&self) -> usize {
        self.crumbs.len()
    }

    /// Whether the user is at the root.
    pub fn is_empty(&self) -> bool {
        self.crumbs.is_empty()
    }

    /// Iterate oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Breadcrumb> {
        self.crumbs.iter()
    }

    /// Display strings for each breadcrumb, oldest first.
    pub fn serialize(&self) -> Vec<String> {
        self.crumbs.iter().map(Breadcrumb::display).collect()
    }

    /// The serialized path joined with [`PATH_SEPARATOR`].
    pub fn path(&self) -> String {
        self.serialize().join(PATH_SEPARATOR)
    }
}
