//! Hierarchical drill-down navigation.
//!
//! Navigation is modelled as a plain `(Level, NavigationStack)` state and a
//! pure [`transition`] function that returns the next state plus the side
//! effects (fetches to issue, results to show) for the event loop to perform.

mod breadcrumb;
mod fetch;
mod level;
mod machine;

use thiserror::Error;

pub use breadcrumb::{Breadcrumb, NavigationStack, PATH_SEPARATOR};
pub use fetch::{FetchRequest, FetchResult, FetchTicket};
pub use level::Level;
pub use machine::{transition, NavEffect, NavInput, NavState, Step};

/// A navigation state that cannot be produced by valid transitions.
///
/// These indicate a bug (or a corrupted saved state) and are fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// A breadcrumb recorded a descent from a level without children.
    #[error("breadcrumb records a descent from {0}, which has no children")]
    ChildlessBreadcrumb(Level),

    /// The current level is not the child of the breadcrumb on top of the stack.
    #[error("current level is {actual} but the breadcrumb path leads to {expected}")]
    LevelMismatch { expected: Level, actual: Level },

    /// A non-root level was asked to fetch without a selector.
    #[error("{0} cannot be fetched without a selected parent")]
    MissingSelector(Level),

    /// The root level was asked to fetch with a selector.
    #[error("board list fetch cannot be scoped to '{0}'")]
    ScopedRootFetch(String),

    /// A result arrived for the pending ticket but holds another level's data.
    #[error("fetch issued for {expected} delivered {actual} data")]
    ResultKindMismatch { expected: Level, actual: Level },
}
