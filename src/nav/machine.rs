//! The navigation state machine.
//!
//! States are the four [`Level`]s. Key-driven inputs (descend, ascend, retry,
//! quit) and fetch outcomes are applied by [`transition`], which never
//! performs I/O: it returns the next [`NavState`] and a list of
//! [`NavEffect`]s for the caller to carry out.
//!
//! Content only changes when a fetch result whose ticket matches the pending
//! ticket arrives. Anything else is stale and is dropped.

use serde::{Deserialize, Serialize};

use super::{Breadcrumb, FetchRequest, FetchResult, FetchTicket, InvariantViolation, Level, NavigationStack};

/// Navigation position plus bookkeeping for the in-flight fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavState {
    /// The level the user is at.
    level: Level,
    /// How the user got here.
    stack: NavigationStack,
    /// Counter used for the next fetch ticket.
    generation: u64,
    /// The only fetch whose result will be honored.
    pending: Option<FetchTicket>,
    /// The level whose content is currently on screen.
    shown: Option<Level>,
    /// Whether the last fetch for this location failed.
    failed: bool,
}

impl Default for NavState {
    fn default() -> Self {
        Self::new()
    }
}

impl NavState {
    /// A state at the root with nothing shown yet.
    pub fn new() -> Self {
        Self {
            level: Level::ROOT,
            stack: NavigationStack::new(),
            generation: 0,
            pending: None,
            shown: None,
            failed: false,
        }
    }

    /// The current level.
    pub fn level(&self) -> Level {
        self.level
    }

    /// The breadcrumb stack.
    pub fn stack(&self) -> &NavigationStack {
        &self.stack
    }

    /// The ticket of the fetch currently awaited.
    pub fn pending(&self) -> Option<FetchTicket> {
        self.pending
    }

    /// Whether a fetch for the current location is in flight.
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether the last fetch for the current location failed.
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// The level of the content on screen.
    pub fn shown(&self) -> Option<Level> {
        self.shown
    }

    /// Whether the screen shows the content of the current level.
    pub fn is_settled(&self) -> bool {
        self.shown == Some(self.level) && self.pending.is_none()
    }

    /// The request that loads the current location.
    ///
    /// Rebuilt from the stack alone, which is why ascend always refetches.
    pub fn location_request(&self) -> Result<FetchRequest, InvariantViolation> {
        match self.stack.peek_tail() {
            None => {
                if self.level != Level::ROOT {
                    return Err(InvariantViolation::LevelMismatch {
                        expected: Level::ROOT,
                        actual: self.level,
                    });
                }
                FetchRequest::for_level(Level::ROOT, None)
            }
            Some(tail) => {
                let expected = tail
                    .level
                    .child()
                    .ok_or(InvariantViolation::ChildlessBreadcrumb(tail.level))?;
                if expected != self.level {
                    return Err(InvariantViolation::LevelMismatch {
                        expected,
                        actual: self.level,
                    });
                }
                FetchRequest::for_level(expected, Some(&tail.selector_id))
            }
        }
    }

    /// Issue a fresh fetch for the current location, superseding any pending one.
    fn issue_fetch(&mut self, effects: &mut Vec<NavEffect>) -> Result<(), InvariantViolation> {
        let request = self.location_request()?;
        self.generation += 1;
        let ticket = FetchTicket {
            level: self.level,
            generation: self.generation,
        };
        self.pending = Some(ticket);
        self.failed = false;
        effects.push(NavEffect::Fetch { ticket, request });
        Ok(())
    }
}

/// Events applied to the navigation state.
#[derive(Debug, Clone)]
pub enum NavInput {
    /// Load the current location (the implicit root fetch at startup).
    Start,
    /// Select the highlighted row, if any.
    Descend { selected: Option<String> },
    /// Go back one level.
    Ascend,
    /// Re-issue the fetch for the current location after a failure.
    Retry,
    /// Leave the program.
    Quit,
    /// A fetch completed.
    FetchSucceeded {
        ticket: FetchTicket,
        result: FetchResult,
    },
    /// A fetch failed.
    FetchFailed { ticket: FetchTicket, error: String },
}

/// Side effects requested by a transition.
#[derive(Debug, Clone)]
pub enum NavEffect {
    /// Start an asynchronous fetch tagged with `ticket`.
    Fetch {
        ticket: FetchTicket,
        request: FetchRequest,
    },
    /// Materialize and display this result.
    Show(FetchResult),
    /// Report a fetch error; the current screen stays as it is.
    ReportError(String),
    /// A stale result was dropped.
    Discarded { ticket: FetchTicket },
    /// Terminate the program.
    Exit,
}

/// The outcome of one transition.
#[derive(Debug, Clone)]
pub struct Step {
    /// The next state.
    pub state: NavState,
    /// Effects to perform, in order.
    pub effects: Vec<NavEffect>,
}

impl Step {
    fn unchanged(state: &NavState) -> Self {
        Self {
            state: state.clone(),
            effects: Vec::new(),
        }
    }

    /// Whether the transition did nothing.
    pub fn is_noop(&self) -> bool {
        self.effects.is_empty()
    }
}

/// Apply `input` to `state`.
///
/// # Errors
///
/// Returns an [`InvariantViolation`] if `state` is inconsistent (for example
/// a deserialized stack whose breadcrumbs do not lead to the current level)
/// or a result does not match the kind of its ticket.
pub fn transition(state: &NavState, input: NavInput) -> Result<Step, InvariantViolation> {
    let mut next = state.clone();
    let mut effects = Vec::new();

    match input {
        NavInput::Start => next.issue_fetch(&mut effects)?,

        NavInput::Descend { selected } => {
            let Some(child) = next.level.child() else {
                return Ok(Step::unchanged(state));
            };
            // The highlighted row only belongs to this level once its list is on screen.
            if !next.is_settled() {
                return Ok(Step::unchanged(state));
            }
            let Some(selector_id) = selected else {
                return Ok(Step::unchanged(state));
            };
            next.stack.push(Breadcrumb::new(next.level, selector_id));
            next.level = child;
            next.issue_fetch(&mut effects)?;
        }

        NavInput::Ascend => {
            if next.stack.pop_tail().is_none() {
                return Ok(Step::unchanged(state));
            }
            next.level = match next.stack.peek_tail() {
                Some(tail) => tail
                    .level
                    .child()
                    .ok_or(InvariantViolation::ChildlessBreadcrumb(tail.level))?,
                None => Level::ROOT,
            };
            next.issue_fetch(&mut effects)?;
        }

        NavInput::Retry => {
            if !next.failed || next.pending.is_some() {
                return Ok(Step::unchanged(state));
            }
            next.issue_fetch(&mut effects)?;
        }

        NavInput::Quit => effects.push(NavEffect::Exit),

        NavInput::FetchSucceeded { ticket, result } => {
            if next.pending != Some(ticket) {
                effects.push(NavEffect::Discarded { ticket });
            } else if result.level() != ticket.level {
                return Err(InvariantViolation::ResultKindMismatch {
                    expected: ticket.level,
                    actual: result.level(),
                });
            } else {
                next.pending = None;
                next.failed = false;
                next.shown = Some(ticket.level);
                effects.push(NavEffect::Show(result));
            }
        }

        NavInput::FetchFailed { ticket, error } => {
            if next.pending != Some(ticket) {
                effects.push(NavEffect::Discarded { ticket });
            } else {
                next.pending = None;
                next.failed = true;
                effects.push(NavEffect::ReportError(error));
            }
        }
    }

    Ok(Step {
        state: next,
        effects,
    })
}
