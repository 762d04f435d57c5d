//! Load-state machine for the embedded browser.
//!
//! ```text
//! Pending --GateResolved--> Ready --LoadFailed--> Errored --Retry--> Ready
//! ```
//!
//! Without a gating step the machine starts in `Ready`. Any other
//! (state, event) pair is rejected and leaves the state unchanged.

use std::fmt;

use webshell_types::error::{Result, ShellError};

/// Lifecycle of the browser surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadState {
    /// Waiting on the consent gate; a placeholder is shown.
    Pending,
    /// The browser is shown.
    Ready,
    /// The last load failed; a retry control is shown.
    Errored,
}

impl LoadState {
    pub fn name(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Ready => "ready",
            Self::Errored => "errored",
        }
    }

    /// Whether the browser surface should be mounted in this state.
    pub fn shows_browser(self) -> bool {
        self == Self::Ready
    }
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Input to the load-state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadEvent {
    /// The gating step finished, whatever its outcome.
    GateResolved,
    /// The browser reported a load failure.
    LoadFailed,
    /// The user pressed retry.
    Retry,
}

impl LoadEvent {
    pub fn name(self) -> &'static str {
        match self {
            Self::GateResolved => "gate resolved",
            Self::LoadFailed => "load failed",
            Self::Retry => "retry",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadStateMachine {
    state: LoadState,
}

impl LoadStateMachine {
    /// Start in `Pending` when a gating step exists, else in `Ready`.
    pub fn new(gated: bool) -> Self {
        Self {
            state: if gated {
                LoadState::Pending
            } else {
                LoadState::Ready
            },
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Apply `event`, returning the new state.
    pub fn apply(&mut self, event: LoadEvent) -> Result<LoadState> {
        let next = match (self.state, event) {
            (LoadState::Pending, LoadEvent::GateResolved) => LoadState::Ready,
            (LoadState::Ready, LoadEvent::LoadFailed) => LoadState::Errored,
            (LoadState::Errored, LoadEvent::Retry) => LoadState::Ready,
            (from, event) => {
                return Err(ShellError::InvalidTransition {
                    from: from.name(),
                    event: event.name(),
                });
            },
        };
        log::info!("Load state: {} -> {next} ({})", self.state, event.name());
        self.state = next;
        Ok(next)
    }

    pub fn resolve_gate(&mut self) -> Result<LoadState> {
        self.apply(LoadEvent::GateResolved)
    }

    pub fn fail(&mut self) -> Result<LoadState> {
        self.apply(LoadEvent::LoadFailed)
    }

    pub fn retry(&mut self) -> Result<LoadState> {
        self.apply(LoadEvent::Retry)
    }
}
