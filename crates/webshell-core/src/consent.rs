//! One-time tracking-consent gate.
//!
//! The gate asks exactly once, records whatever comes back, and then opens.
//! A denied or failed prompt still opens the gate: the outcome is only
//! passed on, it never blocks the browser.

pub use webshell_platform::services::ConsentOutcome;
use webshell_platform::services::{PermissionPoll, PermissionService};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GateState {
    Idle,
    Requested,
    Resolved(ConsentOutcome),
}

#[derive(Debug, Clone)]
pub struct ConsentGate {
    state: GateState,
}

impl ConsentGate {
    pub fn new() -> Self {
        Self {
            state: GateState::Idle,
        }
    }

    /// Show the permission prompt. Later calls do not ask again.
    pub fn start<P: PermissionService + ?Sized>(&mut self, permissions: &mut P) {
        if self.state != GateState::Idle {
            return;
        }
        match permissions.request_tracking() {
            Ok(()) => {
                log::info!("Tracking permission requested");
                self.state = GateState::Requested;
            },
            Err(e) => {
                log::warn!("Tracking permission request failed: {e}");
                self.state = GateState::Resolved(ConsentOutcome::Undetermined);
            },
        }
    }

    /// Poll the outstanding prompt. Returns the outcome once known.
    pub fn poll<P: PermissionService + ?Sized>(
        &mut self,
        permissions: &mut P,
    ) -> Option<ConsentOutcome> {
        match self.state {
            GateState::Idle => None,
            GateState::Resolved(outcome) => Some(outcome),
            GateState::Requested => {
                let outcome = match permissions.poll_tracking() {
                    Ok(PermissionPoll::Waiting) => return None,
                    Ok(PermissionPoll::Resolved(outcome)) => outcome,
                    Err(e) => {
                        log::warn!("Tracking permission prompt failed: {e}");
                        ConsentOutcome::Undetermined
                    },
                };
                log::info!("Tracking permission {outcome}");
                self.state = GateState::Resolved(outcome);
                Some(outcome)
            },
        }
    }

    pub fn outcome(&self) -> Option<ConsentOutcome> {
        match self.state {
            GateState::Resolved(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.outcome().is_some()
    }
}

impl Default for ConsentGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use webshell_platform::HeadlessPlatform;

    #[test]
    fn unstarted_gate_is_unresolved() {
        let mut gate = ConsentGate::new();
        let mut platform = HeadlessPlatform::new();
        assert_eq!(gate.poll(&mut platform), None);
        assert!(!gate.is_resolved());
        assert_eq!(platform.permission_requests(), 0);
    }

    #[test]
    fn resolves_after_prompt_latency() {
        let mut gate = ConsentGate::new();
        let mut platform = HeadlessPlatform::new()
            .with_consent(ConsentOutcome::Granted)
            .with_latency(2);
        gate.start(&mut platform);
        assert_eq!(gate.poll(&mut platform), None);
        assert_eq!(gate.poll(&mut platform), None);
        assert_eq!(gate.poll(&mut platform), Some(ConsentOutcome::Granted));
        assert_eq!(gate.outcome(), Some(ConsentOutcome::Granted));
    }

    #[test]
    fn denial_still_resolves() {
        let mut gate = ConsentGate::new();
        let mut platform = HeadlessPlatform::new().with_consent(ConsentOutcome::Denied);
        gate.start(&mut platform);
        assert_eq!(gate.poll(&mut platform), Some(ConsentOutcome::Denied));
        assert!(gate.is_resolved());
    }

    #[test]
    fn asks_exactly_once() {
        let mut gate = ConsentGate::new();
        let mut platform = HeadlessPlatform::new();
        gate.start(&mut platform);
        gate.start(&mut platform);
        gate.poll(&mut platform);
        gate.start(&mut platform);
        gate.poll(&mut platform);
        assert_eq!(platform.permission_requests(), 1);
    }

    #[test]
    fn failed_prompt_resolves_undetermined() {
        let mut gate = ConsentGate::new();
        let mut platform = HeadlessPlatform::new().with_failing_permission();
        gate.start(&mut platform);
        assert_eq!(gate.outcome(), Some(ConsentOutcome::Undetermined));
        assert_eq!(gate.poll(&mut platform), Some(ConsentOutcome::Undetermined));
    }
}
