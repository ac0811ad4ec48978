use parking_lot::RwLock;

use crate::logic::flow;
use crate::model::{FlowEvent, FlowFlags, FlowState};

/// Ticket snapshotting the session epoch at the moment a fetch was started.
/// A commit with a stale ticket is discarded, so in-flight results cannot be
/// applied after the owning view was torn down or its data invalidated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    epoch: u64,
}

#[derive(Debug, Default)]
struct SessionState {
    epoch: u64,
    flags: FlowFlags,
}

/// Single owner of the flow flags.
///
/// Fetch-outcome handlers are the only writers; everything else reads the
/// derived state. Replaces implicit cross-slice store subscriptions with an
/// explicit lifecycle: begin a fetch, commit its outcome if still live.
#[derive(Debug, Default)]
pub struct ViewSession {
    inner: RwLock<SessionState>,
}

impl ViewSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the current epoch before starting a fetch.
    pub fn begin(&self) -> FetchTicket {
        FetchTicket {
            epoch: self.inner.read().epoch,
        }
    }

    /// Invalidate all in-flight work: navigation away from the owning view,
    /// or a successful mutation of the underlying entity.
    pub fn invalidate(&self) {
        self.inner.write().epoch += 1;
    }

    /// Apply a fetch outcome, unless the session moved on since the fetch
    /// started. Returns whether the event was applied.
    pub fn commit(&self, ticket: FetchTicket, event: FlowEvent) -> bool {
        let mut state = self.inner.write();
        if state.epoch != ticket.epoch {
            log::debug!("discarding stale fetch outcome {event:?}");
            return false;
        }
        state.flags = flow::apply_event(state.flags, event);
        true
    }

    pub fn flags(&self) -> FlowFlags {
        self.inner.read().flags
    }

    /// Derived step and navigation state; one recomputation per call, no
    /// observable intermediate states.
    pub fn state(&self) -> FlowState {
        flow::derive(self.flags())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CompanyOnboardingStep, Presence};

    #[test]
    fn committed_outcomes_update_the_flags() {
        let session = ViewSession::new();
        let ticket = session.begin();
        assert!(session.commit(ticket, FlowEvent::CompanyFetched { found: true }));
        assert_eq!(session.flags().company, Presence::Present);
    }

    #[test]
    fn stale_ticket_is_discarded_after_invalidation() {
        let session = ViewSession::new();
        let ticket = session.begin();
        session.invalidate();

        assert!(!session.commit(ticket, FlowEvent::CompanyFetched { found: true }));
        assert_eq!(session.flags().company, Presence::Unknown);

        // A fetch begun after the invalidation commits normally.
        let fresh = session.begin();
        assert!(session.commit(fresh, FlowEvent::CompanyFetched { found: true }));
        assert_eq!(session.flags().company, Presence::Present);
    }

    #[test]
    fn deletion_signal_resets_the_derived_state() {
        let session = ViewSession::new();
        for event in [
            FlowEvent::CompanyFetched { found: true },
            FlowEvent::LicenseFetched { found: true },
            FlowEvent::BranchFetched { found: true },
        ] {
            let ticket = session.begin();
            session.commit(ticket, event);
        }
        assert_eq!(
            session.state().company_step,
            CompanyOnboardingStep::Completed
        );

        let ticket = session.begin();
        session.commit(ticket, FlowEvent::CompanyDeleted);
        assert_eq!(session.state().company_step, CompanyOnboardingStep::Company);
        assert!(!session.state().nav.employees);
    }
}
