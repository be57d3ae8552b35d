// File: src/controller.rs
// Purpose: Owns the form state and drives it from input and submit events

use tracing::{error, info, warn};

use crate::state::{reduce, FieldChange, FormAction, FormState, SubmissionPhase};
use crate::submit::{SubmitReceipt, Submitter};

/// Result of a submit action.
///
/// For callers and diagnostics only: the form itself shows no failure message.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Gate closed or a submission already in flight; nothing was sent
    Blocked,
    Submitted(SubmitReceipt),
    Failed,
}

/// Form Validation Controller.
///
/// Every event takes `&mut self` and runs to completion, so two events can
/// never interleave their store updates.
pub struct FormController<S> {
    state: FormState,
    submitter: S,
}

impl<S: Submitter> FormController<S> {
    pub fn new(submitter: S) -> Self {
        Self {
            state: FormState::mount(),
            submitter,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn submitter(&self) -> &S {
        &self.submitter
    }

    fn dispatch(&mut self, action: FormAction) {
        apply(&mut self.state, action);
    }

    /// Input event: store the value, validate the field, recompute the gate
    pub fn on_field_change(&mut self, change: FieldChange) -> &FormState {
        self.dispatch(FormAction::FieldChanged(change));
        &self.state
    }

    /// Submit event. Sends only when the gate is open.
    ///
    /// On success the fields are cleared. On failure the error is logged and
    /// the fields stay as they were. Dropping the returned future mid-send
    /// counts as a failure, so the phase always returns to `Idle`.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if !self.state.can_submit() || self.state.phase() == SubmissionPhase::Sending {
            warn!(phase = ?self.state.phase(), "submit ignored: form is not ready");
            return SubmitOutcome::Blocked;
        }

        self.dispatch(FormAction::SubmitStarted);
        let fields = self.state.fields().clone();
        let in_flight = InFlight {
            state: &mut self.state,
            settled: false,
        };

        match self.submitter.submit(&fields).await {
            Ok(receipt) => {
                info!(status = receipt.status, "form submitted");
                in_flight.settle(FormAction::SubmitSucceeded(receipt.body.clone()));
                SubmitOutcome::Submitted(receipt)
            }
            Err(e) => {
                error!(error = %e, "form submission failed");
                in_flight.settle(FormAction::SubmitFailed);
                SubmitOutcome::Failed
            }
        }
    }
}

fn apply(state: &mut FormState, action: FormAction) {
    let current = std::mem::take(state);
    *state = reduce(current, action);
}

/// A submission between `SubmitStarted` and its outcome.
///
/// Dropped without `settle` means the send was cancelled: the form goes back
/// to `Idle` with its fields untouched.
struct InFlight<'a> {
    state: &'a mut FormState,
    settled: bool,
}

impl InFlight<'_> {
    fn settle(mut self, action: FormAction) {
        apply(self.state, action);
        self.settled = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            warn!("form submission cancelled");
            apply(self.state, FormAction::SubmitFailed);
        }
    }
}
