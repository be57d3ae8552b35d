// Onboard - registration form controller
// Field Store, Error Store and Submission Gate as an explicit reducer state

pub mod controller;
pub mod state;
pub mod submit;

pub use controller::{FormController, SubmitOutcome};
pub use state::{reduce, FieldChange, FormAction, FormState, SubmissionPhase};
pub use submit::{HttpSubmitter, SubmissionError, SubmitReceipt, Submitter, DEFAULT_ENDPOINT};

// Re-export the rule set so callers need a single dependency
pub use onboard_validation as validation;
pub use onboard_validation::{FieldErrors, FieldName, FieldValue, FormFields};
