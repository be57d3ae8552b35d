// File: src/state.rs
// Purpose: Form state and the pure reducer that advances it

use onboard_validation::{validate_field, validate_form, FieldErrors, FieldName, FieldValue, FormFields};
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::debug;

/// Where the form is in its submit cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Sending,
}

/// A change event from one input.
///
/// Carries both the raw text and the checked state like a DOM input does;
/// the field's kind decides which one is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: FieldName,
    pub value: String,
    pub checked: bool,
}

impl FieldChange {
    pub fn text(field: FieldName, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            checked: false,
        }
    }

    pub fn checkbox(field: FieldName, checked: bool) -> Self {
        Self {
            field,
            value: String::new(),
            checked,
        }
    }

    /// Value to store: checked state for the checkbox, raw text otherwise
    pub fn field_value(&self) -> FieldValue {
        match self.field.kind() {
            onboard_validation::FieldKind::Checkbox => FieldValue::Checked(self.checked),
            _ => FieldValue::Text(self.value.clone()),
        }
    }
}

/// Events the form reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    FieldChanged(FieldChange),
    SubmitStarted,
    /// The remote acknowledged the submission; carries the response body
    SubmitSucceeded(JsonValue),
    SubmitFailed,
}

/// Field Store, Error Store and Submission Gate
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    fields: FormFields,
    errors: FieldErrors,
    can_submit: bool,
    phase: SubmissionPhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_response: Option<JsonValue>,
}

impl FormState {
    /// State at mount: empty fields, no messages, gate computed
    pub fn mount() -> Self {
        Self {
            fields: FormFields::default(),
            errors: FieldErrors::default(),
            can_submit: false,
            phase: SubmissionPhase::Idle,
            last_response: None,
        }
        .recompute_gate()
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// The Submission Gate
    pub fn can_submit(&self) -> bool {
        self.can_submit
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    /// Body of the last acknowledged submission
    pub fn last_response(&self) -> Option<&JsonValue> {
        self.last_response.as_ref()
    }

    // Runs after every store mutation, in the same step
    fn recompute_gate(mut self) -> Self {
        let required_present = FieldName::ALL
            .into_iter()
            .filter(|field| field.is_required())
            .all(|field| !self.fields.is_blank(field));

        self.can_submit = required_present
            && self.fields.accepted_terms
            && self.errors.is_clear()
            && validate_form(&self.fields);
        self
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::mount()
    }
}

/// Applies one action and returns the next state
pub fn reduce(state: FormState, action: FormAction) -> FormState {
    match action {
        FormAction::FieldChanged(change) => {
            let value = change.field_value();
            let fields = state.fields.with(change.field, &value);
            let errors = state
                .errors
                .with_result(change.field, validate_field(change.field, &value));

            debug!(field = %change.field, error = errors.get(change.field), "form state changed");

            FormState {
                fields,
                errors,
                ..state
            }
            .recompute_gate()
        }
        FormAction::SubmitStarted => FormState {
            phase: SubmissionPhase::Sending,
            ..state
        },
        FormAction::SubmitSucceeded(body) => FormState {
            fields: FormFields::default(),
            phase: SubmissionPhase::Idle,
            last_response: Some(body),
            ..state
        }
        .recompute_gate(),
        FormAction::SubmitFailed => FormState {
            phase: SubmissionPhase::Idle,
            ..state
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use onboard_validation::rules::messages;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn fill(state: FormState, changes: Vec<FieldChange>) -> FormState {
        changes
            .into_iter()
            .fold(state, |state, change| reduce(state, FormAction::FieldChanged(change)))
    }

    fn valid_changes() -> Vec<FieldChange> {
        vec![
            FieldChange::text(FieldName::FirstName, "Jo"),
            FieldChange::text(FieldName::LastName, "Do"),
            FieldChange::text(FieldName::Email, "a@b.com"),
            FieldChange::text(FieldName::Password, "Abcdef1!"),
            FieldChange::checkbox(FieldName::AcceptedTerms, true),
        ]
    }

    #[test]
    fn test_gate_closed_at_mount() {
        let state = FormState::mount();
        assert!(!state.can_submit());
        assert_eq!(state.fields(), &FormFields::default());
        assert!(state.errors().is_clear());
        assert_eq!(state.phase(), SubmissionPhase::Idle);
    }

    #[test]
    fn test_valid_input_opens_gate() {
        let state = fill(FormState::mount(), valid_changes());
        assert!(state.can_submit());
        assert!(state.errors().is_clear());
        assert_eq!(state.fields().first_name, "Jo");
        assert!(state.fields().accepted_terms);
    }

    #[test]
    fn test_change_only_touches_its_own_error() {
        let state = fill(
            FormState::mount(),
            vec![
                FieldChange::text(FieldName::Email, "nope"),
                FieldChange::text(FieldName::FirstName, "J"),
            ],
        );
        assert_eq!(state.errors().email, messages::EMAIL_FORMAT);
        assert_eq!(state.errors().first_name, messages::FIRST_NAME_LENGTH);
        assert_eq!(state.errors().last_name, "");

        let state = reduce(state, FormAction::FieldChanged(FieldChange::text(FieldName::FirstName, "Jo")));
        assert_eq!(state.errors().first_name, "");
        assert_eq!(state.errors().email, messages::EMAIL_FORMAT);
    }

    #[test]
    fn test_unchecking_terms_closes_gate() {
        let state = fill(FormState::mount(), valid_changes());
        let state = reduce(
            state,
            FormAction::FieldChanged(FieldChange::checkbox(FieldName::AcceptedTerms, false)),
        );
        assert!(!state.can_submit());
        assert_eq!(state.errors().accepted_terms, messages::TERMS_REQUIRED);
    }

    #[rstest]
    #[case(FieldName::AcceptedTerms, "on", false, FieldValue::Checked(false))]
    #[case(FieldName::AcceptedTerms, "", true, FieldValue::Checked(true))]
    #[case(FieldName::Email, "a@b.com", true, FieldValue::text("a@b.com"))]
    #[case(FieldName::Password, "", false, FieldValue::text(""))]
    fn test_field_kind_picks_stored_value(
        #[case] field: FieldName,
        #[case] value: &str,
        #[case] checked: bool,
        #[case] expected: FieldValue,
    ) {
        let change = FieldChange {
            field,
            value: value.to_string(),
            checked,
        };
        assert_eq!(change.field_value(), expected);
    }

    #[rstest]
    #[case(FieldName::FirstName, "", messages::FIRST_NAME_LENGTH)]
    #[case(FieldName::LastName, "D", messages::LAST_NAME_LENGTH)]
    #[case(FieldName::Email, "", messages::EMAIL_REQUIRED)]
    #[case(FieldName::Password, "abc", messages::PASSWORD_PATTERN)]
    fn test_invalid_change_closes_gate(#[case] field: FieldName, #[case] value: &str, #[case] expected: &str) {
        let state = fill(FormState::mount(), valid_changes());
        let state = reduce(state, FormAction::FieldChanged(FieldChange::text(field, value)));
        assert!(!state.can_submit());
        assert_eq!(state.errors().get(field), expected);
    }

    #[test]
    fn test_success_resets_fields_and_keeps_response() {
        let state = fill(FormState::mount(), valid_changes());
        let state = reduce(state, FormAction::SubmitStarted);
        assert_eq!(state.phase(), SubmissionPhase::Sending);

        let body = serde_json::json!({ "id": "42" });
        let state = reduce(state, FormAction::SubmitSucceeded(body.clone()));
        assert_eq!(state.fields(), &FormFields::default());
        assert_eq!(state.last_response(), Some(&body));
        assert_eq!(state.phase(), SubmissionPhase::Idle);
        assert!(!state.can_submit());
    }

    #[test]
    fn test_failure_keeps_fields() {
        let filled = fill(FormState::mount(), valid_changes());
        let state = reduce(filled.clone(), FormAction::SubmitStarted);
        let state = reduce(state, FormAction::SubmitFailed);
        assert_eq!(state, filled);
    }
}
