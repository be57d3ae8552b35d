// File: src/field.rs
// Purpose: Field names, field values and the Field Store record

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::UnknownField;

/// Kind of input control a field is rendered with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Password,
    Checkbox,
}

impl FieldKind {
    /// HTML `type` attribute for the input
    pub fn input_type(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Email => "email",
            FieldKind::Password => "password",
            FieldKind::Checkbox => "checkbox",
        }
    }
}

/// The five fields of the registration form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    FirstName,
    LastName,
    Email,
    Password,
    AcceptedTerms,
}

impl FieldName {
    /// Every field, in display order
    pub const ALL: [FieldName; 5] = [
        FieldName::FirstName,
        FieldName::LastName,
        FieldName::Email,
        FieldName::Password,
        FieldName::AcceptedTerms,
    ];

    /// Wire name, identical to the JSON key of [`FormFields`]
    pub fn as_str(self) -> &'static str {
        match self {
            FieldName::FirstName => "firstName",
            FieldName::LastName => "lastName",
            FieldName::Email => "email",
            FieldName::Password => "password",
            FieldName::AcceptedTerms => "acceptedTerms",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            FieldName::FirstName | FieldName::LastName => FieldKind::Text,
            FieldName::Email => FieldKind::Email,
            FieldName::Password => FieldKind::Password,
            FieldName::AcceptedTerms => FieldKind::Checkbox,
        }
    }

    /// Whether an empty value closes the Submission Gate
    pub fn is_required(self) -> bool {
        !matches!(self.kind(), FieldKind::Checkbox)
    }

    /// DOM id of the rendered input
    pub fn dom_id(self) -> &'static str {
        match self {
            FieldName::FirstName => "first-name",
            FieldName::LastName => "last-name",
            FieldName::Email => "email-input",
            FieldName::Password => "password-input",
            FieldName::AcceptedTerms => "terms-input",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldName::FirstName => "First Name:",
            FieldName::LastName => "Last Name:",
            FieldName::Email => "Email:",
            FieldName::Password => "Password:",
            FieldName::AcceptedTerms => "Do you agree to the Terms of Service?",
        }
    }

    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            FieldName::FirstName => Some("John"),
            FieldName::LastName => Some("Doe"),
            FieldName::Email => Some("johndoe@email.com"),
            FieldName::Password => Some("Password"),
            FieldName::AcceptedTerms => None,
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldName::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// A single field's value: raw text for inputs, checked state for the checkbox
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Checked(bool),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Text of a text value. A checked state has no text and reads as empty.
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s.as_str(),
            FieldValue::Checked(_) => "",
        }
    }

    /// Checked state of a checkbox value. Text is never a checked box.
    pub fn is_checked(&self) -> bool {
        matches!(self, FieldValue::Checked(true))
    }
}

/// The Field Store: current values of the five inputs.
///
/// Serializes with the camelCase keys used as the submission body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormFields {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub accepted_terms: bool,
}

impl FormFields {
    pub fn get(&self, field: FieldName) -> FieldValue {
        match field {
            FieldName::FirstName => FieldValue::Text(self.first_name.clone()),
            FieldName::LastName => FieldValue::Text(self.last_name.clone()),
            FieldName::Email => FieldValue::Text(self.email.clone()),
            FieldName::Password => FieldValue::Text(self.password.clone()),
            FieldName::AcceptedTerms => FieldValue::Checked(self.accepted_terms),
        }
    }

    /// Returns a copy with one field overwritten. A value of the wrong kind
    /// stores as empty text or an unchecked box.
    pub fn with(&self, field: FieldName, value: &FieldValue) -> Self {
        let mut next = self.clone();
        match field {
            FieldName::FirstName => next.first_name = value.as_text().to_string(),
            FieldName::LastName => next.last_name = value.as_text().to_string(),
            FieldName::Email => next.email = value.as_text().to_string(),
            FieldName::Password => next.password = value.as_text().to_string(),
            FieldName::AcceptedTerms => next.accepted_terms = value.is_checked(),
        }
        next
    }

    /// True when the field holds no input (blank text or unchecked box)
    pub fn is_blank(&self, field: FieldName) -> bool {
        match self.get(field) {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Checked(b) => !b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_name_round_trips_wire_names() {
        for field in FieldName::ALL {
            assert_eq!(field.as_str().parse::<FieldName>().unwrap(), field);
        }
        assert!("fname".parse::<FieldName>().is_err());
    }

    #[test]
    fn test_form_fields_json_keys() {
        let fields = FormFields {
            first_name: "Jo".to_string(),
            accepted_terms: true,
            ..Default::default()
        };
        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(json["firstName"], "Jo");
        assert_eq!(json["lastName"], "");
        assert_eq!(json["acceptedTerms"], true);
        assert_eq!(json.as_object().unwrap().len(), 5);
    }

    #[test]
    fn test_with_overwrites_one_field_only() {
        let fields = FormFields {
            first_name: "Jo".to_string(),
            ..Default::default()
        };
        let next = fields.with(FieldName::Email, &FieldValue::text("a@b.com"));
        assert_eq!(next.first_name, "Jo");
        assert_eq!(next.email, "a@b.com");
        assert_eq!(fields.email, "");
    }

    #[test]
    fn test_checkbox_only_takes_checked_state() {
        let fields = FormFields::default();
        assert!(fields.with(FieldName::AcceptedTerms, &FieldValue::Checked(true)).accepted_terms);
        assert!(!fields.with(FieldName::AcceptedTerms, &FieldValue::text("on")).accepted_terms);
        assert!(!fields.with(FieldName::AcceptedTerms, &FieldValue::text("true")).accepted_terms);
    }

    #[test]
    fn test_text_field_ignores_checked_state() {
        let fields = FormFields::default().with(FieldName::FirstName, &FieldValue::Checked(true));
        assert_eq!(fields.first_name, "");
    }

    #[test]
    fn test_blank_fields() {
        let fields = FormFields::default();
        assert!(FieldName::ALL.iter().all(|f| fields.is_blank(*f)));
        assert!(FieldName::AcceptedTerms.kind() == FieldKind::Checkbox);
        assert!(!FieldName::AcceptedTerms.is_required());
    }
}
