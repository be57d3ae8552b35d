// File: src/error.rs
// Purpose: Validation error types and the per-field Error Store

use serde::Serialize;
use thiserror::Error;

use crate::field::FieldName;

/// A failed rule on one field. Displays as the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: FieldName,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// A field name that is not part of the form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown form field: {0}")]
pub struct UnknownField(pub String);

/// The Error Store: one message per field, empty when the field is valid.
///
/// A struct rather than a map so it can never hold a partial set of fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldErrors {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub accepted_terms: String,
}

impl FieldErrors {
    pub fn get(&self, field: FieldName) -> &str {
        match field {
            FieldName::FirstName => &self.first_name,
            FieldName::LastName => &self.last_name,
            FieldName::Email => &self.email,
            FieldName::Password => &self.password,
            FieldName::AcceptedTerms => &self.accepted_terms,
        }
    }

    /// Returns a copy with one field's message replaced; the others are kept as-is
    pub fn with(&self, field: FieldName, message: impl Into<String>) -> Self {
        let mut next = self.clone();
        let slot = match field {
            FieldName::FirstName => &mut next.first_name,
            FieldName::LastName => &mut next.last_name,
            FieldName::Email => &mut next.email,
            FieldName::Password => &mut next.password,
            FieldName::AcceptedTerms => &mut next.accepted_terms,
        };
        *slot = message.into();
        next
    }

    /// Copy with the result of one field's validation recorded
    pub fn with_result(&self, field: FieldName, result: Result<(), ValidationError>) -> Self {
        match result {
            Ok(()) => self.with(field, String::new()),
            Err(err) => self.with(field, err.message),
        }
    }

    /// True when no field carries a message
    pub fn is_clear(&self) -> bool {
        FieldName::ALL.iter().all(|field| self.get(*field).is_empty())
    }

    /// Fields and their messages, in display order
    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> + '_ {
        FieldName::ALL.into_iter().map(move |field| (field, self.get(field)))
    }
}
