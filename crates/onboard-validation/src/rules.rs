// File: src/rules.rs
// Purpose: The fixed per-field rule chains and the whole-form check

use crate::email::is_valid_email;
use crate::error::{FieldErrors, ValidationError};
use crate::field::{FieldName, FieldValue, FormFields};
use crate::password::{matches_password_pattern, PASSWORD_MAX_LENGTH};
use crate::string::{has_max_length, has_min_length};

/// User-facing messages
pub mod messages {
    pub const FIRST_NAME_LENGTH: &str = "The first name must be at least two characters long";
    pub const FIRST_NAME_REQUIRED: &str = "The first name is a required field";
    pub const LAST_NAME_LENGTH: &str = "The last name must be at least two characters long";
    pub const LAST_NAME_REQUIRED: &str = "The last name is a required field";
    pub const EMAIL_FORMAT: &str = "The email must be a valid email address";
    pub const EMAIL_REQUIRED: &str = "The email is a required field";
    pub const PASSWORD_MAX_LENGTH: &str = "The password max character limit is twenty-five (25)";
    pub const PASSWORD_PATTERN: &str =
        "Must contain at least 8 characters, one letter, one number and one special character (@$!%*#?&)";
    pub const PASSWORD_REQUIRED: &str = "The password is a required field";
    pub const TERMS_REQUIRED: &str = "You must accept the Terms of Service";
}

/// One (condition, message) pair of a chain
struct Rule {
    check: fn(&str) -> bool,
    message: &'static str,
}

/// A text field's rule chain
struct TextRules {
    /// Strip surrounding whitespace before any rule runs
    trim: bool,
    rules: &'static [Rule],
}

fn min_two(s: &str) -> bool {
    has_min_length(s, 2)
}

fn required(s: &str) -> bool {
    !s.is_empty()
}

// Empty input is left to the `required` rule
fn email_syntax(s: &str) -> bool {
    s.is_empty() || is_valid_email(s)
}

fn password_within_max(s: &str) -> bool {
    has_max_length(s, PASSWORD_MAX_LENGTH)
}

static FIRST_NAME: TextRules = TextRules {
    trim: true,
    rules: &[
        Rule { check: min_two, message: messages::FIRST_NAME_LENGTH },
        Rule { check: required, message: messages::FIRST_NAME_REQUIRED },
    ],
};

static LAST_NAME: TextRules = TextRules {
    trim: true,
    rules: &[
        Rule { check: min_two, message: messages::LAST_NAME_LENGTH },
        Rule { check: required, message: messages::LAST_NAME_REQUIRED },
    ],
};

static EMAIL: TextRules = TextRules {
    trim: false,
    rules: &[
        Rule { check: email_syntax, message: messages::EMAIL_FORMAT },
        Rule { check: required, message: messages::EMAIL_REQUIRED },
    ],
};

static PASSWORD: TextRules = TextRules {
    trim: true,
    rules: &[
        Rule { check: password_within_max, message: messages::PASSWORD_MAX_LENGTH },
        Rule { check: matches_password_pattern, message: messages::PASSWORD_PATTERN },
        Rule { check: required, message: messages::PASSWORD_REQUIRED },
    ],
};

impl TextRules {
    fn for_field(field: FieldName) -> Option<&'static TextRules> {
        match field {
            FieldName::FirstName => Some(&FIRST_NAME),
            FieldName::LastName => Some(&LAST_NAME),
            FieldName::Email => Some(&EMAIL),
            FieldName::Password => Some(&PASSWORD),
            FieldName::AcceptedTerms => None,
        }
    }

    /// Message of the first failing rule
    fn first_failure(&self, raw: &str) -> Option<&'static str> {
        let value = if self.trim { raw.trim() } else { raw };
        self.rules
            .iter()
            .find(|rule| !(rule.check)(value))
            .map(|rule| rule.message)
    }
}

/// Validates one field against its rule chain.
///
/// Returns the message of the first violated rule. A value of the wrong kind
/// for the field counts as no input: a checked state given to a text field
/// validates as empty text, text given to the checkbox as unchecked.
pub fn validate_field(field: FieldName, value: &FieldValue) -> Result<(), ValidationError> {
    let failure = match TextRules::for_field(field) {
        Some(chain) => chain.first_failure(value.as_text()),
        None => (!value.is_checked()).then_some(messages::TERMS_REQUIRED),
    };

    match failure {
        Some(message) => Err(ValidationError::new(field, message)),
        None => Ok(()),
    }
}

/// Whole-form check: true iff every field passes
pub fn validate_form(fields: &FormFields) -> bool {
    FieldName::ALL
        .into_iter()
        .all(|field| validate_field(field, &fields.get(field)).is_ok())
}

/// Every field's current message at once
pub fn validate_all(fields: &FormFields) -> FieldErrors {
    FieldName::ALL
        .into_iter()
        .fold(FieldErrors::default(), |errors, field| {
            errors.with_result(field, validate_field(field, &fields.get(field)))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn valid_fields() -> FormFields {
        FormFields {
            first_name: "Jo".to_string(),
            last_name: "Do".to_string(),
            email: "a@b.com".to_string(),
            password: "Abcdef1!".to_string(),
            accepted_terms: true,
        }
    }

    fn message(field: FieldName, value: &str) -> Option<String> {
        validate_field(field, &FieldValue::text(value)).err().map(|e| e.message)
    }

    #[rstest]
    #[case("")]
    #[case("J")]
    #[case("  J  ")]
    #[case("     ")]
    fn test_short_first_name_reports_length(#[case] value: &str) {
        assert_eq!(message(FieldName::FirstName, value).as_deref(), Some(messages::FIRST_NAME_LENGTH));
    }

    #[rstest]
    #[case("")]
    #[case(" D ")]
    fn test_short_last_name_reports_length(#[case] value: &str) {
        assert_eq!(message(FieldName::LastName, value).as_deref(), Some(messages::LAST_NAME_LENGTH));
    }

    #[test]
    fn test_names_are_trimmed_before_length_check() {
        assert_eq!(message(FieldName::FirstName, "  Jo  "), None);
        assert_eq!(message(FieldName::LastName, "Do"), None);
    }

    #[rstest]
    #[case("", Some(messages::EMAIL_REQUIRED))]
    #[case("not-an-email", Some(messages::EMAIL_FORMAT))]
    #[case("a@b", Some(messages::EMAIL_FORMAT))]
    #[case("   ", Some(messages::EMAIL_FORMAT))]
    #[case("a@b.com", None)]
    fn test_email_rules(#[case] value: &str, #[case] expected: Option<&str>) {
        assert_eq!(message(FieldName::Email, value).as_deref(), expected);
    }

    #[rstest]
    #[case("", Some(messages::PASSWORD_PATTERN))]
    #[case("short1!", Some(messages::PASSWORD_PATTERN))]
    #[case("abcdefgh1", Some(messages::PASSWORD_PATTERN))]
    #[case("Abcdefghijklmnopqrstuvwx1!", Some(messages::PASSWORD_MAX_LENGTH))]
    #[case("Abcdef1!", None)]
    #[case("  Abcdef1!  ", None)]
    fn test_password_rules(#[case] value: &str, #[case] expected: Option<&str>) {
        assert_eq!(message(FieldName::Password, value).as_deref(), expected);
    }

    #[test]
    fn test_terms_must_be_accepted() {
        let unchecked = validate_field(FieldName::AcceptedTerms, &FieldValue::Checked(false));
        assert_eq!(unchecked.unwrap_err().message, messages::TERMS_REQUIRED);
        assert!(validate_field(FieldName::AcceptedTerms, &FieldValue::Checked(true)).is_ok());
    }

    #[rstest]
    #[case(FieldName::FirstName, FieldValue::Checked(true), messages::FIRST_NAME_LENGTH)]
    #[case(FieldName::Email, FieldValue::Checked(true), messages::EMAIL_REQUIRED)]
    #[case(FieldName::Password, FieldValue::Checked(true), messages::PASSWORD_PATTERN)]
    #[case(FieldName::AcceptedTerms, FieldValue::text("on"), messages::TERMS_REQUIRED)]
    #[case(FieldName::AcceptedTerms, FieldValue::text("true"), messages::TERMS_REQUIRED)]
    fn test_value_of_wrong_kind_never_passes(
        #[case] field: FieldName,
        #[case] value: FieldValue,
        #[case] expected: &str,
    ) {
        let err = validate_field(field, &value).unwrap_err();
        assert_eq!(err.message, expected);
    }

    #[test]
    fn test_valid_form() {
        let fields = valid_fields();
        assert!(validate_form(&fields));
        assert_eq!(validate_all(&fields), FieldErrors::default());
    }

    #[test]
    fn test_default_form_is_invalid() {
        let fields = FormFields::default();
        assert!(!validate_form(&fields));

        let errors = validate_all(&fields);
        assert_eq!(errors.first_name, messages::FIRST_NAME_LENGTH);
        assert_eq!(errors.email, messages::EMAIL_REQUIRED);
        assert_eq!(errors.password, messages::PASSWORD_PATTERN);
        assert_eq!(errors.accepted_terms, messages::TERMS_REQUIRED);
    }

    #[test]
    fn test_unaccepted_terms_fail_an_otherwise_valid_form() {
        let fields = FormFields {
            accepted_terms: false,
            ..valid_fields()
        };
        assert!(!validate_form(&fields));
    }

    #[test]
    fn test_error_carries_field() {
        let err = validate_field(FieldName::Email, &FieldValue::text("")).unwrap_err();
        assert_eq!(err.field, FieldName::Email);
    }
}
