//! Onboard Validation
//!
//! The fixed rule set of the registration form. Pure functions only: no I/O,
//! no state. The controller in `onboard` and the render surface in
//! `onboard-server` both go through these.

pub mod email;
pub mod error;
pub mod field;
pub mod password;
pub mod rules;
pub mod string;

pub use email::is_valid_email;
pub use error::{FieldErrors, UnknownField, ValidationError};
pub use field::{FieldKind, FieldName, FieldValue, FormFields};
pub use password::{matches_password_pattern, PASSWORD_MAX_LENGTH};
pub use rules::{validate_all, validate_field, validate_form};
