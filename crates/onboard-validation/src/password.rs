//! Password validation

use once_cell::sync::Lazy;
use regex::Regex;

/// Longest accepted password, after trimming
pub const PASSWORD_MAX_LENGTH: usize = 25;

/// Shortest password the pattern accepts
const PASSWORD_MIN_LENGTH: usize = 8;

// The only characters a password may contain
static ALLOWED_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9@$!%*#?&]*$").unwrap());

static HAS_LETTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z]").unwrap());

static HAS_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]").unwrap());

static HAS_SYMBOL: Lazy<Regex> = Lazy::new(|| Regex::new(r"[@$!%*#?&]").unwrap());

/// Pattern check on an already trimmed password: 8 or more characters from
/// `[A-Za-z0-9@$!%*#?&]` with at least one letter, one digit and one symbol.
///
/// The length cap is a separate rule and is not checked here.
pub fn matches_password_pattern(password: &str) -> bool {
    password.chars().count() >= PASSWORD_MIN_LENGTH
        && ALLOWED_CHARS.is_match(password)
        && HAS_LETTER.is_match(password)
        && HAS_DIGIT.is_match(password)
        && HAS_SYMBOL.is_match(password)
}
