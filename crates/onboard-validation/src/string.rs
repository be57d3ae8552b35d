//! String length helpers

/// Length in characters, not bytes
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

pub fn has_min_length(s: &str, min: usize) -> bool {
    char_len(s) >= min
}

pub fn has_max_length(s: &str, max: usize) -> bool {
    char_len(s) <= max
}
