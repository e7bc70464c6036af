//! Input checks for the flow steps.
//!
//! Both checks are deliberately narrow: names with spaces or hyphens are
//! rejected, and points must be written with plain ASCII digits.

/// Largest accepted score.
pub const MAX_POINTS: u8 = 100;

/// Non-empty and made of letters only (any script).
pub fn is_alphabetic(text: &str) -> bool {
    !text.is_empty() && text.chars().all(char::is_alphabetic)
}

/// Parses a score: a pure digit string with a value in `0..=100`.
///
/// Signs, spaces, decimals and out-of-range values all yield `None`.
/// Leading zeros are accepted, so `"087"` is 87.
pub fn parse_points(text: &str) -> Option<u8> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let significant = text.trim_start_matches('0');
    if significant.len() > 3 {
        return None;
    }
    if significant.is_empty() {
        return Some(0);
    }

    significant
        .parse::<u16>()
        .ok()
        .filter(|value| *value <= u16::from(MAX_POINTS))
        .and_then(|value| u8::try_from(value).ok())
}
