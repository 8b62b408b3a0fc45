use crate::constants::MAX_ITEM_TEXT_CHARS;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref CONTROL_CHARACTERS: Regex =
        Regex::new(r"[\x00-\x1F\x7F\\]").expect("Cannot create regex");
}

/// Clean a user-supplied string before it goes anywhere near the database:
/// surrounding whitespace is trimmed, backslashes and ASCII control characters
/// are removed, and the result is capped at [`MAX_ITEM_TEXT_CHARS`] chars.
pub fn sanitize_user_input(input: &str) -> String {
    let cleaned = CONTROL_CHARACTERS.replace_all(input.trim(), "");
    cleaned.trim().chars().take(MAX_ITEM_TEXT_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_strips() {
        assert_eq!(sanitize_user_input("  Buy milk \n"), "Buy milk");
        assert_eq!(sanitize_user_input("a\\'b\u{7}c"), "a'bc");
        assert_eq!(sanitize_user_input("tab\tinside"), "tabinside");
    }

    #[test]
    fn test_keeps_unicode() {
        assert_eq!(sanitize_user_input("Café ☕"), "Café ☕");
    }

    #[test]
    fn test_caps_length() {
        let long = "é".repeat(MAX_ITEM_TEXT_CHARS + 10);
        assert_eq!(
            sanitize_user_input(&long).chars().count(),
            MAX_ITEM_TEXT_CHARS
        );
    }
}
