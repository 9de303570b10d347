pub mod clock;
pub mod time_parser;
pub mod url_validator;

pub use time_parser::{format_duration_human, parse_validity_minutes};

/// Shortcode length bounds, inclusive.
pub const MIN_SHORT_CODE_LEN: usize = 4;
pub const MAX_SHORT_CODE_LEN: usize = 12;
/// Length of every generated shortcode.
pub const GENERATED_CODE_LEN: usize = 8;

const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

pub fn generate_random_code(length: usize) -> String {
    use std::iter;

    // 从 62 个字母数字中均匀抽取
    iter::repeat_with(|| CODE_ALPHABET[rand::random_range(0..CODE_ALPHABET.len())] as char)
        .take(length)
        .collect()
}

/// Joins the configured base URL and a shortcode.
pub fn short_url(base_url: &str, code: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), code)
}

/// ASCII letters and digits only, 4 to 12 characters.
pub fn is_valid_short_code(code: &str) -> bool {
    (MIN_SHORT_CODE_LEN..=MAX_SHORT_CODE_LEN).contains(&code.len())
        && code.chars().all(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_code_shape() {
        for _ in 0..200 {
            let code = generate_random_code(GENERATED_CODE_LEN);
            assert_eq!(code.len(), 8);
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_short_code_bounds() {
        assert!(!is_valid_short_code("ab"));
        assert!(!is_valid_short_code("abc"));
        assert!(is_valid_short_code("abcd"));
        assert!(is_valid_short_code("abcdefghijkl"));
        assert!(!is_valid_short_code("abcdefghijklm"));
    }

    #[test]
    fn test_short_url_trims_trailing_slash() {
        assert_eq!(short_url("https://s.example/", "abcd"), "https://s.example/abcd");
        assert_eq!(short_url("http://localhost:3000", "abcd"), "http://localhost:3000/abcd");
    }

    #[test]
    fn test_short_code_charset() {
        assert!(is_valid_short_code("xyz123AB"));
        assert!(!is_valid_short_code("my-code"));
        assert!(!is_valid_short_code("my_code"));
        assert!(!is_valid_short_code("café1"));
        assert!(!is_valid_short_code("with space"));
    }
}
