//! Length section - checks password minimum length.

use secrecy::{ExposeSecret, SecretString};
use super::SectionResult;
use crate::verdict::StrengthVerdict;

/// Minimum length, in UTF-16 code units.
pub const MIN_LENGTH: usize = 8;

/// Checks if the password meets minimum length requirements.
///
/// Length is counted in UTF-16 code units, the unit browser form fields
/// report: a character outside the Basic Multilingual Plane counts twice.
///
/// # Returns
/// - `Some(StrengthVerdict::TooShort)` if password is too short
/// - `None` if password has sufficient length
pub fn length_section(password: &SecretString) -> SectionResult {
    if password.expose_secret().encode_utf16().count() < MIN_LENGTH {
        return Some(StrengthVerdict::TooShort);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_section_too_short() {
        let pwd = SecretString::new("Short1!".to_string().into());
        assert_eq!(length_section(&pwd), Some(StrengthVerdict::TooShort));
    }

    #[test]
    fn test_length_section_exactly_minimum() {
        let pwd = SecretString::new("12345678".to_string().into());
        assert_eq!(length_section(&pwd), None);
    }

    #[test]
    fn test_length_section_counts_utf16_units_not_bytes() {
        // 7 characters, 14 bytes
        let pwd = SecretString::new("ééééééé".to_string().into());
        assert_eq!(length_section(&pwd), Some(StrengthVerdict::TooShort));
    }

    #[test]
    fn test_length_section_astral_chars_count_twice() {
        // 4 characters, 8 UTF-16 units
        let pwd = SecretString::new("😀😀😀😀".to_string().into());
        assert_eq!(length_section(&pwd), None);

        let pwd = SecretString::new("😀😀😀a".to_string().into());
        assert_eq!(length_section(&pwd), Some(StrengthVerdict::TooShort));
    }

    #[test]
    fn test_length_section_empty() {
        let pwd = SecretString::new("".to_string().into());
        assert_eq!(length_section(&pwd), Some(StrengthVerdict::TooShort));
    }
}
