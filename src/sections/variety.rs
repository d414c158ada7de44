//! Character variety sections - uppercase, digit and special character checks.
//!
//! Only ASCII uppercase letters and ASCII digits count, and only the
//! characters of [`SPECIAL_CHARS`] count as special.

use secrecy::{ExposeSecret, SecretString};
use super::SectionResult;
use crate::generator::SPECIAL_CHARS;
use crate::verdict::StrengthVerdict;

/// Checks for at least one ASCII uppercase letter.
///
/// # Returns
/// - `Some(StrengthVerdict::MissingUppercase)` if there is none
/// - `None` otherwise
pub fn uppercase_section(password: &SecretString) -> SectionResult {
    if !password.expose_secret().chars().any(|c| c.is_ascii_uppercase()) {
        return Some(StrengthVerdict::MissingUppercase);
    }
    None
}

/// Checks for at least one ASCII digit.
///
/// # Returns
/// - `Some(StrengthVerdict::MissingNumber)` if there is none
/// - `None` otherwise
pub fn digit_section(password: &SecretString) -> SectionResult {
    if !password.expose_secret().chars().any(|c| c.is_ascii_digit()) {
        return Some(StrengthVerdict::MissingNumber);
    }
    None
}

/// Checks for at least one character from the shared special set.
///
/// Punctuation outside the set (`-`, `_`, `?`...) does not count.
///
/// # Returns
/// - `Some(StrengthVerdict::MissingSpecialChar)` if there is none
/// - `None` otherwise
pub fn special_section(password: &SecretString) -> SectionResult {
    if !password
        .expose_secret()
        .chars()
        .any(|c| SPECIAL_CHARS.contains(c))
    {
        return Some(StrengthVerdict::MissingSpecialChar);
    }
    None
}
