//! Password strength classifier - waterfall of rule sections.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::sections::{
    SectionResult, digit_section, length_section, special_section, uppercase_section,
};
use crate::verdict::StrengthVerdict;

/// Classifies a candidate password.
///
/// Sections run in a fixed order and the first failing one decides the
/// verdict; later sections are not evaluated. Total: every string,
/// including the empty one, gets a verdict.
pub fn classify(password: &SecretString) -> StrengthVerdict {
    // Orchestrator: execute sections in sequence
    let sections: [(&str, fn(&SecretString) -> SectionResult); 4] = [
        ("length", length_section),
        ("uppercase", uppercase_section),
        ("digit", digit_section),
        ("special", special_section),
    ];

    for (_section_name, section_fn) in sections {
        if let Some(verdict) = section_fn(password) {
            #[cfg(feature = "tracing")]
            tracing::trace!("Password classification stopped at section: {}", _section_name);
            return verdict;
        }
    }

    StrengthVerdict::Strong
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Passwords do not match!")]
    PasswordMismatch,
    #[error("Please use a strong password before registering.")]
    WeakPassword(StrengthVerdict),
}

/// Checks a new password and its confirmation before registration.
///
/// The confirmation is compared first; only a matching, strong password
/// passes.
pub fn check_new_password(
    password: &SecretString,
    confirmation: &SecretString,
) -> Result<(), RegistrationError> {
    if password.expose_secret() != confirmation.expose_secret() {
        return Err(RegistrationError::PasswordMismatch);
    }

    match classify(password) {
        StrengthVerdict::Strong => Ok(()),
        verdict => Err(RegistrationError::WeakPassword(verdict)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    #[test]
    fn test_classify_waterfall_examples() {
        assert_eq!(classify(&secret("short")), StrengthVerdict::TooShort);
        assert_eq!(classify(&secret("longenough")), StrengthVerdict::MissingUppercase);
        assert_eq!(classify(&secret("Longenough")), StrengthVerdict::MissingNumber);
        assert_eq!(classify(&secret("Longenough1")), StrengthVerdict::MissingSpecialChar);
        assert_eq!(classify(&secret("Longenough1!")), StrengthVerdict::Strong);
    }

    #[test]
    fn test_classify_empty_password() {
        assert_eq!(classify(&secret("")), StrengthVerdict::TooShort);
    }

    #[test]
    fn test_length_checked_before_everything() {
        assert_eq!(classify(&secret("Ab1!")), StrengthVerdict::TooShort);
    }

    #[test]
    fn test_first_failure_wins() {
        // Missing uppercase, digit and special: only the first is reported
        assert_eq!(classify(&secret("abcdefghij")), StrengthVerdict::MissingUppercase);
        // Missing digit and special
        assert_eq!(classify(&secret("Abcdefghij")), StrengthVerdict::MissingNumber);
    }

    #[test]
    fn test_special_outside_reference_set() {
        assert_eq!(
            classify(&secret("Longenough1?")),
            StrengthVerdict::MissingSpecialChar
        );
    }

    #[test]
    fn test_classify_every_keystroke() {
        let typed = "Longenough1!";
        let verdicts: Vec<StrengthVerdict> = (1..=typed.len())
            .map(|end| classify(&secret(&typed[..end])))
            .collect();

        assert!(verdicts[..7].iter().all(|v| *v == StrengthVerdict::TooShort));
        assert_eq!(verdicts[9], StrengthVerdict::MissingNumber);
        assert_eq!(verdicts[10], StrengthVerdict::MissingSpecialChar);
        assert_eq!(verdicts[11], StrengthVerdict::Strong);
    }

    #[test]
    fn test_check_new_password_mismatch_first() {
        let result = check_new_password(&secret("weak"), &secret("other"));
        assert_eq!(result, Err(RegistrationError::PasswordMismatch));
    }

    #[test]
    fn test_check_new_password_weak() {
        let result = check_new_password(&secret("Longenough1"), &secret("Longenough1"));
        assert_eq!(
            result,
            Err(RegistrationError::WeakPassword(StrengthVerdict::MissingSpecialChar))
        );
        assert_eq!(
            result.unwrap_err().to_string(),
            "Please use a strong password before registering."
        );
    }

    #[test]
    fn test_check_new_password_ok() {
        let result = check_new_password(&secret("Longenough1!"), &secret("Longenough1!"));
        assert_eq!(result, Ok(()));
    }
}
