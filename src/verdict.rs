//! Strength verdicts and their user-facing messages.

use std::fmt;

/// Outcome of classifying a candidate password.
///
/// Variants are ordered by the waterfall: a candidate is reported with the
/// first rule it fails, so `TooShort < MissingUppercase < ... < Strong`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StrengthVerdict {
    TooShort,
    MissingUppercase,
    MissingNumber,
    MissingSpecialChar,
    Strong,
}

impl StrengthVerdict {
    /// The fixed message shown to the user for this verdict.
    pub fn message(&self) -> &'static str {
        match self {
            StrengthVerdict::TooShort => "Password must be at least 8 characters long.",
            StrengthVerdict::MissingUppercase => {
                "Password must contain at least one uppercase letter."
            }
            StrengthVerdict::MissingNumber => "Password must contain at least one number.",
            StrengthVerdict::MissingSpecialChar => {
                "Password must contain at least one special character."
            }
            StrengthVerdict::Strong => "Strong password!",
        }
    }

    pub fn is_strong(&self) -> bool {
        matches!(self, StrengthVerdict::Strong)
    }
}

impl fmt::Display for StrengthVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_order_follows_waterfall() {
        assert!(StrengthVerdict::TooShort < StrengthVerdict::MissingUppercase);
        assert!(StrengthVerdict::MissingUppercase < StrengthVerdict::MissingNumber);
        assert!(StrengthVerdict::MissingNumber < StrengthVerdict::MissingSpecialChar);
        assert!(StrengthVerdict::MissingSpecialChar < StrengthVerdict::Strong);
    }

    #[test]
    fn test_display_uses_message() {
        assert_eq!(StrengthVerdict::Strong.to_string(), "Strong password!");
        assert_eq!(
            StrengthVerdict::TooShort.to_string(),
            "Password must be at least 8 characters long."
        );
    }

    #[test]
    fn test_only_strong_is_strong() {
        assert!(StrengthVerdict::Strong.is_strong());
        assert!(!StrengthVerdict::MissingSpecialChar.is_strong());
    }
}
