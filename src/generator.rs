//! Password generation
//!
//! A [`PasswordBuilder`] collects a [`PasswordPolicy`], `build()` freezes
//! it into a [`PasswordGenerator`] which produces candidates on demand.
//!
//! By default every character is drawn uniformly from the union of the
//! enabled classes, so a generated password is *not* guaranteed to contain
//! a character of every class (and therefore not guaranteed to classify as
//! [`StrengthVerdict::Strong`](crate::StrengthVerdict::Strong)). Use
//! [`PasswordBuilder::require_each_class`] or
//! [`PasswordGenerator::generate_strong`] when that matters.

use rand::Rng;
use rand::seq::SliceRandom;
use secrecy::SecretString;
use thiserror::Error;

use crate::classifier::classify;

pub const LOWERCASE_CHARS: &str = "abcdefghijklmnopqrstuvwxyz";
pub const UPPERCASE_CHARS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGIT_CHARS: &str = "0123456789";
/// Special characters, shared with the strength classifier.
pub const SPECIAL_CHARS: &str = "!@#$%^&*()";

/// Length used when nothing else is configured.
pub const DEFAULT_LENGTH: usize = 12;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("Invalid password configuration: {0}")]
    InvalidConfiguration(String),
    #[error("No strong password produced after {0} attempts")]
    NoStrongCandidate(usize),
}

/// A class of characters a password can draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    Lowercase,
    Uppercase,
    Digit,
    Special,
}

impl CharClass {
    pub const ALL: [CharClass; 4] = [
        CharClass::Lowercase,
        CharClass::Uppercase,
        CharClass::Digit,
        CharClass::Special,
    ];

    /// The alphabet of this class. All alphabets are ASCII.
    pub fn chars(&self) -> &'static str {
        match self {
            CharClass::Lowercase => LOWERCASE_CHARS,
            CharClass::Uppercase => UPPERCASE_CHARS,
            CharClass::Digit => DIGIT_CHARS,
            CharClass::Special => SPECIAL_CHARS,
        }
    }
}

/// Configuration driving password generation.
///
/// Lowercase letters are the baseline pool; the builder never turns them
/// off, but a hand-written policy may, and is then validated like any other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub length: usize,
    pub include_lowercase: bool,
    pub include_uppercase: bool,
    pub include_numbers: bool,
    pub include_special_chars: bool,
    /// Force at least one character of every enabled class.
    pub require_each_class: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            include_lowercase: true,
            include_uppercase: true,
            include_numbers: true,
            include_special_chars: true,
            require_each_class: false,
        }
    }
}

impl PasswordPolicy {
    /// Enabled classes, in [`CharClass::ALL`] order.
    pub fn enabled_classes(&self) -> Vec<CharClass> {
        CharClass::ALL
            .into_iter()
            .filter(|class| match class {
                CharClass::Lowercase => self.include_lowercase,
                CharClass::Uppercase => self.include_uppercase,
                CharClass::Digit => self.include_numbers,
                CharClass::Special => self.include_special_chars,
            })
            .collect()
    }
}

/// Fluent configurator for a [`PasswordGenerator`].
///
/// ```rust
/// use mypass_core::PasswordBuilder;
/// use secrecy::ExposeSecret;
///
/// let password = PasswordBuilder::new()
///     .length(12)?
///     .uppercase(true)
///     .numbers(true)
///     .special_chars(true)
///     .generate()?;
/// assert_eq!(password.expose_secret().chars().count(), 12);
/// # Ok::<(), mypass_core::GeneratorError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PasswordBuilder {
    policy: PasswordPolicy,
}

impl PasswordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_policy(policy: PasswordPolicy) -> Self {
        Self { policy }
    }

    /// Sets the password length. Zero is rejected immediately.
    pub fn length(mut self, length: usize) -> Result<Self, GeneratorError> {
        if length == 0 {
            return Err(GeneratorError::InvalidConfiguration(
                "length must be positive".to_string(),
            ));
        }
        self.policy.length = length;
        Ok(self)
    }

    pub fn uppercase(mut self, enabled: bool) -> Self {
        self.policy.include_uppercase = enabled;
        self
    }

    pub fn numbers(mut self, enabled: bool) -> Self {
        self.policy.include_numbers = enabled;
        self
    }

    pub fn special_chars(mut self, enabled: bool) -> Self {
        self.policy.include_special_chars = enabled;
        self
    }

    pub fn require_each_class(mut self, enabled: bool) -> Self {
        self.policy.require_each_class = enabled;
        self
    }

    pub fn policy(&self) -> &PasswordPolicy {
        &self.policy
    }

    /// Validates the policy and freezes it into a generator.
    pub fn build(self) -> Result<PasswordGenerator, GeneratorError> {
        PasswordGenerator::new(self.policy)
    }

    /// Shorthand for `build()?.generate()`.
    pub fn generate(&self) -> Result<SecretString, GeneratorError> {
        Ok(self.clone().build()?.generate())
    }
}

/// A validated, immutable policy ready to produce passwords.
#[derive(Debug, Clone)]
pub struct PasswordGenerator {
    policy: PasswordPolicy,
    classes: Vec<CharClass>,
    pool: Vec<char>,
}

impl PasswordGenerator {
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if:
    /// - `length` is zero
    /// - no character class is enabled
    /// - `require_each_class` is set and `length` cannot hold one
    ///   character of every enabled class
    pub fn new(policy: PasswordPolicy) -> Result<Self, GeneratorError> {
        if policy.length == 0 {
            return Err(GeneratorError::InvalidConfiguration(
                "length must be positive".to_string(),
            ));
        }

        let classes = policy.enabled_classes();
        let pool: Vec<char> = classes.iter().flat_map(|c| c.chars().chars()).collect();
        if pool.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::warn!("Password policy rejected: empty character pool");
            return Err(GeneratorError::InvalidConfiguration(
                "character pool is empty".to_string(),
            ));
        }

        if policy.require_each_class && policy.length < classes.len() {
            return Err(GeneratorError::InvalidConfiguration(format!(
                "length {} cannot hold one character of each of {} classes",
                policy.length,
                classes.len()
            )));
        }

        Ok(Self {
            policy,
            classes,
            pool,
        })
    }

    pub fn policy(&self) -> &PasswordPolicy {
        &self.policy
    }

    /// Every character a generated password may contain.
    pub fn pool(&self) -> &[char] {
        &self.pool
    }

    /// Generates a password using the thread-local random source.
    pub fn generate(&self) -> SecretString {
        self.generate_with(&mut rand::thread_rng())
    }

    /// Generates a password using `rng`.
    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> SecretString {
        let mut chars: Vec<char> = Vec::with_capacity(self.policy.length);

        if self.policy.require_each_class {
            for class in &self.classes {
                let alphabet = class.chars().as_bytes();
                chars.push(alphabet[rng.gen_range(0..alphabet.len())] as char);
            }
        }

        while chars.len() < self.policy.length {
            chars.push(self.pool[rng.gen_range(0..self.pool.len())]);
        }

        if self.policy.require_each_class {
            chars.shuffle(rng);
        }

        SecretString::new(chars.into_iter().collect::<String>().into())
    }

    /// Regenerates until the classifier reports a strong password.
    pub fn generate_strong(&self, max_attempts: usize) -> Result<SecretString, GeneratorError> {
        self.generate_strong_with(&mut rand::thread_rng(), max_attempts)
    }

    /// Like [`generate_strong`](Self::generate_strong), drawing from `rng`.
    ///
    /// # Errors
    ///
    /// Returns `NoStrongCandidate` if none of the `max_attempts` candidates
    /// is strong. A policy that can never satisfy the classifier (too short,
    /// or a required class disabled) always ends here.
    pub fn generate_strong_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        max_attempts: usize,
    ) -> Result<SecretString, GeneratorError> {
        for _attempt in 1..=max_attempts {
            let candidate = self.generate_with(rng);
            let verdict = classify(&candidate);
            if verdict.is_strong() {
                return Ok(candidate);
            }
            #[cfg(feature = "tracing")]
            tracing::debug!("Discarding candidate {}: {:?}", _attempt, verdict);
        }
        Err(GeneratorError::NoStrongCandidate(max_attempts))
    }
}
