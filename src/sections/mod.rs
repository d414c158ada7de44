//! Password classification sections
//!
//! Each section checks one rule of the strength waterfall.

mod length;
mod variety;

pub use length::{length_section, MIN_LENGTH};
pub use variety::{digit_section, special_section, uppercase_section};

use crate::verdict::StrengthVerdict;

/// Result type for section functions.
/// - `Some(verdict)` - Section failed, `verdict` is reported
/// - `None` - Section passed
pub type SectionResult = Option<StrengthVerdict>;
