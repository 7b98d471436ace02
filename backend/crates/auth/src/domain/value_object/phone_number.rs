//! Phone Number Value Object
//!
//! E.164 format: `+`, a non-zero leading digit, 10 to 14 digits in total.
//! The phone number is the sign-in identifier.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum number of digits after `+`
pub const PHONE_MIN_DIGITS: usize = 10;

/// Maximum number of digits after `+` (E.164 allows 15 including the leading digit)
pub const PHONE_MAX_DIGITS: usize = 14;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhoneNumberError {
    #[error("phone number is required")]
    Empty,

    #[error("phone number must start with '+' followed by the country code")]
    MissingPlus,

    #[error("phone number must contain only digits after '+'")]
    InvalidCharacter,

    #[error("phone number must not start with 0 after '+'")]
    LeadingZero,

    #[error("phone number must have between {min} and {max} digits")]
    InvalidLength { min: usize, max: usize },
}

/// Validated E.164 phone number
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new(input: impl AsRef<str>) -> Result<Self, PhoneNumberError> {
        let input = input.as_ref().trim();
        if input.is_empty() {
            return Err(PhoneNumberError::Empty);
        }

        let digits = input
            .strip_prefix('+')
            .ok_or(PhoneNumberError::MissingPlus)?;

        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(PhoneNumberError::InvalidCharacter);
        }
        if digits.starts_with('0') {
            return Err(PhoneNumberError::LeadingZero);
        }
        if !(PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits.len()) {
            return Err(PhoneNumberError::InvalidLength {
                min: PHONE_MIN_DIGITS,
                max: PHONE_MAX_DIGITS,
            });
        }

        Ok(Self(input.to_string()))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_phone_numbers() {
        assert!(PhoneNumber::new("+15550001111").is_ok());
        assert!(PhoneNumber::new("+79991234567").is_ok());
        assert!(PhoneNumber::new("+1234567890").is_ok());
        assert!(PhoneNumber::new("+12345678901234").is_ok());
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        let phone = PhoneNumber::new("  +15550001111 ").unwrap();
        assert_eq!(phone.as_str(), "+15550001111");
    }

    #[test]
    fn test_invalid_phone_numbers() {
        assert_eq!(PhoneNumber::new(""), Err(PhoneNumberError::Empty));
        assert_eq!(
            PhoneNumber::new("15550001111"),
            Err(PhoneNumberError::MissingPlus)
        );
        assert_eq!(
            PhoneNumber::new("+1555-000-1111"),
            Err(PhoneNumberError::InvalidCharacter)
        );
        assert_eq!(
            PhoneNumber::new("+05550001111"),
            Err(PhoneNumberError::LeadingZero)
        );
        assert!(matches!(
            PhoneNumber::new("+123456789"),
            Err(PhoneNumberError::InvalidLength { .. })
        ));
        assert!(matches!(
            PhoneNumber::new("+123456789012345"),
            Err(PhoneNumberError::InvalidLength { .. })
        ));
    }
}
