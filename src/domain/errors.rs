//! Domain format errors.

use std::fmt;

/// Errors that can occur during domain value object construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The provided email address is invalid.
    InvalidEmail(String),

    /// The provided phone number is not a French number.
    InvalidPhone(String),

    /// The provided postal code is not five digits.
    InvalidPostalCode(String),

    /// The provided SIRET is not fourteen digits.
    InvalidSiret(String),

    /// The provided gender is not one of the accepted values.
    InvalidGender(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail(email) => write!(f, "Invalid email address: {}", email),
            Self::InvalidPhone(phone) => write!(f, "Invalid French phone number: {}", phone),
            Self::InvalidPostalCode(code) => write!(f, "Invalid postal code: {}", code),
            Self::InvalidSiret(siret) => write!(f, "Invalid SIRET: {}", siret),
            Self::InvalidGender(gender) => write!(f, "Invalid gender: {}", gender),
        }
    }
}

impl std::error::Error for FormatError {}
