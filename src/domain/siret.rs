//! Siret value object.

use super::errors::FormatError;
use std::fmt;

/// A French business registration number: exactly fourteen ASCII digits.
///
/// Only the shape is checked; the Luhn checksum is not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Siret(String);

impl Siret {
    /// Number of digits in a SIRET.
    pub const LEN: usize = 14;

    /// Create a new Siret, validating the format.
    ///
    /// # Errors
    ///
    /// Returns `FormatError::InvalidSiret` if the value is not fourteen digits.
    pub fn new(siret: impl Into<String>) -> Result<Self, FormatError> {
        let siret = siret.into();

        if !Self::is_valid(&siret) {
            return Err(FormatError::InvalidSiret(siret));
        }

        Ok(Self(siret))
    }

    /// Check whether a raw value is exactly fourteen ASCII digits.
    pub fn is_valid(siret: &str) -> bool {
        siret.len() == Self::LEN && siret.bytes().all(|b| b.is_ascii_digit())
    }

    /// Get the SIRET as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Siret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
