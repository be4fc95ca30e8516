//! PostalCode value object.

use super::errors::FormatError;
use std::fmt;

/// A French postal code: exactly five ASCII digits.
///
/// # Example
///
/// ```
/// use contact_form_server::domain::PostalCode;
///
/// let code = PostalCode::new("75001").unwrap();
/// assert_eq!(code.as_str(), "75001");
/// assert!(PostalCode::new("7500").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostalCode(String);

impl PostalCode {
    /// Number of digits in a postal code.
    pub const LEN: usize = 5;

    /// Create a new PostalCode, validating the format.
    ///
    /// # Errors
    ///
    /// Returns `FormatError::InvalidPostalCode` if the value is not five digits.
    pub fn new(code: impl Into<String>) -> Result<Self, FormatError> {
        let code = code.into();

        if !Self::is_valid(&code) {
            return Err(FormatError::InvalidPostalCode(code));
        }

        Ok(Self(code))
    }

    /// Check whether a raw value is exactly five ASCII digits.
    pub fn is_valid(code: &str) -> bool {
        code.len() == Self::LEN && code.bytes().all(|b| b.is_ascii_digit())
    }

    /// Get the postal code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
