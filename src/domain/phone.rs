//! PhoneNumber value object.

use super::errors::FormatError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static FRENCH_PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?:\+|00)33|0)[1-9](?:[\s.-]*\d{2}){4}$").expect("valid phone regex")
});

/// A French phone number, national (`06 01 02 03 04`) or international
/// (`+336 01 02 03 04`, `0033601020304`).
///
/// # Example
///
/// ```
/// use contact_form_server::domain::PhoneNumber;
///
/// let phone = PhoneNumber::new("06.01.02.03.04").unwrap();
/// assert_eq!(phone.as_str(), "06.01.02.03.04");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Create a new PhoneNumber, validating the format.
    ///
    /// # Validation Rules
    ///
    /// - Prefix `0`, `+33` or `0033`
    /// - A non-zero first digit
    /// - Four more digit pairs, optionally separated by spaces, dots or hyphens
    ///
    /// # Errors
    ///
    /// Returns `FormatError::InvalidPhone` if the phone format is invalid.
    pub fn new(phone: impl Into<String>) -> Result<Self, FormatError> {
        let phone = phone.into();

        if !Self::is_valid(&phone) {
            return Err(FormatError::InvalidPhone(phone));
        }

        Ok(Self(phone))
    }

    /// Check whether a raw value is a French phone number.
    pub fn is_valid(phone: &str) -> bool {
        FRENCH_PHONE_RE.is_match(phone)
    }

    /// Get the phone number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_validates_format() {
        assert!(PhoneNumber::new("").is_err());
        assert!(PhoneNumber::new("0601020304").is_ok());
        assert!(PhoneNumber::new("06 01 02 03 04").is_ok());
        assert!(PhoneNumber::new("06.01.02.03.04").is_ok());
        assert!(PhoneNumber::new("06-01-02-03-04").is_ok());
        assert!(PhoneNumber::new("+33601020304").is_ok());
        assert!(PhoneNumber::new("+336 01 02 03 04").is_ok());
        assert!(PhoneNumber::new("0033601020304").is_ok());
    }

    #[test]
    fn test_phone_rejects_non_french_numbers() {
        assert!(PhoneNumber::new("0001020304").is_err());
        assert!(PhoneNumber::new("060102030").is_err());
        assert!(PhoneNumber::new("+1-555-123-4567").is_err());
        assert!(PhoneNumber::new("06010203045").is_err());
        assert!(PhoneNumber::new("06 01 02 03 0a").is_err());
        // The country code must be followed directly by the first digit.
        assert!(PhoneNumber::new("+33 6 01 02 03 04").is_err());
    }
}
