//! EmailAddress value object.

use super::errors::FormatError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// A type-safe wrapper for email addresses.
///
/// The check is deliberately loose: a local part, one `@`, and a domain
/// containing at least one dot, none of them containing whitespace.
///
/// # Example
///
/// ```
/// use contact_form_server::domain::EmailAddress;
///
/// let email = EmailAddress::new("user@example.com").unwrap();
/// assert_eq!(email.as_str(), "user@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new EmailAddress, validating the format.
    ///
    /// # Errors
    ///
    /// Returns `FormatError::InvalidEmail` if the email format is invalid.
    pub fn new(email: impl Into<String>) -> Result<Self, FormatError> {
        let email = email.into();

        if !Self::is_valid(&email) {
            return Err(FormatError::InvalidEmail(email));
        }

        Ok(Self(email))
    }

    /// Check whether a raw value has the `local@domain.tld` shape.
    pub fn is_valid(email: &str) -> bool {
        EMAIL_RE.is_match(email)
    }

    /// Get the email address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
