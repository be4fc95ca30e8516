//! Domain value objects and types.
//!
//! This module contains type-safe wrappers for the formatted contact fields:
//! email addresses, French phone numbers, postal codes, SIRET numbers and
//! gender. Each value object owns the format predicate the field schema
//! refers to, so a value that passed validation can always be rebuilt as its
//! typed counterpart.

pub mod email;
pub mod errors;
pub mod gender;
pub mod phone;
pub mod postal_code;
pub mod siret;

pub use email::EmailAddress;
pub use errors::FormatError;
pub use gender::Gender;
pub use phone::PhoneNumber;
pub use postal_code::PostalCode;
pub use siret::Siret;
