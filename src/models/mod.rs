//! Data models for contact form submissions.
//!
//! This module contains the two contact shapes (person and company) and the
//! tagged union that carries one of them through validation and storage.

pub mod contact;

pub use contact::{
    CompanyContact, ContactSubmission, ContactType, PersonContact, COMPANY_CSV_HEADER,
    PERSON_CSV_HEADER,
};
