//! Field validation against the shared schema.
//!
//! The same function backs the client-side pre-check and the authoritative
//! server-side check. It never stops at the first problem: every invalid
//! field gets exactly one message, and a single entry fails the submission.

use crate::models::ContactSubmission;
use crate::schema::{self, FieldRule};
use serde::Serialize;
use std::collections::BTreeMap;

/// Field name to French error message. Empty means the submission is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }
}

/// Check one value against one rule.
///
/// Returns the message of the first failed constraint, in order: presence,
/// maximum length, format.
pub fn check_field(rule: &FieldRule, value: Option<&str>) -> Option<&'static str> {
    let value = value.unwrap_or_default();

    if value.trim().is_empty() {
        return rule.required.then_some(rule.required_message);
    }

    if let Some(max) = rule.max_length {
        if value.chars().count() > max {
            return Some(rule.length_message);
        }
    }

    match rule.format {
        Some(format) if !format.matches(value) => Some(rule.format_message),
        _ => None,
    }
}

/// Validate a submission with the rules of its contact type.
pub fn validate(submission: &ContactSubmission) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    for rule in schema::rules_for(submission.contact_type()) {
        if let Some(message) = check_field(rule, submission.field(rule.name)) {
            errors.insert(rule.name, message);
        }
    }

    if !errors.is_empty() {
        tracing::debug!(
            contact_type = %submission.contact_type(),
            invalid_fields = errors.len(),
            "Submission failed validation"
        );
    }

    errors
}
