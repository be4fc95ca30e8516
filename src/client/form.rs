//! Client-side contact form state.
//!
//! Mirrors what the browser page does: a person/company toggle choosing the
//! visible field group, raw field values, the postal code autocomplete and
//! the sanitize-then-validate pass that runs before anything is sent.

use super::communes::CommuneLookup;
use crate::domain::PostalCode;
use crate::models::{ContactSubmission, ContactType};
use crate::sanitize::sanitize_payload;
use crate::schema;
use crate::validation::{validate, ValidationErrors};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Values typed into the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    contact_type: ContactType,
    values: BTreeMap<String, String>,
}

impl ContactForm {
    /// An empty form showing the person fields.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contact_type(&self) -> ContactType {
        self.contact_type
    }

    /// Switch between the person and company field groups.
    ///
    /// Values typed in the hidden group are kept, as a browser keeps them in
    /// hidden inputs, but they are not submitted.
    pub fn set_contact_type(&mut self, contact_type: ContactType) {
        self.contact_type = contact_type;
    }

    /// Names of the fields shown for the selected contact type.
    pub fn visible_fields(&self) -> Vec<&'static str> {
        schema::rules_for(self.contact_type)
            .iter()
            .map(|rule| rule.name)
            .collect()
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.to_string(), value.into());
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Raw payload: `contactType` plus every visible field that has a value.
    pub fn payload(&self) -> Map<String, Value> {
        let mut payload = Map::new();
        payload.insert(
            "contactType".to_string(),
            Value::String(self.contact_type.as_str().to_string()),
        );

        for name in self.visible_fields() {
            if let Some(value) = self.values.get(name) {
                payload.insert(name.to_string(), Value::String(value.clone()));
            }
        }

        payload
    }

    /// Payload after sanitization, ready to validate and send.
    pub fn sanitized_payload(&self) -> Map<String, Value> {
        sanitize_payload(&self.payload())
    }

    /// Client-side check with the shared schema. Advisory only: the server
    /// validates again.
    pub fn validate(&self) -> ValidationErrors {
        validate(&ContactSubmission::from_payload(&self.sanitized_payload()))
    }

    /// Fill the city from the postal code when the lookup is unambiguous.
    ///
    /// Runs only once the postal code field holds five characters. Returns
    /// whether the city field was filled; lookup errors are logged and
    /// otherwise ignored.
    pub fn autocomplete_city(&mut self, lookup: &dyn CommuneLookup) -> bool {
        let postal_field = schema::postal_code_field(self.contact_type);
        let raw = match self.values.get(postal_field) {
            Some(value) if value.trim().chars().count() == PostalCode::LEN => value.trim(),
            _ => return false,
        };

        let postal_code = match PostalCode::new(raw) {
            Ok(code) => code,
            Err(e) => {
                debug!("Skipping commune lookup: {}", e);
                return false;
            }
        };

        match lookup.unique_city(&postal_code) {
            Ok(Some(city)) => {
                let city_field = schema::city_field(self.contact_type);
                self.values.insert(city_field.to_string(), city);
                true
            }
            Ok(None) => false,
            Err(e) => {
                warn!(postal_code = %postal_code, "Commune lookup failed: {}", e);
                false
            }
        }
    }

    /// Clear every value and show the person fields again.
    pub fn reset(&mut self) {
        self.contact_type = ContactType::Person;
        self.values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::communes::Commune;
    use crate::error::{LookupError, LookupResult};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubLookup {
        names: Vec<&'static str>,
        fail: bool,
        calls: AtomicUsize,
    }

    impl StubLookup {
        fn returning(names: Vec<&'static str>) -> Self {
            Self {
                names,
                fail: false,
                calls: Default::default(),
            }
        }

        fn failing() -> Self {
            Self {
                names: vec![],
                fail: true,
                calls: Default::default(),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl CommuneLookup for StubLookup {
        fn communes_for(&self, _postal_code: &PostalCode) -> LookupResult<Vec<Commune>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(LookupError::Timeout);
            }
            Ok(self
                .names
                .iter()
                .map(|name| Commune {
                    name: name.to_string(),
                    code: None,
                })
                .collect())
        }
    }

    fn filled_person() -> ContactForm {
        let mut form = ContactForm::new();
        form.set_field("gender", "female");
        form.set_field("name", "Lefèvre");
        form.set_field("lastname", "Anne");
        form.set_field("email", "Anne.Lefevre@Example.com");
        form.set_field("phone", "06 01 02 03 04");
        form.set_field("address", "4 quai des Chartrons");
        form.set_field("postalCode", "33000");
        form.set_field("city", "Bordeaux");
        form
    }

    #[test]
    fn test_toggle_changes_visible_fields() {
        let mut form = ContactForm::new();
        assert!(form.visible_fields().contains(&"gender"));
        assert!(!form.visible_fields().contains(&"siret"));

        form.set_contact_type(ContactType::Company);
        assert!(form.visible_fields().contains(&"siret"));
        assert!(!form.visible_fields().contains(&"gender"));
    }

    #[test]
    fn test_payload_only_carries_visible_group() {
        let mut form = filled_person();
        form.set_field("siret", "12345678901234");

        let payload = form.payload();
        assert_eq!(payload["contactType"], "person");
        assert_eq!(payload["name"], "Lefèvre");
        assert!(!payload.contains_key("siret"));
    }

    #[test]
    fn test_validate_uses_sanitized_values() {
        let form = filled_person();
        assert!(form.validate().is_empty());
        assert_eq!(form.sanitized_payload()["email"], "anne.lefevre@example.com");
    }

    #[test]
    fn test_validate_reports_missing_fields() {
        let mut form = ContactForm::new();
        form.set_contact_type(ContactType::Company);
        form.set_field("siret", "123");

        let errors = form.validate();
        assert_eq!(errors.get("siret"), Some("SIRET invalide (14 chiffres)"));
        assert!(errors.contains("companyName"));
        assert!(!errors.contains("companyEmail"));
    }

    #[test]
    fn test_autocomplete_fills_unique_city() {
        let mut form = ContactForm::new();
        form.set_field("postalCode", "75001");
        let lookup = StubLookup::returning(vec!["Paris"]);

        assert!(form.autocomplete_city(&lookup));
        assert_eq!(form.field("city"), Some("Paris"));
    }

    #[test]
    fn test_autocomplete_uses_company_fields() {
        let mut form = ContactForm::new();
        form.set_contact_type(ContactType::Company);
        form.set_field("companyPostalCode", "69002");
        let lookup = StubLookup::returning(vec!["Lyon"]);

        assert!(form.autocomplete_city(&lookup));
        assert_eq!(form.field("companyCity"), Some("Lyon"));
        assert_eq!(form.field("city"), None);
    }

    #[test]
    fn test_autocomplete_waits_for_five_digits() {
        let mut form = ContactForm::new();
        let lookup = StubLookup::returning(vec!["Paris"]);

        form.set_field("postalCode", "7500");
        assert!(!form.autocomplete_city(&lookup));

        form.set_field("postalCode", "7500a");
        assert!(!form.autocomplete_city(&lookup));

        assert_eq!(lookup.calls(), 0);
    }

    #[test]
    fn test_autocomplete_ignores_ambiguous_and_failed_lookups() {
        let mut form = ContactForm::new();
        form.set_field("postalCode", "69310");

        let ambiguous = StubLookup::returning(vec!["Pierre-Bénite", "Oullins"]);
        assert!(!form.autocomplete_city(&ambiguous));

        let failing = StubLookup::failing();
        assert!(!form.autocomplete_city(&failing));
        assert_eq!(failing.calls(), 1);
        assert_eq!(form.field("city"), None);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut form = filled_person();
        form.set_contact_type(ContactType::Company);
        form.reset();

        assert_eq!(form, ContactForm::new());
        assert_eq!(form.contact_type(), ContactType::Person);
    }
}
