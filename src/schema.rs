//! Shared field schema for both contact shapes.
//!
//! One static table per contact type lists every form field with its
//! constraints and French error messages. The sanitizer, the client-side
//! check in [`crate::client`] and the authoritative server-side check in
//! [`crate::validation`] all read from here, and the table is served to
//! browsers at `GET /contact/schema`.

use crate::domain::{EmailAddress, Gender, PhoneNumber, PostalCode, Siret};
use crate::models::ContactType;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Format constraint attached to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFormat {
    Email,
    FrenchPhone,
    PostalCode,
    Siret,
    Gender,
}

impl FieldFormat {
    /// Check a non-blank value against the format.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            FieldFormat::Email => EmailAddress::is_valid(value),
            FieldFormat::FrenchPhone => PhoneNumber::is_valid(value),
            FieldFormat::PostalCode => PostalCode::is_valid(value),
            FieldFormat::Siret => Siret::is_valid(value),
            FieldFormat::Gender => value.parse::<Gender>().is_ok(),
        }
    }

    /// Name used in the JSON schema document.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldFormat::Email => "email",
            FieldFormat::FrenchPhone => "phone",
            FieldFormat::PostalCode => "postalCode",
            FieldFormat::Siret => "siret",
            FieldFormat::Gender => "choice",
        }
    }

    /// ECMAScript-compatible pattern equivalent to [`FieldFormat::matches`].
    pub fn pattern(&self) -> &'static str {
        match self {
            FieldFormat::Email => r"^[^\s@]+@[^\s@]+\.[^\s@]+$",
            FieldFormat::FrenchPhone => r"^(?:(?:\+|00)33|0)[1-9](?:[\s.-]*\d{2}){4}$",
            FieldFormat::PostalCode => r"^\d{5}$",
            FieldFormat::Siret => r"^\d{14}$",
            FieldFormat::Gender => "^(?:male|female)$",
        }
    }
}

impl Serialize for FieldFormat {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("FieldFormat", 2)?;
        state.serialize_field("kind", self.kind())?;
        state.serialize_field("pattern", self.pattern())?;
        state.end()
    }
}

/// Constraints and messages for one form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRule {
    pub name: &'static str,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<FieldFormat>,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub required_message: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub length_message: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub format_message: &'static str,
}

impl FieldRule {
    const fn required(name: &'static str, message: &'static str) -> Self {
        Self {
            name,
            required: true,
            max_length: None,
            format: None,
            required_message: message,
            length_message: "",
            format_message: "",
        }
    }

    const fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
            max_length: None,
            format: None,
            required_message: "",
            length_message: "",
            format_message: "",
        }
    }

    const fn max(self, max_length: usize, message: &'static str) -> Self {
        Self {
            max_length: Some(max_length),
            length_message: message,
            ..self
        }
    }

    const fn format(self, format: FieldFormat, message: &'static str) -> Self {
        Self {
            format: Some(format),
            format_message: message,
            ..self
        }
    }
}

const EMAIL_MESSAGE: &str = "Format email invalide";
const PHONE_MESSAGE: &str = "Format téléphone français invalide";
const POSTAL_CODE_MESSAGE: &str = "Le code postal doit contenir 5 chiffres";

/// Person form fields, in form and CSV order.
pub const PERSON_FIELDS: &[FieldRule] = &[
    FieldRule::required("gender", "Le genre est obligatoire")
        .format(FieldFormat::Gender, "Genre invalide"),
    FieldRule::required("name", "Le nom est obligatoire")
        .max(50, "Le nom ne peut pas dépasser 50 caractères"),
    FieldRule::required("lastname", "Le prénom est obligatoire")
        .max(50, "Le prénom ne peut pas dépasser 50 caractères"),
    FieldRule::required("email", "L'email est obligatoire")
        .format(FieldFormat::Email, EMAIL_MESSAGE),
    FieldRule::required("phone", "Le téléphone est obligatoire")
        .format(FieldFormat::FrenchPhone, PHONE_MESSAGE),
    FieldRule::required("address", "L'adresse est obligatoire")
        .max(255, "L'adresse ne peut pas dépasser 255 caractères"),
    FieldRule::required("postalCode", "Le code postal est obligatoire")
        .format(FieldFormat::PostalCode, POSTAL_CODE_MESSAGE),
    FieldRule::required("city", "La ville est obligatoire")
        .max(100, "La ville ne peut pas dépasser 100 caractères"),
];

/// Company form fields, in form and CSV order.
pub const COMPANY_FIELDS: &[FieldRule] = &[
    FieldRule::required("siret", "Le SIRET est obligatoire")
        .format(FieldFormat::Siret, "SIRET invalide (14 chiffres)"),
    FieldRule::required("companyName", "La raison sociale est obligatoire")
        .max(100, "La raison sociale ne peut pas dépasser 100 caractères"),
    FieldRule::optional("companyEmail").format(FieldFormat::Email, EMAIL_MESSAGE),
    FieldRule::required("companyPhone", "Le téléphone est obligatoire")
        .format(FieldFormat::FrenchPhone, PHONE_MESSAGE),
    FieldRule::required("companyAddress", "L'adresse est obligatoire")
        .max(255, "L'adresse ne peut pas dépasser 255 caractères"),
    FieldRule::required("companyPostalCode", "Le code postal est obligatoire")
        .format(FieldFormat::PostalCode, POSTAL_CODE_MESSAGE),
    FieldRule::required("companyCity", "La ville est obligatoire")
        .max(100, "La ville ne peut pas dépasser 100 caractères"),
];

/// Field rules of one contact type.
pub fn rules_for(contact_type: ContactType) -> &'static [FieldRule] {
    match contact_type {
        ContactType::Person => PERSON_FIELDS,
        ContactType::Company => COMPANY_FIELDS,
    }
}

/// Look up a field by name in either contact type.
pub fn rule(name: &str) -> Option<&'static FieldRule> {
    PERSON_FIELDS
        .iter()
        .chain(COMPANY_FIELDS.iter())
        .find(|rule| rule.name == name)
}

/// Name of the postal code field of a contact type.
pub fn postal_code_field(contact_type: ContactType) -> &'static str {
    match contact_type {
        ContactType::Person => "postalCode",
        ContactType::Company => "companyPostalCode",
    }
}

/// Name of the city field of a contact type.
pub fn city_field(contact_type: ContactType) -> &'static str {
    match contact_type {
        ContactType::Person => "city",
        ContactType::Company => "companyCity",
    }
}

/// The whole schema as served to browsers.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaDocument {
    pub person: &'static [FieldRule],
    pub company: &'static [FieldRule],
}

impl SchemaDocument {
    pub fn new() -> Self {
        Self {
            person: PERSON_FIELDS,
            company: COMPANY_FIELDS,
        }
    }
}

impl Default for SchemaDocument {
    fn default() -> Self {
        Self::new()
    }
}
