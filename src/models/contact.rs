//! Contact submission models.
//!
//! A submission is decoded from the JSON body posted by the form. Decoding
//! never fails: missing keys become empty strings and the validation pass in
//! [`crate::validation`] reports what is wrong.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Discriminator selecting which field group a submission carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactType {
    #[default]
    Person,
    Company,
}

impl ContactType {
    /// Resolve the `contactType` value of a payload.
    ///
    /// Only the exact string `company` selects the company shape; anything
    /// else, including a missing key, falls back to a person.
    pub fn from_discriminator(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_str) {
            Some("company") => ContactType::Company,
            _ => ContactType::Person,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactType::Person => "person",
            ContactType::Company => "company",
        }
    }
}

impl fmt::Display for ContactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Header of `persons.csv`.
pub const PERSON_CSV_HEADER: [&str; 9] = [
    "timestamp",
    "gender",
    "name",
    "lastname",
    "email",
    "phone",
    "address",
    "postalCode",
    "city",
];

/// Header of `companies.csv`.
pub const COMPANY_CSV_HEADER: [&str; 8] = [
    "timestamp",
    "siret",
    "companyName",
    "email",
    "phone",
    "address",
    "postalCode",
    "city",
];

/// Render a payload entry as text.
///
/// Strings are taken as-is, numbers and booleans use their JSON text, and
/// anything else (missing, null, arrays, objects) becomes empty.
fn text(payload: &Map<String, Value>, key: &str) -> String {
    match payload.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// A private individual submitting the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonContact {
    gender: String,
    name: String,
    lastname: String,
    email: String,
    phone: String,
    address: String,
    postal_code: String,
    city: String,
}

impl PersonContact {
    pub fn from_payload(payload: &Map<String, Value>) -> Self {
        Self {
            gender: text(payload, "gender"),
            name: text(payload, "name"),
            lastname: text(payload, "lastname"),
            email: text(payload, "email"),
            phone: text(payload, "phone"),
            address: text(payload, "address"),
            postal_code: text(payload, "postalCode"),
            city: text(payload, "city"),
        }
    }

    pub fn gender(&self) -> &str {
        &self.gender
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lastname(&self) -> &str {
        &self.lastname
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    /// Value of a form field by its wire name.
    pub fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "gender" => &self.gender,
            "name" => &self.name,
            "lastname" => &self.lastname,
            "email" => &self.email,
            "phone" => &self.phone,
            "address" => &self.address,
            "postalCode" => &self.postal_code,
            "city" => &self.city,
            _ => return None,
        };
        Some(value.as_str())
    }
}

/// A company submitting the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyContact {
    siret: String,
    company_name: String,
    company_email: Option<String>,
    company_phone: String,
    company_address: String,
    company_postal_code: String,
    company_city: String,
}

impl CompanyContact {
    pub fn from_payload(payload: &Map<String, Value>) -> Self {
        let company_email = match payload.get("companyEmail") {
            None | Some(Value::Null) => None,
            Some(_) => Some(text(payload, "companyEmail")),
        };

        Self {
            siret: text(payload, "siret"),
            company_name: text(payload, "companyName"),
            company_email,
            company_phone: text(payload, "companyPhone"),
            company_address: text(payload, "companyAddress"),
            company_postal_code: text(payload, "companyPostalCode"),
            company_city: text(payload, "companyCity"),
        }
    }

    pub fn siret(&self) -> &str {
        &self.siret
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn company_email(&self) -> Option<&str> {
        self.company_email.as_deref()
    }

    pub fn company_phone(&self) -> &str {
        &self.company_phone
    }

    pub fn company_address(&self) -> &str {
        &self.company_address
    }

    pub fn company_postal_code(&self) -> &str {
        &self.company_postal_code
    }

    pub fn company_city(&self) -> &str {
        &self.company_city
    }

    /// Value of a form field by its wire name.
    pub fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "siret" => &self.siret,
            "companyName" => &self.company_name,
            "companyEmail" => return self.company_email.as_deref(),
            "companyPhone" => &self.company_phone,
            "companyAddress" => &self.company_address,
            "companyPostalCode" => &self.company_postal_code,
            "companyCity" => &self.company_city,
            _ => return None,
        };
        Some(value.as_str())
    }
}

/// One decoded form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactSubmission {
    Person(PersonContact),
    Company(CompanyContact),
}

impl ContactSubmission {
    /// Build a submission from a decoded JSON object, dispatching on
    /// `contactType`.
    pub fn from_payload(payload: &Map<String, Value>) -> Self {
        match ContactType::from_discriminator(payload.get("contactType")) {
            ContactType::Person => ContactSubmission::Person(PersonContact::from_payload(payload)),
            ContactType::Company => {
                ContactSubmission::Company(CompanyContact::from_payload(payload))
            }
        }
    }

    pub fn contact_type(&self) -> ContactType {
        match self {
            ContactSubmission::Person(_) => ContactType::Person,
            ContactSubmission::Company(_) => ContactType::Company,
        }
    }

    /// Value of a form field by its wire name.
    pub fn field(&self, name: &str) -> Option<&str> {
        match self {
            ContactSubmission::Person(person) => person.field(name),
            ContactSubmission::Company(company) => company.field(name),
        }
    }

    /// CSV header row for this submission's file.
    pub fn csv_header(&self) -> &'static [&'static str] {
        match self {
            ContactSubmission::Person(_) => &PERSON_CSV_HEADER,
            ContactSubmission::Company(_) => &COMPANY_CSV_HEADER,
        }
    }

    /// CSV data row, starting with the given timestamp.
    pub fn csv_record<'a>(&'a self, timestamp: &'a str) -> Vec<&'a str> {
        match self {
            ContactSubmission::Person(p) => vec![
                timestamp,
                p.gender(),
                p.name(),
                p.lastname(),
                p.email(),
                p.phone(),
                p.address(),
                p.postal_code(),
                p.city(),
            ],
            ContactSubmission::Company(c) => vec![
                timestamp,
                c.siret(),
                c.company_name(),
                c.company_email().unwrap_or(""),
                c.company_phone(),
                c.company_address(),
                c.company_postal_code(),
                c.company_city(),
            ],
        }
    }
}
