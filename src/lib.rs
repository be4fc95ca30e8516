//! Contact Form Server - collects person and company contacts over HTTP and
//! appends them to CSV files.
//!
//! One field schema drives sanitization and validation on both sides of the
//! wire: the [`client`] module runs it before sending, the [`server`] runs it
//! again before anything is stored.
//!
//! # Architecture
//!
//! - **schema**: Field rules and French error messages shared by client and server
//! - **sanitize**: Strips markup and normalizes field values
//! - **validation**: Checks a submission against the schema
//! - **models**: Person and company submissions and their CSV layout
//! - **domain**: Value objects for emails, phones, postal codes and SIRET numbers
//! - **storage**: CSV persistence behind the `ContactStore` trait
//! - **csrf**: Session-bound, expiring CSRF tokens
//! - **client**: Form state, commune autocomplete and the submission client
//! - **server**: Axum routes for submission, tokens, schema and city lookup
//! - **config**: Configuration management from environment variables
//! - **error**: Custom error types for precise error handling
//! - **metrics**: Counters for submissions and lookups

pub mod client;
pub mod config;
pub mod csrf;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod models;
pub mod sanitize;
pub mod schema;
pub mod server;
pub mod storage;
pub mod validation;

// Re-export commonly used types
pub use client::{
    Commune, CommuneClient, CommuneLookup, ContactForm, FormToken, SubmissionClient,
    SubmitOutcome,
};
pub use config::Config;
pub use csrf::{CsrfGrant, CsrfTokens, SESSION_COOKIE};
pub use error::{ClientError, ConfigError, LookupError, StorageError};
pub use metrics::{LookupTimer, Metrics, MetricsSummary};
pub use models::{CompanyContact, ContactSubmission, ContactType, PersonContact};
pub use schema::{FieldFormat, FieldRule, SchemaDocument};
pub use server::{build_router, run_server, AppState};
pub use storage::{ContactStore, CsvContactStore};
pub use validation::{validate, ValidationErrors};
