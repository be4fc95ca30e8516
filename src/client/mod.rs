//! Client side of the contact form.
//!
//! `SubmissionClient` is a synchronous HTTP client for the contact endpoints,
//! usable from async contexts via `tokio::task::spawn_blocking`. It runs the
//! shared sanitizer and validator before anything leaves the machine, then
//! sends the form exactly once.

mod communes;
mod form;

pub use communes::{Commune, CommuneClient, CommuneLookup};
pub use form::ContactForm;

use crate::csrf::SESSION_COOKIE;
use crate::error::{ClientError, ClientResult};
use crate::validation::ValidationErrors;
use axum_extra::extract::cookie::Cookie;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Message shown when the server accepts a submission without saying why.
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Contact enregistré avec succès";

/// What came of a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The server stored the contact; the form has been reset.
    Accepted { message: String },

    /// Client-side validation failed; nothing was sent.
    Invalid(ValidationErrors),
}

/// CSRF token handed out by the server, with the session cookie it is
/// bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormToken {
    pub token: String,

    /// `name=value` pair to send back in the `Cookie` header
    pub session_cookie: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client for the contact form endpoints.
#[derive(Clone)]
pub struct SubmissionClient {
    /// Base URL of the contact form server
    base_url: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,
}

impl SubmissionClient {
    /// Create a new SubmissionClient with the given request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();

        Self {
            base_url: base_url.into(),
            agent: Arc::new(agent),
        }
    }

    /// Create a SubmissionClient with the default timeout (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String) -> Self {
        Self::new(base_url, Duration::from_secs(10))
    }

    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    fn map_error(error: ureq::Error) -> ClientError {
        match error {
            ureq::Error::Status(status, response) => ClientError::ApiError {
                status,
                message: response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string()),
            },
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    ClientError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    ClientError::Timeout
                } else {
                    ClientError::HttpError(transport.to_string())
                }
            }
        }
    }

    /// Ask the server for a CSRF token to embed in the form.
    ///
    /// Tokens are consumed by a successful submission; fetch a new one for
    /// the next contact.
    pub fn fetch_token(&self) -> ClientResult<FormToken> {
        let url = self.build_url("/contact/token");
        tracing::debug!("GET {}", url);

        let response = self
            .agent
            .get(&url)
            .set("Accept", "application/json")
            .call()
            .map_err(Self::map_error)?;

        let session_cookie = response
            .all("set-cookie")
            .into_iter()
            .filter_map(|header| Cookie::parse(header.to_string()).ok())
            .find(|cookie| cookie.name() == SESSION_COOKIE)
            .map(|cookie| format!("{}={}", cookie.name(), cookie.value()));

        let body = response
            .into_string()
            .map_err(|e| ClientError::HttpError(e.to_string()))?;
        let token: TokenResponse = serde_json::from_str(&body)?;

        Ok(FormToken {
            token: token.token,
            session_cookie,
        })
    }

    /// Sanitize, validate and send the form.
    ///
    /// Validation failures come back as [`SubmitOutcome::Invalid`] without
    /// any request being made. On success the form is reset. Transport and
    /// server failures are logged and returned as errors; show
    /// [`ClientError::user_message`] to the user.
    pub fn submit(
        &self,
        form: &mut ContactForm,
        token: &FormToken,
    ) -> ClientResult<SubmitOutcome> {
        let errors = form.validate();
        if !errors.is_empty() {
            tracing::debug!(fields = errors.len(), "Submission blocked by validation");
            return Ok(SubmitOutcome::Invalid(errors));
        }

        let mut payload = form.sanitized_payload();
        payload.insert("_token".to_string(), Value::String(token.token.clone()));

        let url = self.build_url("/contact/submit");
        tracing::debug!(contact_type = %form.contact_type(), "POST {}", url);

        let mut request = self
            .agent
            .post(&url)
            .set("Accept", "application/json")
            .set("X-Requested-With", "XMLHttpRequest");
        if let Some(cookie) = &token.session_cookie {
            request = request.set("Cookie", cookie);
        }

        let result = request
            .send_json(Value::Object(payload))
            .map_err(Self::map_error)
            .and_then(|response| {
                response
                    .into_string()
                    .map_err(|e| ClientError::HttpError(e.to_string()))
            });

        let body = match result {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("POST {} - Error: {:?}", url, e);
                return Err(e);
            }
        };

        let message = serde_json::from_str::<MessageResponse>(&body)
            .ok()
            .and_then(|response| response.message)
            .unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string());

        form.reset();
        Ok(SubmitOutcome::Accepted { message })
    }
}
