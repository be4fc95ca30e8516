//! Postal code to commune lookup.
//!
//! Queries a `geo.api.gouv.fr`-compatible API. The lookup only feeds the
//! city autocomplete, so callers treat every error as "no suggestion".

use crate::config::Config;
use crate::domain::PostalCode;
use crate::error::{LookupError, LookupResult};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// One commune returned by the lookup service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Commune {
    /// Commune name, e.g. "Paris"
    #[serde(rename = "nom")]
    pub name: String,

    /// INSEE code of the commune
    #[serde(default)]
    pub code: Option<String>,
}

/// Source of communes for a postal code.
pub trait CommuneLookup: Send + Sync {
    /// All communes sharing the postal code.
    fn communes_for(&self, postal_code: &PostalCode) -> LookupResult<Vec<Commune>>;

    /// The city name when exactly one commune matches.
    fn unique_city(&self, postal_code: &PostalCode) -> LookupResult<Option<String>> {
        let mut communes = self.communes_for(postal_code)?;
        if communes.len() == 1 {
            Ok(communes.pop().map(|commune| commune.name))
        } else {
            Ok(None)
        }
    }
}

/// HTTP client for the commune lookup API.
#[derive(Clone)]
pub struct CommuneClient {
    /// Base URL of the lookup API
    base_url: String,

    /// Optional bearer key
    api_key: Option<String>,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,
}

impl CommuneClient {
    /// Create a new CommuneClient from configuration.
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            base_url: config.commune_api_url.clone(),
            api_key: config.commune_api_key.clone(),
            agent: Arc::new(agent),
        }
    }

    /// Create a CommuneClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, api_key: Option<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            api_key,
            agent: Arc::new(agent),
        }
    }

    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    fn map_error(error: ureq::Error) -> LookupError {
        match error {
            ureq::Error::Status(status, response) => LookupError::ApiError {
                status,
                message: response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string()),
            },
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::Io {
                    LookupError::Timeout
                } else {
                    LookupError::HttpError(transport.to_string())
                }
            }
        }
    }
}

impl CommuneLookup for CommuneClient {
    fn communes_for(&self, postal_code: &PostalCode) -> LookupResult<Vec<Commune>> {
        let url = self.build_url(&format!(
            "/communes?codePostal={}&fields=nom,code&format=json",
            urlencoding::encode(postal_code.as_str())
        ));
        tracing::debug!("GET {}", url);

        let mut request = self.agent.get(&url).set("Accept", "application/json");
        if let Some(key) = &self.api_key {
            request = request.set("Authorization", &format!("Bearer {}", key));
        }

        let response = request.call().map_err(Self::map_error)?;
        let body = response
            .into_string()
            .map_err(|e| LookupError::HttpError(e.to_string()))?;

        let communes: Vec<Commune> = serde_json::from_str(&body)?;
        tracing::debug!(
            postal_code = %postal_code,
            matches = communes.len(),
            "Commune lookup completed"
        );
        Ok(communes)
    }
}
