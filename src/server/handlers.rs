//! Request handlers for the contact endpoints.

use super::AppState;
use crate::csrf::SESSION_COOKIE;
use crate::domain::PostalCode;
use crate::error::StorageError;
use crate::metrics::LookupTimer;
use crate::models::ContactSubmission;
use crate::sanitize::sanitize_payload;
use crate::schema::SchemaDocument;
use crate::validation::{validate, ValidationErrors};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{error, info, warn};

pub const SUCCESS_MESSAGE: &str = "Contact enregistré avec succès";

/// Why a request was turned away.
#[derive(Debug)]
pub enum AppError {
    /// Body is not a non-empty JSON object
    InvalidJson,

    /// `_token` missing, expired or not issued to the session cookie
    InvalidCsrf,

    /// Field-level validation failures
    Validation(ValidationErrors),

    /// Path segment is not a five-digit postal code
    InvalidPostalCode,

    /// The contact could not be written
    Storage(StorageError),
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        AppError::Storage(e)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

#[derive(Serialize)]
struct ValidationBody {
    errors: ValidationErrors,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error = |status: StatusCode, message: &'static str| {
            (status, Json(ErrorBody { error: message })).into_response()
        };

        match self {
            AppError::InvalidJson => error(StatusCode::BAD_REQUEST, "Données JSON invalides"),
            AppError::InvalidCsrf => error(StatusCode::FORBIDDEN, "Token CSRF invalide"),
            AppError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(ValidationBody { errors })).into_response()
            }
            AppError::InvalidPostalCode => {
                error(StatusCode::BAD_REQUEST, "Code postal invalide")
            }
            // Detail stays in the logs.
            AppError::Storage(_) => error(StatusCode::INTERNAL_SERVER_ERROR, "Erreur serveur"),
        }
    }
}

/// `POST /contact/submit`
pub async fn submit_contact(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let payload = match serde_json::from_slice::<Value>(&body) {
        Ok(Value::Object(map)) if !map.is_empty() => map,
        _ => return Err(AppError::InvalidJson),
    };

    let token = payload
        .get("_token")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let session_id = jar.get(SESSION_COOKIE).map(|cookie| cookie.value().to_string());
    if !state.csrf.is_valid(session_id.as_deref(), token) {
        warn!("Contact submission rejected: invalid CSRF token");
        state.metrics.record_csrf_rejection();
        return Err(AppError::InvalidCsrf);
    }

    let submission = ContactSubmission::from_payload(&sanitize_payload(&payload));

    let errors = validate(&submission);
    if !errors.is_empty() {
        state.metrics.record_validation_rejection();
        return Err(AppError::Validation(errors));
    }

    if let Err(e) = state.store.save(&submission).await {
        error!(contact_type = %submission.contact_type(), "Failed to save contact: {}", e);
        state.metrics.record_storage_failure();
        return Err(e.into());
    }

    if let Some(session_id) = &session_id {
        state.csrf.revoke(session_id);
    }

    state.metrics.record_submission_accepted();
    info!(contact_type = %submission.contact_type(), "Contact saved");

    Ok((StatusCode::OK, Json(json!({ "message": SUCCESS_MESSAGE }))))
}

/// `GET /contact/token`
///
/// Reuses the session named by the cookie when it is still open, otherwise
/// starts a new one and sets its cookie.
pub async fn issue_token(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<Value>) {
    let grant = state
        .csrf
        .issue(jar.get(SESSION_COOKIE).map(|cookie| cookie.value()));

    let cookie = Cookie::build((SESSION_COOKIE, grant.session_id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict);

    (jar.add(cookie), Json(json!({ "token": grant.token })))
}

/// `GET /contact/schema`
pub async fn contact_schema() -> Json<SchemaDocument> {
    Json(SchemaDocument::new())
}

/// `GET /contact/city/:postal_code`
///
/// Lookup failures are not the caller's problem: they answer `null`.
pub async fn lookup_city(
    State(state): State<AppState>,
    Path(postal_code): Path<String>,
) -> Result<Json<Value>, AppError> {
    let postal_code = PostalCode::new(postal_code).map_err(|_| AppError::InvalidPostalCode)?;

    let communes = state.communes.clone();
    let timer = LookupTimer::new(state.metrics.clone());
    let result =
        tokio::task::spawn_blocking(move || communes.unique_city(&postal_code)).await;

    let city = match result {
        Ok(Ok(city)) => {
            timer.complete();
            city
        }
        Ok(Err(e)) => {
            warn!("Commune lookup failed: {}", e);
            timer.complete_with_error();
            None
        }
        Err(e) => {
            error!("Commune lookup task failed: {}", e);
            timer.complete_with_error();
            None
        }
    };

    Ok(Json(json!({ "city": city })))
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "metrics": state.metrics.summary(),
    }))
}
