//! Integration tests for the HTTP clients using mockito for HTTP mocking.

use contact_form_server::client::{CommuneClient, CommuneLookup, ContactForm};
use contact_form_server::domain::PostalCode;
use contact_form_server::error::{ClientError, LookupError};
use contact_form_server::models::ContactType;
use contact_form_server::{FormToken, SubmissionClient, SubmitOutcome};
use mockito::{Matcher, Server};
use serde_json::json;

fn filled_person_form() -> ContactForm {
    let mut form = ContactForm::new();
    form.set_field("gender", "female");
    form.set_field("name", "Durand");
    form.set_field("lastname", "Claire");
    form.set_field("email", "Claire.Durand@Example.com");
    form.set_field("phone", "01.23.45.67.89");
    form.set_field("address", "8 allée des Tilleuls");
    form.set_field("postalCode", "44000");
    form.set_field("city", "Nantes");
    form
}

fn session_token(token: &str) -> FormToken {
    FormToken {
        token: token.to_string(),
        session_cookie: Some("contact_session=abc".to_string()),
    }
}

// ── Commune lookup ─────────────────────────────────────────────

#[test]
fn test_commune_lookup_single_match() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/communes")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("codePostal".into(), "44000".into()),
            Matcher::UrlEncoded("fields".into(), "nom,code".into()),
            Matcher::UrlEncoded("format".into(), "json".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"nom": "Nantes", "code": "44109"}]"#)
        .create();

    let client = CommuneClient::with_base_url(server.url(), None);
    let code = PostalCode::new("44000").unwrap();
    let city = client.unique_city(&code).unwrap();

    mock.assert();
    assert_eq!(city, Some("Nantes".to_string()));
}

#[test]
fn test_commune_lookup_sends_bearer_key() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/communes")
        .match_query(Matcher::Any)
        .match_header("authorization", "Bearer geo-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"nom": "Rezé"}, {"nom": "Bouguenais"}]"#)
        .create();

    let client = CommuneClient::with_base_url(server.url(), Some("geo-key".to_string()));
    let code = PostalCode::new("44400").unwrap();

    let communes = client.communes_for(&code).unwrap();
    mock.assert();
    assert_eq!(communes.len(), 2);
    assert_eq!(client.unique_city(&code).unwrap(), None);
}

#[test]
fn test_commune_lookup_api_error() {
    let mut server = Server::new();

    let _mock = server
        .mock("GET", "/communes")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("maintenance")
        .create();

    let client = CommuneClient::with_base_url(server.url(), None);
    let result = client.communes_for(&PostalCode::new("44000").unwrap());

    match result {
        Err(LookupError::ApiError { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "maintenance");
        }
        other => panic!("Expected ApiError, got: {:?}", other),
    }
}

#[test]
fn test_commune_lookup_invalid_json() {
    let mut server = Server::new();

    let _mock = server
        .mock("GET", "/communes")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>not json</html>")
        .create();

    let client = CommuneClient::with_base_url(server.url(), None);
    let result = client.communes_for(&PostalCode::new("44000").unwrap());

    assert!(matches!(result, Err(LookupError::JsonError(_))));
}

#[test]
fn test_form_autocomplete_through_commune_client() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/communes")
        .match_query(Matcher::UrlEncoded("codePostal".into(), "67000".into()))
        .with_status(200)
        .with_body(r#"[{"nom": "Strasbourg", "code": "67482"}]"#)
        .expect(1)
        .create();

    let client = CommuneClient::with_base_url(server.url(), None);
    let mut form = ContactForm::new();
    form.set_contact_type(ContactType::Company);

    form.set_field("companyPostalCode", "6700");
    assert!(!form.autocomplete_city(&client));

    form.set_field("companyPostalCode", "67000");
    assert!(form.autocomplete_city(&client));

    mock.assert();
    assert_eq!(form.field("companyCity"), Some("Strasbourg"));
}

// ── Submission ─────────────────────────────────────────────────

#[test]
fn test_fetch_token() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/contact/token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_header("set-cookie", "theme=dark; Path=/")
        .with_header(
            "set-cookie",
            "contact_session=abc; HttpOnly; SameSite=Strict; Path=/",
        )
        .with_body(r#"{"token": "abc123"}"#)
        .create();

    let client = SubmissionClient::with_base_url(server.url());
    let token = client.fetch_token().unwrap();

    mock.assert();
    assert_eq!(token.token, "abc123");
    assert_eq!(token.session_cookie.as_deref(), Some("contact_session=abc"));
}

#[test]
fn test_fetch_token_without_session_cookie() {
    let mut server = Server::new();

    let _mock = server
        .mock("GET", "/contact/token")
        .with_status(200)
        .with_body(r#"{"token": "abc123"}"#)
        .create();

    let client = SubmissionClient::with_base_url(server.url());
    let token = client.fetch_token().unwrap();

    assert_eq!(token.session_cookie, None);
}

#[test]
fn test_submit_sends_sanitized_payload_once() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/contact/submit")
        .match_header("content-type", "application/json")
        .match_header("cookie", "contact_session=abc")
        .match_body(Matcher::PartialJson(json!({
            "contactType": "person",
            "_token": "tok",
            "email": "claire.durand@example.com",
            "postalCode": "44000"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "Contact enregistré avec succès"}"#)
        .expect(1)
        .create();

    let client = SubmissionClient::with_base_url(server.url());
    let mut form = filled_person_form();

    let outcome = client.submit(&mut form, &session_token("tok")).unwrap();

    mock.assert();
    assert_eq!(
        outcome,
        SubmitOutcome::Accepted {
            message: "Contact enregistré avec succès".to_string()
        }
    );
    assert_eq!(form, ContactForm::new());
}

#[test]
fn test_submit_invalid_form_sends_nothing() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/contact/submit")
        .expect(0)
        .create();

    let client = SubmissionClient::with_base_url(server.url());
    let mut form = filled_person_form();
    form.set_field("phone", "555-1234");

    match client.submit(&mut form, &session_token("tok")).unwrap() {
        SubmitOutcome::Invalid(errors) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors.get("phone"), Some("Format téléphone français invalide"));
        }
        other => panic!("Expected Invalid outcome, got: {:?}", other),
    }

    mock.assert();
    assert_eq!(form.field("name"), Some("Durand"));
}

#[test]
fn test_submit_server_error_keeps_form() {
    let mut server = Server::new();

    let _mock = server
        .mock("POST", "/contact/submit")
        .with_status(500)
        .with_body(r#"{"error": "Erreur serveur"}"#)
        .create();

    let client = SubmissionClient::with_base_url(server.url());
    let mut form = filled_person_form();

    let error = client.submit(&mut form, &session_token("tok")).unwrap_err();

    assert!(matches!(error, ClientError::ApiError { status: 500, .. }));
    assert_eq!(
        error.user_message(),
        "Une erreur est survenue. Veuillez réessayer."
    );
    assert_eq!(form.field("city"), Some("Nantes"));
}

#[test]
fn test_submit_csrf_rejection_is_an_error() {
    let mut server = Server::new();

    let _mock = server
        .mock("POST", "/contact/submit")
        .with_status(403)
        .with_body(r#"{"error": "Token CSRF invalide"}"#)
        .create();

    let client = SubmissionClient::with_base_url(server.url());
    let mut form = filled_person_form();

    match client.submit(&mut form, &session_token("stale")) {
        Err(ClientError::ApiError { status, message }) => {
            assert_eq!(status, 403);
            assert!(message.contains("Token CSRF invalide"));
        }
        other => panic!("Expected ApiError, got: {:?}", other),
    }
}

#[test]
fn test_submit_without_message_uses_default() {
    let mut server = Server::new();

    let _mock = server
        .mock("POST", "/contact/submit")
        .with_status(200)
        .with_body("{}")
        .create();

    let client = SubmissionClient::with_base_url(server.url());
    let mut form = filled_person_form();

    let outcome = client.submit(&mut form, &session_token("tok")).unwrap();
    assert_eq!(
        outcome,
        SubmitOutcome::Accepted {
            message: contact_form_server::client::DEFAULT_SUCCESS_MESSAGE.to_string()
        }
    );
}
