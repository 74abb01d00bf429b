//! End-to-end tests for the authenticated request pipeline.
//!
//! Each test runs the real client against a wiremock server and checks one
//! pipeline property: short-circuit without a token, single refresh-and-
//! reissue, 422 message joining, DELETE 204 handling, and notifier reporting.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{any, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use zeit_auth::{InMemorySessionStore, SessionStore, StaticTokenRefresher};
use zeit_client::{ApiError, RequestDescriptor, ZeitClient};
use zeit_notify::{RecordingNotifier, Severity};

struct Harness {
    server: MockServer,
    client: ZeitClient,
    session: Arc<InMemorySessionStore>,
    refresher: Arc<StaticTokenRefresher>,
    notifier: Arc<RecordingNotifier>,
}

async fn harness(token: Option<&str>, refresher: StaticTokenRefresher) -> Harness {
    let server = MockServer::start().await;
    let session = Arc::new(match token {
        Some(token) => InMemorySessionStore::with_token(token),
        None => InMemorySessionStore::new(),
    });
    let refresher = Arc::new(refresher);
    let notifier = Arc::new(RecordingNotifier::new());

    let client = ZeitClient::builder()
        .base_url(server.uri())
        .session_store(session.clone())
        .refresher(refresher.clone())
        .notifier(notifier.clone())
        .build()
        .unwrap();

    Harness {
        server,
        client,
        session,
        refresher,
        notifier,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Token short-circuit
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_missing_token_short_circuits_without_network_call() {
    let h = harness(None, StaticTokenRefresher::failing()).await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&h.server)
        .await;

    let err = h
        .client
        .execute(&RequestDescriptor::get("user/me"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::AuthExpired));
    assert_eq!(h.refresher.calls(), 0);

    let notices = h.notifier.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].severity, Severity::Warning);
    assert!(notices[0].message.contains("Sitzung ist abgelaufen"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Refresh-and-reissue
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_401_refreshes_and_reissues_once_with_new_token() {
    let h = harness(Some("stale"), StaticTokenRefresher::returning("fresh")).await;

    Mock::given(method("GET"))
        .and(path("/api/user/me"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&h.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/user/me"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "vorname": "Max",
            "nachname": "Mustermann",
            "email": "max@bbqgmbh.de",
            "role_id": 2
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    let value = h
        .client
        .execute(&RequestDescriptor::get("user/me"))
        .await
        .unwrap();

    assert_eq!(value["vorname"], "Max");
    assert_eq!(h.refresher.calls(), 1);
    assert_eq!(h.session.token().await.as_deref(), Some("fresh"));
    assert_eq!(h.notifier.count(), 0);
}

#[tokio::test]
async fn test_failed_refresh_clears_token_and_expires_session() {
    let h = harness(Some("stale"), StaticTokenRefresher::failing()).await;

    Mock::given(method("GET"))
        .and(path("/api/user/me"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&h.server)
        .await;

    let err = h
        .client
        .execute(&RequestDescriptor::get("user/me"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::AuthExpired));
    assert_eq!(h.refresher.calls(), 1);
    assert_eq!(h.session.token().await, None);
    assert_eq!(h.session.clear_count(), 1);

    let notices = h.notifier.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].severity, Severity::Warning);
}

#[tokio::test]
async fn test_second_rejection_is_final_with_single_refresh() {
    let h = harness(Some("stale"), StaticTokenRefresher::returning("fresh")).await;

    // Both the original and the reissued request are rejected.
    Mock::given(method("GET"))
        .and(path("/api/user/me"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&h.server)
        .await;

    let err = h
        .client
        .execute(&RequestDescriptor::get("user/me"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::AuthExpired));
    assert_eq!(h.refresher.calls(), 1);
    assert_eq!(h.session.token().await, None);
    assert_eq!(h.notifier.count(), 1);
}

#[tokio::test]
async fn test_forbidden_after_reissue_classifies_forbidden() {
    let h = harness(Some("stale"), StaticTokenRefresher::returning("fresh")).await;

    Mock::given(method("GET"))
        .and(path("/api/absences/upcoming"))
        .respond_with(ResponseTemplate::new(403))
        .expect(2)
        .mount(&h.server)
        .await;

    let err = h
        .client
        .execute(&RequestDescriptor::get("absences/upcoming"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Forbidden));
    assert_eq!(h.refresher.calls(), 1);

    let notices = h.notifier.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].severity, Severity::Error);
    assert!(notices[0].message.contains("Zugriff verweigert"));
}

#[tokio::test]
async fn test_reissue_carries_the_original_body() {
    let h = harness(Some("stale"), StaticTokenRefresher::returning("fresh")).await;
    let body = json!({ "datum": "2024-01-15", "startzeit": "09:00:00", "endzeit": "17:30:00" });

    Mock::given(method("POST"))
        .and(path("/api/time_entries"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&h.server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/time_entries"))
        .and(header("authorization", "Bearer fresh"))
        .and(wiremock::matchers::body_json(body.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&h.server)
        .await;

    let value = h
        .client
        .execute(&RequestDescriptor::post("time_entries", body))
        .await
        .unwrap();

    assert_eq!(value["ok"], true);
}

// ─────────────────────────────────────────────────────────────────────────────
// Status classification
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_422_joins_field_errors_in_order() {
    let h = harness(Some("tok"), StaticTokenRefresher::failing()).await;

    Mock::given(method("POST"))
        .and(path("/api/time_entries"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [
                { "loc": ["body", "datum"], "msg": "field required" },
                { "loc": ["body", "startzeit"], "msg": "invalid time format" },
                { "loc": ["body", "endzeit"], "msg": "value is not a valid time" }
            ]
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    let err = h
        .client
        .execute(&RequestDescriptor::post("time_entries", json!({})))
        .await
        .unwrap_err();

    let ApiError::Validation(message) = err else {
        panic!("expected validation outcome, got {err:?}");
    };

    let first = message.find("body.datum: field required").unwrap();
    let second = message.find("body.startzeit: invalid time format").unwrap();
    let third = message.find("body.endzeit: value is not a valid time").unwrap();
    assert!(first < second && second < third);

    // No refresh for a validation failure.
    assert_eq!(h.refresher.calls(), 0);
    assert_eq!(h.notifier.count(), 1);
}

#[tokio::test]
async fn test_delete_204_is_success_with_empty_payload() {
    let h = harness(Some("tok"), StaticTokenRefresher::failing()).await;

    Mock::given(method("DELETE"))
        .and(path("/api/time_entries/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&h.server)
        .await;

    let value = h
        .client
        .execute(&RequestDescriptor::delete("time_entries/7"))
        .await
        .unwrap();

    assert_eq!(value, serde_json::Value::Null);
    assert_eq!(h.notifier.count(), 0);
}

#[tokio::test]
async fn test_404_classifies_not_found_with_warning() {
    let h = harness(Some("tok"), StaticTokenRefresher::failing()).await;

    Mock::given(method("GET"))
        .and(path("/api/user/me"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&h.server)
        .await;

    let err = h
        .client
        .execute(&RequestDescriptor::get("user/me"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::NotFound));
    let notices = h.notifier.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].severity, Severity::Warning);
    assert!(notices[0].message.contains("nicht gefunden"));
}

#[tokio::test]
async fn test_server_errors_carry_status() {
    let h = harness(Some("tok"), StaticTokenRefresher::failing()).await;

    Mock::given(method("GET"))
        .and(path("/api/user/me"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&h.server)
        .await;

    let err = h
        .client
        .execute(&RequestDescriptor::get("user/me"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Server { status: 503, .. }));
    assert!(err.is_server_error());

    let notices = h.notifier.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].severity, Severity::Error);
    assert!(notices[0].message.contains("Serverfehler"));
}

#[tokio::test]
async fn test_malformed_success_body_is_distinct_from_server_error() {
    let h = harness(Some("tok"), StaticTokenRefresher::failing()).await;

    Mock::given(method("GET"))
        .and(path("/api/user/me"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .expect(1)
        .mount(&h.server)
        .await;

    let err = h
        .client
        .execute(&RequestDescriptor::get("user/me"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::MalformedResponse(_)));
    let notices = h.notifier.notices();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].message.contains("ungültig"));
}

#[tokio::test]
async fn test_transport_failure_propagates_as_network_error() {
    let session = Arc::new(InMemorySessionStore::with_token("tok"));
    let notifier = Arc::new(RecordingNotifier::new());

    // Nothing listens on the discard port.
    let client = ZeitClient::builder()
        .base_url("http://127.0.0.1:9")
        .timeout(std::time::Duration::from_secs(2))
        .session_store(session)
        .refresher(Arc::new(StaticTokenRefresher::failing()))
        .notifier(notifier.clone())
        .build()
        .unwrap();

    let err = client
        .execute(&RequestDescriptor::get("user/me"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Network(_)));
    let notices = notifier.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].severity, Severity::Error);
    assert!(notices[0].message.contains("Verbindungsfehler"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Typed surfaces
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_typed_user_me() {
    let h = harness(Some("tok"), StaticTokenRefresher::failing()).await;

    Mock::given(method("GET"))
        .and(path("/api/user/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "vorname": "Erika",
            "nachname": "Musterfrau",
            "email": "erika@bbqgmbh.de",
            "role_id": 3
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    let user = h.client.user().me().await.unwrap();
    assert_eq!(user.display_name(), "Erika Musterfrau");
}

#[tokio::test]
async fn test_diagnostics_reports_mixed_outcomes() {
    let h = harness(Some("tok"), StaticTokenRefresher::failing()).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 1 }])))
        .expect(1)
        .mount(&h.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/roles/"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&h.server)
        .await;

    let endpoints = vec!["/users/".to_string(), "/roles/".to_string()];
    let reports = h.client.diagnostics().run(&endpoints).await;

    assert_eq!(reports.len(), 2);
    assert!(reports[0].success);
    assert_eq!(reports[0].status, Some(200));
    assert!(reports[0].response_size.unwrap() > 0);

    assert!(!reports[1].success);
    assert_eq!(reports[1].status, Some(404));
    assert!(reports[1].error_details.is_some());
}
