//! End-to-end tests for the `App` facade against a local mock server.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::time::Duration;

use postline::{App, AppError};
use postline_application::{ApplicationError, MergeOutcome, ProjectStore, RequestEvent};
use postline_domain::{
    ClientSettings, Environment, Group, Project, Request, RequestErrorKind, RequestState,
};
use postline_infrastructure::ReqwestHttpClient;
use pretty_assertions::assert_eq;
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds an app whose `local` environment points at `base_url`, with one
/// `Get Posts` request. Returns the app and the request id.
fn app_for(base_url: &str) -> (App<ReqwestHttpClient>, uuid::Uuid) {
    let environment = Environment::new("local").with_variable("baseUrl", base_url);
    let request = Request::get("Get Posts", "{{baseUrl}}/api/posts")
        .with_header("Accept", "application/json");
    let request_id = request.id;
    let env_id = environment.id;

    let project = Project::new(
        vec![Group::new("Blog").with_request(request)],
        vec![environment],
    );
    let mut app =
        App::with_settings(ClientSettings::default(), ProjectStore::from_project(project))
            .unwrap();
    app.set_active_environment(Some(env_id)).unwrap();
    (app, request_id)
}

#[tokio::test]
async fn test_send_completes_with_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/posts"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("[]", "application/json"),
        )
        .mount(&server)
        .await;

    let (mut app, request_id) = app_for(&server.uri());
    let mut events = app.subscribe();

    let first = app.send(request_id).unwrap();
    assert!(matches!(first, RequestEvent::InFlight { .. }));
    assert_eq!(app.in_flight_request(), Some(request_id));

    let done = app.next_event().await.unwrap();
    let RequestEvent::Completed { response, .. } = done else {
        panic!("expected completion, got {done:?}");
    };
    assert_eq!(response.status_code, Some(200));
    assert_eq!(response.body, "[]");
    assert_eq!(response.size_bytes, Some(2));
    assert!(response.elapsed.is_some());
    assert_eq!(response.header("content-type"), Some("application/json"));

    assert!(matches!(app.request_state(), RequestState::Completed { .. }));
    assert_eq!(app.current_response(), Some(&response));
    assert_eq!(app.in_flight_request(), None);

    assert!(matches!(
        events.recv().await,
        Some(RequestEvent::InFlight { .. })
    ));
    assert!(matches!(
        events.recv().await,
        Some(RequestEvent::Completed { .. })
    ));
}

#[tokio::test]
async fn test_unresolved_url_fails_without_dispatch() {
    let (mut app, _) = app_for("http://unused");
    let group_id = app.list_groups()[0].id;
    let broken = app
        .create_request(group_id, &Request::get("Broken", "{{missing}}/x"))
        .unwrap();

    let event = app.send(broken).unwrap();

    assert_eq!(
        event,
        RequestEvent::Failed {
            request_id: broken,
            kind: RequestErrorKind::InvalidUrl,
            message: "Invalid URL".to_string(),
        }
    );
    let response = app.current_response().unwrap();
    assert_eq!(response.error.as_deref(), Some("Invalid URL"));
    assert_eq!(response.status_code, None);
    assert_eq!(response.elapsed, None);
    assert!(matches!(app.request_state(), RequestState::Failed { .. }));
    assert_eq!(app.next_event().await, None);
}

#[tokio::test]
async fn test_second_send_is_rejected_and_cancel_keeps_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/posts"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(30)))
        .mount(&server)
        .await;

    let (mut app, request_id) = app_for(&server.uri());

    app.send(request_id).unwrap();
    let second = app.send(request_id);
    assert!(matches!(
        second,
        Err(AppError::Application(ApplicationError::Busy))
    ));

    assert!(app.cancel(request_id));
    assert!(matches!(app.request_state(), RequestState::Cancelled));
    assert_eq!(app.current_response(), None);
    assert_eq!(app.next_event().await, None);

    // Cancelling again is a no-op.
    assert!(!app.cancel(request_id));
}

#[tokio::test]
async fn test_transport_failure_sets_error_response() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let (mut app, request_id) = app_for(&format!("http://127.0.0.1:{port}"));
    app.send(request_id).unwrap();

    let event = app.next_event().await.unwrap();
    assert!(matches!(event, RequestEvent::Failed { .. }));
    let response = app.current_response().unwrap();
    assert!(response.error.is_some());
    assert_eq!(response.status_code, None);
    assert!(response.elapsed.is_some());
}

#[tokio::test]
async fn test_send_unknown_request() {
    let (mut app, _) = app_for("http://unused");
    let result = app.send(uuid::Uuid::now_v7());
    assert!(matches!(
        result,
        Err(AppError::Application(ApplicationError::NotFound(_)))
    ));
}

#[test]
fn test_postman_collection_round_trip_through_app() {
    let (app, _) = app_for("http://localhost");
    let bytes = app.export_postman_collection().unwrap();

    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["info"]["name"], "Postline Export");

    let mut other = App::with_settings(ClientSettings::default(), ProjectStore::new()).unwrap();
    let summary = other.import_postman_collection(&bytes).unwrap();

    assert_eq!(summary.groups.len(), 1);
    assert_eq!(summary.requests, 1);
    let imported = &other.list_groups()[0].requests[0];
    assert_eq!(imported.url, "{{baseUrl}}/api/posts");
    assert_eq!(imported.name, "Get Posts");
}

#[test]
fn test_malformed_import_leaves_project_untouched() {
    let (mut app, _) = app_for("http://localhost");
    let before = app.save_project().unwrap();

    let result = app.import_postman_collection(b"{\"info\": ");
    assert!(matches!(result, Err(AppError::Decode(_))));
    let result = app.import_environment(b"{\"values\": []}");
    assert!(matches!(result, Err(AppError::Decode(_))));
    let result = app.import_postman(b"{\"neither\": true}");
    assert!(matches!(result, Err(AppError::Decode(_))));

    assert_eq!(app.save_project().unwrap(), before);
}

#[test]
fn test_environment_import_merges_by_name() {
    let (mut app, _) = app_for("http://localhost");
    let local_id = app.list_environments()[0].id;
    let _staging = app.store_mut().create_environment("staging");

    let replacement = Environment::new("local").with_variable("baseUrl", "https://prod.test");
    let bytes = postline_infrastructure::postman::export_environment(&replacement, "Postline")
        .unwrap();
    let summary = app.import_environment(&bytes).unwrap();

    assert_eq!(summary.environment, Some(MergeOutcome::Replaced(local_id)));
    assert_eq!(app.list_environments().len(), 2);
    assert_eq!(app.list_environments()[0].id, local_id);
    assert_eq!(
        app.active_environment().unwrap().get("baseUrl"),
        Some("https://prod.test")
    );

    let fresh = Environment::new("qa").with_variable("baseUrl", "https://qa.test");
    let bytes = app.export_environment(local_id).unwrap();
    assert!(!bytes.is_empty());
    let bytes_qa =
        postline_infrastructure::postman::export_environment(&fresh, "Postline").unwrap();
    let summary = app.import_postman(&bytes_qa).unwrap();
    assert!(matches!(summary.environment, Some(MergeOutcome::Appended(_))));
    assert_eq!(app.list_environments()[2].name, "qa");
}

#[test]
fn test_export_unknown_environment() {
    let (app, _) = app_for("http://localhost");
    let result = app.export_environment(uuid::Uuid::now_v7());
    assert!(matches!(
        result,
        Err(AppError::Application(ApplicationError::NotFound(_)))
    ));
}

#[test]
fn test_project_load_is_atomic_and_keeps_active_environment() {
    let (mut app, request_id) = app_for("http://localhost");
    let saved = app.save_project().unwrap();
    let active = app.active_environment().unwrap().id;

    app.delete_request(request_id).unwrap();
    assert!(matches!(
        app.load_project(b"{\"groups\": [{\"broken\": true}]}"),
        Err(AppError::Decode(_))
    ));
    assert!(app.list_groups()[0].requests.is_empty());

    app.load_project(&saved).unwrap();
    assert_eq!(app.list_groups()[0].requests[0].id, request_id);
    assert_eq!(app.active_environment().map(|e| e.id), Some(active));

    app.load_project(b"{\"groups\": [], \"environments\": []}")
        .unwrap();
    assert!(app.active_environment().is_none());
    assert!(app.list_groups().is_empty());
}

#[test]
fn test_load_rejects_other_documents_and_keeps_state() {
    let (mut app, request_id) = app_for("http://localhost");
    let before = app.save_project().unwrap();
    let collection = app.export_postman_collection().unwrap();

    let documents: [&[u8]; 3] = [&collection, b"{}", b"{\"foo\": 1}"];
    for bytes in documents {
        assert!(matches!(app.load_project(bytes), Err(AppError::Decode(_))));
    }

    assert_eq!(app.save_project().unwrap(), before);
    assert_eq!(app.list_groups()[0].requests[0].id, request_id);
    assert_eq!(app.list_environments().len(), 1);
    assert!(app.active_environment().is_some());
}

#[test]
fn test_update_request_replaces_stored_definition() {
    let (mut app, request_id) = app_for("http://localhost");
    let mut edited = app.store().find_request(request_id).unwrap().clone();
    edited.name = "List Posts".to_string();
    edited.url = "{{baseUrl}}/api/posts?page=2".to_string();

    app.update_request(edited.clone()).unwrap();
    assert_eq!(app.store().find_request(request_id), Some(&edited));

    let stranger = Request::get("Stranger", "http://x.test");
    assert!(matches!(
        app.update_request(stranger),
        Err(AppError::Application(ApplicationError::NotFound(_)))
    ));
}

#[tokio::test]
async fn test_project_file_round_trip() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("project.json");

    let (app, request_id) = app_for("http://localhost");
    app.save_project_to(&file).await.unwrap();

    let mut other = App::with_settings(ClientSettings::default(), ProjectStore::new()).unwrap();
    other.load_project_from(&file).await.unwrap();
    assert_eq!(other.store().find_request(request_id).unwrap().name, "Get Posts");

    let missing = other.load_project_from(&dir.path().join("nope.json")).await;
    assert!(matches!(missing, Err(AppError::Storage(_))));
}

#[test]
fn test_preview_url_reports_unresolved() {
    let (mut app, request_id) = app_for("https://x.test");
    let preview = app.preview_url(request_id).unwrap();
    assert_eq!(preview.resolved, "https://x.test/api/posts");
    assert!(preview.is_complete);

    app.set_active_environment(None).unwrap();
    let preview = app.preview_url(request_id).unwrap();
    assert_eq!(preview.resolved, "{{baseUrl}}/api/posts");
    assert_eq!(preview.unresolved, vec!["baseUrl".to_string()]);
}
