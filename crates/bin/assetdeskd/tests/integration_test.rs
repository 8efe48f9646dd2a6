//! End-to-end smoke tests for the full assetdeskd stack.
//!
//! Each test spins up the complete application (in-memory `SQLite`, real repos,
//! real services, real axum router, the Google adapter pointed at a wiremock
//! server) and exercises the HTTP layer via `tower::ServiceExt::oneshot`: no
//! TCP port is bound.

use assetdesk_adapter_google::{GoogleConfig, GoogleIdentityProvider};
use assetdesk_adapter_http_axum::api::index::menu;
use assetdesk_adapter_http_axum::assets::{BUNDLED_ASSETS_DIR, DirectoryDeviceTypeCatalog};
use assetdesk_adapter_http_axum::router;
use assetdesk_adapter_http_axum::state::{AppState, Backend};
use assetdesk_adapter_http_axum::templates::{Globals, Templates};
use assetdesk_adapter_storage_sqlite_sqlx::{
    Config, SqliteDeviceRepository, SqliteGroupRepository, SqliteIssueRepository,
    SqliteUserRepository,
};
use assetdesk_app::services::auth_service::AuthService;
use assetdesk_app::services::device_service::DeviceService;
use assetdesk_app::services::issue_service::IssueService;
use assetdesk_app::services::user_service::UserService;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct TestBackend;

impl Backend for TestBackend {
    type Devices = SqliteDeviceRepository;
    type Issues = SqliteIssueRepository;
    type Users = SqliteUserRepository;
    type Groups = SqliteGroupRepository;
    type Identity = GoogleIdentityProvider;
    type Catalog = DirectoryDeviceTypeCatalog;
}

/// Build a fully-wired router backed by an in-memory `SQLite` database, with
/// Google endpoints served under `google_base`.
async fn app_with_google(google_base: &str) -> axum::Router {
    let db = Config {
        database_url: "sqlite::memory:".to_string(),
    }
    .build()
    .await
    .expect("in-memory database should initialise");

    let pool = db.pool().clone();

    let identity = GoogleIdentityProvider::with_base_urls(
        GoogleConfig {
            client_id: "client-123".to_string(),
            client_secret: "s3cret".to_string(),
            redirect_uri: "http://localhost:3000/auth/google".to_string(),
        },
        &format!("{google_base}/token"),
        &format!("{google_base}/oauth2/v1/userinfo"),
    )
    .unwrap();

    let state = AppState::<TestBackend>::new(
        DeviceService::new(SqliteDeviceRepository::new(pool.clone())),
        IssueService::new(
            SqliteIssueRepository::new(pool.clone()),
            SqliteDeviceRepository::new(pool.clone()),
        ),
        UserService::new(
            SqliteUserRepository::new(pool.clone()),
            SqliteGroupRepository::new(pool.clone()),
        ),
        AuthService::new(identity, SqliteUserRepository::new(pool)),
        DirectoryDeviceTypeCatalog::new(BUNDLED_ASSETS_DIR),
        Templates::new(Globals::new("assetdesk", "test", &menu())),
    );

    router::build(state, BUNDLED_ASSETS_DIR)
}

async fn app() -> axum::Router {
    app_with_google("http://127.0.0.1:9").await
}

async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let resp = app.clone().oneshot(request).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, headers, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn with_json(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn create_device(app: &axum::Router, name: &str) -> i64 {
    let (status, _, body) = send(
        app,
        with_json(
            "POST",
            "/devices",
            &json!({"name": name, "device_type": "laptop", "location": "Desk 4"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["response"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Health check and pages
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let (status, _, body) = send(&app().await, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".to_string()));
}

#[tokio::test]
async fn should_render_home_page_for_browsers() {
    let request = Request::builder()
        .uri("/")
        .header(header::ACCEPT, "text/html")
        .body(Body::empty())
        .unwrap();

    let (status, headers, body) = send(&app().await, request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(
        headers[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );
    assert!(body.as_str().unwrap().contains("Sign in with Google"));
}

#[tokio::test]
async fn should_render_device_list_page_for_browsers() {
    let app = app().await;
    create_device(&app, "Front desk printer").await;

    let request = Request::builder()
        .uri("/devices")
        .header(header::ACCEPT, "text/html")
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    let html = body.as_str().unwrap();
    assert!(html.contains("Device List"));
    assert!(html.contains("Front desk printer"));
}

#[tokio::test]
async fn should_list_bundled_device_types() {
    let (_, _, body) = send(&app().await, get("/device-types")).await;

    assert_eq!(
        body["response"],
        json!(["desktop", "laptop", "phone", "printer", "router"])
    );
}

// ---------------------------------------------------------------------------
// Devices
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_complete_device_crud_cycle() {
    let app = app().await;

    let id = create_device(&app, "ThinkPad").await;

    let (status, _, body) = send(&app, get(&format!("/devices/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"]["name"], "ThinkPad");
    assert_eq!(body["links"]["Self"]["url"], format!("/devices/{id}"));

    let (status, _, body) = send(
        &app,
        with_json(
            "PUT",
            &format!("/devices/{id}"),
            &json!({"name": "ThinkPad X1", "device_type": "laptop", "location": "Desk 5"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Device Updated");
    assert_eq!(body["response"]["location"], "Desk 5");

    let (_, _, body) = send(&app, get("/devices")).await;
    assert_eq!(body["response"].as_array().unwrap().len(), 1);

    let (status, _, body) = send(&app, empty("DELETE", &format!("/devices/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Device Deleted");
    assert_eq!(body["response"], id);

    let (status, _, body) = send(&app, get(&format!("/devices/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({"response": null, "message": format!("Device {id} not found"), "links": {}})
    );
}

#[tokio::test]
async fn should_reject_device_without_name() {
    let (status, _, body) = send(
        &app().await,
        with_json(
            "POST",
            "/devices",
            &json!({"name": " ", "device_type": "laptop", "location": ""}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "name must not be empty");
}

#[tokio::test]
async fn should_page_through_devices() {
    let app = app().await;
    for name in ["one", "two", "three"] {
        create_device(&app, name).await;
    }

    let (_, _, first) = send(&app, get("/devices?per_page=2")).await;
    assert_eq!(first["response"].as_array().unwrap().len(), 2);
    assert_eq!(first["links"]["Next"]["url"], "/devices?page=2&per_page=2");
    assert!(first["links"].get("Prior").is_none());

    let (_, _, second) = send(&app, get("/devices?page=2&per_page=2")).await;
    assert_eq!(second["response"].as_array().unwrap().len(), 1);
    assert_eq!(second["response"][0]["name"], "three");
    assert_eq!(second["links"]["Prior"]["url"], "/devices?page=1&per_page=2");
    assert!(second["links"].get("Next").is_none());
}

// ---------------------------------------------------------------------------
// Issues
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_relate_issue_and_device() {
    let app = app().await;
    let device_id = create_device(&app, "Lobby router").await;

    let (status, _, body) = send(
        &app,
        with_json(
            "POST",
            "/issues",
            &json!({"title": "No uplink", "body": "Lights are off"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["response"]["status"], "open");
    let issue_id = body["response"]["id"].as_i64().unwrap();

    let (status, _, body) = send(
        &app,
        empty("PUT", &format!("/issues/{issue_id}/devices/{device_id}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], json!({"issue_id": issue_id, "device_id": device_id}));

    let (_, _, body) = send(&app, get(&format!("/issues/{issue_id}/devices"))).await;
    assert_eq!(body["response"][0]["name"], "Lobby router");

    let (_, _, body) = send(&app, get(&format!("/devices/{device_id}/issues"))).await;
    assert_eq!(body["response"][0]["title"], "No uplink");

    let (status, _, body) = send(&app, get(&format!("/issues/{issue_id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Issue Details");
}

#[tokio::test]
async fn should_not_relate_missing_device() {
    let app = app().await;
    let (_, _, body) = send(
        &app,
        with_json("POST", "/issues", &json!({"title": "Flicker", "body": ""})),
    )
    .await;
    let issue_id = body["response"]["id"].as_i64().unwrap();

    let (status, _, body) = send(&app, empty("PUT", &format!("/issues/{issue_id}/devices/99"))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Device 99 not found");
}

#[tokio::test]
async fn should_delete_issue() {
    let app = app().await;
    let (_, _, body) = send(
        &app,
        with_json("POST", "/issues", &json!({"title": "Paper jam", "body": ""})),
    )
    .await;
    let issue_id = body["response"]["id"].as_i64().unwrap();

    let (status, _, body) = send(&app, empty("DELETE", &format!("/issues/{issue_id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Issue Deleted");

    let (_, _, body) = send(&app, get("/issues")).await;
    assert_eq!(body["message"], "List of Issues");
    assert_eq!(body["response"], json!([]));
}

// ---------------------------------------------------------------------------
// Groups
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_reject_duplicate_group_name() {
    let app = app().await;

    let (status, _, _) = send(&app, with_json("POST", "/groups", &json!({"name": "IT"}))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _, body) = send(&app, with_json("POST", "/groups", &json!({"name": "IT"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Group IT already exists");
}

// ---------------------------------------------------------------------------
// Google sign-in
// ---------------------------------------------------------------------------

async fn mount_google(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "ya29.a0Af",
            "expires_in": 3599,
            "token_type": "Bearer"
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/oauth2/v1/userinfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "1098",
            "email": "grace@example.com",
            "verified_email": true,
            "name": "Grace Hopper",
            "given_name": "Grace",
            "family_name": "Hopper",
            "picture": "https://lh3.example.com/grace.png"
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn should_sign_in_and_manage_memberships() {
    let server = MockServer::start().await;
    mount_google(&server).await;
    let app = app_with_google(&server.uri()).await;

    let (status, headers, body) = send(&app, get("/auth/google?code=4%2F0Adeu5B")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Successfully authenticated with Google");
    let set_cookie = headers[header::SET_COOKIE].to_str().unwrap();
    assert!(set_cookie.starts_with("access_token=ya29.a0Af;"));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Strict"));
    assert!(set_cookie.contains("Max-Age=3599"));

    let (_, _, body) = send(&app, get("/users")).await;
    assert_eq!(body["response"][0]["email"], "grace@example.com");

    let (_, _, body) = send(&app, with_json("POST", "/groups", &json!({"name": "Ops"}))).await;
    let group_id = body["response"]["id"].as_i64().unwrap();

    let (status, _, _) = send(&app, empty("PUT", &format!("/users/1098/groups/{group_id}"))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, _, body) = send(&app, get("/users/1098/groups")).await;
    assert_eq!(body["response"], json!([{"id": group_id, "name": "Ops"}]));

    let request = Request::builder()
        .uri("/auth/google/me")
        .header(header::COOKIE, "access_token=ya29.a0Af")
        .body(Body::empty())
        .unwrap();
    let (_, _, body) = send(&app, request).await;
    assert_eq!(body["response"]["name"], "Grace Hopper");
    assert_eq!(
        body["links"]["ProfileImage"]["url"],
        "https://lh3.example.com/grace.png"
    );
}

#[tokio::test]
async fn should_report_rejected_code_as_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid_grant"))
        .mount(&server)
        .await;
    let app = app_with_google(&server.uri()).await;

    let (status, headers, body) = send(&app, get("/auth/google?code=stale")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(headers.get(header::SET_COOKIE).is_none());
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .starts_with("Failed to get token: ")
    );

    let (_, _, body) = send(&app, get("/users")).await;
    assert_eq!(body["response"], json!([]));
}
