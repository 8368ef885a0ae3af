//! Integration test harness for the Nebula storefront.
//!
//! Each [`TestContext`] starts a mock authentication API and a storefront
//! on ephemeral localhost ports, plus a cookie-keeping client that does
//! not follow redirects so tests can assert on them.
//!
//! The mock API accepts any email with [`VALID_PASSWORD`], issuing
//! [`MOCK_TOKEN`], and rejects everything else with
//! [`REJECTION_MESSAGE`].

#![allow(clippy::missing_panics_doc)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use nebula_core::Catalog;
use nebula_storefront::config::{AuthApiConfig, CatalogConfig, StorefrontConfig};
use nebula_storefront::state::AppState;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use url::Url;

/// Password the mock API accepts.
pub const VALID_PASSWORD: &str = "correct-horse";

/// Token the mock API issues.
pub const MOCK_TOKEN: &str = "tok-nebula-123";

/// Message the mock API sends on rejection.
pub const REJECTION_MESSAGE: &str = "Invalid credentials";

/// Seed for the test catalog.
pub const TEST_SEED: u64 = 42;

#[derive(Deserialize)]
struct LoginBody {
    email: String,
    password: String,
}

/// Emails received by the mock authentication API, in arrival order.
pub type ReceivedEmails = Arc<Mutex<Vec<String>>>;

async fn mock_login(
    State(received): State<ReceivedEmails>,
    Json(body): Json<LoginBody>,
) -> (StatusCode, Json<Value>) {
    received
        .lock()
        .expect("Mock auth API lock poisoned")
        .push(body.email.clone());

    if body.password == VALID_PASSWORD && !body.email.is_empty() {
        (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Login successful",
                "data": { "tokens": MOCK_TOKEN }
            })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": REJECTION_MESSAGE })),
        )
    }
}

/// Start the mock authentication API and return its base URL and a log
/// of the emails it receives.
pub async fn spawn_mock_auth_api() -> (Url, ReceivedEmails) {
    let received = ReceivedEmails::default();
    let app = Router::new()
        .route("/login", post(mock_login))
        .with_state(received.clone());
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock auth API");
    let addr = listener.local_addr().expect("Mock auth API has no address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    let url = Url::parse(&format!("http://{addr}/")).expect("Mock auth API URL is valid");
    (url, received)
}

/// A base URL where nothing is listening.
pub async fn unreachable_auth_api() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to reserve a port");
    let addr = listener.local_addr().expect("Reserved port has no address");
    drop(listener);
    Url::parse(&format!("http://{addr}/")).expect("Unreachable URL is valid")
}

/// Storefront configuration for tests.
#[must_use]
pub fn test_config(auth_api: Url) -> StorefrontConfig {
    StorefrontConfig {
        host: [127, 0, 0, 1].into(),
        port: 0,
        base_url: "http://localhost".to_string(),
        auth: AuthApiConfig { base_url: auth_api },
        catalog: CatalogConfig {
            seed: TEST_SEED,
            ..CatalogConfig::default()
        },
        static_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../storefront/static")),
        trusted_proxies: Vec::new(),
        sentry_dsn: None,
        sentry_environment: None,
    }
}

/// A running storefront plus a client bound to it.
pub struct TestContext {
    pub client: reqwest::Client,
    pub base_url: String,
    pub catalog: Catalog,
    received_emails: ReceivedEmails,
}

impl TestContext {
    /// Storefront backed by the mock authentication API.
    pub async fn new() -> Self {
        let (auth_api, received_emails) = spawn_mock_auth_api().await;
        Self::with_auth_api(auth_api, received_emails).await
    }

    /// Storefront whose authentication API is down.
    pub async fn offline() -> Self {
        let auth_api = unreachable_auth_api().await;
        Self::with_auth_api(auth_api, ReceivedEmails::default()).await
    }

    async fn with_auth_api(auth_api: Url, received_emails: ReceivedEmails) -> Self {
        let config = test_config(auth_api);
        let catalog = Catalog::generate(config.catalog.size, config.catalog.seed);
        let state = AppState::with_catalog(config, catalog.clone());
        let app = nebula_storefront::app(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind storefront");
        let addr = listener.local_addr().expect("Storefront has no address");
        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .ok();
        });

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: format!("http://{addr}"),
            catalog,
            received_emails,
        }
    }

    /// Emails the mock authentication API has received so far.
    #[must_use]
    pub fn received_emails(&self) -> Vec<String> {
        self.received_emails
            .lock()
            .expect("Mock auth API lock poisoned")
            .clone()
    }

    /// Absolute URL for a storefront path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET a page and return status and body.
    pub async fn get(&self, path: &str) -> (reqwest::StatusCode, String) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("GET failed");
        let status = resp.status();
        (status, resp.text().await.expect("Failed to read body"))
    }

    /// POST a form and return the raw response.
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST failed")
    }
}

/// The `Location` header of a redirect response.
#[must_use]
pub fn location(resp: &reqwest::Response) -> Option<String> {
    resp.headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}
