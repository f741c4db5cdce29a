//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use dochub_api::AppState;
use dochub_core::config::AppConfig;
use dochub_core::config::storage::{LocalStorageConfig, StorageConfig};
use dochub_database::Stores;
use dochub_storage::StorageManager;

const BOUNDARY: &str = "dochub-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Stored bytes, for direct inspection
    pub storage: Arc<StorageManager>,
    _dir: TempDir,
}

impl TestApp {
    /// Create a new test application on the in-memory backend
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = AppConfig {
            storage: StorageConfig {
                local: LocalStorageConfig {
                    root_path: dir.path().to_string_lossy().to_string(),
                },
                ..Default::default()
            },
            ..Default::default()
        };

        let storage = Arc::new(
            StorageManager::from_config(&config.storage)
                .await
                .expect("Failed to init storage"),
        );
        let state = AppState::new(config, Stores::in_memory(), storage.clone());

        Self {
            router: dochub_api::build_app(state),
            storage,
            _dir: dir,
        }
    }

    /// Make a JSON (or empty) request
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .header("X-Actor", "tester");

        let body = body
            .map(|b| Body::from(serde_json::to_vec(&b).expect("Failed to serialize body")))
            .unwrap_or_else(Body::empty);

        self.send(req.body(body).expect("Failed to build request")).await
    }

    /// Make a multipart request
    pub async fn multipart(&self, method: &str, path: &str, form: Multipart) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(form.finish()))
            .expect("Failed to build request");
        self.send(req).await
    }

    /// Raw GET, returning status and body bytes
    pub async fn get_bytes(&self, path: &str) -> (StatusCode, Vec<u8>) {
        let req = Request::builder()
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        (status, bytes.to_vec())
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Create a department; returns its JSON
    pub async fn create_department(&self, name: &str) -> Value {
        let form = Multipart::new().text("name", name).text("alias", &name[..2]);
        let response = self.multipart("POST", "/departments", form).await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body
    }

    /// Create a folder under a department slug; returns its JSON
    pub async fn create_folder(&self, department_slug: &str, name: &str) -> Value {
        let response = self
            .request(
                "POST",
                &format!("/departments/{department_slug}/folders"),
                Some(serde_json::json!({ "folderName": name })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body
    }

    /// Upload a small PDF into a folder; returns the file JSON
    pub async fn upload_pdf(&self, folder: &str, name: &str) -> Value {
        let form = Multipart::new().file("file", name, "application/pdf", b"%PDF-1.4 test");
        let response = self
            .multipart("POST", &format!("/folders/{folder}/files"), form)
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

/// Hand-built `multipart/form-data` body
#[derive(Debug, Default)]
pub struct Multipart {
    body: Vec<u8>,
}

impl Multipart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.body
    }
}
