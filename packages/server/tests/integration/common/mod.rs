use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

// Leading `::` keeps the shared crate distinct from this test module's name.
use ::common::storage::FilesystemDocumentStore;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tempfile::TempDir;

use server::config::{
    AppConfig, CorsConfig, DatabaseConfig, ServerConfig, StorageConfig,
};
use server::state::AppState;

pub mod routes {
    pub const REGISTER: &str = "/register";
    pub const REGISTRATIONS: &str = "/registrations";

    pub fn registration(id: i32) -> String {
        format!("/registrations/{id}")
    }

    pub fn upload(file_name: &str) -> String {
        format!("/uploads/{file_name}")
    }
}

/// A running test server backed by a temp-dir SQLite database and uploads
/// directory.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub uploads_dir: PathBuf,
    _dir: TempDir,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());
        let uploads_dir = dir.path().join("uploads");

        let db = server::database::init_db(&db_url)
            .await
            .expect("Failed to initialize test database");

        let documents = Arc::new(
            FilesystemDocumentStore::new(uploads_dir.clone(), 10 * 1024 * 1024)
                .await
                .expect("Failed to initialize test uploads directory"),
        );

        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors: CorsConfig {
                    allow_origins: vec![],
                    max_age: 3600,
                },
            },
            database: DatabaseConfig { url: db_url },
            storage: StorageConfig {
                uploads_dir: uploads_dir.clone(),
                max_upload_size: 10 * 1024 * 1024,
            },
        };

        let state = AppState {
            db,
            documents,
            config,
        };
        let app = server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            uploads_dir,
            _dir: dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn post_multipart(&self, path: &str, form: Form) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn put_multipart(&self, path: &str, form: Form) -> TestResponse {
        let res = self
            .client
            .put(self.url(path))
            .multipart(form)
            .send()
            .await
            .expect("Failed to send PUT request");

        TestResponse::from_response(res).await
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to send DELETE request");

        TestResponse::from_response(res).await
    }

    /// Create a registration and return its record from the list endpoint.
    pub async fn register(&self, first_name: &str, file: Option<(&str, Vec<u8>)>) -> Value {
        let res = self
            .post_multipart(routes::REGISTER, registration_form(first_name, file))
            .await;
        assert_eq!(res.status, 200, "register failed: {}", res.text);

        let list = self.get(routes::REGISTRATIONS).await;
        assert_eq!(list.status, 200, "list failed: {}", list.text);
        list.records()
            .into_iter()
            .rev()
            .find(|r| r["firstName"] == first_name)
            .expect("registered record should appear in the list")
    }

    /// Names of the files currently in the uploads directory.
    pub fn stored_files(&self) -> Vec<String> {
        std::fs::read_dir(&self.uploads_dir)
            .expect("uploads dir should exist")
            .filter_map(Result::ok)
            .map(|e| e.file_name().to_string_lossy().to_string())
            .filter(|name| name != ".tmp")
            .collect()
    }
}

/// A complete, valid registration form. `first_name` is the distinguishing
/// field; everything else is boilerplate.
pub fn registration_form(first_name: &str, file: Option<(&str, Vec<u8>)>) -> Form {
    let mut form = Form::new()
        .text("firstName", first_name.to_string())
        .text("lastName", "Tester")
        .text("email", "tester@example.com")
        .text("contact", "5550001234")
        .text("qualification", "B.Sc. Testing")
        .text("gender", "other");

    if let Some((name, bytes)) = file {
        form = form.part("file", Part::bytes(bytes).file_name(name.to_string()));
    }

    form
}

impl TestResponse {
    pub async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let text = res.text().await.unwrap_or_default();
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self { status, text, body }
    }

    /// The response body as an array of records.
    pub fn records(&self) -> Vec<Value> {
        self.body
            .as_array()
            .expect("response body should be an array")
            .clone()
    }
}
