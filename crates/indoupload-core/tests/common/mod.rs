//! In-process fake of the content-management backend.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Multipart, State},
    http::{header, HeaderMap, HeaderName, StatusCode},
    response::{AppendHeaders, IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, task::JoinHandle};
use tracing_subscriber::EnvFilter;

use indoupload_core::{Config, TokenStore, UploadClient};

/// How the fake backend answers. `{n}` in a cookie is replaced by the
/// 1-based login count.
#[derive(Clone)]
pub struct Backend {
    pub login_status: StatusCode,
    pub login_body: Value,
    pub login_cookies: Vec<String>,
    pub upload_status: StatusCode,
    pub upload_body: Value,
}

impl Default for Backend {
    fn default() -> Self {
        Self {
            login_status: StatusCode::OK,
            login_body: json!({
                "status": "success",
                "data": {"id": 42, "email": "user@gmail.com"}
            }),
            login_cookies: vec![
                "sid=session-{n}; Path=/; HttpOnly".to_string(),
                "csrf=token-{n}; Path=/".to_string(),
            ],
            upload_status: StatusCode::OK,
            upload_body: json!({"status": "success", "data": sample_upload_result()}),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReceivedPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct ReceivedUpload {
    pub cookie: Option<String>,
    pub content_type: Option<String>,
    pub parts: Vec<ReceivedPart>,
}

struct BackendState {
    backend: Backend,
    logins: Mutex<Vec<Value>>,
    uploads: Mutex<Vec<ReceivedUpload>>,
}

pub struct TestServer {
    pub base_url: String,
    state: Arc<BackendState>,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub fn logins(&self) -> Vec<Value> {
        self.state.logins.lock().unwrap().clone()
    }

    pub fn uploads(&self) -> Vec<ReceivedUpload> {
        self.state.uploads.lock().unwrap().clone()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn sample_upload_result() -> Value {
    json!({
        "originalname": "photo.png",
        "size": 8,
        "mimetype": "image/png",
        "bucket": "cms-media",
        "key": "uploads/1718000000-photo.png",
        "acl": "public-read",
        "storageClass": "STANDARD",
        "location": "https://cms-media.s3.ap-southeast-1.amazonaws.com/uploads/1718000000-photo.png",
        "etag": "\"9b2cf535f27731c974343645a3985328\""
    })
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

pub async fn spawn_backend(backend: Backend) -> TestServer {
    init_tracing();

    let state = Arc::new(BackendState {
        backend,
        logins: Mutex::new(Vec::new()),
        uploads: Mutex::new(Vec::new()),
    });

    let app = Router::new()
        .route("/api/users/login", post(login))
        .route("/api/upload", post(upload))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind 127.0.0.1:0");
    let addr = listener.local_addr().expect("local addr");
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake backend crashed");
    });

    TestServer {
        base_url: format!("http://{}/api", addr),
        state,
        handle,
    }
}

/// Base URL of a loopback port with nothing listening on it.
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind 127.0.0.1:0");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}/api", port)
}

pub fn client_for(base_url: &str, store: Arc<dyn TokenStore>) -> UploadClient {
    let config = Config {
        base_url: base_url.to_string(),
        request_timeout_secs: 5,
        ..Config::default()
    };
    UploadClient::with_store(&config, store).expect("Failed to build client")
}

async fn login(State(state): State<Arc<BackendState>>, Json(body): Json<Value>) -> Response {
    let n = {
        let mut logins = state.logins.lock().unwrap();
        logins.push(body);
        logins.len()
    };

    let cookies: Vec<(HeaderName, String)> = state
        .backend
        .login_cookies
        .iter()
        .map(|c| (header::SET_COOKIE, c.replace("{n}", &n.to_string())))
        .collect();

    (
        state.backend.login_status,
        AppendHeaders(cookies),
        Json(state.backend.login_body.clone()),
    )
        .into_response()
}

async fn upload(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    let header_text = |name: HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    };

    let mut parts = Vec::new();
    while let Some(field) = multipart.next_field().await.expect("multipart field") {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(String::from);
        // Raw header text; `Field::content_type` drops values that are not valid MIME
        let content_type = field
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let bytes = field.bytes().await.expect("field bytes").to_vec();
        parts.push(ReceivedPart {
            name,
            file_name,
            content_type,
            bytes,
        });
    }

    state.uploads.lock().unwrap().push(ReceivedUpload {
        cookie: header_text(header::COOKIE),
        content_type: header_text(header::CONTENT_TYPE),
        parts,
    });

    (state.backend.upload_status, Json(state.backend.upload_body.clone())).into_response()
}
