//! Mock image service shared by the integration tests.

#![allow(dead_code)]

use std::{
    net::SocketAddr,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::{Value, json};
use url::Url;

#[derive(Clone, Copy)]
pub enum Reply {
    /// `{"images": ["<prompt>-<n>.png"]}` for the n-th call.
    OneImage,
    /// A fixed pair of images.
    TwoImages,
    /// An HTML error page with status 502.
    BadGateway,
    /// Valid JSON without an `images` field.
    NoImages,
}

#[derive(Clone)]
pub struct MockService {
    reply: Reply,
    calls: Arc<AtomicUsize>,
    bodies: Arc<Mutex<Vec<Value>>>,
    content_types: Arc<Mutex<Vec<String>>>,
}

impl MockService {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn bodies(&self) -> Vec<Value> {
        self.bodies.lock().unwrap().clone()
    }

    pub fn content_types(&self) -> Vec<String> {
        self.content_types.lock().unwrap().clone()
    }
}

async fn generate(
    State(mock): State<MockService>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let n = mock.calls.fetch_add(1, Ordering::SeqCst) + 1;
    let content_type = headers
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    mock.content_types.lock().unwrap().push(content_type);
    let prompt = body["prompt"].as_str().unwrap_or_default().to_string();
    mock.bodies.lock().unwrap().push(body);

    match mock.reply {
        Reply::OneImage => Json(json!({ "images": [format!("{prompt}-{n}.png")] })).into_response(),
        Reply::TwoImages => Json(json!({ "images": ["a.png", "b.png"] })).into_response(),
        Reply::BadGateway => (StatusCode::BAD_GATEWAY, "<html>bad gateway</html>").into_response(),
        Reply::NoImages => Json(json!({ "error": "quota exceeded" })).into_response(),
    }
}

pub async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Starts a mock image service and returns it with its endpoint URL.
pub async fn start_mock(reply: Reply) -> (MockService, Url) {
    let mock = MockService {
        reply,
        calls: Arc::new(AtomicUsize::new(0)),
        bodies: Arc::new(Mutex::new(Vec::new())),
        content_types: Arc::new(Mutex::new(Vec::new())),
    };
    let router = Router::new()
        .route("/v1/generate", post(generate))
        .with_state(mock.clone());
    let addr = serve(router).await;
    let endpoint = Url::parse(&format!("http://{addr}/v1/generate")).unwrap();
    (mock, endpoint)
}
