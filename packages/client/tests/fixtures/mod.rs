//! Test fixtures shared by the integration tests.
//!
//! `TestServer` serves an axum router on an ephemeral port and records every
//! request it sees, so tests can assert on what the client sent.

#![allow(dead_code)]

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Router,
    extract::{Request, State},
    http::header,
    middleware::{self, Next},
    response::Response,
};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use surveypro_client::{
    domain::{LoginPrompt, LoginReason, SessionStore},
    infrastructure::ApiClient,
};
use tokio::{net::TcpListener, task::JoinHandle};

/// One request as seen by the fake API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
}

#[derive(Clone, Default)]
struct Recorder {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

async fn record(State(recorder): State<Recorder>, request: Request, next: Next) -> Response {
    let recorded = RecordedRequest {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        authorization: request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    };
    recorder.requests.lock().unwrap().push(recorded);
    next.run(request).await
}

/// Fake SurveyPro API running in the background
pub struct TestServer {
    base_url: String,
    recorder: Recorder,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Serve `router` on 127.0.0.1 with an OS-assigned port
    pub async fn start(router: Router) -> Self {
        let recorder = Recorder::default();
        let app = router.layer(middleware::from_fn_with_state(recorder.clone(), record));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test server");
        let addr = listener.local_addr().expect("Failed to read local address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server failed");
        });

        Self {
            base_url: format!("http://{addr}"),
            recorder,
            handle,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Every request received so far, in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.recorder.requests.lock().unwrap().clone()
    }

    /// Number of requests received for `method` and `path`
    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// API client pointed at the test server
pub fn api_client(server: &TestServer, store: Arc<dyn SessionStore>) -> Arc<ApiClient> {
    Arc::new(
        ApiClient::new(server.base_url(), Duration::from_secs(5), store)
            .expect("Failed to build API client"),
    )
}

/// Unsigned JWT with the given `exp`
pub fn jwt_with_exp(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"u1","exp":{exp}}}"#));
    format!("{header}.{payload}.sig")
}

/// Login prompt that remembers why it was opened
#[derive(Default)]
pub struct RecordingPrompt {
    reasons: Mutex<Vec<LoginReason>>,
}

impl RecordingPrompt {
    pub fn reasons(&self) -> Vec<LoginReason> {
        self.reasons.lock().unwrap().clone()
    }
}

impl LoginPrompt for RecordingPrompt {
    fn open(&self, reason: LoginReason) {
        self.reasons.lock().unwrap().push(reason);
    }
}
