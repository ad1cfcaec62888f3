use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use http::StatusCode;
use leptos_social_login::url::Url;
use leptos_social_login::AUTHENTICATION_HEADER;
use serde_json::json;
use std::sync::{Arc, Mutex};
use tokio::{net::TcpListener, task::JoinHandle};

pub struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// A request as the fake game backend saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct Received {
    pub method: &'static str,
    pub authentication: Option<String>,
    pub body: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default)]
pub struct RequestLog {
    pub requests: Arc<Mutex<Vec<Received>>>,
}

impl RequestLog {
    pub fn all(&self) -> Vec<Received> {
        self.requests.lock().unwrap().clone()
    }

    fn push(&self, method: &'static str, headers: &HeaderMap, body: Option<serde_json::Value>) {
        let authentication = headers
            .get(AUTHENTICATION_HEADER)
            .and_then(|it| it.to_str().ok())
            .map(str::to_owned);
        self.requests.lock().unwrap().push(Received {
            method,
            authentication,
            body,
        });
    }
}

/// Serves `POST /login`, `PATCH /user` and `GET /` on a random local port.
///
/// Social ids control the login outcome: "blocked" is rejected with a message, "broken" is
/// rejected without a body. Everyone else receives the session "Bearer xyz".
pub async fn start_game_backend() -> (Url, RequestLog, AbortOnDrop<()>) {
    let received = RequestLog::default();

    let router = Router::new()
        .route("/login", post(login))
        .route("/user", patch(update_user))
        .route("/", get(profile))
        .with_state(received.clone());

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("TcpListener");
    let addr = listener.local_addr().expect("local addr");

    let server_jh = tokio::spawn(async move {
        tracing::info!(%addr, "Serving fake game backend...");
        axum::serve(listener, router.into_make_service())
            .await
            .expect("Server to start successfully");
    });

    let url = Url::parse(&format!("http://{addr}")).expect("valid url");
    (url, received, AbortOnDrop(server_jh))
}

async fn login(
    State(received): State<RequestLog>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Response {
    let social_id = body["socialId"].as_str().unwrap_or_default().to_owned();
    received.push("POST /login", &headers, Some(body));

    match social_id.as_str() {
        "blocked" => (StatusCode::BAD_REQUEST, Json(json!({ "message": "blocked" }))).into_response(),
        "broken" => StatusCode::BAD_GATEWAY.into_response(),
        _ => (
            StatusCode::OK,
            Json(json!({ "data": { "tokenType": "Bearer", "token": "xyz" } })),
        )
            .into_response(),
    }
}

async fn update_user(
    State(received): State<RequestLog>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Response {
    received.push("PATCH /user", &headers, Some(body));
    (StatusCode::OK, Json(json!({ "data": {} }))).into_response()
}

async fn profile(State(received): State<RequestLog>, headers: HeaderMap) -> Response {
    received.push("GET /", &headers, None);

    match headers.get(AUTHENTICATION_HEADER).and_then(|it| it.to_str().ok()) {
        Some("Bearer xyz") => (
            StatusCode::OK,
            Json(json!({ "data": { "loginType": "google", "username": "Bob", "coins": 3 } })),
        )
            .into_response(),
        Some("Bearer legacy") => (
            StatusCode::OK,
            Json(json!({ "data": { "loginType": 3, "username": "Old Bob" } })),
        )
            .into_response(),
        _ => (StatusCode::UNAUTHORIZED, Json(json!({ "message": "unauthenticated" }))).into_response(),
    }
}
