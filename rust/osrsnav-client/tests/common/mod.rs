#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::State;
use axum::http::{self, StatusCode};
use axum::response::{IntoResponse, Response as AxumResponse};
use axum::routing::{get, post};
use axum::{Json, Router};
use http_body_util::BodyExt;
use osrsnav_client::{Method, NavError, Request, Response, Transport};
use serde_json::Value;
use tower::ServiceExt; // for `oneshot`

/// Scripted stand-in for the path service.
pub struct MockService {
    /// Number of leading `/select` calls answered with 500.
    pub select_failures: usize,
    pub selection: Value,
    pub path_status: StatusCode,
    pub path_body: Value,
    pub select_calls: AtomicUsize,
    pub path_calls: AtomicUsize,
    pub last_path_request: Mutex<Option<Value>>,
}

impl MockService {
    pub fn new(selection: Value, path_status: StatusCode, path_body: Value) -> Arc<Self> {
        Arc::new(Self {
            select_failures: 0,
            selection,
            path_status,
            path_body,
            select_calls: AtomicUsize::new(0),
            path_calls: AtomicUsize::new(0),
            last_path_request: Mutex::new(None),
        })
    }

    pub fn select_calls(&self) -> usize { self.select_calls.load(Ordering::SeqCst) }

    pub fn path_calls(&self) -> usize { self.path_calls.load(Ordering::SeqCst) }

    pub fn last_path_request(&self) -> Option<Value> { self.last_path_request.lock().unwrap().clone() }
}

async fn select(State(svc): State<Arc<MockService>>) -> AxumResponse {
    let n = svc.select_calls.fetch_add(1, Ordering::SeqCst);
    if n < svc.select_failures {
        return (StatusCode::INTERNAL_SERVER_ERROR, "selection not ready").into_response();
    }
    (StatusCode::OK, Json(svc.selection.clone())).into_response()
}

async fn path(State(svc): State<Arc<MockService>>, Json(body): Json<Value>) -> AxumResponse {
    svc.path_calls.fetch_add(1, Ordering::SeqCst);
    *svc.last_path_request.lock().unwrap() = Some(body);
    (svc.path_status, Json(svc.path_body.clone())).into_response()
}

pub fn build_router(svc: Arc<MockService>) -> Router {
    Router::new()
        .route("/select", get(select))
        .route("/path", post(path))
        .with_state(svc)
}

/// Drives requests straight into an axum router, no socket involved.
#[derive(Clone, Debug)]
pub struct RouterTransport {
    router: Router,
}

impl RouterTransport {
    pub fn new(svc: Arc<MockService>) -> Self { Self { router: build_router(svc) } }
}

impl Transport for RouterTransport {
    async fn send(&self, request: Request) -> Result<Response, NavError> {
        let method = match request.method {
            Method::Get => http::Method::GET,
            Method::Post => http::Method::POST,
        };
        let req = http::Request::builder()
            .method(method)
            .uri(request.path)
            .header("content-type", "application/json")
            .body(Body::from(request.body.unwrap_or_default()))
            .map_err(|e| NavError::Transport(e.to_string()))?;
        let res = self.router.clone().oneshot(req).await.map_err(|e| NavError::Transport(e.to_string()))?;
        let status = res.status().as_u16();
        let bytes = res
            .into_body()
            .collect()
            .await
            .map_err(|e| NavError::Transport(e.to_string()))?
            .to_bytes();
        Ok(Response { status, body: bytes.to_vec() })
    }
}

/// Transport whose every request fails before reaching a server.
#[derive(Clone, Debug, Default)]
pub struct Unreachable;

impl Transport for Unreachable {
    async fn send(&self, _request: Request) -> Result<Response, NavError> {
        Err(NavError::Transport("connection refused".into()))
    }
}
