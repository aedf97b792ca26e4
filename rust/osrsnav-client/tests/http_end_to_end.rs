mod common;

use std::net::SocketAddr;

use axum::http::StatusCode;
use common::{build_router, MockService};
use osrsnav_client::{ClientConfig, NavClient};
use osrsnav_core::{Coordinate, GameState};
use serde_json::json;

async fn serve(svc: std::sync::Arc<MockService>) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, build_router(svc)).await.expect("server error");
    });
    addr
}

#[tokio::test]
async fn degenerate_route_over_http_is_empty_not_absent() {
    let svc = MockService::new(json!({"varps": [], "varbits": [], "items": [], "skills": []}), StatusCode::OK, json!([]));
    let addr = serve(svc.clone()).await;
    let client = NavClient::new(ClientConfig::default().with_base_url(format!("http://{addr}"))).unwrap();

    let tile = Coordinate::new(3164, 3484, 0);
    let route = client.request_path(tile, tile, GameState::default()).await;
    assert_eq!(route, Some(vec![]));
    assert_eq!(svc.path_calls(), 1);

    let sel = client.get_selection().await.unwrap();
    assert!(sel.varps.is_empty() && sel.items.is_empty());
}

#[tokio::test]
async fn http_500_over_the_wire_is_absent() {
    let svc = MockService::new(json!({}), StatusCode::INTERNAL_SERVER_ERROR, json!("planner crashed"));
    let addr = serve(svc).await;
    let client = NavClient::new(ClientConfig::default().with_base_url(format!("http://{addr}/"))).unwrap();

    let tile = Coordinate::new(3164, 3484, 0);
    assert!(client.request_path(tile, tile, GameState::default()).await.is_none());
}

#[tokio::test]
async fn closed_port_is_absent() {
    // bind then drop to get a port nobody listens on
    let addr = {
        let l = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        l.local_addr().unwrap()
    };
    let client = NavClient::new(ClientConfig { base_url: format!("http://{addr}"), timeout_ms: Some(2_000) }).unwrap();
    let tile = Coordinate::new(3164, 3484, 0);
    assert!(client.request_path(tile, tile, GameState::default()).await.is_none());
    assert!(client.get_selection().await.is_none());
}
