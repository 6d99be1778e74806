use super::*;
use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct ServerState {
    seen_queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
    seen_accept: Arc<Mutex<Vec<Option<String>>>>,
}

async fn handle_list_sows(
    State(state): State<ServerState>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<Json<Value>, StatusCode> {
    state.seen_queries.lock().await.push(query.clone());
    state.seen_accept.lock().await.push(
        headers
            .get("accept")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
    );
    match query.get("charger_type_id").map(String::as_str) {
        Some("1") => Ok(Json(json!([
            {"id": 12, "title": "Quarterly PM"},
            {"id": 11, "title": null}
        ]))),
        Some("2") => Ok(Json(json!([]))),
        _ => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

async fn handle_sow_detail(Path(id): Path<String>) -> Result<Json<Value>, StatusCode> {
    match id.as_str() {
        "12" => Ok(Json(json!({
            "title": "Quarterly PM",
            "maintenance_scope": "Inspect cabinet",
            "parts": null
        }))),
        "bad" => Ok(Json(json!("not an object"))),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

async fn handle_customer_detail(Path(id): Path<String>) -> Result<Json<Value>, StatusCode> {
    match id.as_str() {
        "7" => Ok(Json(json!({
            "check_in_contact": "Dana",
            "check_out_phone": "555-0100"
        }))),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

async fn handle_charger_types() -> Json<Value> {
    Json(json!([{"id": 1, "name": "DC Fast"}, {"id": 2, "name": "Level 2"}]))
}

async fn handle_customers() -> Json<Value> {
    Json(json!([{"id": 7, "name": "Acme"}]))
}

async fn spawn_sow_server() -> (String, ServerState) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let state = ServerState::default();
    let app = Router::new()
        .route("/api/charger_types", get(handle_charger_types))
        .route("/api/customers", get(handle_customers))
        .route("/api/customers/:id", get(handle_customer_detail))
        .route("/api/sows", get(handle_list_sows))
        .route("/api/sows/:id", get(handle_sow_detail))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), state)
}

#[tokio::test]
async fn list_sows_sends_filter_and_accept_header() {
    let (server_url, state) = spawn_sow_server().await;
    let api = HttpSowApi::new(format!("{server_url}/"));

    let list = api
        .list_sows(&ChargerTypeId::new("1"))
        .await
        .expect("list sows");

    assert_eq!(list.len(), 2);
    assert_eq!(list[0].id, SowId::new("12"));
    assert_eq!(list[1].label(), "(untitled 11)");

    let queries = state.seen_queries.lock().await;
    assert_eq!(
        queries[0].get("charger_type_id").map(String::as_str),
        Some("1")
    );
    let accept = state.seen_accept.lock().await;
    assert_eq!(accept[0].as_deref(), Some("application/json"));
}

#[tokio::test]
async fn list_sows_empty_and_error_responses() {
    let (server_url, _state) = spawn_sow_server().await;
    let api = HttpSowApi::new(server_url);

    let empty = api
        .list_sows(&ChargerTypeId::new("2"))
        .await
        .expect("empty list");
    assert!(empty.is_empty());

    let err = api
        .list_sows(&ChargerTypeId::new("9"))
        .await
        .expect_err("server error");
    assert_eq!(err.status(), Some(500));
    assert!(err.url().ends_with("/api/sows"));
}

#[tokio::test]
async fn sow_detail_decodes_optional_fields() {
    let (server_url, _state) = spawn_sow_server().await;
    let api = HttpSowApi::new(server_url);

    let detail = api.sow_detail(&SowId::new("12")).await.expect("detail");
    assert_eq!(detail.title.as_deref(), Some("Quarterly PM"));
    assert_eq!(detail.maintenance_scope.as_deref(), Some("Inspect cabinet"));
    assert_eq!(detail.parts, None);

    let missing = api
        .sow_detail(&SowId::new("404"))
        .await
        .expect_err("missing sow");
    assert_eq!(missing.status(), Some(404));

    let malformed = api
        .sow_detail(&SowId::new("bad"))
        .await
        .expect_err("malformed body");
    assert!(matches!(malformed, NetworkError::Decode { .. }));
}

#[tokio::test]
async fn customer_detail_and_catalog() {
    let (server_url, _state) = spawn_sow_server().await;
    let api = HttpSowApi::new(server_url);

    let customer = api
        .customer_detail(&CustomerId::new("7"))
        .await
        .expect("customer");
    assert_eq!(customer.check_in_contact.as_deref(), Some("Dana"));
    assert_eq!(customer.check_out_phone.as_deref(), Some("555-0100"));

    let charger_types = api.list_charger_types().await.expect("charger types");
    assert_eq!(charger_types.len(), 2);
    assert_eq!(charger_types[0].id, ChargerTypeId::new("1"));

    let customers = api.list_customers().await.expect("customers");
    assert_eq!(customers[0].name.as_deref(), Some("Acme"));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let api = HttpSowApi::new(format!("http://{addr}"));
    let err = api.list_charger_types().await.expect_err("refused");
    assert!(matches!(err, NetworkError::Transport { .. }));
}

#[test]
fn path_segments_are_percent_encoded() {
    assert_eq!(encode_segment("12"), "12");
    assert_eq!(encode_segment("a b/c"), "a%20b%2Fc");
}
