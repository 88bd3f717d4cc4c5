//! Integration tests: gateway against an in-process mock flow store.
//!
//! The mock answers the five fixed query documents and records every
//! document it receives, so these tests verify both behavior (round-trip,
//! idempotent delete, wholesale update) and the binding contract: request
//! values must arrive in `variables`, never spliced into the document.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use flowd_gateway::{
    config::GatewayConfig,
    routes::{create_router, AppState},
};
use flowd_sandbox::{ProgramRunner, SandboxConfig};
use flowd_store::{graphql, FlowStore};

// ── Mock store ────────────────────────────────────────────────────────────────

#[derive(Default)]
struct MockStore {
    flows: HashMap<String, (String, String)>,
    next_id: u64,
    documents_seen: Vec<String>,
}

type SharedMock = Arc<Mutex<MockStore>>;

fn lock(mock: &SharedMock) -> std::sync::MutexGuard<'_, MockStore> {
    match mock.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

async fn graphql_endpoint(State(mock): State<SharedMock>, Json(req): Json<Value>) -> Json<Value> {
    let query = req["query"].as_str().unwrap_or_default().to_owned();
    let vars = &req["variables"];
    let mut store = lock(&mock);
    store.documents_seen.push(query.clone());

    let data = match query.as_str() {
        graphql::LIST_FLOWS => {
            let flows: Vec<Value> = store
                .flows
                .iter()
                .map(|(id, (title, content))| {
                    json!({"id": id, "title": title, "content": content})
                })
                .collect();
            json!({"queryFlow": flows})
        }
        graphql::GET_FLOW => {
            let id = vars["id"].as_str().unwrap_or_default();
            match store.flows.get(id) {
                Some((title, content)) => {
                    json!({"getFlow": {"id": id, "title": title, "content": content}})
                }
                None => json!({"getFlow": null}),
            }
        }
        graphql::ADD_FLOW => {
            store.next_id += 1;
            let id = format!("0x{:x}", store.next_id);
            let title = vars["input"][0]["title"].as_str().unwrap_or_default().to_owned();
            let content = vars["input"][0]["content"].as_str().unwrap_or_default().to_owned();
            store.flows.insert(id, (title, content));
            json!({"addFlow": {"numUids": 1}})
        }
        graphql::UPDATE_FLOW => {
            let id = vars["input"]["filter"]["id"][0].as_str().unwrap_or_default();
            let title = vars["input"]["set"]["title"].as_str().unwrap_or_default().to_owned();
            let content = vars["input"]["set"]["content"].as_str().unwrap_or_default().to_owned();
            let updated = u64::from(store.flows.contains_key(id));
            if updated == 1 {
                store.flows.insert(id.to_owned(), (title, content));
            }
            json!({"updateFlow": {"numUids": updated}})
        }
        graphql::DELETE_FLOW => {
            let id = vars["filter"]["id"][0].as_str().unwrap_or_default();
            match store.flows.remove(id) {
                Some(_) => json!({"deleteFlow": {"flow": [{"id": id}], "numUids": 1}}),
                None => json!({"deleteFlow": {"flow": null, "numUids": 0}}),
            }
        }
        _ => return Json(json!({"errors": [{"message": "unexpected query document"}]})),
    };

    Json(json!({"data": data}))
}

// ── Harness ───────────────────────────────────────────────────────────────────

async fn gateway_with_mock_store() -> (Router, SharedMock) {
    let mock: SharedMock = Arc::new(Mutex::new(MockStore::default()));
    let store_app = Router::new()
        .route("/graphql", post(graphql_endpoint))
        .with_state(Arc::clone(&mock));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock store");
    let addr = listener.local_addr().expect("mock store addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, store_app).await;
    });

    let store = FlowStore::new(&format!("http://{addr}/graphql")).expect("store client");
    let mut sandbox = SandboxConfig::new("/bin/sh".into());
    sandbox.timeout = Duration::from_secs(5);
    let state = Arc::new(AppState { store, runner: Arc::new(ProgramRunner::new(sandbox)) });

    (create_router(state, &GatewayConfig::default()), mock)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("request")
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.expect("handler error");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    // Non-JSON bodies (the plain-text greeting) decode to Null.
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

const HOSTILE_TITLE: &str = "\"}) { deleteFlow(filter: {}) { numUids } } #";
const HOSTILE_CONTENT: &str = "line one\nline two \\\" } mutation {";

#[tokio::test]
async fn create_then_get_round_trips_metacharacters() {
    let (app, mock) = gateway_with_mock_store().await;

    let (status, body) = send(
        &app,
        json_request("POST", "/flows", json!({"title": HOSTILE_TITLE, "content": HOSTILE_CONTENT})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["addFlow"]["numUids"], 1);

    let (status, body) = send(&app, get_request("/flows/0x1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["getFlow"]["title"], HOSTILE_TITLE);
    assert_eq!(body["getFlow"]["content"], HOSTILE_CONTENT);

    // The binding contract: every document the store saw is byte-identical
    // to one of the published constants, with no request value spliced in.
    let store = lock(&mock);
    for doc in &store.documents_seen {
        assert!(
            [
                graphql::LIST_FLOWS,
                graphql::GET_FLOW,
                graphql::ADD_FLOW,
                graphql::UPDATE_FLOW,
                graphql::DELETE_FLOW,
            ]
            .contains(&doc.as_str()),
            "non-constant document reached the store: {doc}"
        );
        assert!(!doc.contains("deleteFlow(filter: {})"), "title text leaked into document");
    }
}

#[tokio::test]
async fn list_reflects_created_flows() {
    let (app, _mock) = gateway_with_mock_store().await;

    let (status, _) = send(
        &app,
        json_request("POST", "/flows", json!({"title": "alpha", "content": "echo a"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, get_request("/flows")).await;
    assert_eq!(status, StatusCode::OK);
    let flows = body["queryFlow"].as_array().expect("queryFlow array");
    assert_eq!(flows.len(), 1);
    assert_eq!(flows[0]["title"], "alpha");
}

#[tokio::test]
async fn update_replaces_title_and_content_wholesale() {
    let (app, _mock) = gateway_with_mock_store().await;

    send(
        &app,
        json_request("POST", "/flows", json!({"title": "before", "content": "old"})),
    )
    .await;

    let (status, body) = send(
        &app,
        json_request("PUT", "/flows/0x1", json!({"title": "after", "content": "new"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updateFlow"]["numUids"], 1);

    let (_, body) = send(&app, get_request("/flows/0x1")).await;
    assert_eq!(body["getFlow"]["title"], "after");
    assert_eq!(body["getFlow"]["content"], "new");
}

#[tokio::test]
async fn delete_of_unknown_id_is_an_empty_result_not_an_error() {
    let (app, _mock) = gateway_with_mock_store().await;

    send(
        &app,
        json_request("POST", "/flows", json!({"title": "keep", "content": "me"})),
    )
    .await;

    let (status, body) = send(
        &app,
        Request::builder()
            .method("DELETE")
            .uri("/flows/0xdead")
            .body(Body::empty())
            .expect("request"),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "idempotent delete must not error");
    assert_eq!(body["deleteFlow"]["numUids"], 0);
    assert!(body["deleteFlow"]["flow"].is_null());

    // Unrelated records are untouched.
    let (_, body) = send(&app, get_request("/flows")).await;
    assert_eq!(body["queryFlow"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn missing_fields_are_accepted_as_empty_strings() {
    let (app, _mock) = gateway_with_mock_store().await;

    let (status, body) = send(&app, json_request("POST", "/flows", json!({}))).await;
    assert_eq!(status, StatusCode::OK, "permissive create must accept an empty body");
    assert_eq!(body["addFlow"]["numUids"], 1);

    let (_, body) = send(&app, get_request("/flows/0x1")).await;
    assert_eq!(body["getFlow"]["title"], "");
    assert_eq!(body["getFlow"]["content"], "");
}

#[tokio::test]
async fn concurrent_creates_never_interleave_field_values() {
    let (app, _mock) = gateway_with_mock_store().await;

    let first = send(
        &app,
        json_request("POST", "/flows", json!({"title": "t-one", "content": "c-one"})),
    );
    let second = send(
        &app,
        json_request("POST", "/flows", json!({"title": "t-two", "content": "c-two"})),
    );
    let ((s1, _), (s2, _)) = tokio::join!(first, second);
    assert_eq!(s1, StatusCode::OK);
    assert_eq!(s2, StatusCode::OK);

    let (_, body) = send(&app, get_request("/flows")).await;
    let flows = body["queryFlow"].as_array().expect("queryFlow array");
    let pairs: Vec<(String, String)> = flows
        .iter()
        .map(|f| {
            (
                f["title"].as_str().unwrap_or_default().to_owned(),
                f["content"].as_str().unwrap_or_default().to_owned(),
            )
        })
        .collect();
    assert!(pairs.contains(&("t-one".to_owned(), "c-one".to_owned())));
    assert!(pairs.contains(&("t-two".to_owned(), "c-two".to_owned())));
    for (title, content) in &pairs {
        let hybrid = (title == "t-one") != (content == "c-one");
        assert!(!hybrid, "hybrid record detected: {title}/{content}");
    }
}

#[tokio::test]
async fn store_protocol_errors_become_bad_gateway() {
    // A store answering with GraphQL errors (no data) must surface as 502,
    // not crash the service.
    let mock: SharedMock = Arc::new(Mutex::new(MockStore::default()));
    let store_app = Router::new()
        .route(
            "/graphql",
            post(|| async { Json(json!({"errors": [{"message": "schema mismatch"}]})) }),
        )
        .with_state(Arc::clone(&mock));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock store");
    let addr = listener.local_addr().expect("mock store addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, store_app).await;
    });

    let store = FlowStore::new(&format!("http://{addr}/graphql")).expect("store client");
    let state = Arc::new(AppState {
        store,
        runner: Arc::new(ProgramRunner::new(SandboxConfig::new("/bin/sh".into()))),
    });
    let app = create_router(state, &GatewayConfig::default());

    let (status, _) = send(&app, get_request("/flows")).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    // And the service keeps serving afterwards.
    let (status, _) = send(&app, get_request("/")).await;
    assert_eq!(status, StatusCode::OK);
}
