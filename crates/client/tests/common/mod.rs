//! In-process fake of the box API for integration tests.
//!
//! Serves the routes the client calls from in-memory state on an ephemeral
//! port, logs every request, and can be told to answer a given route with
//! a canned failure.
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{Path, Query, Request, State};
use axum::http::{Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use hntr_client::api::HntrApi;
use hntr_client::retry::RetryConfig;
use hntr_core::filter::FilterTerm;

/// One request as seen by the fake.
#[derive(Debug, Clone)]
pub struct Logged {
    pub method: Method,
    /// Path without the `/api` prefix.
    pub path: String,
    pub query: Option<String>,
}

#[derive(Default)]
struct Inner {
    boxes: HashMap<Uuid, Value>,
    records: HashMap<(Uuid, String), Vec<Value>>,
    automations: HashMap<Uuid, Value>,
    events: HashMap<Uuid, Vec<Value>>,
    library: Vec<Value>,
    requests: Vec<Logged>,
    /// Last JSON or text body received per `"METHOD /path"`.
    bodies: HashMap<String, Value>,
    /// Canned answers per `"METHOD /path"`.
    failures: HashMap<String, (StatusCode, Value)>,
}

#[derive(Clone, Default)]
pub struct FakeState {
    inner: Arc<Mutex<Inner>>,
}

impl FakeState {
    fn with<R>(&self, f: impl FnOnce(&mut Inner) -> R) -> R {
        f(&mut self.inner.lock().unwrap())
    }

    fn record_body(&self, method: &str, path: String, body: Value) {
        self.with(|s| s.bodies.insert(format!("{method} {path}"), body));
    }
}

pub struct FakeBackend {
    pub addr: SocketAddr,
    pub state: FakeState,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let state = FakeState::default();
        let app = router(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Client with a short timeout and no retries.
    pub fn api(&self) -> HntrApi {
        self.api_with_retry(RetryConfig::none())
    }

    pub fn api_with_retry(&self, retry: RetryConfig) -> HntrApi {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        HntrApi::with_client(client, &self.base_url(), retry).unwrap()
    }

    // ---- seeding ----

    pub fn seed_box(&self, name: &str, containers: &[&str]) -> Uuid {
        let id = Uuid::new_v4();
        self.state.with(|s| {
            s.boxes.insert(
                id,
                json!({ "id": id, "name": name, "containers": containers, "created_at": Utc::now() }),
            )
        });
        id
    }

    pub fn seed_records(&self, box_id: Uuid, container: &str, data: &[&str], tags: &[&str]) {
        self.state.with(|s| {
            let rows = s.records.entry((box_id, container.to_string())).or_default();
            for d in data {
                rows.push(new_record(d, tags.iter().map(|t| t.to_string()).collect()));
            }
        });
    }

    pub fn seed_automation(&self, box_id: Uuid, name: &str, source_count: u64) -> Uuid {
        let id = Uuid::new_v4();
        self.state.with(|s| {
            s.automations.insert(
                id,
                json!({
                    "id": id,
                    "box_id": box_id,
                    "name": name,
                    "description": "",
                    "command": "echo {data}",
                    "source_container": "hostnames",
                    "source_tags": null,
                    "destination_container": "urls",
                    "destination_tags": ["http"],
                    "source_count": source_count,
                }),
            )
        });
        id
    }

    pub fn seed_events(&self, automation_id: Uuid, n: usize, status: &str) {
        self.state.with(|s| {
            let events = s.events.entry(automation_id).or_default();
            for _ in 0..n {
                let next = events.len() + 1;
                events.push(new_event(next, status));
            }
        });
    }

    pub fn seed_library(&self, entries: Vec<Value>) {
        self.state.with(|s| s.library = entries);
    }

    /// Answer `method path` (path without `/api`) with `status` and `body`.
    pub fn fail(&self, method: Method, path: &str, status: StatusCode, body: Value) {
        self.state
            .with(|s| s.failures.insert(format!("{method} {path}"), (status, body)));
    }

    pub fn clear_failures(&self) {
        self.state.with(|s| s.failures.clear());
    }

    // ---- inspection ----

    pub fn requests(&self) -> Vec<Logged> {
        self.state.with(|s| s.requests.clone())
    }

    /// Number of requests received for `method path`.
    pub fn count(&self, method: Method, path: &str) -> usize {
        self.state.with(|s| {
            s.requests
                .iter()
                .filter(|r| r.method == method && r.path == path)
                .count()
        })
    }

    pub fn total_requests(&self) -> usize {
        self.state.with(|s| s.requests.len())
    }

    /// Last body received for `method path`.
    pub fn body(&self, method: Method, path: &str) -> Option<Value> {
        self.state
            .with(|s| s.bodies.get(&format!("{method} {path}")).cloned())
    }

    pub fn box_json(&self, box_id: Uuid) -> Option<Value> {
        self.state.with(|s| s.boxes.get(&box_id).cloned())
    }

    pub fn automation_count(&self) -> usize {
        self.state.with(|s| s.automations.len())
    }

    pub fn record_data(&self, box_id: Uuid, container: &str) -> Vec<String> {
        self.state.with(|s| {
            s.records
                .get(&(box_id, container.to_string()))
                .map(|rows| {
                    rows.iter()
                        .filter_map(|r| r["data"].as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default()
        })
    }
}

fn new_record(data: &str, tags: Vec<String>) -> Value {
    json!({
        "id": Uuid::new_v4().to_string(),
        "data": data,
        "tags": if tags.is_empty() { Value::Null } else { json!(tags) },
        "created_at": Utc::now(),
    })
}

fn new_event(id: usize, status: &str) -> Value {
    json!({
        "id": id,
        "status": status,
        "created_at": Utc::now(),
        "finished_at": { "Valid": false, "Time": "0001-01-01T00:00:00Z" },
        "affected_rows": 0,
        "data": format!("host{id}.example.com"),
    })
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

fn router(state: FakeState) -> Router {
    let api = Router::new()
        .route("/box/create", post(create_box))
        .route("/box/{id}", get(get_box).put(update_box).delete(delete_box))
        .route("/box/{id}/_count", get(record_quota))
        .route("/box/{id}/_counts", get(event_counts))
        .route("/box/{id}/_clear", post(clear_events))
        .route(
            "/box/{id}/automations",
            get(list_automations).post(create_automation),
        )
        .route(
            "/box/{id}/{container}",
            get(list_records).put(tag_records).post(import_records),
        )
        .route("/box/{id}/{container}/_deleterecords", put(delete_records))
        .route("/automations/library", get(library))
        .route(
            "/automations/{id}",
            put(update_automation).delete(delete_automation),
        )
        .route("/automations/{id}/start", post(start_automation))
        .route("/automations/{id}/events", get(list_events));

    Router::new()
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(state.clone(), log_and_inject))
        .with_state(state)
}

/// Log the request, then answer with a canned failure if one is set.
async fn log_and_inject(State(state): State<FakeState>, req: Request, next: Next) -> Response {
    let path = req
        .uri()
        .path()
        .strip_prefix("/api")
        .unwrap_or(req.uri().path())
        .to_string();
    let logged = Logged {
        method: req.method().clone(),
        path: path.clone(),
        query: req.uri().query().map(str::to_string),
    };
    let key = format!("{} {}", logged.method, path);

    let failure = state.with(|s| {
        s.requests.push(logged);
        s.failures.get(&key).cloned()
    });
    if let Some((status, body)) = failure {
        return (status, Json(body)).into_response();
    }
    next.run(req).await
}

type Params = HashMap<String, String>;

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(Value::Null)).into_response()
}

// ---- boxes ----

async fn create_box(State(state): State<FakeState>) -> Response {
    let id = Uuid::new_v4();
    let created = json!({
        "id": id,
        "name": "Unnamed Box",
        "containers": ["hostnames", "urls", "events"],
        "created_at": Utc::now(),
    });
    state.with(|s| s.boxes.insert(id, created.clone()));
    Json(created).into_response()
}

async fn get_box(State(state): State<FakeState>, Path(id): Path<Uuid>) -> Response {
    match state.with(|s| s.boxes.get(&id).cloned()) {
        Some(b) => Json(b).into_response(),
        None => not_found(),
    }
}

async fn update_box(
    State(state): State<FakeState>,
    Path(id): Path<Uuid>,
    Json(body): Json<Value>,
) -> Response {
    state.record_body("PUT", format!("/box/{id}"), body.clone());
    let updated = state.with(|s| {
        s.boxes.get_mut(&id).map(|b| {
            b["name"] = body["name"].clone();
            b["containers"] = body["containers"].clone();
            b.clone()
        })
    });
    match updated {
        Some(b) => Json(b).into_response(),
        None => not_found(),
    }
}

async fn delete_box(State(state): State<FakeState>, Path(id): Path<Uuid>) -> Response {
    match state.with(|s| s.boxes.remove(&id)) {
        Some(_) => Json(Value::Null).into_response(),
        None => not_found(),
    }
}

async fn record_quota(State(state): State<FakeState>, Path(id): Path<Uuid>) -> Response {
    let count: usize = state.with(|s| {
        s.records
            .iter()
            .filter(|((box_id, _), _)| *box_id == id)
            .map(|(_, rows)| rows.len())
            .sum()
    });
    Json(json!({ "count": count, "limit": 100_000 })).into_response()
}

async fn event_counts(State(state): State<FakeState>, Path(id): Path<Uuid>) -> Response {
    let rows = state.with(|s| {
        let mut rows = Vec::new();
        for (automation_id, automation) in &s.automations {
            if automation["box_id"] != json!(id) {
                continue;
            }
            let mut by_status: HashMap<String, u64> = HashMap::new();
            for event in s.events.get(automation_id).into_iter().flatten() {
                let status = event["status"].as_str().unwrap_or_default().to_string();
                *by_status.entry(status).or_default() += 1;
            }
            for (status, count) in by_status {
                rows.push(json!({ "automation_id": automation_id, "status": status, "count": count }));
            }
        }
        rows
    });
    Json(rows).into_response()
}

async fn clear_events(
    State(state): State<FakeState>,
    Path(id): Path<Uuid>,
    Query(params): Query<Params>,
) -> Response {
    let status = params.get("status").cloned();
    state.with(|s| {
        let ids: Vec<Uuid> = s
            .automations
            .iter()
            .filter(|(_, a)| a["box_id"] == json!(id))
            .map(|(k, _)| *k)
            .collect();
        for automation_id in ids {
            if let Some(events) = s.events.get_mut(&automation_id) {
                match &status {
                    Some(status) => events.retain(|e| e["status"] != json!(status)),
                    None => events.clear(),
                }
            }
        }
    });
    Json(Value::Null).into_response()
}

// ---- records ----

async fn list_records(
    State(state): State<FakeState>,
    Path((id, container)): Path<(Uuid, String)>,
    Query(params): Query<Params>,
) -> Response {
    if state.with(|s| !s.boxes.contains_key(&id)) {
        return not_found();
    }
    let term = FilterTerm::parse(params.get("term").map(String::as_str).unwrap_or(""));
    let limit: usize = params
        .get("limit")
        .and_then(|v| v.parse().ok())
        .unwrap_or(500);
    let offset: usize = params
        .get("offset")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);

    let matching: Vec<Value> = state.with(|s| {
        s.records
            .get(&(id, container))
            .into_iter()
            .flatten()
            .filter(|r| {
                let data = r["data"].as_str().unwrap_or_default();
                let tags: Vec<&str> = r["tags"]
                    .as_array()
                    .map(|t| t.iter().filter_map(Value::as_str).collect())
                    .unwrap_or_default();
                term.search.as_deref().map_or(true, |w| data.contains(w))
                    && term.tags.iter().all(|t| tags.contains(&t.as_str()))
            })
            .cloned()
            .collect()
    });

    let page: Vec<Value> = matching.iter().skip(offset).take(limit).cloned().collect();
    Json(json!({ "records": page, "count": matching.len() })).into_response()
}

async fn tag_records(
    State(state): State<FakeState>,
    Path((id, container)): Path<(Uuid, String)>,
    Json(body): Json<Value>,
) -> Response {
    state.record_body("PUT", format!("/box/{id}/{container}"), body.clone());
    let keys: Vec<Value> = body["records"].as_array().cloned().unwrap_or_default();
    let tags: Vec<Value> = body["tags"].as_array().cloned().unwrap_or_default();
    state.with(|s| {
        for row in s.records.entry((id, container)).or_default() {
            if keys.contains(&row["id"]) {
                let mut current = row["tags"].as_array().cloned().unwrap_or_default();
                for t in &tags {
                    if !current.contains(t) {
                        current.push(t.clone());
                    }
                }
                row["tags"] = Value::Array(current);
            }
        }
    });
    Json(Value::Null).into_response()
}

async fn delete_records(
    State(state): State<FakeState>,
    Path((id, container)): Path<(Uuid, String)>,
    Json(body): Json<Value>,
) -> Response {
    state.record_body(
        "PUT",
        format!("/box/{id}/{container}/_deleterecords"),
        body.clone(),
    );
    let keys: Vec<Value> = body["records"].as_array().cloned().unwrap_or_default();
    state.with(|s| {
        if let Some(rows) = s.records.get_mut(&(id, container)) {
            rows.retain(|r| !keys.contains(&r["id"]));
        }
    });
    Json(Value::Null).into_response()
}

async fn import_records(
    State(state): State<FakeState>,
    Path((id, container)): Path<(Uuid, String)>,
    Query(params): Query<Params>,
    body: Bytes,
) -> Response {
    let text = String::from_utf8_lossy(&body).to_string();
    state.record_body("POST", format!("/box/{id}/{container}"), Value::String(text.clone()));
    let tags: Vec<String> = params
        .get("tags")
        .map(|t| {
            t.split(',')
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let changed = state.with(|s| {
        let rows = s.records.entry((id, container)).or_default();
        let mut changed = 0;
        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if rows.iter().any(|r| r["data"] == json!(line)) {
                continue;
            }
            rows.push(new_record(line, tags.clone()));
            changed += 1;
        }
        changed
    });
    Json(json!({ "changed": changed })).into_response()
}

// ---- automations ----

async fn list_automations(State(state): State<FakeState>, Path(id): Path<Uuid>) -> Response {
    let list: Vec<Value> = state.with(|s| {
        s.automations
            .values()
            .filter(|a| a["box_id"] == json!(id))
            .cloned()
            .collect()
    });
    if list.is_empty() {
        // The server encodes an empty list as null.
        return Json(Value::Null).into_response();
    }
    Json(list).into_response()
}

async fn create_automation(
    State(state): State<FakeState>,
    Path(id): Path<Uuid>,
    Json(mut body): Json<Value>,
) -> Response {
    state.record_body("POST", format!("/box/{id}/automations"), body.clone());
    let automation_id = Uuid::new_v4();
    body["id"] = json!(automation_id);
    body["box_id"] = json!(id);
    body["source_count"] = json!(0);
    state.with(|s| s.automations.insert(automation_id, body.clone()));
    Json(body).into_response()
}

async fn update_automation(
    State(state): State<FakeState>,
    Path(id): Path<Uuid>,
    Json(body): Json<Value>,
) -> Response {
    state.record_body("PUT", format!("/automations/{id}"), body.clone());
    let updated = state.with(|s| {
        s.automations.get_mut(&id).map(|a| {
            if let (Some(a), Some(b)) = (a.as_object_mut(), body.as_object()) {
                for (k, v) in b {
                    a.insert(k.clone(), v.clone());
                }
            }
            a.clone()
        })
    });
    match updated {
        Some(a) => Json(a).into_response(),
        None => not_found(),
    }
}

async fn delete_automation(State(state): State<FakeState>, Path(id): Path<Uuid>) -> Response {
    match state.with(|s| s.automations.remove(&id)) {
        Some(_) => Json(Value::Null).into_response(),
        None => not_found(),
    }
}

async fn start_automation(State(state): State<FakeState>, Path(id): Path<Uuid>) -> Response {
    let automation = state.with(|s| {
        let automation = s.automations.get(&id).cloned()?;
        let events = s.events.entry(id).or_default();
        let next = events.len() + 1;
        events.push(new_event(next, "pending"));
        Some(automation)
    });
    match automation {
        Some(a) => Json(a).into_response(),
        None => not_found(),
    }
}

async fn list_events(
    State(state): State<FakeState>,
    Path(id): Path<Uuid>,
    Query(params): Query<Params>,
) -> Response {
    let limit: usize = params
        .get("limit")
        .and_then(|v| v.parse().ok())
        .unwrap_or(usize::MAX);
    let events: Vec<Value> = state.with(|s| {
        s.events
            .get(&id)
            .into_iter()
            .flatten()
            .rev()
            .take(limit)
            .cloned()
            .collect()
    });
    Json(events).into_response()
}

async fn library(State(state): State<FakeState>) -> Response {
    Json(state.with(|s| s.library.clone())).into_response()
}
