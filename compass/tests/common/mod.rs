//! # Mock Compass API
//!
//! In-process axum server on an ephemeral port, holding every resource as JSON in memory.
//!
//! - `POST /api/auth/login` accepts [`EMAIL`] / [`PASSWORD`] and issues [`TOKEN`]
//! - every other route requires `Authorization: Bearer <current token>`
//! - [`MockServer::fail_next`] makes the next request to a path fail with a status
//! - [`MockServer::requests`] lists what the server received

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::{Path, Request, State};
use axum::http::{header::AUTHORIZATION, Method, StatusCode};
use axum::middleware::{from_fn_with_state, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::{Days, NaiveDate};
use compass::app::App;
use compass::cache::{LocalCache, MemoryCache};
use compass::config::CompassConfig;
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::{json, Map, Value};
use shared::{next_due_date, RecurringTask};

pub const EMAIL: &str = "farmer@example.com";
pub const PASSWORD: &str = "correct-horse";
pub const TOKEN: &str = "test-token";

/// Every collection resource the server exposes.
pub const RESOURCES: &[&str] = &[
    "wallets",
    "airdrops",
    "recurring-tasks",
    "watchlist",
    "yield-positions",
    "transactions",
    "strategy-notes",
    "learning-resources",
    "airdrop-templates",
    "alerts",
    "badges",
];

#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub request_id: Option<String>,
}

struct Inner {
    collections: Mutex<HashMap<&'static str, Vec<Value>>>,
    settings: Mutex<Value>,
    valid_token: Mutex<String>,
    failures: Mutex<HashMap<String, u16>>,
    requests: Mutex<Vec<Recorded>>,
    next_id: AtomicUsize,
}

#[derive(Clone)]
pub struct MockState(Arc<Inner>);

pub struct MockServer {
    pub base_url: String,
    state: MockState,
}

impl MockServer {
    pub async fn start() -> Self {
        let state = MockState(Arc::new(Inner {
            collections: Mutex::new(RESOURCES.iter().map(|name| (*name, Vec::new())).collect()),
            settings: Mutex::new(json!({
                "theme": "dark",
                "defaultGasNetworks": ["Ethereum"],
                "notificationsEnabled": true,
                "tutorialsCompleted": []
            })),
            valid_token: Mutex::new(TOKEN.to_string()),
            failures: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
            next_id: AtomicUsize::new(1),
        }));

        let app = Router::new()
            .nest("/api", api_routes())
            .layer(from_fn_with_state(state.clone(), gate))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}/api", addr),
            state,
        }
    }

    pub fn config(&self) -> CompassConfig {
        CompassConfig::default().with_api_base_url(&self.base_url)
    }

    /// App on an in-memory cache.
    pub fn app(&self) -> App {
        self.app_with_cache(Arc::new(MemoryCache::new()))
    }

    pub fn app_with_cache(&self, cache: Arc<dyn LocalCache>) -> App {
        App::with_cache(self.config(), cache).unwrap()
    }

    pub fn seed<T: Serialize>(&self, resource: &'static str, records: &[T]) {
        let values = records.iter().map(|r| serde_json::to_value(r).unwrap()).collect();
        self.state.0.collections.lock().insert(resource, values);
    }

    /// Server-side records of a resource.
    pub fn records(&self, resource: &str) -> Vec<Value> {
        self.state.0.collections.lock().get(resource).cloned().unwrap_or_default()
    }

    /// Fail the next request to `path` (relative to the API root, e.g. `/wallets`).
    pub fn fail_next(&self, path: &str, status: u16) {
        self.state.0.failures.lock().insert(format!("/api{}", path), status);
    }

    /// Invalidate the issued token, as if the session expired server-side.
    pub fn revoke_token(&self) {
        *self.state.0.valid_token.lock() = "revoked".to_string();
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.0.requests.lock().clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        let full = format!("/api{}", path);
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == full)
            .count()
    }
}

fn api_routes() -> Router<MockState> {
    let mut router = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/me", get(me))
        .route("/settings", get(get_settings).put(put_settings))
        .route("/airdrops/batch-update", put(batch_update))
        .route("/recurring-tasks/{id}/complete", post(complete))
        .route("/watchlist/{id}/promote-to-airdrop", post(promote))
        .route("/alerts/mark-all-read", post(mark_all_read));

    for name in RESOURCES {
        router = collection_routes(router, *name);
    }
    router = nested_routes(router, "airdrops", "tasks", "tasks");
    nested_routes(router, "wallets", "gas-logs", "gasLogs")
}

fn collection_routes(router: Router<MockState>, name: &'static str) -> Router<MockState> {
    router
        .route(
            &format!("/{}", name),
            get(move |State(s): State<MockState>| async move { s.list(name) })
                .post(move |State(s): State<MockState>, Json(body): Json<Value>| async move { s.create(name, body) }),
        )
        .route(
            &format!("/{}/{{id}}", name),
            put(
                move |State(s): State<MockState>, Path(id): Path<String>, Json(body): Json<Value>| async move {
                    s.update(name, &id, body)
                },
            )
            .delete(move |State(s): State<MockState>, Path(id): Path<String>| async move { s.remove(name, &id) }),
        )
}

fn nested_routes(
    router: Router<MockState>,
    parent: &'static str,
    segment: &'static str,
    field: &'static str,
) -> Router<MockState> {
    router
        .route(
            &format!("/{}/{{id}}/{}", parent, segment),
            post(
                move |State(s): State<MockState>, Path(parent_id): Path<String>, Json(body): Json<Value>| async move {
                    s.nested_create(parent, &parent_id, field, body)
                },
            ),
        )
        .route(
            &format!("/{}/{{id}}/{}/{{child_id}}", parent, segment),
            put(
                move |State(s): State<MockState>,
                      Path((parent_id, id)): Path<(String, String)>,
                      Json(body): Json<Value>| async move {
                    s.nested_update(parent, &parent_id, field, &id, body)
                },
            )
            .delete(
                move |State(s): State<MockState>, Path((parent_id, id)): Path<(String, String)>| async move {
                    s.nested_remove(parent, &parent_id, field, &id)
                },
            ),
        )
}

/// Records the request, applies injected failures and checks the bearer token.
async fn gate(State(state): State<MockState>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let authorization = {
        let header = |name: &str| {
            request
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let authorization = header(AUTHORIZATION.as_str());
        state.0.requests.lock().push(Recorded {
            method: request.method().clone(),
            path: path.clone(),
            authorization: authorization.clone(),
            request_id: header("x-request-id"),
        });
        authorization
    };

    let injected = state.0.failures.lock().remove(&path);
    if let Some(status) = injected {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return error(status, "Injected failure");
    }

    let public = path == "/api/auth/login" || path == "/api/auth/register";
    let expected = format!("Bearer {}", state.0.valid_token.lock().as_str());
    if !public && authorization.as_deref() != Some(expected.as_str()) {
        return error(StatusCode::UNAUTHORIZED, "Invalid or expired token");
    }

    next.run(request).await
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

fn user() -> Value {
    json!({ "id": "u1", "username": "farmer", "email": EMAIL })
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["email"] == EMAIL && body["password"] == PASSWORD {
        Json(json!({ "token": TOKEN, "user": user() })).into_response()
    } else {
        error(StatusCode::UNAUTHORIZED, "Invalid credentials")
    }
}

async fn register(Json(body): Json<Value>) -> Response {
    if body["email"] == EMAIL {
        return error(StatusCode::CONFLICT, "Email already registered");
    }
    let user = json!({ "id": "u2", "username": body["username"], "email": body["email"] });
    (StatusCode::CREATED, Json(json!({ "token": TOKEN, "user": user }))).into_response()
}

async fn me() -> Response {
    Json(user()).into_response()
}

async fn get_settings(State(s): State<MockState>) -> Response {
    Json(s.0.settings.lock().clone()).into_response()
}

async fn put_settings(State(s): State<MockState>, Json(body): Json<Value>) -> Response {
    *s.0.settings.lock() = body.clone();
    Json(body).into_response()
}

async fn batch_update(State(s): State<MockState>, Json(body): Json<Value>) -> Response {
    let ids: Vec<String> = serde_json::from_value(body["ids"].clone()).unwrap_or_default();
    let changes = body["changes"].as_object().cloned().unwrap_or_default();

    let mut collections = s.0.collections.lock();
    let airdrops = collections.entry("airdrops").or_default();
    if ids.iter().any(|id| !airdrops.iter().any(|a| a["id"] == *id)) {
        return error(StatusCode::NOT_FOUND, "Airdrop not found");
    }

    let mut updated = Vec::new();
    for airdrop in airdrops.iter_mut().filter(|a| ids.iter().any(|id| a["id"] == *id)) {
        for (key, value) in &changes {
            airdrop[key] = value.clone();
        }
        updated.push(airdrop.clone());
    }
    Json(updated).into_response()
}

async fn complete(State(s): State<MockState>, Path(id): Path<String>) -> Response {
    let mut collections = s.0.collections.lock();
    let tasks = collections.entry("recurring-tasks").or_default();
    let Some(slot) = tasks.iter_mut().find(|t| t["id"] == id) else {
        return error(StatusCode::NOT_FOUND, "Recurring task not found");
    };

    let mut task: RecurringTask = serde_json::from_value(slot.clone()).unwrap();
    task.last_completed_date = Some(task.next_due_date);
    task.next_due_date = next_due_date(task.frequency, task.next_due_date, task.every_x_days);
    *slot = serde_json::to_value(&task).unwrap();
    Json(slot.clone()).into_response()
}

async fn promote(State(s): State<MockState>, Path(id): Path<String>) -> Response {
    let mut collections = s.0.collections.lock();
    let watchlist = collections.entry("watchlist").or_default();
    let Some(pos) = watchlist.iter().position(|w| w["id"] == id) else {
        return error(StatusCode::NOT_FOUND, "Watchlist item not found");
    };
    let item = watchlist.remove(pos);

    let airdrop = json!({
        "id": format!("airdrops-{}", s.0.next_id.fetch_add(1, Ordering::SeqCst)),
        "projectName": item["projectName"],
        "blockchain": "Unknown",
        "status": "Rumored",
        "myStatus": "NotStarted",
        "description": item["notes"],
        "tasks": [],
        "isArchived": false,
        "dateAdded": "2024-06-01"
    });
    collections.entry("airdrops").or_default().push(airdrop.clone());
    Json(airdrop).into_response()
}

async fn mark_all_read(State(s): State<MockState>) -> Response {
    let mut collections = s.0.collections.lock();
    let alerts = collections.entry("alerts").or_default();
    for alert in alerts.iter_mut() {
        alert["isRead"] = json!(true);
    }
    Json(alerts.clone()).into_response()
}

/// Fields the server fills in on creation.
fn server_defaults(resource: &str) -> Value {
    match resource {
        "wallets" => json!({ "isArchived": false, "gasLogs": [] }),
        "airdrops" => json!({ "isArchived": false, "tasks": [], "dateAdded": "2024-06-01" }),
        "recurring-tasks" => json!({ "isActive": true }),
        "watchlist" => json!({ "addedDate": "2024-06-01" }),
        "strategy-notes" => json!({ "lastModified": "2024-06-01T12:00:00Z" }),
        "alerts" => json!({ "isRead": false, "date": "2024-06-01T12:00:00Z" }),
        "badges" => json!({ "achieved": false }),
        "tasks" => json!({ "completed": false }),
        _ => json!({}),
    }
}

fn with_defaults(resource: &str, body: Value, id: String) -> Value {
    let mut record: Map<String, Value> = body.as_object().cloned().unwrap_or_default();
    if let Value::Object(defaults) = server_defaults(resource) {
        for (key, value) in defaults {
            record.entry(key).or_insert(value);
        }
    }
    record.insert("id".to_string(), Value::String(id));
    Value::Object(record)
}

impl MockState {
    fn new_id(&self, resource: &str) -> String {
        format!("{}-{}", resource, self.0.next_id.fetch_add(1, Ordering::SeqCst))
    }

    fn list(&self, name: &str) -> Response {
        Json(self.0.collections.lock().get(name).cloned().unwrap_or_default()).into_response()
    }

    fn create(&self, name: &'static str, body: Value) -> Response {
        let record = with_defaults(name, body, self.new_id(name));
        self.0.collections.lock().entry(name).or_default().push(record.clone());
        (StatusCode::CREATED, Json(record)).into_response()
    }

    fn update(&self, name: &str, id: &str, body: Value) -> Response {
        let mut collections = self.0.collections.lock();
        let records = collections.get_mut(name);
        match records.and_then(|r| r.iter_mut().find(|rec| rec["id"] == id)) {
            Some(slot) => {
                *slot = body;
                Json(slot.clone()).into_response()
            }
            None => error(StatusCode::NOT_FOUND, "Not found"),
        }
    }

    fn remove(&self, name: &str, id: &str) -> Response {
        let mut collections = self.0.collections.lock();
        let Some(records) = collections.get_mut(name) else {
            return error(StatusCode::NOT_FOUND, "Not found");
        };
        let before = records.len();
        records.retain(|rec| rec["id"] != id);
        if records.len() == before {
            error(StatusCode::NOT_FOUND, "Not found")
        } else {
            StatusCode::NO_CONTENT.into_response()
        }
    }

    fn with_children<F>(&self, parent: &str, parent_id: &str, field: &str, f: F) -> Response
    where
        F: FnOnce(&mut Vec<Value>) -> Response,
    {
        let mut collections = self.0.collections.lock();
        let parent_record = collections
            .get_mut(parent)
            .and_then(|r| r.iter_mut().find(|rec| rec["id"] == parent_id));
        let Some(parent_record) = parent_record else {
            return error(StatusCode::NOT_FOUND, "Parent not found");
        };
        if !parent_record[field].is_array() {
            parent_record[field] = json!([]);
        }
        match parent_record[field].as_array_mut() {
            Some(children) => f(children),
            None => error(StatusCode::INTERNAL_SERVER_ERROR, "Corrupt parent"),
        }
    }

    fn nested_create(&self, parent: &str, parent_id: &str, field: &str, body: Value) -> Response {
        let kind = if field == "tasks" { "tasks" } else { "gas-logs" };
        let record = with_defaults(kind, body, self.new_id(kind));
        self.with_children(parent, parent_id, field, |children| {
            children.push(record.clone());
            (StatusCode::CREATED, Json(record)).into_response()
        })
    }

    fn nested_update(&self, parent: &str, parent_id: &str, field: &str, id: &str, body: Value) -> Response {
        self.with_children(parent, parent_id, field, |children| {
            match children.iter_mut().find(|c| c["id"] == id) {
                Some(slot) => {
                    *slot = body;
                    Json(slot.clone()).into_response()
                }
                None => error(StatusCode::NOT_FOUND, "Not found"),
            }
        })
    }

    fn nested_remove(&self, parent: &str, parent_id: &str, field: &str, id: &str) -> Response {
        self.with_children(parent, parent_id, field, |children| {
            children.retain(|c| c["id"] != id);
            StatusCode::NO_CONTENT.into_response()
        })
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn days_ago(days: u64) -> NaiveDate {
    lib_utils::today_utc().checked_sub_days(Days::new(days)).unwrap()
}
