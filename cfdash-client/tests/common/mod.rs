//! 共享测试工具：本地假 Cloudflare API 服务

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::IntoResponse;
use cfdash_client::{ClientConfig, CloudflareClient, Credentials};
use serde_json::{Value, json};
use tokio::sync::Mutex;

pub const TEST_EMAIL: &str = "ops@example.com";
pub const TEST_KEY: &str = "c2547eb745079dac9320b638f5e225cf483cc5cfdda41";
pub const TIMESTAMP: &str = "2024-01-01T00:00:00Z";

/// A request as seen by the fake server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

#[derive(Default)]
pub struct FakeState {
    zones: Vec<Value>,
    records: HashMap<String, Vec<Value>>,
    requests: Vec<RecordedRequest>,
    next_id: u32,
    forced: Option<(StatusCode, String)>,
    delete_success: Option<bool>,
}

/// Local stand-in for `https://api.cloudflare.com/client/v4`.
#[derive(Clone)]
pub struct FakeCloudflare {
    state: Arc<Mutex<FakeState>>,
    pub base_url: String,
}

impl FakeCloudflare {
    pub async fn start() -> Self {
        let state = Arc::new(Mutex::new(FakeState::default()));
        let app = Router::new().fallback(handle).with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake server");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            state,
            base_url: format!("http://{addr}/client/v4"),
        }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::default().with_base_url(&self.base_url)
    }

    pub fn client(&self) -> CloudflareClient {
        self.client_with(Credentials::new(TEST_EMAIL, TEST_KEY))
    }

    pub fn client_with(&self, credentials: Credentials) -> CloudflareClient {
        CloudflareClient::new(self.config(), credentials).expect("build client")
    }

    pub async fn seed_zone(&self, id: &str, name: &str) {
        let mut state = self.state.lock().await;
        state.zones.push(json!({
            "id": id,
            "name": name,
            "status": "active",
            "paused": false,
            "type": "full"
        }));
        state.records.entry(id.to_string()).or_default();
    }

    pub async fn seed_record(
        &self,
        zone_id: &str,
        id: &str,
        rtype: &str,
        name: &str,
        content: &str,
    ) {
        let mut state = self.state.lock().await;
        let zone_name = zone_name(&state, zone_id);
        let record = record_json(zone_id, &zone_name, id, rtype, name, content, 3600);
        state
            .records
            .entry(zone_id.to_string())
            .or_default()
            .push(record);
    }

    /// Answer every following request with this status and raw body.
    pub async fn force_response(&self, status: StatusCode, body: &str) {
        self.state.lock().await.forced = Some((status, body.to_string()));
    }

    /// Override the `success` flag of DELETE confirmations (record kept when false).
    pub async fn set_delete_success(&self, success: bool) {
        self.state.lock().await.delete_success = Some(success);
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().await.requests.clone()
    }

    pub async fn last_request(&self) -> RecordedRequest {
        self.requests().await.pop().expect("no request recorded")
    }

    pub async fn stored_records(&self, zone_id: &str) -> Vec<Value> {
        self.state
            .lock()
            .await
            .records
            .get(zone_id)
            .cloned()
            .unwrap_or_default()
    }
}

fn zone_name(state: &FakeState, zone_id: &str) -> String {
    state
        .zones
        .iter()
        .find(|z| z["id"] == zone_id)
        .and_then(|z| z["name"].as_str())
        .unwrap_or_default()
        .to_string()
}

pub fn record_json(
    zone_id: &str,
    zone_name: &str,
    id: &str,
    rtype: &str,
    name: &str,
    content: &str,
    ttl: u64,
) -> Value {
    json!({
        "id": id,
        "type": rtype,
        "name": name,
        "content": content,
        "proxiable": true,
        "proxied": false,
        "ttl": ttl,
        "locked": false,
        "zone_id": zone_id,
        "zone_name": zone_name,
        "created_on": TIMESTAMP,
        "modified_on": TIMESTAMP
    })
}

fn ok(result: Value) -> (StatusCode, String) {
    (
        StatusCode::OK,
        json!({ "success": true, "errors": [], "messages": [], "result": result }).to_string(),
    )
}

fn fail(status: StatusCode, code: u32, message: &str) -> (StatusCode, String) {
    (
        status,
        json!({
            "success": false,
            "errors": [{ "code": code, "message": message }],
            "messages": [],
            "result": null
        })
        .to_string(),
    )
}

async fn handle(
    State(state): State<Arc<Mutex<FakeState>>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let mut state = state.lock().await;
    let path = uri.path().to_string();
    let body_json: Option<Value> = serde_json::from_slice(&body).ok();

    state.requests.push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        headers: headers.clone(),
        body: body_json.clone(),
    });

    let (status, text) = route(&mut state, &method, &path, &headers, body_json);
    (status, [(header::CONTENT_TYPE, "application/json")], text)
}

fn route(
    state: &mut FakeState,
    method: &Method,
    path: &str,
    headers: &HeaderMap,
    body: Option<Value>,
) -> (StatusCode, String) {
    if let Some(forced) = state.forced.clone() {
        return forced;
    }

    let email = headers.get("x-auth-email").and_then(|v| v.to_str().ok());
    let key = headers.get("x-auth-key").and_then(|v| v.to_str().ok());
    if email != Some(TEST_EMAIL) || key != Some(TEST_KEY) {
        return fail(
            StatusCode::FORBIDDEN,
            9103,
            "Unknown X-Auth-Key or X-Auth-Email",
        );
    }

    let segments: Vec<&str> = path
        .trim_start_matches("/client/v4")
        .trim_matches('/')
        .split('/')
        .collect();

    match (method.as_str(), segments.as_slice()) {
        ("GET", ["zones"]) => ok(Value::Array(state.zones.clone())),
        ("GET", ["zones", zone, "dns_records"]) => match state.records.get(*zone) {
            Some(records) => ok(Value::Array(records.clone())),
            None => fail(StatusCode::NOT_FOUND, 7003, "Could not route to zone"),
        },
        ("POST", ["zones", zone, "dns_records"]) => {
            let Some(body) = body else {
                return fail(StatusCode::BAD_REQUEST, 9207, "Request body is invalid.");
            };
            if !state.records.contains_key(*zone) {
                return fail(StatusCode::NOT_FOUND, 7003, "Could not route to zone");
            }
            state.next_id += 1;
            let id = format!("rec{:04}", state.next_id);
            let zone_name = zone_name(state, zone);
            let record = record_json(
                zone,
                &zone_name,
                &id,
                body["type"].as_str().unwrap_or_default(),
                body["name"].as_str().unwrap_or_default(),
                body["content"].as_str().unwrap_or_default(),
                body["ttl"].as_u64().unwrap_or(1),
            );
            state
                .records
                .entry((*zone).to_string())
                .or_default()
                .push(record.clone());
            ok(record)
        }
        ("PUT", ["zones", zone, "dns_records", id]) => {
            let Some(body) = body else {
                return fail(StatusCode::BAD_REQUEST, 9207, "Request body is invalid.");
            };
            let zone_name = zone_name(state, zone);
            let Some(records) = state.records.get_mut(*zone) else {
                return fail(StatusCode::NOT_FOUND, 7003, "Could not route to zone");
            };
            let Some(slot) = records.iter_mut().find(|r| r["id"] == *id) else {
                return fail(StatusCode::NOT_FOUND, 81044, "Record does not exist.");
            };
            *slot = record_json(
                zone,
                &zone_name,
                id,
                body["type"].as_str().unwrap_or_default(),
                body["name"].as_str().unwrap_or_default(),
                body["content"].as_str().unwrap_or_default(),
                body["ttl"].as_u64().unwrap_or(1),
            );
            ok(slot.clone())
        }
        ("DELETE", ["zones", zone, "dns_records", id]) => {
            if state.delete_success == Some(false) {
                return (StatusCode::OK, json!({ "success": false }).to_string());
            }
            let Some(records) = state.records.get_mut(*zone) else {
                return fail(StatusCode::NOT_FOUND, 7003, "Could not route to zone");
            };
            let before = records.len();
            records.retain(|r| r["id"] != *id);
            if records.len() == before {
                return fail(StatusCode::NOT_FOUND, 81044, "Record does not exist.");
            }
            (StatusCode::OK, json!({ "success": true }).to_string())
        }
        _ => fail(StatusCode::NOT_FOUND, 7000, "No route for that URI"),
    }
}
