use axum::{
    extract::{ConnectInfo, MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::net::SocketAddr;
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

const SERVICE_NAME: &str = "catalog-proxy";

#[derive(Debug, Clone, Serialize)]
pub struct ApiLogEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub method: String,
    pub path: String,
    pub matched_path: Option<String>,
    pub query_string: Option<String>,
    pub status_code: u16,
    pub duration_ms: u64,
    pub client_ip: Option<String>,
    pub user_agent: Option<String>,
    pub service: String,
    pub version: String,
}

/// Emits one structured record per request through `tracing`.
pub async fn api_logging_middleware(request: Request, next: Next) -> Response {
    let start_time = Instant::now();

    let method = request.method().to_string();
    let uri = request.uri().clone();
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string());
    let client_ip = client_ip(&request);
    let user_agent = request
        .headers()
        .get("user-agent")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string());

    let response = next.run(request).await;
    let duration = start_time.elapsed();

    let entry = ApiLogEntry {
        id: Uuid::new_v4().to_string(),
        timestamp: Utc::now(),
        method,
        path: uri.path().to_string(),
        matched_path,
        query_string: uri.query().map(|q| q.to_string()),
        status_code: response.status().as_u16(),
        duration_ms: duration.as_millis() as u64,
        client_ip,
        user_agent,
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    if response.status().is_server_error() {
        warn!(
            "API Call: {} {} -> {} ({} ms)",
            entry.method, entry.path, entry.status_code, entry.duration_ms
        );
    } else {
        info!(
            "API Call: {} {} -> {} ({} ms)",
            entry.method, entry.path, entry.status_code, entry.duration_ms
        );
    }

    match serde_json::to_string(&entry) {
        Ok(json) => debug!("Detailed log: {}", json),
        Err(e) => warn!("Could not serialize log entry {}: {}", entry.id, e),
    }

    response
}

/// Forwarding headers first (the proxy usually sits behind a dev server),
/// then the socket peer when the server was started with connect info.
fn client_ip(request: &Request) -> Option<String> {
    let forwarded = ["x-forwarded-for", "x-real-ip"].iter().find_map(|name| {
        let value = request.headers().get(*name)?.to_str().ok()?;
        let first_hop = value.split(',').next()?.trim();
        (!first_hop.is_empty()).then(|| first_hop.to_string())
    });

    forwarded.or_else(|| {
        request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string())
    })
}
