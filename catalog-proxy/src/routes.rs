use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Json as ResponseJson, Response},
};
use serde::{Deserialize, Serialize};
use serde::de::IgnoredAny;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::ProxyConfig;
use crate::error::ProxyError;

pub const STATUS_MESSAGE: &str = "Frontend is running!";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub message: String,
}

/// Shared by every handler; cloning is cheap.
#[derive(Clone)]
pub struct ProxyState {
    client: reqwest::Client,
    backend_url: Arc<str>,
}

impl ProxyState {
    pub fn new(config: &ProxyConfig) -> Result<Self, ProxyError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            backend_url: Arc::from(config.backend_url.as_str()),
        })
    }

    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }
}

#[axum::debug_handler]
pub async fn status() -> ResponseJson<StatusResponse> {
    ResponseJson(StatusResponse {
        message: STATUS_MESSAGE.to_string(),
    })
}

/// Single best-effort GET; the upstream JSON body is passed through untouched.
#[axum::debug_handler]
pub async fn forward_to_backend(State(state): State<ProxyState>) -> Result<Response, ProxyError> {
    info!("Forwarding GET to backend at {}", state.backend_url);

    let upstream = state.client.get(state.backend_url()).send().await?;
    let upstream_status = upstream.status();
    let body = upstream.bytes().await?;

    serde_json::from_slice::<IgnoredAny>(&body)
        .map_err(|e| ProxyError::InvalidBody(e.to_string()))?;

    if !upstream_status.is_success() {
        warn!(
            "Backend answered {} with a JSON body, relaying it anyway",
            upstream_status
        );
    }

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
