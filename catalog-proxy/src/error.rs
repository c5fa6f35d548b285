use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use std::error::Error as StdError;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("{}", chain(.0))]
    Upstream(#[from] reqwest::Error),
    #[error("backend returned a body that is not JSON: {0}")]
    InvalidBody(String),
}

/// Body of every failed `/backend` response.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: String,
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        error!("Backend call failed: {}", message);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorEnvelope { error: message }),
        )
            .into_response()
    }
}

// reqwest's top-level Display hides the cause (refused, dns, timeout).
fn chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
