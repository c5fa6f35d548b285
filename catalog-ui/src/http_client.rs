//! HTTP client for catalog-ui
//! Thin wrapper over reqwest: one base URL, JSON bodies, exact status checks.

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error as StdError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{}", chain(.0))]
    Http(#[from] reqwest::Error),
    #[error("{operation} failed with status {status}")]
    UnexpectedStatus {
        operation: &'static str,
        status: StatusCode,
    },
}

impl ClientError {
    /// True when the request reached the backend but the answer was not the expected code.
    pub fn is_unexpected_status(&self) -> bool {
        matches!(self, ClientError::UnexpectedStatus { .. })
    }
}

#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `path` is either empty (the collection itself) or starts with `/`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get_json<R: DeserializeOwned>(&self, operation: &'static str, path: &str) -> Result<R> {
        let url = self.url(path);
        log::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::UnexpectedStatus {
                operation,
                status: response.status(),
            });
        }

        Ok(response.json::<R>().await?)
    }

    pub async fn send_json<T: Serialize>(
        &self,
        operation: &'static str,
        method: Method,
        path: &str,
        body: &T,
        expected: StatusCode,
    ) -> Result<()> {
        let url = self.url(path);
        log::debug!("{} {}", method, url);

        let response = self.client.request(method, &url).json(body).send().await?;
        expect_status(operation, response.status(), expected)
    }

    pub async fn delete(&self, operation: &'static str, path: &str, expected: StatusCode) -> Result<()> {
        let url = self.url(path);
        log::debug!("DELETE {}", url);

        let response = self.client.delete(&url).send().await?;
        expect_status(operation, response.status(), expected)
    }
}

fn expect_status(operation: &'static str, status: StatusCode, expected: StatusCode) -> Result<()> {
    if status == expected {
        Ok(())
    } else {
        log::warn!("{} answered {} (expected {})", operation, status, expected);
        Err(ClientError::UnexpectedStatus { operation, status })
    }
}

// reqwest's top-level Display hides the cause (refused, dns, decode).
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
