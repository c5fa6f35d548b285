use reqwest::{Method, StatusCode};

use super::state::{CatalogItem, ItemDraft, ItemId};
use crate::http_client::{ApiClient, Result};

/// Catalog endpoints on top of the generic ApiClient.
#[derive(Clone)]
pub struct CatalogClient {
    api: ApiClient,
}

impl CatalogClient {
    /// `api_url` is the collection URL, e.g. `http://localhost:8080/api/catalog`.
    pub fn new(api_url: &str) -> Self {
        Self {
            api: ApiClient::new(api_url),
        }
    }

    pub fn api_url(&self) -> &str {
        self.api.base_url()
    }

    pub async fn list_items(&self) -> Result<Vec<CatalogItem>> {
        self.api.get_json("load", "").await
    }

    /// Backend answers 201 on success.
    pub async fn create_item(&self, draft: &ItemDraft) -> Result<()> {
        self.api
            .send_json("add", Method::POST, "", draft, StatusCode::CREATED)
            .await
    }

    pub async fn update_item(&self, id: ItemId, draft: &ItemDraft) -> Result<()> {
        self.api
            .send_json("update", Method::PUT, &format!("/{}", id), draft, StatusCode::OK)
            .await
    }

    pub async fn delete_item(&self, id: ItemId) -> Result<()> {
        self.api
            .delete("delete", &format!("/{}", id), StatusCode::OK)
            .await
    }
}
