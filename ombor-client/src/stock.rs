//! Stock entry API

use serde::Deserialize;
use shared::models::{PersistedStockRow, StockEntryPayload};
use shared::response::ApiResponse;

use crate::http::unwrap_data;
use crate::{ClientResult, HttpClient};

/// Identifier of a saved stock entry
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SavedEntry {
    pub id: i64,
}

/// Stock entry API: create, update and load entries
#[derive(Debug, Clone)]
pub struct StockApi {
    http: HttpClient,
}

impl StockApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Submit a new stock entry
    pub async fn create_entry(&self, payload: &StockEntryPayload) -> ClientResult<SavedEntry> {
        let envelope: ApiResponse<SavedEntry> =
            self.http.post("api/stock-entries", payload).await?;
        unwrap_data(envelope)
    }

    /// Resave an existing stock entry
    pub async fn update_entry(
        &self,
        entry: i64,
        payload: &StockEntryPayload,
    ) -> ClientResult<SavedEntry> {
        let envelope: ApiResponse<SavedEntry> = self
            .http
            .post(&format!("api/stock-entries/{entry}"), payload)
            .await?;
        unwrap_data(envelope)
    }

    /// Load the saved line rows of an entry, for edit-mode hydration
    pub async fn entry_rows(&self, entry: i64) -> ClientResult<Vec<PersistedStockRow>> {
        let envelope: ApiResponse<Vec<PersistedStockRow>> = self
            .http
            .get(&format!("api/stock-entries/{entry}/rows"))
            .await?;
        unwrap_data(envelope)
    }
}
