//! Upstream inventory API client
//!
//! Materializes the five snapshot collections the reconciliation engine
//! consumes. The engine requires every collection to be fully fetched
//! before a run starts; there is no streaming input.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::models::{
    Category, DamageReport, InventoryItem, Requisition, StockSnapshot, StockTransaction,
};

use crate::config::UpstreamConfig;
use crate::error::{AppError, AppResult};

/// Inventory API client
#[derive(Clone)]
pub struct InventoryApiClient {
    client: Client,
    base_url: String,
    api_token: Option<String>,
}

impl InventoryApiClient {
    /// Create a new client from the upstream configuration
    pub fn new(config: &UpstreamConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
        })
    }

    /// Create a client against a custom base URL (for testing)
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: None,
        }
    }

    /// Fetch and fully materialize the five source collections.
    ///
    /// Items, categories and approved requisitions are fetched
    /// concurrently and are hard requirements. The per-item groupings
    /// degrade to empty on failure: partial source data is within the
    /// engine's tolerance, and one flaky item must not sink the report.
    pub async fn load_snapshot(&self) -> AppResult<StockSnapshot> {
        let (items, categories, requisitions) = tokio::try_join!(
            self.fetch_items(),
            self.fetch_categories(),
            self.fetch_approved_requisitions(),
        )?;

        let mut damage_reports = HashMap::with_capacity(items.len());
        let mut transactions = HashMap::with_capacity(items.len());

        for item in &items {
            let (damage, txs) = tokio::join!(
                self.fetch_damage_reports(item.id),
                self.fetch_transactions(item.id),
            );
            damage_reports.insert(item.id, damage.unwrap_or_else(|e| {
                tracing::warn!("Damage reports for item {} unavailable: {}", item.id, e);
                Vec::new()
            }));
            transactions.insert(item.id, txs.unwrap_or_else(|e| {
                tracing::warn!("Stock transactions for item {} unavailable: {}", item.id, e);
                Vec::new()
            }));
        }

        Ok(StockSnapshot {
            items,
            categories,
            requisitions,
            damage_reports,
            transactions,
        })
    }

    async fn fetch_items(&self) -> AppResult<Vec<InventoryItem>> {
        self.get_json("/items").await
    }

    async fn fetch_categories(&self) -> AppResult<Vec<Category>> {
        self.get_json("/categories").await
    }

    async fn fetch_approved_requisitions(&self) -> AppResult<Vec<Requisition>> {
        self.get_json("/requests?status=approved").await
    }

    async fn fetch_damage_reports(&self, item_id: i64) -> AppResult<Vec<DamageReport>> {
        self.get_json(&format!("/items/{}/damage-reports", item_id))
            .await
    }

    async fn fetch_transactions(&self, item_id: i64) -> AppResult<Vec<StockTransaction>> {
        self.get_json(&format!("/items/{}/transactions", item_id))
            .await
    }

    #[cfg(test)]
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self.client.get(&url);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Request to {} failed: {}", path, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "{} returned {}: {}",
                path, status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to decode {} response: {}", path, e)))
    }
}
