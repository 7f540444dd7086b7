//! Neo4j HTTP client
//!
//! Speaks the Neo4j HTTP transactional endpoint
//! (`POST /db/<database>/tx/commit`) with basic auth. One statement per
//! request is all the import pipeline needs; each step of the idempotent
//! sequence is its own auto-committed transaction.

use crate::adapters::graphstore::record::Record;
use crate::adapters::graphstore::traits::GraphSession;
use crate::config::secret::SecretString;
use crate::domain::{GraphStoreError, Result};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct TxResponse {
    #[serde(default)]
    results: Vec<TxResult>,
    #[serde(default)]
    errors: Vec<TxError>,
}

#[derive(Debug, Deserialize)]
struct TxResult {
    columns: Vec<String>,
    #[serde(default)]
    data: Vec<TxRow>,
}

#[derive(Debug, Deserialize)]
struct TxRow {
    row: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct TxError {
    code: String,
    message: String,
}

/// Client for the Neo4j HTTP transactional endpoint
pub struct Neo4jHttpClient {
    http: reqwest::Client,
    commit_url: String,
    username: String,
    password: SecretString,
}

impl Neo4jHttpClient {
    /// Creates a client for `base_url` (e.g. `http://neo4j:7474`) and the
    /// named database
    ///
    /// # Errors
    ///
    /// Returns a configuration-shaped connection error if the underlying
    /// HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        database: &str,
        username: impl Into<String>,
        password: SecretString,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GraphStoreError::ConnectionFailed(e.to_string()))?;
        let commit_url = format!(
            "{}/db/{}/tx/commit",
            base_url.trim_end_matches('/'),
            database
        );
        Ok(Self {
            http,
            commit_url,
            username: username.into(),
            password,
        })
    }

    /// Endpoint queries are committed against
    pub fn commit_url(&self) -> &str {
        &self.commit_url
    }
}

#[async_trait]
impl GraphSession for Neo4jHttpClient {
    async fn run_query(&self, query: &str) -> Result<Vec<Record>> {
        tracing::debug!(url = %self.commit_url, query, "Running graph store query");

        let body = json!({ "statements": [{ "statement": query }] });
        let response = self
            .http
            .post(&self.commit_url)
            .basic_auth(&self.username, Some(self.password.expose_secret().as_ref()))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GraphStoreError::Timeout(e.to_string())
                } else {
                    GraphStoreError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(GraphStoreError::AuthenticationFailed(format!(
                "graph store returned {status}"
            ))
            .into());
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(GraphStoreError::QueryFailed(format!(
                "graph store returned {status}: {text}"
            ))
            .into());
        }

        let parsed: TxResponse = response.json().await.map_err(|e| {
            GraphStoreError::UnexpectedRecord(format!("unparseable response body: {e}"))
        })?;

        if let Some(error) = parsed.errors.first() {
            return Err(GraphStoreError::QueryFailed(format!(
                "{}: {}",
                error.code, error.message
            ))
            .into());
        }

        let result = match parsed.results.into_iter().next() {
            Some(result) => result,
            None => return Ok(Vec::new()),
        };
        let records = result
            .data
            .into_iter()
            .map(|row| Record::from_columns(&result.columns, row.row))
            .collect();
        Ok(records)
    }
}
