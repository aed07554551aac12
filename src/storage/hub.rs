// src/storage/hub.rs

//! Hugging Face Hub corpus publication.
//!
//! Pushes the merged corpus file to a Space repo through the Hub commit API
//! (one NDJSON body carrying a commit header and the base64-encoded file).
//! Publication runs after the local corpus is already durable, so any
//! failure here is reported but never touches the persisted file.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use serde_json::json;

use crate::error::{AppError, Result};
use crate::models::PublishConfig;

/// Environment variable holding the Hub access token.
pub const TOKEN_ENV: &str = "HF_TOKEN";

/// Publisher for the corpus file on the Hugging Face Hub.
pub struct HubPublisher {
    client: Client,
    endpoint: String,
    repo_id: String,
    path_in_repo: String,
    token: String,
}

impl HubPublisher {
    /// Create a publisher, reading the access token from `HF_TOKEN`.
    pub fn from_env(config: &PublishConfig, client: Client) -> Result<Self> {
        let token = std::env::var(TOKEN_ENV)
            .map_err(|_| AppError::publish(format!("{TOKEN_ENV} is not set")))?;
        if config.repo_id.trim().is_empty() {
            return Err(AppError::publish("publish.repo_id is empty"));
        }
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            repo_id: config.repo_id.clone(),
            path_in_repo: config.path_in_repo.clone(),
            token,
        })
    }

    /// Commit the corpus bytes to the repo's main branch.
    pub async fn publish(&self, bytes: &[u8]) -> Result<()> {
        let url = format!(
            "{}/api/spaces/{}/commit/main",
            self.endpoint.trim_end_matches('/'),
            self.repo_id
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .header(reqwest::header::CONTENT_TYPE, "application/x-ndjson")
            .body(self.commit_body(bytes))
            .send()
            .await
            .map_err(|e| AppError::publish(format!("commit request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::publish(format!(
                "commit to {} rejected with {status}: {detail}",
                self.repo_id
            )));
        }

        log::info!(
            "Published {} bytes to {}/{}",
            bytes.len(),
            self.repo_id,
            self.path_in_repo
        );
        Ok(())
    }

    /// NDJSON commit payload: header line, then one file operation.
    fn commit_body(&self, bytes: &[u8]) -> String {
        let header = json!({
            "key": "header",
            "value": {
                "summary": "Weekly update: new books scraped",
                "description": "",
            }
        });
        let file = json!({
            "key": "file",
            "value": {
                "path": self.path_in_repo,
                "content": STANDARD.encode(bytes),
                "encoding": "base64",
            }
        });
        format!("{header}\n{file}")
    }
}
