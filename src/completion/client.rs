use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

use super::types::{
    ChatRequest, ChatResponse, CompletionRequest, CompletionResponse, HealthResponse,
};
use super::CompletionBackend;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Server returned error status {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Server returned an empty completion")]
    EmptyCompletion,
}

/// HTTP client for a text-generation server.
pub struct CompletionClient {
    http: Client,
    endpoint: String,
}

impl CompletionClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_timeout(endpoint, Duration::from_secs(180)) // 3 min for LLM generation
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    /// Check if the completion server is healthy
    pub async fn health_check(&self) -> Result<HealthResponse, CompletionError> {
        let response = self
            .http
            .get(format!("{}/health", self.endpoint))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(CompletionError::ServerError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }

    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &impl serde::Serialize,
    ) -> Result<T, CompletionError> {
        let response = self
            .http
            .post(format!("{}{}", self.endpoint, path))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(CompletionError::ServerError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl CompletionBackend for CompletionClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        let res: CompletionResponse = self.post_json("/complete", &request).await?;
        if res.completion.trim().is_empty() {
            return Err(CompletionError::EmptyCompletion);
        }
        Ok(res.completion)
    }

    async fn chat(&self, request: ChatRequest) -> Result<String, CompletionError> {
        let res: ChatResponse = self.post_json("/chat", &request).await?;
        if res.content.trim().is_empty() {
            return Err(CompletionError::EmptyCompletion);
        }
        Ok(res.content)
    }
}
