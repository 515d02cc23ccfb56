use reqwest::Client;

use super::types::{SearchMatch, SearchRequest, SearchResponse};

/// HTTP client for a vector-index server: query in, ranked results out.
pub struct SearchClient {
    http: Client,
    endpoint: String,
}

impl SearchClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Fetch the `top_k` passages ranked against `query`, best first.
    pub async fn search(&self, query: &str, top_k: usize) -> anyhow::Result<Vec<SearchMatch>> {
        let req = SearchRequest {
            query: query.to_string(),
            top_k,
        };
        let res: SearchResponse = self
            .http
            .post(format!("{}/query", self.endpoint))
            .json(&req)
            .send()
            .await?
            .json()
            .await?;

        Ok(res.matches)
    }
}
