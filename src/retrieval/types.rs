// Wire contract of the vector-index server
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub top_k: usize,
}

/// One ranked result from the index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchMatch {
    pub id: String,
    pub score: f32,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub matches: Vec<SearchMatch>,
}
