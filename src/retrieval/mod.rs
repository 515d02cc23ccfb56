mod client;
mod types;

pub use client::SearchClient;
pub use types::{SearchMatch, SearchRequest, SearchResponse};
