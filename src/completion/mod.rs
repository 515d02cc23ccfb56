mod client;
mod types;

pub use client::{CompletionClient, CompletionError};
pub use types::{
    ChatMessage, ChatRequest, ChatResponse, CompletionRequest, CompletionResponse, HealthResponse,
};

use async_trait::async_trait;

/// Injected text-generation seam: submit a prompt (or a chat message
/// list), receive a completion string. The batch generator and the chat
/// session are written against this trait so tests can script the
/// provider.
#[async_trait]
pub trait CompletionBackend {
    /// Single-prompt completion used by the batch generator.
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError>;

    /// Message-list completion used by the chat session.
    async fn chat(&self, request: ChatRequest) -> Result<String, CompletionError>;
}
