use uuid::Uuid;

use crate::completion::{ChatMessage, ChatRequest, CompletionBackend};
use crate::persona::Persona;
use crate::retrieval::SearchClient;

/// Reply surfaced to the user when the completion call fails.
pub const FALLBACK_REPLY: &str = "Sorry, I couldn't generate a response.";

/// Number of retrieved passages folded into the model context.
const CONTEXT_PASSAGES: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurn {
    pub user: String,
    pub bot: String,
}

/// A single-user conversation with one persona. History is kept in
/// memory only; the caller can render a transcript for saving.
pub struct ChatSession {
    pub id: Uuid,
    persona: Persona,
    history: Vec<ChatTurn>,
    model: String,
    temperature: f32,
}

impl ChatSession {
    pub fn new(persona: Persona, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            id: Uuid::new_v4(),
            persona,
            history: Vec::new(),
            model: model.into(),
            temperature,
        }
    }

    pub fn persona_name(&self) -> &str {
        &self.persona.name
    }

    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    /// Start a fresh conversation with the same persona.
    pub fn clear(&mut self) {
        self.id = Uuid::new_v4();
        self.history.clear();
    }

    /// Prior turns flattened ahead of the new query, oldest first.
    fn context_line(&self, query: &str) -> String {
        let mut context = String::new();
        for turn in &self.history {
            context.push_str("User: ");
            context.push_str(&turn.user);
            context.push_str(" Bot: ");
            context.push_str(&turn.bot);
            context.push(' ');
        }
        context.push_str(query);
        context
    }

    /// Message list for one query: persona system prompt, retrieved
    /// passages when available, then the history-laden user message.
    pub(super) fn build_messages(&self, query: &str, passages: &[String]) -> Vec<ChatMessage> {
        let mut messages = vec![ChatMessage::system(self.persona.system_prompt())];
        if !passages.is_empty() {
            messages.push(ChatMessage::system(format!(
                "Relevant passages:\n{}",
                passages.join("\n---\n")
            )));
        }
        messages.push(ChatMessage::user(self.context_line(query)));
        messages
    }

    /// Send one user query. On failure the fallback reply is returned
    /// and the exchange is not recorded in history.
    pub async fn send<B: CompletionBackend>(
        &mut self,
        backend: &B,
        index: Option<&SearchClient>,
        query: &str,
    ) -> String {
        let passages = match index {
            Some(client) => match client.search(query, CONTEXT_PASSAGES).await {
                Ok(matches) => matches.into_iter().map(|m| m.text).collect(),
                Err(e) => {
                    eprintln!("[chat] Retrieval failed, continuing without context: {}", e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let request = ChatRequest {
            model: self.model.clone(),
            messages: self.build_messages(query, &passages),
            temperature: self.temperature,
        };

        match backend.chat(request).await {
            Ok(reply) => {
                let reply = reply.trim().to_string();
                self.history.push(ChatTurn {
                    user: query.to_string(),
                    bot: reply.clone(),
                });
                reply
            }
            Err(e) => {
                eprintln!("[chat] Error generating response: {}", e);
                FALLBACK_REPLY.to_string()
            }
        }
    }

    /// Plain-text transcript, one blank line between exchanges.
    pub fn transcript(&self) -> String {
        self.history
            .iter()
            .map(|turn| format!("User: {}\nBot: {}", turn.user, turn.bot))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
