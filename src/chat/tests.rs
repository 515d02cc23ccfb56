use async_trait::async_trait;
use std::sync::Mutex;

use super::*;
use crate::completion::{ChatRequest, CompletionBackend, CompletionError, CompletionRequest};
use crate::persona::Persona;

/// Echoing provider that records every chat request it receives.
struct RecordingBackend {
    requests: Mutex<Vec<ChatRequest>>,
    fail: bool,
}

impl RecordingBackend {
    fn new(fail: bool) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail,
        }
    }

    fn last_request(&self) -> ChatRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl CompletionBackend for RecordingBackend {
    async fn complete(&self, _request: CompletionRequest) -> Result<String, CompletionError> {
        Ok("unused".to_string())
    }

    async fn chat(&self, request: ChatRequest) -> Result<String, CompletionError> {
        self.requests.lock().unwrap().push(request);
        if self.fail {
            return Err(CompletionError::EmptyCompletion);
        }
        Ok("  a reply  ".to_string())
    }
}

fn session() -> ChatSession {
    let persona =
        Persona::new("robert").with_attribute("system_prompt", "You are Robert Kiyosaki.");
    ChatSession::new(persona, "qwen3-1.7b", 0.7)
}

#[tokio::test]
async fn records_trimmed_replies_in_history() {
    let backend = RecordingBackend::new(false);
    let mut session = session();

    let reply = session.send(&backend, None, "what is an asset?").await;
    assert_eq!(reply, "a reply");
    assert_eq!(
        session.history(),
        &[ChatTurn {
            user: "what is an asset?".to_string(),
            bot: "a reply".to_string(),
        }]
    );
}

#[tokio::test]
async fn context_carries_prior_turns() {
    let backend = RecordingBackend::new(false);
    let mut session = session();

    session.send(&backend, None, "first").await;
    session.send(&backend, None, "second").await;

    let request = backend.last_request();
    assert_eq!(request.messages[0].role, "system");
    assert_eq!(request.messages[0].content, "You are Robert Kiyosaki.");
    let user = &request.messages[request.messages.len() - 1];
    assert_eq!(user.role, "user");
    assert_eq!(user.content, "User: first Bot: a reply second");
}

#[tokio::test]
async fn failure_returns_fallback_and_keeps_history_clean() {
    let backend = RecordingBackend::new(true);
    let mut session = session();

    let reply = session.send(&backend, None, "hello").await;
    assert_eq!(reply, FALLBACK_REPLY);
    assert!(session.history().is_empty());
}

#[tokio::test]
async fn clear_starts_a_new_conversation() {
    let backend = RecordingBackend::new(false);
    let mut session = session();

    session.send(&backend, None, "hello").await;
    let old_id = session.id;
    session.clear();

    assert!(session.history().is_empty());
    assert_ne!(session.id, old_id);
}

#[test]
fn retrieved_passages_become_a_system_message() {
    let session = session();
    let passages = vec!["passage one".to_string(), "passage two".to_string()];

    let messages = session.build_messages("query", &passages);
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].role, "system");
    assert_eq!(
        messages[1].content,
        "Relevant passages:\npassage one\n---\npassage two"
    );
}

#[tokio::test]
async fn transcript_renders_user_bot_exchanges() {
    let mut session = session();
    let backend = RecordingBackend::new(false);
    session.send(&backend, None, "q1").await;
    session.send(&backend, None, "q2").await;

    assert_eq!(
        session.transcript(),
        "User: q1\nBot: a reply\n\nUser: q2\nBot: a reply"
    );
}
