// Public API exports
pub mod chat;
pub mod chunker;
pub mod completion;
pub mod dataset;
pub mod generator;
pub mod persona;
pub mod retrieval;
pub mod source;

// Re-export main types for convenience
pub use chunker::{Chunker, ChunkerError, DEFAULT_MAX_CHUNK_SIZE, DEFAULT_OVERLAP_SIZE};

pub use persona::{Persona, PersonaRoster, DEFAULT_SYSTEM_PROMPT};

pub use completion::{
    ChatMessage, ChatRequest, CompletionBackend, CompletionClient, CompletionError,
    CompletionRequest,
};

pub use retrieval::{SearchClient, SearchMatch};

pub use generator::{
    format_answer, generate_interviews, merge_interviews, GenerationOutcome, GeneratorConfig,
    PersonaInterview, QaPair, DEFAULT_MAX_CHUNKS,
};

pub use dataset::{Manifest, TrainingSetReader, TrainingSetWriter};

pub use chat::{ChatSession, ChatTurn, FALLBACK_REPLY};

pub use source::{collect_documents, SourceDocument};
