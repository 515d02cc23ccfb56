mod format;
mod pipeline;


pub use format::format_answer;
pub use pipeline::{
    generate_interviews, merge_interviews, GenerationOutcome, GeneratorConfig, PersonaInterview,
    QaPair,
};

/// Default number of leading chunks sampled per document
pub const DEFAULT_MAX_CHUNKS: usize = 10;
