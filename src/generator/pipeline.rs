use serde::{Deserialize, Serialize};

use crate::chunker::Chunker;
use crate::completion::{CompletionBackend, CompletionRequest};
use crate::persona::{answer_prompt, question_prompt, Persona};

use super::format::format_answer;
use super::DEFAULT_MAX_CHUNKS;

/// One generated question/answer exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

/// All exchanges generated for a single persona.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaInterview {
    pub persona: String,
    pub interview: Vec<QaPair>,
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Model name requested from the completion server
    pub model: String,
    /// Sampling temperature for both question and answer calls
    pub temperature: f32,
    /// Number of leading chunks sampled per document
    pub max_chunks: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model: "qwen3-1.7b".to_string(),
            temperature: 0.5,
            max_chunks: DEFAULT_MAX_CHUNKS,
        }
    }
}

/// Interviews generated for one document, plus counters for the
/// training-set manifest.
#[derive(Debug, Default)]
pub struct GenerationOutcome {
    pub interviews: Vec<PersonaInterview>,
    /// Questions parsed from question completions, whether or not the
    /// answer call later succeeded.
    pub question_count: usize,
}

/// Generate persona interviews for one document.
///
/// Each persona sees the first `max_chunks` chunks of the document. For
/// every chunk the backend is asked for questions, then for an answer to
/// each question, with the question kept paired to the chunk it came
/// from. A failed completion call is logged and skipped so one bad chunk
/// never aborts the batch.
pub async fn generate_interviews<B: CompletionBackend>(
    backend: &B,
    chunker: &Chunker,
    personas: &[Persona],
    document: &str,
    config: &GeneratorConfig,
) -> GenerationOutcome {
    let chunks = chunker.chunk(document);
    let sampled = &chunks[..chunks.len().min(config.max_chunks)];

    let mut interviews: Vec<PersonaInterview> = Vec::new();
    let mut question_count = 0;

    for persona in personas {
        let mut pairs = Vec::new();

        for chunk in sampled {
            let request = CompletionRequest {
                model: config.model.clone(),
                prompt: question_prompt(persona, chunk),
                temperature: config.temperature,
            };
            let questions = match backend.complete(request).await {
                Ok(text) => parse_questions(&text),
                Err(e) => {
                    eprintln!(
                        "[generator] Question generation failed for '{}': {}",
                        persona.name, e
                    );
                    continue;
                }
            };
            question_count += questions.len();

            for question in questions {
                let request = CompletionRequest {
                    model: config.model.clone(),
                    prompt: answer_prompt(persona, &question, chunk),
                    temperature: config.temperature,
                };
                match backend.complete(request).await {
                    Ok(text) => pairs.push(QaPair {
                        question,
                        answer: format_answer(text.trim()),
                    }),
                    Err(e) => {
                        eprintln!(
                            "[generator] Answer generation failed for '{}': {}",
                            persona.name, e
                        );
                    }
                }
            }
        }

        eprintln!(
            "[generator] ✓ Generated {} pairs for '{}'",
            pairs.len(),
            persona.name
        );
        merge_interviews(
            &mut interviews,
            vec![PersonaInterview {
                persona: persona.name.clone(),
                interview: pairs,
            }],
        );
    }

    GenerationOutcome {
        interviews,
        question_count,
    }
}

/// Merge new interviews into an accumulator, extending an existing
/// persona's entry rather than duplicating it.
pub fn merge_interviews(accumulator: &mut Vec<PersonaInterview>, new: Vec<PersonaInterview>) {
    for interview in new {
        match accumulator.iter_mut().find(|i| i.persona == interview.persona) {
            Some(existing) => existing.interview.extend(interview.interview),
            None => accumulator.push(interview),
        }
    }
}

/// Split a questions completion into individual questions, stripping any
/// leading "1." / "2)" style numbering and dropping blank lines.
pub(super) fn parse_questions(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| strip_numbering(line).to_string())
        .collect()
}

/// Remove a leading "N." or "N)" marker. Lines where digits are not
/// followed by the marker punctuation are left untouched.
fn strip_numbering(line: &str) -> &str {
    let rest = line.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() == line.len() {
        return line;
    }
    match rest.strip_prefix(['.', ')']) {
        Some(tail) => tail.trim_start(),
        None => line,
    }
}
