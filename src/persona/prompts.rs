use super::Persona;

/// Fallback system prompt for personas without one of their own.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a chatbot.";

/// Prompt asking the model to produce fine-tuning questions for a passage.
pub fn question_prompt(persona: &Persona, passage: &str) -> String {
    format!(
        "Generate questions based on the following passage to fine-tune an LLM to respond like {}:\n{}\n\n",
        persona.attribute_block(),
        passage
    )
}

/// Prompt asking the model to answer a question in the persona's voice,
/// grounded in the passage the question came from.
pub fn answer_prompt(persona: &Persona, question: &str, passage: &str) -> String {
    format!(
        "Question: {}\nPassage: {}\nPersona: {}\nAnswer the question exactly like the persona would in the source text, keeping the same tone and slang:",
        question,
        passage,
        persona.attribute_block()
    )
}
