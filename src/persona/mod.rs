mod profile;
mod prompts;

#[cfg(test)]
mod tests;

pub use profile::{Persona, PersonaRoster};
pub use prompts::{answer_prompt, question_prompt, DEFAULT_SYSTEM_PROMPT};
