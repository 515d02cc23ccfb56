mod session;

#[cfg(test)]
mod tests;

pub use session::{ChatSession, ChatTurn, FALLBACK_REPLY};
