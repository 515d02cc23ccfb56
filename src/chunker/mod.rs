mod splitter;

#[cfg(test)]
mod tests;

pub use splitter::{Chunker, ChunkerError};

/// Default maximum characters per chunk
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 4000;

/// Default characters carried from one chunk into the next
pub const DEFAULT_OVERLAP_SIZE: usize = 200;
