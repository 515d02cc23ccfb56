use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChunkerError {
    #[error("max_chunk_size must be greater than zero")]
    ZeroMaxChunkSize,
}

/// Splits a document into an ordered sequence of overlapping,
/// bounded-length chunks of whitespace-joined words.
#[derive(Debug, Clone)]
pub struct Chunker {
    max_chunk_size: usize,
    overlap_size: usize,
}

impl Chunker {
    pub fn new(max_chunk_size: usize, overlap_size: usize) -> Result<Self, ChunkerError> {
        if max_chunk_size == 0 {
            return Err(ChunkerError::ZeroMaxChunkSize);
        }
        Ok(Self {
            max_chunk_size,
            overlap_size,
        })
    }

    pub fn max_chunk_size(&self) -> usize {
        self.max_chunk_size
    }

    pub fn overlap_size(&self) -> usize {
        self.overlap_size
    }

    /// Chunk a document for prompt-size limits.
    ///
    /// Words accumulate, separated by single spaces, until appending the
    /// next word plus its separator would push the accumulator past
    /// `max_chunk_size` characters. The accumulator is then flushed as a
    /// trimmed chunk and the next accumulator is seeded with the last
    /// `overlap_size` *characters* of the previous, untrimmed accumulator.
    /// The seed is a raw character slice and can start mid-word.
    ///
    /// A word longer than `max_chunk_size` is never split; it lands whole
    /// in an oversized chunk of its own.
    pub fn chunk(&self, document: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current = String::new();

        for word in document.split_whitespace() {
            // The +1 accounts for the separating space.
            if char_len(&current) + char_len(word) + 1 <= self.max_chunk_size {
                current.push_str(word);
                current.push(' ');
            } else {
                chunks.push(current.trim().to_string());
                let mut seeded = tail_chars(&current, self.overlap_size);
                seeded.push_str(word);
                seeded.push(' ');
                current = seeded;
            }
        }

        if !current.is_empty() {
            chunks.push(current.trim().to_string());
        }

        chunks
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Last `count` characters of `text` as an owned string. Counted in
/// characters, not bytes, so the slice never lands inside a code point.
fn tail_chars(text: &str, count: usize) -> String {
    let skip = char_len(text).saturating_sub(count);
    text.chars().skip(skip).collect()
}
