use super::*;

fn chunk(text: &str, max: usize, overlap: usize) -> Vec<String> {
    Chunker::new(max, overlap).unwrap().chunk(text)
}

#[test]
fn empty_document_yields_no_chunks() {
    assert!(chunk("", 100, 10).is_empty());
}

#[test]
fn whitespace_only_document_yields_no_chunks() {
    assert!(chunk("  \n\t  ", 100, 10).is_empty());
}

#[test]
fn single_word_fits_in_one_chunk() {
    assert_eq!(chunk("a", 100, 10), vec!["a"]);
}

#[test]
fn words_are_joined_with_single_spaces() {
    assert_eq!(chunk("a  b\nc", 100, 0), vec!["a b c"]);
}

#[test]
fn overlap_is_a_character_slice_of_the_accumulator() {
    // Hand-traced: "the quick " flushes when "brown" arrives; the next
    // accumulator starts with the last three characters "ck " of the
    // raw, space-padded accumulator, landing mid-word.
    assert_eq!(
        chunk("the quick brown fox jumps", 10, 3),
        vec!["the quick", "ck brown", "wn fox", "ox jumps"]
    );
}

#[test]
fn zero_overlap_never_duplicates_text() {
    assert_eq!(chunk("aa bb cc dd ee", 6, 0), vec!["aa bb", "cc dd", "ee"]);
}

#[test]
fn oversized_word_is_never_split() {
    let chunks = chunk("supercalifragilisticexpialidocious", 5, 2);
    // The empty accumulator flushes first, then the word lands whole in
    // a chunk larger than the configured maximum.
    assert_eq!(chunks, vec!["", "supercalifragilisticexpialidocious"]);
    assert!(chunks[1].len() > 5);
}

#[test]
fn oversized_word_mid_document_keeps_neighbors() {
    assert_eq!(
        chunk("ab extraordinarily cd", 4, 0),
        vec!["ab", "extraordinarily", "cd"]
    );
}

#[test]
fn no_word_is_dropped() {
    let text = "alpha beta gamma delta epsilon zeta eta theta";
    for (max, overlap) in [(10, 0), (10, 3), (12, 6), (80, 20)] {
        let chunks = chunk(text, max, overlap);
        // Overlap may duplicate characters or whole words, so the chunk
        // word stream is a superset: the original word sequence must
        // survive as an in-order subsequence.
        let mut remaining = text.split_whitespace().peekable();
        for word in chunks.iter().flat_map(|c| c.split_whitespace()) {
            if remaining.peek() == Some(&word) {
                remaining.next();
            }
        }
        assert!(
            remaining.peek().is_none(),
            "dropped word with max={max} overlap={overlap}"
        );
    }
}

#[test]
fn rechunking_a_returned_chunk_is_identity() {
    for c in chunk("the quick brown fox jumps over the lazy dog", 12, 4) {
        assert!(c.chars().count() <= 12);
        assert_eq!(chunk(&c, 12, 4), vec![c.clone()]);
    }
}

#[test]
fn whitespace_only_overlap_is_trimmed_away() {
    // An overlap of one character carries only the trailing space of the
    // previous accumulator; trimming leaves a clean chunk.
    assert_eq!(chunk("aaa bbb", 4, 1), vec!["aaa", "bbb"]);
}

#[test]
fn overlap_counts_characters_not_bytes() {
    // Two-byte characters: a byte-indexed slice of the accumulator would
    // split a code point here.
    assert_eq!(chunk("éé ûû öö", 3, 2), vec!["éé", "é ûû", "û öö"]);
}

#[test]
fn overlap_longer_than_accumulator_carries_it_whole() {
    assert_eq!(chunk("aa bb cc", 5, 100), vec!["aa", "aa bb", "aa bb cc"]);
}

#[test]
fn zero_max_chunk_size_is_rejected() {
    assert!(matches!(
        Chunker::new(0, 10),
        Err(ChunkerError::ZeroMaxChunkSize)
    ));
    assert!(Chunker::new(1, 0).is_ok());
}
