/// Normalize a generated answer: split it into sentences, capitalize
/// each one, and re-join with single spaces.
pub fn format_answer(answer: &str) -> String {
    split_sentences(answer)
        .into_iter()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split after sentence-ending punctuation followed by spaces. The
/// punctuation stays attached to its sentence; the space run between
/// sentences is consumed.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((_, ch)) = chars.next() {
        if !matches!(ch, '.' | '!' | '?') {
            continue;
        }
        if let Some(&(boundary, ' ')) = chars.peek() {
            sentences.push(&text[start..boundary]);
            while matches!(chars.peek(), Some(&(_, ' '))) {
                chars.next();
            }
            start = chars.peek().map(|&(i, _)| i).unwrap_or(text.len());
        }
    }

    if start < text.len() {
        sentences.push(&text[start..]);
    }
    sentences
}

/// First character uppercased, the remainder lowercased.
fn capitalize(sentence: &str) -> String {
    let mut chars = sentence.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalizes_each_sentence() {
        assert_eq!(
            format_answer("hello there. how are you? fine!"),
            "Hello there. How are you? Fine!"
        );
    }

    #[test]
    fn lowercases_sentence_remainders() {
        assert_eq!(
            format_answer("the Market said YES. indeed"),
            "The market said yes. Indeed"
        );
    }

    #[test]
    fn single_sentence_without_punctuation() {
        assert_eq!(format_answer("just one line"), "Just one line");
    }

    #[test]
    fn collapses_space_runs_between_sentences() {
        assert_eq!(format_answer("one.   two."), "One. Two.");
    }

    #[test]
    fn punctuation_without_space_is_not_a_boundary() {
        assert_eq!(format_answer("v1.2 shipped. nice"), "V1.2 shipped. Nice");
    }

    #[test]
    fn empty_answer_stays_empty() {
        assert_eq!(format_answer(""), "");
    }
}
