/// Classification of a single sample word against what has been typed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WordState {
    /// not reached yet, or still being typed and valid so far
    Pending,
    Correct,
    Incorrect,
}

/// Classify every sample word against the typed words.
///
/// Words are compared by position and must match exactly. The last typed word
/// is only judged once it is complete; until then it stays `Pending` while it
/// is still a prefix of the expected word.
pub fn classify(
    sample_words: &[String],
    typed_words: &[String],
    last_word_complete: bool,
) -> Vec<WordState> {
    let in_progress = if last_word_complete {
        None
    } else {
        typed_words.len().checked_sub(1)
    };

    sample_words
        .iter()
        .enumerate()
        .map(|(idx, expected)| match typed_words.get(idx) {
            None => WordState::Pending,
            Some(typed) if Some(idx) == in_progress => {
                if expected.starts_with(typed.as_str()) {
                    WordState::Pending
                } else {
                    WordState::Incorrect
                }
            }
            Some(typed) if typed == expected => WordState::Correct,
            Some(_) => WordState::Incorrect,
        })
        .collect()
}

/// Number of positions where the typed word equals the sample word.
/// Only the overlapping range counts, whether or not the last word was committed.
pub fn correct_word_count(sample_words: &[String], typed_words: &[String]) -> usize {
    sample_words
        .iter()
        .zip(typed_words)
        .filter(|(expected, typed)| expected == typed)
        .count()
}
