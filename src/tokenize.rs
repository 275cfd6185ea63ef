/// Split `text` into words on runs of whitespace.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_owned).collect()
}

/// The sentence a test is run against
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SampleText {
    text: String,
    words: Vec<String>,
}

impl SampleText {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_owned(),
            words: tokenize(text),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Words typed so far, derived from the raw input buffer
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypedInput {
    pub words: Vec<String>,
    /// true when the buffer ends in whitespace, i.e. the last word was committed
    pub last_word_complete: bool,
}

impl TypedInput {
    pub fn from_buffer(buffer: &str) -> Self {
        Self {
            words: tokenize(buffer),
            last_word_complete: buffer.ends_with(char::is_whitespace),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
