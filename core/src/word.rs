use serde::{Deserialize, Serialize};

/// An answer and its clue, as handed to the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    pub clue: String,
}

impl WordEntry {
    /// Builds an entry, uppercasing the word and dropping any whitespace in it.
    pub fn new(word: impl AsRef<str>, clue: impl Into<String>) -> Self {
        Self {
            word: word
                .as_ref()
                .chars()
                .filter(|c| !c.is_whitespace())
                .flat_map(char::to_uppercase)
                .collect(),
            clue: clue.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.word.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }
}
