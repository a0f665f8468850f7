//! Which question/answer pairs make it into the puzzle.
//!
//! A [`ValidationPolicy`] cleans and filters the raw entries of a
//! [`QuestionSet`](crate::QuestionSet). The three [`Profile`]s capture the
//! rule sets used so far, from the most forgiving to the most demanding.

use crate::QuestionItem;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use topic2crossword_core::WordEntry;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PolicyError {
    #[error("Only {found} valid questions, at least {required} are needed")]
    TooFewQuestions { found: usize, required: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Length and character checks only.
    Basic,
    /// Adds duplicate suppression and a tighter length cap.
    #[default]
    Standard,
    /// Ten questions minimum, each phrased as a question.
    Strict,
}

impl Profile {
    pub const ALL: [Profile; 3] = [Profile::Basic, Profile::Standard, Profile::Strict];

    pub fn name(&self) -> &'static str {
        match self {
            Profile::Basic => "basic",
            Profile::Standard => "standard",
            Profile::Strict => "strict",
        }
    }

    pub fn policy(&self) -> ValidationPolicy {
        match self {
            Profile::Basic => ValidationPolicy {
                min_questions: 8,
                min_answer_len: 3,
                max_answer_len: 20,
                alphabetic_only: true,
                require_question_mark: false,
                dedupe: false,
            },
            Profile::Standard => ValidationPolicy {
                min_questions: 8,
                min_answer_len: 3,
                max_answer_len: 15,
                alphabetic_only: true,
                require_question_mark: false,
                dedupe: true,
            },
            Profile::Strict => ValidationPolicy {
                min_questions: 10,
                min_answer_len: 3,
                max_answer_len: 15,
                alphabetic_only: true,
                require_question_mark: true,
                dedupe: true,
            },
        }
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Profile::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown profile '{}' (expected basic, standard or strict)", s))
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationPolicy {
    pub min_questions: usize,
    /// Bounds on the answer length once whitespace is removed, inclusive.
    pub min_answer_len: usize,
    pub max_answer_len: usize,
    pub alphabetic_only: bool,
    pub require_question_mark: bool,
    pub dedupe: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Profile::default().policy()
    }
}

/// Why an entry was left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    EmptyAnswer,
    EmptyQuestion,
    TooShort { len: usize, min: usize },
    TooLong { len: usize, max: usize },
    NonAlphabetic,
    MissingQuestionMark,
    /// Same normalized answer as the entry at `first_index`.
    Duplicate { first_index: usize },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::EmptyAnswer => write!(f, "answer is empty"),
            RejectReason::EmptyQuestion => write!(f, "question is empty"),
            RejectReason::TooShort { len, min } => {
                write!(f, "answer has {} letters, minimum is {}", len, min)
            }
            RejectReason::TooLong { len, max } => {
                write!(f, "answer has {} letters, maximum is {}", len, max)
            }
            RejectReason::NonAlphabetic => {
                write!(f, "answer contains characters other than letters")
            }
            RejectReason::MissingQuestionMark => write!(f, "question does not end with '?'"),
            RejectReason::Duplicate { first_index } => {
                write!(f, "duplicate of item {}", first_index)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// Position of the entry in the question set.
    pub index: usize,
    pub answer: String,
    pub reason: RejectReason,
}

/// Outcome of applying a policy: usable word/clue pairs plus what was dropped.
#[derive(Debug, Clone, Default)]
pub struct Filtered {
    pub accepted: Vec<WordEntry>,
    pub rejected: Vec<Rejection>,
}

impl Filtered {
    pub fn check_minimum(&self, policy: &ValidationPolicy) -> Result<(), PolicyError> {
        if self.accepted.len() < policy.min_questions {
            return Err(PolicyError::TooFewQuestions {
                found: self.accepted.len(),
                required: policy.min_questions,
            });
        }
        Ok(())
    }

}

/// Uppercase an answer and drop every whitespace character.
pub fn normalize_answer(answer: &str) -> String {
    WordEntry::new(answer, String::new()).word
}

impl ValidationPolicy {
    pub fn apply(&self, items: &[QuestionItem]) -> Filtered {
        let mut filtered = Filtered::default();
        let mut seen: HashMap<String, usize> = HashMap::new();

        for (index, item) in items.iter().enumerate() {
            let clue = item.question.trim();
            let answer = normalize_answer(&item.answer);

            match self.check(clue, &item.answer, &answer, &seen) {
                Ok(()) => {
                    seen.insert(answer.clone(), index);
                    filtered.accepted.push(WordEntry::new(&answer, clue));
                }
                Err(reason) => filtered.rejected.push(Rejection {
                    index,
                    answer: item.answer.clone(),
                    reason,
                }),
            }
        }

        filtered
    }

    /// Length and letters are judged on `raw` minus whitespace, before
    /// uppercasing can expand characters such as `ß`.
    fn check(
        &self,
        clue: &str,
        raw: &str,
        answer: &str,
        seen: &HashMap<String, usize>,
    ) -> Result<(), RejectReason> {
        let letters: Vec<char> = raw.chars().filter(|c| !c.is_whitespace()).collect();
        let len = letters.len();
        if len == 0 {
            return Err(RejectReason::EmptyAnswer);
        }
        if clue.is_empty() {
            return Err(RejectReason::EmptyQuestion);
        }
        if len < self.min_answer_len {
            return Err(RejectReason::TooShort {
                len,
                min: self.min_answer_len,
            });
        }
        if len > self.max_answer_len {
            return Err(RejectReason::TooLong {
                len,
                max: self.max_answer_len,
            });
        }
        if self.alphabetic_only && !letters.iter().all(char::is_ascii_alphabetic) {
            return Err(RejectReason::NonAlphabetic);
        }
        if self.require_question_mark && !clue.ends_with('?') {
            return Err(RejectReason::MissingQuestionMark);
        }
        if self.dedupe {
            if let Some(&first_index) = seen.get(answer) {
                return Err(RejectReason::Duplicate { first_index });
            }
        }
        Ok(())
    }
}
