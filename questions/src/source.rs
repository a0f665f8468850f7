use crate::error::FileError;
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

/// One trivia entry as found in the input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionItem {
    pub question: String,
    pub answer: String,
}

impl QuestionItem {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Csv,
}

impl SourceFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(SourceFormat::Json),
            "csv" => Some(SourceFormat::Csv),
            _ => None,
        }
    }

    /// Format for `path`, falling back to JSON when the extension says nothing.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|s| s.to_str())
            .and_then(Self::from_extension)
            .unwrap_or(SourceFormat::Json)
    }
}

/// The usable entries of a question file.
#[derive(Debug, Clone, Default)]
pub struct QuestionSet {
    pub name: String,
    pub items: Vec<QuestionItem>,
    /// Entries dropped because they lacked a string `question` or `answer`.
    pub skipped: usize,
}

impl QuestionSet {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, FileError> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("questions")
            .to_string();
        let reader = BufReader::new(File::open(path)?);

        match SourceFormat::from_path(path) {
            SourceFormat::Json => Self::from_json_reader(name, reader),
            SourceFormat::Csv => Self::from_csv_reader(name, reader),
        }
    }

    /// Parse a JSON array of `{"question": .., "answer": ..}` objects.
    ///
    /// Entries that are not objects or lack either string field are skipped
    /// with a warning; anything other than an array is an error.
    pub fn from_json_reader<R: Read>(name: String, reader: R) -> Result<Self, FileError> {
        let value: Value = serde_json::from_reader(reader)?;
        let entries = match value {
            Value::Array(entries) => entries,
            other => return Err(FileError::NotAnArray(json_kind(&other))),
        };

        let mut set = QuestionSet {
            name,
            ..Default::default()
        };
        for (index, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<QuestionItem>(entry) {
                Ok(item) => set.items.push(item),
                Err(e) => {
                    warn!("Skipping item {}: {}", index, e);
                    set.skipped += 1;
                }
            }
        }
        Ok(set)
    }

    pub fn from_json_str(name: &str, json: &str) -> Result<Self, FileError> {
        Self::from_json_reader(name.to_string(), json.as_bytes())
    }

    /// Parse CSV with a `question,answer` header row.
    pub fn from_csv_reader<R: Read>(name: String, reader: R) -> Result<Self, FileError> {
        let mut reader = csv::Reader::from_reader(reader);
        let headers = reader.headers()?.clone();
        if !["question", "answer"].iter().all(|col| headers.iter().any(|h| h.trim() == *col)) {
            return Err(FileError::MissingColumns {
                expected: "question,answer".to_string(),
                actual: headers.iter().collect::<Vec<_>>().join(","),
            });
        }

        let mut set = QuestionSet {
            name,
            ..Default::default()
        };
        for (index, record) in reader.deserialize::<QuestionItem>().enumerate() {
            match record {
                Ok(item) => set.items.push(item),
                Err(e) => {
                    warn!("Skipping row {}: {}", index + 1, e);
                    set.skipped += 1;
                }
            }
        }
        Ok(set)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Entries found in the file, usable or not.
    pub fn total(&self) -> usize {
        self.items.len() + self.skipped
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
