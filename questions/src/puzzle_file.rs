use crate::error::FileError;
use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufWriter, path::Path};
use topic2crossword_core::{Crossword, Direction};

const FILE_VERSION: &str = "1.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleFileFormat {
    Json,
    Text,
}

impl PuzzleFileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(PuzzleFileFormat::Json),
            "txt" => Some(PuzzleFileFormat::Text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleMetadata {
    pub version: String,
    pub created_at: String,
    pub topic: String,
    pub generator: String,
}

/// A generated puzzle together with where it came from, for re-use outside
/// the PDFs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleFile {
    pub metadata: PuzzleMetadata,
    pub crossword: Crossword,
}

impl PuzzleFile {
    pub fn new(crossword: Crossword, topic: &str) -> Self {
        Self {
            metadata: PuzzleMetadata {
                version: FILE_VERSION.to_string(),
                created_at: chrono::Utc::now().to_rfc3339(),
                topic: topic.to_string(),
                generator: concat!("topic2crossword/", env!("CARGO_PKG_VERSION")).to_string(),
            },
            crossword,
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, FileError> {
        let file = File::open(path)?;
        let puzzle: PuzzleFile = serde_json::from_reader(file)?;

        if puzzle.metadata.version != FILE_VERSION {
            return Err(FileError::UnsupportedVersion(puzzle.metadata.version));
        }

        Ok(puzzle)
    }

    /// Save as JSON, or as plain text when the extension is `.txt`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), FileError> {
        let path = path.as_ref();
        let format = path
            .extension()
            .and_then(|s| s.to_str())
            .and_then(PuzzleFileFormat::from_extension)
            .unwrap_or(PuzzleFileFormat::Json);

        match format {
            PuzzleFileFormat::Json => {
                let file = BufWriter::new(File::create(path)?);
                serde_json::to_writer_pretty(file, self)?;
            }
            PuzzleFileFormat::Text => std::fs::write(path, self.to_text())?,
        }
        Ok(())
    }

    pub fn to_text(&self) -> String {
        let crossword = &self.crossword;
        let mut output = String::new();

        output.push_str(&format!("Title: {}\n", crossword.title));
        output.push_str(&format!("Topic: {}\n", self.metadata.topic));
        output.push_str(&format!("Created: {}\n", self.metadata.created_at));
        output.push('\n');

        output.push_str("Grid:\n");
        for row in crossword.solution_rows() {
            output.push_str(&row);
            output.push('\n');
        }

        for direction in Direction::ALL {
            output.push_str(&format!("\n{}:\n", direction.label()));
            for clue in crossword.clues_by_direction(direction) {
                output.push_str(&format!("{}. {} ({})\n", clue.number, clue.text, clue.answer));
            }
        }

        if !crossword.unplaced.is_empty() {
            output.push_str("\nNot placed:\n");
            for entry in &crossword.unplaced {
                output.push_str(&format!("{} ({})\n", entry.word, entry.clue));
            }
        }

        output
    }
}
