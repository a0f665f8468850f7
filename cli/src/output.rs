//! Output file naming and checks.
//!
//! The library writes `<title>_grid.pdf` and `<title>_key.pdf`; once both are
//! confirmed to be real documents they are renamed to
//! `DDS-AICWG-<topic>_grid.pdf` and `DDS-AICWG-<topic>_key.pdf`.

use log::info;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use topic2crossword_core::PdfPair;
use topic2crossword_questions::FileError;

pub const DEFAULT_TOPIC: &str = "Crossword Puzzle";
pub const TITLE_PREFIX: &str = "DDS AI Crossword Generator - ";
pub const FILE_PREFIX: &str = "DDS-AICWG-";
/// Anything smaller than this cannot hold a rendered grid.
pub const DEFAULT_MIN_PDF_BYTES: u64 = 1024;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Expected output file {0} was not created")]
    Missing(PathBuf),
    #[error("Output file {path} is only {size} bytes (minimum {min})")]
    TooSmall { path: PathBuf, size: u64, min: u64 },
    #[error("Could not inspect {path}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Could not rename {from} to {to}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Could not save puzzle to {path}")]
    SavePuzzle {
        path: PathBuf,
        #[source]
        source: FileError,
    },
}

/// Reduce a topic to `[A-Za-z0-9_]`-style characters for file names.
///
/// Spaces and hyphens become underscores, anything else that is not
/// alphanumeric is dropped.
pub fn sanitize_topic(topic: &str) -> String {
    topic
        .replace([' ', '-'], "_")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

pub fn puzzle_title(topic: &str) -> String {
    format!("{}{}", TITLE_PREFIX, topic)
}

/// Where the renamed grid and key end up for `topic`.
pub fn final_paths(out_dir: &Path, topic: &str) -> PdfPair {
    let safe = sanitize_topic(topic);
    PdfPair {
        grid: out_dir.join(format!("{}{}_grid.pdf", FILE_PREFIX, safe)),
        key: out_dir.join(format!("{}{}_key.pdf", FILE_PREFIX, safe)),
    }
}

/// Both files must exist and be at least `min_bytes` long.
pub fn validate_outputs(files: &PdfPair, min_bytes: u64) -> Result<(), OutputError> {
    for path in [&files.grid, &files.key] {
        let size = match std::fs::metadata(path) {
            Ok(meta) if meta.is_file() => meta.len(),
            Ok(_) => return Err(OutputError::Missing(path.clone())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(OutputError::Missing(path.clone()));
            }
            Err(source) => {
                return Err(OutputError::Metadata {
                    path: path.clone(),
                    source,
                });
            }
        };
        if size < min_bytes {
            return Err(OutputError::TooSmall {
                path: path.clone(),
                size,
                min: min_bytes,
            });
        }
    }
    Ok(())
}

/// Rename the generated files to their final names, replacing older copies.
pub fn finalize(files: &PdfPair, out_dir: &Path, topic: &str) -> Result<PdfPair, OutputError> {
    let target = final_paths(out_dir, topic);

    for (from, to) in [(&files.grid, &target.grid), (&files.key, &target.key)] {
        if from == to {
            continue;
        }
        if to.is_file() {
            std::fs::remove_file(to).map_err(|source| OutputError::Rename {
                from: from.clone(),
                to: to.clone(),
                source,
            })?;
        }
        std::fs::rename(from, to).map_err(|source| OutputError::Rename {
            from: from.clone(),
            to: to.clone(),
            source,
        })?;
        info!("Renamed {} to {}", from.display(), to.display());
    }

    Ok(target)
}
