use crate::config::ConfigError;
use crate::engine::EngineError;
use crate::output::OutputError;
use std::path::PathBuf;
use thiserror::Error;
use topic2crossword_questions::{FileError, PolicyError};

/// Process exit codes, one per failure class.
pub mod exit {
    pub const SUCCESS: u8 = 0;
    /// Input file (or configuration) unreadable or malformed, bad arguments.
    pub const INPUT: u8 = 1;
    pub const TOO_FEW_QUESTIONS: u8 = 2;
    pub const GRID_SIZING: u8 = 3;
    pub const GENERATION: u8 = 4;
    pub const OUTPUT: u8 = 5;
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid configuration")]
    Config(#[from] ConfigError),
    #[error("Error reading from {path}")]
    Input {
        path: PathBuf,
        #[source]
        source: FileError,
    },
    #[error(transparent)]
    TooFewQuestions(#[from] PolicyError),
    #[error("Grid sizing failed")]
    GridSizing(#[source] EngineError),
    #[error("Crossword generation failed")]
    Generation(#[source] EngineError),
    #[error("Output validation failed")]
    Output(#[from] OutputError),
}

impl AppError {
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Config(_) | AppError::Input { .. } => exit::INPUT,
            AppError::TooFewQuestions(_) => exit::TOO_FEW_QUESTIONS,
            AppError::GridSizing(_) => exit::GRID_SIZING,
            AppError::Generation(_) => exit::GENERATION,
            AppError::Output(_) => exit::OUTPUT,
        }
    }
}
