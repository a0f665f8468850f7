//! Configuration file and settings resolution.
//!
//! Defaults are read from `~/.topic2crossword/config.json` when it exists, or
//! from the file given with `--config`. Command-line flags win over the file,
//! and the file wins over the built-in defaults.

use crate::args::Cli;
use crate::output::DEFAULT_MIN_PDF_BYTES;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use topic2crossword_core::generator::DEFAULT_ATTEMPTS;
use topic2crossword_core::{GridBounds, PageSize};
use topic2crossword_questions::{Profile, ValidationPolicy};

/// Error type for configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not parse {path}")]
    Serde {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Values from the configuration file. Every key is optional.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub profile: Option<Profile>,
    pub min_questions: Option<usize>,
    pub min_answer_len: Option<usize>,
    pub max_answer_len: Option<usize>,
    pub require_question_mark: Option<bool>,
    pub dedupe: Option<bool>,
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    pub page_size: Option<PageSize>,
    pub attempts: Option<usize>,
    pub output_dir: Option<PathBuf>,
    pub min_pdf_bytes: Option<u64>,
}

/// Get the default config file path (`~/.topic2crossword/config.json`).
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".topic2crossword").join("config.json"))
}

/// Load the configuration.
///
/// An explicit path must exist. The default location is optional and yields
/// an empty configuration when absent.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match config_path() {
            Some(path) if path.is_file() => path,
            _ => return Ok(Config::default()),
        },
    };

    let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    let config = serde_json::from_str(&contents).map_err(|source| ConfigError::Serde {
        path: path.clone(),
        source,
    })?;
    log::debug!("loaded configuration from {}", path.display());
    Ok(config)
}

/// Everything one run needs, after layering flags over the config file.
#[derive(Debug, Clone)]
pub struct Settings {
    pub questions: PathBuf,
    pub topic: String,
    pub profile: Profile,
    pub policy: ValidationPolicy,
    pub bounds: GridBounds,
    pub page_size: PageSize,
    pub attempts: usize,
    pub seed: Option<u64>,
    pub output_dir: PathBuf,
    pub min_pdf_bytes: u64,
    pub save_puzzle: Option<PathBuf>,
    pub dry_run: bool,
}

/// Flag if given, else the config file value, else `default`.
fn pick<T>(flag: Option<T>, file: Option<T>, default: T) -> T {
    flag.or(file).unwrap_or(default)
}

impl Settings {
    pub fn resolve(cli: Cli, config: &Config) -> Self {
        let profile = pick(cli.profile, config.profile, Profile::default());
        let base = profile.policy();

        let policy = ValidationPolicy {
            min_questions: pick(cli.min_questions, config.min_questions, base.min_questions),
            min_answer_len: pick(cli.min_length, config.min_answer_len, base.min_answer_len),
            max_answer_len: pick(cli.max_length, config.max_answer_len, base.max_answer_len),
            alphabetic_only: base.alphabetic_only,
            require_question_mark: cli.require_question_mark
                || config.require_question_mark.unwrap_or(base.require_question_mark),
            dedupe: !cli.no_dedupe && config.dedupe.unwrap_or(base.dedupe),
        };

        let defaults = GridBounds::default();
        let bounds = GridBounds {
            rows: pick(cli.rows, config.rows, defaults.rows),
            cols: pick(cli.cols, config.cols, defaults.cols),
        };

        Self {
            questions: cli.questions,
            topic: cli.topic,
            profile,
            policy,
            bounds,
            page_size: pick(cli.page_size, config.page_size, PageSize::default()),
            attempts: pick(cli.attempts, config.attempts, DEFAULT_ATTEMPTS),
            seed: cli.seed,
            output_dir: pick(cli.output_dir, config.output_dir.clone(), PathBuf::from(".")),
            min_pdf_bytes: pick(cli.min_pdf_bytes, config.min_pdf_bytes, DEFAULT_MIN_PDF_BYTES),
            save_puzzle: cli.save_puzzle,
            dry_run: cli.dry_run,
        }
    }
}
