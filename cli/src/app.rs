use crate::config::Settings;
use crate::engine::{BuiltinEngine, CrosswordEngine};
use crate::error::AppError;
use crate::output::{self, OutputError};
use log::{debug, info, warn};
use topic2crossword_core::{GridSize, PdfPair, WordEntry};
use topic2crossword_questions::{PuzzleFile, QuestionSet};

/// What a run did, for the final report.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Entries in the input file, including skipped ones.
    pub loaded: usize,
    pub accepted: Vec<WordEntry>,
    pub rejected: usize,
    pub grid: GridSize,
    pub placed: usize,
    pub unplaced: Vec<WordEntry>,
    /// Final PDF locations; `None` on a dry run.
    pub files: Option<PdfPair>,
}

impl RunSummary {
    /// The text printed when the run finishes: the final files, or the
    /// usable word list on a dry run.
    pub fn report(&self) -> String {
        let mut out = String::new();
        match &self.files {
            Some(files) => {
                out.push_str(&format!(
                    "Placed {} of {} words on a {} x {} grid\n",
                    self.placed,
                    self.accepted.len(),
                    self.grid.rows,
                    self.grid.cols
                ));
                if !self.unplaced.is_empty() {
                    let words: Vec<&str> = self.unplaced.iter().map(|e| e.word.as_str()).collect();
                    out.push_str(&format!("Not placed: {}\n", words.join(", ")));
                }
                out.push_str(&format!("Grid: {}\n", files.grid.display()));
                out.push_str(&format!("Key:  {}\n", files.key.display()));
            }
            None => {
                out.push_str(&format!(
                    "{} of {} questions usable, grid {} x {}\n",
                    self.accepted.len(),
                    self.loaded,
                    self.grid.rows,
                    self.grid.cols
                ));
                for entry in &self.accepted {
                    out.push_str(&format!("  {:<15} {}\n", entry.word, entry.clue));
                }
            }
        }
        out
    }
}

pub struct App {
    settings: Settings,
    engine: Box<dyn CrosswordEngine>,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        let engine = BuiltinEngine::new(settings.page_size, settings.attempts, settings.seed);
        Self::with_engine(settings, Box::new(engine))
    }

    pub fn with_engine(settings: Settings, engine: Box<dyn CrosswordEngine>) -> Self {
        Self { settings, engine }
    }

    pub fn run(&mut self) -> Result<RunSummary, AppError> {
        let settings = &self.settings;

        let set = QuestionSet::load(&settings.questions).map_err(|source| AppError::Input {
            path: settings.questions.clone(),
            source,
        })?;
        info!("Loaded {} questions from {}", set.total(), settings.questions.display());
        if set.skipped > 0 {
            warn!(
                "Skipped {} entries without a question and answer, {} remain",
                set.skipped,
                set.len()
            );
        }

        let filtered = settings.policy.apply(&set.items);
        for entry in &filtered.accepted {
            debug!("Added word: {} with clue: {}", entry.word, entry.clue);
        }
        for rejection in &filtered.rejected {
            warn!(
                "Skipping item {} ({}): {}",
                rejection.index,
                rejection.answer,
                rejection.reason
            );
        }
        filtered.check_minimum(&settings.policy)?;
        info!(
            "{} of {} questions pass the {} profile",
            filtered.accepted.len(),
            set.total(),
            settings.profile
        );

        let grid = self
            .engine
            .grid_size(&filtered.accepted, settings.bounds)
            .map_err(AppError::GridSizing)?;
        info!("Grid size: {} x {}", grid.rows, grid.cols);

        let mut summary = RunSummary {
            loaded: set.total(),
            accepted: filtered.accepted,
            rejected: filtered.rejected.len(),
            grid,
            placed: 0,
            unplaced: Vec::new(),
            files: None,
        };

        if settings.dry_run {
            info!("Dry run, no files written");
            return Ok(summary);
        }

        let title = output::puzzle_title(&settings.topic);
        let generated = self
            .engine
            .generate(&title, &settings.output_dir)
            .map_err(AppError::Generation)?;
        for entry in &generated.crossword.unplaced {
            warn!("Could not place {} ({})", entry.word, entry.clue);
        }

        output::validate_outputs(&generated.files, settings.min_pdf_bytes)?;
        let files = output::finalize(&generated.files, &settings.output_dir, &settings.topic)?;

        if let Some(path) = &settings.save_puzzle {
            PuzzleFile::new(generated.crossword.clone(), &settings.topic)
                .save(path)
                .map_err(|source| OutputError::SavePuzzle {
                    path: path.clone(),
                    source,
                })?;
            info!("Saved puzzle to {}", path.display());
        }

        summary.placed = generated.crossword.clues.len();
        summary.unplaced = generated.crossword.unplaced;
        summary.files = Some(files);
        Ok(summary)
    }
}
