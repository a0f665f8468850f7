//! The boundary between this program and the crossword library.
//!
//! The pipeline only ever talks to a [`CrosswordEngine`]: it hands over the
//! filtered words with the grid bounds, then asks for a titled puzzle written
//! into an output directory. Placement and rendering happen behind the trait.

use log::debug;
use std::path::Path;
use thiserror::Error;
use topic2crossword_core::{
    render_pdfs, Crossword, Generator, GeneratorConfig, GeneratorError, GridBounds, GridSize,
    PageSize, PdfPair, RenderError, WordEntry,
};

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Generator(#[from] GeneratorError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// What the engine hands back after generation: the PDFs as the library named
/// them, and the puzzle they show.
#[derive(Debug, Clone)]
pub struct GeneratedPuzzle {
    pub files: PdfPair,
    pub crossword: Crossword,
}

pub trait CrosswordEngine {
    /// Load `words` and decide the working grid size within `bounds`.
    fn grid_size(
        &mut self,
        words: &[WordEntry],
        bounds: GridBounds,
    ) -> Result<GridSize, EngineError>;

    /// Lay out the words loaded by [`CrosswordEngine::grid_size`] and write
    /// the grid and key PDFs into `out_dir`.
    fn generate(&mut self, title: &str, out_dir: &Path) -> Result<GeneratedPuzzle, EngineError>;
}

/// Engine backed by `topic2crossword-core`.
pub struct BuiltinEngine {
    page_size: PageSize,
    attempts: usize,
    seed: Option<u64>,
    generator: Option<Generator>,
}

impl BuiltinEngine {
    pub fn new(page_size: PageSize, attempts: usize, seed: Option<u64>) -> Self {
        Self {
            page_size,
            attempts,
            seed,
            generator: None,
        }
    }
}

impl CrosswordEngine for BuiltinEngine {
    fn grid_size(
        &mut self,
        words: &[WordEntry],
        bounds: GridBounds,
    ) -> Result<GridSize, EngineError> {
        let mut generator = Generator::new(GeneratorConfig {
            bounds,
            attempts: self.attempts,
            seed: self.seed,
        });
        generator.add_words(
            words
                .iter()
                .map(|entry| (entry.word.clone(), entry.clue.clone()))
                .collect(),
        );

        let size = generator.grid_size()?;
        self.generator = Some(generator);
        Ok(size)
    }

    fn generate(&mut self, title: &str, out_dir: &Path) -> Result<GeneratedPuzzle, EngineError> {
        let generator = self.generator.as_mut().ok_or(GeneratorError::NotSized)?;
        let crossword = generator.generate(title)?;
        debug!(
            "placed {} words with {} crossings",
            crossword.clues.len(),
            crossword.intersection_count()
        );

        std::fs::create_dir_all(out_dir)?;
        let files = render_pdfs(&crossword, out_dir, self.page_size)?;
        Ok(GeneratedPuzzle { files, crossword })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_before_sizing_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = BuiltinEngine::new(PageSize::A4, 1, Some(1));
        let err = engine.generate("Nothing", dir.path()).unwrap_err();
        assert!(matches!(err, EngineError::Generator(GeneratorError::NotSized)));
    }

    #[test]
    fn test_builtin_engine_writes_pdfs() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("out");
        let words = vec![
            WordEntry::new("Python", "Snake or language?"),
            WordEntry::new("Rust", "Iron oxide?"),
            WordEntry::new("Go", "Board game or language?"),
        ];

        let mut engine = BuiltinEngine::new(PageSize::A4, 5, Some(2));
        let size = engine.grid_size(&words, GridBounds::default()).unwrap();
        assert_eq!(size, GridSize { rows: 17, cols: 17 });

        let generated = engine.generate("Languages", &out).unwrap();
        assert!(generated.files.grid.ends_with("Languages_grid.pdf"));
        assert!(generated.files.grid.is_file());
        assert!(generated.files.key.is_file());
        assert!(!generated.crossword.clues.is_empty());
    }
}
