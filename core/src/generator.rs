use crate::{Cell, Clue, Crossword, Direction, Grid, WordEntry};
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};
use std::collections::HashSet;

/// Largest grid the generator will ever lay out, per side.
pub const DEFAULT_BOUND: usize = 50;

/// Number of randomized placement passes per generation.
pub const DEFAULT_ATTEMPTS: usize = 20;

/// Upper limit on the grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBounds {
    pub rows: usize,
    pub cols: usize,
}

impl Default for GridBounds {
    fn default() -> Self {
        Self {
            rows: DEFAULT_BOUND,
            cols: DEFAULT_BOUND,
        }
    }
}

/// Working grid dimensions picked by [`Generator::grid_size`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub rows: usize,
    pub cols: usize,
}

/// Generator configuration parameters
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub bounds: GridBounds,
    pub attempts: usize,
    /// Fixes the placement shuffles so that output is reproducible.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            bounds: GridBounds::default(),
            attempts: DEFAULT_ATTEMPTS,
            seed: None,
        }
    }
}

/// Base side length for a square grid holding `count` words.
///
/// Halves round to even, so 24 words still fit the 19 square grid.
pub fn base_side(count: usize) -> usize {
    match count {
        0..=20 => 17,
        21..=100 => ((count - 20) as f64 / 8.0).round_ties_even() as usize * 2 + 19,
        _ => 41,
    }
}

/// Lays out a list of words as a free-form crossword.
///
/// Usage follows two steps: [`Generator::grid_size`] fixes the working grid
/// dimensions, then [`Generator::generate`] places the words and numbers the
/// clues.
pub struct Generator {
    config: GeneratorConfig,
    words: Vec<WordEntry>,
    size: Option<GridSize>,
    rng: StdRng,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            words: Vec::new(),
            size: None,
            rng,
        }
    }

    /// Add `(word, clue)` pairs. Words that are empty once whitespace is
    /// stripped are ignored.
    pub fn add_words(&mut self, words: Vec<(String, String)>) {
        for (word, clue) in words {
            let entry = WordEntry::new(&word, clue);
            if entry.is_empty() {
                debug!("ignoring empty word for clue {:?}", entry.clue);
                continue;
            }
            self.words.push(entry);
        }
        self.size = None;
    }

    pub fn words(&self) -> &[WordEntry] {
        &self.words
    }

    pub fn size(&self) -> Option<GridSize> {
        self.size
    }

    /// Pick the working grid dimensions for the current word list.
    pub fn grid_size(&mut self) -> Result<GridSize, GeneratorError> {
        let GridBounds { rows, cols } = self.config.bounds;
        if rows == 0 || cols == 0 {
            return Err(GeneratorError::InvalidBounds { rows, cols });
        }

        let longest = self
            .words
            .iter()
            .max_by_key(|entry| entry.len())
            .ok_or(GeneratorError::NoWords)?;
        let limit = rows.min(cols);
        if longest.len() > limit {
            return Err(GeneratorError::WordTooLong {
                word: longest.word.clone(),
                len: longest.len(),
                limit,
            });
        }

        let mut side = base_side(self.words.len());
        if side <= longest.len() {
            side = longest.len() + 2;
        }
        let size = GridSize {
            rows: side.min(rows),
            cols: side.min(cols),
        };
        debug!(
            "sized grid at {}x{} for {} words (longest {})",
            size.rows,
            size.cols,
            self.words.len(),
            longest.len()
        );
        self.size = Some(size);
        Ok(size)
    }

    /// Place the words and build the numbered crossword.
    pub fn generate(&mut self, title: &str) -> Result<Crossword, GeneratorError> {
        let size = self.size.ok_or(GeneratorError::NotSized)?;
        if self.words.is_empty() {
            return Err(GeneratorError::NoWords);
        }

        let letters: Vec<Vec<char>> = self.words.iter().map(|w| w.word.chars().collect()).collect();
        let mut best: Option<Layout> = None;

        for attempt in 0..self.config.attempts.max(1) {
            let layout = attempt_layout(&letters, size, &mut self.rng);
            debug!(
                "attempt {}: placed {}/{} words with {} crossings",
                attempt + 1,
                layout.placements.len(),
                letters.len(),
                layout.crossings
            );

            let better = match &best {
                None => true,
                Some(current) => layout.rank() > current.rank(),
            };
            if better {
                best = Some(layout);
            }
        }

        let nothing_placed = GeneratorError::NothingPlaced {
            rows: size.rows,
            cols: size.cols,
        };
        let best = best
            .filter(|layout| !layout.placements.is_empty())
            .ok_or(nothing_placed)?;
        self.build_crossword(title, best, size)
    }

    /// Crop the layout to its letters and number the clues row by row.
    fn build_crossword(
        &self,
        title: &str,
        layout: Layout,
        size: GridSize,
    ) -> Result<Crossword, GeneratorError> {
        let nothing_placed = GeneratorError::NothingPlaced {
            rows: size.rows,
            cols: size.cols,
        };
        let (top, left, bottom, right) = layout.grid.bounding_box().ok_or(nothing_placed)?;

        let mut starts: Vec<(usize, usize)> = layout
            .placements
            .iter()
            .map(|p| (p.row - top, p.col - left))
            .collect();
        starts.sort_unstable();
        starts.dedup();
        let number_at =
            |pos: (usize, usize)| starts.binary_search(&pos).map_or(0, |i| i as u32 + 1);

        let mut placements = layout.placements;
        placements.sort_by_key(|p| (number_at((p.row - top, p.col - left)), p.direction));

        let mut crossword = Crossword::new(title.to_string(), right - left + 1, bottom - top + 1);
        for p in &placements {
            let entry = &self.words[p.entry];
            let (row, col) = (p.row - top, p.col - left);
            crossword.add_clue(Clue::new(
                number_at((row, col)),
                p.direction,
                entry.clue.clone(),
                entry.word.clone(),
                row,
                col,
            ))?;
        }

        let placed: HashSet<usize> = placements.iter().map(|p| p.entry).collect();
        crossword.unplaced = self
            .words
            .iter()
            .enumerate()
            .filter(|(i, _)| !placed.contains(i))
            .map(|(_, entry)| entry.clone())
            .collect();

        Ok(crossword)
    }
}

/// One randomized pass: shuffle, longest words first, then a second sweep for
/// words that found no crossing the first time round.
fn attempt_layout(words: &[Vec<char>], size: GridSize, rng: &mut StdRng) -> Layout {
    let mut order: Vec<usize> = (0..words.len()).collect();
    order.shuffle(rng);
    order.sort_by_key(|&i| Reverse(words[i].len()));

    let mut layout = Layout::new(size);
    let mut skipped = Vec::new();
    for idx in order {
        if !layout.try_place(idx, &words[idx], rng) {
            skipped.push(idx);
        }
    }
    for idx in skipped {
        layout.try_place(idx, &words[idx], rng);
    }
    layout
}

#[derive(Debug, Clone)]
struct Placement {
    entry: usize,
    row: usize,
    col: usize,
    direction: Direction,
}

struct Layout {
    grid: Grid,
    /// Squares already covered by a word in the given direction.
    used: HashSet<(usize, usize, Direction)>,
    letters: Vec<(usize, usize, char)>,
    placements: Vec<Placement>,
    crossings: usize,
}

impl Layout {
    fn new(size: GridSize) -> Self {
        Self {
            grid: Grid::new(size.cols, size.rows),
            used: HashSet::new(),
            letters: Vec::new(),
            placements: Vec::new(),
            crossings: 0,
        }
    }

    fn rank(&self) -> (usize, usize) {
        (self.placements.len(), self.crossings)
    }

    fn try_place(&mut self, entry: usize, word: &[char], rng: &mut StdRng) -> bool {
        if word.is_empty() {
            return false;
        }

        if self.placements.is_empty() {
            let (width, height, len) = (self.grid.width, self.grid.height, word.len());
            let start = if len <= width {
                Some((height / 2, (width - len) / 2, Direction::Across))
            } else if len <= height {
                Some(((height - len) / 2, width / 2, Direction::Down))
            } else {
                None
            };
            return match start {
                Some((row, col, direction)) if self.score(word, row, col, direction).is_some() => {
                    self.place(entry, word, row, col, direction, 0);
                    true
                }
                _ => false,
            };
        }

        let (crossings, candidates) = self.best_positions(word);
        match candidates.choose(rng) {
            Some(&(row, col, direction)) => {
                self.place(entry, word, row, col, direction, crossings);
                true
            }
            None => {
                trace!("no crossing found for {}", word.iter().collect::<String>());
                false
            }
        }
    }

    /// All highest-scoring positions where `word` crosses an existing letter.
    fn best_positions(&self, word: &[char]) -> (usize, Vec<(usize, usize, Direction)>) {
        let mut best_score = 0;
        let mut best = Vec::new();
        let mut seen = HashSet::new();

        for &(row, col, letter) in &self.letters {
            for (i, _) in word.iter().enumerate().filter(|(_, c)| **c == letter) {
                for direction in Direction::ALL {
                    let (dr, dc) = direction.delta();
                    if row < dr * i || col < dc * i {
                        continue;
                    }
                    let start = (row - dr * i, col - dc * i, direction);
                    if !seen.insert(start) {
                        continue;
                    }
                    let Some(score) = self.score(word, start.0, start.1, direction) else {
                        continue;
                    };
                    match score.cmp(&best_score) {
                        Ordering::Greater => {
                            best_score = score;
                            best.clear();
                            best.push(start);
                        }
                        Ordering::Equal if score > 0 => best.push(start),
                        _ => {}
                    }
                }
            }
        }

        (best_score, best)
    }

    /// Number of crossings if `word` fits at the given start, `None` when it
    /// would leave the grid, clash with a letter or touch a neighbouring word.
    fn score(&self, word: &[char], row: usize, col: usize, direction: Direction) -> Option<usize> {
        let len = word.len();
        let (end_row, end_col) = direction.step(row, col, len - 1);
        if end_row >= self.grid.height || end_col >= self.grid.width {
            return None;
        }

        let (dr, dc) = direction.delta();
        let (dr, dc) = (dr as isize, dc as isize);
        let (r, c) = (row as isize, col as isize);
        if !self.grid.is_open(r - dr, c - dc)
            || !self.grid.is_open(r + dr * len as isize, c + dc * len as isize)
        {
            return None;
        }

        let mut crossings = 0;
        for (i, &letter) in word.iter().enumerate() {
            let (pr, pc) = direction.step(row, col, i);
            match self.grid.get_cell(pr, pc).and_then(Cell::letter) {
                Some(existing) => {
                    if existing != letter || self.used.contains(&(pr, pc, direction)) {
                        return None;
                    }
                    crossings += 1;
                }
                None => {
                    // sideways neighbours of a fresh letter must stay open
                    let (pr, pc) = (pr as isize, pc as isize);
                    if !self.grid.is_open(pr + dc, pc + dr)
                        || !self.grid.is_open(pr - dc, pc - dr)
                    {
                        return None;
                    }
                }
            }
        }

        Some(crossings)
    }

    fn place(
        &mut self,
        entry: usize,
        word: &[char],
        row: usize,
        col: usize,
        direction: Direction,
        crossings: usize,
    ) {
        for (i, &letter) in word.iter().enumerate() {
            let (pr, pc) = direction.step(row, col, i);
            if let Some(cell) = self.grid.get_cell_mut(pr, pc) {
                if cell.is_empty() {
                    *cell = Cell::Letter {
                        letter,
                        number: None,
                    };
                    self.letters.push((pr, pc, letter));
                }
            }
            self.used.insert((pr, pc, direction));
        }
        self.crossings += crossings;
        self.placements.push(Placement {
            entry,
            row,
            col,
            direction,
        });
    }
}

/// Generator error types
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("No words to lay out")]
    NoWords,
    #[error("Grid bounds must be non-zero, got {rows}x{cols}")]
    InvalidBounds { rows: usize, cols: usize },
    #[error("Word {word} has {len} letters but the grid allows at most {limit}")]
    WordTooLong { word: String, len: usize, limit: usize },
    #[error("Grid size has not been calculated")]
    NotSized,
    #[error("No word could be placed on a {rows}x{cols} grid")]
    NothingPlaced { rows: usize, cols: usize },
    #[error("Grid error: {0}")]
    GridError(String),
}

impl From<String> for GeneratorError {
    fn from(msg: String) -> Self {
        GeneratorError::GridError(msg)
    }
}

/// Size the grid and generate a crossword in one call.
pub fn generate_crossword(
    title: &str,
    words: Vec<(String, String)>,
    config: Option<GeneratorConfig>,
) -> Result<Crossword, GeneratorError> {
    let mut generator = Generator::new(config.unwrap_or_default());
    generator.add_words(words);
    generator.grid_size()?;
    generator.generate(title)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<(String, String)> {
        list.iter().map(|w| (w.to_string(), format!("Clue for {}?", w))).collect()
    }

    #[test]
    fn test_base_side() {
        assert_eq!(base_side(1), 17);
        assert_eq!(base_side(20), 17);
        assert_eq!(base_side(21), 19);
        assert_eq!(base_side(60), 29);
        assert_eq!(base_side(100), 39);
        assert_eq!(base_side(101), 41);
    }

    #[test]
    fn test_base_side_rounds_halves_to_even() {
        assert_eq!(base_side(24), 19);
        assert_eq!(base_side(28), 21);
        assert_eq!(base_side(40), 23);
        assert_eq!(base_side(56), 27);
        assert_eq!(base_side(72), 31);
        assert_eq!(base_side(88), 35);
    }

    #[test]
    fn test_grid_size_keeps_base_when_longest_fits() {
        let mut generator = Generator::new(GeneratorConfig::default());
        generator.add_words(words(&["ABCDEFGHIJKLMNOP", "CAT"]));
        assert_eq!(generator.grid_size().unwrap(), GridSize { rows: 17, cols: 17 });

        let mut generator = Generator::new(GeneratorConfig::default());
        generator.add_words(words(&["ABCDEFGHIJKLMNOPQ", "CAT"]));
        assert_eq!(generator.grid_size().unwrap(), GridSize { rows: 19, cols: 19 });
    }

    #[test]
    fn test_grid_size_grows_for_long_words() {
        let mut generator = Generator::new(GeneratorConfig::default());
        generator.add_words(words(&["ABCDEFGHIJKLMNOPQRST", "CAT"]));
        let size = generator.grid_size().unwrap();
        assert_eq!(size, GridSize { rows: 22, cols: 22 });
    }

    #[test]
    fn test_grid_size_clamps_to_bounds() {
        let config = GeneratorConfig {
            bounds: GridBounds { rows: 12, cols: 10 },
            ..Default::default()
        };
        let mut generator = Generator::new(config);
        generator.add_words(words(&["PARIS", "ROME"]));
        assert_eq!(generator.grid_size().unwrap(), GridSize { rows: 12, cols: 10 });
    }

    #[test]
    fn test_grid_size_errors() {
        let mut empty = Generator::new(GeneratorConfig::default());
        assert!(matches!(empty.grid_size(), Err(GeneratorError::NoWords)));

        let config = GeneratorConfig {
            bounds: GridBounds { rows: 5, cols: 5 },
            ..Default::default()
        };
        let mut tight = Generator::new(config);
        tight.add_words(words(&["ELEPHANT"]));
        assert!(matches!(
            tight.grid_size(),
            Err(GeneratorError::WordTooLong { len: 8, limit: 5, .. })
        ));

        let config = GeneratorConfig {
            bounds: GridBounds { rows: 0, cols: 5 },
            ..Default::default()
        };
        let mut zero = Generator::new(config);
        zero.add_words(words(&["CAT"]));
        assert!(matches!(zero.grid_size(), Err(GeneratorError::InvalidBounds { .. })));
    }

    #[test]
    fn test_generate_requires_sizing() {
        let mut generator = Generator::new(GeneratorConfig::default());
        generator.add_words(words(&["CAT", "TAR"]));
        assert!(matches!(generator.generate("x"), Err(GeneratorError::NotSized)));
    }

    #[test]
    fn test_add_words_resets_size() {
        let mut generator = Generator::new(GeneratorConfig::default());
        generator.add_words(words(&["CAT"]));
        generator.grid_size().unwrap();
        generator.add_words(words(&["  "]));
        assert_eq!(generator.words().len(), 1);
        assert!(generator.size().is_none());
    }

    #[test]
    fn test_score_rejects_touching_words() {
        let mut layout = Layout::new(GridSize { rows: 9, cols: 9 });
        let cat: Vec<char> = "CAT".chars().collect();
        layout.place(0, &cat, 4, 3, Direction::Across, 0);

        // directly below CAT, running parallel
        let dog: Vec<char> = "DOG".chars().collect();
        assert_eq!(layout.score(&dog, 5, 3, Direction::Across), None);
        // extends CAT into CATS-like run
        assert_eq!(layout.score(&dog, 4, 6, Direction::Across), None);
        // crosses the A
        let bar: Vec<char> = "BAR".chars().collect();
        assert_eq!(layout.score(&bar, 3, 4, Direction::Down), Some(1));
        // same square, same direction
        assert_eq!(layout.score(&cat, 4, 3, Direction::Across), None);
    }
}
