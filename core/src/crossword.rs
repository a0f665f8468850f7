use crate::{Cell, Clue, Direction, Grid, WordEntry};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crossword {
    pub title: String,
    pub grid: Grid,
    pub clues: Vec<Clue>,
    /// Words the generator could not fit into the grid.
    #[serde(default)]
    pub unplaced: Vec<WordEntry>,
}

impl Crossword {
    pub fn new(title: String, width: usize, height: usize) -> Self {
        Self {
            title,
            grid: Grid::new(width, height),
            clues: Vec::new(),
            unplaced: Vec::new(),
        }
    }

    pub fn add_clue(&mut self, clue: Clue) -> Result<(), String> {
        self.validate_clue(&clue)?;

        let cells = clue.positions().into_iter().zip(clue.answer.chars());
        for (i, ((row, col), letter)) in cells.enumerate() {
            let number = if i == 0 { Some(clue.number) } else { None };

            let cell = self
                .grid
                .get_cell_mut(row, col)
                .ok_or_else(|| format!("Position ({}, {}) is out of bounds", row, col))?;

            match cell {
                Cell::Empty => {
                    *cell = Cell::Letter { letter, number };
                }
                Cell::Letter {
                    number: cell_number, ..
                } => {
                    if number.is_some() && cell_number.is_none() {
                        *cell_number = number;
                    }
                }
            }
        }

        self.clues.push(clue);
        Ok(())
    }

    fn validate_clue(&self, clue: &Clue) -> Result<(), String> {
        if clue.answer.is_empty() {
            return Err("Clue answer cannot be empty".to_string());
        }

        if clue
            .positions()
            .iter()
            .any(|(r, c)| *r >= self.grid.height || *c >= self.grid.width)
        {
            return Err("Clue extends beyond grid bounds".to_string());
        }

        for ((row, col), letter) in clue.positions().into_iter().zip(clue.answer.chars()) {
            if let Some(existing) = self.grid.get_cell(row, col).and_then(Cell::letter) {
                if existing != letter {
                    return Err(format!("Letter conflict at ({}, {})", row, col));
                }
            }
        }

        Ok(())
    }

    /// Clues running in `direction`, ordered by clue number.
    pub fn clues_by_direction(&self, direction: Direction) -> Vec<&Clue> {
        let mut clues: Vec<&Clue> = self
            .clues
            .iter()
            .filter(|clue| clue.direction == direction)
            .collect();
        clues.sort_by_key(|clue| clue.number);
        clues
    }

    /// Number of squares shared by an across and a down answer.
    pub fn intersection_count(&self) -> usize {
        let across: HashSet<(usize, usize)> = self
            .clues_by_direction(Direction::Across)
            .iter()
            .flat_map(|clue| clue.positions())
            .collect();
        let down: HashSet<(usize, usize)> = self
            .clues_by_direction(Direction::Down)
            .iter()
            .flat_map(|clue| clue.positions())
            .collect();
        across.intersection(&down).count()
    }

    /// The filled grid as text, one string per row, `.` marking unused squares.
    pub fn solution_rows(&self) -> Vec<String> {
        self.grid
            .cells
            .iter()
            .map(|row| row.iter().map(|cell| cell.letter().unwrap_or('.')).collect())
            .collect()
    }
}
