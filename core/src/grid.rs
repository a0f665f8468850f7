use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Letter { letter: char, number: Option<u32> },
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_letter(&self) -> bool {
        matches!(self, Cell::Letter { .. })
    }

    pub fn letter(&self) -> Option<char> {
        match self {
            Cell::Letter { letter, .. } => Some(*letter),
            Cell::Empty => None,
        }
    }

    pub fn number(&self) -> Option<u32> {
        match self {
            Cell::Letter { number, .. } => *number,
            Cell::Empty => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        let cells = vec![vec![Cell::Empty; width]; height];
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn get_cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cells.get(row)?.get(col)
    }

    pub fn get_cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.cells.get_mut(row)?.get_mut(col)
    }

    pub fn set_cell(&mut self, row: usize, col: usize, cell: Cell) -> Result<(), String> {
        if row >= self.height || col >= self.width {
            return Err(format!("Position ({}, {}) is out of bounds", row, col));
        }
        self.cells[row][col] = cell;
        Ok(())
    }

    /// Letter at a position that may lie outside the grid.
    ///
    /// Anything off the edge reads as empty, which is what neighbour checks
    /// during placement want.
    pub fn letter_at(&self, row: isize, col: isize) -> Option<char> {
        if row < 0 || col < 0 {
            return None;
        }
        self.get_cell(row as usize, col as usize)
            .and_then(Cell::letter)
    }

    pub fn is_open(&self, row: isize, col: isize) -> bool {
        self.letter_at(row, col).is_none()
    }

    pub fn letter_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_letter()).count()
    }

    /// Smallest `(top, left, bottom, right)` box containing every letter.
    pub fn bounding_box(&self) -> Option<(usize, usize, usize, usize)> {
        let mut bbox: Option<(usize, usize, usize, usize)> = None;
        for (row, cells) in self.cells.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if !cell.is_letter() {
                    continue;
                }
                bbox = Some(match bbox {
                    None => (row, col, row, col),
                    Some((t, l, b, r)) => (t.min(row), l.min(col), b.max(row), r.max(col)),
                });
            }
        }
        bbox
    }
}
