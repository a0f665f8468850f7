pub mod clue;
pub mod crossword;
pub mod direction;
pub mod generator;
pub mod grid;
pub mod render;
pub mod word;

pub use clue::Clue;
pub use crossword::Crossword;
pub use direction::Direction;
pub use generator::{
    generate_crossword, Generator, GeneratorConfig, GeneratorError, GridBounds, GridSize,
};
pub use grid::{Cell, Grid};
pub use render::{render_pdfs, PageSize, PdfPair, RenderError};
pub use word::WordEntry;
