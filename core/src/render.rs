//! PDF output for generated puzzles.
//!
//! Each puzzle produces two documents next to each other: `<stem>_grid.pdf`
//! with the blank numbered grid and the clue lists, and `<stem>_key.pdf` with
//! the filled grid and the answers.

use crate::{Crossword, Direction, Grid};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const MARGIN: f32 = 48.0;
const TITLE_SIZE: f32 = 16.0;
const HEADING_SIZE: f32 = 12.0;
const TEXT_SIZE: f32 = 10.0;
const LINE_GAP: f32 = 4.0;
const MAX_CELL: f32 = 24.0;
/// Share of the first page's remaining height the grid may take.
const GRID_HEIGHT_SHARE: f32 = 0.7;

const REGULAR: &str = "F1";
const BOLD: &str = "F2";

const PRODUCER: &str = concat!("topic2crossword/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

impl PageSize {
    /// Page width and height in points.
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.0, 842.0),
            PageSize::Letter => (612.0, 792.0),
        }
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "letter" => Ok(PageSize::Letter),
            other => Err(format!("unknown page size '{}' (expected a4 or letter)", other)),
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSize::A4 => write!(f, "a4"),
            PageSize::Letter => write!(f, "letter"),
        }
    }
}

/// Paths of the two documents written for one puzzle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfPair {
    pub grid: PathBuf,
    pub key: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
}

/// File name stem for a puzzle title; path separators would escape the
/// output directory so they become dashes.
pub fn file_stem(title: &str) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '-' } else { c })
        .collect();
    if stem.is_empty() {
        "crossword".to_string()
    } else {
        stem
    }
}

/// Write the puzzle and answer key PDFs for `crossword` into `dir`.
pub fn render_pdfs(
    crossword: &Crossword,
    dir: &Path,
    page: PageSize,
) -> Result<PdfPair, RenderError> {
    let stem = file_stem(&crossword.title);
    let pair = PdfPair {
        grid: dir.join(format!("{}_grid.pdf", stem)),
        key: dir.join(format!("{}_key.pdf", stem)),
    };

    write_document(puzzle_pages(crossword, page), page, &crossword.title, &pair.grid)?;
    log::debug!("wrote {}", pair.grid.display());

    let key_title = format!("{} - Answer Key", crossword.title);
    write_document(key_pages(crossword, page), page, &key_title, &pair.key)?;
    log::debug!("wrote {}", pair.key.display());

    Ok(pair)
}

fn puzzle_pages(crossword: &Crossword, page: PageSize) -> Vec<Content> {
    let mut sheet = Sheet::new(page);
    sheet.heading(BOLD, TITLE_SIZE, &crossword.title);
    sheet.grid(&crossword.grid, false);

    for direction in Direction::ALL {
        let clues = crossword.clues_by_direction(direction);
        if clues.is_empty() {
            continue;
        }
        sheet.heading(BOLD, HEADING_SIZE, direction.label());
        for clue in clues {
            sheet.paragraph(&format!("{}. {} ({})", clue.number, clue.text.trim(), clue.length()));
        }
    }
    sheet.finish()
}

fn key_pages(crossword: &Crossword, page: PageSize) -> Vec<Content> {
    let mut sheet = Sheet::new(page);
    sheet.heading(BOLD, TITLE_SIZE, &format!("{} - Answer Key", crossword.title));
    sheet.grid(&crossword.grid, true);

    for direction in Direction::ALL {
        let clues = crossword.clues_by_direction(direction);
        if clues.is_empty() {
            continue;
        }
        sheet.heading(BOLD, HEADING_SIZE, direction.label());
        for clue in clues {
            sheet.paragraph(&format!("{}. {}", clue.number, clue.answer));
        }
    }
    sheet.finish()
}

/// Accumulates page content streams, tracking the vertical cursor from the
/// top edge and breaking onto a new page when text runs out of room.
struct Sheet {
    width: f32,
    height: f32,
    pages: Vec<Content>,
    current: Content,
    cursor: f32,
}

impl Sheet {
    fn new(page: PageSize) -> Self {
        let (width, height) = page.dimensions();
        Self {
            width,
            height,
            pages: Vec::new(),
            current: Content { operations: vec![] },
            cursor: MARGIN,
        }
    }

    fn finish(mut self) -> Vec<Content> {
        self.pages.push(self.current);
        self.pages
    }

    fn new_page(&mut self) {
        let done = std::mem::replace(&mut self.current, Content { operations: vec![] });
        self.pages.push(done);
        self.cursor = MARGIN;
    }

    fn ensure_room(&mut self, needed: f32) {
        if self.cursor + needed > self.height - MARGIN && self.cursor > MARGIN {
            self.new_page();
        }
    }

    fn usable_width(&self) -> f32 {
        self.width - 2.0 * MARGIN
    }

    /// Text with its top edge `top` points below the top of the page.
    fn text(&mut self, font: &str, size: f32, x: f32, top: f32, text: &str) {
        let baseline = self.height - top - size;
        let ops = &mut self.current.operations;
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new("Tf", vec![font.into(), size.into()]));
        ops.push(Operation::new("Td", vec![x.into(), baseline.into()]));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(win_ansi(text), StringFormat::Literal)],
        ));
        ops.push(Operation::new("ET", vec![]));
    }

    fn heading(&mut self, font: &str, size: f32, text: &str) {
        self.ensure_room(size + LINE_GAP + TEXT_SIZE);
        self.cursor += LINE_GAP;
        self.text(font, size, MARGIN, self.cursor, text);
        self.cursor += size + LINE_GAP;
    }

    fn paragraph(&mut self, text: &str) {
        for line in wrap(text, TEXT_SIZE, self.usable_width()) {
            self.ensure_room(TEXT_SIZE + LINE_GAP);
            self.text(REGULAR, TEXT_SIZE, MARGIN, self.cursor, &line);
            self.cursor += TEXT_SIZE + LINE_GAP;
        }
    }

    /// Draw the letter squares of `grid`, numbered, with letters when `reveal`.
    fn grid(&mut self, grid: &Grid, reveal: bool) {
        if grid.width == 0 || grid.height == 0 {
            return;
        }

        let avail_height = (self.height - MARGIN - self.cursor) * GRID_HEIGHT_SHARE;
        let cell = MAX_CELL
            .min(self.usable_width() / grid.width as f32)
            .min(avail_height / grid.height as f32);
        let left = (self.width - cell * grid.width as f32) / 2.0;
        let top = self.cursor + LINE_GAP;

        self.current.operations.push(Operation::new("w", vec![0.8.into()]));
        for (row, cells) in grid.cells.iter().enumerate() {
            for (col, square) in cells.iter().enumerate() {
                if !square.is_letter() {
                    continue;
                }
                let x = left + col as f32 * cell;
                let y = self.height - top - (row as f32 + 1.0) * cell;
                self.current
                    .operations
                    .push(Operation::new("re", vec![x.into(), y.into(), cell.into(), cell.into()]));
            }
        }
        self.current.operations.push(Operation::new("S", vec![]));

        let number_size = (cell * 0.3).max(3.0);
        let letter_size = cell * 0.6;
        for (row, cells) in grid.cells.iter().enumerate() {
            for (col, square) in cells.iter().enumerate() {
                let x = left + col as f32 * cell;
                let y = top + row as f32 * cell;
                if let Some(number) = square.number() {
                    self.text(REGULAR, number_size, x + 1.5, y + 1.0, &number.to_string());
                }
                if let (true, Some(letter)) = (reveal, square.letter()) {
                    let lx = x + (cell - letter_size * 0.66) / 2.0;
                    let ly = y + cell * 0.3;
                    self.text(BOLD, letter_size, lx, ly, &letter.to_string());
                }
            }
        }

        self.cursor = top + cell * grid.height as f32 + 2.0 * LINE_GAP;
    }
}

fn write_document(
    pages: Vec<Content>,
    page: PageSize,
    title: &str,
    path: &Path,
) -> Result<(), RenderError> {
    let (width, height) = page.dimensions();
    let mut document = Document::with_version("1.5");
    let pages_id = document.new_object_id();

    let regular = document.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold = document.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = document.add_object(dictionary! {
        "Font" => dictionary! {
            REGULAR => regular,
            BOLD => bold,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for content in pages {
        let content_id = document.add_object(Stream::new(Dictionary::new(), content.encode()?));
        let page_id = document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.0.into(), 0.0.into(), width.into(), height.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    document.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = document.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    document.trailer.set("Root", catalog_id);

    let created = chrono::Local::now().format("D:%Y%m%d%H%M%S").to_string();
    let info_id = document.add_object(dictionary! {
        "Title" => Object::String(win_ansi(title), StringFormat::Literal),
        "Producer" => Object::string_literal(PRODUCER),
        "CreationDate" => Object::string_literal(created),
    });
    document.trailer.set("Info", info_id);

    document.save(path)?;
    Ok(())
}

/// Greedy word wrap against an average glyph width of half the font size.
fn wrap(text: &str, size: f32, width: f32) -> Vec<String> {
    let max_chars = ((width / (size * 0.5)) as usize).max(8);
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let needed = if line.is_empty() {
            word.chars().count()
        } else {
            line.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Encode text for the standard Type1 fonts (WinAnsiEncoding).
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2026}' => 0x85,
            '\u{20AC}' => 0x80,
            c if (c as u32) < 0x80 || (0xA0..=0xFF).contains(&(c as u32)) => c as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stem_replaces_separators() {
        assert_eq!(file_stem("AC/DC Trivia"), "AC-DC Trivia");
        assert_eq!(file_stem("a\\b"), "a-b");
        assert_eq!(file_stem("   "), "crossword");
    }

    #[test]
    fn test_page_size_parse() {
        assert_eq!("A4".parse::<PageSize>(), Ok(PageSize::A4));
        assert_eq!("letter".parse::<PageSize>(), Ok(PageSize::Letter));
        assert!("legal".parse::<PageSize>().is_err());
        assert_eq!(PageSize::Letter.to_string(), "letter");
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "Which planet in our solar system has the most confirmed moons orbiting it?";
        let lines = wrap(text, 10.0, 100.0);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.chars().count() <= 20));
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_wrap_keeps_long_words_whole() {
        let lines = wrap("Pneumonoultramicroscopicsilicovolcanoconiosis is long", 10.0, 80.0);
        assert_eq!(lines[0], "Pneumonoultramicroscopicsilicovolcanoconiosis");
    }

    #[test]
    fn test_win_ansi() {
        assert_eq!(win_ansi("Café"), vec![b'C', b'a', b'f', 0xE9]);
        assert_eq!(win_ansi("\u{201C}hi\u{201D}"), vec![0x93, b'h', b'i', 0x94]);
        assert_eq!(win_ansi("日"), vec![b'?']);
    }
}
