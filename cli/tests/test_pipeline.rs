use std::path::{Path, PathBuf};
use std::process::Command;
use topic2crossword::engine::{CrosswordEngine, EngineError, GeneratedPuzzle};
use topic2crossword::{exit, App, AppError, Settings};
use topic2crossword_core::{
    Crossword, GeneratorError, GridBounds, GridSize, PageSize, PdfPair, WordEntry,
};
use topic2crossword_questions::{Profile, PuzzleFile};

const CAPITALS: &str = r#"[
    {"question": "Capital of Spain?", "answer": "Madrid"},
    {"question": "City on the Thames?", "answer": "London"},
    {"question": "Capital of Germany?", "answer": "Berlin"},
    {"question": "City of light?", "answer": "Paris"},
    {"question": "Eternal city?", "answer": "Rome"},
    {"question": "Capital of Norway?", "answer": "Oslo"},
    {"question": "Capital of Portugal?", "answer": "Lisbon"},
    {"question": "Capital of Austria?", "answer": "Vienna"},
    {"question": "Capital of Ireland?", "answer": "Dublin"},
    {"question": "Capital of Egypt?", "answer": "Cairo"}
]"#;

fn write_questions(dir: &Path, json: &str) -> PathBuf {
    let path = dir.join("questions.json");
    std::fs::write(&path, json).unwrap();
    path
}

fn settings(questions: PathBuf, output_dir: &Path) -> Settings {
    Settings {
        questions,
        topic: "World Capitals".to_string(),
        profile: Profile::Standard,
        policy: Profile::Standard.policy(),
        bounds: GridBounds::default(),
        page_size: PageSize::A4,
        attempts: 5,
        seed: Some(7),
        output_dir: output_dir.to_path_buf(),
        min_pdf_bytes: 1024,
        save_puzzle: None,
        dry_run: false,
    }
}

fn pdf_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".pdf"))
        .collect();
    names.sort();
    names
}

/// Sizes like the real engine but never writes anything useful.
struct FakeEngine {
    failure: Option<fn() -> EngineError>,
    pdf_bytes: Option<usize>,
}

impl CrosswordEngine for FakeEngine {
    fn grid_size(
        &mut self,
        _words: &[WordEntry],
        _bounds: GridBounds,
    ) -> Result<GridSize, EngineError> {
        Ok(GridSize { rows: 17, cols: 17 })
    }

    fn generate(&mut self, title: &str, out_dir: &Path) -> Result<GeneratedPuzzle, EngineError> {
        if let Some(failure) = self.failure {
            return Err(failure());
        }
        let files = PdfPair {
            grid: out_dir.join(format!("{}_grid.pdf", title)),
            key: out_dir.join(format!("{}_key.pdf", title)),
        };
        if let Some(len) = self.pdf_bytes {
            std::fs::write(&files.grid, vec![b'%'; len]).unwrap();
            std::fs::write(&files.key, vec![b'%'; len]).unwrap();
        }
        Ok(GeneratedPuzzle {
            files,
            crossword: Crossword::new(title.to_string(), 1, 1),
        })
    }
}

#[test]
fn test_full_run_renames_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let questions = write_questions(dir.path(), CAPITALS);
    let out = dir.path().join("out");
    let puzzle_path = dir.path().join("puzzle.json");

    let mut settings = settings(questions, &out);
    settings.save_puzzle = Some(puzzle_path.clone());
    let summary = App::new(settings).run().unwrap();

    assert_eq!(summary.loaded, 10);
    assert_eq!(summary.accepted.len(), 10);
    assert_eq!(summary.rejected, 0);
    assert_eq!(summary.grid, GridSize { rows: 17, cols: 17 });
    assert_eq!(summary.placed + summary.unplaced.len(), 10);

    let files = summary.files.unwrap();
    assert_eq!(files.grid, out.join("DDS-AICWG-World_Capitals_grid.pdf"));
    assert_eq!(files.key, out.join("DDS-AICWG-World_Capitals_key.pdf"));
    assert_eq!(
        pdf_names(&out),
        vec!["DDS-AICWG-World_Capitals_grid.pdf", "DDS-AICWG-World_Capitals_key.pdf"]
    );
    assert!(std::fs::read(&files.grid).unwrap().starts_with(b"%PDF-"));

    let puzzle = PuzzleFile::load(&puzzle_path).unwrap();
    assert_eq!(puzzle.metadata.topic, "World Capitals");
    assert_eq!(puzzle.crossword.title, "DDS AI Crossword Generator - World Capitals");
    assert_eq!(puzzle.crossword.clues.len(), summary.placed);
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let questions = write_questions(dir.path(), CAPITALS);
    let out = dir.path().join("out");

    let mut settings = settings(questions, &out);
    settings.dry_run = true;
    let summary = App::new(settings).run().unwrap();

    assert_eq!(summary.accepted.len(), 10);
    assert!(summary.files.is_none());
    assert!(!out.exists());
}

#[test]
fn test_loaded_count_includes_skipped_entries() {
    let dir = tempfile::tempdir().unwrap();
    let with_orphan = CAPITALS.replacen('[', r#"[{"answer": "Orphan"}, "#, 1);
    let questions = write_questions(dir.path(), &with_orphan);

    let mut settings = settings(questions, dir.path());
    settings.dry_run = true;
    let summary = App::new(settings).run().unwrap();

    assert_eq!(summary.loaded, 11);
    assert_eq!(summary.accepted.len(), 10);
    assert!(summary.report().starts_with("10 of 11 questions usable, grid 17 x 17\n"));
}

#[test]
fn test_missing_and_malformed_input() {
    let dir = tempfile::tempdir().unwrap();

    let err = App::new(settings(dir.path().join("nope.json"), dir.path())).run().unwrap_err();
    assert!(matches!(err, AppError::Input { .. }));
    assert_eq!(err.exit_code(), exit::INPUT);

    let questions = write_questions(dir.path(), r#"{"question": "Not a list?", "answer": "No"}"#);
    let err = App::new(settings(questions, dir.path())).run().unwrap_err();
    assert_eq!(err.exit_code(), exit::INPUT);
}

#[test]
fn test_too_few_questions() {
    let dir = tempfile::tempdir().unwrap();
    let questions = write_questions(
        dir.path(),
        r#"[
            {"question": "Capital of Spain?", "answer": "Madrid"},
            {"question": "Two letters?", "answer": "Ox"},
            {"question": "Has digits?", "answer": "R2D2"}
        ]"#,
    );

    let err = App::new(settings(questions, dir.path())).run().unwrap_err();
    assert!(matches!(err, AppError::TooFewQuestions(_)));
    assert_eq!(err.exit_code(), exit::TOO_FEW_QUESTIONS);
    assert!(pdf_names(dir.path()).is_empty());
}

#[test]
fn test_grid_sizing_failure() {
    let dir = tempfile::tempdir().unwrap();
    let questions = write_questions(dir.path(), CAPITALS);

    let mut settings = settings(questions, dir.path());
    settings.bounds = GridBounds { rows: 5, cols: 5 };
    let err = App::new(settings).run().unwrap_err();

    assert!(matches!(
        err,
        AppError::GridSizing(EngineError::Generator(GeneratorError::WordTooLong { .. }))
    ));
    assert_eq!(err.exit_code(), exit::GRID_SIZING);
}

#[test]
fn test_generation_failure() {
    let dir = tempfile::tempdir().unwrap();
    let questions = write_questions(dir.path(), CAPITALS);
    let engine = FakeEngine {
        failure: Some(|| {
            EngineError::Generator(GeneratorError::NothingPlaced { rows: 17, cols: 17 })
        }),
        pdf_bytes: None,
    };

    let err = App::with_engine(settings(questions, dir.path()), Box::new(engine))
        .run()
        .unwrap_err();
    assert!(matches!(err, AppError::Generation(_)));
    assert_eq!(err.exit_code(), exit::GENERATION);
}

#[test]
fn test_output_validation_failures() {
    let dir = tempfile::tempdir().unwrap();
    let questions = write_questions(dir.path(), CAPITALS);

    let tiny = FakeEngine {
        failure: None,
        pdf_bytes: Some(100),
    };
    let err = App::with_engine(settings(questions.clone(), dir.path()), Box::new(tiny))
        .run()
        .unwrap_err();
    assert_eq!(err.exit_code(), exit::OUTPUT);
    // nothing is renamed when validation fails
    assert!(!dir.path().join("DDS-AICWG-World_Capitals_grid.pdf").exists());

    let missing = FakeEngine {
        failure: None,
        pdf_bytes: None,
    };
    let other = dir.path().join("other");
    std::fs::create_dir(&other).unwrap();
    let err = App::with_engine(settings(questions, &other), Box::new(missing))
        .run()
        .unwrap_err();
    assert_eq!(err.exit_code(), exit::OUTPUT);
}

#[test]
fn test_fake_engine_output_is_renamed() {
    let dir = tempfile::tempdir().unwrap();
    let questions = write_questions(dir.path(), CAPITALS);
    let engine = FakeEngine {
        failure: None,
        pdf_bytes: Some(2048),
    };

    let mut settings = settings(questions, dir.path());
    settings.topic = "Sci-Fi: Movies!".to_string();
    let summary = App::with_engine(settings, Box::new(engine)).run().unwrap();

    assert_eq!(
        pdf_names(dir.path()),
        vec!["DDS-AICWG-Sci_Fi_Movies_grid.pdf", "DDS-AICWG-Sci_Fi_Movies_key.pdf"]
    );
    assert_eq!(summary.placed, 0);
}

fn binary(dir: &Path, args: &[&str]) -> std::process::Output {
    let config = dir.join("config.json");
    std::fs::write(&config, "{}").unwrap();
    Command::new(env!("CARGO_BIN_EXE_topic2crossword"))
        .args(args)
        .arg("--config")
        .arg(&config)
        .arg("--quiet")
        .current_dir(dir)
        .output()
        .unwrap()
}

#[test]
fn test_binary_exit_codes() {
    let dir = tempfile::tempdir().unwrap();

    let usage = Command::new(env!("CARGO_BIN_EXE_topic2crossword")).output().unwrap();
    assert_eq!(usage.status.code(), Some(exit::INPUT as i32));

    let few = dir.path().join("few.json");
    std::fs::write(&few, r#"[{"question": "Capital of Spain?", "answer": "Madrid"}]"#).unwrap();
    let output = binary(dir.path(), &[few.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(exit::TOO_FEW_QUESTIONS as i32));

    let output = binary(dir.path(), &["missing.json"]);
    assert_eq!(output.status.code(), Some(exit::INPUT as i32));

    let questions = write_questions(dir.path(), CAPITALS);
    let output = binary(dir.path(), &[questions.to_str().unwrap(), "Capitals", "--seed", "3"]);
    assert_eq!(output.status.code(), Some(exit::SUCCESS as i32));
    assert!(dir.path().join("DDS-AICWG-Capitals_grid.pdf").is_file());
    assert!(dir.path().join("DDS-AICWG-Capitals_key.pdf").is_file());
}

#[test]
fn test_binary_dry_run_prints_word_list() {
    let dir = tempfile::tempdir().unwrap();
    let questions = write_questions(dir.path(), CAPITALS);
    let config = dir.path().join("config.json");
    std::fs::write(&config, "{}").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_topic2crossword"))
        .arg(&questions)
        .arg("--dry-run")
        .arg("--config")
        .arg(&config)
        .env("RUST_LOG", "off")
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(exit::SUCCESS as i32));
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "10 of 10 questions usable, grid 17 x 17");
    assert_eq!(lines.len(), 11);
    assert!(lines.contains(&"  MADRID          Capital of Spain?"));
    assert!(pdf_names(dir.path()).is_empty());
}
