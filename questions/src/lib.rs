mod error;
pub use error::FileError;

pub mod policy;
pub use policy::{
    normalize_answer, Filtered, PolicyError, Profile, RejectReason, Rejection, ValidationPolicy,
};

mod puzzle_file;
pub use puzzle_file::{PuzzleFile, PuzzleFileFormat, PuzzleMetadata};

mod source;
pub use source::{QuestionItem, QuestionSet, SourceFormat};
