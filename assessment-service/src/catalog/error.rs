use crate::models::{Dimension, TraitLetter};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog document is malformed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("assessment id '{0}' is listed more than once")]
    DuplicateId(String),

    #[error("assessment '{0}' is listed but has no detail record")]
    MissingDetail(String),

    #[error("detail record stored under '{key}' declares id '{id}'")]
    IdMismatch { key: String, id: String },

    #[error("assessment '{id}' has no questions")]
    NoQuestions { id: String },

    #[error("assessment '{id}': question at position {position} has id {found}")]
    QuestionOrder { id: String, position: u32, found: u32 },

    #[error("assessment '{id}': question {question} has no options")]
    EmptyOptions { id: String, question: u32 },

    #[error("assessment '{id}': question {question} option '{option}' carries the wrong kind of value")]
    UnexpectedOptionValue {
        id: String,
        question: u32,
        option: String,
    },

    #[error("assessment '{id}': no band covers scores {from}-{to}")]
    BandGap { id: String, from: u32, to: u32 },

    #[error("assessment '{id}': more than one band covers score {at}")]
    BandOverlap { id: String, at: u32 },

    #[error("assessment '{id}': bands reach score {covered} but the maximum possible score is {max}")]
    BandOverrun { id: String, covered: u32, max: u32 },

    #[error("assessment '{id}': question {question} is scored but tagged with dimension {dimension:?}")]
    UnexpectedDimension {
        id: String,
        question: u32,
        dimension: Dimension,
    },

    #[error("assessment '{id}': question {question} has no dimension")]
    MissingDimension { id: String, question: u32 },

    #[error("assessment '{id}': question {question} offers trait {letter:?} outside dimension {dimension:?}")]
    TraitOutsideDimension {
        id: String,
        question: u32,
        letter: TraitLetter,
        dimension: Dimension,
    },

    #[error("assessment '{id}' is missing personality types {missing:?}")]
    IncompleteTypes { id: String, missing: Vec<String> },

    #[error("Assessment not found")]
    NotFound(String),
}
