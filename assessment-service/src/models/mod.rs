pub mod detail;
pub mod interpretation;
pub mod personality;
pub mod summary;

pub use detail::{
    AnswerOption, AssessmentDetail, OptionValue, Question, ScoredAssessment, TypedAssessment,
};
pub use interpretation::{Interpretation, InterpretationBand, RangeParseError, ScoreRange};
pub use personality::{Dimension, PersonalityType, TraitLetter, TypeCode, TypeCodeError};
pub use summary::AssessmentSummary;
