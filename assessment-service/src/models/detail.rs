use super::interpretation::Interpretation;
use super::personality::{Dimension, PersonalityType, TraitLetter, TypeCode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value carried by an answer option.
///
/// Summable instruments use a numeric score; typing instruments use the trait
/// letter the option votes for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Score(u32),
    Trait(TraitLetter),
}

impl OptionValue {
    pub fn as_score(&self) -> Option<u32> {
        match self {
            OptionValue::Score(score) => Some(*score),
            OptionValue::Trait(_) => None,
        }
    }

    pub fn as_trait(&self) -> Option<TraitLetter> {
        match self {
            OptionValue::Trait(letter) => Some(*letter),
            OptionValue::Score(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnswerOption {
    pub text: String,
    pub value: OptionValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Question {
    /// 1-based position within the assessment.
    pub id: u32,
    pub text: String,
    pub options: Vec<AnswerOption>,
    /// Trait axis, typing instruments only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<Dimension>,
}

impl Question {
    /// Highest score any option of this question contributes.
    pub fn max_score(&self) -> Option<u32> {
        self.options
            .iter()
            .filter_map(|option| option.value.as_score())
            .max()
    }
}

/// Questionnaire whose option scores are summed and mapped onto a band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoredAssessment {
    pub id: String,
    pub name: String,
    pub description: String,
    pub questions: Vec<Question>,
    pub interpretation: Interpretation,
}

impl ScoredAssessment {
    /// Largest reachable total: every question answered with its top option.
    pub fn max_score(&self) -> u32 {
        self.questions
            .iter()
            .map(|q| q.max_score().unwrap_or(0))
            .sum()
    }
}

/// Questionnaire whose answers vote for trait letters that combine into a
/// four-letter type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypedAssessment {
    pub id: String,
    pub name: String,
    pub description: String,
    pub questions: Vec<Question>,
    pub types: BTreeMap<TypeCode, PersonalityType>,
}

/// Full record returned for a single assessment.
///
/// Serialized untagged: clients tell the variants apart by the presence of
/// `interpretation` or `types`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssessmentDetail {
    Scored(ScoredAssessment),
    Typed(TypedAssessment),
}

impl AssessmentDetail {
    pub fn id(&self) -> &str {
        match self {
            AssessmentDetail::Scored(a) => &a.id,
            AssessmentDetail::Typed(a) => &a.id,
        }
    }

    pub fn questions(&self) -> &[Question] {
        match self {
            AssessmentDetail::Scored(a) => &a.questions,
            AssessmentDetail::Typed(a) => &a.questions,
        }
    }

    pub fn is_typed(&self) -> bool {
        matches!(self, AssessmentDetail::Typed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCORED: &str = r##"{
        "id": "mini",
        "name": "Mini",
        "description": "Two items",
        "questions": [
            {"id": 1, "text": "One", "options": [{"text": "No", "value": 0}, {"text": "Yes", "value": 2}]},
            {"id": 2, "text": "Two", "options": [{"text": "No", "value": 0}, {"text": "Yes", "value": 1}]}
        ],
        "interpretation": {
            "0-1": {"level": "Low", "description": "low", "color": "#4A6741"},
            "2-3": {"level": "High", "description": "high", "color": "#B85042"}
        }
    }"##;

    const TYPED: &str = r##"{
        "id": "typing",
        "name": "Typing",
        "description": "One item",
        "questions": [
            {"id": 1, "text": "Parties?", "dimension": "EI",
             "options": [{"text": "Yes", "value": "E"}, {"text": "No", "value": "I"}]}
        ],
        "types": {
            "INTJ": {"name": "Architect", "description": "d", "strengths": "s", "color": "#2F4858"}
        }
    }"##;

    #[test]
    fn discriminates_by_payload_shape() {
        let scored: AssessmentDetail = serde_json::from_str(SCORED).unwrap();
        let typed: AssessmentDetail = serde_json::from_str(TYPED).unwrap();

        assert!(!scored.is_typed());
        assert!(typed.is_typed());
        assert_eq!(scored.id(), "mini");
        assert_eq!(typed.questions()[0].dimension, Some(Dimension::EI));
    }

    #[test]
    fn max_score_sums_top_options() {
        let AssessmentDetail::Scored(scored) = serde_json::from_str(SCORED).unwrap() else {
            panic!("expected scored assessment");
        };
        assert_eq!(scored.max_score(), 3);
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let typed: AssessmentDetail = serde_json::from_str(TYPED).unwrap();
        let value = serde_json::to_value(&typed).unwrap();
        assert!(value.get("types").is_some());
        assert!(value.get("interpretation").is_none());
        assert_eq!(value["questions"][0]["options"][0]["value"], "E");

        let scored: AssessmentDetail = serde_json::from_str(SCORED).unwrap();
        let value = serde_json::to_value(&scored).unwrap();
        assert_eq!(value["questions"][1]["options"][1]["value"], 1);
        assert!(value["questions"][0].get("dimension").is_none());
        assert_eq!(value["interpretation"]["2-3"]["level"], "High");
    }
}
