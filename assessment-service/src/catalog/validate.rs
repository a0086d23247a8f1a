//! Structural checks run once while the catalog loads.

use super::error::CatalogError;
use crate::models::{
    AssessmentDetail, Interpretation, Question, ScoredAssessment, TypeCode, TypedAssessment,
};

pub(super) fn validate_detail(key: &str, detail: &AssessmentDetail) -> Result<(), CatalogError> {
    if detail.id() != key {
        return Err(CatalogError::IdMismatch {
            key: key.to_string(),
            id: detail.id().to_string(),
        });
    }
    check_question_order(key, detail.questions())?;

    match detail {
        AssessmentDetail::Scored(assessment) => validate_scored(assessment),
        AssessmentDetail::Typed(assessment) => validate_typed(assessment),
    }
}

/// Question ids must run 1, 2, 3, ... in declaration order.
fn check_question_order(id: &str, questions: &[Question]) -> Result<(), CatalogError> {
    if questions.is_empty() {
        return Err(CatalogError::NoQuestions { id: id.to_string() });
    }
    for (position, question) in (1u32..).zip(questions) {
        if question.id != position {
            return Err(CatalogError::QuestionOrder {
                id: id.to_string(),
                position,
                found: question.id,
            });
        }
        if question.options.is_empty() {
            return Err(CatalogError::EmptyOptions {
                id: id.to_string(),
                question: question.id,
            });
        }
    }
    Ok(())
}

fn validate_scored(assessment: &ScoredAssessment) -> Result<(), CatalogError> {
    for question in &assessment.questions {
        if let Some(dimension) = question.dimension {
            return Err(CatalogError::UnexpectedDimension {
                id: assessment.id.clone(),
                question: question.id,
                dimension,
            });
        }
        if let Some(option) = question.options.iter().find(|o| o.value.as_score().is_none()) {
            return Err(CatalogError::UnexpectedOptionValue {
                id: assessment.id.clone(),
                question: question.id,
                option: option.text.clone(),
            });
        }
    }
    check_partition(
        &assessment.id,
        &assessment.interpretation,
        assessment.max_score(),
    )
}

/// Bands must tile `[0, max]` exactly: no gaps, no overlaps, nothing past `max`.
pub(super) fn check_partition(
    id: &str,
    interpretation: &Interpretation,
    max: u32,
) -> Result<(), CatalogError> {
    let mut ranges: Vec<_> = interpretation.bands().iter().map(|b| b.range).collect();
    ranges.sort();

    // First score not yet covered by an earlier band.
    let mut next = 0u32;
    for range in ranges {
        if range.low > next {
            return Err(CatalogError::BandGap {
                id: id.to_string(),
                from: next,
                to: range.low - 1,
            });
        }
        if range.low < next {
            return Err(CatalogError::BandOverlap {
                id: id.to_string(),
                at: range.low,
            });
        }
        next = range.high.saturating_add(1);
    }

    if next <= max {
        return Err(CatalogError::BandGap {
            id: id.to_string(),
            from: next,
            to: max,
        });
    }
    if next - 1 > max {
        return Err(CatalogError::BandOverrun {
            id: id.to_string(),
            covered: next - 1,
            max,
        });
    }
    Ok(())
}

fn validate_typed(assessment: &TypedAssessment) -> Result<(), CatalogError> {
    for question in &assessment.questions {
        let dimension = question
            .dimension
            .ok_or_else(|| CatalogError::MissingDimension {
                id: assessment.id.clone(),
                question: question.id,
            })?;

        for option in &question.options {
            let letter = option.value.as_trait().ok_or_else(|| {
                CatalogError::UnexpectedOptionValue {
                    id: assessment.id.clone(),
                    question: question.id,
                    option: option.text.clone(),
                }
            })?;
            if !dimension.contains(letter) {
                return Err(CatalogError::TraitOutsideDimension {
                    id: assessment.id.clone(),
                    question: question.id,
                    letter,
                    dimension,
                });
            }
        }
    }

    let missing: Vec<String> = TypeCode::all()
        .into_iter()
        .filter(|code| !assessment.types.contains_key(code))
        .map(|code| code.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(CatalogError::IncompleteTypes {
            id: assessment.id.clone(),
            missing,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InterpretationBand, ScoreRange};

    fn bands(ranges: &[(u32, u32)]) -> Interpretation {
        Interpretation::new(
            ranges
                .iter()
                .map(|&(low, high)| InterpretationBand {
                    range: ScoreRange::new(low, high),
                    level: format!("{}-{}", low, high),
                    description: String::new(),
                    color: "#000000".to_string(),
                })
                .collect(),
        )
    }

    #[test]
    fn accepts_exact_partition() {
        let phq9 = bands(&[(0, 4), (5, 9), (10, 14), (15, 19), (20, 27)]);
        assert!(check_partition("phq9", &phq9, 27).is_ok());
    }

    #[test]
    fn accepts_partition_declared_out_of_order() {
        let shuffled = bands(&[(10, 21), (0, 4), (5, 9)]);
        assert!(check_partition("x", &shuffled, 21).is_ok());
    }

    #[test]
    fn reports_gap_between_bands() {
        let err = check_partition("x", &bands(&[(0, 4), (6, 10)]), 10).unwrap_err();
        assert!(matches!(err, CatalogError::BandGap { from: 5, to: 5, .. }));
    }

    #[test]
    fn reports_missing_start() {
        let err = check_partition("x", &bands(&[(1, 10)]), 10).unwrap_err();
        assert!(matches!(err, CatalogError::BandGap { from: 0, to: 0, .. }));
    }

    #[test]
    fn reports_uncovered_tail() {
        let err = check_partition("x", &bands(&[(0, 4), (5, 9)]), 12).unwrap_err();
        assert!(matches!(err, CatalogError::BandGap { from: 10, to: 12, .. }));
    }

    #[test]
    fn reports_overlap() {
        let err = check_partition("x", &bands(&[(0, 5), (5, 10)]), 10).unwrap_err();
        assert!(matches!(err, CatalogError::BandOverlap { at: 5, .. }));
    }

    #[test]
    fn reports_overrun_past_max() {
        let err = check_partition("x", &bands(&[(0, 5), (6, 12)]), 10).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::BandOverrun {
                covered: 12,
                max: 10,
                ..
            }
        ));
    }

    #[test]
    fn empty_interpretation_is_a_gap() {
        let err = check_partition("x", &bands(&[]), 3).unwrap_err();
        assert!(matches!(err, CatalogError::BandGap { from: 0, to: 3, .. }));
    }
}
