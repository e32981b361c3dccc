use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use super::domain::{AnswerSubmission, AnswerValue, Question, QuestionKind, ValidationError};

/// Raw inbound answer prior to validation against the question bank.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAnswer {
    pub question_id: String,
    pub value: Value,
    #[serde(default = "first_day")]
    pub day: u32,
}

fn first_day() -> u32 {
    1
}

/// Parse an untrusted numeric payload into a finite signed score.
///
/// This is the only place raw numbers cross into the engine; anything past
/// this boundary is a validated `f64`.
pub fn parse_signed_score(value: &Value) -> Result<f64, ValidationError> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed
        .filter(|score| score.is_finite())
        .ok_or_else(|| ValidationError::InvalidScore {
            value: value.to_string(),
        })
}

/// Boundary guard converting raw submissions into typed answers.
///
/// The guard owns the immutable question bank; every conversion is validated
/// against the question's declared kind so downstream scoring never sees a
/// malformed payload.
#[derive(Debug, Clone)]
pub struct SubmissionGuard {
    bank: BTreeMap<String, Question>,
}

impl SubmissionGuard {
    pub fn new(questions: Vec<Question>) -> Self {
        let bank = questions
            .into_iter()
            .map(|question| (question.id.clone(), question))
            .collect();
        Self { bank }
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.bank.get(id)
    }

    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.bank.values()
    }

    /// Convert one raw answer, rejecting unknown questions and wrong shapes.
    pub fn typed_answer(&self, raw: &RawAnswer) -> Result<AnswerSubmission, ValidationError> {
        let question = self
            .bank
            .get(&raw.question_id)
            .ok_or_else(|| ValidationError::UnknownQuestion(raw.question_id.clone()))?;

        let value = match question.kind {
            QuestionKind::Single => AnswerValue::Single {
                option_id: expect_string(question, &raw.value, "option_id")?,
            },
            QuestionKind::Multi => AnswerValue::Multi {
                option_ids: expect_string_list(question, &raw.value, "option_ids")?,
            },
            QuestionKind::Scale => AnswerValue::Scale {
                value: parse_signed_score(&raw.value)?,
            },
            QuestionKind::Rank => AnswerValue::Rank {
                ranks: expect_ranks(question, &raw.value)?,
            },
            QuestionKind::Check => AnswerValue::Check {
                complete: raw.value.as_bool().ok_or(ValidationError::MalformedField {
                    question_id: question.id.clone(),
                    field: "complete",
                })?,
            },
            QuestionKind::Text => AnswerValue::Text {
                body: expect_string(question, &raw.value, "body")?,
            },
            QuestionKind::File => AnswerValue::File {
                reference: expect_string(question, &raw.value, "reference")?,
            },
        };

        Ok(AnswerSubmission {
            question_id: question.id.clone(),
            value,
            day: raw.day,
        })
    }

    /// Convert a batch all-or-nothing: the first failure rejects the whole
    /// submission with no partial state.
    pub fn typed_answers(&self, raws: &[RawAnswer]) -> Result<Vec<AnswerSubmission>, ValidationError> {
        raws.iter().map(|raw| self.typed_answer(raw)).collect()
    }
}

fn expect_string(
    question: &Question,
    value: &Value,
    field: &'static str,
) -> Result<String, ValidationError> {
    value
        .as_str()
        .map(|text| text.to_string())
        .ok_or(ValidationError::MalformedField {
            question_id: question.id.clone(),
            field,
        })
}

fn expect_string_list(
    question: &Question,
    value: &Value,
    field: &'static str,
) -> Result<Vec<String>, ValidationError> {
    let entries = value.as_array().ok_or(ValidationError::MalformedField {
        question_id: question.id.clone(),
        field,
    })?;

    entries
        .iter()
        .map(|entry| {
            entry
                .as_str()
                .map(|text| text.to_string())
                .ok_or(ValidationError::MalformedField {
                    question_id: question.id.clone(),
                    field,
                })
        })
        .collect()
}

fn expect_ranks(question: &Question, value: &Value) -> Result<BTreeMap<String, u32>, ValidationError> {
    let entries = value.as_object().ok_or(ValidationError::MalformedField {
        question_id: question.id.clone(),
        field: "ranks",
    })?;

    let mut ranks = BTreeMap::new();
    for (item_id, rank) in entries {
        let rank = parse_signed_score(rank)?;
        if rank.fract() != 0.0 || rank < 1.0 {
            return Err(ValidationError::MalformedField {
                question_id: question.id.clone(),
                field: "ranks",
            });
        }
        ranks.insert(item_id.clone(), rank as u32);
    }
    Ok(ranks)
}
