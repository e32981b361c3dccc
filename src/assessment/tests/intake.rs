use serde_json::json;

use super::common::*;
use crate::assessment::domain::{AnswerValue, ValidationError};
use crate::assessment::intake::{parse_signed_score, RawAnswer, SubmissionGuard};

fn guard() -> SubmissionGuard {
    SubmissionGuard::new(question_bank())
}

fn raw(question_id: &str, value: serde_json::Value) -> RawAnswer {
    RawAnswer {
        question_id: question_id.to_string(),
        value,
        day: 1,
    }
}

#[test]
fn parse_signed_score_accepts_numbers_and_numeric_strings() {
    assert_eq!(parse_signed_score(&json!(5)).expect("number"), 5.0);
    assert_eq!(parse_signed_score(&json!(-2.5)).expect("negative"), -2.5);
    assert_eq!(parse_signed_score(&json!(" 3.5 ")).expect("string"), 3.5);
}

#[test]
fn parse_signed_score_rejects_everything_else() {
    for value in [json!("three"), json!(true), json!(null), json!({"v": 1})] {
        match parse_signed_score(&value) {
            Err(ValidationError::InvalidScore { .. }) => {}
            other => panic!("expected invalid score for {value}, got {other:?}"),
        }
    }
}

#[test]
fn unknown_question_is_rejected_by_name() {
    let error = guard()
        .typed_answer(&raw("no_such_question", json!("stand_ground")))
        .expect_err("unknown question");

    match error {
        ValidationError::UnknownQuestion(id) => assert_eq!(id, "no_such_question"),
        other => panic!("expected unknown question, got {other:?}"),
    }
}

#[test]
fn single_answers_arrive_as_option_ids() {
    let answer = guard()
        .typed_answer(&raw("day1_threshold", json!("stand_ground")))
        .expect("typed");

    assert_eq!(
        answer.value,
        AnswerValue::Single {
            option_id: "stand_ground".to_string()
        }
    );
}

#[test]
fn scale_answers_accept_numeric_strings() {
    let answer = guard()
        .typed_answer(&raw("day1_compass", json!("6")))
        .expect("typed");

    assert_eq!(answer.value, AnswerValue::Scale { value: 6.0 });
}

#[test]
fn multi_answers_must_be_string_arrays() {
    let error = guard()
        .typed_answer(&raw("day2_mirror", json!([1, 2])))
        .expect_err("non-string entries");

    match error {
        ValidationError::MalformedField { question_id, field } => {
            assert_eq!(question_id, "day2_mirror");
            assert_eq!(field, "option_ids");
        }
        other => panic!("expected malformed field, got {other:?}"),
    }
}

#[test]
fn rank_answers_reject_fractional_or_non_positive_ranks() {
    let fractional = guard()
        .typed_answer(&raw("day2_tides", json!({"kinship": 1.5})))
        .expect_err("fractional rank");
    assert!(matches!(
        fractional,
        ValidationError::MalformedField { field: "ranks", .. }
    ));

    let zero = guard()
        .typed_answer(&raw("day2_tides", json!({"kinship": 0})))
        .expect_err("zero rank");
    assert!(matches!(
        zero,
        ValidationError::MalformedField { field: "ranks", .. }
    ));
}

#[test]
fn batches_fail_closed_on_the_first_bad_answer() {
    let raws = vec![
        raw("day1_threshold", json!("stand_ground")),
        raw("day1_compass", json!("not-a-number")),
    ];

    let error = guard().typed_answers(&raws).expect_err("bad scale value");
    assert!(matches!(error, ValidationError::InvalidScore { .. }));
}
