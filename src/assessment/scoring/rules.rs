use super::super::domain::{
    AnswerValue, Question, QuestionKind, SignalRule, Totals, ValidationError,
};
use super::config::WeightConfig;
use super::{ProgressTally, ScoredAnswer, SignalContribution};

pub(crate) fn score_answer(
    question: &Question,
    answer: &AnswerValue,
    config: &WeightConfig,
) -> Result<ScoredAnswer, ValidationError> {
    match (question.kind, answer) {
        (QuestionKind::Single, AnswerValue::Single { option_id }) => {
            Ok(score_single(question, option_id, config))
        }
        (QuestionKind::Multi, AnswerValue::Multi { option_ids }) => {
            Ok(score_multi(question, option_ids, config))
        }
        (QuestionKind::Scale, AnswerValue::Scale { value }) => {
            score_scale(question, *value, config)
        }
        (QuestionKind::Rank, AnswerValue::Rank { ranks }) => Ok(score_rank(
            question,
            |item_id| ranks.get(item_id).copied(),
            config,
        )),
        (QuestionKind::Check, AnswerValue::Check { complete }) => {
            Ok(score_check(question, *complete, config))
        }
        (QuestionKind::Text, AnswerValue::Text { body }) => {
            Ok(score_presence(question, !body.trim().is_empty(), config))
        }
        (QuestionKind::File, AnswerValue::File { reference }) => {
            Ok(score_presence(question, !reference.trim().is_empty(), config))
        }
        (kind, _) => Err(ValidationError::MismatchedPayload {
            question_id: question.id.clone(),
            expected: kind.label(),
        }),
    }
}

struct Accumulator {
    deltas: Totals,
    tally: ProgressTally,
    contributions: Vec<SignalContribution>,
}

impl Accumulator {
    fn new() -> Self {
        Self {
            deltas: Totals::new(),
            tally: ProgressTally::default(),
            contributions: Vec::new(),
        }
    }

    fn apply(&mut self, rule: &SignalRule, earned: f64, source: &str, note: String) {
        let vector = self.deltas.domain_mut(rule.domain);
        for target in &rule.targets {
            vector.add(target, earned, rule.tone.as_deref());
        }
        self.contributions.push(SignalContribution {
            source: source.to_string(),
            earned,
            note,
        });
    }

    fn finish(self) -> ScoredAnswer {
        ScoredAnswer {
            deltas: self.deltas,
            tally: self.tally,
            contributions: self.contributions,
        }
    }
}

fn resolved_weight(rule: &SignalRule, fallback: f64) -> f64 {
    rule.weight.unwrap_or(fallback)
}

fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn score_single(question: &Question, option_id: &str, config: &WeightConfig) -> ScoredAnswer {
    let mut acc = Accumulator::new();
    acc.tally.possible = config.full_weight;

    // unknown option ids score zero rather than erroring
    if let Some(option) = question.options.iter().find(|option| option.id == option_id) {
        if let Some(rule) = &option.signal {
            let weight = resolved_weight(rule, config.full_weight);
            acc.tally.earned = weight;
            acc.apply(
                rule,
                weight,
                &option.id,
                format!("selected '{}'", option.label),
            );
        }
    }

    acc.finish()
}

fn score_multi(question: &Question, option_ids: &[String], config: &WeightConfig) -> ScoredAnswer {
    let max_picks = question.max_picks.unwrap_or(question.options.len());
    let mut acc = Accumulator::new();
    acc.tally.possible = config.per_pick_weight * max_picks as f64;

    // extras beyond max_picks are ignored in submission order
    for option_id in option_ids.iter().take(max_picks) {
        let Some(option) = question.options.iter().find(|option| &option.id == option_id) else {
            continue;
        };
        if let Some(rule) = &option.signal {
            let weight = resolved_weight(rule, config.per_pick_weight);
            acc.tally.earned += weight;
            acc.apply(
                rule,
                weight,
                &option.id,
                format!("picked '{}'", option.label),
            );
        }
    }

    acc.finish()
}

fn score_scale(
    question: &Question,
    value: f64,
    config: &WeightConfig,
) -> Result<ScoredAnswer, ValidationError> {
    let scale = question
        .scale
        .as_ref()
        .ok_or_else(|| ValidationError::MissingScale(question.id.clone()))?;

    let mut acc = Accumulator::new();
    acc.tally.possible = config.full_weight;

    let clamped = value.clamp(scale.min as f64, scale.max as f64);
    let neutral = scale.neutral as f64;

    let (intensity, anchor, side) = if clamped < neutral {
        let span = (neutral - scale.min as f64).max(1.0);
        ((neutral - clamped) / span, scale.low_anchor.as_ref(), "low")
    } else if clamped > neutral {
        let span = (scale.max as f64 - neutral).max(1.0);
        ((clamped - neutral) / span, scale.high_anchor.as_ref(), "high")
    } else {
        // neutral scores nothing on either side
        (0.0, None, "neutral")
    };

    if let Some(rule) = anchor {
        let weight = resolved_weight(rule, config.full_weight);
        let earned = round_2dp(weight * intensity);
        if earned > 0.0 {
            acc.tally.earned = earned;
            acc.apply(
                rule,
                earned,
                &question.id,
                format!("scale value {clamped} on {side} side of neutral"),
            );
        }
    }

    Ok(acc.finish())
}

fn score_rank<F>(question: &Question, rank_of: F, config: &WeightConfig) -> ScoredAnswer
where
    F: Fn(&str) -> Option<u32>,
{
    let count = question.items.len();
    let mut acc = Accumulator::new();
    if count == 0 {
        return acc.finish();
    }
    // full marks assume every position filled at the default weight
    acc.tally.possible = config.full_weight * (count as f64 + 1.0) / 2.0;

    for item in &question.items {
        let Some(rank) = rank_of(&item.id) else {
            continue;
        };
        if rank < 1 || rank as usize > count {
            continue;
        }

        let pts = (count as u32 - rank + 1) as f64;
        let fraction = pts / count as f64;
        if let Some(rule) = &item.signal {
            let weight = resolved_weight(rule, config.full_weight);
            let earned = round_2dp(weight * fraction);
            acc.tally.earned += earned;
            acc.apply(
                rule,
                earned,
                &item.id,
                format!("ranked '{}' at {rank} ({pts} pts)", item.label),
            );
        } else {
            acc.tally.earned += round_2dp(config.full_weight * fraction);
        }
    }

    acc.finish()
}

fn score_check(question: &Question, complete: bool, config: &WeightConfig) -> ScoredAnswer {
    let mut acc = Accumulator::new();
    acc.tally.possible = config.full_weight;

    if complete {
        if let Some(rule) = &question.required_signal {
            let weight = resolved_weight(rule, config.full_weight);
            acc.tally.earned = weight;
            acc.apply(rule, weight, &question.id, "marked complete".to_string());
        } else {
            acc.tally.earned = config.full_weight;
        }
    }

    acc.finish()
}

fn score_presence(question: &Question, present: bool, config: &WeightConfig) -> ScoredAnswer {
    let mut acc = Accumulator::new();

    // text/file answers are informational unless a rule is attached
    let Some(rule) = &question.required_signal else {
        return acc.finish();
    };

    let weight = resolved_weight(rule, config.full_weight);
    acc.tally.possible = weight;
    if present {
        acc.tally.earned = weight;
        acc.apply(rule, weight, &question.id, "response provided".to_string());
    }

    acc.finish()
}
