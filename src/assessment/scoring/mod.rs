//! Signal aggregation: one answer in, weighted deltas to the named signal
//! buckets out.

mod config;
mod rules;

pub use config::WeightConfig;

use serde::{Deserialize, Serialize};

use super::domain::{AnswerValue, Question, Totals, ValidationError};

/// Stateless aggregator applying the per-kind scoring rules.
///
/// Aggregation is pure: identical `(question, answer, config)` inputs always
/// produce identical output, with no hidden state.
pub struct SignalAggregator {
    config: WeightConfig,
}

impl SignalAggregator {
    pub fn new(config: WeightConfig) -> Self {
        Self { config }
    }

    pub fn score(
        &self,
        question: &Question,
        answer: &AnswerValue,
    ) -> Result<ScoredAnswer, ValidationError> {
        rules::score_answer(question, answer, &self.config)
    }
}

/// Discrete contribution from one applied signal rule, kept for audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalContribution {
    pub source: String,
    pub earned: f64,
    pub note: String,
}

/// Advisory earned/possible bookkeeping for progress percentages.
///
/// Never consulted by the classifier; a day can classify with any tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressTally {
    pub earned: f64,
    pub possible: f64,
}

impl ProgressTally {
    pub fn merge(&mut self, other: &ProgressTally) {
        self.earned += other.earned;
        self.possible += other.possible;
    }

    pub fn percent(&self) -> f64 {
        if self.possible <= 0.0 {
            0.0
        } else {
            (self.earned / self.possible * 100.0).clamp(0.0, 100.0)
        }
    }
}

/// Output of scoring one answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredAnswer {
    pub deltas: Totals,
    pub tally: ProgressTally,
    pub contributions: Vec<SignalContribution>,
}
