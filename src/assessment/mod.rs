//! Assessment intake, signal aggregation, classification, and the attempt
//! lifecycle.

pub mod classify;
pub mod domain;
pub mod intake;
pub mod repository;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use classify::{ArchetypeClassifier, ClassifierRubric, ClassifyError, cosine_similarity};
pub use domain::{
    AnswerSubmission, AnswerValue, Attempt, AttemptId, AttemptStatus, ClassificationResult,
    OptionDef, Question, QuestionKind, RankItem, ScaleSpec, ScoreDomain, SignalRule, SignalVector,
    Totals, ValidationError,
};
pub use intake::{parse_signed_score, RawAnswer, SubmissionGuard};
pub use repository::{AttemptRepository, RepositoryError};
pub use scoring::{ProgressTally, ScoredAnswer, SignalAggregator, SignalContribution, WeightConfig};
pub use service::{AssessmentService, AssessmentServiceError};
