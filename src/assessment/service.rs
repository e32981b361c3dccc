use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::catalog::{CatalogCache, CatalogRepository};

use super::classify::{ArchetypeClassifier, ClassifierRubric, ClassifyError};
use super::domain::{
    AnswerSubmission, Attempt, AttemptId, AttemptStatus, ScoreDomain, Totals, ValidationError,
};
use super::intake::{RawAnswer, SubmissionGuard};
use super::repository::{AttemptRepository, RepositoryError};
use super::scoring::{ProgressTally, SignalAggregator, WeightConfig};

/// Service composing the intake guard, aggregator, classifier, and store.
pub struct AssessmentService<R, C> {
    guard: SubmissionGuard,
    aggregator: SignalAggregator,
    classifier: ArchetypeClassifier<CatalogCache<C>>,
    catalog: Arc<CatalogCache<C>>,
    repository: Arc<R>,
}

static ATTEMPT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_attempt_id() -> AttemptId {
    let id = ATTEMPT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AttemptId(format!("att-{id:06}"))
}

impl<R, C> AssessmentService<R, C>
where
    R: AttemptRepository + 'static,
    C: CatalogRepository + 'static,
{
    pub fn new(
        guard: SubmissionGuard,
        weights: WeightConfig,
        rubric: ClassifierRubric,
        repository: Arc<R>,
        catalog: Arc<CatalogCache<C>>,
    ) -> Self {
        Self {
            guard,
            aggregator: SignalAggregator::new(weights),
            classifier: ArchetypeClassifier::new(rubric, catalog.clone()),
            catalog,
            repository,
        }
    }

    /// Open a new attempt for a profile/test pair.
    pub fn start(
        &self,
        profile_key: &str,
        test_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Attempt, AssessmentServiceError> {
        let attempt = Attempt {
            attempt_id: next_attempt_id(),
            profile_key: profile_key.to_string(),
            test_id: test_id.to_string(),
            status: AttemptStatus::Started,
            answers: Vec::new(),
            totals: Totals::new(),
            classification: None,
            started_at: now,
            submitted_at: None,
        };

        Ok(self.repository.insert(attempt)?)
    }

    /// Validate, score, classify, and persist a full submission.
    ///
    /// A classification failure leaves the attempt exactly as it was: nothing
    /// is persisted until the funnel has produced a result.
    pub fn submit(
        &self,
        attempt_id: &AttemptId,
        raw_answers: &[RawAnswer],
        now: DateTime<Utc>,
        force_reload: bool,
    ) -> Result<Attempt, AssessmentServiceError> {
        let mut attempt = self
            .repository
            .find_by_id(attempt_id)?
            .ok_or(RepositoryError::NotFound)?;

        if attempt.status == AttemptStatus::Submitted {
            return Err(AssessmentServiceError::AlreadySubmitted(attempt_id.clone()));
        }

        if force_reload {
            self.catalog.invalidate();
        }

        let answers = self.guard.typed_answers(raw_answers)?;

        let mut totals = Totals::new();
        let mut tally = ProgressTally::default();
        for answer in &answers {
            let question = self
                .guard
                .question(&answer.question_id)
                .ok_or_else(|| ValidationError::UnknownQuestion(answer.question_id.clone()))?;
            let scored = self.aggregator.score(question, &answer.value)?;
            totals.merge(&scored.deltas);
            tally.merge(&scored.tally);
        }

        let classification = self.classifier.classify(totals.domain(ScoreDomain::Major))?;

        info!(
            attempt = %attempt.attempt_id,
            archetype = %classification.archetype_id,
            progress = tally.percent(),
            "attempt classified"
        );

        attempt.answers = answers;
        attempt.totals = totals;
        attempt.classification = Some(classification);
        attempt.status = AttemptStatus::Submitted;
        attempt.submitted_at = Some(now);

        self.repository.update(attempt.clone())?;
        Ok(attempt)
    }

    /// Advisory per-day earned/possible tally for progress reporting.
    ///
    /// Purely informational; classification never consults it.
    pub fn progress_by_day(
        &self,
        answers: &[AnswerSubmission],
    ) -> Result<BTreeMap<u32, ProgressTally>, AssessmentServiceError> {
        let mut days: BTreeMap<u32, ProgressTally> = BTreeMap::new();
        for answer in answers {
            let question = self
                .guard
                .question(&answer.question_id)
                .ok_or_else(|| ValidationError::UnknownQuestion(answer.question_id.clone()))?;
            let scored = self.aggregator.score(question, &answer.value)?;
            days.entry(answer.day).or_default().merge(&scored.tally);
        }
        Ok(days)
    }

    /// Latest submitted attempt for a profile/test pair, if any.
    pub fn latest_submitted(
        &self,
        profile_key: &str,
        test_id: &str,
    ) -> Result<Option<Attempt>, AssessmentServiceError> {
        Ok(self
            .repository
            .find_latest_submitted(profile_key, test_id)?)
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Classify(#[from] ClassifyError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("attempt '{0}' was already submitted")]
    AlreadySubmitted(AttemptId),
}
