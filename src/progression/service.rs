use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::assessment::repository::{AttemptRepository, RepositoryError};
use crate::catalog::{CatalogCache, CatalogRepository};
use crate::resolution::BundleDomain;
use crate::results::{CompositeResult, ResultComposer, SourceKind, SourceTotals};

use super::domain::{DaySubmission, JourneyError, JourneyState, SubmissionOutcome};
use super::machine::JourneyMachine;
use super::repository::{CompletionNotice, CompletionNotifier, JourneyRepository};

/// Service walking journeys through daily submissions and composing the
/// terminal results payload on completion.
pub struct JourneyService<J, A, N, C> {
    machine: JourneyMachine,
    repository: Arc<J>,
    attempts: Arc<A>,
    notifier: Arc<N>,
    composer: ResultComposer<CatalogCache<C>>,
    catalog: Arc<CatalogCache<C>>,
    /// Attempt suites folded into the composite, in blend order.
    source_tests: Vec<(SourceKind, String)>,
}

impl<J, A, N, C> JourneyService<J, A, N, C>
where
    J: JourneyRepository + 'static,
    A: AttemptRepository + 'static,
    N: CompletionNotifier + 'static,
    C: CatalogRepository + 'static,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        machine: JourneyMachine,
        repository: Arc<J>,
        attempts: Arc<A>,
        notifier: Arc<N>,
        composer: ResultComposer<CatalogCache<C>>,
        catalog: Arc<CatalogCache<C>>,
        source_tests: Vec<(SourceKind, String)>,
    ) -> Self {
        Self {
            machine,
            repository,
            attempts,
            notifier,
            composer,
            catalog,
            source_tests,
        }
    }

    /// Apply one day's submission and persist the outcome.
    ///
    /// Out-of-order days are typed rejections with the state left unchanged.
    /// On the final day the composite results payload is assembled and stored
    /// on the journey record before saving.
    pub fn submit_day(
        &self,
        profile_key: &str,
        test_id: &str,
        submission: &DaySubmission,
        now: DateTime<Utc>,
        force_reload: bool,
    ) -> Result<SubmissionOutcome, JourneyServiceError> {
        let mut state = self
            .repository
            .load(profile_key, test_id)?
            .unwrap_or_else(|| JourneyState::new(profile_key, test_id));
        let expected_version = state.version;

        let progress = self.machine.apply(&mut state, submission, now)?;

        if progress.completed {
            if force_reload {
                self.catalog.invalidate();
            }
            let composite = self.compose_results(&state)?;
            let archetype = composite
                .top_selections
                .get(&BundleDomain::Archetype)
                .and_then(|selections| selections.first())
                .map(|selection| selection.label.clone());
            state.results = Some(composite);

            self.repository.save(state.clone(), expected_version)?;
            info!(profile = %state.profile_key, test = %state.test_id, "journey completed");

            // the notice is informational; a dead transport must not undo completion
            let notice = CompletionNotice {
                profile_key: state.profile_key.clone(),
                test_id: state.test_id.clone(),
                archetype,
                completed_at: now,
            };
            if let Err(err) = self.notifier.notify(notice) {
                warn!(error = %err, "completion notice failed");
            }

            return Ok(SubmissionOutcome {
                completed: true,
                message: format!("journey complete after day {}", submission.day),
                progress: state,
                missing: Vec::new(),
            });
        }

        self.repository.save(state.clone(), expected_version)?;

        let message = if progress.advanced {
            format!(
                "day {} satisfied, advanced to day {}",
                submission.day, state.day
            )
        } else {
            format!(
                "day {} still missing {} requirement(s)",
                state.day,
                progress.missing.len()
            )
        };

        Ok(SubmissionOutcome {
            completed: false,
            message,
            progress: state,
            missing: progress.missing,
        })
    }

    /// Current state without mutation, if the journey exists.
    pub fn progress(
        &self,
        profile_key: &str,
        test_id: &str,
    ) -> Result<Option<JourneyState>, JourneyServiceError> {
        Ok(self.repository.load(profile_key, test_id)?)
    }

    fn compose_results(&self, state: &JourneyState) -> Result<CompositeResult, JourneyServiceError> {
        let mut sources = Vec::new();
        for (kind, test_id) in &self.source_tests {
            if let Some(attempt) = self
                .attempts
                .find_latest_submitted(&state.profile_key, test_id)?
            {
                sources.push(SourceTotals {
                    source: *kind,
                    totals: attempt.totals,
                    classification: attempt.classification,
                });
            }
        }

        Ok(self.composer.compose(&sources))
    }
}

/// Error raised by the journey service.
#[derive(Debug, thiserror::Error)]
pub enum JourneyServiceError {
    #[error(transparent)]
    Journey(#[from] JourneyError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
