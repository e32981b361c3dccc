use chrono::{DateTime, Utc};

use super::blueprint::{DayRequirements, JourneyBlueprint};
use super::domain::{DaySubmission, JourneyError, JourneyState};

/// Result of applying one submission to the state.
#[derive(Debug, Clone, PartialEq)]
pub struct DayProgress {
    pub completed: bool,
    pub advanced: bool,
    pub missing: Vec<String>,
}

/// Linear day-by-day state machine: gate the day, merge the submission,
/// re-evaluate requirements, then hold, advance, or complete.
///
/// There is no branching and no restart; the only terminal state is
/// completion.
pub struct JourneyMachine {
    blueprint: JourneyBlueprint,
    max_retained_uploads: usize,
}

impl JourneyMachine {
    pub fn new(blueprint: JourneyBlueprint, max_retained_uploads: usize) -> Self {
        Self {
            blueprint,
            max_retained_uploads,
        }
    }

    pub fn blueprint(&self) -> &JourneyBlueprint {
        &self.blueprint
    }

    /// Apply a submission. Rejections leave `state` untouched; acceptance
    /// merges, bumps the version, and stamps `last_submitted_at`.
    pub fn apply(
        &self,
        state: &mut JourneyState,
        submission: &DaySubmission,
        now: DateTime<Utc>,
    ) -> Result<DayProgress, JourneyError> {
        if state.is_completed() {
            return Err(JourneyError::AlreadyCompleted);
        }
        if submission.day != state.day {
            return Err(JourneyError::OutOfOrder {
                submitted: submission.day,
                current: state.day,
            });
        }

        self.merge(state, submission);
        state.last_submitted_at = Some(now);
        state.version += 1;

        let missing = self
            .blueprint
            .requirements_for(state.day)
            .map(|requirements| missing_requirements(state, requirements))
            .unwrap_or_default();

        if !missing.is_empty() {
            return Ok(DayProgress {
                completed: false,
                advanced: false,
                missing,
            });
        }

        if state.day < self.blueprint.total_days() {
            state.day += 1;
            Ok(DayProgress {
                completed: false,
                advanced: true,
                missing: Vec::new(),
            })
        } else {
            state.completed_at = Some(now);
            Ok(DayProgress {
                completed: true,
                advanced: false,
                missing: Vec::new(),
            })
        }
    }

    fn merge(&self, state: &mut JourneyState, submission: &DaySubmission) {
        // answers dedup by question id, last write wins
        for answer in &submission.answers {
            let existing = state
                .answers
                .iter()
                .position(|candidate| candidate.question_id == answer.question_id);
            match existing {
                Some(index) => state.answers[index] = answer.clone(),
                None => state.answers.push(answer.clone()),
            }
        }

        // keyed uploads dedup by id, unkeyed uploads append
        for upload in &submission.uploads {
            let existing = upload.upload_id.as_ref().and_then(|id| {
                state
                    .uploads
                    .iter()
                    .position(|candidate| candidate.upload_id.as_ref() == Some(id))
            });
            match existing {
                Some(index) => state.uploads[index] = upload.clone(),
                None => state.uploads.push(upload.clone()),
            }
        }
        // retention cap drops the oldest entries first
        while state.uploads.len() > self.max_retained_uploads {
            state.uploads.remove(0);
        }

        // assignments dedup by (day, assignment_id), last write wins
        for assignment in &submission.assignments {
            let existing = state.assignments.iter().position(|candidate| {
                candidate.day == assignment.day
                    && candidate.assignment_id == assignment.assignment_id
            });
            match existing {
                Some(index) => state.assignments[index] = assignment.clone(),
                None => state.assignments.push(assignment.clone()),
            }
        }
    }
}

fn missing_requirements(state: &JourneyState, requirements: &DayRequirements) -> Vec<String> {
    let mut missing = Vec::new();

    for question_id in &requirements.required_questions {
        let answered = state
            .answers
            .iter()
            .any(|answer| &answer.question_id == question_id);
        if !answered {
            missing.push(format!("answer:{question_id}"));
        }
    }

    for question_id in &requirements.required_upload_questions {
        let uploaded = state
            .uploads
            .iter()
            .any(|upload| upload.question_id.as_deref() == Some(question_id));
        if !uploaded {
            missing.push(format!("upload:{question_id}"));
        }
    }

    if state.uploads.len() < requirements.min_uploads {
        missing.push(format!(
            "uploads:{}/{}",
            state.uploads.len(),
            requirements.min_uploads
        ));
    }

    let assignment_count = state
        .assignments
        .iter()
        .filter(|assignment| assignment.day == requirements.day)
        .count();
    if assignment_count < requirements.min_assignments {
        missing.push(format!(
            "assignments:{assignment_count}/{}",
            requirements.min_assignments
        ));
    }

    missing
}
