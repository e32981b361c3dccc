use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::assessment::domain::AnswerSubmission;
use crate::results::CompositeResult;

/// Reference to an uploaded artifact, optionally tied to a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_id: Option<String>,
    pub uri: String,
}

/// A day-tagged assignment submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    pub day: u32,
    pub assignment_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// One day's inbound submission bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySubmission {
    pub day: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub answers: Vec<AnswerSubmission>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub uploads: Vec<UploadRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assignments: Vec<AssignmentRecord>,
}

/// Mutable multi-day journey state.
///
/// Created at day 1; only the machine mutates it; `completed_at` is the sole
/// terminal marker. `version` increments on every accepted merge and backs
/// the repository's compare-and-swap save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneyState {
    pub profile_key: String,
    pub test_id: String,
    pub day: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub answers: Vec<AnswerSubmission>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub uploads: Vec<UploadRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assignments: Vec<AssignmentRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_submitted_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<CompositeResult>,
    pub version: u64,
}

impl JourneyState {
    pub fn new(profile_key: &str, test_id: &str) -> Self {
        Self {
            profile_key: profile_key.to_string(),
            test_id: test_id.to_string(),
            day: 1,
            answers: Vec::new(),
            uploads: Vec::new(),
            assignments: Vec::new(),
            last_submitted_at: None,
            completed_at: None,
            results: None,
            version: 0,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

/// Envelope returned for accepted submissions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionOutcome {
    pub completed: bool,
    pub message: String,
    pub progress: JourneyState,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<String>,
}

/// Typed rejections raised by the state machine.
#[derive(Debug, thiserror::Error)]
pub enum JourneyError {
    #[error("submission for day {submitted} rejected: journey is on day {current}")]
    OutOfOrder { submitted: u32, current: u32 },
    #[error("journey already completed")]
    AlreadyCompleted,
}
