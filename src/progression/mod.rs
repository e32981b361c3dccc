//! Multi-day journey progression: blueprint, state machine, and service.

mod blueprint;
pub mod domain;
mod machine;
pub mod repository;
pub mod service;

pub use blueprint::{DayRequirements, JourneyBlueprint};
pub use domain::{
    AssignmentRecord, DaySubmission, JourneyError, JourneyState, SubmissionOutcome, UploadRef,
};
pub use machine::{DayProgress, JourneyMachine};
pub use repository::{CompletionNotice, CompletionNotifier, JourneyRepository, NotifyError};
pub use service::{JourneyService, JourneyServiceError};
