use serde::{Deserialize, Serialize};

/// Requirements gating one day of the journey. Each clause is independently
/// satisfiable; the day holds until every clause passes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayRequirements {
    pub day: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_questions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_upload_questions: Vec<String>,
    #[serde(default)]
    pub min_uploads: usize,
    #[serde(default)]
    pub min_assignments: usize,
}

/// Ordered day schedule for a journey.
#[derive(Debug, Clone)]
pub struct JourneyBlueprint {
    days: Vec<DayRequirements>,
}

impl JourneyBlueprint {
    /// The default seven-day schedule.
    pub fn standard() -> Self {
        Self {
            days: standard_days(),
        }
    }

    pub fn custom(days: Vec<DayRequirements>) -> Self {
        Self { days }
    }

    /// Truncate or extend the standard schedule to `n` days. Added days carry
    /// no requirements beyond a single assignment.
    pub fn with_days(n: u32) -> Self {
        let mut days = standard_days();
        days.truncate(n as usize);
        while (days.len() as u32) < n {
            let day = days.len() as u32 + 1;
            days.push(DayRequirements {
                day,
                min_assignments: 1,
                ..DayRequirements::default()
            });
        }
        Self { days }
    }

    pub fn total_days(&self) -> u32 {
        self.days.len() as u32
    }

    pub fn requirements_for(&self, day: u32) -> Option<&DayRequirements> {
        self.days.iter().find(|requirements| requirements.day == day)
    }
}

fn standard_days() -> Vec<DayRequirements> {
    vec![
        DayRequirements {
            day: 1,
            required_questions: vec!["day1_threshold".to_string(), "day1_compass".to_string()],
            ..DayRequirements::default()
        },
        DayRequirements {
            day: 2,
            required_questions: vec!["day2_mirror".to_string(), "day2_tides".to_string()],
            min_assignments: 1,
            ..DayRequirements::default()
        },
        DayRequirements {
            day: 3,
            required_questions: vec!["day3_shadow_walk".to_string()],
            required_upload_questions: vec!["day3_artifact".to_string()],
            min_assignments: 1,
            ..DayRequirements::default()
        },
        DayRequirements {
            day: 4,
            required_questions: vec!["day4_crossroads".to_string(), "day4_oath".to_string()],
            min_assignments: 1,
            ..DayRequirements::default()
        },
        DayRequirements {
            day: 5,
            required_questions: vec!["day5_depths".to_string()],
            min_uploads: 1,
            min_assignments: 1,
            ..DayRequirements::default()
        },
        DayRequirements {
            day: 6,
            required_questions: vec!["day6_sigil".to_string(), "day6_reckoning".to_string()],
            min_assignments: 2,
            ..DayRequirements::default()
        },
        DayRequirements {
            day: 7,
            required_questions: vec!["day7_emergence".to_string()],
            required_upload_questions: vec!["day7_testament".to_string()],
            min_assignments: 1,
            ..DayRequirements::default()
        },
    ]
}
