use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for assessment attempts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttemptId(pub String);

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Question kinds supported by the bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Single,
    Multi,
    Scale,
    Rank,
    Check,
    Text,
    File,
}

impl QuestionKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Multi => "multi",
            Self::Scale => "scale",
            Self::Rank => "rank",
            Self::Check => "check",
            Self::Text => "text",
            Self::File => "file",
        }
    }
}

/// Score domain a signal rule feeds into.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ScoreDomain {
    #[default]
    Major,
    Luminary,
    Shadow,
}

impl ScoreDomain {
    pub const fn ordered() -> [Self; 3] {
        [Self::Major, Self::Luminary, Self::Shadow]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Luminary => "luminary",
            Self::Shadow => "shadow",
        }
    }
}

/// Signal routing attached to an option, rank item, scale anchor, or question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRule {
    pub targets: Vec<String>,
    #[serde(default)]
    pub domain: ScoreDomain,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl SignalRule {
    pub fn targeting(targets: &[&str], domain: ScoreDomain) -> Self {
        Self {
            targets: targets.iter().map(|target| target.to_string()).collect(),
            domain,
            tone: None,
            weight: None,
        }
    }

    pub fn with_tone(mut self, tone: &str) -> Self {
        self.tone = Some(tone.to_string());
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }
}

/// Selectable option on single/multi questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionDef {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal: Option<SignalRule>,
}

/// Rankable item on rank questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankItem {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal: Option<SignalRule>,
}

/// Numeric scale description with anchor signals on either side of neutral.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleSpec {
    pub min: i32,
    pub max: i32,
    pub neutral: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low_anchor: Option<SignalRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_anchor: Option<SignalRule>,
}

/// Immutable question bank entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub kind: QuestionKind,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionDef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<RankItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<ScaleSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_signal: Option<SignalRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_picks: Option<usize>,
}

/// One typed answer payload per question kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnswerValue {
    Single { option_id: String },
    Multi { option_ids: Vec<String> },
    Scale { value: f64 },
    Rank { ranks: BTreeMap<String, u32> },
    Check { complete: bool },
    Text { body: String },
    File { reference: String },
}

/// One user-submitted answer, already validated against its question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerSubmission {
    pub question_id: String,
    pub value: AnswerValue,
    pub day: u32,
}

/// Sparse accumulator of weighted evidence keyed by signal dimension.
///
/// A secondary nested map tracks per-dimension tone sub-totals whenever the
/// contributing rule carries a tone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalVector {
    weights: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    tones: BTreeMap<String, BTreeMap<String, f64>>,
}

impl SignalVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: &[(&str, f64)]) -> Self {
        let mut vector = Self::new();
        for (target, weight) in pairs {
            vector.add(target, *weight, None);
        }
        vector
    }

    pub fn add(&mut self, target: &str, weight: f64, tone: Option<&str>) {
        *self.weights.entry(target.to_string()).or_insert(0.0) += weight;
        if let Some(tone) = tone {
            *self
                .tones
                .entry(target.to_string())
                .or_default()
                .entry(tone.to_string())
                .or_insert(0.0) += weight;
        }
    }

    pub fn merge(&mut self, other: &SignalVector) {
        for (target, weight) in &other.weights {
            *self.weights.entry(target.clone()).or_insert(0.0) += weight;
        }
        for (target, tones) in &other.tones {
            let entry = self.tones.entry(target.clone()).or_default();
            for (tone, weight) in tones {
                *entry.entry(tone.clone()).or_insert(0.0) += weight;
            }
        }
    }

    pub fn get(&self, target: &str) -> f64 {
        self.weights.get(target).copied().unwrap_or(0.0)
    }

    pub fn weights(&self) -> &BTreeMap<String, f64> {
        &self.weights
    }

    pub fn tones(&self) -> &BTreeMap<String, BTreeMap<String, f64>> {
        &self.tones
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn dot(&self, other: &SignalVector) -> f64 {
        self.weights
            .iter()
            .filter_map(|(target, weight)| other.weights.get(target).map(|w| weight * w))
            .sum()
    }

    pub fn l2_norm(&self) -> f64 {
        self.weights
            .values()
            .map(|weight| weight * weight)
            .sum::<f64>()
            .sqrt()
    }

    /// Restrict the vector to the given dimensions, dropping tone detail.
    pub fn project(&self, dimensions: &[&str]) -> SignalVector {
        let mut projected = SignalVector::new();
        for dimension in dimensions {
            if let Some(weight) = self.weights.get(*dimension) {
                projected.add(dimension, *weight, None);
            }
        }
        projected
    }
}

/// Per-domain signal totals.
///
/// Every domain is structurally present from construction on; there is no
/// partially initialized state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    major: SignalVector,
    luminary: SignalVector,
    shadow: SignalVector,
}

impl Totals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn domain(&self, domain: ScoreDomain) -> &SignalVector {
        match domain {
            ScoreDomain::Major => &self.major,
            ScoreDomain::Luminary => &self.luminary,
            ScoreDomain::Shadow => &self.shadow,
        }
    }

    pub fn domain_mut(&mut self, domain: ScoreDomain) -> &mut SignalVector {
        match domain {
            ScoreDomain::Major => &mut self.major,
            ScoreDomain::Luminary => &mut self.luminary,
            ScoreDomain::Shadow => &mut self.shadow,
        }
    }

    pub fn merge(&mut self, other: &Totals) {
        for domain in ScoreDomain::ordered() {
            self.domain_mut(domain).merge(other.domain(domain));
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ScoreDomain, &SignalVector)> {
        ScoreDomain::ordered()
            .into_iter()
            .map(move |domain| (domain, self.domain(domain)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, vector)| vector.is_empty())
    }
}

/// High level status of one assessment run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptStatus {
    Started,
    Submitted,
}

impl AttemptStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::Submitted => "submitted",
        }
    }
}

/// Funnel outcome attached to a submitted attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub path: String,
    pub order: String,
    pub archetype_id: String,
    pub match_score: f64,
}

/// Persisted record of one assessment run.
///
/// Created on start, mutated only by submission, immutable once submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    pub attempt_id: AttemptId,
    pub profile_key: String,
    pub test_id: String,
    pub status: AttemptStatus,
    pub answers: Vec<AnswerSubmission>,
    pub totals: Totals,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<ClassificationResult>,
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
}

/// Structural input failures raised at the intake and scoring boundaries.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("unknown question id '{0}'")]
    UnknownQuestion(String),
    #[error("question '{question_id}' expects a {expected} payload")]
    MismatchedPayload {
        question_id: String,
        expected: &'static str,
    },
    #[error("field '{field}' on question '{question_id}' is missing or malformed")]
    MalformedField {
        question_id: String,
        field: &'static str,
    },
    #[error("value '{value}' is not a finite signed score")]
    InvalidScore { value: String },
    #[error("scale question '{0}' is missing its scale bounds")]
    MissingScale(String),
}
