use std::collections::BTreeMap;

use crate::assessment::domain::{
    OptionDef, Question, QuestionKind, RankItem, ScaleSpec, ScoreDomain, SignalRule,
};
use crate::assessment::scoring::{SignalAggregator, WeightConfig};
use crate::catalog::{CatalogError, CatalogRepository, Category, Component, ReferenceVector};

use crate::assessment::domain::SignalVector;

pub(super) fn weight_config() -> WeightConfig {
    WeightConfig {
        full_weight: 2.0,
        per_pick_weight: 1.0,
    }
}

pub(super) fn aggregator() -> SignalAggregator {
    SignalAggregator::new(weight_config())
}

pub(super) fn single_question() -> Question {
    Question {
        id: "day1_threshold".to_string(),
        kind: QuestionKind::Single,
        prompt: "A stranger blocks the only bridge. What do you do?".to_string(),
        options: vec![
            OptionDef {
                id: "stand_ground".to_string(),
                label: "Stand your ground".to_string(),
                signal: Some(SignalRule::targeting(
                    &["courage", "resolve"],
                    ScoreDomain::Major,
                )),
            },
            OptionDef {
                id: "seek_counsel".to_string(),
                label: "Ask the stranger's business".to_string(),
                signal: Some(SignalRule::targeting(
                    &["empathy", "insight"],
                    ScoreDomain::Major,
                )),
            },
            OptionDef {
                id: "slip_away".to_string(),
                label: "Find another way across".to_string(),
                signal: Some(
                    SignalRule::targeting(&["cunning"], ScoreDomain::Major).with_tone("quiet"),
                ),
            },
        ],
        items: Vec::new(),
        scale: None,
        required_signal: None,
        max_picks: None,
    }
}

pub(super) fn scale_question() -> Question {
    Question {
        id: "day1_compass".to_string(),
        kind: QuestionKind::Scale,
        prompt: "When the map runs out, how sure are your feet?".to_string(),
        options: Vec::new(),
        items: Vec::new(),
        scale: Some(ScaleSpec {
            min: 1,
            max: 7,
            neutral: 4,
            low_anchor: Some(SignalRule::targeting(&["doubt"], ScoreDomain::Shadow)),
            high_anchor: Some(SignalRule::targeting(&["courage"], ScoreDomain::Major)),
        }),
        required_signal: None,
        max_picks: None,
    }
}

pub(super) fn multi_question() -> Question {
    Question {
        id: "day2_mirror".to_string(),
        kind: QuestionKind::Multi,
        prompt: "Which reflections feel most like you?".to_string(),
        options: vec![
            OptionDef {
                id: "flame".to_string(),
                label: "The flame".to_string(),
                signal: Some(SignalRule::targeting(&["courage"], ScoreDomain::Major)),
            },
            OptionDef {
                id: "mist".to_string(),
                label: "The mist".to_string(),
                signal: Some(SignalRule::targeting(&["wonder"], ScoreDomain::Major)),
            },
            OptionDef {
                id: "root".to_string(),
                label: "The root".to_string(),
                signal: Some(SignalRule::targeting(&["discipline"], ScoreDomain::Major)),
            },
            OptionDef {
                id: "wave".to_string(),
                label: "The wave".to_string(),
                signal: Some(SignalRule::targeting(&["empathy"], ScoreDomain::Major)),
            },
        ],
        items: Vec::new(),
        scale: None,
        required_signal: None,
        max_picks: Some(2),
    }
}

pub(super) fn rank_question() -> Question {
    Question {
        id: "day2_tides".to_string(),
        kind: QuestionKind::Rank,
        prompt: "Order what you would protect first.".to_string(),
        options: Vec::new(),
        items: vec![
            RankItem {
                id: "kinship".to_string(),
                label: "Kinship".to_string(),
                signal: Some(SignalRule::targeting(&["empathy"], ScoreDomain::Major)),
            },
            RankItem {
                id: "mastery".to_string(),
                label: "Mastery".to_string(),
                signal: Some(SignalRule::targeting(&["discipline"], ScoreDomain::Major)),
            },
            RankItem {
                id: "mystery".to_string(),
                label: "Mystery".to_string(),
                signal: Some(SignalRule::targeting(&["wonder"], ScoreDomain::Major)),
            },
        ],
        scale: None,
        required_signal: None,
        max_picks: None,
    }
}

pub(super) fn check_question() -> Question {
    Question {
        id: "day3_shadow_walk".to_string(),
        kind: QuestionKind::Check,
        prompt: "Walk the unlit path and mark it done.".to_string(),
        options: Vec::new(),
        items: Vec::new(),
        scale: None,
        required_signal: Some(SignalRule::targeting(&["gloom"], ScoreDomain::Shadow)),
        max_picks: None,
    }
}

pub(super) fn scored_text_question() -> Question {
    Question {
        id: "day7_emergence".to_string(),
        kind: QuestionKind::Text,
        prompt: "Name what you carry out of the dark.".to_string(),
        options: Vec::new(),
        items: Vec::new(),
        scale: None,
        required_signal: Some(SignalRule::targeting(&["beacon"], ScoreDomain::Luminary)),
        max_picks: None,
    }
}

pub(super) fn informational_text_question() -> Question {
    Question {
        id: "journal_notes".to_string(),
        kind: QuestionKind::Text,
        prompt: "Anything else for your journal?".to_string(),
        options: Vec::new(),
        items: Vec::new(),
        scale: None,
        required_signal: None,
        max_picks: None,
    }
}

pub(super) fn file_question() -> Question {
    Question {
        id: "day3_artifact".to_string(),
        kind: QuestionKind::File,
        prompt: "Upload a picture of your sigil sketch.".to_string(),
        options: Vec::new(),
        items: Vec::new(),
        scale: None,
        required_signal: Some(SignalRule::targeting(&["insight"], ScoreDomain::Major)),
        max_picks: None,
    }
}

pub(super) fn question_bank() -> Vec<Question> {
    vec![
        single_question(),
        scale_question(),
        multi_question(),
        rank_question(),
        check_question(),
        scored_text_question(),
        informational_text_question(),
        file_question(),
    ]
}

/// In-memory catalog with archetype leaves under the standard orders.
pub(super) struct MemoryCatalog {
    pub(super) empty_order: Option<String>,
}

impl MemoryCatalog {
    pub(super) fn standard() -> Self {
        Self { empty_order: None }
    }

    pub(super) fn without_order(order: &str) -> Self {
        Self {
            empty_order: Some(order.to_string()),
        }
    }

    fn leaves() -> Vec<ReferenceVector> {
        vec![
            ReferenceVector {
                id: "the-bulwark".to_string(),
                parent_group_id: "vanguard".to_string(),
                signature: SignalVector::from_pairs(&[("courage", 3.0), ("resolve", 2.0)]),
            },
            ReferenceVector {
                id: "the-dawnblade".to_string(),
                parent_group_id: "vanguard".to_string(),
                signature: SignalVector::from_pairs(&[("courage", 2.0), ("cunning", 2.0)]),
            },
            ReferenceVector {
                id: "the-stillwater".to_string(),
                parent_group_id: "mender".to_string(),
                signature: SignalVector::from_pairs(&[("empathy", 3.0), ("grace", 2.0)]),
            },
            ReferenceVector {
                id: "the-lanternkeeper".to_string(),
                parent_group_id: "loreseeker".to_string(),
                signature: SignalVector::from_pairs(&[("insight", 3.0), ("discipline", 1.5)]),
            },
        ]
    }
}

impl CatalogRepository for MemoryCatalog {
    fn reference_vectors_by_parent(
        &self,
        parent_group_id: &str,
    ) -> Result<Vec<ReferenceVector>, CatalogError> {
        if self.empty_order.as_deref() == Some(parent_group_id) {
            return Ok(Vec::new());
        }
        Ok(Self::leaves()
            .into_iter()
            .filter(|leaf| leaf.parent_group_id == parent_group_id)
            .collect())
    }

    fn component_by_id(&self, id: &str) -> Result<Option<Component>, CatalogError> {
        match id {
            "emberbrand" => Ok(Some(Component {
                id: Some("emberbrand".to_string()),
                name: "Emberbrand".to_string(),
                kind: "relic".to_string(),
                fields: BTreeMap::new(),
            })),
            _ => Ok(None),
        }
    }

    fn category_by_id(&self, id: &str) -> Result<Option<Category>, CatalogError> {
        match id {
            "emberfall" | "tidehollow" | "galespire" | "stonereach" => Ok(Some(Category {
                id: id.to_string(),
                name: id.to_string(),
                realm_kind: "elemental".to_string(),
                description: format!("The realm of {id}"),
            })),
            _ => Ok(None),
        }
    }

    fn realm_ids(&self) -> Result<Vec<String>, CatalogError> {
        Ok(vec![
            "emberfall".to_string(),
            "tidehollow".to_string(),
            "galespire".to_string(),
            "stonereach".to_string(),
        ])
    }

    fn component_kinds(&self) -> Result<Vec<String>, CatalogError> {
        Ok(vec!["relic".to_string(), "rite".to_string()])
    }
}
