use serde::{Deserialize, Serialize};

/// Weights applied when an option, anchor, or item does not carry its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightConfig {
    pub full_weight: f64,
    pub per_pick_weight: f64,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            full_weight: 2.0,
            per_pick_weight: 1.0,
        }
    }
}
