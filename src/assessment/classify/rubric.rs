use crate::assessment::domain::SignalVector;

/// Stage-one path with hand-tuned dimension weights.
///
/// Rubric order doubles as the tie-break order: when two paths score equal,
/// the earlier entry wins. That ordering is part of the contract, not an
/// accident of iteration.
#[derive(Debug, Clone)]
pub struct PathWeights {
    pub label: &'static str,
    pub weights: &'static [(&'static str, f64)],
}

impl PathWeights {
    pub fn score(&self, vector: &SignalVector) -> f64 {
        self.weights
            .iter()
            .map(|(dimension, weight)| vector.get(dimension) * weight)
            .sum()
    }
}

/// Stage-two order profile scored by cosine against the user's vector.
#[derive(Debug, Clone)]
pub struct OrderProfile {
    pub id: &'static str,
    pub path: &'static str,
    pub signature: &'static [(&'static str, f64)],
}

impl OrderProfile {
    pub fn signature_vector(&self) -> SignalVector {
        SignalVector::from_pairs(self.signature)
    }
}

/// Fixed classification rubric: ordered paths, order profiles, and the
/// dimensions the stage-three comparison is restricted to.
#[derive(Debug, Clone)]
pub struct ClassifierRubric {
    paths: Vec<PathWeights>,
    orders: Vec<OrderProfile>,
    stage3_dimensions: Vec<&'static str>,
}

impl ClassifierRubric {
    pub fn standard() -> Self {
        Self {
            paths: standard_paths(),
            orders: standard_orders(),
            stage3_dimensions: STANDARD_DIMENSIONS.to_vec(),
        }
    }

    pub fn custom(
        paths: Vec<PathWeights>,
        orders: Vec<OrderProfile>,
        stage3_dimensions: Vec<&'static str>,
    ) -> Self {
        Self {
            paths,
            orders,
            stage3_dimensions,
        }
    }

    pub fn paths(&self) -> &[PathWeights] {
        &self.paths
    }

    pub fn orders_for_path(&self, path: &str) -> Vec<&OrderProfile> {
        self.orders.iter().filter(|order| order.path == path).collect()
    }

    pub fn stage3_dimensions(&self) -> &[&'static str] {
        &self.stage3_dimensions
    }
}

const STANDARD_DIMENSIONS: [&str; 8] = [
    "courage",
    "cunning",
    "discipline",
    "empathy",
    "grace",
    "insight",
    "resolve",
    "wonder",
];

fn standard_paths() -> Vec<PathWeights> {
    vec![
        PathWeights {
            label: "ember",
            weights: &[("courage", 1.6), ("resolve", 1.2), ("cunning", 0.4)],
        },
        PathWeights {
            label: "tide",
            weights: &[("empathy", 1.5), ("grace", 1.2), ("insight", 0.5)],
        },
        PathWeights {
            label: "gale",
            weights: &[("wonder", 1.5), ("cunning", 1.1), ("courage", 0.4)],
        },
        PathWeights {
            label: "stone",
            weights: &[("discipline", 1.5), ("insight", 1.2), ("resolve", 0.6)],
        },
    ]
}

fn standard_orders() -> Vec<OrderProfile> {
    vec![
        OrderProfile {
            id: "vanguard",
            path: "ember",
            signature: &[("courage", 3.0), ("resolve", 2.0), ("discipline", 1.0)],
        },
        OrderProfile {
            id: "forgeborn",
            path: "ember",
            signature: &[("courage", 2.0), ("cunning", 2.0), ("wonder", 1.0)],
        },
        OrderProfile {
            id: "mender",
            path: "tide",
            signature: &[("empathy", 3.0), ("grace", 2.0), ("discipline", 1.0)],
        },
        OrderProfile {
            id: "depthcaller",
            path: "tide",
            signature: &[("empathy", 2.0), ("insight", 2.0), ("wonder", 1.0)],
        },
        OrderProfile {
            id: "trickster",
            path: "gale",
            signature: &[("cunning", 3.0), ("wonder", 2.0), ("grace", 1.0)],
        },
        OrderProfile {
            id: "stormherald",
            path: "gale",
            signature: &[("wonder", 3.0), ("courage", 2.0), ("resolve", 1.0)],
        },
        OrderProfile {
            id: "warden",
            path: "stone",
            signature: &[("discipline", 3.0), ("resolve", 2.0), ("empathy", 1.0)],
        },
        OrderProfile {
            id: "loreseeker",
            path: "stone",
            signature: &[("insight", 3.0), ("discipline", 2.0), ("wonder", 1.0)],
        },
    ]
}
