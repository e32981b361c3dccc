//! Three-stage classification funnel: path, order, archetype.

mod rubric;
mod similarity;

pub use rubric::{ClassifierRubric, OrderProfile, PathWeights};
pub use similarity::cosine_similarity;

use std::sync::Arc;

use crate::catalog::{CatalogError, CatalogRepository};

use super::domain::{ClassificationResult, SignalVector};

/// Failures raised while narrowing the funnel.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error("no candidates available for group '{group}'")]
    NoCandidates { group: String },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Classifier narrowing an aggregated signal vector to a single archetype.
///
/// Stage one scores each path with its hand-weighted combination, stage two
/// compares order signatures by cosine, stage three compares catalog leaves
/// by cosine over the rubric's stage-three dimensions. Ties at every stage
/// keep the first-encountered candidate.
pub struct ArchetypeClassifier<C> {
    rubric: ClassifierRubric,
    catalog: Arc<C>,
}

impl<C: CatalogRepository> ArchetypeClassifier<C> {
    pub fn new(rubric: ClassifierRubric, catalog: Arc<C>) -> Self {
        Self { rubric, catalog }
    }

    pub fn rubric(&self) -> &ClassifierRubric {
        &self.rubric
    }

    pub fn classify(&self, vector: &SignalVector) -> Result<ClassificationResult, ClassifyError> {
        let path = self.select_path(vector)?;
        let order = self.select_order(vector, path)?;
        self.select_archetype(vector, path, order)
    }

    fn select_path(&self, vector: &SignalVector) -> Result<&'static str, ClassifyError> {
        let mut best: Option<(&'static str, f64)> = None;
        for path in self.rubric.paths() {
            let score = path.score(vector);
            // strictly-greater keeps the earlier rubric entry on ties
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((path.label, score)),
            }
        }

        best.map(|(label, _)| label)
            .ok_or_else(|| ClassifyError::NoCandidates {
                group: "paths".to_string(),
            })
    }

    fn select_order(
        &self,
        vector: &SignalVector,
        path: &str,
    ) -> Result<&'static str, ClassifyError> {
        let mut best: Option<(&'static str, f64)> = None;
        for order in self.rubric.orders_for_path(path) {
            let score = cosine_similarity(vector, &order.signature_vector());
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((order.id, score)),
            }
        }

        best.map(|(id, _)| id)
            .ok_or_else(|| ClassifyError::NoCandidates {
                group: path.to_string(),
            })
    }

    fn select_archetype(
        &self,
        vector: &SignalVector,
        path: &'static str,
        order: &'static str,
    ) -> Result<ClassificationResult, ClassifyError> {
        let leaves = self.catalog.reference_vectors_by_parent(order)?;
        if leaves.is_empty() {
            return Err(ClassifyError::NoCandidates {
                group: order.to_string(),
            });
        }

        let projected = vector.project(self.rubric.stage3_dimensions());
        let mut best: Option<(&str, f64)> = None;
        for leaf in &leaves {
            let score = cosine_similarity(&projected, &leaf.signature);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((&leaf.id, score)),
            }
        }

        // leaves is non-empty, so best is always set by the first iteration
        let (archetype_id, match_score) =
            best.ok_or_else(|| ClassifyError::NoCandidates {
                group: order.to_string(),
            })?;

        Ok(ClassificationResult {
            path: path.to_string(),
            order: order.to_string(),
            archetype_id: archetype_id.to_string(),
            match_score,
        })
    }
}
