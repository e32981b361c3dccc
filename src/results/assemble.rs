use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::assessment::domain::{ClassificationResult, ScoreDomain, Totals};
use crate::catalog::CatalogRepository;
use crate::resolution::{expand_bundle, BundleDomain, BundleResolver, ResolvedBundle};

use super::blend::{cross_map, normalize_totals, top_n, weighted_blend, CrossMapEntry};

/// Where a totals snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    ShortForm,
    LongForm,
    Journey,
}

impl SourceKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::ShortForm => "short_form",
            Self::LongForm => "long_form",
            Self::Journey => "journey",
        }
    }
}

/// One source's contribution to the composite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceTotals {
    pub source: SourceKind,
    pub totals: Totals,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<ClassificationResult>,
}

/// Tunables for blending and selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlendConfig {
    pub target_max: f64,
    pub base_weight: f64,
    pub overlay_weight: f64,
    pub top_n: usize,
    #[serde(default)]
    pub cross_map: Vec<CrossMapEntry>,
}

impl Default for BlendConfig {
    fn default() -> Self {
        Self {
            target_max: 100.0,
            base_weight: 0.75,
            overlay_weight: 0.25,
            top_n: 3,
            cross_map: Vec::new(),
        }
    }
}

/// Entry selected for a classification axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSelection {
    pub label: String,
    pub score: i64,
}

/// One source's raw and normalized totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceBreakdown {
    pub source: SourceKind,
    pub raw: Totals,
    pub normalized: BTreeMap<ScoreDomain, BTreeMap<String, f64>>,
}

/// Terminal composite payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeResult {
    pub sources: Vec<SourceBreakdown>,
    pub cross_signal: BTreeMap<String, i64>,
    pub blended: BTreeMap<ScoreDomain, BTreeMap<String, i64>>,
    pub top_selections: BTreeMap<BundleDomain, Vec<AxisSelection>>,
    pub bundles: BTreeMap<BundleDomain, ResolvedBundle>,
}

const fn axis_score_domain(axis: BundleDomain) -> ScoreDomain {
    match axis {
        BundleDomain::Archetype => ScoreDomain::Major,
        BundleDomain::Luminary => ScoreDomain::Luminary,
        BundleDomain::Shadow => ScoreDomain::Shadow,
    }
}

/// Composer merging source totals into the terminal composite: normalize,
/// cross-map, blend, select per axis, then resolve and expand one bundle per
/// axis.
pub struct ResultComposer<C> {
    config: BlendConfig,
    resolver: BundleResolver<C>,
    catalog: Arc<C>,
}

impl<C: CatalogRepository> ResultComposer<C> {
    pub fn new(config: BlendConfig, resolver: BundleResolver<C>, catalog: Arc<C>) -> Self {
        Self {
            config,
            resolver,
            catalog,
        }
    }

    pub fn compose(&self, sources: &[SourceTotals]) -> CompositeResult {
        let breakdowns: Vec<SourceBreakdown> = sources
            .iter()
            .map(|source| SourceBreakdown {
                source: source.source,
                raw: source.totals.clone(),
                normalized: ScoreDomain::ordered()
                    .into_iter()
                    .map(|domain| {
                        (
                            domain,
                            normalize_totals(
                                source.totals.domain(domain).weights(),
                                self.config.target_max,
                            ),
                        )
                    })
                    .collect(),
            })
            .collect();

        let empty = BTreeMap::new();
        let mut blended: BTreeMap<ScoreDomain, BTreeMap<String, i64>> = BTreeMap::new();
        for domain in ScoreDomain::ordered() {
            let base = breakdowns
                .first()
                .and_then(|breakdown| breakdown.normalized.get(&domain))
                .unwrap_or(&empty);
            let overlay = breakdowns
                .get(1)
                .and_then(|breakdown| breakdown.normalized.get(&domain))
                .unwrap_or(&empty);

            let merged = if breakdowns.len() >= 2 {
                weighted_blend(base, overlay, self.config.base_weight, self.config.overlay_weight)
            } else {
                // a lone source passes through unweighted
                base.iter()
                    .map(|(key, value)| (key.clone(), value.clamp(0.0, 100.0).round() as i64))
                    .collect()
            };
            blended.insert(domain, merged);
        }

        let cross_signal = breakdowns
            .first()
            .and_then(|breakdown| breakdown.normalized.get(&ScoreDomain::Luminary))
            .map(|luminary| cross_map(luminary, &self.config.cross_map))
            .unwrap_or_default();

        let classification = sources
            .iter()
            .find_map(|source| source.classification.as_ref());

        let mut top_selections: BTreeMap<BundleDomain, Vec<AxisSelection>> = BTreeMap::new();
        let mut bundles: BTreeMap<BundleDomain, ResolvedBundle> = BTreeMap::new();

        for axis in BundleDomain::ordered() {
            let domain_scores = blended
                .get(&axis_score_domain(axis))
                .cloned()
                .unwrap_or_default();

            let mut selections: Vec<AxisSelection> = top_n(&domain_scores, self.config.top_n)
                .into_iter()
                .map(|(label, score)| AxisSelection { label, score })
                .collect();

            // the gated funnel outranks totals-derived entries on its own axis
            if axis == BundleDomain::Archetype {
                if let Some(classified) = classification {
                    selections.retain(|selection| selection.label != classified.archetype_id);
                    selections.insert(
                        0,
                        AxisSelection {
                            label: classified.archetype_id.clone(),
                            score: (classified.match_score * 100.0).clamp(0.0, 100.0).round()
                                as i64,
                        },
                    );
                    selections.truncate(self.config.top_n);
                }
            }

            let label = selections
                .first()
                .map(|selection| selection.label.clone())
                .unwrap_or_else(|| axis.sentinel_label());

            let bundle = self.resolver.resolve(&label, axis);
            bundles.insert(axis, expand_bundle(&bundle, self.catalog.as_ref()));
            top_selections.insert(axis, selections);
        }

        CompositeResult {
            sources: breakdowns,
            cross_signal,
            blended,
            top_selections,
            bundles,
        }
    }
}
