use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::CatalogRepository;

use super::domain::{AttributeBundle, BundleDomain};
use super::hash::stable_pick;

/// Keyword rule mapping label fragments to realm preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub keywords: Vec<String>,
    /// Component kind favored when this rule fires.
    pub affinity: String,
    /// Ranked realm candidates; one is picked by the stable hash.
    pub realm_choices: Vec<String>,
}

/// Configuration backing the resolution chain, checked in order: manual
/// mapping, then the domain default, then keyword rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolutionConfig {
    #[serde(default)]
    pub manual: BTreeMap<BundleDomain, BTreeMap<String, AttributeBundle>>,
    #[serde(default)]
    pub defaults: BTreeMap<BundleDomain, AttributeBundle>,
    #[serde(default)]
    pub rules: Vec<KeywordRule>,
}

/// Resolver walking the fallback chain: manual mapping, domain default,
/// keyword rule, then the hash pick.
///
/// `resolve` always produces a bundle; determinism is the contract, so every
/// fallback pick is keyed by `stable_hash(domain:label)`.
pub struct BundleResolver<C> {
    config: ResolutionConfig,
    catalog: Arc<C>,
}

impl<C: CatalogRepository> BundleResolver<C> {
    pub fn new(config: ResolutionConfig, catalog: Arc<C>) -> Self {
        Self { config, catalog }
    }

    pub fn resolve(&self, label: &str, domain: BundleDomain) -> AttributeBundle {
        if let Some(bundle) = self
            .config
            .manual
            .get(&domain)
            .and_then(|entries| entries.get(label))
        {
            return bundle.clone();
        }

        if let Some(default) = self.config.defaults.get(&domain) {
            if !default.is_empty() {
                return default.clone();
            }
        }

        let seed = format!("{}:{}", domain.label(), label);
        let lowered = label.to_lowercase();

        for rule in &self.config.rules {
            if rule
                .keywords
                .iter()
                .any(|keyword| lowered.contains(&keyword.to_lowercase()))
            {
                let realm_ref = stable_pick(&seed, rule.realm_choices.len())
                    .map(|index| rule.realm_choices[index].clone());
                return AttributeBundle {
                    realm_ref,
                    affinities: vec![rule.affinity.clone()],
                    ..AttributeBundle::default()
                };
            }
        }

        self.hash_fallback(&seed)
    }

    /// Terminal fallback: pick a realm and a component kind from the full
    /// catalog listings. A catalog outage degrades to empty listings rather
    /// than failing resolution.
    fn hash_fallback(&self, seed: &str) -> AttributeBundle {
        let realms = self.catalog.realm_ids().unwrap_or_else(|err| {
            warn!(error = %err, "realm listing unavailable during resolution");
            Vec::new()
        });
        let kinds = self.catalog.component_kinds().unwrap_or_else(|err| {
            warn!(error = %err, "component kind listing unavailable during resolution");
            Vec::new()
        });

        AttributeBundle {
            realm_ref: stable_pick(seed, realms.len()).map(|index| realms[index].clone()),
            affinities: stable_pick(seed, kinds.len())
                .map(|index| kinds[index].clone())
                .into_iter()
                .collect(),
            ..AttributeBundle::default()
        }
    }
}
