use serde::{Deserialize, Serialize};

use crate::catalog::{Category, Component};

/// Classification axis a bundle is resolved for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BundleDomain {
    Archetype,
    Luminary,
    Shadow,
}

impl BundleDomain {
    pub const fn ordered() -> [Self; 3] {
        [Self::Archetype, Self::Luminary, Self::Shadow]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Archetype => "archetype",
            Self::Luminary => "luminary",
            Self::Shadow => "shadow",
        }
    }

    /// Label substituted when an axis produced no entries.
    pub fn sentinel_label(self) -> String {
        format!("unknown_{}", self.label())
    }
}

/// Auxiliary descriptive package resolved for a classification label: a realm
/// reference plus affinity/caution tags and a component loadout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeBundle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affinities: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cautions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub component_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_components: Vec<Component>,
}

impl AttributeBundle {
    pub fn is_empty(&self) -> bool {
        self.realm_ref.is_none()
            && self.affinities.is_empty()
            && self.cautions.is_empty()
            && self.component_ids.is_empty()
            && self.extra_components.is_empty()
    }
}

/// Non-fatal findings recorded while expanding a bundle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolutionDiagnostics {
    pub errors: Vec<String>,
}

/// Bundle with every reference dereferenced against the catalog.
///
/// Expansion never fails outright: missing references degrade to placeholder
/// entries and a diagnostic line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedBundle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm: Option<Category>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affinities: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cautions: Vec<String>,
    pub components: Vec<Component>,
    pub diagnostics: ResolutionDiagnostics,
}
