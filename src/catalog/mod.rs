//! Reference catalog types and the repository boundary behind which the host
//! stores archetype signatures, realms, and components.

mod cache;

pub use cache::CatalogCache;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::assessment::domain::SignalVector;

/// Classification centroid for one archetype, keyed to its parent order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceVector {
    pub id: String,
    pub parent_group_id: String,
    pub signature: SignalVector,
}

/// Realm record backing a bundle's category reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub realm_kind: String,
    pub description: String,
}

/// Catalog component (practice, relic, rite) referenced by attribute bundles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub kind: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, serde_json::Value>,
}

impl Component {
    /// Identity is the explicit id when present, else the display name.
    pub fn identity(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.name)
    }

    /// Placeholder standing in for a component the catalog could not supply.
    pub(crate) fn placeholder(id: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            name: id.to_string(),
            kind: "unresolved".to_string(),
            fields: BTreeMap::new(),
        }
    }
}

/// Failures raised by catalog lookups.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
    #[error("catalog data malformed: {0}")]
    Malformed(String),
}

/// Read-only storage abstraction for the pre-built reference catalogs.
pub trait CatalogRepository: Send + Sync {
    fn reference_vectors_by_parent(
        &self,
        parent_group_id: &str,
    ) -> Result<Vec<ReferenceVector>, CatalogError>;

    fn component_by_id(&self, id: &str) -> Result<Option<Component>, CatalogError>;

    fn category_by_id(&self, id: &str) -> Result<Option<Category>, CatalogError>;

    /// Every realm id known to the catalog, used by the deterministic fallback pick.
    fn realm_ids(&self) -> Result<Vec<String>, CatalogError>;

    /// Every distinct component kind, used by the deterministic fallback pick.
    fn component_kinds(&self) -> Result<Vec<String>, CatalogError>;
}
