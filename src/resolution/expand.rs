use std::collections::HashSet;

use crate::catalog::{CatalogRepository, Component};

use super::domain::{AttributeBundle, ResolutionDiagnostics, ResolvedBundle};

/// Expand a bundle against the catalog.
///
/// Missing references never abort the expansion: the realm degrades to
/// `None`, missing components become placeholders, and every miss lands in
/// `diagnostics.errors`.
pub fn expand_bundle<C: CatalogRepository>(bundle: &AttributeBundle, catalog: &C) -> ResolvedBundle {
    let mut diagnostics = ResolutionDiagnostics::default();

    let realm = match &bundle.realm_ref {
        Some(id) => match catalog.category_by_id(id) {
            Ok(Some(category)) => Some(category),
            Ok(None) => {
                diagnostics
                    .errors
                    .push(format!("realm '{id}' not found in catalog"));
                None
            }
            Err(err) => {
                diagnostics
                    .errors
                    .push(format!("realm '{id}' lookup failed: {err}"));
                None
            }
        },
        None => None,
    };

    let mut components: Vec<Component> = Vec::new();
    for id in &bundle.component_ids {
        match catalog.component_by_id(id) {
            Ok(Some(component)) => components.push(component),
            Ok(None) => {
                diagnostics
                    .errors
                    .push(format!("component '{id}' not found in catalog"));
                components.push(Component::placeholder(id));
            }
            Err(err) => {
                diagnostics
                    .errors
                    .push(format!("component '{id}' lookup failed: {err}"));
                components.push(Component::placeholder(id));
            }
        }
    }
    components.extend(bundle.extra_components.iter().cloned());

    // dedup by identity, first-seen entry wins
    let mut seen: HashSet<String> = HashSet::new();
    components.retain(|component| seen.insert(component.identity().to_string()));

    ResolvedBundle {
        realm,
        affinities: bundle.affinities.clone(),
        cautions: bundle.cautions.clone(),
        components,
        diagnostics,
    }
}
