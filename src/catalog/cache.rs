use std::collections::HashMap;
use std::sync::RwLock;

use super::{CatalogError, CatalogRepository, Category, Component, ReferenceVector};

/// Read-through cache over a [`CatalogRepository`].
///
/// Entries are loaded on first use and shared read-only across requests.
/// There is no expiry and no background refresh; callers drop stale data by
/// invoking [`CatalogCache::invalidate`] explicitly.
pub struct CatalogCache<R> {
    inner: R,
    vectors: RwLock<HashMap<String, Vec<ReferenceVector>>>,
    components: RwLock<HashMap<String, Option<Component>>>,
    categories: RwLock<HashMap<String, Option<Category>>>,
    realm_ids: RwLock<Option<Vec<String>>>,
    component_kinds: RwLock<Option<Vec<String>>>,
}

fn poisoned() -> CatalogError {
    CatalogError::Unavailable("catalog cache lock poisoned".to_string())
}

impl<R> CatalogCache<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            vectors: RwLock::new(HashMap::new()),
            components: RwLock::new(HashMap::new()),
            categories: RwLock::new(HashMap::new()),
            realm_ids: RwLock::new(None),
            component_kinds: RwLock::new(None),
        }
    }

    /// Drop every cached entry so the next lookup rereads the backing store.
    pub fn invalidate(&self) {
        if let Ok(mut guard) = self.vectors.write() {
            guard.clear();
        }
        if let Ok(mut guard) = self.components.write() {
            guard.clear();
        }
        if let Ok(mut guard) = self.categories.write() {
            guard.clear();
        }
        if let Ok(mut guard) = self.realm_ids.write() {
            *guard = None;
        }
        if let Ok(mut guard) = self.component_kinds.write() {
            *guard = None;
        }
    }
}

impl<R: CatalogRepository> CatalogRepository for CatalogCache<R> {
    fn reference_vectors_by_parent(
        &self,
        parent_group_id: &str,
    ) -> Result<Vec<ReferenceVector>, CatalogError> {
        {
            let guard = self.vectors.read().map_err(|_| poisoned())?;
            if let Some(hit) = guard.get(parent_group_id) {
                return Ok(hit.clone());
            }
        }

        let loaded = self.inner.reference_vectors_by_parent(parent_group_id)?;
        let mut guard = self.vectors.write().map_err(|_| poisoned())?;
        guard.insert(parent_group_id.to_string(), loaded.clone());
        Ok(loaded)
    }

    fn component_by_id(&self, id: &str) -> Result<Option<Component>, CatalogError> {
        {
            let guard = self.components.read().map_err(|_| poisoned())?;
            if let Some(hit) = guard.get(id) {
                return Ok(hit.clone());
            }
        }

        let loaded = self.inner.component_by_id(id)?;
        let mut guard = self.components.write().map_err(|_| poisoned())?;
        guard.insert(id.to_string(), loaded.clone());
        Ok(loaded)
    }

    fn category_by_id(&self, id: &str) -> Result<Option<Category>, CatalogError> {
        {
            let guard = self.categories.read().map_err(|_| poisoned())?;
            if let Some(hit) = guard.get(id) {
                return Ok(hit.clone());
            }
        }

        let loaded = self.inner.category_by_id(id)?;
        let mut guard = self.categories.write().map_err(|_| poisoned())?;
        guard.insert(id.to_string(), loaded.clone());
        Ok(loaded)
    }

    fn realm_ids(&self) -> Result<Vec<String>, CatalogError> {
        {
            let guard = self.realm_ids.read().map_err(|_| poisoned())?;
            if let Some(hit) = guard.as_ref() {
                return Ok(hit.clone());
            }
        }

        let loaded = self.inner.realm_ids()?;
        let mut guard = self.realm_ids.write().map_err(|_| poisoned())?;
        *guard = Some(loaded.clone());
        Ok(loaded)
    }

    fn component_kinds(&self) -> Result<Vec<String>, CatalogError> {
        {
            let guard = self.component_kinds.read().map_err(|_| poisoned())?;
            if let Some(hit) = guard.as_ref() {
                return Ok(hit.clone());
            }
        }

        let loaded = self.inner.component_kinds()?;
        let mut guard = self.component_kinds.write().map_err(|_| poisoned())?;
        *guard = Some(loaded.clone());
        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingRepository {
        category_reads: AtomicUsize,
        realm_reads: AtomicUsize,
    }

    impl CatalogRepository for CountingRepository {
        fn reference_vectors_by_parent(
            &self,
            _parent_group_id: &str,
        ) -> Result<Vec<ReferenceVector>, CatalogError> {
            Ok(Vec::new())
        }

        fn component_by_id(&self, _id: &str) -> Result<Option<Component>, CatalogError> {
            Ok(None)
        }

        fn category_by_id(&self, id: &str) -> Result<Option<Category>, CatalogError> {
            self.category_reads.fetch_add(1, Ordering::SeqCst);
            Ok(Some(Category {
                id: id.to_string(),
                name: "Emberfall".to_string(),
                realm_kind: "elemental".to_string(),
                description: "Realm of the burning peaks".to_string(),
            }))
        }

        fn realm_ids(&self) -> Result<Vec<String>, CatalogError> {
            self.realm_reads.fetch_add(1, Ordering::SeqCst);
            Ok(vec!["emberfall".to_string(), "tidehollow".to_string()])
        }

        fn component_kinds(&self) -> Result<Vec<String>, CatalogError> {
            Ok(vec!["rite".to_string()])
        }
    }

    #[test]
    fn keyed_lookups_hit_the_backing_store_once() {
        let cache = CatalogCache::new(CountingRepository::default());

        for _ in 0..3 {
            cache
                .category_by_id("emberfall")
                .expect("lookup succeeds")
                .expect("category present");
        }

        assert_eq!(cache.inner.category_reads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn listings_are_memoized_until_invalidated() {
        let cache = CatalogCache::new(CountingRepository::default());

        cache.realm_ids().expect("listing loads");
        cache.realm_ids().expect("listing cached");
        assert_eq!(cache.inner.realm_reads.load(Ordering::SeqCst), 1);

        cache.invalidate();
        cache.realm_ids().expect("listing reloads");
        assert_eq!(cache.inner.realm_reads.load(Ordering::SeqCst), 2);
    }
}
