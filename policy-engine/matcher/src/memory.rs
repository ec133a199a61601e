use ahash::AHashMap as HashMap;
use anyhow::Result;
use kuma_policy_core::{ReadOnlyResourceManager, Resource};
use parking_lot::RwLock;
use std::{
    any::{Any, TypeId},
    sync::Arc,
};
use tracing::debug;

type Entry = Arc<dyn Any + Send + Sync>;

/// Holds resources of any type in memory, keyed by mesh and name.
///
/// Listing returns a snapshot: resources applied or deleted afterwards do not affect previously
/// returned lists.
#[derive(Debug, Default)]
pub struct MemoryResourceManager {
    resources: RwLock<HashMap<TypeId, Vec<Entry>>>,
}

// === impl MemoryResourceManager ===

impl MemoryResourceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `resource`, replacing any resource of the same type with the same mesh and name.
    pub fn apply<R>(&self, resource: R)
    where
        R: Resource + Send + Sync + 'static,
    {
        let meta = resource.meta().clone();
        let mut resources = self.resources.write();
        let entries = resources.entry(TypeId::of::<R>()).or_default();
        let existing = entries.iter().position(|entry| {
            entry.downcast_ref::<R>().is_some_and(|r| {
                r.meta().mesh == meta.mesh && r.meta().name == meta.name
            })
        });

        let resource: Entry = Arc::new(resource);
        match existing {
            Some(i) => {
                debug!(resource = %meta, "Updated");
                entries[i] = resource;
            }
            None => {
                debug!(resource = %meta, "Created");
                entries.push(resource);
            }
        }
    }

    /// Removes the resource of type `R` with the given mesh and name, returning true if it existed.
    pub fn delete<R>(&self, mesh: &str, name: &str) -> bool
    where
        R: Resource + Send + Sync + 'static,
    {
        let mut resources = self.resources.write();
        let entries = match resources.get_mut(&TypeId::of::<R>()) {
            Some(entries) => entries,
            None => return false,
        };
        let before = entries.len();
        entries.retain(|entry| {
            !entry
                .downcast_ref::<R>()
                .is_some_and(|r| r.meta().mesh == mesh && r.meta().name == name)
        });
        let deleted = entries.len() < before;
        if deleted {
            debug!(%mesh, %name, "Deleted");
        }
        deleted
    }

    fn snapshot<R>(&self, mesh: &str) -> Vec<Arc<R>>
    where
        R: Resource + Send + Sync + 'static,
    {
        let resources = self.resources.read();
        resources
            .get(&TypeId::of::<R>())
            .into_iter()
            .flatten()
            .filter_map(|entry| entry.clone().downcast::<R>().ok())
            .filter(|r| r.meta().mesh == mesh)
            .collect()
    }
}

#[async_trait::async_trait]
impl ReadOnlyResourceManager for MemoryResourceManager {
    async fn list<R>(&self, mesh: &str) -> Result<Vec<Arc<R>>>
    where
        R: Resource + Send + Sync + 'static,
    {
        Ok(self.snapshot(mesh))
    }
}
