use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::{
    cache::key::ResourceKey,
    foundation::error::{StageError, StageResult},
};

/// Builds a render resource from its canonical key.
///
/// Implementations may allocate large buffers; the cache guarantees `build` runs at most once per
/// key for the lifetime of the cache.
pub trait ResourceFactory<R> {
    /// Construct the resource described by `key`.
    fn build(&self, key: &ResourceKey) -> StageResult<R>;

    /// Map `key` to the form the cache stores, so equivalent descriptors share one entry.
    fn canonical_key(&self, key: ResourceKey) -> StageResult<ResourceKey> {
        Ok(key)
    }
}

impl<R, F> ResourceFactory<R> for F
where
    F: Fn(&ResourceKey) -> StageResult<R>,
{
    fn build(&self, key: &ResourceKey) -> StageResult<R> {
        self(key)
    }
}

#[derive(Debug)]
enum Slot<R> {
    Building,
    Ready(Rc<R>),
}

/// Process-lifetime memo of shared render resources, keyed by canonical descriptor.
///
/// The cache is single-threaded (`Rc` + `RefCell`) and is owned by the stage, which hands
/// `&ResourceCache` to whatever needs resources. There is no eviction and no invalidation.
pub struct ResourceCache<R, F> {
    factory: F,
    slots: RefCell<HashMap<ResourceKey, Slot<R>>>,
    build_counts: RefCell<HashMap<ResourceKey, u32>>,
}

impl<R, F> ResourceCache<R, F>
where
    F: ResourceFactory<R>,
{
    /// Create an empty cache backed by `factory`.
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            slots: RefCell::new(HashMap::new()),
            build_counts: RefCell::new(HashMap::new()),
        }
    }

    /// Lookup (or construct on first use) the resource for a descriptor string.
    pub fn get(&self, descriptor: &str) -> StageResult<Rc<R>> {
        let key = self.canonical(descriptor)?;
        self.get_canonical(&key)
    }

    /// Lookup (or construct on first use) the resource for a parsed key.
    ///
    /// A re-entrant request for a key whose construction is still running fails instead of
    /// building it twice. A failed construction leaves no entry, so the next call retries.
    pub fn get_key(&self, key: &ResourceKey) -> StageResult<Rc<R>> {
        let key = self.factory.canonical_key(key.clone())?;
        self.get_canonical(&key)
    }

    fn canonical(&self, descriptor: &str) -> StageResult<ResourceKey> {
        self.factory.canonical_key(ResourceKey::parse(descriptor)?)
    }

    fn get_canonical(&self, key: &ResourceKey) -> StageResult<Rc<R>> {
        match self.slots.borrow().get(key) {
            Some(Slot::Ready(r)) => return Ok(Rc::clone(r)),
            Some(Slot::Building) => {
                return Err(StageError::cache(format!(
                    "re-entrant construction of resource '{key}'"
                )));
            }
            None => {}
        }

        self.slots.borrow_mut().insert(key.clone(), Slot::Building);
        tracing::debug!(resource = %key, "building render resource");

        // The borrow is released while the factory runs so it may request other keys.
        let built = self.factory.build(key);
        let mut slots = self.slots.borrow_mut();
        match built {
            Ok(resource) => {
                let resource = Rc::new(resource);
                slots.insert(key.clone(), Slot::Ready(Rc::clone(&resource)));
                *self.build_counts.borrow_mut().entry(key.clone()).or_insert(0) += 1;
                Ok(resource)
            }
            Err(e) => {
                slots.remove(key);
                tracing::debug!(resource = %key, error = %e, "render resource build failed");
                Err(e)
            }
        }
    }

    /// Number of ready entries.
    pub fn len(&self) -> usize {
        self.slots
            .borrow()
            .values()
            .filter(|s| matches!(s, Slot::Ready(_)))
            .count()
    }

    /// Whether no resource has been built yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a ready entry exists for `descriptor`.
    pub fn contains(&self, descriptor: &str) -> bool {
        let Ok(key) = self.canonical(descriptor) else {
            return false;
        };
        matches!(self.slots.borrow().get(&key), Some(Slot::Ready(_)))
    }

    /// How many times the factory successfully built `descriptor`.
    pub fn build_count(&self, descriptor: &str) -> u32 {
        let Ok(key) = self.canonical(descriptor) else {
            return 0;
        };
        self.build_counts.borrow().get(&key).copied().unwrap_or(0)
    }

    /// Access the backing factory.
    pub fn factory(&self) -> &F {
        &self.factory
    }
}

impl<R, F> std::fmt::Debug for ResourceCache<R, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slots = self.slots.borrow();
        let mut keys: Vec<String> = slots.keys().map(ResourceKey::descriptor).collect();
        keys.sort();
        f.debug_struct("ResourceCache").field("keys", &keys).finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cache/store.rs"]
mod tests;
