//! Adapter cache.
//!
//! Maps `(concrete type, interface)` to the synthesized [`AdapterType`].
//!
//! ```text
//! get_or_create(shape, interface)
//!   ├── hit  -> shard read guard, clone Arc, done
//!   └── miss -> synthesize (no guard held)
//!               └── entry(key).or_insert(..)   first publisher wins
//! ```
//!
//! Concurrent misses on one pair may each synthesize; every caller leaves
//! with the single published entry and the losers' types are dropped.
//! Failures are not cached. Entries are never evicted.

use core::any::TypeId;
use core::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;
use tracing::{debug, trace};

use crate::error::SynthesisError;
use crate::reflect::{InterfaceInfo, Shape, ShapeKey};

use super::synthesize::{AdapterType, synthesize};

/// Cache key: concrete type identity and interface identity.
pub type CacheKey = (ShapeKey, TypeId);

/// Process-lifetime memo of synthesized adapter types.
#[derive(Default)]
pub struct AdapterCache {
    entries: DashMap<CacheKey, Arc<AdapterType>>,
    synthesized: AtomicUsize,
}

static GLOBAL: OnceLock<AdapterCache> = OnceLock::new();

impl AdapterCache {
    /// An empty cache, independent of the global one.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache used by [`adapt`](crate::adapt).
    pub fn global() -> &'static AdapterCache {
        GLOBAL.get_or_init(AdapterCache::new)
    }

    /// Look up the adapter type for the pair, synthesizing it on a miss.
    pub fn get_or_create(&self, shape: &Shape, interface: &InterfaceInfo) -> Result<Arc<AdapterType>, SynthesisError> {
        let key = (shape.key(), interface.id());

        if let Some(entry) = self.entries.get(&key) {
            trace!(adapter = entry.name(), "adapter cache hit");
            return Ok(Arc::clone(entry.value()));
        }

        let built = Arc::new(synthesize(shape, interface)?);
        self.synthesized.fetch_add(1, Ordering::Relaxed);
        debug!(
            adapter = built.name(),
            slots = built.len(),
            "synthesized adapter type"
        );

        let entry = self.entries.entry(key).or_insert_with(|| Arc::clone(&built));
        if !Arc::ptr_eq(entry.value(), &built) {
            debug!(adapter = built.name(), "lost publish race, using the cached adapter type");
        }
        Ok(Arc::clone(entry.value()))
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<AdapterType>> {
        self.entries.get(key).map(|entry| Arc::clone(entry.value()))
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of cached pairs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Successful synthesis runs performed by this cache, including runs
    /// whose result lost the publish race.
    pub fn synthesized(&self) -> usize {
        self.synthesized.load(Ordering::Relaxed)
    }
}

impl fmt::Debug for AdapterCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterCache")
            .field("entries", &self.entries.len())
            .field("synthesized", &self.synthesized())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{Counter, Tally};
    use crate::reflect::{Interface, Object};

    #[test]
    fn test_second_lookup_is_a_hit() {
        let cache = AdapterCache::new();
        let counter = Counter::new("a");
        let shape = counter.shape();

        let first = cache.get_or_create(shape, <dyn Tally>::info()).unwrap();
        let second = cache.get_or_create(shape, <dyn Tally>::info()).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.synthesized(), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.contains(&(shape.key(), TypeId::of::<dyn Tally>())));
    }

    #[test]
    fn test_failure_is_not_cached() {
        let cache = AdapterCache::new();
        let info = InterfaceInfo::builder::<()>("Missing").method::<(), ()>("reset").build();
        let counter = Counter::new("a");
        let shape = counter.shape();

        assert!(cache.get_or_create(shape, &info).is_err());
        assert!(cache.get_or_create(shape, &info).is_err());
        assert!(cache.is_empty());
        assert_eq!(cache.synthesized(), 0);
    }
}
