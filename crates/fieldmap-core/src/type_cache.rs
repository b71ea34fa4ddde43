//! Process-wide, append-only tables keyed by target type.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

type Entry = Arc<dyn Any + Send + Sync>;

/// Lazily populated map from a target type to one shared value.
///
/// Population is first-writer-wins: concurrent first callers may each build
/// a value, but only the first one inserted is kept and every caller gets
/// that same `Arc`. Entries are never replaced or evicted.
pub(crate) struct TypeCache {
    name: &'static str,
    entries: RwLock<HashMap<TypeId, Entry>>,
}

impl TypeCache {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the value cached for `K`, building it with `build` on first use.
    pub(crate) fn get_or_insert_with<K, V>(&self, build: impl FnOnce() -> V) -> Arc<V>
    where
        K: 'static,
        V: Any + Send + Sync,
    {
        let key = TypeId::of::<K>();
        // Entries are only ever inserted whole, so a poisoned lock still
        // guards a consistent map.
        if let Some(entry) = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return downcast::<K, V>(Arc::clone(entry));
        }

        let built: Entry = Arc::new(build());
        let candidate = Arc::clone(&built);
        let winner = Arc::clone(
            self.entries
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .entry(key)
                .or_insert(built),
        );
        debug!(
            cache = self.name,
            target_type = type_name::<K>(),
            won = Arc::ptr_eq(&winner, &candidate),
            "populated type cache"
        );
        downcast::<K, V>(winner)
    }

    pub(crate) fn contains<K: 'static>(&self) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&TypeId::of::<K>())
    }
}

fn downcast<K: 'static, V: Any + Send + Sync>(entry: Entry) -> Arc<V> {
    match entry.downcast::<V>() {
        Ok(value) => value,
        // Each cache stores exactly one value type per key type.
        Err(_) => unreachable!(
            "type cache entry for {} is not a {}",
            type_name::<K>(),
            type_name::<V>()
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    use super::*;

    struct First;
    struct Second;

    #[test]
    fn entries_are_keyed_by_type() {
        let cache = TypeCache::new("test");
        let first = cache.get_or_insert_with::<First, _>(|| 1_u32);
        let second = cache.get_or_insert_with::<Second, _>(|| 2_u32);
        assert_eq!((*first, *second), (1, 2));
        assert!(cache.contains::<First>());
    }

    #[test]
    fn first_value_is_kept() {
        let cache = TypeCache::new("test");
        let first = cache.get_or_insert_with::<First, _>(|| String::from("first"));
        let again = cache.get_or_insert_with::<First, _>(|| String::from("second"));
        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(again.as_str(), "first");
    }

    #[test]
    fn concurrent_first_access_converges_on_one_value() {
        let cache = TypeCache::new("test");
        let builds = AtomicUsize::new(0);
        let results: Vec<Arc<usize>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let cache = &cache;
                    let builds = &builds;
                    scope.spawn(move || {
                        cache.get_or_insert_with::<Second, _>(|| {
                            builds.fetch_add(1, Ordering::SeqCst);
                            i
                        })
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(builds.load(Ordering::SeqCst) >= 1);
        assert!(results.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }
}
