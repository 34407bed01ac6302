//! Generational key/value cache keyed to the library version.
//!
//! Every `get` asks the [`VersionSource`] for the current version. When it
//! differs from the last version seen, all entries are dropped before the
//! lookup, so stale metadata is never served across a release. Entries have
//! no TTL otherwise.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use crate::version::VersionSource;

/// Cache that clears itself when the external version changes.
///
/// Not synchronized; wrap it in a lock to share it.
pub struct VersionedCache<K, V, S> {
    entries: HashMap<K, V>,
    source: S,
    known_version: Option<String>,
    generation: u64,
}

impl<K, V, S> VersionedCache<K, V, S>
where
    K: Eq + Hash,
    S: VersionSource,
{
    /// Empty cache probing `source`.
    pub fn new(source: S) -> Self {
        Self {
            entries: HashMap::new(),
            source,
            known_version: None,
            generation: 0,
        }
    }

    /// Look up `key`, first discarding everything if the version moved.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.sync_version();
        self.entries.get(key)
    }

    /// Store `value` under `key`.
    ///
    /// Records the current version if none is known yet; never invalidates.
    pub fn set(&mut self, key: K, value: V) {
        if self.known_version.is_none() {
            self.known_version = Some(self.source.current_version());
        }
        self.entries.insert(key, value);
    }

    /// Remove one entry.
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries.remove(key)
    }

    /// Remove every entry. The known version is kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries are cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of version changes observed so far.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Version the current entries belong to, if any was recorded.
    pub fn known_version(&self) -> Option<&str> {
        self.known_version.as_deref()
    }

    fn sync_version(&mut self) {
        let current = self.source.current_version();
        match self.known_version.as_deref() {
            Some(known) if known == current => {},
            Some(known) => {
                tracing::info!(
                    from = known,
                    to = %current,
                    dropped = self.entries.len(),
                    "library version changed, clearing cache"
                );
                self.entries.clear();
                self.generation += 1;
                self.known_version = Some(current);
            },
            None => self.known_version = Some(current),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Version source whose answer the test can change.
    #[derive(Clone, Default)]
    struct Switchable(Arc<Mutex<String>>);

    impl Switchable {
        fn at(version: &str) -> Self {
            Self(Arc::new(Mutex::new(version.to_string())))
        }

        fn bump(&self, version: &str) {
            *self.0.lock().unwrap() = version.to_string();
        }
    }

    impl VersionSource for Switchable {
        fn current_version(&self) -> String {
            self.0.lock().unwrap().clone()
        }
    }

    #[test]
    fn test_set_then_get_same_version() {
        // Given: A cache at version 1.0.0
        let mut cache = VersionedCache::new(Switchable::at("1.0.0"));

        // When: Storing and reading back
        cache.set("list".to_string(), 42);

        // Then: The value is served
        assert_eq!(cache.get("list"), Some(&42));
        assert_eq!(cache.generation(), 0);
        assert_eq!(cache.known_version(), Some("1.0.0"));
    }

    #[test]
    fn test_version_change_drops_every_entry() {
        let source = Switchable::at("1.0.0");
        let mut cache = VersionedCache::new(source.clone());
        cache.set("a".to_string(), 1);
        cache.set("b".to_string(), 2);

        // When: The library version moves on
        source.bump("1.1.0");

        // Then: Every key misses and the generation advances once
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), None);
        assert!(cache.is_empty());
        assert_eq!(cache.generation(), 1);
        assert_eq!(cache.known_version(), Some("1.1.0"));
    }

    #[test]
    fn test_entries_set_after_invalidation_survive() {
        let source = Switchable::at("1");
        let mut cache = VersionedCache::new(source.clone());
        cache.set("k".to_string(), "old");
        source.bump("2");
        assert_eq!(cache.get("k"), None);

        cache.set("k".to_string(), "new");

        assert_eq!(cache.get("k"), Some(&"new"));
        assert_eq!(cache.generation(), 1);
    }

    #[test]
    fn test_set_does_not_invalidate() {
        let source = Switchable::at("1");
        let mut cache = VersionedCache::new(source.clone());
        cache.set("a".to_string(), 1);
        source.bump("2");

        // set under the new version leaves the old entry in place until the next get
        cache.set("b".to_string(), 2);
        assert_eq!(cache.len(), 2);

        assert_eq!(cache.get("b"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_delete_and_clear() {
        let mut cache = VersionedCache::new(Switchable::at("1"));
        cache.set("a".to_string(), 1);
        cache.set("b".to_string(), 2);

        assert_eq!(cache.delete("a"), Some(1));
        assert_eq!(cache.delete("a"), None);
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.generation(), 0);
    }

    #[test]
    fn test_first_get_records_version_without_invalidating() {
        let mut cache: VersionedCache<String, u8, _> = VersionedCache::new(Switchable::at("3"));

        assert_eq!(cache.get("missing"), None);
        assert_eq!(cache.generation(), 0);
        assert_eq!(cache.known_version(), Some("3"));
    }
}
