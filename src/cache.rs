use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::warn;

/// Loaded resources keyed by the file they came from. Entries live until
/// the whole cache is cleared; there is no eviction.
pub struct ResourceCache<T> {
    entries: HashMap<PathBuf, Rc<T>>,
}

impl<T> Default for ResourceCache<T> {
    fn default() -> Self {
        Self { entries: HashMap::new() }
    }
}

impl<T> ResourceCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, name: &Path) -> Option<Rc<T>> {
        self.entries.get(name).cloned()
    }

    /// Stores `value` under `name`. If the name is taken the existing entry
    /// is kept and returned, and `value` is dropped.
    pub fn insert(&mut self, name: &Path, value: T) -> Rc<T> {
        if let Some(existing) = self.entries.get(name) {
            warn!("{} is already cached", name.display());
            return existing.clone();
        }

        let value = Rc::new(value);
        self.entries.insert(name.to_path_buf(), value.clone());
        value
    }

    pub fn get_or_try_insert_with<E>(
        &mut self,
        name: &Path,
        load: impl FnOnce() -> Result<T, E>,
    ) -> Result<Rc<T>, E> {
        if let Some(found) = self.find(name) {
            return Ok(found);
        }
        Ok(self.insert(name, load()?))
    }

    /// Hands every entry to `release`, then empties the cache.
    pub fn clear(&mut self, mut release: impl FnMut(&T)) {
        for (_, value) in self.entries.drain() {
            release(&value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_returns_shared_entry() {
        let mut cache = ResourceCache::new();
        let a = cache.insert(Path::new("a.dcm"), 1);
        let found = cache.find(Path::new("a.dcm")).unwrap();
        assert!(Rc::ptr_eq(&a, &found));
        assert!(cache.find(Path::new("b.dcm")).is_none());
    }

    #[test]
    fn collision_keeps_first_value() {
        let mut cache = ResourceCache::new();
        let first = cache.insert(Path::new("a.png"), 1);
        let second = cache.insert(Path::new("a.png"), 2);
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(*second, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn loader_runs_once_per_name() {
        let mut cache = ResourceCache::new();
        let mut calls = 0;
        for _ in 0..3 {
            let v: Result<_, ()> = cache.get_or_try_insert_with(Path::new("x"), || {
                calls += 1;
                Ok(7)
            });
            assert_eq!(*v.unwrap(), 7);
        }
        assert_eq!(calls, 1);
    }

    #[test]
    fn failed_load_caches_nothing() {
        let mut cache: ResourceCache<i32> = ResourceCache::new();
        let r = cache.get_or_try_insert_with(Path::new("x"), || Err("broken"));
        assert_eq!(r.unwrap_err(), "broken");
        assert!(cache.is_empty());
    }

    #[test]
    fn clear_releases_everything() {
        let mut cache = ResourceCache::new();
        cache.insert(Path::new("a"), 1);
        cache.insert(Path::new("b"), 2);

        let mut released = Vec::new();
        cache.clear(|v| released.push(*v));
        released.sort();

        assert_eq!(released, vec![1, 2]);
        assert!(cache.is_empty());
    }
}
