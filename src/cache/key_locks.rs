use std::collections::{hash_map::Entry, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type KeyLock = Arc<AsyncMutex<()>>;

/// One async mutex per cache file, so that concurrent requests for the same
/// file run their read, fetch and write one after another.
///
/// A key's entry lives only while someone holds or waits for its lock.
#[derive(Debug, Default)]
pub(crate) struct KeyLocks {
    locks: Mutex<HashMap<PathBuf, KeyLock>>,
}

/// Holds the lock of one key; dropping it releases the lock and forgets the
/// key when nobody else is waiting for it.
pub(crate) struct KeyGuard<'a> {
    locks: &'a KeyLocks,
    key: PathBuf,
    guard: Option<OwnedMutexGuard<()>>,
}

impl KeyLocks {
    pub(crate) async fn lock(&self, key: &Path) -> KeyGuard<'_> {
        let lock = {
            let mut locks = self.map();
            match locks.entry(key.to_path_buf()) {
                Entry::Occupied(entry) => Arc::clone(entry.get()),
                Entry::Vacant(entry) => Arc::clone(entry.insert(Arc::new(AsyncMutex::new(())))),
            }
        }; // Map lock released before waiting on the key.

        KeyGuard {
            locks: self,
            key: key.to_path_buf(),
            guard: Some(lock.lock_owned().await),
        }
    }

    // Never held across an await.
    fn map(&self) -> MutexGuard<'_, HashMap<PathBuf, KeyLock>> {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.map().len()
    }
}

impl Drop for KeyGuard<'_> {
    fn drop(&mut self) {
        // Releases this guard's reference before counting the rest.
        drop(self.guard.take());

        let mut locks = self.locks.map();
        if let Entry::Occupied(entry) = locks.entry(self.key.clone()) {
            if Arc::strong_count(entry.get()) == 1 {
                entry.remove();
            }
        }
    }
}
