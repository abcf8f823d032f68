// Explicit, injectable table cache keyed by source path.
//
// Replaces the original's process-global memoized load: same semantics (no
// TTL, no mtime check, invalidation only via clear() or process restart)
// but constructed and injected explicitly so tests can bypass or reset it.
use crate::data::table::SalesTable;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
pub struct TableCache {
    inner: Mutex<HashMap<PathBuf, Arc<SalesTable>>>,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    // The map is only ever touched under this guard, so a poisoned lock
    // left behind by a panicking caller still holds a consistent map;
    // recover the guard instead of propagating the panic.
    fn lock(&self) -> MutexGuard<'_, HashMap<PathBuf, Arc<SalesTable>>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get(&self, path: &Path) -> Option<Arc<SalesTable>> {
        self.lock().get(path).cloned()
    }

    pub fn store(&self, path: PathBuf, table: Arc<SalesTable>) {
        self.lock().insert(path, table);
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
