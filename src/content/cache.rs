//! Process-wide snapshot of the parsed collection.
//!
//! The snapshot is only ever replaced as a whole. A failed rebuild keeps the
//! previous snapshot.

use std::future::Future;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use tokio::time::Instant;

use crate::content::index::Collection;
use crate::error::AppError;

/// When a cached collection is considered stale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CachePolicy {
    /// No caching: every call rebuilds from the store.
    #[default]
    Always,
    /// Reuse a snapshot until it is older than the given duration.
    Ttl(Duration),
    /// Reuse a snapshot until [`CollectionCache::invalidate`] is called.
    Manual,
}

struct Snapshot {
    built_at: Instant,
    collection: Arc<Collection>,
}

pub struct CollectionCache {
    policy: CachePolicy,
    snapshot: RwLock<Option<Snapshot>>,
}

fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| {
        tracing::warn!("Recovered from poisoned collection cache lock");
        poisoned.into_inner()
    })
}

fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| {
        tracing::warn!("Recovered from poisoned collection cache lock");
        poisoned.into_inner()
    })
}

impl CollectionCache {
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            policy,
            snapshot: RwLock::new(None),
        }
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// The current snapshot, if the policy still considers it fresh.
    fn fresh(&self) -> Option<Arc<Collection>> {
        let guard = read_lock(&self.snapshot);
        let snapshot = guard.as_ref()?;
        match self.policy {
            CachePolicy::Always => None,
            CachePolicy::Manual => Some(snapshot.collection.clone()),
            CachePolicy::Ttl(ttl) if snapshot.built_at.elapsed() < ttl => {
                Some(snapshot.collection.clone())
            }
            CachePolicy::Ttl(_) => None,
        }
    }

    /// Return the cached collection, rebuilding it with `build` when stale.
    pub async fn get_or_build<F, Fut>(&self, build: F) -> Result<Arc<Collection>, AppError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Collection, AppError>>,
    {
        if let Some(collection) = self.fresh() {
            return Ok(collection);
        }

        let collection = Arc::new(build().await?);
        if self.policy != CachePolicy::Always {
            tracing::info!(posts = collection.len(), "Rebuilt collection cache");
            *write_lock(&self.snapshot) = Some(Snapshot {
                built_at: Instant::now(),
                collection: collection.clone(),
            });
        }
        Ok(collection)
    }

    /// Drop the snapshot; the next read rebuilds it.
    pub fn invalidate(&self) {
        *write_lock(&self.snapshot) = None;
    }

    /// Whether a snapshot is currently held, fresh or not.
    pub fn is_warm(&self) -> bool {
        read_lock(&self.snapshot).is_some()
    }
}
