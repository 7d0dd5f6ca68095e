//! Single-flight background cache for the run → tag index.
//!
//! Computing the index means scanning the backing store and, for legacy runs,
//! reading asset files. `IndexCache` keeps the last completed result and lets
//! at most one recomputation run at a time, on its own thread, without any
//! caller waiting for it.
//!
//! - `try_start_refresh` takes the refresh permit without blocking. If another
//!   refresh holds it, the call is a no-op.
//! - The refresh thread publishes its result, then drops the permit. The permit
//!   is an RAII guard, so it is released on error, on panic, and if the thread
//!   cannot be spawned at all.
//! - `get_cached` hands out the published `Arc<TagIndex>`. The slot lock is held
//!   only to clone or swap that pointer, never across a computation.

use parking_lot::RwLock;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use textboard_core::{Result, TagIndex};
use tracing::{debug, error, warn};

/// Cache metrics snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Refreshes that acquired the permit.
    pub refreshes_started: u64,
    /// Refreshes that published an index.
    pub refreshes_completed: u64,
    /// Refreshes that returned an error, panicked, or never got a thread.
    pub refreshes_failed: u64,
    /// Whether a refresh currently holds the permit.
    pub in_flight: bool,
    /// Whether an index has ever been published.
    pub has_index: bool,
}

struct CacheInner {
    index: RwLock<Option<Arc<TagIndex>>>,
    refreshing: AtomicBool,
    refreshes_started: AtomicU64,
    refreshes_completed: AtomicU64,
    refreshes_failed: AtomicU64,
}

impl CacheInner {
    fn publish(&self, index: TagIndex) {
        *self.index.write() = Some(Arc::new(index));
    }
}

/// Holder of the right to run the one in-flight refresh.
///
/// Dropping it clears the in-flight flag.
struct RefreshPermit {
    inner: Arc<CacheInner>,
}

impl RefreshPermit {
    fn try_acquire(inner: &Arc<CacheInner>) -> Option<Self> {
        inner
            .refreshing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| RefreshPermit {
                inner: Arc::clone(inner),
            })
    }
}

impl Drop for RefreshPermit {
    fn drop(&mut self) {
        self.inner.refreshing.store(false, Ordering::Release);
    }
}

/// Last completed tag index plus single-flight refresh coordination.
///
/// One instance per plugin; cheap to share behind the owning service.
pub struct IndexCache {
    inner: Arc<CacheInner>,
    thread_name: String,
}

impl IndexCache {
    /// Create an empty cache whose refresh threads carry `thread_name`.
    pub fn new(thread_name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                index: RwLock::new(None),
                refreshing: AtomicBool::new(false),
                refreshes_started: AtomicU64::new(0),
                refreshes_completed: AtomicU64::new(0),
                refreshes_failed: AtomicU64::new(0),
            }),
            thread_name: thread_name.into(),
        }
    }

    /// Start a background refresh unless one is already running.
    ///
    /// Returns immediately either way. `true` means this call started the
    /// refresh; request handlers ignore the value.
    pub fn try_start_refresh<F>(&self, compute: F) -> bool
    where
        F: FnOnce() -> Result<TagIndex> + Send + 'static,
    {
        let permit = match RefreshPermit::try_acquire(&self.inner) {
            Some(permit) => permit,
            None => return false,
        };
        self.inner.refreshes_started.fetch_add(1, Ordering::Relaxed);

        // The JoinHandle is dropped: the thread runs detached.
        let spawned = thread::Builder::new()
            .name(self.thread_name.clone())
            .spawn(move || run_refresh(permit, compute));

        match spawned {
            Ok(_) => true,
            Err(e) => {
                // The closure, and the permit inside it, is already dropped.
                self.inner.refreshes_failed.fetch_add(1, Ordering::Relaxed);
                warn!(
                    target: "textboard::cache",
                    error = %e,
                    "Could not spawn index refresh thread"
                );
                false
            }
        }
    }

    /// The last published index, if any. Never triggers a computation.
    pub fn get_cached(&self) -> Option<Arc<TagIndex>> {
        self.inner.index.read().clone()
    }

    /// Whether a refresh currently holds the permit.
    pub fn is_refreshing(&self) -> bool {
        self.inner.refreshing.load(Ordering::Acquire)
    }

    /// Return a snapshot of cache metrics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            refreshes_started: self.inner.refreshes_started.load(Ordering::Relaxed),
            refreshes_completed: self.inner.refreshes_completed.load(Ordering::Relaxed),
            refreshes_failed: self.inner.refreshes_failed.load(Ordering::Relaxed),
            in_flight: self.is_refreshing(),
            has_index: self.inner.index.read().is_some(),
        }
    }
}

impl std::fmt::Debug for IndexCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexCache")
            .field("thread_name", &self.thread_name)
            .field("stats", &self.stats())
            .finish()
    }
}

fn run_refresh<F>(permit: RefreshPermit, compute: F)
where
    F: FnOnce() -> Result<TagIndex>,
{
    let inner = &permit.inner;
    let started = Instant::now();
    debug!(target: "textboard::cache", "Index refresh started");

    match panic::catch_unwind(AssertUnwindSafe(compute)) {
        Ok(Ok(index)) => {
            let runs = index.len();
            inner.publish(index);
            inner.refreshes_completed.fetch_add(1, Ordering::Relaxed);
            debug!(
                target: "textboard::cache",
                runs,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Index refresh published"
            );
        }
        Ok(Err(e)) => {
            inner.refreshes_failed.fetch_add(1, Ordering::Relaxed);
            warn!(
                target: "textboard::cache",
                error = %e,
                "Index refresh failed, keeping previous index"
            );
        }
        Err(payload) => {
            inner.refreshes_failed.fetch_add(1, Ordering::Relaxed);
            let msg = payload
                .downcast_ref::<&str>()
                .copied()
                .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
                .unwrap_or("(non-string panic)");
            error!(target: "textboard::cache", "Index refresh panicked: {}", msg);
        }
    }

    // permit drops here → clears the in-flight flag after publishing
}
