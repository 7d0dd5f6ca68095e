//! Shared test utilities for the integration suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]

use parking_lot::{Condvar, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

pub use textboard::{
    Error, InMemoryMultiplexer, Multiplexer, Plugin, QueryService, Request, Result, RunAssets,
    RunTagContent, SummaryRecord, TagIndex, TextPlugin, TextPluginConfig,
};

/// Upper bound for anything a test waits on.
pub const WAIT_LIMIT: Duration = Duration::from_secs(5);

// ============================================================================
// Gate
// ============================================================================

/// A latch that blocks callers of `wait` until `open` is called.
#[derive(Default)]
pub struct Gate {
    open: Mutex<bool>,
    cond: Condvar,
}

impl Gate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&self) {
        *self.open.lock() = true;
        self.cond.notify_all();
    }

    pub fn wait(&self) {
        let mut open = self.open.lock();
        while !*open {
            self.cond.wait(&mut open);
        }
    }
}

// ============================================================================
// InstrumentedStore - wraps the in-memory store and holds up the expensive path
// ============================================================================

/// Store whose legacy asset scan (only done by a full index computation)
/// blocks on a gate and is counted.
pub struct InstrumentedStore {
    pub inner: InMemoryMultiplexer,
    pub gate: Gate,
    pub asset_scans: AtomicUsize,
    pub active_scans: AtomicUsize,
    pub max_active_scans: AtomicUsize,
}

impl InstrumentedStore {
    /// Store whose gate starts closed.
    pub fn gated(inner: InMemoryMultiplexer) -> Arc<Self> {
        Arc::new(Self {
            inner,
            gate: Gate::new(),
            asset_scans: AtomicUsize::new(0),
            active_scans: AtomicUsize::new(0),
            max_active_scans: AtomicUsize::new(0),
        })
    }

    /// Store whose gate is already open.
    pub fn open(inner: InMemoryMultiplexer) -> Arc<Self> {
        let store = Self::gated(inner);
        store.gate.open();
        store
    }
}

impl Multiplexer for InstrumentedStore {
    fn plugin_run_to_tag_to_content(&self, plugin_name: &str) -> Result<RunTagContent> {
        self.inner.plugin_run_to_tag_to_content(plugin_name)
    }

    fn summary_records(&self, run: &str, tag: &str) -> Result<Vec<SummaryRecord>> {
        self.inner.summary_records(run, tag)
    }

    fn plugin_assets(&self, plugin_dir: &str) -> Result<RunAssets> {
        self.asset_scans.fetch_add(1, Ordering::SeqCst);
        let now = self.active_scans.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active_scans.fetch_max(now, Ordering::SeqCst);
        self.gate.wait();
        self.active_scans.fetch_sub(1, Ordering::SeqCst);
        self.inner.plugin_assets(plugin_dir)
    }

    fn retrieve_plugin_asset(&self, run: &str, plugin_dir: &str, asset: &str) -> Result<Vec<u8>> {
        self.inner.retrieve_plugin_asset(run, plugin_dir, asset)
    }
}

// ============================================================================
// Helpers
// ============================================================================

pub fn service_over(store: Arc<dyn Multiplexer>) -> QueryService {
    QueryService::new(store, TextPluginConfig::default()).unwrap()
}

pub fn tags(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

/// Poll until `cond` holds, failing the test after `WAIT_LIMIT`.
pub fn wait_until(what: &str, cond: impl Fn() -> bool) {
    let deadline = Instant::now() + WAIT_LIMIT;
    while !cond() {
        assert!(Instant::now() < deadline, "timed out waiting for {}", what);
        thread::sleep(Duration::from_millis(2));
    }
}

/// Wait until `n` refreshes have published and none is running.
pub fn wait_for_refreshes(service: &QueryService, n: u64) {
    wait_until("index refresh", || {
        let stats = service.cache_stats();
        stats.refreshes_completed >= n && !stats.in_flight
    });
}
