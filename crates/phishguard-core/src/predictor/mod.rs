//! Memoizing predictor.
//!
//! Keyed by normalized URL. Extraction + classification runs outside the
//! lock, so different URLs are classified in parallel. A key being computed
//! is marked in flight; concurrent misses on it wait for that computation
//! instead of starting their own. Failed predictions are not cached.
//!
//! Every engine swap bumps a generation counter and clears the cache; a
//! result computed by an older engine is returned to its caller but never
//! cached.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::{Condvar, Mutex};

use crate::adapter::{ClassificationAdapter, PredictionResult};
use crate::error::PredictError;
use crate::features::{FeatureExtractor, FeatureRecord};

/// Pure pipeline: URL → features → prediction. No caching.
#[derive(Debug, Clone)]
pub struct PredictionEngine {
    extractor: FeatureExtractor,
    adapter: ClassificationAdapter,
}

impl PredictionEngine {
    pub fn new(extractor: FeatureExtractor, adapter: ClassificationAdapter) -> Self {
        Self { extractor, adapter }
    }

    pub fn extractor(&self) -> &FeatureExtractor {
        &self.extractor
    }

    pub fn adapter(&self) -> &ClassificationAdapter {
        &self.adapter
    }

    pub fn features(&self, normalized_url: &str) -> FeatureRecord {
        self.extractor.extract(normalized_url)
    }

    pub fn predict(&self, normalized_url: &str) -> Result<PredictionResult, PredictError> {
        let features = self.extractor.extract(normalized_url);
        self.adapter.classify(&features)
    }
}

/// Completion signal for one key whose prediction is running.
#[derive(Default)]
struct InFlight {
    done: Mutex<bool>,
    cond: Condvar,
}

impl InFlight {
    fn wait(&self) {
        let mut done = self.done.lock();
        while !*done {
            self.cond.wait(&mut done);
        }
    }

    fn finish(&self) {
        *self.done.lock() = true;
        self.cond.notify_all();
    }
}

struct State {
    engine: Arc<PredictionEngine>,
    generation: u64,
    /// `None` when the configured capacity is 0.
    cache: Option<LruCache<String, PredictionResult>>,
    in_flight: HashMap<String, Arc<InFlight>>,
}

/// Bounded LRU memoization in front of a [`PredictionEngine`].
pub struct MemoizingPredictor {
    capacity: usize,
    state: Mutex<State>,
}

/// Ownership of an in-flight key. Dropping it (also on panic) clears the
/// marker and wakes waiters.
struct Claim<'a> {
    predictor: &'a MemoizingPredictor,
    key: &'a str,
    slot: Arc<InFlight>,
}

impl Drop for Claim<'_> {
    fn drop(&mut self) {
        {
            let mut state = self.predictor.state.lock();
            if state
                .in_flight
                .get(self.key)
                .is_some_and(|slot| Arc::ptr_eq(slot, &self.slot))
            {
                state.in_flight.remove(self.key);
            }
        }
        self.slot.finish();
    }
}

impl MemoizingPredictor {
    pub fn new(engine: PredictionEngine, capacity: usize) -> Self {
        Self {
            capacity,
            state: Mutex::new(State {
                engine: Arc::new(engine),
                generation: 0,
                cache: NonZeroUsize::new(capacity).map(LruCache::new),
                in_flight: HashMap::new(),
            }),
        }
    }

    /// `normalized_url` must already be normalized; it is used verbatim as the key.
    pub fn predict(&self, normalized_url: &str) -> Result<PredictionResult, PredictError> {
        loop {
            let (engine, generation, slot) = {
                let mut state = self.state.lock();
                if let Some(hit) = state.cache.as_mut().and_then(|c| c.get(normalized_url)) {
                    tracing::debug!(url = normalized_url, "prediction cache hit");
                    return Ok(hit.clone());
                }
                let pending = state.in_flight.get(normalized_url).cloned();
                if let Some(pending) = pending {
                    drop(state);
                    tracing::debug!(url = normalized_url, "waiting for in-flight prediction");
                    pending.wait();
                    continue;
                }
                let slot = Arc::new(InFlight::default());
                state
                    .in_flight
                    .insert(normalized_url.to_string(), Arc::clone(&slot));
                (Arc::clone(&state.engine), state.generation, slot)
            };

            let _claim = Claim {
                predictor: self,
                key: normalized_url,
                slot,
            };
            tracing::debug!(url = normalized_url, "prediction cache miss");
            let result = engine.predict(normalized_url).map_err(|e| {
                tracing::error!(url = normalized_url, error = %e, "prediction failed");
                e
            })?;
            self.store(normalized_url, generation, &result);
            return Ok(result);
        }
    }

    fn store(&self, key: &str, generation: u64, result: &PredictionResult) {
        let mut state = self.state.lock();
        if state.generation != generation {
            tracing::debug!(url = key, "engine replaced mid-prediction; result not cached");
            return;
        }
        let Some(cache) = state.cache.as_mut() else {
            return;
        };
        if let Some((evicted, _)) = cache.push(key.to_string(), result.clone()) {
            if evicted != key {
                tracing::debug!(evicted = %evicted, "evicted least recently used prediction");
            }
        }
    }

    /// Current engine; extraction through it bypasses the cache.
    pub fn engine(&self) -> Arc<PredictionEngine> {
        Arc::clone(&self.state.lock().engine)
    }

    /// Installs a new engine and drops every cached prediction in one step.
    pub fn replace_engine(&self, engine: PredictionEngine) {
        let mut state = self.state.lock();
        state.engine = Arc::new(engine);
        state.generation += 1;
        if let Some(cache) = state.cache.as_mut() {
            cache.clear();
        }
        tracing::info!(generation = state.generation, "prediction engine replaced; cache cleared");
    }

    pub fn cached_len(&self) -> usize {
        self.state.lock().cache.as_ref().map_or(0, LruCache::len)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_cached(&self, normalized_url: &str) -> bool {
        self.state
            .lock()
            .cache
            .as_ref()
            .is_some_and(|c| c.contains(normalized_url))
    }

    pub fn clear(&self) {
        if let Some(cache) = self.state.lock().cache.as_mut() {
            cache.clear();
        }
    }
}
