//! Per-run memoization of derived artifacts.
//!
//! Each artifact name owns its own [`OnceLock`] slot. The map lock is held only
//! long enough to fetch or create a slot; the computation itself runs inside
//! the slot, so callers asking for different artifacts never wait on each
//! other, and concurrent callers asking for the same artifact wait for the
//! first caller's result instead of recomputing it.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use parking_lot::Mutex;

use super::ComputedArtifact;
use crate::domain::ArtifactError;
use crate::metrics::METRICS;
use crate::obs;

type SharedValue = Arc<dyn Any + Send + Sync>;
type Slot = Arc<OnceLock<Result<SharedValue, ArtifactError>>>;

/// Compute-once store for one audit run.
#[derive(Default)]
pub struct ArtifactCache {
    slots: Mutex<HashMap<&'static str, Slot>>,
    computations: AtomicUsize,
}

impl ArtifactCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, name: &'static str) -> Slot {
        let mut slots = self.slots.lock();
        Arc::clone(slots.entry(name).or_default())
    }

    /// Return the value stored under `name`, running `compute` if this is the
    /// first request. Failures are stored as well and re-served unchanged.
    pub fn get_or_compute<T, F>(&self, name: &'static str, compute: F) -> Result<Arc<T>, ArtifactError>
    where
        T: Any + Send + Sync,
        F: FnOnce() -> Result<T, ArtifactError>,
    {
        let slot = self.slot(name);
        let mut computed_here = false;
        let stored = slot.get_or_init(|| {
            computed_here = true;
            let started = Instant::now();
            let result = compute().map(|value| Arc::new(value) as SharedValue);
            self.computations.fetch_add(1, Ordering::Relaxed);
            METRICS.inc_artifacts_computed();
            obs::emit_artifact_computed(
                name,
                result.is_ok(),
                started.elapsed().as_micros() as u64,
            );
            result
        });
        if !computed_here {
            METRICS.inc_cache_hits();
        }

        match stored {
            Ok(value) => Arc::clone(value)
                .downcast::<T>()
                .map_err(|_| ArtifactError::TypeMismatch {
                    name: name.to_string(),
                }),
            Err(err) => Err(err.clone()),
        }
    }

    /// Request a typed artifact for `input`.
    pub fn request<A>(&self, artifact: &A, input: &A::Input) -> Result<Arc<A::Output>, ArtifactError>
    where
        A: ComputedArtifact,
    {
        self.get_or_compute(A::NAME, || artifact.compute(input))
    }

    /// Whether `name` has been computed (successfully or not).
    pub fn contains(&self, name: &str) -> bool {
        self.slots
            .lock()
            .get(name)
            .is_some_and(|slot| slot.get().is_some())
    }

    /// Number of derivations actually run so far.
    pub fn computations(&self) -> usize {
        self.computations.load(Ordering::Relaxed)
    }
}

impl fmt::Debug for ArtifactCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.slots.lock().keys().copied().collect();
        names.sort_unstable();
        f.debug_struct("ArtifactCache")
            .field("artifacts", &names)
            .field("computations", &self.computations())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_request_is_served_from_cache() {
        let cache = ArtifactCache::new();
        let first: Arc<Vec<u32>> = cache.get_or_compute("numbers", || Ok(vec![1, 2, 3])).unwrap();
        let second: Arc<Vec<u32>> = cache
            .get_or_compute("numbers", || -> Result<Vec<u32>, ArtifactError> {
                panic!("must not recompute")
            })
            .unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.computations(), 1);
        assert!(cache.contains("numbers"));
    }

    #[test]
    fn failures_are_cached() {
        let cache = ArtifactCache::new();
        let err = ArtifactError::MissingPrerequisite {
            artifact: "broken".to_string(),
            reason: "input was not gathered".to_string(),
        };
        let expected = err.clone();
        let first = cache.get_or_compute::<u8, _>("broken", move || Err(err));
        let second = cache.get_or_compute::<u8, _>("broken", || Ok(7));
        assert_eq!(first.unwrap_err(), expected);
        assert_eq!(second.unwrap_err(), expected);
        assert_eq!(cache.computations(), 1);
    }

    #[test]
    fn wrong_type_is_reported() {
        let cache = ArtifactCache::new();
        let _ = cache.get_or_compute("value", || Ok(1u32)).unwrap();
        let err = cache.get_or_compute::<String, _>("value", || Ok(String::new())).unwrap_err();
        assert_eq!(
            err,
            ArtifactError::TypeMismatch {
                name: "value".to_string()
            }
        );
    }

    #[test]
    fn distinct_names_compute_independently() {
        let cache = ArtifactCache::new();
        let a: Arc<&str> = cache.get_or_compute("a", || Ok("a")).unwrap();
        let b: Arc<&str> = cache.get_or_compute("b", || Ok("b")).unwrap();
        assert_eq!((*a, *b), ("a", "b"));
        assert_eq!(cache.computations(), 2);
        assert!(!cache.contains("c"));
    }
}
