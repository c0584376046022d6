use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use webaudit_core::{ArtifactCache, ArtifactError, ComputedArtifact, PageTimelineArtifact, TimelineError, Trace};

// ---- compute-once ----

#[test]
fn concurrent_requests_compute_once() {
    let cache = ArtifactCache::new();
    let calls = AtomicUsize::new(0);
    let barrier = Barrier::new(8);

    let values: Vec<Arc<String>> = thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                s.spawn(|| {
                    barrier.wait();
                    cache
                        .get_or_compute("slow", || {
                            calls.fetch_add(1, Ordering::SeqCst);
                            thread::sleep(Duration::from_millis(20));
                            Ok("derived".to_string())
                        })
                        .unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(cache.computations(), 1);
    assert!(values.iter().all(|v| Arc::ptr_eq(v, &values[0])));
}

#[test]
fn slow_artifact_does_not_block_other_names() {
    let cache = ArtifactCache::new();
    let started = Barrier::new(2);

    thread::scope(|s| {
        let slow = s.spawn(|| {
            cache
                .get_or_compute("slow", || {
                    started.wait();
                    thread::sleep(Duration::from_millis(50));
                    Ok(1u8)
                })
                .unwrap()
        });
        started.wait();
        // "slow" is mid-computation; another name resolves immediately
        assert!(!cache.contains("slow"));
        let fast = cache.get_or_compute("fast", || Ok(2u8)).unwrap();
        assert_eq!(*fast, 2);
        assert_eq!(*slow.join().unwrap(), 1);
    });
    assert_eq!(cache.computations(), 2);
}

// ---- failures ----

#[test]
fn failure_is_served_to_every_caller() {
    let cache = ArtifactCache::new();
    let attempts = AtomicUsize::new(0);
    let trace = Trace::default();

    for _ in 0..3 {
        let err = cache
            .get_or_compute(PageTimelineArtifact::NAME, || {
                attempts.fetch_add(1, Ordering::SeqCst);
                PageTimelineArtifact.compute(&trace)
            })
            .unwrap_err();
        assert_eq!(err, ArtifactError::Timeline(TimelineError::NoTracingStartedInPage));
    }
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
    assert!(cache.contains(PageTimelineArtifact::NAME));
}

#[test]
fn typed_request_uses_artifact_name() {
    let cache = ArtifactCache::new();
    let trace = Trace::default();
    let first = cache.request(&PageTimelineArtifact, &trace);
    let second = cache.request(&PageTimelineArtifact, &trace);
    assert!(first.is_err());
    assert_eq!(first.unwrap_err(), second.unwrap_err());
    assert_eq!(cache.computations(), 1);
    assert!(format!("{cache:?}").contains("PageTimeline"));
}
