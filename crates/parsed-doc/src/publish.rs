//! Single-slot "publish if absent" cache.
//!
//! A [`PublishSlot`] holds at most one computed value. Readers load it without locking; on a
//! miss they compute a value and compare-and-swap it into the empty slot. If another caller won
//! the race, the loser drops its own result and returns the winner's, so every caller observes the
//! same fully-built `Arc`. Redundant computation is possible and harmless.

use arc_swap::ArcSwapOption;
use std::fmt;
use std::sync::Arc;

/// An atomic, write-once cache slot.
pub struct PublishSlot<T> {
    name: &'static str,
    inner: ArcSwapOption<T>,
}

impl<T> PublishSlot<T> {
    /// Create an empty slot. `name` only appears in trace output.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            inner: ArcSwapOption::empty(),
        }
    }

    /// The published value, if any.
    pub fn get(&self) -> Option<Arc<T>> {
        self.inner.load_full()
    }

    /// Returns `true` once a value has been published.
    pub fn is_published(&self) -> bool {
        self.inner.load().is_some()
    }

    /// Install `value` if the slot is still empty and return the installed value.
    pub fn publish(&self, value: Arc<T>) -> Arc<T> {
        let prev = self
            .inner
            .compare_and_swap(&None::<Arc<T>>, Some(Arc::clone(&value)));
        match &*prev {
            Some(existing) => {
                tracing::trace!(slot = self.name, "publish lost race; using installed value");
                Arc::clone(existing)
            }
            None => {
                tracing::trace!(slot = self.name, "published");
                value
            }
        }
    }

    /// Return the published value, computing and publishing it on a miss.
    ///
    /// Errors from `compute` are returned as-is and leave the slot empty.
    pub fn get_or_try_publish<E>(
        &self,
        compute: impl FnOnce() -> Result<T, E>,
    ) -> Result<Arc<T>, E> {
        if let Some(hit) = self.get() {
            tracing::trace!(slot = self.name, "cache hit");
            return Ok(hit);
        }
        tracing::debug!(slot = self.name, "cache miss; computing");
        let fresh = Arc::new(compute()?);
        Ok(self.publish(fresh))
    }
}

impl<T> fmt::Debug for PublishSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublishSlot")
            .field("name", &self.name)
            .field("published", &self.is_published())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;

    #[test]
    fn first_publish_wins() {
        let slot = PublishSlot::new("test");
        let a = slot.publish(Arc::new(vec![1]));
        let b = slot.publish(Arc::new(vec![2]));
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(*b, vec![1]);
    }

    #[test]
    fn failed_compute_publishes_nothing() {
        let slot = PublishSlot::<Vec<u8>>::new("test");
        let res: Result<_, &str> = slot.get_or_try_publish(|| Err("cancelled"));
        assert_eq!(res.unwrap_err(), "cancelled");
        assert!(!slot.is_published());

        let value = slot.get_or_try_publish(|| Ok::<_, &str>(vec![7])).unwrap();
        assert_eq!(*value, vec![7]);
        assert!(slot.is_published());
    }

    #[test]
    fn concurrent_callers_share_one_value() {
        let slot = PublishSlot::<Vec<usize>>::new("test");
        let computed = AtomicUsize::new(0);
        let barrier = Barrier::new(8);

        let results = std::thread::scope(|s| {
            let handles = (0..8)
                .map(|i| {
                    let slot = &slot;
                    let computed = &computed;
                    let barrier = &barrier;
                    s.spawn(move || {
                        barrier.wait();
                        slot.get_or_try_publish(|| {
                            computed.fetch_add(1, Ordering::SeqCst);
                            Ok::<_, ()>((0..1000).map(|n| n + i).collect())
                        })
                        .unwrap()
                    })
                })
                .collect::<Vec<_>>();
            handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .collect::<Vec<_>>()
        });

        assert!(computed.load(Ordering::SeqCst) >= 1);
        let first = &results[0];
        assert_eq!(first.len(), 1000);
        for r in &results {
            assert!(Arc::ptr_eq(first, r));
        }
    }
}
