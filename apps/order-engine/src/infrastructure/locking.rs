//! Per-key write serialization.
//!
//! Each order code gets its own async mutex, so mutations on the same order
//! never interleave while writes to unrelated keys proceed concurrently.
//! Guards are held across awaits, hence tokio mutexes behind a parking_lot
//! registry lock.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex as RegistryMutex;
use tokio::sync::Mutex;

/// Registry of per-key async mutexes.
///
/// The registry retains a mutex per key for the life of the process; the
/// key space (order codes) is bounded by order volume.
#[derive(Debug, Default)]
pub struct KeyedLocks {
    locks: RegistryMutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyedLocks {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            locks: RegistryMutex::new(HashMap::new()),
        }
    }

    /// Get (or create) the mutex for a key.
    ///
    /// Lock the returned mutex to enter the key's critical section:
    ///
    /// ```ignore
    /// let lock = locks.for_key("ORD-1");
    /// let _guard = lock.lock().await;
    /// ```
    #[must_use]
    pub fn for_key(&self, key: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock();
        locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Number of keys with a registered mutex.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locks.lock().len()
    }

    /// True when no key has been locked yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locks.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn same_key_returns_same_mutex() {
        let locks = KeyedLocks::new();
        let a = locks.for_key("ORD-1");
        let b = locks.for_key("ORD-1");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(locks.len(), 1);
    }

    #[tokio::test]
    async fn different_keys_do_not_contend() {
        let locks = KeyedLocks::new();
        let a = locks.for_key("ORD-1");
        let b = locks.for_key("ORD-2");

        let _guard_a = a.lock().await;
        // A held lock on ORD-1 must not block ORD-2.
        let guard_b = b.try_lock();
        assert!(guard_b.is_ok());
    }

    #[tokio::test]
    async fn same_key_serializes() {
        let locks = KeyedLocks::new();
        let a = locks.for_key("ORD-1");

        let _guard = a.lock().await;
        let second = locks.for_key("ORD-1");
        assert!(second.try_lock().is_err());
    }

    #[tokio::test]
    async fn concurrent_increments_do_not_interleave() {
        let locks = Arc::new(KeyedLocks::new());
        let counter = Arc::new(parking_lot::Mutex::new(0u32));

        let mut handles = Vec::new();
        for _ in 0..50 {
            let locks = Arc::clone(&locks);
            let counter = Arc::clone(&counter);
            handles.push(tokio::spawn(async move {
                let lock = locks.for_key("ORD-1");
                let _guard = lock.lock().await;
                let current = *counter.lock();
                tokio::task::yield_now().await;
                *counter.lock() = current + 1;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(*counter.lock(), 50);
    }
}
