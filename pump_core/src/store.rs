//! Latest-status cell with explicit subscriptions.
//!
//! One writer (the status source) publishes snapshots or disconnects; any
//! number of readers query `current()` or subscribe to changes. Dropping the
//! `Subscription` unsubscribes.

use crate::error::StatusError;
use crate::status::SystemStatus;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock, Weak};

type Callback = dyn Fn(Option<&SystemStatus>) + Send + Sync;

#[derive(Default)]
struct Inner {
    current: RwLock<Option<SystemStatus>>,
    subscribers: Mutex<Vec<(u64, Arc<Callback>)>>,
    next_id: AtomicU64,
}

#[derive(Clone, Default)]
pub struct StatusStore {
    inner: Arc<Inner>,
}

impl StatusStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<SystemStatus> {
        *self
            .inner
            .current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the current snapshot. Snapshots older than the current one are
    /// rejected and the current value is kept.
    pub fn publish(&self, snapshot: SystemStatus) -> Result<(), StatusError> {
        {
            let mut cur = self
                .inner
                .current
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            if let Some(prev) = cur.as_ref()
                && snapshot.updated < prev.updated
            {
                return Err(StatusError::OutOfOrder {
                    behind: prev.updated.duration_since(snapshot.updated),
                });
            }
            *cur = Some(snapshot);
        }
        self.notify(Some(snapshot));
        Ok(())
    }

    /// Forget the current snapshot (connection lost).
    pub fn disconnect(&self) {
        let was = self
            .inner
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if was.is_some() {
            tracing::debug!("status store disconnected");
        }
        self.notify(None);
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(Option<&SystemStatus>) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(callback)));
        Subscription {
            id,
            store: Arc::downgrade(&self.inner),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn notify(&self, value: Option<SystemStatus>) {
        // Snapshot the list so callbacks may subscribe or unsubscribe.
        let subs: Vec<Arc<Callback>> = self
            .inner
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, cb)| cb.clone())
            .collect();
        for cb in subs {
            cb(value.as_ref());
        }
    }
}

/// Live registration of a store callback.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    store: Weak<Inner>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            inner
                .subscribers
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::{Duration, Instant};

    #[test]
    fn starts_disconnected() {
        assert_eq!(StatusStore::new().current(), None);
    }

    #[test]
    fn publish_replaces_and_disconnect_resets() {
        let store = StatusStore::new();
        let t = Instant::now();
        store.publish(SystemStatus::new(false, t)).unwrap();
        store
            .publish(SystemStatus::new(true, t + Duration::from_millis(5)))
            .unwrap();
        assert!(store.current().unwrap().is_running());
        store.disconnect();
        assert_eq!(store.current(), None);
    }

    #[test]
    fn rejects_out_of_order_snapshot() {
        let store = StatusStore::new();
        let t = Instant::now() + Duration::from_secs(10);
        store.publish(SystemStatus::new(true, t)).unwrap();
        let err = store
            .publish(SystemStatus::new(false, t - Duration::from_secs(2)))
            .expect_err("older snapshot");
        assert_eq!(
            err,
            StatusError::OutOfOrder {
                behind: Duration::from_secs(2)
            }
        );
        assert!(store.current().unwrap().is_running());
    }

    #[test]
    fn equal_timestamps_are_accepted() {
        let store = StatusStore::new();
        let t = Instant::now();
        store.publish(SystemStatus::new(true, t)).unwrap();
        store.publish(SystemStatus::new(false, t)).unwrap();
        assert!(!store.current().unwrap().is_running());
    }

    #[test]
    fn dropping_subscription_stops_callbacks() {
        let store = StatusStore::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        let sub = store.subscribe(move |_| {
            h.fetch_add(1, Ordering::SeqCst);
        });
        store.publish(SystemStatus::new(false, Instant::now())).unwrap();
        store.disconnect();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert_eq!(store.subscriber_count(), 1);

        drop(sub);
        assert_eq!(store.subscriber_count(), 0);
        store.disconnect();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }
}
