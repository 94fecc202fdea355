//! Stage store with change listeners
use std::collections::BTreeMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use super::storage::{MemoryStorage, StageStorage};
use super::{Stage, STAGE_STORAGE_KEY};

/// Error returned by a listener
pub type ListenerError = Box<dyn std::error::Error + Send + Sync>;

type Listener = Arc<dyn Fn(Stage) -> Result<(), ListenerError> + Send + Sync>;

struct Inner {
    storage: Box<dyn StageStorage>,
    current: RwLock<Stage>,
    listeners: RwLock<BTreeMap<usize, Listener>>,
    next_listener_id: AtomicUsize,
    /// Bumped on every change, lets a notification see it was superseded
    changes: AtomicUsize,
}

/// Persisted demo stage with synchronous change notification
///
/// Cloning is cheap and every clone shares the same value and listeners.
/// Storage failures never surface to callers: the store keeps working in
/// memory and logs a warning.
#[derive(Clone)]
pub struct StageStore {
    inner: Arc<Inner>,
}

impl fmt::Debug for StageStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StageStore")
            .field("current", &*self.inner.current.read())
            .field("listeners", &self.inner.listeners.read().len())
            .field("storage", &self.inner.storage)
            .finish()
    }
}

impl Default for StageStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl StageStore {
    /// Create a store and load the persisted stage
    pub fn new<S>(storage: S) -> Self
    where
        S: StageStorage + 'static,
    {
        let current = load(&storage);
        Self {
            inner: Arc::new(Inner {
                storage: Box::new(storage),
                current: RwLock::new(current),
                listeners: RwLock::new(BTreeMap::new()),
                next_listener_id: AtomicUsize::new(0),
                changes: AtomicUsize::new(0),
            }),
        }
    }

    /// Store backed by [`MemoryStorage`]
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }

    /// Current stage
    pub fn get(&self) -> Stage {
        *self.inner.current.read()
    }

    /// Set the stage.
    ///
    /// `next` is clamped into range. Setting the current value again is a
    /// no-op unless `force` is set; otherwise the value is persisted and every
    /// listener is called once with it.
    ///
    /// A listener may call `set` itself. The nested change notifies every
    /// listener and the outer notification stops, so no listener is left
    /// holding the older value.
    pub fn set(&self, next: i64, force: bool) -> Stage {
        let next = Stage::clamp(next);

        let (previous, change) = {
            let mut current = self.inner.current.write();
            if *current == next && !force {
                return next;
            }
            let change = self.inner.changes.fetch_add(1, Ordering::SeqCst) + 1;
            (std::mem::replace(&mut *current, next), change)
        };

        tracing::debug!("Stage changed from {} to {}", previous, next);

        self.persist(next);
        self.notify(next, change);

        next
    }

    /// Move the stage by `delta` steps
    pub fn delta(&self, delta: i64) -> Stage {
        self.set(self.get().value().saturating_add(delta), false)
    }

    /// Move forward to `stage`; never moves backwards
    pub fn advance_to(&self, stage: Stage) -> Stage {
        let current = self.get();
        if current >= stage {
            return current;
        }
        self.set(stage.value(), false)
    }

    /// Register a listener.
    ///
    /// The listener is called right away with the current stage, then on every
    /// change until the returned [`Subscription`] is dropped or unsubscribed.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(Stage) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        let id = self.inner.next_listener_id.fetch_add(1, Ordering::Relaxed);
        let listener: Listener = Arc::new(listener);

        self.inner
            .listeners
            .write()
            .insert(id, Arc::clone(&listener));

        invoke(id, &listener, self.get());

        Subscription {
            id,
            store: Arc::downgrade(&self.inner),
        }
    }

    /// Remove a listener by id. Returns whether it was registered.
    pub fn unsubscribe(&self, id: usize) -> bool {
        self.inner.listeners.write().remove(&id).is_some()
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.read().len()
    }

    fn persist(&self, stage: Stage) {
        if let Err(err) = self
            .inner
            .storage
            .write(STAGE_STORAGE_KEY, &stage.to_string())
        {
            tracing::warn!("Could not persist stage {}, keeping it in memory: {}", stage, err);
        }
    }

    fn notify(&self, stage: Stage, change: usize) {
        // Snapshot so listeners can subscribe, unsubscribe or set reentrantly
        let listeners: Vec<(usize, Listener)> = self
            .inner
            .listeners
            .read()
            .iter()
            .map(|(id, listener)| (*id, Arc::clone(listener)))
            .collect();

        for (id, listener) in listeners {
            if self.inner.changes.load(Ordering::SeqCst) != change {
                tracing::debug!("Stage {} superseded while notifying", stage);
                return;
            }
            // removed by an earlier listener
            if !self.inner.listeners.read().contains_key(&id) {
                continue;
            }
            invoke(id, &listener, stage);
        }
    }
}

fn load(storage: &dyn StageStorage) -> Stage {
    match storage.read(STAGE_STORAGE_KEY) {
        Ok(None) => Stage::MIN,
        Ok(Some(raw)) => raw.parse().unwrap_or_else(|err| {
            tracing::warn!("Ignoring stored stage `{}`: {}", raw, err);
            Stage::MIN
        }),
        Err(err) => {
            tracing::warn!("Stage storage unavailable, using in-memory stage: {}", err);
            Stage::MIN
        }
    }
}

fn invoke(id: usize, listener: &Listener, stage: Stage) {
    match panic::catch_unwind(AssertUnwindSafe(|| listener(stage))) {
        Ok(Ok(())) => {}
        Ok(Err(err)) => tracing::error!("Stage listener {} failed: {}", id, err),
        Err(_) => tracing::error!("Stage listener {} panicked", id),
    }
}

/// Handle of a registered listener
///
/// Dropping it removes the listener; call [`Subscription::detach`] to keep the
/// listener for the lifetime of the store.
#[must_use = "dropping a Subscription removes the listener"]
#[derive(Debug)]
pub struct Subscription {
    id: usize,
    store: Weak<Inner>,
}

impl Subscription {
    /// Listener id, usable with [`StageStore::unsubscribe`]
    pub fn id(&self) -> usize {
        self.id
    }

    /// Remove the listener
    pub fn unsubscribe(self) {
        // Drop does the work
    }

    /// Keep the listener registered without holding the handle
    pub fn detach(mut self) {
        self.store = Weak::new();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            inner.listeners.write().remove(&self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;
    use crate::stage::storage::Error as StorageError;

    #[derive(Debug)]
    struct BrokenStorage;

    impl StageStorage for BrokenStorage {
        fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("disabled".to_string()))
        }

        fn write(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disabled".to_string()))
        }
    }

    fn recorder() -> (
        Arc<Mutex<Vec<Stage>>>,
        impl Fn(Stage) -> Result<(), ListenerError> + Send + Sync + 'static,
    ) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        (seen, move |stage| {
            sink.lock().push(stage);
            Ok(())
        })
    }

    #[test]
    fn test_defaults_to_min() {
        let store = StageStore::in_memory();
        assert_eq!(store.get(), Stage::MIN);
    }

    #[test]
    fn test_load_persisted_value() {
        let storage = Arc::new(MemoryStorage::new());
        storage.write(STAGE_STORAGE_KEY, "4").unwrap();

        let store = StageStore::new(Arc::clone(&storage));
        assert_eq!(store.get(), Stage::AwaitingPayment);
    }

    #[test]
    fn test_invalid_stored_values_reset_to_min() {
        for raw in ["abc", "0", "7", "-1", ""] {
            let storage = MemoryStorage::new();
            storage.write(STAGE_STORAGE_KEY, raw).unwrap();
            assert_eq!(StageStore::new(storage).get(), Stage::MIN, "stored `{raw}`");
        }
    }

    #[test]
    fn test_set_persists() {
        let storage = Arc::new(MemoryStorage::new());
        let store = StageStore::new(Arc::clone(&storage));

        assert_eq!(store.set(3, false), Stage::CustomerVerified);
        assert_eq!(
            storage.read(STAGE_STORAGE_KEY).unwrap().as_deref(),
            Some("3")
        );
    }

    #[test]
    fn test_subscribe_calls_immediately_and_on_change() {
        let store = StageStore::in_memory();
        let (seen, listener) = recorder();

        let subscription = store.subscribe(listener);
        store.set(2, false);
        // no change, no notification
        store.set(2, false);
        // forced, notified again
        store.set(2, true);

        assert_eq!(
            *seen.lock(),
            vec![Stage::NoCustomers, Stage::CustomerInvited, Stage::CustomerInvited]
        );
        drop(subscription);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let store = StageStore::in_memory();
        let (seen, listener) = recorder();

        let subscription = store.subscribe(listener);
        assert_eq!(store.listener_count(), 1);
        subscription.unsubscribe();
        assert_eq!(store.listener_count(), 0);

        store.set(5, false);
        assert_eq!(*seen.lock(), vec![Stage::NoCustomers]);
    }

    #[test]
    fn test_detached_listener_stays_registered() {
        let store = StageStore::in_memory();
        let (seen, listener) = recorder();

        store.subscribe(listener).detach();
        store.set(6, false);

        assert_eq!(store.listener_count(), 1);
        assert_eq!(*seen.lock(), vec![Stage::NoCustomers, Stage::Completed]);
    }

    #[test]
    fn test_failing_listeners_are_isolated() {
        let store = StageStore::in_memory();
        let (seen, listener) = recorder();

        let _failing = store.subscribe(|_| Err("boom".into()));
        let _panicking = store.subscribe(|stage| {
            if stage == Stage::Completed {
                panic!("listener panic");
            }
            Ok(())
        });
        let _recording = store.subscribe(listener);

        assert_eq!(store.set(6, false), Stage::Completed);
        assert_eq!(*seen.lock(), vec![Stage::NoCustomers, Stage::Completed]);
        assert_eq!(store.get(), Stage::Completed);
    }

    #[test]
    fn test_listener_can_unsubscribe_itself() {
        let store = StageStore::in_memory();
        let calls = Arc::new(AtomicUsize::new(0));

        let handle_store = store.clone();
        let counter = Arc::clone(&calls);
        let id = Arc::new(AtomicUsize::new(usize::MAX));
        let own_id = Arc::clone(&id);
        let subscription = store.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            handle_store.unsubscribe(own_id.load(Ordering::SeqCst));
            Ok(())
        });
        id.store(subscription.id(), Ordering::SeqCst);
        subscription.detach();

        store.set(2, false);
        store.set(3, false);

        // initial call plus the first change only
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn test_nested_set_leaves_no_stale_stage() {
        let store = StageStore::in_memory();

        let nested = store.clone();
        let stepper = store.subscribe(move |stage| {
            if stage == Stage::CustomerInvited {
                nested.set(5, false);
            }
            Ok(())
        });
        let (seen, listener) = recorder();
        let _recording = store.subscribe(listener);

        store.set(2, false);

        assert_eq!(store.get(), Stage::PartiallyPaid);
        assert_eq!(*seen.lock(), vec![Stage::NoCustomers, Stage::PartiallyPaid]);
        drop(stepper);
    }

    #[test]
    fn test_listener_removed_mid_notification_is_skipped() {
        let store = StageStore::in_memory();

        let remover = store.clone();
        let victim = Arc::new(AtomicUsize::new(usize::MAX));
        let victim_id = Arc::clone(&victim);
        let _removing = store.subscribe(move |stage| {
            if stage == Stage::CustomerInvited {
                remover.unsubscribe(victim_id.load(Ordering::SeqCst));
            }
            Ok(())
        });

        let (seen, listener) = recorder();
        let removed = store.subscribe(listener);
        victim.store(removed.id(), Ordering::SeqCst);
        removed.detach();

        store.set(2, false);

        assert_eq!(*seen.lock(), vec![Stage::NoCustomers]);
        assert_eq!(store.listener_count(), 1);
    }

    #[test]
    fn test_delta_and_advance() {
        let store = StageStore::in_memory();

        assert_eq!(store.delta(1), Stage::CustomerInvited);
        assert_eq!(store.delta(-10), Stage::MIN);
        assert_eq!(store.delta(i64::MAX), Stage::MAX);

        store.set(2, false);
        assert_eq!(store.advance_to(Stage::AwaitingPayment), Stage::AwaitingPayment);
        assert_eq!(store.advance_to(Stage::CustomerInvited), Stage::AwaitingPayment);
    }

    #[test]
    fn test_broken_storage_degrades_to_memory() {
        let store = StageStore::new(BrokenStorage);
        assert_eq!(store.get(), Stage::MIN);

        assert_eq!(store.set(4, false), Stage::AwaitingPayment);
        assert_eq!(store.get(), Stage::AwaitingPayment);
    }

    #[test]
    fn test_clones_share_state() {
        let store = StageStore::in_memory();
        let other = store.clone();

        other.set(5, false);
        assert_eq!(store.get(), Stage::PartiallyPaid);
    }
}
