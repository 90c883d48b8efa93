//! In-memory versioned object store
//!
//! Objects live in one collection per kind, keyed by name. Every successful
//! write bumps a store-wide revision counter; the revision an object was
//! last written at is its version token, and [`MemoryStore::update`] only
//! succeeds when the caller presents the token it read. Writers that lose
//! the race get [`StoreError::Conflict`] and are expected to re-read and
//! redo their whole pass.
//!
//! Watchers receive change notifications over a broadcast channel. The
//! channel is a wake-up, not a journal: a receiver that lags drops events
//! and must recover by listing.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::{broadcast, Mutex};

use crate::error::StoreError;
use crate::object::{Object, Stored};

/// Broadcast buffer per watcher before lagging kicks in
const EVENT_BUFFER: usize = 256;

/// Width of the numeric suffix on generated names, so lexicographic
/// order matches creation order
const GENERATED_WIDTH: usize = 8;

/// What happened to an object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventAction {
    Created,
    Updated,
    Deleted,
}

/// A change notification delivered to watchers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub action: EventAction,
    pub kind: &'static str,
    pub name: String,
    pub revision: u64,
}

#[derive(Debug)]
struct RawObject {
    revision: u64,
    value: Value,
}

#[derive(Debug, Default)]
struct Inner {
    objects: HashMap<&'static str, BTreeMap<String, RawObject>>,
    revision: u64,
    sequence: u64,
}

impl Inner {
    fn collection(&mut self, kind: &'static str) -> &mut BTreeMap<String, RawObject> {
        self.objects.entry(kind).or_default()
    }

    fn next_revision(&mut self) -> u64 {
        self.revision += 1;
        self.revision
    }
}

/// Handle to a shared in-memory store. Cloning yields another handle to
/// the same data.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
    events: broadcast::Sender<Event>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        MemoryStore {
            inner: Arc::new(Mutex::new(Inner::default())),
            events,
        }
    }

    /// Fetch one object by name
    pub async fn get<T: Object>(&self, name: &str) -> Result<Stored<T>, StoreError> {
        let inner = self.inner.lock().await;
        let raw = inner
            .objects
            .get(T::KIND)
            .and_then(|collection| collection.get(name))
            .ok_or_else(|| StoreError::NotFound {
                kind: T::KIND,
                name: name.to_string(),
            })?;
        Ok(Stored::new(name, raw.revision, decode::<T>(&raw.value)?))
    }

    /// List every object of a kind, in name order
    pub async fn list<T: Object>(&self) -> Result<Vec<Stored<T>>, StoreError> {
        let inner = self.inner.lock().await;
        let Some(collection) = inner.objects.get(T::KIND) else {
            return Ok(Vec::new());
        };
        let mut out = Vec::with_capacity(collection.len());
        for (name, raw) in collection {
            out.push(Stored::new(name.clone(), raw.revision, decode::<T>(&raw.value)?));
        }
        Ok(out)
    }

    /// Create an object under a caller-chosen name
    pub async fn create<T: Object>(&self, name: &str, obj: &T) -> Result<Stored<T>, StoreError> {
        let value = encode(obj)?;
        let mut inner = self.inner.lock().await;
        if inner.collection(T::KIND).contains_key(name) {
            return Err(StoreError::AlreadyExists {
                kind: T::KIND,
                name: name.to_string(),
            });
        }
        let revision = inner.next_revision();
        inner
            .collection(T::KIND)
            .insert(name.to_string(), RawObject { revision, value });
        self.notify(EventAction::Created, T::KIND, name, revision);
        Ok(Stored::new(name, revision, obj.clone()))
    }

    /// Create an object under a store-assigned name built from `prefix`
    /// plus a sequence number. Generated names sort in creation order.
    pub async fn create_generated<T: Object>(
        &self,
        prefix: &str,
        obj: &T,
    ) -> Result<Stored<T>, StoreError> {
        let value = encode(obj)?;
        let mut inner = self.inner.lock().await;
        let name = loop {
            inner.sequence += 1;
            let candidate = generated_name(prefix, inner.sequence);
            if !inner.collection(T::KIND).contains_key(&candidate) {
                break candidate;
            }
        };
        let revision = inner.next_revision();
        inner
            .collection(T::KIND)
            .insert(name.clone(), RawObject { revision, value });
        self.notify(EventAction::Created, T::KIND, &name, revision);
        Ok(Stored::new(name, revision, obj.clone()))
    }

    /// Replace an object, but only if it is still at `expected_revision`
    pub async fn update<T: Object>(
        &self,
        name: &str,
        expected_revision: u64,
        obj: &T,
    ) -> Result<Stored<T>, StoreError> {
        let value = encode(obj)?;
        let mut inner = self.inner.lock().await;
        let current = inner
            .collection(T::KIND)
            .get(name)
            .map(|raw| raw.revision)
            .ok_or_else(|| StoreError::NotFound {
                kind: T::KIND,
                name: name.to_string(),
            })?;
        if current != expected_revision {
            return Err(StoreError::Conflict {
                kind: T::KIND,
                name: name.to_string(),
                expected: expected_revision,
                actual: current,
            });
        }
        let revision = inner.next_revision();
        inner
            .collection(T::KIND)
            .insert(name.to_string(), RawObject { revision, value });
        self.notify(EventAction::Updated, T::KIND, name, revision);
        Ok(Stored::new(name, revision, obj.clone()))
    }

    /// Remove an object by name
    pub async fn delete<T: Object>(&self, name: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        if inner.collection(T::KIND).remove(name).is_none() {
            return Err(StoreError::NotFound {
                kind: T::KIND,
                name: name.to_string(),
            });
        }
        let revision = inner.next_revision();
        self.notify(EventAction::Deleted, T::KIND, name, revision);
        Ok(())
    }

    /// Subscribe to change notifications. Events sent before the call are
    /// not replayed; a lagging receiver must list to catch up.
    pub fn watch(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    /// Callers hold the store lock while sending, so watchers observe
    /// events in revision order
    fn notify(&self, action: EventAction, kind: &'static str, name: &str, revision: u64) {
        // No receivers is fine
        let _ = self.events.send(Event {
            action,
            kind,
            name: name.to_string(),
            revision,
        });
    }
}

fn generated_name(prefix: &str, sequence: u64) -> String {
    format!("{prefix}{sequence:0GENERATED_WIDTH$}")
}

fn encode<T: Object>(obj: &T) -> Result<Value, StoreError> {
    serde_json::to_value(obj).map_err(|err| StoreError::Codec {
        kind: T::KIND,
        detail: err.to_string(),
    })
}

fn decode<T: Object>(value: &Value) -> Result<T, StoreError> {
    serde_json::from_value(value.clone()).map_err(|err| StoreError::Codec {
        kind: T::KIND,
        detail: err.to_string(),
    })
}
