//! Asset cache
//!
//! Resolves asset identifiers to decoded image handles. Decoding happens
//! elsewhere (the browser, natively nothing at all); the cache only tracks
//! which identifiers are pending and runs the ready callbacks once every
//! requested asset has arrived.

use std::collections::HashMap;

#[derive(Debug)]
enum Slot<H> {
    Pending,
    Ready(H),
    Failed,
}

type ReadyCallback<H> = Box<dyn FnOnce(&AssetCache<H>)>;

/// Identifier -> decoded handle
pub struct AssetCache<H> {
    slots: HashMap<String, Slot<H>>,
    ready_callbacks: Vec<ReadyCallback<H>>,
}

impl<H> Default for AssetCache<H> {
    fn default() -> Self {
        Self {
            slots: HashMap::new(),
            ready_callbacks: Vec::new(),
        }
    }
}

impl<H> AssetCache<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request identifiers; returns the ones not seen before (to be fetched)
    pub fn load<S: AsRef<str>>(&mut self, ids: &[S]) -> Vec<String> {
        let mut new_ids = Vec::new();
        for id in ids {
            let id = id.as_ref();
            if !self.slots.contains_key(id) {
                self.slots.insert(id.to_string(), Slot::Pending);
                new_ids.push(id.to_string());
            }
        }
        new_ids
    }

    /// Store a decoded asset; fires the ready callbacks if it was the last one
    pub fn insert(&mut self, id: &str, handle: H) {
        self.slots.insert(id.to_string(), Slot::Ready(handle));
        log::debug!("Asset loaded: {}", id);
        if self.is_ready() {
            self.fire_ready();
        }
    }

    /// Record a failed decode. The cache will never become ready.
    pub fn mark_failed(&mut self, id: &str) {
        log::error!("Failed to load asset: {}", id);
        self.slots.insert(id.to_string(), Slot::Failed);
    }

    /// Run `callback` once every requested asset is decoded
    /// (immediately if that is already the case)
    pub fn on_ready(&mut self, callback: impl FnOnce(&AssetCache<H>) + 'static) {
        if self.is_ready() {
            callback(self);
        } else {
            self.ready_callbacks.push(Box::new(callback));
        }
    }

    /// True when something was requested and all of it has decoded
    pub fn is_ready(&self) -> bool {
        !self.slots.is_empty()
            && self
                .slots
                .values()
                .all(|slot| matches!(slot, Slot::Ready(_)))
    }

    /// Decoded handle for `id`, if it has arrived
    pub fn get(&self, id: &str) -> Option<&H> {
        match self.slots.get(id) {
            Some(Slot::Ready(handle)) => Some(handle),
            _ => None,
        }
    }

    fn fire_ready(&mut self) {
        let callbacks = std::mem::take(&mut self.ready_callbacks);
        if !callbacks.is_empty() {
            log::info!("All {} assets ready", self.slots.len());
        }
        for callback in callbacks {
            callback(self);
        }
    }
}
