//! Host-to-surface event subscriptions.
//!
//! Every call to [`HostEventListeners::on`] hands back a [`Disposer`] that
//! removes exactly the listener it was created for. A surface that is torn
//! down and rebuilt repeatedly (the preview window) disposes its listener
//! each time, so handlers never pile up on a channel.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use super::protocol::{HostChannel, HostEvent};

type Handler = Box<dyn FnMut(&HostEvent) + Send>;

struct Entry {
    id: u64,
    channel: HostChannel,
    handler: Handler,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<Entry>,
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Listener table for one display surface.
#[derive(Clone, Default)]
pub struct HostEventListeners {
    inner: Arc<Mutex<Registry>>,
}

impl HostEventListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for events on `channel`.
    ///
    /// Handlers run while the table is locked and must not subscribe or
    /// dispose from inside the callback.
    #[must_use = "dropping the disposer leaves the listener registered forever"]
    pub fn on<F>(&self, channel: HostChannel, handler: F) -> Disposer
    where
        F: FnMut(&HostEvent) + Send + 'static,
    {
        let mut registry = lock(&self.inner);
        registry.next_id += 1;
        let id = registry.next_id;
        registry.entries.push(Entry {
            id,
            channel,
            handler: Box::new(handler),
        });
        Disposer {
            id,
            registry: Arc::downgrade(&self.inner),
        }
    }

    /// Deliver `event` to every listener on its channel. Returns how many ran.
    pub fn emit(&self, event: &HostEvent) -> usize {
        let channel = event.channel();
        let mut registry = lock(&self.inner);
        let mut delivered = 0;
        for entry in registry.entries.iter_mut().filter(|e| e.channel == channel) {
            (entry.handler)(event);
            delivered += 1;
        }
        delivered
    }

    /// Number of live listeners on `channel`.
    pub fn count(&self, channel: HostChannel) -> usize {
        lock(&self.inner)
            .entries
            .iter()
            .filter(|e| e.channel == channel)
            .count()
    }
}

/// Removes one listener from the table it was registered on.
pub struct Disposer {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Disposer {
    /// Remove the listener. Returns `false` if it was already gone.
    pub fn dispose(self) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        let mut table = lock(&registry);
        let before = table.entries.len();
        table.entries.retain(|e| e.id != self.id);
        table.entries.len() != before
    }
}

impl std::fmt::Debug for Disposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Disposer").field("id", &self.id).finish()
    }
}
