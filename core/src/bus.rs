//! Snapshot change notifications — a synchronous observer bus.
//!
//! Listeners run in subscription order, on the dispatching thread,
//! after every applied (non-no-op) action. A refused action notifies
//! nobody.

use crate::snapshot::Snapshot;
use std::sync::Arc;

pub type Listener = Box<dyn Fn(&Arc<Snapshot>) + Send>;

/// Handle returned by `subscribe`; pass back to `unsubscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

pub struct SnapshotBus {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl SnapshotBus {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Returns true when the id was live.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn notify(&self, snapshot: &Arc<Snapshot>) {
        for (_, listener) in &self.listeners {
            listener(snapshot);
        }
    }
}

impl Default for SnapshotBus {
    fn default() -> Self {
        Self::new()
    }
}
