//! Signal/slot notifications for adapter consumers.
//!
//! This module provides a type-safe signal primitive used by the adapter
//! to broadcast invalidation hints ("everything changed", "this position
//! changed") to the virtualized list engine.
//!
//! # Invocation Model
//!
//! This crate has no event loop, so every connection is direct: emitting
//! a signal invokes the connected slots immediately on the emitting
//! thread, in connection order. Consumers that need cross-thread delivery
//! re-queue onto their own event loop inside the slot.
//!
//! Slots connected or disconnected while an emission is in progress take
//! effect from the next emission.
//!
//! # Example
//!
//! ```
//! use horizon_recycler::Signal;
//!
//! let record_changed = Signal::<usize>::new();
//!
//! let conn_id = record_changed.connect(|position| {
//!     println!("record {position} changed");
//! });
//!
//! record_changed.emit(3);
//! record_changed.disconnect(conn_id);
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Returned by [`Signal::connect`]; pass it to [`Signal::disconnect`]
    /// to remove that connection. The id stays valid until disconnected.
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A type-safe signal with any number of connected slots.
///
/// Cloning a `Signal` produces another handle to the same connection set,
/// so an owner can keep one end while handing the other to a collaborator.
pub struct Signal<Args> {
    connections: Arc<Mutex<SlotMap<ConnectionId, Slot<Args>>>>,
}

impl<Args> Signal<Args> {
    /// Creates a signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Arc::new(Mutex::new(SlotMap::with_key())),
        }
    }

    /// Connects a slot, returning the id to disconnect it later.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Arc::new(slot))
    }

    /// Removes a connection.
    ///
    /// Returns `false` if the id was already disconnected.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Invokes every connected slot with `args`, in connection order.
    pub fn emit(&self, args: Args) {
        // Snapshot outside the lock so slots may connect/disconnect freely.
        let slots: Vec<Slot<Args>> = self.connections.lock().values().cloned().collect();
        for slot in slots {
            slot(&args);
        }
    }

    /// Number of currently connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }
}

impl<Args> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> Clone for Signal<Args> {
    fn clone(&self) -> Self {
        Self {
            connections: Arc::clone(&self.connections),
        }
    }
}
