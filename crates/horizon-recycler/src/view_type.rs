//! Stable view type identities for renderer dispatch.
//!
//! Virtualized list engines partition their recycling pools by a small
//! integer "view type". This module mints those integers: every distinct
//! renderer type is assigned a [`ViewTypeId`] the first time it is seen,
//! and keeps that id for the life of the registry.

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;

use parking_lot::Mutex;

/// A stable small integer standing in for one renderer type.
///
/// Ids are assigned densely starting at 0, in first-seen order, and are
/// never reused or reassigned. Once a renderer type has an id, every
/// subsequent lookup returns the same value regardless of how many other
/// types are registered in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewTypeId(u32);

impl ViewTypeId {
    pub(crate) const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw integer value.
    ///
    /// Useful for engines that index their recycling pools by array slot.
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ViewTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct RegistryState {
    ordinals: HashMap<TypeId, ViewTypeId>,
    next: u32,
}

/// Assigns and remembers a [`ViewTypeId`] for each distinct renderer type.
///
/// This is pure identity bookkeeping: the registry knows nothing about
/// rendering, it only guarantees a stable bijection between renderer
/// `TypeId`s and small integers. The mapping only grows; there is no
/// removal operation.
///
/// # Thread Safety
///
/// `ordinal_of` is safe under concurrent first-use: the lookup and the
/// allocation of the next id happen under one lock, so at most one id is
/// ever assigned per distinct type even when registration races with lazy
/// assignment from render callbacks.
///
/// # Scope
///
/// A registry is scoped to the adapter that owns it (or shared explicitly
/// via `Arc` when several adapters must agree on ids). Independent lists
/// and tests therefore never leak ordinal assignments into each other.
pub struct ViewTypeRegistry {
    state: Mutex<RegistryState>,
}

impl ViewTypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RegistryState {
                ordinals: HashMap::new(),
                next: 0,
            }),
        }
    }

    /// Returns the id for the renderer type identified by `renderer`,
    /// assigning the next free id on first sight.
    pub fn ordinal_of(&self, renderer: TypeId) -> ViewTypeId {
        let mut state = self.state.lock();
        if let Some(&id) = state.ordinals.get(&renderer) {
            return id;
        }
        let id = ViewTypeId::new(state.next);
        state.next += 1;
        state.ordinals.insert(renderer, id);
        tracing::trace!(view_type = %id, "assigned new view type id");
        id
    }

    /// Returns the id for renderer type `R`, assigning one on first sight.
    pub fn ordinal_of_renderer<R: 'static>(&self) -> ViewTypeId {
        self.ordinal_of(TypeId::of::<R>())
    }

    /// Number of renderer types seen so far.
    pub fn len(&self) -> usize {
        self.state.lock().ordinals.len()
    }

    /// Returns `true` if no renderer type has been seen yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ViewTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
