//! Factory and delegate registries keyed by view type id.
//!
//! The registry is populated by explicit, typed registration calls; the
//! factory stored for a renderer type is monomorphized glue around
//! [`ItemRenderer::create`], so the delegate narrowing that the source of
//! a creation request would otherwise have to cast for is fixed at the
//! registration call site.
//!
//! Lookup semantics are asymmetric: a missing factory is an error (an
//! unregistered record kind reaching display is always a configuration
//! bug), while a missing delegate is an ordinary `None` (most renderer
//! types have no delegate).

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{RecyclerError, Result};
use crate::renderer::{ContainerId, CreationContext, DynRenderer, ItemRenderer};
use crate::view_type::{ViewTypeId, ViewTypeRegistry};

/// Type-erased delegate entry. Holds an `Arc<R::Delegate>` for the
/// renderer type it was registered under.
pub(crate) type BoxedDelegate = Box<dyn Any + Send + Sync>;

type Construct =
    Box<dyn Fn(ContainerId, Option<&BoxedDelegate>) -> Box<dyn DynRenderer> + Send + Sync>;

/// Erased constructor capability for one renderer type.
pub struct RendererFactory {
    construct: Construct,
}

impl RendererFactory {
    fn for_renderer<R: ItemRenderer>() -> Self {
        Self {
            construct: Box::new(
                |parent: ContainerId, delegate: Option<&BoxedDelegate>| -> Box<dyn DynRenderer> {
                    let delegate = delegate
                        .and_then(|entry| entry.downcast_ref::<Arc<R::Delegate>>())
                        .cloned();
                    Box::new(R::create(CreationContext { parent, delegate }))
                },
            ),
        }
    }

    pub(crate) fn instantiate(
        &self,
        parent: ContainerId,
        delegate: Option<&BoxedDelegate>,
    ) -> Box<dyn DynRenderer> {
        (self.construct)(parent, delegate)
    }
}

/// Maps view type ids to renderer factories and optional delegates.
///
/// Registration resolves the renderer type to its id through the
/// [`ViewTypeRegistry`] as a side effect, so registering a type for the
/// first time is itself sufficient to mint its id. Re-registration is
/// last-write-wins for both factories and delegates; there are no merge
/// semantics and no removal.
pub struct RendererRegistry {
    factories: HashMap<ViewTypeId, RendererFactory>,
    delegates: HashMap<ViewTypeId, BoxedDelegate>,
}

impl RendererRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
            delegates: HashMap::new(),
        }
    }

    /// Registers the factory for renderer type `R`, minting its view type
    /// id if unseen. Returns the id.
    pub fn register<R: ItemRenderer>(&mut self, types: &ViewTypeRegistry) -> ViewTypeId {
        let view_type = types.ordinal_of_renderer::<R>();
        let replaced = self
            .factories
            .insert(view_type, RendererFactory::for_renderer::<R>())
            .is_some();
        tracing::debug!(
            view_type = %view_type,
            renderer = std::any::type_name::<R>(),
            replaced,
            "registered renderer factory"
        );
        view_type
    }

    /// Registers the delegate for renderer type `R`, minting its view
    /// type id if unseen. Returns the id.
    ///
    /// The argument coerces from any `Arc<Owner>` whose `Owner`
    /// implements `R::Delegate`, so the owner's concrete type is erased
    /// here and never reaches the renderer.
    pub fn register_delegate<R: ItemRenderer>(
        &mut self,
        delegate: Arc<R::Delegate>,
        types: &ViewTypeRegistry,
    ) -> ViewTypeId {
        let view_type = types.ordinal_of_renderer::<R>();
        self.delegates.insert(view_type, Box::new(delegate));
        tracing::debug!(
            view_type = %view_type,
            renderer = std::any::type_name::<R>(),
            "registered delegate"
        );
        view_type
    }

    /// Looks up the factory for a view type id.
    ///
    /// # Errors
    ///
    /// [`RecyclerError::RendererNotRegistered`] if no factory was
    /// registered for `view_type`.
    pub fn factory_for(&self, view_type: ViewTypeId) -> Result<&RendererFactory> {
        self.factories
            .get(&view_type)
            .ok_or(RecyclerError::RendererNotRegistered { view_type })
    }

    /// Returns the delegate registered for renderer type `R`, if any.
    pub fn delegate_for<R: ItemRenderer>(
        &self,
        types: &ViewTypeRegistry,
    ) -> Option<Arc<R::Delegate>> {
        let view_type = types.ordinal_of_renderer::<R>();
        self.delegates
            .get(&view_type)
            .and_then(|entry| entry.downcast_ref::<Arc<R::Delegate>>())
            .cloned()
    }

    pub(crate) fn delegate_entry(&self, view_type: ViewTypeId) -> Option<&BoxedDelegate> {
        self.delegates.get(&view_type)
    }

    /// Returns `true` if a factory is registered for `view_type`.
    pub fn has_factory(&self, view_type: ViewTypeId) -> bool {
        self.factories.contains_key(&view_type)
    }

    /// Returns `true` if a delegate is registered for `view_type`.
    pub fn has_delegate(&self, view_type: ViewTypeId) -> bool {
        self.delegates.contains_key(&view_type)
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::new()
    }
}
