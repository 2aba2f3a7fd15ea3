//! Record and renderer contracts for the dispatch layer.
//!
//! Three roles meet here:
//!
//! - **Records** ([`ViewRecord`]): immutable display-data items. Each
//!   record names the renderer type that displays it, which is the basis
//!   for view type id assignment.
//! - **Renderers** ([`ItemRenderer`]): mutable objects owning one widget
//!   subtree. A renderer is constructed once from a [`CreationContext`]
//!   and then rebound to many records of its kind as the list recycles.
//! - **Delegates** ([`ItemRenderer::Delegate`]): optional per-type event
//!   sinks. A renderer reports interactions through its delegate trait
//!   without ever learning the owner's concrete type.
//!
//! The typed contract is erased behind [`DynRenderer`] for the
//! virtualized list engine, which stores renderers of many kinds in one
//! pool. The record downcast this requires happens inside a blanket impl
//! monomorphized per renderer type, not at any lookup site.
//!
//! # Example
//!
//! ```
//! use std::any::{Any, TypeId};
//! use std::sync::Arc;
//! use horizon_recycler::{CreationContext, ItemRenderer, ViewRecord};
//!
//! struct Headline { text: String }
//!
//! impl ViewRecord for Headline {
//!     fn render_type(&self) -> TypeId { TypeId::of::<HeadlineRenderer>() }
//!     fn as_any(&self) -> &dyn Any { self }
//! }
//!
//! trait HeadlineEvents: Send + Sync { fn activated(&self, row: usize); }
//!
//! struct HeadlineRenderer {
//!     label: String,
//!     delegate: Option<Arc<dyn HeadlineEvents>>,
//! }
//!
//! impl ItemRenderer for HeadlineRenderer {
//!     type Record = Headline;
//!     type Delegate = dyn HeadlineEvents;
//!
//!     fn create(ctx: CreationContext<Self::Delegate>) -> Self {
//!         Self { label: String::new(), delegate: ctx.delegate }
//!     }
//!
//!     fn bind(&mut self, record: &Headline) {
//!         self.label = record.text.clone();
//!     }
//! }
//! ```

use std::any::{Any, TypeId};
use std::sync::Arc;

use slotmap::new_key_type;

new_key_type! {
    /// Handle to the container widget a renderer's subtree mounts under.
    ///
    /// Minted by the widget tree that hosts the list (arena-keyed, like
    /// every widget handle there); opaque to this crate and forwarded to
    /// factories untouched.
    pub struct ContainerId;
}

/// One immutable display-data item.
///
/// A record is associated with exactly one renderer type, reported by
/// [`render_type`](ViewRecord::render_type). Every instance of one
/// concrete record kind must report the same value; that stability is
/// what makes view type ids stable. Records are superseded, never
/// mutated, when the owner's data changes.
pub trait ViewRecord: Send + Sync + 'static {
    /// `TypeId` of the renderer that displays this record.
    fn render_type(&self) -> TypeId;

    /// Upcast used by the erased binding glue.
    ///
    /// Implementations return `self`.
    fn as_any(&self) -> &dyn Any;
}

/// Transient bundle handed to [`ItemRenderer::create`].
///
/// Constructed fresh for every creation call and owned solely by it; the
/// delegate slot carries whatever was registered for the renderer's view
/// type at that moment, already narrowed to the renderer's declared
/// delegate type.
pub struct CreationContext<D: ?Sized> {
    /// Container the new renderer's widget subtree will be parented to.
    pub parent: ContainerId,
    /// Delegate registered for the renderer's view type, if any.
    pub delegate: Option<Arc<D>>,
}

/// The typed contract every renderer type implements.
///
/// A renderer is associated with exactly one record kind for its whole
/// lifetime, but may be rebound to many record instances of that kind;
/// pooling and reuse are owned by the list engine, not by this crate.
pub trait ItemRenderer: Sized + 'static {
    /// The concrete record kind this renderer binds.
    type Record: ViewRecord;

    /// The event-sink trait this renderer reports through, or `()` for
    /// renderers that report nothing. Typically a `dyn` trait object so
    /// the owner's concrete type stays unknown to the renderer.
    type Delegate: ?Sized + Send + Sync + 'static;

    /// Builds a renderer and its widget state from the creation context.
    fn create(ctx: CreationContext<Self::Delegate>) -> Self;

    /// Applies one record into the renderer's widget state.
    fn bind(&mut self, record: &Self::Record);
}

/// Object-safe form of a renderer, held by the virtualized list engine.
///
/// Every [`ItemRenderer`] is a `DynRenderer` through a blanket impl, so
/// `Box<dyn DynRenderer>` is simply a boxed concrete renderer and can be
/// downcast back in collaborators that need the concrete type.
pub trait DynRenderer: Any {
    /// Applies `record` into the renderer's widget state.
    ///
    /// # Panics
    ///
    /// Panics if `record` is not of this renderer's declared record kind.
    /// The list engine is trusted to bind a renderer only to positions of
    /// its own view type; a mismatch is a registration-contract bug.
    fn bind_record(&mut self, record: &dyn ViewRecord);

    /// Upcast to [`Any`] for concrete-type recovery.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast to [`Any`] for concrete-type recovery.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<R: ItemRenderer> DynRenderer for R {
    fn bind_record(&mut self, record: &dyn ViewRecord) {
        let Some(record) = record.as_any().downcast_ref::<R::Record>() else {
            panic!(
                "record bound to {} is not a {}",
                std::any::type_name::<R>(),
                std::any::type_name::<R::Record>(),
            );
        };
        self.bind(record);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
