//! The dispatch orchestrator between records, factories, and the list
//! engine.
//!
//! [`RecyclerAdapter`] is the seam a virtualized list engine drives: it
//! answers the four virtualization callbacks (item count, position→view
//! type, renderer creation, renderer binding) and broadcasts invalidation
//! hints when the owner replaces record data.
//!
//! # Roles
//!
//! - The **owner** registers renderer types and delegates, then supplies
//!   and updates the ordered record sequence.
//! - The **list engine** partitions its recycling pools by
//!   [`view_type_at`](RecyclerAdapter::view_type_at), calls
//!   [`create_renderer`](RecyclerAdapter::create_renderer) when no pooled
//!   renderer of that type is available, and
//!   [`bind_renderer`](RecyclerAdapter::bind_renderer) every time a
//!   renderer becomes associated with a position, including reuse. It
//!   owns renderer lifetime and pooling entirely.
//!
//! # Threading
//!
//! One logical owner thread drives registration and the virtualization
//! callbacks, mirroring a UI-thread-confined list; mutating operations
//! take `&mut self`. View type id assignment stays safe under concurrent
//! first-use (see [`ViewTypeRegistry`]), since lazy assignment from
//! render callbacks may race with registration during initial population.

use std::sync::Arc;

use crate::bundle::RendererBundle;
use crate::error::{RecyclerError, Result};
use crate::registry::RendererRegistry;
use crate::renderer::{ContainerId, DynRenderer, ItemRenderer, ViewRecord};
use crate::signal::Signal;
use crate::view_type::{ViewTypeId, ViewTypeRegistry};

/// Invalidation signals emitted by [`RecyclerAdapter`].
///
/// The list engine connects to these to stay synchronized with the
/// owner's record data. Both fire after the adapter's own state has
/// already been updated.
pub struct AdapterSignals {
    /// Emitted after the whole record sequence was replaced.
    /// Everything may have changed; this is a full invalidation, not a
    /// diff.
    pub records_reset: Signal<()>,

    /// Emitted after a single record was replaced. Carries the position;
    /// all other positions are unchanged.
    pub record_changed: Signal<usize>,
}

impl AdapterSignals {
    /// Creates a new set of adapter signals.
    pub fn new() -> Self {
        Self {
            records_reset: Signal::new(),
            record_changed: Signal::new(),
        }
    }
}

impl Default for AdapterSignals {
    fn default() -> Self {
        Self::new()
    }
}

/// Binds heterogeneous records to the correct renderer inside a
/// virtualized, recyclable list.
///
/// # Example
///
/// ```ignore
/// let mut adapter = RecyclerAdapter::new();
/// adapter.register_renderers::<(HeadlineRenderer, SeparatorRenderer)>();
/// adapter.register_delegate::<HeadlineRenderer>(screen.clone());
/// adapter.set_records(records);
///
/// // Driven by the list engine for each visible position:
/// let view_type = adapter.view_type_at(position)?;
/// let mut renderer = adapter.create_renderer(view_type, parent)?;
/// adapter.bind_renderer(renderer.as_mut(), position)?;
/// ```
pub struct RecyclerAdapter {
    records: Vec<Box<dyn ViewRecord>>,
    types: Arc<ViewTypeRegistry>,
    registry: RendererRegistry,
    signals: AdapterSignals,
}

impl RecyclerAdapter {
    /// Creates an adapter with an empty record sequence and its own view
    /// type registry.
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Creates an adapter pre-populated with `records`.
    pub fn with_records(records: Vec<Box<dyn ViewRecord>>) -> Self {
        Self {
            records,
            types: Arc::new(ViewTypeRegistry::new()),
            registry: RendererRegistry::new(),
            signals: AdapterSignals::new(),
        }
    }

    /// Uses a shared view type registry instead of an adapter-local one.
    ///
    /// Lists that hand renderers between each other must agree on view
    /// type ids, which they do by sharing one registry.
    pub fn with_type_registry(mut self, types: Arc<ViewTypeRegistry>) -> Self {
        self.types = types;
        self
    }

    // -------------------------------------------------------------------------
    // Owner-facing registration surface
    // -------------------------------------------------------------------------

    /// Registers renderer type `R`, minting its view type id if unseen.
    /// Returns the id. Safe to call repeatedly.
    pub fn register_renderer<R: ItemRenderer>(&mut self) -> ViewTypeId {
        self.registry.register::<R>(&self.types)
    }

    /// Registers every renderer type in bundle `B` (a tuple of renderer
    /// types).
    pub fn register_renderers<B: RendererBundle>(&mut self) {
        B::register_all(&mut self.registry, &self.types);
    }

    /// Registers the delegate for renderer type `R`. Last write wins.
    ///
    /// Accepts any `Arc<Owner>` whose `Owner` implements `R::Delegate`.
    pub fn register_delegate<R: ItemRenderer>(&mut self, delegate: Arc<R::Delegate>) -> ViewTypeId {
        self.registry.register_delegate::<R>(delegate, &self.types)
    }

    /// Registers renderer type `R` together with its delegate.
    pub fn register_renderer_with_delegate<R: ItemRenderer>(
        &mut self,
        delegate: Arc<R::Delegate>,
    ) -> ViewTypeId {
        self.register_renderer::<R>();
        self.register_delegate::<R>(delegate)
    }

    /// Returns the delegate registered for renderer type `R`, if any.
    pub fn delegate_for<R: ItemRenderer>(&self) -> Option<Arc<R::Delegate>> {
        self.registry.delegate_for::<R>(&self.types)
    }

    // -------------------------------------------------------------------------
    // Virtualization surface, driven by the list engine
    // -------------------------------------------------------------------------

    /// Number of records in the current sequence.
    pub fn item_count(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the record sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Resolves the view type id of the record at `position`, minting the
    /// id if this renderer type has not been seen before.
    ///
    /// # Errors
    ///
    /// [`RecyclerError::IndexOutOfBounds`] if `position` is outside the
    /// current sequence.
    pub fn view_type_at(&self, position: usize) -> Result<ViewTypeId> {
        let record = self
            .records
            .get(position)
            .ok_or_else(|| RecyclerError::out_of_bounds(position, self.records.len()))?;
        Ok(self.types.ordinal_of(record.render_type()))
    }

    /// Constructs a new renderer for `view_type`, injecting the delegate
    /// registered for that type (if any) into the creation context.
    ///
    /// # Errors
    ///
    /// [`RecyclerError::RendererNotRegistered`] if no factory was
    /// registered for `view_type`. This is the primary defensive check of
    /// the whole layer: it propagates rather than producing a placeholder
    /// renderer, because an unregistered record kind reaching display is
    /// always an owner configuration bug.
    pub fn create_renderer(
        &self,
        view_type: ViewTypeId,
        parent: ContainerId,
    ) -> Result<Box<dyn DynRenderer>> {
        let factory = match self.registry.factory_for(view_type) {
            Ok(factory) => factory,
            Err(err) => {
                tracing::error!(
                    view_type = %view_type,
                    "create_renderer called for a view type with no registered factory"
                );
                return Err(err);
            }
        };
        Ok(factory.instantiate(parent, self.registry.delegate_entry(view_type)))
    }

    /// Applies the record at `position` into `renderer`.
    ///
    /// No type-compatibility check happens here; the list engine is
    /// trusted to bind a renderer only to positions of its own view type,
    /// which `view_type_at` and `create_renderer` already guaranteed by
    /// construction.
    ///
    /// # Errors
    ///
    /// [`RecyclerError::IndexOutOfBounds`] if `position` is outside the
    /// current sequence.
    pub fn bind_renderer(&self, renderer: &mut dyn DynRenderer, position: usize) -> Result<()> {
        let record = self
            .records
            .get(position)
            .ok_or_else(|| RecyclerError::out_of_bounds(position, self.records.len()))?;
        renderer.bind_record(record.as_ref());
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Record mutations
    // -------------------------------------------------------------------------

    /// Replaces the whole record sequence and emits
    /// [`records_reset`](AdapterSignals::records_reset).
    pub fn set_records(&mut self, records: Vec<Box<dyn ViewRecord>>) {
        self.records = records;
        tracing::trace!(len = self.records.len(), "record sequence replaced");
        self.signals.records_reset.emit(());
    }

    /// Replaces the record at `position` and emits
    /// [`record_changed`](AdapterSignals::record_changed) for it. All
    /// other positions are untouched.
    ///
    /// # Errors
    ///
    /// [`RecyclerError::IndexOutOfBounds`] if `position` is outside the
    /// current sequence.
    pub fn set_record_at(&mut self, record: Box<dyn ViewRecord>, position: usize) -> Result<()> {
        let len = self.records.len();
        let slot = self
            .records
            .get_mut(position)
            .ok_or_else(|| RecyclerError::out_of_bounds(position, len))?;
        *slot = record;
        self.signals.record_changed.emit(position);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The current record sequence, in display order.
    pub fn records(&self) -> &[Box<dyn ViewRecord>] {
        &self.records
    }

    /// The record at `position`, if in bounds.
    pub fn record_at(&self, position: usize) -> Option<&dyn ViewRecord> {
        self.records.get(position).map(|record| record.as_ref())
    }

    /// The invalidation signals the list engine connects to.
    pub fn signals(&self) -> &AdapterSignals {
        &self.signals
    }

    /// The view type registry backing this adapter.
    pub fn type_registry(&self) -> &Arc<ViewTypeRegistry> {
        &self.types
    }

    /// The factory/delegate registry backing this adapter.
    pub fn renderer_registry(&self) -> &RendererRegistry {
        &self.registry
    }
}

impl Default for RecyclerAdapter {
    fn default() -> Self {
        Self::new()
    }
}

static_assertions::assert_impl_all!(RecyclerAdapter: Send, Sync);
