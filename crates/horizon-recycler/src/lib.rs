//! Horizon Recycler - type-dispatched renderer binding for virtualized,
//! recycling list views.
//!
//! A virtualized list engine keeps only the visible rows alive and
//! recycles off-screen renderers by "view type". This crate provides the
//! dispatch layer between such an engine and heterogeneous display data:
//!
//! - [`ViewTypeRegistry`]: assigns each renderer type a stable small
//!   integer id the first time it is seen
//! - [`RendererRegistry`]: maps an id to the factory that builds the
//!   renderer for that type, and to an optional per-type delegate
//! - [`RecyclerAdapter`]: answers the engine's virtualization callbacks
//!   (item count, position→view type, renderer creation, renderer
//!   binding) and broadcasts invalidation signals on data changes
//! - [`ItemRenderer`] / [`ViewRecord`]: the contracts renderer authors
//!   and data owners implement
//!
//! # Example
//!
//! ```
//! use std::any::{Any, TypeId};
//! use horizon_recycler::{
//!     ContainerId, CreationContext, ItemRenderer, RecyclerAdapter, ViewRecord,
//! };
//!
//! struct Headline { text: String }
//!
//! impl ViewRecord for Headline {
//!     fn render_type(&self) -> TypeId { TypeId::of::<HeadlineRenderer>() }
//!     fn as_any(&self) -> &dyn Any { self }
//! }
//!
//! struct HeadlineRenderer { label: String }
//!
//! impl ItemRenderer for HeadlineRenderer {
//!     type Record = Headline;
//!     type Delegate = ();
//!
//!     fn create(_ctx: CreationContext<()>) -> Self {
//!         Self { label: String::new() }
//!     }
//!
//!     fn bind(&mut self, record: &Headline) {
//!         self.label = record.text.clone();
//!     }
//! }
//!
//! # fn main() -> horizon_recycler::Result<()> {
//! let mut adapter = RecyclerAdapter::new();
//! adapter.register_renderer::<HeadlineRenderer>();
//! adapter.set_records(vec![Box::new(Headline { text: "Hello".into() })]);
//!
//! // What the list engine does for each visible position:
//! let view_type = adapter.view_type_at(0)?;
//! let mut renderer = adapter.create_renderer(view_type, ContainerId::default())?;
//! adapter.bind_renderer(renderer.as_mut(), 0)?;
//! # Ok(())
//! # }
//! ```
//!
//! # What this crate does not do
//!
//! Renderer pooling, scrolling, layout, and painting belong to the list
//! engine and widget toolkit hosting it. This crate never destroys or
//! pools renderers; it only guarantees that rebinding a renderer to a new
//! record of its own type is always valid.

mod adapter;
mod bundle;
mod error;
mod registry;
mod renderer;
mod signal;
mod view_type;

pub use adapter::{AdapterSignals, RecyclerAdapter};
pub use bundle::RendererBundle;
pub use error::{RecyclerError, Result};
pub use registry::{RendererFactory, RendererRegistry};
pub use renderer::{ContainerId, CreationContext, DynRenderer, ItemRenderer, ViewRecord};
pub use signal::{ConnectionId, Signal};
pub use view_type::{ViewTypeId, ViewTypeRegistry};
