//! End-to-end dispatch through a miniature virtualized list engine.
//!
//! Exercises the full collaboration: an owner registers renderers and
//! delegates, a mock engine drives count/type/create/bind over a visible
//! window, and interaction events flow back to the owner through shared
//! delegates.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::SlotMap;

use horizon_recycler::{
    ContainerId, CreationContext, DynRenderer, ItemRenderer, RecyclerAdapter, ViewRecord,
    ViewTypeId, register_delegates,
};

// -----------------------------------------------------------------------------
// Records
// -----------------------------------------------------------------------------

struct HeadlineRecord {
    text: String,
}

impl HeadlineRecord {
    fn boxed(text: &str) -> Box<dyn ViewRecord> {
        Box::new(Self { text: text.into() })
    }
}

impl ViewRecord for HeadlineRecord {
    fn render_type(&self) -> TypeId {
        TypeId::of::<HeadlineRenderer>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct PhotoRecord {
    caption: String,
}

impl PhotoRecord {
    fn boxed(caption: &str) -> Box<dyn ViewRecord> {
        Box::new(Self {
            caption: caption.into(),
        })
    }
}

impl ViewRecord for PhotoRecord {
    fn render_type(&self) -> TypeId {
        TypeId::of::<PhotoRenderer>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// -----------------------------------------------------------------------------
// Renderers and delegates
// -----------------------------------------------------------------------------

trait HeadlineEvents: Send + Sync {
    fn headline_activated(&self, row: usize);
}

trait PhotoEvents: Send + Sync {
    fn photo_opened(&self, row: usize);
}

struct HeadlineRenderer {
    label: String,
    delegate: Option<Arc<dyn HeadlineEvents>>,
}

impl HeadlineRenderer {
    fn activate(&self, row: usize) {
        if let Some(delegate) = &self.delegate {
            delegate.headline_activated(row);
        }
    }
}

impl ItemRenderer for HeadlineRenderer {
    type Record = HeadlineRecord;
    type Delegate = dyn HeadlineEvents;

    fn create(ctx: CreationContext<Self::Delegate>) -> Self {
        Self {
            label: String::new(),
            delegate: ctx.delegate,
        }
    }

    fn bind(&mut self, record: &HeadlineRecord) {
        self.label = record.text.clone();
    }
}

struct PhotoRenderer {
    caption: String,
    delegate: Option<Arc<dyn PhotoEvents>>,
}

impl ItemRenderer for PhotoRenderer {
    type Record = PhotoRecord;
    type Delegate = dyn PhotoEvents;

    fn create(ctx: CreationContext<Self::Delegate>) -> Self {
        Self {
            caption: String::new(),
            delegate: ctx.delegate,
        }
    }

    fn bind(&mut self, record: &PhotoRecord) {
        self.caption = record.caption.clone();
    }
}

/// One owner implementing both delegate traits, shared across both
/// renderer kinds.
#[derive(Default)]
struct FeedScreen {
    headline_rows: Mutex<Vec<usize>>,
    photo_rows: Mutex<Vec<usize>>,
}

impl HeadlineEvents for FeedScreen {
    fn headline_activated(&self, row: usize) {
        self.headline_rows.lock().push(row);
    }
}

impl PhotoEvents for FeedScreen {
    fn photo_opened(&self, row: usize) {
        self.photo_rows.lock().push(row);
    }
}

// -----------------------------------------------------------------------------
// Miniature list engine
// -----------------------------------------------------------------------------

/// The virtualization half this crate leaves to its collaborator, shrunk
/// to the essentials: a widget arena for container handles and a map of
/// bound positions, refilled from the adapter on demand.
struct MiniListEngine {
    widgets: SlotMap<ContainerId, &'static str>,
    root: ContainerId,
    bound: HashMap<usize, (ViewTypeId, Box<dyn DynRenderer>)>,
}

impl MiniListEngine {
    fn new() -> Self {
        let mut widgets = SlotMap::with_key();
        let root = widgets.insert("list-root");
        Self {
            widgets,
            root,
            bound: HashMap::new(),
        }
    }

    /// Creates-or-reuses and binds a renderer for every position in the
    /// visible window, the way a real engine does on scroll or reset.
    fn fill_window(&mut self, adapter: &RecyclerAdapter, window: std::ops::Range<usize>) {
        assert!(self.widgets.contains_key(self.root));
        for position in window {
            let view_type = adapter.view_type_at(position).unwrap();
            let mut entry = match self.bound.remove(&position) {
                Some((bound_type, renderer)) if bound_type == view_type => (bound_type, renderer),
                _ => (
                    view_type,
                    adapter.create_renderer(view_type, self.root).unwrap(),
                ),
            };
            adapter.bind_renderer(entry.1.as_mut(), position).unwrap();
            self.bound.insert(position, entry);
        }
    }

    fn renderer_at(&self, position: usize) -> &dyn DynRenderer {
        self.bound[&position].1.as_ref()
    }
}

fn feed_adapter(screen: &Arc<FeedScreen>) -> RecyclerAdapter {
    let mut adapter = RecyclerAdapter::new();
    adapter.register_renderers::<(HeadlineRenderer, PhotoRenderer)>();
    register_delegates!(adapter, screen.clone(), [HeadlineRenderer, PhotoRenderer]);
    adapter
}

#[test]
fn engine_binds_each_record_to_its_own_renderer_kind() {
    let screen = Arc::new(FeedScreen::default());
    let mut adapter = feed_adapter(&screen);
    adapter.set_records(vec![
        HeadlineRecord::boxed("breaking"),
        PhotoRecord::boxed("sunset"),
        HeadlineRecord::boxed("follow-up"),
    ]);

    let mut engine = MiniListEngine::new();
    engine.fill_window(&adapter, 0..adapter.item_count());

    let headline = engine
        .renderer_at(0)
        .as_any()
        .downcast_ref::<HeadlineRenderer>()
        .unwrap();
    assert_eq!(headline.label, "breaking");

    let photo = engine
        .renderer_at(1)
        .as_any()
        .downcast_ref::<PhotoRenderer>()
        .unwrap();
    assert_eq!(photo.caption, "sunset");

    let headline = engine
        .renderer_at(2)
        .as_any()
        .downcast_ref::<HeadlineRenderer>()
        .unwrap();
    assert_eq!(headline.label, "follow-up");
}

#[test]
fn shared_delegate_receives_events_from_both_renderer_kinds() {
    let screen = Arc::new(FeedScreen::default());
    let mut adapter = feed_adapter(&screen);
    adapter.set_records(vec![HeadlineRecord::boxed("a"), PhotoRecord::boxed("b")]);

    assert!(adapter.delegate_for::<HeadlineRenderer>().is_some());
    assert!(adapter.delegate_for::<PhotoRenderer>().is_some());

    let mut engine = MiniListEngine::new();
    engine.fill_window(&adapter, 0..2);

    engine
        .renderer_at(0)
        .as_any()
        .downcast_ref::<HeadlineRenderer>()
        .unwrap()
        .activate(0);
    engine
        .renderer_at(1)
        .as_any()
        .downcast_ref::<PhotoRenderer>()
        .unwrap()
        .delegate
        .as_ref()
        .unwrap()
        .photo_opened(1);

    assert_eq!(*screen.headline_rows.lock(), vec![0]);
    assert_eq!(*screen.photo_rows.lock(), vec![1]);
}

#[test]
fn reset_signal_drives_engine_rebind() {
    let screen = Arc::new(FeedScreen::default());
    let mut adapter = feed_adapter(&screen);
    adapter.set_records(vec![HeadlineRecord::boxed("before")]);

    let resets = Arc::new(Mutex::new(0usize));
    let recv = resets.clone();
    adapter.signals().records_reset.connect(move |_| {
        *recv.lock() += 1;
    });

    let mut engine = MiniListEngine::new();
    engine.fill_window(&adapter, 0..1);

    adapter.set_records(vec![HeadlineRecord::boxed("after")]);
    assert_eq!(*resets.lock(), 1);

    // The engine reacts to the reset by rebinding its window; the pooled
    // renderer of the same view type is reused, not recreated.
    engine.fill_window(&adapter, 0..1);
    let headline = engine
        .renderer_at(0)
        .as_any()
        .downcast_ref::<HeadlineRenderer>()
        .unwrap();
    assert_eq!(headline.label, "after");
}

#[test]
fn narrow_change_signal_carries_the_position() {
    let screen = Arc::new(FeedScreen::default());
    let mut adapter = feed_adapter(&screen);
    adapter.set_records(vec![HeadlineRecord::boxed("a"), HeadlineRecord::boxed("b")]);

    let changed = Arc::new(Mutex::new(Vec::new()));
    let recv = changed.clone();
    adapter.signals().record_changed.connect(move |position| {
        recv.lock().push(*position);
    });

    adapter
        .set_record_at(HeadlineRecord::boxed("b2"), 1)
        .unwrap();
    assert_eq!(*changed.lock(), vec![1]);

    let mut engine = MiniListEngine::new();
    engine.fill_window(&adapter, 1..2);
    let headline = engine
        .renderer_at(1)
        .as_any()
        .downcast_ref::<HeadlineRenderer>()
        .unwrap();
    assert_eq!(headline.label, "b2");
}
