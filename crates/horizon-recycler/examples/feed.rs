//! A news-feed style list driven the way a virtualized engine drives the
//! adapter: partition by view type, create on pool miss, bind on every
//! (re)association, react to invalidation signals.
//!
//! Run with:
//!
//! ```sh
//! RUST_LOG=debug cargo run --example feed
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use slotmap::SlotMap;
use tracing_subscriber::EnvFilter;

use horizon_recycler::{
    ContainerId, CreationContext, DynRenderer, ItemRenderer, RecyclerAdapter, ViewRecord,
    ViewTypeId,
};

// -----------------------------------------------------------------------------
// Display data
// -----------------------------------------------------------------------------

struct HeadlineRecord {
    text: String,
}

impl ViewRecord for HeadlineRecord {
    fn render_type(&self) -> TypeId {
        TypeId::of::<HeadlineRenderer>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct SeparatorRecord;

impl ViewRecord for SeparatorRecord {
    fn render_type(&self) -> TypeId {
        TypeId::of::<SeparatorRenderer>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// -----------------------------------------------------------------------------
// Renderers
// -----------------------------------------------------------------------------

trait HeadlineEvents: Send + Sync {
    fn headline_activated(&self, row: usize);
}

struct HeadlineRenderer {
    label: String,
    delegate: Option<Arc<dyn HeadlineEvents>>,
}

impl HeadlineRenderer {
    /// Stand-in for a click arriving from the widget tree.
    fn click(&self, row: usize) {
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

struct SeparatorRenderer;

impl ItemRenderer for SeparatorRenderer {
    type Record = SeparatorRecord;
    type Delegate = ();

    fn create(_ctx: CreationContext<()>) -> Self {
        Self
    }

    fn bind(&mut self, _record: &SeparatorRecord) {}
}

// -----------------------------------------------------------------------------
// Owner
// -----------------------------------------------------------------------------

struct FeedScreen;

impl HeadlineEvents for FeedScreen {
    fn headline_activated(&self, row: usize) {
        println!("screen: headline at row {row} activated");
    }
}

// -----------------------------------------------------------------------------
// Miniature list engine
// -----------------------------------------------------------------------------

struct MiniListEngine {
    widgets: SlotMap<ContainerId, String>,
    root: ContainerId,
    bound: HashMap<usize, (ViewTypeId, Box<dyn DynRenderer>)>,
    created: usize,
}

impl MiniListEngine {
    fn new() -> Self {
        let mut widgets = SlotMap::with_key();
        let root = widgets.insert("feed-root".to_string());
        Self {
            widgets,
            root,
            bound: HashMap::new(),
            created: 0,
        }
    }

    fn fill_window(&mut self, adapter: &RecyclerAdapter, window: std::ops::Range<usize>) {
        println!(
            "engine: window {window:?} of {} items under {:?}",
            adapter.item_count(),
            self.widgets[self.root],
        );
        for position in window {
            let view_type = adapter
                .view_type_at(position)
                .expect("window positions are in bounds");
            let mut entry = match self.bound.remove(&position) {
                Some((bound_type, renderer)) if bound_type == view_type => (bound_type, renderer),
                _ => {
                    self.created += 1;
                    (
                        view_type,
                        adapter
                            .create_renderer(view_type, self.root)
                            .expect("every record kind in the feed is registered"),
                    )
                }
            };
            adapter
                .bind_renderer(entry.1.as_mut(), position)
                .expect("window positions are in bounds");
            self.bound.insert(position, entry);
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let screen = Arc::new(FeedScreen);
    let mut adapter = RecyclerAdapter::new();
    adapter.register_renderers::<(HeadlineRenderer, SeparatorRenderer)>();
    adapter.register_delegate::<HeadlineRenderer>(screen.clone());

    adapter.set_records(vec![
        Box::new(HeadlineRecord {
            text: "Hello there!".into(),
        }),
        Box::new(SeparatorRecord),
        Box::new(HeadlineRecord {
            text: "Goodbye!!".into(),
        }),
    ]);

    let mut engine = MiniListEngine::new();
    adapter
        .signals()
        .records_reset
        .connect(|_| println!("engine: full invalidation"));
    adapter
        .signals()
        .record_changed
        .connect(|position| println!("engine: row {position} invalidated"));

    engine.fill_window(&adapter, 0..adapter.item_count());
    for position in 0..adapter.item_count() {
        let (_, renderer) = &engine.bound[&position];
        if let Some(headline) = renderer.as_any().downcast_ref::<HeadlineRenderer>() {
            println!("row {position}: headline {:?}", headline.label);
        } else {
            println!("row {position}: separator");
        }
    }

    // A click on the first row reaches the screen through the delegate.
    engine.bound[&0]
        .1
        .as_any()
        .downcast_ref::<HeadlineRenderer>()
        .unwrap()
        .click(0);

    // The owner replaces one record; only that row is invalidated.
    adapter
        .set_record_at(
            Box::new(HeadlineRecord {
                text: "Hello again!".into(),
            }),
            0,
        )
        .unwrap();
    engine.fill_window(&adapter, 0..adapter.item_count());
    println!(
        "engine: created {} renderers for {} bind calls",
        engine.created,
        adapter.item_count() * 2,
    );
}
