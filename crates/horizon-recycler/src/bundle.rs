//! Bulk registration of renderer types.

use crate::registry::RendererRegistry;
use crate::renderer::ItemRenderer;
use crate::view_type::ViewTypeRegistry;

/// A group of renderer types that register together.
///
/// Implemented for tuples of [`ItemRenderer`] types up to arity 12, so a
/// screen can declare its whole renderer set in one call:
///
/// ```ignore
/// adapter.register_renderers::<(HeadlineRenderer, SeparatorRenderer)>();
/// ```
pub trait RendererBundle {
    /// Registers every renderer type in the bundle.
    fn register_all(registry: &mut RendererRegistry, types: &ViewTypeRegistry);
}

macro_rules! impl_renderer_bundle {
    ($($renderer:ident),+) => {
        impl<$($renderer: ItemRenderer),+> RendererBundle for ($($renderer,)+) {
            fn register_all(registry: &mut RendererRegistry, types: &ViewTypeRegistry) {
                $(registry.register::<$renderer>(types);)+
            }
        }
    };
}

impl_renderer_bundle!(A);
impl_renderer_bundle!(A, B);
impl_renderer_bundle!(A, B, C);
impl_renderer_bundle!(A, B, C, D);
impl_renderer_bundle!(A, B, C, D, E);
impl_renderer_bundle!(A, B, C, D, E, F);
impl_renderer_bundle!(A, B, C, D, E, F, G);
impl_renderer_bundle!(A, B, C, D, E, F, G, H);
impl_renderer_bundle!(A, B, C, D, E, F, G, H, I);
impl_renderer_bundle!(A, B, C, D, E, F, G, H, I, J);
impl_renderer_bundle!(A, B, C, D, E, F, G, H, I, J, K);
impl_renderer_bundle!(A, B, C, D, E, F, G, H, I, J, K, L);

/// Registers one shared delegate for several renderer types at once.
///
/// The delegate expression must be an `Arc`; it is cloned once per
/// renderer type and unsize-coerced to each renderer's declared delegate
/// trait at the expanded call site, so one owner object can serve several
/// renderer kinds as long as it implements each of their delegate traits.
///
/// ```ignore
/// let screen = Arc::new(FeedScreen::default());
/// register_delegates!(adapter, screen, [HeadlineRenderer, PhotoRenderer]);
/// ```
#[macro_export]
macro_rules! register_delegates {
    ($adapter:expr, $delegate:expr, [$($renderer:ty),+ $(,)?]) => {{
        let delegate = $delegate;
        $(
            $adapter.register_delegate::<$renderer>(delegate.clone());
        )+
    }};
}
