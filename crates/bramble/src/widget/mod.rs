//! The widget trait: behavior attached to nodes in the [`Core`](crate::Core) arena.

use std::any::Any;

use crate::{
    core::kind::NodeKind,
    error::Result,
    geom::{Rect, Size},
    layout::{Context, dock},
    render::{RenderView, Renderer},
};

/// Widgets are the behavior attached to nodes.
///
/// Every hook has a default, so an empty `impl Widget for T {}` is a docking
/// container. Leaf widgets usually override [`measure`](Self::measure) to report
/// their natural size. During a hook call the widget is taken out of its node,
/// so the hook may freely mutate the rest of the tree through the context.
pub trait Widget: Any {
    /// Report the natural size for this node given a budget that already excludes
    /// the node's margin. The budget may be unbounded on either axis. The returned
    /// size must be finite.
    fn measure(&mut self, ctx: &mut Context<'_>, available: Size) -> Result<Size> {
        dock::measure(ctx, available)
    }

    /// Place children inside `size` (margin excluded) and return the size the
    /// node actually occupies.
    fn arrange(&mut self, ctx: &mut Context<'_>, size: Size) -> Result<Size> {
        dock::arrange(ctx, size)
    }

    /// Paint this node. Does not paint children.
    fn render(&mut self, renderer: &mut dyn Renderer, view: &RenderView) -> Result<()> {
        renderer.draw(view)
    }

    /// Per-frame hook, run before layout.
    fn think(&mut self, _ctx: &mut Context<'_>) -> Result<()> {
        Ok(())
    }

    /// Called whenever arrange or an explicit reposition changes the bounds.
    fn on_bounds_changed(&mut self, _ctx: &mut Context<'_>, _old: Rect, _new: Rect) -> Result<()> {
        Ok(())
    }

    /// Called once, children first, immediately before the node leaves the arena.
    fn on_dispose(&mut self, _ctx: &mut Context<'_>) {}

    /// Upper bound on the number of children, for fixed-capacity containers.
    fn max_children(&self) -> Option<usize> {
        None
    }

    /// Kind used for dumps and traces.
    fn kind(&self) -> NodeKind {
        NodeKind::of::<Self>()
    }
}

/// Convert widgets into boxed trait objects.
impl<W> From<W> for Box<dyn Widget>
where
    W: Widget + 'static,
{
    fn from(widget: W) -> Self {
        Box::new(widget)
    }
}
