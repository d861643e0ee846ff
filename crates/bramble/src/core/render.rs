use crate::{
    core::{Core, focus::FocusManager, id::NodeId, kind::NodeKind},
    error::Result,
    geom::{Point, Rect},
};

/// The trait implemented by paint backends.
///
/// The tree is painted in pre-order: a node is drawn before its children, and
/// siblings are drawn in child order so later siblings appear on top.
pub trait Renderer {
    /// Paint a single node.
    fn draw(&mut self, view: &RenderView) -> Result<()>;
}

/// Everything a renderer needs to paint one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderView {
    /// Node being painted.
    pub node: NodeId,
    /// Widget kind.
    pub kind: NodeKind,
    /// User-facing name, if set.
    pub name: Option<String>,
    /// Bounds relative to the actual parent.
    pub bounds: Rect,
    /// Paint rectangle in the node's own coordinates.
    pub render_bounds: Rect,
    /// Bounds in root coordinates.
    pub screen: Rect,
    /// Fill the background.
    pub draw_background: bool,
    /// The node or an ancestor is disabled.
    pub disabled: bool,
    /// The node holds keyboard focus.
    pub focused: bool,
}

/// Paint every visible node under the root. Hidden and collapsed subtrees are
/// skipped.
pub(crate) fn render_tree(core: &mut Core, renderer: &mut dyn Renderer) -> Result<()> {
    let mut stack = vec![(core.root_id(), Point::zero(), false)];
    while let Some((id, origin, parent_disabled)) = stack.pop() {
        let Some(node) = core.node(id) else {
            continue;
        };
        if node.flags.hidden || node.flags.collapsed {
            continue;
        }
        let screen = node.bounds.offset(origin.x, origin.y);
        let disabled = parent_disabled || node.flags.disabled;
        let view = RenderView {
            node: id,
            kind: node.kind.clone(),
            name: node.name.clone(),
            bounds: node.bounds,
            render_bounds: node.render_bounds,
            screen,
            draw_background: node.flags.draw_background,
            disabled,
            focused: core.is_focused(id),
        };
        let children = node.children.clone();
        core.with_widget_mut(id, |widget, _| widget.render(&mut *renderer, &view))??;
        stack.extend(
            children
                .into_iter()
                .rev()
                .map(|child| (child, screen.origin(), disabled)),
        );
    }
    Ok(())
}
