use std::any::Any;

use crate::{
    core::{id::NodeId, kind::NodeKind},
    geom::{INFINITE, Margin, Padding, Rect, Size},
    layout::{DesiredBounds, Dock, HorizontalAlignment, VerticalAlignment},
    widget::Widget,
};

/// Lifecycle and visibility state for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeFlags {
    /// Must be measured and arranged before the next paint.
    pub needs_layout: bool,
    /// Has completed at least one arrange.
    pub layout_done: bool,
    /// Takes part in layout but is not painted.
    pub hidden: bool,
    /// Skipped entirely by layout, paint and hit testing.
    pub collapsed: bool,
    /// Ignores input and cannot take keyboard focus.
    pub disabled: bool,
    /// Once laid out, invalidation queues the node for an isolated re-layout
    /// instead of dirtying its parent.
    pub virtual_control: bool,
    /// Takes part in tab order.
    pub tabable: bool,
    /// Asks the renderer to fill its background.
    pub draw_background: bool,
    /// Eligible as a hit-test result.
    pub mouse_input: bool,
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self {
            needs_layout: true,
            layout_done: false,
            hidden: false,
            collapsed: false,
            disabled: false,
            virtual_control: false,
            tabable: false,
            draw_background: false,
            mouse_input: true,
        }
    }
}

/// Core node data stored in the arena.
pub struct Node {
    /// Widget behavior. Empty while one of its hooks is running.
    pub(crate) widget: Option<Box<dyn Widget>>,
    /// Widget kind, cached at creation.
    pub(crate) kind: NodeKind,
    /// Maximum child count declared by the widget.
    pub(crate) capacity: Option<usize>,
    /// Optional user-facing name.
    pub(crate) name: Option<String>,
    /// Opaque caller data.
    pub(crate) user_data: Option<Box<dyn Any>>,

    /// Logical parent: the node this one was added to.
    pub(crate) parent: Option<NodeId>,
    /// Physical parent: the node whose child list holds this one.
    pub(crate) actual_parent: Option<NodeId>,
    /// Children in paint order.
    pub(crate) children: Vec<NodeId>,
    /// Inner container that receives children added to this node.
    pub(crate) content_host: Option<NodeId>,

    /// Explicit position and size request.
    pub(crate) desired: DesiredBounds,
    /// Lower size clamp.
    pub(crate) minimum_size: Size,
    /// Upper size clamp.
    pub(crate) maximum_size: Size,
    /// Outer spacing.
    pub(crate) margin: Margin,
    /// Inner spacing.
    pub(crate) padding: Padding,
    /// Horizontal placement in the slot.
    pub(crate) halign: HorizontalAlignment,
    /// Vertical placement in the slot.
    pub(crate) valign: VerticalAlignment,
    /// Docking side.
    pub(crate) dock: Dock,

    /// Result of the last measure, margin included.
    pub(crate) measured: Size,
    /// Arranged rectangle relative to the actual parent.
    pub(crate) bounds: Rect,
    /// Paint rectangle in the node's own coordinates.
    pub(crate) render_bounds: Rect,
    /// Space left for `Fill` children after the rails were consumed.
    pub(crate) inner_bounds: Rect,

    /// Lifecycle flags.
    pub(crate) flags: NodeFlags,
}

impl Node {
    /// Build a detached node around a widget.
    pub(crate) fn new(widget: Box<dyn Widget>) -> Self {
        let kind = widget.kind();
        let capacity = widget.max_children();
        Self {
            widget: Some(widget),
            kind,
            capacity,
            name: None,
            user_data: None,
            parent: None,
            actual_parent: None,
            children: Vec::new(),
            content_host: None,
            desired: DesiredBounds::default(),
            minimum_size: Size::ZERO,
            maximum_size: Size::new(INFINITE, INFINITE),
            margin: Margin::ZERO,
            padding: Padding::ZERO,
            halign: HorizontalAlignment::default(),
            valign: VerticalAlignment::default(),
            dock: Dock::default(),
            measured: Size::ZERO,
            bounds: Rect::zero(),
            render_bounds: Rect::zero(),
            inner_bounds: Rect::zero(),
            flags: NodeFlags::default(),
        }
    }

    /// Return the widget kind.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Return the user-facing name, if set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Return attached user data of type `T`, if present.
    pub fn user_data<T: Any>(&self) -> Option<&T> {
        self.user_data.as_ref().and_then(|d| d.downcast_ref::<T>())
    }

    /// Return the logical parent, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Return the parent whose child list holds this node.
    pub fn actual_parent(&self) -> Option<NodeId> {
        self.actual_parent
    }

    /// Return the node's children in paint order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Return the inner container for new children, if any.
    pub fn content_host(&self) -> Option<NodeId> {
        self.content_host
    }

    /// Return the explicit bounds request.
    pub fn desired(&self) -> DesiredBounds {
        self.desired
    }

    /// Return the minimum size clamp.
    pub fn minimum_size(&self) -> Size {
        self.minimum_size
    }

    /// Return the maximum size clamp.
    pub fn maximum_size(&self) -> Size {
        self.maximum_size
    }

    /// Return the margin.
    pub fn margin(&self) -> Margin {
        self.margin
    }

    /// Return the padding.
    pub fn padding(&self) -> Padding {
        self.padding
    }

    /// Return the docking side.
    pub fn dock(&self) -> Dock {
        self.dock
    }

    /// Return the horizontal alignment.
    pub fn horizontal_alignment(&self) -> HorizontalAlignment {
        self.halign
    }

    /// Return the vertical alignment.
    pub fn vertical_alignment(&self) -> VerticalAlignment {
        self.valign
    }

    /// Alignment used by arrange. Docking implies stretching across the rail:
    /// top and bottom docks span the width, left and right docks span the
    /// height, fill spans both.
    pub fn effective_alignment(&self) -> (HorizontalAlignment, VerticalAlignment) {
        let h = match self.dock {
            Dock::Top | Dock::Bottom | Dock::Fill => HorizontalAlignment::Stretch,
            _ => self.halign,
        };
        let v = match self.dock {
            Dock::Left | Dock::Right | Dock::Fill => VerticalAlignment::Stretch,
            _ => self.valign,
        };
        (h, v)
    }

    /// Return the last measured size, margin included. Only meaningful after a
    /// measure pass.
    pub fn measured_size(&self) -> Size {
        self.measured
    }

    /// Return the arranged rectangle relative to the actual parent. Only
    /// meaningful after an arrange pass.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Return the paint rectangle in the node's own coordinates.
    pub fn render_bounds(&self) -> Rect {
        self.render_bounds
    }

    /// Return the area left for `Fill` children by the docking arranger.
    pub fn inner_bounds(&self) -> Rect {
        self.inner_bounds
    }

    /// Return the lifecycle flags.
    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    /// True if the node must be laid out before the next paint.
    pub fn needs_layout(&self) -> bool {
        self.flags.needs_layout
    }

    /// True if the node is hidden.
    pub fn is_hidden(&self) -> bool {
        self.flags.hidden
    }

    /// True if the node is collapsed.
    pub fn is_collapsed(&self) -> bool {
        self.flags.collapsed
    }
}
