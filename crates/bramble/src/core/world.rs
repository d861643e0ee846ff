#[cfg(debug_assertions)]
use std::collections::HashSet;
use std::{any::Any, mem};

use indexmap::IndexSet;
use slotmap::SlotMap;
use tracing::{debug, trace};

use crate::{
    core::{
        focus::{FocusManager, TabTracker},
        id::NodeId,
        invalidate::Invalidation,
        kind::NodeKind,
        node::Node,
    },
    error::{Error, Result},
    geom::{Margin, Padding, Point, Rect, Size},
    layout::{Context, Dock, HorizontalAlignment, VerticalAlignment},
    widget::Widget,
};

/// The node arena, tree structure and layout state.
///
/// `Core` owns every node. Parents own their children through handle lists;
/// the parent fields on a node are plain back-references. Exactly one node, the
/// root, has no parent and is never disposed.
pub struct Core {
    /// Node storage arena.
    pub(crate) nodes: SlotMap<NodeId, Node>,
    /// Root node ID.
    pub(crate) root: NodeId,
    /// Laid-out virtual nodes waiting for an isolated re-layout.
    pub(crate) deferred_measure: IndexSet<NodeId>,
    /// Detached nodes destroyed at the next frame boundary.
    pub(crate) pending_disposal: Vec<NodeId>,
    /// Node holding keyboard focus.
    pub(crate) keyboard_focus: Option<NodeId>,
    /// Node under the pointer.
    pub(crate) hovered: Option<NodeId>,
    /// Node receiving pointer events regardless of position.
    pub(crate) mouse_capture: Option<NodeId>,
    /// Tab-order candidates gathered during the last frame walk.
    pub(crate) tab: TabTracker,
    /// True while a think, layout or paint pass walks the tree.
    pub(crate) pass_active: bool,
}

impl Default for Core {
    fn default() -> Self {
        Self::new()
    }
}

impl Core {
    /// Create a new Core holding only the root node.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new(Box::new(RootContainer)));
        Self {
            nodes,
            root,
            deferred_measure: IndexSet::new(),
            pending_disposal: Vec::new(),
            keyboard_focus: None,
            hovered: None,
            mouse_capture: None,
            tab: TabTracker::default(),
            pass_active: false,
        }
    }

    /// Return the root node id.
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// Return a reference to a node by id.
    pub fn node(&self, node: NodeId) -> Option<&Node> {
        self.nodes.get(node)
    }

    /// Return a node or [`Error::NodeNotFound`].
    pub fn get(&self, node: NodeId) -> Result<&Node> {
        self.nodes.get(node).ok_or(Error::NodeNotFound(node))
    }

    /// Return a mutable node or [`Error::NodeNotFound`].
    pub(crate) fn get_mut(&mut self, node: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(node).ok_or(Error::NodeNotFound(node))
    }

    /// True if the handle resolves to a live node.
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    /// Number of live nodes, the root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// True while a think, layout or paint pass is walking the tree.
    pub fn is_pass_active(&self) -> bool {
        self.pass_active
    }

    /// Nodes queued for disposal at the next frame boundary.
    pub fn pending_disposal(&self) -> &[NodeId] {
        &self.pending_disposal
    }

    /// Take a node's widget out of its slot for the duration of one call.
    ///
    /// The widget goes back afterwards unless the node was removed meanwhile.
    pub(crate) fn with_widget_mut<R>(
        &mut self,
        node: NodeId,
        f: impl FnOnce(&mut dyn Widget, &mut Self) -> R,
    ) -> Result<R> {
        let mut widget = self
            .get_mut(node)?
            .widget
            .take()
            .ok_or(Error::ReentrantWidget(node))?;
        let out = f(widget.as_mut(), self);
        if let Some(slot) = self.nodes.get_mut(node)
            && slot.widget.is_none()
        {
            slot.widget = Some(widget);
        }
        Ok(out)
    }

    /// Create a node in the arena detached from the tree.
    pub fn create_detached<W>(&mut self, widget: W) -> NodeId
    where
        W: Widget + 'static,
    {
        self.create_detached_boxed(Box::new(widget))
    }

    /// Create a node in the arena detached from the tree using a boxed widget.
    pub fn create_detached_boxed(&mut self, widget: Box<dyn Widget>) -> NodeId {
        let node = Node::new(widget);
        let kind = node.kind.clone();
        let id = self.nodes.insert(node);
        trace!(?id, %kind, "create");
        id
    }

    /// Create a node and attach it under `parent`.
    pub fn add_child<W>(&mut self, parent: NodeId, widget: W) -> Result<NodeId>
    where
        W: Widget + 'static,
    {
        self.add_child_boxed(parent, Box::new(widget))
    }

    /// Create a node from a boxed widget and attach it under `parent`. The node is
    /// discarded if the attach fails.
    pub fn add_child_boxed(&mut self, parent: NodeId, widget: Box<dyn Widget>) -> Result<NodeId> {
        let child = self.create_detached_boxed(widget);
        if let Err(e) = self.attach(parent, child) {
            self.nodes.remove(child);
            return Err(e);
        }
        Ok(child)
    }

    /// Attach a detached node under `parent`.
    ///
    /// If `parent` has a content host the child is physically placed under the
    /// host while still reporting `parent` as its logical parent. Both the child
    /// and its new actual parent are invalidated.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let host = self.get(parent)?.content_host.unwrap_or(parent);
        if child == self.root {
            return Err(Error::InvalidOperation("the root cannot be attached".into()));
        }
        if self.get(child)?.actual_parent.is_some() {
            return Err(Error::AlreadyAttached(child));
        }
        if self.pending_disposal.contains(&child) {
            return Err(Error::InvalidOperation(format!(
                "{child:?} is queued for disposal"
            )));
        }
        let host_node = self.get(host)?;
        if host == child || self.is_ancestor(child, host) {
            return Err(Error::WouldCreateCycle { parent: host, child });
        }
        if let Some(capacity) = host_node.capacity
            && host_node.children.len() >= capacity
        {
            return Err(Error::ChildCapacity {
                parent: host,
                capacity,
            });
        }

        self.get_mut(host)?.children.push(child);
        let node = self.get_mut(child)?;
        node.parent = Some(parent);
        node.actual_parent = Some(host);
        trace!(?parent, ?host, ?child, "attach");
        self.invalidate(child);
        // A laid-out virtual child only queues itself, so the host must be told
        // to place it.
        self.invalidate(host);
        Ok(())
    }

    /// Detach a node from its parent, if attached. The former parent is
    /// invalidated.
    pub fn detach(&mut self, node: NodeId) -> Result<()> {
        self.get(node)?;
        self.unlink(node);
        Ok(())
    }

    /// Detach `child` from `parent`, which may be either its logical or its
    /// actual parent. The child stays alive in the arena.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let node = self.get(child)?;
        if node.parent != Some(parent) && node.actual_parent != Some(parent) {
            return Err(Error::InvalidOperation(format!(
                "{child:?} is not a child of {parent:?}"
            )));
        }
        self.unlink(child);
        Ok(())
    }

    /// Remove a node from its actual parent's child list and clear both parent
    /// references.
    fn unlink(&mut self, node: NodeId) {
        let Some(parent) = self.nodes.get(node).and_then(|n| n.actual_parent) else {
            return;
        };
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.retain(|c| *c != node);
        }
        if let Some(n) = self.nodes.get_mut(node) {
            n.parent = None;
            n.actual_parent = None;
        }
        self.invalidate(parent);
    }

    /// Move a node to `index` within its parent's child list. Indices past the end
    /// move it to the end.
    pub fn set_child_index(&mut self, node: NodeId, index: usize) -> Result<()> {
        let parent = self
            .get(node)?
            .actual_parent
            .ok_or_else(|| Error::InvalidOperation(format!("{node:?} has no parent")))?;
        let children = &mut self.get_mut(parent)?.children;
        children.retain(|c| *c != node);
        let index = index.min(children.len());
        children.insert(index, node);
        self.invalidate(parent);
        Ok(())
    }

    /// Paint a node last among its siblings.
    pub fn bring_to_front(&mut self, node: NodeId) -> Result<()> {
        self.set_child_index(node, usize::MAX)
    }

    /// Paint a node first among its siblings.
    pub fn send_to_back(&mut self, node: NodeId) -> Result<()> {
        self.set_child_index(node, 0)
    }

    /// Return true if `ancestor` appears in the actual parent chain of `node`,
    /// or is `node` itself.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.actual_parent);
        }
        false
    }

    /// Return true if `node` is connected to the root.
    pub fn is_attached_to_root(&self, node: NodeId) -> bool {
        self.is_ancestor(self.root, node)
    }

    /// The root orchestrator a node belongs to, or `None` for detached subtrees.
    pub fn canvas_of(&self, node: NodeId) -> Option<NodeId> {
        self.is_attached_to_root(node).then_some(self.root)
    }

    /// Find a child by name. Direct children are checked before descending when
    /// `recursive` is set.
    pub fn find_child(&self, parent: NodeId, name: &str, recursive: bool) -> Option<NodeId> {
        let node = self.nodes.get(parent)?;
        let direct = node.children.iter().copied().find(|c| {
            self.nodes
                .get(*c)
                .is_some_and(|n| n.name.as_deref() == Some(name))
        });
        if direct.is_some() || !recursive {
            return direct;
        }
        node.children
            .iter()
            .find_map(|c| self.find_child(*c, name, true))
    }

    /// Set or clear a node's user-facing name.
    pub fn set_name(&mut self, node: NodeId, name: Option<&str>) -> Result<()> {
        self.get_mut(node)?.name = name.map(str::to_owned);
        Ok(())
    }

    /// Return the widget kind of a node.
    pub fn kind(&self, node: NodeId) -> Result<&NodeKind> {
        Ok(&self.get(node)?.kind)
    }

    /// Attach opaque user data, replacing anything stored before.
    pub fn set_user_data<T: Any>(&mut self, node: NodeId, data: T) -> Result<()> {
        self.get_mut(node)?.user_data = Some(Box::new(data));
        Ok(())
    }

    /// Remove and return user data of type `T`. Data of another type is left in
    /// place.
    pub fn take_user_data<T: Any>(&mut self, node: NodeId) -> Result<Option<T>> {
        let n = self.get_mut(node)?;
        match n.user_data.take().map(|d| d.downcast::<T>()) {
            Some(Ok(data)) => Ok(Some(*data)),
            Some(Err(other)) => {
                n.user_data = Some(other);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Route future children of `node` to `host`, an existing descendant.
    /// `None` restores direct attachment.
    pub fn set_content_host(&mut self, node: NodeId, host: Option<NodeId>) -> Result<()> {
        if let Some(host) = host {
            self.get(host)?;
            if host == node || !self.is_ancestor(node, host) {
                return Err(Error::InvalidOperation(format!(
                    "{host:?} is not a descendant of {node:?}"
                )));
            }
        }
        self.get_mut(node)?.content_host = host;
        Ok(())
    }

    /// Request an explicit size. Negative values become zero and the result is
    /// clamped into the node's min/max.
    pub fn set_size(&mut self, node: NodeId, size: Size) -> Result<()> {
        let n = self.get_mut(node)?;
        let size = size.non_negative().clamp(n.minimum_size, n.maximum_size);
        n.desired.width = Some(size.w);
        n.desired.height = Some(size.h);
        self.invalidate(node);
        Ok(())
    }

    /// Request an explicit size per axis. `None` returns that axis to automatic
    /// sizing; values are clamped like [`set_size`](Self::set_size).
    pub fn set_desired_size(
        &mut self,
        node: NodeId,
        width: Option<i32>,
        height: Option<i32>,
    ) -> Result<()> {
        let n = self.get_mut(node)?;
        let (min, max) = (n.minimum_size, n.maximum_size);
        n.desired.width = width.map(|w| w.max(0).clamp(min.w.min(max.w), max.w));
        n.desired.height = height.map(|h| h.max(0).clamp(min.h.min(max.h), max.h));
        self.invalidate(node);
        Ok(())
    }

    /// Request an explicit width, clamped like [`set_size`](Self::set_size).
    pub fn set_width(&mut self, node: NodeId, width: i32) -> Result<()> {
        let n = self.get_mut(node)?;
        let w = width
            .max(0)
            .clamp(n.minimum_size.w.min(n.maximum_size.w), n.maximum_size.w);
        n.desired.width = Some(w);
        self.invalidate(node);
        Ok(())
    }

    /// Request an explicit height, clamped like [`set_size`](Self::set_size).
    pub fn set_height(&mut self, node: NodeId, height: i32) -> Result<()> {
        let n = self.get_mut(node)?;
        let h = height
            .max(0)
            .clamp(n.minimum_size.h.min(n.maximum_size.h), n.maximum_size.h);
        n.desired.height = Some(h);
        self.invalidate(node);
        Ok(())
    }

    /// Return both axes to automatic sizing.
    pub fn clear_size(&mut self, node: NodeId) -> Result<()> {
        let n = self.get_mut(node)?;
        n.desired.width = None;
        n.desired.height = None;
        self.invalidate(node);
        Ok(())
    }

    /// Move a node to an explicit offset inside its parent's padded area. The
    /// bounds move immediately; the parent is invalidated.
    pub fn set_position(&mut self, node: NodeId, x: i32, y: i32) -> Result<()> {
        let n = self.get_mut(node)?;
        n.desired.x = x;
        n.desired.y = y;
        let (margin, size, parent) = (n.margin, n.bounds.size(), n.actual_parent);
        let pad = match parent {
            Some(p) => self.get(p)?.padding,
            None => Padding::ZERO,
        };
        let origin = Point::new(x, y) + Point::new(pad.left + margin.left, pad.top + margin.top);
        self.set_bounds(node, Rect::from_parts(origin, size))?;
        self.invalidate_parent(node);
        Ok(())
    }

    /// Set the lower size clamp.
    pub fn set_minimum_size(&mut self, node: NodeId, size: Size) -> Result<()> {
        self.get_mut(node)?.minimum_size = size.non_negative();
        self.invalidate(node);
        Ok(())
    }

    /// Set the upper size clamp.
    pub fn set_maximum_size(&mut self, node: NodeId, size: Size) -> Result<()> {
        self.get_mut(node)?.maximum_size = size.non_negative();
        self.invalidate(node);
        Ok(())
    }

    /// Set the margin. Only the parent's placement changes, so only the parent is
    /// invalidated.
    pub fn set_margin(&mut self, node: NodeId, margin: Margin) -> Result<()> {
        self.get_mut(node)?.margin = margin.non_negative();
        self.invalidate_parent(node);
        Ok(())
    }

    /// Set the padding.
    pub fn set_padding(&mut self, node: NodeId, padding: Padding) -> Result<()> {
        self.get_mut(node)?.padding = padding.non_negative();
        self.invalidate(node);
        Ok(())
    }

    /// Set the docking side.
    pub fn set_dock(&mut self, node: NodeId, dock: Dock) -> Result<()> {
        let n = self.get_mut(node)?;
        if n.dock != dock {
            n.dock = dock;
            self.invalidate_parent(node);
        }
        Ok(())
    }

    /// Set the horizontal alignment.
    pub fn set_horizontal_alignment(
        &mut self,
        node: NodeId,
        align: HorizontalAlignment,
    ) -> Result<()> {
        let n = self.get_mut(node)?;
        if n.halign != align {
            n.halign = align;
            self.invalidate_parent(node);
        }
        Ok(())
    }

    /// Set the vertical alignment.
    pub fn set_vertical_alignment(&mut self, node: NodeId, align: VerticalAlignment) -> Result<()> {
        let n = self.get_mut(node)?;
        if n.valign != align {
            n.valign = align;
            self.invalidate_parent(node);
        }
        Ok(())
    }

    /// Collapse or restore a node. Collapsed nodes drop out of layout entirely.
    pub fn set_collapsed(&mut self, node: NodeId, collapsed: bool) -> Result<()> {
        let n = self.get_mut(node)?;
        if n.flags.collapsed == collapsed {
            return Ok(());
        }
        n.flags.collapsed = collapsed;
        if !collapsed {
            self.invalidate(node);
        }
        self.invalidate_parent(node);
        Ok(())
    }

    /// Hide or show a node. Hidden nodes keep their layout but are not painted.
    pub fn set_hidden(&mut self, node: NodeId, hidden: bool) -> Result<()> {
        self.get_mut(node)?.flags.hidden = hidden;
        if hidden {
            self.drop_focus_within(node);
        }
        Ok(())
    }

    /// Enable or disable a node.
    pub fn set_disabled(&mut self, node: NodeId, disabled: bool) -> Result<()> {
        self.get_mut(node)?.flags.disabled = disabled;
        if disabled {
            self.drop_focus_within(node);
        }
        Ok(())
    }

    /// Opt a node in or out of tab order.
    pub fn set_tabable(&mut self, node: NodeId, tabable: bool) -> Result<()> {
        self.get_mut(node)?.flags.tabable = tabable;
        Ok(())
    }

    /// Opt a node in or out of hit testing.
    pub fn set_mouse_input(&mut self, node: NodeId, enabled: bool) -> Result<()> {
        self.get_mut(node)?.flags.mouse_input = enabled;
        Ok(())
    }

    /// Ask the renderer to fill the node's background.
    pub fn set_draw_background(&mut self, node: NodeId, draw: bool) -> Result<()> {
        self.get_mut(node)?.flags.draw_background = draw;
        Ok(())
    }

    /// Opt a node in or out of the deferred re-layout path.
    pub fn set_virtual(&mut self, node: NodeId, virtual_control: bool) -> Result<()> {
        self.get_mut(node)?.flags.virtual_control = virtual_control;
        // A queued node that stops being virtual goes through the normal bubble.
        if !virtual_control && self.deferred_measure.shift_remove(&node) {
            self.invalidate(node);
        }
        Ok(())
    }

    /// Clear keyboard focus if it sits inside the subtree at `node`.
    fn drop_focus_within(&mut self, node: NodeId) {
        if self
            .keyboard_focus
            .is_some_and(|focus| self.is_ancestor(node, focus))
        {
            self.keyboard_focus = None;
        }
    }

    /// The single mutation path for bounds. Returns `true` if they changed, in
    /// which case the widget's `on_bounds_changed` hook runs (unless the widget is
    /// the one currently executing).
    pub fn set_bounds(&mut self, node: NodeId, bounds: Rect) -> Result<bool> {
        let n = self.get_mut(node)?;
        let old = n.bounds;
        if old == bounds {
            return Ok(false);
        }
        n.bounds = bounds;
        n.render_bounds = Rect::from_size(bounds.size());
        if n.widget.is_some() {
            self.with_widget_mut(node, |widget, core| {
                let mut ctx = Context::new(core, node);
                widget.on_bounds_changed(&mut ctx, old, bounds)
            })??;
        }
        Ok(true)
    }

    /// A node's bounds in root coordinates, or `None` if it is not attached.
    pub fn screen_bounds(&self, node: NodeId) -> Option<Rect> {
        let mut rect = self.nodes.get(node)?.bounds;
        let mut current = self.nodes.get(node)?.actual_parent;
        while let Some(id) = current {
            let parent = self.nodes.get(id)?;
            rect = rect.offset(parent.bounds.x, parent.bounds.y);
            current = parent.actual_parent;
        }
        self.is_attached_to_root(node).then_some(rect)
    }

    /// Dispose a node and its subtree.
    ///
    /// Children go first, each widget's `on_dispose` runs, and every tracker
    /// that pointed into the subtree is cleared. While a pass is walking the tree
    /// this degrades to [`delayed_delete`](Self::delayed_delete). Disposing a
    /// handle twice is [`Error::AlreadyDisposed`].
    pub fn dispose(&mut self, node: NodeId) -> Result<()> {
        if !self.nodes.contains_key(node) {
            return Err(Error::AlreadyDisposed(node));
        }
        if node == self.root {
            return Err(Error::InvalidOperation("the root cannot be disposed".into()));
        }
        if self.pass_active {
            return self.delayed_delete(node);
        }
        self.dispose_now(node)
    }

    /// Detach a node now and dispose it at the next frame boundary.
    pub fn delayed_delete(&mut self, node: NodeId) -> Result<()> {
        if !self.nodes.contains_key(node) {
            return Err(Error::AlreadyDisposed(node));
        }
        if node == self.root {
            return Err(Error::InvalidOperation("the root cannot be disposed".into()));
        }
        if self.pending_disposal.contains(&node) {
            return Ok(());
        }
        self.unlink(node);
        self.pending_disposal.push(node);
        trace!(?node, "queued for disposal");
        Ok(())
    }

    /// Dispose everything queued by [`delayed_delete`](Self::delayed_delete).
    /// Returns the number of subtrees disposed.
    pub(crate) fn drain_pending_disposal(&mut self) -> Result<usize> {
        let pending = mem::take(&mut self.pending_disposal);
        let mut disposed = 0;
        for node in pending {
            if self.nodes.contains_key(node) {
                self.dispose_now(node)?;
                disposed += 1;
            }
        }
        if disposed > 0 {
            debug!(disposed, "drained disposal queue");
        }
        Ok(disposed)
    }

    /// Unlink and destroy a subtree, children first.
    fn dispose_now(&mut self, node: NodeId) -> Result<()> {
        self.unlink(node);
        for id in self.subtree_post_order(node) {
            if !self.nodes.contains_key(id) {
                continue;
            }
            self.with_widget_mut(id, |widget, core| {
                let mut ctx = Context::new(core, id);
                widget.on_dispose(&mut ctx);
            })?;
            self.forget_node(id);
            self.deferred_measure.shift_remove(&id);
            self.pending_disposal.retain(|p| *p != id);
            if let Some(removed) = self.nodes.remove(id)
                && let Some(owner) = removed.parent
                && let Some(owner) = self.nodes.get_mut(owner)
                && owner.content_host == Some(id)
            {
                owner.content_host = None;
            }
            trace!(?id, "disposed");
        }
        Ok(())
    }

    /// Collect a subtree in post-order, including the root.
    fn subtree_post_order(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![(root, false)];
        while let Some((node_id, visited)) = stack.pop() {
            let Some(node) = self.nodes.get(node_id) else {
                continue;
            };
            if visited {
                out.push(node_id);
                continue;
            }
            stack.push((node_id, true));
            for child in node.children.iter().rev() {
                stack.push((*child, false));
            }
        }
        out
    }

    /// Walk the visible tree once: refresh focus trackers, run every widget's
    /// `think` hook and gather tab-order candidates. Hidden and collapsed
    /// subtrees are skipped; disabled subtrees think but are not tabable.
    pub(crate) fn think_pass(&mut self) -> Result<()> {
        self.refresh_trackers();
        let mut stack = vec![(self.root, true)];
        while let Some((id, enabled)) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            if node.flags.hidden || node.flags.collapsed {
                continue;
            }
            let enabled = enabled && !node.flags.disabled;
            let tabable = enabled && node.flags.tabable;
            self.with_widget_mut(id, |widget, core| {
                let mut ctx = Context::new(core, id);
                widget.think(&mut ctx)
            })??;
            if tabable {
                self.note_tab_candidate(id);
            }
            if let Some(node) = self.nodes.get(id) {
                stack.extend(node.children.iter().rev().map(|c| (*c, enabled)));
            }
        }
        Ok(())
    }

    /// The topmost node under a point in root coordinates that accepts mouse
    /// input. Children are searched in reverse paint order.
    pub fn get_control_at(&self, x: i32, y: i32) -> Option<NodeId> {
        self.locate(self.root, x, y)
    }

    /// Hit test a subtree with a point in the node's parent coordinates.
    fn locate(&self, id: NodeId, x: i32, y: i32) -> Option<NodeId> {
        let node = self.nodes.get(id)?;
        if node.flags.hidden || node.flags.collapsed || !node.bounds.contains(x, y) {
            return None;
        }
        let (lx, ly) = (x - node.bounds.x, y - node.bounds.y);
        node.children
            .iter()
            .rev()
            .find_map(|c| self.locate(*c, lx, ly))
            .or_else(|| node.flags.mouse_input.then_some(id))
    }

    /// Assert structural invariants on the node tree in debug builds.
    #[cfg(debug_assertions)]
    pub fn debug_assert_tree_invariants(&self) {
        debug_assert!(self.nodes.contains_key(self.root), "root node missing");
        for (id, node) in &self.nodes {
            if id == self.root {
                debug_assert!(node.actual_parent.is_none(), "root has parent");
            }
            let mut seen = HashSet::with_capacity(node.children.len());
            for child in &node.children {
                debug_assert!(
                    seen.insert(*child),
                    "duplicate child {child:?} under {id:?}"
                );
                debug_assert!(
                    self.nodes
                        .get(*child)
                        .is_some_and(|c| c.actual_parent == Some(id)),
                    "child {child:?} parent mismatch under {id:?}"
                );
            }
            if let Some(parent) = node.actual_parent {
                debug_assert!(
                    self.nodes
                        .get(parent)
                        .is_some_and(|p| p.children.contains(&id)),
                    "parent {parent:?} missing child {id:?}"
                );
            }
            debug_assert!(!self.parent_chain_has_cycle(id), "cycle detected from {id:?}");
        }
    }

    /// Assert structural invariants on the node tree in debug builds.
    #[cfg(not(debug_assertions))]
    pub fn debug_assert_tree_invariants(&self) {}

    /// Return true if a node's parent chain contains a cycle.
    #[cfg(debug_assertions)]
    fn parent_chain_has_cycle(&self, start: NodeId) -> bool {
        let mut seen = HashSet::new();
        let mut current = Some(start);
        while let Some(id) = current {
            if !seen.insert(id) {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.actual_parent);
        }
        false
    }
}

/// Widget for the implicit root node: a plain docking container.
struct RootContainer;

impl Widget for RootContainer {
    fn kind(&self) -> NodeKind {
        NodeKind::convert("canvas")
    }
}
