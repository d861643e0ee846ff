use crate::{
    NodeId,
    core::{Core, invalidate::Invalidation, node::Node},
    error::Result,
    geom::{Rect, Size},
    layout::LayoutProtocol,
};

/// Access to the tree from inside a widget hook.
///
/// The context is bound to the node whose hook is running. Its widget is not
/// reachable while the hook runs; everything else in the tree is.
pub struct Context<'a> {
    /// Tree being laid out.
    core: &'a mut Core,
    /// Node whose hook is running.
    node: NodeId,
}

impl<'a> Context<'a> {
    /// Bind a context to a node.
    pub(crate) fn new(core: &'a mut Core, node: NodeId) -> Self {
        Self { core, node }
    }

    /// The node whose hook is running.
    pub fn node_id(&self) -> NodeId {
        self.node
    }

    /// Shared access to the tree.
    pub fn core(&self) -> &Core {
        &*self.core
    }

    /// Mutable access to the tree.
    pub fn core_mut(&mut self) -> &mut Core {
        &mut *self.core
    }

    /// The node record for the running hook.
    pub fn node(&self) -> Result<&Node> {
        self.core.get(self.node)
    }

    /// A snapshot of the node's children in paint order.
    pub fn children(&self) -> Vec<NodeId> {
        self.core
            .node(self.node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// Measure a child against a budget.
    pub fn measure_child(&mut self, child: NodeId, available: Size) -> Result<Size> {
        self.core.do_measure(child, available)
    }

    /// Arrange a child into a slot in this node's coordinates.
    pub fn arrange_child(&mut self, child: NodeId, slot: Rect) -> Result<()> {
        self.core.do_arrange(child, slot)
    }

    /// Invalidate the running node.
    pub fn invalidate(&mut self) -> usize {
        self.core.invalidate(self.node)
    }

    /// Invalidate any node, typically a sibling.
    pub fn invalidate_node(&mut self, node: NodeId) -> usize {
        self.core.invalidate(node)
    }

    /// Queue a node for disposal at the next frame boundary.
    pub fn delayed_delete(&mut self, node: NodeId) -> Result<()> {
        self.core.delayed_delete(node)
    }
}
