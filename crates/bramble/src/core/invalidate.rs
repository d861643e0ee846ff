use std::mem;

use tracing::{trace, warn};

use crate::{
    core::{Core, id::NodeId},
    error::Result,
    layout::LayoutProtocol,
};

/// Layout invalidation and the deferred-measure queue.
///
/// Invalidating a node marks it and its ancestors as needing layout, stopping
/// at the first ancestor that is already dirty. A virtual node that has been
/// laid out once is treated differently: instead of dirtying its ancestors it
/// is queued and re-laid out on its own within its current bounds.
pub trait Invalidation {
    /// Invalidate a node. Returns the number of nodes visited.
    fn invalidate(&mut self, node: NodeId) -> usize;

    /// Invalidate the actual parent of a node, if it has one.
    fn invalidate_parent(&mut self, node: NodeId) -> usize;

    /// True if the node is waiting in the deferred-measure queue.
    fn is_deferred(&self, node: NodeId) -> bool;

    /// Number of nodes waiting in the deferred-measure queue.
    fn deferred_len(&self) -> usize;

    /// Lay out every queued node in isolation. Returns the number laid out.
    fn drain_deferred(&mut self) -> Result<usize>;
}

impl Invalidation for Core {
    fn invalidate(&mut self, node: NodeId) -> usize {
        let mut visits = 0;
        let mut current = Some(node);
        while let Some(id) = current {
            let Some(n) = self.nodes.get_mut(id) else {
                break;
            };
            visits += 1;
            if n.flags.virtual_control && n.flags.layout_done {
                if self.deferred_measure.insert(id) {
                    trace!(?id, "deferred");
                }
                break;
            }
            n.flags.needs_layout = true;
            let parent = n.actual_parent;
            current = parent
                .filter(|p| self.nodes.get(*p).is_some_and(|pn| !pn.flags.needs_layout));
        }
        visits
    }

    fn invalidate_parent(&mut self, node: NodeId) -> usize {
        match self.nodes.get(node).and_then(|n| n.actual_parent) {
            Some(parent) => self.invalidate(parent),
            None => 0,
        }
    }

    fn is_deferred(&self, node: NodeId) -> bool {
        self.deferred_measure.contains(&node)
    }

    fn deferred_len(&self) -> usize {
        self.deferred_measure.len()
    }

    fn drain_deferred(&mut self) -> Result<usize> {
        let queued = mem::take(&mut self.deferred_measure);
        let mut laid_out = 0;
        for node in queued {
            // Queued again by an earlier entry; this pass covers it.
            self.deferred_measure.swap_remove(&node);
            if !self.nodes.contains_key(node) || !self.is_attached_to_root(node) {
                continue;
            }
            self.do_layout(node)?;
            laid_out += 1;
        }
        if !self.deferred_measure.is_empty() {
            warn!(
                count = self.deferred_measure.len(),
                "deferred nodes re-queued during drain"
            );
        }
        Ok(laid_out)
    }
}
