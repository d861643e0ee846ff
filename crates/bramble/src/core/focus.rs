use tracing::trace;

use crate::core::{id::NodeId, world::Core};

/// Tab-order candidates gathered during a frame walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TabTracker {
    /// First tabable node in pre-order.
    pub first: Option<NodeId>,
    /// First tabable node after the focused one.
    pub next: Option<NodeId>,
    /// Set once the walk has passed the focused node.
    seen_focus: bool,
}

/// Trait for managing keyboard focus, hover and mouse capture.
///
/// Trackers only ever point at live nodes attached to the root. Removing a node
/// clears every tracker that referenced it.
pub trait FocusManager {
    /// Node holding keyboard focus.
    fn keyboard_focus(&self) -> Option<NodeId>;

    /// Does the node hold keyboard focus?
    fn is_focused(&self, node: NodeId) -> bool {
        self.keyboard_focus() == Some(node)
    }

    /// Focus a node. Returns `true` if focus changed. Nodes that are detached,
    /// hidden, collapsed or disabled (directly or through an ancestor) are
    /// refused.
    fn set_keyboard_focus(&mut self, node: NodeId) -> bool;

    /// Drop keyboard focus.
    fn clear_keyboard_focus(&mut self);

    /// Node under the pointer.
    fn hovered(&self) -> Option<NodeId>;

    /// Record the node under the pointer.
    fn set_hovered(&mut self, node: Option<NodeId>);

    /// Node capturing pointer input.
    fn mouse_capture(&self) -> Option<NodeId>;

    /// Capture or release pointer input.
    fn set_mouse_capture(&mut self, node: Option<NodeId>);

    /// Tab-order candidates from the last frame.
    fn tab_order(&self) -> TabTracker;

    /// Move keyboard focus to the next tabable node, wrapping to the first.
    /// Uses the candidates gathered by the last frame.
    fn focus_next_tab(&mut self) -> Option<NodeId>;

    /// True if the node is attached and neither it nor any ancestor is hidden or
    /// collapsed.
    fn is_effectively_visible(&self, node: NodeId) -> bool;

    /// True if neither the node nor any ancestor is disabled.
    fn is_effectively_enabled(&self, node: NodeId) -> bool;

    /// Forget last frame's tab candidates.
    fn reset_tab_tracking(&mut self);

    /// Record a tabable node met during the pre-order frame walk.
    fn note_tab_candidate(&mut self, node: NodeId);

    /// Clear trackers that point at nodes which are gone, detached or no longer
    /// eligible.
    fn refresh_trackers(&mut self);

    /// Clear every tracker that references `node`.
    fn forget_node(&mut self, node: NodeId);
}

impl FocusManager for Core {
    fn keyboard_focus(&self) -> Option<NodeId> {
        self.keyboard_focus
    }

    fn set_keyboard_focus(&mut self, node: NodeId) -> bool {
        if self.keyboard_focus == Some(node) {
            return false;
        }
        if !self.is_effectively_visible(node) || !self.is_effectively_enabled(node) {
            return false;
        }
        trace!(?node, "focus");
        self.keyboard_focus = Some(node);
        true
    }

    fn clear_keyboard_focus(&mut self) {
        self.keyboard_focus = None;
    }

    fn hovered(&self) -> Option<NodeId> {
        self.hovered
    }

    fn set_hovered(&mut self, node: Option<NodeId>) {
        self.hovered = node.filter(|n| self.is_attached_to_root(*n));
    }

    fn mouse_capture(&self) -> Option<NodeId> {
        self.mouse_capture
    }

    fn set_mouse_capture(&mut self, node: Option<NodeId>) {
        self.mouse_capture = node.filter(|n| self.is_attached_to_root(*n));
    }

    fn tab_order(&self) -> TabTracker {
        self.tab
    }

    fn focus_next_tab(&mut self) -> Option<NodeId> {
        let target = self.tab.next.or(self.tab.first)?;
        self.set_keyboard_focus(target);
        self.keyboard_focus
    }

    fn is_effectively_visible(&self, node: NodeId) -> bool {
        if !self.is_attached_to_root(node) {
            return false;
        }
        let mut current = Some(node);
        while let Some(id) = current {
            let Some(n) = self.nodes.get(id) else {
                return false;
            };
            if n.flags.hidden || n.flags.collapsed {
                return false;
            }
            current = n.actual_parent;
        }
        true
    }

    fn is_effectively_enabled(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            let Some(n) = self.nodes.get(id) else {
                return false;
            };
            if n.flags.disabled {
                return false;
            }
            current = n.actual_parent;
        }
        true
    }

    fn reset_tab_tracking(&mut self) {
        self.tab = TabTracker::default();
    }

    fn note_tab_candidate(&mut self, node: NodeId) {
        if self.tab.first.is_none() {
            self.tab.first = Some(node);
        }
        if self.tab.seen_focus && self.tab.next.is_none() {
            self.tab.next = Some(node);
        }
        if self.keyboard_focus == Some(node) {
            self.tab.seen_focus = true;
        }
    }

    fn refresh_trackers(&mut self) {
        if let Some(focus) = self.keyboard_focus
            && (!self.is_effectively_visible(focus) || !self.is_effectively_enabled(focus))
        {
            trace!(?focus, "focus dropped");
            self.keyboard_focus = None;
        }
        if self.hovered.is_some_and(|n| !self.is_attached_to_root(n)) {
            self.hovered = None;
        }
        if self
            .mouse_capture
            .is_some_and(|n| !self.is_attached_to_root(n))
        {
            self.mouse_capture = None;
        }
    }

    fn forget_node(&mut self, node: NodeId) {
        if self.keyboard_focus == Some(node) {
            self.keyboard_focus = None;
        }
        if self.hovered == Some(node) {
            self.hovered = None;
        }
        if self.mouse_capture == Some(node) {
            self.mouse_capture = None;
        }
        if self.tab.first == Some(node) {
            self.tab.first = None;
        }
        if self.tab.next == Some(node) {
            self.tab.next = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::Result, widget::Widget};

    struct Leaf;

    impl Widget for Leaf {}

    #[test]
    fn focus_refuses_ineligible_nodes() -> Result<()> {
        let mut core = Core::new();
        let root = core.root_id();
        let panel = core.add_child(root, Leaf)?;
        let a = core.add_child(panel, Leaf)?;
        let loose = core.create_detached(Leaf);

        assert!(!core.set_keyboard_focus(loose));
        core.set_disabled(panel, true)?;
        assert!(!core.set_keyboard_focus(a));
        core.set_disabled(panel, false)?;
        assert!(core.set_keyboard_focus(a));
        assert!(!core.set_keyboard_focus(a));
        assert!(core.is_focused(a));

        core.set_hidden(panel, true)?;
        assert_eq!(core.keyboard_focus(), None);
        Ok(())
    }

    #[test]
    fn refresh_drops_stale_trackers() -> Result<()> {
        let mut core = Core::new();
        let root = core.root_id();
        let a = core.add_child(root, Leaf)?;
        assert!(core.set_keyboard_focus(a));
        core.set_hovered(Some(a));
        core.set_mouse_capture(Some(a));
        core.set_collapsed(a, true)?;
        core.refresh_trackers();
        assert_eq!(core.keyboard_focus(), None);
        assert_eq!(core.hovered(), Some(a));

        core.detach(a)?;
        core.refresh_trackers();
        assert_eq!(core.hovered(), None);
        assert_eq!(core.mouse_capture(), None);
        Ok(())
    }

    #[test]
    fn tab_candidates_follow_focus() -> Result<()> {
        let mut core = Core::new();
        let root = core.root_id();
        let ids = [
            core.add_child(root, Leaf)?,
            core.add_child(root, Leaf)?,
            core.add_child(root, Leaf)?,
        ];
        assert!(core.set_keyboard_focus(ids[1]));
        core.reset_tab_tracking();
        for id in ids {
            core.note_tab_candidate(id);
        }
        let tab = core.tab_order();
        assert_eq!(tab.first, Some(ids[0]));
        assert_eq!(tab.next, Some(ids[2]));
        assert_eq!(core.focus_next_tab(), Some(ids[2]));
        Ok(())
    }
}
