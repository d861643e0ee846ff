use crate::{
    NodeId,
    error::Result,
    render::{RenderView, Renderer},
};

/// A renderer that keeps every view it is asked to draw, in paint order.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    /// Views drawn since the last clear.
    pub views: Vec<RenderView>,
}

impl RecordingRenderer {
    /// Construct an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.views.clear();
    }

    /// Painted nodes in paint order.
    pub fn order(&self) -> Vec<NodeId> {
        self.views.iter().map(|v| v.node).collect()
    }

    /// The view recorded for a node, if it was painted.
    pub fn view(&self, node: NodeId) -> Option<&RenderView> {
        self.views.iter().find(|v| v.node == node)
    }
}

impl Renderer for RecordingRenderer {
    fn draw(&mut self, view: &RenderView) -> Result<()> {
        self.views.push(view.clone());
        Ok(())
    }
}
