use std::time::Duration;

use super::{
    init_tracing,
    render::RecordingRenderer,
    widgets::{Counters, Panel, Probe},
};
use crate::{
    Canvas, CanvasConfig, Core, FrameReport, NodeId,
    dump::layout_table,
    error::{Error, Result},
    geom::{Rect, Size},
    layout::Dock,
    render::RenderView,
};

/// Fixed frame step used by [`Harness::frame`].
const FRAME_STEP: Duration = Duration::from_millis(16);

/// A canvas paired with a recording renderer. Tests build a tree, run frames
/// deterministically and inspect bounds or the paint log.
pub struct Harness {
    /// The canvas under test.
    pub canvas: Canvas,
    /// Records every paint.
    pub renderer: RecordingRenderer,
}

impl Harness {
    /// Create a harness with a root of the given size. Tree validation runs
    /// after every frame.
    pub fn new(width: i32, height: i32) -> Self {
        init_tracing();
        Self {
            canvas: Canvas::new(CanvasConfig {
                width,
                height,
                validate_tree: true,
            }),
            renderer: RecordingRenderer::new(),
        }
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.canvas.root()
    }

    /// Shared access to the tree.
    pub fn core(&self) -> &Core {
        self.canvas.core()
    }

    /// Mutable access to the tree.
    pub fn core_mut(&mut self) -> &mut Core {
        self.canvas.core_mut()
    }

    /// Add a plain container under `parent` with the given dock.
    pub fn panel(&mut self, parent: NodeId, dock: Dock) -> Result<NodeId> {
        let core = self.canvas.core_mut();
        let id = core.add_child(parent, Panel)?;
        core.set_dock(id, dock)?;
        Ok(id)
    }

    /// Add a probe under `parent` with the given dock and natural size.
    pub fn probe(&mut self, parent: NodeId, dock: Dock, natural: Size) -> Result<(NodeId, Counters)> {
        let (probe, counters) = Probe::new(natural);
        let core = self.canvas.core_mut();
        let id = core.add_child(parent, probe)?;
        core.set_dock(id, dock)?;
        Ok((id, counters))
    }

    /// Run one frame with a fixed time step.
    pub fn frame(&mut self) -> Result<FrameReport> {
        self.canvas.frame_with(FRAME_STEP)
    }

    /// Run a frame, then paint. Returns the views painted.
    pub fn render(&mut self) -> Result<&[RenderView]> {
        self.frame()?;
        self.renderer.clear();
        self.canvas.render(&mut self.renderer)?;
        Ok(&self.renderer.views)
    }

    /// A node's bounds relative to its actual parent.
    pub fn bounds(&self, node: NodeId) -> Result<Rect> {
        Ok(self.core().get(node)?.bounds())
    }

    /// A node's bounds in root coordinates.
    pub fn screen(&self, node: NodeId) -> Result<Rect> {
        self.core()
            .screen_bounds(node)
            .ok_or(Error::NodeNotFound(node))
    }

    /// The layout table for the whole tree.
    pub fn dump(&self) -> Result<String> {
        layout_table(self.core(), self.root())
    }
}
