use std::time::{Duration, Instant};

use scopeguard::guard;
use tracing::{debug, debug_span};

use crate::{
    core::{
        Core, config::CanvasConfig, focus::FocusManager, id::NodeId, invalidate::Invalidation,
        render::{Renderer, render_tree},
    },
    error::Result,
    geom::Size,
    layout::LayoutProtocol,
};

/// Per-frame collaborator run before anything else in the frame. Animators may
/// freely mutate and invalidate the tree.
pub trait Animator {
    /// Advance by `elapsed` since the previous frame.
    fn advance(&mut self, core: &mut Core, elapsed: Duration) -> Result<()>;
}

/// What a single frame did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// The root was dirty and the whole tree was laid out.
    pub full_layout: bool,
    /// Nodes laid out from the deferred-measure queue.
    pub deferred_laid_out: usize,
    /// Subtrees destroyed from the disposal queue.
    pub disposed: usize,
}

/// The root orchestrator: owns the tree and drives the per-frame cycle.
pub struct Canvas {
    /// Tree state.
    core: Core,
    /// Settings the canvas was built with.
    config: CanvasConfig,
    /// Collaborators advanced at the start of each frame.
    animators: Vec<Box<dyn Animator>>,
    /// Start of the previous wall-clock frame.
    last_frame: Option<Instant>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl Canvas {
    /// Construct a canvas whose root is sized from the config.
    pub fn new(config: CanvasConfig) -> Self {
        let mut core = Core::new();
        let root = core.root_id();
        let size = Size::new(config.width, config.height).non_negative();
        if let Some(node) = core.nodes.get_mut(root) {
            node.desired.width = Some(size.w);
            node.desired.height = Some(size.h);
        }
        Self {
            core,
            config,
            animators: Vec::new(),
            last_frame: None,
        }
    }

    /// Shared access to the tree.
    pub fn core(&self) -> &Core {
        &self.core
    }

    /// Mutable access to the tree.
    pub fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    /// The settings this canvas was built with.
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.core.root_id()
    }

    /// Resize the root. The next frame runs a full layout.
    pub fn set_size(&mut self, size: Size) -> Result<()> {
        let root = self.core.root_id();
        self.core.set_size(root, size)?;
        // Even a virtual root must be laid out against the new size.
        self.core.get_mut(root)?.flags.needs_layout = true;
        Ok(())
    }

    /// Current root size request.
    pub fn size(&self) -> Size {
        self.core.node(self.core.root_id()).map_or(Size::ZERO, |n| {
            Size::new(
                n.desired.width.unwrap_or_default(),
                n.desired.height.unwrap_or_default(),
            )
        })
    }

    /// Register a collaborator that runs at the start of every frame.
    pub fn add_animator(&mut self, animator: impl Animator + 'static) {
        self.animators.push(Box::new(animator));
    }

    /// Run a frame, timing animators by the wall clock since the previous call.
    pub fn frame(&mut self) -> Result<FrameReport> {
        let now = Instant::now();
        let elapsed = self
            .last_frame
            .map(|last| now.duration_since(last))
            .unwrap_or_default();
        self.last_frame = Some(now);
        self.frame_with(elapsed)
    }

    /// Run a frame with an explicit elapsed time.
    ///
    /// The order is fixed: animators, tab-order reset, disposal drain, the
    /// think and focus walk, then either a full layout (if the root is dirty) or
    /// a drain of the deferred-measure queue. Disposal during the walk or the
    /// layout is deferred to the next frame.
    pub fn frame_with(&mut self, elapsed: Duration) -> Result<FrameReport> {
        let _span = debug_span!("frame").entered();
        let mut report = FrameReport::default();

        for animator in &mut self.animators {
            animator.advance(&mut self.core, elapsed)?;
        }
        self.core.reset_tab_tracking();
        report.disposed = self.core.drain_pending_disposal()?;

        {
            let mut core = guard(&mut self.core, |core| core.pass_active = false);
            core.pass_active = true;
            core.think_pass()?;

            let root = core.root_id();
            if core.get(root)?.needs_layout() {
                // The full pass covers everything queued so far.
                core.deferred_measure.clear();
                core.layout_root()?;
                report.full_layout = true;
                debug!("full layout");
            } else if core.deferred_len() > 0 {
                report.deferred_laid_out = core.drain_deferred()?;
                debug!(count = report.deferred_laid_out, "partial layout");
            }
        }

        if self.config.validate_tree {
            self.core.debug_assert_tree_invariants();
        }
        Ok(report)
    }

    /// Paint the visible tree. Disposal requested while painting is deferred to
    /// the next frame.
    pub fn render(&mut self, renderer: &mut dyn Renderer) -> Result<()> {
        let mut core = guard(&mut self.core, |core| core.pass_active = false);
        core.pass_active = true;
        render_tree(&mut core, renderer)
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::{
        layout::{Context, Dock},
        widget::Widget,
    };

    struct Leaf;

    impl Widget for Leaf {}

    /// Records the phase each collaborator observes.
    struct Recorder(Rc<RefCell<Vec<String>>>);

    impl Animator for Recorder {
        fn advance(&mut self, core: &mut Core, elapsed: Duration) -> Result<()> {
            self.0.borrow_mut().push(format!(
                "animate {}ms pending={}",
                elapsed.as_millis(),
                core.pending_disposal().len()
            ));
            Ok(())
        }
    }

    /// Disposes a sibling from inside its think hook.
    struct Reaper(NodeId);

    impl Widget for Reaper {
        fn think(&mut self, ctx: &mut Context<'_>) -> Result<()> {
            if ctx.core().contains(self.0) {
                ctx.core_mut().dispose(self.0)?;
            }
            Ok(())
        }
    }

    #[test]
    fn first_frame_is_full_layout() -> Result<()> {
        let mut canvas = Canvas::new(CanvasConfig {
            width: 200,
            height: 100,
            validate_tree: true,
        });
        let root = canvas.root();
        let a = canvas.core_mut().add_child(root, Leaf)?;
        canvas.core_mut().set_dock(a, Dock::Fill)?;

        let report = canvas.frame_with(Duration::ZERO)?;
        assert!(report.full_layout);
        assert_eq!(canvas.core().get(a)?.bounds().size(), Size::new(200, 100));

        let report = canvas.frame_with(Duration::ZERO)?;
        assert_eq!(report, FrameReport::default());
        Ok(())
    }

    #[test]
    fn animators_run_before_disposal() -> Result<()> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut canvas = Canvas::default();
        canvas.add_animator(Recorder(Rc::clone(&log)));
        let root = canvas.root();
        let a = canvas.core_mut().add_child(root, Leaf)?;
        canvas.core_mut().delayed_delete(a)?;

        let report = canvas.frame_with(Duration::from_millis(16))?;
        assert_eq!(report.disposed, 1);
        assert_eq!(log.borrow().as_slice(), ["animate 16ms pending=1"]);
        assert!(!canvas.core().contains(a));
        Ok(())
    }

    #[test]
    fn dispose_during_think_waits_for_next_frame() -> Result<()> {
        let mut canvas = Canvas::default();
        let root = canvas.root();
        let victim = canvas.core_mut().add_child(root, Leaf)?;
        canvas.core_mut().add_child(root, Reaper(victim))?;

        let report = canvas.frame_with(Duration::ZERO)?;
        assert_eq!(report.disposed, 0);
        assert!(canvas.core().contains(victim));
        assert!(!canvas.core().is_attached_to_root(victim));
        assert!(!canvas.core().is_pass_active());

        let report = canvas.frame_with(Duration::ZERO)?;
        assert_eq!(report.disposed, 1);
        assert!(!canvas.core().contains(victim));
        Ok(())
    }

    #[test]
    fn resize_triggers_full_layout() -> Result<()> {
        let mut canvas = Canvas::default();
        canvas.frame_with(Duration::ZERO)?;
        canvas.set_size(Size::new(300, 200))?;
        assert_eq!(canvas.size(), Size::new(300, 200));
        assert!(canvas.frame_with(Duration::ZERO)?.full_layout);
        let root = canvas.root();
        assert_eq!(canvas.core().get(root)?.bounds().size(), Size::new(300, 200));
        Ok(())
    }
}
