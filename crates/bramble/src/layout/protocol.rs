use tracing::trace;

use crate::{
    NodeId,
    core::Core,
    error::{Error, Result},
    geom::{Rect, Size},
    layout::{Context, HorizontalAlignment, VerticalAlignment},
};

/// The two-pass layout protocol, implemented on [`Core`].
pub trait LayoutProtocol {
    /// Measure a node against the budget its parent offers and cache the result.
    ///
    /// The margin is taken out of the budget, an explicit desired size and the
    /// min/max clamps are applied, the widget's `measure` hook reports a natural
    /// size, and the result is clamped again, capped to the budget and has the
    /// margin added back. Collapsed nodes measure as zero. A hook that returns an
    /// unbounded size fails with [`Error::InfiniteMeasure`].
    fn do_measure(&mut self, node: NodeId, available: Size) -> Result<Size>;

    /// Arrange a node into `slot`, a rectangle in its parent's coordinates that
    /// includes the margin area. Sets the node's bounds and marks it laid out.
    fn do_arrange(&mut self, node: NodeId, slot: Rect) -> Result<()>;

    /// Measure and arrange a node against its own current bounds. Used by the
    /// deferred-measure drain.
    fn do_layout(&mut self, node: NodeId) -> Result<()>;

    /// Measure and arrange the whole tree from the root.
    fn layout_root(&mut self) -> Result<()>;
}

impl LayoutProtocol for Core {
    fn do_measure(&mut self, node: NodeId, available: Size) -> Result<Size> {
        let n = self.get(node)?;
        if n.flags.collapsed {
            self.get_mut(node)?.measured = Size::ZERO;
            return Ok(Size::ZERO);
        }
        let margin = n.margin;
        let desired = n.desired;
        let (min, max) = (n.minimum_size, n.maximum_size);

        let mut budget = available - margin;
        if let Some(w) = desired.width {
            budget.w = budget.w.min(w);
        }
        if let Some(h) = desired.height {
            budget.h = budget.h.min(h);
        }
        let budget = budget.clamp(min, max);

        let natural = self.with_widget_mut(node, |widget, core| {
            let mut ctx = Context::new(core, node);
            widget.measure(&mut ctx, budget)
        })??;
        if natural.is_infinite() {
            return Err(Error::InfiniteMeasure(node));
        }

        let size = Size::new(
            desired.width.unwrap_or(natural.w),
            desired.height.unwrap_or(natural.h),
        )
        .clamp(min, max)
        .min(budget)
        .non_negative();
        let measured = size + margin;
        if measured.is_infinite() {
            return Err(Error::InfiniteMeasure(node));
        }
        trace!(?node, ?available, ?natural, ?measured, "measure");
        self.get_mut(node)?.measured = measured;
        Ok(measured)
    }

    fn do_arrange(&mut self, node: NodeId, slot: Rect) -> Result<()> {
        let n = self.get_mut(node)?;
        if n.flags.collapsed {
            return Ok(());
        }
        // Cleared up front so that invalidations raised while children are
        // arranged still bubble past this node.
        n.flags.needs_layout = false;

        let margin = n.margin;
        let desired = n.desired;
        let (min, max) = (n.minimum_size, n.maximum_size);
        let (halign, valign) = n.effective_alignment();
        let natural = n.measured - margin;

        let area = slot.inset(margin);
        let mut size = Size::new(
            if halign == HorizontalAlignment::Stretch {
                area.w
            } else {
                natural.w
            },
            if valign == VerticalAlignment::Stretch {
                area.h
            } else {
                natural.h
            },
        );
        if let Some(w) = desired.width {
            size.w = w;
        }
        if let Some(h) = desired.height {
            size.h = h;
        }
        let size = size.clamp(min, max).min(area.size()).non_negative();

        let arranged = self.with_widget_mut(node, |widget, core| {
            let mut ctx = Context::new(core, node);
            widget.arrange(&mut ctx, size)
        })??;
        let arranged = arranged.clamp(min, max).min(area.size()).non_negative();

        let dx = match halign {
            HorizontalAlignment::Center => (area.w - arranged.w) / 2,
            HorizontalAlignment::Right => area.w - arranged.w,
            HorizontalAlignment::Left | HorizontalAlignment::Stretch => 0,
        };
        let dy = match valign {
            VerticalAlignment::Center => (area.h - arranged.h) / 2,
            VerticalAlignment::Bottom => area.h - arranged.h,
            VerticalAlignment::Top | VerticalAlignment::Stretch => 0,
        };
        let bounds = Rect::new(area.x + dx, area.y + dy, arranged.w, arranged.h);
        trace!(?node, ?slot, ?bounds, "arrange");
        self.set_bounds(node, bounds)?;
        self.get_mut(node)?.flags.layout_done = true;
        Ok(())
    }

    fn do_layout(&mut self, node: NodeId) -> Result<()> {
        let n = self.get(node)?;
        if n.flags.collapsed {
            return Ok(());
        }
        let slot = n.bounds.outset(n.margin);
        self.do_measure(node, slot.size())?;
        self.do_arrange(node, slot)
    }

    fn layout_root(&mut self) -> Result<()> {
        let root = self.root_id();
        let desired = self.get(root)?.desired;
        let size = Size::new(
            desired.width.unwrap_or_default(),
            desired.height.unwrap_or_default(),
        );
        self.do_measure(root, size)?;
        self.do_arrange(root, Rect::from_size(size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        geom::{INFINITE, Insets},
        layout::Dock,
        widget::Widget,
    };

    /// Leaf with a fixed natural size.
    struct Fixed(Size);

    impl Widget for Fixed {
        fn measure(&mut self, _ctx: &mut Context<'_>, _available: Size) -> Result<Size> {
            Ok(self.0)
        }
    }

    /// Leaf that reports an unbounded size.
    struct Unbounded;

    impl Widget for Unbounded {
        fn measure(&mut self, _ctx: &mut Context<'_>, _available: Size) -> Result<Size> {
            Ok(Size::new(10, INFINITE))
        }
    }

    #[test]
    fn measure_adds_margin_and_caps_to_budget() -> Result<()> {
        let mut core = Core::new();
        let id = core.create_detached(Fixed(Size::new(500, 20)));
        core.set_margin(id, Insets::all(5))?;
        let m = core.do_measure(id, Size::new(100, 100))?;
        assert_eq!(m, Size::new(100, 30));
        Ok(())
    }

    #[test]
    fn measure_prefers_explicit_size() -> Result<()> {
        let mut core = Core::new();
        let id = core.create_detached(Fixed(Size::new(5, 5)));
        core.set_size(id, Size::new(40, 30))?;
        assert_eq!(core.do_measure(id, Size::INFINITE)?, Size::new(40, 30));
        Ok(())
    }

    #[test]
    fn minimum_beats_small_budget() -> Result<()> {
        let mut core = Core::new();
        let id = core.create_detached(Fixed(Size::new(5, 5)));
        core.set_minimum_size(id, Size::new(50, 50))?;
        core.set_margin(id, Insets::all(2))?;
        assert_eq!(core.do_measure(id, Size::new(20, 20))?, Size::new(54, 54));
        Ok(())
    }

    #[test]
    fn measure_rejects_infinite_natural_size() {
        let mut core = Core::new();
        let id = core.create_detached(Unbounded);
        assert_eq!(
            core.do_measure(id, Size::INFINITE),
            Err(Error::InfiniteMeasure(id))
        );
    }

    #[test]
    fn collapsed_measures_zero() -> Result<()> {
        let mut core = Core::new();
        let id = core.create_detached(Fixed(Size::new(5, 5)));
        core.set_size(id, Size::new(40, 30))?;
        core.set_collapsed(id, true)?;
        assert_eq!(core.do_measure(id, Size::new(100, 100))?, Size::ZERO);
        Ok(())
    }

    #[test]
    fn arrange_alignment_center_bottom() -> Result<()> {
        let mut core = Core::new();
        let id = core.create_detached(Fixed(Size::ZERO));
        core.set_size(id, Size::new(100, 100))?;
        core.set_horizontal_alignment(id, HorizontalAlignment::Center)?;
        core.set_vertical_alignment(id, VerticalAlignment::Bottom)?;
        core.do_measure(id, Size::new(300, 300))?;
        core.do_arrange(id, Rect::new(0, 0, 300, 300))?;
        assert_eq!(core.get(id)?.bounds(), Rect::new(100, 200, 100, 100));
        assert!(core.get(id)?.flags().layout_done);
        assert!(!core.get(id)?.needs_layout());
        Ok(())
    }

    #[test]
    fn arrange_stretch_respects_margin_and_max() -> Result<()> {
        let mut core = Core::new();
        let id = core.create_detached(Fixed(Size::ZERO));
        core.set_margin(id, Insets::new(1, 2, 3, 4))?;
        core.set_maximum_size(id, Size::new(50, INFINITE))?;
        core.set_dock(id, Dock::Fill)?;
        core.do_measure(id, Size::new(100, 100))?;
        core.do_arrange(id, Rect::new(10, 10, 100, 100))?;
        assert_eq!(core.get(id)?.bounds(), Rect::new(11, 12, 50, 94));
        Ok(())
    }

    #[test]
    fn arrange_zero_slot_is_not_an_error() -> Result<()> {
        let mut core = Core::new();
        let id = core.create_detached(Fixed(Size::new(10, 10)));
        core.set_margin(id, Insets::all(3))?;
        core.do_measure(id, Size::ZERO)?;
        core.do_arrange(id, Rect::zero())?;
        assert_eq!(core.get(id)?.bounds(), Rect::new(3, 3, 0, 0));
        Ok(())
    }

    #[test]
    fn do_layout_keeps_position() -> Result<()> {
        let mut core = Core::new();
        let id = core.create_detached(Fixed(Size::new(10, 10)));
        core.set_margin(id, Insets::all(2))?;
        core.do_measure(id, Size::new(100, 100))?;
        core.do_arrange(id, Rect::new(20, 20, 14, 14))?;
        let before = core.get(id)?.bounds();
        core.do_layout(id)?;
        assert_eq!(core.get(id)?.bounds(), before);
        Ok(())
    }
}
