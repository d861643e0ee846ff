use std::{cell::Cell, rc::Rc};

use crate::{
    error::Result,
    geom::{Rect, Size},
    layout::{Context, dock},
    widget::Widget,
};

/// Shared call counters for a [`Probe`].
#[derive(Debug, Clone, Default)]
pub struct Counters {
    /// Measure hook calls.
    pub measure: Rc<Cell<usize>>,
    /// Arrange hook calls.
    pub arrange: Rc<Cell<usize>>,
    /// Think hook calls.
    pub think: Rc<Cell<usize>>,
    /// Bounds change notifications.
    pub bounds_changed: Rc<Cell<usize>>,
    /// Dispose hook calls.
    pub dispose: Rc<Cell<usize>>,
}

impl Counters {
    /// Reset every counter to zero.
    pub fn reset(&self) {
        for c in [
            &self.measure,
            &self.arrange,
            &self.think,
            &self.bounds_changed,
            &self.dispose,
        ] {
            c.set(0);
        }
    }
}

/// Bump a counter.
fn bump(c: &Cell<usize>) {
    c.set(c.get() + 1);
}

/// A docking container with a fixed natural size that counts its hook calls.
///
/// The reported natural size is the larger of the fixed size and what its
/// children need.
pub struct Probe {
    /// Fixed natural size.
    natural: Size,
    /// Hook counters shared with the test.
    counters: Counters,
}

impl Probe {
    /// Construct a probe and return the counters it updates.
    pub fn new(natural: Size) -> (Self, Counters) {
        let counters = Counters::default();
        (
            Self {
                natural,
                counters: counters.clone(),
            },
            counters,
        )
    }
}

impl Widget for Probe {
    fn measure(&mut self, ctx: &mut Context<'_>, available: Size) -> Result<Size> {
        bump(&self.counters.measure);
        Ok(self.natural.max(dock::measure(ctx, available)?))
    }

    fn arrange(&mut self, ctx: &mut Context<'_>, size: Size) -> Result<Size> {
        bump(&self.counters.arrange);
        dock::arrange(ctx, size)
    }

    fn think(&mut self, _ctx: &mut Context<'_>) -> Result<()> {
        bump(&self.counters.think);
        Ok(())
    }

    fn on_bounds_changed(&mut self, _ctx: &mut Context<'_>, _old: Rect, _new: Rect) -> Result<()> {
        bump(&self.counters.bounds_changed);
        Ok(())
    }

    fn on_dispose(&mut self, _ctx: &mut Context<'_>) {
        bump(&self.counters.dispose);
    }
}

/// A plain docking container.
pub struct Panel;

impl Widget for Panel {}

/// A container that holds at most four children, like a four-way splitter.
pub struct Quad;

impl Widget for Quad {
    fn max_children(&self) -> Option<usize> {
        Some(4)
    }
}
