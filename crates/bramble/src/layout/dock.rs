//! The docking arranger: the default Measure/Arrange for every container.
//!
//! Children are processed in three groups. Edge-docked children (the rails) are
//! taken in child order, each consuming width (left/right) or height
//! (top/bottom) from what is left. `Fill` children then share the remaining
//! rectangle, and `None` children are placed at their explicit offsets without
//! affecting anyone else. Collapsed children are skipped throughout.

use crate::{
    NodeId,
    error::Result,
    geom::{Rect, Size},
    layout::{Context, Dock},
};

/// Children of a container split by how the arranger treats them.
struct Groups {
    /// Edge-docked children in child order.
    rails: Vec<(NodeId, Dock)>,
    /// Fill-docked children.
    fills: Vec<NodeId>,
    /// Freely positioned children.
    free: Vec<NodeId>,
}

/// Partition the live, non-collapsed children of the context node.
fn groups(ctx: &Context<'_>) -> Groups {
    let parent = ctx.node_id();
    let core = ctx.core();
    let mut out = Groups {
        rails: Vec::new(),
        fills: Vec::new(),
        free: Vec::new(),
    };
    for child in ctx.children() {
        // A child removed by an earlier hook in this pass is no longer ours.
        let Some(node) = core.node(child) else {
            continue;
        };
        if node.actual_parent != Some(parent) || node.flags.collapsed {
            continue;
        }
        match node.dock {
            Dock::Fill => out.fills.push(child),
            Dock::None => out.free.push(child),
            dock => out.rails.push((child, dock)),
        }
    }
    out
}

/// Natural size of a docking container, padding included.
pub fn measure(ctx: &mut Context<'_>, available: Size) -> Result<Size> {
    let padding = ctx.node()?.padding;
    let Groups { rails, fills, free } = groups(ctx);

    let mut claimed_w = padding.horizontal();
    let mut claimed_h = padding.vertical();
    let mut natural = Size::new(claimed_w, claimed_h);

    for (child, dock) in rails {
        let m = ctx.measure_child(child, available.shrink(claimed_w, claimed_h))?;
        if matches!(dock, Dock::Left | Dock::Right) {
            natural.h = natural.h.max(claimed_h.saturating_add(m.h));
            claimed_w = claimed_w.saturating_add(m.w);
        } else {
            natural.w = natural.w.max(claimed_w.saturating_add(m.w));
            claimed_h = claimed_h.saturating_add(m.h);
        }
    }

    for child in fills {
        let m = ctx.measure_child(child, available.shrink(claimed_w, claimed_h))?;
        natural.w = natural.w.max(claimed_w.saturating_add(m.w));
        natural.h = natural.h.max(claimed_h.saturating_add(m.h));
    }
    natural.w = natural.w.max(claimed_w);
    natural.h = natural.h.max(claimed_h);

    for child in free {
        let m = ctx.measure_child(child, available)?;
        let at = ctx.core().get(child)?.desired;
        let right = padding
            .horizontal()
            .saturating_add(at.x.max(0))
            .saturating_add(m.w);
        let bottom = padding
            .vertical()
            .saturating_add(at.y.max(0))
            .saturating_add(m.h);
        natural.w = natural.w.max(right);
        natural.h = natural.h.max(bottom);
    }

    Ok(natural)
}

/// Place the children of a docking container inside `size` and record the
/// remaining fill area as the node's inner bounds.
pub fn arrange(ctx: &mut Context<'_>, size: Size) -> Result<Size> {
    let padding = ctx.node()?.padding;
    let Groups { rails, fills, free } = groups(ctx);

    let mut inner = Rect::from_size(size).inset(padding);
    for (child, dock) in rails {
        let m = ctx.core().get(child)?.measured;
        let slot = match dock {
            Dock::Left => {
                let w = m.w.min(inner.w);
                let slot = Rect::new(inner.x, inner.y, w, inner.h);
                inner.x += w;
                inner.w -= w;
                slot
            }
            Dock::Right => {
                let w = m.w.min(inner.w);
                inner.w -= w;
                Rect::new(inner.right(), inner.y, w, inner.h)
            }
            Dock::Top => {
                let h = m.h.min(inner.h);
                let slot = Rect::new(inner.x, inner.y, inner.w, h);
                inner.y += h;
                inner.h -= h;
                slot
            }
            _ => {
                let h = m.h.min(inner.h);
                inner.h -= h;
                Rect::new(inner.x, inner.bottom(), inner.w, h)
            }
        };
        ctx.arrange_child(child, slot)?;
    }

    for child in fills {
        ctx.arrange_child(child, inner)?;
    }
    let node = ctx.node_id();
    ctx.core_mut().get_mut(node)?.inner_bounds = inner;

    for child in free {
        let n = ctx.core().get(child)?;
        let slot = Rect::new(
            padding.left.saturating_add(n.desired.x),
            padding.top.saturating_add(n.desired.y),
            n.measured.w,
            n.measured.h,
        );
        ctx.arrange_child(child, slot)?;
    }

    Ok(size)
}
