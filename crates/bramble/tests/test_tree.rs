//! Integration tests for tree mutation, disposal, focus and painting.

#[cfg(test)]
mod tests {
    use bramble::{
        Core, FocusManager, Invalidation, NodeId, Widget,
        error::{Error, Result},
        geom::{Rect, Size},
        layout::{Context, Dock},
        testing::{
            harness::Harness,
            widgets::{Panel, Quad},
        },
    };
    use rand::{Rng, SeedableRng, rngs::StdRng};

    /// Disposes a target node from inside its render hook.
    struct Saboteur(NodeId);

    impl Widget for Saboteur {
        fn think(&mut self, ctx: &mut Context<'_>) -> Result<()> {
            // Disposal during the walk is deferred.
            if ctx.core().is_attached_to_root(self.0) {
                ctx.delayed_delete(self.0)?;
            }
            Ok(())
        }
    }

    #[test]
    fn paint_order_follows_child_order() -> Result<()> {
        let mut h = Harness::new(100, 100);
        let root = h.root();
        let a = h.panel(root, Dock::Fill)?;
        let b = h.panel(root, Dock::Fill)?;
        let a1 = h.panel(a, Dock::Top)?;
        h.render()?;
        assert_eq!(h.renderer.order(), vec![root, a, a1, b]);

        h.core_mut().send_to_back(b)?;
        h.render()?;
        assert_eq!(h.renderer.order(), vec![root, b, a, a1]);
        Ok(())
    }

    #[test]
    fn render_skips_hidden_and_collapsed() -> Result<()> {
        let mut h = Harness::new(100, 100);
        let root = h.root();
        let hidden = h.panel(root, Dock::Top)?;
        let under_hidden = h.panel(hidden, Dock::Fill)?;
        let collapsed = h.panel(root, Dock::Top)?;
        let shown = h.panel(root, Dock::Fill)?;
        h.core_mut().set_hidden(hidden, true)?;
        h.core_mut().set_collapsed(collapsed, true)?;
        h.core_mut().set_height(hidden, 30)?;

        h.render()?;
        assert_eq!(h.renderer.order(), vec![root, shown]);
        // Hidden nodes still take up space.
        assert_eq!(h.bounds(shown)?, Rect::new(0, 30, 100, 70));
        assert_eq!(h.bounds(under_hidden)?.size(), Size::new(100, 30));
        Ok(())
    }

    #[test]
    fn render_reports_screen_rects() -> Result<()> {
        let mut h = Harness::new(100, 100);
        let root = h.root();
        let side = h.panel(root, Dock::Left)?;
        h.core_mut().set_width(side, 20)?;
        let body = h.panel(root, Dock::Fill)?;
        let header = h.panel(body, Dock::Top)?;
        h.core_mut().set_height(header, 10)?;
        h.core_mut().set_disabled(body, true)?;
        h.core_mut().set_draw_background(header, true)?;

        h.render()?;
        let view = h
            .renderer
            .view(header)
            .ok_or(Error::NodeNotFound(header))?
            .clone();
        assert_eq!(view.bounds, Rect::new(0, 0, 80, 10));
        assert_eq!(view.screen, Rect::new(20, 0, 80, 10));
        assert_eq!(view.render_bounds, Rect::new(0, 0, 80, 10));
        assert!(view.disabled);
        assert!(view.draw_background);
        assert_eq!(view.kind, "panel");
        Ok(())
    }

    #[test]
    fn dispose_during_walk_is_deferred() -> Result<()> {
        let mut h = Harness::new(100, 100);
        let root = h.root();
        let (victim, counters) = h.probe(root, Dock::Fill, Size::ZERO)?;
        h.core_mut().add_child(root, Saboteur(victim))?;

        let report = h.frame()?;
        assert_eq!(report.disposed, 0);
        assert!(h.core().contains(victim));
        assert_eq!(counters.dispose.get(), 0);
        assert_eq!(h.core().pending_disposal(), &[victim]);

        let report = h.frame()?;
        assert_eq!(report.disposed, 1);
        assert!(!h.core().contains(victim));
        assert_eq!(counters.dispose.get(), 1);
        assert_eq!(h.core_mut().dispose(victim), Err(Error::AlreadyDisposed(victim)));
        Ok(())
    }

    #[test]
    fn deleted_nodes_are_never_painted() -> Result<()> {
        let mut h = Harness::new(100, 100);
        let root = h.root();
        let doomed = h.panel(root, Dock::Fill)?;
        h.render()?;
        h.core_mut().delayed_delete(doomed)?;
        h.render()?;
        assert_eq!(h.renderer.order(), vec![root]);
        assert!(!h.core().contains(doomed));
        Ok(())
    }

    #[test]
    fn disposing_removes_deferred_entries() -> Result<()> {
        let mut h = Harness::new(100, 100);
        let root = h.root();
        let list = h.panel(root, Dock::Fill)?;
        h.core_mut().set_virtual(list, true)?;
        h.frame()?;
        h.core_mut().invalidate(list);
        assert!(h.core().is_deferred(list));
        h.core_mut().dispose(list)?;
        assert_eq!(h.core().deferred_len(), 0);
        let report = h.frame()?;
        assert!(report.full_layout);
        Ok(())
    }

    #[test]
    fn capacity_is_enforced() -> Result<()> {
        let mut h = Harness::new(100, 100);
        let root = h.root();
        let quad = h.core_mut().add_child(root, Quad)?;
        for _ in 0..4 {
            h.panel(quad, Dock::Fill)?;
        }
        let extra = h.core_mut().create_detached(Panel);
        assert_eq!(
            h.core_mut().attach(quad, extra),
            Err(Error::ChildCapacity {
                parent: quad,
                capacity: 4
            })
        );
        Ok(())
    }

    #[test]
    fn tab_cycles_through_eligible_nodes() -> Result<()> {
        let mut h = Harness::new(100, 100);
        let root = h.root();
        let a = h.panel(root, Dock::Top)?;
        let b = h.panel(root, Dock::Top)?;
        let c = h.panel(root, Dock::Top)?;
        let hidden = h.panel(root, Dock::Top)?;
        for id in [a, b, c, hidden] {
            h.core_mut().set_tabable(id, true)?;
        }
        h.core_mut().set_hidden(hidden, true)?;
        h.core_mut().set_disabled(b, true)?;

        h.frame()?;
        assert_eq!(h.core_mut().focus_next_tab(), Some(a));
        h.frame()?;
        assert_eq!(h.core_mut().focus_next_tab(), Some(c));
        h.frame()?;
        assert_eq!(h.core_mut().focus_next_tab(), Some(a));
        Ok(())
    }

    #[test]
    fn focus_is_dropped_when_node_becomes_ineligible() -> Result<()> {
        let mut h = Harness::new(100, 100);
        let root = h.root();
        let panel = h.panel(root, Dock::Fill)?;
        let field = h.panel(panel, Dock::Top)?;
        assert!(h.core_mut().set_keyboard_focus(field));
        h.core_mut().set_collapsed(panel, true)?;
        h.frame()?;
        assert_eq!(h.core().keyboard_focus(), None);
        Ok(())
    }

    #[test]
    fn hit_testing_prefers_topmost() -> Result<()> {
        let mut h = Harness::new(200, 100);
        let root = h.root();
        let side = h.panel(root, Dock::Left)?;
        h.core_mut().set_width(side, 50)?;
        let body = h.panel(root, Dock::Fill)?;
        let popup = h.panel(body, Dock::None)?;
        h.core_mut().set_size(popup, Size::new(30, 30))?;
        h.core_mut().set_position(popup, 10, 10)?;
        h.frame()?;

        let core = h.core();
        assert_eq!(core.get_control_at(5, 5), Some(side));
        assert_eq!(core.get_control_at(65, 15), Some(popup));
        assert_eq!(core.get_control_at(150, 90), Some(body));
        assert_eq!(core.get_control_at(250, 50), None);
        Ok(())
    }

    #[test]
    fn reattach_under_new_parent_is_laid_out() -> Result<()> {
        let mut h = Harness::new(200, 100);
        let root = h.root();
        let left = h.panel(root, Dock::Left)?;
        h.core_mut().set_width(left, 50)?;
        let right = h.panel(root, Dock::Fill)?;
        let item = h.panel(left, Dock::Fill)?;
        h.core_mut().set_virtual(item, true)?;
        h.frame()?;
        assert_eq!(h.screen(item)?, Rect::new(0, 0, 50, 100));

        h.core_mut().detach(item)?;
        h.core_mut().attach(right, item)?;
        h.frame()?;
        assert_eq!(h.screen(item)?, Rect::new(50, 0, 150, 100));
        Ok(())
    }

    /// Every node reachable from the root through non-collapsed nodes is clean.
    fn assert_clean(core: &Core) {
        let mut stack = vec![core.root_id()];
        while let Some(id) = stack.pop() {
            let Some(node) = core.node(id) else {
                continue;
            };
            if node.is_collapsed() {
                continue;
            }
            assert!(!node.needs_layout(), "{id:?} still dirty");
            stack.extend(node.children().iter().copied());
        }
        assert_eq!(core.deferred_len(), 0);
    }

    #[test]
    fn random_mutation_stress() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut h = Harness::new(640, 480);
        let mut live = vec![h.root()];
        let docks = [
            Dock::None,
            Dock::Left,
            Dock::Top,
            Dock::Right,
            Dock::Bottom,
            Dock::Fill,
        ];

        for _ in 0..400 {
            let target = live[rng.random_range(0..live.len())];
            match rng.random_range(0..8) {
                0..=2 => {
                    let dock = docks[rng.random_range(0..docks.len())];
                    let id = h.panel(target, dock)?;
                    h.core_mut()
                        .set_size(id, Size::new(rng.random_range(0..80), rng.random_range(0..80)))?;
                    live.push(id);
                }
                3 if target != h.root() => {
                    h.core_mut().delayed_delete(target)?;
                    live.retain(|id| *id != target);
                }
                4 if target != h.root() => {
                    let collapsed = h.core().get(target)?.is_collapsed();
                    h.core_mut().set_collapsed(target, !collapsed)?;
                }
                5 => {
                    h.core_mut().set_virtual(target, rng.random_bool(0.5))?;
                }
                6 => {
                    h.core_mut().invalidate(target);
                }
                _ => {
                    h.frame()?;
                    live.retain(|id| h.core().is_attached_to_root(*id));
                    assert_clean(h.core());
                }
            }
        }
        h.frame()?;
        h.frame()?;
        assert_clean(h.core());
        h.core().debug_assert_tree_invariants();
        Ok(())
    }
}
