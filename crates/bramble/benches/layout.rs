use std::hint::black_box;

use bramble::{
    Invalidation, NodeId, Result,
    geom::Size,
    layout::Dock,
    testing::harness::Harness,
};
use criterion::{Criterion, criterion_group, criterion_main};

/// Build a toolbar, a sidebar and a body holding `rows` virtual rows of three
/// cells each.
fn wide_tree(rows: usize) -> Result<(Harness, Vec<NodeId>)> {
    let mut h = Harness::new(1280, 800);
    let root = h.root();
    let toolbar = h.panel(root, Dock::Top)?;
    h.core_mut().set_height(toolbar, 32)?;
    let sidebar = h.panel(root, Dock::Left)?;
    h.core_mut().set_width(sidebar, 200)?;
    let body = h.panel(root, Dock::Fill)?;

    let mut cells = Vec::with_capacity(rows * 3);
    for _ in 0..rows {
        let row = h.panel(body, Dock::Top)?;
        h.core_mut().set_virtual(row, true)?;
        for dock in [Dock::Left, Dock::Right, Dock::Fill] {
            let (cell, _) = h.probe(row, dock, Size::new(80, 18))?;
            cells.push(cell);
        }
    }
    h.frame()?;
    Ok((h, cells))
}

fn benchmark_full_layout(c: &mut Criterion) {
    c.bench_function("full_layout_1000_rows", |b| {
        let Ok((mut h, _)) = wide_tree(1000) else {
            return;
        };
        let mut width = 1280;
        b.iter(|| {
            // Alternate sizes so every frame is a real resize.
            width = if width == 1280 { 1279 } else { 1280 };
            if h.canvas.set_size(Size::new(width, 800)).is_ok() {
                black_box(h.frame().ok());
            }
        });
    });
}

fn benchmark_partial_layout(c: &mut Criterion) {
    c.bench_function("deferred_layout_1000_rows", |b| {
        let Ok((mut h, cells)) = wide_tree(1000) else {
            return;
        };
        let mut i = 0;
        b.iter(|| {
            i = (i + 97) % cells.len();
            h.core_mut().invalidate(cells[i]);
            black_box(h.frame().ok());
        });
    });
}

criterion_group!(benches, benchmark_full_layout, benchmark_partial_layout);
criterion_main!(benches);
