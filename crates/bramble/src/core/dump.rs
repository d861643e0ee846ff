use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};

use crate::{
    NodeId,
    core::{Core, node::Node},
    error::Result,
    geom::{Rect, Size},
};

/// Render a subtree as a table of layout results, one row per node in
/// pre-order. This is a debug function.
pub fn layout_table(core: &Core, root: NodeId) -> Result<String> {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Disabled);
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["node", "dock", "measured", "bounds", "flags"]);

    let mut stack = vec![(root, 0usize)];
    while let Some((id, depth)) = stack.pop() {
        let node = core.get(id)?;
        table.add_row(vec![
            label(node, depth),
            format!("{:?}", node.dock),
            fmt_size(node.measured),
            fmt_rect(node.bounds),
            flags(node),
        ]);
        stack.extend(node.children.iter().rev().map(|c| (*c, depth + 1)));
    }
    Ok(table.to_string())
}

/// Indented kind, with the name appended if the node has one.
fn label(node: &Node, depth: usize) -> String {
    let indent = "  ".repeat(depth);
    match &node.name {
        Some(name) => format!("{indent}{} \"{name}\"", node.kind),
        None => format!("{indent}{}", node.kind),
    }
}

/// Format a size as `WxH`.
fn fmt_size(s: Size) -> String {
    format!("{}x{}", s.w, s.h)
}

/// Format a rect as `(x,y) WxH`.
fn fmt_rect(r: Rect) -> String {
    format!("({},{}) {}x{}", r.x, r.y, r.w, r.h)
}

/// Short markers for the flags that matter when reading a layout.
fn flags(node: &Node) -> String {
    let f = node.flags;
    let markers = [
        (f.needs_layout, "dirty"),
        (f.hidden, "hidden"),
        (f.collapsed, "collapsed"),
        (f.disabled, "disabled"),
        (f.virtual_control, "virtual"),
        (f.tabable, "tab"),
    ];
    markers
        .iter()
        .filter(|(on, _)| *on)
        .map(|(_, m)| *m)
        .collect::<Vec<_>>()
        .join(" ")
}
