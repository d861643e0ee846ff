//! Layout vocabulary and the two-pass Measure/Arrange protocol.
//!
//! Layout runs in two phases. During *measure* every node reports the size it
//! would like given a budget offered by its parent. During *arrange* the parent
//! hands each child its final slot and the child positions itself (and, in turn,
//! its own children) inside it. Containers use the docking arranger in [`dock`]
//! unless their widget overrides the hooks.

/// Context handed to widget hooks.
mod context;
/// The default docking arranger.
pub mod dock;
/// Measure/Arrange protocol driven by [`Core`](crate::Core).
mod protocol;

pub use context::Context;
pub use protocol::LayoutProtocol;

/// The edge of its container a node is laid out against.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub enum Dock {
    /// Placed at its explicit offset, independent of siblings.
    #[default]
    None,
    /// Consumes width from the left edge.
    Left,
    /// Consumes height from the top edge.
    Top,
    /// Consumes width from the right edge.
    Right,
    /// Consumes height from the bottom edge.
    Bottom,
    /// Receives whatever space the rails leave.
    Fill,
}

impl Dock {
    /// True for the four edge docks.
    pub fn is_rail(&self) -> bool {
        matches!(self, Self::Left | Self::Top | Self::Right | Self::Bottom)
    }
}

/// Horizontal placement of a node inside its slot.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub enum HorizontalAlignment {
    /// Anchor at the left edge.
    #[default]
    Left,
    /// Split the slack evenly.
    Center,
    /// Push to the right edge.
    Right,
    /// Take the whole slot width.
    Stretch,
}

/// Vertical placement of a node inside its slot.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub enum VerticalAlignment {
    /// Anchor at the top edge.
    #[default]
    Top,
    /// Split the slack evenly.
    Center,
    /// Push to the bottom edge.
    Bottom,
    /// Take the whole slot height.
    Stretch,
}

/// An explicit position and size request.
///
/// `width`/`height` of `None` mean "auto": the container decides. The offset is
/// only honoured for nodes docked [`Dock::None`].
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct DesiredBounds {
    /// Left offset inside the parent's padded area.
    pub x: i32,
    /// Top offset inside the parent's padded area.
    pub y: i32,
    /// Explicit width.
    pub width: Option<i32>,
    /// Explicit height.
    pub height: Option<i32>,
}
