//! Bramble: a retained-mode widget tree with a two-pass layout engine.
//!
//! Every element is a node in an arena owned by [`Core`]. Nodes are sized in
//! two passes: *measure* asks each node how large it would like to be given a
//! budget, and *arrange* hands it a final slot. Containers place their
//! children with a docking arranger. Property changes invalidate the affected
//! nodes, and the [`Canvas`] re-lays out only what is dirty on the next frame.
//!
//! # Quick Start
//!
//! The main entry points are:
//! - [`Canvas`] - The root orchestrator that drives frames
//! - [`Core`] - The arena, tree operations and property setters
//! - [`Widget`] - The trait implemented by all widgets
//!
//! # Module Organization
//!
//! - [`geom`] - Geometry primitives (Rect, Point, Size, Insets)
//! - [`layout`] - Layout vocabulary, the Measure/Arrange protocol and the
//!   docking arranger

#![warn(missing_docs)]

// Internal core module - re-export specific items below
mod core;

// Public modules
pub mod layout;
pub mod widget;

pub use bramble_geom as geom;
#[cfg(any(test, feature = "testing"))]
pub use core::testing;
// Re-export core types
pub use core::{
    Animator, Canvas, CanvasConfig, Core, FocusManager, FrameReport, Invalidation, NodeId,
};
pub use core::{dump, error, kind, node, render};
pub use error::Result;

pub use layout::LayoutProtocol;
pub use widget::Widget;
