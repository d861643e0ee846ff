//! Core types: the node arena, invalidation, focus tracking and the root
//! orchestrator.

// Core modules - public
/// The root orchestrator and its per-frame cycle.
pub mod canvas;
/// Canvas settings.
pub mod config;
/// Debug dump utilities.
pub mod dump;
/// Core error types.
pub mod error;
/// Keyboard focus, hover and mouse capture tracking.
pub mod focus;
/// Widget kind names.
pub mod kind;
/// Node data stored in the arena.
pub mod node;
/// Rendering interfaces.
pub mod render;
/// Testing utilities.
#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Core modules - internal
/// Node ID types.
pub mod id;
/// Layout invalidation and the deferred-measure queue.
pub mod invalidate;
/// Arena state and tree operations.
pub mod world;

// Public exports from internal modules
pub use canvas::{Animator, Canvas, FrameReport};
pub use config::CanvasConfig;
pub use focus::FocusManager;
pub use id::NodeId;
pub use invalidate::Invalidation;
pub use world::Core;
