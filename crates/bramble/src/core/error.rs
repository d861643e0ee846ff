use std::result::Result as StdResult;

use thiserror::Error;

use crate::NodeId;

/// Result type for bramble operations.
pub type Result<T> = StdResult<T, Error>;

/// Core error type.
///
/// Variants other than `NodeNotFound` and `Config` indicate a structural bug in
/// widget code. They are returned rather than swallowed, and a frame that hits
/// one stops immediately.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    /// The handle does not resolve to a live node.
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// A node was disposed twice.
    #[error("node already disposed: {0:?}")]
    AlreadyDisposed(NodeId),

    /// A measure hook produced an unbounded size.
    #[error("measure of {0:?} produced an infinite size")]
    InfiniteMeasure(NodeId),

    /// A fixed-capacity container was given one child too many.
    #[error("{parent:?} accepts at most {capacity} children")]
    ChildCapacity {
        /// The container that rejected the child.
        parent: NodeId,
        /// Its declared capacity.
        capacity: usize,
    },

    /// The node already has a parent.
    #[error("node already attached: {0:?}")]
    AlreadyAttached(NodeId),

    /// The attach would make a node its own ancestor.
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    WouldCreateCycle {
        /// Requested parent.
        parent: NodeId,
        /// Requested child.
        child: NodeId,
    },

    /// A widget hook re-entered its own node.
    #[error("widget for {0:?} is already in use")]
    ReentrantWidget(NodeId),

    /// The operation is not valid for this node.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// Configuration could not be loaded.
    #[error("config: {0}")]
    Config(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}
