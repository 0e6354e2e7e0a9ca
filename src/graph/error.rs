//! Error types for graph usage and configuration.
//!
//! Broken game invariants are not represented here: they panic, since the
//! graph cannot continue from an inconsistent state.

use thiserror::Error;

use crate::graph::node::NodeId;

/// Errors caused by using the graph or a match cursor incorrectly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// `back` was called on a cursor standing at the root.
    #[error("no move to undo: the match is at the initial position")]
    NoMoveToUndo,
    /// The move is not legal in the cursor's current position.
    #[error("move {0} is not legal in the current position")]
    IllegalMove(String),
    /// A move index past the end of the legal move list.
    #[error("move index {index} out of range for a position with {count} moves")]
    MoveIndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of legal moves.
        count: usize,
    },
    /// `expand` was called for a child slot that already has a node.
    #[error("child slot {index} of node {node} is already filled")]
    SlotAlreadyFilled {
        /// Parent node.
        node: NodeId,
        /// Child slot.
        index: usize,
    },
    /// The node is a transformation node, or does not exist.
    #[error("node {0} is not a normal node")]
    NotANormalNode(NodeId),
}

/// Errors that can occur when loading or validating a graph configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A capacity that must be positive is zero.
    #[error("{0} must be greater than zero")]
    ZeroCapacity(&'static str),
    /// The solver progress interval is zero.
    #[error("log interval must be greater than zero")]
    ZeroLogInterval,
    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration is not valid JSON for [`GraphConfig`](crate::graph::GraphConfig).
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
