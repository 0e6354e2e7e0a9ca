//! Nodes of the game graph.
//!
//! A graph holds two kinds of nodes. A normal node stores a canonical
//! position and one child slot per legal move. A transformation node stands
//! for a position that is a symmetric image of some normal node's position;
//! it has no children of its own and derives its result from the node it is
//! linked to.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::graph::game::{GameStatus, Position, Transformation};
use crate::graph::result::GraphResult;

/// Index of a node in a graph's arena. Stable for the lifetime of the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// The arena index of this node.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn from_index(index: usize) -> Self {
        match u32::try_from(index) {
            Ok(raw) => NodeId(raw),
            Err(_) => panic!("game graph exceeded {} nodes", u32::MAX),
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a node is, together with the data specific to its kind.
#[derive(Debug, Clone)]
pub enum NodeKind<P: Position> {
    /// A node owning a canonical position.
    Normal {
        /// The canonical position.
        position: P,
        /// Cached status of `position`.
        status: GameStatus,
        /// One slot per legal move of `position`, in move order.
        children: Box<[Option<NodeId>]>,
    },
    /// A node standing for `linked`'s position under a transformation.
    Transformation {
        /// Maps the represented position onto the linked node's position.
        transformation: P::Transformation,
        /// Always a normal node.
        linked: NodeId,
    },
}

/// A node of the game graph.
#[derive(Debug, Clone)]
pub struct Node<P: Position> {
    kind: NodeKind<P>,
    parents: Vec<NodeId>,
    result: GraphResult,
}

impl<P: Position> Node<P> {
    /// Creates a normal node for `position`.
    ///
    /// # Panics
    /// Panics if the position has legal moves but a final status, or no legal
    /// moves and a non-final status.
    pub(crate) fn new_normal(position: P) -> Self {
        let status = position.status();
        let move_count = position.legal_moves().len();
        assert!(
            (move_count == 0) == status.is_final(),
            "position {:?} has {} legal moves but status {:?}",
            position,
            move_count,
            status
        );

        let result = GraphResult::from_status(status).unwrap_or(GraphResult::Unknown);
        Self {
            kind: NodeKind::Normal {
                position,
                status,
                children: vec![None; move_count].into_boxed_slice(),
            },
            parents: Vec::new(),
            result,
        }
    }

    /// Creates a transformation node linked to a normal node whose current
    /// result is `linked_result`.
    pub(crate) fn new_transformation(
        transformation: P::Transformation,
        linked: NodeId,
        linked_result: GraphResult,
    ) -> Self {
        let result = if transformation.is_player_switching() {
            linked_result.other()
        } else {
            linked_result
        };
        Self {
            kind: NodeKind::Transformation {
                transformation,
                linked,
            },
            parents: Vec::new(),
            result,
        }
    }

    /// The kind-specific data.
    pub fn kind(&self) -> &NodeKind<P> {
        &self.kind
    }

    /// Returns `true` for normal nodes.
    pub fn is_normal(&self) -> bool {
        matches!(self.kind, NodeKind::Normal { .. })
    }

    /// The cached result of this node.
    pub fn result(&self) -> GraphResult {
        self.result
    }

    pub(crate) fn set_result(&mut self, result: GraphResult) {
        self.result = result;
    }

    /// The nodes that reference this node, in registration order. A parent
    /// appears once per slot it fills with this node.
    pub fn parents(&self) -> &[NodeId] {
        &self.parents
    }

    pub(crate) fn add_parent(&mut self, parent: NodeId) {
        self.parents.push(parent);
    }

    /// The position of a normal node.
    pub fn position(&self) -> Option<&P> {
        match &self.kind {
            NodeKind::Normal { position, .. } => Some(position),
            NodeKind::Transformation { .. } => None,
        }
    }

    /// The status of a normal node's position.
    pub fn status(&self) -> Option<GameStatus> {
        match &self.kind {
            NodeKind::Normal { status, .. } => Some(*status),
            NodeKind::Transformation { .. } => None,
        }
    }

    /// Number of child slots; zero for transformation nodes.
    pub fn child_count(&self) -> usize {
        match &self.kind {
            NodeKind::Normal { children, .. } => children.len(),
            NodeKind::Transformation { .. } => 0,
        }
    }

    /// The child in slot `index`, if that slot has been filled.
    pub fn child(&self, index: usize) -> Option<NodeId> {
        match &self.kind {
            NodeKind::Normal { children, .. } => children.get(index).copied().flatten(),
            NodeKind::Transformation { .. } => None,
        }
    }

    /// All child slots; empty for transformation nodes.
    pub fn children(&self) -> &[Option<NodeId>] {
        match &self.kind {
            NodeKind::Normal { children, .. } => children,
            NodeKind::Transformation { .. } => &[],
        }
    }

    pub(crate) fn set_child(&mut self, index: usize, child: NodeId) {
        if let NodeKind::Normal { children, .. } = &mut self.kind {
            children[index] = Some(child);
        }
    }

    /// The transformation of a transformation node.
    pub fn transformation(&self) -> Option<&P::Transformation> {
        match &self.kind {
            NodeKind::Transformation { transformation, .. } => Some(transformation),
            NodeKind::Normal { .. } => None,
        }
    }

    /// The normal node a transformation node is linked to.
    pub fn linked(&self) -> Option<NodeId> {
        match &self.kind {
            NodeKind::Transformation { linked, .. } => Some(*linked),
            NodeKind::Normal { .. } => None,
        }
    }
}
