//! The graph store: node arena, category buckets and result propagation.
//!
//! Every position reached through the graph is either owned by a normal node
//! or mapped onto one by a transformation node. Positions are looked up by
//! their category first, and only positions in the same category are tested
//! for symmetry.
//!
//! Whenever a child slot is filled, the parent's result is folded again. If
//! it changed, the change travels upward: along a chain of single parents
//! directly, and through a deduplicating worklist wherever a node has several
//! parents. Known results are never recomputed.

use log::{debug, trace};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::graph::config::{GraphConfig, GraphStats};
use crate::graph::cursor::GraphMatch;
use crate::graph::error::GraphError;
use crate::graph::game::{
    CategoryFunction, Game, MoveOf, Position, Transformation, TransformationOf,
};
use crate::graph::node::{Node, NodeId, NodeKind};
use crate::graph::result::{GraphResult, ResultFold};

/// An incrementally built, symmetry-reduced game graph.
///
/// # Example
/// ```
/// use game_graph::games::tictactoe::TicTacToe;
/// use game_graph::graph::Graph;
///
/// let mut graph = Graph::new(TicTacToe::new());
/// assert_eq!(graph.size(), 1);
///
/// let mut game = graph.create_match();
/// game.play_index(4).unwrap();
/// assert_eq!(game.len(), 1);
/// ```
pub struct Graph<G: Game> {
    game: G,
    config: GraphConfig,
    nodes: Vec<Node<G::Position>>,
    categories: FxHashMap<i64, Vec<NodeId>>,
    root: NodeId,
    stats: GraphStats,
}

impl<G: Game> Graph<G> {
    /// Create a graph holding only the initial position of `game`.
    pub fn new(game: G) -> Self {
        Self::with_config(game, GraphConfig::default())
    }

    /// Create a graph with explicit allocation settings.
    pub fn with_config(game: G, config: GraphConfig) -> Self {
        let mut graph = Self {
            nodes: Vec::with_capacity(config.initial_capacity),
            categories: FxHashMap::default(),
            root: NodeId(0),
            stats: GraphStats::new(),
            game,
            config,
        };

        let initial = graph.game.initial_position();
        let category = graph.game.category_function().category(&initial);
        graph.root = graph.create_normal(initial, category);
        debug!("created graph for {} rooted at {}", graph.game.name(), graph.root);
        graph
    }

    /// Start a new match at the root. Playing moves through the match grows
    /// the graph.
    pub fn create_match(&mut self) -> GraphMatch<'_, G> {
        GraphMatch::new(self)
    }

    /// Number of nodes of both kinds.
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    /// The node of the initial position.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The current result of the initial position.
    pub fn root_result(&self) -> GraphResult {
        self.nodes[self.root.index()].result()
    }

    /// Looks up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node<G::Position>> {
        self.nodes.get(id.index())
    }

    /// All nodes with their ids, in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node<G::Position>)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId::from_index(index), node))
    }

    /// The game this graph explores.
    pub fn game(&self) -> &G {
        &self.game
    }

    /// The configuration the graph was created with.
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Growth and propagation statistics.
    pub fn stats(&self) -> &GraphStats {
        &self.stats
    }

    /// Fill child slot `index` of normal node `node` and return the child.
    ///
    /// The slot must still be empty. Use a match cursor to follow edges that
    /// may already exist.
    pub fn expand(&mut self, node: NodeId, index: usize) -> Result<NodeId, GraphError> {
        let parent = self
            .nodes
            .get(node.index())
            .filter(|n| n.is_normal())
            .ok_or(GraphError::NotANormalNode(node))?;

        let count = parent.child_count();
        if index >= count {
            return Err(GraphError::MoveIndexOutOfRange { index, count });
        }
        if parent.child(index).is_some() {
            return Err(GraphError::SlotAlreadyFilled { node, index });
        }

        let mv = self.position_of(node).legal_moves().swap_remove(index);
        Ok(self.child_at(node, index, &mv))
    }

    pub(crate) fn node_ref(&self, id: NodeId) -> &Node<G::Position> {
        &self.nodes[id.index()]
    }

    /// The position of a normal node.
    ///
    /// # Panics
    /// Panics if `id` is a transformation node.
    pub(crate) fn position_of(&self, id: NodeId) -> &G::Position {
        match self.nodes[id.index()].position() {
            Some(position) => position,
            None => panic!("node {} is a transformation node", id),
        }
    }

    /// The child of `node` for `mv`, the move in slot `index`, creating it
    /// if needed. Repeated calls return the same child.
    pub(crate) fn child_at(&mut self, node: NodeId, index: usize, mv: &MoveOf<G>) -> NodeId {
        if let Some(child) = self.nodes[node.index()].child(index) {
            return child;
        }

        let next = self.position_of(node).play(mv);
        let child = self.find_or_create(next);

        self.nodes[node.index()].set_child(index, child);
        self.nodes[child.index()].add_parent(node);
        self.stats.edges += 1;

        if !self.nodes[node.index()].result().is_known() {
            self.propagate(node);
        }
        child
    }

    /// Returns the node standing for `position`: an existing normal node, a
    /// transformation node onto one, or a new normal node.
    fn find_or_create(&mut self, position: G::Position) -> NodeId {
        let category = self.game.category_function().category(&position);

        let found = self.categories.get(&category).and_then(|bucket| {
            bucket.iter().find_map(|&candidate| {
                let target = self.nodes[candidate.index()].position()?;
                position
                    .find_transformation_to(target)
                    .map(|t| (candidate, t))
            })
        });

        let Some((target, transformation)) = found else {
            return self.create_normal(position, category);
        };

        assert!(
            position.transform(&transformation) == *self.position_of(target),
            "transformation {:?} does not map {:?} onto node {}",
            transformation,
            position,
            target
        );

        if transformation.is_identity() {
            debug!("position already in graph as {}", target);
            return target;
        }

        let existing = self.nodes[target.index()]
            .parents()
            .iter()
            .copied()
            .find(|&parent| {
                matches!(
                    self.nodes[parent.index()].kind(),
                    NodeKind::Transformation { transformation: t, linked }
                        if *t == transformation && *linked == target
                )
            });

        match existing {
            Some(id) => {
                debug!("reusing transformation node {} onto {}", id, target);
                id
            }
            None => self.create_transformation(transformation, target),
        }
    }

    fn create_normal(&mut self, position: G::Position, category: i64) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        let node = Node::new_normal(position);
        debug_assert!(
            node.child_count() <= self.game.max_possible_moves(),
            "node {} has {} moves, more than {} allows",
            id,
            node.child_count(),
            self.game.name()
        );
        self.nodes.push(node);

        let capacity = self.config.bucket_capacity;
        self.categories
            .entry(category)
            .or_insert_with(|| Vec::with_capacity(capacity))
            .push(id);

        self.stats.normal_nodes += 1;
        self.stats.categories = self.categories.len();
        debug!("new normal node {} in category {}", id, category);
        id
    }

    fn create_transformation(
        &mut self,
        transformation: TransformationOf<G>,
        linked: NodeId,
    ) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        let linked_result = self.nodes[linked.index()].result();
        self.nodes
            .push(Node::new_transformation(transformation, linked, linked_result));
        self.nodes[linked.index()].add_parent(id);

        self.stats.transformation_nodes += 1;
        debug!(
            "new transformation node {} onto {} via {:?}",
            id, linked, transformation
        );
        id
    }

    /// Recompute `start` and push every resulting change to its ancestors.
    fn propagate(&mut self, start: NodeId) {
        let mut changed = 0;
        let mut current = start;

        // Chains of single parents need no bookkeeping.
        loop {
            if !self.refresh(current) {
                self.finish_wave(start, changed);
                return;
            }
            changed += 1;

            match self.nodes[current.index()].parents() {
                [single] => current = *single,
                _ => break,
            }
        }

        let mut pending: FxHashSet<NodeId> = FxHashSet::default();
        let mut stack: Vec<NodeId> = Vec::new();
        for &parent in self.nodes[current.index()].parents() {
            if pending.insert(parent) {
                stack.push(parent);
            }
        }

        while let Some(id) = stack.pop() {
            pending.remove(&id);
            if !self.refresh(id) {
                continue;
            }
            changed += 1;
            for &parent in self.nodes[id.index()].parents() {
                if pending.insert(parent) {
                    stack.push(parent);
                }
            }
        }

        self.finish_wave(start, changed);
    }

    fn finish_wave(&mut self, start: NodeId, changed: usize) {
        if changed > 0 {
            trace!("propagation from {} changed {} results", start, changed);
        }
        self.stats.record_wave(changed);
    }

    /// Derive the result of `id` from its children or its linked node.
    /// Returns `true` if the cached result changed.
    fn refresh(&mut self, id: NodeId) -> bool {
        let node = &self.nodes[id.index()];
        let old = node.result();
        if old.is_known() {
            return false;
        }
        self.stats.nodes_recomputed += 1;

        let new = match node.kind() {
            NodeKind::Normal {
                status, children, ..
            } => {
                let Some(mover) = status.current_player() else {
                    return false;
                };
                children
                    .iter()
                    .map(|slot| match slot {
                        Some(child) => self.nodes[child.index()].result(),
                        None => GraphResult::Unknown,
                    })
                    .fold(ResultFold::start(mover), ResultFold::with_move)
                    .result()
                    .unwrap_or(GraphResult::Unknown)
            }
            NodeKind::Transformation {
                transformation,
                linked,
            } => {
                let linked_result = self.nodes[linked.index()].result();
                if transformation.is_player_switching() {
                    linked_result.other()
                } else {
                    linked_result
                }
            }
        };

        if new == old {
            return false;
        }
        debug_assert!(new.refines(old), "result of {} went from {:?} to {:?}", id, old, new);
        self.nodes[id.index()].set_result(new);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::reversi::Reversi4;
    use crate::games::tictactoe::TicTacToe;
    use crate::graph::game::GameStatus;
    use crate::graph::testing::{Flaw, FlawedGame};

    #[test]
    fn test_new_graph_has_root_only() {
        let graph = Graph::new(TicTacToe::new());
        assert_eq!(graph.size(), 1);
        assert_eq!(graph.root(), NodeId(0));
        assert_eq!(graph.root_result(), GraphResult::Unknown);
        assert_eq!(graph.stats().normal_nodes, 1);
        assert_eq!(graph.stats().categories, 1);
    }

    #[test]
    fn test_expand_creates_and_rejects_refill() {
        let mut graph = Graph::new(TicTacToe::new());
        let root = graph.root();

        let child = graph.expand(root, 0).unwrap();
        assert_eq!(graph.node(root).unwrap().child(0), Some(child));
        assert_eq!(graph.node(child).unwrap().parents(), &[root]);
        assert_eq!(
            graph.expand(root, 0),
            Err(GraphError::SlotAlreadyFilled { node: root, index: 0 })
        );
        assert_eq!(
            graph.expand(root, 9),
            Err(GraphError::MoveIndexOutOfRange { index: 9, count: 9 })
        );
        assert_eq!(
            graph.expand(NodeId(99), 0),
            Err(GraphError::NotANormalNode(NodeId(99)))
        );
    }

    #[test]
    fn test_symmetric_corners_share_one_normal_node() {
        let mut graph = Graph::new(TicTacToe::new());
        let root = graph.root();

        // Slots 0, 2, 6 and 8 are the four corners.
        let corners: Vec<NodeId> = [0, 2, 6, 8]
            .iter()
            .map(|&i| graph.expand(root, i).unwrap())
            .collect();

        let normal: Vec<NodeId> = corners
            .iter()
            .filter(|&&id| graph.node(id).unwrap().is_normal())
            .copied()
            .collect();
        assert_eq!(normal.len(), 1);

        for &id in &corners {
            let node = graph.node(id).unwrap();
            if let Some(linked) = node.linked() {
                assert_eq!(linked, normal[0]);
                assert!(graph.node(normal[0]).unwrap().parents().contains(&id));
            }
        }
        assert_eq!(graph.stats().normal_nodes, 2);
        assert_eq!(graph.stats().transformation_nodes, 3);
    }

    #[test]
    fn test_child_at_is_idempotent() {
        let mut graph = Graph::new(TicTacToe::new());
        let root = graph.root();
        let mv = graph.position_of(root).legal_moves()[4];
        let first = graph.child_at(root, 4, &mv);
        let size = graph.size();
        assert_eq!(graph.child_at(root, 4, &mv), first);
        assert_eq!(graph.size(), size);
        assert_eq!(graph.stats().edges, 1);
    }

    #[test]
    fn test_distinct_replies_get_distinct_nodes() {
        let mut graph = Graph::new(FlawedGame::new(Flaw::None));
        let root = graph.root();
        let left = graph.expand(root, 0).unwrap();
        assert_eq!(graph.root_result(), GraphResult::BlackWontWin);
        let right = graph.expand(root, 1).unwrap();

        assert_ne!(left, right);
        assert_eq!(graph.stats().normal_nodes, 3);
        assert_eq!(graph.root_result(), GraphResult::Draw);
    }

    #[test]
    #[should_panic(expected = "legal moves but status BlackMoves")]
    fn test_stuck_reply_panics_when_played() {
        let mut graph = Graph::new(FlawedGame::new(Flaw::StuckReply));
        let mut game = graph.create_match();
        let _ = game.play_index(0);
    }

    #[test]
    #[should_panic(expected = "legal moves but status Draw")]
    fn test_moves_after_end_panic_when_expanded() {
        let mut graph = Graph::new(FlawedGame::new(Flaw::MovesAfterEnd));
        let root = graph.root();
        let _ = graph.expand(root, 1);
    }

    #[test]
    #[should_panic(expected = "does not map")]
    fn test_false_symmetry_in_bucket_panics() {
        let mut graph = Graph::new(FlawedGame::new(Flaw::FalseSymmetry));
        let root = graph.root();
        graph.expand(root, 0).unwrap();
        let _ = graph.expand(root, 1);
    }

    #[test]
    fn test_final_nodes_are_known() {
        let mut graph = Graph::new(TicTacToe::new());
        let mut game = graph.create_match();
        // White takes the top row while Black plays the middle row.
        for index in [0, 0, 1, 1, 2] {
            game.play_index(index).unwrap();
        }
        let status = game.position().status();
        assert_eq!(status, GameStatus::WhiteWins);
        assert_eq!(game.result(), GraphResult::WhiteWins);
        assert_eq!(game.move_count(), 0);
    }

    #[test]
    fn test_reversi_pass_node_is_normal() {
        let mut graph = Graph::new(Reversi4::new());
        let root = graph.root();
        let child = graph.expand(root, 0).unwrap();
        assert!(graph.node(child).is_some());
        assert_eq!(graph.stats().edges, 1);
    }
}
