//! Match cursors: walking the graph move by move.
//!
//! A [`GraphMatch`] tracks the position of a match as the players see it,
//! while standing on the normal node whose canonical position is a symmetric
//! image of it. The accumulated transformation `τ` satisfies
//! `node.position == position.transform(τ)` on every frame, so moves are
//! translated with `τ` before they are looked up in the graph, and results
//! are flipped back when `τ` switches the players.

use crate::graph::error::GraphError;
use crate::graph::game::{Game, Move, MoveOf, Position, Transformation, TransformationOf};
use crate::graph::node::{NodeId, NodeKind};
use crate::graph::result::GraphResult;
use crate::graph::store::Graph;

struct Frame<P: Position> {
    position: P,
    node: NodeId,
    to_graph: P::Transformation,
    moves: Vec<P::Move>,
    chosen: Option<P::Move>,
}

/// A match in progress on a [`Graph`].
///
/// Playing a move that the graph has not seen yet adds it to the graph and
/// propagates whatever can be learned from it. The cursor holds the graph
/// mutably, so only one match can be active at a time.
pub struct GraphMatch<'g, G: Game> {
    graph: &'g mut Graph<G>,
    frames: Vec<Frame<G::Position>>,
}

impl<'g, G: Game> GraphMatch<'g, G> {
    pub(crate) fn new(graph: &'g mut Graph<G>) -> Self {
        let mut frames = Vec::with_capacity(graph.config().frame_capacity);
        let position = graph.game().initial_position();
        let moves = position.legal_moves();
        frames.push(Frame {
            node: graph.root(),
            to_graph: graph.game().identity(),
            position,
            moves,
            chosen: None,
        });
        Self { graph, frames }
    }

    fn current(&self) -> &Frame<G::Position> {
        // The root frame is never popped.
        &self.frames[self.frames.len() - 1]
    }

    /// The current position of the match.
    pub fn position(&self) -> &G::Position {
        &self.current().position
    }

    /// Number of legal moves in the current position.
    pub fn move_count(&self) -> usize {
        self.current().moves.len()
    }

    /// The legal move at `index`, if any.
    pub fn legal_move(&self, index: usize) -> Option<&MoveOf<G>> {
        self.current().moves.get(index)
    }

    /// All legal moves of the current position.
    pub fn legal_moves(&self) -> &[MoveOf<G>] {
        &self.current().moves
    }

    /// Play a legal move of the current position.
    pub fn play(&mut self, mv: &MoveOf<G>) -> Result<(), GraphError> {
        match self.current().moves.iter().position(|m| m == mv) {
            Some(index) => self.play_index(index),
            None => Err(GraphError::IllegalMove(format!("{:?}", mv))),
        }
    }

    /// Play the legal move at `index`.
    pub fn play_index(&mut self, index: usize) -> Result<(), GraphError> {
        let last = self.frames.len() - 1;
        let frame = &mut self.frames[last];
        let count = frame.moves.len();
        let mv = frame
            .moves
            .get(index)
            .cloned()
            .ok_or(GraphError::MoveIndexOutOfRange { index, count })?;

        let graph_move = mv.transform(&frame.to_graph);
        let slot = self
            .graph
            .position_of(frame.node)
            .legal_moves()
            .iter()
            .position(|m| *m == graph_move)
            .unwrap_or_else(|| {
                panic!(
                    "move {:?} maps to {:?}, which is not legal in node {}",
                    mv, graph_move, frame.node
                )
            });

        let child = self.graph.child_at(frame.node, slot, &graph_move);
        let (node, to_graph) = match self.graph.node_ref(child).kind() {
            NodeKind::Transformation {
                transformation,
                linked,
            } => (*linked, frame.to_graph.compose(transformation)),
            NodeKind::Normal { .. } => (child, frame.to_graph),
        };

        let position = frame.position.play(&mv);
        frame.chosen = Some(mv);
        let moves = position.legal_moves();
        self.frames.push(Frame {
            position,
            node,
            to_graph,
            moves,
            chosen: None,
        });
        Ok(())
    }

    /// Take back the last move.
    pub fn back(&mut self) -> Result<(), GraphError> {
        if self.frames.len() <= 1 {
            return Err(GraphError::NoMoveToUndo);
        }
        self.frames.pop();
        if let Some(frame) = self.frames.last_mut() {
            frame.chosen = None;
        }
        Ok(())
    }

    /// What the graph currently knows about the current position.
    pub fn result(&self) -> GraphResult {
        let frame = self.current();
        let result = self.graph.node_ref(frame.node).result();
        if frame.to_graph.is_player_switching() {
            result.other()
        } else {
            result
        }
    }

    /// Number of moves played so far.
    pub fn len(&self) -> usize {
        self.frames.len() - 1
    }

    /// Returns `true` if no move has been played yet.
    pub fn is_empty(&self) -> bool {
        self.frames.len() == 1
    }

    /// The match history: every position, with the move played from it.
    /// The move is `None` for the current position.
    pub fn points(&self) -> impl Iterator<Item = (&G::Position, Option<&MoveOf<G>>)> + '_ {
        self.frames
            .iter()
            .map(|frame| (&frame.position, frame.chosen.as_ref()))
    }

    /// The normal node the cursor stands on.
    pub fn node(&self) -> NodeId {
        self.current().node
    }

    /// The transformation mapping the current position onto the node's
    /// canonical position.
    pub fn transformation(&self) -> &TransformationOf<G> {
        &self.current().to_graph
    }

    /// The graph this match walks.
    pub fn graph(&self) -> &Graph<G> {
        self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::TicTacToe;

    #[test]
    fn test_back_at_root_fails() {
        let mut graph = Graph::new(TicTacToe::new());
        let mut game = graph.create_match();
        assert_eq!(game.back(), Err(GraphError::NoMoveToUndo));
        assert!(game.is_empty());
    }

    #[test]
    fn test_play_then_back_restores_state() {
        let mut graph = Graph::new(TicTacToe::new());
        let mut game = graph.create_match();
        game.play_index(2).unwrap();

        let position = game.position().clone();
        let node = game.node();
        let transformation = *game.transformation();
        let result = game.result();

        game.play_index(3).unwrap();
        assert_eq!(game.len(), 2);
        game.back().unwrap();

        assert_eq!(game.position(), &position);
        assert_eq!(game.node(), node);
        assert_eq!(game.transformation(), &transformation);
        assert_eq!(game.result(), result);
        assert_eq!(game.points().last().map(|(_, m)| m.is_none()), Some(true));
    }

    #[test]
    fn test_illegal_moves_rejected() {
        let mut graph = Graph::new(TicTacToe::new());
        let mut game = graph.create_match();
        let first = game.legal_move(0).cloned().unwrap();
        game.play(&first).unwrap();

        assert!(matches!(game.play(&first), Err(GraphError::IllegalMove(_))));
        assert_eq!(
            game.play_index(8),
            Err(GraphError::MoveIndexOutOfRange { index: 8, count: 8 })
        );
        assert_eq!(game.len(), 1);
    }

    #[test]
    fn test_cursor_tracks_transformation() {
        let mut graph = Graph::new(TicTacToe::new());
        {
            let mut game = graph.create_match();
            game.play_index(0).unwrap();
        }
        let mut game = graph.create_match();
        game.play_index(8).unwrap();

        let canonical = game.graph().node(game.node()).unwrap().position().cloned();
        assert_eq!(
            Some(game.position().transform(game.transformation())),
            canonical
        );
        assert!(!game.transformation().is_identity());
    }

    #[test]
    fn test_points_record_history() {
        let mut graph = Graph::new(TicTacToe::new());
        let mut game = graph.create_match();
        game.play_index(4).unwrap();
        game.play_index(0).unwrap();

        let history: Vec<_> = game.points().collect();
        assert_eq!(history.len(), 3);
        assert!(history[0].1.is_some());
        assert!(history[1].1.is_some());
        assert!(history[2].1.is_none());
    }
}
