//! Incremental, symmetry-aware game graph.
//!
//! This module builds and solves the state graph of a finite, deterministic
//! two-player game while it is being explored.
//!
//! # Overview
//!
//! The graph grows on demand: each time a match cursor plays a move the graph
//! has not seen, the resulting position is looked up, merged with any
//! symmetric position already in the graph, and linked to its parent. The
//! parent's result is then folded again from its children and every change
//! travels back toward the root, so results become known as soon as enough
//! of the subtree is known:
//!
//! 1. A position with no moves takes its result from its final status
//! 2. A position where the mover has a winning move is won
//! 3. A position where every move has a known result takes the best of them
//! 4. Partial knowledge ("White won't win") is kept between these
//!
//! # Usage
//!
//! 1. Implement [`Game`] (with its [`Position`], [`Move`] and
//!    [`Transformation`] types) for your game
//! 2. Create a [`Graph`] for it
//! 3. Drive it with [`Graph::create_match`], or let [`solve`] explore it
//! 4. Read results from the cursor or from [`Graph::root_result`]
//!
//! # Example
//!
//! ```
//! use game_graph::games::tictactoe::TicTacToe;
//! use game_graph::graph::{solve, Graph, GraphResult};
//!
//! let mut graph = Graph::new(TicTacToe::new());
//! let report = solve(&mut graph).unwrap();
//! assert_eq!(report.root_result, GraphResult::Draw);
//! ```
//!
//! # Results
//!
//! ```text
//! Unknown ──► WhiteWontWin ──► BlackWins | Draw
//!         └─► BlackWontWin ──► WhiteWins | Draw
//! ```
//!
//! Results only ever move to the right.

pub mod config;
pub mod cursor;
pub mod error;
pub mod game;
pub mod node;
pub mod result;
pub mod solver;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main types for convenient access
pub use config::{GraphConfig, GraphStats};
pub use cursor::GraphMatch;
pub use error::{ConfigError, GraphError};
pub use game::{
    CategoryFunction, Game, GameStatus, Move, MoveOf, Player, Position, Transformation,
    TransformationOf,
};
pub use node::{Node, NodeId, NodeKind};
pub use result::{fold_results, GraphResult, ResultFold};
pub use solver::{random_playouts, solve, solve_with_callback, PlayoutReport, SolveReport};
pub use store::Graph;
