//! # Game Graph
//!
//! An incremental, symmetry-aware solver for finite deterministic two-player
//! games.
//!
//! ## Features
//!
//! - **Generic Engine**: Works with any game implementing the `Game` trait
//! - **Symmetry Reduction**: Positions equal up to a transformation share a node
//! - **Incremental Results**: Outcomes propagate toward the root as the graph grows
//! - **Partial Knowledge**: "won't win" results prune the search before a
//!   position is fully solved
//!
//! ## Quick Start
//!
//! ```
//! use game_graph::games::tictactoe::TicTacToe;
//! use game_graph::graph::{Graph, GraphResult};
//!
//! // 1. Create a graph for a game
//! let mut graph = Graph::new(TicTacToe::new());
//!
//! // 2. Play moves through a match cursor
//! let mut game = graph.create_match();
//! game.play_index(4).unwrap();
//!
//! // 3. Read what is known
//! assert_eq!(game.result(), GraphResult::Unknown);
//! ```
//!
//! ## Modules
//!
//! - [`graph`]: The graph engine, result lattice and solver drivers
//! - [`games`]: Reference games (Tic-Tac-Toe, Reversi)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       Graph Engine (Generic)                    │
//! │  - Node arena & buckets   - Symmetry-aware dedup                │
//! │  - Result fold            - Incremental propagation             │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               │ implements Game trait
//!                               ▼
//!                    ┌──────────┴──────────┐
//!                    │                     │
//!                    ▼                     ▼
//!              ┌───────────┐        ┌─────────────┐
//!              │Tic-Tac-Toe│        │ Reversi 4/6 │
//!              └───────────┘        └─────────────┘
//! ```

#![warn(missing_docs)]

/// Graph engine module.
///
/// This is the core module containing the generic game graph.
pub mod graph;

/// Game implementations module.
///
/// Contains reference games for testing and validation.
pub mod games;

// Re-export commonly used types at crate root for convenience
pub use graph::{Game, Graph, GraphConfig, GraphMatch, GraphResult, GraphStats, Position};
