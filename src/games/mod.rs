//! Game implementations for the graph solver.
//!
//! These games serve as:
//!
//! 1. **Validation**: Games with known results (Tic-Tac-Toe is a draw, 4×4
//!    Reversi is a win for Black) verify that the graph is correct.
//!
//! 2. **Examples**: Demonstrate how to implement the `Game` trait, including
//!    symmetry transformations.
//!
//! 3. **Benchmarks**: Provide standardized games for performance testing.
//!
//! ## Available Games
//!
//! - [`tictactoe`]: 3×3 Tic-Tac-Toe with the eight board symmetries
//! - [`reversi`]: Reversi on 4×4 and 6×6 boards, where color swaps are
//!   symmetries too
//!
//! ## Adding New Games
//!
//! 1. Create a new module under `src/games/`
//! 2. Define position, move and transformation types
//! 3. Implement the `Game` trait with a category function
//! 4. Add tests for the transformation laws

pub mod reversi;
pub mod symmetry;
pub mod tictactoe;
