//! Game trait definitions for the graph engine.
//!
//! Any game that implements the `Game` trait can be explored and solved by
//! the graph. This provides a clean abstraction between the engine and the
//! rules of specific games.

use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// One of the two players. Usually, but not necessarily, White moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// The player called White.
    White,
    /// The player called Black.
    Black,
}

impl Player {
    /// Returns the other player.
    pub fn other(self) -> Self {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// The final status in which this player has won.
    pub fn win_status(self) -> GameStatus {
        match self {
            Player::White => GameStatus::WhiteWins,
            Player::Black => GameStatus::BlackWins,
        }
    }

    /// The status in which this player is to move.
    pub fn move_status(self) -> GameStatus {
        match self {
            Player::White => GameStatus::WhiteMoves,
            Player::Black => GameStatus::BlackMoves,
        }
    }
}

/// The status of a position: the player to move, or the outcome if the
/// position is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// White is to move.
    WhiteMoves,
    /// Black is to move.
    BlackMoves,
    /// Final position, White has won.
    WhiteWins,
    /// Final position, Black has won.
    BlackWins,
    /// Final position, nobody has won.
    Draw,
}

impl GameStatus {
    /// Returns `true` if this status describes a final position.
    pub fn is_final(self) -> bool {
        !matches!(self, GameStatus::WhiteMoves | GameStatus::BlackMoves)
    }

    /// The player to move, or `None` for final statuses.
    pub fn current_player(self) -> Option<Player> {
        match self {
            GameStatus::WhiteMoves => Some(Player::White),
            GameStatus::BlackMoves => Some(Player::Black),
            _ => None,
        }
    }

    /// The winner of a final position; `None` for draws and non-final statuses.
    pub fn winner(self) -> Option<Player> {
        match self {
            GameStatus::WhiteWins => Some(Player::White),
            GameStatus::BlackWins => Some(Player::Black),
            _ => None,
        }
    }

    /// Returns the status obtained by switching the players.
    pub fn other(self) -> Self {
        match self {
            GameStatus::WhiteMoves => GameStatus::BlackMoves,
            GameStatus::BlackMoves => GameStatus::WhiteMoves,
            GameStatus::WhiteWins => GameStatus::BlackWins,
            GameStatus::BlackWins => GameStatus::WhiteWins,
            GameStatus::Draw => GameStatus::Draw,
        }
    }
}

/// Trait for symmetry transformations acting on positions and moves.
///
/// Transformations form a group: there is an identity, every element has an
/// inverse, and composition is associative. A transformation may also switch
/// the players, in which case it flips the side to move and the winner of
/// every status it touches.
pub trait Transformation: Copy + Eq + Hash + Debug {
    /// Returns `true` exactly for the neutral element of the group.
    fn is_identity(&self) -> bool;

    /// Returns `true` if applying this transformation swaps White and Black.
    fn is_player_switching(&self) -> bool;

    /// The transformation undoing this one.
    fn inverse(&self) -> Self;

    /// The transformation equivalent to applying `self`, then `then`.
    fn compose(&self, then: &Self) -> Self;
}

/// Trait for moves of a game.
///
/// A move only has meaning in relation to a position. Two equal moves must be
/// valid in the same positions and lead to equal positions.
pub trait Move<T: Transformation>: Clone + Eq + Hash + Debug {
    /// Applies a transformation to the move.
    ///
    /// If `m` is valid in `p`, then `m.transform(t)` is valid in
    /// `p.transform(t)` and leads to `p.play(m).transform(t)`.
    fn transform(&self, t: &T) -> Self;
}

/// Trait for game positions.
///
/// A position contains all the state that is needed to determine every move
/// sequence starting from it. Positions are immutable values.
///
/// # Laws
///
/// - Equal positions have the same status, the same move list (in the same
///   order), and lead to equal positions for each move.
/// - A position has no legal moves if and only if its status is final.
/// - `p.transform(t).transform(&t.inverse()) == p`.
/// - `p.find_transformation_to(q) == Some(t)` implies `p.transform(t) == q`.
pub trait Position: Clone + Eq + Hash + Debug {
    /// The transformation type acting on this position.
    type Transformation: Transformation;

    /// The move type of this position.
    type Move: Move<Self::Transformation>;

    /// The player to move, or the outcome for final positions.
    fn status(&self) -> GameStatus;

    /// The legal moves, in a stable order. Empty for final positions.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Applies a legal move and returns the resulting position.
    ///
    /// # Panics
    /// May panic if `mv` is not one of [`Position::legal_moves`].
    fn play(&self, mv: &Self::Move) -> Self;

    /// Applies a transformation and returns the resulting position.
    fn transform(&self, t: &Self::Transformation) -> Self;

    /// Finds a transformation `t` with `self.transform(t) == *target`.
    fn find_transformation_to(&self, target: &Self) -> Option<Self::Transformation>;
}

/// A cheap invariant of positions used to partition the symmetry search.
///
/// If `p.find_transformation_to(q)` is `Some`, then `category(p)` must equal
/// `category(q)`. The converse is not required.
pub trait CategoryFunction<P> {
    /// Computes the category of a position.
    fn category(&self, position: &P) -> i64;
}

impl<P, F> CategoryFunction<P> for F
where
    F: Fn(&P) -> i64,
{
    fn category(&self, position: &P) -> i64 {
        self(position)
    }
}

/// The main Game trait that defines the interface for any game.
///
/// # Example
/// ```ignore
/// struct MyGame;
///
/// impl Game for MyGame {
///     type Position = MyPosition;
///     type Category = fn(&MyPosition) -> i64;
///
///     // ... implement required methods
/// }
/// ```
pub trait Game {
    /// The position type of the game.
    type Position: Position;

    /// The category function used to bucket positions.
    type Category: CategoryFunction<Self::Position>;

    /// A human-readable name.
    fn name(&self) -> &str;

    /// The position the graph is rooted at.
    fn initial_position(&self) -> Self::Position;

    /// The category function of this game.
    fn category_function(&self) -> &Self::Category;

    /// The identity element of the game's transformation group.
    fn identity(&self) -> <Self::Position as Position>::Transformation;

    /// An upper bound on the number of legal moves in any reachable position.
    fn max_possible_moves(&self) -> usize;
}

/// Shorthand for the transformation type of a game.
pub type TransformationOf<G> = <<G as Game>::Position as Position>::Transformation;

/// Shorthand for the move type of a game.
pub type MoveOf<G> = <<G as Game>::Position as Position>::Move;
