//! Reversi on small square boards.
//!
//! The board is stored as two bitboards, one per player, with cell `(x, y)`
//! at bit `x + 8 * y`, so any size up to 8×8 fits. A player without a legal
//! move passes; the game ends when neither player can move, and the player
//! with more tokens wins.
//!
//! Positions are identified up to the symmetries of the board, optionally
//! combined with swapping the colors of every token and the side to move.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::games::symmetry::SwitchableSquareSymmetry;
use crate::graph::{Game, GameStatus, Move, Player, Position, Transformation};

const DIRECTIONS: [(i32, i32); 8] = [
    (1, 0),
    (0, 1),
    (-1, 0),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

fn bit(x: usize, y: usize) -> u64 {
    1u64 << (x + 8 * y)
}

/// Placing a token on the cell `(x, y)` of an `N`×`N` board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReversiMove<const N: usize> {
    /// Column.
    pub x: u8,
    /// Row.
    pub y: u8,
}

impl<const N: usize> ReversiMove<N> {
    /// Creates a move.
    ///
    /// # Panics
    /// Panics if a coordinate is off the board.
    pub fn new(x: usize, y: usize) -> Self {
        assert!(x < N && y < N, "cell ({}, {}) is off the board", x, y);
        Self {
            x: x as u8,
            y: y as u8,
        }
    }
}

impl<const N: usize> Move<SwitchableSquareSymmetry> for ReversiMove<N> {
    fn transform(&self, t: &SwitchableSquareSymmetry) -> Self {
        let (x, y) = t.map(self.x as usize, self.y as usize, N);
        Self::new(x, y)
    }
}

impl<const N: usize> fmt::Display for ReversiMove<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A Reversi position on an `N`×`N` board.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReversiPosition<const N: usize> {
    white: u64,
    black: u64,
    status: GameStatus,
}

impl<const N: usize> ReversiPosition<N> {
    /// The standard opening: two tokens of each color crossed in the center,
    /// White to move.
    pub fn initial() -> Self {
        let c = N / 2 - 1;
        Self {
            white: bit(c, c) | bit(c + 1, c + 1),
            black: bit(c, c + 1) | bit(c + 1, c),
            status: GameStatus::WhiteMoves,
        }
    }

    /// The owner of the cell `(x, y)`.
    pub fn cell(&self, x: usize, y: usize) -> Option<Player> {
        assert!(x < N && y < N, "cell ({}, {}) is off the board", x, y);
        let b = bit(x, y);
        if self.white & b != 0 {
            Some(Player::White)
        } else if self.black & b != 0 {
            Some(Player::Black)
        } else {
            None
        }
    }

    /// Number of tokens on the board.
    pub fn token_count(&self) -> u32 {
        (self.white | self.black).count_ones()
    }

    /// Number of tokens of `player`.
    pub fn tokens_of(&self, player: Player) -> u32 {
        Self::own(self.white, self.black, player).count_ones()
    }

    fn own(white: u64, black: u64, player: Player) -> u64 {
        match player {
            Player::White => white,
            Player::Black => black,
        }
    }

    /// The tokens flipped if `player` moves to `(x, y)`; zero if the move is
    /// not legal.
    fn flips(white: u64, black: u64, player: Player, x: usize, y: usize) -> u64 {
        if (white | black) & bit(x, y) != 0 {
            return 0;
        }
        let mine = Self::own(white, black, player);
        let theirs = Self::own(white, black, player.other());
        let n = N as i32;

        let mut flipped = 0;
        for (dx, dy) in DIRECTIONS {
            let mut line = 0;
            let (mut cx, mut cy) = (x as i32 + dx, y as i32 + dy);
            while cx >= 0 && cy >= 0 && cx < n && cy < n {
                let b = bit(cx as usize, cy as usize);
                if theirs & b != 0 {
                    line |= b;
                } else {
                    if mine & b != 0 {
                        flipped |= line;
                    }
                    break;
                }
                cx += dx;
                cy += dy;
            }
        }
        flipped
    }

    fn can_move(white: u64, black: u64, player: Player) -> bool {
        (0..N).any(|x| (0..N).any(|y| Self::flips(white, black, player, x, y) != 0))
    }

    /// Status of a board where `mover` has just moved.
    fn status_after(white: u64, black: u64, mover: Player) -> GameStatus {
        let next = mover.other();
        if Self::can_move(white, black, next) {
            return next.move_status();
        }
        if Self::can_move(white, black, mover) {
            return mover.move_status();
        }
        let (w, b) = (white.count_ones(), black.count_ones());
        if w > b {
            GameStatus::WhiteWins
        } else if w < b {
            GameStatus::BlackWins
        } else {
            GameStatus::Draw
        }
    }
}

impl<const N: usize> Position for ReversiPosition<N> {
    type Transformation = SwitchableSquareSymmetry;
    type Move = ReversiMove<N>;

    fn status(&self) -> GameStatus {
        self.status
    }

    fn legal_moves(&self) -> Vec<ReversiMove<N>> {
        let Some(player) = self.status.current_player() else {
            return Vec::new();
        };
        let mut moves = Vec::new();
        for x in 0..N {
            for y in 0..N {
                if Self::flips(self.white, self.black, player, x, y) != 0 {
                    moves.push(ReversiMove::new(x, y));
                }
            }
        }
        moves
    }

    fn play(&self, mv: &ReversiMove<N>) -> Self {
        let player = match self.status.current_player() {
            Some(player) => player,
            None => panic!("no moves in final position {:?}", self),
        };
        let (x, y) = (mv.x as usize, mv.y as usize);
        let flipped = Self::flips(self.white, self.black, player, x, y);
        assert!(flipped != 0, "illegal move {}", mv);

        let placed = flipped | bit(x, y);
        let (white, black) = match player {
            Player::White => (self.white | placed, self.black & !flipped),
            Player::Black => (self.white & !flipped, self.black | placed),
        };
        Self {
            white,
            black,
            status: Self::status_after(white, black, player),
        }
    }

    fn transform(&self, t: &SwitchableSquareSymmetry) -> Self {
        let mut white = 0;
        let mut black = 0;
        for x in 0..N {
            for y in 0..N {
                let b = bit(x, y);
                let (tx, ty) = t.map(x, y, N);
                if self.white & b != 0 {
                    white |= bit(tx, ty);
                } else if self.black & b != 0 {
                    black |= bit(tx, ty);
                }
            }
        }
        if t.is_player_switching() {
            Self {
                white: black,
                black: white,
                status: self.status.other(),
            }
        } else {
            Self {
                white,
                black,
                status: self.status,
            }
        }
    }

    fn find_transformation_to(&self, target: &Self) -> Option<SwitchableSquareSymmetry> {
        if self.status.is_final() != target.status.is_final() {
            return None;
        }
        if self.token_count() != target.token_count() {
            return None;
        }
        if self == target {
            return Some(SwitchableSquareSymmetry::IDENTITY);
        }
        SwitchableSquareSymmetry::all()
            .filter(|t| !t.is_identity())
            .find(|t| self.transform(t) == *target)
    }
}

impl<const N: usize> fmt::Display for ReversiPosition<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..N {
            for x in 0..N {
                let c = match self.cell(x, y) {
                    Some(Player::White) => 'W',
                    Some(Player::Black) => 'B',
                    None => '.',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Reversi on an `N`×`N` board, `4 <= N <= 8`, `N` even.
#[derive(Debug, Clone)]
pub struct Reversi<const N: usize> {
    name: String,
    category: fn(&ReversiPosition<N>) -> i64,
}

/// Reversi on a 4×4 board.
pub type Reversi4 = Reversi<4>;

/// Reversi on a 6×6 board.
pub type Reversi6 = Reversi<6>;

fn tokens<const N: usize>(position: &ReversiPosition<N>) -> i64 {
    i64::from(position.token_count())
}

impl<const N: usize> Default for Reversi<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Reversi<N> {
    /// Create the game.
    ///
    /// # Panics
    /// Panics if `N` is odd or outside `4..=8`.
    pub fn new() -> Self {
        assert!(
            (4..=8).contains(&N) && N % 2 == 0,
            "unsupported Reversi board size {}",
            N
        );
        Self {
            name: format!("reversi{}", N),
            category: tokens::<N>,
        }
    }
}

impl<const N: usize> Game for Reversi<N> {
    type Position = ReversiPosition<N>;
    type Category = fn(&ReversiPosition<N>) -> i64;

    fn name(&self) -> &str {
        &self.name
    }

    fn initial_position(&self) -> ReversiPosition<N> {
        ReversiPosition::initial()
    }

    fn category_function(&self) -> &Self::Category {
        &self.category
    }

    fn identity(&self) -> SwitchableSquareSymmetry {
        SwitchableSquareSymmetry::IDENTITY
    }

    fn max_possible_moves(&self) -> usize {
        N * N - 4
    }
}
