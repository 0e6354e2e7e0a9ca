//! Tic-Tac-Toe on a 3×3 board.
//!
//! White moves first. Positions are identified up to the eight symmetries of
//! the board, and bucketed by the number of marks placed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::games::symmetry::SquareSymmetry;
use crate::graph::{Game, GameStatus, Move, Player, Position, Transformation};

const SIZE: usize = 3;

/// The eight lines of three cells, as `x + 3 * y` indices.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Placing a mark on the empty cell `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicTacToeMove {
    /// Column, `0..3`.
    pub x: u8,
    /// Row, `0..3`.
    pub y: u8,
}

impl TicTacToeMove {
    /// Creates a move.
    ///
    /// # Panics
    /// Panics if a coordinate is off the board.
    pub fn new(x: usize, y: usize) -> Self {
        assert!(x < SIZE && y < SIZE, "cell ({}, {}) is off the board", x, y);
        Self {
            x: x as u8,
            y: y as u8,
        }
    }

    fn cell(self) -> usize {
        self.x as usize + SIZE * self.y as usize
    }
}

impl Move<SquareSymmetry> for TicTacToeMove {
    fn transform(&self, t: &SquareSymmetry) -> Self {
        let (x, y) = t.map(self.x as usize, self.y as usize, SIZE);
        Self::new(x, y)
    }
}

impl fmt::Display for TicTacToeMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A Tic-Tac-Toe position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TicTacToePosition {
    board: [Option<Player>; SIZE * SIZE],
    status: GameStatus,
}

impl Default for TicTacToePosition {
    fn default() -> Self {
        Self::initial()
    }
}

impl TicTacToePosition {
    /// The empty board with White to move.
    pub fn initial() -> Self {
        Self {
            board: [None; SIZE * SIZE],
            status: GameStatus::WhiteMoves,
        }
    }

    /// The owner of the cell `(x, y)`.
    pub fn cell(&self, x: usize, y: usize) -> Option<Player> {
        self.board[x + SIZE * y]
    }

    /// Number of marks on the board.
    pub fn mark_count(&self) -> usize {
        self.board.iter().flatten().count()
    }

    fn completes_line(board: &[Option<Player>; SIZE * SIZE], cell: usize, player: Player) -> bool {
        LINES
            .iter()
            .filter(|line| line.contains(&cell))
            .any(|line| line.iter().all(|&c| board[c] == Some(player)))
    }
}

impl Position for TicTacToePosition {
    type Transformation = SquareSymmetry;
    type Move = TicTacToeMove;

    fn status(&self) -> GameStatus {
        self.status
    }

    fn legal_moves(&self) -> Vec<TicTacToeMove> {
        if self.status.is_final() {
            return Vec::new();
        }
        let mut moves = Vec::with_capacity(SIZE * SIZE);
        for x in 0..SIZE {
            for y in 0..SIZE {
                if self.cell(x, y).is_none() {
                    moves.push(TicTacToeMove::new(x, y));
                }
            }
        }
        moves
    }

    fn play(&self, mv: &TicTacToeMove) -> Self {
        let cell = mv.cell();
        let player = match self.status.current_player() {
            Some(player) => player,
            None => panic!("no moves in final position {:?}", self),
        };
        assert!(self.board[cell].is_none(), "illegal move {}", mv);

        let mut board = self.board;
        board[cell] = Some(player);

        let status = if Self::completes_line(&board, cell, player) {
            player.win_status()
        } else if board.iter().all(Option::is_some) {
            GameStatus::Draw
        } else {
            player.other().move_status()
        };
        Self { board, status }
    }

    fn transform(&self, t: &SquareSymmetry) -> Self {
        let mut board = [None; SIZE * SIZE];
        for x in 0..SIZE {
            for y in 0..SIZE {
                let (tx, ty) = t.map(x, y, SIZE);
                board[tx + SIZE * ty] = self.cell(x, y);
            }
        }
        Self {
            board,
            status: self.status,
        }
    }

    fn find_transformation_to(&self, target: &Self) -> Option<SquareSymmetry> {
        if self.status != target.status {
            return None;
        }
        if self == target {
            return Some(SquareSymmetry::Identity);
        }
        SquareSymmetry::ALL
            .into_iter()
            .filter(|s| !s.is_identity())
            .find(|s| self.transform(s) == *target)
    }
}

impl fmt::Display for TicTacToePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..SIZE {
            for x in 0..SIZE {
                let c = match self.cell(x, y) {
                    Some(Player::White) => 'X',
                    Some(Player::Black) => 'O',
                    None => '.',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn marks(position: &TicTacToePosition) -> i64 {
    position.mark_count() as i64
}

/// The game of Tic-Tac-Toe.
#[derive(Debug, Clone)]
pub struct TicTacToe {
    category: fn(&TicTacToePosition) -> i64,
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl TicTacToe {
    /// Create the game.
    pub fn new() -> Self {
        Self { category: marks }
    }
}

impl Game for TicTacToe {
    type Position = TicTacToePosition;
    type Category = fn(&TicTacToePosition) -> i64;

    fn name(&self) -> &str {
        "tictactoe"
    }

    fn initial_position(&self) -> TicTacToePosition {
        TicTacToePosition::initial()
    }

    fn category_function(&self) -> &Self::Category {
        &self.category
    }

    fn identity(&self) -> SquareSymmetry {
        SquareSymmetry::Identity
    }

    fn max_possible_moves(&self) -> usize {
        SIZE * SIZE
    }
}
