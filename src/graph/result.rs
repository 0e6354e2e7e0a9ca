//! The knowledge lattice of game outcomes and the fold engine.
//!
//! A [`GraphResult`] describes what is currently known about the outcome of a
//! position under perfect play. As the graph grows, results only move toward
//! more information:
//!
//! ```text
//!                 Unknown
//!               /         \
//!      WhiteWontWin     BlackWontWin
//!        /      \         /      \
//!   BlackWins     Draw            WhiteWins
//! ```
//!
//! [`ResultFold`] reduces the results of a node's children to the result of
//! the node itself, one child at a time.

use serde::{Deserialize, Serialize};

use crate::graph::game::{GameStatus, Player};

/// What is known about the result of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GraphResult {
    /// Nothing is known, every outcome is possible.
    Unknown,
    /// Either a draw, or Black wins.
    WhiteWontWin,
    /// Either a draw, or White wins.
    BlackWontWin,
    /// White wins.
    WhiteWins,
    /// Black wins.
    BlackWins,
    /// Draw.
    Draw,
}

impl GraphResult {
    /// All six results, in declaration order.
    pub const ALL: [GraphResult; 6] = [
        GraphResult::Unknown,
        GraphResult::WhiteWontWin,
        GraphResult::BlackWontWin,
        GraphResult::WhiteWins,
        GraphResult::BlackWins,
        GraphResult::Draw,
    ];

    /// The known result matching a final status; `None` for non-final ones.
    pub fn from_status(status: GameStatus) -> Option<Self> {
        match status {
            GameStatus::WhiteWins => Some(GraphResult::WhiteWins),
            GameStatus::BlackWins => Some(GraphResult::BlackWins),
            GameStatus::Draw => Some(GraphResult::Draw),
            GameStatus::WhiteMoves | GameStatus::BlackMoves => None,
        }
    }

    /// The result where `player` wins.
    pub fn win(player: Player) -> Self {
        match player {
            Player::White => GraphResult::WhiteWins,
            Player::Black => GraphResult::BlackWins,
        }
    }

    /// The result where `player` cannot win.
    pub fn wont_win(player: Player) -> Self {
        match player {
            Player::White => GraphResult::WhiteWontWin,
            Player::Black => GraphResult::BlackWontWin,
        }
    }

    /// Returns `true` if this is the literal win of `player`.
    pub fn is_win_for(self, player: Player) -> bool {
        self == Self::win(player)
    }

    /// Returns `true` for `WhiteWins`, `BlackWins` and `Draw`. Known results
    /// are final and never revised.
    pub fn is_known(self) -> bool {
        matches!(
            self,
            GraphResult::WhiteWins | GraphResult::BlackWins | GraphResult::Draw
        )
    }

    /// The final status for a known result; `None` otherwise.
    pub fn as_status(self) -> Option<GameStatus> {
        match self {
            GraphResult::WhiteWins => Some(GameStatus::WhiteWins),
            GraphResult::BlackWins => Some(GameStatus::BlackWins),
            GraphResult::Draw => Some(GameStatus::Draw),
            _ => None,
        }
    }

    /// The result obtained by switching the players.
    pub fn other(self) -> Self {
        match self {
            GraphResult::WhiteWins => GraphResult::BlackWins,
            GraphResult::BlackWins => GraphResult::WhiteWins,
            GraphResult::WhiteWontWin => GraphResult::BlackWontWin,
            GraphResult::BlackWontWin => GraphResult::WhiteWontWin,
            GraphResult::Draw => GraphResult::Draw,
            GraphResult::Unknown => GraphResult::Unknown,
        }
    }

    /// Returns `true` if `self` carries at least the information of `earlier`,
    /// i.e. going from `earlier` to `self` never discards knowledge.
    pub fn refines(self, earlier: GraphResult) -> bool {
        if self == earlier || earlier == GraphResult::Unknown {
            return true;
        }
        match earlier {
            GraphResult::WhiteWontWin => {
                matches!(self, GraphResult::BlackWins | GraphResult::Draw)
            }
            GraphResult::BlackWontWin => {
                matches!(self, GraphResult::WhiteWins | GraphResult::Draw)
            }
            _ => false,
        }
    }
}

/// A child result seen from the player to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Standing {
    Win,
    Loss,
    Draw,
    /// The opponent cannot win down this line.
    AtLeastDraw,
    /// The mover cannot win down this line.
    AtMostDraw,
    Unknown,
}

impl Standing {
    fn of(result: GraphResult, mover: Player) -> Self {
        match result {
            GraphResult::Unknown => Standing::Unknown,
            GraphResult::Draw => Standing::Draw,
            r if r == GraphResult::win(mover) => Standing::Win,
            r if r == GraphResult::win(mover.other()) => Standing::Loss,
            r if r == GraphResult::wont_win(mover) => Standing::AtMostDraw,
            _ => Standing::AtLeastDraw,
        }
    }

    fn to_result(self, mover: Player) -> GraphResult {
        match self {
            Standing::Win => GraphResult::win(mover),
            Standing::Loss => GraphResult::win(mover.other()),
            Standing::Draw => GraphResult::Draw,
            Standing::AtLeastDraw => GraphResult::wont_win(mover.other()),
            Standing::AtMostDraw => GraphResult::wont_win(mover),
            Standing::Unknown => GraphResult::Unknown,
        }
    }

    /// The transition function of the fold. Symmetric in its arguments, and
    /// `Loss` is its neutral element.
    fn merge(self, child: Standing) -> Standing {
        use Standing::*;
        match (self, child) {
            (Win, _) | (_, Win) => Win,
            (Loss, other) | (other, Loss) => other,
            (AtLeastDraw, _) | (_, AtLeastDraw) => AtLeastDraw,
            (Draw, Unknown) | (Unknown, Draw) => AtLeastDraw,
            (Unknown, _) | (_, Unknown) => Unknown,
            (Draw, _) | (_, Draw) => Draw,
            (AtMostDraw, AtMostDraw) => AtMostDraw,
        }
    }
}

/// Incremental reduction of child results to the result of their parent.
///
/// Folding is O(1) per child, never allocates, and the final result does not
/// depend on the order in which children are supplied.
///
/// # Example
/// ```
/// use game_graph::graph::{GraphResult, Player, ResultFold};
///
/// let result = ResultFold::start(Player::White)
///     .with_move(GraphResult::Draw)
///     .with_move(GraphResult::BlackWins)
///     .result();
/// assert_eq!(result, Some(GraphResult::Draw));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultFold {
    mover: Player,
    standing: Option<Standing>,
}

impl ResultFold {
    /// Starts a fold for a position where `mover` is to move.
    pub fn start(mover: Player) -> Self {
        Self {
            mover,
            standing: None,
        }
    }

    /// Includes one more move leading to a position with `child` result.
    pub fn with_move(self, child: GraphResult) -> Self {
        let child = Standing::of(child, self.mover);
        let standing = match self.standing {
            None => child,
            Some(current) => current.merge(child),
        };
        Self {
            mover: self.mover,
            standing: Some(standing),
        }
    }

    /// The result implied by the moves seen so far; `None` if no move was
    /// supplied.
    pub fn result(self) -> Option<GraphResult> {
        self.standing.map(|s| s.to_result(self.mover))
    }
}

/// Folds all `children` for `mover` in one go.
pub fn fold_results<I>(mover: Player, children: I) -> Option<GraphResult>
where
    I: IntoIterator<Item = GraphResult>,
{
    children
        .into_iter()
        .fold(ResultFold::start(mover), ResultFold::with_move)
        .result()
}
