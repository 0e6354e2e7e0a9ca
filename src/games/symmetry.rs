//! Symmetry groups of square boards.
//!
//! Cells are addressed as `(x, y)` with `0 <= x, y < size`. Every symmetry of
//! the square is written as an optional swap of the two coordinates followed
//! by optional mirroring of each coordinate (`c -> size - 1 - c`). That
//! representation makes composition and inversion a few boolean operations.

use serde::{Deserialize, Serialize};

use crate::graph::Transformation;

/// The eight symmetries of a square board. None of them switches players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SquareSymmetry {
    /// `(x, y) -> (x, y)`
    Identity,
    /// Mirror along the vertical axis: `(x, y) -> (n-1-x, y)`
    Horizontal,
    /// Mirror along the horizontal axis: `(x, y) -> (x, n-1-y)`
    Vertical,
    /// `(x, y) -> (y, n-1-x)`
    Rot90,
    /// `(x, y) -> (n-1-x, n-1-y)`
    Rot180,
    /// `(x, y) -> (n-1-y, x)`
    Rot270,
    /// Mirror along the main diagonal: `(x, y) -> (y, x)`
    MajorDiagonal,
    /// Mirror along the anti-diagonal: `(x, y) -> (n-1-y, n-1-x)`
    MinorDiagonal,
}

impl SquareSymmetry {
    /// All elements, identity first.
    pub const ALL: [SquareSymmetry; 8] = [
        SquareSymmetry::Identity,
        SquareSymmetry::Horizontal,
        SquareSymmetry::Vertical,
        SquareSymmetry::Rot90,
        SquareSymmetry::Rot180,
        SquareSymmetry::Rot270,
        SquareSymmetry::MajorDiagonal,
        SquareSymmetry::MinorDiagonal,
    ];

    /// `(swap, mirror x, mirror y)`
    fn parts(self) -> (bool, bool, bool) {
        match self {
            SquareSymmetry::Identity => (false, false, false),
            SquareSymmetry::Horizontal => (false, true, false),
            SquareSymmetry::Vertical => (false, false, true),
            SquareSymmetry::Rot180 => (false, true, true),
            SquareSymmetry::MajorDiagonal => (true, false, false),
            SquareSymmetry::Rot90 => (true, false, true),
            SquareSymmetry::Rot270 => (true, true, false),
            SquareSymmetry::MinorDiagonal => (true, true, true),
        }
    }

    fn from_parts(parts: (bool, bool, bool)) -> Self {
        match parts {
            (false, false, false) => SquareSymmetry::Identity,
            (false, true, false) => SquareSymmetry::Horizontal,
            (false, false, true) => SquareSymmetry::Vertical,
            (false, true, true) => SquareSymmetry::Rot180,
            (true, false, false) => SquareSymmetry::MajorDiagonal,
            (true, false, true) => SquareSymmetry::Rot90,
            (true, true, false) => SquareSymmetry::Rot270,
            (true, true, true) => SquareSymmetry::MinorDiagonal,
        }
    }

    /// Where the cell `(x, y)` of a `size`×`size` board lands.
    pub fn map(self, x: usize, y: usize, size: usize) -> (usize, usize) {
        let (swap, mirror_x, mirror_y) = self.parts();
        let (x, y) = if swap { (y, x) } else { (x, y) };
        (
            if mirror_x { size - 1 - x } else { x },
            if mirror_y { size - 1 - y } else { y },
        )
    }
}

impl Transformation for SquareSymmetry {
    fn is_identity(&self) -> bool {
        *self == SquareSymmetry::Identity
    }

    fn is_player_switching(&self) -> bool {
        false
    }

    fn inverse(&self) -> Self {
        let (swap, mirror_x, mirror_y) = self.parts();
        if swap {
            Self::from_parts((true, mirror_y, mirror_x))
        } else {
            *self
        }
    }

    fn compose(&self, then: &Self) -> Self {
        let (swap_a, ax, ay) = self.parts();
        let (swap_b, bx, by) = then.parts();
        // Moving `then`'s swap in front of our mirrors exchanges them.
        let (ax, ay) = if swap_b { (ay, ax) } else { (ax, ay) };
        Self::from_parts((swap_a ^ swap_b, ax ^ bx, ay ^ by))
    }
}

/// A square symmetry, optionally combined with swapping the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwitchableSquareSymmetry {
    /// The geometric part.
    pub board: SquareSymmetry,
    /// Whether White and Black trade places.
    pub switch: bool,
}

impl SwitchableSquareSymmetry {
    /// The neutral element.
    pub const IDENTITY: SwitchableSquareSymmetry = SwitchableSquareSymmetry {
        board: SquareSymmetry::Identity,
        switch: false,
    };

    /// Combine a board symmetry with an optional player switch.
    pub fn new(board: SquareSymmetry, switch: bool) -> Self {
        Self { board, switch }
    }

    /// All sixteen elements, identity first, each board symmetry followed by
    /// its switching twin.
    pub fn all() -> impl Iterator<Item = SwitchableSquareSymmetry> {
        SquareSymmetry::ALL
            .into_iter()
            .flat_map(|board| [false, true].map(|switch| Self::new(board, switch)))
    }

    /// Where the cell `(x, y)` of a `size`×`size` board lands.
    pub fn map(self, x: usize, y: usize, size: usize) -> (usize, usize) {
        self.board.map(x, y, size)
    }
}

impl Transformation for SwitchableSquareSymmetry {
    fn is_identity(&self) -> bool {
        self.board.is_identity() && !self.switch
    }

    fn is_player_switching(&self) -> bool {
        self.switch
    }

    fn inverse(&self) -> Self {
        Self::new(self.board.inverse(), self.switch)
    }

    fn compose(&self, then: &Self) -> Self {
        Self::new(self.board.compose(&then.board), self.switch ^ then.switch)
    }
}
