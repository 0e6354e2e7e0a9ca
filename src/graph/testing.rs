//! A two-ply test game that can be told to break the position contract.

use crate::graph::game::{Game, GameStatus, Move, Position, Transformation};

/// How the game misbehaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Flaw {
    None,
    /// Replies have no moves but Black is to move.
    StuckReply,
    /// Replies are drawn but still list a move.
    MovesAfterEnd,
    /// Replies claim a symmetry that does not map them onto each other.
    FalseSymmetry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Flip(bool);

impl Transformation for Flip {
    fn is_identity(&self) -> bool {
        !self.0
    }

    fn is_player_switching(&self) -> bool {
        false
    }

    fn inverse(&self) -> Self {
        *self
    }

    fn compose(&self, then: &Self) -> Self {
        Flip(self.0 != then.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Step(u8);

impl Move<Flip> for Step {
    fn transform(&self, _: &Flip) -> Self {
        *self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct FlawedPosition {
    depth: u8,
    branch: u8,
    flaw: Flaw,
}

impl FlawedPosition {
    pub(crate) fn reply(branch: u8, flaw: Flaw) -> Self {
        Self {
            depth: 1,
            branch,
            flaw,
        }
    }
}

impl Position for FlawedPosition {
    type Transformation = Flip;
    type Move = Step;

    fn status(&self) -> GameStatus {
        match (self.depth, self.flaw) {
            (0, _) => GameStatus::WhiteMoves,
            (_, Flaw::StuckReply) => GameStatus::BlackMoves,
            _ => GameStatus::Draw,
        }
    }

    fn legal_moves(&self) -> Vec<Step> {
        match (self.depth, self.flaw) {
            (0, _) => vec![Step(0), Step(1)],
            (_, Flaw::MovesAfterEnd) => vec![Step(0)],
            _ => Vec::new(),
        }
    }

    fn play(&self, mv: &Step) -> Self {
        Self {
            depth: self.depth + 1,
            branch: mv.0,
            flaw: self.flaw,
        }
    }

    fn transform(&self, _: &Flip) -> Self {
        *self
    }

    fn find_transformation_to(&self, target: &Self) -> Option<Flip> {
        if self == target {
            Some(Flip(false))
        } else if self.flaw == Flaw::FalseSymmetry {
            Some(Flip(true))
        } else {
            None
        }
    }
}

pub(crate) struct FlawedGame {
    flaw: Flaw,
    category: fn(&FlawedPosition) -> i64,
}

impl FlawedGame {
    pub(crate) fn new(flaw: Flaw) -> Self {
        Self {
            flaw,
            category: |p| i64::from(p.depth),
        }
    }
}

impl Game for FlawedGame {
    type Position = FlawedPosition;
    type Category = fn(&FlawedPosition) -> i64;

    fn name(&self) -> &str {
        "flawed"
    }

    fn initial_position(&self) -> FlawedPosition {
        FlawedPosition {
            depth: 0,
            branch: 0,
            flaw: self.flaw,
        }
    }

    fn category_function(&self) -> &Self::Category {
        &self.category
    }

    fn identity(&self) -> Flip {
        Flip(false)
    }

    fn max_possible_moves(&self) -> usize {
        2
    }
}
