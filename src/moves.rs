use std::fmt::{self, Debug, Display, Formatter};

use crate::data::Dir;
use crate::state::PuzzleMove;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Player moves without touching a box.
    Step,
    /// Player moves into a box and pushes it one cell.
    Push,
    /// Player moves away from a box and drags it along.
    Pull,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub dir: Dir,
    pub kind: MoveKind,
}

impl Move {
    pub fn new(dir: Dir, kind: MoveKind) -> Self {
        Move { dir, kind }
    }
}

impl PuzzleMove for Move {
    fn is_pull(&self) -> bool {
        self.kind == MoveKind::Pull
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.kind {
            MoveKind::Step => write!(f, "{}", self.dir),
            MoveKind::Push => write!(f, "{}", self.dir.to_string().to_uppercase()),
            MoveKind::Pull => write!(f, "({})", self.dir),
        }
    }
}

impl Debug for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Formats a sequence of moves - steps lowercase, pushes uppercase, pulls in parentheses.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Moves(Vec<Move>);

impl Moves {
    pub fn new(moves: Vec<Move>) -> Self {
        Moves(moves)
    }

    pub fn move_cnt(&self) -> usize {
        self.0.len()
    }

    pub fn push_cnt(&self) -> usize {
        self.iter().filter(|m| m.kind == MoveKind::Push).count()
    }

    pub fn pull_cnt(&self) -> usize {
        self.iter().filter(|m| m.is_pull()).count()
    }

    pub fn iter(&self) -> ::std::slice::Iter<'_, Move> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Moves {
    type Item = &'a Move;
    type IntoIter = ::std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for Moves {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for mov in self {
            write!(f, "{}", mov)?;
        }
        Ok(())
    }
}

impl Debug for Moves {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
