use std::fmt::Debug;

use crate::data::Pos;

/// A move as seen by the solvers - opaque apart from its category.
pub trait PuzzleMove: Copy + Debug {
    /// Pull moves drag a box behind the player, everything else counts as a push.
    fn is_pull(&self) -> bool;
}

/// Everything the heuristics and solvers need from a puzzle state.
///
/// Solvers never mutate a state they didn't clone themselves.
pub trait PuzzleState: Clone {
    type Move: PuzzleMove;

    /// Box positions, the index is the box id. Positions are unique.
    fn boxes(&self) -> &[Pos];

    fn player_pos(&self) -> Pos;

    fn targets(&self) -> &[Pos];

    fn is_obstacle(&self, pos: Pos) -> bool;

    fn rows(&self) -> i32;

    fn cols(&self) -> i32;

    /// True iff every box is on a target.
    fn is_solved(&self) -> bool;

    /// The order must be stable - it decides which solution IDA* finds first.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Only defined for moves returned by `legal_moves` on the same state.
    fn apply_move(&mut self, mov: Self::Move);

    fn in_bounds(&self, pos: Pos) -> bool {
        pos.r >= 0 && pos.c >= 0 && pos.r < self.rows() && pos.c < self.cols()
    }

    /// Obstacle or outside of the grid.
    fn is_wall(&self, pos: Pos) -> bool {
        !self.in_bounds(pos) || self.is_obstacle(pos)
    }

    fn is_target(&self, pos: Pos) -> bool {
        self.targets().contains(&pos)
    }

    fn key(&self) -> StateKey {
        StateKey::new(self.player_pos(), self.boxes().to_vec())
    }
}

/// Identifies a configuration regardless of box ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateKey {
    player_pos: Pos,
    boxes: Vec<Pos>,
}

impl StateKey {
    pub fn new(player_pos: Pos, mut boxes: Vec<Pos>) -> StateKey {
        // sort to detect equal states when boxes are reordered
        boxes.sort();
        StateKey { player_pos, boxes }
    }
}
