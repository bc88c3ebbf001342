use std::fmt::{self, Debug, Display, Formatter};

use crate::data::{MapCell, Pos, DIRECTIONS};
use crate::moves::{Move, MoveKind};
use crate::state::PuzzleState;
use crate::vec2d::Vec2d;

/// A grid with walls and targets plus the current positions of the player and boxes.
#[derive(Clone, PartialEq, Eq)]
pub struct Level {
    grid: Vec2d<MapCell>,
    targets: Vec<Pos>,
    boxes: Vec<Pos>,
    player_pos: Pos,
}

impl Level {
    pub(crate) fn new(
        grid: Vec2d<MapCell>,
        targets: Vec<Pos>,
        boxes: Vec<Pos>,
        player_pos: Pos,
    ) -> Self {
        Level {
            grid,
            targets,
            boxes,
            player_pos,
        }
    }

    /// Applies `moves` to a copy of this level.
    pub fn replay<'a, I>(&self, moves: I) -> Level
    where
        I: IntoIterator<Item = &'a Move>,
    {
        let mut level = self.clone();
        for &mov in moves {
            level.apply_move(mov);
        }
        level
    }

    fn box_index(&self, pos: Pos) -> Option<usize> {
        self.boxes.iter().position(|&b| b == pos)
    }

    /// Walkable and not occupied by a box.
    fn is_free(&self, pos: Pos) -> bool {
        !self.is_wall(pos) && self.box_index(pos).is_none()
    }

    fn move_box(&mut self, from: Pos, to: Pos) {
        let index = self
            .box_index(from)
            .expect("Move is not legal - there is no box to move");
        self.boxes[index] = to;
    }
}

impl PuzzleState for Level {
    type Move = Move;

    fn boxes(&self) -> &[Pos] {
        &self.boxes
    }

    fn player_pos(&self) -> Pos {
        self.player_pos
    }

    fn targets(&self) -> &[Pos] {
        &self.targets
    }

    fn is_obstacle(&self, pos: Pos) -> bool {
        self.grid.get(pos) == Some(&MapCell::Wall)
    }

    fn rows(&self) -> i32 {
        self.grid.rows()
    }

    fn cols(&self) -> i32 {
        self.grid.cols()
    }

    fn is_solved(&self) -> bool {
        // has to test all boxes are on a target, not that all targets have a box
        self.boxes
            .iter()
            .all(|&b| self.grid.get(b) == Some(&MapCell::Target))
    }

    fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();

        for &dir in &DIRECTIONS {
            let new_player_pos = self.player_pos + dir;
            if self.is_wall(new_player_pos) {
                continue;
            }
            if self.box_index(new_player_pos).is_none() {
                moves.push(Move::new(dir, MoveKind::Step));
            } else if self.is_free(new_player_pos + dir) {
                moves.push(Move::new(dir, MoveKind::Push));
            }
        }

        for &dir in &DIRECTIONS {
            let new_player_pos = self.player_pos + dir;
            if self.is_free(new_player_pos) && self.box_index(self.player_pos - dir).is_some() {
                moves.push(Move::new(dir, MoveKind::Pull));
            }
        }

        moves
    }

    fn apply_move(&mut self, mov: Move) {
        let old_player_pos = self.player_pos;
        let new_player_pos = old_player_pos + mov.dir;
        match mov.kind {
            MoveKind::Step => {}
            MoveKind::Push => self.move_box(new_player_pos, new_player_pos + mov.dir),
            MoveKind::Pull => self.move_box(old_player_pos - mov.dir, old_player_pos),
        }
        self.player_pos = new_player_pos;
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for r in 0..self.grid.rows() {
            // don't print trailing empty cells to match the input level strings
            let mut last_non_empty = -1;
            for c in 0..self.grid.cols() {
                let pos = Pos::new(r, c);
                if self.grid[pos] != MapCell::Empty
                    || self.player_pos == pos
                    || self.box_index(pos).is_some()
                {
                    last_non_empty = c;
                }
            }

            for c in 0..=last_non_empty {
                let pos = Pos::new(r, c);
                let has_box = self.box_index(pos).is_some();
                let has_player = self.player_pos == pos;
                let ch = match (self.grid[pos], has_box, has_player) {
                    (MapCell::Wall, _, _) => '#',
                    (MapCell::Empty, true, _) => '$',
                    (MapCell::Empty, false, true) => '@',
                    (MapCell::Empty, false, false) => ' ',
                    (MapCell::Target, true, _) => '*',
                    (MapCell::Target, false, true) => '+',
                    (MapCell::Target, false, false) => '.',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Debug for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
