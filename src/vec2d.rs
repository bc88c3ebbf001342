use std::fmt::{self, Debug, Formatter};
use std::ops::Index;

use crate::data::{MapCell, Pos};

#[derive(Clone, PartialEq, Eq)]
pub(crate) struct Vec2d<T> {
    data: Vec<T>,
    rows: i32,
    cols: i32,
}

impl<T> Vec2d<T> {
    pub(crate) fn rows(&self) -> i32 {
        self.rows
    }

    pub(crate) fn cols(&self) -> i32 {
        self.cols
    }

    pub(crate) fn contains(&self, pos: Pos) -> bool {
        pos.r >= 0 && pos.c >= 0 && pos.r < self.rows && pos.c < self.cols
    }

    pub(crate) fn get(&self, pos: Pos) -> Option<&T> {
        if self.contains(pos) {
            Some(&self[pos])
        } else {
            None
        }
    }

    fn offset(&self, pos: Pos) -> usize {
        debug_assert!(self.contains(pos), "{} out of bounds", pos);
        // unchecked indexing is only marginally faster (if at all) to justify unsafe
        pos.r as usize * self.cols as usize + pos.c as usize
    }
}

impl Vec2d<MapCell> {
    pub(crate) fn new(grid: &[Vec<MapCell>]) -> Self {
        let max_cols = grid.iter().map(Vec::len).max().unwrap_or(0);
        let mut data = Vec::with_capacity(grid.len() * max_cols);
        for row in grid {
            data.extend_from_slice(row);
            // pad all rows to have the same length
            for _ in row.len()..max_cols {
                data.push(MapCell::Empty);
            }
        }
        Vec2d {
            data,
            rows: grid.len() as i32,
            cols: max_cols as i32,
        }
    }
}

impl<T: Debug> Debug for Vec2d<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.cols == 0 {
            return Ok(());
        }
        for row in self.data.chunks(self.cols as usize) {
            writeln!(f, "{:?}", row)?;
        }
        Ok(())
    }
}

impl<T> Index<Pos> for Vec2d<T> {
    type Output = T;

    fn index(&self, index: Pos) -> &Self::Output {
        &self.data[self.offset(index)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding() {
        let grid = Vec2d::new(&[
            vec![MapCell::Wall, MapCell::Wall, MapCell::Wall],
            vec![MapCell::Wall],
        ]);
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid[Pos::new(1, 2)], MapCell::Empty);
        assert_eq!(grid.get(Pos::new(2, 0)), None);
        assert_eq!(grid.get(Pos::new(0, -1)), None);
        assert_eq!(format!("{:?}", grid), "[Wall, Wall, Wall]\n[Wall, Empty, Empty]\n");
    }
}
