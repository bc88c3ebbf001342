use std::fmt::{self, Display, Formatter};
use std::ops::{Add, Sub};

// signed so that neighbors of border cells are representable
// and bounds checks can be done on the position itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub r: i32,
    pub c: i32,
}

impl Pos {
    pub fn new(r: i32, c: i32) -> Pos {
        Pos { r, c }
    }

    pub fn manhattan(self, other: Pos) -> i32 {
        (self.r - other.r).abs() + (self.c - other.c).abs()
    }

    pub fn euclidean(self, other: Pos) -> f64 {
        let dr = f64::from(self.r - other.r);
        let dc = f64::from(self.c - other.c);
        (dr * dr + dc * dc).sqrt()
    }

    pub fn neighbors(self) -> [Pos; 4] {
        [
            self + Dir::Up,
            self + Dir::Right,
            self + Dir::Down,
            self + Dir::Left,
        ]
    }
}

impl Display for Pos {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.r, self.c)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Right,
    Down,
    Left,
}

pub const DIRECTIONS: [Dir; 4] = [Dir::Up, Dir::Right, Dir::Down, Dir::Left];

impl Dir {
    pub fn inverse(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Right => Dir::Left,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
        }
    }

    fn offset(self) -> (i32, i32) {
        match self {
            Dir::Up => (-1, 0),
            Dir::Right => (0, 1),
            Dir::Down => (1, 0),
            Dir::Left => (0, -1),
        }
    }
}

impl Display for Dir {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Dir::Up => write!(f, "u"),
            Dir::Right => write!(f, "r"),
            Dir::Down => write!(f, "d"),
            Dir::Left => write!(f, "l"),
        }
    }
}

impl Add<Dir> for Pos {
    type Output = Pos;

    fn add(self, dir: Dir) -> Pos {
        let (dr, dc) = dir.offset();
        Pos {
            r: self.r + dr,
            c: self.c + dc,
        }
    }
}

impl Sub<Dir> for Pos {
    type Output = Pos;

    fn sub(self, dir: Dir) -> Pos {
        self + dir.inverse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapCell {
    Wall,
    Empty,
    Target,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances() {
        let a = Pos::new(1, 1);
        let b = Pos::new(4, 5);
        assert_eq!(a.manhattan(b), 7);
        assert_eq!(b.manhattan(a), 7);
        assert_eq!(a.euclidean(b), 5.0);
        assert_eq!(a.manhattan(a), 0);
    }

    #[test]
    fn moving() {
        let pos = Pos::new(0, 0);
        assert_eq!(pos + Dir::Up, Pos::new(-1, 0));
        assert_eq!(pos + Dir::Right - Dir::Right, pos);
        assert_eq!(
            pos.neighbors(),
            [
                Pos::new(-1, 0),
                Pos::new(0, 1),
                Pos::new(1, 0),
                Pos::new(0, -1)
            ]
        );
    }
}
