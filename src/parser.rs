use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::data::{MapCell, Pos};
use crate::level::Level;
use crate::vec2d::Vec2d;

const MAX_SIZE: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserErr {
    Pos(usize, usize),
    TooLarge,
    MultiplePlayers,
    NoPlayer,
    BoxesTargets(usize, usize),
}

impl Display for ParserErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ParserErr::Pos(r, c) => write!(f, "Invalid cell at pos: [{}, {}]", r, c),
            ParserErr::TooLarge => write!(f, "Map larger than {} rows/columns", MAX_SIZE),
            ParserErr::MultiplePlayers => write!(f, "More than one player"),
            ParserErr::NoPlayer => write!(f, "No player"),
            ParserErr::BoxesTargets(boxes, targets) => write!(
                f,
                "Different number of boxes ({}) and targets ({})",
                boxes, targets
            ),
        }
    }
}

impl Error for ParserErr {}

impl FromStr for Level {
    type Err = ParserErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Parses (a subset of) the format described [here](http://www.sokobano.de/wiki/index.php?title=Level_format)
pub(crate) fn parse(level: &str) -> Result<Level, ParserErr> {
    // trim so we can specify levels using raw strings more easily
    let level = level.trim_matches('\n').trim_end();

    let mut grid = Vec::new();
    let mut targets = Vec::new();
    let mut boxes = Vec::new();
    let mut player_pos = None;

    for (r, line) in level.lines().enumerate() {
        if r >= MAX_SIZE {
            return Err(ParserErr::TooLarge);
        }
        let mut line_tiles = Vec::new();
        for (c, cur_char) in line.chars().enumerate() {
            if c >= MAX_SIZE {
                return Err(ParserErr::TooLarge);
            }
            let pos = Pos::new(r as i32, c as i32);

            let tile = match cur_char {
                '#' => MapCell::Wall,
                'p' | '@' => {
                    if player_pos.is_some() {
                        return Err(ParserErr::MultiplePlayers);
                    }
                    player_pos = Some(pos);
                    MapCell::Empty
                }
                'P' | '+' => {
                    if player_pos.is_some() {
                        return Err(ParserErr::MultiplePlayers);
                    }
                    player_pos = Some(pos);
                    targets.push(pos);
                    MapCell::Target
                }
                'b' | '$' => {
                    boxes.push(pos);
                    MapCell::Empty
                }
                'B' | '*' => {
                    boxes.push(pos);
                    targets.push(pos);
                    MapCell::Target
                }
                '.' => {
                    targets.push(pos);
                    MapCell::Target
                }
                ' ' | '-' | '_' => MapCell::Empty,
                _ => return Err(ParserErr::Pos(r, c)),
            };
            line_tiles.push(tile);
        }
        grid.push(line_tiles);
    }

    let player_pos = player_pos.ok_or(ParserErr::NoPlayer)?;
    if boxes.len() != targets.len() {
        return Err(ParserErr::BoxesTargets(boxes.len(), targets.len()));
    }

    Ok(Level::new(Vec2d::new(&grid), targets, boxes, player_pos))
}
