//! One-shot checks for boxes that can never reach a target.
//!
//! Only boxes that are not on a target are considered.
//! Neither check simulates any moves.

use fnv::FnvHashSet;

use crate::data::{Dir, Pos};
use crate::state::PuzzleState;

fn untargeted_boxes<S: PuzzleState>(state: &S) -> FnvHashSet<Pos> {
    state
        .boxes()
        .iter()
        .cloned()
        .filter(|&b| !state.is_target(b))
        .collect()
}

/// A box with walls on two perpendicular sides can't be pushed along either axis anymore.
pub fn is_corner_deadlock<S: PuzzleState>(state: &S) -> bool {
    untargeted_boxes(state).into_iter().any(|box_pos| {
        let up = state.is_wall(box_pos + Dir::Up);
        let right = state.is_wall(box_pos + Dir::Right);
        let down = state.is_wall(box_pos + Dir::Down);
        let left = state.is_wall(box_pos + Dir::Left);
        (up || down) && (left || right)
    })
}

/// A box whose neighbors on one axis are both blocked by walls or other boxes not on targets,
/// where the blockers include at least one wall and at least one box.
///
/// Two walls alone are just a corridor and two boxes alone can still separate.
pub fn is_frozen_deadlock<S: PuzzleState>(state: &S) -> bool {
    let boxes = untargeted_boxes(state);

    let blocked = |box_pos: Pos, a: Dir, b: Dir| {
        let (pa, pb) = (box_pos + a, box_pos + b);
        let (wall_a, wall_b) = (state.is_wall(pa), state.is_wall(pb));
        let (box_a, box_b) = (boxes.contains(&pa), boxes.contains(&pb));
        (wall_a || box_a) && (wall_b || box_b) && (wall_a || wall_b) && (box_a || box_b)
    };

    boxes.iter().any(|&box_pos| {
        blocked(box_pos, Dir::Left, Dir::Right) || blocked(box_pos, Dir::Up, Dir::Down)
    })
}

pub fn is_deadlock<S: PuzzleState>(state: &S) -> bool {
    is_corner_deadlock(state) || is_frozen_deadlock(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;

    fn level(s: &str) -> Level {
        s.parse().unwrap()
    }

    #[test]
    fn corner() {
        let stuck = level(
            r"
#####
#$  #
#  @#
#  .#
#####
",
        );
        assert!(is_corner_deadlock(&stuck));
        assert!(is_deadlock(&stuck));

        let on_target = level(
            r"
#####
#*  #
#  @#
#   #
#####
",
        );
        assert!(!is_corner_deadlock(&on_target));
        assert!(!is_deadlock(&on_target));
    }

    #[test]
    fn corner_of_the_grid() {
        // out of bounds counts as wall
        let stuck = level(
            r"
$ .
 @
",
        );
        assert!(is_corner_deadlock(&stuck));
    }

    #[test]
    fn wall_on_one_side_is_not_a_corner() {
        let free = level(
            r"
######
#    #
# $@ #
#  . #
######
",
        );
        assert!(!is_corner_deadlock(&free));

        let along_wall = level(
            r"
######
#  $ #
#  @ #
#  . #
######
",
        );
        assert!(!is_corner_deadlock(&along_wall));
        assert!(!is_frozen_deadlock(&along_wall));
    }

    #[test]
    fn frozen_pair_against_wall() {
        let frozen = level(
            r"
#######
#     #
#$$ @ #
#  .. #
#######
",
        );
        assert!(!is_corner_deadlock(&frozen));
        assert!(is_frozen_deadlock(&frozen));
        assert!(is_deadlock(&frozen));
    }

    #[test]
    fn pair_with_room_to_separate() {
        let open = level(
            r"
#######
#     #
# $$ @#
#  .. #
#######
",
        );
        assert!(!is_frozen_deadlock(&open));
    }

    #[test]
    fn pair_stacked_against_wall() {
        let vertical = level(
            r"
#######
#  $  #
#  $ @#
#  .. #
#######
",
        );
        // the upper box touches the wall, the lower one has floor below
        assert!(is_frozen_deadlock(&vertical));
    }

    #[test]
    fn corridor_is_not_frozen() {
        let corridor = level(
            r"
#######
#@$  .#
#######
",
        );
        assert!(!is_frozen_deadlock(&corridor));
        assert!(!is_corner_deadlock(&corridor));
    }

    #[test]
    fn boxes_on_targets_dont_block() {
        let level = level(
            r"
#######
#     #
#*$ @ #
#   . #
#######
",
        );
        assert!(!is_frozen_deadlock(&level));
    }
}
