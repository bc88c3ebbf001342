//! Cost estimates for the remaining work in a puzzle state.
//!
//! All heuristics return 0 for solved states. The deadlock aware variants
//! return `Cost::Infeasible` whenever `deadlock::is_deadlock` fires.

pub mod deadlock;
pub mod distance;

use fnv::FnvHashSet;

use crate::config::HeuristicKind;
use crate::cost::Cost;
use crate::data::Pos;
use crate::state::PuzzleState;

use self::deadlock::is_deadlock;
use self::distance::{direct_path_reachable, euclidean, greedy_assign, manhattan, Axis};

const MOBILITY_PENALTY: f64 = 0.6;

pub trait Heuristic<S: PuzzleState> {
    fn evaluate(&self, state: &S) -> Cost;
}

impl<S, F> Heuristic<S> for F
where
    S: PuzzleState,
    F: Fn(&S) -> Cost,
{
    fn evaluate(&self, state: &S) -> Cost {
        self(state)
    }
}

/// Sum over boxes of the Manhattan distance to the nearest target.
#[derive(Debug, Clone, Copy, Default)]
pub struct Manhattan;

impl<S: PuzzleState> Heuristic<S> for Manhattan {
    fn evaluate(&self, state: &S) -> Cost {
        let mut sum = 0;
        for &box_pos in state.boxes() {
            match state.targets().iter().map(|&t| manhattan(box_pos, t)).min() {
                Some(min) => sum += min,
                None => return Cost::Infeasible,
            }
        }
        Cost::from(sum)
    }
}

/// Sum over boxes of the Euclidean distance to the nearest target, rounded up.
#[derive(Debug, Clone, Copy, Default)]
pub struct Euclidean;

impl<S: PuzzleState> Heuristic<S> for Euclidean {
    fn evaluate(&self, state: &S) -> Cost {
        let mut sum = 0.0;
        for &box_pos in state.boxes() {
            let min = state
                .targets()
                .iter()
                .map(|&t| euclidean(box_pos, t))
                .fold(std::f64::INFINITY, f64::min);
            if min.is_infinite() {
                return Cost::Infeasible;
            }
            sum += min;
        }
        // rounding happens on the total, not per box
        Cost::Finite(sum.ceil())
    }
}

/// Every box not on a target claims the closest free target it can slide to in a straight line,
/// the first one in target order on ties. Infeasible as soon as one box has no such target.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectPath;

impl<S: PuzzleState> Heuristic<S> for DirectPath {
    fn evaluate(&self, state: &S) -> Cost {
        let boxes: FnvHashSet<Pos> = state.boxes().iter().cloned().collect();
        let mut available: Vec<(Pos, bool)> = state
            .targets()
            .iter()
            .map(|&t| (t, !boxes.contains(&t)))
            .collect();

        let mut total = 0;
        for &box_pos in state.boxes().iter().filter(|&&b| !state.is_target(b)) {
            let claim = available
                .iter_mut()
                .filter(|(target, free)| {
                    *free
                        && (direct_path_reachable(box_pos, *target, state, Axis::Row)
                            || direct_path_reachable(box_pos, *target, state, Axis::Column))
                })
                // min_by_key keeps the last of equal elements, fold keeps the first
                .fold(None, |best: Option<(i32, &mut (Pos, bool))>, entry| {
                    let dist = manhattan(box_pos, entry.0);
                    match best {
                        Some((best_dist, _)) if best_dist <= dist => best,
                        _ => Some((dist, entry)),
                    }
                });
            match claim {
                Some((dist, entry)) => {
                    entry.1 = false;
                    total += dist;
                }
                None => return Cost::Infeasible,
            }
        }
        Cost::from(total)
    }
}

/// Greedy assignment of boxes not on targets to targets without boxes.
#[derive(Debug, Clone, Copy, Default)]
pub struct HungarianGreedy;

impl<S: PuzzleState> Heuristic<S> for HungarianGreedy {
    fn evaluate(&self, state: &S) -> Cost {
        let (boxes, targets) = unmatched(state);
        greedy_assign(&boxes, &targets)
    }
}

/// Twice the greedy assignment plus a penalty for every blocked side of a box not on a target.
#[derive(Debug, Clone, Copy, Default)]
pub struct Efficient;

impl<S: PuzzleState> Heuristic<S> for Efficient {
    fn evaluate(&self, state: &S) -> Cost {
        let assignment = HungarianGreedy.evaluate(state);
        assignment + assignment + mobility_penalty(state)
    }
}

/// Returns `Cost::Infeasible` for deadlocked states, otherwise delegates.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeadlockAware<H>(pub H);

impl<S: PuzzleState, H: Heuristic<S>> Heuristic<S> for DeadlockAware<H> {
    fn evaluate(&self, state: &S) -> Cost {
        if is_deadlock(state) {
            Cost::Infeasible
        } else {
            self.0.evaluate(state)
        }
    }
}

impl<S: PuzzleState> Heuristic<S> for HeuristicKind {
    fn evaluate(&self, state: &S) -> Cost {
        match *self {
            HeuristicKind::Manhattan => Manhattan.evaluate(state),
            HeuristicKind::Euclidean => Euclidean.evaluate(state),
            HeuristicKind::DirectPath => DirectPath.evaluate(state),
            HeuristicKind::HungarianGreedy => HungarianGreedy.evaluate(state),
            HeuristicKind::Efficient => Efficient.evaluate(state),
            HeuristicKind::DeadlockManhattan => DeadlockAware(Manhattan).evaluate(state),
            HeuristicKind::DeadlockEuclidean => DeadlockAware(Euclidean).evaluate(state),
            HeuristicKind::DeadlockDirectPath => DeadlockAware(DirectPath).evaluate(state),
            HeuristicKind::DeadlockHungarianGreedy => {
                DeadlockAware(HungarianGreedy).evaluate(state)
            }
            HeuristicKind::DeadlockEfficient => DeadlockAware(Efficient).evaluate(state),
        }
    }
}

/// Boxes not on a target and targets without a box.
fn unmatched<S: PuzzleState>(state: &S) -> (Vec<Pos>, Vec<Pos>) {
    let boxes: FnvHashSet<Pos> = state.boxes().iter().cloned().collect();
    let free_boxes = state
        .boxes()
        .iter()
        .cloned()
        .filter(|&b| !state.is_target(b))
        .collect();
    let free_targets = state
        .targets()
        .iter()
        .cloned()
        .filter(|t| !boxes.contains(t))
        .collect();
    (free_boxes, free_targets)
}

fn mobility_penalty<S: PuzzleState>(state: &S) -> f64 {
    let boxes: FnvHashSet<Pos> = state.boxes().iter().cloned().collect();
    let blocked_sides: usize = state
        .boxes()
        .iter()
        .filter(|&&b| !state.is_target(b))
        .map(|&b| {
            b.neighbors()
                .iter()
                .filter(|&&neighbor| state.is_wall(neighbor) || boxes.contains(&neighbor))
                .count()
        })
        .sum();
    blocked_sides as f64 * MOBILITY_PENALTY
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HeuristicKind;
    use crate::level::Level;

    fn level(s: &str) -> Level {
        s.parse().unwrap()
    }

    fn assert_close(cost: Cost, expected: f64) {
        let value = cost.value().expect("expected a finite cost");
        assert!((value - expected).abs() < 1e-9, "{} != {}", value, expected);
    }

    #[test]
    fn solved_is_zero_for_all() {
        // 3x3, no walls, box on its only target in the corner
        let solved = level(
            r"
*--
-@-
---
",
        );
        assert!(solved.is_solved());
        for &kind in HeuristicKind::ALL.iter() {
            assert_eq!(kind.evaluate(&solved), Cost::ZERO, "{}", kind);
        }

        let solved = level(
            r"
#######
#**@  #
#  *  #
#######
",
        );
        for &kind in HeuristicKind::ALL.iter() {
            assert_eq!(kind.evaluate(&solved), Cost::ZERO, "{}", kind);
        }
    }

    #[test]
    fn corner_deadlock_is_infeasible() {
        let stuck = level(
            r"
#####
#$  #
# @ #
#  .#
#####
",
        );
        for &kind in HeuristicKind::ALL.iter() {
            let cost = kind.evaluate(&stuck);
            if kind.is_deadlock_aware() {
                assert_eq!(cost, Cost::Infeasible, "{}", kind);
            } else if kind != HeuristicKind::DirectPath {
                assert!(cost.is_finite(), "{}", kind);
            }
        }
    }

    #[test]
    fn straight_row() {
        let corridor = level(
            r"
#######
#@$  .#
#######
",
        );
        assert_eq!(DirectPath.evaluate(&corridor), Cost::from(3));
        assert_eq!(DeadlockAware(DirectPath).evaluate(&corridor), Cost::from(3));
        assert_eq!(Manhattan.evaluate(&corridor), Cost::from(3));
        assert_eq!(Euclidean.evaluate(&corridor), Cost::from(3));
        assert_eq!(HungarianGreedy.evaluate(&corridor), Cost::from(3));
        // walls above and below
        assert_close(Efficient.evaluate(&corridor), 2.0 * 3.0 + 2.0 * 0.6);
    }

    #[test]
    fn direct_path_infeasible_when_blocked() {
        let blocked = level(
            r"
########
#@$ # .#
########
",
        );
        assert_eq!(DirectPath.evaluate(&blocked), Cost::Infeasible);
        assert_eq!(Manhattan.evaluate(&blocked), Cost::from(4));
    }

    #[test]
    fn direct_path_targets_are_claimed_once() {
        let two = level(
            r"
#########
#@$ $  .#
#      .#
#########
",
        );
        // the second box is in the way of the first one
        assert_eq!(DirectPath.evaluate(&two), Cost::Infeasible);

        let two = level(
            r"
#########
#@$    .#
#  $   .#
#########
",
        );
        assert_eq!(DirectPath.evaluate(&two), Cost::from(5 + 4));
    }

    #[test]
    fn direct_path_claims_closest_target() {
        let level = level(
            r"
########
#. . $@#
#$     #
########
",
        );
        // the right box takes the target 2 cells away, leaving the far one for the left box
        assert_eq!(DirectPath.evaluate(&level), Cost::from(2 + 1));
    }

    #[test]
    fn euclidean_rounds_the_sum() {
        let diagonal = level(
            r"
#######
#@$   #
#     #
#   . #
#     #
#######
",
        );
        // sqrt(2^2 + 2^2) = 2.83
        assert_eq!(Euclidean.evaluate(&diagonal), Cost::from(3));
        assert_eq!(Manhattan.evaluate(&diagonal), Cost::from(4));
    }

    #[test]
    fn efficient_penalizes_boxes_next_to_boxes() {
        let pair = level(
            r"
########
#      #
# @$$  #
#      #
#   .. #
########
",
        );
        // (2,4) is closer and takes (4,4), (2,3) is left with (4,5)
        assert_eq!(HungarianGreedy.evaluate(&pair), Cost::from(2 + 4));
        assert_close(Efficient.evaluate(&pair), 2.0 * 6.0 + 2.0 * 0.6);
    }

    #[test]
    fn closures_are_heuristics() {
        let corridor = level(
            r"
#####
#@$.#
#####
",
        );
        let zero = |_: &Level| Cost::ZERO;
        assert_eq!(zero.evaluate(&corridor), Cost::ZERO);
        assert_eq!(DeadlockAware(zero).evaluate(&corridor), Cost::ZERO);
    }
}
