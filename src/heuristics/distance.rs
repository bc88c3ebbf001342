use crate::cost::Cost;
use crate::data::Pos;
use crate::state::PuzzleState;

/// Line along which a box is pushed straight to a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

pub fn manhattan(a: Pos, b: Pos) -> i32 {
    a.manhattan(b)
}

pub fn euclidean(a: Pos, b: Pos) -> f64 {
    a.euclidean(b)
}

fn nearest(pos: Pos, targets: &[Pos]) -> Option<(usize, i32)> {
    targets
        .iter()
        .enumerate()
        .map(|(i, &t)| (i, manhattan(pos, t)))
        // first of equally distant targets wins
        .fold(None, |best, (i, dist)| match best {
            Some((_, best_dist)) if best_dist <= dist => best,
            _ => Some((i, dist)),
        })
}

/// Greedy approximation of the min-cost box to target matching.
///
/// Boxes closest to any target choose first and take the nearest target nobody claimed yet.
/// When targets run out, a box falls back to its nearest target regardless of claims.
/// This is neither an upper nor a lower bound of the optimal matching.
pub fn greedy_assign(boxes: &[Pos], targets: &[Pos]) -> Cost {
    let mut by_nearest = Vec::with_capacity(boxes.len());
    for &box_pos in boxes {
        match nearest(box_pos, targets) {
            Some((_, dist)) => by_nearest.push((box_pos, dist)),
            None => return Cost::Infeasible,
        }
    }
    // stable so ties keep the box order
    by_nearest.sort_by_key(|&(_, dist)| dist);

    let mut claimed = vec![false; targets.len()];
    let mut total = 0;
    for (box_pos, nearest_dist) in by_nearest {
        let best = targets
            .iter()
            .enumerate()
            .filter(|&(i, _)| !claimed[i])
            .map(|(i, &t)| (i, manhattan(box_pos, t)))
            .fold(None, |best: Option<(usize, i32)>, (i, dist)| match best {
                Some((_, best_dist)) if best_dist <= dist => best,
                _ => Some((i, dist)),
            });
        match best {
            Some((i, dist)) => {
                claimed[i] = true;
                total += dist;
            }
            None => total += nearest_dist,
        }
    }

    Cost::from(total)
}

/// True iff the box can slide to the target along `axis` without hitting
/// a wall or a box that isn't already on a target.
pub fn direct_path_reachable<S: PuzzleState>(box_pos: Pos, target: Pos, state: &S, axis: Axis) -> bool {
    let cells: Vec<Pos> = match axis {
        Axis::Row => {
            if box_pos.r != target.r {
                return false;
            }
            let (from, to) = (box_pos.c.min(target.c), box_pos.c.max(target.c));
            (from..=to).map(|c| Pos::new(box_pos.r, c)).collect()
        }
        Axis::Column => {
            if box_pos.c != target.c {
                return false;
            }
            let (from, to) = (box_pos.r.min(target.r), box_pos.r.max(target.r));
            (from..=to).map(|r| Pos::new(r, box_pos.c)).collect()
        }
    };

    cells.into_iter().filter(|&pos| pos != box_pos).all(|pos| {
        !state.is_obstacle(pos) && !(state.boxes().contains(&pos) && !state.is_target(pos))
    })
}
