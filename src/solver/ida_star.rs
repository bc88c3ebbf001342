//! Iterative deepening A*.
//!
//! Every move costs 1. Each iteration is a depth first search cut off at the current
//! threshold, the next threshold is the smallest `g + h` that exceeded it.
//! The first solution found is returned, it's only optimal if the heuristic is admissible.

use std::ops::{Deref, DerefMut};

use fnv::FnvHashSet;

use crate::config::{IdaConfig, Method};
use crate::cost::Cost;
use crate::heuristics::Heuristic;
use crate::solver::{CancelToken, Solver, SolverOk, Stats};
use crate::state::{PuzzleState, StateKey};

#[derive(Debug)]
pub struct IdaStar<S, H> {
    initial: S,
    heuristic: H,
    config: IdaConfig,
    cancel: CancelToken,
    stats: Stats,
}

impl<S: PuzzleState, H: Heuristic<S>> IdaStar<S, H> {
    pub fn new(initial: S, heuristic: H) -> Self {
        IdaStar {
            initial,
            heuristic,
            config: IdaConfig::default(),
            cancel: CancelToken::new(),
            stats: Stats::default(),
        }
    }

    pub fn with_config(mut self, config: IdaConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    fn search(&mut self) -> Option<Vec<S::Move>> {
        let h = self.heuristic.evaluate(&self.initial);
        if h.is_infeasible() {
            debug!("Initial state has no finite estimate");
            return None;
        }

        let mut threshold = h;
        let mut path = SearchPath::new(self.initial.clone());
        for iteration in 0..self.config.max_iterations {
            if self.cancel.is_cancelled() {
                info!("Cancelled before iteration {}", iteration);
                return None;
            }

            debug!("Iteration {}, threshold {}", iteration, threshold);
            self.stats.add_iteration();
            self.stats.add_threshold(threshold);

            let mut dfs = Iteration {
                heuristic: &self.heuristic,
                cancel: &self.cancel,
                stats: &mut self.stats,
                visited: FnvHashSet::default(),
            };
            match dfs.visit(&mut path, 0, h, threshold) {
                Outcome::Found => return Some(path.moves),
                Outcome::Exceeded(Cost::Infeasible) => {
                    if self.cancel.is_cancelled() {
                        info!("Cancelled during iteration {}", iteration);
                    } else {
                        debug!("Search space exhausted");
                    }
                    return None;
                }
                Outcome::Exceeded(next) => {
                    debug_assert_eq!(path.depth(), 0);
                    threshold = next;
                }
            }
        }

        debug!("Giving up after {} iterations", self.config.max_iterations);
        None
    }
}

impl<S: PuzzleState, H: Heuristic<S>> Solver for IdaStar<S, H> {
    type Move = S::Move;

    fn solve(&mut self) -> SolverOk<S::Move> {
        self.stats = Stats::default();
        let moves = self.search();
        info!(
            "IDA* {} after exploring {} states",
            if moves.is_some() { "succeeded" } else { "failed" },
            self.stats.total_explored()
        );
        SolverOk::new(moves, self.stats.clone(), Method::IdaStar)
    }

    fn explored_states(&self) -> u64 {
        self.stats.total_explored()
    }
}

enum Outcome {
    Found,
    /// Smallest `g + h` over the threshold, infeasible if nothing exceeded it.
    Exceeded(Cost),
}

/// States from the initial one to the current one and the moves between them.
struct SearchPath<S: PuzzleState> {
    states: Vec<S>,
    moves: Vec<S::Move>,
}

impl<S: PuzzleState> SearchPath<S> {
    fn new(initial: S) -> Self {
        SearchPath {
            states: vec![initial],
            moves: Vec::new(),
        }
    }

    fn last(&self) -> &S {
        // never empty, the initial state is not popped
        &self.states[self.states.len() - 1]
    }

    fn depth(&self) -> usize {
        self.moves.len()
    }

    /// The state and move are removed again when the guard is dropped unless it's kept.
    fn push(&mut self, state: S, mov: S::Move) -> PathGuard<'_, S> {
        self.states.push(state);
        self.moves.push(mov);
        PathGuard {
            path: self,
            keep: false,
        }
    }
}

struct PathGuard<'a, S: PuzzleState> {
    path: &'a mut SearchPath<S>,
    keep: bool,
}

impl<'a, S: PuzzleState> PathGuard<'a, S> {
    fn keep(mut self) {
        self.keep = true;
    }
}

impl<'a, S: PuzzleState> Deref for PathGuard<'a, S> {
    type Target = SearchPath<S>;

    fn deref(&self) -> &SearchPath<S> {
        self.path
    }
}

impl<'a, S: PuzzleState> DerefMut for PathGuard<'a, S> {
    fn deref_mut(&mut self) -> &mut SearchPath<S> {
        self.path
    }
}

impl<'a, S: PuzzleState> Drop for PathGuard<'a, S> {
    fn drop(&mut self) {
        if !self.keep {
            self.path.states.pop();
            self.path.moves.pop();
        }
    }
}

/// State of a single threshold bounded depth first search.
struct Iteration<'a, H> {
    heuristic: &'a H,
    cancel: &'a CancelToken,
    stats: &'a mut Stats,
    visited: FnvHashSet<StateKey>,
}

impl<'a, H> Iteration<'a, H> {
    /// `h` is the estimate of the last state in `path`, already computed by the caller.
    fn visit<S>(&mut self, path: &mut SearchPath<S>, g: u32, h: Cost, threshold: Cost) -> Outcome
    where
        S: PuzzleState,
        H: Heuristic<S>,
    {
        let depth = path.depth();
        if self.stats.add_explored(depth) {
            trace!("Reached depth {}", depth);
        }

        if self.cancel.is_cancelled() {
            return Outcome::Exceeded(Cost::Infeasible);
        }

        let state = path.last();
        if state.is_solved() {
            return Outcome::Found;
        }
        if !self.visited.insert(state.key()) {
            return Outcome::Exceeded(Cost::Infeasible);
        }
        if h.is_infeasible() {
            return Outcome::Exceeded(Cost::Infeasible);
        }
        let f = Cost::from(g) + h;
        if f > threshold {
            return Outcome::Exceeded(f);
        }

        let mut min = Cost::Infeasible;
        for mov in state.legal_moves() {
            let mut child = path.last().clone();
            child.apply_move(mov);
            let child_h = self.heuristic.evaluate(&child);
            if child_h.is_infeasible() {
                continue;
            }

            let mut guard = path.push(child, mov);
            match self.visit(&mut *guard, g + 1, child_h, threshold) {
                Outcome::Found => {
                    guard.keep();
                    return Outcome::Found;
                }
                Outcome::Exceeded(next) => min = min.min(next),
            }
        }
        Outcome::Exceeded(min)
    }
}
