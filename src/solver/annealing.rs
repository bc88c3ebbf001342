//! Simulated annealing over move sequences.
//!
//! The walker always extends its current move sequence by one move. Candidates are scored by
//! their energy (heuristic plus penalties for pulls and length) and picked either by softmax
//! or uniformly. Worse candidates are accepted with the Metropolis probability.
//! Not guaranteed to find a solution, and anything it finds is usually far from optimal.

use std::cmp::Ordering;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::{AnnealingConfig, Method};
use crate::cost::Cost;
use crate::heuristics::Heuristic;
use crate::solver::{CancelToken, Solver, SolverOk, Stats};
use crate::state::{PuzzleMove, PuzzleState};

#[derive(Debug)]
pub struct Annealing<S, H, R = ChaCha8Rng> {
    initial: S,
    heuristic: H,
    config: AnnealingConfig,
    rng: R,
    cancel: CancelToken,
    stats: Stats,
}

impl<S: PuzzleState, H: Heuristic<S>> Annealing<S, H, ChaCha8Rng> {
    /// Uses the default config and a generator seeded from it.
    pub fn new(initial: S, heuristic: H) -> Self {
        let config = AnnealingConfig::default();
        Annealing::with_rng(initial, heuristic, ChaCha8Rng::seed_from_u64(config.seed))
    }

    /// Replaces the config and reseeds the generator with `config.seed`.
    pub fn with_config(mut self, config: AnnealingConfig) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(config.seed);
        self.config = config;
        self
    }
}

impl<S: PuzzleState, H: Heuristic<S>, R: Rng> Annealing<S, H, R> {
    pub fn with_rng(initial: S, heuristic: H, rng: R) -> Self {
        Annealing {
            initial,
            heuristic,
            config: AnnealingConfig::default(),
            rng,
            cancel: CancelToken::new(),
            stats: Stats::default(),
        }
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    fn energy(&self, state: &S, pulls: u32, move_cnt: usize) -> Cost {
        self.heuristic.evaluate(state)
            + self.config.pull_weight * f64::from(pulls)
            + self.config.move_weight * move_cnt as f64
    }

    fn search(&mut self) -> Option<Vec<S::Move>> {
        let initial_energy = self.energy(&self.initial, 0, 0);
        if initial_energy.is_infeasible() {
            debug!("Initial state has no finite energy");
            return None;
        }

        let mut current = Walker {
            state: self.initial.clone(),
            moves: Vec::new(),
            pulls: 0,
            energy: initial_energy,
        };
        let mut best = current.clone();
        let mut temperature = self.config.initial_temp;
        let mut worse_streak = 0;
        let mut iteration = 0;

        while temperature > self.config.final_temp && iteration < self.config.max_iterations {
            if self.cancel.is_cancelled() {
                info!("Cancelled at iteration {}", iteration);
                break;
            }
            iteration += 1;
            self.stats.add_iteration();
            if self.stats.add_explored(current.moves.len()) {
                trace!("Reached depth {}", current.moves.len());
            }

            if current.state.is_solved() {
                best = current.clone();
                break;
            }

            let legal = current.state.legal_moves();
            if legal.is_empty() {
                trace!("No moves at iteration {}, reheating", iteration);
                temperature = self.config.initial_temp * self.config.reheat_factor;
                current = best.clone();
                worse_streak = 0;
                self.stats.add_restart();
                continue;
            }

            let mut candidates: Vec<_> = legal
                .into_iter()
                .map(|mov| {
                    let mut state = current.state.clone();
                    state.apply_move(mov);
                    let pulls = current.pulls + mov.is_pull() as u32;
                    let energy = self.energy(&state, pulls, current.moves.len() + 1);
                    Candidate { mov, state, pulls, energy }
                })
                .collect();
            // stable, infeasible candidates end up last
            candidates.sort_by(|a, b| {
                a.energy
                    .partial_cmp(&b.energy)
                    .unwrap_or(Ordering::Equal)
            });

            if candidates.iter().all(|c| c.energy.is_infeasible()) {
                trace!("Only deadlocks at iteration {}, restarting", iteration);
                temperature = self.config.initial_temp;
                current = best.clone();
                worse_streak = 0;
                self.stats.add_restart();
                continue;
            }

            let chosen = self.choose(&candidates);
            let candidate = candidates.swap_remove(chosen);
            let delta = candidate.energy - current.energy;
            let accepted = delta <= 0.0
                || self.rng.random::<f64>() < (-delta / (temperature * self.config.alpha)).exp();

            if accepted {
                if delta > 0.0 {
                    worse_streak += 1;
                } else {
                    worse_streak = 0;
                }
                if worse_streak > self.config.max_worse_streak {
                    trace!("Too many worse moves at iteration {}, restarting", iteration);
                    temperature = self.config.initial_temp;
                    current = best.clone();
                    worse_streak = 0;
                    self.stats.add_restart();
                    continue;
                }

                current.moves.push(candidate.mov);
                current.state = candidate.state;
                current.pulls = candidate.pulls;
                current.energy = candidate.energy;

                if current.energy < best.energy {
                    best = current.clone();
                }
                if current.state.is_solved() {
                    best = current.clone();
                    break;
                }
            }

            temperature *= self.config.cooling_rate;
        }

        debug!(
            "Stopped after {} iterations at temperature {:.3}, best energy {}",
            iteration, temperature, best.energy
        );

        if best.state.is_solved() {
            Some(best.moves)
        } else {
            None
        }
    }

    /// Candidates must be sorted by energy and at least one must be feasible.
    fn choose(&mut self, candidates: &[Candidate<S>]) -> usize {
        if self.rng.random::<f64>() < self.config.softmax_probability {
            let energies: Vec<_> = candidates.iter().map(|c| c.energy).collect();
            let weights = softmax(&energies);
            let mut remaining = self.rng.random::<f64>();
            for (i, &weight) in weights.iter().enumerate() {
                if remaining < weight {
                    return i;
                }
                remaining -= weight;
            }
            // rounding, fall back to the last feasible candidate
            weights.iter().rposition(|&w| w > 0.0).unwrap_or(0)
        } else {
            self.rng.random_range(0..candidates.len())
        }
    }
}

impl<S: PuzzleState, H: Heuristic<S>, R: Rng> Solver for Annealing<S, H, R> {
    type Move = S::Move;

    fn solve(&mut self) -> SolverOk<S::Move> {
        self.stats = Stats::default();
        let moves = self.search();
        info!(
            "Annealing {} after exploring {} states",
            if moves.is_some() { "succeeded" } else { "failed" },
            self.stats.total_explored()
        );
        SolverOk::new(moves, self.stats.clone(), Method::Annealing)
    }

    fn explored_states(&self) -> u64 {
        self.stats.total_explored()
    }
}

#[derive(Clone)]
struct Walker<S: PuzzleState> {
    state: S,
    moves: Vec<S::Move>,
    pulls: u32,
    energy: Cost,
}

struct Candidate<S: PuzzleState> {
    mov: S::Move,
    state: S,
    pulls: u32,
    energy: Cost,
}

/// Probabilities proportional to `exp(-energy)`, zero for infeasible energies.
///
/// Shifted by the lowest energy so the exponent never overflows.
pub(crate) fn softmax(energies: &[Cost]) -> Vec<f64> {
    let lowest = energies
        .iter()
        .filter_map(|e| e.value())
        .fold(std::f64::INFINITY, f64::min);
    let exps: Vec<f64> = energies
        .iter()
        .map(|e| match e.value() {
            Some(v) => (lowest - v).exp(),
            None => 0.0,
        })
        .collect();
    let sum: f64 = exps.iter().sum();
    if sum > 0.0 {
        exps.into_iter().map(|x| x / sum).collect()
    } else {
        exps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HeuristicKind;
    use crate::heuristics::{DeadlockAware, Efficient, Manhattan};
    use crate::level::Level;

    fn level(s: &str) -> Level {
        s.parse().unwrap()
    }

    const CORRIDOR: &str = r"
#######
#@$  .#
#######
";

    #[test]
    fn softmax_prefers_low_energy() {
        let probs = softmax(&[Cost::from(1.0), Cost::from(2.0), Cost::Infeasible]);
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!(probs[0] > probs[1]);
        assert_eq!(probs[2], 0.0);
        assert!((probs[0] / probs[1] - 1f64.exp()).abs() < 1e-9);

        // huge energies don't overflow
        let probs = softmax(&[Cost::from(10_000.0), Cost::from(10_000.0)]);
        assert!((probs[0] - 0.5).abs() < 1e-9);

        let probs = softmax(&[Cost::Infeasible]);
        assert_eq!(probs, vec![0.0]);
    }

    #[test]
    fn already_solved() {
        let solved = level(
            r"
*--
-@-
---
",
        );
        let mut annealing = Annealing::new(solved, Efficient);
        let solution = annealing.solve();
        assert_eq!(solution.moves, Some(vec![]));
        assert_eq!(annealing.explored_states(), 1);
    }

    #[test]
    fn corner_deadlock() {
        let stuck = level(
            r"
#####
#$  #
# @ #
#  .#
#####
",
        );
        let mut annealing = Annealing::new(stuck, DeadlockAware(Efficient));
        assert_eq!(annealing.solve().moves, None);
        assert_eq!(annealing.explored_states(), 0);
    }

    #[test]
    fn corridor() {
        let corridor = level(CORRIDOR);
        let mut annealing = Annealing::new(corridor.clone(), HeuristicKind::DeadlockEfficient);
        let moves = annealing.solve().moves.unwrap();
        assert!(moves.len() >= 3);
        assert!(corridor.replay(&moves).is_solved());
    }

    #[test]
    fn same_seed_same_result() {
        let detour = level(
            r"
#######
#     #
#@$   #
#    .#
#######
",
        );
        let config = AnnealingConfig {
            seed: 42,
            ..AnnealingConfig::default()
        };

        let run = || {
            let mut annealing = Annealing::new(detour.clone(), Manhattan).with_config(config);
            let solution = annealing.solve();
            (solution.moves, solution.stats)
        };
        let (first_moves, first_stats) = run();
        let (second_moves, second_stats) = run();
        assert_eq!(first_moves, second_moves);
        assert!(first_stats == second_stats);
        if let Some(moves) = first_moves {
            assert!(detour.replay(&moves).is_solved());
        }
    }

    #[test]
    fn explicit_rng() {
        let corridor = level(CORRIDOR);
        let rng = ChaCha8Rng::seed_from_u64(7);
        let mut annealing = Annealing::with_rng(corridor.clone(), Efficient, rng);
        let moves = annealing.solve().moves.unwrap();
        assert!(corridor.replay(&moves).is_solved());
    }

    #[test]
    fn reheats_when_stuck_without_moves() {
        // the player is walled in
        let stuck = level(
            r"
#####
##@##
#####
#$ .#
#####
",
        );
        let config = AnnealingConfig {
            max_iterations: 10,
            ..AnnealingConfig::default()
        };
        let mut annealing = Annealing::new(stuck, Manhattan).with_config(config);
        assert_eq!(annealing.solve().moves, None);
        let stats = annealing.stats();
        assert_eq!(stats.iterations(), 10);
        assert_eq!(stats.restarts(), 10);
        // every iteration starts over from the initial state
        assert_eq!(stats.explored_by_depth(), &[10]);
    }

    #[test]
    fn restarts_when_every_move_deadlocks() {
        // the only move pushes the box into the corner
        let dead_end = level(
            r"
#####
#@$ #
## .#
#####
",
        );
        let config = AnnealingConfig {
            max_iterations: 5,
            ..AnnealingConfig::default()
        };
        let mut annealing =
            Annealing::new(dead_end, HeuristicKind::DeadlockManhattan).with_config(config);
        assert_eq!(annealing.solve().moves, None);
        let stats = annealing.stats();
        assert_eq!(stats.restarts(), 5);
        assert_eq!(stats.explored_by_depth(), &[5]);
    }

    #[test]
    fn restarts_after_too_many_worse_moves() {
        // the only move is a step that makes the energy worse
        let level = level(
            r"
######
#@ $.#
######
",
        );
        let config = AnnealingConfig {
            initial_temp: 1e12,
            max_worse_streak: 0,
            max_iterations: 20,
            ..AnnealingConfig::default()
        };
        let mut annealing = Annealing::new(level.clone(), Manhattan).with_config(config);
        assert_eq!(annealing.solve().moves, None);
        let stats = annealing.stats();
        // accepted every time and thrown away every time
        assert_eq!(stats.restarts(), 20);
        assert_eq!(stats.explored_by_depth(), &[20]);

        // with the default limit the same worse step is kept
        let mut annealing = Annealing::new(level.clone(), Manhattan);
        let moves = annealing.solve().moves.unwrap();
        assert!(level.replay(&moves).is_solved());
        assert_eq!(annealing.stats().restarts(), 0);
    }

    #[test]
    fn iteration_limit() {
        let corridor = level(CORRIDOR);
        let config = AnnealingConfig {
            max_iterations: 1,
            ..AnnealingConfig::default()
        };
        let mut annealing = Annealing::new(corridor, Efficient).with_config(config);
        // one move can't push the box three cells
        assert_eq!(annealing.solve().moves, None);
        assert_eq!(annealing.stats().iterations(), 1);
    }
}
