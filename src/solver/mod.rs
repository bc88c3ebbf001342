pub mod annealing;
pub mod ida_star;

use std::fmt::{self, Debug, Display, Formatter};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use separator::Separatable;

use crate::config::{Config, Method};
use crate::cost::Cost;
use crate::state::PuzzleState;
use crate::Solve;

use self::annealing::Annealing;
use self::ida_star::IdaStar;

/// Common shape of both search strategies.
pub trait Solver {
    type Move;

    /// `None` means no solution was found, `Some(vec![])` means the initial state is already solved.
    fn solve(&mut self) -> SolverOk<Self::Move>;

    /// Explored states of the last run.
    fn explored_states(&self) -> u64;
}

pub struct SolverOk<M> {
    pub moves: Option<Vec<M>>,
    pub stats: Stats,
    pub method: Method,
}

impl<M> SolverOk<M> {
    pub(crate) fn new(moves: Option<Vec<M>>, stats: Stats, method: Method) -> Self {
        Self {
            moves,
            stats,
            method,
        }
    }
}

impl<M> Debug for SolverOk<M> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.moves {
            None => writeln!(f, "No solution")?,
            Some(ref moves) => writeln!(f, "{}: {}", self.method, moves.len())?,
        }
        write!(f, "{:?}", self.stats)
    }
}

/// Cooperative cancellation, checked by the solvers at every iteration.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Clone, Default, PartialEq)]
pub struct Stats {
    explored_states: Vec<u64>,
    iterations: u32,
    restarts: u32,
    thresholds: Vec<Cost>,
}

impl Stats {
    pub fn total_explored(&self) -> u64 {
        self.explored_states.iter().sum()
    }

    /// Indexed by the number of moves leading to the explored state.
    pub fn explored_by_depth(&self) -> &[u64] {
        &self.explored_states
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn restarts(&self) -> u32 {
        self.restarts
    }

    /// Cost thresholds of the IDA* iterations in the order they were used.
    pub fn thresholds(&self) -> &[Cost] {
        &self.thresholds
    }

    /// Returns true if this is the first state at `depth`.
    pub(crate) fn add_explored(&mut self, depth: usize) -> bool {
        let mut ret = false;

        // while because some depths might be skipped after a restart
        while depth >= self.explored_states.len() {
            self.explored_states.push(0);
            ret = true;
        }
        self.explored_states[depth] += 1;
        ret
    }

    pub(crate) fn add_iteration(&mut self) {
        self.iterations += 1;
    }

    pub(crate) fn add_restart(&mut self) {
        self.restarts += 1;
    }

    pub(crate) fn add_threshold(&mut self, threshold: Cost) {
        self.thresholds.push(threshold);
    }
}

impl Debug for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "explored by depth: {:?}", self.explored_states)?;
        writeln!(f, "thresholds: {:?}", self.thresholds)?;
        writeln!(f, "total explored: {}", self.total_explored().separated_string())?;
        writeln!(f, "iterations: {}", self.iterations.separated_string())?;
        writeln!(f, "restarts: {}", self.restarts.separated_string())
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "States explored: {}",
            self.total_explored().separated_string()
        )?;
        writeln!(f, "Iterations: {}", self.iterations.separated_string())?;
        if !self.thresholds.is_empty() {
            let thresholds: Vec<_> = self.thresholds.iter().map(Cost::to_string).collect();
            writeln!(f, "Thresholds: {}", thresholds.join(", "))?;
        }
        if self.restarts > 0 {
            writeln!(f, "Restarts: {}", self.restarts.separated_string())?;
        }
        Ok(())
    }
}

impl<S: PuzzleState> Solve for S {
    type Move = S::Move;

    fn solve(&self, config: &Config) -> SolverOk<S::Move> {
        solve(self, config, CancelToken::new())
    }
}

pub fn solve<S: PuzzleState>(state: &S, config: &Config, cancel: CancelToken) -> SolverOk<S::Move> {
    debug!("Solving using {} with {}", config.method, config.heuristic);
    match config.method {
        Method::IdaStar => IdaStar::new(state.clone(), config.heuristic)
            .with_config(config.ida)
            .with_cancel_token(cancel)
            .solve(),
        Method::Annealing => Annealing::new(state.clone(), config.heuristic)
            .with_config(config.annealing)
            .with_cancel_token(cancel)
            .solve(),
    }
}
