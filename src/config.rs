use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigErr {
    UnknownMethod(String),
    UnknownHeuristic(String),
}

impl Display for ConfigErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ConfigErr::UnknownMethod(ref name) => write!(f, "Unknown method: {}", name),
            ConfigErr::UnknownHeuristic(ref name) => write!(f, "Unknown heuristic: {}", name),
        }
    }
}

impl Error for ConfigErr {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    IdaStar,
    Annealing,
}

impl Method {
    pub const ALL: [Method; 2] = [Method::IdaStar, Method::Annealing];
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Method::IdaStar => write!(f, "ida-star"),
            Method::Annealing => write!(f, "annealing"),
        }
    }
}

impl FromStr for Method {
    type Err = ConfigErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .iter()
            .cloned()
            .find(|m| m.to_string() == s)
            .ok_or_else(|| ConfigErr::UnknownMethod(s.to_owned()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeuristicKind {
    Manhattan,
    Euclidean,
    DirectPath,
    HungarianGreedy,
    Efficient,
    DeadlockManhattan,
    DeadlockEuclidean,
    DeadlockDirectPath,
    DeadlockHungarianGreedy,
    DeadlockEfficient,
}

impl HeuristicKind {
    pub const ALL: [HeuristicKind; 10] = [
        HeuristicKind::Manhattan,
        HeuristicKind::Euclidean,
        HeuristicKind::DirectPath,
        HeuristicKind::HungarianGreedy,
        HeuristicKind::Efficient,
        HeuristicKind::DeadlockManhattan,
        HeuristicKind::DeadlockEuclidean,
        HeuristicKind::DeadlockDirectPath,
        HeuristicKind::DeadlockHungarianGreedy,
        HeuristicKind::DeadlockEfficient,
    ];

    pub fn is_deadlock_aware(self) -> bool {
        match self {
            HeuristicKind::Manhattan
            | HeuristicKind::Euclidean
            | HeuristicKind::DirectPath
            | HeuristicKind::HungarianGreedy
            | HeuristicKind::Efficient => false,
            _ => true,
        }
    }
}

impl Display for HeuristicKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            HeuristicKind::Manhattan => write!(f, "manhattan"),
            HeuristicKind::Euclidean => write!(f, "euclidean"),
            HeuristicKind::DirectPath => write!(f, "direct-path"),
            HeuristicKind::HungarianGreedy => write!(f, "hungarian-greedy"),
            HeuristicKind::Efficient => write!(f, "efficient"),
            HeuristicKind::DeadlockManhattan => write!(f, "deadlock-manhattan"),
            HeuristicKind::DeadlockEuclidean => write!(f, "deadlock-euclidean"),
            HeuristicKind::DeadlockDirectPath => write!(f, "deadlock-direct-path"),
            HeuristicKind::DeadlockHungarianGreedy => write!(f, "deadlock-hungarian-greedy"),
            HeuristicKind::DeadlockEfficient => write!(f, "deadlock-efficient"),
        }
    }
}

impl FromStr for HeuristicKind {
    type Err = ConfigErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HeuristicKind::ALL
            .iter()
            .cloned()
            .find(|h| h.to_string() == s)
            .ok_or_else(|| ConfigErr::UnknownHeuristic(s.to_owned()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IdaConfig {
    /// Outer iterations (threshold increases) before giving up.
    pub max_iterations: u32,
}

impl Default for IdaConfig {
    fn default() -> Self {
        IdaConfig {
            max_iterations: 200,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnnealingConfig {
    /// Higher values permit more exploration.
    pub initial_temp: f64,
    /// Multiplied into the temperature after every iteration.
    pub cooling_rate: f64,
    /// The search stops once the temperature drops to this.
    pub final_temp: f64,
    /// Shapes the acceptance probability of worse candidates.
    pub alpha: f64,
    pub max_iterations: u32,
    /// Consecutive accepted worse candidates before restarting from the best state.
    pub max_worse_streak: u32,
    /// Fraction of `initial_temp` used after a restart caused by having no legal moves.
    pub reheat_factor: f64,
    /// Probability of picking a candidate by softmax instead of uniformly.
    pub softmax_probability: f64,
    pub pull_weight: f64,
    pub move_weight: f64,
    pub seed: u64,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        AnnealingConfig {
            initial_temp: 700.0,
            cooling_rate: 0.9999,
            final_temp: 0.1,
            alpha: 0.5,
            max_iterations: 100_000,
            max_worse_streak: 200,
            reheat_factor: 0.7,
            softmax_probability: 0.5,
            pull_weight: 1.0,
            move_weight: 0.1,
            seed: 0,
        }
    }
}

/// Everything needed to run a solver on a level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    pub method: Method,
    pub heuristic: HeuristicKind,
    pub ida: IdaConfig,
    pub annealing: AnnealingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            method: Method::Annealing,
            heuristic: HeuristicKind::Efficient,
            ida: IdaConfig::default(),
            annealing: AnnealingConfig::default(),
        }
    }
}
