use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::ops::{Add, Sub};

/// Estimated remaining work, or proof (under some model) that there is none that helps.
///
/// `Infeasible` absorbs addition and compares greater than every finite cost,
/// so it is never picked as a minimum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cost {
    Finite(f64),
    Infeasible,
}

impl Cost {
    pub const ZERO: Cost = Cost::Finite(0.0);

    pub fn is_infeasible(self) -> bool {
        self == Cost::Infeasible
    }

    pub fn is_finite(self) -> bool {
        !self.is_infeasible()
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Cost::Finite(v) => Some(v),
            Cost::Infeasible => None,
        }
    }

    pub fn min(self, other: Cost) -> Cost {
        if other < self {
            other
        } else {
            self
        }
    }
}

impl From<i32> for Cost {
    fn from(v: i32) -> Self {
        Cost::Finite(f64::from(v))
    }
}

impl From<u32> for Cost {
    fn from(v: u32) -> Self {
        Cost::Finite(f64::from(v))
    }
}

impl From<f64> for Cost {
    fn from(v: f64) -> Self {
        Cost::Finite(v)
    }
}

impl Add for Cost {
    type Output = Cost;

    fn add(self, other: Cost) -> Cost {
        match (self, other) {
            (Cost::Finite(a), Cost::Finite(b)) => Cost::Finite(a + b),
            _ => Cost::Infeasible,
        }
    }
}

impl Add<f64> for Cost {
    type Output = Cost;

    fn add(self, other: f64) -> Cost {
        self + Cost::Finite(other)
    }
}

/// Difference of two costs.
///
/// Anything minus `Infeasible` where the left side is finite is treated as
/// an infinite improvement and `Infeasible - Infeasible` as no change.
impl Sub for Cost {
    type Output = f64;

    fn sub(self, other: Cost) -> f64 {
        match (self, other) {
            (Cost::Finite(a), Cost::Finite(b)) => a - b,
            (Cost::Infeasible, Cost::Finite(_)) => std::f64::INFINITY,
            (Cost::Finite(_), Cost::Infeasible) => std::f64::NEG_INFINITY,
            (Cost::Infeasible, Cost::Infeasible) => 0.0,
        }
    }
}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Cost) -> Option<Ordering> {
        match (*self, *other) {
            (Cost::Finite(a), Cost::Finite(b)) => a.partial_cmp(&b),
            (Cost::Finite(_), Cost::Infeasible) => Some(Ordering::Less),
            (Cost::Infeasible, Cost::Finite(_)) => Some(Ordering::Greater),
            (Cost::Infeasible, Cost::Infeasible) => Some(Ordering::Equal),
        }
    }
}

impl Display for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Cost::Finite(v) => write!(f, "{}", v),
            Cost::Infeasible => write!(f, "inf"),
        }
    }
}
