// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
// Additional warnings that are allow by default (`rustc -W help`)
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unused)]

#[macro_use]
extern crate log;

pub mod config;
pub mod cost;
pub mod data;
pub mod heuristics;
pub mod level;
pub mod moves;
pub mod parser;
pub mod solver;
pub mod state;

mod fs;
mod vec2d;

use std::error::Error;

use crate::config::Config;
use crate::level::Level;
use crate::solver::SolverOk;

pub trait LoadLevel {
    fn load_level(&self) -> Result<Level, Box<dyn Error>>;
}

impl LoadLevel for str {
    fn load_level(&self) -> Result<Level, Box<dyn Error>> {
        let text = fs::read_file(self)?;
        Ok(text.parse()?)
    }
}

pub trait Solve {
    type Move;

    fn solve(&self, config: &Config) -> SolverOk<Self::Move>;
}
