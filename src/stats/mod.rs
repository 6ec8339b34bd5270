//! Stats module - cycle statistics

mod calculator;

pub use calculator::{StatsCalculator, StatsError};
