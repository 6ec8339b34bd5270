//! Charts module - static chart rendering

pub mod axis;
mod plotter;

pub use plotter::{ChartError, ChartPlotter, LineSpec, SERIES_A_COLOR, SERIES_B_COLOR, TREND_COLOR};
