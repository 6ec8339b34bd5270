//! Data module - CSV loading and period handling

mod loader;
mod periods;

pub use loader::{DataLoader, LoaderError, Observation, QuarterlyTable};
pub use periods::parse_period_label;
