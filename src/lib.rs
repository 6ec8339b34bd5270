//! Cyclescope - Quarterly GDP Cycle Analysis
//!
//! Loads two quarterly GDP series from a semicolon-delimited file, detrends
//! them with the Hodrick-Prescott filter, and produces cycle statistics
//! (volatility, correlation, lag-1 autocorrelation, rolling correlation)
//! together with static chart images.
//!
//! The pipeline is strictly sequential: loader -> HP decomposer -> statistics
//! -> presentation. Each stage consumes an immutable input and returns a new
//! structure; nothing is mutated after handoff.

pub mod charts;
pub mod data;
pub mod filter;
pub mod report;
pub mod stats;
