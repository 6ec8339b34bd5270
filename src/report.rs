//! Report Module
//! Plain-data summary of the analysis plus its text and JSON renderings.
//!
//! Formatting contract: volatility at 2 decimal places, correlations at 3.

use serde::Serialize;
use std::fmt;

/// Per-series cycle statistics.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesSummary {
    pub name: String,
    pub volatility: f64,
    pub lag1_autocorrelation: f64,
}

/// Full summary of one analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSummary {
    pub lambda: f64,
    pub observations: usize,
    pub first_period: String,
    pub last_period: String,
    pub series: Vec<SeriesSummary>,
    pub contemporaneous_correlation: f64,
    pub rolling_window: usize,
    pub rolling_correlation: Vec<f64>,
}

impl AnalysisSummary {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for AnalysisSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "HP cycle analysis ({} - {}, {} quarters, lambda = {})",
            self.first_period, self.last_period, self.observations, self.lambda
        )?;
        for s in &self.series {
            writeln!(
                f,
                "  {:<14} volatility: {:>6.2}   lag-1 autocorrelation: {:>6.3}",
                s.name, s.volatility, s.lag1_autocorrelation
            )?;
        }
        writeln!(
            f,
            "  Contemporaneous cycle correlation: {:.3}",
            self.contemporaneous_correlation
        )?;
        write!(
            f,
            "  Rolling correlation ({}-quarter window): {} values",
            self.rolling_window,
            self.rolling_correlation.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AnalysisSummary {
        AnalysisSummary {
            lambda: 1600.0,
            observations: 123,
            first_period: "1994-Q1".to_string(),
            last_period: "2024-Q3".to_string(),
            series: vec![
                SeriesSummary {
                    name: "Japan".to_string(),
                    volatility: 1.2345,
                    lag1_autocorrelation: 0.81234,
                },
                SeriesSummary {
                    name: "South Africa".to_string(),
                    volatility: 1.4567,
                    lag1_autocorrelation: 0.77777,
                },
            ],
            contemporaneous_correlation: 0.12345,
            rolling_window: 5,
            rolling_correlation: vec![0.1; 119],
        }
    }

    #[test]
    fn text_uses_fixed_precision() {
        let text = sample().to_string();
        // Volatility at 2 decimals, correlations at 3.
        assert!(text.contains("1.23"));
        assert!(text.contains("0.812"));
        assert!(text.contains("0.123"));
        assert!(text.contains("119 values"));
    }

    #[test]
    fn json_round_trips_the_fields() {
        let json = sample().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["observations"], 123);
        assert_eq!(value["series"][0]["name"], "Japan");
        assert_eq!(value["rolling_window"], 5);
        assert_eq!(
            value["rolling_correlation"].as_array().unwrap().len(),
            119
        );
    }
}
