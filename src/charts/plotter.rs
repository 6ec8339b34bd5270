//! Chart Plotter Module
//! Renders static PNG line charts with plotters. The plotter only draws
//! what it is handed: slices of values and period labels. It never computes
//! statistics itself.

use plotters::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use super::axis;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to create chart directory: {0}")]
    OutputDir(#[from] std::io::Error),
    #[error("Chart render failed: {0}")]
    Render(String),
}

const CHART_SIZE: (u32, u32) = (1024, 576);
/// Target number of period labels along the x-axis.
const TICK_TARGET: usize = 8;

pub const SERIES_A_COLOR: RGBColor = RGBColor(52, 152, 219); // Blue
pub const SERIES_B_COLOR: RGBColor = RGBColor(231, 76, 60); // Red
pub const TREND_COLOR: RGBColor = RGBColor(44, 62, 80); // Dark slate

/// A named series to draw as one line.
pub struct LineSpec<'a> {
    pub name: &'a str,
    pub values: &'a [f64],
    pub color: RGBColor,
}

/// Renders chart images into a fixed output directory.
pub struct ChartPlotter {
    out_dir: PathBuf,
}

impl ChartPlotter {
    pub fn new(out_dir: &Path) -> Result<Self, ChartError> {
        std::fs::create_dir_all(out_dir)?;
        Ok(Self {
            out_dir: out_dir.to_path_buf(),
        })
    }

    /// Log-level series together with its HP trend.
    pub fn trend_chart(
        &self,
        file_stem: &str,
        title: &str,
        labels: &[String],
        observed: &[f64],
        trend: &[f64],
    ) -> Result<PathBuf, ChartError> {
        self.line_chart(
            file_stem,
            title,
            labels,
            &[
                LineSpec {
                    name: "log GDP",
                    values: observed,
                    color: SERIES_A_COLOR,
                },
                LineSpec {
                    name: "HP trend",
                    values: trend,
                    color: TREND_COLOR,
                },
            ],
            0,
        )
    }

    /// Both cycle series on a shared axis.
    pub fn cycle_chart(
        &self,
        title: &str,
        labels: &[String],
        lines: &[LineSpec<'_>],
    ) -> Result<PathBuf, ChartError> {
        self.line_chart("cycles", title, labels, lines, 0)
    }

    /// Rolling correlation, offset so element `i` is drawn at the end of
    /// its window (`x = i + window - 1`).
    pub fn rolling_correlation_chart(
        &self,
        title: &str,
        labels: &[String],
        window: usize,
        values: &[f64],
    ) -> Result<PathBuf, ChartError> {
        self.line_chart(
            "rolling_correlation",
            title,
            labels,
            &[LineSpec {
                name: "rolling correlation",
                values,
                color: SERIES_B_COLOR,
            }],
            window.saturating_sub(1),
        )
    }

    fn line_chart(
        &self,
        file_stem: &str,
        title: &str,
        labels: &[String],
        lines: &[LineSpec<'_>],
        x_offset: usize,
    ) -> Result<PathBuf, ChartError> {
        let path = self.out_dir.join(format!("{file_stem}.png"));

        let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for line in lines {
            for &v in line.values {
                y_min = y_min.min(v);
                y_max = y_max.max(v);
            }
        }
        if !y_min.is_finite() {
            (y_min, y_max) = (0.0, 1.0);
        }
        let pad = ((y_max - y_min) * 0.08).max(1e-6);

        let stride = axis::stride_for(labels.len(), TICK_TARGET);
        let ticks: HashMap<usize, String> =
            axis::tick_labels(labels.len(), stride, |i| labels[i].clone())
                .into_iter()
                .collect();

        let render_path = path.clone();
        let root = BitMapBackend::new(&render_path, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| ChartError::Render(e.to_string()))?;

        let x_max = labels.len().saturating_sub(1).max(1) as f64;
        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(0.0..x_max, (y_min - pad)..(y_max + pad))
            .map_err(|e| ChartError::Render(e.to_string()))?;

        chart
            .configure_mesh()
            .x_desc("Quarter")
            .x_labels(labels.len().div_ceil(stride))
            .x_label_formatter(&|x| {
                let idx = x.round() as usize;
                ticks.get(&idx).cloned().unwrap_or_default()
            })
            .draw()
            .map_err(|e| ChartError::Render(e.to_string()))?;

        for line in lines {
            let color = line.color;
            chart
                .draw_series(LineSeries::new(
                    line.values
                        .iter()
                        .enumerate()
                        .map(|(i, &v)| ((i + x_offset) as f64, v)),
                    &color,
                ))
                .map_err(|e| ChartError::Render(e.to_string()))?
                .label(line.name)
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color)
                });
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(|e| ChartError::Render(e.to_string()))?;

        root.present()
            .map_err(|e| ChartError::Render(e.to_string()))?;

        info!(chart = %path.display(), "rendered chart");
        Ok(path)
    }
}
