//! Gaussian kernel density estimation for heatmap overlays
//!
//! ## Bandwidth
//! Scott's rule: the kernel covariance is the sample covariance scaled by
//! `n^(-1/3)` (factor `n^(-1/6)` squared, for 2 dimensions).
//!
//! Identical or colinear samples give a singular covariance. In that case
//! the off-diagonal term is dropped and each variance is floored at
//! `MIN_VARIANCE`, so any two finite samples still produce a surface.

use serde::Serialize;

use crate::error::{PitchError, Result};
use crate::pitch::{Position, ViewBounds};
use crate::style::Color;

/// Minimum samples for a covariance estimate
pub const MIN_SAMPLES: usize = 2;
/// Variance floor (units^2) for the degenerate fallback
pub const MIN_VARIANCE: f64 = 1.0;
/// Largest accepted grid resolution (cells along x)
pub const MAX_RESOLUTION: usize = 2048;

const SINGULAR_EPS: f64 = 1e-12;

/// Density values sampled at cell centers, row-major from `origin` upward
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityGrid {
    pub origin: Position,
    pub cell_width: f64,
    pub cell_height: f64,
    pub cols: usize,
    pub rows: usize,
    pub values: Vec<f64>,
}

impl DensityGrid {
    #[inline]
    pub fn get(&self, col: usize, row: usize) -> f64 {
        self.values[row * self.cols + col]
    }

    pub fn max_value(&self) -> f64 {
        self.values.iter().cloned().fold(0.0_f64, f64::max)
    }

    pub fn cell_center(&self, col: usize, row: usize) -> Position {
        Position::new(
            self.origin.x + (col as f64 + 0.5) * self.cell_width,
            self.origin.y + (row as f64 + 0.5) * self.cell_height,
        )
    }
}

/// Shaded density layer drawn over the pitch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityOverlay {
    pub grid: DensityGrid,
    pub levels: usize,
    pub color: Color,
    /// Grid maximum, cached so per-cell quantization stays O(1)
    pub peak: f64,
}

impl DensityOverlay {
    pub fn new(grid: DensityGrid, levels: usize, color: Color) -> Self {
        let peak = grid.max_value();
        Self { grid, levels, color, peak }
    }

    /// Quantized level of a cell in `0..=levels`. Level 0 is left unshaded.
    pub fn level(&self, col: usize, row: usize) -> usize {
        if self.peak <= 0.0 {
            return 0;
        }
        let ratio = self.grid.get(col, row) / self.peak;
        ((ratio * self.levels as f64).floor() as usize).min(self.levels)
    }
}

/// Fitted 2-D Gaussian KDE
#[derive(Debug, Clone)]
pub struct Kde {
    samples: Vec<Position>,
    inv_cov: [[f64; 2]; 2],
    norm: f64,
    degenerate: bool,
}

impl Kde {
    /// Fit from parallel x/y sequences
    pub fn fit(xs: &[f64], ys: &[f64]) -> Result<Self> {
        let samples = validate_samples(xs, ys)?;
        let n = samples.len() as f64;

        let mean_x = xs.iter().sum::<f64>() / n;
        let mean_y = ys.iter().sum::<f64>() / n;
        let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
        for p in &samples {
            let dx = p.x - mean_x;
            let dy = p.y - mean_y;
            sxx += dx * dx;
            syy += dy * dy;
            sxy += dx * dy;
        }
        let denom = n - 1.0;
        let (mut var_x, mut var_y, mut cov_xy) = (sxx / denom, syy / denom, sxy / denom);
        if !(var_x.is_finite() && var_y.is_finite() && cov_xy.is_finite()) {
            return Err(PitchError::NonFiniteCovariance);
        }

        let mut degenerate = false;
        if var_x * var_y - cov_xy * cov_xy <= SINGULAR_EPS * (1.0 + var_x * var_y) {
            degenerate = true;
            var_x = var_x.max(MIN_VARIANCE);
            var_y = var_y.max(MIN_VARIANCE);
            cov_xy = 0.0;
            tracing::warn!(samples = samples.len(), "singular sample covariance, using diagonal bandwidth");
        }

        let factor_sq = n.powf(-1.0 / 3.0);
        let (a, d, b) = (var_x * factor_sq, var_y * factor_sq, cov_xy * factor_sq);
        let det = a * d - b * b;
        if !(det.is_finite() && det > 0.0) {
            return Err(PitchError::NonFiniteCovariance);
        }
        let inv_cov = [[d / det, -b / det], [-b / det, a / det]];
        let norm = 1.0 / (2.0 * std::f64::consts::PI * det.sqrt() * n);

        Ok(Self { samples, inv_cov, norm, degenerate })
    }

    /// True when the singular-covariance fallback was used
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    pub fn evaluate(&self, at: Position) -> f64 {
        let [[i00, i01], [i10, i11]] = self.inv_cov;
        let sum: f64 = self
            .samples
            .iter()
            .map(|s| {
                let dx = at.x - s.x;
                let dy = at.y - s.y;
                let q = dx * (i00 * dx + i01 * dy) + dy * (i10 * dx + i11 * dy);
                (-0.5 * q).exp()
            })
            .sum();
        sum * self.norm
    }

    /// Evaluate over `view`, `resolution` cells along x. Rows follow the
    /// view aspect ratio.
    pub fn grid(&self, view: &ViewBounds, resolution: usize) -> Result<DensityGrid> {
        if resolution > MAX_RESOLUTION {
            return Err(PitchError::Configuration(format!(
                "heatmap resolution {} exceeds {}",
                resolution, MAX_RESOLUTION
            )));
        }
        let cols = resolution.max(1);
        let rows = ((cols as f64 * view.height() / view.width()).round() as usize).max(1);
        let len = cols.checked_mul(rows).ok_or_else(|| {
            PitchError::Configuration(format!("heatmap grid {}x{} is too large", cols, rows))
        })?;
        let cell_width = view.width() / cols as f64;
        let cell_height = view.height() / rows as f64;

        let mut grid = DensityGrid {
            origin: Position::new(view.x_min, view.y_min),
            cell_width,
            cell_height,
            cols,
            rows,
            values: Vec::with_capacity(len),
        };
        for row in 0..rows {
            for col in 0..cols {
                let v = self.evaluate(grid.cell_center(col, row));
                grid.values.push(v);
            }
        }
        Ok(grid)
    }
}

fn validate_samples(xs: &[f64], ys: &[f64]) -> Result<Vec<Position>> {
    if xs.len() != ys.len() {
        return Err(PitchError::SampleLengthMismatch { xs: xs.len(), ys: ys.len() });
    }
    if xs.len() < MIN_SAMPLES {
        return Err(PitchError::TooFewSamples { required: MIN_SAMPLES, found: xs.len() });
    }
    xs.iter()
        .zip(ys)
        .enumerate()
        .map(|(index, (&x, &y))| {
            if x.is_finite() && y.is_finite() {
                Ok(Position::new(x, y))
            } else {
                Err(PitchError::NonFiniteSample { index })
            }
        })
        .collect()
}
