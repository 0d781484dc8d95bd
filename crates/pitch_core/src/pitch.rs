//! Pitch coordinate space
//!
//! - X axis: 0 = left goal line, `width` = right goal line
//! - Y axis: 0 = bottom touchline, `height` = top touchline
//!
//! Default dimensions follow the 120x80 event-data convention.

use serde::{Deserialize, Serialize};

use crate::error::{Axis, PitchError, Result};

/// Default pitch length (x extent)
pub const DEFAULT_WIDTH: f64 = 120.0;
/// Default pitch width (y extent)
pub const DEFAULT_HEIGHT: f64 = 80.0;
/// View padding around the pitch rectangle on every side
pub const DEFAULT_VIEW_PADDING: f64 = 2.0;

/// A point in pitch space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Pitch rectangle dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitchDimensions {
    pub width: f64,
    pub height: f64,
}

impl Default for PitchDimensions {
    fn default() -> Self {
        Self { width: DEFAULT_WIDTH, height: DEFAULT_HEIGHT }
    }
}

impl PitchDimensions {
    /// Validated constructor. Width and height must be finite and positive.
    pub fn new(width: f64, height: f64) -> Result<Self> {
        let dims = Self { width, height };
        dims.validate()?;
        Ok(dims)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(PitchError::Configuration(format!(
                "pitch width must be positive, got {}",
                self.width
            )));
        }
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(PitchError::Configuration(format!(
                "pitch height must be positive, got {}",
                self.height
            )));
        }
        Ok(())
    }

    pub fn center(&self) -> Position {
        Position::new(self.width * 0.5, self.height * 0.5)
    }

    /// Check a position against the closed rectangle [0, width] x [0, height].
    ///
    /// The x axis is checked first, so an error always names the first
    /// offending coordinate.
    pub fn validate_position(&self, pos: Position) -> Result<()> {
        check_axis(Axis::X, pos.x, self.width)?;
        check_axis(Axis::Y, pos.y, self.height)?;
        Ok(())
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.validate_position(pos).is_ok()
    }
}

fn check_axis(axis: Axis, value: f64, max: f64) -> Result<()> {
    // NaN fails both comparisons, so test for containment instead
    if (0.0..=max).contains(&value) {
        Ok(())
    } else {
        Err(PitchError::OutOfBounds { axis, value, min: 0.0, max })
    }
}

/// Visible data range of the surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ViewBounds {
    /// Pitch rectangle grown by `padding` on all four sides
    pub fn padded(dims: &PitchDimensions, padding: f64) -> Self {
        Self {
            x_min: -padding,
            x_max: dims.width + padding,
            y_min: -padding,
            y_max: dims.height + padding,
        }
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}
