use thiserror::Error;

/// Coordinate axis named in bounds errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

#[derive(Error, Debug)]
pub enum PitchError {
    #[error("Location out of bounds: {axis}={value:.2} not in [{min:.2}, {max:.2}]")]
    OutOfBounds { axis: Axis, value: f64, min: f64, max: f64 },

    #[error("Invalid pass type: {0:?} (expected low, ground or high)")]
    InvalidPassType(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Sample length mismatch: {xs} x values, {ys} y values")]
    SampleLengthMismatch { xs: usize, ys: usize },

    #[error("Heatmap needs at least {required} samples, got {found}")]
    TooFewSamples { required: usize, found: usize },

    #[error("Non-finite heatmap sample at index {index}")]
    NonFiniteSample { index: usize },

    #[error("Heatmap samples too large for a finite covariance")]
    NonFiniteCovariance,

    #[error("Render error: {0}")]
    Render(#[from] std::io::Error),
}

impl PitchError {
    /// True for the value-error class raised by malformed heatmap samples
    pub fn is_sample_error(&self) -> bool {
        matches!(
            self,
            PitchError::SampleLengthMismatch { .. }
                | PitchError::TooFewSamples { .. }
                | PitchError::NonFiniteSample { .. }
                | PitchError::NonFiniteCovariance
        )
    }
}

impl From<serde_json::Error> for PitchError {
    fn from(err: serde_json::Error) -> Self {
        PitchError::Configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PitchError>;
