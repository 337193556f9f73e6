use crate::quadrature::QuadratureError;

/// Convenience result type used across the crate.
pub type FourierResult<T> = Result<T, FourierError>;

/// Top-level error taxonomy. Every variant is fatal to the run it occurs in.
#[derive(thiserror::Error, Debug)]
pub enum FourierError {
    /// Interval bounds are not finite or `lower >= upper`.
    #[error("invalid interval: lower ({lower}) must be finite and < upper ({upper})")]
    InvalidInterval {
        /// Requested lower limit.
        lower: f64,
        /// Requested upper limit.
        upper: f64,
    },

    /// Numeric integration did not converge or saw non-finite integrand values.
    #[error("integration failure: {0}")]
    IntegrationFailure(#[from] QuadratureError),

    /// Negative harmonic count, or a zero index where a positive harmonic is required.
    #[error("invalid harmonic count: {0}")]
    InvalidHarmonicCount(i64),

    /// Invalid user-provided values.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while rasterizing a frame.
    #[error("render error: {0}")]
    Render(String),

    /// Errors while writing frames to an output.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FourierError {
    /// Build a [`FourierError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FourierError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`FourierError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
