//! DSP error types

use thiserror::Error;

/// Result type for numeric operations
pub type DspResult<T> = Result<T, DspError>;

/// Errors raised by the numeric core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DspError {
    /// An operation that needs at least one sample got none
    #[error("input is empty")]
    EmptyInput,

    /// Two sequences that must line up have different lengths
    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// A probability (or weight) is negative or not finite
    #[error("invalid probability: {0}")]
    InvalidProbability(f64),

    /// A distribution with no mass at all
    #[error("distribution has no nonzero probabilities")]
    EmptyDistribution,

    /// A parameter outside its valid domain
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The FFT backend rejected its buffers
    #[error("FFT failed: {0}")]
    Fft(String),
}

impl From<realfft::FftError> for DspError {
    fn from(err: realfft::FftError) -> Self {
        DspError::Fft(err.to_string())
    }
}
