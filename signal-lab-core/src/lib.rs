//! Numeric core of signal-lab.
//!
//! Signal generators, FFT spectra, the FFT-based Hilbert transform, truncated
//! Fourier series, Shannon entropy and phasor geometry. Nothing here does I/O;
//! the `signal-lab` crate drives these functions and renders the results.

pub mod dsp;
pub mod error;
pub mod types;

pub use error::{DspError, DspResult};
pub use realfft::num_complex::Complex;
pub use types::{Signal, Tone};
