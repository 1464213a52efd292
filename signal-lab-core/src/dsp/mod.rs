pub mod entropy;
pub mod fft;
pub mod fourier_series;
pub mod generate;
pub mod hilbert;
pub mod phasor;
