use crate::error::{DspError, DspResult};
use crate::types::Signal;
use realfft::num_complex::Complex;
use realfft::{ComplexToReal, RealFftPlanner, RealToComplex};
use serde::Serialize;
use std::cell::RefCell;
use std::sync::Arc;

thread_local! {
    static FFT_PLANNER: RefCell<RealFftPlanner<f64>> = RefCell::new(RealFftPlanner::new());
}

pub(crate) fn plan_forward(len: usize) -> Arc<dyn RealToComplex<f64>> {
    FFT_PLANNER.with(|p| p.borrow_mut().plan_fft_forward(len))
}

pub(crate) fn plan_inverse(len: usize) -> Arc<dyn ComplexToReal<f64>> {
    FFT_PLANNER.with(|p| p.borrow_mut().plan_fft_inverse(len))
}

/// Bin frequencies of a length-`n` DFT with sample spacing `d`, in transform order:
/// `0, 1, …, ⌈n/2⌉-1, -⌊n/2⌋, …, -1` divided by `d·n`.
pub fn fft_frequencies(n: usize, d: f64) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let scale = 1.0 / (d * n as f64);
    let positive = (n - 1) / 2 + 1;
    (0..n)
        .map(|k| {
            if k < positive {
                k as f64 * scale
            } else {
                (k as f64 - n as f64) * scale
            }
        })
        .collect()
}

/// Spectrum of a real signal.
///
/// Holds the non-negative half of the DFT (`n/2 + 1` bins); the negative half is
/// the complex conjugate mirror and is rebuilt on demand by [`Spectrum::full`].
#[derive(Clone, Debug)]
pub struct Spectrum {
    bins: Vec<Complex<f64>>,
    len: usize,
    sample_rate: f64,
}

/// A local maximum of a single-sided amplitude spectrum.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SpectralPeak {
    pub bin: usize,
    pub frequency_hz: f64,
    pub amplitude: f64,
}

impl Spectrum {
    pub fn forward(signal: &Signal) -> DspResult<Self> {
        Self::from_samples(&signal.samples, signal.sample_rate)
    }

    /// Forward real FFT of `samples` taken at `sample_rate`.
    pub fn from_samples(samples: &[f64], sample_rate: f64) -> DspResult<Self> {
        let len = samples.len();
        if len == 0 {
            return Err(DspError::EmptyInput);
        }
        if !(sample_rate > 0.0) {
            return Err(DspError::InvalidParameter(format!(
                "sample rate must be positive, got {sample_rate}"
            )));
        }
        if len == 1 {
            return Ok(Self {
                bins: vec![Complex::new(samples[0], 0.0)],
                len,
                sample_rate,
            });
        }

        let fft = plan_forward(len);
        let mut input = fft.make_input_vec();
        input.copy_from_slice(samples);
        let mut bins = fft.make_output_vec();
        fft.process(&mut input, &mut bins)?;

        log::debug!("forward FFT: {} samples -> {} bins", len, bins.len());
        Ok(Self { bins, len, sample_rate })
    }

    /// Non-negative frequency bins, `0..=n/2`.
    pub fn bins(&self) -> &[Complex<f64>] {
        &self.bins
    }

    /// Length `n` of the transformed signal.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Bin spacing in Hz.
    pub fn resolution(&self) -> f64 {
        self.sample_rate / self.len as f64
    }

    /// All `n` DFT bins, negative frequencies rebuilt by Hermitian symmetry.
    pub fn full(&self) -> Vec<Complex<f64>> {
        (0..self.len)
            .map(|k| {
                if k < self.bins.len() {
                    self.bins[k]
                } else {
                    self.bins[self.len - k].conj()
                }
            })
            .collect()
    }

    /// Inverse transform back to `n` real samples.
    pub fn inverse(&self) -> DspResult<Vec<f64>> {
        inverse_real(self.bins.clone(), self.len)
    }

    /// `(frequency, 2|X_k|/n)` for `k` in `0..n/2`.
    pub fn single_sided(&self) -> Vec<(f64, f64)> {
        let n = self.len as f64;
        let resolution = self.resolution();
        self.bins
            .iter()
            .take(self.len / 2)
            .enumerate()
            .map(|(k, c)| (k as f64 * resolution, 2.0 * c.norm() / n))
            .collect()
    }

    /// Single-sided amplitude of the bin nearest `frequency_hz`.
    pub fn amplitude_at(&self, frequency_hz: f64) -> f64 {
        let bin = (frequency_hz / self.resolution()).round().max(0.0) as usize;
        let bin = bin.min(self.bins.len() - 1);
        2.0 * self.bins[bin].norm() / self.len as f64
    }
}

/// Complex-to-real inverse FFT of a half spectrum, normalized by `1/len`.
///
/// The DC bin (and the Nyquist bin for even lengths) must be real; any
/// imaginary residue there is discarded.
pub(crate) fn inverse_real(mut bins: Vec<Complex<f64>>, len: usize) -> DspResult<Vec<f64>> {
    if len == 0 {
        return Err(DspError::EmptyInput);
    }
    if bins.len() != len / 2 + 1 {
        return Err(DspError::LengthMismatch {
            expected: len / 2 + 1,
            actual: bins.len(),
        });
    }
    if len == 1 {
        return Ok(vec![bins[0].re]);
    }

    bins[0].im = 0.0;
    if len % 2 == 0 {
        bins[len / 2].im = 0.0;
    }

    let ifft = plan_inverse(len);
    let mut output = ifft.make_output_vec();
    ifft.process(&mut bins, &mut output)?;

    let scale = 1.0 / len as f64;
    output.iter_mut().for_each(|s| *s *= scale);
    Ok(output)
}

/// Local maxima of a single-sided spectrum at or above `threshold`,
/// strongest first, at most `max_peaks` of them.
pub fn find_peaks(spectrum: &[(f64, f64)], threshold: f64, max_peaks: usize) -> Vec<SpectralPeak> {
    let n = spectrum.len();
    let mut peaks: Vec<SpectralPeak> = (0..n)
        .filter(|&i| {
            let amp = spectrum[i].1;
            let left_ok = i == 0 || amp > spectrum[i - 1].1;
            let right_ok = i + 1 == n || amp >= spectrum[i + 1].1;
            amp >= threshold && left_ok && right_ok
        })
        .map(|i| SpectralPeak {
            bin: i,
            frequency_hz: spectrum[i].0,
            amplitude: spectrum[i].1,
        })
        .collect();

    peaks.sort_by(|a, b| {
        b.amplitude
            .partial_cmp(&a.amplitude)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    peaks.truncate(max_peaks);
    peaks
}

/// Element-wise sum of equally long single-sided spectra.
///
/// Frequencies are taken from the first spectrum.
pub fn sum_amplitudes(spectra: &[Vec<(f64, f64)>]) -> DspResult<Vec<(f64, f64)>> {
    let first = spectra.first().ok_or(DspError::EmptyInput)?;
    let mut total = first.clone();
    for spectrum in &spectra[1..] {
        if spectrum.len() != total.len() {
            return Err(DspError::LengthMismatch {
                expected: total.len(),
                actual: spectrum.len(),
            });
        }
        for (acc, &(_, amp)) in total.iter_mut().zip(spectrum.iter()) {
            acc.1 += amp;
        }
    }
    Ok(total)
}
