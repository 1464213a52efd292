//! Hilbert transform and analytic signal via FFT sign filtering.
//!
//! The transform multiplies every bin by `-i·sign(f)`: positive frequencies are
//! rotated by -90°, negative ones by +90°, and the DC bin (plus the Nyquist bin
//! for even lengths) is zeroed. Only the non-negative half is filtered; the
//! negative half stays the conjugate mirror, so a complex-to-real inverse FFT
//! gives the real part directly.

use crate::dsp::fft::{inverse_real, plan_forward};
use crate::error::{DspError, DspResult};
use realfft::num_complex::Complex;

/// Hilbert transform of a real sequence. Output has the same length.
pub fn hilbert(x: &[f64]) -> DspResult<Vec<f64>> {
    let n = x.len();
    if n == 0 {
        return Err(DspError::EmptyInput);
    }
    if n == 1 {
        return Ok(vec![0.0]);
    }

    let fft = plan_forward(n);
    let mut input = fft.make_input_vec();
    input.copy_from_slice(x);
    let mut spectrum = fft.make_output_vec();
    fft.process(&mut input, &mut spectrum)?;

    let nyquist = if n % 2 == 0 { Some(n / 2) } else { None };
    for (k, bin) in spectrum.iter_mut().enumerate() {
        if k == 0 || Some(k) == nyquist {
            *bin = Complex::new(0.0, 0.0);
        } else {
            // -i·(a + ib) = b - ia
            *bin = Complex::new(bin.im, -bin.re);
        }
    }

    inverse_real(spectrum, n)
}

/// Complex analytic signal `x + i·H[x]`.
#[derive(Clone, Debug)]
pub struct AnalyticSignal {
    samples: Vec<Complex<f64>>,
}

impl AnalyticSignal {
    pub fn from_real(x: &[f64]) -> DspResult<Self> {
        let h = hilbert(x)?;
        let samples = x
            .iter()
            .zip(h.iter())
            .map(|(&re, &im)| Complex::new(re, im))
            .collect();
        Ok(Self { samples })
    }

    pub fn samples(&self) -> &[Complex<f64>] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Imaginary part, i.e. the Hilbert transform of the original signal.
    pub fn hilbert(&self) -> Vec<f64> {
        self.samples.iter().map(|c| c.im).collect()
    }

    /// Instantaneous amplitude `|x + i·H[x]|`.
    pub fn envelope(&self) -> Vec<f64> {
        self.samples.iter().map(|c| c.norm()).collect()
    }

    /// Instantaneous phase in radians, wrapped to `(-π, π]`.
    pub fn instantaneous_phase(&self) -> Vec<f64> {
        self.samples.iter().map(|c| c.arg()).collect()
    }
}

/// Root-mean-square difference between two sequences.
pub fn rms_error(a: &[f64], b: &[f64]) -> DspResult<f64> {
    if a.len() != b.len() {
        return Err(DspError::LengthMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    if a.is_empty() {
        return Err(DspError::EmptyInput);
    }
    let sum: f64 = a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum();
    Ok((sum / a.len() as f64).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::generate::rectangular_pulse;
    use std::f64::consts::PI;

    fn time_base(fs: f64, n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64 / fs).collect()
    }

    #[test]
    fn test_sine_maps_to_negative_cosine() {
        let t = time_base(1000.0, 1000);
        let x: Vec<f64> = t.iter().map(|&t| (2.0 * PI * 10.0 * t).sin()).collect();
        let expected: Vec<f64> = t.iter().map(|&t| -(2.0 * PI * 10.0 * t).cos()).collect();

        let h = hilbert(&x).unwrap();
        let rms = rms_error(&h, &expected).unwrap();
        assert!(rms < 1e-3, "RMS error {rms}");
    }

    #[test]
    fn test_odd_length_sine() {
        let n = 999;
        let t = time_base(n as f64, n);
        let x: Vec<f64> = t.iter().map(|&t| (2.0 * PI * 7.0 * t).sin()).collect();
        let expected: Vec<f64> = t.iter().map(|&t| -(2.0 * PI * 7.0 * t).cos()).collect();
        let rms = rms_error(&hilbert(&x).unwrap(), &expected).unwrap();
        assert!(rms < 1e-3, "RMS error {rms}");
    }

    #[test]
    fn test_sine_envelope_is_flat() {
        let t = time_base(1000.0, 1000);
        let x: Vec<f64> = t.iter().map(|&t| 0.7 * (2.0 * PI * 10.0 * t).sin()).collect();
        let analytic = AnalyticSignal::from_real(&x).unwrap();
        assert_eq!(analytic.len(), x.len());
        for (i, env) in analytic.envelope().iter().enumerate() {
            assert!((env - 0.7).abs() < 1e-6, "sample {i}: envelope {env}");
        }
        // Real part is the original signal untouched
        for (c, &orig) in analytic.samples().iter().zip(x.iter()) {
            assert_eq!(c.re, orig);
        }
    }

    #[test]
    fn test_sine_phase_advances_linearly() {
        let t = time_base(1000.0, 1000);
        let x: Vec<f64> = t.iter().map(|&t| (2.0 * PI * 10.0 * t).cos()).collect();
        let phase = AnalyticSignal::from_real(&x).unwrap().instantaneous_phase();
        // cos(θ) + i·sin(θ): phase equals θ wrapped
        assert!(phase[0].abs() < 1e-9);
        assert!((phase[25] - PI / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_dc_is_removed() {
        let h = hilbert(&[3.0; 16]).unwrap();
        assert!(h.iter().all(|v| v.abs() < 1e-12));
    }

    #[test]
    fn test_pulse_envelope_peaks_at_edges() {
        let pulse = rectangular_pulse(1000, 400, 600).unwrap();
        let h = hilbert(&pulse).unwrap();
        // Log singularities at the edges dominate the transform
        let (peak_idx, _) = h
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.abs().partial_cmp(&b.1.abs()).unwrap())
            .unwrap();
        assert!(
            (peak_idx as isize - 400).abs() <= 1 || (peak_idx as isize - 600).abs() <= 1,
            "peak at {peak_idx}"
        );
    }

    #[test]
    fn test_degenerate_lengths() {
        assert_eq!(hilbert(&[]).unwrap_err(), DspError::EmptyInput);
        assert_eq!(hilbert(&[4.0]).unwrap(), vec![0.0]);
    }

    #[test]
    fn test_rms_error_mismatch() {
        assert!(rms_error(&[1.0], &[1.0, 2.0]).is_err());
        assert!((rms_error(&[1.0, -1.0], &[0.0, 0.0]).unwrap() - 1.0).abs() < 1e-12);
    }
}
