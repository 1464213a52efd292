use crate::error::{DspError, DspResult};
use serde::Serialize;
use std::f64::consts::PI;

/// One term `b_n·sin(2π·n·f0·t)` of a sine series.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct HarmonicCoefficient {
    pub harmonic: usize,
    pub coefficient: f64,
}

/// Ideal square wave `A·sign(sin(2π·f0·t))`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SquareWave {
    pub amplitude: f64,
    pub frequency_hz: f64,
}

impl SquareWave {
    pub fn new(amplitude: f64, frequency_hz: f64) -> DspResult<Self> {
        if !(amplitude > 0.0) || !amplitude.is_finite() {
            return Err(DspError::InvalidParameter(format!(
                "square wave amplitude must be positive, got {amplitude}"
            )));
        }
        if !(frequency_hz > 0.0) || !frequency_hz.is_finite() {
            return Err(DspError::InvalidParameter(format!(
                "square wave frequency must be positive, got {frequency_hz}"
            )));
        }
        Ok(Self { amplitude, frequency_hz })
    }

    /// Sample the ideal wave. Exact zero crossings of the sine map to 0.
    pub fn sample(&self, t: &[f64]) -> Vec<f64> {
        t.iter()
            .map(|&t| self.amplitude * sign((2.0 * PI * self.frequency_hz * t).sin()))
            .collect()
    }

    /// Coefficients `4A/(nπ)` for the odd harmonics `n ≤ max_harmonic`.
    pub fn coefficients(&self, max_harmonic: usize) -> Vec<HarmonicCoefficient> {
        (1..=max_harmonic)
            .step_by(2)
            .map(|n| HarmonicCoefficient {
                harmonic: n,
                coefficient: 4.0 * self.amplitude / (n as f64 * PI),
            })
            .collect()
    }

    /// Truncated series up to `max_harmonic`, evaluated at `t`.
    pub fn reconstruct(&self, t: &[f64], max_harmonic: usize) -> Vec<f64> {
        reconstruct(t, &self.coefficients(max_harmonic), self.frequency_hz)
    }
}

fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Sum of sine terms `b_n·sin(2π·n·f0·t)`.
pub fn reconstruct(t: &[f64], coefficients: &[HarmonicCoefficient], fundamental_hz: f64) -> Vec<f64> {
    let mut signal = vec![0.0; t.len()];
    for c in coefficients {
        let w = 2.0 * PI * c.harmonic as f64 * fundamental_hz;
        for (s, &t) in signal.iter_mut().zip(t.iter()) {
            *s += c.coefficient * (w * t).sin();
        }
    }
    signal
}

/// Mean of the squared differences.
pub fn mean_squared_error(original: &[f64], reconstructed: &[f64]) -> DspResult<f64> {
    if original.len() != reconstructed.len() {
        return Err(DspError::LengthMismatch {
            expected: original.len(),
            actual: reconstructed.len(),
        });
    }
    if original.is_empty() {
        return Err(DspError::EmptyInput);
    }
    let sum: f64 = original
        .iter()
        .zip(reconstructed.iter())
        .map(|(a, b)| (a - b).powi(2))
        .sum();
    Ok(sum / original.len() as f64)
}

/// Peak overshoot above `amplitude`, as a fraction of the full jump `2·amplitude`.
///
/// For a square wave the truncated series settles near 0.0895 however many
/// harmonics are summed.
pub fn gibbs_overshoot(reconstruction: &[f64], amplitude: f64) -> DspResult<f64> {
    if !(amplitude > 0.0) {
        return Err(DspError::InvalidParameter(format!(
            "amplitude must be positive, got {amplitude}"
        )));
    }
    let peak = reconstruction
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    if !peak.is_finite() {
        return Err(DspError::EmptyInput);
    }
    Ok(((peak - amplitude) / (2.0 * amplitude)).max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::generate::linspace;

    const HARMONICS: [usize; 6] = [1, 3, 5, 10, 20, 50];

    fn setup() -> (SquareWave, Vec<f64>, Vec<f64>) {
        let wave = SquareWave::new(1.0, 1.0).unwrap();
        let t = linspace(0.0, 2.0, 1000, true);
        let ideal = wave.sample(&t);
        (wave, t, ideal)
    }

    #[test]
    fn test_coefficients_are_odd_only() {
        let wave = SquareWave::new(2.0, 1.0).unwrap();
        let coeffs = wave.coefficients(10);
        let harmonics: Vec<usize> = coeffs.iter().map(|c| c.harmonic).collect();
        assert_eq!(harmonics, vec![1, 3, 5, 7, 9]);
        assert!((coeffs[0].coefficient - 8.0 / PI).abs() < 1e-12);
        assert!((coeffs[1].coefficient - 8.0 / (3.0 * PI)).abs() < 1e-12);
        assert!(wave.coefficients(0).is_empty());
    }

    #[test]
    fn test_square_wave_sign_convention() {
        let wave = SquareWave::new(1.5, 1.0).unwrap();
        let s = wave.sample(&[0.0, 0.25, 0.75]);
        assert_eq!(s, vec![0.0, 1.5, -1.5]);
    }

    #[test]
    fn test_mse_decreases_with_harmonics() {
        let (wave, t, ideal) = setup();
        let errors: Vec<f64> = HARMONICS
            .iter()
            .map(|&n| mean_squared_error(&ideal, &wave.reconstruct(&t, n)).unwrap())
            .collect();

        for pair in errors.windows(2) {
            assert!(pair[1] < pair[0], "MSE did not decrease: {errors:?}");
        }
        assert!((errors[0] - 0.18924).abs() < 1e-4, "N=1 MSE {}", errors[0]);
        assert!((errors[5] - 0.00813).abs() < 1e-4, "N=50 MSE {}", errors[5]);
    }

    #[test]
    fn test_mse_never_increases_up_to_fifty() {
        let (wave, t, ideal) = setup();
        let errors: Vec<f64> = (1..=50)
            .map(|n| mean_squared_error(&ideal, &wave.reconstruct(&t, n)).unwrap())
            .collect();
        for (i, pair) in errors.windows(2).enumerate() {
            // even limits add no new odd term, so equality is allowed
            assert!(
                pair[1] <= pair[0],
                "MSE rose from N={} ({}) to N={} ({})",
                i + 1,
                pair[0],
                i + 2,
                pair[1]
            );
        }
    }

    #[test]
    fn test_reconstruction_is_deterministic() {
        let (wave, t, ideal) = setup();
        let a = mean_squared_error(&ideal, &wave.reconstruct(&t, 20)).unwrap();
        let b = mean_squared_error(&ideal, &wave.reconstruct(&t, 20)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_gibbs_overshoot_persists() {
        let (wave, t, _) = setup();
        for &n in &HARMONICS[3..] {
            let overshoot = gibbs_overshoot(&wave.reconstruct(&t, n), 1.0).unwrap();
            assert!(
                overshoot > 0.08 && overshoot < 0.1,
                "{n} harmonics: overshoot {overshoot}"
            );
        }
    }

    #[test]
    fn test_mse_errors() {
        assert!(mean_squared_error(&[], &[]).is_err());
        assert!(mean_squared_error(&[1.0], &[]).is_err());
        assert!(gibbs_overshoot(&[], 1.0).is_err());
        assert!(gibbs_overshoot(&[1.0], 0.0).is_err());
        assert!(SquareWave::new(-1.0, 1.0).is_err());
    }
}
