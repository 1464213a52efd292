use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// A uniformly sampled real signal.
#[derive(Clone, Debug, PartialEq)]
pub struct Signal {
    pub samples: Vec<f64>,
    pub sample_rate: f64,
}

impl Signal {
    pub fn new(samples: Vec<f64>, sample_rate: f64) -> Self {
        Self { samples, sample_rate }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate
    }

    /// Sample instants `i / fs`, starting at zero and excluding the end point.
    pub fn time_axis(&self) -> Vec<f64> {
        (0..self.samples.len())
            .map(|i| i as f64 / self.sample_rate)
            .collect()
    }

    /// Element-wise product with another signal of the same length.
    pub fn multiply(&self, other: &Signal) -> Signal {
        let samples = self
            .samples
            .iter()
            .zip(other.samples.iter())
            .map(|(a, b)| a * b)
            .collect();
        Signal::new(samples, self.sample_rate)
    }
}

/// One sinusoidal component `A·sin(2πft + φ)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    pub frequency_hz: f64,
    pub amplitude: f64,
    #[serde(default)]
    pub phase_rad: f64,
}

impl Tone {
    pub fn new(frequency_hz: f64, amplitude: f64, phase_rad: f64) -> Self {
        Self { frequency_hz, amplitude, phase_rad }
    }

    /// Value of the tone at time `t` (seconds).
    pub fn at(&self, t: f64) -> f64 {
        self.amplitude * (2.0 * PI * self.frequency_hz * t + self.phase_rad).sin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_axis_excludes_end_point() {
        let signal = Signal::new(vec![0.0; 4], 4.0);
        assert_eq!(signal.time_axis(), vec![0.0, 0.25, 0.5, 0.75]);
        assert!((signal.duration_secs() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_tone_phase_shift() {
        // sin(x + π/2) = cos(x)
        let tone = Tone::new(50.0, 2.0, PI / 2.0);
        assert!((tone.at(0.0) - 2.0).abs() < 1e-12);
        assert!(tone.at(1.0 / 200.0).abs() < 1e-12);
    }
}
