use realfft::num_complex::Complex;
use serde::Serialize;

/// A point in the complex plane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A sinusoid's amplitude and phase, with the color and label it is drawn with.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Phasor {
    pub amplitude: f64,
    pub phase_rad: f64,
    pub color: String,
    pub label: Option<String>,
}

impl Phasor {
    pub fn new(amplitude: f64, phase_rad: f64, color: impl Into<String>) -> Self {
        Self {
            amplitude,
            phase_rad,
            color: color.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn phase_deg(&self) -> f64 {
        self.phase_rad.to_degrees()
    }

    /// Tip of the phasor arrow.
    pub fn to_cartesian(&self) -> Point {
        Point {
            x: self.amplitude * self.phase_rad.cos(),
            y: self.amplitude * self.phase_rad.sin(),
        }
    }

    pub fn to_complex(&self) -> Complex<f64> {
        Complex::from_polar(self.amplitude, self.phase_rad)
    }

    /// Magnitude/angle annotation such as `5∠45.0°`.
    pub fn polar_label(&self) -> String {
        format!("{}∠{:.1}°", self.amplitude, self.phase_deg())
    }

    /// Legend text: `label: polar form`, or just the polar form when unlabeled.
    pub fn legend(&self) -> String {
        match &self.label {
            Some(label) => format!("{label}: {}", self.polar_label()),
            None => self.polar_label(),
        }
    }
}
