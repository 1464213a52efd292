//! # Configuration
//!
//! YAML configuration for the demos. Every field defaults to the constants of
//! the classic exercises, so an empty file (or no file at all) reproduces them.
//!
//! ## Search path
//!
//! 1. Path given on the command line (`--config`)
//! 2. Path in the `SIGNAL_LAB_CONFIG` environment variable
//! 3. `./signal-lab.yaml`
//! 4. Built-in defaults
//!
//! ## Example
//!
//! ```yaml
//! output:
//!   dir: "figures"
//!   write_wav: true
//!
//! spectrum:
//!   tones:
//!     - { frequency_hz: 60.0, amplitude: 1.0 }
//!     - { frequency_hz: 180.0, amplitude: 0.3 }
//!
//! fourier:
//!   harmonics: [1, 5, 25, 101]
//! ```

use serde::{Deserialize, Serialize};
use signal_lab_core::Tone;
use std::f64::consts::PI;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "SIGNAL_LAB_CONFIG";

/// Config file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "signal-lab.yaml";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("config not found: {0}")]
    NotFound(String),
    #[error("failed to read config: {0}")]
    Read(String),
    #[error("failed to parse config: {0}")]
    Parse(String),
    #[error("invalid config: {0}")]
    Validation(String),
}

/// Where and how results are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for PNG figures and WAV files
    pub dir: PathBuf,
    /// Render figures at all
    pub render: bool,
    /// Also write generated test signals as WAV
    pub write_wav: bool,
    /// Figure size in pixels
    pub width: u32,
    pub height: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("plots"),
            render: true,
            write_wav: false,
            width: 1200,
            height: 800,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectrumConfig {
    pub sample_rate: f64,
    pub duration_secs: f64,
    pub tones: Vec<Tone>,
    /// Upper frequency shown on spectrum plots
    pub plot_max_hz: f64,
    /// Minimum single-sided amplitude reported as a peak
    pub peak_threshold: f64,
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        Self {
            sample_rate: 1000.0,
            duration_secs: 1.0,
            tones: vec![
                Tone::new(50.0, 1.0, PI / 2.0),
                Tone::new(120.0, 0.5, PI / 2.0),
                Tone::new(200.0, 0.3, PI / 2.0),
            ],
            plot_max_hz: 250.0,
            peak_threshold: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FourierConfig {
    pub amplitude: f64,
    pub period_secs: f64,
    /// Number of periods on the time base
    pub periods: f64,
    /// Points on the time base, end point included
    pub points: usize,
    /// Harmonic limits to reconstruct with
    pub harmonics: Vec<usize>,
    /// Time window of the Gibbs close-up
    pub zoom_start: f64,
    pub zoom_end: f64,
}

impl Default for FourierConfig {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            period_secs: 1.0,
            periods: 2.0,
            points: 1000,
            harmonics: vec![1, 3, 5, 10, 20, 50],
            zoom_start: 0.4,
            zoom_end: 0.6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticConfig {
    pub sample_rate: f64,
    pub duration_secs: f64,
    pub tone_hz: f64,
    /// Pulse window in samples, `start..end`
    pub pulse_start: usize,
    pub pulse_end: usize,
}

impl Default for AnalyticConfig {
    fn default() -> Self {
        Self {
            sample_rate: 1000.0,
            duration_secs: 1.0,
            tone_hz: 10.0,
            pulse_start: 400,
            pulse_end: 600,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSample {
    pub name: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntropyConfig {
    pub texts: Vec<TextSample>,
    /// Fold texts to lowercase before counting
    pub lowercase: bool,
    /// Faces of the fair dice to evaluate
    pub dice: Vec<usize>,
    /// Seconds per year with an event in progress
    pub event_seconds_per_year: f64,
    pub seconds_per_year: f64,
}

impl Default for EntropyConfig {
    fn default() -> Self {
        Self {
            texts: vec![
                TextSample {
                    name: "Spanish".into(),
                    text: "El rapido zorro marron salta sobre el perro perezoso".into(),
                },
                TextSample {
                    name: "English".into(),
                    text: "The quick brown fox jumps over the lazy dog".into(),
                },
            ],
            lowercase: true,
            dice: vec![6, 20],
            // five 30 s earthquakes of magnitude >= 4 per year
            event_seconds_per_year: 150.0,
            seconds_per_year: 31_536_000.0,
        }
    }
}

impl EntropyConfig {
    pub fn event_probability(&self) -> f64 {
        self.event_seconds_per_year / self.seconds_per_year
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhasorSpec {
    pub amplitude: f64,
    pub phase_deg: f64,
    pub color: String,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhasorConfig {
    pub phasors: Vec<PhasorSpec>,
    /// Axes span `-limit..limit` in both directions
    pub limit: f64,
    /// Extra reference circles, drawn besides one per distinct phasor amplitude
    pub circle_radii: Vec<f64>,
}

impl Default for PhasorConfig {
    fn default() -> Self {
        Self {
            phasors: vec![
                PhasorSpec {
                    amplitude: 5.0,
                    phase_deg: 45.0,
                    color: "red".into(),
                    label: Some("1000 Hz".into()),
                },
                PhasorSpec {
                    amplitude: 3.0,
                    phase_deg: -120.0,
                    color: "blue".into(),
                    label: Some("1500 Hz".into()),
                },
            ],
            limit: 6.0,
            circle_radii: vec![1.0],
        }
    }
}

impl PhasorConfig {
    /// Radii of the reference circles: every distinct nonzero phasor amplitude
    /// plus the extra radii, ascending.
    pub fn reference_radii(&self) -> Vec<f64> {
        let mut radii: Vec<f64> = self
            .phasors
            .iter()
            .map(|p| p.amplitude)
            .filter(|&a| a > 0.0)
            .chain(self.circle_radii.iter().copied())
            .collect();
        radii.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        radii.dedup_by(|a, b| (*a - *b).abs() < 1e-9);
        radii
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    pub output: OutputConfig,
    pub spectrum: SpectrumConfig,
    pub fourier: FourierConfig,
    pub analytic: AnalyticConfig,
    pub entropy: EntropyConfig,
    pub phasor: PhasorConfig,
}

impl LabConfig {
    /// Load from `explicit`, the environment, the working directory, or defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.display().to_string()));
            }
            return Self::load_from(path);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Self::load_from(&path);
            }
            log::warn!(
                "{} points at {}, which does not exist; ignoring",
                CONFIG_ENV,
                path.display()
            );
        }

        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.exists() {
            return Self::load_from(local);
        }

        log::debug!("no config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(format!("{}: {}", path.display(), e)))?;
        log::info!("loading config from {}", path.display());
        Self::parse(&content)
    }

    /// Parse and validate a YAML document. Blank input yields the defaults.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            yaml_serde::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        yaml_serde::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let fail = |msg: String| -> Result<(), ConfigError> {
            Err(ConfigError::Validation(msg))
        };

        if self.output.width < 100 || self.output.height < 100 {
            return fail(format!(
                "figure size {}x{} is too small",
                self.output.width, self.output.height
            ));
        }

        let s = &self.spectrum;
        if !(s.sample_rate > 0.0) || !(s.duration_secs > 0.0) {
            return fail("spectrum: sample_rate and duration_secs must be positive".into());
        }
        if s.tones.is_empty() {
            return fail("spectrum: at least one tone is required".into());
        }
        let nyquist = s.sample_rate / 2.0;
        if let Some(t) = s
            .tones
            .iter()
            .find(|t| t.frequency_hz < 0.0 || t.frequency_hz >= nyquist)
        {
            return fail(format!(
                "spectrum: tone at {} Hz is outside 0..{} Hz (Nyquist)",
                t.frequency_hz, nyquist
            ));
        }

        let f = &self.fourier;
        if !(f.amplitude > 0.0) || !(f.period_secs > 0.0) || !(f.periods > 0.0) {
            return fail("fourier: amplitude, period_secs and periods must be positive".into());
        }
        if f.points < 2 {
            return fail("fourier: need at least 2 points".into());
        }
        if f.harmonics.is_empty() || f.harmonics.contains(&0) {
            return fail("fourier: harmonics must be a non-empty list of positive counts".into());
        }
        if !f.zoom_start.is_finite() || !f.zoom_end.is_finite() {
            return fail("fourier: zoom window bounds must be finite".into());
        }
        if f.zoom_start >= f.zoom_end {
            return fail("fourier: zoom_start must be before zoom_end".into());
        }

        let a = &self.analytic;
        if !(a.sample_rate > 0.0) || !(a.duration_secs > 0.0) {
            return fail("analytic: sample_rate and duration_secs must be positive".into());
        }
        let n = (a.sample_rate * a.duration_secs).round() as usize;
        if a.pulse_start >= a.pulse_end || a.pulse_end > n {
            return fail(format!(
                "analytic: pulse {}..{} does not fit in {} samples",
                a.pulse_start, a.pulse_end, n
            ));
        }

        let e = &self.entropy;
        if e.dice.contains(&0) {
            return fail("entropy: dice need at least one face".into());
        }
        let p = e.event_probability();
        if !(0.0..=1.0).contains(&p) {
            return fail(format!("entropy: event probability {p} is outside [0, 1]"));
        }

        let ph = &self.phasor;
        if ph.phasors.is_empty() || ph.phasors.len() > 8 {
            return fail(format!(
                "phasor: expected 1 to 8 phasors, got {}",
                ph.phasors.len()
            ));
        }
        if !(ph.limit > 0.0) || !ph.limit.is_finite() {
            return fail("phasor: limit must be positive".into());
        }
        if let Some(p) = ph
            .phasors
            .iter()
            .find(|p| !(p.amplitude >= 0.0) || !p.amplitude.is_finite() || !p.phase_deg.is_finite())
        {
            return fail(format!(
                "phasor: amplitude {} and phase {} must be finite, amplitude non-negative",
                p.amplitude, p.phase_deg
            ));
        }
        if let Some(r) = ph.circle_radii.iter().find(|r| !(**r > 0.0) || !r.is_finite()) {
            return fail(format!("phasor: circle radius {r} must be positive and finite"));
        }

        Ok(())
    }
}
