//! Spectral analysis of a sum of sinusoids.
//!
//! Builds the composite signal, checks the single-sided FFT amplitude at every
//! tone against the analytic amplitude, lists the detected peaks, and checks
//! that the individual spectra add up to the spectrum of the sum.

use crate::config::SpectrumConfig;
use crate::demos::{freq_slug, DemoRun};
use crate::error::LabResult;
use crate::types::{Figure, Panel, PanelContent, Trace};
use serde::Serialize;
use signal_lab_core::dsp::fft::{find_peaks, sum_amplitudes, SpectralPeak, Spectrum};
use signal_lab_core::dsp::generate::tone_sum;
use std::fmt;

const COMPONENT_COLORS: [&str; 3] = ["b", "g", "r"];

/// Expected vs. measured amplitude of one tone.
#[derive(Clone, Debug, Serialize)]
pub struct ToneCheck {
    pub frequency_hz: f64,
    pub expected_amplitude: f64,
    pub measured_amplitude: f64,
    pub abs_error: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct SpectrumReport {
    pub sample_rate: f64,
    pub samples: usize,
    pub resolution_hz: f64,
    pub tones: Vec<ToneCheck>,
    pub peaks: Vec<SpectralPeak>,
    /// Largest gap, at the tone bins, between the summed component spectra
    /// and the composite spectrum
    pub linearity_error: f64,
}

impl SpectrumReport {
    pub fn max_amplitude_error(&self) -> f64 {
        self.tones.iter().map(|t| t.abs_error).fold(0.0, f64::max)
    }
}

impl fmt::Display for SpectrumReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Composite signal: {} samples at {} Hz ({} Hz per bin)",
            self.samples, self.sample_rate, self.resolution_hz
        )?;
        writeln!(f, "{:>12} {:>12} {:>12} {:>12}", "freq (Hz)", "expected", "measured", "error")?;
        for t in &self.tones {
            writeln!(
                f,
                "{:>12.2} {:>12.4} {:>12.4} {:>12.2e}",
                t.frequency_hz, t.expected_amplitude, t.measured_amplitude, t.abs_error
            )?;
        }
        writeln!(f, "Detected peaks:")?;
        for p in &self.peaks {
            writeln!(f, "  bin {:>5}  {:>10.2} Hz  amplitude {:.4}", p.bin, p.frequency_hz, p.amplitude)?;
        }
        write!(f, "Linearity (sum of spectra vs spectrum of sum): {:.2e}", self.linearity_error)
    }
}

pub fn run(cfg: &SpectrumConfig) -> LabResult<DemoRun<SpectrumReport>> {
    let composite = tone_sum(&cfg.tones, cfg.sample_rate, cfg.duration_secs)?;
    let spectrum = Spectrum::forward(&composite)?;
    let single_sided = spectrum.single_sided();

    let tones: Vec<ToneCheck> = cfg
        .tones
        .iter()
        .map(|tone| {
            let measured = spectrum.amplitude_at(tone.frequency_hz);
            ToneCheck {
                frequency_hz: tone.frequency_hz,
                expected_amplitude: tone.amplitude,
                measured_amplitude: measured,
                abs_error: (measured - tone.amplitude).abs(),
            }
        })
        .collect();

    let peaks = find_peaks(&single_sided, cfg.peak_threshold, cfg.tones.len().max(1) * 2);

    // Each component on its own
    let mut components = Vec::with_capacity(cfg.tones.len());
    let mut component_spectra = Vec::with_capacity(cfg.tones.len());
    for tone in &cfg.tones {
        let signal = tone_sum(std::slice::from_ref(tone), cfg.sample_rate, cfg.duration_secs)?;
        component_spectra.push(Spectrum::forward(&signal)?.single_sided());
        components.push((tone.frequency_hz, signal));
    }
    let summed = sum_amplitudes(&component_spectra)?;

    let linearity_error = cfg
        .tones
        .iter()
        .filter_map(|tone| {
            let bin = (tone.frequency_hz / spectrum.resolution()).round() as usize;
            Some((summed.get(bin)?.1 - single_sided.get(bin)?.1).abs())
        })
        .fold(0.0, f64::max);

    log::debug!(
        "spectrum: {} peaks above {}, linearity error {:e}",
        peaks.len(),
        cfg.peak_threshold,
        linearity_error
    );

    let report = SpectrumReport {
        sample_rate: cfg.sample_rate,
        samples: composite.len(),
        resolution_hz: spectrum.resolution(),
        tones,
        peaks,
        linearity_error,
    };

    let time = composite.time_axis();
    let x_max = cfg.plot_max_hz;
    let theoretical: Vec<(f64, f64)> = cfg.tones.iter().map(|t| (t.frequency_hz, t.amplitude)).collect();

    let overview = Figure::new(
        "spectrum_composite.png",
        3,
        1,
        vec![
            Panel::new(
                "Composite signal",
                "Time (s)",
                "Amplitude",
                PanelContent::Lines(vec![Trace::from_xy("k", &time, &composite.samples)]),
            ),
            Panel::new(
                "Magnitude spectrum (FFT)",
                "Frequency (Hz)",
                "Magnitude",
                PanelContent::Stems { color: "b".into(), points: single_sided.clone() },
            )
            .x_range(0.0, x_max),
            Panel::new(
                "Theoretical spectrum (ideal)",
                "Frequency (Hz)",
                "Amplitude",
                PanelContent::Stems { color: "r".into(), points: theoretical },
            )
            .x_range(0.0, x_max),
        ],
    );

    let mut panels: Vec<Panel> = component_spectra
        .into_iter()
        .zip(components.iter())
        .enumerate()
        .map(|(i, (points, (freq, _)))| {
            Panel::new(
                format!("Spectrum of the {freq} Hz component"),
                "Frequency (Hz)",
                "Magnitude",
                PanelContent::Stems {
                    color: COMPONENT_COLORS[i % COMPONENT_COLORS.len()].into(),
                    points,
                },
            )
            .x_range(0.0, x_max)
        })
        .collect();
    panels.push(
        Panel::new(
            "Sum of the individual spectra",
            "Frequency (Hz)",
            "Magnitude",
            PanelContent::Stems { color: "m".into(), points: summed },
        )
        .x_range(0.0, x_max),
    );
    let rows = panels.len().div_ceil(2);
    let components_figure = Figure::new("spectrum_components.png", rows, 2, panels);

    let mut signals = vec![("spectrum_composite".to_string(), composite)];
    signals.extend(
        components
            .into_iter()
            .map(|(freq, signal)| (format!("spectrum_{}hz", freq_slug(freq)), signal)),
    );

    Ok(DemoRun {
        report,
        figures: vec![overview, components_figure],
        signals,
    })
}
