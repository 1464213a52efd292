//! Analytic signal and envelope of three test signals: a sinusoid, a
//! rectangular pulse and the pulse-gated sinusoid.

use crate::config::AnalyticConfig;
use crate::demos::DemoRun;
use crate::error::LabResult;
use crate::types::{Figure, Panel, PanelContent, Trace};
use serde::Serialize;
use signal_lab_core::dsp::generate::{rectangular_pulse, tone_sum};
use signal_lab_core::dsp::hilbert::{rms_error, AnalyticSignal};
use signal_lab_core::{Signal, Tone};
use std::f64::consts::PI;
use std::fmt;

#[derive(Clone, Debug, Serialize)]
pub struct EnvelopeStats {
    pub name: String,
    pub samples: usize,
    pub envelope_max: f64,
    pub envelope_mean: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct AnalyticReport {
    pub sample_rate: f64,
    pub tone_hz: f64,
    pub cases: Vec<EnvelopeStats>,
    /// RMS distance between the Hilbert transform of the sinusoid and `-cos`
    pub sine_rms_error: f64,
    /// Instantaneous phase of the sinusoid at the first sample, radians
    pub sine_initial_phase: f64,
}

impl fmt::Display for AnalyticReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<12} {:>8} {:>14} {:>14}", "signal", "samples", "envelope max", "envelope mean")?;
        for c in &self.cases {
            writeln!(
                f,
                "{:<12} {:>8} {:>14.4} {:>14.4}",
                c.name, c.samples, c.envelope_max, c.envelope_mean
            )?;
        }
        write!(
            f,
            "Hilbert transform of the {} Hz sine vs -cos: RMS error {:.3e}",
            self.tone_hz, self.sine_rms_error
        )
    }
}

struct Case {
    name: &'static str,
    title: &'static str,
    signal: Signal,
}

pub fn run(cfg: &AnalyticConfig) -> LabResult<DemoRun<AnalyticReport>> {
    let sine = tone_sum(&[Tone::new(cfg.tone_hz, 1.0, 0.0)], cfg.sample_rate, cfg.duration_secs)?;
    let pulse = Signal::new(
        rectangular_pulse(sine.len(), cfg.pulse_start, cfg.pulse_end)?,
        cfg.sample_rate,
    );
    let gated = sine.multiply(&pulse);

    let cases = [
        Case { name: "sine", title: "Sinusoidal signal", signal: sine },
        Case { name: "pulse", title: "Rectangular pulse", signal: pulse },
        Case { name: "product", title: "Sine gated by the pulse", signal: gated },
    ];

    let mut stats = Vec::with_capacity(cases.len());
    let mut figures = Vec::with_capacity(cases.len());
    let mut sine_rms_error = 0.0;
    let mut sine_initial_phase = 0.0;

    for case in &cases {
        let analytic = AnalyticSignal::from_real(&case.signal.samples)?;
        let hilbert = analytic.hilbert();
        let envelope = analytic.envelope();

        if case.name == "sine" {
            let time = case.signal.time_axis();
            let neg_cos: Vec<f64> = time
                .iter()
                .map(|t| -(2.0 * PI * cfg.tone_hz * t).cos())
                .collect();
            sine_rms_error = rms_error(&hilbert, &neg_cos)?;
            sine_initial_phase = analytic.instantaneous_phase().first().copied().unwrap_or(0.0);
        }

        let envelope_max = envelope.iter().copied().fold(0.0, f64::max);
        let envelope_mean = envelope.iter().sum::<f64>() / envelope.len() as f64;
        log::debug!("{}: envelope max {envelope_max:.4}, mean {envelope_mean:.4}", case.name);
        stats.push(EnvelopeStats {
            name: case.name.to_string(),
            samples: case.signal.len(),
            envelope_max,
            envelope_mean,
        });

        figures.push(case_figure(case, &hilbert, &envelope));
    }

    let report = AnalyticReport {
        sample_rate: cfg.sample_rate,
        tone_hz: cfg.tone_hz,
        cases: stats,
        sine_rms_error,
        sine_initial_phase,
    };
    let signals = cases
        .into_iter()
        .map(|c| (format!("analytic_{}", c.name), c.signal))
        .collect();

    Ok(DemoRun { report, figures, signals })
}

fn case_figure(case: &Case, hilbert: &[f64], envelope: &[f64]) -> Figure {
    let time = case.signal.time_axis();
    let original = &case.signal.samples;

    Figure::new(
        format!("analytic_{}.png", case.name),
        3,
        1,
        vec![
            Panel::new(
                format!("Original signal: {}", case.title),
                "Time (s)",
                "Amplitude",
                PanelContent::Lines(vec![Trace::from_xy("b", &time, original)]),
            ),
            Panel::new(
                "Hilbert transform",
                "Time (s)",
                "Amplitude",
                PanelContent::Lines(vec![Trace::from_xy("r", &time, hilbert)]),
            ),
            Panel::new(
                "Analytic signal",
                "Time (s)",
                "Amplitude",
                PanelContent::Lines(vec![
                    Trace::from_xy("b", &time, original).label("Real part"),
                    Trace::from_xy("g", &time, hilbert).label("Imaginary part"),
                    Trace::from_xy("k", &time, envelope).width(2).label("Envelope"),
                ]),
            ),
        ],
    )
}
