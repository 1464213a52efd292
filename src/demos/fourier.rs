//! Square-wave reconstruction from a truncated Fourier series.

use crate::canvas::colors::palette;
use crate::config::FourierConfig;
use crate::demos::DemoRun;
use crate::error::LabResult;
use crate::types::{Figure, Panel, PanelContent, Trace};
use serde::Serialize;
use signal_lab_core::dsp::fourier_series::{gibbs_overshoot, mean_squared_error, SquareWave};
use signal_lab_core::dsp::generate::linspace;
use signal_lab_core::Signal;
use std::fmt;

#[derive(Clone, Debug, Serialize)]
pub struct HarmonicRow {
    /// Harmonic limit `N`
    pub harmonics: usize,
    /// Odd terms actually summed
    pub terms: usize,
    pub mse: f64,
    /// Peak overshoot as a fraction of the jump
    pub overshoot: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct FourierReport {
    pub amplitude: f64,
    pub frequency_hz: f64,
    pub points: usize,
    pub rows: Vec<HarmonicRow>,
}

impl fmt::Display for FourierReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Square wave: amplitude {}, fundamental {} Hz, {} points",
            self.amplitude, self.frequency_hz, self.points
        )?;
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "N={} harmonics, MSE={:.6}, overshoot={:.2}%",
                row.harmonics,
                row.mse,
                row.overshoot * 100.0
            )?;
        }
        Ok(())
    }
}

pub fn run(cfg: &FourierConfig) -> LabResult<DemoRun<FourierReport>> {
    let wave = SquareWave::new(cfg.amplitude, 1.0 / cfg.period_secs)?;
    let t = linspace(0.0, cfg.periods * cfg.period_secs, cfg.points, true);
    let ideal = wave.sample(&t);

    let mut rows = Vec::with_capacity(cfg.harmonics.len());
    let mut reconstructions = Vec::with_capacity(cfg.harmonics.len());
    for &n in &cfg.harmonics {
        let reconstructed = wave.reconstruct(&t, n);
        let mse = mean_squared_error(&ideal, &reconstructed)?;
        let overshoot = gibbs_overshoot(&reconstructed, cfg.amplitude)?;
        log::debug!("N={n}: mse {mse:.6}, overshoot {overshoot:.4}");
        rows.push(HarmonicRow {
            harmonics: n,
            terms: n.div_ceil(2),
            mse,
            overshoot,
        });
        reconstructions.push(reconstructed);
    }

    let report = FourierReport {
        amplitude: cfg.amplitude,
        frequency_hz: wave.frequency_hz,
        points: t.len(),
        rows,
    };

    let original = || Trace::from_xy("k", &t, &ideal).width(2);

    let mut traces = vec![original().label("Original square wave")];
    traces.extend(cfg.harmonics.iter().zip(&reconstructions).enumerate().map(
        |(i, (n, r))| {
            Trace::from_xy(palette(i), &t, r)
                .width(2)
                .dashed()
                .label(format!("{n} harmonics"))
        },
    ));
    let mse_points: Vec<(f64, f64)> = report
        .rows
        .iter()
        .map(|row| (row.harmonics as f64, row.mse))
        .collect();
    let max_n = cfg.harmonics.iter().copied().max().unwrap_or(1) as f64;

    let reconstruction = Figure::new(
        "fourier_reconstruction.png",
        2,
        1,
        vec![
            Panel::new(
                "Square wave reconstruction with Fourier series",
                "Time (s)",
                "Amplitude",
                PanelContent::Lines(traces),
            ),
            Panel::new(
                "Reconstruction error vs number of harmonics",
                "Number of harmonics",
                "Mean squared error",
                PanelContent::Lines(vec![Trace::new("b", mse_points).width(2).with_markers()]),
            )
            .x_range(0.0, max_n * 1.05)
            .log_y(),
        ],
    );

    // Close-up on a discontinuity with the three richest reconstructions
    let in_zoom = |x: f64| x > cfg.zoom_start && x < cfg.zoom_end;
    let zoom_xy = |y: &[f64]| -> Vec<(f64, f64)> {
        t.iter()
            .zip(y.iter())
            .filter(|(x, _)| in_zoom(**x))
            .map(|(&x, &y)| (x, y))
            .collect()
    };
    let first_shown = cfg.harmonics.len().saturating_sub(3);
    let mut zoom_traces = vec![Trace::new("k", zoom_xy(&ideal)).width(3).label("Original square wave")];
    for i in first_shown..cfg.harmonics.len() {
        zoom_traces.push(
            Trace::new(palette(i), zoom_xy(&reconstructions[i]))
                .width(2)
                .dashed()
                .label(format!("{} harmonics", cfg.harmonics[i])),
        );
    }
    let gibbs = Figure::single(
        "fourier_gibbs.png",
        Panel::new(
            "Gibbs phenomenon near a discontinuity",
            "Time (s)",
            "Amplitude",
            PanelContent::Lines(zoom_traces),
        )
        .x_range(cfg.zoom_start, cfg.zoom_end),
    );

    let square = Figure::single(
        "fourier_square_wave.png",
        Panel::new(
            "Original square wave",
            "Time (s)",
            "Amplitude",
            PanelContent::Lines(vec![original()]),
        ),
    )
    .size(800, 400);

    // Resample on a uniform half-open grid for audio export
    let export_rate = (cfg.points as f64 / (cfg.periods * cfg.period_secs)).round();
    let export_t = linspace(0.0, cfg.periods * cfg.period_secs, cfg.points, false);
    let signals = vec![(
        "fourier_square_wave".to_string(),
        Signal::new(wave.sample(&export_t), export_rate),
    )];

    Ok(DemoRun {
        report,
        figures: vec![reconstruction, gibbs, square],
        signals,
    })
}
