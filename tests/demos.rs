//! Runs every demo with the default configuration, without rendering.

use signal_lab::demos::{analytic, entropy, fourier, phasor, spectrum};
use signal_lab::LabConfig;

#[test]
fn test_spectrum_defaults() {
    let config = LabConfig::default();
    let run = spectrum::run(&config.spectrum).unwrap();
    let report = &run.report;

    for tone in &report.tones {
        assert!(
            tone.abs_error < 1e-6,
            "{} Hz: expected {}, measured {}",
            tone.frequency_hz,
            tone.expected_amplitude,
            tone.measured_amplitude
        );
    }
    assert_eq!(report.peaks.len(), 3);
    assert!(report.linearity_error < 1e-9);
}

#[test]
fn test_fourier_defaults() {
    let config = LabConfig::default();
    let report = fourier::run(&config.fourier).unwrap().report;

    let expected = [0.189242, 0.099271, 0.066882, 0.040361, 0.020241, 0.008130];
    assert_eq!(report.rows.len(), expected.len());
    for (row, want) in report.rows.iter().zip(expected) {
        assert!(
            (row.mse - want).abs() < 1e-4,
            "N={}: mse {} vs {}",
            row.harmonics,
            row.mse,
            want
        );
    }

    // overshoot settles near 9% of the jump instead of vanishing
    for row in report.rows.iter().filter(|r| r.harmonics >= 10) {
        assert!(row.overshoot > 0.08 && row.overshoot < 0.1, "N={}: {}", row.harmonics, row.overshoot);
    }
}

#[test]
fn test_fourier_is_deterministic() {
    let config = LabConfig::default();
    let a = fourier::run(&config.fourier).unwrap().report;
    let b = fourier::run(&config.fourier).unwrap().report;
    let mse = |r: &fourier::FourierReport| r.rows.iter().map(|row| row.mse).collect::<Vec<_>>();
    assert_eq!(mse(&a), mse(&b));
}

#[test]
fn test_analytic_defaults() {
    let config = LabConfig::default();
    let report = analytic::run(&config.analytic).unwrap().report;
    assert!(report.sine_rms_error < 1e-3);
    assert_eq!(report.cases.len(), 3);
}

#[test]
fn test_entropy_defaults() {
    let config = LabConfig::default();
    let report = entropy::run(&config.entropy).unwrap().report;
    let english = report.texts.iter().find(|t| t.name == "English").unwrap();
    assert!((english.bits_per_char - 4.3855).abs() < 1e-3);
    assert!(report.event.bits > 0.0 && report.event.bits < 1e-4);
}

#[test]
fn test_phasor_defaults() {
    let config = LabConfig::default();
    let run = phasor::run(&config.phasor).unwrap();
    assert_eq!(run.report.rows.len(), 2);
    assert_eq!(run.figures.len(), 1);
}

#[test]
fn test_reports_serialize() {
    let config = LabConfig::default();
    let json = serde_json::to_value(&entropy::run(&config.entropy).unwrap().report).unwrap();
    assert_eq!(json["dice"][0]["faces"], 6);
    let json = serde_json::to_value(&spectrum::run(&config.spectrum).unwrap().report).unwrap();
    assert_eq!(json["peaks"].as_array().map(Vec::len), Some(3));
}

#[test]
fn test_wav_export_of_demo_signals() {
    let dir = tempfile::tempdir().unwrap();
    let config = LabConfig::default();
    let run = analytic::run(&config.analytic).unwrap();
    let paths = signal_lab::audio::wav::write_all(dir.path(), &run.signals).unwrap();
    assert_eq!(paths.len(), 3);
    assert!(paths.iter().all(|p| p.exists()));
}
