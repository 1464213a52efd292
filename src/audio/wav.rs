//! WAV export of generated test signals.

use crate::error::{LabError, LabResult};
use signal_lab_core::Signal;
use std::path::{Path, PathBuf};

/// Write `signal` as a mono 32-bit float WAV file.
///
/// Signals peaking above full scale are scaled down to a peak of 1.0.
/// Returns the gain that was applied.
pub fn write_wav(path: &Path, signal: &Signal) -> LabResult<f64> {
    let sample_rate = signal.sample_rate.round();
    if !(sample_rate >= 1.0) || sample_rate > u32::MAX as f64 {
        return Err(signal_lab_core::DspError::InvalidParameter(format!(
            "sample rate {} cannot be stored in a WAV header",
            signal.sample_rate
        ))
        .into());
    }
    if (sample_rate - signal.sample_rate).abs() > 1e-9 {
        log::warn!(
            "{}: sample rate {} rounded to {} Hz",
            path.display(),
            signal.sample_rate,
            sample_rate
        );
    }

    let peak = signal.samples.iter().fold(0.0f64, |m, s| m.max(s.abs()));
    let gain = if peak > 1.0 { 1.0 / peak } else { 1.0 };

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: sample_rate as u32,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let wav_err = |source| LabError::Wav {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = hound::WavWriter::create(path, spec).map_err(wav_err)?;
    for &s in &signal.samples {
        writer.write_sample((s * gain) as f32).map_err(wav_err)?;
    }
    writer.finalize().map_err(wav_err)?;

    log::info!(
        "wrote {} ({} samples, gain {:.3})",
        path.display(),
        signal.len(),
        gain
    );
    Ok(gain)
}

/// Write each named signal to `<out_dir>/<name>.wav`.
pub fn write_all(out_dir: &Path, signals: &[(String, Signal)]) -> LabResult<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)?;
    signals
        .iter()
        .map(|(name, signal)| {
            let path = out_dir.join(format!("{name}.wav"));
            write_wav(&path, signal)?;
            Ok(path)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_samples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        let signal = Signal::new(vec![0.0, 0.5, -0.25, 1.0], 1000.0);

        let gain = write_wav(&path, &signal).unwrap();
        assert_eq!(gain, 1.0);

        let mut reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().sample_rate, 1000);
        assert_eq!(reader.spec().channels, 1);
        let samples: Vec<f32> = reader.samples::<f32>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![0.0, 0.5, -0.25, 1.0]);
    }

    #[test]
    fn test_loud_signal_is_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loud.wav");
        let signal = Signal::new(vec![0.9, -1.8], 8000.0);

        let gain = write_wav(&path, &signal).unwrap();
        assert!((gain - 1.0 / 1.8).abs() < 1e-12);

        let mut reader = hound::WavReader::open(&path).unwrap();
        let samples: Vec<f32> = reader.samples::<f32>().map(|s| s.unwrap()).collect();
        assert!((samples[1] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_write_all_names_files() {
        let dir = tempfile::tempdir().unwrap();
        let signals = vec![
            ("a".to_string(), Signal::new(vec![0.1; 8], 100.0)),
            ("b".to_string(), Signal::new(vec![0.2; 8], 100.0)),
        ];
        let paths = write_all(dir.path(), &signals).unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths[1].ends_with("b.wav"));
        assert!(paths.iter().all(|p| p.exists()));
    }

    #[test]
    fn test_rejects_zero_rate() {
        let dir = tempfile::tempdir().unwrap();
        let signal = Signal::new(vec![0.0], 0.0);
        assert!(write_wav(&dir.path().join("x.wav"), &signal).is_err());
    }
}
