//! Test-signal generators: time bases, tone sums and rectangular pulses.

use crate::error::{DspError, DspResult};
use crate::types::{Signal, Tone};

/// `n` evenly spaced points from `start` to `stop`.
///
/// With `endpoint` the last point is exactly `stop` (spacing `(stop-start)/(n-1)`),
/// otherwise the interval is half-open (spacing `(stop-start)/n`).
pub fn linspace(start: f64, stop: f64, n: usize, endpoint: bool) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let divisions = if endpoint { n - 1 } else { n };
            let step = (stop - start) / divisions as f64;
            let mut points: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            if endpoint {
                points[n - 1] = stop;
            }
            points
        }
    }
}

/// Sample a sum of tones at `sample_rate` for `duration_secs`.
pub fn tone_sum(tones: &[Tone], sample_rate: f64, duration_secs: f64) -> DspResult<Signal> {
    if !(sample_rate > 0.0) || !sample_rate.is_finite() {
        return Err(DspError::InvalidParameter(format!(
            "sample rate must be positive, got {sample_rate}"
        )));
    }
    if !(duration_secs > 0.0) || !duration_secs.is_finite() {
        return Err(DspError::InvalidParameter(format!(
            "duration must be positive, got {duration_secs}"
        )));
    }

    let n = (sample_rate * duration_secs).round() as usize;
    let samples = (0..n)
        .map(|i| {
            let t = i as f64 / sample_rate;
            tones.iter().map(|tone| tone.at(t)).sum()
        })
        .collect();

    log::debug!(
        "tone_sum: {} tones, {} samples at {} Hz",
        tones.len(),
        n,
        sample_rate
    );
    Ok(Signal::new(samples, sample_rate))
}

/// A unit-height pulse over sample indices `start..end`, zero elsewhere.
pub fn rectangular_pulse(len: usize, start: usize, end: usize) -> DspResult<Vec<f64>> {
    if start >= end || end > len {
        return Err(DspError::InvalidParameter(format!(
            "pulse window {start}..{end} does not fit in {len} samples"
        )));
    }
    let mut pulse = vec![0.0; len];
    pulse[start..end].iter_mut().for_each(|s| *s = 1.0);
    Ok(pulse)
}
