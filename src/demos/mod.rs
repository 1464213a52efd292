//! The five demonstrations.
//!
//! Each `run` computes everything up front and returns a [`DemoRun`]: a
//! serializable report for the console, figure descriptions for the canvas,
//! and the generated signals for optional WAV export. Nothing is drawn or
//! written here.

pub mod analytic;
pub mod entropy;
pub mod fourier;
pub mod phasor;
pub mod spectrum;

use crate::types::Figure;
use signal_lab_core::Signal;

pub struct DemoRun<R> {
    pub report: R,
    pub figures: Vec<Figure>,
    /// Named test signals, exported as `<name>.wav` on request
    pub signals: Vec<(String, Signal)>,
}

impl<R> DemoRun<R> {
    pub fn report_only(report: R) -> Self {
        Self {
            report,
            figures: Vec::new(),
            signals: Vec::new(),
        }
    }
}

/// File-name friendly form of a frequency, `120` or `12.5` -> `12p5`.
pub(crate) fn freq_slug(frequency_hz: f64) -> String {
    let text = format!("{frequency_hz}");
    text.replace('.', "p").replace('-', "m")
}
