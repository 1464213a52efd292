//! Shannon entropy of two sentences, fair dice and a rare binary event.

use crate::config::EntropyConfig;
use crate::demos::DemoRun;
use crate::error::LabResult;
use serde::Serialize;
use signal_lab_core::dsp::entropy::{binary_entropy, char_frequencies, text_entropy, uniform_entropy};
use std::fmt;

#[derive(Clone, Debug, Serialize)]
pub struct TextEntropy {
    pub name: String,
    pub text: String,
    /// Characters counted, spaces included
    pub symbols: usize,
    pub distinct: usize,
    pub bits_per_char: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct DiceEntropy {
    pub faces: usize,
    pub bits: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct EventEntropy {
    pub probability: f64,
    pub complement: f64,
    pub bits: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct EntropyReport {
    pub texts: Vec<TextEntropy>,
    pub dice: Vec<DiceEntropy>,
    pub event: EventEntropy,
}

impl fmt::Display for EntropyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for t in &self.texts {
            writeln!(f, "{} text: \"{}\"", t.name, t.text)?;
            writeln!(
                f,
                "  entropy: {:.4} bits/char ({} symbols, {} distinct)",
                t.bits_per_char, t.symbols, t.distinct
            )?;
        }
        for d in &self.dice {
            writeln!(f, "Fair {}-sided die: {:.4} bits", d.faces, d.bits)?;
        }
        writeln!(f, "Earthquake in progress:")?;
        writeln!(f, "  p(event) = {:.8}", self.event.probability)?;
        writeln!(f, "  p(no event) = {:.8}", self.event.complement)?;
        write!(f, "  entropy: {:.8} bits", self.event.bits)
    }
}

pub fn run(cfg: &EntropyConfig) -> LabResult<DemoRun<EntropyReport>> {
    let mut texts = Vec::with_capacity(cfg.texts.len());
    for sample in &cfg.texts {
        let text = if cfg.lowercase {
            sample.text.to_lowercase()
        } else {
            sample.text.clone()
        };
        let bits_per_char = text_entropy(&text)?;
        texts.push(TextEntropy {
            name: sample.name.clone(),
            symbols: text.chars().count(),
            distinct: char_frequencies(&text).len(),
            bits_per_char,
            text,
        });
    }

    let dice = cfg
        .dice
        .iter()
        .map(|&faces| {
            Ok(DiceEntropy {
                faces,
                bits: uniform_entropy(faces)?,
            })
        })
        .collect::<LabResult<Vec<_>>>()?;

    let p = cfg.event_probability();
    let event = EventEntropy {
        probability: p,
        complement: 1.0 - p,
        bits: binary_entropy(p)?,
    };
    log::debug!("event probability {p:e}, entropy {:e} bits", event.bits);

    Ok(DemoRun::report_only(EntropyReport { texts, dice, event }))
}
