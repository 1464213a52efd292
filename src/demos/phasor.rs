//! Static phasor diagram.

use crate::config::{PhasorConfig, PhasorSpec};
use crate::demos::DemoRun;
use crate::error::LabResult;
use crate::types::{Figure, Panel, PanelContent};
use serde::Serialize;
use signal_lab_core::dsp::phasor::Phasor;
use std::fmt;

#[derive(Clone, Debug, Serialize)]
pub struct PhasorRow {
    pub legend: String,
    pub amplitude: f64,
    pub phase_deg: f64,
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct PhasorReport {
    pub rows: Vec<PhasorRow>,
}

impl fmt::Display for PhasorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<24} {:>10} {:>10} {:>10} {:>10}", "phasor", "amplitude", "phase (°)", "x", "y")?;
        for (i, r) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "{:<24} {:>10.3} {:>10.1} {:>10.4} {:>10.4}",
                r.legend, r.amplitude, r.phase_deg, r.x, r.y
            )?;
        }
        Ok(())
    }
}

impl From<&PhasorSpec> for Phasor {
    fn from(spec: &PhasorSpec) -> Self {
        let phasor = Phasor::new(spec.amplitude, spec.phase_deg.to_radians(), spec.color.as_str());
        match &spec.label {
            Some(label) => phasor.with_label(label.as_str()),
            None => phasor,
        }
    }
}

pub fn run(cfg: &PhasorConfig) -> LabResult<DemoRun<PhasorReport>> {
    let phasors: Vec<Phasor> = cfg.phasors.iter().map(Phasor::from).collect();

    let rows = phasors
        .iter()
        .map(|p| {
            let tip = p.to_cartesian();
            PhasorRow {
                legend: p.legend(),
                amplitude: p.amplitude,
                phase_deg: p.phase_deg(),
                x: tip.x,
                y: tip.y,
            }
        })
        .collect();

    let limit = cfg.limit;
    let figure = Figure::single(
        "phasor_diagram.png",
        Panel::new(
            "Phasor diagram",
            "Real axis",
            "Imaginary axis",
            PanelContent::Phasors {
                phasors,
                circle_radii: cfg.reference_radii(),
            },
        )
        .x_range(-limit, limit)
        .y_range(-limit, limit),
    )
    // square canvas keeps the aspect ratio equal
    .size(800, 800);

    Ok(DemoRun {
        report: PhasorReport { rows },
        figures: vec![figure],
        signals: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_phasors() {
        let run = run(&PhasorConfig::default()).unwrap();
        let rows = &run.report.rows;
        assert_eq!(rows.len(), 2);

        let half = 5.0 / 2f64.sqrt();
        assert!((rows[0].x - half).abs() < 1e-12 && (rows[0].y - half).abs() < 1e-12);
        assert_eq!(rows[0].legend, "1000 Hz: 5∠45.0°");

        assert!((rows[1].x + 1.5).abs() < 1e-12);
        assert!((rows[1].y + 1.5 * 3f64.sqrt()).abs() < 1e-12);
        assert!((rows[1].phase_deg + 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_figure_is_square_with_fixed_limits() {
        let run = run(&PhasorConfig::default()).unwrap();
        let figure = &run.figures[0];
        assert_eq!(figure.size, Some((800, 800)));
        let panel = &figure.panels[0];
        assert_eq!(panel.x_range, Some((-6.0, 6.0)));
        assert_eq!(panel.y_range, Some((-6.0, 6.0)));
        assert!(run.signals.is_empty());
        match &panel.content {
            PanelContent::Phasors { circle_radii, .. } => assert_eq!(circle_radii, &vec![1.0, 3.0, 5.0]),
            other => panic!("unexpected content {other:?}"),
        }
    }

    #[test]
    fn test_circles_track_new_amplitudes() {
        let cfg = PhasorConfig {
            phasors: vec![PhasorSpec {
                amplitude: 2.5,
                phase_deg: 10.0,
                color: "r".into(),
                label: None,
            }],
            circle_radii: Vec::new(),
            ..PhasorConfig::default()
        };
        let run = run(&cfg).unwrap();
        match &run.figures[0].panels[0].content {
            PanelContent::Phasors { circle_radii, .. } => assert_eq!(circle_radii, &vec![2.5]),
            other => panic!("unexpected content {other:?}"),
        }
    }

    #[test]
    fn test_unlabeled_phasor() {
        let spec = PhasorSpec {
            amplitude: 2.0,
            phase_deg: 90.0,
            color: "g".into(),
            label: None,
        };
        let phasor = Phasor::from(&spec);
        assert_eq!(phasor.legend(), "2∠90.0°");
        assert!(phasor.to_cartesian().x.abs() < 1e-12);
    }
}
