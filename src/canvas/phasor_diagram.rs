//! Phasor diagrams: arrows from the origin, reference circles, polar labels.

use crate::canvas::chart::DrawResult;
use crate::canvas::colors::named_color;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use signal_lab_core::dsp::phasor::Phasor;
use std::f64::consts::PI;

/// Arrowhead length as a fraction of the visible half-width.
const HEAD_FRACTION: f64 = 0.06;
/// Angle between the shaft and each barb.
const HEAD_ANGLE: f64 = PI / 7.0;
/// Number of dash/gap pairs on a reference circle.
const CIRCLE_DASHES: usize = 36;

/// The two barbs of an arrowhead at `tip` for a shaft starting at the origin.
pub fn arrow_head(tip: (f64, f64), length: f64) -> [[(f64, f64); 2]; 2] {
    let angle = tip.1.atan2(tip.0);
    let barb = |offset: f64| {
        let a = angle + PI + offset;
        [tip, (tip.0 + length * a.cos(), tip.1 + length * a.sin())]
    };
    [barb(HEAD_ANGLE), barb(-HEAD_ANGLE)]
}

/// Dash segments approximating a dashed circle of `radius` around the origin.
pub fn dashed_circle(radius: f64, dashes: usize) -> Vec<[(f64, f64); 2]> {
    let step = 2.0 * PI / (2 * dashes) as f64;
    (0..dashes)
        .map(|i| {
            let a0 = 2.0 * i as f64 * step;
            let a1 = a0 + step;
            [
                (radius * a0.cos(), radius * a0.sin()),
                (radius * a1.cos(), radius * a1.sin()),
            ]
        })
        .collect()
}

pub(crate) fn draw<'a, CT>(
    chart: &mut ChartContext<'a, BitMapBackend<'a>, CT>,
    phasors: &[Phasor],
    circle_radii: &[f64],
    x_view: (f64, f64),
) -> DrawResult
where
    CT: CoordTranslate<From = (f64, f64)>,
{
    let half_width = (x_view.1 - x_view.0) / 2.0;

    // Axes through the origin
    chart.draw_series([
        PathElement::new(vec![(x_view.0, 0.0), (x_view.1, 0.0)], BLACK),
        PathElement::new(vec![(0.0, x_view.0), (0.0, x_view.1)], BLACK),
    ])?;

    let grey = RGBColor(128, 128, 128).mix(0.4);
    for &radius in circle_radii {
        chart.draw_series(
            dashed_circle(radius, CIRCLE_DASHES)
                .into_iter()
                .map(|seg| PathElement::new(seg.to_vec(), grey)),
        )?;
    }

    for phasor in phasors {
        let color = named_color(&phasor.color);
        let tip = phasor.to_cartesian();
        let tip = (tip.x, tip.y);

        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(0.0, 0.0), tip],
                color.stroke_width(3),
            )))?
            .label(phasor.legend())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));

        chart.draw_series(
            arrow_head(tip, half_width * HEAD_FRACTION)
                .into_iter()
                .map(|barb| PathElement::new(barb.to_vec(), color.stroke_width(3))),
        )?;

        let style = ("sans-serif", 18)
            .into_font()
            .color(&color)
            .pos(Pos::new(HPos::Center, VPos::Center));
        chart.draw_series(std::iter::once(Text::new(
            phasor.polar_label(),
            (tip.0 * 1.1, tip.1 * 1.1),
            style,
        )))?;
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_head_points_back_along_shaft() {
        let [left, right] = arrow_head((4.0, 0.0), 1.0);
        assert_eq!(left[0], (4.0, 0.0));
        // both barbs end behind the tip, mirrored about the shaft
        assert!(left[1].0 < 4.0 && right[1].0 < 4.0);
        assert!((left[1].1 + right[1].1).abs() < 1e-12);
        let len = ((left[1].0 - 4.0).powi(2) + left[1].1.powi(2)).sqrt();
        assert!((len - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_dashed_circle_stays_on_radius() {
        let dashes = dashed_circle(3.0, 12);
        assert_eq!(dashes.len(), 12);
        for seg in &dashes {
            for &(x, y) in seg {
                assert!(((x * x + y * y).sqrt() - 3.0).abs() < 1e-12);
            }
        }
        // gaps: the end of one dash is not the start of the next
        assert!((dashes[0][1].0 - dashes[1][0].0).abs() > 1e-3);
    }
}
