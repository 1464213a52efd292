//! Panel drawing on top of plotters' cartesian charts.

use crate::canvas::colors::named_color;
use crate::canvas::phasor_diagram;
use crate::types::{Panel, PanelContent, Trace, YScale};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::error::Error;

pub(crate) type DrawResult = Result<(), Box<dyn Error>>;

const CAPTION_FONT: (&str, u32) = ("sans-serif", 20);
/// Dash and gap length of dashed traces, in pixels.
const DASH_LENGTH: u32 = 8;
const DASH_GAP: u32 = 4;
/// Minimum stroke of legend swatches.
const LEGEND_STROKE: u32 = 3;

/// Tick label on a log axis: one significant digit in exponent form.
pub fn log_tick_label(value: &f64) -> String {
    format!("{value:.0e}")
}

/// `(min, max)` of `values` widened by `pad` of the span on each side.
///
/// Degenerate spans (a single value, or all equal) are widened to ±1 around the value.
pub fn padded_range(values: impl IntoIterator<Item = f64>, pad: f64) -> Option<(f64, f64)> {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if !lo.is_finite() {
        return None;
    }
    let span = hi - lo;
    if span < 1e-12 {
        return Some((lo - 1.0, hi + 1.0));
    }
    Some((lo - span * pad, hi + span * pad))
}

/// Range for a log axis: positive values only, padded by a factor of two.
pub fn log_range(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite() && *v > 0.0)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if !lo.is_finite() {
        return None;
    }
    Some((lo / 2.0, hi * 2.0))
}

/// Axis ranges of a panel: fixed ones win, the rest come from the data.
pub fn panel_ranges(panel: &Panel) -> ((f64, f64), (f64, f64)) {
    let points = panel.points();
    let x = panel
        .x_range
        .or_else(|| padded_range(points.iter().map(|p| p.0), 0.0))
        .unwrap_or((0.0, 1.0));
    let in_view = |p: &&(f64, f64)| p.0 >= x.0 && p.0 <= x.1;
    let y = panel.y_range.or_else(|| {
        let ys = points.iter().filter(in_view).map(|p| p.1);
        match panel.y_scale {
            YScale::Linear => padded_range(ys, 0.05),
            YScale::Log => log_range(ys),
        }
    });
    let y = y.unwrap_or(match panel.y_scale {
        YScale::Linear => (-1.0, 1.0),
        YScale::Log => (1e-3, 1.0),
    });
    (x, y)
}

pub(crate) fn draw_panel(area: &DrawingArea<BitMapBackend<'_>, Shift>, panel: &Panel) -> DrawResult {
    let ((x0, x1), (y0, y1)) = panel_ranges(panel);

    let mut builder = ChartBuilder::on(area);
    builder
        .caption(&panel.title, CAPTION_FONT)
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(60);

    match panel.y_scale {
        YScale::Linear => {
            let mut chart = builder.build_cartesian_2d(x0..x1, y0..y1)?;
            chart
                .configure_mesh()
                .x_desc(panel.x_desc.as_str())
                .y_desc(panel.y_desc.as_str())
                .draw()?;
            draw_content(&mut chart, panel, (x0, x1))?;
        }
        YScale::Log => {
            let mut chart = builder.build_cartesian_2d(x0..x1, (y0..y1).log_scale())?;
            chart
                .configure_mesh()
                .x_desc(panel.x_desc.as_str())
                .y_desc(panel.y_desc.as_str())
                .y_label_formatter(&log_tick_label)
                .draw()?;
            draw_content(&mut chart, panel, (x0, x1))?;
        }
    }
    Ok(())
}

fn draw_content<'a, CT>(
    chart: &mut ChartContext<'a, BitMapBackend<'a>, CT>,
    panel: &Panel,
    x_view: (f64, f64),
) -> DrawResult
where
    CT: CoordTranslate<From = (f64, f64)>,
{
    match &panel.content {
        PanelContent::Lines(traces) => draw_traces(chart, traces)?,
        PanelContent::Stems { color, points } => {
            let color = named_color(color);
            let visible: Vec<(f64, f64)> = points
                .iter()
                .copied()
                .filter(|p| p.0 >= x_view.0 && p.0 <= x_view.1)
                .collect();

            // Baseline
            chart.draw_series(std::iter::once(PathElement::new(
                vec![(x_view.0, 0.0), (x_view.1, 0.0)],
                RED,
            )))?;
            chart.draw_series(
                visible
                    .iter()
                    .map(|&(x, y)| PathElement::new(vec![(x, 0.0), (x, y)], color)),
            )?;
            chart.draw_series(
                visible
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 3, color.filled())),
            )?;
        }
        PanelContent::Phasors { phasors, circle_radii } => {
            phasor_diagram::draw(chart, phasors, circle_radii, x_view)?;
        }
    }
    Ok(())
}

fn draw_traces<'a, CT>(chart: &mut ChartContext<'a, BitMapBackend<'a>, CT>, traces: &[Trace]) -> DrawResult
where
    CT: CoordTranslate<From = (f64, f64)>,
{
    let mut has_legend = false;
    for trace in traces {
        let color = named_color(&trace.color);
        let style = color.stroke_width(trace.stroke_width);
        let series = if trace.dashed {
            chart.draw_series(DashedLineSeries::new(
                trace.points.iter().copied(),
                DASH_LENGTH,
                DASH_GAP,
                style,
            ))?
        } else {
            chart.draw_series(LineSeries::new(trace.points.iter().copied(), style))?
        };
        if let Some(label) = &trace.label {
            has_legend = true;
            let swatch = color.stroke_width(trace.stroke_width.max(LEGEND_STROKE));
            series
                .label(label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], swatch));
        }
        if trace.markers {
            chart.draw_series(
                trace
                    .points
                    .iter()
                    .map(|&p| Circle::new(p, 4, color.filled())),
            )?;
        }
    }
    if has_legend {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Trace;

    #[test]
    fn test_padded_range() {
        assert_eq!(padded_range([0.0, 10.0], 0.1), Some((-1.0, 11.0)));
        assert_eq!(padded_range([2.0, 2.0], 0.1), Some((1.0, 3.0)));
        assert_eq!(padded_range([f64::NAN], 0.1), None);
        assert_eq!(padded_range(Vec::<f64>::new(), 0.1), None);
    }

    #[test]
    fn test_log_range_ignores_non_positive() {
        assert_eq!(log_range([0.0, -1.0, 0.01, 0.2]), Some((0.005, 0.4)));
        assert_eq!(log_range([0.0]), None);
    }

    #[test]
    fn test_panel_ranges_follow_visible_window() {
        let panel = Panel::new(
            "t",
            "x",
            "y",
            PanelContent::Lines(vec![Trace::new("k", vec![(0.0, 0.0), (1.0, 1.0), (5.0, 100.0)])]),
        )
        .x_range(0.0, 1.0);
        let (x, y) = panel_ranges(&panel);
        assert_eq!(x, (0.0, 1.0));
        // the point at x = 5 is outside the window and must not stretch y
        assert!(y.1 < 2.0, "y range {y:?}");
    }

    #[test]
    fn test_stem_ranges_include_zero() {
        let panel = Panel::new(
            "s",
            "f",
            "A",
            PanelContent::Stems {
                color: "b".into(),
                points: vec![(50.0, 1.0), (120.0, 0.5)],
            },
        );
        let (_, y) = panel_ranges(&panel);
        assert!(y.0 <= 0.0 && y.1 >= 1.0);
    }

    #[test]
    fn test_log_tick_label_has_no_float_noise() {
        assert_eq!(log_tick_label(&0.4000000004), "4e-1");
        assert_eq!(log_tick_label(&0.01), "1e-2");
        assert_eq!(log_tick_label(&100.0), "1e2");
    }

    #[test]
    fn test_fixed_ranges_win() {
        let panel = Panel::new("s", "f", "A", PanelContent::Lines(Vec::new()))
            .x_range(-2.0, 2.0)
            .y_range(-3.0, 3.0);
        assert_eq!(panel_ranges(&panel), ((-2.0, 2.0), (-3.0, 3.0)));
    }
}
