use signal_lab_core::dsp::phasor::Phasor;

/// One polyline on a chart.
#[derive(Clone, Debug)]
pub struct Trace {
    pub label: Option<String>,
    pub color: String,
    pub stroke_width: u32,
    /// Draw a dot on every point
    pub markers: bool,
    pub dashed: bool,
    pub points: Vec<(f64, f64)>,
}

impl Trace {
    pub fn new(color: &str, points: Vec<(f64, f64)>) -> Self {
        Self {
            label: None,
            color: color.to_string(),
            stroke_width: 1,
            markers: false,
            dashed: false,
            points,
        }
    }

    /// A trace over a shared time base.
    pub fn from_xy(color: &str, x: &[f64], y: &[f64]) -> Self {
        Self::new(color, x.iter().copied().zip(y.iter().copied()).collect())
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn width(mut self, stroke_width: u32) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    pub fn with_markers(mut self) -> Self {
        self.markers = true;
        self
    }

    pub fn dashed(mut self) -> Self {
        self.dashed = true;
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum YScale {
    #[default]
    Linear,
    Log,
}

#[derive(Clone, Debug)]
pub enum PanelContent {
    Lines(Vec<Trace>),
    /// Vertical stems from zero with a dot on top, one per `(x, y)`
    Stems { color: String, points: Vec<(f64, f64)> },
    Phasors { phasors: Vec<Phasor>, circle_radii: Vec<f64> },
}

/// One chart inside a figure.
#[derive(Clone, Debug)]
pub struct Panel {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    /// Fixed axis ranges; derived from the data when absent
    pub x_range: Option<(f64, f64)>,
    pub y_range: Option<(f64, f64)>,
    pub y_scale: YScale,
    pub content: PanelContent,
}

impl Panel {
    pub fn new(title: impl Into<String>, x_desc: &str, y_desc: &str, content: PanelContent) -> Self {
        Self {
            title: title.into(),
            x_desc: x_desc.to_string(),
            y_desc: y_desc.to_string(),
            x_range: None,
            y_range: None,
            y_scale: YScale::Linear,
            content,
        }
    }

    pub fn x_range(mut self, lo: f64, hi: f64) -> Self {
        self.x_range = Some((lo, hi));
        self
    }

    pub fn y_range(mut self, lo: f64, hi: f64) -> Self {
        self.y_range = Some((lo, hi));
        self
    }

    pub fn log_y(mut self) -> Self {
        self.y_scale = YScale::Log;
        self
    }

    /// Every data point of the panel, for range estimation.
    pub fn points(&self) -> Vec<(f64, f64)> {
        match &self.content {
            PanelContent::Lines(traces) => traces
                .iter()
                .flat_map(|t| t.points.iter().copied())
                .collect(),
            PanelContent::Stems { points, .. } => {
                let mut all = points.clone();
                all.extend(points.iter().map(|&(x, _)| (x, 0.0)));
                all
            }
            PanelContent::Phasors { phasors, circle_radii } => {
                let mut all: Vec<(f64, f64)> = phasors
                    .iter()
                    .map(|p| {
                        let tip = p.to_cartesian();
                        (tip.x, tip.y)
                    })
                    .collect();
                all.extend(circle_radii.iter().flat_map(|&r| [(r, r), (-r, -r)]));
                all.push((0.0, 0.0));
                all
            }
        }
    }
}

/// A figure written to one image file, panels laid out in a `rows × cols` grid.
#[derive(Clone, Debug)]
pub struct Figure {
    pub file_name: String,
    pub rows: usize,
    pub cols: usize,
    /// Pixel size; the configured default when absent
    pub size: Option<(u32, u32)>,
    pub panels: Vec<Panel>,
}

impl Figure {
    pub fn new(file_name: impl Into<String>, rows: usize, cols: usize, panels: Vec<Panel>) -> Self {
        Self {
            file_name: file_name.into(),
            rows,
            cols,
            size: None,
            panels,
        }
    }

    pub fn single(file_name: impl Into<String>, panel: Panel) -> Self {
        Self::new(file_name, 1, 1, vec![panel])
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.size = Some((width, height));
        self
    }
}
