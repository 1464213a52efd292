pub mod chart;
pub mod colors;
pub mod phasor_diagram;

use crate::error::{LabError, LabResult};
use crate::types::Figure;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

/// Render `figure` as a PNG inside `out_dir`, returning the written path.
///
/// `default_size` applies when the figure carries no size of its own.
pub fn render_figure(figure: &Figure, out_dir: &Path, default_size: (u32, u32)) -> LabResult<PathBuf> {
    std::fs::create_dir_all(out_dir)?;
    let path = out_dir.join(&figure.file_name);
    let size = figure.size.unwrap_or(default_size);

    draw_figure(figure, &path, size).map_err(|e| LabError::Render {
        path: path.clone(),
        message: e.to_string(),
    })?;

    log::info!("wrote {}", path.display());
    Ok(path)
}

fn draw_figure(figure: &Figure, path: &Path, size: (u32, u32)) -> chart::DrawResult {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;
    let areas = root.split_evenly((figure.rows.max(1), figure.cols.max(1)));

    if figure.panels.len() > areas.len() {
        log::warn!(
            "{}: {} panels for a {}x{} grid, extra panels dropped",
            figure.file_name,
            figure.panels.len(),
            figure.rows,
            figure.cols
        );
    }
    for (area, panel) in areas.iter().zip(figure.panels.iter()) {
        chart::draw_panel(area, panel)?;
    }

    root.present()?;
    Ok(())
}
