//! Two-panel solve-rate figure rendered to a raster and a vector file.

use std::fs;
use std::path::{Path, PathBuf};

use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use results_core::error::ResultsError;
use results_core::methods::{LineKind, MethodStyle, METHOD_STYLES};
use results_core::models::ResultRow;
use results_data::panels::{build_panel_series, MethodSeries, Panel};
use thiserror::Error;
use tracing::{debug, info};

use crate::clip::{ClipRect, Point};
use crate::layout::{FigureGeometry, PanelLayout};
use crate::style::{
    marker_outline, method_color, BAND_ALPHA, LINE_ALPHA, LINE_WIDTH_PT, MARKER_SIZE_PT,
};

const FONT_FAMILY: &str = "sans-serif";
const AXIS_LABEL_PT: f64 = 12.0;
const TICK_LABEL_PT: f64 = 11.0;
const LEGEND_PT: f64 = 11.0;
const GRID_ALPHA: f64 = 0.3;

/// Extension of the vector companion written next to the raster output.
pub const VECTOR_EXTENSION: &str = "svg";

#[derive(Error, Debug)]
pub enum FigureError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Invalid output path {0}: raster and vector outputs would collide")]
    OutputCollision(PathBuf),

    #[error("Failed to prepare output directory: {0}")]
    OutputDir(#[from] std::io::Error),

    #[error(transparent)]
    Style(#[from] ResultsError),
}

pub type Result<T> = std::result::Result<T, FigureError>;

/// Per-panel series ready to draw.
#[derive(Debug, Clone)]
pub struct Figure {
    panels: Vec<(Panel, Vec<MethodSeries>)>,
}

/// Paths written by [`render_figure`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFigure {
    pub raster: PathBuf,
    pub vector: PathBuf,
}

impl Figure {
    pub fn from_rows(rows: &[ResultRow], confidence: f64) -> Self {
        let panels = Panel::ALL
            .iter()
            .map(|&panel| (panel, build_panel_series(panel, rows, confidence)))
            .collect();
        Self { panels }
    }

    pub fn series(&self, panel: Panel) -> &[MethodSeries] {
        self.panels
            .iter()
            .find(|(p, _)| *p == panel)
            .map(|(_, series)| series.as_slice())
            .unwrap_or(&[])
    }

    /// Methods drawn on either panel, in style-table order.
    pub fn legend_entries(&self) -> Vec<&'static MethodStyle> {
        METHOD_STYLES
            .iter()
            .filter(|style| {
                self.panels
                    .iter()
                    .flat_map(|(_, series)| series)
                    .any(|s| s.style.key == style.key)
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.iter().all(|(_, series)| series.is_empty())
    }
}

/// Vector companion path for `raster`: same stem, `.svg` extension.
///
/// Rejects a raster path that already ends in `.svg`, since both renders
/// would target the same file.
pub fn vector_path(raster: &Path) -> Result<PathBuf> {
    let is_vector = raster
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case(VECTOR_EXTENSION))
        .unwrap_or(false);
    if is_vector {
        return Err(FigureError::OutputCollision(raster.to_path_buf()));
    }
    Ok(raster.with_extension(VECTOR_EXTENSION))
}

/// Render `figure` to `output` and to its vector companion.
///
/// Missing parent directories are created. If the vector render fails the
/// raster file is removed again.
pub fn render_figure(figure: &Figure, output: &Path, dpi: u32) -> Result<RenderedFigure> {
    let vector = vector_path(output)?;
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let geometry = FigureGeometry::for_dpi(dpi);
    let size = (geometry.width_px, geometry.height_px);
    debug!(
        "Rendering {}x{} px figure at {} dpi",
        geometry.width_px, geometry.height_px, dpi
    );

    {
        let root = BitMapBackend::new(output, size).into_drawing_area();
        draw_figure(&root, figure, &geometry)?;
        root.present().map_err(|e| FigureError::Drawing(e.to_string()))?;
    }

    let vector_result = {
        let root = SVGBackend::new(&vector, size).into_drawing_area();
        draw_figure(&root, figure, &geometry)
            .and_then(|()| root.present().map_err(|e| FigureError::Drawing(e.to_string())))
    };
    if let Err(e) = vector_result {
        let _ = fs::remove_file(output);
        return Err(e);
    }

    info!("Figure written to {} and {}", output.display(), vector.display());
    Ok(RenderedFigure {
        raster: output.to_path_buf(),
        vector,
    })
}

/// Draw the legend strip and both panels onto `root`.
pub fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &Figure,
    geometry: &FigureGeometry,
) -> Result<()> {
    root.fill(&WHITE).map_err(|e| FigureError::DrawingArea(e.to_string()))?;

    let (legend_area, body) = root.split_vertically(geometry.legend_height_px());
    let (left, right) = body.split_horizontally(geometry.width_px / 2);

    draw_legend(&legend_area, &figure.legend_entries(), geometry)?;
    for (area, panel) in [(&left, Panel::ExecutionHorizon), (&right, Panel::InferenceDelay)] {
        draw_panel(
            area,
            PanelLayout::for_panel(panel),
            figure.series(panel),
            geometry,
        )?;
    }
    Ok(())
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    layout: &PanelLayout,
    series: &[MethodSeries],
    geometry: &FigureGeometry,
) -> Result<()> {
    let mut chart = ChartBuilder::on(area)
        .margin(geometry.px_u32(6.0))
        .x_label_area_size(geometry.px_u32(30.0))
        .y_label_area_size(geometry.px_u32(40.0))
        .build_cartesian_2d(layout.x_range.clone(), layout.y_range.clone())
        .map_err(|e| FigureError::ChartConfig(e.to_string()))?;

    let mut mesh = chart.configure_mesh();
    mesh.x_labels(layout.x_ticks.len())
        .y_labels(5)
        .x_label_formatter(&|x| format!("{:.0}", x))
        .y_label_formatter(&|y| format!("{:.2}", y))
        .x_desc(layout.x_desc)
        .label_style((FONT_FAMILY, geometry.px(TICK_LABEL_PT)))
        .axis_desc_style((FONT_FAMILY, geometry.px(AXIS_LABEL_PT)))
        .bold_line_style(BLACK.mix(GRID_ALPHA))
        .light_line_style(TRANSPARENT);
    if let Some(y_desc) = layout.y_desc {
        mesh.y_desc(y_desc);
    }
    mesh.draw().map_err(|e| FigureError::ChartConfig(e.to_string()))?;

    let clip = layout.clip_rect();
    let marker_radius = (geometry.px(MARKER_SIZE_PT) / 2.0).round() as i32;
    for method in series {
        draw_method(&mut chart, method, &clip, marker_radius, geometry)?;
    }
    Ok(())
}

fn draw_method<DB: DrawingBackend>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    method: &MethodSeries,
    clip: &ClipRect,
    marker_radius: i32,
    geometry: &FigureGeometry,
) -> Result<()> {
    let color = method_color(method.style)?;

    // Upper edge left to right, then lower edge back.
    let band: Vec<Point> = method
        .points
        .iter()
        .map(|p| (p.x as f64, p.interval.upper))
        .chain(
            method
                .points
                .iter()
                .rev()
                .map(|p| (p.x as f64, p.interval.lower)),
        )
        .collect();
    let band = clip.clip_polygon(&band);
    if !band.is_empty() {
        chart
            .draw_series(std::iter::once(Polygon::new(
                band,
                color.mix(BAND_ALPHA).filled(),
            )))
            .map_err(|e| FigureError::Drawing(e.to_string()))?;
    }

    let line: Vec<Point> = method
        .points
        .iter()
        .map(|p| (p.x as f64, p.mean))
        .collect();
    let line_style = color
        .mix(LINE_ALPHA)
        .stroke_width(geometry.px_u32(LINE_WIDTH_PT));
    for run in clip.clip_polyline(&line) {
        match method.style.line {
            LineKind::Solid => chart.draw_series(LineSeries::new(run, line_style)),
            LineKind::Dashed => chart.draw_series(DashedLineSeries::new(
                run,
                geometry.px_u32(6.0),
                geometry.px_u32(3.0),
                line_style,
            )),
        }
        .map_err(|e| FigureError::Drawing(e.to_string()))?;
    }

    let outline = marker_outline(method.style.marker, marker_radius);
    let marker_style = color.mix(LINE_ALPHA).filled();
    chart
        .draw_series(
            line.iter()
                .filter(|&&point| clip.contains(point))
                .map(|&point| EmptyElement::at(point) + Polygon::new(outline.clone(), marker_style)),
        )
        .map_err(|e| FigureError::Drawing(e.to_string()))?;

    Ok(())
}

/// One centred row of handle, marker and label per method.
fn draw_legend<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    entries: &[&'static MethodStyle],
    geometry: &FigureGeometry,
) -> Result<()> {
    if entries.is_empty() {
        return Ok(());
    }

    let text_style = TextStyle::from((FONT_FAMILY, geometry.px(LEGEND_PT)))
        .pos(Pos::new(HPos::Left, VPos::Center));
    let handle = geometry.px(20.0).round() as i32;
    let gap = geometry.px(5.0).round() as i32;
    let spacing = geometry.px(12.0).round() as i32;
    let marker_radius = (geometry.px(MARKER_SIZE_PT) / 2.0).round() as i32;

    let mut widths = Vec::with_capacity(entries.len());
    for style in entries {
        let (w, _) = area
            .estimate_text_size(style.label, &text_style)
            .map_err(|e| FigureError::Drawing(e.to_string()))?;
        widths.push(w as i32);
    }
    let total: i32 = widths.iter().map(|w| handle + gap + w).sum::<i32>()
        + spacing * (entries.len() as i32 - 1);

    let (width, height) = area.dim_in_pixel();
    let mut x = ((width as i32 - total) / 2).max(0);
    let y = height as i32 / 2;

    for (style, w) in entries.iter().zip(widths) {
        let color = method_color(style)?;
        let line_style = color
            .mix(LINE_ALPHA)
            .stroke_width(geometry.px_u32(LINE_WIDTH_PT));

        let segments = match style.line {
            LineKind::Solid => vec![(x, x + handle)],
            LineKind::Dashed => {
                let dash = handle / 4;
                vec![(x, x + dash), (x + handle - dash, x + handle)]
            }
        };
        for (x0, x1) in segments {
            area.draw(&PathElement::new(vec![(x0, y), (x1, y)], line_style))
                .map_err(|e| FigureError::Drawing(e.to_string()))?;
        }

        let outline = marker_outline(style.marker, marker_radius);
        area.draw(
            &(EmptyElement::at((x + handle / 2, y))
                + Polygon::new(outline, color.mix(LINE_ALPHA).filled())),
        )
        .map_err(|e| FigureError::Drawing(e.to_string()))?;

        area.draw(&Text::new(style.label, (x + handle + gap, y), text_style.clone()))
            .map_err(|e| FigureError::Drawing(e.to_string()))?;

        x += handle + gap + w + spacing;
    }
    Ok(())
}
