//! Physical size of the figure and the fixed axes of each panel.

use std::ops::Range;

use results_data::panels::Panel;

use crate::clip::ClipRect;

/// Figure width in inches.
pub const FIGURE_WIDTH_IN: f64 = 6.0;

/// Figure height in inches.
pub const FIGURE_HEIGHT_IN: f64 = 3.15;

/// Share of the figure height reserved for the legend strip.
pub const LEGEND_HEIGHT_FRACTION: f64 = 0.1;

/// Typographic points per inch.
const POINTS_PER_INCH: f64 = 72.0;

// ── FigureGeometry ────────────────────────────────────────────────────────────

/// Pixel dimensions and point-to-pixel scale for one output resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureGeometry {
    pub width_px: u32,
    pub height_px: u32,
    /// Pixels per typographic point.
    pub scale: f64,
}

impl FigureGeometry {
    pub fn for_dpi(dpi: u32) -> Self {
        let dpi = f64::from(dpi.max(1));
        Self {
            width_px: (FIGURE_WIDTH_IN * dpi).round() as u32,
            height_px: (FIGURE_HEIGHT_IN * dpi).round() as u32,
            scale: dpi / POINTS_PER_INCH,
        }
    }

    /// Convert a length in points to pixels.
    pub fn px(&self, points: f64) -> f64 {
        points * self.scale
    }

    /// Convert a length in points to whole pixels, never less than one.
    pub fn px_u32(&self, points: f64) -> u32 {
        (self.px(points).round() as u32).max(1)
    }

    pub fn legend_height_px(&self) -> u32 {
        (f64::from(self.height_px) * LEGEND_HEIGHT_FRACTION).round() as u32
    }
}

// ── PanelLayout ───────────────────────────────────────────────────────────────

/// Fixed axis configuration of one panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelLayout {
    pub x_desc: &'static str,
    /// `None` when the panel shares the y label of its left neighbour.
    pub y_desc: Option<&'static str>,
    pub x_range: Range<f64>,
    pub x_ticks: &'static [i64],
    pub y_range: Range<f64>,
}

pub const HORIZON_LAYOUT: PanelLayout = PanelLayout {
    x_desc: "Execution Horizon, K",
    y_desc: Some("Solve Rate"),
    x_range: 0.6..7.4,
    x_ticks: &[1, 2, 3, 4, 5, 6, 7],
    y_range: 0.73..0.92,
};

pub const DELAY_LAYOUT: PanelLayout = PanelLayout {
    x_desc: "Inference Delay, \u{0394}",
    y_desc: None,
    x_range: -0.3..4.3,
    x_ticks: &[0, 1, 2, 3, 4],
    y_range: 0.48..1.02,
};

impl PanelLayout {
    pub fn for_panel(panel: Panel) -> &'static PanelLayout {
        match panel {
            Panel::ExecutionHorizon => &HORIZON_LAYOUT,
            Panel::InferenceDelay => &DELAY_LAYOUT,
        }
    }

    /// The visible data rectangle of this panel.
    pub fn clip_rect(&self) -> ClipRect {
        ClipRect::new(&self.x_range, &self.y_range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_at_300_dpi() {
        let geometry = FigureGeometry::for_dpi(300);
        assert_eq!(geometry.width_px, 1800);
        assert_eq!(geometry.height_px, 945);
        assert!((geometry.px(12.0) - 50.0).abs() < 1e-9);
        assert_eq!(geometry.legend_height_px(), 95);
    }

    #[test]
    fn test_geometry_at_72_dpi_is_one_to_one() {
        let geometry = FigureGeometry::for_dpi(72);
        assert_eq!(geometry.width_px, 432);
        assert!((geometry.scale - 1.0).abs() < 1e-12);
        assert_eq!(geometry.px_u32(2.5), 3);
    }

    #[test]
    fn test_geometry_px_u32_never_zero() {
        let geometry = FigureGeometry::for_dpi(1);
        assert_eq!(geometry.px_u32(0.1), 1);
    }

    #[test]
    fn test_layout_ticks_lie_inside_range() {
        for layout in [&HORIZON_LAYOUT, &DELAY_LAYOUT] {
            for &tick in layout.x_ticks {
                assert!(layout.x_range.contains(&(tick as f64)), "{tick}");
            }
        }
    }

    #[test]
    fn test_layout_for_panel() {
        let horizon = PanelLayout::for_panel(Panel::ExecutionHorizon);
        assert_eq!(horizon.y_desc, Some("Solve Rate"));
        assert_eq!(horizon.x_ticks.len(), 7);

        let delay = PanelLayout::for_panel(Panel::InferenceDelay);
        assert_eq!(delay.y_desc, None);
        assert_eq!(delay.x_ticks, &[0, 1, 2, 3, 4]);
        assert!(delay.y_range.contains(&1.0));
    }

    #[test]
    fn test_horizon_clip_rect_hides_low_solve_rates() {
        let clip = HORIZON_LAYOUT.clip_rect();
        assert!(clip.contains((3.0, 0.85)));
        assert!(!clip.contains((3.0, 0.60)));

        let line = [(1.0, 0.60), (2.0, 0.59), (3.0, 0.58)];
        assert!(clip.clip_polyline(&line).is_empty());
    }
}
