//! Rendering of the two-panel solve-rate figure.

pub mod clip;
pub mod figure;
pub mod layout;
pub mod style;

pub use figure::{render_figure, Figure, FigureError, RenderedFigure};
