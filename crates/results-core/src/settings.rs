use clap::{Args, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

use crate::stats::DEFAULT_CONFIDENCE;

// ── Shared logging flags ───────────────────────────────────────────────────────

/// Logging flags shared by both tools.
#[derive(Args, Debug, Clone)]
pub struct LogSettings {
    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl LogSettings {
    /// Apply the `--debug` override.
    fn resolve(mut self) -> Self {
        if self.debug {
            self.log_level = "DEBUG".to_string();
        }
        self
    }
}

// ── MergeSettings (CLI) ────────────────────────────────────────────────────────

/// Merge parallel evaluation results
#[derive(Parser, Debug, Clone)]
#[command(
    name = "merge-results",
    about = "Merge parallel evaluation results",
    version
)]
pub struct MergeSettings {
    /// Directory containing results_part_*.csv shards
    #[arg(long)]
    pub input_dir: PathBuf,

    /// Path of the merged CSV file
    #[arg(long)]
    pub output: PathBuf,

    #[command(flatten)]
    pub logging: LogSettings,
}

impl MergeSettings {
    /// Parse the process arguments.
    pub fn load() -> Self {
        Self::from_args(std::env::args_os().collect())
    }

    /// Parse an explicit argument list (the first item is the binary name).
    pub fn from_args(args: Vec<OsString>) -> Self {
        let mut settings = Self::parse_from(args);
        settings.logging = settings.logging.resolve();
        settings
    }
}

// ── FigureSettings (CLI) ───────────────────────────────────────────────────────

/// Generate the execution horizon / inference delay solve-rate figure
#[derive(Parser, Debug, Clone)]
#[command(
    name = "plot-figure",
    about = "Generate the execution horizon and inference delay solve-rate figure",
    version
)]
pub struct FigureSettings {
    /// Merged results CSV
    #[arg(long, default_value = "eval_output/results.csv")]
    pub input_file: PathBuf,

    /// Raster output path; an .svg copy is written next to it
    #[arg(long, default_value = "eval_outputs/paper_figure6.png")]
    pub output_file: PathBuf,

    /// Raster resolution in dots per inch
    #[arg(long, default_value = "300", value_parser = clap::value_parser!(u32).range(1..))]
    pub dpi: u32,

    /// Two-sided confidence level of the shaded bands
    #[arg(long, default_value_t = DEFAULT_CONFIDENCE, value_parser = parse_confidence)]
    pub confidence: f64,

    #[command(flatten)]
    pub logging: LogSettings,
}

impl FigureSettings {
    /// Parse the process arguments.
    pub fn load() -> Self {
        Self::from_args(std::env::args_os().collect())
    }

    /// Parse an explicit argument list (the first item is the binary name).
    pub fn from_args(args: Vec<OsString>) -> Self {
        let mut settings = Self::parse_from(args);
        settings.logging = settings.logging.resolve();
        settings
    }
}

/// Value parser for `--confidence`: a float strictly inside `(0, 1)`.
fn parse_confidence(value: &str) -> Result<f64, String> {
    let confidence: f64 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if confidence > 0.0 && confidence < 1.0 {
        Ok(confidence)
    } else {
        Err(format!("confidence must lie strictly between 0 and 1, got {value}"))
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
